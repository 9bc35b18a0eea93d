/*++

Licensed under the Apache-2.0 license.

File Name:

    main.rs

Abstract:

    File contains the firmware entry point of the Borg coprocessor diagnostic.

--*/
#![no_std]
#![no_main]

use borg_diag::{BatchRunner, Reporter, TEST_VECTORS, VECTOR_EPSILON};
use borg_drivers::printer::Printer;
use borg_drivers::{cprintln, Borg, DiagConfig, Mcycle};
use panic_halt as _;
use riscv_rt::entry;

#[entry]
fn main() -> ! {
    let config = DiagConfig::new().with_epsilon(VECTOR_EPSILON);

    match unsafe { Borg::new(&config) } {
        Ok(borg) => {
            let mut runner = BatchRunner::new(borg, Mcycle, config.epsilon);
            runner.run(&TEST_VECTORS, &mut Reporter::new(Printer));
        }
        Err(e) => cprintln!("[diag] Configuration rejected: {}", u32::from(e)),
    }

    loop {
        core::hint::spin_loop();
    }
}
