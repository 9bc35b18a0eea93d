/*++

Licensed under the Apache-2.0 license.

File Name:

    vectors.rs

Abstract:

    File contains the operand table shared with the hardware testbench.

--*/

use borg_drivers::TestVector;

include!(concat!(env!("OUT_DIR"), "/test_vectors.rs"));
