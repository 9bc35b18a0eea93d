/*++

Licensed under the Apache-2.0 license.

File Name:

    coprocessor.rs

Abstract:

    File contains the Borg floating point coprocessor device implementation.

--*/

use borg_emu_bus::testing::Log;
use borg_emu_bus::{Bus, BusError};
use borg_emu_types::{RvAddr, RvData, RvSize};
use borg_registers::{Control, InstructionWord, RegisterMap, Status};
use std::fmt::Write;

const REG_COUNT: usize = 32;
const IMEM_WORDS: u32 = 7;
const DEST: usize = 2;

/// Fault injected into one run, or every run.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Fault {
    /// Halt flag never rises
    Hang,

    /// Result is off by the given amount
    Bias(f32),
}

/// Emulated coprocessor.
///
/// The register map decides the revision: with a status register the device
/// runs its instruction memory on `START` and raises the halt flag after
/// `halt_latency` status reads; without one, writing the instruction register
/// executes that instruction at once.
///
/// Runs are numbered from 0, counting `START` writes (handshake) or
/// instruction writes (synchronous).
pub struct Coprocessor {
    map: RegisterMap,
    regs: [u32; REG_COUNT],
    imem: [u32; IMEM_WORDS as usize],
    running: bool,
    halted: bool,
    halt_latency: u32,
    polls: u32,
    runs: u32,
    faults: Vec<(Option<u32>, Fault)>,
    pub log: Log,
}

impl Coprocessor {
    pub fn new(map: RegisterMap) -> Self {
        Self {
            map,
            regs: [0; REG_COUNT],
            imem: [0; IMEM_WORDS as usize],
            running: false,
            halted: false,
            halt_latency: 0,
            polls: 0,
            runs: 0,
            faults: Vec::new(),
            log: Log::new(),
        }
    }

    pub fn handshake() -> Self {
        Self::new(RegisterMap::HANDSHAKE)
    }

    pub fn sync() -> Self {
        Self::new(RegisterMap::SYNC)
    }

    pub fn register_map(&self) -> RegisterMap {
        self.map
    }

    /// Number of status reads that see the device still running.
    pub fn with_halt_latency(mut self, polls: u32) -> Self {
        self.halt_latency = polls;
        self
    }

    /// Never raise the halt flag.
    pub fn with_hang(mut self) -> Self {
        self.faults.push((None, Fault::Hang));
        self
    }

    pub fn with_hang_on_run(mut self, run: u32) -> Self {
        self.faults.push((Some(run), Fault::Hang));
        self
    }

    /// Add `bias` to the result of run `run`.
    pub fn with_result_bias_on_run(mut self, run: u32, bias: f32) -> Self {
        self.faults.push((Some(run), Fault::Bias(bias)));
        self
    }

    /// Runs started so far.
    pub fn runs(&self) -> u32 {
        self.runs
    }

    fn is_handshake(&self) -> bool {
        self.map.status.is_some()
    }

    fn faults_for(&self, run: u32) -> impl Iterator<Item = Fault> + '_ {
        self.faults
            .iter()
            .filter(move |(r, _)| r.map_or(true, |r| r == run))
            .map(|(_, fault)| *fault)
    }

    fn hangs(&self, run: u32) -> bool {
        self.faults_for(run).any(|fault| fault == Fault::Hang)
    }

    fn bias(&self, run: u32) -> f32 {
        self.faults_for(run)
            .map(|fault| match fault {
                Fault::Bias(bias) => bias,
                Fault::Hang => 0.0,
            })
            .sum()
    }

    fn exec(&mut self, word: InstructionWord, run: u32) -> bool {
        if word.is_halt() {
            return false;
        }
        let is_fadd = word.opcode() == InstructionWord::OPCODE_OP_FP
            && word.funct3() == 0
            && word.funct7() == InstructionWord::FUNCT7_FADD_S;
        if !is_fadd {
            writeln!(self.log.w(), "illegal instruction {:#x}", word.bits()).unwrap();
            return false;
        }
        let a = f32::from_bits(self.regs[word.rs1() as usize]);
        let b = f32::from_bits(self.regs[word.rs2() as usize]);
        let sum = a + b + self.bias(run);
        let rd = word.rd() as usize;
        if rd != 0 || !self.is_handshake() {
            self.regs[rd] = sum.to_bits();
        }
        true
    }

    fn start(&mut self) {
        let run = self.runs;
        self.runs += 1;
        self.running = true;
        self.halted = false;
        self.polls = 0;
        for pc in 0..IMEM_WORDS as usize {
            if !self.exec(InstructionWord::from(self.imem[pc]), run) {
                break;
            }
        }
    }

    fn read_status(&mut self) -> RvData {
        writeln!(self.log.w(), "read status").unwrap();
        let hung = self.hangs(self.runs.wrapping_sub(1));
        if self.running && !self.halted && !hung {
            if self.polls >= self.halt_latency {
                self.halted = true;
            } else {
                self.polls += 1;
            }
        }
        if self.halted {
            Status::HALTED.bits()
        } else {
            0
        }
    }

    fn write_control(&mut self, val: RvData) {
        if !self.is_handshake() {
            writeln!(self.log.w(), "write instruction {val:#x}").unwrap();
            let run = self.runs;
            self.runs += 1;
            self.exec(InstructionWord::from(val), run);
            return;
        }
        writeln!(self.log.w(), "write control {val:#x}").unwrap();
        let control = Control::from_bits_truncate(val);
        if control.contains(Control::RESET) {
            self.running = false;
            self.halted = false;
        }
        if control.contains(Control::START) {
            self.start();
        }
        if control.is_empty() {
            self.running = false;
        }
    }
}

impl Bus for Coprocessor {
    fn read(&mut self, size: RvSize, addr: RvAddr) -> Result<RvData, BusError> {
        if size != RvSize::Word {
            return Err(BusError::LoadAccessFault);
        }
        let offset = addr.wrapping_sub(self.map.base);
        if offset == self.map.operand0 {
            Ok(self.regs[0])
        } else if offset == self.map.operand1 {
            Ok(self.regs[1])
        } else if offset == self.map.result {
            writeln!(self.log.w(), "read result").unwrap();
            Ok(self.regs[DEST])
        } else if Some(offset) == self.map.status {
            Ok(self.read_status())
        } else {
            Err(BusError::LoadAccessFault)
        }
    }

    fn write(&mut self, size: RvSize, addr: RvAddr, val: RvData) -> Result<(), BusError> {
        if size != RvSize::Word {
            return Err(BusError::StoreAccessFault);
        }
        let offset = addr.wrapping_sub(self.map.base);
        if offset == self.map.operand0 {
            writeln!(self.log.w(), "write operand0 {val:#x}").unwrap();
            self.regs[0] = val;
        } else if offset == self.map.operand1 {
            writeln!(self.log.w(), "write operand1 {val:#x}").unwrap();
            self.regs[1] = val;
        } else if offset == self.map.control {
            self.write_control(val);
        } else {
            let slot = self
                .map
                .imem
                .and_then(|imem| offset.checked_sub(imem))
                .map(|rel| rel / 4)
                .filter(|slot| *slot < IMEM_WORDS)
                .ok_or(BusError::StoreAccessFault)?;
            writeln!(self.log.w(), "write imem[{slot}] {val:#x}").unwrap();
            self.imem[slot as usize] = val;
        }
        Ok(())
    }
}
