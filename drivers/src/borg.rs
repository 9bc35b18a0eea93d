/*++

Licensed under the Apache-2.0 license.

File Name:

    borg.rs

Abstract:

    File contains API for executing operations on the Borg floating point
    coprocessor.

--*/

use borg_error::{BorgError, BorgResult};
use borg_registers::{BorgReg, Control, InstructionWord, Status};
use ureg::{MmioMut, RealMmioMut};

use crate::{encode, wait, BorgOp, DiagConfig, HwRevision};

/// Coprocessor execution state, as last observed by the driver.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ExecutionStatus {
    /// Nothing launched yet
    Idle,

    /// Start written; halt flag not yet observed. Only held inside
    /// `execute()` while polling, so `status()` never reports it between
    /// calls.
    Running,

    /// Operation complete; result register is valid
    Halted,

    /// Halt flag never observed within the poll budget
    TimedOut,
}

/// A strategy for running one floating point addition on the coprocessor.
pub trait CoprocAlg {
    /// Load `a` and `b`, run `a + b` and return the raw bit pattern of the
    /// destination register.
    ///
    /// # Error
    ///
    /// * `DRIVER_BORG_HALT_TIMEOUT` - the coprocessor never halted
    fn execute(&mut self, a: f32, b: f32) -> BorgResult<u32>;

    fn status(&self) -> ExecutionStatus;
}

/// Driver for the revision with instruction memory and a halt flag.
///
/// Every case fully reloads the coprocessor state, so repeated runs of the
/// same operands are independent.
pub struct BorgHandshake<TMmio: MmioMut = RealMmioMut<'static>> {
    regs: BorgReg<TMmio>,
    poll_budget: u32,
    reset_delay: u32,
    status: ExecutionStatus,
    polls: u32,
}

impl<TMmio: MmioMut> BorgHandshake<TMmio> {
    /// # Arguments
    ///
    /// * `regs`        - Register block; must describe a status register and
    ///                   instruction memory
    /// * `poll_budget` - Maximum number of status register reads per case
    /// * `reset_delay` - Iterations to wait after asserting reset
    pub fn new(regs: BorgReg<TMmio>, poll_budget: u32, reset_delay: u32) -> BorgResult<Self> {
        if regs.status().is_none() || regs.imem(0).is_none() {
            return Err(BorgError::DRIVER_BORG_NO_STATUS_REG);
        }
        Ok(Self {
            regs,
            poll_budget,
            reset_delay,
            status: ExecutionStatus::Idle,
            polls: 0,
        })
    }

    /// Status register reads made by the last `execute()`.
    pub fn last_poll_count(&self) -> u32 {
        self.polls
    }

    fn load_program(&self, program: &[InstructionWord]) -> BorgResult<()> {
        for (slot, word) in (0u32..).zip(program) {
            self.regs
                .imem(slot)
                .ok_or(BorgError::DRIVER_BORG_NO_STATUS_REG)?
                .write(word.bits());
        }
        Ok(())
    }
}

impl<TMmio: MmioMut> CoprocAlg for BorgHandshake<TMmio> {
    fn execute(&mut self, a: f32, b: f32) -> BorgResult<u32> {
        ctrace!("  [Debug] Resetting PC...");
        self.regs.write_control(Control::RESET);
        wait::spin(self.reset_delay);

        ctrace!("  [Debug] Loading Operands...");
        self.regs.operand0().write(a.to_bits());
        self.regs.operand1().write(b.to_bits());

        ctrace!("  [Debug] Loading Program...");
        self.load_program(&[encode(BorgOp::FAdd), InstructionWord::HALT])?;

        ctrace!("  [Debug] Starting Execution...");
        self.regs.write_control(Control::START);
        self.status = ExecutionStatus::Running;

        ctrace!("  [Debug] Polling for Halt...");
        let status_reg = self
            .regs
            .status()
            .ok_or(BorgError::DRIVER_BORG_NO_STATUS_REG)?;
        let halted = wait::until_or_timeout(self.poll_budget, || {
            Status::from(status_reg.read()).contains(Status::HALTED)
        });
        match halted {
            Some(polls) => self.polls = polls,
            None => {
                self.polls = self.poll_budget;
                self.status = ExecutionStatus::TimedOut;
                return Err(BorgError::DRIVER_BORG_HALT_TIMEOUT);
            }
        }
        self.status = ExecutionStatus::Halted;

        ctrace!("  [Debug] Halting manually...");
        self.regs.write_control(Control::empty());

        ctrace!("  [Debug] Reading result...");
        Ok(self.regs.result().read())
    }

    fn status(&self) -> ExecutionStatus {
        self.status
    }
}

/// Driver for the revision that completes within the bus latency of a
/// write followed by a read.
pub struct BorgSync<TMmio: MmioMut = RealMmioMut<'static>> {
    regs: BorgReg<TMmio>,
    status: ExecutionStatus,
}

impl<TMmio: MmioMut> BorgSync<TMmio> {
    pub fn new(regs: BorgReg<TMmio>) -> Self {
        Self {
            regs,
            status: ExecutionStatus::Idle,
        }
    }
}

impl<TMmio: MmioMut> CoprocAlg for BorgSync<TMmio> {
    fn execute(&mut self, a: f32, b: f32) -> BorgResult<u32> {
        ctrace!("  [Debug] Loading Operands...");
        self.regs.operand0().write(a.to_bits());
        self.regs.operand1().write(b.to_bits());

        ctrace!("  [Debug] Issuing Instruction...");
        self.regs.control().write(encode(BorgOp::FAdd).bits());

        ctrace!("  [Debug] Reading result...");
        let result = self.regs.result().read();
        self.status = ExecutionStatus::Halted;
        Ok(result)
    }

    fn status(&self) -> ExecutionStatus {
        self.status
    }
}

/// Coprocessor driver for whichever hardware revision is configured.
pub enum Borg<TMmio: MmioMut = RealMmioMut<'static>> {
    Handshake(BorgHandshake<TMmio>),
    Sync(BorgSync<TMmio>),
}

impl Borg<RealMmioMut<'static>> {
    /// Driver over the real coprocessor at the address the configured
    /// revision defines.
    ///
    /// # Safety
    ///
    /// Only valid on the target hardware, and only one driver may exist.
    pub unsafe fn new(config: &DiagConfig) -> BorgResult<Self> {
        Self::with_regs(config, BorgReg::new(config.register_map()))
    }
}

impl<TMmio: MmioMut> Borg<TMmio> {
    pub fn with_regs(config: &DiagConfig, regs: BorgReg<TMmio>) -> BorgResult<Self> {
        config.validate()?;
        match config.revision {
            HwRevision::Handshake => Ok(Self::Handshake(BorgHandshake::new(
                regs,
                config.poll_budget,
                config.reset_delay,
            )?)),
            HwRevision::Sync => Ok(Self::Sync(BorgSync::new(regs))),
        }
    }
}

impl<TMmio: MmioMut> CoprocAlg for Borg<TMmio> {
    fn execute(&mut self, a: f32, b: f32) -> BorgResult<u32> {
        match self {
            Self::Handshake(borg) => borg.execute(a, b),
            Self::Sync(borg) => borg.execute(a, b),
        }
    }

    fn status(&self) -> ExecutionStatus {
        match self {
            Self::Handshake(borg) => borg.status(),
            Self::Sync(borg) => borg.status(),
        }
    }
}
