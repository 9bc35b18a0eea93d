/*++

Licensed under the Apache-2.0 license.

File Name:

    config.rs

Abstract:

    File contains the tunable parameters of a diagnostic run.

--*/

use borg_error::{BorgError, BorgResult};
use borg_registers::RegisterMap;

/// Iterations of the halt-flag poll before the coprocessor is declared hung.
pub const DEFAULT_POLL_BUDGET: u32 = 100_000;

/// Iterations to wait after asserting reset.
pub const DEFAULT_RESET_DELAY: u32 = 100;

/// Largest absolute difference from the software reference that still passes.
pub const DEFAULT_EPSILON: f32 = 1e-4;

/// Coprocessor hardware revision.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HwRevision {
    /// Micro-sequencer with instruction memory, start/reset control and a
    /// halt flag that must be polled.
    Handshake,

    /// Result is valid as soon as the instruction register is written.
    Sync,
}

impl HwRevision {
    /// Revision this firmware was built for.
    #[cfg(not(feature = "hw-sync"))]
    pub const CURRENT: Self = Self::Handshake;

    /// Revision this firmware was built for.
    #[cfg(feature = "hw-sync")]
    pub const CURRENT: Self = Self::Sync;

    pub const fn register_map(self) -> RegisterMap {
        match self {
            Self::Handshake => RegisterMap::HANDSHAKE,
            Self::Sync => RegisterMap::SYNC,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DiagConfig {
    pub revision: HwRevision,
    pub poll_budget: u32,
    pub reset_delay: u32,
    pub epsilon: f32,
}

impl Default for DiagConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagConfig {
    pub const fn new() -> Self {
        Self {
            revision: HwRevision::CURRENT,
            poll_budget: DEFAULT_POLL_BUDGET,
            reset_delay: DEFAULT_RESET_DELAY,
            epsilon: DEFAULT_EPSILON,
        }
    }

    pub const fn with_revision(self, revision: HwRevision) -> Self {
        Self { revision, ..self }
    }

    pub const fn with_poll_budget(self, poll_budget: u32) -> Self {
        Self {
            poll_budget,
            ..self
        }
    }

    pub const fn with_reset_delay(self, reset_delay: u32) -> Self {
        Self {
            reset_delay,
            ..self
        }
    }

    pub const fn with_epsilon(self, epsilon: f32) -> Self {
        Self { epsilon, ..self }
    }

    pub const fn register_map(&self) -> RegisterMap {
        self.revision.register_map()
    }

    pub fn validate(&self) -> BorgResult<()> {
        if self.poll_budget == 0 {
            return Err(BorgError::DIAG_CONFIG_ZERO_POLL_BUDGET);
        }
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(BorgError::DIAG_CONFIG_INVALID_EPSILON);
        }
        Ok(())
    }
}
