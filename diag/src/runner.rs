/*++

Licensed under the Apache-2.0 license.

File Name:

    runner.rs

Abstract:

    File contains the batch runner that drives every test vector through the
    coprocessor and folds the outcomes into one verdict.

--*/

use borg_drivers::{CoprocAlg, CycleCounter, TestVector, Validation};
use borg_error::{BorgError, BorgResult};
use ufmt::uWrite;

use crate::Reporter;

/// How a single case ended.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CaseOutcome {
    /// Result matched the software reference
    Passed,

    /// Result differs from the software reference by epsilon or more
    ValidationFailure,

    /// Coprocessor never raised its halt flag
    HardwareTimeout,
}

impl CaseOutcome {
    pub fn passed(self) -> bool {
        self == Self::Passed
    }

    /// Error code describing a failed case.
    pub fn error(self) -> Option<BorgError> {
        match self {
            Self::Passed => None,
            Self::ValidationFailure => Some(BorgError::DIAG_VALIDATION_FAILURE),
            Self::HardwareTimeout => Some(BorgError::DRIVER_BORG_HALT_TIMEOUT),
        }
    }
}

/// Outcome of one test vector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TestResult {
    pub vector: TestVector,

    /// Comparison against the reference; `None` when the coprocessor hung
    pub validation: Option<Validation>,

    pub outcome: CaseOutcome,
}

impl TestResult {
    pub fn passed(&self) -> bool {
        self.outcome.passed()
    }

    pub fn result(&self) -> BorgResult<()> {
        match self.outcome.error() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Aggregate verdict of a batch.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct BatchSummary {
    /// Every case passed
    pub passed: bool,

    pub cases: u32,

    pub failures: u32,

    /// Failures caused by a hung coprocessor
    pub timeouts: u32,

    /// Cycle counter snapshot taken after the last case
    pub cycles: u32,
}

impl BatchSummary {
    fn new() -> Self {
        Self {
            passed: true,
            ..Default::default()
        }
    }

    fn record(&mut self, result: &TestResult) {
        self.cases += 1;
        self.passed &= result.passed();
        if !result.passed() {
            self.failures += 1;
        }
        if result.outcome == CaseOutcome::HardwareTimeout {
            self.timeouts += 1;
        }
    }
}

/// Runs test vectors strictly in order, one coprocessor sequence at a time.
pub struct BatchRunner<TAlg: CoprocAlg, TClock: CycleCounter> {
    alg: TAlg,
    clock: TClock,
    epsilon: f32,
}

impl<TAlg: CoprocAlg, TClock: CycleCounter> BatchRunner<TAlg, TClock> {
    /// # Arguments
    ///
    /// * `alg`     - Coprocessor driver
    /// * `clock`   - Source of the final diagnostic timestamp
    /// * `epsilon` - Largest difference from the reference that fails
    pub fn new(alg: TAlg, clock: TClock, epsilon: f32) -> Self {
        Self {
            alg,
            clock,
            epsilon,
        }
    }

    pub fn alg(&self) -> &TAlg {
        &self.alg
    }

    /// Execute and validate a single vector.
    pub fn run_case(&mut self, vector: TestVector) -> TestResult {
        // execute() only fails when the halt flag never rises
        let Ok(raw) = self.alg.execute(vector.a, vector.b) else {
            return TestResult {
                vector,
                validation: None,
                outcome: CaseOutcome::HardwareTimeout,
            };
        };
        let validation = Validation::check(vector, raw, self.epsilon);
        TestResult {
            vector,
            validation: Some(validation),
            outcome: if validation.passed {
                CaseOutcome::Passed
            } else {
                CaseOutcome::ValidationFailure
            },
        }
    }

    /// Run every vector and report each case as it completes.
    ///
    /// The batch always runs to the end; a failed case never stops it, and
    /// neither does a failing console sink.
    pub fn run<W: uWrite>(
        &mut self,
        vectors: &[TestVector],
        reporter: &mut Reporter<W>,
    ) -> BatchSummary {
        let _ = reporter.banner();

        let mut summary = BatchSummary::new();
        for vector in vectors {
            let result = self.run_case(*vector);
            let _ = reporter.case(&result);
            summary.record(&result);
        }

        summary.cycles = self.clock.cycles();
        let _ = reporter.footer(&summary);
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use borg_drivers::ExecutionStatus;
    use std::collections::VecDeque;

    /// Replays canned driver results.
    struct Scripted {
        results: VecDeque<BorgResult<u32>>,
        calls: Vec<(f32, f32)>,
    }

    impl Scripted {
        fn new(results: impl IntoIterator<Item = BorgResult<u32>>) -> Self {
            Self {
                results: results.into_iter().collect(),
                calls: Vec::new(),
            }
        }
    }

    impl CoprocAlg for Scripted {
        fn execute(&mut self, a: f32, b: f32) -> BorgResult<u32> {
            self.calls.push((a, b));
            self.results.pop_front().unwrap()
        }

        fn status(&self) -> ExecutionStatus {
            ExecutionStatus::Idle
        }
    }

    struct FixedClock(u32);

    impl CycleCounter for FixedClock {
        fn cycles(&self) -> u32 {
            self.0
        }
    }

    const EPSILON: f32 = 1e-4;

    fn bits(val: f32) -> BorgResult<u32> {
        Ok(val.to_bits())
    }

    #[test]
    fn test_run_case_classifies_outcomes() {
        let alg = Scripted::new([
            bits(5.75),
            bits(6.0),
            Err(BorgError::DRIVER_BORG_HALT_TIMEOUT),
        ]);
        let mut runner = BatchRunner::new(alg, FixedClock(0), EPSILON);
        let vector = TestVector::new(3.5, 2.25);

        let result = runner.run_case(vector);
        assert_eq!(result.outcome, CaseOutcome::Passed);
        assert_eq!(result.result(), Ok(()));

        let result = runner.run_case(vector);
        assert_eq!(result.outcome, CaseOutcome::ValidationFailure);
        assert_eq!(result.validation.map(|v| v.diff), Some(0.25));
        assert_eq!(result.result(), Err(BorgError::DIAG_VALIDATION_FAILURE));

        let result = runner.run_case(vector);
        assert_eq!(result.outcome, CaseOutcome::HardwareTimeout);
        assert_eq!(result.validation, None);
        assert_eq!(result.result(), Err(BorgError::DRIVER_BORG_HALT_TIMEOUT));
    }

    #[test]
    fn test_batch_is_and_of_cases() {
        let vectors = [TestVector::new(1.0, 1.0); 3];

        let mut runner = BatchRunner::new(
            Scripted::new([bits(2.0), bits(2.0), bits(2.0)]),
            FixedClock(7),
            EPSILON,
        );
        let summary = runner.run(&vectors, &mut Reporter::new(String::new()));
        assert_eq!(
            summary,
            BatchSummary {
                passed: true,
                cases: 3,
                failures: 0,
                timeouts: 0,
                cycles: 7,
            }
        );

        let mut runner = BatchRunner::new(
            Scripted::new([bits(2.0), Err(BorgError::DRIVER_BORG_HALT_TIMEOUT), bits(2.5)]),
            FixedClock(7),
            EPSILON,
        );
        let summary = runner.run(&vectors, &mut Reporter::new(String::new()));
        assert!(!summary.passed);
        assert_eq!(summary.cases, 3);
        assert_eq!(summary.failures, 2);
        assert_eq!(summary.timeouts, 1);
    }

    #[test]
    fn test_vectors_run_in_order_exactly_once() {
        let vectors = [
            TestVector::new(1.0, 2.0),
            TestVector::new(3.0, 4.0),
            TestVector::new(5.0, 6.0),
        ];
        let mut runner = BatchRunner::new(
            Scripted::new([Err(BorgError::DRIVER_BORG_HALT_TIMEOUT), bits(7.0), bits(11.0)]),
            FixedClock(0),
            EPSILON,
        );
        runner.run(&vectors, &mut Reporter::new(String::new()));
        assert_eq!(runner.alg().calls, [(1.0, 2.0), (3.0, 4.0), (5.0, 6.0)]);
    }

    #[test]
    fn test_empty_batch_passes() {
        let mut runner = BatchRunner::new(Scripted::new([]), FixedClock(3), EPSILON);
        let summary = runner.run(&[], &mut Reporter::new(String::new()));
        assert!(summary.passed);
        assert_eq!(summary.cases, 0);
    }
}
