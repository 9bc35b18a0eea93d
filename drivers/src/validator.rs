/*++

Licensed under the Apache-2.0 license.

File Name:

    validator.rs

Abstract:

    File contains the software reference check for coprocessor results.

--*/

/// One pair of single precision operands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TestVector {
    pub a: f32,
    pub b: f32,
}

impl TestVector {
    pub const fn new(a: f32, b: f32) -> Self {
        Self { a, b }
    }
}

/// Software reference for the coprocessor's addition.
#[inline(never)]
pub fn reference_add(a: f32, b: f32) -> f32 {
    core::hint::black_box(a) + core::hint::black_box(b)
}

/// Outcome of comparing a raw coprocessor result against the reference.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Validation {
    pub actual: f32,
    pub expected: f32,
    pub diff: f32,
    pub passed: bool,
}

impl Validation {
    /// Compare the raw bit pattern read from r2 against `a + b`.
    ///
    /// # Arguments
    ///
    /// * `vector`  - Operands loaded into the coprocessor
    /// * `raw`     - Result register contents
    /// * `epsilon` - Differences at or above this fail
    ///
    /// A NaN on either side never passes.
    pub fn check(vector: TestVector, raw: u32, epsilon: f32) -> Self {
        let actual = f32::from_bits(raw);
        let expected = reference_add(vector.a, vector.b);
        let mut diff = actual - expected;
        if diff < 0.0 {
            diff = -diff;
        }
        Self {
            actual,
            expected,
            diff,
            passed: diff < epsilon,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_EPSILON;

    #[test]
    fn test_reference_is_ieee_add() {
        for (a, b) in [(3.5f32, 2.25f32), (-1.5, 0.25), (1e30, 1e30), (0.1, 0.2)] {
            assert_eq!(reference_add(a, b).to_bits(), (a + b).to_bits());
        }
    }

    #[test]
    fn test_exact_result_passes() {
        let v = Validation::check(TestVector::new(3.5, 2.25), 5.75f32.to_bits(), DEFAULT_EPSILON);
        assert_eq!(v.actual, 5.75);
        assert_eq!(v.expected, 5.75);
        assert_eq!(v.diff, 0.0);
        assert!(v.passed);
    }

    #[test]
    fn test_negative_difference_is_absolute() {
        let v = Validation::check(TestVector::new(1.0, 1.0), 1.5f32.to_bits(), DEFAULT_EPSILON);
        assert_eq!(v.diff, 0.5);
        assert!(!v.passed);
    }

    #[test]
    fn test_within_epsilon_passes() {
        let v = Validation::check(
            TestVector::new(1.0, 1.0),
            2.000_05f32.to_bits(),
            DEFAULT_EPSILON,
        );
        assert!(v.passed);
    }

    #[test]
    fn test_difference_equal_to_epsilon_fails() {
        let v = Validation::check(TestVector::new(0.0, 0.0), 0.5f32.to_bits(), 0.5);
        assert!(!v.passed);
    }

    #[test]
    fn test_nan_result_fails() {
        let v = Validation::check(TestVector::new(1.0, 2.0), f32::NAN.to_bits(), DEFAULT_EPSILON);
        assert!(!v.passed);
    }
}
