//! Common test utilities for trace-pipeline.
//!
//! This module provides float comparison, golden fixture loading and
//! synthetic data generation for end-to-end tests.

#![allow(dead_code)]

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde_json::Value;
use trace_core::path::FieldPath;
use trace_core::trace::{series_from_value, Trace};

/// Float comparison with tolerance.
///
/// - NaN matches only NaN
/// - infinities must match in sign
/// - values near zero (|expected| < 1e-10) use absolute tolerance
/// - everything else uses relative tolerance
pub fn assert_float_eq(actual: f64, expected: f64, epsilon: f64, context: &str) {
    if expected.is_nan() {
        assert!(
            actual.is_nan(),
            "{}: Expected NaN but got {}",
            context,
            actual
        );
        return;
    }

    if actual.is_nan() {
        panic!("{}: Got NaN but expected {}", context, expected);
    }

    if expected.is_infinite() {
        assert!(
            actual.is_infinite() && actual.signum() == expected.signum(),
            "{}: Expected {} but got {}",
            context,
            expected,
            actual
        );
        return;
    }

    if expected.abs() < 1e-10 {
        let diff = (actual - expected).abs();
        assert!(
            diff < epsilon,
            "{}: Expected {} but got {} (diff: {})",
            context,
            expected,
            actual,
            diff
        );
        return;
    }

    let rel_diff = ((actual - expected) / expected).abs();
    assert!(
        rel_diff < epsilon,
        "{}: Expected {} but got {} (rel diff: {:.2e})",
        context,
        expected,
        actual,
        rel_diff
    );
}

/// Assert two series are equal with tolerance.
pub fn assert_series_eq(actual: &[f64], expected: &[f64], epsilon: f64, name: &str) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "{}: Length mismatch: {} vs {}",
        name,
        actual.len(),
        expected.len()
    );

    for (i, (&a, &e)) in actual.iter().zip(expected.iter()).enumerate() {
        let context = format!("{}[{}]", name, i);
        assert_float_eq(a, e, epsilon, &context);
    }
}

/// Read the numeric array at `path` the way transforms read it.
pub fn field_numbers(trace: &Trace, path: &str) -> Vec<f64> {
    let path = FieldPath::parse(path).expect("valid field path");
    parse_array(trace.field(&path))
}

/// One golden case: an input trace and the arrays expected after the
/// pipeline has run.
#[derive(Debug, Clone)]
pub struct GoldenCase {
    /// Case name.
    pub name: String,
    /// Input trace, transforms included.
    pub trace: Value,
    /// Expected arrays keyed by field path.
    pub expected: Vec<(String, Vec<f64>)>,
    /// Expected trace length after the run.
    pub length: Option<usize>,
}

/// Load golden cases from a JSON fixture.
pub fn load_golden<P: AsRef<Path>>(path: P) -> Result<Vec<GoldenCase>, Box<dyn std::error::Error>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let data: Value = serde_json::from_reader(reader)?;

    let cases = data
        .get("cases")
        .and_then(Value::as_array)
        .ok_or("fixture has no 'cases' array")?;

    cases
        .iter()
        .map(|case| -> Result<GoldenCase, Box<dyn std::error::Error>> {
            let expected = case
                .get("expected")
                .and_then(Value::as_object)
                .map(|fields| {
                    fields
                        .iter()
                        .map(|(path, values)| (path.clone(), parse_array(Some(values))))
                        .collect()
                })
                .unwrap_or_default();

            Ok(GoldenCase {
                name: case
                    .get("name")
                    .and_then(Value::as_str)
                    .unwrap_or("unnamed")
                    .to_string(),
                trace: case.get("trace").cloned().ok_or("case has no 'trace'")?,
                expected,
                length: case
                    .get("length")
                    .and_then(Value::as_u64)
                    .map(|n| n as usize),
            })
        })
        .collect()
}

fn parse_array(value: Option<&Value>) -> Vec<f64> {
    value
        .and_then(series_from_value::<f64>)
        .map(|values| values.as_slice().to_vec())
        .unwrap_or_default()
}

// ============================================================================
// Synthetic Data Generators
// ============================================================================

/// Generate linear series.
pub fn generate_linear(start: f64, step: f64, len: usize) -> Vec<f64> {
    (0..len).map(|i| start + step * i as f64).collect()
}

/// Generate random walk series with deterministic seed.
pub fn generate_random_walk(start: f64, volatility: f64, len: usize, seed: u64) -> Vec<f64> {
    // Simple LCG for deterministic random numbers
    let mut rng_state = seed;
    let lcg_next = |state: &mut u64| -> f64 {
        *state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
        // Convert to [-1, 1]
        (*state as f64 / u64::MAX as f64) * 2.0 - 1.0
    };

    let mut values = Vec::with_capacity(len);
    if len == 0 {
        return values;
    }
    values.push(start);

    for _ in 1..len {
        let change = lcg_next(&mut rng_state) * volatility;
        let last = values[values.len() - 1];
        values.push((last + change).max(0.01));
    }

    values
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assert_float_eq_normal() {
        assert_float_eq(1.0, 1.0, 1e-10, "test");
        assert_float_eq(100.0, 100.0000001, 1e-6, "test");
    }

    #[test]
    fn test_assert_float_eq_nan() {
        assert_float_eq(f64::NAN, f64::NAN, 1e-10, "test");
    }

    #[test]
    #[should_panic]
    fn test_assert_float_eq_nan_mismatch() {
        assert_float_eq(1.0, f64::NAN, 1e-10, "test");
    }

    #[test]
    fn test_generate_linear() {
        let data = generate_linear(100.0, 1.0, 5);
        assert_eq!(data, vec![100.0, 101.0, 102.0, 103.0, 104.0]);
    }

    #[test]
    fn test_generate_random_walk_deterministic() {
        let data1 = generate_random_walk(100.0, 1.0, 10, 12345);
        let data2 = generate_random_walk(100.0, 1.0, 10, 12345);
        assert_eq!(data1, data2);
        assert!(data1.iter().all(|&v| v >= 0.01));
    }
}
