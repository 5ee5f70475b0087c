//! Summing a numeric sequence: internal iteration vs an explicit loop.

use std::hint::black_box;
use std::ops::Range;

use crate::check::exact;
use crate::config::Defaults;
use crate::harness::{Candidate, Experiment, Scenario};

pub const NAME: &str = "iteration";

/// Range of the generated values.
pub const VALUE_RANGE: Range<f64> = -20_000.0..20_000.0;

pub const DEFAULTS: Defaults = Defaults {
    trials: 20,
    warmup_cycles: 100,
    warmup_size: Some(1_000_000),
    sizes: &[1_000, 10_000, 100_000, 1_000_000, 2_000_000, 5_000_000],
    memory: false,
};

/// Sum via a closure passed to `Iterator::for_each`.
pub fn sum_for_each(values: &[f64]) -> f64 {
    let mut sum = 0.0;
    values.iter().for_each(|n| {
        sum += n;
    });
    sum
}

/// Sum via a `for` loop.
pub fn sum_for_loop(values: &[f64]) -> f64 {
    let mut sum = 0.0;
    for n in values {
        sum += n;
    }
    sum
}

pub fn sum_fold(values: &[f64]) -> f64 {
    values.iter().fold(0.0, |acc, n| acc + n)
}

/// All three variants add left to right, so results are bit-identical.
pub fn experiment() -> Experiment<Vec<f64>, f64> {
    Experiment::new(
        NAME,
        "sum",
        |gen, size| gen.numbers(size, VALUE_RANGE),
        exact::<f64>,
    )
    .candidate(Candidate::timed("for_loop", |v: &Vec<f64>| sum_for_loop(black_box(v))))
    .candidate(Candidate::timed("for_each", |v: &Vec<f64>| sum_for_each(black_box(v))))
    .candidate(Candidate::timed("fold", |v: &Vec<f64>| sum_fold(black_box(v))))
}

pub fn scenarios() -> Vec<Box<dyn Scenario>> {
    vec![Box::new(experiment())]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variants_agree_on_small_input() {
        let v = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(sum_for_each(&v), 15.0);
        assert_eq!(sum_for_loop(&v), 15.0);
        assert_eq!(sum_fold(&v), 15.0);
        assert_eq!(sum_for_loop(&[]), 0.0);
    }
}
