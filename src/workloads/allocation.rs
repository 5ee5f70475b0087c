//! Allocation patterns: rebuilding a value on every step versus mutating it
//! in place, and consuming versus borrowing records.
//!
//! Memory measurement is on by default here; the allocated-bytes ratio is
//! usually the more telling number.

use std::collections::HashMap;
use std::hint::black_box;

use rand::Rng;

use crate::check::exact;
use crate::config::Defaults;
use crate::generate::DataGen;
use crate::harness::{Candidate, Experiment, Scenario};

pub const NAME: &str = "allocation";

pub const DEFAULTS: Defaults = Defaults {
    trials: 1,
    warmup_cycles: 100,
    warmup_size: None,
    sizes: &[],
    memory: true,
};

/// Properties per map in the merge workload.
pub const PROPS_PER_MAP: usize = 20;

/// Warm-up factor for the two cheap loops (destructure, merge).
pub const CHEAP_LOOP_WARMUP: usize = 100;

/// Substituted for a missing or empty `d` field.
pub const DEFAULT_LABEL: &str = "default";

// ---------------------------------------------------------------------------
// Array concatenation
// ---------------------------------------------------------------------------

/// Copies the accumulated prefix on every step.
pub fn concat_by_copy(arrays: &[Vec<i64>]) -> Vec<i64> {
    let mut result: Vec<i64> = Vec::new();
    for a in arrays {
        result = [result.as_slice(), a.as_slice()].concat();
    }
    result
}

pub fn concat_in_place(arrays: &[Vec<i64>]) -> Vec<i64> {
    let mut result = Vec::new();
    for a in arrays {
        result.extend_from_slice(a);
    }
    result
}

/// `count` arrays of 1..=100 integers.
pub fn generate_arrays(gen: &mut DataGen, count: usize) -> Vec<Vec<i64>> {
    (0..count)
        .map(|_| {
            let len = gen.rng().gen_range(1..=100);
            gen.integers(len, 0..1_000)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Map merging
// ---------------------------------------------------------------------------

pub type Props = HashMap<String, i64>;

/// Builds a fresh map from the accumulated entries plus the next map.
pub fn merge_by_copy(maps: &[Props]) -> Props {
    let mut result = Props::new();
    for m in maps {
        result = result
            .iter()
            .chain(m.iter())
            .map(|(k, v)| (k.clone(), *v))
            .collect();
    }
    result
}

pub fn merge_in_place(maps: &[Props]) -> Props {
    let mut result = Props::new();
    for m in maps {
        result.extend(m.iter().map(|(k, v)| (k.clone(), *v)));
    }
    result
}

/// Map `i` holds `prop{j} -> i * j` for `j` in `0..PROPS_PER_MAP`.
pub fn generate_maps(_gen: &mut DataGen, count: usize) -> Vec<Props> {
    (0..count)
        .map(|i| {
            (0..PROPS_PER_MAP)
                .map(|j| (format!("prop{}", j), (i * j) as i64))
                .collect()
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Destructuring in a hot loop
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

pub fn sum_destructured(points: &[Point]) -> f64 {
    let mut sum = 0.0;
    for p in points {
        let Point { x, y, z } = *p;
        sum += x + y + z;
    }
    sum
}

pub fn sum_field_access(points: &[Point]) -> f64 {
    let mut sum = 0.0;
    for p in points {
        sum += p.x + p.y + p.z;
    }
    sum
}

pub fn generate_points(gen: &mut DataGen, count: usize) -> Vec<Point> {
    (0..count)
        .map(|_| Point {
            x: gen.in_range(0.0..1_000.0),
            y: gen.in_range(0.0..1_000.0),
            z: gen.in_range(0.0..1_000.0),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Passing records by value vs by reference
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub a: f64,
    pub b: f64,
    pub c: String,
    pub d: Option<String>,
    pub e: i64,
    pub f: bool,
    pub g: String,
    pub h: i64,
}

fn label_or_default(d: Option<&str>) -> String {
    match d {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => DEFAULT_LABEL.to_string(),
    }
}

/// Takes the record by value and destructures it; the caller has to hand
/// over an owned copy.
pub fn transform_owned(Record { a, b, c, d, e, f, g, h }: Record) -> Record {
    Record {
        a: a * 2.0,
        b: b + 10.0,
        c: c.to_uppercase(),
        d: Some(label_or_default(d.as_deref())),
        e,
        f,
        g,
        h,
    }
}

/// Reads fields through a borrow and only clones what the result keeps.
pub fn transform_borrowed(r: &Record) -> Record {
    Record {
        a: r.a * 2.0,
        b: r.b + 10.0,
        c: r.c.to_uppercase(),
        d: Some(label_or_default(r.d.as_deref())),
        e: r.e,
        f: r.f,
        g: r.g.clone(),
        h: r.h,
    }
}

pub fn transform_all_owned(records: &[Record]) -> Vec<Record> {
    records.iter().cloned().map(transform_owned).collect()
}

pub fn transform_all_borrowed(records: &[Record]) -> Vec<Record> {
    records.iter().map(transform_borrowed).collect()
}

/// Uniformly shaped records: every optional field present.
pub fn generate_records(gen: &mut DataGen, count: usize) -> Vec<Record> {
    (0..count).map(|_| record(gen, true)).collect()
}

/// Mixed shapes: optional fields missing on roughly half the records.
pub fn generate_mixed_records(gen: &mut DataGen, count: usize) -> Vec<Record> {
    (0..count)
        .map(|_| {
            let full = gen.rng().gen_bool(0.5);
            record(gen, full)
        })
        .collect()
}

fn record(gen: &mut DataGen, full: bool) -> Record {
    Record {
        a: gen.in_range(0.0..1_000.0),
        b: gen.in_range(0.0..1_000.0),
        c: gen.string(),
        d: full.then(|| gen.string()),
        e: gen.rng().gen_range(0..1_000),
        f: gen.rng().gen_bool(0.5),
        g: if full { gen.hex_string() } else { String::new() },
        h: gen.rng().gen_range(0..1_000),
    }
}

// ---------------------------------------------------------------------------
// Experiments
// ---------------------------------------------------------------------------

pub fn concat() -> Experiment<Vec<Vec<i64>>, Vec<i64>> {
    Experiment::new(NAME, "concat", generate_arrays, exact::<Vec<i64>>)
        .candidate(Candidate::timed("spread_copy", |a: &Vec<Vec<i64>>| concat_by_copy(black_box(a))))
        .candidate(Candidate::timed("extend_in_place", |a: &Vec<Vec<i64>>| concat_in_place(black_box(a))))
        .baseline(1)
        .with_sizes(&[1_000])
}

pub fn merge() -> Experiment<Vec<Props>, Props> {
    Experiment::new(NAME, "merge", generate_maps, exact::<Props>)
        .candidate(Candidate::timed("rebuild_copy", |m: &Vec<Props>| merge_by_copy(black_box(m))))
        .candidate(Candidate::timed("extend_in_place", |m: &Vec<Props>| merge_in_place(black_box(m))))
        .baseline(1)
        .with_sizes(&[50])
        .warmup_multiplier(CHEAP_LOOP_WARMUP)
}

pub fn destructure() -> Experiment<Vec<Point>, f64> {
    Experiment::new(NAME, "destructure", generate_points, exact::<f64>)
        .candidate(Candidate::timed("destructure", |p: &Vec<Point>| sum_destructured(black_box(p))))
        .candidate(Candidate::timed("field_access", |p: &Vec<Point>| sum_field_access(black_box(p))))
        .baseline(1)
        .with_sizes(&[100_000])
        .warmup_multiplier(CHEAP_LOOP_WARMUP)
}

pub fn params() -> Experiment<Vec<Record>, Vec<Record>> {
    Experiment::new(NAME, "params", generate_records, exact::<Vec<Record>>)
        .candidate(Candidate::timed("by_value", |r: &Vec<Record>| transform_all_owned(black_box(r))))
        .candidate(Candidate::timed("by_reference", |r: &Vec<Record>| transform_all_borrowed(black_box(r))))
        .baseline(1)
        .with_sizes(&[100_000])
}

pub fn params_mixed() -> Experiment<Vec<Record>, Vec<Record>> {
    Experiment::new(NAME, "params_mixed", generate_mixed_records, exact::<Vec<Record>>)
        .candidate(Candidate::timed("by_value", |r: &Vec<Record>| transform_all_owned(black_box(r))))
        .candidate(Candidate::timed("by_reference", |r: &Vec<Record>| transform_all_borrowed(black_box(r))))
        .baseline(1)
        .with_sizes(&[50_000])
}

pub fn scenarios() -> Vec<Box<dyn Scenario>> {
    vec![
        Box::new(destructure()),
        Box::new(concat()),
        Box::new(merge()),
        Box::new(params()),
        Box::new(params_mixed()),
    ]
}
