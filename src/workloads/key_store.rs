//! Key/value storage strategies: a hash map against an ordered tree map.
//!
//! Each operation (fill, exists, get, iterate, clear) is its own experiment.
//! Stores are built outside the measured section except for `fill`, where
//! building is the operation.

use std::collections::{BTreeMap, HashMap};

use crate::check::{exact, pairs_unordered};
use crate::config::Defaults;
use crate::generate::DataGen;
use crate::harness::{Candidate, Experiment, Scenario};
use crate::measure::Meter;

pub const NAME: &str = "key_store";

pub const DEFAULTS: Defaults = Defaults {
    trials: 20,
    warmup_cycles: 100,
    warmup_size: Some(1_000),
    sizes: &[100, 1_000, 100_000, 200_000, 500_000],
    memory: false,
};

/// Sizes for the retained-memory sweep.
pub const MEMORY_SIZES: &[usize] = &[10_000, 100_000, 200_000, 500_000, 1_000_000];

/// Operations common to both stores.
pub trait KeyStore: Sized + 'static {
    const NAME: &'static str;

    fn fill(keys: &[String], values: &[String]) -> Self;

    fn contains(&self, key: &str) -> bool;

    fn lookup(&self, key: &str) -> Option<&String>;

    /// Every entry, in the store's native iteration order.
    fn entries(&self) -> Vec<(&String, &String)>;

    fn remove(&mut self, key: &str);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyStore for HashMap<String, String> {
    const NAME: &'static str = "hash_map";

    fn fill(keys: &[String], values: &[String]) -> Self {
        let mut map = HashMap::new();
        for (k, v) in keys.iter().zip(values) {
            map.insert(k.clone(), v.clone());
        }
        map
    }

    fn contains(&self, key: &str) -> bool {
        self.contains_key(key)
    }

    fn lookup(&self, key: &str) -> Option<&String> {
        self.get(key)
    }

    fn entries(&self) -> Vec<(&String, &String)> {
        self.iter().collect()
    }

    fn remove(&mut self, key: &str) {
        HashMap::remove(self, key);
    }

    fn len(&self) -> usize {
        HashMap::len(self)
    }
}

impl KeyStore for BTreeMap<String, String> {
    const NAME: &'static str = "btree_map";

    fn fill(keys: &[String], values: &[String]) -> Self {
        let mut map = BTreeMap::new();
        for (k, v) in keys.iter().zip(values) {
            map.insert(k.clone(), v.clone());
        }
        map
    }

    fn contains(&self, key: &str) -> bool {
        self.contains_key(key)
    }

    fn lookup(&self, key: &str) -> Option<&String> {
        self.get(key)
    }

    fn entries(&self) -> Vec<(&String, &String)> {
        self.iter().collect()
    }

    fn remove(&mut self, key: &str) {
        BTreeMap::remove(self, key);
    }

    fn len(&self) -> usize {
        BTreeMap::len(self)
    }
}

pub fn contains_all<S: KeyStore>(store: &S, probes: &[String]) -> Vec<bool> {
    probes.iter().map(|k| store.contains(k)).collect()
}

pub fn lookup_all<'s, S: KeyStore>(store: &'s S, probes: &[String]) -> Vec<Option<&'s String>> {
    probes.iter().map(|k| store.lookup(k)).collect()
}

pub fn remove_all<S: KeyStore>(store: &mut S, keys: &[String]) {
    for k in keys {
        store.remove(k);
    }
}

/// Per-trial input: entries to insert and probe keys with a hit/miss mix.
#[derive(Debug, Clone)]
pub struct KvInput {
    pub keys: Vec<String>,
    pub values: Vec<String>,
    pub probes: Vec<String>,
}

impl KvInput {
    pub fn generate(gen: &mut DataGen, size: usize) -> Self {
        let keys = gen.strings(size);
        let values = gen.strings(size);
        let probes = gen.half_random_strings(&keys);
        Self { keys, values, probes }
    }

    /// Hashed-looking keys for the memory sweep; no probes.
    pub fn generate_hashed(gen: &mut DataGen, size: usize) -> Self {
        Self {
            keys: gen.hex_strings(size),
            values: gen.strings(size),
            probes: Vec::new(),
        }
    }
}

type Pairs = Vec<(String, String)>;

fn owned(entries: Vec<(&String, &String)>) -> Pairs {
    entries
        .into_iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

fn fill_candidate<S: KeyStore>() -> Candidate<KvInput, Pairs> {
    Candidate::new(S::NAME, |input: &KvInput, meter: &mut Meter<'_>| {
        let store = meter.measure(|| S::fill(&input.keys, &input.values));
        owned(store.entries())
    })
}

fn exists_candidate<S: KeyStore>() -> Candidate<KvInput, Vec<bool>> {
    Candidate::new(S::NAME, |input: &KvInput, meter: &mut Meter<'_>| {
        let store = S::fill(&input.keys, &input.values);
        meter.measure(|| contains_all(&store, &input.probes))
    })
}

fn get_candidate<S: KeyStore>() -> Candidate<KvInput, Vec<Option<String>>> {
    Candidate::new(S::NAME, |input: &KvInput, meter: &mut Meter<'_>| {
        let store = S::fill(&input.keys, &input.values);
        let found = meter.measure(|| lookup_all(&store, &input.probes));
        found.into_iter().map(|v| v.cloned()).collect()
    })
}

fn iterate_candidate<S: KeyStore>() -> Candidate<KvInput, Pairs> {
    Candidate::new(S::NAME, |input: &KvInput, meter: &mut Meter<'_>| {
        let store = S::fill(&input.keys, &input.values);
        let entries = meter.measure(|| store.entries());
        owned(entries)
    })
}

fn clear_candidate<S: KeyStore>() -> Candidate<KvInput, usize> {
    Candidate::new(S::NAME, |input: &KvInput, meter: &mut Meter<'_>| {
        let mut store = S::fill(&input.keys, &input.values);
        meter.measure(|| remove_all(&mut store, &input.keys));
        store.len()
    })
}

fn memory_candidate<S: KeyStore>() -> Candidate<KvInput, usize> {
    Candidate::new(S::NAME, |input: &KvInput, meter: &mut Meter<'_>| {
        let store = meter.measure(|| S::fill(&input.keys, &input.values));
        store.len()
    })
}

type HashStore = HashMap<String, String>;
type TreeStore = BTreeMap<String, String>;

pub fn fill() -> Experiment<KvInput, Pairs> {
    Experiment::new(NAME, "fill", KvInput::generate, |a: &Pairs, b: &Pairs| {
        pairs_unordered(a, b)
    })
    .candidate(fill_candidate::<HashStore>())
    .candidate(fill_candidate::<TreeStore>())
}

pub fn exists() -> Experiment<KvInput, Vec<bool>> {
    Experiment::new(NAME, "exists", KvInput::generate, exact::<Vec<bool>>)
        .candidate(exists_candidate::<HashStore>())
        .candidate(exists_candidate::<TreeStore>())
}

pub fn get() -> Experiment<KvInput, Vec<Option<String>>> {
    Experiment::new(NAME, "get", KvInput::generate, exact::<Vec<Option<String>>>)
        .candidate(get_candidate::<HashStore>())
        .candidate(get_candidate::<TreeStore>())
}

/// Hash map order is unspecified, so entries are compared as sets.
pub fn iterate() -> Experiment<KvInput, Pairs> {
    Experiment::new(NAME, "iterate", KvInput::generate, |a: &Pairs, b: &Pairs| {
        pairs_unordered(a, b)
    })
    .candidate(iterate_candidate::<HashStore>())
    .candidate(iterate_candidate::<TreeStore>())
}

/// Removes every inserted key; both stores must end up empty.
pub fn clear() -> Experiment<KvInput, usize> {
    Experiment::new(NAME, "clear", KvInput::generate, exact::<usize>)
        .candidate(clear_candidate::<HashStore>())
        .candidate(clear_candidate::<TreeStore>())
        .validate(|remaining: &usize| *remaining == 0)
}

/// Fill with 64-char hex keys; used with a memory-enabled plan.
pub fn memory() -> Experiment<KvInput, usize> {
    Experiment::new(NAME, "memory", KvInput::generate_hashed, exact::<usize>)
        .candidate(memory_candidate::<HashStore>())
        .candidate(memory_candidate::<TreeStore>())
        .with_sizes(MEMORY_SIZES)
}

/// The timed operations, in report order.
pub fn scenarios() -> Vec<Box<dyn Scenario>> {
    vec![
        Box::new(fill()),
        Box::new(exists()),
        Box::new(get()),
        Box::new(iterate()),
        Box::new(clear()),
    ]
}
