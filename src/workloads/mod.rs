//! Sample workloads: pairs of idioms that compute the same result.

pub mod allocation;
pub mod iteration;
pub mod key_store;
