//! Output equivalence between candidates.

/// Equality predicate over candidate outputs.
pub type Equality<O> = Box<dyn Fn(&O, &O) -> bool>;

/// Plain value equality.
pub fn exact<T: PartialEq>(a: &T, b: &T) -> bool {
    a == b
}

/// Element-wise equality of key/value sequences, order-sensitive.
///
/// Use when both stores iterate in a defined order.
pub fn pairs_ordered<K: PartialEq, V: PartialEq>(a: &[(K, V)], b: &[(K, V)]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.0 == y.0 && x.1 == y.1)
}

/// Equality of key/value sequences irrespective of order.
///
/// Use when at least one store has unspecified iteration order.
pub fn pairs_unordered<K: Ord, V: Ord>(a: &[(K, V)], b: &[(K, V)]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut left: Vec<(&K, &V)> = a.iter().map(|(k, v)| (k, v)).collect();
    let mut right: Vec<(&K, &V)> = b.iter().map(|(k, v)| (k, v)).collect();
    left.sort_unstable();
    right.sort_unstable();
    left == right
}

/// Compare every output against the one at `baseline`.
///
/// Returns the index of the first disagreeing output.
pub fn check_outputs<O>(outputs: &[O], baseline: usize, eq: &dyn Fn(&O, &O) -> bool) -> Result<(), usize> {
    let Some(reference) = outputs.get(baseline) else {
        return Ok(());
    };
    for (i, out) in outputs.iter().enumerate() {
        if i != baseline && !eq(reference, out) {
            return Err(i);
        }
    }
    Ok(())
}
