// src/storage/ops.rs

//! Pure set algebra over [`SortedSet`] values: difference, union, and
//! intersection with per-input weights and a score aggregator.
//!
//! The callers guarantee weight alignment (one weight per input set);
//! results inherit the container's (score, member) enumeration order
//! regardless of input order.

use crate::storage::sorted_set::SortedSet;
use bytes::Bytes;
use std::collections::HashMap;

/// The aggregation function combining per-input scores.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Aggregate {
    #[default]
    Sum,
    Min,
    Max,
}

impl Aggregate {
    fn apply(&self, s1: f64, s2: f64) -> f64 {
        match self {
            Aggregate::Sum => s1 + s2,
            Aggregate::Min => s1.min(s2),
            Aggregate::Max => s1.max(s2),
        }
    }
}

/// Every member of `base` whose value appears in none of `others`, scores
/// carried over unchanged.
pub fn subtract(base: &SortedSet, others: &[SortedSet]) -> SortedSet {
    let mut result = SortedSet::new();
    for entry in base.iter() {
        if others.iter().any(|set| set.contains_member(&entry.member)) {
            continue;
        }
        result.add(entry.score, entry.member.clone());
    }
    result
}

/// Members present in every input; each score is the aggregate of the
/// weighted per-input scores, applied in input order.
pub fn intersect(sets: &[SortedSet], weights: &[f64], aggregate: Aggregate) -> SortedSet {
    let Some((base, others)) = sets.split_first() else {
        return SortedSet::new();
    };

    let mut result = SortedSet::new();
    'members: for entry in base.iter() {
        let mut score = weighted(entry.score, weight_at(weights, 0));
        for (i, other) in others.iter().enumerate() {
            match other.get_score(&entry.member) {
                Some(other_score) => {
                    score = aggregate.apply(score, weighted(other_score, weight_at(weights, i + 1)));
                }
                None => continue 'members,
            }
        }
        result.add(score, entry.member.clone());
    }
    result
}

/// Members present in any input; each score aggregates the weighted scores
/// of only the inputs that contain the member, in input order.
pub fn union(sets: &[SortedSet], weights: &[f64], aggregate: Aggregate) -> SortedSet {
    let mut scores: HashMap<Bytes, f64> = HashMap::new();

    for (i, set) in sets.iter().enumerate() {
        let weight = weight_at(weights, i);
        for entry in set.iter() {
            let weighted_score = weighted(entry.score, weight);
            scores
                .entry(entry.member.clone())
                .and_modify(|s| *s = aggregate.apply(*s, weighted_score))
                .or_insert(weighted_score);
        }
    }

    let mut result = SortedSet::new();
    for (member, score) in scores {
        result.add(score, member);
    }
    result
}

fn weight_at(weights: &[f64], index: usize) -> f64 {
    weights.get(index).copied().unwrap_or(1.0)
}

/// Weighted score following IEEE rules, except that the `0 x +/-inf` product
/// (NaN) counts as 0 for aggregation purposes.
fn weighted(score: f64, weight: f64) -> f64 {
    let product = score * weight;
    if product.is_nan() { 0.0 } else { product }
}
