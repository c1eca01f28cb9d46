//! Combination strategies.
//!
//! Two seams are pluggable: how per-placeholder match groups combine into
//! argument tuples ([`GroupCombiner`]) and how source columns pair with
//! expanded dictionary entries ([`PairCombiner`]).

use std::fmt;

use crate::expand::{ArgTuple, ArgsDict};
use crate::token::Match;

/// Combines one match group per placeholder into argument tuples.
///
/// Implementations must yield tuples holding one match per input group, in
/// placeholder order; each tuple becomes one output column.
pub trait GroupCombiner: fmt::Debug + Send + Sync {
    fn combine(&self, groups: Vec<Vec<Match>>) -> Vec<ArgTuple>;
}

/// Index-by-index pairing across groups; combination stops at the end of the
/// shortest group.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionalZip;

impl GroupCombiner for PositionalZip {
    fn combine(&self, groups: Vec<Vec<Match>>) -> Vec<ArgTuple> {
        let Some(shortest) = groups.iter().map(Vec::len).min() else {
            return Vec::new();
        };
        (0..shortest)
            .map(|i| groups.iter().map(|group| group[i].clone()).collect())
            .collect()
    }
}

/// Pairs source columns with expanded dictionary entries.
///
/// The driver consumes the result in order, one generated column per pair.
pub trait PairCombiner: fmt::Debug + Send + Sync {
    fn pair(&self, cols: &[String], args: &ArgsDict) -> Vec<(String, (String, ArgTuple))>;
}

/// Cartesian pairing: dictionary entries iterate fastest, source columns
/// slowest, so each source's outputs stay contiguous.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrossProduct;

impl PairCombiner for CrossProduct {
    fn pair(&self, cols: &[String], args: &ArgsDict) -> Vec<(String, (String, ArgTuple))> {
        let mut pairs = Vec::with_capacity(cols.len().saturating_mul(args.len()));
        for col in cols {
            for (name, tuple) in args {
                pairs.push((col.clone(), (name.clone(), tuple.clone())));
            }
        }
        pairs
    }
}
