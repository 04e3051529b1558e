use crate::model::{MoleculeSet, Reaction};
use std::sync::Arc;

#[cfg(test)]
mod test_utils;

pub mod algorithms;
pub mod closure;
pub mod generator;
pub mod importance;
pub mod io;
pub mod model;
pub mod progress;
pub mod reduction;
pub mod stratification;

/// The master seed used by randomized algorithms unless configured otherwise.
pub const DEFAULT_SEED: u64 = 0x123456789abcdef;

/// Derive the seed of one randomized trial from the master seed and the trial index.
///
/// Every trial owns its random stream, so the outcome of a trial does not depend on how
/// trials are scheduled across threads.
pub fn trial_seed(seed: u64, trial: usize) -> u64 {
    seed ^ (trial as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// A utility method for printing useful metadata of molecule sets.
fn log_molecules(set: &MoleculeSet) -> String {
    format!("molecules={}", set.len())
}

/// A utility method for printing useful metadata of reaction pools.
fn log_reactions(reactions: &[Arc<Reaction>]) -> String {
    format!("reactions={}", reactions.len())
}

/// The last path segment of a step operator's type name, for log messages.
fn simple_type_name<T>() -> &'static str {
    std::any::type_name::<T>().split("::").last().unwrap_or("?")
}
