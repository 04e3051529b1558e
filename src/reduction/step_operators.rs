use crate::closure::{ClosureRules, compute_closure};
use crate::log_molecules;
use crate::model::Reaction;
use crate::reduction::{ReductionConfig, ReductionStep};
use cancel_this::{Cancellable, is_cancelled};
use log::trace;
use std::sync::Arc;

/// Identifies reactions that are not supported by the catalyzed closure of the food set
/// over the current pool. Support is checked with [`ReductionConfig::rules`].
pub struct UnsupportedInClosure;

impl ReductionStep for UnsupportedInClosure {
    fn step(context: &ReductionConfig, state: &[Arc<Reaction>]) -> Cancellable<Vec<usize>> {
        let molecules = compute_closure(&context.food, state, ClosureRules::CATALYZED)?;
        trace!("Catalyzed closure ({}).", log_molecules(&molecules));

        let mut result = Vec::new();
        for (i, reaction) in state.iter().enumerate() {
            is_cancelled!()?;
            if !reaction.is_enabled(&molecules, context.rules) {
                trace!("Reaction `{}` is not supported.", reaction.name());
                result.push(i);
            }
        }
        Ok(result)
    }
}
