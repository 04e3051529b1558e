use crate::model::Reaction;
use crate::reduction::{ReductionConfig, ReductionState, ReductionStep};
use crate::{log_reactions, simple_type_name};
use cancel_this::Cancelled;
use computation_process::Incomplete::Suspended;
use computation_process::{Completable, ComputationStep};
use log::{debug, info};
use std::marker::PhantomData;
use std::sync::Arc;

/// A helper implementation of [`ComputationStep`] that repeatedly calls a [`ReductionStep`]
/// function, *removing* the reported reactions from the current `state`.
pub struct IterativeSubtraction<S: ReductionStep>(PhantomData<S>);

impl<S: ReductionStep> ComputationStep<ReductionConfig, ReductionState, Vec<Arc<Reaction>>>
    for IterativeSubtraction<S>
{
    fn step(
        context: &ReductionConfig,
        state: &mut ReductionState,
    ) -> Completable<Vec<Arc<Reaction>>> {
        if state.iteration >= context.max_iterations {
            debug!(
                "[iteration:{}] Subtraction<{}> canceled (exceeded iteration count).",
                state.iteration,
                simple_type_name::<S>()
            );
            return Err(Cancelled::new("ReductionConfig::max_iterations").into());
        } else {
            state.iteration += 1;
        }

        let to_remove = S::step(context, &state.reactions)?;
        if to_remove.is_empty() {
            info!(
                "Subtraction<{}> finished ({}).",
                simple_type_name::<S>(),
                log_reactions(&state.reactions)
            );
            Ok(state.reactions.clone())
        } else {
            let mut position = 0;
            let mut to_remove = to_remove.into_iter().peekable();
            state.reactions.retain(|_| {
                let keep = to_remove.peek() != Some(&position);
                if !keep {
                    to_remove.next();
                }
                position += 1;
                keep
            });
            debug!(
                "[iteration:{}] Subtraction<{}> decreased ({}).",
                state.iteration,
                simple_type_name::<S>(),
                log_reactions(&state.reactions)
            );
            Err(Suspended)
        }
    }
}
