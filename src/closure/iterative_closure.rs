use crate::closure::closure_state::ClosureState;
use crate::closure::{ClosureConfig, ClosureStep};
use crate::model::MoleculeSet;
use crate::{log_molecules, simple_type_name};
use cancel_this::Cancelled;
use computation_process::Incomplete::Suspended;
use computation_process::{Completable, ComputationStep};
use log::debug;
use std::marker::PhantomData;

/// A helper implementation of [`ComputationStep`] that repeatedly calls a [`ClosureStep`]
/// function, adding the newly available molecules to the current `state`.
pub struct IterativeClosure<S: ClosureStep>(PhantomData<S>);

impl<S: ClosureStep> ComputationStep<ClosureConfig, ClosureState, MoleculeSet>
    for IterativeClosure<S>
{
    fn step(context: &ClosureConfig, state: &mut ClosureState) -> Completable<MoleculeSet> {
        if state.iteration >= context.max_iterations {
            debug!(
                "[iteration:{}] Closure<{}> canceled (exceeded iteration count).",
                state.iteration,
                simple_type_name::<S>()
            );

            return Err(Cancelled::new("ClosureConfig::max_iterations").into());
        } else {
            state.iteration += 1;
        }

        let fresh = S::step(context, &state.molecules)?;
        if fresh.is_empty() {
            debug!(
                "[iteration:{}] Closure<{}> finished with ({}).",
                state.iteration,
                simple_type_name::<S>(),
                log_molecules(&state.molecules)
            );

            Ok(state.molecules.clone())
        } else {
            state.molecules.union_with(&fresh);

            debug!(
                "[iteration:{}] Closure<{}> increased to ({}).",
                state.iteration,
                simple_type_name::<S>(),
                log_molecules(&state.molecules)
            );

            Err(Suspended)
        }
    }
}
