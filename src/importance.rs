//! Sensitivity of an algorithm's result to single food molecules and reactions.
//!
//! For a result `R = A(S)`, the importance of a food molecule `f` is
//! `100 * (|R| - |A(S without f)|) / |R|`, and the importance of an input reaction `r` is
//! `100 * (|R| - 1 - |A(S without r)|) / |R|`, the baseline accounting for `r` itself.
//! Only positive values are reported, sorted in decreasing order. Every entry costs one
//! additional run of the algorithm.

use crate::algorithms::NetworkAlgorithm;
use crate::model::ReactionSystem;
use crate::progress::{CancelOnly, ProgressSink, with_triggers};
use cancel_this::Cancellable;
use itertools::Itertools;
use log::{debug, info};
use rayon::prelude::*;
use std::fmt::{Display, Formatter};

/// The importance of one food molecule or reaction, in percent.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Importance {
    pub name: String,
    pub value: f64,
}

impl Display for Importance {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {:.1}%", self.name, self.value)
    }
}

fn ranked(mut items: Vec<Importance>) -> Vec<Importance> {
    items.retain(|i| i.value > 0.0);
    items.sort_by(|a, b| {
        b.value
            .total_cmp(&a.value)
            .then_with(|| a.name.cmp(&b.name))
    });
    items
}

/// Importance of every food molecule of `input` with respect to `result = algorithm(input)`.
pub fn food_importance(
    algorithm: &dyn NetworkAlgorithm,
    input: &ReactionSystem,
    result: &ReactionSystem,
    progress: &dyn ProgressSink,
) -> Cancellable<Vec<Importance>> {
    let size = result.size();
    if size == 0 {
        return Ok(Vec::new());
    }

    let food: Vec<_> = input.food().iter().collect();
    progress.set_tasks(algorithm.name(), "food importance");
    progress.set_maximum(food.len() as u64);

    let triggers = cancel_this::active_triggers();
    let items = food
        .into_par_iter()
        .map(|molecule| {
            with_triggers(&triggers, || {
                progress.checkpoint()?;
                let reduced =
                    algorithm.apply(&input.without_food(molecule), &CancelOnly(progress))?;
                let value = 100.0 * (size as f64 - reduced.size() as f64) / size as f64;
                let name = input.molecules().name(molecule).to_string();
                debug!("Food `{}` has importance {:.1}%.", name, value);
                progress.increment_progress();
                Ok(Importance { name, value })
            })
        })
        .collect::<Cancellable<Vec<_>>>()?;

    let items = ranked(items);
    info!("Computed food importance ({} positive).", items.len());
    Ok(items)
}

/// Importance of every input reaction with respect to `result = algorithm(input)`.
/// Empty unless the result has at least two reactions.
pub fn reaction_importance(
    algorithm: &dyn NetworkAlgorithm,
    input: &ReactionSystem,
    result: &ReactionSystem,
    progress: &dyn ProgressSink,
) -> Cancellable<Vec<Importance>> {
    let size = result.size();
    if size <= 1 {
        return Ok(Vec::new());
    }

    progress.set_tasks(algorithm.name(), "reaction importance");
    progress.set_maximum(input.size() as u64);

    let triggers = cancel_this::active_triggers();
    let items = input
        .reactions()
        .par_iter()
        .map(|reaction| {
            with_triggers(&triggers, || {
                progress.checkpoint()?;
                let reduced = algorithm.apply(
                    &input.without_reaction(reaction.name()),
                    &CancelOnly(progress),
                )?;
                let value = 100.0 * (size as f64 - 1.0 - reduced.size() as f64) / size as f64;
                debug!(
                    "Reaction `{}` has importance {:.1}%.",
                    reaction.name(),
                    value
                );
                progress.increment_progress();
                Ok(Importance {
                    name: reaction.name().to_string(),
                    value,
                })
            })
        })
        .collect::<Cancellable<Vec<_>>>()?;

    let items = ranked(items);
    info!("Computed reaction importance ({} positive).", items.len());
    Ok(items)
}

/// A one-line ranking such as `A 100.0%, B 50.0%`.
pub fn format_importance(items: &[Importance]) -> String {
    items.iter().map(|i| i.to_string()).join(", ")
}

#[cfg(test)]
mod tests {
    use crate::algorithms::{MaxCaf, MaxRaf, NetworkAlgorithm};
    use crate::importance::{Importance, food_importance, format_importance, reaction_importance};
    use crate::progress::NoProgress;
    use crate::test_utils::example_systems::{CHAIN, FOOD_CATALYZED, SELF_CATALYZED, TWO_TRIVIAL};
    use crate::test_utils::{init_logger, mk_system};
    use cancel_this::Cancellable;

    #[test]
    fn food_catalyzed_importance() -> Cancellable<()> {
        init_logger();
        let system = mk_system(FOOD_CATALYZED);
        let result = MaxRaf.apply(&system, &NoProgress)?;

        let food = food_importance(&MaxRaf, &system, &result, &NoProgress)?;
        assert_eq!(
            food,
            vec![
                Importance {
                    name: "A".to_string(),
                    value: 100.0
                },
                Importance {
                    name: "B".to_string(),
                    value: 100.0
                },
            ]
        );

        let reactions = reaction_importance(&MaxRaf, &system, &result, &NoProgress)?;
        assert_eq!(reactions.len(), 1);
        assert_eq!(reactions[0].name, "r1");
        assert_eq!(reactions[0].value, 50.0);
        assert_eq!(format_importance(&reactions), "r1 50.0%");
        Ok(())
    }

    #[test]
    fn importance_is_bounded_and_meaningful() -> Cancellable<()> {
        init_logger();
        for text in [FOOD_CATALYZED, CHAIN, TWO_TRIVIAL] {
            let system = mk_system(text);
            let result = MaxRaf.apply(&system, &NoProgress)?;
            let size = result.size();

            for item in food_importance(&MaxRaf, &system, &result, &NoProgress)? {
                assert!(item.value > 0.0 && item.value <= 100.0);
                let molecule = system.molecule(&item.name).unwrap();
                let reduced = MaxRaf.apply(&system.without_food(molecule), &NoProgress)?;
                assert!(reduced.size() < size);
            }

            let reactions = reaction_importance(&MaxRaf, &system, &result, &NoProgress)?;
            for pair in reactions.windows(2) {
                assert!(pair[0].value >= pair[1].value);
            }
            for item in reactions {
                assert!(item.value > 0.0 && item.value <= 100.0);
            }
        }
        Ok(())
    }

    #[test]
    fn empty_result_has_no_importance() -> Cancellable<()> {
        init_logger();
        let system = mk_system(SELF_CATALYZED);
        let result = MaxCaf.apply(&system, &NoProgress)?;
        assert!(result.is_empty());
        assert!(food_importance(&MaxCaf, &system, &result, &NoProgress)?.is_empty());
        assert!(reaction_importance(&MaxCaf, &system, &result, &NoProgress)?.is_empty());
        Ok(())
    }

    #[test]
    fn chain_reaction_importance() -> Cancellable<()> {
        init_logger();
        let system = mk_system(CHAIN);
        let result = MaxRaf.apply(&system, &NoProgress)?;
        let reactions = reaction_importance(&MaxRaf, &system, &result, &NoProgress)?;
        assert_eq!(format_importance(&reactions), "r1 66.7%, r2 33.3%");
        Ok(())
    }
}
