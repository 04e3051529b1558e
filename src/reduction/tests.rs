use crate::closure::ClosureRules;
use crate::progress::{CancelFlag, NoProgress, ProgressSink};
use crate::reduction::{
    IterativeSubtraction, RafReduction, ReductionConfig, UnsupportedInClosure, is_raf,
    max_raf_reactions, reduce_with_progress,
};
use crate::test_utils::example_systems::{
    CHAIN, FOOD_CATALYZED, SELF_CATALYZED, SELF_INHIBITING, TWO_TRIVIAL, UNCATALYZED,
};
use crate::test_utils::{init_logger, mk_system};
use cancel_this::Cancellable;
use computation_process::Algorithm;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

fn reaction_names(reactions: &[Arc<crate::model::Reaction>]) -> Vec<&str> {
    reactions.iter().map(|r| r.name()).collect()
}

/// Counts the rounds reported by a reduction.
#[derive(Default)]
struct CountingProgress(AtomicU64);

impl ProgressSink for CountingProgress {
    fn increment_progress(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn max_raf_of_chain() -> Cancellable<()> {
    init_logger();
    let system = mk_system(CHAIN);
    let raf = max_raf_reactions(system.food(), system.reactions())?;
    // `r4` and `r5` support each other, but neither is reached from food.
    assert_eq!(reaction_names(&raf), ["r1", "r2", "r3"]);

    let system = mk_system(SELF_CATALYZED);
    assert!(max_raf_reactions(system.food(), system.reactions())?.is_empty());
    Ok(())
}

#[test]
fn reductions_keep_input_order() -> Cancellable<()> {
    init_logger();
    let system = mk_system(CHAIN);
    let mut reversed = system.reactions().to_vec();
    reversed.reverse();
    let raf = max_raf_reactions(system.food(), &reversed)?;
    assert_eq!(reaction_names(&raf), ["r3", "r2", "r1"]);
    Ok(())
}

#[test]
fn max_raf_is_a_fixpoint() -> Cancellable<()> {
    init_logger();
    let systems = [UNCATALYZED, SELF_CATALYZED, FOOD_CATALYZED, SELF_INHIBITING, CHAIN, TWO_TRIVIAL];
    for text in systems {
        let system = mk_system(text);
        let raf = max_raf_reactions(system.food(), system.reactions())?;
        let again = max_raf_reactions(system.food(), &raf)?;
        assert_eq!(reaction_names(&raf), reaction_names(&again));
        assert_eq!(is_raf(system.food(), &raf)?, !raf.is_empty());
    }
    Ok(())
}

#[test]
fn raf_checks() -> Cancellable<()> {
    init_logger();
    let system = mk_system(CHAIN);
    let r = |name: &str| system.reaction(name).unwrap().clone();
    assert!(is_raf(system.food(), &[r("r1")])?);
    assert!(is_raf(system.food(), &[r("r1"), r("r2")])?);
    assert!(is_raf(system.food(), &[r("r1"), r("r2"), r("r3")])?);
    assert!(!is_raf(system.food(), &[r("r2"), r("r3")])?);
    assert!(!is_raf(system.food(), &[r("r1"), r("r3")])?);
    assert!(!is_raf(system.food(), &[r("r4"), r("r5")])?);
    assert!(!is_raf(system.food(), &[])?);
    Ok(())
}

#[test]
fn rules_change_the_kept_reactions() -> Cancellable<()> {
    init_logger();
    // `D` inhibits `r1`, and without `r1` there is no `C` for `r2`.
    let system = mk_system(SELF_INHIBITING);
    let strict = max_raf_reactions(system.food(), system.reactions())?;
    assert!(strict.is_empty());

    let config = ReductionConfig::with_rules(system.food().clone(), ClosureRules::CATALYZED);
    let relaxed = RafReduction::run(config, system.reactions().to_vec())?;
    assert_eq!(reaction_names(&relaxed), ["r1", "r2"]);
    Ok(())
}

#[test]
fn reduction_reports_rounds() -> Cancellable<()> {
    init_logger();
    let system = mk_system(CHAIN);
    let progress = CountingProgress::default();
    let config = ReductionConfig::new(system.food().clone());
    let raf = reduce_with_progress::<IterativeSubtraction<UnsupportedInClosure>>(
        config,
        system.reactions().to_vec(),
        &progress,
    )?;
    assert_eq!(raf.len(), 3);
    // One round removes `r4` and `r5`, the next one confirms the fixpoint.
    assert_eq!(progress.0.load(Ordering::SeqCst), 1);

    let config = ReductionConfig::new(system.food().clone());
    let again = reduce_with_progress::<IterativeSubtraction<UnsupportedInClosure>>(
        config,
        raf,
        &NoProgress,
    )?;
    assert_eq!(again.len(), 3);
    Ok(())
}

#[test]
fn reduction_can_be_cancelled() {
    init_logger();
    let system = mk_system(CHAIN);
    let flag = CancelFlag::new();
    flag.cancel();
    let config = ReductionConfig::new(system.food().clone());
    let result = reduce_with_progress::<IterativeSubtraction<UnsupportedInClosure>>(
        config,
        system.reactions().to_vec(),
        &flag,
    );
    assert!(result.is_err());

    let mut config = ReductionConfig::new(system.food().clone());
    config.max_iterations = 1;
    assert!(RafReduction::run(config, system.reactions().to_vec()).is_err());
}
