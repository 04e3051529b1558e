use crate::algorithms::{
    AlgorithmKind, CoreRaf, HeuristicConfig, MaxCaf, MaxPseudoRaf, MaxRaf,
    MinIRafHeuristic, MinRafGeneratingElement, MuCaf, MultiRun, NetworkAlgorithm, QuotientRaf,
    RandomizedAlgorithm, RemoveTrivialRafs, TrivialCafs, TrivialRafs, URaf,
};
use crate::closure::{ClosureRules, compute_closure};
use crate::model::ReactionSystem;
use crate::progress::{CancelFlag, NoProgress};
use crate::reduction::{is_raf, max_raf_reactions};
use crate::test_utils::example_systems::{
    CHAIN, FOOD_CATALYZED, MUTUAL_INHIBITION, REVERSIBLE, SELF_CATALYZED, SELF_INHIBITING,
    TWO_TRIVIAL, UNCATALYZED,
};
use crate::test_utils::{init_logger, is_sub_network, mk_system, names};
use cancel_this::Cancellable;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fmt::Write;
use std::time::Duration;

fn apply(algorithm: &dyn NetworkAlgorithm, system: &ReactionSystem) -> Cancellable<ReactionSystem> {
    algorithm.apply(system, &NoProgress)
}

/// Check that `result` is a RAF from which no reaction can be removed.
fn assert_irreducible_raf(result: &ReactionSystem) -> Cancellable<()> {
    assert!(is_raf(result.food(), result.reactions())?);
    for reaction in result.reactions() {
        let rest = result.without_reaction(reaction.name());
        assert!(
            max_raf_reactions(rest.food(), rest.reactions())?.is_empty(),
            "`{}` is redundant in {:?}",
            reaction.name(),
            names(result)
        );
    }
    Ok(())
}

#[test]
fn uncatalyzed_reaction_is_never_supported() -> Cancellable<()> {
    init_logger();
    let system = mk_system(UNCATALYZED);
    assert!(apply(&MaxCaf, &system)?.is_empty());
    assert!(apply(&MaxRaf, &system)?.is_empty());
    assert!(apply(&MaxPseudoRaf, &system)?.is_empty());
    Ok(())
}

#[test]
fn self_catalyzed_reaction_is_neither_caf_nor_raf() -> Cancellable<()> {
    init_logger();
    let system = mk_system(SELF_CATALYZED);
    assert!(apply(&MaxCaf, &system)?.is_empty());
    assert!(apply(&MaxRaf, &system)?.is_empty());
    assert!(apply(&MaxPseudoRaf, &system)?.is_empty());
    assert!(apply(&TrivialRafs, &system)?.is_empty());
    assert!(apply(&CoreRaf, &system)?.is_empty());
    assert!(apply(&RemoveTrivialRafs, &system)?.is_empty());
    // The reactants are food, the catalyst does not matter here.
    assert_eq!(names(&apply(&TrivialCafs, &system)?), vec!["r1"]);
    Ok(())
}

#[test]
fn food_catalyzed_chain_is_caf_and_raf() -> Cancellable<()> {
    init_logger();
    let system = mk_system(FOOD_CATALYZED);

    let caf = apply(&MaxCaf, &system)?;
    let raf = apply(&MaxRaf, &system)?;
    assert_eq!(names(&caf), vec!["r1", "r2"]);
    assert_eq!(names(&raf), vec!["r1", "r2"]);
    assert_eq!(caf.food(), system.food());
    assert_eq!(caf.name(), MaxCaf::NAME);

    let closure = compute_closure(caf.food(), caf.reactions(), ClosureRules::STRICT)?;
    assert_eq!(system.names_of(&closure), vec!["A", "B", "C", "D"]);
    Ok(())
}

#[test]
fn inhibitor_blocks_the_producing_reaction() -> Cancellable<()> {
    init_logger();
    let system = mk_system(SELF_INHIBITING);

    let mu_caf = MultiRun::new(MuCaf, 16, 7);
    let outcomes = mu_caf.outcomes(&system, &NoProgress)?;
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].count, 16);
    assert_eq!(names(&outcomes[0].system), vec!["r1"]);

    // Either `r2` is removed (keeping `r1`) or `r1` is removed (losing everything).
    let uraf = MultiRun::new(URaf, 16, 7);
    let outcomes = uraf.outcomes(&system, &NoProgress)?;
    assert_eq!(outcomes.iter().map(|o| o.count).sum::<usize>(), 16);
    for outcome in &outcomes {
        let found = names(&outcome.system);
        assert!(found.is_empty() || found == vec!["r1"], "{found:?}");
    }
    Ok(())
}

#[test]
fn mutual_inhibition_is_order_sensitive() -> Cancellable<()> {
    init_logger();
    let system = mk_system(MUTUAL_INHIBITION);

    let mut seen = Vec::new();
    for seed in 0..32 {
        let mut rng = StdRng::seed_from_u64(seed);
        let result = MuCaf.apply_with_rng(&system, &mut rng, &NoProgress)?;
        assert_eq!(result.size(), 1);
        seen.push(names(&result)[0].to_string());
    }
    seen.sort();
    seen.dedup();
    assert_eq!(seen, vec!["r1".to_string(), "r2".to_string()]);

    let outcomes = MultiRun::new(MuCaf, 32, 1).outcomes(&system, &NoProgress)?;
    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes.iter().map(|o| o.count).sum::<usize>(), 32);
    assert!(outcomes[0].count >= outcomes[1].count);
    Ok(())
}

#[test]
fn inhibition_aware_algorithms_need_inhibitors() -> Cancellable<()> {
    init_logger();
    let system = mk_system(FOOD_CATALYZED);
    assert!(apply(&MuCaf, &system)?.is_empty());
    assert!(apply(&URaf, &system)?.is_empty());
    Ok(())
}

#[test]
fn raf_pseudo_raf_caf_inclusion() -> Cancellable<()> {
    init_logger();
    for text in [
        UNCATALYZED,
        SELF_CATALYZED,
        FOOD_CATALYZED,
        SELF_INHIBITING,
        CHAIN,
        TWO_TRIVIAL,
        REVERSIBLE,
    ] {
        let system = mk_system(text);
        let caf = apply(&MaxCaf, &system)?;
        let raf = apply(&MaxRaf, &system)?;
        let pseudo = apply(&MaxPseudoRaf, &system)?;
        assert!(is_sub_network(&raf, &pseudo), "{text}");
        assert!(is_sub_network(&pseudo, &caf), "{text}");

        // Every RAF reaction is enabled in the catalyzed closure of the food set.
        let closure =
            compute_closure(system.food(), system.reactions(), ClosureRules::CATALYZED)?;
        assert!(raf.reactions().iter().all(|r| r.is_enabled(&closure, ClosureRules::STRICT)));
    }
    Ok(())
}

#[test]
fn max_raf_is_self_sufficient_and_idempotent() -> Cancellable<()> {
    init_logger();
    for text in [FOOD_CATALYZED, CHAIN, TWO_TRIVIAL, REVERSIBLE] {
        let system = mk_system(text);
        let raf = apply(&MaxRaf, &system)?;
        assert!(!raf.is_empty());

        let closure = compute_closure(raf.food(), raf.reactions(), ClosureRules::CATALYZED)?;
        for reaction in raf.reactions() {
            assert!(reaction.is_enabled(&closure, ClosureRules::STRICT));
        }

        let again = apply(&MaxRaf, &raf)?;
        assert!(again.same_content(&raf));
    }
    Ok(())
}

#[test]
fn chain_results() -> Cancellable<()> {
    init_logger();
    let system = mk_system(CHAIN);
    // `r4` and `r5` are never reached from the food set.
    assert_eq!(names(&apply(&MaxCaf, &system)?), vec!["r1", "r2", "r3"]);
    assert_eq!(names(&apply(&MaxRaf, &system)?), vec!["r1", "r2", "r3"]);
    assert_eq!(names(&apply(&MaxPseudoRaf, &system)?), vec!["r1", "r2", "r3"]);
    assert_eq!(names(&apply(&CoreRaf, &system)?), vec!["r1"]);
    assert_eq!(names(&apply(&TrivialRafs, &system)?), vec!["r1"]);
    assert_eq!(names(&apply(&TrivialCafs, &system)?), vec!["r1"]);
    assert_eq!(names(&apply(&RemoveTrivialRafs, &system)?), vec!["r2", "r3"]);

    // Each contraction makes the next reaction of the chain trivial.
    let quotient = apply(&QuotientRaf, &system)?;
    assert!(quotient.is_empty());
    assert_eq!(
        system.names_of(quotient.food()),
        vec!["a", "b", "c", "d", "e"]
    );
    Ok(())
}

#[test]
fn pseudo_raf_keeps_inhibited_reactions() -> Cancellable<()> {
    init_logger();
    let system = mk_system(SELF_INHIBITING);
    assert!(apply(&MaxRaf, &system)?.is_empty());
    assert_eq!(names(&apply(&MaxPseudoRaf, &system)?), vec!["r1", "r2"]);
    assert_eq!(names(&apply(&MaxCaf, &system)?), vec!["r1", "r2"]);
    Ok(())
}

#[test]
fn trivial_rafs_are_extracted_and_contracted() -> Cancellable<()> {
    init_logger();
    let system = mk_system(TWO_TRIVIAL);
    assert_eq!(names(&apply(&TrivialCafs, &system)?), vec!["r1", "r2"]);
    assert_eq!(names(&apply(&TrivialRafs, &system)?), vec!["r1", "r2"]);
    assert_eq!(names(&apply(&RemoveTrivialRafs, &system)?), vec!["r3"]);
    assert!(apply(&CoreRaf, &system)?.is_empty());

    let quotient = apply(&QuotientRaf, &system)?;
    assert!(quotient.is_empty());
    assert_eq!(system.names_of(quotient.food()), vec!["f", "x", "y", "z"]);
    Ok(())
}

#[test]
fn trivial_cafs_have_food_inputs() -> Cancellable<()> {
    init_logger();
    for text in [UNCATALYZED, FOOD_CATALYZED, CHAIN, TWO_TRIVIAL, REVERSIBLE] {
        let system = mk_system(text);
        let trivial = apply(&TrivialCafs, &system)?;
        for reaction in system.reactions() {
            let food_inputs = reaction.is_enabled(system.food(), ClosureRules::REACTANTS_ONLY);
            assert_eq!(food_inputs, trivial.contains_reaction(reaction.name()));
        }
    }

    let system = mk_system(FOOD_CATALYZED);
    assert_eq!(names(&apply(&TrivialCafs, &system)?), vec!["r1"]);

    // Neither a missing catalyst nor the formal one excludes a reaction.
    let system = mk_system("Food: A, B\nr1 : A + B [Z] -> C\nr2 : A [$] -> D\n");
    assert_eq!(names(&apply(&TrivialCafs, &system)?), vec!["r1", "r2"]);
    Ok(())
}

#[test]
fn reverse_direction_feeds_the_network() -> Cancellable<()> {
    init_logger();
    let system = mk_system(REVERSIBLE);
    assert_eq!(names(&apply(&MaxCaf, &system)?), vec!["r1", "r2"]);
    assert_eq!(names(&apply(&MaxRaf, &system)?), vec!["r1", "r2"]);
    Ok(())
}

#[test]
fn min_iraf_finds_irreducible_rafs() -> Cancellable<()> {
    init_logger();
    let config = HeuristicConfig::new(20, 42);

    let system = mk_system(CHAIN);
    let result = apply(&MinIRafHeuristic::new(config.clone()), &system)?;
    assert_eq!(names(&result), vec!["r1"]);
    assert_irreducible_raf(&result)?;

    let system = mk_system(TWO_TRIVIAL);
    let result = apply(&MinIRafHeuristic::new(config), &system)?;
    assert_eq!(result.size(), 1);
    assert_irreducible_raf(&result)?;

    let system = mk_system(UNCATALYZED);
    assert!(apply(&MinIRafHeuristic::default(), &system)?.is_empty());
    Ok(())
}

#[test]
fn min_iraf_reports_all_smallest() -> Cancellable<()> {
    init_logger();
    let system = mk_system(TWO_TRIVIAL);
    let config = HeuristicConfig {
        all_smallest: true,
        ..HeuristicConfig::new(40, 3)
    };
    let results = MinIRafHeuristic::new(config).apply_all(&system, &NoProgress)?;
    assert_eq!(results.len(), 2);
    let mut found: Vec<&str> = results.iter().map(|r| names(r)[0]).collect();
    found.sort();
    assert_eq!(found, vec!["r1", "r2"]);
    for result in &results {
        assert_irreducible_raf(result)?;
    }
    Ok(())
}

#[test]
fn min_iraf_is_reproducible() -> Cancellable<()> {
    init_logger();
    let system = mk_system(TWO_TRIVIAL);
    let algorithm = MinIRafHeuristic::new(HeuristicConfig::new(10, 11));
    let first = apply(&algorithm, &system)?;
    let second = apply(&algorithm, &system)?;
    assert!(first.same_content(&second));
    Ok(())
}

#[test]
fn min_generating_element_targets() -> Cancellable<()> {
    init_logger();
    let system = mk_system(CHAIN);
    let with_targets = |targets: &[&str]| HeuristicConfig {
        targets: targets.iter().map(|t| t.to_string()).collect(),
        ..HeuristicConfig::new(20, 5)
    };

    let result = apply(&MinRafGeneratingElement::new(with_targets(&["e"])), &system)?;
    assert_eq!(names(&result), vec!["r1", "r2", "r3"]);

    let result = apply(&MinRafGeneratingElement::new(with_targets(&["d"])), &system)?;
    assert_eq!(names(&result), vec!["r1", "r2"]);

    // `y` is never reached from the food set.
    let result = apply(&MinRafGeneratingElement::new(with_targets(&["y"])), &system)?;
    assert!(result.is_empty());

    let result = apply(&MinRafGeneratingElement::new(with_targets(&["unknown"])), &system)?;
    assert!(result.is_empty());

    let result = apply(&MinRafGeneratingElement::new(with_targets(&["a"])), &system)?;
    assert!(result.is_empty());
    Ok(())
}

#[test]
fn algorithm_names_parse() {
    for kind in AlgorithmKind::ALL {
        assert_eq!(kind.name().parse::<AlgorithmKind>(), Ok(kind));
        let algorithm = kind.build(&HeuristicConfig::default());
        assert_eq!(algorithm.name(), kind.name());
        assert!(!algorithm.description().is_empty());
    }
    assert_eq!("max raf".parse::<AlgorithmKind>(), Ok(AlgorithmKind::MaxRaf));
    assert_eq!("MaxRAF".parse::<AlgorithmKind>(), Ok(AlgorithmKind::MaxRaf));
    assert_eq!(
        "max-pseudo-raf".parse::<AlgorithmKind>(),
        Ok(AlgorithmKind::MaxPseudoRaf)
    );
    assert_eq!("mucaf".parse::<AlgorithmKind>(), Ok(AlgorithmKind::MuCaf));
    assert!("max foo".parse::<AlgorithmKind>().is_err());
}

#[test]
fn cancelled_sink_stops_algorithms() {
    init_logger();
    let system = mk_system(CHAIN);
    let flag = CancelFlag::new();
    flag.cancel();
    for kind in AlgorithmKind::ALL {
        let algorithm = kind.build(&HeuristicConfig::new(4, 1));
        if kind == AlgorithmKind::MuCaf || kind == AlgorithmKind::URaf {
            // Systems without inhibitors are answered without any iteration.
            continue;
        }
        if kind == AlgorithmKind::MinRafGeneratingElement {
            continue;
        }
        assert!(algorithm.apply(&system, &flag).is_err(), "{kind}");
    }
}

#[test]
fn timeout_stops_parallel_trials() {
    init_logger();
    // A long chain where every reaction is catalyzed by its own input.
    let mut text = "Food: m0\n".to_string();
    for i in 0..500 {
        writeln!(text, "r{i} : m{i} [m{i}] -> m{}", i + 1).unwrap();
    }
    let system = mk_system(&text);

    let algorithm = MinIRafHeuristic::new(HeuristicConfig::new(1000, 1));
    let result = cancel_this::on_timeout(Duration::from_millis(10), || {
        algorithm.apply(&system, &NoProgress)
    });
    assert!(result.is_err());
}
