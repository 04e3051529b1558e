pub mod example_systems;

use crate::io::parse_system;
use crate::model::ReactionSystem;

/// Initialize env_logger for tests. Safe to call multiple times.
pub fn init_logger() {
    let _ = env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Trace)
        .is_test(true)
        .try_init();
}

/// Parse a system given in the reaction notation, panicking on malformed input.
pub fn mk_system(text: &str) -> ReactionSystem {
    match parse_system(text) {
        Ok(system) => system,
        Err(error) => panic!("Invalid test system: {error}"),
    }
}

/// Sorted reaction names of a system.
pub fn names(system: &ReactionSystem) -> Vec<&str> {
    system.reaction_names().into_iter().collect()
}

/// Check that every reaction of `a` also appears in `b`.
pub fn is_sub_network(a: &ReactionSystem, b: &ReactionSystem) -> bool {
    a.reaction_names().is_subset(&b.reaction_names())
}
