//! Network algorithms over reaction systems.
//!
//! Every algorithm implements [`NetworkAlgorithm`]: it reads an input [`ReactionSystem`]
//! and returns a new system (same food, usually a subset of the reactions) without
//! modifying the input. Algorithms whose outcome depends on the order in which reactions
//! are considered additionally implement [`RandomizedAlgorithm`] and are sampled by
//! [`MultiRun`].
//!
//! # Example
//!
//! ```
//! use catnet_algo::algorithms::{AlgorithmKind, HeuristicConfig};
//! use catnet_algo::io::parse_system;
//! use catnet_algo::progress::NoProgress;
//!
//! let system = parse_system("Food: a b\nr1 : a + b -> c\nr2 : a + c [c] -> d").unwrap();
//! let algorithm = "max raf".parse::<AlgorithmKind>().unwrap().build(&HeuristicConfig::default());
//! let result = algorithm.apply(&system, &NoProgress).unwrap();
//! assert_eq!(result.size(), 2);
//! ```

use crate::DEFAULT_SEED;
use crate::model::ReactionSystem;
use crate::progress::ProgressSink;
use cancel_this::Cancellable;
use rand::rngs::StdRng;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[cfg(test)]
mod tests;

mod core_raf;
mod heuristic;
mod max_caf;
mod max_pseudo_raf;
mod max_raf;
mod min_generating;
mod min_iraf;
mod mu_caf;
mod multi_run;
mod quotient_raf;
mod remove_trivial;
mod trivial;
mod uraf;

pub use core_raf::CoreRaf;
pub use max_caf::MaxCaf;
pub use max_pseudo_raf::MaxPseudoRaf;
pub use max_raf::MaxRaf;
pub use min_generating::MinRafGeneratingElement;
pub use min_iraf::MinIRafHeuristic;
pub use mu_caf::MuCaf;
pub use multi_run::{MultiRun, RunOutcome};
pub use quotient_raf::QuotientRaf;
pub use remove_trivial::RemoveTrivialRafs;
pub use trivial::{TrivialCafs, TrivialRafs};
pub use uraf::URaf;

/// The uniform contract of all network algorithms.
pub trait NetworkAlgorithm: Send + Sync {
    /// A stable identifier, e.g. `"Max RAF"`.
    fn name(&self) -> &'static str;

    /// A human-readable one-line description.
    fn description(&self) -> &'static str;

    /// Compute the result sub-network of `input`.
    ///
    /// The computation checks `progress` for cancellation between its iterations and
    /// never returns a partial result.
    fn apply(
        &self,
        input: &ReactionSystem,
        progress: &dyn ProgressSink,
    ) -> Cancellable<ReactionSystem>;
}

/// An algorithm whose result depends on a random order of reactions.
pub trait RandomizedAlgorithm: NetworkAlgorithm {
    /// Compute one outcome, drawing all random choices from `rng`.
    fn apply_with_rng(
        &self,
        input: &ReactionSystem,
        rng: &mut StdRng,
        progress: &dyn ProgressSink,
    ) -> Cancellable<ReactionSystem>;
}

/// Parameters shared by the randomized algorithms.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeuristicConfig {
    /// The number of randomized trials (default: 100).
    pub runs: usize,
    /// The master seed; trial `i` uses [`crate::trial_seed`]`(seed, i)`.
    pub seed: u64,
    /// Report all distinct results tied at the smallest size, not only the first one.
    pub all_smallest: bool,
    /// Names of the target molecules of [`MinRafGeneratingElement`].
    pub targets: Vec<String>,
}

impl HeuristicConfig {
    pub fn new(runs: usize, seed: u64) -> HeuristicConfig {
        HeuristicConfig {
            runs,
            seed,
            ..HeuristicConfig::default()
        }
    }
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        HeuristicConfig {
            runs: 100,
            seed: DEFAULT_SEED,
            all_smallest: false,
            targets: Vec::new(),
        }
    }
}

/// All algorithms known by name.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AlgorithmKind {
    MaxCaf,
    MaxRaf,
    MaxPseudoRaf,
    TrivialCafs,
    TrivialRafs,
    RemoveTrivialRafs,
    QuotientRaf,
    CoreRaf,
    MuCaf,
    URaf,
    MinIRaf,
    MinRafGeneratingElement,
}

impl AlgorithmKind {
    pub const ALL: [AlgorithmKind; 12] = [
        AlgorithmKind::MaxCaf,
        AlgorithmKind::MaxRaf,
        AlgorithmKind::MaxPseudoRaf,
        AlgorithmKind::TrivialCafs,
        AlgorithmKind::TrivialRafs,
        AlgorithmKind::RemoveTrivialRafs,
        AlgorithmKind::QuotientRaf,
        AlgorithmKind::CoreRaf,
        AlgorithmKind::MuCaf,
        AlgorithmKind::URaf,
        AlgorithmKind::MinIRaf,
        AlgorithmKind::MinRafGeneratingElement,
    ];

    /// The stable name, identical to [`NetworkAlgorithm::name`] of the built instance.
    pub fn name(self) -> &'static str {
        match self {
            AlgorithmKind::MaxCaf => MaxCaf::NAME,
            AlgorithmKind::MaxRaf => MaxRaf::NAME,
            AlgorithmKind::MaxPseudoRaf => MaxPseudoRaf::NAME,
            AlgorithmKind::TrivialCafs => TrivialCafs::NAME,
            AlgorithmKind::TrivialRafs => TrivialRafs::NAME,
            AlgorithmKind::RemoveTrivialRafs => RemoveTrivialRafs::NAME,
            AlgorithmKind::QuotientRaf => QuotientRaf::NAME,
            AlgorithmKind::CoreRaf => CoreRaf::NAME,
            AlgorithmKind::MuCaf => MuCaf::NAME,
            AlgorithmKind::URaf => URaf::NAME,
            AlgorithmKind::MinIRaf => MinIRafHeuristic::NAME,
            AlgorithmKind::MinRafGeneratingElement => MinRafGeneratingElement::NAME,
        }
    }

    /// Whether the outcome depends on random choices and `config.runs` matters.
    pub fn is_randomized(self) -> bool {
        matches!(
            self,
            AlgorithmKind::MuCaf
                | AlgorithmKind::URaf
                | AlgorithmKind::MinIRaf
                | AlgorithmKind::MinRafGeneratingElement
        )
    }

    /// Build an instance. Order-sensitive algorithms (MuCAF, URAF) are wrapped in
    /// [`MultiRun`] and report their most frequent outcome.
    pub fn build(self, config: &HeuristicConfig) -> Box<dyn NetworkAlgorithm> {
        match self {
            AlgorithmKind::MaxCaf => Box::new(MaxCaf),
            AlgorithmKind::MaxRaf => Box::new(MaxRaf),
            AlgorithmKind::MaxPseudoRaf => Box::new(MaxPseudoRaf),
            AlgorithmKind::TrivialCafs => Box::new(TrivialCafs),
            AlgorithmKind::TrivialRafs => Box::new(TrivialRafs),
            AlgorithmKind::RemoveTrivialRafs => Box::new(RemoveTrivialRafs),
            AlgorithmKind::QuotientRaf => Box::new(QuotientRaf),
            AlgorithmKind::CoreRaf => Box::new(CoreRaf),
            AlgorithmKind::MuCaf => Box::new(MultiRun::new(MuCaf, config.runs, config.seed)),
            AlgorithmKind::URaf => Box::new(MultiRun::new(URaf, config.runs, config.seed)),
            AlgorithmKind::MinIRaf => Box::new(MinIRafHeuristic::new(config.clone())),
            AlgorithmKind::MinRafGeneratingElement => {
                Box::new(MinRafGeneratingElement::new(config.clone()))
            }
        }
    }
}

impl Display for AlgorithmKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Only letters and digits are compared, ignoring case.
fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(|c| c.to_lowercase())
        .collect()
}

impl FromStr for AlgorithmKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        AlgorithmKind::ALL
            .into_iter()
            .find(|kind| normalize(kind.name()) == wanted)
            .ok_or_else(|| {
                let known = AlgorithmKind::ALL.map(|k| k.name()).join(", ");
                format!("Unknown algorithm `{s}` (known algorithms: {known}).")
            })
    }
}
