//! Ranks of reactions and molecules by the closure round in which they first appear.
//!
//! Food molecules have rank 0. In round `k`, every reaction that is enabled for the first
//! time gets rank `k`, and the molecules that the enabled reactions make available for the
//! first time get rank `k` as well. Reactions that are never enabled are reported
//! together with the reason (missing reactants, unsatisfied catalysts, present
//! inhibitors).
//!
//! The ranking also induces two dependency graphs: a reaction graph with an edge `x -> y`
//! whenever `x` produces a molecule that `y` consumes or is catalyzed by and `x` has a
//! smaller rank than `y`, and a molecule graph with an edge `m -> n` whenever a ranked
//! reaction requires `m` and produces `n`.

use crate::closure::ClosureRules;
use crate::log_molecules;
use crate::model::{MoleculeId, MoleculeSet, Reaction, ReactionSystem};
use crate::progress::ProgressSink;
use cancel_this::Cancellable;
use itertools::Itertools;
use log::{debug, info};
use petgraph::graph::{DiGraph, NodeIndex};
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use std::fmt::Write;
use std::sync::Arc;

/// A reaction that never becomes enabled, and why.
#[derive(Clone, Debug)]
pub struct UnreachedReaction {
    pub reaction: Arc<Reaction>,
    /// Unavailable inputs of the direction that misses the fewest of them.
    pub missing_reactants: Vec<MoleculeId>,
    pub unsatisfied_catalysts: bool,
    pub present_inhibitors: Vec<MoleculeId>,
}

#[derive(Clone, Debug)]
pub struct Stratification {
    system: ReactionSystem,
    molecule_ranks: BTreeMap<MoleculeId, usize>,
    reaction_ranks: Vec<(Arc<Reaction>, usize)>,
    unreached: Vec<UnreachedReaction>,
    rounds: usize,
}

/// Molecules a reaction needs in some direction, including catalysts.
fn requirements(reaction: &Reaction) -> MoleculeSet {
    let mut result = reaction.inputs();
    result.extend(reaction.catalysts().molecules());
    result
}

impl Stratification {
    pub fn compute(
        system: &ReactionSystem,
        rules: ClosureRules,
        progress: &dyn ProgressSink,
    ) -> Cancellable<Stratification> {
        progress.set_tasks("Stratification", "closure rounds");
        let mut available = system.food().clone();
        let mut molecule_ranks: BTreeMap<MoleculeId, usize> =
            available.iter().map(|m| (m, 0)).collect();
        let mut reaction_ranks: Vec<(Arc<Reaction>, usize)> = Vec::new();
        let mut pending = system.reactions().to_vec();

        let mut round = 0;
        loop {
            progress.checkpoint()?;
            let (enabled, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut pending)
                .into_iter()
                .partition(|r| r.is_enabled(&available, rules));
            pending = rest;

            let mut fresh = MoleculeSet::new();
            let fired = reaction_ranks.iter().map(|(r, _)| r).chain(&enabled);
            for reaction in fired {
                for output in reaction.enabled_outputs(&available, rules) {
                    fresh.extend(output.iter().copied().filter(|m| !available.contains(*m)));
                }
            }
            if enabled.is_empty() && fresh.is_empty() {
                break;
            }

            round += 1;
            for molecule in fresh.iter() {
                molecule_ranks.insert(molecule, round);
            }
            available.union_with(&fresh);
            debug!(
                "[iteration:{}] Stratification ranked {} reactions ({}).",
                round,
                enabled.len(),
                log_molecules(&available)
            );
            reaction_ranks.extend(enabled.into_iter().map(|r| (r, round)));
        }

        let unreached: Vec<UnreachedReaction> = pending
            .into_iter()
            .map(|reaction| {
                let missing_reactants = reaction
                    .sides()
                    .map(|(input, _)| {
                        input
                            .iter()
                            .copied()
                            .filter(|m| !available.contains(*m))
                            .collect::<Vec<_>>()
                    })
                    .min_by_key(|missing| missing.len())
                    .unwrap_or_default();
                let present_inhibitors = reaction
                    .inhibitors()
                    .iter()
                    .copied()
                    .filter(|m| available.contains(*m))
                    .collect();
                UnreachedReaction {
                    unsatisfied_catalysts: !reaction.is_catalyzed(&available),
                    missing_reactants,
                    present_inhibitors,
                    reaction,
                }
            })
            .collect();

        info!(
            "Stratification finished after {} rounds ({} ranked, {} unreached).",
            round,
            reaction_ranks.len(),
            unreached.len()
        );
        Ok(Stratification {
            system: system.clone(),
            molecule_ranks,
            reaction_ranks,
            unreached,
            rounds: round,
        })
    }

    /// The number of rounds that enabled a reaction or produced a molecule.
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    pub fn molecule_rank(&self, molecule: MoleculeId) -> Option<usize> {
        self.molecule_ranks.get(&molecule).copied()
    }

    pub fn reaction_rank(&self, name: &str) -> Option<usize> {
        self.reaction_ranks
            .iter()
            .find(|(r, _)| r.name() == name)
            .map(|(_, rank)| *rank)
    }

    /// Ranked reactions in order of increasing rank.
    pub fn ranked_reactions(&self) -> &[(Arc<Reaction>, usize)] {
        &self.reaction_ranks
    }

    pub fn unreached(&self) -> &[UnreachedReaction] {
        &self.unreached
    }

    /// Reaction dependencies between ranked reactions. Nodes are weighted by reaction names.
    pub fn reaction_graph(&self) -> DiGraph<String, ()> {
        let mut graph = DiGraph::new();
        let nodes: Vec<NodeIndex> = self
            .reaction_ranks
            .iter()
            .map(|(r, _)| graph.add_node(r.name().to_string()))
            .collect();
        let outputs: Vec<MoleculeSet> = self
            .reaction_ranks
            .iter()
            .map(|(r, _)| r.outputs())
            .collect();
        let needs: Vec<MoleculeSet> = self
            .reaction_ranks
            .iter()
            .map(|(r, _)| requirements(r))
            .collect();

        for (x, (_, rank_x)) in self.reaction_ranks.iter().enumerate() {
            for (y, (_, rank_y)) in self.reaction_ranks.iter().enumerate() {
                if rank_x < rank_y && !outputs[x].intersect(&needs[y]).is_empty() {
                    graph.update_edge(nodes[x], nodes[y], ());
                }
            }
        }
        graph
    }

    /// Molecule dependencies through ranked reactions. Nodes are weighted by molecule names.
    pub fn molecule_graph(&self) -> DiGraph<String, ()> {
        let table = self.system.molecules();
        let mut graph = DiGraph::new();
        let nodes: FxHashMap<MoleculeId, NodeIndex> = self
            .molecule_ranks
            .keys()
            .map(|m| (*m, graph.add_node(table.name(*m).to_string())))
            .collect();

        for (reaction, _) in &self.reaction_ranks {
            let produced = reaction.outputs();
            for source in requirements(reaction).iter() {
                for target in produced.iter() {
                    if source == target {
                        continue;
                    }
                    if let (Some(s), Some(t)) = (nodes.get(&source), nodes.get(&target)) {
                        graph.update_edge(*s, *t, ());
                    }
                }
            }
        }
        graph
    }

    /// A layered text report: one block per rank, then the unreached reactions.
    pub fn report(&self) -> String {
        let table = self.system.molecules();
        let mut result = String::new();
        for rank in 0..=self.rounds {
            let molecules = table.sorted_names(
                self.molecule_ranks
                    .iter()
                    .filter(|(_, r)| **r == rank)
                    .map(|(m, _)| *m),
            );
            let reactions = self
                .reaction_ranks
                .iter()
                .filter(|(_, r)| *r == rank)
                .map(|(r, _)| r.name())
                .sorted()
                .join(", ");
            let _ = writeln!(result, "Rank {rank}:");
            if !reactions.is_empty() {
                let _ = writeln!(result, "  reactions: {reactions}");
            }
            if !molecules.is_empty() {
                let _ = writeln!(result, "  molecules: {}", molecules.join(", "));
            }
        }

        if !self.unreached.is_empty() {
            let _ = writeln!(result, "Unreached reactions:");
        }
        for unreached in &self.unreached {
            let mut reasons = Vec::new();
            if !unreached.missing_reactants.is_empty() {
                let missing = table.sorted_names(unreached.missing_reactants.iter().copied());
                reasons.push(format!("missing reactants {}", missing.join(", ")));
            }
            if unreached.unsatisfied_catalysts {
                reasons.push(format!(
                    "unsatisfied catalysts [{}]",
                    unreached.reaction.catalysts().format(table)
                ));
            }
            if !unreached.present_inhibitors.is_empty() {
                let present = table.sorted_names(unreached.present_inhibitors.iter().copied());
                reasons.push(format!("present inhibitors {{{}}}", present.join(", ")));
            }
            let _ = writeln!(
                result,
                "  {}: {}",
                unreached.reaction.name(),
                reasons.join("; ")
            );
        }
        result
    }
}
