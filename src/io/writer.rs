use crate::model::{Direction, MoleculeId, MoleculeTable, Reaction, ReactionSystem};
use itertools::Itertools;
use std::collections::BTreeMap;
use std::fmt::Write;
use std::str::FromStr;

/// How molecules on one side of a reaction are separated.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Notation {
    /// `A + B [C] -> D`
    #[default]
    Full,
    /// `A B [C] -> D`
    Sparse,
}

/// Which arrows are written.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ArrowStyle {
    /// `->`, `<-` and `<->`
    #[default]
    Simple,
    /// `=>`, `<=` and `<=>`
    Double,
}

impl FromStr for Notation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "full" => Ok(Notation::Full),
            "sparse" => Ok(Notation::Sparse),
            _ => Err(format!("Unknown reaction notation `{s}` (expected `full` or `sparse`).")),
        }
    }
}

impl FromStr for ArrowStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "simple" | "arrow" | "->" => Ok(ArrowStyle::Simple),
            "double" | "=>" => Ok(ArrowStyle::Double),
            _ => Err(format!("Unknown arrow style `{s}` (expected `simple` or `double`).")),
        }
    }
}

fn arrow(direction: Direction, style: ArrowStyle) -> &'static str {
    match (direction, style) {
        (Direction::Forward, ArrowStyle::Simple) => "->",
        (Direction::Reverse, ArrowStyle::Simple) => "<-",
        (Direction::Both, ArrowStyle::Simple) => "<->",
        (Direction::Forward, ArrowStyle::Double) => "=>",
        (Direction::Reverse, ArrowStyle::Double) => "<=",
        (Direction::Both, ArrowStyle::Double) => "<=>",
    }
}

fn format_side(
    ids: &[MoleculeId],
    coefficients: Option<&BTreeMap<MoleculeId, u32>>,
    table: &MoleculeTable,
    notation: Notation,
) -> String {
    let separator = match notation {
        Notation::Full => " + ",
        Notation::Sparse => " ",
    };
    ids.iter()
        .map(|id| {
            let count = coefficients.and_then(|c| c.get(id)).copied().unwrap_or(1);
            (table.name(*id), count)
        })
        .sorted()
        .map(|(name, count)| {
            if count == 1 {
                name.to_string()
            } else {
                format!("{count} {name}")
            }
        })
        .join(separator)
}

/// Format a single reaction line, e.g. `r1 : A + B [C] {D} -> 2 E`.
pub fn format_reaction(
    reaction: &Reaction,
    table: &MoleculeTable,
    notation: Notation,
    style: ArrowStyle,
) -> String {
    let coefficients = reaction.coefficients();
    let mut line = format!(
        "{} : {}",
        reaction.name(),
        format_side(
            reaction.reactants(),
            coefficients.map(|c| &c.reactants),
            table,
            notation
        )
    );
    if !reaction.catalysts().is_formal() {
        // Infallible for `String`.
        let _ = write!(line, " [{}]", reaction.catalysts().format(table));
    }
    if reaction.has_inhibitors() {
        let separator = match notation {
            Notation::Full => ", ",
            Notation::Sparse => " ",
        };
        let inhibitors = table.sorted_names(reaction.inhibitors().iter().copied());
        let _ = write!(line, " {{{}}}", inhibitors.join(separator));
    }
    let _ = write!(
        line,
        " {} {}",
        arrow(reaction.direction(), style),
        format_side(
            reaction.products(),
            coefficients.map(|c| &c.products),
            table,
            notation
        )
    );
    line
}

/// Format the food line, e.g. `Food: A, B`.
pub fn format_food(system: &ReactionSystem, notation: Notation) -> String {
    let separator = match notation {
        Notation::Full => ", ",
        Notation::Sparse => " ",
    };
    format!("Food: {}", system.names_of(system.food()).join(separator))
}

/// Format the whole system: an optional `#` header with the system name, the food line
/// and one line per reaction in system order. The output is accepted by
/// [`crate::io::parse_system`].
pub fn write_system(system: &ReactionSystem, notation: Notation, style: ArrowStyle) -> String {
    let mut result = String::new();
    if !system.name().is_empty() {
        let _ = writeln!(result, "# {}", system.name());
    }
    let _ = writeln!(result, "{}", format_food(system, notation));
    if !system.is_empty() {
        result.push('\n');
    }
    for reaction in system.reactions() {
        let _ = writeln!(
            result,
            "{}",
            format_reaction(reaction, system.molecules(), notation, style)
        );
    }
    result
}
