use crate::io::error::{ParseError, ReadError};
use crate::model::{
    CatalystExpression, Coefficients, Direction, FORMAL_FOOD, MoleculeId, MoleculeSet,
    MoleculeTable, Reaction, ReactionSystem,
};
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_until, take_while1},
    character::complete::{char, digit1, multispace0, multispace1},
    combinator::{map, opt, recognize},
    multi::{separated_list0, separated_list1},
    sequence::delimited,
};
use rustc_hash::FxHashSet;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

/// One reaction line before its molecules are interned.
#[derive(Clone, Debug)]
struct ReactionLine<'a> {
    name: &'a str,
    reactants: Vec<(Option<&'a str>, &'a str)>,
    catalysts: Option<&'a str>,
    inhibitors: Option<&'a str>,
    direction: Direction,
    products: Vec<(Option<&'a str>, &'a str)>,
}

fn is_molecule_char(c: char) -> bool {
    c.is_alphanumeric()
        || matches!(
            c,
            '_' | '.' | '\'' | '*' | '/' | '|' | '^' | '~' | '@' | '#' | '%' | '!' | '?'
        )
}

fn molecule(data: &str) -> IResult<&str, &str> {
    take_while1(is_molecule_char).parse(data)
}

/// Parses a term of the form `2 A` or `A`. The coefficient is converted later, so that an
/// out-of-range number is reported instead of being read as a molecule.
fn term(data: &str) -> IResult<&str, (Option<&str>, &str)> {
    alt((
        map((digit1, multispace1, molecule), |(count, _, name)| (Some(count), name)),
        map(molecule, |name| (None, name)),
    ))
    .parse(data)
}

/// Parses one side of a reaction, either `2 A + B` (full) or `2 A B` (sparse).
fn reaction_side(data: &str) -> IResult<&str, Vec<(Option<&str>, &str)>> {
    separated_list1(
        alt((delimited(multispace0, tag("+"), multispace0), multispace1)),
        term,
    )
    .parse(data)
}

fn arrow(data: &str) -> IResult<&str, Direction> {
    alt((
        map(alt((tag("<->"), tag("<=>"))), |_| Direction::Both),
        map(alt((tag("->"), tag("=>"))), |_| Direction::Forward),
        map(alt((tag("<-"), tag("<="))), |_| Direction::Reverse),
    ))
    .parse(data)
}

/// Parses a reaction of the form:
/// ```ignore
/// r1 : A + B [C&D,E] {F} -> 2 G
/// ```
fn reaction_line(data: &str) -> IResult<&str, ReactionLine<'_>> {
    let (rem, (name, _, reactants, _, catalysts, _, inhibitors, _, direction, _, products, _)) =
        (
            take_while1(|c: char| !c.is_whitespace() && c != ':'),
            delimited(multispace0, char(':'), multispace0),
            reaction_side,
            multispace0,
            opt(delimited(char('['), take_until("]"), char(']'))),
            multispace0,
            opt(delimited(char('{'), take_until("}"), char('}'))),
            multispace0,
            arrow,
            multispace0,
            reaction_side,
            multispace0,
        )
            .parse(data)?;

    let line = ReactionLine {
        name,
        reactants,
        catalysts,
        inhibitors,
        direction,
        products,
    };
    Ok((rem, line))
}

/// Parses a line of the form:
/// ```ignore
/// Food: A, B C
/// ```
fn food_line(data: &str) -> IResult<&str, Vec<&str>> {
    let (rem, (_, _, _, _, molecules, _)) = (
        alt((tag_no_case("food"), tag("F"))),
        multispace0,
        char(':'),
        multispace0,
        separated_list0(
            alt((
                recognize(delimited(multispace0, char(','), multispace0)),
                multispace1,
            )),
            molecule,
        ),
        multispace0,
    )
        .parse(data)?;
    Ok((rem, molecules))
}

fn intern_side(
    side: &[(Option<&str>, &str)],
    table: &mut MoleculeTable,
    line: usize,
    reaction: &str,
) -> Result<BTreeMap<MoleculeId, u32>, ParseError> {
    let mut coefficients = BTreeMap::new();
    for (count, name) in side {
        let count = match count {
            None => 1,
            Some(text) => text.parse::<u32>().map_err(|_| ParseError::Coefficient {
                line,
                reaction: reaction.to_string(),
                text: text.to_string(),
            })?,
        };
        let id = table.intern(name);
        if coefficients.insert(id, count).is_some() {
            return Err(ParseError::AmbiguousCoefficient {
                line,
                reaction: reaction.to_string(),
                molecule: name.to_string(),
            });
        }
    }
    Ok(coefficients)
}

fn named_to_reaction(
    parsed: ReactionLine<'_>,
    table: &mut MoleculeTable,
    line: usize,
) -> Result<Reaction, ParseError> {
    let reactants = intern_side(&parsed.reactants, table, line, parsed.name)?;
    let products = intern_side(&parsed.products, table, line, parsed.name)?;

    let catalysts = match parsed.catalysts {
        None => CatalystExpression::formal(),
        Some(text) => CatalystExpression::parse(text, table)
            .map_err(|details| ParseError::Catalysts { line, details })?,
    };

    let inhibitors = parsed
        .inhibitors
        .unwrap_or_default()
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|name| !name.is_empty() && *name != FORMAL_FOOD)
        .map(|name| table.intern(name))
        .collect();

    let reaction = Reaction::new(
        parsed.name,
        reactants.keys().copied().collect(),
        products.keys().copied().collect(),
        catalysts,
        inhibitors,
        parsed.direction,
    );

    if reactants.values().chain(products.values()).any(|c| *c != 1) {
        Ok(reaction.with_coefficients(Coefficients {
            reactants,
            products,
        }))
    } else {
        Ok(reaction)
    }
}

/// Parse a reaction system given in the reaction notation.
///
/// The input contains food lines (`Food: A, B`) and reaction lines
/// (`name : reactants [catalysts] {inhibitors} -> products`, with `<-`, `<->`, `=>`, `<=` or
/// `<=>` as alternative arrows). Empty lines and lines starting with `#` are skipped.
pub fn parse_system(text: &str) -> Result<ReactionSystem, ParseError> {
    parse_named_system("", text)
}

/// Same as [`parse_system`], but assigns a name to the resulting system.
pub fn parse_named_system(name: &str, text: &str) -> Result<ReactionSystem, ParseError> {
    let mut table = MoleculeTable::new();
    let mut food: Vec<MoleculeId> = Vec::new();
    let mut reactions: Vec<Arc<Reaction>> = Vec::new();
    let mut names: FxHashSet<String> = FxHashSet::default();

    for (index, line) in text.lines().enumerate() {
        let line_number = index + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Ok(("", molecules)) = food_line(line) {
            food.extend(
                molecules
                    .into_iter()
                    .filter(|m| *m != FORMAL_FOOD)
                    .map(|m| table.intern(m)),
            );
            continue;
        }

        let parsed = match reaction_line(line) {
            Ok(("", parsed)) => parsed,
            _ => {
                return Err(ParseError::Syntax {
                    line: line_number,
                    text: line.to_string(),
                });
            }
        };

        if !names.insert(parsed.name.to_string()) {
            return Err(ParseError::DuplicateReaction {
                line: line_number,
                name: parsed.name.to_string(),
            });
        }
        reactions.push(Arc::new(named_to_reaction(parsed, &mut table, line_number)?));
    }

    let food: MoleculeSet = food.into_iter().collect();
    Ok(ReactionSystem::new(name, Arc::new(table), food, reactions))
}

/// Read a reaction system from a file. The system is named after the file stem.
pub fn read_system(path: &Path) -> Result<ReactionSystem, ReadError> {
    let text = std::fs::read_to_string(path)?;
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(parse_named_system(&name, &text)?)
}
