use crate::model::{MoleculeId, MoleculeSet, MoleculeTable};
use itertools::Itertools;

/// The name of the "formal food" catalyst. A reaction catalyzed by it needs no catalyst.
pub const FORMAL_FOOD: &str = "$";

/// A catalyst requirement in disjunctive normal form.
///
/// The expression is satisfied if every molecule of at least one conjunction is available.
/// An expression without conjunctions is the formal food catalyst and is always satisfied.
///
/// Conjunctions are sorted and deduplicated, and conjunctions that contain another
/// conjunction are absorbed, so two equivalent expressions compare equal.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CatalystExpression {
    conjunctions: Vec<Vec<MoleculeId>>,
}

impl CatalystExpression {
    pub fn formal() -> CatalystExpression {
        CatalystExpression::default()
    }

    pub fn new(conjunctions: Vec<Vec<MoleculeId>>) -> CatalystExpression {
        let mut conjunctions: Vec<Vec<MoleculeId>> = conjunctions
            .into_iter()
            .map(|mut c| {
                c.sort_unstable();
                c.dedup();
                c
            })
            .collect();

        // An empty conjunction is always true, hence so is the whole disjunction.
        if conjunctions.iter().any(|c| c.is_empty()) {
            return CatalystExpression::formal();
        }

        conjunctions.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
        conjunctions.dedup();
        let mut kept: Vec<Vec<MoleculeId>> = Vec::with_capacity(conjunctions.len());
        for c in conjunctions {
            if !kept.iter().any(|k| k.iter().all(|m| c.binary_search(m).is_ok())) {
                kept.push(c);
            }
        }
        kept.sort_unstable();
        CatalystExpression { conjunctions: kept }
    }

    /// A single catalyst molecule.
    pub fn single(id: MoleculeId) -> CatalystExpression {
        CatalystExpression {
            conjunctions: vec![vec![id]],
        }
    }

    pub fn is_formal(&self) -> bool {
        self.conjunctions.is_empty()
    }

    pub fn conjunctions(&self) -> &[Vec<MoleculeId>] {
        &self.conjunctions
    }

    pub fn is_satisfied_by(&self, available: &MoleculeSet) -> bool {
        self.is_formal() || self.conjunctions.iter().any(|c| available.contains_all(c))
    }

    /// Every molecule mentioned by some conjunction.
    pub fn molecules(&self) -> impl Iterator<Item = MoleculeId> + '_ {
        self.conjunctions.iter().flatten().copied()
    }

    /// Parse the textual form `a&b,c` (meaning `(a AND b) OR c`), interning names into `table`.
    ///
    /// Whitespace between two names separates disjuncts, parentheses are ignored and the
    /// formal food `$` is always available.
    pub fn parse(text: &str, table: &mut MoleculeTable) -> Result<CatalystExpression, String> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(CatalystExpression::formal());
        }

        let mut conjunctions: Vec<Vec<MoleculeId>> = Vec::new();
        let mut current: Option<Vec<MoleculeId>> = None;
        let mut expect_member = false;

        for token in tokenize(text) {
            match token {
                Token::And => {
                    if current.is_none() || expect_member {
                        return Err(format!("Dangling `&` in catalyst expression `{text}`."));
                    }
                    expect_member = true;
                }
                Token::Or => {
                    if expect_member {
                        return Err(format!("Dangling `&` in catalyst expression `{text}`."));
                    }
                    conjunctions.extend(current.take());
                }
                Token::Name(name) => {
                    if !expect_member {
                        conjunctions.extend(current.take());
                    }
                    let conjunction = current.get_or_insert_with(Vec::new);
                    if name != FORMAL_FOOD {
                        conjunction.push(table.intern(name));
                    }
                    expect_member = false;
                }
            }
        }

        if expect_member {
            return Err(format!("Dangling `&` in catalyst expression `{text}`."));
        }
        conjunctions.extend(current.take());
        if conjunctions.is_empty() {
            return Err(format!("No catalyst in expression `{text}`."));
        }
        Ok(CatalystExpression::new(conjunctions))
    }

    /// The normalized textual form, with names sorted alphabetically inside each conjunction.
    pub fn format(&self, table: &MoleculeTable) -> String {
        if self.is_formal() {
            return FORMAL_FOOD.to_string();
        }
        self.conjunctions
            .iter()
            .map(|c| table.sorted_names(c.iter().copied()).join("&"))
            .sorted()
            .join(",")
    }
}

enum Token<'a> {
    And,
    Or,
    Name(&'a str),
}

fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;
    for (i, c) in text.char_indices() {
        let separator = c.is_whitespace() || matches!(c, ',' | '&' | '(' | ')');
        if separator {
            if let Some(s) = start.take() {
                tokens.push(Token::Name(&text[s..i]));
            }
            match c {
                '&' => tokens.push(Token::And),
                ',' => tokens.push(Token::Or),
                _ => {}
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        tokens.push(Token::Name(&text[s..]));
    }
    tokens
}
