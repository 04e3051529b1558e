//! Small reaction systems with known results.

/// Catalyst `E` is never produced, so nothing is supported.
pub const UNCATALYZED: &str = "\
Food: A, B
r1 : A + B [E] -> C
";

/// `r1` is catalyzed by its own product, which is never available before `r1` fires.
/// Both the maximal CAF and the maximal RAF are empty.
pub const SELF_CATALYZED: &str = "\
Food: A, B
r1 : A + B [C] -> C
";

/// `r1` needs no catalyst and produces the catalyst of `r2`. Both the maximal CAF and
/// the maximal RAF are `{r1, r2}`.
pub const FOOD_CATALYZED: &str = "\
Food: A, B
r1 : A + B [$] -> C
r2 : A + C [C] -> D
";

/// Like [`FOOD_CATALYZED`], but `D` (produced by `r2`) inhibits `r1`.
pub const SELF_INHIBITING: &str = "\
Food: A, B
r1 : A + B {D} -> C
r2 : A + C [C] -> D
";

/// Two reactions that block each other. Depending on which one fires first, the
/// inhibition-aware closure contains either `r1` or `r2`.
pub const MUTUAL_INHIBITION: &str = "\
Food: a
r1 : a {c} -> b
r2 : a {b} -> c
";

/// `r1` starts from food, `r2` and `r3` extend it one step at a time. `r4` and `r5` need
/// each other's products and are never reached from the food set.
pub const CHAIN: &str = "\
Food: a, b
r1 : a + b [a] -> c
r2 : a + c [c] -> d
r3 : b + d [e,d] -> e
r4 : x [a] -> y
r5 : a + y [a] -> x
";

/// Two independent trivial RAFs `r1` and `r2`, joined by `r3`.
pub const TWO_TRIVIAL: &str = "\
Food: f
r1 : f [f] -> x
r2 : f -> y
r3 : x + y [x] -> z
";

/// A two-way reaction whose reverse direction is the only way to obtain `b`.
pub const REVERSIBLE: &str = "\
Food: a
r1 : b <-> a
r2 : b [b] -> c
";
