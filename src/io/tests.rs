use crate::io::{ArrowStyle, Notation, ParseError, parse_system, write_system};
use crate::model::Direction;

#[test]
fn parse_food_and_reactions() {
    let system = parse_system(
        "# comment\n\
         Food: A, B\n\
         \n\
         r1 : A + B [C] -> C\n\
         r2 : A + C [C&B, D] {E} <-> D\n\
         r3 : D <- E\n",
    )
    .unwrap();

    assert_eq!(system.names_of(system.food()), vec!["A", "B"]);
    assert_eq!(system.size(), 3);
    assert_eq!(system.count_two_way(), 1);
    assert_eq!(system.count_one_way(), 2);
    assert!(system.has_inhibitors());

    let r2 = system.reaction("r2").unwrap();
    assert_eq!(r2.direction(), Direction::Both);
    assert_eq!(r2.catalysts().conjunctions().len(), 2);
    assert_eq!(
        r2.catalysts().format(system.molecules()),
        "B&C,D".to_string()
    );
    assert_eq!(r2.inhibitors().len(), 1);

    let r3 = system.reaction("r3").unwrap();
    assert_eq!(r3.direction(), Direction::Reverse);
    assert!(r3.catalysts().is_formal());
}

#[test]
fn parse_sparse_notation_and_coefficients() {
    let system = parse_system("F: A B\nr1 : 2 A B [$] => C\n").unwrap();
    let r1 = system.reaction("r1").unwrap();
    assert_eq!(r1.reactants().len(), 2);
    assert!(r1.catalysts().is_formal());

    let a = system.molecule("A").unwrap();
    let coefficients = r1.coefficients().unwrap();
    assert_eq!(coefficients.reactants.get(&a), Some(&2));
}

#[test]
fn parse_reports_line_numbers() {
    let error = parse_system("Food: A\nr1 : A -> B\nnonsense here\n").unwrap_err();
    assert_eq!(
        error,
        ParseError::Syntax {
            line: 3,
            text: "nonsense here".to_string()
        }
    );

    let error = parse_system("Food: A\nr1 : A -> B\nr1 : B -> C\n").unwrap_err();
    assert!(matches!(error, ParseError::DuplicateReaction { line: 3, .. }));

    let error = parse_system("r1 : A + A -> B\n").unwrap_err();
    assert!(matches!(error, ParseError::AmbiguousCoefficient { line: 1, .. }));

    let error = parse_system("r1 : A [B&] -> C\n").unwrap_err();
    assert!(matches!(error, ParseError::Catalysts { line: 1, .. }));
}

#[test]
fn parse_rejects_oversized_coefficients() {
    let error = parse_system("Food: A\nr1 : 99999999999 A -> B\n").unwrap_err();
    assert_eq!(
        error,
        ParseError::Coefficient {
            line: 2,
            reaction: "r1".to_string(),
            text: "99999999999".to_string()
        }
    );

    // The largest representable coefficient is still accepted.
    let system = parse_system("Food: A\nr1 : 4294967295 A -> B\n").unwrap();
    assert_eq!(system.reaction("r1").unwrap().reactants().len(), 1);
}

#[test]
fn parse_rejects_empty_sides() {
    assert!(parse_system("r1 : -> B\n").is_err());
    assert!(parse_system("r1 : A [B] ->\n").is_err());
}

#[test]
fn written_system_parses_back() {
    let text = "Food: A, B\n\
                r1 : A + B [C] -> C\n\
                r2 : 2 A + C [C&B, D] {E, F} <-> D\n";
    let system = parse_system(text).unwrap();

    for notation in [Notation::Full, Notation::Sparse] {
        for style in [ArrowStyle::Simple, ArrowStyle::Double] {
            let written = write_system(&system, notation, style);
            let parsed = parse_system(&written).unwrap();
            assert!(parsed.same_content(&system), "{written}");
            let r2 = parsed.reaction("r2").unwrap();
            assert_eq!(r2.direction(), Direction::Both);
            assert_eq!(r2.inhibitors().len(), 2);
        }
    }
}

#[test]
fn write_full_notation() {
    let system = parse_system("Food: B A\nr1 : B + A [C,$] {D} -> C\n").unwrap();
    let written = write_system(&system, Notation::Full, ArrowStyle::Simple);
    // A formal food disjunct makes the catalyst vacuous.
    assert_eq!(written, "Food: A, B\n\nr1 : A + B {D} -> C\n");
}
