//! Reading and writing reaction systems in the textual reaction notation.
//!
//! ```text
//! Food: A, B
//! r1 : A + B [C] -> C
//! r2 : 2 A + C [C&B, D] {E} <-> D
//! ```

mod error;
mod parser;
mod writer;

#[cfg(test)]
mod tests;

pub use error::{ParseError, ReadError};
pub use parser::{parse_named_system, parse_system, read_system};
pub use writer::{ArrowStyle, Notation, format_food, format_reaction, write_system};
