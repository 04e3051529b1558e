use thiserror::Error;

/// Malformed input in the reaction notation. Line numbers are 1-based.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("cannot parse `{text}` (at line {line})")]
    Syntax { line: usize, text: String },

    #[error("duplicate reaction name `{name}` (at line {line})")]
    DuplicateReaction { line: usize, name: String },

    #[error("molecule `{molecule}` occurs twice on one side of reaction `{reaction}` (at line {line})")]
    AmbiguousCoefficient {
        line: usize,
        reaction: String,
        molecule: String,
    },

    #[error("invalid coefficient `{text}` in reaction `{reaction}` (at line {line})")]
    Coefficient {
        line: usize,
        reaction: String,
        text: String,
    },

    #[error("{details} (at line {line})")]
    Catalysts { line: usize, details: String },
}

/// Failure to read a reaction system from a file.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("I/O operation failed: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),
}
