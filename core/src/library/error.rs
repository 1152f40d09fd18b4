use std::{fmt, io, path::PathBuf};

use thiserror::Error;

use super::ExclusionReason;

/// Line and column of a character in a library file, both starting at one.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub(crate) const START: Position = Position { line: 1, column: 1 };
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Failure to load a basis set by name.
#[derive(Debug, Error)]
pub enum BasisError {
    /// The name is on one of the exclusion lists. No file was opened.
    #[error("basis set '{name}' is not supported: it {reason}")]
    Unsupported {
        name: String,
        reason: ExclusionReason,
    },

    /// The name is not a single plain file name, so it could reach outside the library
    /// directory.
    #[error("'{name}' is not a plain basis set file name")]
    InvalidName { name: String },

    #[error("basis set '{name}' not found at '{}'", path.display())]
    NotFound { name: String, path: PathBuf },

    #[error("I/O error at path '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse basis set '{name}': {source}")]
    Parse {
        name: String,
        #[source]
        source: ParseError,
    },
}

#[derive(Clone, Debug, PartialEq, Error)]
#[error("{kind} at {position}")]
pub struct ParseError {
    pub position: Position,
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub(crate) fn new(position: Position, kind: ParseErrorKind) -> Self {
        Self { position, kind }
    }

    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }
}

/// Broad classes of [`ParseErrorKind`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    /// A character sequence that is not a token
    Lexical,
    /// Tokens that do not form a valid library
    Grammar,
    /// An element symbol missing from the periodic table
    UnresolvedSymbol,
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ParseErrorKind {
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),
    #[error("unterminated quoted label")]
    UnterminatedLabel,
    #[error("malformed number '{0}'")]
    InvalidFloat(String),

    #[error("expected {expected}, found {found}")]
    UnexpectedToken { expected: String, found: String },
    #[error("effective core potentials are not supported")]
    EcpNotSupported,
    #[error("coefficient row has {found} columns, the shell started with {expected}")]
    InconsistentColumns { expected: usize, found: usize },
    #[error("shell has no coefficient rows")]
    EmptyShell,
    #[error("coefficient row has an exponent but no contraction coefficients")]
    MissingCoefficients,
    #[error("SP shells need exactly two coefficient columns, found {0}")]
    SpColumns(usize),
    #[error("exponent {0} is not strictly positive")]
    NonPositiveExponent(f64),
    #[error("shell for '{found}' inside the entry for '{expected}'")]
    MixedElements { expected: String, found: String },

    #[error("unknown element symbol '{0}'")]
    UnresolvedSymbol(String),
}

impl ParseErrorKind {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnexpectedCharacter(_) | Self::UnterminatedLabel | Self::InvalidFloat(_) => {
                ErrorCategory::Lexical
            }
            Self::UnresolvedSymbol(_) => ErrorCategory::UnresolvedSymbol,
            _ => ErrorCategory::Grammar,
        }
    }

    pub(crate) fn unexpected(expected: impl Into<String>, found: impl fmt::Display) -> Self {
        Self::UnexpectedToken {
            expected: expected.into(),
            found: found.to_string(),
        }
    }
}
