//! Reading basis set library files into [`BasisTable`](crate::basis::BasisTable)s.

mod error;
mod exclusions;
pub mod lexer;
mod loader;
mod parser;

pub use error::{BasisError, ErrorCategory, ParseError, ParseErrorKind, Position};
pub use exclusions::{ExclusionReason, Exclusions};
pub use loader::{parse_file, BasisLibrary};
pub use parser::{parse_library, AngularPart, CoefficientRow, ElementEntry, RawShell};
