//! Parser for basis set library files.
//!
//! ```text
//! library    := entry+ ("ASSOCIATED_ECP" label)?
//! entry      := "basis" label angular-part shell+ "end"
//! shell      := element-symbol shell-type coeff-row+
//! coeff-row  := float+
//! ```
//!
//! Shells are first read as raw tables with any number of coefficient columns and then
//! checked and expanded into single-column [`Shell`]s by [`RawShell::expand`].

use nom::{
    branch::alt,
    character::complete::{line_ending, space0, space1},
    combinator::{cut, eof, opt, value},
    multi::{many0, many1},
    sequence::{pair, preceded, terminated},
    Finish,
};
use serde::{Deserialize, Serialize};

use crate::{
    basis::{Shell, ShellType},
    periodic_table,
};

use super::{
    error::{ParseError, ParseErrorKind, Position},
    lexer::{float, identifier, keyword, label, location, space, token, IResult, Keyword, Span},
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AngularPart {
    Cartesian,
    Spherical,
}

/// The basis of one element as listed in a library file.
#[derive(Clone, Debug, PartialEq)]
pub struct ElementEntry {
    pub atomic_number: u32,
    pub label: String,
    pub angular_part: AngularPart,
    pub shells: Vec<Shell>,
}

/// One line of a shell table: an exponent followed by its coefficient columns.
#[derive(Clone, Debug, PartialEq)]
pub struct CoefficientRow {
    pub values: Vec<f64>,
    pub position: Position,
}

/// A shell exactly as it appears in the file, with any number of coefficient columns.
#[derive(Clone, Debug, PartialEq)]
pub struct RawShell {
    pub symbol: String,
    pub shell_type: ShellType,
    pub rows: Vec<CoefficientRow>,
    pub position: Position,
}

impl RawShell {
    /// Splits the coefficient columns into separate shells sharing the exponents. An `SP`
    /// shell turns into an S shell (first column) and a P shell (second column), any other
    /// type yields one shell per column.
    ///
    /// Every row must hold a strictly positive exponent and the same number of
    /// coefficients, at least one.
    pub fn expand(&self) -> Result<Vec<Shell>, ParseError> {
        let error = |position, kind| Err(ParseError::new(position, kind));

        let Some(first) = self.rows.first() else {
            return error(self.position, ParseErrorKind::EmptyShell);
        };
        let width = first.values.len();

        for row in &self.rows {
            match row.values.as_slice() {
                [] | [_] => return error(row.position, ParseErrorKind::MissingCoefficients),
                values if values.len() != width => {
                    return error(
                        row.position,
                        ParseErrorKind::InconsistentColumns {
                            expected: width,
                            found: values.len(),
                        },
                    )
                }
                [exponent, ..] if !(*exponent > 0.0) => {
                    return error(row.position, ParseErrorKind::NonPositiveExponent(*exponent))
                }
                _ => {}
            }
        }

        let columns = width - 1;
        let shell_types = match self.shell_type {
            ShellType::SP if columns != 2 => {
                return error(self.position, ParseErrorKind::SpColumns(columns))
            }
            ShellType::SP => vec![ShellType::S, ShellType::P],
            shell_type => vec![shell_type; columns],
        };

        Ok(shell_types
            .into_iter()
            .enumerate()
            .map(|(column, shell_type)| Shell {
                shell_type,
                primitives: self
                    .rows
                    .iter()
                    .map(|row| (row.values[0], row.values[column + 1]))
                    .collect(),
            })
            .collect())
    }
}

/// Parses a whole library file. Either every entry parses or nothing is returned.
pub fn parse_library(source: &str) -> Result<Vec<ElementEntry>, ParseError> {
    let (_, entries) = library(Span::new(source)).finish()?;
    log::debug!("parsed {} basis entries", entries.len());

    Ok(entries)
}

/// Describes what was found where `what` was expected. A lexical error at that spot
/// takes precedence.
fn unexpected(input: Span, what: &str) -> nom::Err<ParseError> {
    match token(input) {
        Ok((_, found)) => nom::Err::Error(ParseError::new(
            found.position,
            ParseErrorKind::unexpected(what, found.kind),
        )),
        Err(error) => error,
    }
}

/// Runs `parser` after leading spaces, naming `what` if it does not match.
fn expected<'a, O>(
    what: &'static str,
    mut parser: impl FnMut(Span<'a>) -> IResult<'a, O>,
) -> impl FnMut(Span<'a>) -> IResult<'a, O> {
    move |input: Span<'a>| -> IResult<'a, O> {
        let (input, _) = space0(input)?;
        match parser(input) {
            Err(nom::Err::Error(_)) => Err(unexpected(input, what)),
            result => result,
        }
    }
}

/// The rest of a line, which may only hold spaces and a comment
fn line_end(input: Span) -> IResult<()> {
    value((), pair(space, alt((line_ending, eof))))(input)
}

fn blank_lines(input: Span) -> IResult<()> {
    value((), many0(pair(space, line_ending)))(input)
}

fn reject_ecp(input: Span) -> IResult<()> {
    let (rest, _) = space0(input)?;
    match keyword(Keyword::Ecp)(rest) {
        Ok(_) => Err(nom::Err::Failure(ParseError::new(
            location(&rest),
            ParseErrorKind::EcpNotSupported,
        ))),
        Err(_) => Ok((input, ())),
    }
}

fn library(input: Span) -> IResult<Vec<ElementEntry>> {
    let (input, _) = blank_lines(input)?;
    let (input, entries) = many1(terminated(entry, blank_lines))(input)?;
    let (input, _) = opt(terminated(associated_ecp, blank_lines))(input)?;
    let (input, _) = reject_ecp(input)?;
    let (input, _) = expected("\"basis\" or end of input", eof)(input)?;

    Ok((input, entries))
}

fn associated_ecp(input: Span) -> IResult<()> {
    let (input, _) = preceded(space0, keyword(Keyword::AssociatedEcp))(input)?;
    let (input, name) = cut(expected("quoted ECP name", label))(input)?;
    log::debug!("ignoring associated ECP \"{name}\"");

    cut(expected("end of line", line_end))(input)
}

fn angular_part(input: Span) -> IResult<AngularPart> {
    alt((
        value(AngularPart::Cartesian, keyword(Keyword::Cartesian)),
        value(AngularPart::Spherical, keyword(Keyword::Spherical)),
    ))(input)
}

fn entry(input: Span) -> IResult<ElementEntry> {
    let (input, _) = reject_ecp(input)?;
    let (input, _) = expected("\"basis\"", keyword(Keyword::Basis))(input)?;
    let position = location(&input);

    let (input, label) = cut(expected("quoted basis label", label))(input)?;
    let (input, angular_part) = cut(expected("CARTESIAN or SPHERICAL", angular_part))(input)?;
    let (input, _) = cut(expected("end of line", line_end))(input)?;
    let (input, raw_shells) = cut(shells)(input)?;

    let (atomic_number, shells) =
        assemble(position, &raw_shells).map_err(nom::Err::Failure)?;
    log::trace!("entry \"{label}\": {} shells", shells.len());

    Ok((
        input,
        ElementEntry {
            atomic_number,
            label,
            angular_part,
            shells,
        },
    ))
}

/// Resolves the element of an entry and expands its shells.
fn assemble(position: Position, raw_shells: &[RawShell]) -> Result<(u32, Vec<Shell>), ParseError> {
    let Some(first) = raw_shells.first() else {
        return Err(ParseError::new(
            position,
            ParseErrorKind::unexpected("element symbol", "\"end\""),
        ));
    };
    let atomic_number = resolve(&first.symbol, first.position)?;

    let mut shells = Vec::with_capacity(raw_shells.len());
    for raw_shell in raw_shells {
        if raw_shell.symbol != first.symbol {
            resolve(&raw_shell.symbol, raw_shell.position)?;
            return Err(ParseError::new(
                raw_shell.position,
                ParseErrorKind::MixedElements {
                    expected: first.symbol.clone(),
                    found: raw_shell.symbol.clone(),
                },
            ));
        }

        shells.extend(raw_shell.expand()?);
    }

    Ok((atomic_number, shells))
}

fn shells(mut input: Span) -> IResult<Vec<RawShell>> {
    let mut shells = Vec::new();

    loop {
        let (rest, _) = blank_lines(input)?;
        let (rest, _) = space0(rest)?;

        if !shells.is_empty() {
            if let Ok((rest, _)) = keyword(Keyword::End)(rest) {
                let (rest, _) = expected("end of line", line_end)(rest)?;
                return Ok((rest, shells));
            }
        }

        let (rest, _) = reject_ecp(rest)?;
        let what = if shells.is_empty() {
            "element symbol"
        } else {
            "element symbol or \"end\""
        };
        let (rest, shell) = shell(what, rest)?;

        shells.push(shell);
        input = rest;
    }
}

fn shell_type(input: Span) -> IResult<ShellType> {
    let (rest, name) = identifier(input)?;
    match name.parse() {
        Ok(shell_type) => Ok((rest, shell_type)),
        Err(_) => Err(unexpected(input, "shell type")),
    }
}

fn shell<'a>(what: &'static str, input: Span<'a>) -> IResult<'a, RawShell> {
    let position = location(&input);
    let (input, symbol) = expected(what, identifier)(input)?;
    let (input, shell_type) = expected("shell type", shell_type)(input)?;
    let (input, _) = expected("end of line", line_end)(input)?;
    let (input, rows) = many0(row)(input)?;

    if rows.is_empty() {
        let (input, _) = blank_lines(input)?;
        let (input, _) = space0(input)?;
        return Err(unexpected(input, "coefficient row"));
    }

    Ok((
        input,
        RawShell {
            symbol,
            shell_type,
            rows,
            position,
        },
    ))
}

fn row(input: Span) -> IResult<CoefficientRow> {
    let (input, _) = blank_lines(input)?;
    let (input, _) = space0(input)?;
    let position = location(&input);

    let (input, exponent) = float(input)?;
    let (input, coefficients) = cut(terminated(
        many0(preceded(space1, float)),
        expected("end of line", line_end),
    ))(input)?;

    let mut values = Vec::with_capacity(coefficients.len() + 1);
    values.push(exponent);
    values.extend(coefficients);

    Ok((input, CoefficientRow { values, position }))
}

fn resolve(symbol: &str, position: Position) -> Result<u32, ParseError> {
    periodic_table::atomic_number(symbol).ok_or_else(|| {
        ParseError::new(
            position,
            ParseErrorKind::UnresolvedSymbol(symbol.to_owned()),
        )
    })
}
