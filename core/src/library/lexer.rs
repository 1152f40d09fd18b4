//! Token parsers for basis set library files.
//!
//! Spaces and tabs separate tokens and `#` starts a comment that runs to the end of the
//! line. Newlines are significant since a coefficient row is one line of numbers, so they
//! are never skipped here.

use std::fmt;

use nom::{
    branch::alt,
    bytes::complete::{take_till, take_while},
    character::complete::{
        char, digit0, digit1, line_ending, not_line_ending, one_of, satisfy, space0,
    },
    combinator::{eof, map, opt, peek, recognize, value},
    error::{ErrorKind, ParseError as NomParseError},
    sequence::{pair, tuple},
};
use nom_locate::LocatedSpan;

use super::error::{ParseError, ParseErrorKind, Position};

pub type Span<'a> = LocatedSpan<&'a str>;

pub(crate) type IResult<'a, O> = nom::IResult<Span<'a>, O, ParseError>;

impl<'a> NomParseError<Span<'a>> for ParseError {
    fn from_error_kind(input: Span<'a>, kind: ErrorKind) -> Self {
        ParseError::new(
            location(&input),
            ParseErrorKind::unexpected(kind.description(), "remaining input"),
        )
    }

    fn append(_: Span<'a>, _: ErrorKind, other: Self) -> Self {
        other
    }

    fn or(self, other: Self) -> Self {
        if other.position > self.position {
            other
        } else {
            self
        }
    }
}

pub(crate) fn location(span: &Span) -> Position {
    Position {
        line: span.location_line() as usize,
        column: span.get_utf8_column(),
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Keyword {
    Basis,
    End,
    Cartesian,
    Spherical,
    AssociatedEcp,
    Ecp,
}

impl Keyword {
    fn from_word(word: &str) -> Option<Self> {
        if word.eq_ignore_ascii_case("basis") {
            return Some(Self::Basis);
        }
        if word.eq_ignore_ascii_case("end") {
            return Some(Self::End);
        }

        match word {
            "CARTESIAN" => Some(Self::Cartesian),
            "SPHERICAL" => Some(Self::Spherical),
            "ASSOCIATED_ECP" => Some(Self::AssociatedEcp),
            "ECP" | "ecp" => Some(Self::Ecp),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    Keyword(Keyword),
    /// Element symbol or shell type; which one depends on where the word appears
    Word(String),
    Quoted(String),
    Float(f64),
    Newline,
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keyword(keyword) => write!(f, "keyword {keyword:?}"),
            Self::Word(word) => write!(f, "'{word}'"),
            Self::Quoted(label) => write!(f, "\"{label}\""),
            Self::Float(value) => write!(f, "number {value}"),
            Self::Newline => f.write_str("end of line"),
            Self::Eof => f.write_str("end of input"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: Position,
}

fn comment(input: Span) -> IResult<()> {
    value((), pair(char('#'), not_line_ending))(input)
}

/// Spaces, tabs and a trailing comment. Never consumes the newline.
pub(crate) fn space(input: Span) -> IResult<()> {
    value((), pair(space0, opt(comment)))(input)
}

/// An identifier: a letter followed by letters, digits or underscores.
pub(crate) fn word(input: Span) -> IResult<Span> {
    recognize(pair(
        satisfy(|c| c.is_ascii_alphabetic()),
        take_while(|c: char| c.is_ascii_alphanumeric() || c == '_'),
    ))(input)
}

/// A word that is the given keyword
pub(crate) fn keyword<'a>(keyword: Keyword) -> impl FnMut(Span<'a>) -> IResult<'a, ()> {
    move |input: Span<'a>| -> IResult<'a, ()> {
        let (rest, word) = word(input)?;
        if Keyword::from_word(word.fragment()) == Some(keyword) {
            Ok((rest, ()))
        } else {
            Err(nom::Err::Error(ParseError::from_error_kind(
                input,
                ErrorKind::Tag,
            )))
        }
    }
}

/// A word that is not a keyword, such as an element symbol or shell type
pub(crate) fn identifier(input: Span) -> IResult<String> {
    let (rest, word) = word(input)?;
    match Keyword::from_word(word.fragment()) {
        None => Ok((rest, word.fragment().to_string())),
        Some(_) => Err(nom::Err::Error(ParseError::from_error_kind(
            input,
            ErrorKind::Verify,
        ))),
    }
}

/// A double quoted label on a single line
pub(crate) fn label(input: Span) -> IResult<String> {
    let (rest, _) = char('"')(input)?;
    let (rest, text) = take_till(|c: char| c == '"' || c == '\n')(rest)?;

    match char::<_, ParseError>('"')(rest) {
        Ok((rest, _)) => Ok((rest, text.fragment().to_string())),
        Err(_) => Err(nom::Err::Failure(ParseError::new(
            location(&input),
            ParseErrorKind::UnterminatedLabel,
        ))),
    }
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == '#'
}

/// `[-+]?\d+(\.\d*)?([eEdD][-+]?\d+)?`, where a `D` exponent marker is the fortran
/// spelling of `E`. A number must be followed by a separator.
///
/// Fails with [`ParseErrorKind::InvalidFloat`] once a sign or digit has been seen.
pub(crate) fn float(input: Span) -> IResult<f64> {
    peek(one_of("+-0123456789"))(input)?;

    let literal = recognize(tuple((
        opt(one_of("+-")),
        digit1,
        opt(pair(char('.'), digit0)),
        opt(tuple((
            one_of("eEdD"),
            opt(one_of("+-")),
            digit1,
        ))),
    )));
    let separated = peek(alt((value((), satisfy(is_separator)), value((), eof))));

    let invalid = || {
        let fragment = *input.fragment();
        let literal = fragment
            .find(is_separator)
            .map_or(fragment, |end| &fragment[..end]);

        nom::Err::Failure(ParseError::new(
            location(&input),
            ParseErrorKind::InvalidFloat(literal.to_owned()),
        ))
    };

    match pair(literal, separated)(input) {
        Ok((rest, (literal, ()))) => {
            let normalized = literal
                .fragment()
                .replace(|c: char| c == 'd' || c == 'D', "E");
            match normalized.parse() {
                Ok(value) => Ok((rest, value)),
                Err(_) => Err(invalid()),
            }
        }
        Err(nom::Err::Error(_)) => Err(invalid()),
        Err(error) => Err(error),
    }
}

/// The next token after spaces and comments. Characters that start no token fail
/// with [`ParseErrorKind::UnexpectedCharacter`].
pub(crate) fn token(input: Span) -> IResult<Token> {
    let (input, _) = space(input)?;
    let position = location(&input);

    let kind = alt((
        value(TokenKind::Newline, line_ending),
        map(label, TokenKind::Quoted),
        map(float, TokenKind::Float),
        map(word, |word: Span| match Keyword::from_word(word.fragment()) {
            Some(keyword) => TokenKind::Keyword(keyword),
            None => TokenKind::Word(word.fragment().to_string()),
        }),
        value(TokenKind::Eof, eof),
    ))(input);

    match kind {
        Ok((rest, kind)) => Ok((rest, Token { kind, position })),
        Err(nom::Err::Error(_)) => {
            let c = input.fragment().chars().next().unwrap_or_default();
            Err(nom::Err::Failure(ParseError::new(
                position,
                ParseErrorKind::UnexpectedCharacter(c),
            )))
        }
        Err(error) => Err(error),
    }
}
