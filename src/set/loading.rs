use std::{
    fmt::{self, Display},
    fs::File,
    io::{self, Read},
    path::Path,
};

use nom::{
    character::complete::{self as cc, char, line_ending},
    combinator::{eof, opt},
    error::{ErrorKind, ParseError},
    sequence::{delimited, preceded, terminated},
    Finish, InputTake,
};
use smartstring::alias::String;

use crate::Equivalence;

use super::Set;

type IResult<I, O> = nom::IResult<I, O, Error>;

type Span<'a> = nom_locate::LocatedSpan<&'a str>;

impl<E: Equivalence<String> + Default> Set<String, E> {
    /// Loads a set of text saved with [`Set::save`].
    pub fn load(file: impl AsRef<Path>) -> Result<Self> {
        Self::load_from_reader(File::open(file)?)
    }

    /// Constructs a set by reading its text representation from the given
    /// reader.
    ///
    /// Element text runs up to the parenthesis that closes the one opening
    /// it, so text with balanced parentheses reads back unchanged.
    pub fn load_from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut buf = std::string::String::new();
        reader.read_to_string(&mut buf)?;
        let (declared, elements) = canonical(Span::new(&buf)).finish().map(|(_, ret)| ret)?;

        if declared != elements.len() as u64 {
            return Err(Error::CountMismatch {
                declared,
                found: elements.len(),
            });
        }

        let mut set = Set::with_capacity(elements.len());
        for (index, text) in elements.into_iter().enumerate() {
            if !set.add(String::from(*text.fragment())) {
                return Err(Error::DuplicateElement { index });
            }
        }
        Ok(set)
    }
}

/// `<count>( (<text>))*` with an optional line ending.
fn canonical(s: Span<'_>) -> IResult<Span<'_>, (u64, Vec<Span<'_>>)> {
    let (mut s, declared) = cc::u64(s)?;
    let mut elements = Vec::new();
    while let Ok((rem, text)) = preceded(char(' '), element)(s) {
        s = rem;
        elements.push(text);
    }
    let (s, _) = terminated(opt(line_ending), eof)(s)?;
    Ok((s, (declared, elements)))
}

fn element(s: Span<'_>) -> IResult<Span<'_>, Span<'_>> {
    delimited(char('('), balanced, char(')'))(s)
}

/// Everything up to the first `)` that has no matching `(`.
fn balanced(s: Span<'_>) -> IResult<Span<'_>, Span<'_>> {
    let mut depth = 0usize;
    for (index, ch) in s.fragment().char_indices() {
        match ch {
            '(' => depth += 1,
            ')' if depth == 0 => return Ok(s.take_split(index)),
            ')' => depth -= 1,
            _ => {}
        }
    }
    Err(nom::Err::Error(Error::from_error_kind(s, ErrorKind::Char)))
}

#[derive(Debug)]
pub enum Error {
    /// Error opening file or reading from reader.
    Io(io::Error),
    /// Parser failed.
    ParseError { offset: usize },
    /// The leading count disagrees with the number of listed elements.
    CountMismatch { declared: u64, found: usize },
    /// The element at `index` is equivalent to an earlier one.
    DuplicateElement { index: usize },
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "IO error: {e}"),
            Error::ParseError { offset } => write!(f, "Parser error at byte {offset}"),
            Error::CountMismatch { declared, found } => {
                write!(f, "Set declares {declared} elements but lists {found}")
            }
            Error::DuplicateElement { index } => {
                write!(f, "Element {index} duplicates an earlier element")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl<'a> ParseError<Span<'a>> for Error {
    fn from_error_kind(input: Span<'a>, _: ErrorKind) -> Self {
        Self::ParseError {
            offset: input.location_offset(),
        }
    }

    fn append(_: Span<'a>, _: ErrorKind, other: Self) -> Self {
        other
    }
}

impl From<io::Error> for Error {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
