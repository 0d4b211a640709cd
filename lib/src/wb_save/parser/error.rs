use std::{error, io, num::ParseIntError};

use derive_more::{Display, From};

/// An error that can occur when converting the text of a value into the type
/// a field expects.
#[derive(Debug, Display)]
pub enum ConversionError {
    ParseIntError(ParseIntError),
    /// The integer is fine, but it doesn't name any variant of the enum.
    #[display("{} is not a valid {}", _0, _1)]
    InvalidVariant(i32, &'static str),
}

impl From<ParseIntError> for ConversionError {
    fn from(value: ParseIntError) -> Self {
        ConversionError::ParseIntError(value)
    }
}

impl error::Error for ConversionError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::ParseIntError(err) => Some(err),
            _ => None,
        }
    }
}

/// An error returned by a section when it refuses a key-value pair.
#[derive(Debug, Display)]
pub enum FieldError {
    /// The key is not part of the section's grammar.
    #[display("unknown key: {}", _0)]
    UnknownKey(String),
    /// The key is known, but its value has the wrong shape.
    #[display("bad value '{}' for key {}: {}", value, key, error)]
    Conversion {
        key: String,
        value: String,
        error: ConversionError,
    },
}

impl FieldError {
    pub(crate) fn conversion(key: &str, value: &str, error: ConversionError) -> Self {
        FieldError::Conversion {
            key: key.to_owned(),
            value: value.to_owned(),
            error,
        }
    }
}

impl error::Error for FieldError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Conversion { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// A problem with the layout of the file rather than with a single value.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum StructuralError {
    /// Only `Version=` and opening tags may appear outside of a section.
    #[display("cannot parse line in global context")]
    UnexpectedLine,
    #[display("bad version number '{}'", _0)]
    BadVersion(String),
    /// A comma separated part that is neither `key=value` nor a flag.
    #[display("unknown line format '{}'", _0)]
    MalformedPair(String),
    /// A tag that does not open or close anything in the current context.
    #[display("unexpected {} in {}", tag, context)]
    MisplacedTag {
        tag: &'static str,
        context: &'static str,
    },
    /// A second `BeginGame` or `BeginMap`.
    #[display("duplicate {} section", _0)]
    DuplicateSection(&'static str),
    /// Two positionally correlated keys were not given the same number of
    /// times within one section.
    #[display(
        "{} appears {} times but {} appears {} times",
        first,
        first_count,
        second,
        second_count
    )]
    MisalignedPairs {
        first: &'static str,
        first_count: usize,
        second: &'static str,
        second_count: usize,
    },
    /// The input ended while a section was still open.
    #[display("{} section is never closed", _0)]
    Unterminated(&'static str),
}

impl error::Error for StructuralError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        None
    }
}

/// An error that occurred while handling a single line, before the line
/// number is known.
#[derive(Debug, From, Display)]
pub enum SectionError {
    Structural(StructuralError),
    Field(FieldError),
}

impl error::Error for SectionError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Structural(err) => Some(err),
            Self::Field(err) => Some(err),
        }
    }
}

/// An error that aborted the parse. Every variant knows the 1-based line it
/// happened at, counting blank lines and comments.
#[derive(Debug, Display)]
pub enum ParsingError {
    #[display("parse error: {} (at line {}: '{}')", reason, line, content)]
    Structural {
        line: usize,
        content: String,
        reason: StructuralError,
    },
    #[display("parse error: unknown key: {} (at line {}: '{}')", key, line, content)]
    UnknownKey {
        line: usize,
        content: String,
        key: String,
    },
    #[display(
        "parse error: bad value '{}' for key {}: {} (at line {}: '{}')",
        value,
        key,
        error,
        line,
        content
    )]
    ValueConversion {
        line: usize,
        content: String,
        key: String,
        value: String,
        error: ConversionError,
    },
    /// The input was consumed without a game section ever being closed.
    #[display("parse error: no game info specified (after {} lines)", lines)]
    IncompleteScenario { lines: usize },
    #[display("read error at line {}: {}", line, error)]
    ReaderError { line: usize, error: io::Error },
}

impl ParsingError {
    /// Attaches the position to an error raised while handling one line.
    pub(crate) fn at(line: usize, content: &str, error: SectionError) -> Self {
        let content = content.to_owned();
        match error {
            SectionError::Structural(reason) => ParsingError::Structural {
                line,
                content,
                reason,
            },
            SectionError::Field(FieldError::UnknownKey(key)) => {
                ParsingError::UnknownKey { line, content, key }
            }
            SectionError::Field(FieldError::Conversion { key, value, error }) => {
                ParsingError::ValueConversion {
                    line,
                    content,
                    key,
                    value,
                    error,
                }
            }
        }
    }

    /// The line the error is attributed to. For
    /// [ParsingError::IncompleteScenario] that is the number of lines read.
    pub fn line(&self) -> usize {
        match self {
            Self::Structural { line, .. }
            | Self::UnknownKey { line, .. }
            | Self::ValueConversion { line, .. }
            | Self::ReaderError { line, .. } => *line,
            Self::IncompleteScenario { lines } => *lines,
        }
    }
}

impl error::Error for ParsingError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Structural { reason, .. } => Some(reason),
            Self::ValueConversion { error, .. } => Some(error),
            Self::ReaderError { error, .. } => Some(error),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn test_display() {
        let err = ParsingError::at(
            7,
            "Era",
            SectionError::Structural(StructuralError::UnexpectedLine),
        );
        assert_eq!(
            err.to_string(),
            "parse error: cannot parse line in global context (at line 7: 'Era')"
        );
        assert_eq!(err.line(), 7);
    }

    #[test]
    fn test_conversion_source() {
        let int_err = "abc".parse::<u32>().unwrap_err();
        let err = ParsingError::at(
            3,
            "GameTurn=abc",
            FieldError::conversion("GameTurn", "abc", int_err.into()).into(),
        );
        assert!(matches!(err, ParsingError::ValueConversion { line: 3, .. }));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_unknown_key() {
        let err = ParsingError::at(2, "Foo=1", FieldError::UnknownKey("Foo".into()).into());
        match err {
            ParsingError::UnknownKey { key, line, .. } => {
                assert_eq!(key, "Foo");
                assert_eq!(line, 2);
            }
            _ => panic!("expected an unknown key error"),
        }
    }
}
