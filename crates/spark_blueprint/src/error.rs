use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::scanner::Position;

/// A syntax error in blueprint source, with the location it was found at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// Byte offset into the source.
    pub offset: usize,
    pub line: usize,
    pub col: usize,
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub fn new(position: Position, kind: ParseErrorKind) -> Self {
        Self {
            offset: position.offset,
            line: position.line,
            col: position.col,
            kind,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.line, self.col, self.kind)
    }
}

impl std::error::Error for ParseError {}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),
    #[error("expected {expected}, found '{found}'")]
    Expected { expected: &'static str, found: char },
    #[error("unexpected end of input, expected {0}")]
    UnexpectedEof(&'static str),
    #[error("attribute value is missing its closing quote")]
    UnterminatedValue,
    #[error("tag has no name")]
    EmptyTagName,
    #[error("tag is missing its closing '>'")]
    UnterminatedTag,
    #[error("object is missing its </object> tag")]
    UnterminatedObject,
    #[error("<{tag}> is missing the {attribute} attribute")]
    MissingAttribute { tag: String, attribute: &'static str },
    #[error("expected <object>, found <{0}>")]
    ExpectedObject(String),
    #[error("unexpected closing tag </{0}>")]
    UnexpectedClosingTag(String),
    #[error("<object> blocks cannot be nested")]
    NestedObject,
}

#[derive(Debug, Error)]
pub enum BlueprintError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
