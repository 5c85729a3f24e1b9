//! Tag scanner for blueprint files.
//!
//! Splits the input into `<name key="value" ...>` and `</name>` tags,
//! skipping whitespace, a leading byte-order mark and `#` comment lines
//! between tags. Every tag remembers where it
//! started so the parser can report errors against the source text.

use crate::error::{ParseError, ParseErrorKind};

/// A location in the source text. `line` and `col` are 1-based; `col`
/// counts characters, `offset` counts bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub col: usize,
}

/// One tag as written in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTag {
    pub name: String,
    /// `true` for `</name>`.
    pub closing: bool,
    /// Attributes in source order. Duplicate keys are kept.
    pub attributes: Vec<(String, String)>,
    /// Position of the opening `<`.
    pub position: Position,
}

impl RawTag {
    /// The first value given for `key`.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

pub struct Scanner<'a> {
    src: &'a str,
    input: &'a [u8],
    pos: usize,
    line: usize,
    col: usize,
    /// Nothing but blanks seen since the start of the current line.
    line_blank: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(src: &'a str) -> Self {
        let bom = if src.starts_with('\u{feff}') {
            '\u{feff}'.len_utf8()
        } else {
            0
        };
        Self {
            src,
            input: src.as_bytes(),
            pos: bom,
            line: 1,
            col: 1,
            line_blank: true,
        }
    }

    pub fn position(&self) -> Position {
        Position {
            offset: self.pos,
            line: self.line,
            col: self.col,
        }
    }

    /// Returns the next tag, or `None` at end of input.
    pub fn next_tag(&mut self) -> Result<Option<RawTag>, ParseError> {
        self.skip_trivia();

        let position = self.position();
        match self.peek_byte() {
            None => Ok(None),
            Some(b'<') => {
                self.advance();
                self.read_tag(position).map(Some)
            }
            Some(_) => Err(self.unexpected_char()),
        }
    }

    fn peek_byte(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<u8> {
        let b = self.input.get(self.pos).copied()?;
        self.pos += 1;
        match b {
            b'\n' => {
                self.line += 1;
                self.col = 1;
                self.line_blank = true;
            }
            // UTF-8 continuation bytes don't start a new column.
            _ if b & 0xC0 == 0x80 => {}
            _ => {
                self.col += 1;
                if !is_blank(b) {
                    self.line_blank = false;
                }
            }
        }
        Some(b)
    }

    fn skip_blanks(&mut self) {
        while self.peek_byte().is_some_and(is_blank) {
            self.advance();
        }
    }

    /// Blanks and comment lines. Only used between tags; inside a tag a `#`
    /// is an ordinary (invalid) character.
    fn skip_trivia(&mut self) {
        loop {
            self.skip_blanks();

            // Comment lines: `#` as the first non-blank character.
            if self.peek_byte() == Some(b'#') && self.line_blank {
                while let Some(b) = self.advance() {
                    if b == b'\n' {
                        break;
                    }
                }
                continue;
            }

            break;
        }
    }

    fn read_tag(&mut self, position: Position) -> Result<RawTag, ParseError> {
        let closing = if self.peek_byte() == Some(b'/') {
            self.advance();
            true
        } else {
            false
        };

        match self.peek_byte() {
            None => return Err(ParseError::new(position, ParseErrorKind::UnterminatedTag)),
            Some(b) if !is_name_byte(b) => {
                return Err(ParseError::new(self.position(), ParseErrorKind::EmptyTagName));
            }
            Some(_) => {}
        }
        let name = self.read_name("a tag name")?;
        let mut attributes = Vec::new();

        loop {
            self.skip_blanks();
            match self.peek_byte() {
                None => return Err(ParseError::new(position, ParseErrorKind::UnterminatedTag)),
                Some(b'>') => {
                    self.advance();
                    break;
                }
                Some(b'/') if self.input.get(self.pos + 1) == Some(&b'>') => {
                    self.advance();
                    self.advance();
                    break;
                }
                Some(_) if closing => return Err(self.unexpected_char()),
                Some(_) => {
                    let key = self.read_name("an attribute name")?;
                    self.skip_blanks();
                    self.expect(b'=')?;
                    self.skip_blanks();
                    let value = self.read_value()?;
                    attributes.push((key, value));
                }
            }
        }

        Ok(RawTag {
            name,
            closing,
            attributes,
            position,
        })
    }

    fn read_name(&mut self, expected: &'static str) -> Result<String, ParseError> {
        let start = self.pos;
        while self.peek_byte().is_some_and(is_name_byte) {
            self.advance();
        }
        if self.pos == start {
            return Err(match self.peek_byte() {
                None => ParseError::new(self.position(), ParseErrorKind::UnexpectedEof(expected)),
                Some(_) => ParseError::new(
                    self.position(),
                    ParseErrorKind::Expected {
                        expected,
                        found: self.current_char(),
                    },
                ),
            });
        }
        Ok(self.src[start..self.pos].to_string())
    }

    /// Reads a double-quoted value. Tabs and line breaks inside the quotes
    /// are dropped.
    fn read_value(&mut self) -> Result<String, ParseError> {
        let open = self.position();
        self.expect(b'"')?;

        let start = self.pos;
        loop {
            match self.peek_byte() {
                None => return Err(ParseError::new(open, ParseErrorKind::UnterminatedValue)),
                Some(b'"') => break,
                Some(_) => {
                    self.advance();
                }
            }
        }
        let value = self.src[start..self.pos]
            .chars()
            .filter(|c| !matches!(c, '\t' | '\n' | '\r'))
            .collect();
        self.advance(); // closing quote
        Ok(value)
    }

    fn expect(&mut self, expected: u8) -> Result<(), ParseError> {
        match self.peek_byte() {
            Some(b) if b == expected => {
                self.advance();
                Ok(())
            }
            None => Err(ParseError::new(
                self.position(),
                ParseErrorKind::UnexpectedEof(describe(expected)),
            )),
            Some(_) => Err(ParseError::new(
                self.position(),
                ParseErrorKind::Expected {
                    expected: describe(expected),
                    found: self.current_char(),
                },
            )),
        }
    }

    fn current_char(&self) -> char {
        self.src[self.pos..].chars().next().unwrap_or('\0')
    }

    fn unexpected_char(&self) -> ParseError {
        ParseError::new(
            self.position(),
            ParseErrorKind::UnexpectedChar(self.current_char()),
        )
    }
}

fn is_blank(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b'.' | b':')
}

fn describe(b: u8) -> &'static str {
    match b {
        b'=' => "'='",
        b'"' => "'\"'",
        _ => "a delimiter",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(input: &str) -> Vec<RawTag> {
        let mut scanner = Scanner::new(input);
        let mut tags = Vec::new();
        while let Some(tag) = scanner.next_tag().unwrap() {
            tags.push(tag);
        }
        tags
    }

    #[test]
    fn test_open_and_close_tags() {
        let tags = tags(r#"<object Name="Sword"></object>"#);
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].name, "object");
        assert!(!tags[0].closing);
        assert_eq!(tags[0].attribute("Name"), Some("Sword"));
        assert_eq!(tags[1].name, "object");
        assert!(tags[1].closing);
    }

    #[test]
    fn test_positions_are_one_based() {
        let tags = tags("\n  <a>\n<b/>");
        assert_eq!(
            tags[0].position,
            Position {
                offset: 3,
                line: 2,
                col: 3
            }
        );
        assert_eq!(tags[1].position.line, 3);
        assert_eq!(tags[1].position.col, 1);
    }

    #[test]
    fn test_comment_lines_are_skipped() {
        let input = "# a comment <object>\n\t# indented comment\n<a x=\"1\">";
        let tags = tags(input);
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].name, "a");
    }

    #[test]
    fn test_hash_after_content_is_an_error() {
        let mut scanner = Scanner::new("<a> # trailing");
        scanner.next_tag().unwrap();
        let err = scanner.next_tag().unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedChar('#'));
        assert_eq!((err.line, err.col), (1, 5));
    }

    #[test]
    fn test_value_may_contain_hash_and_spaces() {
        let tags = tags(r#"<a description="A #1 blade, sharp">"#);
        assert_eq!(tags[0].attribute("description"), Some("A #1 blade, sharp"));
    }

    #[test]
    fn test_line_breaks_inside_values_are_dropped() {
        let tags = tags("<a text=\"one\n\ttwo\">");
        assert_eq!(tags[0].attribute("text"), Some("onetwo"));
    }

    #[test]
    fn test_attributes_spread_over_lines() {
        let tags = tags("<component\n\tComponentName=\"Die\"\n\trolls = \"2\"\n>");
        assert_eq!(tags[0].attributes.len(), 2);
        assert_eq!(tags[0].attribute("rolls"), Some("2"));
    }

    #[test]
    fn test_unterminated_value() {
        let mut scanner = Scanner::new("<a x=\"1>\n");
        let err = scanner.next_tag().unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnterminatedValue);
        assert_eq!(err.offset, 5);
    }

    #[test]
    fn test_unterminated_tag() {
        let mut scanner = Scanner::new("<a x=\"1\"");
        let err = scanner.next_tag().unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnterminatedTag);
        assert_eq!(err.offset, 0);
    }

    #[test]
    fn test_missing_equals() {
        let mut scanner = Scanner::new("<a x \"1\">");
        let err = scanner.next_tag().unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::Expected {
                expected: "'='",
                found: '"'
            }
        );
    }

    #[test]
    fn test_text_outside_tags_is_rejected() {
        let mut scanner = Scanner::new("  sword");
        let err = scanner.next_tag().unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedChar('s'));
        assert_eq!(err.col, 3);
    }

    #[test]
    fn test_leading_byte_order_mark_is_skipped() {
        let tags = tags("\u{feff}<a x=\"1\">");
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].position.offset, 3);
        assert_eq!((tags[0].position.line, tags[0].position.col), (1, 1));
    }

    #[test]
    fn test_byte_order_mark_elsewhere_is_rejected() {
        let mut scanner = Scanner::new("<a>\u{feff}");
        scanner.next_tag().unwrap();
        let err = scanner.next_tag().unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedChar('\u{feff}'));
    }

    #[test]
    fn test_hash_line_inside_tag_is_not_a_comment() {
        let mut scanner = Scanner::new("<component ComponentName=\"X\"\n#note=\"1\">\n</object>");
        let err = scanner.next_tag().unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::Expected {
                expected: "an attribute name",
                found: '#'
            }
        );
        assert_eq!((err.line, err.col), (2, 1));
    }

    #[test]
    fn test_empty_tag_name() {
        let mut scanner = Scanner::new("<>");
        let err = scanner.next_tag().unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::EmptyTagName);
        assert_eq!(err.col, 2);

        let mut scanner = Scanner::new("</ object>");
        let err = scanner.next_tag().unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::EmptyTagName);
    }

    #[test]
    fn test_columns_count_characters() {
        let mut scanner = Scanner::new("<a x=\"é\"> ?");
        scanner.next_tag().unwrap();
        let err = scanner.next_tag().unwrap_err();
        assert_eq!(err.col, 11);
        assert_eq!(err.offset, 11);
    }
}
