//! Lexer for SVG path data and other number lists.

use svgplot_core::PathError;

/// A lexical token of the path mini-language.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    /// A command letter, not yet validated.
    Command(char),
    Number(f64),
}

/// Lazy tokenizer yielding `(byte offset, token)` pairs.
///
/// Whitespace and commas separate tokens. Numbers may be packed without
/// separators: a sign, or a second decimal point, starts the next number
/// (`"1-2.5.5"` is `1`, `-2.5`, `.5`).
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source, pos: 0 }
    }

    fn peek_byte(&self, at: usize) -> Option<u8> {
        self.source.as_bytes().get(at).copied()
    }

    fn skip_separators(&mut self) {
        while let Some(b) = self.peek_byte(self.pos) {
            if b.is_ascii_whitespace() || b == b',' {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn skip_digits(&mut self) -> usize {
        let start = self.pos;
        while matches!(self.peek_byte(self.pos), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
        self.pos - start
    }

    fn scan_number(&mut self) -> Result<Token, PathError> {
        let start = self.pos;
        if matches!(self.peek_byte(self.pos), Some(b'+' | b'-')) {
            self.pos += 1;
        }
        let mut digits = self.skip_digits();
        if self.peek_byte(self.pos) == Some(b'.') {
            self.pos += 1;
            digits += self.skip_digits();
        }

        if digits == 0 {
            // Lone sign or dot.
            self.pos = self.pos.max(start + 1);
            return Err(PathError::InvalidNumber {
                token: self.source[start..self.pos].to_string(),
                offset: start,
            });
        }

        // Only take the exponent when digits follow it; otherwise the `e` is
        // left for the next token.
        if matches!(self.peek_byte(self.pos), Some(b'e' | b'E')) {
            let mut probe = self.pos + 1;
            if matches!(self.peek_byte(probe), Some(b'+' | b'-')) {
                probe += 1;
            }
            if matches!(self.peek_byte(probe), Some(b'0'..=b'9')) {
                self.pos = probe;
                self.skip_digits();
            }
        }

        let text = &self.source[start..self.pos];
        text.parse::<f64>()
            .map(Token::Number)
            .map_err(|_| PathError::InvalidNumber {
                token: text.to_string(),
                offset: start,
            })
    }

    /// Read an arc flag: exactly one `0` or `1`, which needs no separator
    /// from what follows (`"0120"` is the flags `0`, `1` and then `20`).
    /// Nothing is consumed when the next token is not a flag.
    pub fn next_flag(&mut self) -> Option<(usize, bool)> {
        self.skip_separators();
        let offset = self.pos;
        let flag = match self.peek_byte(offset)? {
            b'0' => false,
            b'1' => true,
            _ => return None,
        };
        self.pos += 1;
        Some((offset, flag))
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = (usize, Result<Token, PathError>);

    fn next(&mut self) -> Option<Self::Item> {
        self.skip_separators();
        let offset = self.pos;
        let ch = self.source[offset..].chars().next()?;

        let token = match ch {
            '0'..='9' | '.' | '+' | '-' => self.scan_number(),
            c if c.is_ascii_alphabetic() => {
                self.pos += 1;
                Ok(Token::Command(c))
            }
            c => {
                self.pos += c.len_utf8();
                Err(PathError::UnexpectedCharacter {
                    character: c,
                    offset,
                })
            }
        };
        Some((offset, token))
    }
}

/// Parse a plain list of numbers, as found in `points` and transform
/// arguments. Any non-numeric token is an error.
pub fn parse_numbers(source: &str) -> Result<Vec<f64>, PathError> {
    Tokenizer::new(source)
        .map(|(offset, token)| match token? {
            Token::Number(n) => Ok(n),
            Token::Command(c) => Err(PathError::UnexpectedCharacter {
                character: c,
                offset,
            }),
        })
        .collect()
}
