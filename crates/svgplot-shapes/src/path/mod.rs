//! SVG path data: tokenizer and command parser.

pub mod parser;
pub mod tokenizer;

pub use parser::{parse_path, DrawingInstruction, PathParser};
pub use tokenizer::{parse_numbers, Token, Tokenizer};
