//! # sgraffito_armature
//!
//! Armature - The Pug tokenizer for Sgraffito.
//!
//! ## Name Origin
//!
//! An **armature** is the internal framework that a sculptor builds before
//! applying clay or plaster. The finished surface hides it, but every form
//! rests on it. `sgraffito_armature` turns a Pug template into the token
//! stream that all linting in Sgraffito is built upon.
//!
//! ## Usage
//!
//! ```
//! use sgraffito_armature::{tokenize, TokenKind};
//!
//! let tokens = tokenize("ul\n  li(v-for=\"item in items\") {{ item }}").unwrap();
//! assert_eq!(tokens[0].tag_name(), Some("ul"));
//! assert!(matches!(tokens[1].kind, TokenKind::Indent { width: 2 }));
//! assert_eq!(tokens.last().map(|t| t.kind.type_name()), Some("eos"));
//! ```
//!
//! Token kinds and locations follow pug-lexer: every location is 1-based,
//! relative to the tokenized text, and its end is exclusive.

pub mod error;
mod lexer;
pub mod token;

pub use error::LexError;
pub use lexer::{char_codes, tokenize, Lexer};
pub use token::{ControlKeyword, LineColumn, Loc, Token, TokenKind};
