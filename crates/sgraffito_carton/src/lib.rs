//! Carton - The artist's toolbox for Sgraffito.
//!
//! This crate holds the small, dependency-light utilities shared by the
//! tokenizer and the linter, much like a carton (artist's portfolio case)
//! holds the tools an artist reaches for on every piece.
//!
//! # Modules
//!
//! - **casing**: checkers and converters for kebab-case, camelCase, PascalCase and snake_case
//! - **dom_tag_config**: well-known HTML/SVG/MathML element tables
//! - **hash**: xxHash3 helpers for cache keys
//! - **line_index**: line/column <-> byte offset conversion
//! - **pattern**: literal-or-`/regex/` name patterns used by rule options
//!
//! # Example
//!
//! ```
//! use sgraffito_carton::{kebab_case, pascal_case, LineIndex};
//!
//! assert_eq!(kebab_case("CoolComponent"), "cool-component");
//! assert_eq!(pascal_case("cool-component"), "CoolComponent");
//!
//! let index = LineIndex::new("div\n  span");
//! assert_eq!(index.offset(2, 3), Some(6));
//! ```

pub mod casing;
pub mod dom_tag_config;
pub mod hash;
pub mod line_index;
pub mod pattern;

// Re-export compact_str::CompactString for convenience
pub use compact_str::CompactString;

// Re-export smallvec for stack-optimized collections
pub use smallvec::{smallvec, SmallVec};

// Re-export rustc-hash for fast hash maps/sets
pub use rustc_hash::{FxHashMap, FxHashSet};

// Re-export phf for compile-time perfect hash functions
pub use phf::{phf_set, Set as PhfSet};

// Re-export shared utilities
pub use casing::*;
pub use dom_tag_config::*;
pub use hash::*;
pub use line_index::LineIndex;
pub use pattern::NamePattern;
