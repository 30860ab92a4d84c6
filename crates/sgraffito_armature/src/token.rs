//! Token types produced by the Pug tokenizer.
//!
//! Locations follow pug-lexer conventions: lines and columns are 1-based and
//! relative to the tokenized text, `end` is exclusive. Columns count bytes.

use compact_str::CompactString;
use serde::Serialize;

/// A 1-based line/column pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct LineColumn {
    pub line: u32,
    pub column: u32,
}

impl LineColumn {
    #[inline]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// Source location span `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Loc {
    pub start: LineColumn,
    pub end: LineColumn,
}

impl Loc {
    #[inline]
    pub const fn new(start: LineColumn, end: LineColumn) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn is_single_line(&self) -> bool {
        self.start.line == self.end.line
    }
}

/// Pug control-flow keywords that start a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ControlKeyword {
    If,
    ElseIf,
    Else,
    Unless,
    Each,
    For,
    While,
    Case,
    When,
    Default,
    Include,
    Extends,
    Block,
    Append,
    Prepend,
    Mixin,
    Yield,
}

impl ControlKeyword {
    pub(crate) fn from_word(word: &str) -> Option<Self> {
        Some(match word {
            "if" => Self::If,
            "else" => Self::Else,
            "unless" => Self::Unless,
            "each" => Self::Each,
            "for" => Self::For,
            "while" => Self::While,
            "case" => Self::Case,
            "when" => Self::When,
            "default" => Self::Default,
            "include" => Self::Include,
            "extends" => Self::Extends,
            "block" => Self::Block,
            "append" => Self::Append,
            "prepend" => Self::Prepend,
            "mixin" => Self::Mixin,
            "yield" => Self::Yield,
            _ => return None,
        })
    }
}

/// The closed set of token kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum TokenKind {
    /// `div`, `my-component`, `UiButton`
    Tag { name: CompactString },
    /// `.foo` (name without the dot)
    Class { name: CompactString },
    /// `#foo` (name without the hash)
    Id { name: CompactString },
    /// `(`
    StartAttributes,
    /// `name`, `name="value"`, `name!=value`
    ///
    /// `val` is the raw value as written, quotes included; `None` for a bare
    /// (boolean) attribute.
    Attribute {
        name: CompactString,
        val: Option<CompactString>,
        must_escape: bool,
    },
    /// `)`
    EndAttributes,
    /// `&attributes(...)`
    AndAttributes { val: CompactString },
    /// Plain, piped or inline text.
    Text { val: CompactString },
    /// A line starting with `<`.
    TextHtml { val: CompactString },
    /// `- code`, `= code`, `!= code`
    Code { val: CompactString, buffer: bool },
    /// `// comment` (buffered) or `//- comment`
    Comment { val: CompactString, buffer: bool },
    /// `doctype html`
    Doctype { val: CompactString },
    /// `if cond`, `each x in xs`, `include file`, ...
    Control {
        keyword: ControlKeyword,
        expr: CompactString,
    },
    /// `+mixin-name`
    Call { name: CompactString },
    /// Trailing `.` that opens a block of plain text.
    Dot,
    /// `:` block expansion.
    Colon,
    /// Trailing `/` marking a self-closing tag.
    Slash,
    StartPipelessText,
    EndPipelessText,
    Newline,
    Indent { width: u32 },
    Outdent,
    Eos,
}

impl TokenKind {
    /// The pug-lexer type name, useful for diagnostics and debugging output.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Tag { .. } => "tag",
            Self::Class { .. } => "class",
            Self::Id { .. } => "id",
            Self::StartAttributes => "start-attributes",
            Self::Attribute { .. } => "attribute",
            Self::EndAttributes => "end-attributes",
            Self::AndAttributes { .. } => "&attributes",
            Self::Text { .. } => "text",
            Self::TextHtml { .. } => "text-html",
            Self::Code { .. } => "code",
            Self::Comment { .. } => "comment",
            Self::Doctype { .. } => "doctype",
            Self::Control { .. } => "control",
            Self::Call { .. } => "call",
            Self::Dot => "dot",
            Self::Colon => ":",
            Self::Slash => "slash",
            Self::StartPipelessText => "start-pipeless-text",
            Self::EndPipelessText => "end-pipeless-text",
            Self::Newline => "newline",
            Self::Indent { .. } => "indent",
            Self::Outdent => "outdent",
            Self::Eos => "eos",
        }
    }
}

/// A token with its location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    #[serde(flatten)]
    pub kind: TokenKind,
    pub loc: Loc,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, loc: Loc) -> Self {
        Self { kind, loc }
    }

    /// Tag name, if this is a `tag` token.
    #[inline]
    pub fn tag_name(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Tag { name } => Some(name),
            _ => None,
        }
    }

    /// Attribute name and raw value, if this is an `attribute` token.
    #[inline]
    pub fn as_attribute(&self) -> Option<(&str, Option<&str>)> {
        match &self.kind {
            TokenKind::Attribute { name, val, .. } => Some((name, val.as_deref())),
            _ => None,
        }
    }

    /// Text content, if this is a `text` or `text-html` token.
    #[inline]
    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Text { val } | TokenKind::TextHtml { val } => Some(val),
            _ => None,
        }
    }
}
