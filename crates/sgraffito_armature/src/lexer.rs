//! Pug tokenizer.
//!
//! A line-oriented scanner over bytes. Each line is classified by its first
//! character (piped text, comment, code, control keyword or element head),
//! indentation changes become `indent`/`outdent`/`newline` tokens, and
//! attribute blocks may span lines. Token kinds and locations mirror
//! pug-lexer so that rules written against pug-lexer output carry over.

use compact_str::CompactString;

use crate::error::LexError;
use crate::token::{ControlKeyword, LineColumn, Loc, Token, TokenKind};

/// Character codes for fast comparison
pub mod char_codes {
    pub const TAB: u8 = 0x09;
    pub const NEWLINE: u8 = 0x0A;
    pub const CARRIAGE_RETURN: u8 = 0x0D;
    pub const SPACE: u8 = 0x20;
    pub const EXCLAMATION_MARK: u8 = 0x21;
    pub const DOUBLE_QUOTE: u8 = 0x22;
    pub const NUMBER: u8 = 0x23;
    pub const AMP: u8 = 0x26;
    pub const SINGLE_QUOTE: u8 = 0x27;
    pub const LEFT_PAREN: u8 = 0x28;
    pub const RIGHT_PAREN: u8 = 0x29;
    pub const PLUS: u8 = 0x2B;
    pub const COMMA: u8 = 0x2C;
    pub const DASH: u8 = 0x2D;
    pub const DOT: u8 = 0x2E;
    pub const SLASH: u8 = 0x2F;
    pub const COLON: u8 = 0x3A;
    pub const LT: u8 = 0x3C;
    pub const EQ: u8 = 0x3D;
    pub const LEFT_SQUARE: u8 = 0x5B;
    pub const BACKSLASH: u8 = 0x5C;
    pub const RIGHT_SQUARE: u8 = 0x5D;
    pub const UNDERSCORE: u8 = 0x5F;
    pub const GRAVE_ACCENT: u8 = 0x60;
    pub const LEFT_BRACE: u8 = 0x7B;
    pub const PIPE: u8 = 0x7C;
    pub const RIGHT_BRACE: u8 = 0x7D;
}

use char_codes::*;

const BOM: &[u8] = b"\xEF\xBB\xBF";

/// Check if character can appear in a tag name
#[inline]
fn is_tag_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == UNDERSCORE || c == DASH || c == COLON
}

/// Check if character can appear in a class or id literal
#[inline]
fn is_class_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == UNDERSCORE || c == DASH
}

#[inline]
fn is_inline_whitespace(c: u8) -> bool {
    c == SPACE || c == TAB
}

/// Tokenize a Pug template.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).tokenize()
}

/// Pug tokenizer
pub struct Lexer<'a> {
    /// Input source
    source: &'a str,
    input: &'a [u8],
    /// Current index
    index: usize,
    /// Current 1-based line
    line: u32,
    /// Byte offset where the current line starts
    line_start: usize,
    /// Widths of the open indentation levels; always starts with 0
    indent_stack: Vec<u32>,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            input: source.as_bytes(),
            index: 0,
            line: 1,
            line_start: 0,
            indent_stack: vec![0],
            tokens: Vec::with_capacity(source.len() / 4 + 8),
        }
    }

    /// Tokenize the whole input.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        if self.input.starts_with(BOM) {
            self.index = BOM.len();
        }

        let width = self.measure_indent(self.index);
        self.index += width;
        let mut opens_block = if self.is_line_end(self.index) {
            false
        } else {
            self.lex_line()?
        };

        while self.index < self.input.len() {
            if opens_block {
                self.lex_text_block();
                if self.index >= self.input.len() {
                    break;
                }
            }
            if !self.lex_indentation()? {
                break;
            }
            opens_block = self.lex_line()?;
        }

        self.finish();
        Ok(self.tokens)
    }

    // ========== Position helpers ==========

    #[inline]
    fn pos(&self) -> LineColumn {
        self.pos_at(self.index)
    }

    #[inline]
    fn pos_at(&self, index: usize) -> LineColumn {
        LineColumn::new(self.line, (index - self.line_start) as u32 + 1)
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.input.get(self.index).copied()
    }

    #[inline]
    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.get(self.index + offset).copied()
    }

    #[inline]
    fn is_line_end(&self, index: usize) -> bool {
        match self.input.get(index) {
            None | Some(&NEWLINE) => true,
            Some(&CARRIAGE_RETURN) => self.input.get(index + 1) == Some(&NEWLINE),
            _ => false,
        }
    }

    /// Index of the line terminator (or end of input) at or after `index`.
    fn line_end_from(&self, index: usize) -> usize {
        let end = memchr::memchr(NEWLINE, &self.input[index..])
            .map(|i| index + i)
            .unwrap_or(self.input.len());
        if end > index && self.input[end - 1] == CARRIAGE_RETURN && end < self.input.len() {
            end - 1
        } else {
            end
        }
    }

    fn measure_indent(&self, index: usize) -> usize {
        self.input[index.min(self.input.len())..]
            .iter()
            .take_while(|&&c| is_inline_whitespace(c))
            .count()
    }

    /// Advance one byte, keeping line bookkeeping when it is a newline.
    #[inline]
    fn bump(&mut self) {
        if self.input[self.index] == NEWLINE {
            self.line += 1;
            self.line_start = self.index + 1;
        }
        self.index += 1;
    }

    /// Consume the line terminator at the current index.
    fn consume_line_break(&mut self) {
        if self.peek() == Some(CARRIAGE_RETURN) {
            self.index += 1;
        }
        if self.peek() == Some(NEWLINE) {
            self.bump();
        }
    }

    fn push(&mut self, kind: TokenKind, start: LineColumn, end: LineColumn) {
        self.tokens.push(Token::new(kind, Loc::new(start, end)));
    }

    fn slice(&self, start: usize, end: usize) -> CompactString {
        CompactString::from(&self.source[start..end])
    }

    fn unexpected(&self) -> LexError {
        let end = self.line_end_from(self.index);
        LexError::UnexpectedText {
            snippet: self.source[self.index..end].chars().take(24).collect(),
            line: self.line,
            column: self.pos().column,
        }
    }

    // ========== Lines and indentation ==========

    /// Handle the line break at the current index and the indentation of the
    /// next content line. Returns `false` when only blank lines remain.
    fn lex_indentation(&mut self) -> Result<bool, LexError> {
        let width = loop {
            self.consume_line_break();
            let width = self.measure_indent(self.index);
            if self.is_line_end(self.index + width) {
                self.index += width;
                if self.index >= self.input.len() {
                    return Ok(false);
                }
                continue;
            }
            break width as u32;
        };

        let start = self.pos();
        self.index += width as usize;
        let end = self.pos();

        let current = self.indent_stack.last().copied().unwrap_or(0);
        if width > current {
            self.indent_stack.push(width);
            self.push(TokenKind::Indent { width }, start, end);
        } else if width < current {
            while self.indent_stack.last().is_some_and(|&w| w > width) {
                self.indent_stack.pop();
                self.push(TokenKind::Outdent, start, end);
            }
            let restored = self.indent_stack.last().copied().unwrap_or(0);
            if restored != width {
                return Err(LexError::InconsistentIndentation {
                    line: self.line,
                    expected: restored,
                    actual: width,
                });
            }
        } else {
            self.push(TokenKind::Newline, start, end);
        }
        Ok(true)
    }

    /// Width of the next non-blank line after the terminator at `index`.
    fn next_content_indent(&self, mut index: usize) -> Option<usize> {
        while index < self.input.len() {
            if self.input[index] == CARRIAGE_RETURN {
                index += 1;
            }
            index += 1;
            let width = self.measure_indent(index);
            if !self.is_line_end(index + width) {
                return Some(width);
            }
            index = self.line_end_from(index + width);
        }
        None
    }

    /// Lines indented deeper than the current level after a `.`, a comment
    /// or a bare `-` are raw text.
    fn lex_text_block(&mut self) {
        let parent = self.indent_stack.last().copied().unwrap_or(0) as usize;
        let mut base: Option<usize> = None;

        while self
            .next_content_indent(self.index)
            .is_some_and(|width| width > parent)
        {
            self.consume_line_break();
            let width = self.measure_indent(self.index);
            if self.is_line_end(self.index + width) {
                self.index += width;
                continue;
            }

            let first = base.is_none();
            let text_col = width.min(*base.get_or_insert(width));
            let line_start = self.pos();
            self.index += text_col;
            let here = self.pos();
            if first {
                // The block marker is zero-width at the first text line.
                self.push(TokenKind::StartPipelessText, here, here);
            } else {
                self.push(TokenKind::Newline, line_start, here);
            }

            let start = self.pos();
            let end_index = self.line_end_from(self.index);
            let val = self.slice(self.index, end_index);
            self.index = end_index;
            let end = self.pos();
            self.push(TokenKind::Text { val }, start, end);
        }

        if base.is_some() {
            let here = self.pos();
            self.push(TokenKind::EndPipelessText, here, here);
        }
    }

    fn finish(&mut self) {
        let here = self.pos();
        while self.indent_stack.len() > 1 {
            self.indent_stack.pop();
            self.push(TokenKind::Outdent, here, here);
        }
        self.push(TokenKind::Eos, here, here);
    }

    // ========== Line content ==========

    /// Lex one line's content, starting after its indentation. Returns
    /// whether the line opens a raw text block.
    fn lex_line(&mut self) -> Result<bool, LexError> {
        let Some(c) = self.peek() else {
            return Ok(false);
        };

        match c {
            PIPE => {
                self.index += 1;
                if self.peek() == Some(SPACE) {
                    self.index += 1;
                }
                self.lex_rest_as_text();
                Ok(false)
            }
            LT => {
                let start = self.pos();
                let end_index = self.line_end_from(self.index);
                let val = self.slice(self.index, end_index);
                self.index = end_index;
                let end = self.pos();
                self.push(TokenKind::TextHtml { val }, start, end);
                Ok(false)
            }
            SLASH if self.peek_at(1) == Some(SLASH) => {
                let start = self.pos();
                let buffer = self.peek_at(2) != Some(DASH);
                let body = self.index + if buffer { 2 } else { 3 };
                let end_index = self.line_end_from(self.index);
                let val = self.slice(body.min(end_index), end_index);
                self.index = end_index;
                let end = self.pos();
                self.push(TokenKind::Comment { val, buffer }, start, end);
                Ok(true)
            }
            DASH => {
                let code = self.lex_code(1, false);
                Ok(code.trim().is_empty())
            }
            EQ => {
                self.lex_code(1, true);
                Ok(false)
            }
            EXCLAMATION_MARK if self.peek_at(1) == Some(EQ) => {
                self.lex_code(2, true);
                Ok(false)
            }
            PLUS => {
                let start = self.pos();
                self.index += 1;
                let name_start = self.index;
                while self.peek().is_some_and(is_class_char) {
                    self.index += 1;
                }
                if self.index == name_start {
                    self.index -= 1;
                    return Err(self.unexpected());
                }
                let name = self.slice(name_start, self.index);
                let end = self.pos();
                self.push(TokenKind::Call { name }, start, end);
                self.lex_element(true)
            }
            c if c.is_ascii_lowercase() => {
                if self.lex_keyword_line() {
                    Ok(false)
                } else {
                    self.lex_element(false)
                }
            }
            _ => self.lex_element(false),
        }
    }

    /// `doctype` and control-flow lines. Returns `false` (consuming nothing)
    /// when the line is not one.
    fn lex_keyword_line(&mut self) -> bool {
        let word_len = self.input[self.index..]
            .iter()
            .take_while(|c| c.is_ascii_lowercase())
            .count();
        let word = &self.source[self.index..self.index + word_len];
        let after = self.index + word_len;
        if !(self.is_line_end(after) || self.input[after] == SPACE) {
            return false;
        }

        let start = self.pos();
        let end_index = self.line_end_from(self.index);
        let rest = self.source[after..end_index].trim();

        let kind = if word == "doctype" {
            TokenKind::Doctype { val: rest.into() }
        } else {
            let Some(mut keyword) = ControlKeyword::from_word(word) else {
                return false;
            };
            let mut expr = rest;
            if keyword == ControlKeyword::Else {
                if let Some(cond) = rest.strip_prefix("if") {
                    if cond.is_empty() || cond.starts_with(' ') {
                        keyword = ControlKeyword::ElseIf;
                        expr = cond.trim();
                    }
                }
            }
            TokenKind::Control {
                keyword,
                expr: expr.into(),
            }
        };

        self.index = end_index;
        let end = self.pos();
        self.push(kind, start, end);
        true
    }

    /// `-`, `=` or `!=` code running to the end of the line.
    fn lex_code(&mut self, marker_len: usize, buffer: bool) -> CompactString {
        let start = self.pos();
        let end_index = self.line_end_from(self.index);
        let body = (self.index + marker_len).min(end_index);
        let val: CompactString = self.source[body..end_index].trim_start().into();
        self.index = end_index;
        let end = self.pos();
        self.push(
            TokenKind::Code {
                val: val.clone(),
                buffer,
            },
            start,
            end,
        );
        val
    }

    fn lex_rest_as_text(&mut self) {
        let start = self.pos();
        let end_index = self.line_end_from(self.index);
        let val = self.slice(self.index, end_index);
        self.index = end_index;
        let end = self.pos();
        self.push(TokenKind::Text { val }, start, end);
    }

    /// An element head: tag, classes, ids, attribute blocks, then an optional
    /// `:` expansion, `.` block, `/`, code or inline text.
    fn lex_element(&mut self, mut started: bool) -> Result<bool, LexError> {
        loop {
            if self.is_line_end(self.index) {
                return Ok(false);
            }
            let c = self.input[self.index];

            match c {
                c if !started && (c.is_ascii_alphanumeric() || c == UNDERSCORE) => {
                    self.lex_tag();
                    started = true;
                }
                DOT if self.peek_at(1).is_some_and(is_class_char) => {
                    self.lex_literal(true);
                    started = true;
                }
                DOT => {
                    let after = self.index + 1;
                    let width = self.measure_indent(after);
                    if !self.is_line_end(after + width) {
                        return Err(self.unexpected());
                    }
                    let start = self.pos();
                    self.index = after;
                    let end = self.pos();
                    self.push(TokenKind::Dot, start, end);
                    self.index += width;
                    return Ok(true);
                }
                NUMBER if self.peek_at(1).is_some_and(is_class_char) => {
                    self.lex_literal(false);
                    started = true;
                }
                LEFT_PAREN if started => self.lex_attributes()?,
                AMP if started && self.source[self.index..].starts_with("&attributes(") => {
                    let start = self.pos();
                    self.index += "&attributes".len();
                    let open = self.index;
                    self.skip_balanced()?;
                    let val = self.slice(open + 1, self.index - 1);
                    let end = self.pos();
                    self.push(TokenKind::AndAttributes { val }, start, end);
                }
                COLON if started && self.peek_at(1).is_some_and(is_inline_whitespace) => {
                    let start = self.pos();
                    self.index += 1;
                    let end = self.pos();
                    self.push(TokenKind::Colon, start, end);
                    self.index += self.measure_indent(self.index);
                    started = false;
                }
                SLASH if started && self.is_line_end(self.index + 1) => {
                    let start = self.pos();
                    self.index += 1;
                    let end = self.pos();
                    self.push(TokenKind::Slash, start, end);
                }
                EQ if started => {
                    self.lex_code(1, true);
                    return Ok(false);
                }
                EXCLAMATION_MARK if started && self.peek_at(1) == Some(EQ) => {
                    self.lex_code(2, true);
                    return Ok(false);
                }
                c if started && is_inline_whitespace(c) => {
                    self.index += 1;
                    let end_index = self.line_end_from(self.index);
                    if self.source[self.index..end_index].trim().is_empty() {
                        self.index = end_index;
                    } else {
                        self.lex_rest_as_text();
                    }
                    return Ok(false);
                }
                NUMBER if !started => {
                    // `#{...}` / `#[...]` interpolation at the start of a line
                    self.lex_rest_as_text();
                    return Ok(false);
                }
                _ => return Err(self.unexpected()),
            }
        }
    }

    fn lex_tag(&mut self) {
        let start = self.pos();
        let name_start = self.index;
        while self.peek().is_some_and(is_tag_char) {
            self.index += 1;
        }
        // A tag name ends with a word character: `div:` is `div` + `:`.
        while self.index > name_start + 1
            && matches!(self.input[self.index - 1], COLON | DASH)
        {
            self.index -= 1;
        }
        let name = self.slice(name_start, self.index);
        let end = self.pos();
        self.push(TokenKind::Tag { name }, start, end);
    }

    /// `.class` or `#id`
    fn lex_literal(&mut self, class: bool) {
        let start = self.pos();
        self.index += 1;
        let name_start = self.index;
        while self.peek().is_some_and(is_class_char) {
            self.index += 1;
        }
        let name = self.slice(name_start, self.index);
        let end = self.pos();
        let kind = if class {
            TokenKind::Class { name }
        } else {
            TokenKind::Id { name }
        };
        self.push(kind, start, end);
    }

    // ========== Attributes ==========

    fn lex_attributes(&mut self) -> Result<(), LexError> {
        let open = self.pos();
        self.index += 1;
        self.push(TokenKind::StartAttributes, open, self.pos());

        loop {
            while self
                .peek()
                .is_some_and(|c| c.is_ascii_whitespace() || c == COMMA)
            {
                self.bump();
            }

            match self.peek() {
                None => {
                    return Err(LexError::UnclosedAttributeBlock {
                        line: open.line,
                        column: open.column,
                    })
                }
                Some(RIGHT_PAREN) => {
                    let start = self.pos();
                    self.index += 1;
                    self.push(TokenKind::EndAttributes, start, self.pos());
                    return Ok(());
                }
                Some(_) => self.lex_attribute()?,
            }
        }
    }

    fn lex_attribute(&mut self) -> Result<(), LexError> {
        let start = self.pos();

        let name: CompactString = match self.peek() {
            Some(quote @ (DOUBLE_QUOTE | SINGLE_QUOTE)) => {
                let open = self.index;
                self.skip_string(quote)?;
                self.slice(open + 1, self.index - 1)
            }
            _ => {
                let name_start = self.index;
                let mut bracket_depth = 0u32;
                while let Some(c) = self.peek() {
                    match c {
                        LEFT_SQUARE => bracket_depth += 1,
                        RIGHT_SQUARE => bracket_depth = bracket_depth.saturating_sub(1),
                        NEWLINE | CARRIAGE_RETURN => break,
                        _ if bracket_depth > 0 => {}
                        SPACE | TAB | EQ | COMMA | RIGHT_PAREN => break,
                        EXCLAMATION_MARK if self.peek_at(1) == Some(EQ) => break,
                        _ => {}
                    }
                    self.index += 1;
                }
                if self.index == name_start {
                    return Err(self.unexpected());
                }
                self.slice(name_start, self.index)
            }
        };

        let after_name = self.index;
        let lookahead = after_name + self.measure_indent(after_name);
        let (val, must_escape) = match self.input.get(lookahead) {
            Some(&EQ) => {
                self.index = lookahead + 1;
                (Some(self.lex_attribute_value()?), true)
            }
            Some(&EXCLAMATION_MARK) if self.input.get(lookahead + 1) == Some(&EQ) => {
                self.index = lookahead + 2;
                (Some(self.lex_attribute_value()?), false)
            }
            _ => (None, true),
        };

        let end = self.pos();
        self.push(
            TokenKind::Attribute {
                name,
                val,
                must_escape,
            },
            start,
            end,
        );
        Ok(())
    }

    /// A JavaScript expression ending at top-level whitespace, `,` or `)`.
    fn lex_attribute_value(&mut self) -> Result<CompactString, LexError> {
        self.index += self.measure_indent(self.index);
        let value_start = self.index;
        let mut depth = 0u32;

        while let Some(c) = self.peek() {
            match c {
                DOUBLE_QUOTE | SINGLE_QUOTE | GRAVE_ACCENT => {
                    self.skip_string(c)?;
                    continue;
                }
                LEFT_PAREN | LEFT_SQUARE | LEFT_BRACE => depth += 1,
                RIGHT_PAREN | RIGHT_SQUARE | RIGHT_BRACE if depth > 0 => depth -= 1,
                RIGHT_PAREN | COMMA if depth == 0 => break,
                c if depth == 0 && c.is_ascii_whitespace() => break,
                _ => {}
            }
            self.bump();
        }

        if self.index == value_start {
            return Err(self.unexpected());
        }
        Ok(self.slice(value_start, self.index))
    }

    /// Skip a quoted string starting at the current index, including both
    /// quotes. Strings may span lines.
    fn skip_string(&mut self, quote: u8) -> Result<(), LexError> {
        let start = self.pos();
        self.index += 1;
        while let Some(c) = self.peek() {
            match c {
                BACKSLASH => {
                    self.index += 1;
                    if self.peek().is_some() {
                        self.bump();
                    }
                }
                c if c == quote => {
                    self.index += 1;
                    return Ok(());
                }
                _ => self.bump(),
            }
        }
        Err(LexError::UnterminatedString {
            line: start.line,
            column: start.column,
        })
    }

    /// Skip a balanced parenthesized group starting at the current `(`.
    fn skip_balanced(&mut self) -> Result<(), LexError> {
        let open = self.pos();
        let mut depth = 0u32;
        while let Some(c) = self.peek() {
            match c {
                DOUBLE_QUOTE | SINGLE_QUOTE | GRAVE_ACCENT => {
                    self.skip_string(c)?;
                    continue;
                }
                LEFT_PAREN => depth += 1,
                RIGHT_PAREN => {
                    depth -= 1;
                    if depth == 0 {
                        self.index += 1;
                        return Ok(());
                    }
                }
                _ => {}
            }
            self.bump();
        }
        Err(LexError::UnclosedAttributeBlock {
            line: open.line,
            column: open.column,
        })
    }
}
