//! Token position reconciliation.
//!
//! Tokenizer locations are relative to the template text. This module maps
//! each token onto an absolute `[start, end)` byte range in the document and
//! a document line, so that `&document[start..end]` is exactly the token's
//! source text.

use sgraffito_armature::{Loc, Token, TokenKind};
use sgraffito_carton::LineIndex;

/// A token with its absolute document range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciledToken {
    pub token: Token,
    /// Start byte offset in the document
    pub start: u32,
    /// End byte offset in the document (exclusive)
    pub end: u32,
    /// 1-based document line of `start`
    pub line: u32,
    /// 1-based document line of `end`
    pub end_line: u32,
}

impl ReconciledToken {
    #[inline]
    pub fn kind(&self) -> &TokenKind {
        &self.token.kind
    }

    #[inline]
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Attribute name and raw value, if this is an attribute token.
    #[inline]
    pub fn as_attribute(&self) -> Option<(&str, Option<&str>)> {
        self.token.as_attribute()
    }

    /// Range of the attribute name as written.
    pub fn name_range(&self) -> Option<(u32, u32)> {
        let (name, _) = self.as_attribute()?;
        Some((self.start, (self.start + name.len() as u32).min(self.end)))
    }

    /// Range of the raw attribute value, quotes included. The value is
    /// always the tail of an attribute token.
    pub fn value_range(&self) -> Option<(u32, u32)> {
        let (_, value) = self.as_attribute()?;
        let len = value?.len() as u32;
        Some((self.end.saturating_sub(len).max(self.start), self.end))
    }

    /// Source text of this token.
    #[inline]
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        source
            .get(self.start as usize..self.end as usize)
            .unwrap_or_default()
    }
}

/// Map tokens of `template` onto absolute document ranges.
///
/// `template_offset` is the byte offset of the template text in the document
/// and `template_line` the document line its first line sits on.
pub fn reconcile(
    tokens: Vec<Token>,
    template: &str,
    template_offset: u32,
    template_line: u32,
) -> Vec<ReconciledToken> {
    let index = LineIndex::new(template);
    let mut cursor = template_offset;
    let mut reconciled = Vec::with_capacity(tokens.len());

    for token in tokens {
        let (mut start, mut end) = match resolve(&index, &token.loc) {
            Some((start, end)) => (template_offset + start, template_offset + end),
            None => {
                tracing::debug!(
                    target: "sgraffito_patina::reconcile",
                    kind = token.kind.type_name(),
                    line = token.loc.start.line,
                    column = token.loc.start.column,
                    "unresolvable token location, using an empty range"
                );
                (cursor, cursor)
            }
        };

        if start < cursor {
            tracing::debug!(
                target: "sgraffito_patina::reconcile",
                kind = token.kind.type_name(),
                start,
                cursor,
                "token starts before the previous token, clamping"
            );
            start = cursor;
            end = end.max(cursor);
        }
        cursor = start;

        reconciled.push(ReconciledToken {
            line: template_line + token.loc.start.line.saturating_sub(1),
            end_line: template_line + token.loc.end.line.saturating_sub(1),
            token,
            start,
            end,
        });
    }

    reconciled
}

/// Template-relative `[start, end)` of a location.
fn resolve(index: &LineIndex, loc: &Loc) -> Option<(u32, u32)> {
    let start = index.offset(loc.start.line, loc.start.column)?;
    let end = if loc.is_single_line() {
        let len = loc.end.column.checked_sub(loc.start.column)?;
        // The end must still be on the start line.
        index.offset(loc.end.line, loc.end.column)?;
        start + len
    } else {
        index.offset(loc.end.line, loc.end.column)?
    };
    (end >= start).then_some((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sgraffito_armature::{tokenize, LineColumn};

    fn expected_text(kind: &TokenKind) -> Option<String> {
        Some(match kind {
            TokenKind::Tag { name } => name.to_string(),
            TokenKind::Class { name } => format!(".{name}"),
            TokenKind::Id { name } => format!("#{name}"),
            TokenKind::Attribute { name, val, .. } => match val {
                Some(val) => format!("{name}={val}"),
                None => name.to_string(),
            },
            TokenKind::Text { val } => val.to_string(),
            TokenKind::StartAttributes => "(".to_string(),
            TokenKind::EndAttributes => ")".to_string(),
            _ => return None,
        })
    }

    fn assert_round_trip(document: &str, template_start: &str) {
        let offset = document.find(template_start).unwrap() + template_start.len();
        let end = document.rfind("</template>").unwrap();
        let template = &document[offset..end];
        let line = document[..offset].matches('\n').count() as u32 + 1;

        let tokens = reconcile(tokenize(template).unwrap(), template, offset as u32, line);
        let mut checked = 0;
        for token in &tokens {
            if let Some(expected) = expected_text(token.kind()) {
                assert_eq!(token.text(document), expected, "{:?}", token.token);
                checked += 1;
            }
        }
        assert!(checked > 0);
    }

    #[test]
    fn test_round_trip_simple() {
        assert_round_trip(
            "<template lang=\"pug\">\ndiv.wrapper#main\n  span(:foo=\"bar\", baz) hello\n</template>",
            "<template lang=\"pug\">",
        );
    }

    #[test]
    fn test_round_trip_wrapped_attributes_and_blank_lines() {
        assert_round_trip(
            "<script>\nexport default {}\n</script>\n\n<template lang=\"pug\">\nul\n\n  li(\n    v-for=\"item in items\"\n    :key=\"item.id\"\n  ) {{ item }}\n\n\n  li: a(href=`/x/${\n    y\n  }`) link\n</template>\n",
            "<template lang=\"pug\">",
        );
    }

    #[test]
    fn test_round_trip_pipeless_text() {
        assert_round_trip(
            "<template lang='pug'>\ndiv\n  p.\n    first line\n      second line\n  | piped\n</template>",
            "<template lang='pug'>",
        );
    }

    mod generated {
        use super::*;
        use proptest::prelude::*;
        use sgraffito_carton::LineIndex;

        const TEMPLATE_START: &str = "<template lang=\"pug\">";
        const TAGS: &[&str] = &["div", "span", "ul", "li", "p", "section", "my-item", "MyCard"];
        const ATTRS: &[&str] = &["id", "title", ":key", "v-if", "v-for", "@click", "disabled"];

        #[derive(Debug, Clone)]
        enum Line {
            Element {
                tag: &'static str,
                class: Option<String>,
                attrs: Vec<(&'static str, Option<String>)>,
                wrapped: bool,
                text: Option<String>,
            },
            Piped(String),
        }

        fn text() -> impl Strategy<Value = String> {
            "[a-zA-Zéü日][a-z éü日!?]{0,12}"
        }

        fn line() -> impl Strategy<Value = Line> {
            let element = (
                prop::sample::select(TAGS),
                prop::option::of("[a-z][a-z0-9-]{0,6}"),
                prop::collection::vec(
                    (prop::sample::select(ATTRS), prop::option::of("[a-z é日]{0,6}")),
                    0..4,
                ),
                any::<bool>(),
                prop::option::of(text()),
            )
                .prop_map(|(tag, class, attrs, wrapped, text)| Line::Element {
                    tag,
                    class,
                    attrs,
                    wrapped,
                    text,
                });
            prop_oneof![4 => element, 1 => text().prop_map(Line::Piped)]
        }

        /// Lines are `(depth choice, blank line before, content)`. A line is
        /// at most one level deeper than the previous one.
        fn document(lines: &[(usize, bool, Line)], tabs: bool, crlf: bool) -> String {
            let nl = if crlf { "\r\n" } else { "\n" };
            let unit = if tabs { "\t" } else { "  " };
            let mut out = format!("<script>{nl}export default {{}}{nl}</script>{nl}{nl}{TEMPLATE_START}{nl}");
            let mut depth: Option<usize> = None;

            for (choice, blank, line) in lines {
                let level = depth.map_or(0, |d| (*choice).min(d + 1));
                depth = Some(level);
                if *blank {
                    out.push_str(nl);
                }
                let indent = unit.repeat(level);
                out.push_str(&indent);

                match line {
                    Line::Element {
                        tag,
                        class,
                        attrs,
                        wrapped,
                        text,
                    } => {
                        out.push_str(tag);
                        if let Some(class) = class {
                            out.push('.');
                            out.push_str(class);
                        }
                        if !attrs.is_empty() {
                            let attrs: Vec<String> = attrs
                                .iter()
                                .map(|(name, value)| match value {
                                    Some(value) => format!("{name}=\"{value}\""),
                                    None => name.to_string(),
                                })
                                .collect();
                            if *wrapped {
                                let inner = format!("{indent}{unit}");
                                out.push('(');
                                for attr in &attrs {
                                    out.push_str(nl);
                                    out.push_str(&inner);
                                    out.push_str(attr);
                                }
                                out.push_str(nl);
                                out.push_str(&indent);
                                out.push(')');
                            } else {
                                out.push('(');
                                out.push_str(&attrs.join(", "));
                                out.push(')');
                            }
                        }
                        if let Some(text) = text {
                            out.push(' ');
                            out.push_str(text);
                        }
                    }
                    Line::Piped(text) => {
                        out.push_str("| ");
                        out.push_str(text);
                    }
                }
                out.push_str(nl);
            }

            out.push_str("</template>");
            out.push_str(nl);
            out
        }

        proptest! {
            #[test]
            fn test_generated_templates_round_trip(
                lines in prop::collection::vec((0usize..3, any::<bool>(), line()), 1..12),
                tabs in any::<bool>(),
                crlf in any::<bool>(),
            ) {
                let document = document(&lines, tabs, crlf);
                let offset = document.find(TEMPLATE_START).unwrap() + TEMPLATE_START.len();
                let end = document.rfind("</template>").unwrap();
                let template = &document[offset..end];
                let template_line = document[..offset].matches('\n').count() as u32 + 1;

                let tokens = reconcile(tokenize(template).unwrap(), template, offset as u32, template_line);
                let index = LineIndex::new(&document);
                let mut checked = 0;
                for token in &tokens {
                    if let Some(expected) = expected_text(token.kind()) {
                        prop_assert_eq!(token.text(&document), expected.as_str(), "{:?}", token.token);
                        prop_assert_eq!(index.line_col(token.start).0, token.line);
                        checked += 1;
                    }
                }
                prop_assert!(checked >= lines.len());
            }
        }
    }

    #[test]
    fn test_lines_are_document_lines() {
        let document = "<template lang=\"pug\">\ndiv\n  span\n</template>";
        let offset = document.find('\n').unwrap();
        let template = &document[offset..document.rfind("</template>").unwrap()];
        let tokens = reconcile(tokenize(template).unwrap(), template, offset as u32, 1);

        // The template text starts with the line break of the tag line.
        assert_eq!(tokens[0].kind(), &TokenKind::Newline);
        assert_eq!(tokens[0].line, 2);
        let span = tokens.iter().find(|t| t.token.tag_name() == Some("span")).unwrap();
        assert_eq!(span.line, 3);
        assert_eq!(span.text(document), "span");
    }

    #[test]
    fn test_attribute_name_and_value_ranges() {
        let template = "a(:href = \"url\", download)";
        let tokens = reconcile(tokenize(template).unwrap(), template, 0, 1);
        let href = tokens.iter().find(|t| t.as_attribute().is_some()).unwrap();
        let (start, end) = href.name_range().unwrap();
        assert_eq!(&template[start as usize..end as usize], ":href");
        let (start, end) = href.value_range().unwrap();
        assert_eq!(&template[start as usize..end as usize], "\"url\"");

        let download = tokens.iter().rev().find(|t| t.as_attribute().is_some()).unwrap();
        assert_eq!(download.value_range(), None);
    }

    #[test]
    fn test_unresolvable_location_is_empty() {
        let bogus = Token::new(
            TokenKind::Text { val: "x".into() },
            Loc::new(LineColumn::new(7, 1), LineColumn::new(7, 2)),
        );
        let tokens = reconcile(vec![bogus], "div", 10, 1);
        assert_eq!(tokens[0].start, 10);
        assert!(tokens[0].is_empty());
    }

    #[test]
    fn test_starts_never_move_backwards() {
        let a = Token::new(
            TokenKind::Tag { name: "div".into() },
            Loc::new(LineColumn::new(1, 1), LineColumn::new(1, 4)),
        );
        let b = Token::new(
            TokenKind::Text { val: "d".into() },
            Loc::new(LineColumn::new(1, 1), LineColumn::new(1, 2)),
        );
        let tokens = reconcile(vec![a, b], "div", 0, 1);
        assert_eq!(tokens[1].start, 0);

        let c = Token::new(
            TokenKind::Eos,
            Loc::new(LineColumn::new(1, 4), LineColumn::new(1, 4)),
        );
        let d = Token::new(
            TokenKind::Text { val: "d".into() },
            Loc::new(LineColumn::new(1, 1), LineColumn::new(1, 2)),
        );
        let tokens = reconcile(vec![c, d], "div", 0, 1);
        assert_eq!((tokens[1].start, tokens[1].end), (3, 3));
    }
}
