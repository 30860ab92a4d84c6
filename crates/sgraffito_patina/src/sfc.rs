//! Top-level block extraction for single-file components.
//!
//! Only what the linter needs is read: the Pug `<template>` block with its
//! exact document offsets, and the `<script>` blocks for the static binding
//! scan. Block contents are not parsed here.

use std::ops::Range;

use sgraffito_carton::CompactString;
use thiserror::Error;

/// Errors raised while reading the SFC block structure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SfcError {
    #[error("<{tag}> block opened on line {line} is never closed")]
    UnterminatedBlock { tag: CompactString, line: u32 },
}

/// The `<template lang="pug">` block of a component.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateBlock {
    /// Raw text between the start and end tags
    pub content: String,
    /// Byte offset of `content` in the document
    pub offset: u32,
    /// 1-based document line `content` starts on
    pub line: u32,
    /// Whether the start tag has a `src` attribute
    pub has_src: bool,
    pub lang: Option<CompactString>,
    /// Range of `<template ...>`
    pub start_tag: Range<u32>,
    /// Range of `</template>`
    pub end_tag: Range<u32>,
}

impl TemplateBlock {
    #[inline]
    pub fn is_pug(&self) -> bool {
        matches!(self.lang.as_deref(), Some("pug" | "jade"))
    }

    /// Whether there is any text between the tags, whitespace included.
    #[inline]
    pub fn has_content(&self) -> bool {
        !self.content.is_empty()
    }
}

/// A `<script>` or `<script setup>` block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptBlock {
    pub content: String,
    pub offset: u32,
    pub setup: bool,
    pub lang: Option<CompactString>,
}

/// Top-level blocks of a component.
#[derive(Debug, Clone, Default)]
pub struct SfcBlocks {
    /// The first top-level `<template>` block, whatever its language
    pub template: Option<TemplateBlock>,
    pub scripts: Vec<ScriptBlock>,
}

/// Extract the Pug template block. Templates in any other language give
/// `Ok(None)`.
pub fn extract_template(source: &str) -> Result<Option<TemplateBlock>, SfcError> {
    Ok(parse_blocks(source)?.template.filter(TemplateBlock::is_pug))
}

/// Read the top-level block structure of a component.
pub fn parse_blocks(source: &str) -> Result<SfcBlocks, SfcError> {
    let mut blocks = SfcBlocks::default();
    let mut pos = 0;

    while let Some(rel) = source[pos..].find('<') {
        let start = pos + rel;
        let rest = &source[start..];

        if rest.starts_with("<!--") {
            pos = match rest.find("-->") {
                Some(end) => start + end + 3,
                None => source.len(),
            };
            continue;
        }

        let Some(name) = tag_name(&rest[1..]) else {
            pos = start + 1;
            continue;
        };
        let Some(open_len) = start_tag_len(rest) else {
            return Err(unterminated(source, start, name));
        };
        let open_end = start + open_len;
        let attributes = parse_attributes(&source[start + 1 + name.len()..open_end - 1]);

        if source[..open_end].ends_with("/>") {
            pos = open_end;
            continue;
        }

        let close = if name.eq_ignore_ascii_case("template") {
            find_template_close(source, open_end)
        } else {
            let closing = format!("</{name}");
            source[open_end..]
                .find(closing.as_str())
                .map(|p| open_end + p)
        };
        let Some(close_start) = close else {
            return Err(unterminated(source, start, name));
        };
        let close_end = source[close_start..]
            .find('>')
            .map_or(source.len(), |p| close_start + p + 1);

        let content = source[open_end..close_start].to_string();
        let lang = attribute(&attributes, "lang").flatten().map(CompactString::from);

        if name.eq_ignore_ascii_case("template") {
            if blocks.template.is_none() {
                blocks.template = Some(TemplateBlock {
                    content,
                    offset: open_end as u32,
                    line: line_of(source, open_end),
                    has_src: attribute(&attributes, "src").is_some(),
                    lang,
                    start_tag: start as u32..open_end as u32,
                    end_tag: close_start as u32..close_end as u32,
                });
            }
        } else if name.eq_ignore_ascii_case("script") {
            blocks.scripts.push(ScriptBlock {
                content,
                offset: open_end as u32,
                setup: attribute(&attributes, "setup").is_some(),
                lang,
            });
        }

        pos = close_end;
    }

    Ok(blocks)
}

fn unterminated(source: &str, start: usize, name: &str) -> SfcError {
    SfcError::UnterminatedBlock {
        tag: name.to_ascii_lowercase().into(),
        line: line_of(source, start),
    }
}

fn line_of(source: &str, offset: usize) -> u32 {
    memchr::memchr_iter(b'\n', &source.as_bytes()[..offset]).count() as u32 + 1
}

/// Name of a start tag beginning right after `<`.
fn tag_name(s: &str) -> Option<&str> {
    let end = s
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-'))
        .unwrap_or(s.len());
    let name = &s[..end];
    name.starts_with(|c: char| c.is_ascii_alphabetic())
        .then_some(name)
}

/// Length of the start tag at the beginning of `s`, through its `>`.
fn start_tag_len(s: &str) -> Option<usize> {
    let mut quote = None;
    for (i, b) in s.bytes().enumerate() {
        match (quote, b) {
            (Some(q), _) if b == q => quote = None,
            (Some(_), _) => {}
            (None, b'"' | b'\'') => quote = Some(b),
            (None, b'>') => return Some(i + 1),
            _ => {}
        }
    }
    None
}

/// Find the `</template>` matching a `<template>` whose start tag ends at
/// `from`, counting nested templates.
fn find_template_close(source: &str, from: usize) -> Option<usize> {
    const OPEN: &str = "<template";
    const CLOSE: &str = "</template";

    let mut depth = 1u32;
    let mut pos = from;
    loop {
        let next_open = source[pos..].find(OPEN).map(|p| pos + p);
        let next_close = source[pos..].find(CLOSE).map(|p| pos + p)?;

        match next_open {
            Some(open) if open < next_close => {
                let tag_end = start_tag_len(&source[open..]).map_or(source.len(), |l| open + l);
                if !source[..tag_end].ends_with("/>") {
                    depth += 1;
                }
                pos = tag_end;
            }
            _ => {
                depth -= 1;
                if depth == 0 {
                    return Some(next_close);
                }
                pos = next_close + CLOSE.len();
            }
        }
    }
}

type Attributes<'s> = Vec<(&'s str, Option<&'s str>)>;

fn parse_attributes(s: &str) -> Attributes<'_> {
    let mut attributes = Vec::new();
    let bytes = s.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i].is_ascii_whitespace() || bytes[i] == b'/' {
            i += 1;
            continue;
        }
        let name_start = i;
        while i < bytes.len() && !bytes[i].is_ascii_whitespace() && !matches!(bytes[i], b'=' | b'/') {
            i += 1;
        }
        let name = &s[name_start..i];
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i < bytes.len() && bytes[i] == b'=' {
            i += 1;
            while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            let value = match bytes.get(i) {
                Some(&q @ (b'"' | b'\'')) => {
                    let value_start = i + 1;
                    let value_end = s[value_start..]
                        .find(q as char)
                        .map_or(s.len(), |p| value_start + p);
                    i = value_end + 1;
                    &s[value_start..value_end]
                }
                _ => {
                    let value_start = i;
                    while i < bytes.len() && !bytes[i].is_ascii_whitespace() {
                        i += 1;
                    }
                    &s[value_start..i]
                }
            };
            attributes.push((name, Some(value)));
        } else if !name.is_empty() {
            attributes.push((name, None));
        }
    }

    attributes
}

/// `None` when absent, `Some(None)` for a bare attribute.
fn attribute<'s>(attributes: &Attributes<'s>, name: &str) -> Option<Option<&'s str>> {
    attributes
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, v)| *v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_pug_template() {
        let source = "<template lang=\"pug\">\ndiv\n</template>\n";
        let block = extract_template(source).unwrap().unwrap();
        assert_eq!(block.content, "\ndiv\n");
        assert_eq!(block.offset, 21);
        assert_eq!(block.line, 1);
        assert_eq!(block.start_tag, 0..21);
        assert_eq!(&source[block.end_tag.start as usize..block.end_tag.end as usize], "</template>");
        assert!(!block.has_src);
        assert!(block.is_pug());
    }

    #[test]
    fn test_html_template_is_skipped() {
        let source = "<template>\n  <div/>\n</template>";
        assert_eq!(extract_template(source).unwrap(), None);
        assert_eq!(extract_template("<script>x</script>").unwrap(), None);
    }

    #[test]
    fn test_template_inside_script_does_not_count() {
        let source = "<script>\nconst t = '<template lang=\"pug\">';\n</script>\n<template lang='jade'>\np\n</template>";
        let block = extract_template(source).unwrap().unwrap();
        assert_eq!(block.content, "\np\n");
        assert_eq!(block.line, 4);
    }

    #[test]
    fn test_nested_templates_are_counted() {
        let source = "<template lang=\"pug\">\n<template>x</template>\n<template/>\n</template>";
        let block = extract_template(source).unwrap().unwrap();
        assert_eq!(block.content, "\n<template>x</template>\n<template/>\n");
    }

    #[test]
    fn test_src_and_scripts() {
        let source = "<template lang=\"pug\" src=\"./a.pug\"></template>\n<script setup lang=\"ts\">\nimport A from './A.vue'\n</script>";
        let blocks = parse_blocks(source).unwrap();
        let template = blocks.template.unwrap();
        assert!(template.has_src);
        assert!(!template.has_content());
        assert_eq!(blocks.scripts.len(), 1);
        assert!(blocks.scripts[0].setup);
        assert_eq!(blocks.scripts[0].lang.as_deref(), Some("ts"));
    }

    #[test]
    fn test_unterminated_template() {
        let err = extract_template("<!-- c -->\n<template lang=\"pug\">\ndiv").unwrap_err();
        assert_eq!(
            err,
            SfcError::UnterminatedBlock {
                tag: "template".into(),
                line: 2
            }
        );
        assert_eq!(err.to_string(), "<template> block opened on line 2 is never closed");
    }
}
