//! Vue directive helpers over raw attribute tokens.
//!
//! Attribute names are parsed once into `Directive { name, argument,
//! modifiers }`. Values are the raw text from the tokenizer, quotes
//! included, so helpers here also strip quotes and scan expressions
//! lexically (no JavaScript AST is built).

use memchr::memmem;
use sgraffito_carton::{CompactString, SmallVec};

/// A parsed directive attribute name.
///
/// `v-on:click.ctrl` → name `on`, argument `click`, modifiers `[ctrl]`.
/// Shorthands are normalized: `:x` is `bind`, `@x` is `on`, `#x` is `slot`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive<'a> {
    /// The attribute name as written
    pub raw: &'a str,
    /// Directive name without the `v-` prefix
    pub name: &'a str,
    /// Static (`click`) or dynamic (`[event]`) argument
    pub argument: Option<&'a str>,
    pub modifiers: SmallVec<[&'a str; 4]>,
    /// Whether a shorthand (`:`, `@`, `#`) was used
    pub shorthand: bool,
}

impl<'a> Directive<'a> {
    /// Parse an attribute name. Plain attributes return `None`.
    pub fn parse(raw: &'a str) -> Option<Self> {
        let (name, rest, shorthand) = if let Some(rest) = raw.strip_prefix("v-") {
            let end = rest.find([':', '.']).unwrap_or(rest.len());
            (&rest[..end], &rest[end..], false)
        } else if let Some(rest) = raw.strip_prefix(':') {
            ("bind", rest, true)
        } else if let Some(rest) = raw.strip_prefix('@') {
            ("on", rest, true)
        } else if let Some(rest) = raw.strip_prefix('#') {
            ("slot", rest, true)
        } else {
            return None;
        };

        if name.is_empty() {
            return None;
        }

        // Shorthands carry the argument directly; `v-x` needs a colon.
        let rest = if shorthand {
            rest
        } else {
            match rest.strip_prefix(':') {
                Some(arg) => arg,
                None => {
                    return Some(Self {
                        raw,
                        name,
                        argument: None,
                        modifiers: split_modifiers(rest),
                        shorthand,
                    })
                }
            }
        };

        let arg_end = argument_end(rest);
        let argument = (arg_end > 0).then(|| &rest[..arg_end]);
        Some(Self {
            raw,
            name,
            argument,
            modifiers: split_modifiers(&rest[arg_end..]),
            shorthand,
        })
    }

    #[inline]
    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }

    /// Whether the argument is a `[dynamic]` expression.
    #[inline]
    pub fn has_dynamic_argument(&self) -> bool {
        self.argument.is_some_and(|arg| arg.starts_with('['))
    }

    /// Static argument, if any.
    #[inline]
    pub fn static_argument(&self) -> Option<&'a str> {
        self.argument.filter(|arg| !arg.starts_with('['))
    }

    #[inline]
    pub fn has_modifier(&self, modifier: &str) -> bool {
        self.modifiers.iter().any(|m| *m == modifier)
    }
}

/// End of the argument: the first `.` outside a `[dynamic]` argument.
fn argument_end(rest: &str) -> usize {
    let mut depth = 0u32;
    for (i, b) in rest.bytes().enumerate() {
        match b {
            b'[' => depth += 1,
            b']' => depth = depth.saturating_sub(1),
            b'.' if depth == 0 => return i,
            _ => {}
        }
    }
    rest.len()
}

fn split_modifiers(rest: &str) -> SmallVec<[&str; 4]> {
    match rest.strip_prefix('.') {
        Some(mods) => mods.split('.').collect(),
        None => SmallVec::new(),
    }
}

/// Strip one pair of matching quotes.
pub fn unquote(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && matches!(first, b'"' | b'\'' | b'`') {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// A value is empty when the attribute is bare or its unquoted text is blank.
pub fn is_empty_value(value: Option<&str>) -> bool {
    value.map_or(true, |v| unquote(v).trim().is_empty())
}

/// Byte offset of the unquoted content within the raw value.
pub fn unquoted_offset(value: &str) -> usize {
    if unquote(value).len() == value.len() {
        0
    } else {
        1
    }
}

/// A parsed `v-for` expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VFor<'a> {
    /// Alias identifiers, destructuring flattened
    pub aliases: Vec<CompactString>,
    /// The iterable expression, trimmed
    pub iterable: &'a str,
}

impl<'a> VFor<'a> {
    /// Parse the unquoted value of a `v-for`.
    pub fn parse(expression: &'a str) -> Option<Self> {
        let bytes = expression.as_bytes();
        let split = [b" in ".as_slice(), b" of ".as_slice()]
            .iter()
            .filter_map(|sep| memmem::find(bytes, sep))
            .min()?;
        let alias_part = expression[..split].trim();
        let iterable = expression[split + 4..].trim();

        Some(Self {
            aliases: identifiers(alias_part)
                .map(CompactString::from)
                .collect(),
            iterable,
        })
    }

    /// Whether the iterable is a plain identifier (`list`), as opposed to an
    /// expression (`list()`, `5`).
    pub fn iterable_is_identifier(&self) -> bool {
        is_identifier(self.iterable)
    }
}

#[inline]
fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

#[inline]
fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next().is_some_and(is_identifier_start) && chars.all(is_identifier_char)
}

/// Free-standing identifiers in an expression, in order.
///
/// String literals are skipped, as are property names after `.`.
pub fn identifiers(expression: &str) -> impl Iterator<Item = &str> + '_ {
    let mut chars = expression.char_indices().peekable();
    let mut prev_significant: Option<char> = None;

    std::iter::from_fn(move || {
        while let Some((i, c)) = chars.next() {
            match c {
                '"' | '\'' | '`' => {
                    let mut escaped = false;
                    for (_, inner) in chars.by_ref() {
                        if escaped {
                            escaped = false;
                        } else if inner == '\\' {
                            escaped = true;
                        } else if inner == c {
                            break;
                        }
                    }
                    prev_significant = Some(c);
                }
                c if is_identifier_start(c) => {
                    let mut end = i + c.len_utf8();
                    while let Some(&(j, next)) = chars.peek() {
                        if !is_identifier_char(next) {
                            break;
                        }
                        end = j + next.len_utf8();
                        chars.next();
                    }
                    let after_dot = prev_significant == Some('.');
                    prev_significant = Some('a');
                    if !after_dot {
                        return Some(&expression[i..end]);
                    }
                }
                c if c.is_whitespace() => {}
                c => prev_significant = Some(c),
            }
        }
        None
    })
}

/// Reserved words that may not be used as a `v-on` handler.
pub static JS_KEYWORDS: &[&str] = &[
    "await", "break", "case", "catch", "class", "const", "continue", "debugger", "default",
    "delete", "do", "else", "enum", "export", "extends", "false", "finally", "for", "function",
    "if", "implements", "import", "in", "instanceof", "interface", "let", "new", "null",
    "package", "private", "protected", "public", "return", "static", "super", "switch", "this",
    "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_long_form() {
        let d = Directive::parse("v-on:click.ctrl.exact").unwrap();
        assert_eq!(d.name, "on");
        assert_eq!(d.argument, Some("click"));
        assert_eq!(d.modifiers.as_slice(), &["ctrl", "exact"]);
        assert!(!d.shorthand);

        let d = Directive::parse("v-else-if").unwrap();
        assert_eq!(d.name, "else-if");
        assert_eq!(d.argument, None);
        assert!(d.modifiers.is_empty());

        let d = Directive::parse("v-if.foo").unwrap();
        assert_eq!(d.name, "if");
        assert_eq!(d.modifiers.as_slice(), &["foo"]);
    }

    #[test]
    fn test_parse_shorthands() {
        let d = Directive::parse(":foo-bar.prop").unwrap();
        assert_eq!((d.name, d.argument), ("bind", Some("foo-bar")));
        assert_eq!(d.modifiers.as_slice(), &["prop"]);

        let d = Directive::parse("@[event.name].stop").unwrap();
        assert_eq!(d.name, "on");
        assert_eq!(d.argument, Some("[event.name]"));
        assert!(d.has_dynamic_argument());
        assert!(d.has_modifier("stop"));

        let d = Directive::parse("#default").unwrap();
        assert_eq!((d.name, d.argument), ("slot", Some("default")));

        assert!(Directive::parse("class").is_none());
        assert!(Directive::parse("v-").is_none());
    }

    #[test]
    fn test_values() {
        assert_eq!(unquote("\"foo\""), "foo");
        assert_eq!(unquote("'foo'"), "foo");
        assert_eq!(unquote("foo"), "foo");
        assert!(is_empty_value(None));
        assert!(is_empty_value(Some("\"  \"")));
        assert!(!is_empty_value(Some("\"a\"")));
        assert_eq!(unquoted_offset("\"a\""), 1);
        assert_eq!(unquoted_offset("a"), 0);
    }

    #[test]
    fn test_v_for() {
        let v = VFor::parse("(item, index) in items").unwrap();
        assert_eq!(v.aliases, vec!["item", "index"]);
        assert_eq!(v.iterable, "items");
        assert!(v.iterable_is_identifier());

        let v = VFor::parse("({x,y,z},i) of list()").unwrap();
        assert_eq!(v.aliases, vec!["x", "y", "z", "i"]);
        assert_eq!(v.iterable, "list()");
        assert!(!v.iterable_is_identifier());

        assert!(VFor::parse("items").is_none());
    }

    #[test]
    fn test_identifiers() {
        let ids: Vec<_> = identifiers("user.isActive && 'x y' !== $foo[bar]").collect();
        assert_eq!(ids, vec!["user", "$foo", "bar"]);
    }
}
