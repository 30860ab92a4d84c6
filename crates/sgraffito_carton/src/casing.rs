//! Casing checkers and converters.
//!
//! The rules follow eslint-plugin-vue's `casing` utilities so that names
//! accepted or rewritten here match what users of the HTML-template rules
//! already expect.

use std::fmt;

/// Symbols that disqualify a name from every casing (space, `$`, `-` and `_`
/// are judged separately by each checker).
#[inline]
fn is_symbol(c: char) -> bool {
    matches!(
        c,
        '!' | '"'
            | '#'
            | '%'
            | '&'
            | '\''
            | '('
            | ')'
            | '*'
            | '+'
            | ','
            | '.'
            | '/'
            | ':'
            | ';'
            | '<'
            | '='
            | '>'
            | '?'
            | '@'
            | '['
            | '\\'
            | ']'
            | '^'
            | '`'
            | '{'
            | '|'
            | '}'
    )
}

#[inline]
fn has_symbols(s: &str) -> bool {
    s.chars().any(is_symbol)
}

#[inline]
fn has_upper(s: &str) -> bool {
    s.chars().any(|c| c.is_ascii_uppercase())
}

#[inline]
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Upper-case the first character.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Insert `sep` before every upper-case ASCII letter that directly follows a
/// word character.
fn split_humps(s: &str, sep: char) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    let mut prev: Option<char> = None;
    for c in s.chars() {
        if c.is_ascii_uppercase() && prev.is_some_and(is_word_char) {
            out.push(sep);
        }
        out.push(c);
        prev = Some(c);
    }
    out
}

/// Convert text to kebab-case.
pub fn kebab_case(s: &str) -> String {
    split_humps(&s.replace('_', "-"), '-').to_lowercase()
}

/// Checks whether the given string is kebab-case.
pub fn is_kebab_case(s: &str) -> bool {
    !(has_upper(s)
        || has_symbols(s)
        || s.starts_with('-')
        || s.contains('_')
        || s.contains("--")
        || s.chars().any(char::is_whitespace))
}

/// Convert text to snake_case.
pub fn snake_case(s: &str) -> String {
    split_humps(s, '_').replace('-', "_").to_lowercase()
}

/// Checks whether the given string is snake_case.
pub fn is_snake_case(s: &str) -> bool {
    !(has_upper(s)
        || has_symbols(s)
        || s.contains('-')
        || s.contains("__")
        || s.chars().any(char::is_whitespace))
}

/// Convert text to camelCase.
pub fn camel_case(s: &str) -> String {
    if is_pascal_case(s) {
        let mut chars = s.chars();
        return match chars.next() {
            Some(first) => first.to_lowercase().chain(chars).collect(),
            None => String::new(),
        };
    }

    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '-' || c == '_' {
            if let Some(&next) = chars.peek() {
                if is_word_char(next) {
                    out.extend(next.to_uppercase());
                    chars.next();
                    continue;
                }
            }
        }
        out.push(c);
    }
    out
}

/// Checks whether the given string is camelCase.
pub fn is_camel_case(s: &str) -> bool {
    !(has_symbols(s)
        || s.starts_with(|c: char| c.is_ascii_uppercase())
        || s.contains(['-', '_'])
        || s.chars().any(char::is_whitespace))
}

/// Convert text to PascalCase.
pub fn pascal_case(s: &str) -> String {
    capitalize(&camel_case(s))
}

/// Checks whether the given string is PascalCase.
pub fn is_pascal_case(s: &str) -> bool {
    !(has_symbols(s)
        || s.starts_with(|c: char| c.is_ascii_lowercase())
        || s.contains(['-', '_'])
        || s.chars().any(char::is_whitespace))
}

/// A naming convention a rule can enforce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseType {
    KebabCase,
    CamelCase,
    PascalCase,
    SnakeCase,
}

impl CaseType {
    /// Parse the option spelling used in rule configuration.
    pub fn from_option(name: &str) -> Option<Self> {
        match name {
            "kebab-case" => Some(Self::KebabCase),
            "camelCase" => Some(Self::CamelCase),
            "PascalCase" => Some(Self::PascalCase),
            "snake_case" => Some(Self::SnakeCase),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::KebabCase => "kebab-case",
            Self::CamelCase => "camelCase",
            Self::PascalCase => "PascalCase",
            Self::SnakeCase => "snake_case",
        }
    }

    pub fn check(self, s: &str) -> bool {
        match self {
            Self::KebabCase => is_kebab_case(s),
            Self::CamelCase => is_camel_case(s),
            Self::PascalCase => is_pascal_case(s),
            Self::SnakeCase => is_snake_case(s),
        }
    }

    pub fn convert(self, s: &str) -> String {
        match self {
            Self::KebabCase => kebab_case(s),
            Self::CamelCase => camel_case(s),
            Self::PascalCase => pascal_case(s),
            Self::SnakeCase => snake_case(s),
        }
    }

    /// Convert, but give back the input unchanged when the result still
    /// fails this case's checker.
    pub fn convert_exact(self, s: &str) -> String {
        let converted = self.convert(s);
        if self.check(&converted) {
            converted
        } else {
            s.to_string()
        }
    }
}

impl fmt::Display for CaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kebab_case() {
        assert_eq!(kebab_case("CoolComponent"), "cool-component");
        assert_eq!(kebab_case("fooBar"), "foo-bar");
        assert_eq!(kebab_case("foo_bar"), "foo-bar");
        assert_eq!(kebab_case("already-kebab"), "already-kebab");
        assert!(is_kebab_case("cool-component"));
        assert!(!is_kebab_case("Cool-component"));
        assert!(!is_kebab_case("-cool"));
        assert!(!is_kebab_case("cool--component"));
        assert!(!is_kebab_case("cool_component"));
    }

    #[test]
    fn test_camel_and_pascal() {
        assert_eq!(camel_case("cool-component"), "coolComponent");
        assert_eq!(camel_case("CoolComponent"), "coolComponent");
        assert_eq!(camel_case("foo_bar-baz"), "fooBarBaz");
        assert_eq!(pascal_case("cool-component"), "CoolComponent");
        assert_eq!(pascal_case("coolComponent"), "CoolComponent");
        assert!(is_camel_case("coolComponent"));
        assert!(!is_camel_case("CoolComponent"));
        assert!(is_pascal_case("CoolComponent"));
        assert!(!is_pascal_case("cool-component"));
        assert!(!is_pascal_case("Foo.Bar"));
    }

    #[test]
    fn test_snake_case() {
        assert_eq!(snake_case("fooBar-baz"), "foo_bar_baz");
        assert!(is_snake_case("foo_bar"));
        assert!(!is_snake_case("foo__bar"));
        assert!(!is_snake_case("foo-bar"));
    }

    #[test]
    fn test_exact_converter() {
        assert_eq!(
            CaseType::PascalCase.convert_exact("cool-component"),
            "CoolComponent"
        );
        // Symbols survive conversion, so the original is kept.
        assert_eq!(CaseType::PascalCase.convert_exact("foo.bar"), "foo.bar");
        // Idempotent on conforming names.
        assert_eq!(
            CaseType::KebabCase.convert_exact("cool-component"),
            "cool-component"
        );
    }

    #[test]
    fn test_case_type_options() {
        assert_eq!(
            CaseType::from_option("kebab-case"),
            Some(CaseType::KebabCase)
        );
        assert_eq!(CaseType::from_option("Train-Case"), None);
        assert_eq!(CaseType::PascalCase.to_string(), "PascalCase");
    }
}
