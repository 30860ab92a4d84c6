//! Name patterns for `ignore`/`ignores` rule options.
//!
//! A plain string matches a name exactly. A string written as `/source/flags`
//! is compiled as a regular expression; the `i`, `m`, `s` and `x` flags are
//! honoured, `g`, `u` and `y` are accepted and have no effect on matching.

use regex::{Regex, RegexBuilder};

/// A literal name or a `/regex/` pattern.
#[derive(Debug, Clone)]
pub enum NamePattern {
    Literal(String),
    Regex(Regex),
}

impl NamePattern {
    pub fn parse(pattern: &str) -> Result<Self, regex::Error> {
        match split_regex_literal(pattern) {
            Some((source, flags)) => {
                let mut builder = RegexBuilder::new(source);
                for flag in flags.chars() {
                    match flag {
                        'i' => {
                            builder.case_insensitive(true);
                        }
                        'm' => {
                            builder.multi_line(true);
                        }
                        's' => {
                            builder.dot_matches_new_line(true);
                        }
                        'x' => {
                            builder.ignore_whitespace(true);
                        }
                        _ => {}
                    }
                }
                Ok(Self::Regex(builder.build()?))
            }
            None => Ok(Self::Literal(pattern.to_string())),
        }
    }

    pub fn is_match(&self, name: &str) -> bool {
        match self {
            Self::Literal(literal) => literal == name,
            Self::Regex(regex) => regex.is_match(name),
        }
    }
}

/// Whether the string is written as a `/source/flags` literal.
pub fn is_regex_literal(pattern: &str) -> bool {
    split_regex_literal(pattern).is_some()
}

fn split_regex_literal(pattern: &str) -> Option<(&str, &str)> {
    let rest = pattern.strip_prefix('/')?;
    let close = rest.rfind('/')?;
    let (source, flags) = (&rest[..close], &rest[close + 1..]);
    (!source.is_empty()).then_some((source, flags))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_pattern() {
        let pattern = NamePattern::parse("custom-element").unwrap();
        assert!(pattern.is_match("custom-element"));
        assert!(!pattern.is_match("custom-element-2"));
        assert!(!is_regex_literal("custom-element"));
    }

    #[test]
    fn test_regex_pattern() {
        let pattern = NamePattern::parse("/^global-/").unwrap();
        assert!(pattern.is_match("global-header"));
        assert!(!pattern.is_match("app-global-header"));

        let insensitive = NamePattern::parse("/^el-/i").unwrap();
        assert!(insensitive.is_match("EL-button"));
    }

    #[test]
    fn test_invalid_regex() {
        assert!(NamePattern::parse("/(/").is_err());
        // A lone slash pair is not a regex literal.
        assert!(matches!(
            NamePattern::parse("//").unwrap(),
            NamePattern::Literal(_)
        ));
    }
}
