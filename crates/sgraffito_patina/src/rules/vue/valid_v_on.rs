//! vue/valid-v-on
//!
//! Enforce valid `v-on` directives.
//!
//! A `v-on` needs a handler unless it carries a verb modifier (`stop`,
//! `prevent`). Modifiers must be known event, key or mouse modifiers, or
//! listed in the `modifiers` option.
//!
//! ## Examples
//!
//! ### Invalid
//! ```pug
//! div(v-on:click.aaa="foo")
//! div(@click)
//! div(@click="const")
//! ```
//!
//! ### Valid
//! ```pug
//! div(@click.prevent.ctrl.left="foo")
//! div(@keydown.27="foo")
//! div(v-on:click.prevent)
//! div(v-on="$listeners")
//! ```

use serde::{Deserialize, Serialize};

use crate::context::LintContext;
use crate::diagnostic::Severity;
use crate::directive::{is_empty_value, unquote, Directive, JS_KEYWORDS};
use crate::reconcile::ReconciledToken;
use crate::rule::{Rule, RuleCategory, RuleMeta, TokenCursor};

static META: RuleMeta = RuleMeta {
    name: "vue/valid-v-on",
    description: "Enforce valid `v-on` directives",
    category: RuleCategory::Essential,
    fixable: false,
    default_severity: Severity::Error,
    messages: &[
        (
            "unsupportedModifier",
            "'v-on' directives don't support the modifier '{{modifier}}'.",
        ),
        (
            "avoidKeyword",
            "Avoid using JavaScript keyword as \"v-on\" value: {{value}}.",
        ),
        (
            "expectedValueOrVerb",
            "'v-on' directives require a value or verb modifier (like 'stop' or 'prevent').",
        ),
    ],
};

/// Modifiers that make a handler optional.
const VERB_MODIFIERS: &[&str] = &["stop", "prevent"];

const EVENT_MODIFIERS: &[&str] = &[
    "stop", "prevent", "capture", "self", "ctrl", "shift", "alt", "meta", "native", "once",
    "left", "right", "middle", "passive", "exact",
];

/// Kebab-cased `KeyboardEvent.key` aliases.
const KEY_MODIFIERS: &[&str] = &[
    "esc", "escape", "tab", "enter", "space", "up", "down", "left", "right", "delete",
    "backspace", "insert", "home", "end", "page-up", "page-down", "arrow-up", "arrow-down",
    "arrow-left", "arrow-right", "caps-lock", "num-lock", "scroll-lock", "context-menu",
    "f1", "f2", "f3", "f4", "f5", "f6", "f7", "f8", "f9", "f10", "f11", "f12",
];

/// Enforce valid v-on directives
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidVOn {
    /// Extra modifiers to accept, e.g. from a plugin
    pub modifiers: Vec<String>,
}

impl ValidVOn {
    fn is_valid_modifier(&self, modifier: &str) -> bool {
        EVENT_MODIFIERS.contains(&modifier)
            || KEY_MODIFIERS.contains(&modifier)
            || self.modifiers.iter().any(|m| m == modifier)
            // key codes and single characters
            || (!modifier.is_empty() && modifier.bytes().all(|b| b.is_ascii_digit()))
            || (modifier.len() == 1 && modifier.bytes().all(|b| b.is_ascii_alphanumeric()))
    }
}

impl Rule for ValidVOn {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn options(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }

    fn check_attribute(&self, ctx: &mut LintContext, token: &ReconciledToken, _cursor: &TokenCursor) {
        let Some((raw, value)) = token.as_attribute() else {
            return;
        };
        let Some(directive) = Directive::parse(raw).filter(|d| d.is("on")) else {
            return;
        };
        let (start, end) = token.name_range().unwrap_or((token.start, token.end));

        let has_verb = directive.modifiers.iter().any(|m| VERB_MODIFIERS.contains(m));
        if is_empty_value(value) && !has_verb {
            ctx.report_message("expectedValueOrVerb", &[], start, end);
            return;
        }

        let handler = value.map(|v| unquote(v).trim()).unwrap_or_default();
        if directive.argument.is_some() && JS_KEYWORDS.contains(&handler) {
            let quoted = format!("\"{handler}\"");
            ctx.report_message("avoidKeyword", &[("value", quoted.as_str())], start, end);
            return;
        }

        for modifier in &directive.modifiers {
            if !self.is_valid_modifier(modifier) {
                ctx.report_message("unsupportedModifier", &[("modifier", *modifier)], start, end);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linter::Linter;
    use crate::rule::RuleRegistry;

    fn messages_with(rule: ValidVOn, source: &str) -> Vec<String> {
        let mut registry = RuleRegistry::new();
        registry.register(Box::new(rule));
        Linter::with_registry(registry)
            .lint_template(source, "test.vue")
            .diagnostics
            .iter()
            .map(|d| d.message.to_string())
            .collect()
    }

    fn messages(source: &str) -> Vec<String> {
        messages_with(ValidVOn::default(), source)
    }

    const EXPECTED_VALUE: &str =
        "'v-on' directives require a value or verb modifier (like 'stop' or 'prevent').";

    #[test]
    fn test_valid_v_on() {
        for source in [
            "div(v-on:click=\"foo\")",
            "div(@click=\"foo\")",
            "div(@click.prevent.ctrl.left=\"foo\")",
            "div(@keydown.27=\"foo\")",
            "div(@keydown.enter=\"foo\")",
            "div(@keydown.arrow-down=\"foo\")",
            "div(@keydown.esc=\"foo\")",
            "div(@keydown.a.b.c=\"foo\")",
            "el-from(@submit.native.prevent)",
            "div(v-on:click.prevent)",
            "div(v-on:click.native.stop)",
            "div(v-on=\"$listeners\")",
            "div(v-on=\"{a, b, c: d}\")",
            "MyComponent(v-on:keydown=\"/**/\")",
            "MyComponent(v-on:keydown.stop=\"\")",
        ] {
            assert!(messages(source).is_empty(), "{source}: {:?}", messages(source));
        }
    }

    #[test]
    fn test_valid_custom_modifiers() {
        let rule = ValidVOn {
            modifiers: vec!["bar".into(), "aaa".into()],
        };
        assert!(messages_with(rule, "div(v-on:keydown.bar.aaa=\"foo\")").is_empty());
    }

    #[test]
    fn test_invalid_modifier() {
        assert_eq!(
            messages("div(v-on:click.aaa=\"foo\")"),
            vec!["'v-on' directives don't support the modifier 'aaa'."]
        );
        let rule = ValidVOn {
            modifiers: vec!["bar".into()],
        };
        assert_eq!(
            messages_with(rule, "div(@keydown.bar.aaa=\"foo\")"),
            vec!["'v-on' directives don't support the modifier 'aaa'."]
        );
    }

    #[test]
    fn test_invalid_missing_value() {
        assert_eq!(messages("div(v-on:click)"), vec![EXPECTED_VALUE]);
        assert_eq!(messages("div(@click)"), vec![EXPECTED_VALUE]);
        assert_eq!(messages("MyComponent(v-on:keydown=\"\")"), vec![EXPECTED_VALUE]);
    }

    #[test]
    fn test_invalid_keyword() {
        assert_eq!(
            messages("div(@click=\"const\")"),
            vec!["Avoid using JavaScript keyword as \"v-on\" value: \"const\"."]
        );
        assert_eq!(
            messages("div(@click=\"delete\")"),
            vec!["Avoid using JavaScript keyword as \"v-on\" value: \"delete\"."]
        );
    }

    #[test]
    fn test_options_round_trip_through_serde() {
        let rule: ValidVOn = serde_json::from_str(r#"{"modifiers":["bar"]}"#).unwrap();
        assert_eq!(rule.modifiers, vec!["bar"]);
        assert_eq!(rule.options()["modifiers"][0], "bar");
    }
}
