//! vue/valid-v-if
//!
//! Enforce valid `v-if` directives.
//!
//! ## Examples
//!
//! ### Invalid
//! ```pug
//! div(v-if)
//! div(v-if:aaa="foo")
//! div(v-if="foo" v-else)
//! ```
//!
//! ### Valid
//! ```pug
//! div(v-if="foo")
//! ```

use crate::context::LintContext;
use crate::diagnostic::Severity;
use crate::directive::{is_empty_value, Directive};
use crate::reconcile::ReconciledToken;
use crate::rule::{Rule, RuleCategory, RuleMeta, TokenCursor};

static META: RuleMeta = RuleMeta {
    name: "vue/valid-v-if",
    description: "Enforce valid `v-if` directives",
    category: RuleCategory::Essential,
    fixable: false,
    default_severity: Severity::Error,
    messages: &[
        (
            "withVElse",
            "'v-if' and 'v-else' directives can't exist on the same element. You may want 'v-else-if' directives.",
        ),
        (
            "withVElseIf",
            "'v-if' and 'v-else-if' directives can't exist on the same element.",
        ),
        ("unexpectedArgument", "'v-if' directives require no argument."),
        ("unexpectedModifier", "'v-if' directives require no modifier."),
        ("expectedValue", "'v-if' directives require that attribute value."),
    ],
};

/// Enforce valid v-if directives
pub struct ValidVIf;

impl Rule for ValidVIf {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check_attribute(&self, ctx: &mut LintContext, token: &ReconciledToken, cursor: &TokenCursor) {
        let Some((raw, value)) = token.as_attribute() else {
            return;
        };
        let Some(directive) = Directive::parse(raw).filter(|d| d.is("if")) else {
            return;
        };
        let Some((_, element)) = cursor.owner() else {
            return;
        };

        let message_id = if cursor.has_directive(element, "else") {
            "withVElse"
        } else if cursor.has_directive(element, "else-if") {
            "withVElseIf"
        } else if directive.argument.is_some() {
            "unexpectedArgument"
        } else if !directive.modifiers.is_empty() {
            "unexpectedModifier"
        } else if is_empty_value(value) {
            "expectedValue"
        } else {
            return;
        };

        let (start, end) = token.name_range().unwrap_or((token.start, token.end));
        ctx.report_message(message_id, &[], start, end);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linter::Linter;
    use crate::rule::RuleRegistry;

    fn message_ids(source: &str) -> Vec<&'static str> {
        let mut registry = RuleRegistry::new();
        registry.register(Box::new(ValidVIf));
        Linter::with_registry(registry)
            .lint_template(source, "test.vue")
            .diagnostics
            .iter()
            .filter_map(|d| d.message_id)
            .collect()
    }

    #[test]
    fn test_valid_v_if() {
        assert!(message_ids("div\n  div(v-if=\"foo\")").is_empty());
        assert!(message_ids("div\n  div(v-if=\"foo\")\n  div(v-else-if=\"bar\")\n  div(v-else)")
            .is_empty());
    }

    #[test]
    fn test_invalid_v_if() {
        assert_eq!(message_ids("div(v-if=\"foo\" v-else)"), vec!["withVElse"]);
        assert_eq!(
            message_ids("div(v-if=\"foo\" v-else-if=\"bar\")"),
            vec!["withVElseIf"]
        );
        assert_eq!(message_ids("div(v-if:aaa=\"foo\")"), vec!["unexpectedArgument"]);
        assert_eq!(message_ids("div(v-if.aaa=\"foo\")"), vec!["unexpectedModifier"]);
        assert_eq!(message_ids("div(v-if)"), vec!["expectedValue"]);
        assert_eq!(message_ids("div(v-if=\"\")"), vec!["expectedValue"]);
    }
}
