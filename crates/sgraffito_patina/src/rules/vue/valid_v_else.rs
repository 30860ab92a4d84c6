//! vue/valid-v-else
//!
//! Enforce valid `v-else` directives.
//!
//! `v-else` must:
//! - Be on an element following a `v-if` or `v-else-if` sibling
//! - Not be used with `v-if` or `v-else-if` on the same element
//! - Have no argument, modifier or value
//!
//! ## Examples
//!
//! ### Invalid
//! ```pug
//! div
//!   div(v-else)
//!   div(v-if="foo")
//!   div(v-else v-if="bar")
//!   div(v-else="foo")
//! ```
//!
//! ### Valid
//! ```pug
//! div
//!   div(v-if="foo")
//!   div(v-else)
//! ```

use crate::context::LintContext;
use crate::diagnostic::Severity;
use crate::directive::Directive;
use crate::reconcile::ReconciledToken;
use crate::rule::{Rule, RuleCategory, RuleMeta, TokenCursor};

static META: RuleMeta = RuleMeta {
    name: "vue/valid-v-else",
    description: "Enforce valid `v-else` directives",
    category: RuleCategory::Essential,
    fixable: false,
    default_severity: Severity::Error,
    messages: &[
        (
            "missingVIf",
            "'v-else' directives require being preceded by the element which has a 'v-if' or 'v-else-if' directive.",
        ),
        (
            "withVIf",
            "'v-else' and 'v-if' directives can't exist on the same element. You may want 'v-else-if' directives.",
        ),
        (
            "withVElseIf",
            "'v-else' and 'v-else-if' directives can't exist on the same element.",
        ),
        ("unexpectedArgument", "'v-else' directives require no argument."),
        ("unexpectedModifier", "'v-else' directives require no modifier."),
        ("unexpectedValue", "'v-else' directives require no attribute value."),
    ],
};

/// Enforce valid v-else directives
pub struct ValidVElse;

impl Rule for ValidVElse {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check_attribute(&self, ctx: &mut LintContext, token: &ReconciledToken, cursor: &TokenCursor) {
        let Some((raw, value)) = token.as_attribute() else {
            return;
        };
        let Some(directive) = Directive::parse(raw).filter(|d| d.is("else")) else {
            return;
        };
        let Some((_, element)) = cursor.owner() else {
            return;
        };

        // One message per token, first match wins.
        let message_id = if ctx.trackers().chain_before().is_none() {
            "missingVIf"
        } else if cursor.has_directive(element, "if") {
            "withVIf"
        } else if cursor.has_directive(element, "else-if") {
            "withVElseIf"
        } else if directive.argument.is_some() {
            "unexpectedArgument"
        } else if !directive.modifiers.is_empty() {
            "unexpectedModifier"
        } else if value.is_some() {
            "unexpectedValue"
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

    fn create_linter() -> Linter {
        let mut registry = RuleRegistry::new();
        registry.register(Box::new(ValidVElse));
        Linter::with_registry(registry)
    }

    fn message_ids(source: &str) -> Vec<&'static str> {
        create_linter()
            .lint_template(source, "test.vue")
            .diagnostics
            .iter()
            .filter_map(|d| d.message_id)
            .collect()
    }

    #[test]
    fn test_valid_v_else() {
        assert!(message_ids("div\n  div(v-if=\"foo\")\n  div(v-else)").is_empty());
        assert!(message_ids("c1(v-if=\"1\")\nc2(v-else-if=\"1\")\nc3(v-else)").is_empty());
        assert!(message_ids("div\n  div(v-if=\"foo\")\n  slot").is_empty());
    }

    #[test]
    fn test_valid_v_else_after_nested_children() {
        let source = "div\n  div(v-if=\"foo\")\n    span\n      em\n  div(v-else)";
        assert!(message_ids(source).is_empty());
    }

    #[test]
    fn test_invalid_missing_v_if() {
        assert_eq!(message_ids("template(v-else)\n  div"), vec!["missingVIf"]);
        assert_eq!(message_ids("div(v-else)"), vec!["missingVIf"]);
        assert_eq!(message_ids("div\n  div(v-else)"), vec!["missingVIf"]);
        assert_eq!(message_ids("div\n  div\n  div(v-else)"), vec!["missingVIf"]);
        assert_eq!(message_ids("div\n  div(if=\"foo\")\n  div(v-else)"), vec!["missingVIf"]);
        assert_eq!(
            message_ids("div\n  div(v-if=\"foo\")\n  div\n  div(v-else)"),
            vec!["missingVIf"]
        );
    }

    #[test]
    fn test_invalid_chain_does_not_cross_levels() {
        assert_eq!(
            message_ids("div\n  div(v-if=\"foo\")\ndiv(v-else)"),
            vec!["missingVIf"]
        );
        assert_eq!(
            message_ids("div(v-if=\"foo\")\n  div(v-else)"),
            vec!["missingVIf"]
        );
    }

    #[test]
    fn test_invalid_with_v_if() {
        let result = create_linter().lint_template(
            "div\n  div(v-if=\"foo\")\n  div(v-else v-if=\"bar\")",
            "test.vue",
        );
        assert_eq!(result.error_count, 1);
        assert_eq!(
            result.diagnostics[0].message,
            "'v-else' and 'v-if' directives can't exist on the same element. You may want 'v-else-if' directives."
        );
        assert_eq!(result.diagnostics[0].loc.line, 3);
        assert_eq!(result.diagnostics[0].loc.column, 6);
        assert_eq!(result.diagnostics[0].loc.end_column, 12);
    }

    #[test]
    fn test_invalid_shapes() {
        let prefix = "div\n  div(v-if=\"foo\")\n  ";
        assert_eq!(
            message_ids(&format!("{prefix}div(v-else v-else-if=\"foo\")")),
            vec!["withVElseIf"]
        );
        assert_eq!(message_ids(&format!("{prefix}div(v-else:aaa)")), vec!["unexpectedArgument"]);
        assert_eq!(message_ids(&format!("{prefix}div(v-else.aaa)")), vec!["unexpectedModifier"]);
        assert_eq!(message_ids(&format!("{prefix}div(v-else=\"foo\")")), vec!["unexpectedValue"]);
    }

    #[test]
    fn test_invalid_any_value() {
        for value in ["\".\"", "\"/**/\"", "\"\""] {
            let source = format!("div(v-if=\"foo\")\ndiv(v-else={value})");
            assert_eq!(message_ids(&source), vec!["unexpectedValue"], "{source}");
        }
    }
}
