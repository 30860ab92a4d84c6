//! vue/require-component-is
//!
//! Require `v-bind:is` of `<component>` elements.
//!
//! ## Examples
//!
//! ### Invalid
//! ```pug
//! component(is="type")
//! ```
//!
//! ### Valid
//! ```pug
//! component(:is="type")
//! ```

use crate::context::LintContext;
use crate::diagnostic::Severity;
use crate::reconcile::ReconciledToken;
use crate::rule::{Rule, RuleCategory, RuleMeta, TokenCursor};
use crate::tree::ElementKind;

static META: RuleMeta = RuleMeta {
    name: "vue/require-component-is",
    description: "Require `v-bind:is` of `<component>` elements",
    category: RuleCategory::Essential,
    fixable: false,
    default_severity: Severity::Error,
    messages: &[(
        "requireComponentIs",
        "Expected 'component' elements to have 'v-bind:is' attribute.",
    )],
};

/// Require v-bind:is of component elements
pub struct RequireComponentIs;

impl Rule for RequireComponentIs {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check_tag(&self, ctx: &mut LintContext, token: &ReconciledToken, cursor: &TokenCursor) {
        let Some((_, element)) = cursor.element() else {
            return;
        };
        if element.kind != ElementKind::Tag || element.name != "component" {
            return;
        }
        if cursor.find_attribute(element, &[":is", "v-bind:is"]).is_some() {
            return;
        }
        ctx.report_message("requireComponentIs", &[], token.start, token.end);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linter::Linter;
    use crate::rule::RuleRegistry;

    fn count(template: &str) -> usize {
        let mut registry = RuleRegistry::new();
        registry.register(Box::new(RequireComponentIs));
        let source = format!("<template lang=\"pug\">{template}</template>");
        Linter::with_registry(registry)
            .lint_sfc(&source, "test.vue")
            .error_count
    }

    #[test]
    fn test_valid_bound_is() {
        assert_eq!(count("component(v-bind:is=\"type\")"), 0);
        assert_eq!(count("component(:is=\"type\")"), 0);
        assert_eq!(count("div(is=\"type\")"), 0);
    }

    #[test]
    fn test_invalid_missing_bound_is() {
        assert_eq!(count("component(is=\"type\")"), 1);
        assert_eq!(count("component(v-foo:is=\"type\")"), 1);
        assert_eq!(count("div\n  component"), 1);
    }

    #[test]
    fn test_reported_at_tag_name() {
        let mut registry = RuleRegistry::new();
        registry.register(Box::new(RequireComponentIs));
        let result = Linter::with_registry(registry).lint_template("div\n  component", "test.vue");
        assert_eq!(
            result.diagnostics[0].message,
            "Expected 'component' elements to have 'v-bind:is' attribute."
        );
        assert_eq!(result.diagnostics[0].start, 6);
        assert_eq!(result.diagnostics[0].end, 15);
    }
}
