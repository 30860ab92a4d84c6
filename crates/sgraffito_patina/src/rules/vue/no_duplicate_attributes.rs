//! vue/no-duplicate-attributes
//!
//! Disallow duplication of attributes.
//!
//! `v-bind:foo`/`:foo` counts as `foo`. Event bindings are never compared.
//! With the default options, `class` and `style` may appear once statically
//! and once bound.
//!
//! ## Examples
//!
//! ### Invalid
//! ```pug
//! div(foo, foo)
//! div(foo, v-bind:foo)
//! div(class, class)
//! ```
//!
//! ### Valid
//! ```pug
//! div(foo, :bar, baz)
//! div(class="a", :class="b")
//! div(@click="foo", @click="bar")
//! ```

use serde::{Deserialize, Serialize};

use crate::context::LintContext;
use crate::diagnostic::Severity;
use crate::reconcile::ReconciledToken;
use crate::rule::{Rule, RuleCategory, RuleMeta, TokenCursor};

static META: RuleMeta = RuleMeta {
    name: "vue/no-duplicate-attributes",
    description: "Disallow duplication of attributes",
    category: RuleCategory::Essential,
    fixable: false,
    default_severity: Severity::Error,
    messages: &[("duplicateAttribute", "Duplicate attribute '{{name}}'.")],
};

/// Disallow duplicate attributes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NoDuplicateAttributes {
    /// Allow `class` and `:class` to coexist
    pub allow_coexist_class: bool,
    /// Allow `style` and `:style` to coexist
    pub allow_coexist_style: bool,
}

impl Default for NoDuplicateAttributes {
    fn default() -> Self {
        Self {
            allow_coexist_class: true,
            allow_coexist_style: true,
        }
    }
}

/// Attribute name with the bind prefix stripped, and whether it was bound.
/// Event bindings have no key.
fn attribute_key(raw: &str) -> Option<(&str, bool)> {
    if raw.starts_with('@') || raw.starts_with("v-on:") {
        return None;
    }
    match raw.strip_prefix("v-bind:").or_else(|| raw.strip_prefix(':')) {
        Some(name) => Some((name, true)),
        None => Some((raw, false)),
    }
}

impl NoDuplicateAttributes {
    fn allows_coexistence(&self, name: &str) -> bool {
        (self.allow_coexist_class && name.eq_ignore_ascii_case("class"))
            || (self.allow_coexist_style && name.eq_ignore_ascii_case("style"))
    }
}

impl Rule for NoDuplicateAttributes {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn options(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }

    fn check_attribute(&self, ctx: &mut LintContext, token: &ReconciledToken, cursor: &TokenCursor) {
        let Some((raw, _)) = token.as_attribute() else {
            return;
        };
        let Some((name, bound)) = attribute_key(raw) else {
            return;
        };

        let duplicate = ctx
            .trackers()
            .attributes()
            .tokens()
            .iter()
            .filter(|&&index| index < cursor.index)
            .filter_map(|&index| cursor.get(index)?.as_attribute())
            .filter_map(|(earlier, _)| attribute_key(earlier))
            .any(|(earlier, earlier_bound)| {
                earlier == name && !(self.allows_coexistence(name) && earlier_bound != bound)
            });
        if !duplicate {
            return;
        }

        let (start, end) = token.name_range().unwrap_or((token.start, token.end));
        ctx.report_message("duplicateAttribute", &[("name", name)], start, end);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linter::Linter;
    use crate::rule::RuleRegistry;

    fn create_linter() -> Linter {
        let mut registry = RuleRegistry::new();
        registry.register(Box::new(NoDuplicateAttributes::default()));
        Linter::with_registry(registry)
    }

    fn create_strict_linter() -> Linter {
        let mut registry = RuleRegistry::new();
        registry.register(Box::new(NoDuplicateAttributes {
            allow_coexist_class: false,
            allow_coexist_style: false,
        }));
        Linter::with_registry(registry)
    }

    #[test]
    fn test_valid_unique_attributes() {
        let linter = create_linter();
        let result = linter.lint_template("div: div(foo, :bar, baz)", "test.vue");
        assert_eq!(result.error_count, 0);
    }

    #[test]
    fn test_valid_event_bindings_and_dynamic_arguments() {
        let linter = create_linter();
        let result = linter.lint_template("div: div(@click=\"foo\" @click=\"bar\")", "test.vue");
        assert_eq!(result.error_count, 0);
        let result = linter.lint_template("my-component(foo :[foo])", "test.vue");
        assert_eq!(result.error_count, 0);
    }

    #[test]
    fn test_valid_class_and_style_coexist() {
        let linter = create_linter();
        for source in [
            "div: div(style :style)",
            "div: div(class :class)",
            "div: div(:class=\"a\" class=\"b\")",
        ] {
            let result = linter.lint_template(source, "test.vue");
            assert_eq!(result.error_count, 0, "{source}");
        }
    }

    #[test]
    fn test_invalid_bound_duplicate() {
        let linter = create_linter();
        let source = "div: div(foo, v-bind:foo)";
        let result = linter.lint_template(source, "test.vue");
        assert_eq!(result.error_count, 1);
        let diagnostic = &result.diagnostics[0];
        assert_eq!(diagnostic.message, "Duplicate attribute 'foo'.");
        assert_eq!(&source[diagnostic.start as usize..diagnostic.end as usize], "v-bind:foo");
        assert_eq!(diagnostic.loc.column, 14);
    }

    #[test]
    fn test_invalid_plain_duplicates() {
        let linter = create_linter();
        let result = linter.lint_template("div: div(foo foo)", "test.vue");
        assert_eq!(result.error_count, 1);
        let result = linter.lint_template("div: div(foo :foo)", "test.vue");
        assert_eq!(result.error_count, 1);
        let result = linter.lint_template("div(class=\"a\" class=\"b\")", "test.vue");
        assert_eq!(result.error_count, 1);
    }

    #[test]
    fn test_invalid_coexistence_disallowed() {
        let linter = create_strict_linter();
        let result = linter.lint_template("div: div(style :style)", "test.vue");
        assert_eq!(result.error_count, 1);
        assert_eq!(result.diagnostics[0].message, "Duplicate attribute 'style'.");
        let result = linter.lint_template("div: div(:class class)", "test.vue");
        assert_eq!(result.error_count, 1);
        assert_eq!(result.diagnostics[0].message, "Duplicate attribute 'class'.");
    }

    #[test]
    fn test_separate_attribute_blocks_are_separate_scopes() {
        let linter = create_linter();
        let result = linter.lint_template("div(foo)\ndiv(foo)", "test.vue");
        assert_eq!(result.error_count, 0);
    }
}
