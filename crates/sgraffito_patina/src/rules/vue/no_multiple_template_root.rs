//! vue/no-multiple-template-root
//!
//! Disallow adding multiple root nodes to the template.
//!
//! The root element must be a real element: not `template`, not `slot`,
//! not repeated through `v-for`, and not plain text.
//!
//! ## Examples
//!
//! ### Invalid
//! ```pug
//! | {{ a b c }}
//! div(v-for="x in list")
//! slot
//! ```
//!
//! ### Valid
//! ```pug
//! div(v-if="foo") abc
//! div(v-else) abc
//! ```

use crate::context::LintContext;
use crate::diagnostic::Severity;
use crate::directive::Directive;
use crate::reconcile::ReconciledToken;
use crate::rule::{Rule, RuleCategory, RuleMeta, TokenCursor};
use crate::tree::ElementKind;

static META: RuleMeta = RuleMeta {
    name: "vue/no-multiple-template-root",
    description: "Disallow adding multiple root nodes to the template",
    category: RuleCategory::Essential,
    fixable: false,
    default_severity: Severity::Error,
    messages: &[
        (
            "disallowTemplate",
            "The template root disallows 'template' elements.",
        ),
        ("disallowSlot", "The template root disallows 'slot' elements."),
        (
            "requireElement",
            "The template root requires an element rather than texts.",
        ),
        (
            "disallowVFor",
            "The template root disallows 'v-for' directives.",
        ),
    ],
};

/// Disallow adding multiple root nodes to the template
pub struct NoMultipleTemplateRoot;

impl Rule for NoMultipleTemplateRoot {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check_tag(&self, ctx: &mut LintContext, token: &ReconciledToken, cursor: &TokenCursor) {
        let Some((_, element)) = cursor.element() else {
            return;
        };
        if element.parent.is_some() || element.kind != ElementKind::Tag {
            return;
        }
        let id = match element.name.as_str() {
            "template" => "disallowTemplate",
            "slot" => "disallowSlot",
            _ => return,
        };
        ctx.report_message(id, &[], token.start, token.end);
    }

    fn check_attribute(&self, ctx: &mut LintContext, token: &ReconciledToken, cursor: &TokenCursor) {
        let Some((raw, _)) = token.as_attribute() else {
            return;
        };
        if !Directive::parse(raw).is_some_and(|d| d.is("for")) {
            return;
        }
        if cursor.owner().is_some_and(|(_, element)| element.parent.is_none()) {
            let (start, end) = token.name_range().unwrap_or((token.start, token.end));
            ctx.report_message("disallowVFor", &[], start, end);
        }
    }

    fn check_text(&self, ctx: &mut LintContext, token: &ReconciledToken, cursor: &TokenCursor) {
        if cursor.owner().is_some() {
            return;
        }
        // Blank lines between roots are not content.
        if token.token.text().map_or(true, |text| text.trim().is_empty()) {
            return;
        }
        ctx.report_message("requireElement", &[], token.start, token.end);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linter::Linter;
    use crate::rule::RuleRegistry;

    fn messages(template: &str) -> Vec<String> {
        let mut registry = RuleRegistry::new();
        registry.register(Box::new(NoMultipleTemplateRoot));
        let source = format!("<template lang=\"pug\">{template}</template>");
        Linter::with_registry(registry)
            .lint_sfc(&source, "test.vue")
            .diagnostics
            .iter()
            .map(|d| d.message.to_string())
            .collect()
    }

    const TEXT: &str = "The template root requires an element rather than texts.";

    #[test]
    fn test_valid_single_root() {
        for template in [
            "div abc",
            "\ndiv abc\n",
            "\n//- comment\ndiv abc\n",
            "\n//- comment\ndiv(v-if=\"foo\") abc\ndiv(v-else-if=\"bar\") abc\ndiv(v-else) abc\n",
            "\nc1(v-if=\"1\")\nc2(v-else-if=\"1\")\nc3(v-else)\n",
            "\ndiv(v-if=\"foo\")\n",
            "\nLink(:to=\"to\" class=\"flex items-center\")\n  span(v-if=\"prefixIcon || $slots.prefix\" class=\"mr-1\")\n    slot(name=\"prefix\")\n      FontAwesomeIcon(v-if=\"prefixIcon\" :icon=\"prefixIcon\" fixedWidth)\n  slot\n",
            "\nul\n  li(v-for=\"x in list\" :key=\"x\")\n",
        ] {
            assert!(messages(template).is_empty(), "{template}: {:?}", messages(template));
        }
    }

    #[test]
    fn test_invalid_root_text() {
        assert_eq!(messages("\n| {{a b c}}\n"), vec![TEXT]);
        assert_eq!(messages("\ndiv\n| aaaaaa\n"), vec![TEXT]);
        assert_eq!(messages("\n| aaaaaa\ndiv\n"), vec![TEXT]);
    }

    #[test]
    fn test_invalid_root_v_for() {
        assert_eq!(
            messages("\ndiv(v-for=\"x in list\")\n"),
            vec!["The template root disallows 'v-for' directives."]
        );
    }

    #[test]
    fn test_invalid_root_template_and_slot() {
        assert_eq!(messages("slot"), vec!["The template root disallows 'slot' elements."]);
        assert_eq!(
            messages("template"),
            vec!["The template root disallows 'template' elements."]
        );
    }

    #[test]
    fn test_range_is_tag_name() {
        let mut registry = RuleRegistry::new();
        registry.register(Box::new(NoMultipleTemplateRoot));
        let result = Linter::with_registry(registry).lint_template("div\nslot(name=\"a\")", "test.vue");
        assert_eq!(result.error_count, 1);
        assert_eq!((result.diagnostics[0].start, result.diagnostics[0].end), (4, 8));
        assert_eq!((result.diagnostics[0].loc.line, result.diagnostics[0].loc.column), (2, 0));
    }
}
