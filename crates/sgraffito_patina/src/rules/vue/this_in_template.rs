//! vue/this-in-template
//!
//! Disallow usage of `this` in template.
//!
//! Expressions in directive values and in `{{ }}` interpolations are
//! checked. Code lines and plain attribute values are not expressions of
//! the component and are left alone.
//!
//! ## Examples
//!
//! ### Invalid (default: never)
//! ```pug
//! div(v-if="this.visible") {{ this.message }}
//! ```
//!
//! ### Valid
//! ```pug
//! div(v-if="visible") {{ message }}
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::context::LintContext;
use crate::diagnostic::Severity;
use crate::directive::{identifiers, unquote, unquoted_offset, Directive};
use crate::reconcile::ReconciledToken;
use crate::rule::{Rule, RuleCategory, RuleMeta, TokenCursor};

static META: RuleMeta = RuleMeta {
    name: "vue/this-in-template",
    description: "Disallow usage of `this` in template",
    category: RuleCategory::Recommended,
    fixable: false,
    default_severity: Severity::Warning,
    messages: &[("unexpected", "Unexpected usage of 'this'.")],
};

static INTERPOLATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\{(.*?)\}\}").unwrap());

/// Whether `this` may be used in template expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThisInTemplateOption {
    /// Accept `this`; nothing is enforced
    Always,
    /// Report every member access through `this`
    #[default]
    Never,
}

/// Disallow usage of this in template
#[derive(Debug, Clone, Default, Serialize)]
pub struct ThisInTemplate {
    pub option: ThisInTemplateOption,
}

impl ThisInTemplate {
    /// Build from the configuration form `["always" | "never"]`.
    pub fn from_options(options: &[Value]) -> Result<Self, serde_json::Error> {
        let option = match options.first() {
            Some(value) => ThisInTemplateOption::deserialize(value)?,
            None => ThisInTemplateOption::default(),
        };
        Ok(Self { option })
    }
}

/// Offsets of `this` member accesses (`this.x`, `this[x]`) in an expression.
fn this_accesses(expression: &str) -> Vec<usize> {
    identifiers(expression)
        .filter(|id| *id == "this")
        .map(|id| id.as_ptr() as usize - expression.as_ptr() as usize)
        .filter(|&offset| {
            expression[offset + "this".len()..]
                .trim_start()
                .starts_with(['.', '['])
        })
        .collect()
}

impl ThisInTemplate {
    fn report_all(ctx: &mut LintContext, token: &ReconciledToken, base: u32, offsets: &[usize]) {
        for &offset in offsets {
            let start = (base + offset as u32).min(token.end);
            let end = (start + "this".len() as u32).min(token.end);
            ctx.report_message("unexpected", &[], start, end);
        }
    }
}

impl Rule for ThisInTemplate {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn options(&self) -> Value {
        serde_json::to_value(self).unwrap_or_default()
    }

    fn check_attribute(&self, ctx: &mut LintContext, token: &ReconciledToken, _cursor: &TokenCursor) {
        if self.option == ThisInTemplateOption::Always {
            return;
        }
        let Some((raw, Some(value))) = token.as_attribute() else {
            return;
        };
        if Directive::parse(raw).is_none() {
            return;
        }
        let offsets = this_accesses(unquote(value));
        if offsets.is_empty() {
            return;
        }
        let (value_start, _) = token.value_range().unwrap_or((token.start, token.end));
        Self::report_all(ctx, token, value_start + unquoted_offset(value) as u32, &offsets);
    }

    fn check_text(&self, ctx: &mut LintContext, token: &ReconciledToken, _cursor: &TokenCursor) {
        if self.option == ThisInTemplateOption::Always {
            return;
        }
        let Some(text) = token.token.text() else {
            return;
        };
        let offsets: Vec<usize> = INTERPOLATION
            .captures_iter(text)
            .filter_map(|captures| captures.get(1))
            .flat_map(|m| {
                this_accesses(m.as_str())
                    .into_iter()
                    .map(move |offset| m.start() + offset)
            })
            .collect();
        Self::report_all(ctx, token, token.start, &offsets);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linter::{LintResult, Linter};
    use crate::rule::RuleRegistry;

    fn lint(rule: ThisInTemplate, template: &str) -> LintResult {
        let mut registry = RuleRegistry::new();
        registry.register(Box::new(rule));
        Linter::with_registry(registry).lint_template(template, "test.vue")
    }

    #[test]
    fn test_valid_without_this() {
        for template in [
            "",
            "div",
            "div(v-if=\"visible\") {{ message }}",
            "div(:class=\"{ 'this.a': b }\")",
            "div(title=\"this.plain\")",
            "p Use this.method in scripts",
            "div(@click=\"foo.this.bar\")",
        ] {
            assert!(lint(ThisInTemplate::default(), template).diagnostics.is_empty(), "{template}");
        }
    }

    #[test]
    fn test_invalid_directive_value() {
        let source = "div(v-if=\"this.visible && this['x']\")";
        let result = lint(ThisInTemplate::default(), source);
        assert_eq!(result.warning_count, 2);
        assert_eq!(result.diagnostics[0].message, "Unexpected usage of 'this'.");
        for diagnostic in &result.diagnostics {
            assert_eq!(&source[diagnostic.start as usize..diagnostic.end as usize], "this");
        }
    }

    #[test]
    fn test_invalid_interpolation() {
        let source = "p\n  | Hello {{ this.name }}!";
        let result = lint(ThisInTemplate::default(), source);
        assert_eq!(result.warning_count, 1);
        let diagnostic = &result.diagnostics[0];
        assert_eq!(&source[diagnostic.start as usize..diagnostic.end as usize], "this");
        assert_eq!((diagnostic.loc.line, diagnostic.loc.column), (2, 13));
    }

    #[test]
    fn test_always_reports_nothing() {
        let rule = ThisInTemplate::from_options(&[serde_json::json!("always")]).unwrap();
        assert_eq!(rule.option, ThisInTemplateOption::Always);
        assert!(lint(rule, "div(v-if=\"this.visible\") {{ this.message }}").diagnostics.is_empty());
    }
}
