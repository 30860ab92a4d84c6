//! vue/script-setup-uses-vars
//!
//! Prevent `<script setup>` variables used in the Pug template from being
//! marked as unused.
//!
//! The rule reports nothing. It marks every `<script setup>` binding the
//! template refers to, through a component tag (`Foo`, `my-component`), a
//! directive expression or a `{{ }}` interpolation. Hosts read the marks
//! from [`LintResult::used_script_bindings`](crate::LintResult).

use once_cell::sync::Lazy;
use regex::Regex;
use sgraffito_carton::{camel_case, is_known_element_name, pascal_case};

use crate::context::LintContext;
use crate::diagnostic::Severity;
use crate::directive::{identifiers, unquote, Directive};
use crate::reconcile::ReconciledToken;
use crate::rule::{Rule, RuleCategory, RuleMeta, TokenCursor};
use crate::tree::ElementKind;

static META: RuleMeta = RuleMeta {
    name: "vue/script-setup-uses-vars",
    description: "Prevent `<script setup>` variables used in the template from being marked as unused",
    category: RuleCategory::Base,
    fixable: false,
    default_severity: Severity::Error,
    messages: &[],
};

static INTERPOLATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\{(.*?)\}\}").unwrap());

/// Mark script setup bindings used by the template
pub struct ScriptSetupUsesVars;

fn mark_expression(ctx: &mut LintContext, expression: &str) {
    let script = ctx.script();
    for id in identifiers(expression) {
        if script.has_setup_binding(id) {
            ctx.mark_variable_as_used(id);
        }
    }
}

impl Rule for ScriptSetupUsesVars {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check_tag(&self, ctx: &mut LintContext, _token: &ReconciledToken, cursor: &TokenCursor) {
        let Some((_, element)) = cursor.element() else {
            return;
        };
        if element.kind != ElementKind::Tag || is_known_element_name(&element.name) {
            return;
        }
        let name = element.name.as_str();
        let script = ctx.script();
        for candidate in [name.to_string(), camel_case(name), pascal_case(name)] {
            if script.has_setup_binding(&candidate) {
                ctx.mark_variable_as_used(&candidate);
            }
        }
    }

    fn check_attribute(&self, ctx: &mut LintContext, token: &ReconciledToken, _cursor: &TokenCursor) {
        let Some((raw, Some(value))) = token.as_attribute() else {
            return;
        };
        if Directive::parse(raw).is_some() {
            mark_expression(ctx, unquote(value));
        }
    }

    fn check_text(&self, ctx: &mut LintContext, token: &ReconciledToken, _cursor: &TokenCursor) {
        let Some(text) = token.token.text() else {
            return;
        };
        for captures in INTERPOLATION.captures_iter(text) {
            if let Some(expression) = captures.get(1) {
                mark_expression(ctx, expression.as_str());
            }
        }
    }
}
