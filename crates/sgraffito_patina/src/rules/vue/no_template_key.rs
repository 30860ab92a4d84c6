//! vue/no-template-key
//!
//! Disallow `key` attribute on `<template>`.
//!
//! A `template` with `v-for` may carry the key (Vue 3).
//!
//! ## Examples
//!
//! ### Invalid
//! ```pug
//! div: template(:key="foo")
//! ```
//!
//! ### Valid
//! ```pug
//! template(v-for="item in list" :key="item.id"): div
//! ```

use crate::context::LintContext;
use crate::diagnostic::Severity;
use crate::directive::Directive;
use crate::reconcile::ReconciledToken;
use crate::rule::{Rule, RuleCategory, RuleMeta, TokenCursor};

static META: RuleMeta = RuleMeta {
    name: "vue/no-template-key",
    description: "Disallow `key` attribute on `<template>`",
    category: RuleCategory::Essential,
    fixable: false,
    default_severity: Severity::Error,
    messages: &[(
        "disallow",
        "'template' cannot be keyed. Place the key on real elements instead.",
    )],
};

/// Disallow key attribute on template
pub struct NoTemplateKey;

impl Rule for NoTemplateKey {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn exit_attributes(&self, ctx: &mut LintContext, _token: &ReconciledToken, cursor: &TokenCursor) {
        if ctx.trackers().current_tag().name() != Some("template") {
            return;
        }

        let mut key = None;
        for &index in ctx.trackers().attributes().tokens() {
            let Some(token) = cursor.get(index) else {
                continue;
            };
            match token.as_attribute() {
                Some(("key" | ":key" | "v-bind:key", _)) => key = Some(token),
                Some((name, _)) if Directive::parse(name).is_some_and(|d| d.is("for")) => return,
                _ => {}
            }
        }

        if let Some(key) = key {
            ctx.report_message("disallow", &[], key.start, key.end);
        }
    }
}
