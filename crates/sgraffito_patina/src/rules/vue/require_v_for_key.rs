//! vue/require-v-for-key
//!
//! Require `v-bind:key` with `v-for` directives.
//!
//! A `template` or `slot` does not need a key itself when an element below
//! it has one. Custom components may manage keys on their own and are
//! exempt.
//!
//! ## Examples
//!
//! ### Invalid
//! ```pug
//! div
//!   div(v-for="x in list")
//! ```
//!
//! ### Valid
//! ```pug
//! div
//!   div(v-for="x in list" :key="x")
//!   template(v-for="x in list")
//!     li(:key="x.id")
//!   my-item(v-for="x in list")
//! ```

use crate::context::LintContext;
use crate::diagnostic::Severity;
use crate::directive::Directive;
use crate::reconcile::ReconciledToken;
use crate::rule::{Rule, RuleCategory, RuleMeta, TokenCursor};
use crate::trackers::is_custom_component;
use crate::tree::NodeId;

static META: RuleMeta = RuleMeta {
    name: "vue/require-v-for-key",
    description: "Require `v-bind:key` with `v-for` directives",
    category: RuleCategory::Essential,
    fixable: false,
    default_severity: Severity::Error,
    messages: &[(
        "requireKey",
        "Elements in iteration expect to have 'v-bind:key' directives.",
    )],
};

const KEY_NAMES: &[&str] = &[":key", "v-bind:key"];

/// Require v-bind:key with v-for directives
pub struct RequireVForKey;

#[inline]
fn is_wrapper(name: &str) -> bool {
    name == "template" || name == "slot"
}

/// Whether an element below `id` that is not itself a wrapper has a key.
fn has_keyed_descendant(cursor: &TokenCursor, id: NodeId) -> bool {
    cursor.tree.descendants(id).any(|child| {
        let node = cursor.tree.node(child);
        !is_wrapper(&node.name) && cursor.find_attribute(node, KEY_NAMES).is_some()
    })
}

impl Rule for RequireVForKey {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check_attribute(&self, ctx: &mut LintContext, token: &ReconciledToken, cursor: &TokenCursor) {
        let Some((raw, _)) = token.as_attribute() else {
            return;
        };
        if !Directive::parse(raw).is_some_and(|d| d.is("for")) {
            return;
        }
        let Some((id, element)) = cursor.owner() else {
            return;
        };

        if cursor.find_attribute(element, KEY_NAMES).is_some() {
            return;
        }
        if is_wrapper(&element.name) && has_keyed_descendant(cursor, id) {
            return;
        }
        if !is_wrapper(&element.name)
            && is_custom_component(&element.name, cursor.attributes(element))
        {
            return;
        }

        let end = (token.start + "v-for".len() as u32).min(token.end);
        ctx.report_message("requireKey", &[], token.start, end);
    }
}
