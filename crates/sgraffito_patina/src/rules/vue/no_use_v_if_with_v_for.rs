//! vue/no-use-v-if-with-v-for
//!
//! Disallow using `v-if` on the same element as `v-for`.
//!
//! When the condition filters by the iteration variable, the list should be
//! a computed property instead. Otherwise the `v-if` belongs on a wrapper.
//! With `allowUsingIterationVar`, conditions on the iteration variable are
//! accepted.
//!
//! ## Examples
//!
//! ### Invalid
//! ```pug
//! li(v-for="user in users" v-if="user.isActive" :key="user.id")
//! li(v-for="user in users" v-if="shown" :key="user.id")
//! ```
//!
//! ### Valid
//! ```pug
//! template(v-if="shown")
//!   li(v-for="user in users" :key="user.id")
//! ```

use serde::{Deserialize, Serialize};

use crate::context::LintContext;
use crate::diagnostic::Severity;
use crate::directive::{identifiers, unquote, Directive, VFor};
use crate::reconcile::ReconciledToken;
use crate::rule::{Rule, RuleCategory, RuleMeta, TokenCursor};

static META: RuleMeta = RuleMeta {
    name: "vue/no-use-v-if-with-v-for",
    description: "Disallow using `v-if` on the same element as `v-for`",
    category: RuleCategory::Essential,
    fixable: false,
    default_severity: Severity::Error,
    messages: &[
        (
            "movedToWrapper",
            "This 'v-if' should be moved to the wrapper element.",
        ),
        (
            "movedToComputed",
            "The '{{iteratorName}}' {{kind}} inside 'v-for' directive should be replaced with a computed property that returns filtered array instead. You should not mix 'v-for' with 'v-if'.",
        ),
    ],
};

/// Disallow using v-if on the same element as v-for
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NoUseVIfWithVFor {
    /// Accept `v-if` conditions on the iteration variable
    pub allow_using_iteration_var: bool,
}

impl Rule for NoUseVIfWithVFor {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn options(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }

    fn check_attribute(&self, ctx: &mut LintContext, token: &ReconciledToken, cursor: &TokenCursor) {
        let Some((raw, value)) = token.as_attribute() else {
            return;
        };
        if !Directive::parse(raw).is_some_and(|d| d.is("if")) {
            return;
        }
        let Some((_, element)) = cursor.owner() else {
            return;
        };
        let Some(v_for_value) = cursor.attributes(element).find_map(|attribute| {
            let (name, value) = attribute.as_attribute()?;
            Directive::parse(name)
                .filter(|d| d.is("for"))
                .map(|_| value.map(unquote).unwrap_or_default())
        }) else {
            return;
        };

        let (start, end) = token.name_range().unwrap_or((token.start, token.end));
        let condition = value.map(unquote).unwrap_or_default();
        let v_for = VFor::parse(v_for_value);
        let uses_iteration_var = v_for.as_ref().is_some_and(|v_for| {
            identifiers(condition).any(|id| v_for.aliases.iter().any(|alias| alias == id))
        });

        match v_for {
            Some(v_for) if uses_iteration_var => {
                if self.allow_using_iteration_var {
                    return;
                }
                let kind = if v_for.iterable_is_identifier() {
                    "variable"
                } else {
                    "expression"
                };
                ctx.report_message(
                    "movedToComputed",
                    &[("iteratorName", v_for.iterable), ("kind", kind)],
                    start,
                    end,
                );
            }
            _ => ctx.report_message("movedToWrapper", &[], start, end),
        }
    }
}
