//! vue/valid-v-for
//!
//! Enforce valid `v-for` directives.
//!
//! Beyond the directive shape, the aliases must be valid and a `:key` next to
//! a `v-for` must use the variables that `v-for` defines. A `template`
//! without its own key hands its iteration variables down to its children.
//!
//! ## Examples
//!
//! ### Invalid
//! ```pug
//! div(v-for)
//! div(v-for="(a,{b,c}) in list")
//! your-component(v-for="x in list")
//! div(v-for="x in list" :key="foo")
//! ```
//!
//! ### Valid
//! ```pug
//! div(v-for="({id, name}, i) of list")
//! your-component(v-for="x in list" :key="x.id")
//! template(v-for="x in list")
//!   div(:key="x")
//! ```

use sgraffito_carton::{is_known_element_name, CompactString};

use crate::context::LintContext;
use crate::diagnostic::Severity;
use crate::directive::{identifiers, is_empty_value, is_identifier, unquote, Directive, VFor};
use crate::reconcile::ReconciledToken;
use crate::rule::{Rule, RuleCategory, RuleMeta, TokenCursor};
use crate::tree::{ElementNode, NodeId};

static META: RuleMeta = RuleMeta {
    name: "vue/valid-v-for",
    description: "Enforce valid `v-for` directives",
    category: RuleCategory::Essential,
    fixable: false,
    default_severity: Severity::Error,
    messages: &[
        ("unexpectedArgument", "'v-for' directives require no argument."),
        ("unexpectedModifier", "'v-for' directives require no modifier."),
        ("expectedValue", "'v-for' directives require that attribute value."),
        ("invalidAlias", "Invalid alias '{{text}}'."),
        (
            "requireKey",
            "Custom elements in iteration require 'v-bind:key' directives.",
        ),
        (
            "keyUseFVorVars",
            "Expected 'v-bind:key' directive to use the variables which are defined by the 'v-for' directive.",
        ),
    ],
};

/// Enforce valid v-for directives
pub struct ValidVFor;

/// The first invalid alias of a `v-for` left-hand side, if any.
///
/// Only the value alias may destructure; index and key must be identifiers.
fn invalid_alias(left: &str) -> Option<&str> {
    let left = left.trim();
    let inner = left
        .strip_prefix('(')
        .and_then(|l| l.strip_suffix(')'))
        .unwrap_or(left);

    let mut depth = 0u32;
    let mut start = 0;
    let mut parts = Vec::new();
    for (i, b) in inner.bytes().enumerate() {
        match b {
            b'{' | b'[' | b'(' => depth += 1,
            b'}' | b']' | b')' => depth = depth.saturating_sub(1),
            b',' if depth == 0 => {
                parts.push(inner[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(inner[start..].trim());

    parts.into_iter().enumerate().find_map(|(i, part)| {
        let valid = is_identifier(part) || (i == 0 && (part.starts_with('{') || part.starts_with('[')));
        (!valid).then_some(part)
    })
}

/// Elements that render a component: custom tags and anything with `is`.
fn renders_component<'t>(cursor: &TokenCursor<'t>, node: &'t ElementNode) -> bool {
    !is_known_element_name(&node.name)
        || cursor
            .find_attribute(node, &["is", ":is", "v-bind:is"])
            .is_some()
}

fn key_attribute<'t>(cursor: &TokenCursor<'t>, node: &'t ElementNode) -> Option<&'t ReconciledToken> {
    cursor.find_attribute(node, &[":key", "v-bind:key"])
}

fn v_for_attribute<'t>(cursor: &TokenCursor<'t>, node: &'t ElementNode) -> Option<&'t ReconciledToken> {
    cursor.attributes(node).find(|token| {
        token
            .as_attribute()
            .and_then(|(raw, _)| Directive::parse(raw))
            .is_some_and(|d| d.is("for"))
    })
}

fn uses_any(expression: &str, aliases: &[CompactString]) -> bool {
    identifiers(expression).any(|id| aliases.iter().any(|alias| alias == id))
}

impl ValidVFor {
    /// Key checks of `node` against the variables of an enclosing `v-for`.
    fn check_key<'t>(
        &self,
        ctx: &mut LintContext,
        cursor: &TokenCursor<'t>,
        aliases: &[CompactString],
        id: NodeId,
        own: bool,
    ) {
        let node = cursor.tree.node(id);
        let Some(key) = key_attribute(cursor, node) else {
            if node.name == "template" {
                for child in cursor.tree.children(id) {
                    self.check_child_key(ctx, cursor, aliases, child);
                }
            } else if own && renders_component(cursor, node) {
                let token = &cursor.tokens[node.token];
                ctx.report_message("requireKey", &[], token.start, token.end);
            }
            return;
        };

        let used = key
            .as_attribute()
            .and_then(|(_, value)| value)
            .is_some_and(|value| uses_any(unquote(value), aliases));
        if !used {
            ctx.report_message("keyUseFVorVars", &[], key.start, key.end);
        }
    }

    fn check_child_key<'t>(
        &self,
        ctx: &mut LintContext,
        cursor: &TokenCursor<'t>,
        aliases: &[CompactString],
        child: NodeId,
    ) {
        let node = cursor.tree.node(child);
        if let Some(child_for) = v_for_attribute(cursor, node) {
            let iterable_uses_parent = child_for
                .as_attribute()
                .and_then(|(_, value)| VFor::parse(unquote(value?)))
                .is_some_and(|v_for| uses_any(v_for.iterable, aliases));
            // The child's own v-for check covers it.
            if iterable_uses_parent {
                return;
            }
        }
        self.check_key(ctx, cursor, aliases, child, false);
    }
}

impl Rule for ValidVFor {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check_attribute(&self, ctx: &mut LintContext, token: &ReconciledToken, cursor: &TokenCursor) {
        let Some((raw, value)) = token.as_attribute() else {
            return;
        };
        let Some(directive) = Directive::parse(raw).filter(|d| d.is("for")) else {
            return;
        };

        let (name_start, name_end) = token.name_range().unwrap_or((token.start, token.end));
        if directive.argument.is_some() {
            ctx.report_message("unexpectedArgument", &[], name_start, name_end);
        }
        if !directive.modifiers.is_empty() {
            ctx.report_message("unexpectedModifier", &[], name_start, name_end);
        }
        let Some(value) = value.filter(|v| !is_empty_value(Some(v))) else {
            ctx.report_message("expectedValue", &[], name_start, name_end);
            return;
        };

        // Unparsable expressions belong to the template compiler.
        let expression = unquote(value);
        let Some(v_for) = VFor::parse(expression) else {
            return;
        };
        let (value_start, value_end) = token.value_range().unwrap_or((token.start, token.end));
        let left = expression
            .find(" in ")
            .into_iter()
            .chain(expression.find(" of "))
            .min()
            .map(|split| &expression[..split])
            .unwrap_or_default();
        if let Some(alias) = invalid_alias(left) {
            ctx.report_message("invalidAlias", &[("text", alias)], value_start, value_end);
            return;
        }

        let Some((id, _)) = cursor.owner() else {
            return;
        };
        self.check_key(ctx, cursor, &v_for.aliases, id, true);
    }
}
