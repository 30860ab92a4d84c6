//! vue/use-v-on-exact
//!
//! Enforce usage of `exact` modifier on `v-on`.
//!
//! Within one element, bindings of the same event are compared when any of
//! them carries a system modifier (`ctrl`, `shift`, `alt`, `meta`). A binding
//! whose system modifiers extend another's, without `.exact`, is reported.
//! On custom components only `.native` bindings take part.
//!
//! ## Examples
//!
//! ### Invalid
//! ```pug
//! button(@click="foo" @click.ctrl="bar")
//! ```
//!
//! ### Valid
//! ```pug
//! button(@click="foo" @click.ctrl.exact="bar")
//! button(@click.ctrl="foo" @click.shift="bar")
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use crate::context::LintContext;
use crate::diagnostic::Severity;
use crate::reconcile::ReconciledToken;
use crate::rule::{Rule, RuleCategory, RuleMeta, TokenCursor};
use crate::trackers::is_custom_component;

static META: RuleMeta = RuleMeta {
    name: "vue/use-v-on-exact",
    description: "Enforce usage of `exact` modifier on `v-on`",
    category: RuleCategory::Essential,
    fixable: false,
    default_severity: Severity::Error,
    messages: &[("considerExact", "Consider to use '.exact' modifier.")],
};

const SYSTEM_MODIFIERS: &[&str] = &["ctrl", "shift", "alt", "meta"];
const GLOBAL_MODIFIERS: &[&str] = &["stop", "prevent", "capture", "self", "once", "passive", "native"];

static EVENT_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(v-on:|@)\w+.?").unwrap());

/// Enforce usage of exact modifier on v-on
pub struct UseVOnExact;

/// One `v-on` binding of the current element.
struct EventBinding<'t> {
    token: &'t ReconciledToken,
    name: &'t str,
    /// Modifier entries; a plain `@click` has one empty entry
    modifiers: Vec<&'t str>,
}

impl<'t> EventBinding<'t> {
    fn new(token: &'t ReconciledToken, raw: &'t str) -> Self {
        let unprefixed = raw
            .strip_prefix("v-on:")
            .or_else(|| raw.strip_prefix('@'))
            .unwrap_or(raw);
        let name = unprefixed.split('.').next().unwrap_or_default();
        let rest = match EVENT_PREFIX.find(raw) {
            Some(m) => &raw[m.end()..],
            None => raw,
        };
        Self {
            token,
            name,
            modifiers: rest.split('.').collect(),
        }
    }

    fn has_exact(&self) -> bool {
        self.modifiers.contains(&"exact")
    }

    fn has_system_modifier(&self) -> bool {
        self.modifiers.iter().any(|m| SYSTEM_MODIFIERS.contains(m))
    }

    fn system_string(&self) -> String {
        self.sorted(|m| SYSTEM_MODIFIERS.contains(&m))
    }

    fn key_string(&self) -> String {
        self.sorted(|m| !SYSTEM_MODIFIERS.contains(&m) && !GLOBAL_MODIFIERS.contains(&m))
    }

    fn sorted(&self, keep: impl Fn(&str) -> bool) -> String {
        let mut kept: Vec<&str> = self.modifiers.iter().copied().filter(|m| keep(*m)).collect();
        kept.sort_unstable();
        kept.join(",")
    }
}

/// Whether `base` would also fire for the combination `event` handles.
///
/// The containment check is on the joined modifier strings, not on sets.
fn has_conflicted_modifiers(base: &EventBinding, event: &EventBinding) -> bool {
    if std::ptr::eq(base.token, event.token) || event.has_exact() {
        return false;
    }

    let event_keys = event.key_string();
    let base_keys = base.key_string();
    if !event_keys.is_empty() && !base_keys.is_empty() && event_keys != base_keys {
        return false;
    }

    let event_system = event.system_string();
    let base_system = base.system_string();
    !base.modifiers.is_empty() && base_system != event_system && base_system.contains(&event_system)
}

impl Rule for UseVOnExact {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn exit_attributes(&self, ctx: &mut LintContext, _token: &ReconciledToken, cursor: &TokenCursor) {
        let Some((_, element)) = cursor.owner() else {
            return;
        };
        let component = is_custom_component(&element.name, cursor.attributes(element));

        let events: Vec<EventBinding> = ctx
            .trackers()
            .attributes()
            .tokens()
            .iter()
            .filter_map(|&index| {
                let token = cursor.get(index)?;
                let (raw, _) = token.as_attribute()?;
                let is_event = raw.starts_with("v-on:") || raw.starts_with('@');
                (is_event && (!component || raw.contains(".native")))
                    .then(|| EventBinding::new(token, raw))
            })
            .collect();
        if events.len() < 2 {
            return;
        }

        let mut flagged = Vec::new();
        for base in &events {
            let mut group = events.iter().filter(|e| e.name == base.name);
            if base.has_exact() || !group.clone().any(EventBinding::has_system_modifier) {
                continue;
            }
            if group.any(|event| has_conflicted_modifiers(base, event)) {
                flagged.push(base.token);
            }
        }

        for token in flagged {
            let (start, end) = token.name_range().unwrap_or((token.start, token.end));
            ctx.report_message("considerExact", &[], start, end);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linter::Linter;
    use crate::rule::RuleRegistry;

    fn create_linter() -> Linter {
        let mut registry = RuleRegistry::new();
        registry.register(Box::new(UseVOnExact));
        Linter::with_registry(registry)
    }

    fn flagged(source: &str) -> Vec<String> {
        create_linter()
            .lint_template(source, "test.vue")
            .diagnostics
            .iter()
            .map(|d| source[d.start as usize..d.end as usize].to_string())
            .collect()
    }

    #[test]
    fn test_valid_exact() {
        for source in [
            "button(@click=\"foo\")",
            "button(@click=\"foo\" @click.ctrl.exact=\"bar\")",
            "button(@click.ctrl=\"foo\" @click.shift=\"bar\")",
            "button(@click.ctrl=\"foo\" @keyup.ctrl=\"bar\")",
            "button(@click.stop=\"foo\" @click.prevent=\"bar\")",
            "button(@keyup.enter.ctrl=\"foo\" @keyup.esc=\"bar\")",
            "my-button(@click=\"foo\" @click.ctrl=\"bar\")",
        ] {
            assert!(flagged(source).is_empty(), "{source}: {:?}", flagged(source));
        }
    }

    #[test]
    fn test_invalid_more_specific_binding() {
        let source = "button(@click=\"foo\" @click.ctrl=\"bar\")";
        let result = create_linter().lint_template(source, "test.vue");
        assert_eq!(result.error_count, 1);
        assert_eq!(result.diagnostics[0].message, "Consider to use '.exact' modifier.");
        assert_eq!(flagged(source), vec!["@click.ctrl"]);
    }

    #[test]
    fn test_invalid_long_form_and_native() {
        assert_eq!(
            flagged("button(v-on:click=\"foo\" v-on:click.ctrl.shift=\"bar\")"),
            vec!["v-on:click.ctrl.shift"]
        );
        assert_eq!(
            flagged("my-button(@click.native=\"foo\" @click.native.alt=\"bar\")"),
            vec!["@click.native.alt"]
        );
    }
}
