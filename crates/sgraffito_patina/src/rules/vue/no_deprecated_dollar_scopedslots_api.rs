//! vue/no-deprecated-dollar-scopedslots-api
//!
//! Disallow using deprecated `$scopedSlots` (in Vue.js 3.0.0+).
//!
//! Every free `$scopedSlots` identifier in a directive value is reported and
//! fixed to `$slots`. In a `v-for`, only the iterable side counts.
//!
//! ## Examples
//!
//! ### Invalid
//! ```pug
//! div(v-if="$scopedSlots.default")
//! div(v-for="slot in $scopedSlots")
//! ```
//!
//! ### Valid
//! ```pug
//! div(v-if="$slots.default")
//! div(foo="$scopedSlots")
//! ```

use crate::context::LintContext;
use crate::diagnostic::{Fix, Severity};
use crate::directive::{identifiers, unquote, unquoted_offset, Directive, VFor};
use crate::reconcile::ReconciledToken;
use crate::rule::{Rule, RuleCategory, RuleMeta, TokenCursor};

static META: RuleMeta = RuleMeta {
    name: "vue/no-deprecated-dollar-scopedslots-api",
    description: "Disallow using deprecated `$scopedSlots` (in Vue.js 3.0.0+)",
    category: RuleCategory::Essential,
    fixable: true,
    default_severity: Severity::Error,
    messages: &[("deprecated", "The `$scopedSlots` is deprecated.")],
};

const SCOPED_SLOTS: &str = "$scopedSlots";

/// Disallow using deprecated $scopedSlots
pub struct NoDeprecatedDollarScopedslotsApi;

/// Byte offset of `inner` within `outer`. `inner` must be a subslice.
#[inline]
fn offset_in(outer: &str, inner: &str) -> usize {
    inner.as_ptr() as usize - outer.as_ptr() as usize
}

impl Rule for NoDeprecatedDollarScopedslotsApi {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check_attribute(&self, ctx: &mut LintContext, token: &ReconciledToken, _cursor: &TokenCursor) {
        let Some((raw, Some(value))) = token.as_attribute() else {
            return;
        };
        let Some(directive) = Directive::parse(raw) else {
            return;
        };
        let expression = unquote(value);
        if !expression.contains(SCOPED_SLOTS) {
            return;
        }

        // `$scopedSlots in list` declares an alias; only the iterable reads it.
        let from = if directive.is("for") {
            match VFor::parse(expression) {
                Some(v_for) => offset_in(expression, v_for.iterable),
                None => return,
            }
        } else {
            0
        };

        let (value_start, _) = token.value_range().unwrap_or((token.start, token.end));
        let base = value_start + unquoted_offset(value) as u32;
        let offsets: Vec<usize> = identifiers(expression)
            .filter(|id| *id == SCOPED_SLOTS)
            .map(|id| offset_in(expression, id))
            .filter(|&offset| offset >= from)
            .collect();

        for offset in offsets {
            let start = base + offset as u32;
            let end = start + SCOPED_SLOTS.len() as u32;
            let fix = ctx
                .token_edit(token, start, end, "$slots")
                .map(|edit| Fix::new("Replace `$scopedSlots` with `$slots`", edit));
            ctx.report_with_fix("deprecated", &[], start, end, fix);
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
        registry.register(Box::new(NoDeprecatedDollarScopedslotsApi));
        Linter::with_registry(registry)
    }

    const SCRIPT: &str = "\n<script>\nexport default {\n  render() {\n    return this.$scopedSlots.foo('bar')\n  }\n}\n</script>";

    #[test]
    fn test_valid_without_scoped_slots() {
        let linter = create_linter();
        for source in [
            "<template lang=\"pug\">\ndiv(v-bind=\"$attrs\")\n</template>",
            "<script>\nexport default {\n  methods: {\n    click () {\n      this.$emit('click')\n    }\n  }\n}\n</script>",
            "<template lang=\"pug\">\ndiv(foo=\"$scopedSlots\")\n</template>",
            "<template lang=\"pug\">\ndiv(v-for=\"$scopedSlots in list\")\n</template>",
            "<template lang=\"pug\">\ndiv(v-if=\"foo.$scopedSlots\")\n</template>",
        ] {
            let result = linter.lint_sfc(source, "test.vue");
            assert_eq!(result.error_count, 0, "{source}");
        }
    }

    #[test]
    fn test_invalid_with_fix() {
        let source = format!("<template lang=\"pug\">\ndiv(v-if=\"$scopedSlots.default\")\n</template>{SCRIPT}");
        let result = create_linter().lint_sfc(&source, "test.vue");
        assert_eq!(result.error_count, 1);

        let diagnostic = &result.diagnostics[0];
        assert_eq!(diagnostic.message, "The `$scopedSlots` is deprecated.");
        assert_eq!((diagnostic.loc.line, diagnostic.loc.column), (2, 10));
        assert_eq!((diagnostic.loc.end_line, diagnostic.loc.end_column), (2, 22));

        let fixed = diagnostic.fix.as_ref().unwrap().apply(&source);
        assert_eq!(
            fixed,
            format!("<template lang=\"pug\">\ndiv(v-if=\"$slots.default\")\n</template>{SCRIPT}")
        );
    }

    #[test]
    fn test_invalid_v_for_iterable_and_binding() {
        let source = "<template lang=\"pug\">\ndiv(v-for=\"slot in $scopedSlots\")\ndiv(:foo=\"$scopedSlots\")\n</template>";
        let result = create_linter().lint_sfc(source, "test.vue");
        assert_eq!(result.error_count, 2);

        let positions: Vec<_> = result
            .diagnostics
            .iter()
            .map(|d| (d.loc.line, d.loc.column, d.loc.end_column))
            .collect();
        assert_eq!(positions, vec![(2, 19, 31), (3, 10, 22)]);
        assert!(result.diagnostics.iter().all(|d| d.has_fix()));
    }
}
