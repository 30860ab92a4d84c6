//! # sgraffito_patina
//!
//! Patina - The template checker for Sgraffito.
//! Vue template rules for components written with `<template lang="pug">`.
//!
//! ## Name Origin
//!
//! **Patina** (/ˈpætɪnə/) is the layer that forms on a surface over time and
//! tells a trained eye how the piece was made. `sgraffito_patina` reads the
//! surface of a Pug template, the token stream, and judges the Vue markup
//! underneath it.
//!
//! ## Features
//!
//! - eslint-plugin-vue compatible rules, rewritten for the Pug token stream
//! - One dispatch pass per template shared by every rule
//! - Diagnostics and fixes in absolute document offsets
//! - Bounded caches for token streams and lint sessions
//!
//! ## Usage
//!
//! ```
//! use sgraffito_patina::{format_results, Linter, OutputFormat};
//!
//! let linter = Linter::new();
//! let source = "<template lang=\"pug\">\nul\n  li(v-for=\"item in items\") {{ item }}\n</template>";
//! let result = linter.lint_sfc(source, "List.vue");
//!
//! assert!(result.has_errors());
//! let output = format_results(&[result], OutputFormat::Text);
//! assert!(output.starts_with("List.vue:3:6  error"));
//! ```
//!
//! ## Rules
//!
//! ### Essential Rules
//! - `vue/no-deprecated-dollar-scopedslots-api` - Disallow `$scopedSlots`
//! - `vue/no-deprecated-filter` - Disallow filters
//! - `vue/no-dupe-v-else-if` - Disallow duplicate conditions in v-if chains
//! - `vue/no-duplicate-attributes` - Disallow duplicate attributes
//! - `vue/no-template-key` - Disallow key attribute on `template`
//! - `vue/no-textarea-mustache` - Disallow mustache interpolation in `textarea`
//! - `vue/no-use-v-if-with-v-for` - Disallow using `v-if` on the same element as `v-for`
//! - `vue/require-component-is` - Require `v-bind:is` on `component` elements
//! - `vue/require-v-for-key` - Require `v-bind:key` with `v-for` directives
//! - `vue/use-v-on-exact` - Enforce usage of `exact` modifier on `v-on`
//! - `vue/valid-template-root` - Enforce valid template root
//! - `vue/valid-v-else` - Enforce valid `v-else` directives
//! - `vue/valid-v-else-if` - Enforce valid `v-else-if` directives
//! - `vue/valid-v-for` - Enforce valid `v-for` directives
//! - `vue/valid-v-if` - Enforce valid `v-if` directives
//! - `vue/valid-v-on` - Enforce valid `v-on` directives
//!
//! ### Strongly Recommended Rules
//! - `vue/attribute-hyphenation` - Enforce attribute naming style on custom components
//! - `vue/component-name-in-template-casing` - Enforce component naming style
//!
//! ### Recommended Rules
//! - `vue/this-in-template` - Disallow usage of `this` in template
//!
//! ### Vue 2 Rules (`RuleRegistry::with_all`)
//! - `vue/no-multiple-template-root` - Disallow adding multiple root nodes
//!
//! ### Base Rules
//! - `vue/script-setup-uses-vars` - Report `<script setup>` bindings used by the template

pub mod config;
mod context;
mod diagnostic;
pub mod directive;
pub mod dispatcher;
mod linter;
pub mod output;
mod reconcile;
mod rule;
pub mod rules;
pub mod script;
pub mod sfc;
pub mod trackers;
pub mod tree;

pub use config::{ConfigError, LintConfig, Preset};
pub use context::LintContext;
pub use diagnostic::{DiagnosticLoc, Fix, LintDiagnostic, LintSummary, Severity, TextEdit};
pub use dispatcher::{DispatchSession, TokenStream};
pub use linter::{LintResult, Linter, ENVIRONMENT_RULE};
pub use output::{format_results, format_summary, OutputFormat};
pub use reconcile::{reconcile, ReconciledToken};
pub use rule::{Rule, RuleCategory, RuleMeta, RuleRegistry, TokenCursor};
pub use script::ScriptInfo;
pub use sfc::{SfcError, TemplateBlock};
pub use tree::{ElementKind, ElementNode, ElementTree, NodeId};

/// Lint a bare Pug template with the recommended rules
///
/// This is a convenience function for simple use cases.
/// For more control, use `Linter::new()` directly.
pub fn lint(source: &str, filename: &str) -> LintResult {
    Linter::new().lint_template(source, filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lint_function() {
        let result = lint("div(v-for=\"item in items\")", "test.pug");
        // Should have error for missing :key
        assert!(result.has_errors());
    }

    #[test]
    fn test_lint_valid_template() {
        let result = lint(
            "div(v-for=\"item in items\" :key=\"item.id\") {{ item }}",
            "test.pug",
        );
        assert!(!result.has_errors());
    }

    #[test]
    fn test_fix_applies_to_document() {
        let source = "<template lang=\"pug\">\nmy-list(itemCount=\"3\")\n</template>";
        let result = Linter::new().lint_sfc(source, "List.vue");
        let fix = result
            .diagnostics
            .iter()
            .find_map(|d| d.fix.as_ref())
            .unwrap();
        assert_eq!(
            fix.apply(source),
            "<template lang=\"pug\">\nmy-list(item-count=\"3\")\n</template>"
        );
    }
}
