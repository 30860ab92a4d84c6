//! Lint context for rule execution.
//!
//! One context lives for one dispatch pass over one document. It carries
//! the per-file state rules may read (source, template block, script
//! bindings, structural trackers) and collects what they report.

use crate::diagnostic::{DiagnosticLoc, Fix, LintDiagnostic, Severity, TextEdit};
use crate::reconcile::ReconciledToken;
use crate::rule::RuleMeta;
use crate::script::ScriptInfo;
use crate::sfc::TemplateBlock;
use crate::trackers::Trackers;
use sgraffito_carton::{CompactString, FxHashSet, LineIndex};

/// Lint context provides utilities for rules during execution.
pub struct LintContext<'a> {
    /// Whole document being linted
    pub source: &'a str,
    /// Filename for diagnostics
    pub filename: &'a str,
    line_index: &'a LineIndex,
    template: &'a TemplateBlock,
    script: &'a ScriptInfo,
    /// Collected diagnostics (pre-allocated capacity)
    diagnostics: Vec<LintDiagnostic>,
    /// Current rule name (set by the dispatcher before calling rule methods)
    pub current_rule: &'static str,
    current_meta: Option<&'static RuleMeta>,
    current_severity: Severity,
    trackers: Trackers,
    used_bindings: Vec<CompactString>,
    used_seen: FxHashSet<CompactString>,
    /// Cached error count for fast access
    error_count: usize,
    /// Cached warning count for fast access
    warning_count: usize,
}

impl<'a> LintContext<'a> {
    /// Initial capacity for diagnostics vector
    const INITIAL_DIAGNOSTICS_CAPACITY: usize = 16;

    #[inline]
    pub fn new(
        source: &'a str,
        filename: &'a str,
        line_index: &'a LineIndex,
        template: &'a TemplateBlock,
        script: &'a ScriptInfo,
    ) -> Self {
        Self {
            source,
            filename,
            line_index,
            template,
            script,
            diagnostics: Vec::with_capacity(Self::INITIAL_DIAGNOSTICS_CAPACITY),
            current_rule: "",
            current_meta: None,
            current_severity: Severity::Error,
            trackers: Trackers::default(),
            used_bindings: Vec::new(),
            used_seen: FxHashSet::default(),
            error_count: 0,
            warning_count: 0,
        }
    }

    /// Switch the rule that subsequent reports are attributed to.
    #[inline]
    pub(crate) fn enter_rule(&mut self, meta: &'static RuleMeta, severity: Severity) {
        self.current_rule = meta.name;
        self.current_meta = Some(meta);
        self.current_severity = severity;
    }

    #[inline]
    pub(crate) fn trackers_mut(&mut self) -> &mut Trackers {
        &mut self.trackers
    }

    /// Structural trackers, already updated for the current token.
    #[inline]
    pub fn trackers(&self) -> &Trackers {
        &self.trackers
    }

    /// The extracted Pug template block.
    #[inline]
    pub fn template(&self) -> &'a TemplateBlock {
        self.template
    }

    /// Bindings and registered components found in the script blocks.
    #[inline]
    pub fn script(&self) -> &'a ScriptInfo {
        self.script
    }

    /// Severity of the rule currently running.
    #[inline]
    pub fn severity(&self) -> Severity {
        self.current_severity
    }

    /// Document location of a byte range.
    pub fn loc(&self, start: u32, end: u32) -> DiagnosticLoc {
        let (line, column) = self.line_index.line_col(start);
        let (end_line, end_column) = self.line_index.line_col(end);
        DiagnosticLoc {
            line,
            column,
            end_line,
            end_column,
        }
    }

    /// Report a lint diagnostic
    ///
    /// A diagnostic without a location gets one computed from its range.
    #[inline]
    pub fn report(&mut self, mut diagnostic: LintDiagnostic) {
        if diagnostic.loc == DiagnosticLoc::default() {
            diagnostic.loc = self.loc(diagnostic.start, diagnostic.end);
        }
        match diagnostic.severity {
            Severity::Error => self.error_count += 1,
            Severity::Warning => self.warning_count += 1,
        }
        self.diagnostics.push(diagnostic);
    }

    /// Report a plain message for the current rule at a range.
    #[inline]
    pub fn report_at(&mut self, message: impl Into<CompactString>, start: u32, end: u32) {
        let diagnostic =
            LintDiagnostic::new(self.current_rule, self.current_severity, message, start, end);
        self.report(diagnostic);
    }

    /// Report a message from the rule's message table, interpolating
    /// `{{key}}` placeholders from `data`.
    #[inline]
    pub fn report_message(
        &mut self,
        message_id: &'static str,
        data: &[(&str, &str)],
        start: u32,
        end: u32,
    ) {
        self.report_with_fix(message_id, data, start, end, None);
    }

    /// Like [`report_message`](Self::report_message), with an optional fix.
    pub fn report_with_fix(
        &mut self,
        message_id: &'static str,
        data: &[(&str, &str)],
        start: u32,
        end: u32,
        fix: Option<Fix>,
    ) {
        let template = self
            .current_meta
            .and_then(|meta| meta.message(message_id))
            .unwrap_or(message_id);
        let mut diagnostic = LintDiagnostic::new(
            self.current_rule,
            self.current_severity,
            interpolate(template, data),
            start,
            end,
        )
        .with_message_id(message_id);
        if let Some(fix) = fix {
            diagnostic = diagnostic.with_fix(fix);
        }
        self.report(diagnostic);
    }

    /// Build an edit replacing `[start, end)` with `text`, but only when the
    /// range lies within `token`'s reconciled range.
    pub fn token_edit(
        &self,
        token: &ReconciledToken,
        start: u32,
        end: u32,
        text: impl Into<String>,
    ) -> Option<TextEdit> {
        if token.start <= start && start <= end && end <= token.end {
            Some(TextEdit::replace(start, end, text))
        } else {
            tracing::debug!(
                target: "sgraffito_patina::fix",
                rule = self.current_rule,
                start,
                end,
                token_start = token.start,
                token_end = token.end,
                "edit leaves the token range, reporting without a fix"
            );
            None
        }
    }

    /// Mark a script binding as used by the template.
    ///
    /// Returns `false` when the name was already marked.
    pub fn mark_variable_as_used(&mut self, name: &str) -> bool {
        if self.used_seen.contains(name) {
            return false;
        }
        let name = CompactString::from(name);
        self.used_seen.insert(name.clone());
        self.used_bindings.push(name);
        true
    }

    /// Get reference to collected diagnostics
    #[inline]
    pub fn diagnostics(&self) -> &[LintDiagnostic] {
        &self.diagnostics
    }

    /// Diagnostics and used bindings, in report order.
    #[inline]
    pub fn into_parts(self) -> (Vec<LintDiagnostic>, Vec<CompactString>) {
        (self.diagnostics, self.used_bindings)
    }

    /// Get the error count (cached, O(1))
    #[inline]
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// Get the warning count (cached, O(1))
    #[inline]
    pub fn warning_count(&self) -> usize {
        self.warning_count
    }
}

/// Replace `{{ key }}` placeholders. Unknown keys are left as written.
pub fn interpolate(template: &str, data: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        let Some(close) = after.find("}}") else {
            out.push_str(&rest[open..]);
            return out;
        };
        let key = after[..close].trim();
        match data.iter().find(|(k, _)| *k == key) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[open..open + 2 + close + 2]),
        }
        rest = &after[close + 2..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolate() {
        assert_eq!(
            interpolate("Duplicate attribute '{{name}}'.", &[("name", "foo")]),
            "Duplicate attribute 'foo'."
        );
        assert_eq!(
            interpolate("{{ a }}-{{b}}-{{c}}", &[("a", "1"), ("b", "2")]),
            "1-2-{{c}}"
        );
        assert_eq!(interpolate("open {{ only", &[]), "open {{ only");
    }

    #[test]
    fn test_token_edit_confined_to_token() {
        let source = "<template lang=\"pug\">\ndiv\n</template>";
        let index = LineIndex::new(source);
        let block = TemplateBlock::default();
        let script = ScriptInfo::default();
        let ctx = LintContext::new(source, "a.vue", &index, &block, &script);
        let token = ReconciledToken {
            token: sgraffito_armature::Token::new(
                sgraffito_armature::TokenKind::Tag { name: "div".into() },
                sgraffito_armature::Loc::new(
                    sgraffito_armature::LineColumn::new(1, 1),
                    sgraffito_armature::LineColumn::new(1, 4),
                ),
            ),
            start: 22,
            end: 25,
            line: 2,
            end_line: 2,
        };
        assert!(ctx.token_edit(&token, 22, 25, "span").is_some());
        assert!(ctx.token_edit(&token, 23, 24, "x").is_some());
        assert!(ctx.token_edit(&token, 21, 25, "span").is_none());
        assert!(ctx.token_edit(&token, 22, 26, "span").is_none());
    }

    #[test]
    fn test_mark_variable_as_used_dedupes() {
        let index = LineIndex::new("");
        let block = TemplateBlock::default();
        let script = ScriptInfo::default();
        let mut ctx = LintContext::new("", "a.vue", &index, &block, &script);
        assert!(ctx.mark_variable_as_used("CoolComponent"));
        assert!(!ctx.mark_variable_as_used("CoolComponent"));
        let (_, used) = ctx.into_parts();
        assert_eq!(used, vec!["CoolComponent"]);
    }
}
