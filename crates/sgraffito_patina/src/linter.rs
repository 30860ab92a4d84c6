//! Main linter entry point.
//!
//! The linter finds the Pug template of a document, runs every registered
//! rule over it in one dispatch pass and keeps the pass in a bounded session
//! cache, so linting the same text again with the same rules is a lookup.

use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use parking_lot::Mutex;
use serde::Serialize;
use sgraffito_carton::{combine_hash, CompactString};

use crate::diagnostic::{DiagnosticLoc, LintDiagnostic, LintSummary, Severity};
use crate::dispatcher::DispatchSession;
use crate::rule::RuleRegistry;
use crate::script::ScriptInfo;
use crate::sfc::{parse_blocks, TemplateBlock};

/// Rule name of the diagnostic reported when the SFC structure cannot be read.
pub const ENVIRONMENT_RULE: &str = "sgraffito/environment";

/// Lint result for a single file
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LintResult {
    /// Filename that was linted
    pub filename: String,
    /// Collected diagnostics, ordered by start offset
    pub diagnostics: Vec<LintDiagnostic>,
    /// Number of errors
    pub error_count: usize,
    /// Number of warnings
    pub warning_count: usize,
    /// `<script setup>` bindings the template uses
    pub used_script_bindings: Vec<CompactString>,
}

impl LintResult {
    fn empty(filename: &str) -> Self {
        Self::from_diagnostics(filename, Vec::new(), Vec::new())
    }

    fn from_diagnostics(
        filename: &str,
        mut diagnostics: Vec<LintDiagnostic>,
        used_script_bindings: Vec<CompactString>,
    ) -> Self {
        diagnostics.sort_by_key(|d| d.start);
        let error_count = diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count();
        Self {
            filename: filename.to_string(),
            warning_count: diagnostics.len() - error_count,
            error_count,
            diagnostics,
            used_script_bindings,
        }
    }

    /// Check if there are any errors
    #[inline]
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    /// Check if there are any diagnostics
    #[inline]
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

type SessionKey = (String, u64);

/// Main linter struct.
///
/// A `Linter` is `Send + Sync` and may be shared by a host across threads;
/// sessions are locked one at a time.
pub struct Linter {
    registry: RuleRegistry,
    fingerprint: u64,
    sessions: Mutex<LruCache<SessionKey, Arc<Mutex<DispatchSession>>>>,
}

impl Linter {
    /// Default number of dispatch sessions kept per linter
    pub const DEFAULT_SESSION_CAPACITY: usize = 64;

    /// Create a new linter with recommended rules
    #[inline]
    pub fn new() -> Self {
        Self::with_registry(RuleRegistry::with_recommended())
    }

    /// Create a linter with a custom rule registry
    pub fn with_registry(registry: RuleRegistry) -> Self {
        let fingerprint = registry.fingerprint();
        Self {
            registry,
            fingerprint,
            sessions: Mutex::new(LruCache::new(session_capacity(
                Self::DEFAULT_SESSION_CAPACITY,
            ))),
        }
    }

    /// Set the number of dispatch sessions kept
    pub fn with_session_capacity(self, entries: usize) -> Self {
        self.sessions.lock().resize(session_capacity(entries));
        self
    }

    /// Drop every cached session.
    pub fn clear_sessions(&self) {
        self.sessions.lock().clear();
    }

    /// Get the rule registry
    #[inline]
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Lint a bare Pug template.
    pub fn lint_template(&self, source: &str, filename: &str) -> LintResult {
        let template = TemplateBlock {
            content: source.to_string(),
            offset: 0,
            line: 1,
            has_src: false,
            lang: Some("pug".into()),
            start_tag: 0..0,
            end_tag: source.len() as u32..source.len() as u32,
        };
        self.run_session(source, filename, "template", template, ScriptInfo::default())
    }

    /// Lint a full Vue SFC file
    ///
    /// Only a `<template lang="pug">` block is linted. A component whose
    /// block structure cannot be read gets a single
    /// [`ENVIRONMENT_RULE`] diagnostic when it is a `.vue` file.
    pub fn lint_sfc(&self, source: &str, filename: &str) -> LintResult {
        let blocks = match parse_blocks(source) {
            Ok(blocks) => blocks,
            Err(error) if filename.ends_with(".vue") => {
                return LintResult::from_diagnostics(
                    filename,
                    vec![environment_diagnostic(&error.to_string())],
                    Vec::new(),
                );
            }
            Err(error) => {
                tracing::debug!(
                    target: "sgraffito_patina::linter",
                    filename,
                    %error,
                    "block structure unreadable, skipping file"
                );
                return LintResult::empty(filename);
            }
        };

        let Some(template) = blocks.template.filter(TemplateBlock::is_pug) else {
            tracing::trace!(target: "sgraffito_patina::linter", filename, "no pug template");
            return LintResult::empty(filename);
        };
        let script = ScriptInfo::scan(&blocks.scripts);
        self.run_session(source, filename, "sfc", template, script)
    }

    /// Lint multiple files and aggregate results
    ///
    /// `.vue` files are linted as components, everything else as bare
    /// templates.
    pub fn lint_files(&self, files: &[(String, String)]) -> (Vec<LintResult>, LintSummary) {
        let mut results = Vec::with_capacity(files.len());
        let mut summary = LintSummary::default();

        for (filename, source) in files {
            let result = if filename.ends_with(".vue") {
                self.lint_sfc(source, filename)
            } else {
                self.lint_template(source, filename)
            };
            summary.error_count += result.error_count;
            summary.warning_count += result.warning_count;
            results.push(result);
        }

        summary.file_count = files.len();
        (results, summary)
    }

    fn run_session(
        &self,
        source: &str,
        filename: &str,
        mode: &str,
        template: TemplateBlock,
        script: ScriptInfo,
    ) -> LintResult {
        let key = (source.to_string(), combine_hash(self.fingerprint, mode));
        let session = {
            let mut sessions = self.sessions.lock();
            match sessions.get(&key) {
                Some(session) => {
                    tracing::trace!(target: "sgraffito_patina::linter", filename, "session cache hit");
                    Arc::clone(session)
                }
                None => {
                    let session = Arc::new(Mutex::new(DispatchSession::new(source, template, script)));
                    sessions.put(key, Arc::clone(&session));
                    session
                }
            }
        };

        let mut session = session.lock();
        session.register_all(&self.registry);
        let diagnostics = session.run(filename).to_vec();
        LintResult::from_diagnostics(filename, diagnostics, session.used_bindings().to_vec())
    }
}

impl Default for Linter {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn session_capacity(entries: usize) -> NonZeroUsize {
    NonZeroUsize::new(entries).unwrap_or(NonZeroUsize::MIN)
}

fn environment_diagnostic(reason: &str) -> LintDiagnostic {
    let message = format!(
        "The component's block structure could not be read ({reason}). \
         Fix the block structure, or lint this file with a complete SFC parser."
    );
    LintDiagnostic::error(ENVIRONMENT_RULE, message, 0, 0).with_loc(DiagnosticLoc {
        line: 1,
        column: 0,
        end_line: 1,
        end_column: 0,
    })
}
