//! Single-pass token dispatch shared by all rules.
//!
//! Tokenizing, reconciling and building the element tree happen once per
//! document text and are cached process-wide. A [`DispatchSession`] then
//! walks the tokens once, updates the shared trackers and calls every
//! registered rule's handler for each token. Running a session again only
//! runs rules that were registered since the last pass.

use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use sgraffito_armature::{tokenize, TokenKind};
use sgraffito_carton::{CompactString, LineIndex};

use crate::context::LintContext;
use crate::diagnostic::{LintDiagnostic, Severity};
use crate::reconcile::{reconcile, ReconciledToken};
use crate::rule::{Rule, RuleRegistry, TokenCursor};
use crate::script::ScriptInfo;
use crate::sfc::TemplateBlock;
use crate::tree::ElementTree;

/// Default number of token streams kept in the process-wide cache.
pub const DEFAULT_CACHE_CAPACITY: usize = 128;

/// Keyed by document text and template offset: a bare template and an SFC
/// with the same text tokenize different ranges.
static TOKEN_STREAMS: Lazy<Mutex<LruCache<(String, u32), Arc<TokenStream>>>> =
    Lazy::new(|| Mutex::new(LruCache::new(capacity(DEFAULT_CACHE_CAPACITY))));

#[inline]
fn capacity(capacity: usize) -> NonZeroUsize {
    NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN)
}

/// Resize the process-wide token stream cache.
pub fn set_cache_capacity(entries: usize) {
    TOKEN_STREAMS.lock().resize(capacity(entries));
}

/// Drop every cached token stream.
pub fn clear_cache() {
    TOKEN_STREAMS.lock().clear();
}

/// Reconciled tokens of one template and the element tree built from them.
#[derive(Debug, Default)]
pub struct TokenStream {
    pub tokens: Vec<ReconciledToken>,
    pub tree: ElementTree,
    /// The tokenizer rejected the template; `tokens` is empty
    pub failed: bool,
}

impl TokenStream {
    /// Tokenize and reconcile a template block of `source`.
    ///
    /// Malformed Pug yields an empty, failed stream instead of an error.
    pub fn build(block: &TemplateBlock) -> Self {
        match tokenize(&block.content) {
            Ok(tokens) => {
                let tokens = reconcile(tokens, &block.content, block.offset, block.line);
                let tree = ElementTree::build(&tokens);
                Self {
                    tokens,
                    tree,
                    failed: false,
                }
            }
            Err(error) => {
                tracing::debug!(
                    target: "sgraffito_patina::dispatcher",
                    %error,
                    "template could not be tokenized, skipping token rules"
                );
                Self {
                    failed: true,
                    ..Self::default()
                }
            }
        }
    }

    /// Cached [`build`](Self::build), keyed by the whole document text.
    pub fn cached(source: &str, block: &TemplateBlock) -> Arc<Self> {
        let key = (source.to_string(), block.offset);
        if let Some(stream) = TOKEN_STREAMS.lock().get(&key) {
            tracing::trace!(target: "sgraffito_patina::dispatcher", "token stream cache hit");
            return Arc::clone(stream);
        }
        tracing::trace!(target: "sgraffito_patina::dispatcher", "token stream cache miss");

        let stream = Arc::new(Self::build(block));
        TOKEN_STREAMS.lock().put(key, Arc::clone(&stream));
        stream
    }
}

struct RegisteredRule {
    rule: Arc<dyn Rule>,
    severity: Severity,
    already_processed: bool,
}

/// One dispatch cache entry: a document, its token stream and the rules
/// registered against it.
pub struct DispatchSession {
    source: String,
    template: TemplateBlock,
    script: ScriptInfo,
    line_index: LineIndex,
    stream: Arc<TokenStream>,
    rules: Vec<RegisteredRule>,
    diagnostics: Vec<LintDiagnostic>,
    used_bindings: Vec<CompactString>,
}

impl DispatchSession {
    pub fn new(source: impl Into<String>, template: TemplateBlock, script: ScriptInfo) -> Self {
        let source = source.into();
        let stream = TokenStream::cached(&source, &template);
        let line_index = LineIndex::new(&source);
        Self {
            source,
            template,
            script,
            line_index,
            stream,
            rules: Vec::new(),
            diagnostics: Vec::new(),
            used_bindings: Vec::new(),
        }
    }

    /// Register a rule. A rule whose name is already registered is ignored.
    ///
    /// Returns whether the rule was added.
    pub fn register(&mut self, rule: Arc<dyn Rule>, severity: Severity) -> bool {
        let name = rule.meta().name;
        if self.rules.iter().any(|r| r.rule.meta().name == name) {
            return false;
        }
        self.rules.push(RegisteredRule {
            rule,
            severity,
            already_processed: false,
        });
        true
    }

    /// Register every rule of a registry with its configured severity.
    pub fn register_all(&mut self, registry: &RuleRegistry) {
        for rule in registry.rules() {
            let severity = registry.severity_of(rule.as_ref());
            self.register(Arc::clone(rule), severity);
        }
    }

    /// Whether every registered rule has already run.
    pub fn is_processed(&self) -> bool {
        self.rules.iter().all(|r| r.already_processed)
    }

    pub fn tokens(&self) -> &[ReconciledToken] {
        &self.stream.tokens
    }

    pub fn diagnostics(&self) -> &[LintDiagnostic] {
        &self.diagnostics
    }

    /// Script bindings the template uses, in first-use order.
    pub fn used_bindings(&self) -> &[CompactString] {
        &self.used_bindings
    }

    /// Run one pass for the rules that have not run yet.
    pub fn run(&mut self, filename: &str) -> &[LintDiagnostic] {
        let pending: Vec<usize> = self
            .rules
            .iter()
            .enumerate()
            .filter(|(_, r)| !r.already_processed)
            .map(|(i, _)| i)
            .collect();
        if pending.is_empty() {
            tracing::trace!(target: "sgraffito_patina::dispatcher", "session already processed");
            return &self.diagnostics;
        }

        let (diagnostics, used) = {
            let mut ctx = LintContext::new(
                &self.source,
                filename,
                &self.line_index,
                &self.template,
                &self.script,
            );

            for &i in &pending {
                let registered = &self.rules[i];
                ctx.enter_rule(registered.rule.meta(), registered.severity);
                registered.rule.check_template_block(&mut ctx, &self.template);
            }

            let stream: &TokenStream = &self.stream;
            for index in 0..stream.tokens.len() {
                ctx.trackers_mut()
                    .update(index, &stream.tokens, &stream.tree);
                let cursor = TokenCursor {
                    index,
                    tokens: &stream.tokens,
                    tree: &stream.tree,
                };
                let token = &stream.tokens[index];
                let starts_element = stream.tree.element_at(index).is_some();

                for &i in &pending {
                    let registered = &self.rules[i];
                    ctx.enter_rule(registered.rule.meta(), registered.severity);
                    dispatch(registered.rule.as_ref(), &mut ctx, token, &cursor, starts_element);
                }
            }

            ctx.into_parts()
        };

        for &i in &pending {
            self.rules[i].already_processed = true;
        }
        self.diagnostics.extend(diagnostics);
        for name in used {
            if !self.used_bindings.contains(&name) {
                self.used_bindings.push(name);
            }
        }
        &self.diagnostics
    }
}

/// Call the handler of `rule` for the kind of `token`.
fn dispatch(
    rule: &dyn Rule,
    ctx: &mut LintContext,
    token: &ReconciledToken,
    cursor: &TokenCursor,
    starts_element: bool,
) {
    if starts_element {
        rule.check_tag(ctx, token, cursor);
    }
    match token.kind() {
        TokenKind::StartAttributes => rule.enter_attributes(ctx, token, cursor),
        TokenKind::Attribute { .. } => rule.check_attribute(ctx, token, cursor),
        TokenKind::EndAttributes => rule.exit_attributes(ctx, token, cursor),
        TokenKind::Text { .. } => rule.check_text(ctx, token, cursor),
        TokenKind::Indent { .. } => rule.on_indent(ctx, token, cursor),
        TokenKind::Outdent => rule.on_outdent(ctx, token, cursor),
        TokenKind::Eos => rule.check_end(ctx, token, cursor),
        TokenKind::Tag { .. }
        | TokenKind::Class { .. }
        | TokenKind::Id { .. }
        | TokenKind::Call { .. }
        | TokenKind::AndAttributes { .. }
        | TokenKind::TextHtml { .. }
        | TokenKind::Code { .. }
        | TokenKind::Comment { .. }
        | TokenKind::Doctype { .. }
        | TokenKind::Control { .. }
        | TokenKind::Dot
        | TokenKind::Colon
        | TokenKind::Slash
        | TokenKind::StartPipelessText
        | TokenKind::EndPipelessText
        | TokenKind::Newline => {}
    }
}
