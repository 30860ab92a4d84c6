//! Rule trait and registry for lint rules.

use std::sync::Arc;

use crate::context::LintContext;
use crate::diagnostic::Severity;
use crate::directive::Directive;
use crate::reconcile::ReconciledToken;
use crate::sfc::TemplateBlock;
use crate::tree::{ElementNode, ElementTree, NodeId};
use sgraffito_carton::{combine_hash, hash_str, FxHashMap};

/// Rule category for organization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleCategory {
    /// Essential rules (vue/essential) - prevent errors
    Essential,
    /// Strongly recommended rules (vue/strongly-recommended)
    StronglyRecommended,
    /// Recommended rules (vue/recommended)
    Recommended,
    /// Rules enabled by every preset, they report nothing themselves
    Base,
}

/// Rule metadata
pub struct RuleMeta {
    /// Rule name (e.g., "vue/require-v-for-key")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Rule category
    pub category: RuleCategory,
    /// Whether rule is auto-fixable
    pub fixable: bool,
    /// Default severity
    pub default_severity: Severity,
    /// Message id to message template; `{{name}}` placeholders are
    /// interpolated by [`LintContext::report_message`]
    pub messages: &'static [(&'static str, &'static str)],
}

impl RuleMeta {
    /// Look up a message template by id.
    pub fn message(&self, id: &str) -> Option<&'static str> {
        self.messages
            .iter()
            .find(|(message_id, _)| *message_id == id)
            .map(|(_, template)| *template)
    }
}

/// A read-only view of the token stream at the current dispatch position.
///
/// Rules may look behind and ahead freely; the element tree answers
/// structural questions without re-walking indentation.
#[derive(Clone, Copy)]
pub struct TokenCursor<'t> {
    /// Index of the token being dispatched
    pub index: usize,
    pub tokens: &'t [ReconciledToken],
    pub tree: &'t ElementTree,
}

impl<'t> TokenCursor<'t> {
    #[inline]
    pub fn token(&self) -> &'t ReconciledToken {
        &self.tokens[self.index]
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&'t ReconciledToken> {
        self.tokens.get(index)
    }

    /// The element started by the current token, if any.
    #[inline]
    pub fn element(&self) -> Option<(NodeId, &'t ElementNode)> {
        let tree: &'t ElementTree = self.tree;
        tree.element_at(self.index).map(|id| (id, tree.node(id)))
    }

    /// The innermost element owning the current token.
    #[inline]
    pub fn owner(&self) -> Option<(NodeId, &'t ElementNode)> {
        let tree: &'t ElementTree = self.tree;
        tree.owner(self.index).map(|id| (id, tree.node(id)))
    }

    /// Attribute tokens of an element.
    pub fn attributes(&self, node: &'t ElementNode) -> impl Iterator<Item = &'t ReconciledToken> + 't {
        let tokens: &'t [ReconciledToken] = self.tokens;
        node.attributes.iter().map(move |&index| &tokens[index])
    }

    /// Find an attribute of `node` by exact name.
    pub fn find_attribute(
        &self,
        node: &'t ElementNode,
        names: &[&str],
    ) -> Option<&'t ReconciledToken> {
        self.attributes(node).find(|token| {
            token
                .as_attribute()
                .is_some_and(|(name, _)| names.contains(&name))
        })
    }

    /// Whether `node` carries the directive `v-{name}`, in any spelling.
    pub fn has_directive(&self, node: &'t ElementNode, name: &str) -> bool {
        self.attributes(node).any(|token| {
            token
                .as_attribute()
                .and_then(|(raw, _)| Directive::parse(raw))
                .is_some_and(|directive| directive.is(name))
        })
    }
}

/// Rule trait for implementing lint rules
///
/// Rules implement token handlers that are called during the single
/// dispatch pass. Each method receives a mutable reference to LintContext for
/// reporting diagnostics. Rules hold no per-file state; everything they need
/// comes from the context, its trackers and the cursor.
pub trait Rule: Send + Sync {
    /// Get rule metadata
    fn meta(&self) -> &'static RuleMeta;

    /// Configured options, serialized. Part of the session cache key, so
    /// two instances with different options never share diagnostics.
    fn options(&self) -> serde_json::Value {
        serde_json::Value::Null
    }

    /// Run on the extracted template block (called once per file, before
    /// any token handler)
    #[allow(unused_variables)]
    fn check_template_block(&self, ctx: &mut LintContext, block: &TemplateBlock) {}

    /// Called for every token that starts an element: a tag, the `.class` or
    /// `#id` of an implicit `div`, or a mixin call
    #[allow(unused_variables)]
    fn check_tag(&self, ctx: &mut LintContext, token: &ReconciledToken, cursor: &TokenCursor) {}

    /// Called on `start-attributes`
    #[allow(unused_variables)]
    fn enter_attributes(
        &self,
        ctx: &mut LintContext,
        token: &ReconciledToken,
        cursor: &TokenCursor,
    ) {
    }

    /// Called for each attribute token
    #[allow(unused_variables)]
    fn check_attribute(
        &self,
        ctx: &mut LintContext,
        token: &ReconciledToken,
        cursor: &TokenCursor,
    ) {
    }

    /// Called on `end-attributes`
    #[allow(unused_variables)]
    fn exit_attributes(
        &self,
        ctx: &mut LintContext,
        token: &ReconciledToken,
        cursor: &TokenCursor,
    ) {
    }

    /// Called for text tokens (inline, piped and pipeless text)
    #[allow(unused_variables)]
    fn check_text(&self, ctx: &mut LintContext, token: &ReconciledToken, cursor: &TokenCursor) {}

    #[allow(unused_variables)]
    fn on_indent(&self, ctx: &mut LintContext, token: &ReconciledToken, cursor: &TokenCursor) {}

    #[allow(unused_variables)]
    fn on_outdent(&self, ctx: &mut LintContext, token: &ReconciledToken, cursor: &TokenCursor) {}

    /// Called on `eos`
    #[allow(unused_variables)]
    fn check_end(&self, ctx: &mut LintContext, token: &ReconciledToken, cursor: &TokenCursor) {}
}

/// Registry holding all enabled lint rules
pub struct RuleRegistry {
    rules: Vec<Arc<dyn Rule>>,
    severities: FxHashMap<&'static str, Severity>,
}

impl RuleRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            severities: FxHashMap::default(),
        }
    }

    /// Register a rule at its default severity.
    ///
    /// Registering a rule name twice replaces the earlier instance.
    pub fn register(&mut self, rule: Box<dyn Rule>) {
        let rule: Arc<dyn Rule> = Arc::from(rule);
        let name = rule.meta().name;
        if let Some(existing) = self.rules.iter_mut().find(|r| r.meta().name == name) {
            *existing = rule;
        } else {
            self.rules.push(rule);
        }
    }

    /// Register a rule with an explicit severity.
    pub fn register_with_severity(&mut self, rule: Box<dyn Rule>, severity: Severity) {
        let name = rule.meta().name;
        self.register(rule);
        self.severities.insert(name, severity);
    }

    /// Remove a rule by name. Returns whether it was registered.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.rules.len();
        self.rules.retain(|rule| rule.meta().name != name);
        self.severities.remove(name);
        self.rules.len() != before
    }

    /// Get all registered rules
    pub fn rules(&self) -> &[Arc<dyn Rule>] {
        &self.rules
    }

    /// Severity a rule reports at: the override if one was set, else the
    /// rule's default.
    pub fn severity_of(&self, rule: &dyn Rule) -> Severity {
        let meta = rule.meta();
        self.severities
            .get(meta.name)
            .copied()
            .unwrap_or(meta.default_severity)
    }

    /// Whether a rule with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.rules.iter().any(|rule| rule.meta().name == name)
    }

    /// xxh3 fingerprint of the configuration: rule names, severities and
    /// serialized options, in registration order.
    pub fn fingerprint(&self) -> u64 {
        self.rules.iter().fold(hash_str(""), |hash, rule| {
            let hash = combine_hash(hash, rule.meta().name);
            let hash = combine_hash(hash, self.severity_of(rule.as_ref()).as_str());
            combine_hash(hash, &rule.options().to_string())
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    fn register_base(&mut self) {
        // ============================================
        // Base Rules
        // ============================================
        // Bridges that keep other tools' results correct. They never report.

        self.register(Box::new(crate::rules::vue::ScriptSetupUsesVars));
    }

    /// Create registry with only essential rules (errors only)
    ///
    /// Use this for minimal checking that only catches definite errors.
    pub fn with_essential() -> Self {
        let mut registry = Self::new();
        registry.register_base();

        // ============================================
        // Vue Essential Rules (Error)
        // ============================================
        // These rules help prevent errors and should be followed at all costs.

        registry.register(Box::new(crate::rules::vue::NoDeprecatedDollarScopedslotsApi));
        registry.register(Box::new(crate::rules::vue::NoDeprecatedFilter));
        registry.register(Box::new(crate::rules::vue::NoDupeVElseIf));
        registry.register(Box::new(crate::rules::vue::NoDuplicateAttributes::default()));
        registry.register(Box::new(crate::rules::vue::NoTemplateKey));
        registry.register(Box::new(crate::rules::vue::NoTextareaMustache));
        registry.register(Box::new(crate::rules::vue::NoUseVIfWithVFor::default()));
        registry.register(Box::new(crate::rules::vue::RequireComponentIs));
        registry.register(Box::new(crate::rules::vue::RequireVForKey));
        registry.register(Box::new(crate::rules::vue::UseVOnExact));
        registry.register(Box::new(crate::rules::vue::ValidTemplateRoot));
        registry.register(Box::new(crate::rules::vue::ValidVElseIf));
        registry.register(Box::new(crate::rules::vue::ValidVElse));
        registry.register(Box::new(crate::rules::vue::ValidVFor));
        registry.register(Box::new(crate::rules::vue::ValidVIf));
        registry.register(Box::new(crate::rules::vue::ValidVOn::default()));

        registry
    }

    /// Essential rules plus the strongly recommended ones (warnings).
    pub fn with_strongly_recommended() -> Self {
        let mut registry = Self::with_essential();

        // ============================================
        // Vue Strongly Recommended Rules (Warning)
        // ============================================
        // These rules improve readability and developer experience.

        registry.register(Box::new(crate::rules::vue::AttributeHyphenation::default()));
        registry.register(Box::new(
            crate::rules::vue::ComponentNameInTemplateCasing::default(),
        ));

        registry
    }

    /// Create registry with the recommended rule set
    ///
    /// This includes:
    /// - **Essential rules** (severity: Error) - Prevent errors
    /// - **Strongly recommended rules** (severity: Warning) - Improve readability
    /// - **Recommended rules** (severity: Warning) - Ensure consistency
    pub fn with_recommended() -> Self {
        let mut registry = Self::with_strongly_recommended();

        // ============================================
        // Vue Recommended Rules (Warning)
        // ============================================
        // These rules ensure consistency across the codebase.

        registry.register(Box::new(crate::rules::vue::ThisInTemplate::default()));

        registry
    }

    /// Every built-in rule, including the Vue 2 only ones.
    pub fn with_all() -> Self {
        let mut registry = Self::with_recommended();

        // Vue 2 allowed a single root element only.
        registry.register(Box::new(crate::rules::vue::NoMultipleTemplateRoot));

        registry
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::with_recommended()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_nested() {
        let essential = RuleRegistry::with_essential();
        let strongly = RuleRegistry::with_strongly_recommended();
        let recommended = RuleRegistry::with_recommended();
        let all = RuleRegistry::with_all();

        assert!(essential.len() < strongly.len());
        assert!(strongly.len() < recommended.len());
        assert!(recommended.len() < all.len());
        for rule in essential.rules() {
            assert!(all.contains(rule.meta().name));
        }
        assert!(essential.contains("vue/script-setup-uses-vars"));
        assert!(!recommended.contains("vue/no-multiple-template-root"));
    }

    #[test]
    fn test_register_replaces_same_name() {
        let mut registry = RuleRegistry::new();
        registry.register(Box::new(crate::rules::vue::RequireVForKey));
        registry.register_with_severity(
            Box::new(crate::rules::vue::RequireVForKey),
            Severity::Warning,
        );
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.severity_of(registry.rules()[0].as_ref()),
            Severity::Warning
        );
        assert!(registry.remove("vue/require-v-for-key"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_fingerprint_follows_options() {
        let mut a = RuleRegistry::new();
        a.register(Box::new(crate::rules::vue::NoDuplicateAttributes::default()));
        let mut b = RuleRegistry::new();
        b.register(Box::new(crate::rules::vue::NoDuplicateAttributes {
            allow_coexist_class: false,
            ..Default::default()
        }));
        assert_ne!(a.fingerprint(), b.fingerprint());
        assert_eq!(
            a.fingerprint(),
            RuleRegistry {
                rules: a.rules.clone(),
                severities: a.severities.clone(),
            }
            .fingerprint()
        );
    }

    #[test]
    fn test_message_lookup() {
        let meta = crate::rules::vue::ValidVElse.meta();
        assert!(meta.message("missingVIf").is_some());
        assert!(meta.message("nope").is_none());
    }
}
