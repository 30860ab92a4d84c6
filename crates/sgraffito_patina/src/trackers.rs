//! Structural state shared by all rules during one dispatch pass.
//!
//! The dispatcher updates these trackers once per token, before any rule
//! handler runs for that token. Rules read them through
//! [`LintContext::trackers`](crate::LintContext::trackers).

use sgraffito_armature::TokenKind;
use sgraffito_carton::{is_known_element_name, CompactString};

use crate::directive::{unquote, Directive};
use crate::reconcile::ReconciledToken;
use crate::tree::{ElementTree, NodeId};

/// Indentation depth: `indent` increments, `outdent` decrements.
#[derive(Debug, Clone, Copy, Default)]
pub struct DepthCounter {
    depth: u32,
}

impl DepthCounter {
    #[inline]
    pub fn get(&self) -> u32 {
        self.depth
    }

    #[inline]
    fn on_indent(&mut self) {
        self.depth += 1;
    }

    #[inline]
    fn on_outdent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

/// The element whose head is being walked.
#[derive(Debug, Clone, Default)]
pub struct CurrentTag {
    node: Option<NodeId>,
    name: CompactString,
}

impl CurrentTag {
    #[inline]
    pub fn node(&self) -> Option<NodeId> {
        self.node
    }

    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.node.map(|_| self.name.as_str())
    }
}

/// Attributes of the current `( ... )` block.
#[derive(Debug, Clone, Default)]
pub struct AttributeScope {
    attributes: Vec<usize>,
    open: bool,
}

impl AttributeScope {
    /// Token indices of the attributes seen so far in this block.
    #[inline]
    pub fn tokens(&self) -> &[usize] {
        &self.attributes
    }

    /// Whether the block is still being read (`end-attributes` not reached).
    #[inline]
    pub fn is_open(&self) -> bool {
        self.open
    }

    fn reset(&mut self) {
        self.attributes.clear();
        self.open = true;
    }

    fn push(&mut self, index: usize) {
        if self.open {
            self.attributes.push(index);
        }
    }

    fn freeze(&mut self) {
        self.open = false;
    }
}

/// A live `v-if` chain at one nesting depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainEntry {
    /// Index of the `v-if` attribute token that started the chain
    pub start: usize,
    /// Conditions of the `v-if` and every `v-else-if` so far, verbatim
    pub conditions: Vec<CompactString>,
}

/// Conditional chains per element nesting depth.
///
/// Entering an element clears the chains of deeper levels, which is the
/// tree form of "an outdent leaves the level". An element without
/// `v-if`/`v-else-if`/`v-else` clears the chain at its own depth.
#[derive(Debug, Clone, Default)]
pub struct ConditionalChainStack {
    entries: Vec<Option<ChainEntry>>,
}

impl ConditionalChainStack {
    #[inline]
    pub fn entry(&self, depth: u32) -> Option<&ChainEntry> {
        self.entries.get(depth as usize).and_then(Option::as_ref)
    }

    #[inline]
    pub fn is_live(&self, depth: u32) -> bool {
        self.entry(depth).is_some()
    }

    /// Whether `condition` was already seen in the chain at `depth`.
    /// Conditions are compared verbatim.
    pub fn has_condition(&self, depth: u32, condition: &str) -> bool {
        self.entry(depth)
            .is_some_and(|entry| entry.conditions.iter().any(|c| c == condition))
    }

    fn slot(&mut self, depth: u32) -> &mut Option<ChainEntry> {
        let depth = depth as usize;
        self.entries.truncate(depth + 1);
        if self.entries.len() <= depth {
            self.entries.resize(depth + 1, None);
        }
        &mut self.entries[depth]
    }

    /// Apply an element's conditional directives.
    fn on_element(&mut self, depth: u32, conditional: Conditional) {
        let slot = self.slot(depth);
        match conditional {
            Conditional::If { token, condition } => {
                *slot = Some(ChainEntry {
                    start: token,
                    conditions: vec![condition],
                });
            }
            Conditional::ElseIf { condition } => {
                if let Some(entry) = slot {
                    entry.conditions.push(condition);
                }
            }
            Conditional::Else => {}
            Conditional::None => *slot = None,
        }
    }
}

enum Conditional {
    If { token: usize, condition: CompactString },
    ElseIf { condition: CompactString },
    Else,
    None,
}

impl Conditional {
    fn of(tokens: &[ReconciledToken], attributes: &[usize]) -> Self {
        let mut result = Self::None;
        for &index in attributes {
            let Some((name, value)) = tokens[index].as_attribute() else {
                continue;
            };
            let condition = || CompactString::from(value.map(unquote).unwrap_or_default().trim());
            match Directive::parse(name).map(|d| d.name) {
                Some("if") => {
                    return Self::If {
                        token: index,
                        condition: condition(),
                    }
                }
                Some("else-if") if !matches!(result, Self::ElseIf { .. }) => {
                    result = Self::ElseIf {
                        condition: condition(),
                    }
                }
                Some("else") if matches!(result, Self::None) => result = Self::Else,
                _ => {}
            }
        }
        result
    }
}

/// Tracker bundle maintained by the dispatcher.
#[derive(Debug, Clone, Default)]
pub struct Trackers {
    depth: DepthCounter,
    current_tag: CurrentTag,
    attributes: AttributeScope,
    chains: ConditionalChainStack,
    /// Chain at the current element's depth before the element was applied
    chain_before: Option<ChainEntry>,
}

impl Trackers {
    /// Indentation depth of the current line.
    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth.get()
    }

    #[inline]
    pub fn current_tag(&self) -> &CurrentTag {
        &self.current_tag
    }

    #[inline]
    pub fn attributes(&self) -> &AttributeScope {
        &self.attributes
    }

    #[inline]
    pub fn chains(&self) -> &ConditionalChainStack {
        &self.chains
    }

    /// The chain that preceded the current element at its depth: what a
    /// `v-else`/`v-else-if` on this element attaches to.
    #[inline]
    pub fn chain_before(&self) -> Option<&ChainEntry> {
        self.chain_before.as_ref()
    }

    pub(crate) fn update(&mut self, index: usize, tokens: &[ReconciledToken], tree: &ElementTree) {
        match tokens[index].kind() {
            TokenKind::Indent { .. } => self.depth.on_indent(),
            TokenKind::Outdent => self.depth.on_outdent(),
            TokenKind::StartAttributes => self.attributes.reset(),
            TokenKind::Attribute { .. } => self.attributes.push(index),
            TokenKind::EndAttributes => self.attributes.freeze(),
            _ => {}
        }

        if let Some(id) = tree.element_at(index) {
            let node = tree.node(id);
            self.current_tag = CurrentTag {
                node: Some(id),
                name: node.name.clone(),
            };
            let slot = self.chains.slot(node.depth);
            self.chain_before = slot.clone();
            self.chains
                .on_element(node.depth, Conditional::of(tokens, &node.attributes));
        }
    }
}

/// Whether `name` is a custom component: not a known HTML/SVG/MathML element
/// and not bound through an `is` attribute.
pub fn is_custom_component<'t>(
    name: &str,
    attributes: impl IntoIterator<Item = &'t ReconciledToken>,
) -> bool {
    if is_known_element_name(name) {
        return false;
    }
    !attributes.into_iter().any(|token| {
        token
            .as_attribute()
            .is_some_and(|(attr, _)| matches!(attr, "is" | ":is" | "v-bind:is"))
    })
}
