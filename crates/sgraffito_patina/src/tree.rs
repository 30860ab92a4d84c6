//! Element tree over a flat token stream.
//!
//! Pug expresses nesting through indentation. The tree is built once per
//! token stream: each element knows its parent, children, siblings and
//! attribute tokens, and every token knows the innermost element that owns
//! it. Rules query the tree instead of re-deriving nesting from
//! `indent`/`outdent` tokens themselves.

use sgraffito_armature::TokenKind;
use sgraffito_carton::CompactString;

use crate::reconcile::ReconciledToken;

pub type NodeId = usize;

/// How an element was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// `div`, `my-component`
    Tag,
    /// `.foo` / `#bar` at the start of a line (an implicit `div`)
    Implicit,
    /// `+mixin`
    MixinCall,
}

#[derive(Debug, Clone)]
pub struct ElementNode {
    /// Tag name; `div` for implicit elements, the mixin name for calls
    pub name: CompactString,
    pub kind: ElementKind,
    /// Index of the token that starts the element
    pub token: usize,
    /// Index of the `tag` token, if the element has one
    pub tag_token: Option<usize>,
    /// Indices of the element's attribute tokens, in source order
    pub attributes: Vec<usize>,
    pub parent: Option<NodeId>,
    pub first_child: Option<NodeId>,
    pub last_child: Option<NodeId>,
    pub prev_sibling: Option<NodeId>,
    pub next_sibling: Option<NodeId>,
    /// Nesting depth, 0 for root elements
    pub depth: u32,
    /// Index of the token that closes the element (exclusive)
    pub end_token: usize,
}

/// Arena of elements built from a token stream.
#[derive(Debug, Clone, Default)]
pub struct ElementTree {
    nodes: Vec<ElementNode>,
    owners: Vec<Option<NodeId>>,
}

impl ElementTree {
    pub fn build(tokens: &[ReconciledToken]) -> Self {
        TreeBuilder::default().build(tokens)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &ElementNode {
        &self.nodes[id]
    }

    #[inline]
    pub fn nodes(&self) -> &[ElementNode] {
        &self.nodes
    }

    /// Root elements in source order.
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.parent.is_none())
            .map(|(id, _)| id)
    }

    /// Direct children in source order.
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.nodes[id].first_child,
        }
    }

    /// All descendants in document order.
    pub fn descendants(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut stack: Vec<NodeId> = self.children(id).collect();
        stack.reverse();
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            let mut children: Vec<NodeId> = self.children(next).collect();
            children.reverse();
            stack.extend(children);
            Some(next)
        })
    }

    /// The innermost element owning the token at `index`.
    #[inline]
    pub fn owner(&self, index: usize) -> Option<NodeId> {
        self.owners.get(index).copied().flatten()
    }

    /// The element started by the token at `index`, if any.
    pub fn element_at(&self, index: usize) -> Option<NodeId> {
        self.nodes.binary_search_by_key(&index, |node| node.token).ok()
    }
}

pub struct Children<'t> {
    tree: &'t ElementTree,
    next: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.nodes[current].next_sibling;
        Some(current)
    }
}

#[derive(Default)]
struct TreeBuilder {
    tree: ElementTree,
    /// Open elements with the indentation level of the line they started on
    stack: Vec<(NodeId, u32)>,
    level: u32,
    /// Element whose head is on the current line
    current: Option<NodeId>,
    line_start: bool,
    after_colon: bool,
    in_pipeless: bool,
}

impl TreeBuilder {
    fn build(mut self, tokens: &[ReconciledToken]) -> ElementTree {
        self.line_start = true;
        self.tree.owners.reserve(tokens.len());

        for (index, token) in tokens.iter().enumerate() {
            let owner = match token.kind() {
                TokenKind::Newline if self.in_pipeless => self.current_owner(),
                TokenKind::Newline => {
                    self.close_to(self.level, index);
                    self.new_line()
                }
                TokenKind::Indent { .. } => {
                    self.level += 1;
                    self.new_line()
                }
                TokenKind::Outdent => {
                    self.level = self.level.saturating_sub(1);
                    self.close_to(self.level, index);
                    self.new_line()
                }
                TokenKind::Eos => {
                    self.close_to(0, index);
                    None
                }
                TokenKind::Tag { name } => {
                    self.open(index, name.clone(), ElementKind::Tag, Some(index))
                }
                TokenKind::Call { name } => {
                    self.open(index, name.clone(), ElementKind::MixinCall, None)
                }
                TokenKind::Class { .. } | TokenKind::Id { .. }
                    if self.line_start || self.after_colon =>
                {
                    self.open(index, "div".into(), ElementKind::Implicit, None)
                }
                TokenKind::Colon => {
                    self.after_colon = true;
                    self.current_owner()
                }
                TokenKind::StartPipelessText => {
                    self.in_pipeless = true;
                    self.current_owner()
                }
                TokenKind::EndPipelessText => {
                    self.in_pipeless = false;
                    self.current_owner()
                }
                TokenKind::Attribute { .. } => {
                    if let Some(current) = self.current {
                        self.tree.nodes[current].attributes.push(index);
                    }
                    self.current_owner()
                }
                _ => {
                    let owner = self.current_owner();
                    self.line_start = false;
                    owner
                }
            };
            self.tree.owners.push(owner);
        }

        // A stream without `eos` still closes everything.
        self.close_to(0, tokens.len());
        self.tree
    }

    fn current_owner(&self) -> Option<NodeId> {
        self.current.or_else(|| self.stack.last().map(|&(id, _)| id))
    }

    fn new_line(&mut self) -> Option<NodeId> {
        self.current = None;
        self.line_start = true;
        self.after_colon = false;
        self.stack.last().map(|&(id, _)| id)
    }

    /// Close open elements that started on lines at `level` or deeper.
    fn close_to(&mut self, level: u32, index: usize) {
        while let Some(&(id, start_level)) = self.stack.last() {
            if start_level < level {
                break;
            }
            self.tree.nodes[id].end_token = index;
            self.stack.pop();
        }
    }

    fn open(
        &mut self,
        index: usize,
        name: CompactString,
        kind: ElementKind,
        tag_token: Option<usize>,
    ) -> Option<NodeId> {
        let parent = if self.after_colon {
            self.current.or_else(|| self.stack.last().map(|&(id, _)| id))
        } else {
            self.stack.last().map(|&(id, _)| id)
        };
        let id = self.tree.nodes.len();
        let prev_sibling = parent.and_then(|p| self.tree.nodes[p].last_child);

        self.tree.nodes.push(ElementNode {
            name,
            kind,
            token: index,
            tag_token,
            attributes: Vec::new(),
            parent,
            first_child: None,
            last_child: None,
            prev_sibling,
            next_sibling: None,
            depth: parent.map_or(0, |p| self.tree.nodes[p].depth + 1),
            end_token: index + 1,
        });

        match parent {
            Some(p) => {
                if let Some(prev) = prev_sibling {
                    self.tree.nodes[prev].next_sibling = Some(id);
                } else {
                    self.tree.nodes[p].first_child = Some(id);
                }
                self.tree.nodes[p].last_child = Some(id);
            }
            None => {
                // Link root siblings too.
                if let Some(prev) = self.tree.nodes[..id]
                    .iter()
                    .rposition(|node| node.parent.is_none())
                {
                    self.tree.nodes[prev].next_sibling = Some(id);
                    self.tree.nodes[id].prev_sibling = Some(prev);
                }
            }
        }

        self.stack.push((id, self.level));
        self.current = Some(id);
        self.line_start = false;
        self.after_colon = false;
        Some(id)
    }
}
