// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Deep copies of subtrees.
//!
//! Copying runs in two steps. [`CloneVisitor`] reads a subtree into a
//! [`NodeTemplate`], then [`Ast::instantiate`] builds fresh nodes from the
//! template. The template holds no handles into the source tree, so it can be
//! instantiated into the same [`Ast`] or a different one, any number of times.
//!
//! A copy carries the payload, the comment, orphan comments, extension
//! comments, extents and parse status. It has no parent, no observers and no
//! extension data.

use jast_core::{AstError, AstResult, TextRange, TokenRange};

use super::traits::GenericVisitor;
use crate::arena::{NodeId, NodeListId};
use crate::ast::Ast;
use crate::node::ParseStatus;
use crate::nodes::{NodeKind, SlotMut, SlotRef, SyntaxKind};

/// Detached description of a subtree.
#[derive(Debug, Clone)]
pub struct NodeTemplate {
    /// Payload whose node and list slots are filled in on instantiation.
    kind: NodeKind,
    slots: Vec<SlotTemplate>,
    comment: Option<Box<NodeTemplate>>,
    orphan_comments: Vec<NodeTemplate>,
    extension_comments: Option<Vec<NodeTemplate>>,
    range: Option<TextRange>,
    token_range: Option<TokenRange>,
    parse_status: ParseStatus,
}

#[derive(Debug, Clone)]
enum SlotTemplate {
    Node(Box<NodeTemplate>),
    OptNode(Option<Box<NodeTemplate>>),
    List(Vec<NodeTemplate>),
    OptList(Option<Vec<NodeTemplate>>),
    Attr,
}

impl NodeTemplate {
    pub fn syntax_kind(&self) -> SyntaxKind {
        self.kind.syntax_kind()
    }

    /// Number of nodes the template instantiates.
    pub fn node_count(&self) -> usize {
        let slots: usize = self
            .slots
            .iter()
            .map(|slot| match slot {
                SlotTemplate::Node(t) => t.node_count(),
                SlotTemplate::OptNode(t) => t.as_ref().map_or(0, |t| t.node_count()),
                SlotTemplate::List(ts) => ts.iter().map(NodeTemplate::node_count).sum(),
                SlotTemplate::OptList(ts) => ts
                    .as_ref()
                    .map_or(0, |ts| ts.iter().map(NodeTemplate::node_count).sum()),
                SlotTemplate::Attr => 0,
            })
            .sum();
        let comments = self.comment.as_ref().map_or(0, |c| c.node_count())
            + self.orphan_comments.iter().map(NodeTemplate::node_count).sum::<usize>()
            + self
                .extension_comments
                .iter()
                .flatten()
                .map(NodeTemplate::node_count)
                .sum::<usize>();
        1 + slots + comments
    }
}

/// Reads a subtree into a [`NodeTemplate`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CloneVisitor;

impl CloneVisitor {
    fn template(&mut self, ast: &Ast, node: NodeId) -> NodeTemplate {
        ast.accept(node, self, &mut ())
    }

    fn templates(&mut self, ast: &Ast, list: NodeListId) -> Vec<NodeTemplate> {
        ast.items(list)
            .iter()
            .map(|item| self.template(ast, *item))
            .collect()
    }
}

impl GenericVisitor<()> for CloneVisitor {
    type Output = NodeTemplate;

    fn visit_node(&mut self, ast: &Ast, id: NodeId, _arg: &mut ()) -> NodeTemplate {
        let data = &ast[id];
        let slots = data
            .kind
            .slots()
            .into_iter()
            .map(|(_, slot)| match slot {
                SlotRef::Node(child) => SlotTemplate::Node(Box::new(self.template(ast, child))),
                SlotRef::OptNode(child) => {
                    SlotTemplate::OptNode(child.map(|c| Box::new(self.template(ast, c))))
                }
                SlotRef::List(list) => SlotTemplate::List(self.templates(ast, list)),
                SlotRef::OptList(list) => {
                    SlotTemplate::OptList(list.map(|l| self.templates(ast, l)))
                }
                SlotRef::Attr(_) => SlotTemplate::Attr,
            })
            .collect();
        NodeTemplate {
            kind: data.kind.clone(),
            slots,
            comment: data.comment.map(|c| Box::new(self.template(ast, c))),
            orphan_comments: data
                .orphan_comments
                .iter()
                .map(|c| self.template(ast, *c))
                .collect(),
            extension_comments: data.extension_comments.map(|l| self.templates(ast, l)),
            range: data.range,
            token_range: data.token_range.clone(),
            parse_status: data.parse_status,
        }
    }
}

/// A built child, ready to be written into a payload slot.
enum Built {
    Node(NodeId),
    OptNode(Option<NodeId>),
    List(NodeListId),
    OptList(Option<NodeListId>),
    Attr,
}

impl Ast {
    /// Read the subtree at `node` into a template.
    pub fn template(&self, node: NodeId) -> AstResult<NodeTemplate> {
        self.try_accept(node, &mut CloneVisitor, &mut ())
    }

    /// Build fresh nodes from `template`. Returns the new root, which has no
    /// parent.
    pub fn instantiate(&mut self, template: &NodeTemplate) -> AstResult<NodeId> {
        let mut built = Vec::with_capacity(template.slots.len());
        for slot in &template.slots {
            built.push(match slot {
                SlotTemplate::Node(t) => Built::Node(self.instantiate(t)?),
                SlotTemplate::OptNode(t) => Built::OptNode(match t {
                    Some(t) => Some(self.instantiate(t)?),
                    None => None,
                }),
                SlotTemplate::List(ts) => Built::List(self.instantiate_list(ts)?),
                SlotTemplate::OptList(ts) => Built::OptList(match ts {
                    Some(ts) => Some(self.instantiate_list(ts)?),
                    None => None,
                }),
                SlotTemplate::Attr => Built::Attr,
            });
        }

        let mut kind = template.kind.clone();
        for ((property, slot), built) in kind.slots_mut().into_iter().zip(built) {
            match (slot, built) {
                (SlotMut::Node(slot), Built::Node(id)) => *slot = id,
                (SlotMut::OptNode(slot), Built::OptNode(id)) => *slot = id,
                (SlotMut::List(slot), Built::List(id)) => *slot = id,
                (SlotMut::OptList(slot), Built::OptList(id)) => *slot = id,
                (SlotMut::Attr(_), Built::Attr) => {}
                _ => {
                    return Err(AstError::illegal_state(format!(
                        "template slot '{property}' does not match its payload"
                    )))
                }
            }
        }
        let id = self.create(kind)?;

        if let Some(comment) = &template.comment {
            let comment = self.instantiate(comment)?;
            self.set_comment(id, Some(comment))?;
        }
        for orphan in &template.orphan_comments {
            let orphan = self.instantiate(orphan)?;
            self.add_orphan_comment(id, orphan)?;
        }
        if let Some(comments) = &template.extension_comments {
            let list = self.instantiate_list(comments)?;
            self.set_extension_comments(id, Some(list))?;
        }
        self.set_token_range(id, template.token_range.clone())?;
        self.set_range(id, template.range)?;
        self.set_parse_status(id, template.parse_status)?;
        Ok(id)
    }

    fn instantiate_list(&mut self, templates: &[NodeTemplate]) -> AstResult<NodeListId> {
        let items = templates
            .iter()
            .map(|t| self.instantiate(t))
            .collect::<AstResult<Vec<_>>>()?;
        self.new_list(items)
    }

    /// Copy the subtree at `node` within this tree. The copy has no parent.
    pub fn deep_clone(&mut self, node: NodeId) -> AstResult<NodeId> {
        let template = self.template(node)?;
        self.instantiate(&template)
    }

    /// Copy the subtree at `node` into `target`.
    pub fn clone_into(&self, node: NodeId, target: &mut Ast) -> AstResult<NodeId> {
        let template = self.template(node)?;
        target.instantiate(&template)
    }
}
