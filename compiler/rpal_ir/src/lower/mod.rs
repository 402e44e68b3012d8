//! Lowering from standardized tree to control structures.
//!
//! A pre-order walk emits each node before its children. Two nodes are
//! special:
//!
//! - `lambda` opens a new numbered block; only a `Delta` marker referring to
//!   it is emitted in the enclosing sequence.
//! - `->` becomes a `Beta` item carrying both lowered branches, followed by
//!   the lowered condition, so the condition is evaluated before either
//!   branch reaches the control stack.
//!
//! Any sugar node is refused: the machine only runs standardized trees.

use std::rc::Rc;

use crate::control::{Beta, ControlBlock, ControlItem, ControlKind, ControlStructure, Params};
use crate::stack::ensure_sufficient_stack;
use crate::{Builtin, InternError, NodeKind, StNode, StringInterner};

/// Error building control structures from a tree.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StructureError {
    #[error("line {line}: `{label}` survived standardization; refusing to run an unstandardized tree")]
    NotStandardized { label: &'static str, line: u32 },
    #[error("line {line}: `{label}` expects {expected} children, found {found}")]
    Malformed {
        label: &'static str,
        line: u32,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: `tau` must have at least one element")]
    EmptyTau { line: u32 },
    #[error("line {line}: lambda must bind an identifier, a `,` list of identifiers, or `()`")]
    InvalidParams { line: u32 },
    #[error("line {line}: `{label}` is only valid as a lambda's bound variable")]
    MisplacedParams { label: &'static str, line: u32 },
    #[error("line {line}: `{label}` has children and cannot be lowered as a leaf")]
    NotALeaf { label: &'static str, line: u32 },
    #[error(transparent)]
    Intern(#[from] InternError),
}

/// Partition a standardized tree into control blocks.
///
/// The tree itself becomes the body of root block 0, which binds nothing.
pub fn build_control(
    tree: &StNode,
    interner: &StringInterner,
) -> Result<ControlStructure, StructureError> {
    let mut lowerer = Lowerer {
        interner,
        next_index: 1,
        blocks: Vec::new(),
    };
    let root = lowerer.lower_block(0, Params::new(), tree)?;
    let mut blocks = lowerer.blocks;
    blocks.sort_by_key(|block| block.index);
    Ok(ControlStructure { root, blocks })
}

struct Lowerer<'a> {
    interner: &'a StringInterner,
    next_index: usize,
    blocks: Vec<Rc<ControlBlock>>,
}

impl Lowerer<'_> {
    fn lower_block(
        &mut self,
        index: usize,
        params: Params,
        body: &StNode,
    ) -> Result<Rc<ControlBlock>, StructureError> {
        let block = Rc::new(ControlBlock {
            index,
            params,
            body: self.lower_seq(body)?,
        });
        self.blocks.push(Rc::clone(&block));
        Ok(block)
    }

    fn lower_seq(&mut self, node: &StNode) -> Result<Vec<ControlItem>, StructureError> {
        let mut out = Vec::new();
        self.lower_into(node, &mut out)?;
        Ok(out)
    }

    fn lower_into(
        &mut self,
        node: &StNode,
        out: &mut Vec<ControlItem>,
    ) -> Result<(), StructureError> {
        ensure_sufficient_stack(|| self.lower_node(node, out))
    }

    fn lower_node(
        &mut self,
        node: &StNode,
        out: &mut Vec<ControlItem>,
    ) -> Result<(), StructureError> {
        let line = node.line;
        let children = &node.children;

        let kind = match &node.kind {
            NodeKind::Gamma => {
                expect_children(node, 2)?;
                ControlKind::Gamma
            }
            NodeKind::Binary(op) => {
                expect_children(node, 2)?;
                ControlKind::Binary(*op)
            }
            NodeKind::Unary(op) => {
                expect_children(node, 1)?;
                ControlKind::Unary(*op)
            }
            NodeKind::Tau => {
                if children.is_empty() {
                    return Err(StructureError::EmptyTau { line });
                }
                ControlKind::Tau(children.len())
            }
            NodeKind::Lambda => {
                expect_children(node, 2)?;
                let params = self.params(&children[0])?;
                let index = self.next_index;
                self.next_index = self.next_index.saturating_add(1);
                let block = self.lower_block(index, params, &children[1])?;
                out.push(ControlItem::new(ControlKind::Delta(block), line));
                return Ok(());
            }
            NodeKind::Conditional => {
                expect_children(node, 3)?;
                let beta = Beta {
                    then: self.lower_seq(&children[1])?,
                    otherwise: self.lower_seq(&children[2])?,
                };
                out.push(ControlItem::new(ControlKind::Beta(Rc::new(beta)), line));
                return self.lower_into(&children[0], out);
            }
            NodeKind::Comma | NodeKind::EmptyParams => {
                return Err(StructureError::MisplacedParams {
                    label: node.kind.tag(),
                    line,
                });
            }
            NodeKind::Sugar(sugar) => {
                return Err(StructureError::NotStandardized {
                    label: sugar.label(),
                    line,
                });
            }
            leaf => {
                expect_children(node, 0)?;
                self.lower_leaf(leaf, line)?
            }
        };

        out.push(ControlItem::new(kind, line));
        for child in children {
            self.lower_into(child, out)?;
        }
        Ok(())
    }

    fn lower_leaf(&self, kind: &NodeKind, line: u32) -> Result<ControlKind, StructureError> {
        let lowered = match kind {
            NodeKind::Identifier(name) => ControlKind::Identifier {
                name: *name,
                builtin: Builtin::from_name(&self.interner.lookup(*name)),
            },
            NodeKind::Integer(n) => ControlKind::Int(*n),
            NodeKind::Str(s) => ControlKind::Str(Rc::from(s.as_str())),
            NodeKind::True => ControlKind::Bool(true),
            NodeKind::False => ControlKind::Bool(false),
            NodeKind::Nil => ControlKind::Tau(0),
            NodeKind::YStar => ControlKind::YStar,
            NodeKind::Dummy => ControlKind::Dummy,
            NodeKind::Gamma
            | NodeKind::Lambda
            | NodeKind::Conditional
            | NodeKind::Tau
            | NodeKind::Comma
            | NodeKind::Binary(_)
            | NodeKind::Unary(_)
            | NodeKind::EmptyParams
            | NodeKind::Sugar(_) => {
                return Err(StructureError::NotALeaf {
                    label: kind.tag(),
                    line,
                })
            }
        };
        Ok(lowered)
    }

    fn params(&self, bound: &StNode) -> Result<Params, StructureError> {
        match &bound.kind {
            NodeKind::Identifier(name) => Ok(Params::from_slice(&[*name])),
            NodeKind::EmptyParams => Ok(Params::from_slice(&[self.interner.try_intern("()")?])),
            NodeKind::Comma if !bound.children.is_empty() => bound
                .children
                .iter()
                .map(|child| match child.kind {
                    NodeKind::Identifier(name) => Ok(name),
                    _ => Err(StructureError::InvalidParams { line: child.line }),
                })
                .collect(),
            _ => Err(StructureError::InvalidParams { line: bound.line }),
        }
    }
}

fn expect_children(node: &StNode, expected: usize) -> Result<(), StructureError> {
    if node.children.len() == expected {
        Ok(())
    } else {
        Err(StructureError::Malformed {
            label: node.kind.tag(),
            line: node.line,
            expected,
            found: node.children.len(),
        })
    }
}
