//! Reader for the indented standardized-tree dump.
//!
//! One node per line; the number of leading dots is the node's depth:
//!
//! ```text
//! gamma
//! .<ID:Print>
//! .+
//! ..<INT:2>
//! ..<INT:3>
//! ```
//!
//! Leaves are written in angle brackets (`<ID:x>`, `<INT:5>`, `<STR:'hi'>`,
//! `<true>`, `<false>`, `<nil>`, `<dummy>`, `<Y*>`, `<()>`). Blank lines are
//! ignored. Each node remembers its 1-based input line.

use crate::tree::Sugar;
use crate::{BinaryOp, InternError, NodeKind, StNode, StringInterner, UnaryOp};

/// Error reading a standardized-tree dump.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ReadError {
    #[error("input contains no tree")]
    Empty,
    #[error("line {line}: the root node must not be indented (found depth {depth})")]
    IndentedRoot { line: u32, depth: usize },
    #[error("line {line}: a second root node; the input must hold exactly one tree")]
    MultipleRoots { line: u32 },
    #[error("line {line}: depth {depth} skips a level (deepest allowed here is {max})")]
    DepthJump { line: u32, depth: usize, max: usize },
    #[error("line {line}: unknown node label `{label}`")]
    UnknownLabel { line: u32, label: String },
    #[error("line {line}: malformed integer literal `{text}`")]
    BadInteger { line: u32, text: String },
    #[error("line {line}: identifier must not be empty")]
    EmptyIdentifier { line: u32 },
    #[error(transparent)]
    Intern(#[from] InternError),
}

/// Read a standardized tree from its indented text dump.
pub fn read_tree(text: &str, interner: &StringInterner) -> Result<StNode, ReadError> {
    let mut open: Vec<StNode> = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = u32::try_from(idx.saturating_add(1)).unwrap_or(u32::MAX);
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            continue;
        }

        let depth = trimmed.bytes().take_while(|&b| b == b'.').count();
        let label = &trimmed[depth..];

        if open.is_empty() {
            if depth != 0 {
                return Err(ReadError::IndentedRoot { line, depth });
            }
        } else if depth == 0 {
            return Err(ReadError::MultipleRoots { line });
        } else if depth > open.len() {
            return Err(ReadError::DepthJump {
                line,
                depth,
                max: open.len(),
            });
        }

        close_to(&mut open, depth.max(1));
        let kind = parse_label(label, line, interner)?;
        open.push(StNode::new(kind, line));
    }

    close_to(&mut open, 1);
    open.pop().ok_or(ReadError::Empty)
}

/// Attach finished nodes to their parents until `depth` nodes remain open.
fn close_to(open: &mut Vec<StNode>, depth: usize) {
    while open.len() > depth {
        let Some(node) = open.pop() else { break };
        if let Some(parent) = open.last_mut() {
            parent.children.push(node);
        }
    }
}

fn parse_label(label: &str, line: u32, interner: &StringInterner) -> Result<NodeKind, ReadError> {
    if let Some(inner) = label.strip_prefix('<').and_then(|l| l.strip_suffix('>')) {
        return parse_leaf(inner, line, interner);
    }

    let kind = match label {
        "gamma" => NodeKind::Gamma,
        "lambda" => NodeKind::Lambda,
        "->" => NodeKind::Conditional,
        "tau" => NodeKind::Tau,
        "," => NodeKind::Comma,
        _ => {
            if let Some(op) = BinaryOp::from_label(label) {
                NodeKind::Binary(op)
            } else if let Some(op) = UnaryOp::from_label(label) {
                NodeKind::Unary(op)
            } else if let Some(sugar) = Sugar::from_label(label) {
                NodeKind::Sugar(sugar)
            } else {
                return Err(ReadError::UnknownLabel {
                    line,
                    label: label.to_string(),
                });
            }
        }
    };
    Ok(kind)
}

fn parse_leaf(inner: &str, line: u32, interner: &StringInterner) -> Result<NodeKind, ReadError> {
    if let Some(name) = inner.strip_prefix("ID:") {
        if name.is_empty() {
            return Err(ReadError::EmptyIdentifier { line });
        }
        return Ok(NodeKind::Identifier(interner.try_intern(name)?));
    }
    if let Some(digits) = inner.strip_prefix("INT:") {
        return digits
            .parse::<i64>()
            .map(NodeKind::Integer)
            .map_err(|_| ReadError::BadInteger {
                line,
                text: digits.to_string(),
            });
    }
    if let Some(text) = inner.strip_prefix("STR:") {
        let text = text
            .strip_prefix('\'')
            .and_then(|t| t.strip_suffix('\''))
            .unwrap_or(text);
        return Ok(NodeKind::Str(text.to_string()));
    }

    let kind = match inner {
        "true" => NodeKind::True,
        "false" => NodeKind::False,
        "nil" => NodeKind::Nil,
        "dummy" => NodeKind::Dummy,
        "Y*" => NodeKind::YStar,
        "()" => NodeKind::EmptyParams,
        _ => {
            return Err(ReadError::UnknownLabel {
                line,
                label: format!("<{inner}>"),
            })
        }
    };
    Ok(kind)
}
