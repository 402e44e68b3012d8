//! Standardized tree.
//!
//! After standardization every construct is one of gamma (application),
//! lambda, `->`, tau, an operator, or a leaf. The sugar kinds are kept in the
//! vocabulary only so that an unstandardized tree can be recognized and
//! rejected with a precise location.

use crate::{BinaryOp, Name, UnaryOp};

/// Node label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// Application of the first child to the second.
    Gamma,
    /// Bound variable(s) and body.
    Lambda,
    /// `cond -> then | else`.
    Conditional,
    /// Tuple construction from all children.
    Tau,
    /// Bound-variable list of a multi-parameter lambda.
    Comma,
    Binary(BinaryOp),
    Unary(UnaryOp),
    Identifier(Name),
    Integer(i64),
    Str(String),
    True,
    False,
    Nil,
    Dummy,
    /// The fixed-point primitive.
    YStar,
    /// `()` as a bound variable.
    EmptyParams,
    /// Surface syntax that standardization should have removed.
    Sugar(Sugar),
}

/// Constructs that only exist before standardization.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Sugar {
    Let,
    Where,
    Within,
    Rec,
    And,
    FunctionForm,
    At,
    Definition,
}

impl Sugar {
    pub fn from_label(label: &str) -> Option<Self> {
        let sugar = match label {
            "let" => Sugar::Let,
            "where" => Sugar::Where,
            "within" => Sugar::Within,
            "rec" => Sugar::Rec,
            "and" => Sugar::And,
            "function_form" => Sugar::FunctionForm,
            "@" => Sugar::At,
            "=" => Sugar::Definition,
            _ => return None,
        };
        Some(sugar)
    }

    pub fn label(self) -> &'static str {
        match self {
            Sugar::Let => "let",
            Sugar::Where => "where",
            Sugar::Within => "within",
            Sugar::Rec => "rec",
            Sugar::And => "and",
            Sugar::FunctionForm => "function_form",
            Sugar::At => "@",
            Sugar::Definition => "=",
        }
    }
}

impl NodeKind {
    /// Short label for diagnostics. Leaves are described by their tag only.
    pub fn tag(&self) -> &'static str {
        match self {
            NodeKind::Gamma => "gamma",
            NodeKind::Lambda => "lambda",
            NodeKind::Conditional => "->",
            NodeKind::Tau => "tau",
            NodeKind::Comma => ",",
            NodeKind::Binary(op) => op.label(),
            NodeKind::Unary(op) => op.label(),
            NodeKind::Identifier(_) => "<ID>",
            NodeKind::Integer(_) => "<INT>",
            NodeKind::Str(_) => "<STR>",
            NodeKind::True => "<true>",
            NodeKind::False => "<false>",
            NodeKind::Nil => "<nil>",
            NodeKind::Dummy => "<dummy>",
            NodeKind::YStar => "<Y*>",
            NodeKind::EmptyParams => "<()>",
            NodeKind::Sugar(sugar) => sugar.label(),
        }
    }
}

/// A standardized-tree node with the input line it was read from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StNode {
    pub kind: NodeKind,
    pub line: u32,
    pub children: Vec<StNode>,
}

impl StNode {
    pub fn new(kind: NodeKind, line: u32) -> Self {
        StNode {
            kind,
            line,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_children(mut self, children: Vec<StNode>) -> Self {
        self.children = children;
        self
    }

    /// True when no sugar node remains anywhere in the tree.
    pub fn is_standardized(&self) -> bool {
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            if matches!(node.kind, NodeKind::Sugar(_)) {
                return false;
            }
            pending.extend(node.children.iter());
        }
        true
    }
}
