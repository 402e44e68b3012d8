//! Operator tags.
//!
//! The standardized tree spells operators with the RPAL labels (`gr`, `eq`,
//! `&`, ...). Both the label and a conventional symbol are kept so that
//! diagnostics read naturally.

use std::fmt;

/// Binary operators: arithmetic, comparison, logic and tuple augmentation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
    Or,
    And,
    Aug,
}

impl BinaryOp {
    /// Parse a standardized-tree label.
    pub fn from_label(label: &str) -> Option<Self> {
        let op = match label {
            "+" => BinaryOp::Add,
            "-" => BinaryOp::Sub,
            "*" => BinaryOp::Mul,
            "/" => BinaryOp::Div,
            "**" => BinaryOp::Pow,
            "ls" => BinaryOp::Lt,
            "le" => BinaryOp::Le,
            "gr" => BinaryOp::Gt,
            "ge" => BinaryOp::Ge,
            "eq" => BinaryOp::Eq,
            "ne" => BinaryOp::Ne,
            "or" => BinaryOp::Or,
            "&" => BinaryOp::And,
            "aug" => BinaryOp::Aug,
            _ => return None,
        };
        Some(op)
    }

    /// The standardized-tree label.
    pub fn label(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Pow => "**",
            BinaryOp::Lt => "ls",
            BinaryOp::Le => "le",
            BinaryOp::Gt => "gr",
            BinaryOp::Ge => "ge",
            BinaryOp::Eq => "eq",
            BinaryOp::Ne => "ne",
            BinaryOp::Or => "or",
            BinaryOp::And => "&",
            BinaryOp::Aug => "aug",
        }
    }

    /// Conventional symbol, for error messages.
    pub fn as_symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Pow => "**",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::Eq => "=",
            BinaryOp::Ne => "<>",
            BinaryOp::Or => "or",
            BinaryOp::And => "&",
            BinaryOp::Aug => "aug",
        }
    }

    /// True for the five integer arithmetic operators.
    pub fn is_arithmetic(self) -> bool {
        matches!(
            self,
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Pow
        )
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}

/// Unary operators.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Not,
    Neg,
}

impl UnaryOp {
    /// Parse a standardized-tree label.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "not" => Some(UnaryOp::Not),
            "neg" => Some(UnaryOp::Neg),
            _ => None,
        }
    }

    /// The standardized-tree label.
    pub fn label(self) -> &'static str {
        match self {
            UnaryOp::Not => "not",
            UnaryOp::Neg => "neg",
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
