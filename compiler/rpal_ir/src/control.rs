//! Control structures: the machine-ready form of a standardized tree.
//!
//! Each lambda becomes a numbered `ControlBlock` whose body is a flat
//! sequence of `ControlItem`s. The machine pushes a body onto its control
//! stack and pops from the END, so a sequence lists an operator before its
//! operands and the last operand is evaluated first.

use std::fmt;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::{BinaryOp, Builtin, Name, StringInterner, UnaryOp};

/// Bound parameter names of a block. Almost always one or two.
pub type Params = SmallVec<[Name; 2]>;

/// One instruction on the control stack, tagged with its source line.
#[derive(Clone, Debug, PartialEq)]
pub struct ControlItem {
    pub kind: ControlKind,
    pub line: u32,
}

impl ControlItem {
    pub fn new(kind: ControlKind, line: u32) -> Self {
        ControlItem { kind, line }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ControlKind {
    Binary(BinaryOp),
    Unary(UnaryOp),
    /// A name to resolve in the active environment. `builtin` is the
    /// reserved-identifier tag, used only when no binding is found.
    Identifier {
        name: Name,
        builtin: Option<Builtin>,
    },
    Int(i64),
    Str(Rc<str>),
    Bool(bool),
    Dummy,
    YStar,
    /// Build a tuple from this many results. `Tau(0)` is `nil`.
    Tau(usize),
    Beta(Rc<Beta>),
    /// Function-block marker; evaluating it creates a closure.
    Delta(Rc<ControlBlock>),
    /// Apply the top result to the one beneath it.
    Gamma,
}

/// Standardized conditional: the condition is evaluated first, then exactly
/// one of the two sequences is appended to the control stack.
#[derive(Clone, Debug, PartialEq)]
pub struct Beta {
    pub then: Vec<ControlItem>,
    pub otherwise: Vec<ControlItem>,
}

/// A lambda body with its bound parameters.
#[derive(Debug, PartialEq)]
pub struct ControlBlock {
    /// Identity, used only for display.
    pub index: usize,
    pub params: Params,
    pub body: Vec<ControlItem>,
}

/// All control blocks of a program. Block 0 is the root.
#[derive(Debug)]
pub struct ControlStructure {
    pub root: Rc<ControlBlock>,
    /// Every block, ordered by index.
    pub blocks: Vec<Rc<ControlBlock>>,
}

impl ControlStructure {
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Render every block, one per line, for inspection.
    pub fn display<'a>(&'a self, interner: &'a StringInterner) -> DisplayControl<'a> {
        DisplayControl {
            structure: self,
            interner,
        }
    }
}

/// `Display` adapter returned by [`ControlStructure::display`].
pub struct DisplayControl<'a> {
    structure: &'a ControlStructure,
    interner: &'a StringInterner,
}

impl fmt::Display for DisplayControl<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for block in &self.structure.blocks {
            write!(f, "delta{} [", block.index)?;
            for (i, param) in block.params.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                f.write_str(&self.interner.lookup(*param))?;
            }
            f.write_str("]:")?;
            write_items(f, &block.body, self.interner)?;
            writeln!(f)?;
        }
        Ok(())
    }
}

fn write_items(
    f: &mut fmt::Formatter<'_>,
    items: &[ControlItem],
    interner: &StringInterner,
) -> fmt::Result {
    for item in items {
        f.write_str(" ")?;
        match &item.kind {
            ControlKind::Binary(op) => f.write_str(op.label())?,
            ControlKind::Unary(op) => f.write_str(op.label())?,
            ControlKind::Identifier { name, .. } => f.write_str(&interner.lookup(*name))?,
            ControlKind::Int(n) => write!(f, "{n}")?,
            ControlKind::Str(s) => write!(f, "'{s}'")?,
            ControlKind::Bool(b) => write!(f, "{b}")?,
            ControlKind::Dummy => f.write_str("dummy")?,
            ControlKind::YStar => f.write_str("Y*")?,
            ControlKind::Tau(0) => f.write_str("nil")?,
            ControlKind::Tau(n) => write!(f, "tau{n}")?,
            ControlKind::Beta(beta) => {
                f.write_str("beta(")?;
                write_items(f, &beta.then, interner)?;
                f.write_str(" |")?;
                write_items(f, &beta.otherwise, interner)?;
                f.write_str(" )")?;
            }
            ControlKind::Delta(block) => write!(f, "delta{}", block.index)?,
            ControlKind::Gamma => f.write_str("gamma")?,
        }
    }
    Ok(())
}
