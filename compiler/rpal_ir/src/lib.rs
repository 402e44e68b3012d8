//! RPAL IR - Standardized trees and control structures.
//!
//! This crate holds everything the CSE machine consumes:
//!
//! - `Name` / `StringInterner`: compact interned identifiers
//! - `BinaryOp`, `UnaryOp`, `Builtin`: closed operator and built-in tag sets
//! - `StNode`: the standardized tree, read from its indented text dump
//! - `ControlStructure`: the tree partitioned into numbered control blocks
//!
//! # Pipeline
//!
//! ```text
//! standardized dump (text)
//!     │  read_tree()
//!     ▼
//! StNode
//!     │  build_control()
//!     ▼
//! ControlStructure ──► rpal_eval::Machine
//! ```

mod builtin;
mod control;
mod interner;
mod lower;
mod name;
mod ops;
mod reader;
mod stack;
mod tree;

pub use builtin::Builtin;
pub use control::{
    Beta, ControlBlock, ControlItem, ControlKind, ControlStructure, DisplayControl, Params,
};
pub use interner::{InternError, SharedInterner, StringInterner};
pub use lower::{build_control, StructureError};
pub use name::Name;
pub use ops::{BinaryOp, UnaryOp};
pub use reader::{read_tree, ReadError};
pub use stack::ensure_sufficient_stack;
pub use tree::{NodeKind, StNode, Sugar};
