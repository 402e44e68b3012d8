//! Reserved identifiers that name built-in functions.

use std::fmt;

/// Built-in function tag.
///
/// Identifiers are resolved to a tag once, when the control structure is
/// built. The engine only falls back to the tag when the name is not bound
/// in any enclosing environment, so programs may shadow built-ins.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Builtin {
    Isinteger,
    Isstring,
    Istuple,
    Isdummy,
    Istruthvalue,
    Isfunction,
    ItoS,
    Order,
    Conc,
    Stern,
    Stem,
    Null,
    Print,
    Neg,
}

impl Builtin {
    /// Recognize a reserved identifier.
    ///
    /// `conc` and `print` are accepted as aliases of `Conc` and `Print`.
    pub fn from_name(name: &str) -> Option<Self> {
        let builtin = match name {
            "Isinteger" => Builtin::Isinteger,
            "Isstring" => Builtin::Isstring,
            "Istuple" => Builtin::Istuple,
            "Isdummy" => Builtin::Isdummy,
            "Istruthvalue" => Builtin::Istruthvalue,
            "Isfunction" => Builtin::Isfunction,
            "ItoS" => Builtin::ItoS,
            "Order" => Builtin::Order,
            "Conc" | "conc" => Builtin::Conc,
            "Stern" => Builtin::Stern,
            "Stem" => Builtin::Stem,
            "Null" => Builtin::Null,
            "Print" | "print" => Builtin::Print,
            "neg" => Builtin::Neg,
            _ => return None,
        };
        Some(builtin)
    }

    /// Canonical spelling.
    pub fn name(self) -> &'static str {
        match self {
            Builtin::Isinteger => "Isinteger",
            Builtin::Isstring => "Isstring",
            Builtin::Istuple => "Istuple",
            Builtin::Isdummy => "Isdummy",
            Builtin::Istruthvalue => "Istruthvalue",
            Builtin::Isfunction => "Isfunction",
            Builtin::ItoS => "ItoS",
            Builtin::Order => "Order",
            Builtin::Conc => "Conc",
            Builtin::Stern => "Stern",
            Builtin::Stem => "Stem",
            Builtin::Null => "Null",
            Builtin::Print => "Print",
            Builtin::Neg => "neg",
        }
    }
}

impl fmt::Display for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
