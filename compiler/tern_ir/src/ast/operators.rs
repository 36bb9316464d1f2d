//! Binary and unary operators.

/// Binary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Logical
    And,
    Or,
}

impl BinaryOp {
    /// Source-level symbol, for error messages.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::And => "and",
            Self::Or => "or",
        }
    }

    /// Name of the trait that implements this operator, if any.
    ///
    /// `and`/`or` are fixed to `bool` and have no trait.
    pub const fn trait_name(self) -> Option<&'static str> {
        match self {
            Self::Add => Some("Add"),
            Self::Sub => Some("Sub"),
            Self::Mul => Some("Mul"),
            Self::Div => Some("Div"),
            Self::Mod => Some("Mod"),
            Self::Lt | Self::LtEq | Self::Gt | Self::GtEq => Some("Cmp"),
            Self::Eq | Self::NotEq => Some("Eq"),
            Self::And | Self::Or => None,
        }
    }

    /// Whether the result is `bool` rather than the operand type.
    pub const fn is_comparison(self) -> bool {
        matches!(
            self,
            Self::Eq | Self::NotEq | Self::Lt | Self::LtEq | Self::Gt | Self::GtEq
        )
    }
}

/// Unary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    /// `-e`
    Neg,
    /// `not e`
    Not,
    /// `&e`, take a pointer.
    AddrOf,
    /// `@e`, dereference a pointer.
    Deref,
}

impl UnaryOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Neg => "-",
            Self::Not => "not",
            Self::AddrOf => "&",
            Self::Deref => "@",
        }
    }
}
