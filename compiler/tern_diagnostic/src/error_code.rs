//! Error codes for type-checker diagnostics.
//!
//! E2xxx are type errors; E9xxx are internal compiler errors.

use std::fmt;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    /// Type mismatch
    E2001,
    /// Undeclared name (variable, function, type, trait or tag)
    E2002,
    /// Infinite type: a type variable occurs inside its own binding
    E2003,
    /// Wrong number of arguments, tuple elements or type arguments
    E2004,
    /// No implementation satisfies a trait obligation
    E2005,
    /// Match does not cover every tag
    E2006,
    /// Field name is declared by more than one product type
    E2007,
    /// Unification exceeded its step limit
    E2008,
    /// Type, trait or function defined twice
    E2009,

    /// Internal compiler error
    E9001,
}

impl ErrorCode {
    pub const ALL: &'static [ErrorCode] = &[
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E2004,
        ErrorCode::E2005,
        ErrorCode::E2006,
        ErrorCode::E2007,
        ErrorCode::E2008,
        ErrorCode::E2009,
        ErrorCode::E9001,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E2007 => "E2007",
            ErrorCode::E2008 => "E2008",
            ErrorCode::E2009 => "E2009",
            ErrorCode::E9001 => "E9001",
        }
    }

    pub const fn is_type_error(self) -> bool {
        !matches!(self, ErrorCode::E9001)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
