//! Special-operator vocabulary and the precedence table.
//!
//! TexTalk has no declared operator grammar: any run of operator characters is an operator. This module defines the
//! character set those runs are built from and the small static table that gives a handful of well-known spellings a
//! precedence and associativity for the final shunting-yard pass.
//!
//! ## Notes
//! - Higher precedence binds tighter.
//! - A spelling of the form `...X` inherits the precedence and associativity of `X`.
//! - Spellings missing from the table get [`OperatorTable::default_precedence`] and associate to the left.
//!
//! ## Examples
//! ```rust
//! use textalk_core::lang::operators::{Associativity, OperatorTable};
//!
//! let table = OperatorTable::STANDARD;
//! assert!(table.precedence("*") > table.precedence("+"));
//! assert_eq!(table.precedence("...*"), table.precedence("*"));
//! assert_eq!(table.associativity("^"), Associativity::Right);
//! ```

/// Define how operators associate when chained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Associativity {
    Left,
    Right,
}

/// Characters that may appear in an operator run.
pub const OPERATOR_CHARS: &[char] = &['!', '@', '%', '&', '*', '-', '+', '=', '|', '/', '<', '>'];

/// Return `true` if `c` can be part of an operator run.
pub fn is_operator_char(c: char) -> bool {
    OPERATOR_CHARS.contains(&c)
}

/// Precedence and associativity for one operator spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorInfo {
    pub spelling: &'static str,
    pub precedence: u8,
    pub associativity: Associativity,
}

/// Spellings with a known precedence.
pub const SPECIAL_OPERATORS: &[OperatorInfo] = &[
    op("+", 1, Associativity::Left),
    op("-", 1, Associativity::Left),
    op("*", 2, Associativity::Left),
    op("/", 2, Associativity::Left),
    op("^", 3, Associativity::Right),
    op("_", 4, Associativity::Left),
    op("...", 5, Associativity::Left),
    op("=", 6, Associativity::Left),
    op("!=", 7, Associativity::Left),
    op(":=", 8, Associativity::Left),
];

/// A precedence table consulted by the operator resolver.
///
/// The table is a borrowed `'static` slice plus a fallback, so it is `Copy` and every resolver gets its own
/// reference instead of reaching for a global.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorTable {
    pub entries: &'static [OperatorInfo],
    pub default_precedence: u8,
}

impl OperatorTable {
    /// The table used by MathLingua.
    pub const STANDARD: OperatorTable = OperatorTable {
        entries: SPECIAL_OPERATORS,
        default_precedence: 0,
    };

    /// Build a table over a custom set of entries.
    pub const fn new(entries: &'static [OperatorInfo], default_precedence: u8) -> Self {
        Self {
            entries,
            default_precedence,
        }
    }

    /// Look up the entry for a spelling, following the `...X` inheritance rule.
    pub fn lookup(&self, spelling: &str) -> Option<&'static OperatorInfo> {
        let entries: &'static [OperatorInfo] = self.entries;
        if let Some(info) = entries.iter().find(|o| o.spelling == spelling) {
            return Some(info);
        }
        match spelling.strip_prefix("...") {
            Some(rest) if !rest.is_empty() => self.lookup(rest),
            _ => None,
        }
    }

    /// Return the precedence of a spelling.
    pub fn precedence(&self, spelling: &str) -> u8 {
        self.lookup(spelling)
            .map(|o| o.precedence)
            .unwrap_or(self.default_precedence)
    }

    /// Return the associativity of a spelling.
    pub fn associativity(&self, spelling: &str) -> Associativity {
        self.lookup(spelling)
            .map(|o| o.associativity)
            .unwrap_or(Associativity::Left)
    }
}

impl Default for OperatorTable {
    fn default() -> Self {
        Self::STANDARD
    }
}

// --- helpers -----------------------------------------------------------------

const fn op(spelling: &'static str, precedence: u8, associativity: Associativity) -> OperatorInfo {
    OperatorInfo {
        spelling,
        precedence,
        associativity,
    }
}
