//! Shareable metadata for `textalk_core::lang` registries.
//!
//! These types are `Copy` so every registry can live in a `const` table.

/// Version of the TexTalk grammar an item first appeared in, as `(major, minor)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Since(pub u8, pub u8);

/// Describe the lifecycle status of a vocabulary item.
///
/// ## Examples
/// ```rust
/// use textalk_core::lang::registry::Stability;
///
/// let s = Stability::Stable;
/// assert_eq!(format!("{s:?}"), "Stable");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stability {
    Stable,
    Draft,
    Deprecated,
}

/// A small TexTalk snippet used in generated documentation.
#[derive(Debug, Clone, Copy)]
pub struct Example {
    pub code: &'static str,
    pub note: Option<&'static str>,
}
