//! Literal type markers: `:Type:`, `:Statement:`, `:Expression:`.
//!
//! Markers are lexed as single tokens ahead of every other rule, so `:Statement:` never splits into a named group.

use super::registry::{Example, Since, Stability};

/// Stable identifier for the literal markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerId {
    Type,
    Statement,
    Expression,
}

/// Metadata for a literal marker.
#[derive(Debug, Clone, Copy)]
pub struct MarkerInfo {
    pub id: MarkerId,
    pub canonical: &'static str,
    pub since: Since,
    pub stability: Stability,
    pub examples: &'static [Example],
}

/// Registry of all markers, in [`MarkerId`] declaration order.
pub const MARKERS: &[MarkerInfo] = &[
    MarkerInfo {
        id: MarkerId::Type,
        canonical: ":Type:",
        since: Since(0, 1),
        stability: Stability::Stable,
        examples: &[],
    },
    MarkerInfo {
        id: MarkerId::Statement,
        canonical: ":Statement:",
        since: Since(0, 1),
        stability: Stability::Stable,
        examples: &[Example {
            code: "P is :Statement:",
            note: None,
        }],
    },
    MarkerInfo {
        id: MarkerId::Expression,
        canonical: ":Expression:",
        since: Since(0, 1),
        stability: Stability::Stable,
        examples: &[],
    },
];

/// Return the canonical spelling for a marker.
pub fn as_str(id: MarkerId) -> &'static str {
    MARKERS[id as usize].canonical
}

/// Resolve a spelling to a marker id.
pub fn from_str(s: &str) -> Option<MarkerId> {
    MARKERS.iter().find(|m| m.canonical == s).map(|m| m.id)
}

/// Return the marker whose spelling is a prefix of `text`, if any.
pub fn match_prefix(text: &str) -> Option<MarkerId> {
    MARKERS.iter().find(|m| text.starts_with(m.canonical)).map(|m| m.id)
}
