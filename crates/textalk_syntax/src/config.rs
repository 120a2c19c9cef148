//! Parse configuration.

use textalk_core::lang::operators::OperatorTable;

/// Options for [`parse_with_config`](crate::parse_with_config).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseConfig {
    /// Precedence table for the final operator pass
    pub operators: OperatorTable,
    /// Fold `is`, `in`/`notin` and `:=`/`::=` into relation nodes
    pub resolve_relations: bool,
    /// Run the operator resolver
    pub resolve_operators: bool,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            operators: OperatorTable::STANDARD,
            resolve_relations: true,
            resolve_operators: true,
        }
    }
}

impl ParseConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only lex and parse; leave the tree flat.
    pub fn raw() -> Self {
        Self::default().with_relations(false).with_operators(false)
    }

    /// Set the operator precedence table
    pub fn with_operator_table(mut self, operators: OperatorTable) -> Self {
        self.operators = operators;
        self
    }

    pub fn with_relations(mut self, enabled: bool) -> Self {
        self.resolve_relations = enabled;
        self
    }

    pub fn with_operators(mut self, enabled: bool) -> Self {
        self.resolve_operators = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_resolves_everything() {
        let config = ParseConfig::default();
        assert!(config.resolve_relations);
        assert!(config.resolve_operators);
        assert_eq!(config.operators, OperatorTable::STANDARD);
    }

    #[test]
    fn test_raw_disables_resolution() {
        let config = ParseConfig::raw();
        assert!(!config.resolve_relations);
        assert!(!config.resolve_operators);
    }
}
