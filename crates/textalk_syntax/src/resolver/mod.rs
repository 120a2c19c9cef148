//! Resolution of a raw parse tree.
//!
//! The parser leaves every expression as a flat list of items. Resolution runs in two stages:
//! - [`relations`] folds `is`, `in`/`notin` and `:=`/`::=` markers into relation nodes.
//! - [`operators`] turns what is left into one tree per expression.
//!
//! Both stages are fail-fast: the first problem aborts resolution and is returned as the error.

pub mod operators;
pub mod relations;

use crate::ast::ExpressionNode;
use crate::config::ParseConfig;
use crate::diagnostics::ParseError;

pub use operators::resolve_operators;
pub use relations::resolve_relations;

/// Run the stages enabled in `config`, in order.
pub fn resolve(root: &ExpressionNode, config: &ParseConfig) -> Result<ExpressionNode, ParseError> {
    let root = if config.resolve_relations {
        resolve_relations(root)?
    } else {
        root.clone()
    };
    if config.resolve_operators {
        resolve_operators(&root, &config.operators)
    } else {
        Ok(root)
    }
}
