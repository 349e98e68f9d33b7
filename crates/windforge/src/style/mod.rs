//! Turning plugin style input into prefixed, importance-adjusted rule trees.
//!
//! [`compile`] flattens nested style objects into [`RuleNode`](crate::RuleNode)s;
//! the selector helpers then rewrite those nodes for the configured prefix
//! and `important` setting.

mod compile;
mod selector;

pub use compile::{combine_selectors, compile, dashify, StyleInput};
pub use selector::{
    apply_important, apply_prefix, escape, prefix_selector, split_selector_list,
};
