//! ## Background
//!
//! A cost based optimizer searches the space of plans equivalent to the query it was given. The
//! space is explored by transformation rules: a rule recognizes a shape in an operator tree and
//! produces one or more equivalent trees, e.g. merging two adjacent filters, or pushing a filter
//! below a set operation into each of its inputs. Which alternatives survive is decided by cost,
//! which is outside of this crate.
//!
//! Physical plans additionally have to deliver data distributed the way their consumers expect.
//! The enforcement phase compares the distribution a plan delivers with the one required by its
//! parent, and inserts an exchange where they don't agree.
//!
//! ## Design
//!
//! * [`operator`] Relational operators.
//! * [`scalar`] Scalar expressions such as predicates.
//! * [`plan`] Immutable operator trees, builders and explain.
//! * [`rules`] Pattern matching, transformation rules and the rule registry.
//! * [`rewrite`] Fixed point rewriting of scalar expressions.
//! * [`properties`] Data distribution properties.
//! * [`compression`] Compression codec names.
//! * [`optimizer`] Configuration and per query context.

#[macro_use]
extern crate lazy_static;

pub mod compression;
pub mod error;
pub mod operator;
pub mod optimizer;
pub mod plan;
pub mod properties;
pub mod rewrite;
pub mod rules;
pub mod scalar;
#[cfg(test)]
mod test_utils;
