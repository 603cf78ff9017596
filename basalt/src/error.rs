use thiserror::Error;

use crate::operator::OperatorType;
use crate::rules::RuleId;

pub type BasaltResult<T> = anyhow::Result<T>;

/// Failures callers may want to tell apart after downcasting an [`anyhow::Error`].
///
/// All of them are internal invariant violations: they point at a bug in a rule, a pattern or
/// the driver calling into this crate, never at bad user data.
#[derive(Debug, Error)]
pub enum OptimizerError {
    #[error("Rule {rule:?} invoked on {operator:?} which does not match its pattern")]
    PatternMismatch {
        rule: RuleId,
        operator: OperatorType,
    },
    #[error("Rule {0:?} is not registered in rule set")]
    RuleNotRegistered(RuleId),
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),
    #[error("Invalid plan: {0}")]
    InvalidPlan(String),
    #[error("Scalar rewrite did not reach a fixed point within {max_iterations} iterations")]
    RewriteNotConverged { max_iterations: usize },
    #[error("Expected {expected} columns, got {actual}")]
    ColumnCountMismatch { expected: usize, actual: usize },
}
