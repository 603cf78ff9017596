//! Scalar expression rewriting.
//!
//! [`ScalarOperatorRewriter`] runs a fixed list of [`ScalarRewriteRule`]s over a scalar tree.
//! Each pass walks the tree bottom up: children are rewritten first, the parent is rebuilt only
//! if a child changed, and then the parent is offered to every rule in order. Passes repeat until
//! one pass leaves the tree unchanged.
mod normalize_predicate;
pub use normalize_predicate::*;
mod simplify_compound;
pub use simplify_compound::*;

use std::collections::HashMap;

use anyhow::bail;
use enum_dispatch::enum_dispatch;
use log::{trace, warn};
use strum_macros::AsRefStr;

use crate::error::{BasaltResult, OptimizerError};
use crate::optimizer::DEFAULT_MAX_SCALAR_REWRITE_ITERATIONS;
use crate::scalar::{ScalarOperatorRef, ScalarOperatorTrait, ScalarOperatorVec};

#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, AsRefStr)]
pub enum ScalarRewriteRuleType {
    NormalizePredicate,
    SimplifyCompoundPredicate,
}

/// One local rewrite step on a scalar node.
#[enum_dispatch(ScalarRewriteRuleImpl)]
pub trait ScalarRewriteRule {
    /// Rewrites `scalar`, whose children are already rewritten. `None` leaves it unchanged.
    fn apply(&self, scalar: &ScalarOperatorRef) -> Option<ScalarOperatorRef>;

    fn rule_type(&self) -> ScalarRewriteRuleType;
}

#[enum_dispatch]
#[derive(Clone, Debug)]
pub enum ScalarRewriteRuleImpl {
    NormalizePredicateRule,
    SimplifyCompoundPredicateRule,
}

/// Statistics of one rewrite, threaded through [`ScalarOperatorRewriter::rewrite`].
#[derive(Clone, Debug, Default)]
pub struct ScalarRewriteContext {
    passes: usize,
    applied: HashMap<ScalarRewriteRuleType, usize>,
}

impl ScalarRewriteContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bottom up passes run, including the final one which changed nothing.
    pub fn passes(&self) -> usize {
        self.passes
    }

    pub fn applied_count(&self, rule_type: ScalarRewriteRuleType) -> usize {
        self.applied.get(&rule_type).copied().unwrap_or(0)
    }

    pub fn total_applied(&self) -> usize {
        self.applied.values().sum()
    }

    fn record(&mut self, rule_type: ScalarRewriteRuleType) {
        *self.applied.entry(rule_type).or_insert(0) += 1;
    }
}

#[derive(Clone, Debug)]
pub struct ScalarOperatorRewriter {
    rules: Vec<ScalarRewriteRuleImpl>,
    max_iterations: usize,
}

impl Default for ScalarOperatorRewriter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SCALAR_REWRITE_ITERATIONS)
    }
}

impl ScalarOperatorRewriter {
    /// Rewriter with all normalization rules.
    pub fn new(max_iterations: usize) -> Self {
        Self::with_rules(
            vec![
                NormalizePredicateRule::new().into(),
                SimplifyCompoundPredicateRule::new().into(),
            ],
            max_iterations,
        )
    }

    pub fn with_rules(rules: Vec<ScalarRewriteRuleImpl>, max_iterations: usize) -> Self {
        Self {
            rules,
            max_iterations,
        }
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Rewrites `scalar` until no rule applies anymore.
    ///
    /// Fails with [`OptimizerError::RewriteNotConverged`] if the tree still changes in the last
    /// allowed pass.
    pub fn rewrite(
        &self,
        scalar: &ScalarOperatorRef,
        mut ctx: ScalarRewriteContext,
    ) -> BasaltResult<(ScalarOperatorRef, ScalarRewriteContext)> {
        let mut current = scalar.clone();
        for _ in 0..self.max_iterations {
            ctx.passes += 1;
            let (next, changed) = self.rewrite_bottom_up(&current, &mut ctx)?;
            if !changed {
                return Ok((next, ctx));
            }
            current = next;
        }

        warn!(
            "Rewrite of {} not converged after {} passes, last result {}",
            scalar, self.max_iterations, current
        );
        bail!(OptimizerError::RewriteNotConverged {
            max_iterations: self.max_iterations
        })
    }

    fn rewrite_bottom_up(
        &self,
        scalar: &ScalarOperatorRef,
        ctx: &mut ScalarRewriteContext,
    ) -> BasaltResult<(ScalarOperatorRef, bool)> {
        let children = scalar.children();
        let mut new_children = ScalarOperatorVec::with_capacity(children.len());
        let mut changed = false;
        for child in &children {
            let (new_child, child_changed) = self.rewrite_bottom_up(child, ctx)?;
            changed |= child_changed;
            new_children.push(new_child);
        }

        let mut current = if changed {
            scalar.with_children(new_children)?.into_ref()
        } else {
            scalar.clone()
        };

        for rule in &self.rules {
            if let Some(rewritten) = rule.apply(&current) {
                trace!("{:?} rewrote {} to {}", rule, current, rewritten);
                ctx.record(rule.rule_type());
                current = rewritten;
                changed = true;
            }
        }

        Ok((current, changed))
    }
}
