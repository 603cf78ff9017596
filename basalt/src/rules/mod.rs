//! Transformation rules.
//!
//! A rule defines an equivalent transformation of a query plan. Each rule describes the sub
//! tree it operates on with a [`Pattern`], and the driver only invokes the rule on nodes
//! matching that pattern. With pattern definition the rule can focus on the transformation
//! itself instead of checking the shape of its input, e.g. [`MergeTwoFiltersRule`] with pattern
//! ```no
//! static ref MERGE_TWO_FILTERS_PATTERN: Pattern = {
//!     Pattern::new_builder(LogicalFilter)
//!       .begin(LogicalFilter)
//!         .leaf(PatternLeaf)
//!       .end()
//!     .build()
//! };
//! ```
//! is invoked on
//! ```no
//!  Filter(a > 0)                                   Filter(a > 0 AND b < 5)
//!       |                                                  |
//!  Filter(b < 5)         MergeTwoFiltersRule               |
//!       |                    -------->                     |
//!   Scan(t1)                                            Scan(t1)
//! ```
//!
//! Rules never modify their input. They produce new nodes and share every input subtree they
//! leave untouched, here `Scan(t1)`.
//!
//! Rules are stateless and registered once in a [`RuleSet`], which is shared by all queries.
mod filter;
pub use filter::*;
mod pattern;
pub use pattern::*;
mod push_down_predicate_set;
pub use push_down_predicate_set::*;
mod set;
pub use set::*;

use std::fmt::{Debug, Formatter};

use enum_dispatch::enum_dispatch;
use enumset::EnumSetType;
use std::convert::AsRef;
use strum_macros::AsRefStr;

use crate::error::BasaltResult;
use crate::optimizer::OptimizerContext;
use crate::plan::{PlanNode, PlanNodeRef};

/// Replacement trees produced by one rule application.
#[derive(Debug, Default)]
pub struct RuleResult {
    nodes: Vec<PlanNodeRef>,
}

impl RuleResult {
    pub fn new() -> Self {
        Self { nodes: vec![] }
    }

    pub fn add(&mut self, new_node: PlanNodeRef) {
        self.nodes.push(new_node);
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn results(self) -> impl Iterator<Item = PlanNodeRef> {
        self.nodes.into_iter()
    }
}

/// A rule should only focus on providing equivalent transformations of plan trees.
#[enum_dispatch(RuleImpl)]
pub trait Rule {
    /// Apply a rule to a sub plan matching its pattern.
    ///
    /// Adding nothing to `result` means the rule doesn't apply to this input.
    fn apply(
        &self,
        input: &PlanNodeRef,
        ctx: &OptimizerContext,
        result: &mut RuleResult,
    ) -> BasaltResult<()>;

    /// Pattern for rule.
    fn pattern(&self) -> &Pattern;

    /// Use to identify each rule.
    fn rule_id(&self) -> RuleId;

    /// Use to identify applying order of rules.
    fn rule_promise(&self) -> RulePromise;

    fn applicable(&self, node: &PlanNode) -> bool {
        self.pattern().matches(node)
    }
}

#[enum_dispatch]
#[derive(Clone, AsRefStr)]
pub enum RuleImpl {
    MergeTwoFiltersRule,
    PushDownPredicateIntersectRule,
    PushDownPredicateUnionRule,
    PushDownPredicateExceptRule,
}

#[derive(EnumSetType, Debug, AsRefStr)]
pub enum RuleId {
    MergeTwoFilters,
    PushDownPredicateIntersect,
    PushDownPredicateUnion,
    PushDownPredicateExcept,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub enum RulePromise {
    Low = 1,
    Medium = 2,
    High = 3,
}

impl Debug for RuleImpl {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.as_ref())
    }
}

/// All transformation rules, in no particular order.
pub fn transformation_rules() -> Vec<RuleImpl> {
    vec![
        MergeTwoFiltersRule::new().into(),
        PushDownPredicateIntersectRule::new().into(),
        PushDownPredicateUnionRule::new().into(),
        PushDownPredicateExceptRule::new().into(),
    ]
}
