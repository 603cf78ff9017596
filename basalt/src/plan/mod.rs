//! Operator trees.
//!
//! A plan is a tree of immutable [`PlanNode`]s shared through [`PlanNodeRef`]. Rewrites never
//! modify a node in place: they build new nodes and share every untouched subtree with the
//! input, so identity (`Arc::ptr_eq`) tells which parts of a plan were reused.
use std::collections::HashSet;
use std::mem::swap;
use std::sync::Arc;

mod explain;
pub use explain::*;
mod logical;
pub use logical::*;
mod physical;
pub use physical::*;

use crate::error::BasaltResult;
use crate::operator::{Operator, OperatorTrait};

pub type PlanNodeRef = Arc<PlanNode>;

/// One node in a plan: an operator and its ordered inputs.
///
/// Equality is structural and ignores identity.
#[derive(Debug, Hash, Eq, PartialEq)]
pub struct PlanNode {
    operator: Operator,
    inputs: Vec<PlanNodeRef>,
}

impl PlanNode {
    pub fn new<O: Into<Operator>>(operator: O, inputs: Vec<PlanNodeRef>) -> Self {
        Self {
            operator: operator.into(),
            inputs,
        }
    }

    pub fn operator(&self) -> &Operator {
        &self.operator
    }

    pub fn inputs(&self) -> &[PlanNodeRef] {
        &self.inputs
    }

    pub fn input_at(&self, idx: usize) -> Option<&PlanNodeRef> {
        self.inputs.get(idx)
    }

    /// Checks that the number of inputs fits the operator.
    ///
    /// Only this node is checked, inputs are assumed to be valid already.
    pub fn validate(&self) -> BasaltResult<()> {
        self.operator.validate(self.inputs.len())
    }
}

/// A query plan with a single root.
///
/// Subtrees may be shared, so the plan is in general a dag.
#[derive(PartialEq, Debug)]
pub struct Plan {
    root: PlanNodeRef,
}

/// Breath first iterator of a single root dag plan. Shared nodes are visited once.
struct BFSPlanNodeIter {
    visited: HashSet<*const PlanNode>,
    cur_level: Vec<PlanNodeRef>,
    next_level: Vec<PlanNodeRef>,
}

impl Iterator for BFSPlanNodeIter {
    type Item = PlanNodeRef;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cur_level.is_empty() {
            swap(&mut self.cur_level, &mut self.next_level);
            self.cur_level.reverse();
        }

        let p = self.cur_level.pop()?;
        for input in &p.inputs {
            if self.visited.insert(Arc::as_ptr(input)) {
                self.next_level.push(input.clone());
            }
        }

        Some(p)
    }
}

impl Plan {
    pub fn new(root: PlanNodeRef) -> Self {
        Self { root }
    }

    pub fn root(&self) -> PlanNodeRef {
        self.root.clone()
    }

    pub fn bfs_iterator(&self) -> impl Iterator<Item = PlanNodeRef> {
        let mut visited = HashSet::new();
        visited.insert(Arc::as_ptr(&self.root));

        BFSPlanNodeIter {
            cur_level: vec![self.root.clone()],
            next_level: vec![],
            visited,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::operator::{JoinType, OperatorType};
    use crate::plan::{LogicalPlanBuilder, Plan, PlanNode};
    use crate::test_utils::{int_column, scan};

    #[test]
    fn test_bfs_visits_shared_node_once() {
        let shared = scan("t1", vec![int_column(1, "a")]);
        let plan = LogicalPlanBuilder::from(shared.clone())
            .join(JoinType::Inner, None, shared.clone())
            .build();

        let nodes: Vec<_> = plan.bfs_iterator().collect();

        assert_eq!(2, nodes.len());
        assert_eq!(OperatorType::LogicalJoin, nodes[0].operator().op_type());
        assert!(Arc::ptr_eq(&shared, &nodes[1]));
    }

    #[test]
    fn test_bfs_level_order() {
        let left = LogicalPlanBuilder::from(scan("t1", vec![int_column(1, "a")]))
            .join(JoinType::Inner, None, scan("t2", vec![int_column(2, "b")]))
            .build()
            .root();
        let plan = LogicalPlanBuilder::from(left)
            .join(JoinType::Cross, None, scan("t3", vec![int_column(3, "c")]))
            .build();

        let op_types: Vec<_> = plan
            .bfs_iterator()
            .map(|node| node.operator().op_type())
            .collect();

        assert_eq!(
            vec![
                OperatorType::LogicalJoin,
                OperatorType::LogicalJoin,
                OperatorType::LogicalScan,
                OperatorType::LogicalScan,
                OperatorType::LogicalScan,
            ],
            op_types
        );
    }

    #[test]
    fn test_validate() {
        let t1 = scan("t1", vec![int_column(1, "a")]);
        let join = LogicalPlanBuilder::from(t1.clone())
            .join(JoinType::Inner, None, t1.clone())
            .build()
            .root();
        assert!(join.validate().is_ok());

        let broken = PlanNode::new(join.operator().clone(), vec![t1]);
        assert!(broken.validate().is_err());
        assert_eq!(Plan::new(join.clone()), Plan::new(join));
    }
}
