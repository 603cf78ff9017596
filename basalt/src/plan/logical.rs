use std::sync::Arc;

use crate::operator::LogicalOperator::{
    LogicalExcept, LogicalFilter, LogicalIntersect, LogicalJoin, LogicalScan, LogicalUnion,
};
use crate::operator::{Except, Filter, Intersect, Join, JoinType, SetOperation, TableScan, Union};
use crate::plan::{Plan, PlanNode, PlanNodeRef};
use crate::properties::TableId;
use crate::scalar::{ColumnRefOperator, ScalarOperatorRef};

/// Builds a logical plan bottom up, each call puts a new node on top of the current root.
pub struct LogicalPlanBuilder {
    root: PlanNodeRef,
}

impl LogicalPlanBuilder {
    pub fn scan<S: Into<String>>(
        table_name: S,
        table_id: TableId,
        columns: Vec<ColumnRefOperator>,
    ) -> Self {
        let table_scan = TableScan::new(table_name, table_id, columns);
        Self::from(Arc::new(PlanNode::new(LogicalScan(table_scan), vec![])))
    }

    pub fn intersect(set_operation: SetOperation, inputs: Vec<PlanNodeRef>) -> Self {
        let op = LogicalIntersect(Intersect::new(set_operation));
        Self::from(Arc::new(PlanNode::new(op, inputs)))
    }

    pub fn union(set_operation: SetOperation, inputs: Vec<PlanNodeRef>) -> Self {
        let op = LogicalUnion(Union::new(set_operation));
        Self::from(Arc::new(PlanNode::new(op, inputs)))
    }

    pub fn except(set_operation: SetOperation, inputs: Vec<PlanNodeRef>) -> Self {
        let op = LogicalExcept(Except::new(set_operation));
        Self::from(Arc::new(PlanNode::new(op, inputs)))
    }

    pub fn filter(self, predicate: ScalarOperatorRef) -> Self {
        let filter = Filter::new(predicate);
        Self::from(Arc::new(PlanNode::new(LogicalFilter(filter), vec![self.root])))
    }

    /// Joins the current root, as left input, with `right`.
    pub fn join(
        self,
        join_type: JoinType,
        on_predicate: Option<ScalarOperatorRef>,
        right: PlanNodeRef,
    ) -> Self {
        let join = Join::new(join_type, on_predicate);
        Self::from(Arc::new(PlanNode::new(
            LogicalJoin(join),
            vec![self.root, right],
        )))
    }

    pub fn build(self) -> Plan {
        Plan::new(self.root)
    }
}

/// Continues building on top of an existing subtree.
impl From<PlanNodeRef> for LogicalPlanBuilder {
    fn from(root: PlanNodeRef) -> Self {
        Self { root }
    }
}
