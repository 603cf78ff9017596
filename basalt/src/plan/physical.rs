use std::sync::Arc;

use crate::operator::PhysicalOperator::{PhysicalFilter, PhysicalHashJoin, PhysicalTableScan};
use crate::operator::{Filter, Join, JoinType, TableScan};
use crate::plan::{Plan, PlanNode, PlanNodeRef};
use crate::properties::TableId;
use crate::scalar::{ColumnRefOperator, ScalarOperatorRef};

pub struct PhysicalPlanBuilder {
    root: PlanNodeRef,
}

impl PhysicalPlanBuilder {
    fn reset_root(mut self, new_root: PlanNode) -> Self {
        self.root = Arc::new(new_root);
        self
    }

    pub fn scan<S: Into<String>>(
        limit: Option<usize>,
        table_name: S,
        table_id: TableId,
        columns: Vec<ColumnRefOperator>,
    ) -> Self {
        let mut table_scan = TableScan::new(table_name, table_id, columns);
        if let Some(limit) = limit {
            table_scan = table_scan.with_limit(limit);
        }

        Self {
            root: Arc::new(PlanNode::new(PhysicalTableScan(table_scan), vec![])),
        }
    }

    pub fn filter(self, predicate: ScalarOperatorRef) -> Self {
        let node = PlanNode::new(PhysicalFilter(Filter::new(predicate)), vec![self.root.clone()]);
        self.reset_root(node)
    }

    pub fn hash_join(
        self,
        join_type: JoinType,
        on_predicate: Option<ScalarOperatorRef>,
        right: PlanNodeRef,
    ) -> Self {
        let join = Join::new(join_type, on_predicate);
        let node = PlanNode::new(PhysicalHashJoin(join), vec![self.root.clone(), right]);
        self.reset_root(node)
    }

    pub fn build(self) -> Plan {
        Plan::new(self.root)
    }
}
