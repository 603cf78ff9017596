use std::sync::Arc;

use arrow_schema::DataType;
use datafusion_common::ScalarValue;

use crate::operator::LogicalOperator::LogicalFilter;
use crate::operator::{Filter, SetOperation};
use crate::plan::{LogicalPlanBuilder, PlanNode, PlanNodeRef};
use crate::scalar::BinaryType::Gt;
use crate::scalar::{binary, constant, ColumnRefOperator, ScalarOperator, ScalarOperatorRef};

pub fn int_column(id: u32, name: &str) -> ColumnRefOperator {
    ColumnRefOperator::new(id, DataType::Int32, name, true)
}

pub fn int_column_ref(id: u32, name: &str) -> ScalarOperatorRef {
    ScalarOperator::from(int_column(id, name)).into_ref()
}

pub fn int(value: i32) -> ScalarOperatorRef {
    constant(ScalarValue::Int32(Some(value)))
}

/// `name > 0` on an int column.
pub fn gt_zero(id: u32, name: &str) -> ScalarOperatorRef {
    binary(Gt, int_column_ref(id, name), int(0))
}

pub fn scan(table_name: &str, columns: Vec<ColumnRefOperator>) -> PlanNodeRef {
    LogicalPlanBuilder::scan(table_name, 1, columns).build().root()
}

pub fn filter(predicate: ScalarOperatorRef, input: PlanNodeRef) -> PlanNodeRef {
    Arc::new(PlanNode::new(
        LogicalFilter(Filter::new(predicate)),
        vec![input],
    ))
}

/// Set operation with one output column `x` (id 100) over `num_inputs` inputs, input `i`
/// contributing column `c{i}` with id `101 + i`.
pub fn set_operation(num_inputs: usize) -> SetOperation {
    SetOperation::new(
        vec![int_column(100, "x")],
        (0..num_inputs as u32)
            .map(|i| vec![int_column(101 + i, &format!("c{}", i))])
            .collect(),
    )
}
