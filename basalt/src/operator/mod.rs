//! Relational operators such as filter, join, scan and the set operations.
//!
//! They are classified into two categories: logical and physical. Logical and physical operators
//! live in two enums so that rules can only match the family they are written for, while the
//! payload structs (e.g. [`Filter`]) are shared between both families.
mod filter;
pub use filter::*;
mod join;
pub use join::*;
mod logical;
pub use logical::*;
mod physical;
pub use physical::*;
mod set_operation;
pub use set_operation::*;
mod table_scan;
pub use table_scan::*;

use std::fmt::{Display, Formatter};

use anyhow::bail;
use enum_as_inner::EnumAsInner;
use enum_dispatch::enum_dispatch;
use strum_macros::{AsRefStr, Display as StrumDisplay};

use crate::error::{BasaltResult, OptimizerError};
use crate::operator::Operator::{Logical, Physical};

#[derive(Clone, Debug, Hash, Eq, PartialEq, EnumAsInner)]
pub enum Operator {
    Logical(LogicalOperator),
    Physical(PhysicalOperator),
}

/// Tag of an operator, used by patterns to describe the shape they match.
///
/// [`OperatorType::PatternLeaf`] and [`OperatorType::PatternMultiLeaf`] are wildcards and are
/// never returned by [`Operator::op_type`].
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, AsRefStr, StrumDisplay)]
pub enum OperatorType {
    LogicalFilter,
    LogicalIntersect,
    LogicalUnion,
    LogicalExcept,
    LogicalJoin,
    LogicalScan,
    PhysicalFilter,
    PhysicalHashJoin,
    PhysicalTableScan,
    /// Matches exactly one input of any shape.
    PatternLeaf,
    /// Matches zero or more trailing inputs of any shape.
    PatternMultiLeaf,
}

impl OperatorType {
    pub fn is_pattern(&self) -> bool {
        matches!(
            self,
            OperatorType::PatternLeaf | OperatorType::PatternMultiLeaf
        )
    }
}

#[enum_dispatch(LogicalOperator, PhysicalOperator)]
pub trait OperatorTrait {
    /// Number of inputs a plan node carrying this operator must have.
    fn arity(&self) -> usize;

    /// Checks that the operator is consistent with `num_inputs` inputs.
    fn validate(&self, num_inputs: usize) -> BasaltResult<()> {
        if num_inputs != self.arity() {
            bail!(OptimizerError::InvalidPlan(format!(
                "expected {} inputs, got {}",
                self.arity(),
                num_inputs
            )));
        }
        Ok(())
    }
}

/// Writes the operator specific fields in explain output, e.g. `{ predicate: a > 0 }`.
#[enum_dispatch(LogicalOperator, PhysicalOperator)]
pub trait DisplayFields {
    fn display(&self, f: &mut Formatter<'_>) -> std::fmt::Result;
}

impl Operator {
    pub fn op_type(&self) -> OperatorType {
        match self {
            Logical(LogicalOperator::LogicalFilter(_)) => OperatorType::LogicalFilter,
            Logical(LogicalOperator::LogicalIntersect(_)) => OperatorType::LogicalIntersect,
            Logical(LogicalOperator::LogicalUnion(_)) => OperatorType::LogicalUnion,
            Logical(LogicalOperator::LogicalExcept(_)) => OperatorType::LogicalExcept,
            Logical(LogicalOperator::LogicalJoin(_)) => OperatorType::LogicalJoin,
            Logical(LogicalOperator::LogicalScan(_)) => OperatorType::LogicalScan,
            Physical(PhysicalOperator::PhysicalFilter(_)) => OperatorType::PhysicalFilter,
            Physical(PhysicalOperator::PhysicalHashJoin(_)) => OperatorType::PhysicalHashJoin,
            Physical(PhysicalOperator::PhysicalTableScan(_)) => {
                OperatorType::PhysicalTableScan
            }
        }
    }
}

impl OperatorTrait for Operator {
    fn arity(&self) -> usize {
        match self {
            Logical(op) => op.arity(),
            Physical(op) => op.arity(),
        }
    }

    fn validate(&self, num_inputs: usize) -> BasaltResult<()> {
        match self {
            Logical(op) => op.validate(num_inputs),
            Physical(op) => op.validate(num_inputs),
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Logical(op) => write!(f, "{}", op),
            Physical(op) => write!(f, "{}", op),
        }
    }
}

impl From<LogicalOperator> for Operator {
    fn from(op: LogicalOperator) -> Self {
        Logical(op)
    }
}

impl From<PhysicalOperator> for Operator {
    fn from(op: PhysicalOperator) -> Self {
        Physical(op)
    }
}

#[cfg(test)]
mod tests {
    use arrow_schema::DataType;
    use datafusion_common::ScalarValue;

    use crate::operator::LogicalOperator::{LogicalFilter, LogicalUnion};
    use crate::operator::Operator::{Logical, Physical};
    use crate::operator::PhysicalOperator::PhysicalTableScan;
    use crate::operator::{Filter, OperatorTrait, OperatorType, SetOperation, TableScan, Union};
    use crate::scalar::BinaryType::Gt;
    use crate::scalar::{binary, column, constant, ColumnRefOperator};

    #[test]
    fn test_op_type() {
        let filter = Logical(LogicalFilter(Filter::new(binary(
            Gt,
            column(1, DataType::Int32, "a", true),
            constant(ScalarValue::Int32(Some(0))),
        ))));
        assert_eq!(OperatorType::LogicalFilter, filter.op_type());

        let scan = Physical(PhysicalTableScan(TableScan::new("t1", 1, vec![])));
        assert_eq!(OperatorType::PhysicalTableScan, scan.op_type());
        assert!(!scan.op_type().is_pattern());
        assert!(OperatorType::PatternMultiLeaf.is_pattern());
    }

    #[test]
    fn test_validate_arity() {
        let scan = Physical(PhysicalTableScan(TableScan::new("t1", 1, vec![])));
        assert_eq!(0, scan.arity());
        assert!(scan.validate(0).is_ok());
        assert!(scan.validate(1).is_err());

        let a = ColumnRefOperator::new(1, DataType::Int32, "a", true);
        let b = ColumnRefOperator::new(2, DataType::Int32, "b", true);
        let c = ColumnRefOperator::new(3, DataType::Int32, "c", true);
        let union = Logical(LogicalUnion(Union::new(SetOperation::new(
            vec![a],
            vec![vec![b], vec![c]],
        ))));
        assert_eq!(2, union.arity());
        assert!(union.validate(2).is_ok());
        assert!(union.validate(1).is_err());
    }
}
