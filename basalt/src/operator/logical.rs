use std::fmt::{Display, Formatter};

use enum_as_inner::EnumAsInner;
use enum_dispatch::enum_dispatch;
use strum_macros::AsRefStr;

use crate::error::BasaltResult;
use crate::operator::{DisplayFields, Except, Filter, Intersect, Join, TableScan, Union};
use crate::operator::{OperatorTrait, SetOperation};

/// Logical relational operator.
#[derive(Clone, Debug, Hash, Eq, PartialEq, EnumAsInner, AsRefStr)]
#[enum_dispatch]
pub enum LogicalOperator {
    LogicalFilter(Filter),
    LogicalIntersect(Intersect),
    LogicalUnion(Union),
    LogicalExcept(Except),
    LogicalJoin(Join),
    LogicalScan(TableScan),
}

impl LogicalOperator {
    /// Column mapping of `INTERSECT`, `UNION` and `EXCEPT`, `None` for other operators.
    pub fn set_operation(&self) -> Option<&SetOperation> {
        match self {
            LogicalOperator::LogicalIntersect(op) => Some(op.set_operation()),
            LogicalOperator::LogicalUnion(op) => Some(op.set_operation()),
            LogicalOperator::LogicalExcept(op) => Some(op.set_operation()),
            _ => None,
        }
    }
}

impl Display for LogicalOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())?;
        self.display(f)
    }
}
