use std::fmt::{Display, Formatter};

use anyhow::ensure;
use arrow_schema::DataType;
use datafusion_common::ScalarValue;

use crate::error::BasaltResult;
use crate::scalar::{ScalarOperator, ScalarOperatorTrait, ScalarOperatorType, ScalarOperatorVec};

/// Literal value.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct ConstantOperator {
    value: ScalarValue,
}

impl ConstantOperator {
    pub fn new(value: ScalarValue) -> Self {
        Self { value }
    }

    pub fn value(&self) -> &ScalarValue {
        &self.value
    }

    /// Returns the boolean literal, `None` for anything else including `NULL`.
    pub fn as_bool(&self) -> Option<bool> {
        match self.value {
            ScalarValue::Boolean(Some(b)) => Some(b),
            _ => None,
        }
    }
}

impl ScalarOperatorTrait for ConstantOperator {
    fn op_type(&self) -> ScalarOperatorType {
        ScalarOperatorType::Constant
    }

    fn data_type(&self) -> DataType {
        self.value.get_datatype()
    }

    fn children(&self) -> ScalarOperatorVec {
        ScalarOperatorVec::new()
    }

    fn with_children(&self, children: ScalarOperatorVec) -> BasaltResult<ScalarOperator> {
        ensure!(children.is_empty(), "Constant can't have children");
        Ok(self.clone().into())
    }
}

impl Display for ConstantOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}
