use std::fmt::{Display, Formatter};

use anyhow::ensure;
use arrow_schema::DataType;
use derive_more::{Display as DisplayDerive, From};

use crate::error::BasaltResult;
use crate::scalar::{ScalarOperator, ScalarOperatorTrait, ScalarOperatorType, ScalarOperatorVec};

/// Query wide unique id of a column.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, DisplayDerive, From)]
pub struct ColumnRefId(pub u32);

#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct ColumnRefOperator {
    id: ColumnRefId,
    data_type: DataType,
    name: String,
    nullable: bool,
}

impl ColumnRefOperator {
    pub fn new<I: Into<ColumnRefId>, S: Into<String>>(
        id: I,
        data_type: DataType,
        name: S,
        nullable: bool,
    ) -> Self {
        Self {
            id: id.into(),
            data_type,
            name: name.into(),
            nullable,
        }
    }

    pub fn id(&self) -> ColumnRefId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn nullable(&self) -> bool {
        self.nullable
    }
}

impl ScalarOperatorTrait for ColumnRefOperator {
    fn op_type(&self) -> ScalarOperatorType {
        ScalarOperatorType::Variable
    }

    fn data_type(&self) -> DataType {
        self.data_type.clone()
    }

    fn children(&self) -> ScalarOperatorVec {
        ScalarOperatorVec::new()
    }

    fn with_children(&self, children: ScalarOperatorVec) -> BasaltResult<ScalarOperator> {
        ensure!(children.is_empty(), "Column ref can't have children");
        Ok(self.clone().into())
    }
}

impl Display for ColumnRefOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
