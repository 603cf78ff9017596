use std::fmt::Formatter;

use anyhow::bail;
use itertools::Itertools;

use crate::error::{BasaltResult, OptimizerError};
use crate::operator::{DisplayFields, OperatorTrait};
use crate::scalar::ColumnRefOperator;

/// Column mapping shared by `INTERSECT`, `UNION` and `EXCEPT`.
///
/// The `i`-th output column is produced from the `i`-th column of every input, so
/// `child_output_columns[k][i]` is the column of input `k` feeding `output_columns[i]`.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct SetOperation {
    output_columns: Vec<ColumnRefOperator>,
    child_output_columns: Vec<Vec<ColumnRefOperator>>,
}

impl SetOperation {
    pub fn new(
        output_columns: Vec<ColumnRefOperator>,
        child_output_columns: Vec<Vec<ColumnRefOperator>>,
    ) -> Self {
        Self {
            output_columns,
            child_output_columns,
        }
    }

    pub fn output_columns(&self) -> &[ColumnRefOperator] {
        &self.output_columns
    }

    pub fn child_output_columns(&self) -> &[Vec<ColumnRefOperator>] {
        &self.child_output_columns
    }

    fn validate(&self, num_inputs: usize) -> BasaltResult<()> {
        if self.child_output_columns.is_empty() {
            bail!(OptimizerError::InvalidPlan(
                "set operation requires at least one input".to_string()
            ));
        }
        if num_inputs != self.child_output_columns.len() {
            bail!(OptimizerError::InvalidPlan(format!(
                "set operation has {} column lists but {} inputs",
                self.child_output_columns.len(),
                num_inputs
            )));
        }
        for columns in &self.child_output_columns {
            if columns.len() != self.output_columns.len() {
                bail!(OptimizerError::ColumnCountMismatch {
                    expected: self.output_columns.len(),
                    actual: columns.len(),
                });
            }
        }
        Ok(())
    }

    fn display(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("")
            .field(
                "output_columns",
                &format_args!("[{}]", self.output_columns.iter().join(", ")),
            )
            .finish()
    }
}

macro_rules! set_operator {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Debug, Hash, Eq, PartialEq)]
        pub struct $name(SetOperation);

        impl $name {
            pub fn new(set_operation: SetOperation) -> Self {
                Self(set_operation)
            }

            pub fn set_operation(&self) -> &SetOperation {
                &self.0
            }
        }

        impl OperatorTrait for $name {
            fn arity(&self) -> usize {
                self.0.child_output_columns.len()
            }

            fn validate(&self, num_inputs: usize) -> BasaltResult<()> {
                self.0.validate(num_inputs)
            }
        }

        impl DisplayFields for $name {
            fn display(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                self.0.display(f)
            }
        }
    };
}

set_operator!(
    /// Rows present in every input.
    Intersect
);
set_operator!(
    /// Rows present in any input.
    Union
);
set_operator!(
    /// Rows of the first input not present in the others.
    Except
);
