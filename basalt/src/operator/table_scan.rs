use std::fmt::Formatter;

use crate::operator::{DisplayFields, OperatorTrait};
use crate::properties::TableId;
use crate::scalar::ColumnRefOperator;

#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct TableScan {
    table_name: String,
    table_id: TableId,
    /// Columns produced by the scan.
    columns: Vec<ColumnRefOperator>,
    limit: Option<usize>,
}

impl TableScan {
    pub fn new<S: Into<String>>(
        table_name: S,
        table_id: TableId,
        columns: Vec<ColumnRefOperator>,
    ) -> Self {
        Self {
            table_name: table_name.into(),
            table_id,
            columns,
            limit: None,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn table_id(&self) -> TableId {
        self.table_id
    }

    pub fn columns(&self) -> &[ColumnRefOperator] {
        &self.columns
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }
}

impl OperatorTrait for TableScan {
    fn arity(&self) -> usize {
        0
    }
}

impl DisplayFields for TableScan {
    fn display(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut s = f.debug_struct("");
        s.field("table_name", &self.table_name);
        if let Some(limit) = self.limit {
            s.field("limit", &limit);
        }
        s.finish()
    }
}
