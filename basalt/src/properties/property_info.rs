use std::collections::BTreeSet;

use crate::scalar::ColumnRefSet;

pub type TableId = i64;
pub type PartitionId = i64;

/// Storage facts attached to a distribution, used when checking collocation.
#[derive(Clone, Debug, Default, Hash, Eq, PartialEq)]
pub struct PropertyInfo {
    /// Table the data is read from, if it comes straight from storage.
    pub table_id: Option<TableId>,
    pub is_replicate: bool,
    pub partition_ids: BTreeSet<PartitionId>,
    /// Columns made nullable by an outer join below.
    pub nullable_columns: ColumnRefSet,
}

impl PropertyInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table_id(mut self, table_id: TableId) -> Self {
        self.table_id = Some(table_id);
        self
    }

    pub fn with_partitions<I: IntoIterator<Item = PartitionId>>(mut self, partitions: I) -> Self {
        self.partition_ids = partitions.into_iter().collect();
        self
    }

    pub fn with_nullable_columns(mut self, columns: ColumnRefSet) -> Self {
        self.nullable_columns = columns;
        self
    }

    pub fn is_single_partition(&self) -> bool {
        self.partition_ids.len() == 1
    }

    pub fn is_empty_partition(&self) -> bool {
        self.partition_ids.is_empty()
    }
}
