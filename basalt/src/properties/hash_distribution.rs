use crate::properties::PropertyInfo;
use crate::scalar::{ColumnRefId, ColumnRefSet};

/// Where a hash distribution comes from, which decides how strictly it has to be matched.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
pub enum HashDistributionSource {
    /// Bucketing of the stored table, data is already in place.
    Local,
    /// Exchange on the group by keys of an aggregation.
    ShuffleAgg,
    /// Exchange on the equi-join keys of a join.
    ShuffleJoin,
}

#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct HashDistributionDesc {
    columns: Vec<ColumnRefId>,
    source: HashDistributionSource,
}

impl HashDistributionDesc {
    pub fn new<I>(columns: I, source: HashDistributionSource) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ColumnRefId>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            source,
        }
    }

    pub fn columns(&self) -> &[ColumnRefId] {
        &self.columns
    }

    pub fn source(&self) -> HashDistributionSource {
        self.source
    }

    pub fn is_local(&self) -> bool {
        self.source == HashDistributionSource::Local
    }

    /// Whether data hashed by `self`, described further by `info`, can serve a parent that
    /// requires `required` with `required_info`.
    pub fn is_satisfy(
        &self,
        info: &PropertyInfo,
        required: &HashDistributionDesc,
        required_info: &PropertyInfo,
    ) -> bool {
        // Rows padded with NULL by an outer join no longer sit in the bucket of their key.
        if self.is_local()
            && self
                .columns
                .iter()
                .any(|c| info.nullable_columns.contains(*c))
        {
            return false;
        }

        match required.source {
            HashDistributionSource::ShuffleAgg => {
                let required_columns: ColumnRefSet = required.columns.iter().copied().collect();
                !self.columns.is_empty()
                    && self.columns.iter().all(|c| required_columns.contains(*c))
            }
            HashDistributionSource::ShuffleJoin => self.columns == required.columns,
            HashDistributionSource::Local => {
                self.is_local()
                    && self.columns == required.columns
                    && required_info
                        .table_id
                        .map_or(true, |table_id| info.table_id == Some(table_id))
                    && (required_info.is_empty_partition()
                        || required_info.partition_ids == info.partition_ids)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::properties::HashDistributionSource::{Local, ShuffleAgg, ShuffleJoin};
    use crate::properties::{HashDistributionDesc, PropertyInfo};
    use crate::scalar::ColumnRefSet;

    #[test]
    fn test_shuffle_agg_accepts_subset() {
        let info = PropertyInfo::new();
        let required = HashDistributionDesc::new([1u32, 2], ShuffleAgg);

        assert!(HashDistributionDesc::new([2u32], ShuffleJoin).is_satisfy(&info, &required, &info));
        assert!(HashDistributionDesc::new([1u32, 2], ShuffleAgg).is_satisfy(
            &info, &required, &info
        ));
        assert!(!HashDistributionDesc::new([3u32], ShuffleAgg).is_satisfy(&info, &required, &info));
        assert!(!HashDistributionDesc::new(Vec::<u32>::new(), ShuffleAgg).is_satisfy(
            &info, &required, &info
        ));
    }

    #[test]
    fn test_shuffle_join_requires_same_order() {
        let info = PropertyInfo::new();
        let required = HashDistributionDesc::new([1u32, 2], ShuffleJoin);

        assert!(HashDistributionDesc::new([1u32, 2], ShuffleAgg).is_satisfy(
            &info, &required, &info
        ));
        assert!(!HashDistributionDesc::new([2u32, 1], ShuffleAgg).is_satisfy(
            &info, &required, &info
        ));
    }

    #[test]
    fn test_local_requires_same_table_and_partitions() {
        let candidate = HashDistributionDesc::new([1u32], Local);
        let required = HashDistributionDesc::new([1u32], Local);
        let info = PropertyInfo::new().with_table_id(10).with_partitions(vec![1, 2]);

        assert!(candidate.is_satisfy(&info, &required, &PropertyInfo::new()));
        assert!(candidate.is_satisfy(&info, &required, &info));
        assert!(!candidate.is_satisfy(
            &info,
            &required,
            &PropertyInfo::new().with_table_id(11)
        ));
        assert!(!candidate.is_satisfy(
            &info,
            &required,
            &PropertyInfo::new().with_partitions(vec![1])
        ));
        assert!(!HashDistributionDesc::new([1u32], ShuffleJoin).is_satisfy(
            &info,
            &required,
            &PropertyInfo::new()
        ));
    }

    #[test]
    fn test_local_on_nullable_column() {
        let candidate = HashDistributionDesc::new([1u32], Local);
        let required = HashDistributionDesc::new([1u32], ShuffleJoin);
        let nullable: ColumnRefSet = [1u32].into_iter().collect();
        let info = PropertyInfo::new().with_nullable_columns(nullable);

        assert!(!candidate.is_satisfy(&info, &required, &PropertyInfo::new()));
        assert!(candidate.is_satisfy(&PropertyInfo::new(), &required, &PropertyInfo::new()));
    }
}
