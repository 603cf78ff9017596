use std::sync::Arc;

use anyhow::{anyhow, bail};
use itertools::Itertools;

use crate::error::BasaltResult;
use crate::operator::LogicalOperator::LogicalFilter;
use crate::operator::Operator::Logical;
use crate::operator::{Filter, OperatorType};
use crate::optimizer::OptimizerContext;
use crate::plan::{PlanNode, PlanNodeRef};
use crate::rules::RuleId::MergeTwoFilters;
use crate::rules::RulePromise::Medium;
use crate::rules::{Pattern, Rule, RuleId, RulePromise, RuleResult};
use crate::scalar::{compound_and, extract_conjuncts};

#[rustfmt::skip::macros(lazy_static)]
lazy_static! {
    static ref MERGE_TWO_FILTERS_PATTERN: Pattern = {
        Pattern::new_builder(OperatorType::LogicalFilter)
          .begin(OperatorType::LogicalFilter)
            .leaf(OperatorType::PatternLeaf)
          .end()
        .build()
    };
}

/// Merges two adjacent filters into one filter with the union of their conjuncts.
///
/// Conjuncts keep their first seen order, top filter first, and duplicates are dropped.
#[derive(Clone, Default)]
pub struct MergeTwoFiltersRule {}

impl MergeTwoFiltersRule {
    pub fn new() -> Self {
        Self {}
    }
}

impl Rule for MergeTwoFiltersRule {
    fn apply(
        &self,
        input: &PlanNodeRef,
        _ctx: &OptimizerContext,
        result: &mut RuleResult,
    ) -> BasaltResult<()> {
        let child = input
            .input_at(0)
            .ok_or_else(|| anyhow!("Filter without input"))?;

        if let (Logical(LogicalFilter(top)), Logical(LogicalFilter(bottom))) =
            (input.operator(), child.operator())
        {
            let conjuncts = extract_conjuncts(top.predicate())
                .into_iter()
                .chain(extract_conjuncts(bottom.predicate()))
                .unique();
            let predicate =
                compound_and(conjuncts).ok_or_else(|| anyhow!("Filter without predicate"))?;

            let ret = PlanNode::new(
                LogicalFilter(Filter::new(predicate)),
                child.inputs().to_vec(),
            );
            result.add(Arc::new(ret));
            Ok(())
        } else {
            bail!("Pattern miss matched")
        }
    }

    fn pattern(&self) -> &Pattern {
        &MERGE_TWO_FILTERS_PATTERN
    }

    fn rule_id(&self) -> RuleId {
        MergeTwoFilters
    }

    fn rule_promise(&self) -> RulePromise {
        Medium
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::operator::OperatorType;
    use crate::optimizer::OptimizerContext;
    use crate::plan::PlanNodeRef;
    use crate::rules::{MergeTwoFiltersRule, Rule, RuleResult};
    use crate::scalar::BinaryType::{Eq, Lt};
    use crate::scalar::{and, binary, extract_conjuncts};
    use crate::test_utils::{filter, gt_zero, int, int_column, int_column_ref, scan};

    fn apply(input: &PlanNodeRef) -> Vec<PlanNodeRef> {
        let rule = MergeTwoFiltersRule::new();
        let mut result = RuleResult::new();
        rule.apply(input, &OptimizerContext::default(), &mut result)
            .unwrap();
        result.results().collect()
    }

    #[test]
    fn test_merge_two_filters() {
        let a = gt_zero(1, "a");
        let b = binary(Lt, int_column_ref(2, "b"), int(5));
        let t1 = scan("t1", vec![int_column(1, "a"), int_column(2, "b")]);
        let input = filter(a.clone(), filter(b.clone(), t1.clone()));

        let results = apply(&input);

        assert_eq!(1, results.len());
        let merged = &results[0];
        assert_eq!(OperatorType::LogicalFilter, merged.operator().op_type());
        let predicate = merged
            .operator()
            .as_logical()
            .and_then(|op| op.as_logical_filter())
            .unwrap()
            .predicate();
        assert_eq!(&and(a, b), predicate);
        assert!(Arc::ptr_eq(&t1, &merged.inputs()[0]));
    }

    #[test]
    fn test_duplicate_conjuncts() {
        let a = gt_zero(1, "a");
        let b = binary(Lt, int_column_ref(2, "b"), int(5));
        let c = binary(Eq, int_column_ref(3, "c"), int(1));
        let t1 = scan("t1", vec![int_column(1, "a")]);
        let input = filter(
            and(a.clone(), b.clone()),
            filter(and(b.clone(), c.clone()), t1),
        );

        let results = apply(&input);

        let predicate = results[0]
            .operator()
            .as_logical()
            .and_then(|op| op.as_logical_filter())
            .unwrap()
            .predicate();
        assert_eq!(vec![a, b, c], extract_conjuncts(predicate));
    }

    #[test]
    fn test_identical_filters() {
        let a = gt_zero(1, "a");
        let input = filter(a.clone(), filter(a.clone(), scan("t1", vec![])));

        let results = apply(&input);

        let predicate = results[0]
            .operator()
            .as_logical()
            .and_then(|op| op.as_logical_filter())
            .unwrap()
            .predicate();
        assert_eq!(&a, predicate);
    }

    #[test]
    fn test_single_filter_does_not_match() {
        let rule = MergeTwoFiltersRule::new();
        let input = filter(gt_zero(1, "a"), scan("t1", vec![int_column(1, "a")]));

        assert!(!rule.applicable(&input));
    }
}
