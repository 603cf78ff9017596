use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{anyhow, bail};
use log::debug;

use crate::error::{BasaltResult, OptimizerError};
use crate::operator::LogicalOperator::LogicalFilter;
use crate::operator::Operator::Logical;
use crate::operator::{Filter, OperatorType};
use crate::optimizer::OptimizerContext;
use crate::plan::{PlanNode, PlanNodeRef};
use crate::rules::RuleId::{
    PushDownPredicateExcept, PushDownPredicateIntersect, PushDownPredicateUnion,
};
use crate::rules::RulePromise::High;
use crate::rules::{Pattern, Rule, RuleId, RulePromise, RuleResult};
use crate::scalar::{
    replace_column_refs, used_columns, ColumnRefId, ColumnRefSet, ScalarOperator,
    ScalarOperatorRef,
};

#[rustfmt::skip::macros(lazy_static)]
lazy_static! {
    static ref PUSH_DOWN_PREDICATE_INTERSECT_PATTERN: Pattern = {
        Pattern::new_builder(OperatorType::LogicalFilter)
          .begin(OperatorType::LogicalIntersect)
            .leaf(OperatorType::PatternMultiLeaf)
          .end()
        .build()
    };
    static ref PUSH_DOWN_PREDICATE_UNION_PATTERN: Pattern = {
        Pattern::new_builder(OperatorType::LogicalFilter)
          .begin(OperatorType::LogicalUnion)
            .leaf(OperatorType::PatternMultiLeaf)
          .end()
        .build()
    };
    static ref PUSH_DOWN_PREDICATE_EXCEPT_PATTERN: Pattern = {
        Pattern::new_builder(OperatorType::LogicalFilter)
          .begin(OperatorType::LogicalExcept)
            .leaf(OperatorType::PatternMultiLeaf)
          .end()
        .build()
    };
}

/// Moves a filter on top of a set operation into every input of the set operation.
///
/// The predicate is translated for each input by replacing every output column with the column
/// that input contributes to it. The filter is removed from the top. Nothing is produced when
/// the predicate references a column the set operation doesn't output.
pub fn push_down_predicate_through_set(
    input: &PlanNodeRef,
    result: &mut RuleResult,
) -> BasaltResult<()> {
    let set_node = input
        .input_at(0)
        .ok_or_else(|| anyhow!("Filter without input"))?;

    let (filter, set_operation) = match (input.operator(), set_node.operator()) {
        (Logical(LogicalFilter(filter)), Logical(op)) => match op.set_operation() {
            Some(set_operation) => (filter, set_operation),
            None => bail!("Pattern miss matched"),
        },
        _ => bail!("Pattern miss matched"),
    };

    let predicate = filter.predicate();
    let output_columns = set_operation.output_columns();
    let output_ids: ColumnRefSet = output_columns.iter().map(|c| c.id()).collect();
    if !output_ids.contains_all(&used_columns(predicate)) {
        debug!(
            "Predicate {} references columns not produced by {}",
            predicate,
            set_node.operator()
        );
        return Ok(());
    }

    let child_output_columns = set_operation.child_output_columns();
    if child_output_columns.len() != set_node.inputs().len() {
        bail!(OptimizerError::ColumnCountMismatch {
            expected: set_node.inputs().len(),
            actual: child_output_columns.len(),
        });
    }

    let mut new_inputs = Vec::with_capacity(set_node.inputs().len());
    for (child, child_columns) in set_node.inputs().iter().zip(child_output_columns) {
        if child_columns.len() != output_columns.len() {
            bail!(OptimizerError::ColumnCountMismatch {
                expected: output_columns.len(),
                actual: child_columns.len(),
            });
        }

        let mapping: HashMap<ColumnRefId, ScalarOperatorRef> = output_columns
            .iter()
            .zip(child_columns)
            .map(|(output, column)| (output.id(), ScalarOperator::from(column.clone()).into_ref()))
            .collect();
        let child_predicate = replace_column_refs(predicate, &mapping)?;

        new_inputs.push(Arc::new(PlanNode::new(
            LogicalFilter(Filter::new(child_predicate)),
            vec![child.clone()],
        )));
    }

    result.add(Arc::new(PlanNode::new(
        set_node.operator().clone(),
        new_inputs,
    )));
    Ok(())
}

macro_rules! push_down_predicate_set_rule {
    ($(#[$doc:meta])* $name:ident, $rule_id:ident, $pattern:ident) => {
        $(#[$doc])*
        #[derive(Clone, Default)]
        pub struct $name {}

        impl $name {
            pub fn new() -> Self {
                Self {}
            }
        }

        impl Rule for $name {
            fn apply(
                &self,
                input: &PlanNodeRef,
                _ctx: &OptimizerContext,
                result: &mut RuleResult,
            ) -> BasaltResult<()> {
                push_down_predicate_through_set(input, result)
            }

            fn pattern(&self) -> &Pattern {
                &$pattern
            }

            fn rule_id(&self) -> RuleId {
                $rule_id
            }

            fn rule_promise(&self) -> RulePromise {
                High
            }
        }
    };
}

push_down_predicate_set_rule!(
    /// `Filter(Intersect(...))` to `Intersect(Filter(...), ...)`.
    PushDownPredicateIntersectRule,
    PushDownPredicateIntersect,
    PUSH_DOWN_PREDICATE_INTERSECT_PATTERN
);
push_down_predicate_set_rule!(
    /// `Filter(Union(...))` to `Union(Filter(...), ...)`.
    PushDownPredicateUnionRule,
    PushDownPredicateUnion,
    PUSH_DOWN_PREDICATE_UNION_PATTERN
);
push_down_predicate_set_rule!(
    /// `Filter(Except(...))` to `Except(Filter(...), ...)`.
    PushDownPredicateExceptRule,
    PushDownPredicateExcept,
    PUSH_DOWN_PREDICATE_EXCEPT_PATTERN
);

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::error::OptimizerError;
    use crate::operator::{OperatorType, SetOperation};
    use crate::optimizer::OptimizerContext;
    use crate::plan::{LogicalPlanBuilder, PlanNodeRef};
    use crate::rules::{
        PushDownPredicateExceptRule, PushDownPredicateIntersectRule, PushDownPredicateUnionRule,
        Rule, RuleResult,
    };
    use crate::scalar::BinaryType::{Gt, Lt};
    use crate::scalar::{and, binary, used_columns, ColumnRefId};
    use crate::test_utils::{filter, gt_zero, int, int_column, int_column_ref, scan, set_operation};

    fn apply<R: Rule>(rule: &R, input: &PlanNodeRef) -> Vec<PlanNodeRef> {
        let mut result = RuleResult::new();
        rule.apply(input, &OptimizerContext::default(), &mut result)
            .unwrap();
        result.results().collect()
    }

    fn branch_predicate_columns(node: &PlanNodeRef) -> Vec<ColumnRefId> {
        let predicate = node
            .operator()
            .as_logical()
            .and_then(|op| op.as_logical_filter())
            .unwrap()
            .predicate();
        used_columns(predicate).iter().collect()
    }

    #[test]
    fn test_push_down_through_intersect() {
        let t1 = scan("t1", vec![int_column(101, "c0")]);
        let t2 = scan("t2", vec![int_column(102, "c1")]);
        let intersect =
            LogicalPlanBuilder::intersect(set_operation(2), vec![t1.clone(), t2.clone()])
                .build()
                .root();
        let input = filter(gt_zero(100, "x"), intersect);

        let rule = PushDownPredicateIntersectRule::new();
        assert!(rule.applicable(&input));
        let results = apply(&rule, &input);

        assert_eq!(1, results.len());
        let new_intersect = &results[0];
        assert_eq!(
            OperatorType::LogicalIntersect,
            new_intersect.operator().op_type()
        );
        assert_eq!(2, new_intersect.inputs().len());

        for (branch, (scan, column)) in new_intersect
            .inputs()
            .iter()
            .zip(vec![(t1, 101), (t2, 102)])
        {
            assert_eq!(OperatorType::LogicalFilter, branch.operator().op_type());
            assert_eq!(vec![ColumnRefId(column)], branch_predicate_columns(branch));
            assert!(Arc::ptr_eq(&scan, &branch.inputs()[0]));
        }
    }

    #[test]
    fn test_push_down_through_union_and_except() {
        let inputs = || {
            (0..3u32)
                .map(|i| scan("t", vec![int_column(101 + i, "c")]))
                .collect::<Vec<_>>()
        };

        let union = LogicalPlanBuilder::union(set_operation(3), inputs())
            .build()
            .root();
        let results = apply(
            &PushDownPredicateUnionRule::new(),
            &filter(gt_zero(100, "x"), union),
        );
        assert_eq!(OperatorType::LogicalUnion, results[0].operator().op_type());
        assert_eq!(3, results[0].inputs().len());

        let except = LogicalPlanBuilder::except(set_operation(3), inputs())
            .build()
            .root();
        let results = apply(
            &PushDownPredicateExceptRule::new(),
            &filter(gt_zero(100, "x"), except),
        );
        assert_eq!(OperatorType::LogicalExcept, results[0].operator().op_type());
        assert_eq!(
            vec![ColumnRefId(103)],
            branch_predicate_columns(&results[0].inputs()[2])
        );
    }

    #[test]
    fn test_columns_are_mapped_by_position() {
        // Second input lists its columns in the opposite order of the first.
        let set_operation = SetOperation::new(
            vec![int_column(100, "x"), int_column(200, "y")],
            vec![
                vec![int_column(1, "a"), int_column(2, "b")],
                vec![int_column(2, "b"), int_column(1, "a")],
            ],
        );
        let union = LogicalPlanBuilder::union(
            set_operation,
            vec![
                scan("t1", vec![int_column(1, "a"), int_column(2, "b")]),
                scan("t2", vec![int_column(1, "a"), int_column(2, "b")]),
            ],
        )
        .build()
        .root();
        let predicate = and(
            binary(Gt, int_column_ref(100, "x"), int(0)),
            binary(Lt, int_column_ref(200, "y"), int(5)),
        );
        let input = filter(predicate, union);

        let results = apply(&PushDownPredicateUnionRule::new(), &input);
        assert_eq!(1, results.len());

        let branch_predicate = |idx: usize| {
            results[0].inputs()[idx]
                .operator()
                .as_logical()
                .and_then(|op| op.as_logical_filter())
                .unwrap()
                .predicate()
                .clone()
        };

        assert_eq!(
            and(
                binary(Gt, int_column_ref(1, "a"), int(0)),
                binary(Lt, int_column_ref(2, "b"), int(5)),
            ),
            branch_predicate(0)
        );
        assert_eq!(
            and(
                binary(Gt, int_column_ref(2, "b"), int(0)),
                binary(Lt, int_column_ref(1, "a"), int(5)),
            ),
            branch_predicate(1)
        );
    }

    #[test]
    fn test_unknown_column_produces_nothing() {
        let intersect = LogicalPlanBuilder::intersect(
            set_operation(1),
            vec![scan("t1", vec![int_column(101, "c0")])],
        )
        .build()
        .root();
        let input = filter(gt_zero(7, "y"), intersect);

        assert!(apply(&PushDownPredicateIntersectRule::new(), &input).is_empty());
    }

    #[test]
    fn test_union_rule_does_not_match_intersect() {
        let intersect = LogicalPlanBuilder::intersect(set_operation(1), vec![scan("t1", vec![])])
            .build()
            .root();
        let input = filter(gt_zero(100, "x"), intersect);

        assert!(!PushDownPredicateUnionRule::new().applicable(&input));
    }

    #[test]
    fn test_column_count_mismatch() {
        let broken = SetOperation::new(
            vec![int_column(100, "x"), int_column(200, "y")],
            vec![vec![int_column(101, "c0")]],
        );
        let intersect = LogicalPlanBuilder::intersect(broken, vec![scan("t1", vec![])])
            .build()
            .root();
        let input = filter(gt_zero(100, "x"), intersect);

        let mut result = RuleResult::new();
        let err = PushDownPredicateIntersectRule::new()
            .apply(&input, &OptimizerContext::default(), &mut result)
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<OptimizerError>(),
            Some(OptimizerError::ColumnCountMismatch {
                expected: 2,
                actual: 1
            })
        ));
    }
}
