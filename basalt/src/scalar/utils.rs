use std::collections::HashMap;
use std::sync::Arc;

use smallvec::smallvec;

use crate::error::BasaltResult;
use crate::scalar::{
    ColumnRefId, ColumnRefSet, CompoundPredicateOperator, CompoundType, ScalarOperator,
    ScalarOperatorRef, ScalarOperatorTrait, ScalarOperatorVec,
};

/// Splits a predicate into its top level `AND` connected parts, left to right.
///
/// A predicate without a top level `AND` is its own single conjunct.
pub fn extract_conjuncts(predicate: &ScalarOperatorRef) -> Vec<ScalarOperatorRef> {
    let mut conjuncts = vec![];
    collect_conjuncts(predicate, &mut conjuncts);
    conjuncts
}

fn collect_conjuncts(predicate: &ScalarOperatorRef, conjuncts: &mut Vec<ScalarOperatorRef>) {
    match &**predicate {
        ScalarOperator::CompoundPredicate(compound) if compound.is_and() => {
            for child in compound.children() {
                collect_conjuncts(&child, conjuncts);
            }
        }
        _ => conjuncts.push(predicate.clone()),
    }
}

/// Connects predicates with `AND`. Returns `None` for no predicates and the predicate itself
/// for exactly one.
pub fn compound_and<I>(predicates: I) -> Option<ScalarOperatorRef>
where
    I: IntoIterator<Item = ScalarOperatorRef>,
{
    create_compound(CompoundType::And, predicates.into_iter().collect())
}

/// Connects predicates with `OR`, see [`compound_and`].
pub fn compound_or<I>(predicates: I) -> Option<ScalarOperatorRef>
where
    I: IntoIterator<Item = ScalarOperatorRef>,
{
    create_compound(CompoundType::Or, predicates.into_iter().collect())
}

/// Builds a balanced binary tree so deep conjunct lists don't produce deep recursion later.
fn create_compound(
    compound_type: CompoundType,
    mut nodes: Vec<ScalarOperatorRef>,
) -> Option<ScalarOperatorRef> {
    while nodes.len() > 1 {
        nodes = nodes
            .chunks(2)
            .map(|pair| match pair {
                [left, right] => ScalarOperator::from(CompoundPredicateOperator::new(
                    compound_type,
                    smallvec![left.clone(), right.clone()],
                ))
                .into_ref(),
                _ => pair[0].clone(),
            })
            .collect();
    }

    nodes.pop()
}

/// All columns referenced anywhere in `scalar`.
pub fn used_columns(scalar: &ScalarOperatorRef) -> ColumnRefSet {
    let mut columns = ColumnRefSet::new();
    collect_columns(scalar, &mut columns);
    columns
}

fn collect_columns(scalar: &ScalarOperatorRef, columns: &mut ColumnRefSet) {
    if let ScalarOperator::ColumnRef(column) = &**scalar {
        columns.insert(column.id());
    }
    for child in scalar.children() {
        collect_columns(&child, columns);
    }
}

/// Replaces column references found in `mapping` with the mapped expression.
///
/// Unmapped columns stay as they are, and subtrees without replacements are shared with the
/// input rather than copied.
pub fn replace_column_refs(
    scalar: &ScalarOperatorRef,
    mapping: &HashMap<ColumnRefId, ScalarOperatorRef>,
) -> BasaltResult<ScalarOperatorRef> {
    if let ScalarOperator::ColumnRef(column) = &**scalar {
        return Ok(mapping
            .get(&column.id())
            .cloned()
            .unwrap_or_else(|| scalar.clone()));
    }

    let children = scalar.children();
    let new_children = children
        .iter()
        .map(|child| replace_column_refs(child, mapping))
        .collect::<BasaltResult<ScalarOperatorVec>>()?;

    if children
        .iter()
        .zip(new_children.iter())
        .all(|(old, new)| Arc::ptr_eq(old, new))
    {
        Ok(scalar.clone())
    } else {
        Ok(scalar.with_children(new_children)?.into_ref())
    }
}
