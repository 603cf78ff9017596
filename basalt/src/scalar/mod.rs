//! Scalar expressions carried by relational operators, e.g. the predicate of a filter.
//!
//! Scalar trees are immutable value trees shared through [`ScalarOperatorRef`]. Equality and
//! hashing are structural, so two predicates built independently from the same columns and
//! constants compare equal, which is what conjunct deduplication relies on.
mod column_ref;
pub use column_ref::*;
mod column_ref_set;
pub use column_ref_set::*;
mod constant;
pub use constant::*;
mod predicate;
pub use predicate::*;
mod utils;
pub use utils::*;

use std::sync::Arc;

use arrow_schema::DataType;
use datafusion_common::ScalarValue;
use derive_more::Display;
use enum_as_inner::EnumAsInner;
use enum_dispatch::enum_dispatch;
use smallvec::{smallvec, SmallVec};
use strum_macros::AsRefStr;

use crate::error::BasaltResult;

pub type ScalarOperatorRef = Arc<ScalarOperator>;

/// Children of a scalar node. No variant has more than three.
pub type ScalarOperatorVec = SmallVec<[ScalarOperatorRef; 3]>;

/// Tag of a scalar operator, independent of its payload.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, AsRefStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ScalarOperatorType {
    Constant,
    /// Column reference.
    Variable,
    Binary,
    Compound,
    Between,
}

#[derive(Clone, Debug, Hash, Eq, PartialEq, EnumAsInner, Display)]
#[enum_dispatch]
pub enum ScalarOperator {
    Constant(ConstantOperator),
    ColumnRef(ColumnRefOperator),
    BinaryPredicate(BinaryPredicateOperator),
    CompoundPredicate(CompoundPredicateOperator),
    BetweenPredicate(BetweenPredicateOperator),
}

#[enum_dispatch(ScalarOperator)]
pub trait ScalarOperatorTrait {
    fn op_type(&self) -> ScalarOperatorType;

    fn data_type(&self) -> DataType;

    fn children(&self) -> ScalarOperatorVec;

    /// Creates a copy of this node with `children` replacing its current children.
    ///
    /// Fails when the number of children doesn't fit the operator.
    fn with_children(&self, children: ScalarOperatorVec) -> BasaltResult<ScalarOperator>;
}

impl ScalarOperator {
    pub fn into_ref(self) -> ScalarOperatorRef {
        Arc::new(self)
    }

    pub fn child_at(&self, idx: usize) -> Option<ScalarOperatorRef> {
        self.children().get(idx).cloned()
    }
}

pub fn constant(value: ScalarValue) -> ScalarOperatorRef {
    ScalarOperator::from(ConstantOperator::new(value)).into_ref()
}

pub fn column<S: Into<String>>(
    id: u32,
    data_type: DataType,
    name: S,
    nullable: bool,
) -> ScalarOperatorRef {
    ScalarOperator::from(ColumnRefOperator::new(id, data_type, name, nullable)).into_ref()
}

pub fn binary(
    binary_type: BinaryType,
    left: ScalarOperatorRef,
    right: ScalarOperatorRef,
) -> ScalarOperatorRef {
    ScalarOperator::from(BinaryPredicateOperator::new(binary_type, left, right)).into_ref()
}

pub fn and(left: ScalarOperatorRef, right: ScalarOperatorRef) -> ScalarOperatorRef {
    ScalarOperator::from(CompoundPredicateOperator::new(
        CompoundType::And,
        smallvec![left, right],
    ))
    .into_ref()
}

pub fn or(left: ScalarOperatorRef, right: ScalarOperatorRef) -> ScalarOperatorRef {
    ScalarOperator::from(CompoundPredicateOperator::new(
        CompoundType::Or,
        smallvec![left, right],
    ))
    .into_ref()
}

pub fn not(child: ScalarOperatorRef) -> ScalarOperatorRef {
    ScalarOperator::from(CompoundPredicateOperator::new(
        CompoundType::Not,
        smallvec![child],
    ))
    .into_ref()
}

pub fn between(
    not_between: bool,
    subject: ScalarOperatorRef,
    lower: ScalarOperatorRef,
    upper: ScalarOperatorRef,
) -> ScalarOperatorRef {
    ScalarOperator::from(BetweenPredicateOperator::new(
        not_between,
        subject,
        lower,
        upper,
    ))
    .into_ref()
}
