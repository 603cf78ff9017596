use std::fmt::{Display, Formatter};

use anyhow::{bail, ensure};
use arrow_schema::DataType;
use derive_more::Display as DisplayDerive;
use smallvec::smallvec;

use crate::error::BasaltResult;
use crate::scalar::{
    ScalarOperator, ScalarOperatorRef, ScalarOperatorTrait, ScalarOperatorType,
    ScalarOperatorVec,
};

#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, DisplayDerive)]
pub enum BinaryType {
    #[display(fmt = "=")]
    Eq,
    #[display(fmt = "!=")]
    Ne,
    #[display(fmt = "<")]
    Lt,
    #[display(fmt = "<=")]
    Le,
    #[display(fmt = ">")]
    Gt,
    #[display(fmt = ">=")]
    Ge,
}

impl BinaryType {
    /// The comparison that holds after swapping both operands, e.g. `a < b` iff `b > a`.
    pub fn commutative(self) -> BinaryType {
        match self {
            BinaryType::Eq => BinaryType::Eq,
            BinaryType::Ne => BinaryType::Ne,
            BinaryType::Lt => BinaryType::Gt,
            BinaryType::Le => BinaryType::Ge,
            BinaryType::Gt => BinaryType::Lt,
            BinaryType::Ge => BinaryType::Le,
        }
    }
}

#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct BinaryPredicateOperator {
    binary_type: BinaryType,
    left: ScalarOperatorRef,
    right: ScalarOperatorRef,
}

impl BinaryPredicateOperator {
    pub fn new(
        binary_type: BinaryType,
        left: ScalarOperatorRef,
        right: ScalarOperatorRef,
    ) -> Self {
        Self {
            binary_type,
            left,
            right,
        }
    }

    pub fn binary_type(&self) -> BinaryType {
        self.binary_type
    }

    pub fn left(&self) -> &ScalarOperatorRef {
        &self.left
    }

    pub fn right(&self) -> &ScalarOperatorRef {
        &self.right
    }
}

impl ScalarOperatorTrait for BinaryPredicateOperator {
    fn op_type(&self) -> ScalarOperatorType {
        ScalarOperatorType::Binary
    }

    fn data_type(&self) -> DataType {
        DataType::Boolean
    }

    fn children(&self) -> ScalarOperatorVec {
        smallvec![self.left.clone(), self.right.clone()]
    }

    fn with_children(&self, children: ScalarOperatorVec) -> BasaltResult<ScalarOperator> {
        match children.as_slice() {
            [left, right] => Ok(BinaryPredicateOperator::new(
                self.binary_type,
                left.clone(),
                right.clone(),
            )
            .into()),
            _ => bail!(
                "Binary predicate requires 2 children, got {}",
                children.len()
            ),
        }
    }
}

impl Display for BinaryPredicateOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.left, self.binary_type, self.right)
    }
}

#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, DisplayDerive)]
pub enum CompoundType {
    #[display(fmt = "AND")]
    And,
    #[display(fmt = "OR")]
    Or,
    #[display(fmt = "NOT")]
    Not,
}

/// `AND`, `OR` with two children or `NOT` with one.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct CompoundPredicateOperator {
    compound_type: CompoundType,
    children: ScalarOperatorVec,
}

impl CompoundPredicateOperator {
    /// Callers inside the crate always pass the right number of children, see
    /// [`CompoundPredicateOperator::try_new`] for the checked version.
    pub(crate) fn new(compound_type: CompoundType, children: ScalarOperatorVec) -> Self {
        Self {
            compound_type,
            children,
        }
    }

    pub fn try_new(
        compound_type: CompoundType,
        children: ScalarOperatorVec,
    ) -> BasaltResult<Self> {
        let expected = Self::arity_of(compound_type);
        ensure!(
            children.len() == expected,
            "{} requires {} children, got {}",
            compound_type,
            expected,
            children.len()
        );
        Ok(Self::new(compound_type, children))
    }

    pub fn compound_type(&self) -> CompoundType {
        self.compound_type
    }

    pub fn is_and(&self) -> bool {
        self.compound_type == CompoundType::And
    }

    pub fn is_or(&self) -> bool {
        self.compound_type == CompoundType::Or
    }

    pub fn is_not(&self) -> bool {
        self.compound_type == CompoundType::Not
    }

    fn arity_of(compound_type: CompoundType) -> usize {
        match compound_type {
            CompoundType::And | CompoundType::Or => 2,
            CompoundType::Not => 1,
        }
    }
}

impl ScalarOperatorTrait for CompoundPredicateOperator {
    fn op_type(&self) -> ScalarOperatorType {
        ScalarOperatorType::Compound
    }

    fn data_type(&self) -> DataType {
        DataType::Boolean
    }

    fn children(&self) -> ScalarOperatorVec {
        self.children.clone()
    }

    fn with_children(&self, children: ScalarOperatorVec) -> BasaltResult<ScalarOperator> {
        Ok(CompoundPredicateOperator::try_new(self.compound_type, children)?.into())
    }
}

impl Display for CompoundPredicateOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_not() {
            return match self.children.first() {
                Some(child) => write!(f, "NOT ({})", child),
                None => write!(f, "NOT ()"),
            };
        }

        for (idx, child) in self.children.iter().enumerate() {
            if idx > 0 {
                write!(f, " {} ", self.compound_type)?;
            }
            match &**child {
                ScalarOperator::CompoundPredicate(c) if !c.is_not() => write!(f, "({})", c)?,
                other => write!(f, "{}", other)?,
            }
        }
        Ok(())
    }
}

/// `subject [NOT] BETWEEN lower AND upper`, bounds inclusive.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct BetweenPredicateOperator {
    not_between: bool,
    subject: ScalarOperatorRef,
    lower: ScalarOperatorRef,
    upper: ScalarOperatorRef,
}

impl BetweenPredicateOperator {
    pub fn new(
        not_between: bool,
        subject: ScalarOperatorRef,
        lower: ScalarOperatorRef,
        upper: ScalarOperatorRef,
    ) -> Self {
        Self {
            not_between,
            subject,
            lower,
            upper,
        }
    }

    pub fn is_not_between(&self) -> bool {
        self.not_between
    }

    pub fn subject(&self) -> &ScalarOperatorRef {
        &self.subject
    }

    pub fn lower(&self) -> &ScalarOperatorRef {
        &self.lower
    }

    pub fn upper(&self) -> &ScalarOperatorRef {
        &self.upper
    }
}

impl ScalarOperatorTrait for BetweenPredicateOperator {
    fn op_type(&self) -> ScalarOperatorType {
        ScalarOperatorType::Between
    }

    fn data_type(&self) -> DataType {
        DataType::Boolean
    }

    fn children(&self) -> ScalarOperatorVec {
        smallvec![self.subject.clone(), self.lower.clone(), self.upper.clone()]
    }

    fn with_children(&self, children: ScalarOperatorVec) -> BasaltResult<ScalarOperator> {
        match children.as_slice() {
            [subject, lower, upper] => Ok(BetweenPredicateOperator::new(
                self.not_between,
                subject.clone(),
                lower.clone(),
                upper.clone(),
            )
            .into()),
            _ => bail!(
                "Between predicate requires 3 children, got {}",
                children.len()
            ),
        }
    }
}

impl Display for BetweenPredicateOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let keyword = if self.not_between {
            "NOT BETWEEN"
        } else {
            "BETWEEN"
        };
        write!(
            f,
            "{} {} {} AND {}",
            self.subject, keyword, self.lower, self.upper
        )
    }
}

#[cfg(test)]
mod tests {
    use arrow_schema::DataType;
    use smallvec::smallvec;

    use crate::scalar::CompoundType::{And, Not, Or};
    use crate::scalar::{column, CompoundPredicateOperator, ScalarOperatorVec};

    #[test]
    fn test_compound_arity_is_checked() {
        let a = column(1, DataType::Boolean, "a", true);
        let b = column(2, DataType::Boolean, "b", true);

        let empty_not = CompoundPredicateOperator::try_new(Not, ScalarOperatorVec::new());
        assert!(empty_not.is_err());
        let wide_and =
            CompoundPredicateOperator::try_new(And, smallvec![a.clone(), b.clone(), a.clone()]);
        assert!(wide_and.is_err());
        let narrow_or = CompoundPredicateOperator::try_new(Or, smallvec![a.clone()]);
        assert!(narrow_or.is_err());

        let not_a = CompoundPredicateOperator::try_new(Not, smallvec![a.clone()]).unwrap();
        assert_eq!("NOT (a)", not_a.to_string());
        let a_and_b = CompoundPredicateOperator::try_new(And, smallvec![a, b]).unwrap();
        assert_eq!("a AND b", a_and_b.to_string());
    }
}
