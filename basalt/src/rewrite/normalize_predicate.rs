use crate::rewrite::{ScalarRewriteRule, ScalarRewriteRuleType};
use crate::scalar::BinaryType::{Ge, Gt, Le, Lt};
use crate::scalar::{
    and, binary, or, ScalarOperator, ScalarOperatorRef, ScalarOperatorTrait, ScalarOperatorType,
};

/// Brings predicates into the canonical shape other rules expect.
///
/// * `s BETWEEN lo AND hi` becomes `s >= lo AND s <= hi`.
/// * `s NOT BETWEEN lo AND hi` becomes `s < lo OR s > hi`.
/// * A comparison with a constant on the left only is swapped, `1 < a` becomes `a > 1`.
#[derive(Clone, Debug, Default)]
pub struct NormalizePredicateRule {}

impl NormalizePredicateRule {
    pub fn new() -> Self {
        Self {}
    }
}

impl ScalarRewriteRule for NormalizePredicateRule {
    fn apply(&self, scalar: &ScalarOperatorRef) -> Option<ScalarOperatorRef> {
        match &**scalar {
            ScalarOperator::BetweenPredicate(between) => {
                let subject = between.subject();
                let lower = between.lower().clone();
                let upper = between.upper().clone();
                if between.is_not_between() {
                    Some(or(
                        binary(Lt, subject.clone(), lower),
                        binary(Gt, subject.clone(), upper),
                    ))
                } else {
                    Some(and(
                        binary(Ge, subject.clone(), lower),
                        binary(Le, subject.clone(), upper),
                    ))
                }
            }
            ScalarOperator::BinaryPredicate(predicate)
                if predicate.left().op_type() == ScalarOperatorType::Constant
                    && predicate.right().op_type() != ScalarOperatorType::Constant =>
            {
                Some(binary(
                    predicate.binary_type().commutative(),
                    predicate.right().clone(),
                    predicate.left().clone(),
                ))
            }
            _ => None,
        }
    }

    fn rule_type(&self) -> ScalarRewriteRuleType {
        ScalarRewriteRuleType::NormalizePredicate
    }
}

#[cfg(test)]
mod tests {
    use arrow_schema::DataType;
    use datafusion_common::ScalarValue;

    use crate::rewrite::{NormalizePredicateRule, ScalarRewriteRule};
    use crate::scalar::BinaryType::{Eq, Ge, Gt, Le, Lt};
    use crate::scalar::{
        between, binary, column, constant, CompoundType, ScalarOperatorTrait, ScalarOperatorType,
    };

    #[test]
    fn test_between_to_compound() {
        let subject = column(1, DataType::Int32, "a", true);
        let lower = constant(ScalarValue::Int32(Some(1)));
        let upper = column(2, DataType::Int32, "b", true);

        let rewritten = NormalizePredicateRule::new()
            .apply(&between(false, subject.clone(), lower.clone(), upper.clone()))
            .unwrap();

        assert_eq!(ScalarOperatorType::Compound, rewritten.op_type());
        assert_eq!(DataType::Boolean, rewritten.data_type());
        assert_eq!(
            CompoundType::And,
            rewritten.as_compound_predicate().unwrap().compound_type()
        );

        let ge = rewritten.child_at(0).unwrap();
        let le = rewritten.child_at(1).unwrap();
        assert_eq!(Ge, ge.as_binary_predicate().unwrap().binary_type());
        assert_eq!(Le, le.as_binary_predicate().unwrap().binary_type());
        assert_eq!(
            ScalarOperatorType::Constant,
            ge.child_at(1).unwrap().op_type()
        );
        assert_eq!(
            ScalarOperatorType::Variable,
            le.child_at(1).unwrap().op_type()
        );
        assert_eq!(Some(subject), ge.child_at(0));
    }

    #[test]
    fn test_not_between_to_compound() {
        let subject = column(1, DataType::Int32, "a", true);
        let lower = constant(ScalarValue::Int32(Some(1)));
        let upper = column(2, DataType::Int32, "b", true);

        let rewritten = NormalizePredicateRule::new()
            .apply(&between(true, subject.clone(), lower.clone(), upper.clone()))
            .unwrap();

        assert_eq!(
            CompoundType::Or,
            rewritten.as_compound_predicate().unwrap().compound_type()
        );
        assert_eq!(binary(Lt, subject.clone(), lower), rewritten.child_at(0).unwrap());
        assert_eq!(binary(Gt, subject, upper), rewritten.child_at(1).unwrap());
        assert_eq!(DataType::Boolean, rewritten.data_type());
    }

    #[test]
    fn test_commute_constant_left() {
        let a = column(1, DataType::Int32, "a", true);
        let one = constant(ScalarValue::Int32(Some(1)));
        let rule = NormalizePredicateRule::new();

        assert_eq!(
            Some(binary(Gt, a.clone(), one.clone())),
            rule.apply(&binary(Lt, one.clone(), a.clone()))
        );
        assert_eq!(None, rule.apply(&binary(Eq, a.clone(), one.clone())));
        assert_eq!(None, rule.apply(&binary(Eq, one.clone(), one)));
        assert_eq!(None, rule.apply(&a));
    }
}
