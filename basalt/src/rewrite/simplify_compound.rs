use datafusion_common::ScalarValue;

use crate::rewrite::{ScalarRewriteRule, ScalarRewriteRuleType};
use crate::scalar::{constant, CompoundType, ScalarOperator, ScalarOperatorRef, ScalarOperatorTrait};

/// Removes double negation and folds `AND`/`OR` with a boolean literal operand.
#[derive(Clone, Debug, Default)]
pub struct SimplifyCompoundPredicateRule {}

impl SimplifyCompoundPredicateRule {
    pub fn new() -> Self {
        Self {}
    }
}

fn bool_literal(scalar: &ScalarOperatorRef) -> Option<bool> {
    scalar.as_constant().and_then(|c| c.as_bool())
}

impl ScalarRewriteRule for SimplifyCompoundPredicateRule {
    fn apply(&self, scalar: &ScalarOperatorRef) -> Option<ScalarOperatorRef> {
        let compound = scalar.as_compound_predicate()?;
        let children = compound.children();

        match (compound.compound_type(), children.as_slice()) {
            (CompoundType::Not, [child]) => match &**child {
                ScalarOperator::CompoundPredicate(inner) if inner.is_not() => {
                    inner.children().first().cloned()
                }
                _ => None,
            },
            (CompoundType::And, [left, right]) => {
                match (bool_literal(left), bool_literal(right)) {
                    (Some(false), _) | (_, Some(false)) => {
                        Some(constant(ScalarValue::Boolean(Some(false))))
                    }
                    (Some(true), _) => Some(right.clone()),
                    (_, Some(true)) => Some(left.clone()),
                    _ => None,
                }
            }
            (CompoundType::Or, [left, right]) => {
                match (bool_literal(left), bool_literal(right)) {
                    (Some(true), _) | (_, Some(true)) => {
                        Some(constant(ScalarValue::Boolean(Some(true))))
                    }
                    (Some(false), _) => Some(right.clone()),
                    (_, Some(false)) => Some(left.clone()),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    fn rule_type(&self) -> ScalarRewriteRuleType {
        ScalarRewriteRuleType::SimplifyCompoundPredicate
    }
}
