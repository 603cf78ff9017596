use std::fmt::Formatter;

use crate::operator::{DisplayFields, OperatorTrait};
use crate::scalar::ScalarOperatorRef;

/// Keeps the input rows for which `predicate` evaluates to true.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct Filter {
    predicate: ScalarOperatorRef,
}

impl Filter {
    pub fn new(predicate: ScalarOperatorRef) -> Self {
        Self { predicate }
    }

    pub fn predicate(&self) -> &ScalarOperatorRef {
        &self.predicate
    }
}

impl OperatorTrait for Filter {
    fn arity(&self) -> usize {
        1
    }
}

impl DisplayFields for Filter {
    fn display(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("")
            .field("predicate", &format_args!("{}", self.predicate))
            .finish()
    }
}
