use std::fmt::Formatter;

use crate::operator::{DisplayFields, OperatorTrait};
use crate::scalar::ScalarOperatorRef;

#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
pub enum JoinType {
    Inner,
    LeftOuter,
    RightOuter,
    FullOuter,
    LeftSemi,
    LeftAnti,
    Cross,
}

/// Join of exactly two inputs, left then right.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct Join {
    join_type: JoinType,
    on_predicate: Option<ScalarOperatorRef>,
}

impl Join {
    pub fn new(join_type: JoinType, on_predicate: Option<ScalarOperatorRef>) -> Self {
        Self {
            join_type,
            on_predicate,
        }
    }

    pub fn join_type(&self) -> JoinType {
        self.join_type
    }

    pub fn on_predicate(&self) -> Option<&ScalarOperatorRef> {
        self.on_predicate.as_ref()
    }
}

impl OperatorTrait for Join {
    fn arity(&self) -> usize {
        2
    }
}

impl DisplayFields for Join {
    fn display(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut s = f.debug_struct("");
        s.field("join_type", &self.join_type);
        if let Some(predicate) = &self.on_predicate {
            s.field("on_predicate", &format_args!("{}", predicate));
        }
        s.finish()
    }
}
