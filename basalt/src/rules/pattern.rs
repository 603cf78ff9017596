use anyhow::bail;
use log::trace;

use crate::error::{BasaltResult, OptimizerError};
use crate::operator::OperatorType;
use crate::operator::OperatorType::{PatternLeaf, PatternMultiLeaf};
use crate::plan::PlanNode;

/// A pattern defines how to match a sub tree of a plan.
///
/// If we want to match `Filter(Intersect(...))` with any number of intersect inputs, the
/// pattern tree should be defined like:
/// ```
/// use basalt::operator::OperatorType::*;
/// use basalt::rules::Pattern;
///
/// Pattern::new_builder(LogicalFilter)
///   .begin(LogicalIntersect)
///     .leaf(PatternMultiLeaf)
///   .end()
/// .build();
/// ```
///
/// `PatternLeaf` matches exactly one input of any shape and `PatternMultiLeaf`, only allowed as
/// the last child, matches all remaining inputs.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct Pattern {
    op_type: OperatorType,
    children: Vec<Pattern>,
}

impl Pattern {
    pub fn new(op_type: OperatorType) -> Self {
        Self {
            op_type,
            children: vec![],
        }
    }

    pub fn with_children<I: IntoIterator<Item = Pattern>>(
        op_type: OperatorType,
        children: I,
    ) -> Self {
        Self {
            op_type,
            children: children.into_iter().collect(),
        }
    }

    pub fn new_builder(op_type: OperatorType) -> PatternBuilder {
        PatternBuilder {
            root: Pattern::new(op_type),
            open: vec![],
        }
    }

    pub fn op_type(&self) -> OperatorType {
        self.op_type
    }

    pub fn children(&self) -> &[Pattern] {
        &self.children
    }

    fn ends_with_multi_leaf(&self) -> bool {
        self.children
            .last()
            .map_or(false, |c| c.op_type == PatternMultiLeaf)
    }

    /// Checks the pattern is well formed.
    ///
    /// The root can't be `PatternMultiLeaf`, wildcards can't have children and
    /// `PatternMultiLeaf` may only appear as the last child of its parent.
    pub fn validate(&self) -> BasaltResult<()> {
        if self.op_type == PatternMultiLeaf {
            bail!(OptimizerError::InvalidPattern(
                "root of pattern can't be PatternMultiLeaf".to_string()
            ));
        }
        self.validate_node()
    }

    fn validate_node(&self) -> BasaltResult<()> {
        if self.op_type.is_pattern() && !self.children.is_empty() {
            bail!(OptimizerError::InvalidPattern(format!(
                "{} can't have children",
                self.op_type
            )));
        }

        let fixed = match self.ends_with_multi_leaf() {
            true => &self.children[..self.children.len() - 1],
            false => &self.children[..],
        };
        if fixed.iter().any(|c| c.op_type == PatternMultiLeaf) {
            bail!(OptimizerError::InvalidPattern(format!(
                "PatternMultiLeaf must be the last child of {}",
                self.op_type
            )));
        }

        self.children.iter().try_for_each(Pattern::validate_node)
    }

    /// Tests whether the tree rooted at `node` has the shape described by this pattern.
    pub fn matches(&self, node: &PlanNode) -> bool {
        if self.op_type.is_pattern() {
            return true;
        }

        let op_type = node.operator().op_type();
        if op_type != self.op_type {
            trace!("Operator {} doesn't match {}", op_type, self.op_type);
            return false;
        }

        let inputs = node.inputs();
        if self.ends_with_multi_leaf() {
            let fixed = &self.children[..self.children.len() - 1];
            if inputs.len() < fixed.len() {
                trace!(
                    "{} has {} inputs, pattern requires at least {}",
                    op_type,
                    inputs.len(),
                    fixed.len()
                );
                return false;
            }
            fixed
                .iter()
                .zip(inputs)
                .all(|(pattern, input)| pattern.matches(input))
        } else {
            if inputs.len() != self.children.len() {
                trace!(
                    "{} has {} inputs, pattern requires {}",
                    op_type,
                    inputs.len(),
                    self.children.len()
                );
                return false;
            }
            self.children
                .iter()
                .zip(inputs)
                .all(|(pattern, input)| pattern.matches(input))
        }
    }
}

/// Builds a [`Pattern`] top down, children are added to the innermost open node.
pub struct PatternBuilder {
    root: Pattern,
    open: Vec<Pattern>,
}

impl PatternBuilder {
    /// Opens a child node, subsequent calls add children to it until [`PatternBuilder::end`].
    pub fn begin(mut self, op_type: OperatorType) -> Self {
        self.open.push(Pattern::new(op_type));
        self
    }

    pub fn leaf(mut self, op_type: OperatorType) -> Self {
        self.add_child(Pattern::new(op_type));
        self
    }

    /// Closes the innermost open node. Does nothing when only the root is open.
    pub fn end(mut self) -> Self {
        if let Some(node) = self.open.pop() {
            self.add_child(node);
        }
        self
    }

    /// Closes all open nodes and returns the root.
    pub fn build(mut self) -> Pattern {
        while !self.open.is_empty() {
            self = self.end();
        }
        self.root
    }

    fn add_child(&mut self, child: Pattern) {
        match self.open.last_mut() {
            Some(parent) => parent.children.push(child),
            None => self.root.children.push(child),
        }
    }
}
