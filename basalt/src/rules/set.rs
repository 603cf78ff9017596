use anyhow::bail;
use enumset::EnumSet;
use log::debug;

use crate::error::{BasaltResult, OptimizerError};
use crate::optimizer::{OptimizerConfig, OptimizerContext};
use crate::plan::{PlanNode, PlanNodeRef};
use crate::rules::{transformation_rules, Rule, RuleId, RuleImpl, RuleResult};

/// Registry of the rules available to a search driver, keyed by [`RuleId`].
///
/// A rule set is immutable once built and meant to be shared between queries, e.g. through an
/// `Arc<RuleSet>`.
#[derive(Debug)]
pub struct RuleSet {
    /// Sorted by promise, high first.
    rules: Vec<RuleImpl>,
    registered: EnumSet<RuleId>,
}

impl RuleSet {
    /// All transformation rules not disabled by `config`.
    pub fn new(config: &OptimizerConfig) -> BasaltResult<Self> {
        transformation_rules()
            .into_iter()
            .filter(|rule| config.is_rule_enabled(rule.rule_id()))
            .fold(RuleSet::builder(), RuleSetBuilder::add_rule)
            .build()
    }

    pub fn builder() -> RuleSetBuilder {
        RuleSetBuilder { rules: vec![] }
    }

    pub fn rule(&self, rule_id: RuleId) -> Option<&RuleImpl> {
        self.rules.iter().find(|r| r.rule_id() == rule_id)
    }

    pub fn contains(&self, rule_id: RuleId) -> bool {
        self.registered.contains(rule_id)
    }

    pub fn rules(&self) -> impl Iterator<Item = &RuleImpl> {
        self.rules.iter()
    }

    /// Whether `rule_id` is registered and its pattern matches `node`.
    pub fn applicable(&self, rule_id: RuleId, node: &PlanNode) -> bool {
        self.rule(rule_id)
            .map_or(false, |rule| rule.applicable(node))
    }

    /// Applies a rule to `node` and returns the replacement trees, possibly none.
    ///
    /// The caller must only apply rules whose pattern matches `node`, see
    /// [`RuleSet::applicable`].
    pub fn apply(
        &self,
        rule_id: RuleId,
        node: &PlanNodeRef,
        ctx: &OptimizerContext,
    ) -> BasaltResult<Vec<PlanNodeRef>> {
        let rule = self
            .rule(rule_id)
            .ok_or(OptimizerError::RuleNotRegistered(rule_id))?;

        if !rule.applicable(node) {
            debug!(
                "Rejecting rule {:?} on {}, pattern not matched",
                rule,
                node.operator()
            );
            bail!(OptimizerError::PatternMismatch {
                rule: rule_id,
                operator: node.operator().op_type(),
            });
        }

        debug!("Beginning to apply rule {:?} to {}", rule, node.operator());

        let mut result = RuleResult::new();
        rule.apply(node, ctx, &mut result)?;

        let nodes = result.results().collect::<Vec<_>>();
        for new_node in &nodes {
            new_node.validate()?;
            debug!(
                "Result of applying rule {:?} to {}: {}",
                rule,
                node.operator(),
                new_node.operator()
            );
        }

        Ok(nodes)
    }
}

pub struct RuleSetBuilder {
    rules: Vec<RuleImpl>,
}

impl RuleSetBuilder {
    pub fn add_rule<R: Into<RuleImpl>>(mut self, rule: R) -> Self {
        self.rules.push(rule.into());
        self
    }

    /// Validates every pattern and rejects duplicated rule ids.
    pub fn build(mut self) -> BasaltResult<RuleSet> {
        let mut registered = EnumSet::new();
        for rule in &self.rules {
            rule.pattern().validate()?;
            if !registered.insert(rule.rule_id()) {
                bail!("Rule {:?} registered twice", rule.rule_id());
            }
        }

        self.rules
            .sort_by(|left, right| right.rule_promise().cmp(&left.rule_promise()));

        Ok(RuleSet {
            rules: self.rules,
            registered,
        })
    }
}
