use enumset::EnumSet;

use crate::rewrite::ScalarOperatorRewriter;
use crate::rules::RuleId;

pub const DEFAULT_MAX_SCALAR_REWRITE_ITERATIONS: usize = 16;

/// Session level optimizer settings.
#[derive(Clone, Debug)]
pub struct OptimizerConfig {
    /// Upper bound of scalar rewrite passes before giving up on reaching a fixed point.
    max_scalar_rewrite_iterations: usize,
    disabled_rules: EnumSet<RuleId>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            max_scalar_rewrite_iterations: DEFAULT_MAX_SCALAR_REWRITE_ITERATIONS,
            disabled_rules: EnumSet::new(),
        }
    }
}

impl OptimizerConfig {
    pub fn with_max_scalar_rewrite_iterations(mut self, max_iterations: usize) -> Self {
        self.max_scalar_rewrite_iterations = max_iterations;
        self
    }

    pub fn disable_rule(mut self, rule_id: RuleId) -> Self {
        self.disabled_rules.insert(rule_id);
        self
    }

    pub fn max_scalar_rewrite_iterations(&self) -> usize {
        self.max_scalar_rewrite_iterations
    }

    pub fn disabled_rules(&self) -> EnumSet<RuleId> {
        self.disabled_rules
    }

    pub fn is_rule_enabled(&self, rule_id: RuleId) -> bool {
        !self.disabled_rules.contains(rule_id)
    }
}

/// Context for optimizing one query, passed to every rule application.
#[derive(Clone, Debug, Default)]
pub struct OptimizerContext {
    config: OptimizerConfig,
}

impl OptimizerContext {
    pub fn new(config: OptimizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Scalar rewriter running all normalization steps, bounded by the configured iterations.
    pub fn scalar_rewriter(&self) -> ScalarOperatorRewriter {
        ScalarOperatorRewriter::new(self.config.max_scalar_rewrite_iterations)
    }
}
