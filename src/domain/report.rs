//! Convergence reporting: what each step found and what was done about it.

/// Result of a step's desired-state check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
    /// Host already matches the desired state; nothing to do.
    Satisfied,
    /// Host diverges; the reason describes what is missing or stale.
    Needed(String),
}

/// What the convergence run did for one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Check was satisfied; step skipped.
    Skipped,
    /// Check reported divergence and the change was applied.
    Applied,
    /// Dry run: the change would have been applied.
    WouldApply,
}

#[derive(Debug, Clone)]
pub struct StepReport {
    pub name: &'static str,
    pub outcome: StepOutcome,
    pub detail: Option<String>,
}

/// Accumulated per-step results for one convergence pass.
#[derive(Debug, Default)]
pub struct ConvergenceReport {
    steps: Vec<StepReport>,
}

impl ConvergenceReport {
    pub fn record(&mut self, name: &'static str, outcome: StepOutcome, detail: Option<String>) {
        self.steps.push(StepReport { name, outcome, detail });
    }

    pub fn steps(&self) -> &[StepReport] {
        &self.steps
    }

    pub fn applied(&self) -> usize {
        self.count(StepOutcome::Applied)
    }

    pub fn skipped(&self) -> usize {
        self.count(StepOutcome::Skipped)
    }

    pub fn pending(&self) -> usize {
        self.count(StepOutcome::WouldApply)
    }

    /// True when the host already matched the desired state everywhere.
    pub fn converged(&self) -> bool {
        self.applied() == 0 && self.pending() == 0
    }

    fn count(&self, outcome: StepOutcome) -> usize {
        self.steps.iter().filter(|s| s.outcome == outcome).count()
    }
}
