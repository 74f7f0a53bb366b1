//! Four-step wizard driving a [`ProjectDraft`] from empty to submitted.
//!
//! The wizard owns the draft being edited and the active [`WizardStep`].
//! Moving forward checks the gate of the active step only; moving back is
//! always allowed. Saving and submitting are delegated to a
//! [`PersistenceGateway`], and the local draft is replaced by the canonical
//! copy only when the gateway call succeeds.
//!
//! ```text
//!  ┌──────────┐ next ┌──────────┐ next ┌──────────┐ next ┌──────────┐
//!  │ 1 General│─────▶│  2 WBS   │─────▶│  3 Team  │─────▶│ 4 Budget │──▶ submit
//!  └──────────┘◀─────└──────────┘◀─────└──────────┘◀─────└──────────┘
//!                prev              prev              prev
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use charter_core::{GatewayBuilder, Role, Wizard, BudgetCategory};
//!
//! # async fn example() -> charter_core::Result<()> {
//! let gateway = GatewayBuilder::new()
//!     .with_database_path(Some("charter.db"))
//!     .build()
//!     .await?;
//! let mut wizard = Wizard::new(gateway);
//!
//! wizard.edit_general(|general| {
//!     general.name = "Apollo".to_string();
//!     general.currency = Some("EUR".to_string());
//! })?;
//! wizard.next()?;
//! let phase = wizard.add_root("Phase 1")?;
//! wizard.set_estimate_hours(phase, 16.0)?;
//! wizard.next()?;
//! wizard.add_member(7, Role::ProjectManager)?;
//! wizard.next()?;
//! wizard.add_budget_line(BudgetCategory::Labor, "Build", 1000.0)?;
//! wizard.save().await?;
//! wizard.submit().await?;
//! # Ok(())
//! # }
//! ```

use log::{debug, info, warn};

use crate::{
    error::{DraftError, Result},
    gateway::PersistenceGateway,
    models::{
        BudgetCategory, BudgetItem, BudgetLinePatch, DraftSummary, Employee, GeneralInfo,
        ProjectDraft, Role, TeamMember, WbsNode,
    },
};

pub mod gate;


pub use gate::{GateRule, WizardStep};

/// Which gates `submit` re-checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitPolicy {
    /// Only the gate of the active step, trusting earlier navigation
    #[default]
    ActiveStep,
    /// Every step's gate, in step order
    AllSteps,
}

/// Wizard session over a single draft.
pub struct Wizard<G> {
    gateway: G,
    draft: ProjectDraft,
    step: WizardStep,
    policy: SubmitPolicy,
}

impl<G> Wizard<G> {
    /// Opens a wizard on a fresh, empty draft at the first step.
    pub fn new(gateway: G) -> Self {
        Self::resume(gateway, ProjectDraft::new(), WizardStep::FIRST)
    }

    /// Reopens a wizard on an existing draft at the given step.
    pub fn resume(gateway: G, draft: ProjectDraft, step: WizardStep) -> Self {
        Self {
            gateway,
            draft,
            step,
            policy: SubmitPolicy::default(),
        }
    }

    /// Selects which gates `submit` evaluates.
    pub fn with_submit_policy(mut self, policy: SubmitPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn draft(&self) -> &ProjectDraft {
        &self.draft
    }

    pub fn into_draft(self) -> ProjectDraft {
        self.draft
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn submit_policy(&self) -> SubmitPolicy {
        self.policy
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn summary(&self) -> DraftSummary {
        self.draft.summary()
    }

    /// Evaluates the active step's gate without moving.
    pub fn check_step(&self) -> Result<()> {
        Self::check(&self.draft, self.step)
    }

    fn check(draft: &ProjectDraft, step: WizardStep) -> Result<()> {
        match step.check(draft) {
            Some(rule) => {
                warn!("Gate for step {step} failed: {rule}");
                Err(DraftError::ValidationFailed { step, rule })
            }
            None => Ok(()),
        }
    }

    fn check_submission(&self) -> Result<()> {
        match self.policy {
            SubmitPolicy::ActiveStep => self.check_step(),
            SubmitPolicy::AllSteps => WizardStep::ALL
                .iter()
                .try_for_each(|step| Self::check(&self.draft, *step)),
        }
    }

    /// Advances one step if the active step's gate passes.
    ///
    /// On the last step a passing gate leaves the wizard where it is.
    pub fn next(&mut self) -> Result<WizardStep> {
        self.check_step()?;
        if let Some(next) = self.step.next() {
            debug!("Wizard advanced from {} to {next}", self.step);
            self.step = next;
        }
        Ok(self.step)
    }

    /// Steps back one step without checking any gate.
    pub fn prev(&mut self) -> WizardStep {
        if let Some(prev) = self.step.prev() {
            debug!("Wizard moved back from {} to {prev}", self.step);
            self.step = prev;
        }
        self.step
    }

    /// Jumps to `target`. Backward jumps are free; forward jumps pass through
    /// every intermediate gate and stop at the first one that fails.
    pub fn go_to(&mut self, target: WizardStep) -> Result<WizardStep> {
        while self.step > target {
            self.prev();
        }
        while self.step < target {
            self.next()?;
        }
        Ok(self.step)
    }

    fn ensure_editable(&self) -> Result<()> {
        if self.draft.is_submitted() {
            return Err(DraftError::invalid_argument("status")
                .with_reason("submitted drafts are read-only"));
        }
        Ok(())
    }

    /// Edits the general information block in place.
    pub fn edit_general<F>(&mut self, edit: F) -> Result<()>
    where
        F: FnOnce(&mut GeneralInfo),
    {
        self.ensure_editable()?;
        edit(&mut self.draft.general);
        Ok(())
    }

    pub fn add_root(&mut self, name: impl Into<String>) -> Result<u64> {
        self.ensure_editable()?;
        let id = self.draft.wbs.add_root(name);
        debug!("Added WBS root {id}");
        Ok(id)
    }

    pub fn add_child(&mut self, parent_id: u64, name: impl Into<String>) -> Result<u64> {
        self.ensure_editable()?;
        let id = self.draft.wbs.add_child(parent_id, name)?;
        debug!("Added WBS node {id} under {parent_id}");
        Ok(id)
    }

    pub fn rename_node(&mut self, id: u64, name: impl Into<String>) -> Result<()> {
        self.ensure_editable()?;
        self.draft.wbs.rename(id, name)
    }

    pub fn set_node_code(&mut self, id: u64, code: Option<String>) -> Result<()> {
        self.ensure_editable()?;
        self.draft.wbs.set_code(id, code)
    }

    pub fn set_estimate_hours(&mut self, id: u64, hours: f64) -> Result<()> {
        self.ensure_editable()?;
        self.draft.wbs.set_estimate_hours(id, hours)
    }

    /// Removes a node with its subtree; unknown ids are a no-op.
    pub fn remove_node(&mut self, id: u64) -> Result<Option<WbsNode>> {
        self.ensure_editable()?;
        let removed = self.draft.wbs.remove(id);
        if let Some(node) = &removed {
            debug!("Removed WBS node {id} ({} nodes)", node.subtree_len());
        }
        Ok(removed)
    }

    pub fn add_member(&mut self, employee_id: u64, role: Role) -> Result<()> {
        self.ensure_editable()?;
        self.draft.team.add(employee_id, role);
        Ok(())
    }

    pub fn add_employee(&mut self, employee: &Employee, role: Role) -> Result<()> {
        self.ensure_editable()?;
        self.draft.team.add_employee(employee, role);
        Ok(())
    }

    /// Appends a prepared membership without touching existing entries.
    pub fn add_team_member(&mut self, member: TeamMember) -> Result<()> {
        self.ensure_editable()?;
        self.draft.team.add_member(member)
    }

    pub fn remove_member(&mut self, employee_id: u64) -> Result<usize> {
        self.ensure_editable()?;
        self.draft.team.remove(employee_id)
    }

    pub fn set_member_role(&mut self, employee_id: u64, role: Role) -> Result<()> {
        self.ensure_editable()?;
        self.draft.team.set_role(employee_id, role)
    }

    pub fn set_member_allocation(&mut self, employee_id: u64, pct: u32) -> Result<()> {
        self.ensure_editable()?;
        self.draft.team.set_allocation(employee_id, pct)
    }

    pub fn add_budget_line(
        &mut self,
        category: BudgetCategory,
        description: impl Into<String>,
        amount: f64,
    ) -> Result<u64> {
        self.ensure_editable()?;
        self.draft.budget.add_line(category, description, amount)
    }

    pub fn update_budget_line(&mut self, index: usize, patch: BudgetLinePatch) -> Result<()> {
        self.ensure_editable()?;
        self.draft.budget.update_line(index, patch)
    }

    pub fn remove_budget_line(&mut self, index: usize) -> Result<BudgetItem> {
        self.ensure_editable()?;
        self.draft.budget.remove_line(index)
    }
}

impl<G: PersistenceGateway> Wizard<G> {
    /// Persists the draft without checking any gate.
    ///
    /// On success the local draft becomes the canonical copy (id and
    /// timestamps assigned by the gateway). On failure the local draft is
    /// left exactly as it was so the caller can retry.
    pub async fn save(&mut self) -> Result<&ProjectDraft> {
        let canonical = self.gateway.save(&self.draft).await?;
        info!(
            "Saved draft {} at step {}",
            canonical.id.map_or_else(|| "?".to_string(), |id| id.to_string()),
            self.step
        );
        self.draft = canonical;
        Ok(&self.draft)
    }

    /// Submits the draft after evaluating the submit policy.
    ///
    /// `&mut self` guarantees at most one submit in flight per wizard. A draft
    /// that is already submitted is returned as is, without another gateway
    /// call.
    pub async fn submit(&mut self) -> Result<&ProjectDraft> {
        if self.draft.is_submitted() {
            debug!("Draft {:?} already submitted", self.draft.id);
            return Ok(&self.draft);
        }
        self.check_submission()?;

        let canonical = self.gateway.submit(&self.draft).await?;
        if !canonical.is_submitted() {
            warn!("Gateway returned draft {:?} without submitted status", canonical.id);
        }
        info!("Submitted draft {:?}", canonical.id);
        self.draft = canonical;
        Ok(&self.draft)
    }
}
