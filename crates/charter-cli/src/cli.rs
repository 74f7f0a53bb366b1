//! Subcommand arguments and their handlers.
//!
//! Argument structs carry clap derives only; they convert into core types
//! with `From` so charter-core stays free of CLI concerns:
//!
//! ```text
//! User Input → CLI Args (clap) → core types → Wizard / SqliteGateway
//! ```
//!
//! Every editing command follows the same cycle: load the session, resume a
//! [`Wizard`] at the stored step, apply one change, save, store the step.

use anyhow::{bail, Context, Result};
use charter_core::{
    display::{
        Clients, CreateResult, Currencies, DeleteResult, DraftOverviews, Employees,
        OperationStatus, UpdateResult,
    },
    BudgetCategory, BudgetLinePatch, ClientDirectory, ClientFilter, CurrencyDirectory,
    DraftFilter, DraftStatus, Employee, EmployeeDirectory, EmployeeFilter, ExportDocument,
    ExportPart, Lookup, PersistenceGateway, ProjectDraft, ProjectType, ReferenceData, Role,
    SqliteGateway, SubmitPolicy, TeamMember, Wizard, WizardStep,
};
use clap::{Args, Subcommand, ValueEnum};
use jiff::civil::Date;
use log::{debug, info};

use crate::renderer::TerminalRenderer;

// ============================================================================
// Value enums
// ============================================================================

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum RoleArg {
    ProjectManager,
    Engineer,
    Qa,
    Designer,
    BusinessAnalyst,
    FinanceController,
    Procurement,
}

impl From<RoleArg> for Role {
    fn from(val: RoleArg) -> Self {
        match val {
            RoleArg::ProjectManager => Role::ProjectManager,
            RoleArg::Engineer => Role::Engineer,
            RoleArg::Qa => Role::Qa,
            RoleArg::Designer => Role::Designer,
            RoleArg::BusinessAnalyst => Role::BusinessAnalyst,
            RoleArg::FinanceController => Role::FinanceController,
            RoleArg::Procurement => Role::Procurement,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum CategoryArg {
    Labor,
    Expense,
    Software,
    Hardware,
    Travel,
    Contingency,
}

impl From<CategoryArg> for BudgetCategory {
    fn from(val: CategoryArg) -> Self {
        match val {
            CategoryArg::Labor => BudgetCategory::Labor,
            CategoryArg::Expense => BudgetCategory::Expense,
            CategoryArg::Software => BudgetCategory::Software,
            CategoryArg::Hardware => BudgetCategory::Hardware,
            CategoryArg::Travel => BudgetCategory::Travel,
            CategoryArg::Contingency => BudgetCategory::Contingency,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum ProjectTypeArg {
    External,
    Internal,
    NonBillable,
}

impl From<ProjectTypeArg> for ProjectType {
    fn from(val: ProjectTypeArg) -> Self {
        match val {
            ProjectTypeArg::External => ProjectType::External,
            ProjectTypeArg::Internal => ProjectType::Internal,
            ProjectTypeArg::NonBillable => ProjectType::NonBillable,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    Draft,
    Submitted,
}

impl From<StatusArg> for DraftStatus {
    fn from(val: StatusArg) -> Self {
        match val {
            StatusArg::Draft => DraftStatus::Draft,
            StatusArg::Submitted => DraftStatus::Submitted,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum PartArg {
    All,
    General,
    Wbs,
    Team,
    Budget,
}

impl From<PartArg> for ExportPart {
    fn from(val: PartArg) -> Self {
        match val {
            PartArg::All => ExportPart::All,
            PartArg::General => ExportPart::General,
            PartArg::Wbs => ExportPart::Wbs,
            PartArg::Team => ExportPart::Team,
            PartArg::Budget => ExportPart::Budget,
        }
    }
}

// ============================================================================
// Draft commands
// ============================================================================

/// Start a new draft
#[derive(Args)]
pub struct NewDraftArgs {
    /// Project name
    #[arg(short, long)]
    pub name: Option<String>,
    /// ISO currency code, e.g. EUR
    #[arg(short, long)]
    pub currency: Option<String>,
}

/// List persisted drafts
#[derive(Args)]
pub struct ListDraftsArgs {
    /// Only drafts with this status
    #[arg(short, long)]
    pub status: Option<StatusArg>,
    /// Only drafts whose name contains this text
    #[arg(short, long)]
    pub name: Option<String>,
}

impl From<ListDraftsArgs> for DraftFilter {
    fn from(val: ListDraftsArgs) -> Self {
        DraftFilter {
            name_contains: val.name,
            status: val.status.map(Into::into),
        }
    }
}

/// Identifies a persisted draft
#[derive(Args)]
pub struct DraftIdArgs {
    #[arg(help = "Identifier of the draft")]
    pub id: u64,
}

/// Export a draft as JSON
#[derive(Args)]
pub struct ExportArgs {
    #[arg(help = "Identifier of the draft")]
    pub id: u64,
    /// Part of the draft to export
    #[arg(short, long, value_enum, default_value = "all")]
    pub part: PartArg,
}

#[derive(Subcommand)]
pub enum DraftCommands {
    /// Start a new draft
    #[command(alias = "n")]
    New(NewDraftArgs),
    /// List persisted drafts
    #[command(aliases = ["l", "ls"])]
    List(ListDraftsArgs),
    /// Show a draft with all its parts
    #[command(alias = "s")]
    Show(DraftIdArgs),
    /// Show derived totals and timeline
    Summary(DraftIdArgs),
    /// Export a draft or one of its parts as JSON
    #[command(alias = "x")]
    Export(ExportArgs),
}

// ============================================================================
// General information
// ============================================================================

/// Set general information fields; omitted fields are left unchanged
#[derive(Args)]
pub struct SetGeneralArgs {
    #[arg(help = "Identifier of the draft")]
    pub id: u64,
    #[arg(short, long)]
    pub name: Option<String>,
    /// Short project code
    #[arg(long)]
    pub code: Option<String>,
    /// Client identifier from `charter clients`
    #[arg(long)]
    pub client_id: Option<u64>,
    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<Date>,
    /// End date (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<Date>,
    #[arg(short, long)]
    pub description: Option<String>,
    #[arg(long, value_enum)]
    pub project_type: Option<ProjectTypeArg>,
    /// ISO currency code from `charter currencies`
    #[arg(short, long)]
    pub currency: Option<String>,
}

#[derive(Subcommand)]
pub enum GeneralCommands {
    /// Set general information fields
    Set(SetGeneralArgs),
}

// ============================================================================
// Work breakdown structure
// ============================================================================

/// Add a phase or task
#[derive(Args)]
pub struct AddNodeArgs {
    #[arg(help = "Identifier of the draft")]
    pub id: u64,
    pub name: String,
    /// Parent node; omit to add a root phase
    #[arg(short, long)]
    pub parent: Option<u64>,
    /// Estimated hours
    #[arg(long)]
    pub hours: Option<f64>,
    /// WBS code such as 1.2
    #[arg(long)]
    pub code: Option<String>,
}

#[derive(Args)]
pub struct RenameNodeArgs {
    #[arg(help = "Identifier of the draft")]
    pub id: u64,
    pub node: u64,
    pub name: String,
}

#[derive(Args)]
pub struct EstimateNodeArgs {
    #[arg(help = "Identifier of the draft")]
    pub id: u64,
    pub node: u64,
    pub hours: f64,
}

#[derive(Args)]
pub struct CodeNodeArgs {
    #[arg(help = "Identifier of the draft")]
    pub id: u64,
    pub node: u64,
    /// New code; omit to clear it
    pub code: Option<String>,
}

#[derive(Args)]
pub struct RemoveNodeArgs {
    #[arg(help = "Identifier of the draft")]
    pub id: u64,
    pub node: u64,
}

#[derive(Subcommand)]
pub enum WbsCommands {
    /// Add a phase or task
    #[command(alias = "a")]
    Add(AddNodeArgs),
    /// Rename a node
    Rename(RenameNodeArgs),
    /// Set a node's estimated hours
    #[command(alias = "e")]
    Estimate(EstimateNodeArgs),
    /// Set or clear a node's WBS code
    Code(CodeNodeArgs),
    /// Remove a node and everything below it
    #[command(alias = "rm")]
    Remove(RemoveNodeArgs),
}

// ============================================================================
// Team roster
// ============================================================================

#[derive(Args)]
pub struct AddMemberArgs {
    #[arg(help = "Identifier of the draft")]
    pub id: u64,
    pub employee_id: u64,
    #[arg(short, long, value_enum, default_value = "engineer")]
    pub role: RoleArg,
    /// Allocation in percent (0-200)
    #[arg(short, long)]
    pub allocation: Option<u32>,
}

#[derive(Args)]
pub struct MemberArgs {
    #[arg(help = "Identifier of the draft")]
    pub id: u64,
    pub employee_id: u64,
}

#[derive(Args)]
pub struct MemberRoleArgs {
    #[arg(help = "Identifier of the draft")]
    pub id: u64,
    pub employee_id: u64,
    #[arg(value_enum)]
    pub role: RoleArg,
}

#[derive(Args)]
pub struct MemberAllocationArgs {
    #[arg(help = "Identifier of the draft")]
    pub id: u64,
    pub employee_id: u64,
    /// Allocation in percent (0-200)
    pub percent: u32,
}

/// Search the employee directory
#[derive(Args)]
pub struct SearchEmployeesArgs {
    /// Name or email fragment
    #[arg(default_value = "")]
    pub query: String,
    /// Include inactive employees
    #[arg(long)]
    pub all: bool,
}

#[derive(Subcommand)]
pub enum TeamCommands {
    /// Add an employee to the roster
    #[command(alias = "a")]
    Add(AddMemberArgs),
    /// Remove every roster entry of an employee
    #[command(alias = "rm")]
    Remove(MemberArgs),
    /// Change an employee's role
    Role(MemberRoleArgs),
    /// Change an employee's allocation
    Allocation(MemberAllocationArgs),
    /// Search the employee directory
    #[command(alias = "s")]
    Search(SearchEmployeesArgs),
}

// ============================================================================
// Budget ledger
// ============================================================================

#[derive(Args)]
pub struct AddLineArgs {
    #[arg(help = "Identifier of the draft")]
    pub id: u64,
    #[arg(short, long, value_enum, default_value = "labor")]
    pub category: CategoryArg,
    #[arg(short, long, default_value = "")]
    pub description: String,
    #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub amount: f64,
}

/// Patch a budget line; omitted fields are left unchanged
#[derive(Args)]
pub struct UpdateLineArgs {
    #[arg(help = "Identifier of the draft")]
    pub id: u64,
    /// Zero-based position of the line
    pub index: usize,
    #[arg(short, long, value_enum)]
    pub category: Option<CategoryArg>,
    #[arg(short, long)]
    pub description: Option<String>,
    #[arg(short, long, allow_negative_numbers = true)]
    pub amount: Option<f64>,
}

impl From<&UpdateLineArgs> for BudgetLinePatch {
    fn from(val: &UpdateLineArgs) -> Self {
        BudgetLinePatch {
            category: val.category.map(Into::into),
            description: val.description.clone(),
            amount: val.amount,
        }
    }
}

#[derive(Args)]
pub struct RemoveLineArgs {
    #[arg(help = "Identifier of the draft")]
    pub id: u64,
    /// Zero-based position of the line
    pub index: usize,
}

#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Append a budget line
    #[command(alias = "a")]
    Add(AddLineArgs),
    /// Update the line at a position
    #[command(alias = "u")]
    Update(UpdateLineArgs),
    /// Remove the line at a position
    #[command(alias = "rm")]
    Remove(RemoveLineArgs),
}

// ============================================================================
// Wizard navigation
// ============================================================================

#[derive(Subcommand)]
pub enum WizardCommands {
    /// Check the active step's gate and move forward
    #[command(alias = "n")]
    Next(DraftIdArgs),
    /// Move back one step
    #[command(alias = "p")]
    Prev(DraftIdArgs),
    /// Save the draft without checking any gate
    Save(DraftIdArgs),
    /// Submit the draft
    Submit(DraftIdArgs),
}

// ============================================================================
// Reference directories
// ============================================================================

/// List clients, or add one with --add
#[derive(Args)]
pub struct ClientsArgs {
    /// Name or code fragment
    pub search: Option<String>,
    /// Add a client with this name
    #[arg(long, conflicts_with = "search")]
    pub add: Option<String>,
    /// Code for the client being added
    #[arg(long, requires = "add")]
    pub code: Option<String>,
}

#[derive(Args)]
pub struct AddEmployeeArgs {
    pub name: String,
    pub email: String,
    #[arg(short, long)]
    pub title: Option<String>,
}

#[derive(Args)]
pub struct EmployeeIdArgs {
    pub employee_id: u64,
}

#[derive(Subcommand)]
pub enum EmployeeCommands {
    /// Add an employee to the directory
    #[command(alias = "a")]
    Add(AddEmployeeArgs),
    /// Mark an employee inactive
    Deactivate(EmployeeIdArgs),
    /// Mark an employee active again
    Activate(EmployeeIdArgs),
}

// ============================================================================
// Handlers
// ============================================================================

/// Runs commands against the SQLite gateway and renders the results.
pub struct Cli {
    gateway: SqliteGateway,
    renderer: TerminalRenderer,
    policy: SubmitPolicy,
}

impl Cli {
    pub fn new(gateway: SqliteGateway, renderer: TerminalRenderer, policy: SubmitPolicy) -> Self {
        Self {
            gateway,
            renderer,
            policy,
        }
    }

    /// Resumes the wizard on a persisted draft at its stored step.
    async fn open(&self, id: u64) -> Result<Wizard<SqliteGateway>> {
        let (draft, step) = self
            .gateway
            .load_session(id)
            .await
            .with_context(|| format!("Failed to load draft {id}"))?
            .with_context(|| format!("Draft with ID {id} not found"))?;
        debug!("Resumed draft {id} at step {step}");
        Ok(Wizard::resume(self.gateway.clone(), draft, step).with_submit_policy(self.policy))
    }

    /// Saves the draft and records the wizard step.
    async fn persist(&self, wizard: &mut Wizard<SqliteGateway>) -> Result<u64> {
        let id = wizard
            .save()
            .await
            .context("Failed to save draft")?
            .id
            .context("Gateway returned a draft without an ID")?;
        self.store_step(id, wizard.step()).await?;
        Ok(id)
    }

    async fn store_step(&self, id: u64, step: WizardStep) -> Result<()> {
        self.gateway
            .store_step(id, step)
            .await
            .with_context(|| format!("Failed to record wizard step for draft {id}"))
    }

    async fn check_currency(&self, code: &str) -> Result<()> {
        let reference = ReferenceData::new(self.gateway.clone());
        if !reference.is_supported_currency(code).await? {
            bail!("Unsupported currency '{code}'; see `charter currencies`");
        }
        Ok(())
    }

    pub async fn list_drafts(&self, filter: &DraftFilter) -> Result<()> {
        let drafts = self
            .gateway
            .list_drafts(filter)
            .await
            .context("Failed to list drafts")?;
        self.renderer.render(&DraftOverviews(drafts).to_string())
    }

    pub async fn handle_draft_command(&self, command: DraftCommands) -> Result<()> {
        match command {
            DraftCommands::New(args) => {
                if let Some(code) = &args.currency {
                    self.check_currency(code).await?;
                }
                let mut wizard = Wizard::new(self.gateway.clone());
                wizard.edit_general(|general| {
                    general.name = args.name.unwrap_or_default();
                    general.currency = args.currency.map(|c| c.trim().to_uppercase());
                })?;
                self.persist(&mut wizard).await?;
                info!("Created draft {:?}", wizard.draft().id);
                self.renderer
                    .render(&CreateResult::new(wizard.into_draft()).to_string())
            }
            DraftCommands::List(args) => self.list_drafts(&args.into()).await,
            DraftCommands::Show(args) => {
                let wizard = self.open(args.id).await?;
                let output = format!("{}\nWizard step: {}\n", wizard.draft(), wizard.step());
                self.renderer.render(&output)
            }
            DraftCommands::Summary(args) => {
                let wizard = self.open(args.id).await?;
                self.renderer.render(&wizard.summary().to_string())
            }
            DraftCommands::Export(args) => {
                let wizard = self.open(args.id).await?;
                let document = ExportDocument::new(wizard.draft(), args.part.into());
                println!("{}", document.to_json()?);
                Ok(())
            }
        }
    }

    pub async fn handle_general_command(&self, command: GeneralCommands) -> Result<()> {
        let GeneralCommands::Set(args) = command;
        if let Some(code) = &args.currency {
            self.check_currency(code).await?;
        }

        let mut wizard = self.open(args.id).await?;
        let mut changes = Vec::new();
        wizard.edit_general(|general| {
            if let Some(name) = args.name {
                changes.push(format!("Set name to '{name}'"));
                general.name = name;
            }
            if let Some(code) = args.code {
                changes.push(format!("Set code to '{code}'"));
                general.code = Some(code).filter(|c| !c.trim().is_empty());
            }
            if let Some(client_id) = args.client_id {
                changes.push(format!("Set client to #{client_id}"));
                general.client_id = Some(client_id);
            }
            if let Some(start) = args.start {
                changes.push(format!("Set start date to {start}"));
                general.start_date = Some(start);
            }
            if let Some(end) = args.end {
                changes.push(format!("Set end date to {end}"));
                general.end_date = Some(end);
            }
            if let Some(description) = args.description {
                changes.push("Updated description".to_string());
                general.description = description;
            }
            if let Some(project_type) = args.project_type {
                let project_type = ProjectType::from(project_type);
                changes.push(format!("Set project type to {project_type}"));
                general.project_type = project_type;
            }
            if let Some(currency) = args.currency {
                let currency = currency.trim().to_uppercase();
                changes.push(format!("Set currency to {currency}"));
                general.currency = Some(currency);
            }
        })?;

        self.persist(&mut wizard).await?;
        self.renderer
            .render(&UpdateResult::with_changes(wizard.into_draft(), changes).to_string())
    }

    pub async fn handle_wbs_command(&self, command: WbsCommands) -> Result<()> {
        match command {
            WbsCommands::Add(args) => {
                let mut wizard = self.open(args.id).await?;
                let node_id = match args.parent {
                    Some(parent) => wizard.add_child(parent, args.name)?,
                    None => wizard.add_root(args.name)?,
                };
                if let Some(hours) = args.hours {
                    wizard.set_estimate_hours(node_id, hours)?;
                }
                if args.code.is_some() {
                    wizard.set_node_code(node_id, args.code)?;
                }
                self.persist(&mut wizard).await?;

                let node = wizard
                    .draft()
                    .wbs
                    .find(node_id)
                    .cloned()
                    .context("Saved draft lost the new node")?;
                self.renderer.render(&CreateResult::new(node).to_string())
            }
            WbsCommands::Rename(args) => {
                let mut wizard = self.open(args.id).await?;
                wizard.rename_node(args.node, args.name.clone())?;
                self.save_with_change(wizard, format!("Renamed node #{} to '{}'", args.node, args.name))
                    .await
            }
            WbsCommands::Estimate(args) => {
                let mut wizard = self.open(args.id).await?;
                wizard.set_estimate_hours(args.node, args.hours)?;
                self.save_with_change(wizard, format!("Estimated node #{} at {}h", args.node, args.hours))
                    .await
            }
            WbsCommands::Code(args) => {
                let mut wizard = self.open(args.id).await?;
                let change = match &args.code {
                    Some(code) => format!("Set code of node #{} to '{code}'", args.node),
                    None => format!("Cleared code of node #{}", args.node),
                };
                wizard.set_node_code(args.node, args.code)?;
                self.save_with_change(wizard, change).await
            }
            WbsCommands::Remove(args) => {
                let mut wizard = self.open(args.id).await?;
                match wizard.remove_node(args.node)? {
                    Some(node) => {
                        self.persist(&mut wizard).await?;
                        self.renderer.render(&DeleteResult::new(node).to_string())
                    }
                    None => self.renderer.render(
                        &OperationStatus::success(format!(
                            "Node #{} not found; nothing removed",
                            args.node
                        ))
                        .to_string(),
                    ),
                }
            }
        }
    }

    pub async fn handle_team_command(&self, command: TeamCommands) -> Result<()> {
        match command {
            TeamCommands::Add(args) => {
                let mut wizard = self.open(args.id).await?;
                let role = Role::from(args.role);
                let mut member = match self.find_employee(args.employee_id).await? {
                    Some(employee) => TeamMember::for_employee(&employee, role),
                    None => {
                        debug!("Employee {} not in directory", args.employee_id);
                        TeamMember::new(args.employee_id, role)
                    }
                };
                if let Some(percent) = args.allocation {
                    member = member.with_allocation(percent);
                }
                wizard.add_team_member(member)?;
                self.persist(&mut wizard).await?;

                let member = wizard
                    .draft()
                    .team
                    .members()
                    .last()
                    .cloned()
                    .context("Saved draft lost the new member")?;
                self.renderer.render(&CreateResult::new(member).to_string())
            }
            TeamCommands::Remove(args) => {
                let mut wizard = self.open(args.id).await?;
                let removed = wizard.remove_member(args.employee_id)?;
                self.persist(&mut wizard).await?;
                self.renderer
                    .render(&DeleteResult::new((args.employee_id, removed)).to_string())
            }
            TeamCommands::Role(args) => {
                let mut wizard = self.open(args.id).await?;
                let role = Role::from(args.role);
                wizard.set_member_role(args.employee_id, role)?;
                self.save_with_change(wizard, format!("Employee #{} is now {role}", args.employee_id))
                    .await
            }
            TeamCommands::Allocation(args) => {
                let mut wizard = self.open(args.id).await?;
                wizard.set_member_allocation(args.employee_id, args.percent)?;
                self.save_with_change(
                    wizard,
                    format!("Employee #{} allocated at {}%", args.employee_id, args.percent),
                )
                .await
            }
            TeamCommands::Search(args) => {
                let reference = ReferenceData::new(self.gateway.clone());
                match reference.search_employees(&args.query, !args.all).await? {
                    Lookup::Fresh(employees) => {
                        self.renderer.render(&Employees(employees).to_string())
                    }
                    Lookup::Superseded => Ok(()),
                }
            }
        }
    }

    async fn find_employee(&self, employee_id: u64) -> Result<Option<Employee>> {
        let employees = self
            .gateway
            .search_employees(&EmployeeFilter::default())
            .await
            .context("Failed to query employee directory")?;
        Ok(employees.into_iter().find(|e| e.id == employee_id))
    }

    pub async fn handle_budget_command(&self, command: BudgetCommands) -> Result<()> {
        match command {
            BudgetCommands::Add(args) => {
                let mut wizard = self.open(args.id).await?;
                let line_id =
                    wizard.add_budget_line(args.category.into(), args.description, args.amount)?;
                self.persist(&mut wizard).await?;

                let budget = &wizard.draft().budget;
                let index = budget
                    .position_of(line_id)
                    .context("Saved draft lost the new budget line")?;
                let line = budget
                    .get(index)
                    .cloned()
                    .context("Saved draft lost the new budget line")?;
                self.renderer
                    .render(&CreateResult::new((index, line)).to_string())
            }
            BudgetCommands::Update(args) => {
                let mut wizard = self.open(args.id).await?;
                wizard.update_budget_line(args.index, BudgetLinePatch::from(&args))?;
                self.save_with_change(wizard, format!("Updated budget line [{}]", args.index))
                    .await
            }
            BudgetCommands::Remove(args) => {
                let mut wizard = self.open(args.id).await?;
                let line = wizard.remove_budget_line(args.index)?;
                self.persist(&mut wizard).await?;
                self.renderer.render(&DeleteResult::new(line).to_string())
            }
        }
    }

    pub async fn handle_wizard_command(&self, command: WizardCommands) -> Result<()> {
        match command {
            WizardCommands::Next(args) => {
                let mut wizard = self.open(args.id).await?;
                let from = wizard.step();
                let to = wizard.next()?;
                self.store_step(args.id, to).await?;
                let message = if from == to {
                    format!("Step {to} complete; ready to submit")
                } else {
                    format!("Moved to step {to}")
                };
                self.renderer
                    .render(&OperationStatus::success(message).to_string())
            }
            WizardCommands::Prev(args) => {
                let mut wizard = self.open(args.id).await?;
                let to = wizard.prev();
                self.store_step(args.id, to).await?;
                self.renderer
                    .render(&OperationStatus::success(format!("Moved to step {to}")).to_string())
            }
            WizardCommands::Save(args) => {
                let mut wizard = self.open(args.id).await?;
                let id = self.persist(&mut wizard).await?;
                self.renderer.render(
                    &OperationStatus::success(format!(
                        "Saved draft {id} at step {}",
                        wizard.step()
                    ))
                    .to_string(),
                )
            }
            WizardCommands::Submit(args) => {
                let mut wizard = self.open(args.id).await?;
                wizard.submit().await?;
                self.store_step(args.id, wizard.step()).await?;
                info!("Submitted draft {}", args.id);
                self.renderer.render(&format!(
                    "{}\n{}",
                    OperationStatus::success(format!("Submitted draft {}", args.id)),
                    wizard.draft()
                ))
            }
        }
    }

    async fn save_with_change(
        &self,
        mut wizard: Wizard<SqliteGateway>,
        change: String,
    ) -> Result<()> {
        self.persist(&mut wizard).await?;
        let draft: ProjectDraft = wizard.into_draft();
        self.renderer
            .render(&UpdateResult::with_changes(draft, vec![change]).to_string())
    }

    pub async fn handle_clients(&self, args: ClientsArgs) -> Result<()> {
        if let Some(name) = args.add {
            let client = self
                .gateway
                .add_client(&name, args.code.as_deref())
                .await
                .context("Failed to add client")?;
            return self
                .renderer
                .render(&OperationStatus::success(format!("Added client {client}")).to_string());
        }

        let filter = ClientFilter {
            search: args.search.filter(|s| !s.trim().is_empty()),
        };
        let clients = self
            .gateway
            .list_clients(&filter)
            .await
            .context("Failed to list clients")?;
        self.renderer.render(&Clients(clients).to_string())
    }

    pub async fn list_currencies(&self) -> Result<()> {
        let currencies = self
            .gateway
            .list_currencies()
            .await
            .context("Failed to list currencies")?;
        self.renderer.render(&Currencies(currencies).to_string())
    }

    pub async fn handle_employee_command(&self, command: EmployeeCommands) -> Result<()> {
        match command {
            EmployeeCommands::Add(args) => {
                let employee = self
                    .gateway
                    .add_employee(&args.name, &args.email, args.title.as_deref())
                    .await
                    .context("Failed to add employee")?;
                self.renderer.render(
                    &OperationStatus::success(format!("Added employee {employee}")).to_string(),
                )
            }
            EmployeeCommands::Deactivate(args) => self.set_active(args.employee_id, false).await,
            EmployeeCommands::Activate(args) => self.set_active(args.employee_id, true).await,
        }
    }

    async fn set_active(&self, employee_id: u64, active: bool) -> Result<()> {
        self.gateway
            .set_employee_active(employee_id, active)
            .await
            .with_context(|| format!("Failed to update employee {employee_id}"))?;
        let state = if active { "active" } else { "inactive" };
        self.renderer.render(
            &OperationStatus::success(format!("Employee #{employee_id} is now {state}"))
                .to_string(),
        )
    }
}
