//! Draft upsert, submission and queries.

use jiff::Timestamp;
use log::warn;
use rusqlite::{params, Connection, OptionalExtension, Transaction, TransactionBehavior};

use super::utils::{
    contains_pattern, id_at, optional_id_at, optional_timestamp_at, timestamp_at,
    timestamp_value,
};
use crate::{
    error::{DatabaseResultExt, DraftError, Result},
    models::{DraftFilter, DraftOverview, DraftStatus, ProjectDraft, WbsRow, WbsTree},
    wizard::WizardStep,
};

const INSERT_DRAFT_SQL: &str = "INSERT INTO drafts (status, name, currency, general, wbs_next_id, team, budget, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)";
const INSERT_DRAFT_WITH_ID_SQL: &str = "INSERT INTO drafts (id, status, name, currency, general, wbs_next_id, team, budget, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)";
const UPDATE_DRAFT_SQL: &str = "UPDATE drafts SET name = ?1, currency = ?2, general = ?3, wbs_next_id = ?4, team = ?5, budget = ?6, updated_at = ?7 WHERE id = ?8 AND status = 'draft'";
const CHECK_DRAFT_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM drafts WHERE id = ?1)";
const MARK_SUBMITTED_SQL: &str = "UPDATE drafts SET status = 'submitted', submitted_at = ?1, updated_at = ?1 WHERE id = ?2 AND status = 'draft'";
const DRAFT_COLUMNS: &str = "id, status, general, wbs_next_id, team, budget, created_at, updated_at, submitted_at, wizard_step";
const UPDATE_WIZARD_STEP_SQL: &str = "UPDATE drafts SET wizard_step = ?1 WHERE id = ?2";
const DELETE_WBS_NODES_SQL: &str = "DELETE FROM wbs_nodes WHERE draft_id = ?1";
const INSERT_WBS_NODE_SQL: &str = "INSERT INTO wbs_nodes (draft_id, id, parent_id, position, code, name, estimate_hours) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";
const SELECT_WBS_NODES_SQL: &str = "SELECT id, parent_id, code, name, estimate_hours FROM wbs_nodes WHERE draft_id = ?1 ORDER BY position";

/// Raw draft row before decoding.
struct DraftRow {
    id: u64,
    status: String,
    general: String,
    wbs_next_id: u64,
    team: String,
    budget: String,
    created_at: Timestamp,
    updated_at: Timestamp,
    submitted_at: Option<Timestamp>,
    wizard_step: i64,
}

impl DraftRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: id_at(row, 0)?,
            status: row.get(1)?,
            general: row.get(2)?,
            wbs_next_id: id_at(row, 3)?,
            team: row.get(4)?,
            budget: row.get(5)?,
            created_at: timestamp_at(row, 6)?,
            updated_at: timestamp_at(row, 7)?,
            submitted_at: optional_timestamp_at(row, 8)?,
            wizard_step: row.get(9)?,
        })
    }

    fn into_session(self, wbs_rows: Vec<WbsRow>) -> Result<(ProjectDraft, WizardStep)> {
        let status = self.status.parse::<DraftStatus>().map_err(|reason| {
            DraftError::invalid_argument("status").with_reason(reason)
        })?;
        let step = u8::try_from(self.wizard_step)
            .ok()
            .and_then(WizardStep::from_index)
            .unwrap_or(WizardStep::FIRST);

        let draft = ProjectDraft {
            id: Some(self.id),
            status,
            general: serde_json::from_str(&self.general)?,
            wbs: WbsTree::from_rows(wbs_rows, self.wbs_next_id)?,
            team: serde_json::from_str(&self.team)?,
            budget: serde_json::from_str(&self.budget)?,
            created_at: Some(self.created_at),
            updated_at: Some(self.updated_at),
            submitted_at: self.submitted_at,
        };
        Ok((draft, step))
    }
}

fn wbs_row_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<WbsRow> {
    Ok(WbsRow {
        id: id_at(row, 0)?,
        parent_id: optional_id_at(row, 1)?,
        depth: 0,
        code: row.get(2)?,
        name: row.get(3)?,
        estimate_hours: row.get(4)?,
    })
}

/// JSON-encoded draft parts ready for binding.
struct EncodedDraft {
    name: String,
    currency: Option<String>,
    general: String,
    wbs_next_id: i64,
    team: String,
    budget: String,
}

impl EncodedDraft {
    fn encode(draft: &ProjectDraft) -> Result<Self> {
        Ok(Self {
            name: draft.general.name.trim().to_string(),
            currency: draft.general.currency.clone(),
            general: serde_json::to_string(&draft.general)?,
            wbs_next_id: draft.wbs.next_id() as i64,
            team: serde_json::to_string(&draft.team)?,
            budget: serde_json::to_string(&draft.budget)?,
        })
    }
}

fn draft_exists(tx: &Transaction<'_>, id: u64) -> Result<bool> {
    tx.query_row(CHECK_DRAFT_EXISTS_SQL, params![id as i64], |row| row.get(0))
        .db_context("Failed to check draft existence")
}

/// Replaces the stored WBS nodes of a draft.
fn replace_wbs_nodes(tx: &Transaction<'_>, draft_id: u64, tree: &WbsTree) -> Result<()> {
    tx.execute(DELETE_WBS_NODES_SQL, params![draft_id as i64])
        .db_context("Failed to clear WBS nodes")?;

    let mut stmt = tx
        .prepare_cached(INSERT_WBS_NODE_SQL)
        .db_context("Failed to prepare WBS node insert")?;
    for (position, row) in tree.rows().into_iter().enumerate() {
        stmt.execute(params![
            draft_id as i64,
            row.id as i64,
            row.parent_id.map(|id| id as i64),
            position as i64,
            row.code,
            row.name,
            row.estimate_hours
        ])
        .db_context("Failed to insert WBS node")?;
    }
    Ok(())
}

/// Inserts or updates the draft row and its WBS nodes and returns its id.
///
/// Rows already submitted are left untouched.
fn upsert(tx: &Transaction<'_>, draft: &ProjectDraft, now: i64) -> Result<u64> {
    let encoded = EncodedDraft::encode(draft)?;

    let id = match draft.id {
        Some(id) if draft_exists(tx, id)? => {
            let updated = tx
                .execute(
                    UPDATE_DRAFT_SQL,
                    params![
                        encoded.name,
                        encoded.currency,
                        encoded.general,
                        encoded.wbs_next_id,
                        encoded.team,
                        encoded.budget,
                        now,
                        id as i64
                    ],
                )
                .db_context("Failed to update draft")?;
            if updated == 0 {
                return Ok(id);
            }
            id
        }
        Some(id) => {
            tx.execute(
                INSERT_DRAFT_WITH_ID_SQL,
                params![
                    id as i64,
                    DraftStatus::Draft.as_str(),
                    encoded.name,
                    encoded.currency,
                    encoded.general,
                    encoded.wbs_next_id,
                    encoded.team,
                    encoded.budget,
                    now,
                    now
                ],
            )
            .db_context("Failed to insert draft")?;
            id
        }
        None => {
            tx.execute(
                INSERT_DRAFT_SQL,
                params![
                    DraftStatus::Draft.as_str(),
                    encoded.name,
                    encoded.currency,
                    encoded.general,
                    encoded.wbs_next_id,
                    encoded.team,
                    encoded.budget,
                    now,
                    now
                ],
            )
            .db_context("Failed to insert draft")?;
            tx.last_insert_rowid() as u64
        }
    };

    replace_wbs_nodes(tx, id, &draft.wbs)?;
    Ok(id)
}

fn load_wbs_rows(conn: &Connection, draft_id: u64) -> Result<Vec<WbsRow>> {
    let mut stmt = conn
        .prepare_cached(SELECT_WBS_NODES_SQL)
        .db_context("Failed to prepare query")?;
    let rows = stmt
        .query_map(params![draft_id as i64], wbs_row_from_row)
        .db_context("Failed to query WBS nodes")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .db_context("Failed to read WBS node rows")?;
    Ok(rows)
}

fn decode(conn: &Connection, row: DraftRow) -> Result<(ProjectDraft, WizardStep)> {
    let wbs_rows = load_wbs_rows(conn, row.id)?;
    row.into_session(wbs_rows)
}

fn load_session(conn: &Connection, id: u64) -> Result<Option<(ProjectDraft, WizardStep)>> {
    let sql = format!("SELECT {DRAFT_COLUMNS} FROM drafts WHERE id = ?1");
    let row = conn
        .query_row(&sql, params![id as i64], DraftRow::from_row)
        .optional()
        .db_context("Failed to query draft")?;

    row.map(|row| decode(conn, row)).transpose()
}

/// Reads back the canonical copy inside the write transaction, so a draft
/// that cannot be decoded is rolled back rather than left half-saved.
fn load_canonical(tx: &Transaction<'_>, id: u64) -> Result<ProjectDraft> {
    load_session(tx, id)?
        .map(|(draft, _)| draft)
        .ok_or(DraftError::DraftNotFound { id })
}

impl super::Database {
    /// Starts a write transaction that takes the lock up front, so concurrent
    /// writers wait on the busy timeout instead of failing on upgrade.
    fn begin_write(&mut self) -> Result<Transaction<'_>> {
        self.connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")
    }

    /// Saves the draft and returns the canonical copy.
    pub fn save_draft(&mut self, draft: &ProjectDraft) -> Result<ProjectDraft> {
        let tx = self.begin_write()?;

        let now = timestamp_value(Timestamp::now());
        let id = upsert(&tx, draft, now)?;

        let canonical = load_canonical(&tx, id)?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(canonical)
    }

    /// Saves the draft, marks it submitted and returns the canonical copy.
    ///
    /// A draft that is already submitted keeps its original `submitted_at`.
    pub fn submit_draft(&mut self, draft: &ProjectDraft) -> Result<ProjectDraft> {
        let tx = self.begin_write()?;

        let now = timestamp_value(Timestamp::now());
        let id = upsert(&tx, draft, now)?;
        tx.execute(MARK_SUBMITTED_SQL, params![now, id as i64])
            .db_context("Failed to mark draft as submitted")?;

        let canonical = load_canonical(&tx, id)?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(canonical)
    }

    /// Retrieves a draft by id.
    pub fn get_draft(&self, id: u64) -> Result<Option<ProjectDraft>> {
        Ok(self.get_session(id)?.map(|(draft, _)| draft))
    }

    /// Retrieves a draft with the wizard step it was left on.
    pub fn get_session(&self, id: u64) -> Result<Option<(ProjectDraft, WizardStep)>> {
        load_session(&self.connection, id)
    }

    /// Records the wizard step for a draft.
    pub fn set_wizard_step(&mut self, id: u64, step: WizardStep) -> Result<()> {
        let updated = self
            .connection
            .execute(UPDATE_WIZARD_STEP_SQL, params![step.index(), id as i64])
            .db_context("Failed to update wizard step")?;
        if updated == 0 {
            return Err(DraftError::DraftNotFound { id });
        }
        Ok(())
    }

    /// Lists drafts, most recently updated first.
    pub fn list_drafts(&self, filter: &DraftFilter) -> Result<Vec<DraftOverview>> {
        let mut query = format!("SELECT {DRAFT_COLUMNS} FROM drafts");
        let mut conditions = Vec::new();
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(ref name) = filter.name_contains {
            conditions.push("name LIKE ?");
            params_vec.push(Box::new(contains_pattern(name)));
        }

        if let Some(status) = filter.status {
            conditions.push("status = ?");
            params_vec.push(Box::new(status.as_str()));
        }

        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }
        query.push_str(" ORDER BY updated_at DESC, id DESC");

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();
        let rows = stmt
            .query_map(params_refs.as_slice(), DraftRow::from_row)
            .db_context("Failed to query drafts")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read draft rows")?;

        let mut overviews = Vec::with_capacity(rows.len());
        for row in rows {
            let id = row.id;
            match decode(&self.connection, row) {
                Ok((draft, _)) => overviews.extend(DraftOverview::from_draft(&draft)),
                Err(e) => warn!("Skipping draft {id} that could not be decoded: {e}"),
            }
        }
        Ok(overviews)
    }
}
