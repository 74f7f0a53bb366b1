//! Client, currency and employee directory queries.

use rusqlite::params;

use super::utils::{contains_pattern, id_at};
use crate::{
    error::{DatabaseResultExt, DraftError, Result},
    models::{Client, ClientFilter, Currency, Employee, EmployeeFilter},
};

const INSERT_CLIENT_SQL: &str = "INSERT INTO clients (name, code) VALUES (?1, ?2)";
const SELECT_CURRENCIES_SQL: &str = "SELECT code, name FROM currencies ORDER BY code";
const INSERT_CURRENCY_SQL: &str = "INSERT OR IGNORE INTO currencies (code, name) VALUES (?1, ?2)";
const INSERT_EMPLOYEE_SQL: &str =
    "INSERT INTO employees (name, email, title, active) VALUES (?1, ?2, ?3, 1)";
const UPDATE_EMPLOYEE_ACTIVE_SQL: &str = "UPDATE employees SET active = ?1 WHERE id = ?2";

fn client_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Client> {
    Ok(Client {
        id: id_at(row, 0)?,
        name: row.get(1)?,
        code: row.get(2)?,
    })
}

fn employee_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Employee> {
    Ok(Employee {
        id: id_at(row, 0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        title: row.get(3)?,
        active: row.get::<_, i64>(4)? != 0,
    })
}

fn required(field: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DraftError::invalid_argument(field).with_reason("must not be empty"));
    }
    Ok(value.to_string())
}

impl super::Database {
    /// Lists clients ordered by name, optionally matching name or code.
    pub fn list_clients(&self, filter: &ClientFilter) -> Result<Vec<Client>> {
        let mut query = String::from("SELECT id, name, code FROM clients");
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(ref search) = filter.search {
            query.push_str(" WHERE name LIKE ?1 OR code LIKE ?1");
            params_vec.push(Box::new(contains_pattern(search)));
        }
        query.push_str(" ORDER BY name COLLATE NOCASE, id");

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;
        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();
        let clients = stmt
            .query_map(params_refs.as_slice(), client_from_row)
            .db_context("Failed to query clients")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read client rows")?;
        Ok(clients)
    }

    /// Adds a client and returns the stored record.
    pub fn add_client(&mut self, name: &str, code: Option<&str>) -> Result<Client> {
        let name = required("name", name)?;
        let code = code
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(String::from);

        self.connection
            .execute(INSERT_CLIENT_SQL, params![name, code])
            .db_context("Failed to insert client")?;

        Ok(Client {
            id: self.connection.last_insert_rowid() as u64,
            name,
            code,
        })
    }

    /// Lists supported currencies ordered by code.
    pub fn list_currencies(&self) -> Result<Vec<Currency>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_CURRENCIES_SQL)
            .db_context("Failed to prepare query")?;
        let currencies = stmt
            .query_map([], |row| {
                Ok(Currency {
                    code: row.get(0)?,
                    name: row.get(1)?,
                })
            })
            .db_context("Failed to query currencies")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read currency rows")?;
        Ok(currencies)
    }

    /// Registers a currency unless its code is already known. Returns true
    /// when a row was inserted.
    pub fn add_currency(&mut self, code: &str, name: &str) -> Result<bool> {
        let code = required("code", code)?.to_ascii_uppercase();
        if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(DraftError::invalid_argument("code")
                .with_reason(format!("expected a three-letter ISO code (got {code})")));
        }
        let name = required("name", name)?;

        let inserted = self
            .connection
            .execute(INSERT_CURRENCY_SQL, params![code, name])
            .db_context("Failed to insert currency")?;
        Ok(inserted > 0)
    }

    /// Searches employees by name or email.
    pub fn search_employees(&self, filter: &EmployeeFilter) -> Result<Vec<Employee>> {
        let mut query = String::from("SELECT id, name, email, title, active FROM employees");
        let mut conditions = Vec::new();
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(ref search) = filter.search {
            conditions.push("(name LIKE ?1 OR email LIKE ?1)");
            params_vec.push(Box::new(contains_pattern(search)));
        }

        if filter.active_only {
            conditions.push("active = 1");
        }

        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }
        query.push_str(" ORDER BY name COLLATE NOCASE, id");

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;
        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();
        let employees = stmt
            .query_map(params_refs.as_slice(), employee_from_row)
            .db_context("Failed to query employees")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read employee rows")?;
        Ok(employees)
    }

    /// Adds an active employee and returns the stored record.
    pub fn add_employee(
        &mut self,
        name: &str,
        email: &str,
        title: Option<&str>,
    ) -> Result<Employee> {
        let name = required("name", name)?;
        let email = required("email", email)?;
        let title = title
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from);

        self.connection
            .execute(INSERT_EMPLOYEE_SQL, params![name, email, title])
            .db_context("Failed to insert employee")?;

        Ok(Employee {
            id: self.connection.last_insert_rowid() as u64,
            name,
            email,
            title,
            active: true,
        })
    }

    /// Marks an employee active or inactive.
    pub fn set_employee_active(&mut self, id: u64, active: bool) -> Result<()> {
        let updated = self
            .connection
            .execute(UPDATE_EMPLOYEE_ACTIVE_SQL, params![active, id as i64])
            .db_context("Failed to update employee")?;
        if updated == 0 {
            return Err(DraftError::invalid_argument("employee_id")
                .with_reason(format!("no employee with ID {id}")));
        }
        Ok(())
    }
}
