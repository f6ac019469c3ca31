//! Snapshot repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist and restore whole `StoreState` values on explicit request.
//! - Keep SQL details out of the in-memory store.
//!
//! # Invariants
//! - `save_state` replaces every table in one transaction; readers never see
//!   a half-written state.
//! - Record order is preserved through a `position` column.
//! - Retired ids are saved with the records, so a restored store still
//!   refuses to issue them.
//! - Read paths reject malformed rows instead of masking them.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::client::Client;
use crate::model::contact::ContactSubmission;
use crate::model::id::{now_epoch_ms, EntityId};
use crate::model::project::Project;
use crate::model::subscriber::Subscriber;
use crate::store::entity_store::{RetiredIds, StoreState};
use crate::store::observer::Collection;
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

const SAVED_AT_KEY: &str = "saved_at";

pub type RepoResult<T> = Result<T, RepoError>;

/// Error for snapshot persistence and restore.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Connection was not prepared by `open_db` / `open_db_in_memory`.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open it with open_db"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted store data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::UninitializedConnection { .. } | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Durable home for store state.
///
/// The store itself never calls this; owners load before constructing an
/// `EntityStore` and save whenever they decide to.
pub trait SnapshotRepository {
    /// Returns the last saved state, or `None` when nothing was ever saved.
    fn load_state(&self) -> RepoResult<Option<StoreState>>;
    /// Replaces the saved state with `state`.
    fn save_state(&self, state: &StoreState) -> RepoResult<()>;
}

/// SQLite-backed snapshot repository.
///
/// Expects a connection returned by `open_db` / `open_db_in_memory`.
pub struct SqliteSnapshotRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSnapshotRepository<'conn> {
    /// Wraps a migrated connection.
    ///
    /// # Errors
    /// - `RepoError::UninitializedConnection` when the schema version differs
    ///   from `latest_version()`.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let actual_version =
            conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
        let expected_version = latest_version();
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }
        Ok(Self { conn })
    }

    /// Epoch milliseconds of the last successful save, if any.
    pub fn last_saved_at(&self) -> RepoResult<Option<i64>> {
        let value: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM store_meta WHERE key = ?1;",
                [SAVED_AT_KEY],
                |row| row.get(0),
            )
            .optional()?;

        value
            .map(|text| {
                text.parse::<i64>().map_err(|_| {
                    RepoError::InvalidData(format!("invalid saved_at value `{text}`"))
                })
            })
            .transpose()
    }

    fn write_all(&self, state: &StoreState) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute_batch(
            "DELETE FROM projects;
             DELETE FROM clients;
             DELETE FROM contact_submissions;
             DELETE FROM subscribers;
             DELETE FROM retired_ids;",
        )?;

        {
            let mut stmt = tx.prepare(
                "INSERT INTO projects (id, position, name, description, image_url)
                 VALUES (?1, ?2, ?3, ?4, ?5);",
            )?;
            for (position, project) in state.projects.iter().enumerate() {
                stmt.execute(params![
                    project.id.as_str(),
                    position_to_db(position),
                    project.name,
                    project.description,
                    project.image_url,
                ])?;
            }

            let mut stmt = tx.prepare(
                "INSERT INTO clients (id, position, name, description, designation, image_url)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            )?;
            for (position, client) in state.clients.iter().enumerate() {
                stmt.execute(params![
                    client.id.as_str(),
                    position_to_db(position),
                    client.name,
                    client.description,
                    client.designation,
                    client.image_url,
                ])?;
            }

            let mut stmt = tx.prepare(
                "INSERT INTO contact_submissions
                    (id, position, full_name, email, mobile, city, submitted_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            )?;
            for (position, contact) in state.contacts.iter().enumerate() {
                stmt.execute(params![
                    contact.id.as_str(),
                    position_to_db(position),
                    contact.full_name,
                    contact.email,
                    contact.mobile,
                    contact.city,
                    contact.submitted_at,
                ])?;
            }

            let mut stmt = tx.prepare(
                "INSERT INTO subscribers (id, position, email, subscribed_at)
                 VALUES (?1, ?2, ?3, ?4);",
            )?;
            for (position, subscriber) in state.subscribers.iter().enumerate() {
                stmt.execute(params![
                    subscriber.id.as_str(),
                    position_to_db(position),
                    subscriber.email,
                    subscriber.subscribed_at,
                ])?;
            }

            let mut stmt =
                tx.prepare("INSERT INTO retired_ids (collection, id) VALUES (?1, ?2);")?;
            for collection in Collection::ALL {
                for id in state.retired_ids.get(collection) {
                    stmt.execute(params![collection.as_str(), id.as_str()])?;
                }
            }
        }

        tx.execute(
            "INSERT INTO store_meta (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value;",
            params![SAVED_AT_KEY, now_epoch_ms().to_string()],
        )?;
        tx.commit()?;
        Ok(())
    }
}

impl SnapshotRepository for SqliteSnapshotRepository<'_> {
    fn load_state(&self) -> RepoResult<Option<StoreState>> {
        if self.last_saved_at()?.is_none() {
            return Ok(None);
        }

        let state = StoreState {
            projects: self.read_rows(
                "SELECT id, name, description, image_url FROM projects ORDER BY position ASC;",
                parse_project_row,
            )?,
            clients: self.read_rows(
                "SELECT id, name, description, designation, image_url
                 FROM clients ORDER BY position ASC;",
                parse_client_row,
            )?,
            contacts: self.read_rows(
                "SELECT id, full_name, email, mobile, city, submitted_at
                 FROM contact_submissions ORDER BY position ASC;",
                parse_contact_row,
            )?,
            subscribers: self.read_rows(
                "SELECT id, email, subscribed_at FROM subscribers ORDER BY position ASC;",
                parse_subscriber_row,
            )?,
            retired_ids: self.read_retired_ids()?,
        };

        info!(
            "event=state_load module=repo status=ok projects={} clients={} contacts={} subscribers={}",
            state.projects.len(),
            state.clients.len(),
            state.contacts.len(),
            state.subscribers.len()
        );
        Ok(Some(state))
    }

    fn save_state(&self, state: &StoreState) -> RepoResult<()> {
        let started_at = Instant::now();
        match self.write_all(state) {
            Ok(()) => {
                info!(
                    "event=state_save module=repo status=ok duration_ms={} projects={} clients={} contacts={} subscribers={}",
                    started_at.elapsed().as_millis(),
                    state.projects.len(),
                    state.clients.len(),
                    state.contacts.len(),
                    state.subscribers.len()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=state_save module=repo status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }
}

impl SqliteSnapshotRepository<'_> {
    fn read_rows<T>(
        &self,
        sql: &str,
        parse: fn(&Row<'_>) -> RepoResult<T>,
    ) -> RepoResult<Vec<T>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query([])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse(row)?);
        }
        Ok(items)
    }

    fn read_retired_ids(&self) -> RepoResult<RetiredIds> {
        let rows = self.read_rows(
            "SELECT collection, id FROM retired_ids ORDER BY collection ASC, id ASC;",
            parse_retired_row,
        )?;
        let mut retired = RetiredIds::default();
        for (collection, id) in rows {
            retired.get_mut(collection).push(id);
        }
        Ok(retired)
    }
}

fn parse_project_row(row: &Row<'_>) -> RepoResult<Project> {
    Ok(Project {
        id: parse_id(row, "projects")?,
        name: row.get("name")?,
        description: row.get("description")?,
        image_url: row.get("image_url")?,
    })
}

fn parse_client_row(row: &Row<'_>) -> RepoResult<Client> {
    Ok(Client {
        id: parse_id(row, "clients")?,
        name: row.get("name")?,
        description: row.get("description")?,
        designation: row.get("designation")?,
        image_url: row.get("image_url")?,
    })
}

fn parse_contact_row(row: &Row<'_>) -> RepoResult<ContactSubmission> {
    Ok(ContactSubmission {
        id: parse_id(row, "contact_submissions")?,
        full_name: row.get("full_name")?,
        email: row.get("email")?,
        mobile: row.get("mobile")?,
        city: row.get("city")?,
        submitted_at: parse_timestamp(row, "contact_submissions", "submitted_at")?,
    })
}

fn parse_subscriber_row(row: &Row<'_>) -> RepoResult<Subscriber> {
    Ok(Subscriber {
        id: parse_id(row, "subscribers")?,
        email: row.get("email")?,
        subscribed_at: parse_timestamp(row, "subscribers", "subscribed_at")?,
    })
}

fn parse_retired_row(row: &Row<'_>) -> RepoResult<(Collection, EntityId)> {
    let name: String = row.get("collection")?;
    let collection = Collection::parse(&name).ok_or_else(|| {
        RepoError::InvalidData(format!("unknown collection `{name}` in retired_ids.collection"))
    })?;
    Ok((collection, parse_id(row, "retired_ids")?))
}

fn parse_id(row: &Row<'_>, table: &str) -> RepoResult<EntityId> {
    let id: String = row.get("id")?;
    if id.trim().is_empty() {
        return Err(RepoError::InvalidData(format!("empty id in {table}.id")));
    }
    Ok(EntityId::new(id))
}

fn parse_timestamp(row: &Row<'_>, table: &str, column: &str) -> RepoResult<i64> {
    let value: i64 = row.get(column)?;
    if value < 0 {
        return Err(RepoError::InvalidData(format!(
            "negative timestamp `{value}` in {table}.{column}"
        )));
    }
    Ok(value)
}

fn position_to_db(position: usize) -> i64 {
    i64::try_from(position).unwrap_or(i64::MAX)
}
