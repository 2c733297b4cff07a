//! SQLite-backed case store.

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use caseforge_core::types::{AnalysisType, CaseRecord};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("SQLite: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),
}

/// Listing row — the subset of a case shown in the dashboard index.
#[derive(Clone, Debug, Serialize)]
pub struct CaseSummary {
    pub case_id: String,
    pub title: String,
    pub analysis_type: AnalysisType,
    pub company_name: String,
    pub created_at: i64,
    pub report_path: String,
}

pub struct CaseStore {
    conn: Connection,
}

impl CaseStore {
    /// Open (or create) the store at `path` and run migrations.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        Self::migrate(&conn)?;
        debug!(path = %path.display(), "case store opened");
        Ok(Self { conn })
    }

    /// In-memory store for tests.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Self::migrate(&conn)?;
        Ok(Self { conn })
    }

    fn migrate(conn: &Connection) -> Result<(), StoreError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS cases (
                case_id TEXT PRIMARY KEY,
                provider TEXT NOT NULL,
                title TEXT NOT NULL,
                analysis_type TEXT NOT NULL,
                company_name TEXT NOT NULL DEFAULT '',
                industry TEXT NOT NULL DEFAULT '',
                region TEXT NOT NULL DEFAULT '',
                problem_statement TEXT NOT NULL DEFAULT '',
                created_at INTEGER NOT NULL,
                final_recommendation TEXT NOT NULL,
                report_path TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_cases_created ON cases(created_at DESC);
            "#,
        )?;
        Ok(())
    }

    /// Insert a new case row.
    pub fn insert(&self, record: &CaseRecord) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO cases (case_id, provider, title, analysis_type, company_name, \
             industry, region, problem_statement, created_at, final_recommendation, report_path) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                record.case_id,
                record.provider,
                record.title,
                record.analysis_type.as_str(),
                record.company_name,
                record.industry,
                record.region,
                record.problem_statement,
                record.created_at,
                record.final_recommendation,
                record.report_path,
            ],
        )?;
        Ok(())
    }

    /// All cases, newest first.
    pub fn list(&self) -> Result<Vec<CaseSummary>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT case_id, title, analysis_type, company_name, created_at, report_path \
             FROM cases ORDER BY created_at DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(CaseSummary {
                case_id: row.get(0)?,
                title: row.get(1)?,
                analysis_type: AnalysisType::parse(&row.get::<_, String>(2)?),
                company_name: row.get(3)?,
                created_at: row.get(4)?,
                report_path: row.get(5)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Fetch a single case by id.
    pub fn get(&self, case_id: &str) -> Result<Option<CaseRecord>, StoreError> {
        let record = self
            .conn
            .query_row(
                "SELECT case_id, provider, title, analysis_type, company_name, industry, \
                 region, problem_statement, created_at, final_recommendation, report_path \
                 FROM cases WHERE case_id = ?1",
                params![case_id],
                |row| {
                    Ok(CaseRecord {
                        case_id: row.get(0)?,
                        provider: row.get(1)?,
                        title: row.get(2)?,
                        analysis_type: AnalysisType::parse(&row.get::<_, String>(3)?),
                        company_name: row.get(4)?,
                        industry: row.get(5)?,
                        region: row.get(6)?,
                        problem_statement: row.get(7)?,
                        created_at: row.get(8)?,
                        final_recommendation: row.get(9)?,
                        report_path: row.get(10)?,
                    })
                },
            )
            .optional()?;
        Ok(record)
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
