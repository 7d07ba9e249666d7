use crate::utils::error::{RowError, RowErrorKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Positional columns of the source table.
pub const LINK_COLUMN: usize = 4;
pub const NAME_COLUMN: usize = 5;
pub const AUTHOR_COLUMN: usize = 6;
pub const DESCRIPTION_COLUMN: usize = 7;

/// One row of the source table. Fields are `None` when the row is too short.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InputRow {
    pub index: usize,
    pub viewer_link: Option<String>,
    pub output_name: Option<String>,
    pub author: String,
    pub description: String,
}

impl InputRow {
    pub fn from_fields<'a, I>(index: usize, fields: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let fields: Vec<&str> = fields.into_iter().collect();
        let column = |i: usize| {
            fields
                .get(i)
                .map(|f| f.trim().to_string())
                .filter(|f| !f.is_empty())
        };

        Self {
            index,
            viewer_link: column(LINK_COLUMN),
            output_name: column(NAME_COLUMN),
            author: column(AUTHOR_COLUMN).unwrap_or_default(),
            description: column(DESCRIPTION_COLUMN).unwrap_or_default(),
        }
    }

    /// Name used in diagnostics, falls back to the row index.
    pub fn label(&self) -> String {
        match &self.output_name {
            Some(name) => name.clone(),
            None => format!("row {}", self.index),
        }
    }
}

/// Body returned by the share API.
#[derive(Debug, Clone, Deserialize)]
pub struct FetchEnvelope {
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputRecord {
    pub author: String,
    pub description: String,
    pub config: serde_json::Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RowStatus {
    Written,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowOutcome {
    pub index: usize,
    pub output_name: Option<String>,
    pub status: RowStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<RowErrorKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RowOutcome {
    pub fn written(row: &InputRow, output_path: String) -> Self {
        Self {
            index: row.index,
            output_name: row.output_name.clone(),
            status: RowStatus::Written,
            output_path: Some(output_path),
            error_kind: None,
            error: None,
        }
    }

    pub fn failed(row: &InputRow, error: &RowError) -> Self {
        Self {
            index: row.index,
            output_name: row.output_name.clone(),
            status: RowStatus::Failed,
            output_path: None,
            error_kind: Some(error.kind),
            error: Some(error.message.clone()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub total: usize,
    pub succeeded: usize,
    pub failed: BTreeMap<RowErrorKind, usize>,
    pub rows: Vec<RowOutcome>,
}

impl RunSummary {
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            finished_at: started_at,
            total: 0,
            succeeded: 0,
            failed: BTreeMap::new(),
            rows: Vec::new(),
        }
    }

    pub fn record(&mut self, outcome: RowOutcome) {
        self.total += 1;
        match outcome.error_kind {
            Some(kind) => *self.failed.entry(kind).or_insert(0) += 1,
            None => self.succeeded += 1,
        }
        self.rows.push(outcome);
    }

    pub fn failure_count(&self) -> usize {
        self.failed.values().sum()
    }

    pub fn failures_of(&self, kind: RowErrorKind) -> usize {
        self.failed.get(&kind).copied().unwrap_or(0)
    }
}
