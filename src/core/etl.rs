use crate::domain::model::{InputRow, RowOutcome, RunSummary};
use crate::domain::ports::Pipeline;
use crate::utils::error::Result;
use chrono::Utc;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Processes every row in table order. Only an unreadable table fails the
    /// run; row failures are collected into the summary.
    pub async fn run(&self) -> Result<RunSummary> {
        let mut summary = RunSummary::new(Utc::now());

        tracing::info!("Reading input table...");
        let rows = self.pipeline.extract().await?;
        tracing::info!("Extracted {} rows", rows.len());

        for row in &rows {
            let outcome = self.process_row(row).await;
            summary.record(outcome);
        }

        summary.finished_at = Utc::now();
        log_summary(&summary);
        Ok(summary)
    }

    async fn process_row(&self, row: &InputRow) -> RowOutcome {
        let result = match self.pipeline.transform(row).await {
            Ok(record) => self.pipeline.load(row, &record).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(location) => {
                tracing::info!("done: {}", row.label());
                RowOutcome::written(row, location)
            }
            Err(e) => {
                tracing::warn!(row = row.index, kind = %e.kind, "skipped {}: {}", row.label(), e.message);
                RowOutcome::failed(row, &e)
            }
        }
    }
}

/// Writes the run summary as pretty JSON, replacing any previous report.
pub async fn write_report(summary: &RunSummary, path: &str) -> Result<()> {
    let json = serde_json::to_vec_pretty(summary)?;
    tokio::fs::write(path, json).await?;
    tracing::info!("Run report saved to: {}", path);
    Ok(())
}

fn log_summary(summary: &RunSummary) {
    tracing::info!(
        "Processed {} rows: {} written, {} failed",
        summary.total,
        summary.succeeded,
        summary.failure_count()
    );
    for (kind, count) in &summary.failed {
        tracing::info!("  {}: {}", kind, count);
    }
}
