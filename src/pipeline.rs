//! Batch orchestration.
//!
//! Lists the uploaded workbooks, extracts each one into attendance rows,
//! aggregates balances for the target period and writes them to the
//! results sink. Each document is processed into its own `Result`; a
//! failed document is logged, reported as skipped and left out of the
//! aggregation. The batch only fails when nothing could be processed.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::calculation::aggregate_balances;
use crate::config::{ConfigLoader, StipendSettings, StorageConfig};
use crate::error::{EngineError, EngineResult};
use crate::extraction::{XlsxWorkbook, extract_rows_in};
use crate::models::{AttendanceRow, EmployeeResult, Period};
use crate::storage::{
    BaseUrlLinkResolver, DocumentSource, LinkResolver, LocalDocumentSource, ResultSink,
    XlsxResultSink,
};

/// The collaborators a batch runs against.
#[derive(Clone)]
pub struct Collaborators {
    /// Where the attendance workbooks come from.
    pub source: Arc<dyn DocumentSource>,
    /// How download links are built.
    pub links: Arc<dyn LinkResolver>,
    /// Where results are written.
    pub sink: Arc<dyn ResultSink>,
}

impl Collaborators {
    /// Creates collaborators from explicit implementations.
    pub fn new(
        source: Arc<dyn DocumentSource>,
        links: Arc<dyn LinkResolver>,
        sink: Arc<dyn ResultSink>,
    ) -> Self {
        Self {
            source,
            links,
            sink,
        }
    }

    /// Creates the local directory-backed collaborators described by `storage`.
    pub fn local(storage: &StorageConfig) -> EngineResult<Self> {
        Ok(Self::new(
            Arc::new(LocalDocumentSource::new(&storage.input_dir)),
            Arc::new(BaseUrlLinkResolver::new(&storage.link_base_url)?),
            Arc::new(XlsxResultSink::new(&storage.output_dir)),
        ))
    }
}

/// A document successfully turned into attendance rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedDocument {
    /// The document identifier.
    pub id: String,
    /// The rows extracted from it.
    pub rows: Vec<AttendanceRow>,
}

/// A document left out of the batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedDocument {
    /// The document identifier.
    pub document: String,
    /// Why the document was skipped.
    pub reason: String,
}

/// The outcome of a batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    /// The period the batch was run for.
    pub period: Period,
    /// Results ordered by display name.
    pub results: Vec<EmployeeResult>,
    /// Documents that could not be processed.
    pub skipped: Vec<SkippedDocument>,
    /// The results sheet written, or `None` if writing failed.
    pub sheet_name: Option<String>,
}

/// Fetches one document and extracts its attendance rows.
pub fn extract_document(
    source: &dyn DocumentSource,
    id: &str,
    settings: &StipendSettings,
) -> EngineResult<Vec<AttendanceRow>> {
    let bytes = source.fetch(id)?;
    let workbook = XlsxWorkbook::from_bytes(id, &bytes)?;
    extract_rows_in(&workbook, &settings.sheet_name, &settings.cell_range)
}

/// Extracts every document of `source`, one `Result` per document.
///
/// Only a failure to list the source is returned as an error.
pub fn collect_documents(
    source: &dyn DocumentSource,
    settings: &StipendSettings,
) -> EngineResult<Vec<Result<ExtractedDocument, SkippedDocument>>> {
    let documents = source.list()?;

    Ok(documents
        .into_iter()
        .map(|doc| match extract_document(source, &doc.id, settings) {
            Ok(rows) => Ok(ExtractedDocument { id: doc.id, rows }),
            Err(err) => {
                warn!(document = %doc.id, error = %err, "Skipping document");
                Err(SkippedDocument {
                    document: doc.id,
                    reason: err.to_string(),
                })
            }
        })
        .collect())
}

/// Resolves download links, leaving out documents whose link fails.
fn resolve_links(links: &dyn LinkResolver, ids: impl Iterator<Item = String>) -> HashMap<String, String> {
    ids.filter_map(|id| match links.resolve(&id) {
        Ok(link) => Some((id, link)),
        Err(err) => {
            warn!(document = %id, error = %err, "Could not resolve download link");
            None
        }
    })
    .collect()
}

/// Runs a full batch for `period`.
///
/// Fails with [`EngineError::InvalidPeriod`] for a bad period, with a
/// storage error if the source cannot be listed, and with
/// [`EngineError::NothingToProcess`] if no document could be extracted. A
/// failed write to the sink is logged and reported as `sheet_name: None`.
pub fn run_batch(
    config: &ConfigLoader,
    collaborators: &Collaborators,
    period: Period,
) -> EngineResult<BatchReport> {
    period.validate()?;
    let start_time = Instant::now();
    let settings = config.settings();

    let (extracted, skipped): (Vec<_>, Vec<_>) =
        collect_documents(collaborators.source.as_ref(), settings)?
            .into_iter()
            .partition(Result::is_ok);
    let extracted: Vec<ExtractedDocument> = extracted.into_iter().filter_map(Result::ok).collect();
    let skipped: Vec<SkippedDocument> = skipped.into_iter().filter_map(Result::err).collect();

    if extracted.is_empty() {
        warn!(period = %period, skipped = skipped.len(), "No documents could be processed");
        return Err(EngineError::NothingToProcess);
    }

    let rows_by_employee: BTreeMap<String, Vec<AttendanceRow>> = extracted
        .into_iter()
        .map(|doc| (doc.id, doc.rows))
        .collect();
    let links = resolve_links(collaborators.links.as_ref(), rows_by_employee.keys().cloned());

    let results = aggregate_balances(&rows_by_employee, &links, &period, settings);

    let sheet_name = match collaborators
        .sink
        .write(&results, &period, &config.storage().spreadsheet_id)
    {
        Ok(sheet) => Some(sheet),
        Err(err) => {
            warn!(period = %period, error = %err, "Failed to write results sheet");
            None
        }
    };

    info!(
        period = %period,
        employees = results.len(),
        overspent = results.iter().filter(|r| r.is_overspent()).count(),
        skipped = skipped.len(),
        sheet_written = sheet_name.is_some(),
        duration_us = start_time.elapsed().as_micros(),
        "Batch completed"
    );

    Ok(BatchReport {
        period,
        results,
        skipped,
        sheet_name,
    })
}
