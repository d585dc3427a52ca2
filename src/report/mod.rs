//! Report compositor - turns the compliance dataset into PDF/DOCX files.
//!
//! The pipeline is shared up to the card model and split at the backend:
//! - `card` builds the backend-agnostic block sequence per question,
//!   using `dedup` and `links`;
//! - `pdf` is the fixed-page backend with manual pagination, measured by
//!   `metrics`;
//! - `docx` is the flowing backend with automatic pagination;
//! - `service` orchestrates validation, rendering, the file write and the
//!   artifact hand-off.

pub mod card;
pub mod dedup;
pub mod docx;
pub mod links;
pub mod metrics;
pub mod pdf;
pub mod progress;
pub mod service;

pub use card::{build_card, build_secoes, CabecalhoRelatorio, Card, ContentBlock, SecaoRelatorio};
pub use docx::DocxRenderer;
pub use pdf::PdfRenderer;
pub use service::ReportService;

use thiserror::Error;
use uuid::Uuid;

/// Errors surfaced by report generation.
///
/// Any failure aborts the whole request: no partial render, no retry, and
/// the artifact store is only reached after the file write completed.
#[derive(Debug, Error)]
pub enum ReportError {
    /// A full report was requested below 100% completion.
    #[error("full report requires 100% completion, got {percentual}%")]
    IncompleteProgress { percentual: u8 },
    /// The referenced user or dataset root does not exist.
    #[error("dataset not found for user {0}")]
    DatasetNotFound(Uuid),
    /// The dataset or progress provider failed for another reason.
    #[error("provider failure: {0}")]
    Provider(String),
    /// Estimating, drawing or encoding failed.
    #[error("render failed: {0}")]
    Render(String),
    /// Writing the report file failed.
    #[error("failed to write report file: {0}")]
    Io(#[from] std::io::Error),
    /// The artifact store rejected the metadata record.
    #[error("failed to persist report artifact: {0}")]
    Persist(String),
}
