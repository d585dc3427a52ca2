//! Interfaces to the compositor's external collaborators.
//!
//! The surrounding application owns the database and the storage layer;
//! the compositor only consumes read-only, already-joined data and hands
//! back one metadata record per generated file.

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{ArtefatoRelatorio, ResumoProgresso, Topico};
use crate::report::ReportError;

/// Read-only source of the compliance dataset.
#[async_trait]
pub trait DatasetProvider: Send + Sync {
    /// Legacy-shape dataset (attachments joined through the answers),
    /// optionally restricted to a set of topic ids.
    async fn load_topics(
        &self,
        usuario_id: Uuid,
        filtro: Option<&[Uuid]>,
    ) -> Result<Vec<Topico>, ReportError>;

    /// Builder-mode section/question tree (attachments carried directly on
    /// the questions).
    async fn load_builder_tree(
        &self,
        usuario_id: Uuid,
        filtro: Option<&[Uuid]>,
    ) -> Result<Vec<Topico>, ReportError>;
}

/// Precomputed completion summary for a user.
#[async_trait]
pub trait ProgressCalculator: Send + Sync {
    async fn progress_summary(
        &self,
        usuario_id: Uuid,
        filtro: Option<&[Uuid]>,
    ) -> Result<ResumoProgresso, ReportError>;
}

/// Sink for the metadata of a fully-written report file.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    async fn persist(&self, artefato: &ArtefatoRelatorio) -> Result<(), ReportError>;
}
