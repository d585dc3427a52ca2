//! Command-line surface: renders a report from a JSON dataset snapshot.
//!
//! Useful for inspecting layout output without the surrounding
//! application; the snapshot file holds the same topic tree the dataset
//! provider would return.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use clap::{Parser, ValueEnum};
use uuid::Uuid;

use relatorio_conformidade::models::{
    ArtefatoRelatorio, FormatoRelatorio, ResumoProgresso, SolicitacaoRelatorio, TipoRelatorio,
    Topico,
};
use relatorio_conformidade::providers::{ArtifactStore, DatasetProvider, ProgressCalculator};
use relatorio_conformidade::report::progress;
use relatorio_conformidade::{ReportError, ReportService, ReportsConfig};

#[derive(Debug, Parser)]
#[command(name = "relatorio-conformidade", version, about = "Gera relatórios de conformidade em PDF ou DOCX")]
struct Cli {
    /// JSON snapshot of the topic tree.
    dataset: PathBuf,

    /// Report kind.
    #[arg(long, value_enum, default_value = "parcial")]
    tipo: TipoArg,

    /// Output container format.
    #[arg(long, value_enum, default_value = "pdf")]
    formato: FormatoArg,

    /// User display name shown on the cover.
    #[arg(long)]
    usuario: Option<String>,

    /// Owning user id; a random one is minted when omitted.
    #[arg(long)]
    usuario_id: Option<Uuid>,

    /// Restrict the report to these topic ids.
    #[arg(long, value_delimiter = ',')]
    topicos: Option<Vec<Uuid>>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TipoArg {
    Completo,
    Parcial,
    Construtor,
}

impl From<TipoArg> for TipoRelatorio {
    fn from(valor: TipoArg) -> Self {
        match valor {
            TipoArg::Completo => TipoRelatorio::Completo,
            TipoArg::Parcial => TipoRelatorio::Parcial,
            TipoArg::Construtor => TipoRelatorio::Construtor,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatoArg {
    Pdf,
    Docx,
}

impl From<FormatoArg> for FormatoRelatorio {
    fn from(valor: FormatoArg) -> Self {
        match valor {
            FormatoArg::Pdf => FormatoRelatorio::Pdf,
            FormatoArg::Docx => FormatoRelatorio::Docx,
        }
    }
}

/// Dataset provider backed by the snapshot file.
struct Snapshot {
    topicos: Vec<Topico>,
}

impl Snapshot {
    fn filtrar(&self, filtro: Option<&[Uuid]>) -> Vec<Topico> {
        match filtro {
            Some(ids) => self
                .topicos
                .iter()
                .filter(|topico| ids.contains(&topico.id))
                .cloned()
                .collect(),
            None => self.topicos.clone(),
        }
    }
}

#[async_trait]
impl DatasetProvider for Snapshot {
    async fn load_topics(
        &self,
        _usuario_id: Uuid,
        filtro: Option<&[Uuid]>,
    ) -> Result<Vec<Topico>, ReportError> {
        Ok(self.filtrar(filtro))
    }

    async fn load_builder_tree(
        &self,
        _usuario_id: Uuid,
        filtro: Option<&[Uuid]>,
    ) -> Result<Vec<Topico>, ReportError> {
        Ok(self.filtrar(filtro))
    }
}

#[async_trait]
impl ProgressCalculator for Snapshot {
    async fn progress_summary(
        &self,
        _usuario_id: Uuid,
        filtro: Option<&[Uuid]>,
    ) -> Result<ResumoProgresso, ReportError> {
        Ok(progress::resumo_do_dataset(&self.filtrar(filtro)))
    }
}

/// Stand-in persistence store: logs the artifact record.
struct ConsoleStore;

#[async_trait]
impl ArtifactStore for ConsoleStore {
    async fn persist(&self, artefato: &ArtefatoRelatorio) -> Result<(), ReportError> {
        let registro = serde_json::to_string(artefato)
            .map_err(|erro| ReportError::Persist(erro.to_string()))?;
        log::info!("artifact record: {registro}");
        Ok(())
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    if let Err(erro) = executar(cli).await {
        log::error!("report generation failed: {erro}");
        std::process::exit(1);
    }
}

async fn executar(cli: Cli) -> Result<(), ReportError> {
    let conteudo = std::fs::read_to_string(&cli.dataset)?;
    let topicos: Vec<Topico> = serde_json::from_str(&conteudo)
        .map_err(|erro| ReportError::Provider(format!("invalid dataset snapshot: {erro}")))?;

    let snapshot = Arc::new(Snapshot { topicos });
    let service = ReportService::new(
        snapshot.clone(),
        snapshot,
        Arc::new(ConsoleStore),
        ReportsConfig::from_env(),
    );

    let artefato = service
        .gerar(SolicitacaoRelatorio {
            tipo: cli.tipo.into(),
            formato: cli.formato.into(),
            usuario_id: cli.usuario_id.unwrap_or_else(Uuid::new_v4),
            usuario_nome: cli.usuario,
            topicos: cli.topicos,
        })
        .await?;
    println!("{}", artefato.caminho_relativo);
    Ok(())
}
