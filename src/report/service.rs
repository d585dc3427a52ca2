//! Report orchestration: validate, render, write, persist.

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::config::ReportsConfig;
use crate::models::{ArtefatoRelatorio, FormatoRelatorio, SolicitacaoRelatorio, TipoRelatorio};
use crate::providers::{ArtifactStore, DatasetProvider, ProgressCalculator};

use super::card::{build_secoes, CabecalhoRelatorio};
use super::docx::DocxRenderer;
use super::pdf::PdfRenderer;
use super::{progress, ReportError};

/// Drives one report request from validation to the persisted artifact.
///
/// Requests are independent: each writes its own uniquely timestamped
/// file, so concurrent generations need no coordination.
pub struct ReportService {
    datasets: Arc<dyn DatasetProvider>,
    progresso: Arc<dyn ProgressCalculator>,
    artefatos: Arc<dyn ArtifactStore>,
    config: ReportsConfig,
}

impl ReportService {
    pub fn new(
        datasets: Arc<dyn DatasetProvider>,
        progresso: Arc<dyn ProgressCalculator>,
        artefatos: Arc<dyn ArtifactStore>,
        config: ReportsConfig,
    ) -> Self {
        Self {
            datasets,
            progresso,
            artefatos,
            config,
        }
    }

    /// Generates one report, returning the artifact metadata after the
    /// file is fully on disk and registered.
    pub async fn gerar(
        &self,
        solicitacao: SolicitacaoRelatorio,
    ) -> Result<ArtefatoRelatorio, ReportError> {
        log::info!(
            "report requested: tipo={:?} formato={:?} usuario={}",
            solicitacao.tipo,
            solicitacao.formato,
            solicitacao.usuario_id
        );

        let filtro = solicitacao.topicos.as_deref();
        let topicos = match solicitacao.tipo {
            TipoRelatorio::Construtor => {
                self.datasets
                    .load_builder_tree(solicitacao.usuario_id, filtro)
                    .await?
            }
            TipoRelatorio::Completo | TipoRelatorio::Parcial => {
                self.datasets
                    .load_topics(solicitacao.usuario_id, filtro)
                    .await?
            }
        };

        // The stored summary does not reflect a topic filter, so filtered
        // requests recompute completion over the filtered dataset.
        let resumo = match filtro {
            Some(_) => progress::resumo_do_dataset(&topicos),
            None => {
                self.progresso
                    .progress_summary(solicitacao.usuario_id, None)
                    .await?
            }
        };
        if solicitacao.tipo == TipoRelatorio::Completo && resumo.percentual < 100 {
            log::warn!(
                "full report rejected for {} at {}%",
                solicitacao.usuario_id,
                resumo.percentual
            );
            return Err(ReportError::IncompleteProgress {
                percentual: resumo.percentual,
            });
        }

        let agora = Utc::now();
        let cabecalho = CabecalhoRelatorio {
            titulo: solicitacao.tipo.titulo().to_string(),
            usuario: solicitacao.usuario_nome.clone(),
            gerado_em: agora.format("%d/%m/%Y %H:%M").to_string(),
            percentual: Some(resumo.percentual),
        };
        let secoes = build_secoes(&topicos, &self.config.base_url);
        let bytes = match solicitacao.formato {
            FormatoRelatorio::Pdf => PdfRenderer::render(&cabecalho, &secoes),
            FormatoRelatorio::Docx => DocxRenderer::render(&cabecalho, &secoes)?,
        };

        let nome_arquivo = nome_do_arquivo(&solicitacao, agora);
        tokio::fs::create_dir_all(&self.config.reports_dir).await?;
        let destino = self.config.reports_dir.join(&nome_arquivo);
        tokio::fs::write(&destino, &bytes).await?;
        log::info!("report written: {} ({} bytes)", destino.display(), bytes.len());

        let artefato = ArtefatoRelatorio {
            nome_exibicao: format!(
                "{} — {}",
                solicitacao.tipo.titulo(),
                agora.format("%d/%m/%Y")
            ),
            tipo: solicitacao.tipo,
            formato: solicitacao.formato,
            caminho_relativo: nome_arquivo,
            usuario_id: solicitacao.usuario_id,
            criado_em: agora,
        };
        self.artefatos.persist(&artefato).await?;
        Ok(artefato)
    }
}

/// `{slug}-{userId}-{timestamp}.{ext}`, with `:` and `.` made
/// filesystem-safe. Stable: persisted paths must keep resolving.
pub fn nome_do_arquivo(solicitacao: &SolicitacaoRelatorio, momento: DateTime<Utc>) -> String {
    let carimbo = momento
        .to_rfc3339_opts(SecondsFormat::Secs, true)
        .replace([':', '.'], "-");
    sanitize_filename::sanitize(format!(
        "{}-{}-{}.{}",
        solicitacao.tipo.slug(),
        solicitacao.usuario_id,
        carimbo,
        solicitacao.formato.extensao()
    ))
}
