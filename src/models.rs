//! Domain models for the compliance dataset and the report pipeline.
//!
//! Everything here is read-only input assembled by the dataset provider,
//! except [`ArtefatoRelatorio`], which is the only record produced by a
//! render and handed to the persistence store.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category tag of an attachment or evidence record.
///
/// The tags mirror the stored values verbatim; they take part in the
/// deduplication key together with the stored path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CategoriaAnexo {
    Norma,
    Template,
    Resposta,
    Deficiencia,
    TestePlano,
    TesteEvidencia,
    Geral,
}

impl CategoriaAnexo {
    /// Stable string form used in the dedup key.
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoriaAnexo::Norma => "NORMA",
            CategoriaAnexo::Template => "TEMPLATE",
            CategoriaAnexo::Resposta => "RESPOSTA",
            CategoriaAnexo::Deficiencia => "DEFICIENCIA",
            CategoriaAnexo::TestePlano => "TESTE_PLANO",
            CategoriaAnexo::TesteEvidencia => "TESTE_EVIDENCIA",
            CategoriaAnexo::Geral => "GERAL",
        }
    }
}

/// Attachment or evidence record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Anexo {
    pub categoria: CategoriaAnexo,
    /// Stored relative path; may carry backslashes or a provider prefix.
    pub caminho: String,
    /// Original filename as uploaded by the user.
    pub nome_original: String,
    pub mime: String,
    /// Size in bytes.
    pub tamanho: u64,
    /// Free-text reference shown next to the link, when present.
    #[serde(default)]
    pub referencia: Option<String>,
}

/// Answer given by the requesting user to one question.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resposta {
    /// Whether the requirement is met ("Sim"/"Não" on the report).
    pub atende: bool,
    #[serde(default)]
    pub justificativa: Option<String>,
    /// Populated only when `atende` is false.
    #[serde(default)]
    pub deficiencia: Option<String>,
    #[serde(default)]
    pub recomendacao: Option<String>,
    #[serde(default)]
    pub teste_status: Option<String>,
    #[serde(default)]
    pub teste_descricao: Option<String>,
    #[serde(default)]
    pub acao_descricao: Option<String>,
    #[serde(default)]
    pub acao_prazo: Option<NaiveDate>,
    #[serde(default)]
    pub acao_responsavel: Option<String>,
    #[serde(default)]
    pub comentarios: Option<String>,
    /// Legacy-mode attachments, carried through the answer.
    #[serde(default)]
    pub evidencias: Vec<Anexo>,
}

/// One question of a topic, with the requesting user's answer joined in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pergunta {
    pub id: Uuid,
    pub titulo: String,
    #[serde(default)]
    pub descricao: Option<String>,
    /// Legal article the question maps to, when any.
    #[serde(default)]
    pub capitulacao: Option<String>,
    #[serde(default)]
    pub criticidade: Option<String>,
    pub aplicavel: bool,
    #[serde(default)]
    pub resposta: Option<Resposta>,
    /// Builder-mode attachments, carried directly on the question.
    #[serde(default)]
    pub anexos: Vec<Anexo>,
}

/// Topic (section) grouping an ordered run of questions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topico {
    pub id: Uuid,
    pub nome: String,
    #[serde(default)]
    pub descricao: Option<String>,
    /// Label of the internal norm covering the topic.
    #[serde(default)]
    pub norma_interna: Option<String>,
    /// Stored path of the internal norm file, rendered as a link.
    #[serde(default)]
    pub norma_arquivo: Option<String>,
    pub perguntas: Vec<Pergunta>,
}

/// Applicable/answered counts plus the rounded completion percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumoProgresso {
    pub aplicaveis: u32,
    pub respondidas: u32,
    pub total: u32,
    pub percentual: u8,
}

/// Requested report variant. The wire tags are the stored constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TipoRelatorio {
    /// Every topic, only renderable at 100% completion.
    #[serde(rename = "FULL")]
    Completo,
    /// Whatever has been answered so far.
    #[serde(rename = "PARTIAL")]
    Parcial,
    /// Sourced from the section/question builder tree.
    #[serde(rename = "BUILDER")]
    Construtor,
}

impl TipoRelatorio {
    /// Filesystem-safe slug used as the file name prefix.
    pub fn slug(&self) -> &'static str {
        match self {
            TipoRelatorio::Completo => "relatorio-completo",
            TipoRelatorio::Parcial => "relatorio-parcial",
            TipoRelatorio::Construtor => "relatorio-construtor",
        }
    }

    /// Human title shown on the report cover.
    pub fn titulo(&self) -> &'static str {
        match self {
            TipoRelatorio::Completo => "Relatório de Conformidade — Completo",
            TipoRelatorio::Parcial => "Relatório de Conformidade — Parcial",
            TipoRelatorio::Construtor => "Relatório de Conformidade — Construtor",
        }
    }
}

/// Output container format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatoRelatorio {
    Pdf,
    Docx,
}

impl FormatoRelatorio {
    pub fn extensao(&self) -> &'static str {
        match self {
            FormatoRelatorio::Pdf => "pdf",
            FormatoRelatorio::Docx => "docx",
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            FormatoRelatorio::Pdf => "application/pdf",
            FormatoRelatorio::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }
}

/// A report generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolicitacaoRelatorio {
    pub tipo: TipoRelatorio,
    pub formato: FormatoRelatorio,
    pub usuario_id: Uuid,
    /// Display name shown on the cover, when known.
    #[serde(default)]
    pub usuario_nome: Option<String>,
    /// Restricts the report to these topic ids, in dataset order.
    #[serde(default)]
    pub topicos: Option<Vec<Uuid>>,
}

/// Metadata of a generated report file, persisted after a successful write.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtefatoRelatorio {
    pub nome_exibicao: String,
    pub tipo: TipoRelatorio,
    pub formato: FormatoRelatorio,
    /// Path relative to the reports directory, as written to disk.
    pub caminho_relativo: String,
    pub usuario_id: Uuid,
    pub criado_em: DateTime<Utc>,
}
