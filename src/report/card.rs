//! Backend-agnostic card model.
//!
//! One card per question, as an ordered sequence of content blocks. Both
//! renderers consume this sequence and nothing else, which is what keeps
//! the PDF and DOCX outputs informationally identical.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::{Anexo, Pergunta, Topico};

use super::dedup::dedup_anexos;
use super::links::montar_link;

/// Status block shown for questions marked not applicable.
pub const STATUS_NAO_APLICAVEL: &str = "Não aplicável";
/// Status block shown for applicable questions without an answer.
pub const STATUS_NAO_RESPONDIDA: &str = "Não respondida";

/// Renderer-independent unit of a card's content.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentBlock {
    /// Question title.
    Titulo(String),
    /// Italic short-circuit status ("Não aplicável" / "Não respondida").
    Status(String),
    /// `rotulo: valor` pair; only emitted for non-empty values.
    Campo { rotulo: String, valor: String },
    /// Heading of an attachment list ("Arquivos", "Evidências").
    Secao(String),
    /// One attachment bullet with its resolved link.
    LinkAnexo {
        texto: String,
        url: String,
        referencia: Option<String>,
    },
}

/// The bordered visual unit for one question.
#[derive(Debug, Clone)]
pub struct Card {
    pub pergunta_id: Uuid,
    pub blocos: Vec<ContentBlock>,
}

/// One topic section: heading data plus its cards, in stored order.
#[derive(Debug, Clone)]
pub struct SecaoRelatorio {
    pub topico_id: Uuid,
    pub titulo: String,
    pub descricao: Option<String>,
    pub norma_interna: Option<String>,
    pub norma_url: Option<String>,
    pub cards: Vec<Card>,
}

/// Cover header shared by both backends.
#[derive(Debug, Clone)]
pub struct CabecalhoRelatorio {
    pub titulo: String,
    pub usuario: Option<String>,
    pub gerado_em: String,
    pub percentual: Option<u8>,
}

fn sim_nao(valor: bool) -> &'static str {
    if valor {
        "Sim"
    } else {
        "Não"
    }
}

/// Dates render day/month/year everywhere on the report.
pub fn formatar_data(data: NaiveDate) -> String {
    data.format("%d/%m/%Y").to_string()
}

/// Builds the block sequence for one question.
///
/// Non-applicable questions short-circuit to a single status block, with or
/// without an answer on record; unanswered applicable questions likewise.
/// Answered questions emit the fixed field order with empty values filtered
/// out, then the deduplicated attachment and evidence lists.
pub fn build_card(pergunta: &Pergunta, base_url: &str) -> Card {
    let mut blocos = vec![ContentBlock::Titulo(pergunta.titulo.clone())];

    if !pergunta.aplicavel {
        blocos.push(ContentBlock::Status(STATUS_NAO_APLICAVEL.to_string()));
        return Card {
            pergunta_id: pergunta.id,
            blocos,
        };
    }

    let Some(resposta) = &pergunta.resposta else {
        blocos.push(ContentBlock::Status(STATUS_NAO_RESPONDIDA.to_string()));
        return Card {
            pergunta_id: pergunta.id,
            blocos,
        };
    };

    let campos: [(&str, Option<String>); 14] = [
        ("Aplicável", Some(sim_nao(pergunta.aplicavel).to_string())),
        ("Capitulação", pergunta.capitulacao.clone()),
        ("Descrição", pergunta.descricao.clone()),
        ("Criticidade", pergunta.criticidade.clone()),
        ("Resposta", Some(sim_nao(resposta.atende).to_string())),
        ("Justificativa", resposta.justificativa.clone()),
        ("Deficiência", resposta.deficiencia.clone()),
        ("Recomendação", resposta.recomendacao.clone()),
        ("Status do teste", resposta.teste_status.clone()),
        ("Descrição do teste", resposta.teste_descricao.clone()),
        ("Ação corretiva", resposta.acao_descricao.clone()),
        ("Prazo da ação", resposta.acao_prazo.map(formatar_data)),
        ("Responsável pela ação", resposta.acao_responsavel.clone()),
        ("Comentários", resposta.comentarios.clone()),
    ];
    for (rotulo, valor) in campos {
        if let Some(valor) = valor {
            if !valor.trim().is_empty() {
                blocos.push(ContentBlock::Campo {
                    rotulo: rotulo.to_string(),
                    valor,
                });
            }
        }
    }

    empilhar_lista(&mut blocos, "Arquivos", &pergunta.anexos, base_url);
    empilhar_lista(&mut blocos, "Evidências", &resposta.evidencias, base_url);

    Card {
        pergunta_id: pergunta.id,
        blocos,
    }
}

/// Appends one attachment list: heading plus one bullet per unique record.
fn empilhar_lista(blocos: &mut Vec<ContentBlock>, titulo: &str, anexos: &[Anexo], base_url: &str) {
    if anexos.is_empty() {
        return;
    }
    blocos.push(ContentBlock::Secao(titulo.to_string()));
    for anexo in dedup_anexos(anexos) {
        blocos.push(ContentBlock::LinkAnexo {
            texto: anexo.nome_original.clone(),
            url: montar_link(&anexo.caminho, base_url),
            referencia: anexo.referencia.clone(),
        });
    }
}

/// Maps the dataset to the section/card tree both renderers consume.
pub fn build_secoes(topicos: &[Topico], base_url: &str) -> Vec<SecaoRelatorio> {
    topicos
        .iter()
        .map(|topico| SecaoRelatorio {
            topico_id: topico.id,
            titulo: topico.nome.clone(),
            descricao: topico.descricao.clone(),
            norma_interna: topico.norma_interna.clone(),
            norma_url: topico
                .norma_arquivo
                .as_deref()
                .map(|caminho| montar_link(caminho, base_url)),
            cards: topico
                .perguntas
                .iter()
                .map(|pergunta| build_card(pergunta, base_url))
                .collect(),
        })
        .collect()
}
