//! Completion accounting over an in-memory dataset.
//!
//! The generic progress calculator lives behind a provider trait; this
//! local recomputation exists for topic-filtered requests, where the
//! stored summary does not reflect the filtered subset.

use crate::models::{ResumoProgresso, Topico};

/// Recomputes the progress summary for a (possibly filtered) dataset.
///
/// A question counts as answered only when it is applicable and carries an
/// answer. Datasets with no applicable question report 100%.
pub fn resumo_do_dataset(topicos: &[Topico]) -> ResumoProgresso {
    let mut total = 0u32;
    let mut aplicaveis = 0u32;
    let mut respondidas = 0u32;

    for topico in topicos {
        for pergunta in &topico.perguntas {
            total += 1;
            if pergunta.aplicavel {
                aplicaveis += 1;
                if pergunta.resposta.is_some() {
                    respondidas += 1;
                }
            }
        }
    }

    let percentual = if aplicaveis == 0 {
        100
    } else {
        (f64::from(respondidas) / f64::from(aplicaveis) * 100.0).round() as u8
    };

    ResumoProgresso {
        aplicaveis,
        respondidas,
        total,
        percentual,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Pergunta, Resposta};
    use uuid::Uuid;

    fn pergunta(aplicavel: bool, respondida: bool) -> Pergunta {
        Pergunta {
            id: Uuid::new_v4(),
            titulo: "Pergunta".to_string(),
            descricao: None,
            capitulacao: None,
            criticidade: None,
            aplicavel,
            resposta: respondida.then(|| Resposta {
                atende: true,
                justificativa: None,
                deficiencia: None,
                recomendacao: None,
                teste_status: None,
                teste_descricao: None,
                acao_descricao: None,
                acao_prazo: None,
                acao_responsavel: None,
                comentarios: None,
                evidencias: Vec::new(),
            }),
            anexos: Vec::new(),
        }
    }

    fn topico(perguntas: Vec<Pergunta>) -> Topico {
        Topico {
            id: Uuid::new_v4(),
            nome: "Tópico".to_string(),
            descricao: None,
            norma_interna: None,
            norma_arquivo: None,
            perguntas,
        }
    }

    #[test]
    fn arredonda_o_percentual() {
        let dataset = vec![topico(vec![
            pergunta(true, true),
            pergunta(true, true),
            pergunta(true, false),
        ])];
        let resumo = resumo_do_dataset(&dataset);
        assert_eq!(resumo.aplicaveis, 3);
        assert_eq!(resumo.respondidas, 2);
        assert_eq!(resumo.percentual, 67);
    }

    #[test]
    fn nao_aplicaveis_ficam_fora_da_conta() {
        let dataset = vec![topico(vec![pergunta(false, false), pergunta(true, true)])];
        let resumo = resumo_do_dataset(&dataset);
        assert_eq!(resumo.total, 2);
        assert_eq!(resumo.aplicaveis, 1);
        assert_eq!(resumo.percentual, 100);
    }

    #[test]
    fn dataset_sem_aplicaveis_conta_como_completo() {
        let dataset = vec![topico(vec![pergunta(false, false)])];
        assert_eq!(resumo_do_dataset(&dataset).percentual, 100);
    }
}
