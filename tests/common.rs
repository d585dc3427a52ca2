//! Shared fixtures for the integration suites.

use chrono::NaiveDate;
use uuid::Uuid;

use relatorio_conformidade::models::{Anexo, CategoriaAnexo, Pergunta, Resposta, Topico};

pub fn anexo(
    categoria: CategoriaAnexo,
    caminho: &str,
    nome: &str,
    referencia: Option<&str>,
) -> Anexo {
    Anexo {
        categoria,
        caminho: caminho.to_string(),
        nome_original: nome.to_string(),
        mime: "application/pdf".to_string(),
        tamanho: 2048,
        referencia: referencia.map(str::to_string),
    }
}

pub fn resposta_vazia() -> Resposta {
    Resposta {
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
    }
}

/// Negative answer exercising every optional field.
pub fn resposta_completa() -> Resposta {
    Resposta {
        atende: false,
        justificativa: Some("Controle implantado parcialmente".to_string()),
        deficiencia: Some("Sem trilha de auditoria no módulo financeiro".to_string()),
        recomendacao: Some("Habilitar log de alterações".to_string()),
        teste_status: Some("Reprovado".to_string()),
        teste_descricao: Some("Amostragem de 20 registros".to_string()),
        acao_descricao: Some("Contratar revisão externa".to_string()),
        acao_prazo: NaiveDate::from_ymd_opt(2026, 3, 9),
        acao_responsavel: Some("Equipe de TI".to_string()),
        comentarios: Some("Reavaliar no próximo ciclo".to_string()),
        evidencias: Vec::new(),
    }
}

pub fn pergunta_base(titulo: &str) -> Pergunta {
    Pergunta {
        id: Uuid::new_v4(),
        titulo: titulo.to_string(),
        descricao: None,
        capitulacao: None,
        criticidade: None,
        aplicavel: true,
        resposta: None,
        anexos: Vec::new(),
    }
}

pub fn pergunta_respondida(titulo: &str) -> Pergunta {
    Pergunta {
        resposta: Some(resposta_vazia()),
        ..pergunta_base(titulo)
    }
}

pub fn topico(nome: &str, perguntas: Vec<Pergunta>) -> Topico {
    Topico {
        id: Uuid::new_v4(),
        nome: nome.to_string(),
        descricao: None,
        norma_interna: None,
        norma_arquivo: None,
        perguntas,
    }
}

/// Fully-answered two-topic dataset.
pub fn dataset_respondido() -> Vec<Topico> {
    vec![
        topico(
            "Governança de dados",
            vec![
                pergunta_respondida("Existe política de retenção de dados?"),
                pergunta_respondida("Os acessos são revisados periodicamente?"),
            ],
        ),
        topico(
            "Segurança da informação",
            vec![pergunta_respondida("Backups são testados?")],
        ),
    ]
}
