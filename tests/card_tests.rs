mod common;

use common::{anexo, pergunta_base, pergunta_respondida, resposta_completa, topico};
use relatorio_conformidade::models::{CategoriaAnexo, Pergunta};
use relatorio_conformidade::report::card::{
    build_card, build_secoes, ContentBlock, STATUS_NAO_APLICAVEL, STATUS_NAO_RESPONDIDA,
};

const BASE_URL: &str = "https://app.example.com";

fn rotulos(card_blocos: &[ContentBlock]) -> Vec<String> {
    card_blocos
        .iter()
        .filter_map(|bloco| match bloco {
            ContentBlock::Campo { rotulo, .. } => Some(rotulo.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn nao_aplicavel_gera_somente_o_status() {
    // Even with an answer on record the short-circuit wins.
    let pergunta = Pergunta {
        aplicavel: false,
        resposta: Some(resposta_completa()),
        anexos: vec![anexo(CategoriaAnexo::Geral, "uploads/a.pdf", "a.pdf", None)],
        ..pergunta_base("Controle aplicável?")
    };
    let card = build_card(&pergunta, BASE_URL);
    assert_eq!(card.blocos.len(), 2);
    assert!(matches!(&card.blocos[0], ContentBlock::Titulo(_)));
    assert_eq!(
        card.blocos[1],
        ContentBlock::Status(STATUS_NAO_APLICAVEL.to_string())
    );
}

#[test]
fn aplicavel_sem_resposta_gera_somente_o_status() {
    let card = build_card(&pergunta_base("Pergunta pendente"), BASE_URL);
    assert_eq!(card.blocos.len(), 2);
    assert_eq!(
        card.blocos[1],
        ContentBlock::Status(STATUS_NAO_RESPONDIDA.to_string())
    );
}

#[test]
fn campos_saem_na_ordem_fixa() {
    let pergunta = Pergunta {
        descricao: Some("Avaliação do controle de acesso".to_string()),
        capitulacao: Some("Art. 46, LGPD".to_string()),
        criticidade: Some("Alta".to_string()),
        resposta: Some(resposta_completa()),
        ..pergunta_base("O controle está implantado?")
    };
    let card = build_card(&pergunta, BASE_URL);
    assert_eq!(
        rotulos(&card.blocos),
        vec![
            "Aplicável",
            "Capitulação",
            "Descrição",
            "Criticidade",
            "Resposta",
            "Justificativa",
            "Deficiência",
            "Recomendação",
            "Status do teste",
            "Descrição do teste",
            "Ação corretiva",
            "Prazo da ação",
            "Responsável pela ação",
            "Comentários",
        ]
    );
}

#[test]
fn valores_vazios_sao_filtrados() {
    let mut resposta = resposta_completa();
    resposta.justificativa = Some("   ".to_string());
    resposta.comentarios = None;
    let pergunta = Pergunta {
        resposta: Some(resposta),
        ..pergunta_base("Pergunta")
    };
    let presentes = rotulos(&build_card(&pergunta, BASE_URL).blocos);
    assert!(!presentes.contains(&"Justificativa".to_string()));
    assert!(!presentes.contains(&"Comentários".to_string()));
    assert!(presentes.contains(&"Deficiência".to_string()));
}

#[test]
fn datas_usam_dia_mes_ano() {
    let pergunta = Pergunta {
        resposta: Some(resposta_completa()),
        ..pergunta_base("Pergunta")
    };
    let card = build_card(&pergunta, BASE_URL);
    let prazo = card.blocos.iter().find_map(|bloco| match bloco {
        ContentBlock::Campo { rotulo, valor } if rotulo == "Prazo da ação" => Some(valor.clone()),
        _ => None,
    });
    assert_eq!(prazo.as_deref(), Some("09/03/2026"));
}

#[test]
fn listas_de_anexos_sao_deduplicadas_e_tituladas() {
    let mut resposta = resposta_completa();
    resposta.evidencias = vec![
        anexo(CategoriaAnexo::Resposta, "uploads/e1.pdf", "e1.pdf", None),
        anexo(CategoriaAnexo::Resposta, "uploads/e1.pdf", "e1.pdf", None),
    ];
    let pergunta = Pergunta {
        resposta: Some(resposta),
        anexos: vec![
            anexo(CategoriaAnexo::Norma, "srv\\uploads\\n1.pdf", "n1.pdf", None),
        ],
        ..pergunta_base("Pergunta")
    };
    let card = build_card(&pergunta, BASE_URL);

    let secoes: Vec<&str> = card
        .blocos
        .iter()
        .filter_map(|bloco| match bloco {
            ContentBlock::Secao(titulo) => Some(titulo.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(secoes, vec!["Arquivos", "Evidências"]);

    let links: Vec<&str> = card
        .blocos
        .iter()
        .filter_map(|bloco| match bloco {
            ContentBlock::LinkAnexo { url, .. } => Some(url.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(
        links,
        vec![
            "https://app.example.com/uploads/n1.pdf",
            "https://app.example.com/uploads/e1.pdf",
        ]
    );
}

#[test]
fn secao_monta_link_da_norma_interna() {
    let mut topico = topico("Tópico com norma", vec![pergunta_respondida("P1")]);
    topico.norma_interna = Some("PS-01 Política de Segurança".to_string());
    topico.norma_arquivo = Some("/srv/app/uploads/normas/ps01.pdf".to_string());

    let secoes = build_secoes(&[topico], BASE_URL);
    assert_eq!(
        secoes[0].norma_url.as_deref(),
        Some("https://app.example.com/uploads/normas/ps01.pdf")
    );
    assert_eq!(secoes[0].cards.len(), 1);
}
