mod common;

use common::anexo;
use relatorio_conformidade::models::CategoriaAnexo;
use relatorio_conformidade::report::dedup::{chave_dedup, dedup_anexos};

#[test]
fn saida_nunca_cresce_e_nao_repete_chaves() {
    let registros = vec![
        anexo(CategoriaAnexo::Norma, "uploads/a.pdf", "a.pdf", None),
        anexo(CategoriaAnexo::Norma, "uploads/b.pdf", "b.pdf", None),
        anexo(CategoriaAnexo::Norma, "uploads/a.pdf", "a.pdf", None),
        anexo(CategoriaAnexo::Geral, "uploads/b.pdf", "b.pdf", None),
    ];
    let unicos = dedup_anexos(&registros);

    assert!(unicos.len() <= registros.len());
    for (i, a) in unicos.iter().enumerate() {
        for b in &unicos[i + 1..] {
            assert_ne!(chave_dedup(a), chave_dedup(b));
        }
    }
}

#[test]
fn preserva_a_posicao_da_primeira_ocorrencia() {
    let registros = vec![
        anexo(CategoriaAnexo::Resposta, "uploads/1.pdf", "1.pdf", None),
        anexo(CategoriaAnexo::Resposta, "uploads/2.pdf", "2.pdf", None),
        anexo(CategoriaAnexo::Resposta, "uploads/1.pdf", "1.pdf", None),
        anexo(CategoriaAnexo::Resposta, "uploads/3.pdf", "3.pdf", None),
    ];
    let unicos = dedup_anexos(&registros);
    let caminhos: Vec<&str> = unicos.iter().map(|a| a.caminho.as_str()).collect();
    assert_eq!(caminhos, vec!["uploads/1.pdf", "uploads/2.pdf", "uploads/3.pdf"]);
}

#[test]
fn duplicata_mantem_a_referencia_da_primeira() {
    let registros = vec![
        anexo(
            CategoriaAnexo::Norma,
            "uploads/x/doc.pdf",
            "doc.pdf",
            Some("Versão aprovada"),
        ),
        anexo(
            CategoriaAnexo::Norma,
            "uploads/x/doc.pdf",
            "doc.pdf",
            Some("Rascunho antigo"),
        ),
    ];
    let unicos = dedup_anexos(&registros);
    assert_eq!(unicos.len(), 1);
    assert_eq!(unicos[0].referencia.as_deref(), Some("Versão aprovada"));
}

#[test]
fn mesma_trilha_com_categorias_distintas_nao_colapsa() {
    let registros = vec![
        anexo(CategoriaAnexo::Norma, "uploads/doc.pdf", "doc.pdf", None),
        anexo(CategoriaAnexo::Deficiencia, "uploads/doc.pdf", "doc.pdf", None),
    ];
    assert_eq!(dedup_anexos(&registros).len(), 2);
}
