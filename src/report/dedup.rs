//! First-seen deduplication of attachment lists.

use std::collections::HashSet;

use crate::models::Anexo;

/// Composite key identifying a unique attachment inside one rendered list.
pub fn chave_dedup(anexo: &Anexo) -> String {
    format!("{}|{}", anexo.categoria.as_str(), anexo.caminho)
}

/// Collapses records sharing `(categoria, caminho)` to the first-seen
/// instance.
///
/// Postconditions: the output never holds two records with the same key,
/// and each surviving record keeps the position of its first occurrence in
/// the input. Later duplicates are dropped entirely, so the first-seen
/// `referencia` is the one that renders.
pub fn dedup_anexos(registros: &[Anexo]) -> Vec<Anexo> {
    let mut vistos: HashSet<String> = HashSet::with_capacity(registros.len());
    let mut unicos: Vec<Anexo> = Vec::with_capacity(registros.len());
    for registro in registros {
        if vistos.insert(chave_dedup(registro)) {
            unicos.push(registro.clone());
        }
    }
    unicos
}
