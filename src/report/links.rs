//! Builds public links for stored attachment paths.
//!
//! Stored paths arrive from more than one upload provider and operating
//! system, so the only stable anchor is the literal `uploads/` segment.
//! Everything before it is provider noise and gets discarded.

/// Normalize a stored path to the relative segment under the public root.
///
/// Backslashes become forward slashes, the path is cut at the first
/// case-insensitive `uploads/` occurrence, and paths that never mention the
/// segment fall back to `uploads/{filename}`. Idempotent: feeding the
/// output back in yields the same segment.
pub fn normalizar_caminho(caminho: &str) -> String {
    let normalizado = caminho.replace('\\', "/");
    let relativo = match normalizado.to_ascii_lowercase().find("uploads/") {
        Some(posicao) => normalizado[posicao..].to_string(),
        None => {
            let nome = normalizado.rsplit('/').next().unwrap_or("");
            format!("uploads/{nome}")
        }
    };
    relativo.trim_start_matches('/').to_string()
}

/// Absolute (or base-relative) URL for a stored attachment path.
pub fn montar_link(caminho: &str, base_url: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        normalizar_caminho(caminho)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descarta_prefixo_do_provedor() {
        assert_eq!(
            normalizar_caminho("/var/data/app/uploads/2024/doc.pdf"),
            "uploads/2024/doc.pdf"
        );
    }

    #[test]
    fn normaliza_barras_invertidas() {
        assert_eq!(
            normalizar_caminho(r"C:\srv\uploads\2024\doc.pdf"),
            "uploads/2024/doc.pdf"
        );
    }

    #[test]
    fn recai_para_o_nome_do_arquivo() {
        assert_eq!(normalizar_caminho("tmp/doc.pdf"), "uploads/doc.pdf");
    }

    #[test]
    fn monta_link_sem_barra_dupla() {
        assert_eq!(
            montar_link("uploads/x.pdf", "https://app.example.com/"),
            "https://app.example.com/uploads/x.pdf"
        );
    }
}
