//! Flowing DOCX backend.
//!
//! Pagination is delegated to the word-processing model, so there is no
//! height math here. Each card becomes a single-cell bordered table with a
//! fixed grid width — without the explicit width, hosts collapse a
//! near-empty table and the card grouping disappears.

use std::io::Cursor;

use docx_rs::{
    AlignmentType, BreakType, Docx, Hyperlink, HyperlinkType, Paragraph, Run, Table, TableBorders,
    TableCell, TableRow, WidthType,
};

use super::card::{CabecalhoRelatorio, Card, ContentBlock, SecaoRelatorio};
use super::ReportError;

/// Content width of an A4 page with one-inch margins, in twentieths of a
/// point. Cards never shrink below this.
const LARGURA_CARD_DXA: usize = 9026;

/// Half-point run sizes.
const TAM_TITULO_RELATORIO: usize = 32;
const TAM_TITULO_TOPICO: usize = 26;
const TAM_TITULO_CARD: usize = 22;
const TAM_CORPO: usize = 20;
const TAM_REFERENCIA: usize = 18;

const COR_LINK: &str = "0D54A6";
const COR_DISCRETA: &str = "595959";

/// Flowing renderer over the shared card model.
pub struct DocxRenderer;

impl DocxRenderer {
    /// Renders the whole report and returns the packaged document.
    pub fn render(
        cabecalho: &CabecalhoRelatorio,
        secoes: &[SecaoRelatorio],
    ) -> Result<Vec<u8>, ReportError> {
        let mut docx = Docx::new();

        docx = docx.add_paragraph(
            Paragraph::new()
                .align(AlignmentType::Center)
                .add_run(
                    Run::new()
                        .add_text(cabecalho.titulo.as_str())
                        .bold()
                        .size(TAM_TITULO_RELATORIO),
                ),
        );
        if let Some(usuario) = &cabecalho.usuario {
            docx = docx.add_paragraph(paragrafo_campo("Usuário", usuario));
        }
        docx = docx.add_paragraph(paragrafo_campo("Gerado em", &cabecalho.gerado_em));
        if let Some(percentual) = cabecalho.percentual {
            docx = docx.add_paragraph(paragrafo_campo("Progresso", &format!("{percentual}%")));
        }
        docx = docx.add_paragraph(Paragraph::new());

        for (indice, secao) in secoes.iter().enumerate() {
            if indice > 0 {
                docx = docx.add_paragraph(
                    Paragraph::new().add_run(Run::new().add_break(BreakType::Page)),
                );
            }
            docx = docx.add_paragraph(Paragraph::new().add_run(
                Run::new()
                    .add_text(secao.titulo.as_str())
                    .bold()
                    .size(TAM_TITULO_TOPICO),
            ));
            if let Some(descricao) = &secao.descricao {
                docx = docx.add_paragraph(
                    Paragraph::new()
                        .add_run(Run::new().add_text(descricao.as_str()).size(TAM_CORPO)),
                );
            }
            if let Some(rotulo) = &secao.norma_interna {
                docx = docx.add_paragraph(match &secao.norma_url {
                    Some(url) => Paragraph::new()
                        .add_run(Run::new().add_text("Norma interna: ").bold().size(TAM_CORPO))
                        .add_hyperlink(
                            Hyperlink::new(url.as_str(), HyperlinkType::External)
                                .add_run(run_link(rotulo, TAM_CORPO)),
                        ),
                    None => paragrafo_campo("Norma interna", rotulo),
                });
            }
            docx = docx.add_paragraph(Paragraph::new());

            for card in &secao.cards {
                docx = docx.add_table(tabela_card(card));
                // Spacer so consecutive card tables do not merge visually.
                docx = docx.add_paragraph(Paragraph::new());
            }
        }

        let mut saida = Cursor::new(Vec::new());
        docx.build()
            .pack(&mut saida)
            .map_err(|erro| ReportError::Render(format!("docx packaging failed: {erro}")))?;
        log::info!("DOCX assembled with {} section(s)", secoes.len());
        Ok(saida.into_inner())
    }
}

/// One card as a bordered single-cell table of fixed width.
fn tabela_card(card: &Card) -> Table {
    let mut celula = TableCell::new().width(LARGURA_CARD_DXA, WidthType::Dxa);
    for bloco in &card.blocos {
        for paragrafo in paragrafos_do_bloco(bloco) {
            celula = celula.add_paragraph(paragrafo);
        }
    }
    Table::new(vec![TableRow::new(vec![celula])])
        .set_grid(vec![LARGURA_CARD_DXA])
        .set_borders(TableBorders::new())
}

/// Maps one content block to its paragraph(s): bold labels, plain values,
/// italic statuses, hyperlink runs for attachments.
fn paragrafos_do_bloco(bloco: &ContentBlock) -> Vec<Paragraph> {
    match bloco {
        ContentBlock::Titulo(texto) => vec![Paragraph::new().add_run(
            Run::new()
                .add_text(texto.as_str())
                .bold()
                .size(TAM_TITULO_CARD),
        )],
        ContentBlock::Status(texto) => vec![Paragraph::new().add_run(
            Run::new()
                .add_text(texto.as_str())
                .italic()
                .color(COR_DISCRETA)
                .size(TAM_CORPO),
        )],
        ContentBlock::Campo { rotulo, valor } => vec![paragrafo_campo(rotulo, valor)],
        ContentBlock::Secao(texto) => vec![Paragraph::new().add_run(
            Run::new().add_text(texto.as_str()).bold().size(TAM_CORPO),
        )],
        ContentBlock::LinkAnexo {
            texto,
            url,
            referencia,
        } => {
            let mut paragrafos = vec![Paragraph::new()
                .add_run(Run::new().add_text("• ").size(TAM_CORPO))
                .add_hyperlink(
                    Hyperlink::new(url.as_str(), HyperlinkType::External)
                        .add_run(run_link(texto, TAM_CORPO)),
                )];
            if let Some(referencia) = referencia {
                paragrafos.push(Paragraph::new().add_run(
                    Run::new()
                        .add_text(referencia.as_str())
                        .italic()
                        .color(COR_DISCRETA)
                        .size(TAM_REFERENCIA),
                ));
            }
            paragrafos
        }
    }
}

fn paragrafo_campo(rotulo: &str, valor: &str) -> Paragraph {
    Paragraph::new()
        .add_run(Run::new().add_text(format!("{rotulo}: ")).bold().size(TAM_CORPO))
        .add_run(Run::new().add_text(valor).size(TAM_CORPO))
}

fn run_link(texto: &str, tamanho: usize) -> Run {
    Run::new()
        .add_text(texto)
        .color(COR_LINK)
        .underline("single")
        .size(tamanho)
}
