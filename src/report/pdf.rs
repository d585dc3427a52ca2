//! Fixed-page PDF backend with manual pagination.
//!
//! Keeps an explicit vertical cursor against the page budget. Every card
//! is measured through [`super::metrics`] with the exact width, face and
//! size the draw loop uses, and the page break happens *before* anything
//! of the card hits the content stream — the output is append-only, so a
//! card that started on a page cannot be moved afterwards.
//!
//! Assembly is two-phase: content streams and link areas are collected per
//! page while the cursor runs, and the catalog, page tree, fonts and
//! annotation objects are written once the page count is known.

use pdf_writer::types::{ActionType, AnnotationType};
use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};

use super::card::{CabecalhoRelatorio, Card, ContentBlock, SecaoRelatorio};
use super::metrics::{line_height, measure_height, text_width, to_winansi, wrap_text, FontFace};

const LARGURA_PAGINA: f32 = 595.28;
const ALTURA_PAGINA: f32 = 841.89;
const MARGEM: f32 = 50.0;
const LARGURA_CONTEUDO: f32 = LARGURA_PAGINA - 2.0 * MARGEM;

const PREENCHIMENTO_CARD: f32 = 8.0;
const LARGURA_INTERNA_CARD: f32 = LARGURA_CONTEUDO - 2.0 * PREENCHIMENTO_CARD;
const ESPACO_APOS_CARD: f32 = 12.0;

const ENTRELINHA: f32 = 2.0;
const TAM_TITULO_RELATORIO: f32 = 16.0;
const TAM_TITULO_TOPICO: f32 = 13.0;
const TAM_TITULO_CARD: f32 = 11.0;
const TAM_CORPO: f32 = 10.0;
const TAM_REFERENCIA: f32 = 9.0;
const TAM_RODAPE: f32 = 8.0;

const ESPACO_APOS_TITULO: f32 = 4.0;
const ESPACO_ANTES_SECAO: f32 = 6.0;
const ESPACO_APOS_CAMPO: f32 = 2.0;
const RECUO_REFERENCIA: f32 = 12.0;

const COR_LINK: (f32, f32, f32) = (0.05, 0.33, 0.65);
const LINHA_RODAPE_Y: f32 = 30.0;

/// Clickable area registered while drawing, turned into a link annotation
/// during assembly.
struct AreaLink {
    rect: Rect,
    url: String,
}

/// Height one block consumes inside a card, at the card's inner width.
///
/// This is the single source of truth the page-break decision sums over;
/// the draw loop advances the cursor by the same amounts.
pub fn altura_bloco(bloco: &ContentBlock) -> f32 {
    match bloco {
        ContentBlock::Titulo(texto) => {
            measure_height(
                texto,
                LARGURA_INTERNA_CARD,
                FontFace::Bold,
                TAM_TITULO_CARD,
                ENTRELINHA,
            ) + ESPACO_APOS_TITULO
        }
        ContentBlock::Status(texto) => measure_height(
            texto,
            LARGURA_INTERNA_CARD,
            FontFace::Oblique,
            TAM_CORPO,
            ENTRELINHA,
        ),
        ContentBlock::Campo { rotulo, valor } => {
            measure_height(
                &format!("{rotulo}: {valor}"),
                LARGURA_INTERNA_CARD,
                FontFace::Regular,
                TAM_CORPO,
                ENTRELINHA,
            ) + ESPACO_APOS_CAMPO
        }
        ContentBlock::Secao(texto) => {
            ESPACO_ANTES_SECAO
                + measure_height(
                    texto,
                    LARGURA_INTERNA_CARD,
                    FontFace::Bold,
                    TAM_CORPO,
                    ENTRELINHA,
                )
        }
        ContentBlock::LinkAnexo {
            texto, referencia, ..
        } => {
            let mut altura = measure_height(
                &format!("• {texto}"),
                LARGURA_INTERNA_CARD,
                FontFace::Regular,
                TAM_CORPO,
                ENTRELINHA,
            );
            if let Some(referencia) = referencia {
                altura += measure_height(
                    referencia,
                    LARGURA_INTERNA_CARD - RECUO_REFERENCIA,
                    FontFace::Oblique,
                    TAM_REFERENCIA,
                    ENTRELINHA,
                );
            }
            altura
        }
    }
}

/// Full height of a card box, padding included.
pub fn altura_card(card: &Card) -> f32 {
    2.0 * PREENCHIMENTO_CARD + card.blocos.iter().map(altura_bloco).sum::<f32>()
}

fn nome_fonte(face: FontFace) -> Name<'static> {
    match face {
        FontFace::Regular => Name(b"F1"),
        FontFace::Bold => Name(b"F2"),
        FontFace::Oblique => Name(b"F3"),
    }
}

/// Fixed-page renderer: explicit cursor, explicit page breaks.
pub struct PdfRenderer {
    paginas: Vec<(Content, Vec<AreaLink>)>,
    conteudo: Content,
    links: Vec<AreaLink>,
    y: f32,
}

impl PdfRenderer {
    /// Renders the whole report and returns the encoded document.
    pub fn render(cabecalho: &CabecalhoRelatorio, secoes: &[SecaoRelatorio]) -> Vec<u8> {
        let mut renderer = PdfRenderer {
            paginas: Vec::new(),
            conteudo: Content::new(),
            links: Vec::new(),
            y: ALTURA_PAGINA - MARGEM,
        };
        renderer.desenhar_cabecalho(cabecalho);
        for (indice, secao) in secoes.iter().enumerate() {
            // Topic transitions always start a fresh page; the first topic
            // shares the cover page.
            if indice > 0 {
                renderer.nova_pagina();
            }
            renderer.desenhar_secao(secao);
        }
        renderer.finalizar()
    }

    fn nova_pagina(&mut self) {
        let concluida = std::mem::replace(&mut self.conteudo, Content::new());
        self.paginas.push((concluida, std::mem::take(&mut self.links)));
        self.y = ALTURA_PAGINA - MARGEM;
    }

    /// Breaks the page when `altura` no longer fits above the bottom margin.
    /// A page the cursor has not moved on yet is never abandoned — breaking
    /// there would emit an empty page and gain no room.
    fn quebrar_se_preciso(&mut self, altura: f32) {
        if self.y - altura < MARGEM && self.y < ALTURA_PAGINA - MARGEM {
            log::debug!("page break forced before a {altura:.1}pt block");
            self.nova_pagina();
        }
    }

    /// Draws one wrapped paragraph at `x`, advancing the cursor per line.
    fn desenhar_paragrafo(&mut self, texto: &str, x: f32, largura: f32, face: FontFace, tamanho: f32) {
        let altura_linha = line_height(tamanho, ENTRELINHA);
        for linha in wrap_text(texto, face, tamanho, largura) {
            let base = self.y - tamanho;
            self.conteudo.begin_text();
            self.conteudo.set_font(nome_fonte(face), tamanho);
            self.conteudo.next_line(x, base);
            self.conteudo.show(Str(&to_winansi(&linha)));
            self.conteudo.end_text();
            self.y -= altura_linha;
        }
    }

    /// Draws a link line: colored, underlined, with a clickable area per
    /// rendered line.
    fn desenhar_link(&mut self, texto: &str, url: &str, x: f32, largura: f32) {
        let (r, g, b) = COR_LINK;
        let altura_linha = line_height(TAM_CORPO, ENTRELINHA);
        self.conteudo.set_fill_rgb(r, g, b);
        self.conteudo.set_stroke_rgb(r, g, b);
        self.conteudo.set_line_width(0.5);
        for linha in wrap_text(texto, FontFace::Regular, TAM_CORPO, largura) {
            let base = self.y - TAM_CORPO;
            let largura_linha = text_width(&linha, FontFace::Regular, TAM_CORPO);
            self.conteudo.begin_text();
            self.conteudo.set_font(nome_fonte(FontFace::Regular), TAM_CORPO);
            self.conteudo.next_line(x, base);
            self.conteudo.show(Str(&to_winansi(&linha)));
            self.conteudo.end_text();
            self.conteudo.move_to(x, base - 1.2);
            self.conteudo.line_to(x + largura_linha, base - 1.2);
            self.conteudo.stroke();
            self.links.push(AreaLink {
                rect: Rect::new(x, base - 2.0, x + largura_linha, base + TAM_CORPO),
                url: url.to_string(),
            });
            self.y -= altura_linha;
        }
        self.conteudo.set_fill_rgb(0.0, 0.0, 0.0);
        self.conteudo.set_stroke_gray(0.0);
    }

    /// Draws one content block inside the current card. The cursor advance
    /// of each arm mirrors [`altura_bloco`] exactly.
    fn desenhar_bloco(&mut self, bloco: &ContentBlock) {
        let x = MARGEM + PREENCHIMENTO_CARD;
        match bloco {
            ContentBlock::Titulo(texto) => {
                self.desenhar_paragrafo(texto, x, LARGURA_INTERNA_CARD, FontFace::Bold, TAM_TITULO_CARD);
                self.y -= ESPACO_APOS_TITULO;
            }
            ContentBlock::Status(texto) => {
                self.conteudo.set_fill_gray(0.35);
                self.desenhar_paragrafo(texto, x, LARGURA_INTERNA_CARD, FontFace::Oblique, TAM_CORPO);
                self.conteudo.set_fill_gray(0.0);
            }
            ContentBlock::Campo { rotulo, valor } => {
                self.desenhar_paragrafo(
                    &format!("{rotulo}: {valor}"),
                    x,
                    LARGURA_INTERNA_CARD,
                    FontFace::Regular,
                    TAM_CORPO,
                );
                self.y -= ESPACO_APOS_CAMPO;
            }
            ContentBlock::Secao(texto) => {
                self.y -= ESPACO_ANTES_SECAO;
                self.desenhar_paragrafo(texto, x, LARGURA_INTERNA_CARD, FontFace::Bold, TAM_CORPO);
            }
            ContentBlock::LinkAnexo {
                texto,
                url,
                referencia,
            } => {
                self.desenhar_link(&format!("• {texto}"), url, x, LARGURA_INTERNA_CARD);
                if let Some(referencia) = referencia {
                    self.conteudo.set_fill_gray(0.35);
                    self.desenhar_paragrafo(
                        referencia,
                        x + RECUO_REFERENCIA,
                        LARGURA_INTERNA_CARD - RECUO_REFERENCIA,
                        FontFace::Oblique,
                        TAM_REFERENCIA,
                    );
                    self.conteudo.set_fill_gray(0.0);
                }
            }
        }
    }

    /// Draws one card: break first if the estimate overflows, then the
    /// blocks, then the border around what was actually consumed.
    fn desenhar_card(&mut self, card: &Card) {
        let altura = altura_card(card);
        self.quebrar_se_preciso(altura);

        let topo = self.y;
        self.y -= PREENCHIMENTO_CARD;
        for bloco in &card.blocos {
            self.desenhar_bloco(bloco);
        }
        self.y -= PREENCHIMENTO_CARD;

        let fundo = self.y;
        self.conteudo.set_stroke_gray(0.55);
        self.conteudo.set_line_width(0.8);
        self.conteudo.rect(MARGEM, fundo, LARGURA_CONTEUDO, topo - fundo);
        self.conteudo.stroke();
        self.conteudo.set_stroke_gray(0.0);

        self.y -= ESPACO_APOS_CARD;
    }

    fn desenhar_cabecalho(&mut self, cabecalho: &CabecalhoRelatorio) {
        self.desenhar_paragrafo(
            &cabecalho.titulo,
            MARGEM,
            LARGURA_CONTEUDO,
            FontFace::Bold,
            TAM_TITULO_RELATORIO,
        );
        self.y -= 4.0;
        if let Some(usuario) = &cabecalho.usuario {
            self.desenhar_paragrafo(
                &format!("Usuário: {usuario}"),
                MARGEM,
                LARGURA_CONTEUDO,
                FontFace::Regular,
                TAM_CORPO,
            );
        }
        self.desenhar_paragrafo(
            &format!("Gerado em: {}", cabecalho.gerado_em),
            MARGEM,
            LARGURA_CONTEUDO,
            FontFace::Regular,
            TAM_CORPO,
        );
        if let Some(percentual) = cabecalho.percentual {
            self.desenhar_paragrafo(
                &format!("Progresso: {percentual}%"),
                MARGEM,
                LARGURA_CONTEUDO,
                FontFace::Regular,
                TAM_CORPO,
            );
        }
        self.y -= 10.0;
    }

    fn desenhar_secao(&mut self, secao: &SecaoRelatorio) {
        let altura_titulo = measure_height(
            &secao.titulo,
            LARGURA_CONTEUDO,
            FontFace::Bold,
            TAM_TITULO_TOPICO,
            ENTRELINHA,
        );
        // Keep the heading attached to at least the start of a card.
        self.quebrar_se_preciso(altura_titulo + 40.0);

        self.desenhar_paragrafo(
            &secao.titulo,
            MARGEM,
            LARGURA_CONTEUDO,
            FontFace::Bold,
            TAM_TITULO_TOPICO,
        );
        self.y -= 3.0;
        if let Some(descricao) = &secao.descricao {
            self.desenhar_paragrafo(descricao, MARGEM, LARGURA_CONTEUDO, FontFace::Regular, TAM_CORPO);
            self.y -= 3.0;
        }
        if let Some(rotulo) = &secao.norma_interna {
            let linha = format!("Norma interna: {rotulo}");
            match &secao.norma_url {
                Some(url) => self.desenhar_link(&linha, url, MARGEM, LARGURA_CONTEUDO),
                None => self.desenhar_paragrafo(
                    &linha,
                    MARGEM,
                    LARGURA_CONTEUDO,
                    FontFace::Regular,
                    TAM_CORPO,
                ),
            }
            self.y -= 3.0;
        }
        self.y -= 6.0;

        for card in &secao.cards {
            self.desenhar_card(card);
        }
    }

    /// Flushes the open page, stamps footers and writes every object.
    fn finalizar(mut self) -> Vec<u8> {
        self.nova_pagina();
        let total = self.paginas.len();

        let mut pdf = Pdf::new();
        let mut alocar = {
            let mut contador = 0i32;
            move || {
                contador += 1;
                Ref::new(contador)
            }
        };

        let id_catalogo = alocar();
        let id_arvore = alocar();
        let id_regular = alocar();
        let id_negrito = alocar();
        let id_italico = alocar();

        pdf.catalog(id_catalogo).pages(id_arvore);
        for (nome_base, id) in [
            (b"Helvetica" as &[u8], id_regular),
            (b"Helvetica-Bold", id_negrito),
            (b"Helvetica-Oblique", id_italico),
        ] {
            pdf.type1_font(id)
                .base_font(Name(nome_base))
                .encoding_predefined(Name(b"WinAnsiEncoding"));
        }

        let ids_pagina: Vec<Ref> = (0..total).map(|_| alocar()).collect();
        let ids_conteudo: Vec<Ref> = (0..total).map(|_| alocar()).collect();
        pdf.pages(id_arvore)
            .kids(ids_pagina.iter().copied())
            .count(total as i32);

        let mut ids_annot: Vec<Vec<Ref>> = Vec::with_capacity(total);
        for (_, links) in &self.paginas {
            let mut ids = Vec::with_capacity(links.len());
            for link in links {
                let id = alocar();
                let mut annot = pdf.annotation(id);
                annot
                    .subtype(AnnotationType::Link)
                    .rect(link.rect)
                    .border(0.0, 0.0, 0.0, None);
                annot
                    .action()
                    .action_type(ActionType::Uri)
                    .uri(Str(link.url.as_bytes()));
                ids.push(id);
            }
            ids_annot.push(ids);
        }

        for (indice, (mut conteudo, _)) in self.paginas.into_iter().enumerate() {
            let rodape = format!("Página {} de {}", indice + 1, total);
            let largura_rodape = text_width(&rodape, FontFace::Regular, TAM_RODAPE);
            conteudo.begin_text();
            conteudo.set_font(nome_fonte(FontFace::Regular), TAM_RODAPE);
            conteudo.set_fill_gray(0.45);
            conteudo.next_line((LARGURA_PAGINA - largura_rodape) / 2.0, LINHA_RODAPE_Y);
            conteudo.show(Str(&to_winansi(&rodape)));
            conteudo.end_text();
            pdf.stream(ids_conteudo[indice], &conteudo.finish());
        }

        for indice in 0..total {
            let mut pagina = pdf.page(ids_pagina[indice]);
            pagina
                .media_box(Rect::new(0.0, 0.0, LARGURA_PAGINA, ALTURA_PAGINA))
                .parent(id_arvore)
                .contents(ids_conteudo[indice]);
            if !ids_annot[indice].is_empty() {
                pagina.annotations(ids_annot[indice].iter().copied());
            }
            let mut recursos = pagina.resources();
            let mut fontes = recursos.fonts();
            fontes.pair(Name(b"F1"), id_regular);
            fontes.pair(Name(b"F2"), id_negrito);
            fontes.pair(Name(b"F3"), id_italico);
        }

        log::info!("PDF assembled with {total} page(s)");
        pdf.finish()
    }
}
