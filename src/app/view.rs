use super::messages::Message;
use super::state::{
    ActiveModal, App, NoteEditorState, NoteTarget, ProofView, READER_SCROLL_ID,
};
use crate::annotations::{Bookmark, Highlight, HighlightColor, ParagraphId};
use crate::config::{FontFamily, LineHeight as LineSpacing, TextAlign};
use crate::document::{Chapter, Paragraph, Segment};
use crate::theme::Theme;
use iced::alignment::{Horizontal, Vertical};
use iced::widget::text::{LineHeight, Rich, Span, Wrapping};
use iced::widget::{
    Column, Row, button, column, container, horizontal_space, pick_list, row, scrollable, slider,
    text, text_editor, text_input,
};
use iced::{Background, Color, Element, Length};

use crate::config::{MAX_FONT_SIZE, MIN_FONT_SIZE};

const LINE_SPACINGS: [LineSpacing; 3] =
    [LineSpacing::Normal, LineSpacing::Relaxed, LineSpacing::Loose];
const TEXT_ALIGNS: [TextAlign; 2] = [TextAlign::Justify, TextAlign::Left];
const FONT_FAMILIES: [FontFamily; 4] = [
    FontFamily::Serif,
    FontFamily::Sans,
    FontFamily::Baskerville,
    FontFamily::Lora,
];

impl App {
    pub fn view(&self) -> Element<'_, Message> {
        if self.panels.reader_mode {
            return column![
                row![
                    horizontal_space(),
                    button("Salir del modo lectura").on_press(Message::ToggleReaderMode)
                ]
                .padding(8),
                self.reading_view(),
            ]
            .height(Length::Fill)
            .into();
        }

        let body: Element<'_, Message> = match &self.panels.modal {
            Some(ActiveModal::ChapterNav) => self.chapter_nav_view(),
            Some(ActiveModal::Bookmarks) => self.bookmarks_view(),
            Some(ActiveModal::Highlights) => self.highlights_view(),
            Some(ActiveModal::NoteEditor(editor)) => self.note_editor_view(editor),
            Some(ActiveModal::Dashboard) => self.dashboard_view(),
            Some(ActiveModal::ConfirmDeleteAll) => self.confirm_delete_view(),
            None => {
                let mut layout: Row<'_, Message> =
                    row![container(self.reading_view()).width(Length::Fill)].spacing(16);
                if let Some(proof) = &self.panels.proof {
                    layout = layout.push(self.proof_panel(proof));
                }
                if self.panels.settings_open {
                    layout = layout.push(self.settings_panel());
                }
                layout.into()
            }
        };

        column![self.header(), body, self.footer()]
            .spacing(8)
            .padding(12)
            .height(Length::Fill)
            .into()
    }
}

impl App {
    fn header(&self) -> Element<'_, Message> {
        let theme_picker = pick_list(Theme::ALL, Some(self.theme), Message::ThemeSelected);

        let mut armory: Row<'_, Message> = row![].spacing(4).align_y(Vertical::Center);
        for color in HighlightColor::ALL {
            let armed = self.panels.armed_highlight == Some(color);
            let swatch = button(text(if armed { "●" } else { "○" }).size(14.0))
                .style(move |theme: &iced::Theme, status| {
                    let mut style = button::text(theme, status);
                    style.text_color = highlight_tint(color);
                    style
                })
                .on_press(Message::ArmHighlight(color));
            armory = armory.push(swatch);
        }

        let copied_label: Element<'_, Message> = if self.reader.copied_at.is_some() {
            text("¡Copiado!").size(14.0).into()
        } else {
            text("").size(14.0).into()
        };

        row![
            text("2CFL-1689").size(22.0),
            button("Capítulos").on_press(Message::ToggleChapterNav),
            button("Marcadores").on_press(Message::ToggleBookmarkList),
            button("Resaltados").on_press(Message::ToggleHighlightList),
            button("Panel").on_press(Message::ToggleDashboard),
            armory,
            copied_label,
            horizontal_space(),
            theme_picker,
            button("Aa").on_press(Message::ToggleSettings),
            button("Lectura").on_press(Message::ToggleReaderMode),
        ]
        .spacing(10)
        .align_y(Vertical::Center)
        .width(Length::Fill)
        .into()
    }

    fn footer(&self) -> Element<'_, Message> {
        let total = self.document.chapter_count().max(1);
        let index = self.reader.current_chapter;

        let prev_button = if index > 0 {
            button("Anterior").on_press(Message::PreviousChapter)
        } else {
            button("Anterior")
        };
        let next_button = if index + 1 < total {
            button("Siguiente").on_press(Message::NextChapter)
        } else {
            button("Siguiente")
        };

        row![
            prev_button,
            next_button,
            button("Ir arriba").on_press(Message::GoToTop),
            horizontal_space(),
            text(format!("Capítulo {} de {}", index + 1, total)),
        ]
        .spacing(10)
        .align_y(Vertical::Center)
        .width(Length::Fill)
        .into()
    }

    fn reading_view(&self) -> Element<'_, Message> {
        let Some(chapter) = self.document.chapter_at(self.reader.current_chapter) else {
            return container(text("Documento vacío")).padding(24).into();
        };

        let mut content: Column<'_, Message> = column![].spacing(20).width(Length::Fill);

        if !chapter.is_preface() {
            content = content.push(
                text(format!("Capítulo {}", chapter.chapter))
                    .size(14.0)
                    .align_x(Horizontal::Center)
                    .width(Length::Fill),
            );
        }
        content = content.push(
            text(chapter.title.clone())
                .size(self.settings.font_size + 10.0)
                .font(self.current_font())
                .align_x(Horizontal::Center)
                .width(Length::Fill),
        );

        for paragraph in &chapter.paragraphs {
            content = content.push(self.paragraph_view(chapter, paragraph));
        }

        scrollable(
            container(content)
                .width(Length::Fill)
                .padding([16, 96]),
        )
        .on_scroll(|viewport| Message::Scrolled {
            offset: viewport.absolute_offset().y,
            viewport_height: viewport.bounds().height,
            content_height: viewport.content_bounds().height,
        })
        .id(READER_SCROLL_ID.clone())
        .height(Length::Fill)
        .into()
    }

    fn paragraph_view<'a>(
        &'a self,
        chapter: &'a Chapter,
        paragraph: &'a Paragraph,
    ) -> Element<'a, Message> {
        let id = ParagraphId::new(chapter.chapter, paragraph.paragraph);
        let display = paragraph.display_text();
        let highlights: Vec<&Highlight> = self.annotations.highlights_for(&id).collect();
        let armed = self.panels.armed_highlight.is_some();
        let font = self.current_font();
        let size = self.settings.font_size;
        let line_height = LineHeight::Relative(self.settings.line_height.factor());
        let link_color = self.theme.to_iced().palette().primary;

        let mut spans: Vec<Span<'a, Message>> = Vec::new();
        spans.push(
            Span::new(format!("{}. ", paragraph.paragraph))
                .font(iced::Font {
                    weight: iced::font::Weight::Bold,
                    ..font
                })
                .size(size)
                .line_height(line_height),
        );

        for run in paragraph_runs(paragraph, &highlights) {
            match run {
                ParagraphRun::Proof(marker) => {
                    spans.push(
                        Span::new(format!(" {marker} "))
                            .size(size * 0.75)
                            .color(link_color)
                            .link(Message::ShowProof {
                                paragraph: id.clone(),
                                marker,
                            }),
                    );
                }
                ParagraphRun::Text {
                    start,
                    end,
                    highlight,
                } => {
                    let mut span = Span::new(display[start..end].to_string())
                        .font(font)
                        .size(size)
                        .line_height(line_height);
                    if let Some(color) = highlight {
                        span = span.background(Background::Color(highlight_wash(color)));
                    }
                    if armed {
                        span = span.link(Message::RunClicked {
                            paragraph: id.clone(),
                            start,
                            end,
                        });
                    }
                    spans.push(span);
                }
            }
        }

        let rich: Rich<'a, Message> = Rich::with_spans(spans);
        // Both alignment options wrap left; iced has no justified text.
        let body = rich
            .width(Length::Fill)
            .wrapping(Wrapping::WordOrGlyph)
            .align_x(Horizontal::Left);

        let bookmarked = self.annotations.is_bookmarked(&id);
        let bookmark_button = button(text(if bookmarked { "★" } else { "☆" }).size(14.0))
            .style(button::text)
            .on_press(Message::ToggleBookmark(id.clone()));
        let mut actions: Row<'_, Message> = row![
            bookmark_button,
            button(text("Copiar").size(12.0))
                .style(button::text)
                .on_press(Message::CopyParagraph(id.clone())),
            button(text("Nota").size(12.0))
                .style(button::text)
                .on_press(Message::OpenNoteEditor(NoteTarget::Paragraph(id.clone()))),
        ]
        .spacing(6)
        .align_y(Vertical::Center);
        if bookmarked {
            actions = actions.push(
                button(text("Etiquetas").size(12.0))
                    .style(button::text)
                    .on_press(Message::OpenNoteEditor(NoteTarget::Bookmark(id.clone()))),
            );
        }

        let mut block: Column<'_, Message> = column![body, actions].spacing(4);

        if let Some(note) = self.annotations.note(&id) {
            block = block.push(
                container(
                    column![
                        text(note).size(size * 0.8),
                        row![
                            button(text("Editar nota").size(12.0))
                                .style(button::text)
                                .on_press(Message::OpenNoteEditor(NoteTarget::Paragraph(
                                    id.clone()
                                ))),
                            button(text("Borrar nota").size(12.0))
                                .style(button::text)
                                .on_press(Message::DeleteParagraphNote(id.clone())),
                        ]
                        .spacing(8),
                    ]
                    .spacing(4),
                )
                .padding(8)
                .style(container::rounded_box),
            );
        }

        let flashing = self.reader.is_flashing(&id);
        container(block)
            .width(Length::Fill)
            .padding(4)
            .style(move |theme: &iced::Theme| {
                if flashing {
                    container::Style {
                        background: Some(Background::Color(Color {
                            a: 0.35,
                            ..theme.palette().primary
                        })),
                        ..container::Style::default()
                    }
                } else {
                    container::Style::default()
                }
            })
            .into()
    }

    fn proof_panel<'a>(&'a self, proof: &'a ProofView) -> Element<'a, Message> {
        let mut verses: Column<'a, Message> = column![].spacing(10);
        let full_text = proof.proof.full_text.as_deref().unwrap_or(&[]);
        for (idx, reference) in proof.proof.verses.iter().enumerate() {
            let mut entry: Column<'a, Message> =
                column![text(reference.clone()).size(14.0)].spacing(2);
            if let Some(body) = full_text.get(idx) {
                entry = entry.push(text(body.clone()).size(13.0));
                entry = entry.push(
                    button(text("Copiar versículo").size(12.0))
                        .style(button::text)
                        .on_press(Message::CopyProofVerse {
                            reference: reference.clone(),
                            text: body.clone(),
                        }),
                );
            }
            verses = verses.push(entry);
        }

        let panel = column![
            row![
                text(format!(
                    "Referencias {} ({})",
                    proof.paragraph, proof.proof.marker
                ))
                .size(16.0),
                horizontal_space(),
                button(text("✕").size(14.0))
                    .style(button::text)
                    .on_press(Message::CloseProof),
            ]
            .align_y(Vertical::Center),
            scrollable(verses).height(Length::Fill),
        ]
        .spacing(10)
        .width(Length::Fixed(300.0));

        container(panel)
            .padding(12)
            .style(container::rounded_box)
            .into()
    }

    fn settings_panel(&self) -> Element<'_, Message> {
        let font_size_slider = slider(
            MIN_FONT_SIZE..=MAX_FONT_SIZE,
            self.settings.font_size,
            Message::FontSizeChanged,
        )
        .step(super::state::FONT_SIZE_STEP);

        let panel = column![
            text("Ajustes de lectura").size(18.0),
            column![
                text(format!("Tamaño de fuente: {:.0}", self.settings.font_size)),
                font_size_slider,
            ]
            .spacing(4),
            row![
                text("Interlineado"),
                pick_list(
                    LINE_SPACINGS,
                    Some(self.settings.line_height),
                    Message::LineHeightChanged
                ),
            ]
            .spacing(8)
            .align_y(Vertical::Center),
            row![
                text("Alineación"),
                pick_list(
                    TEXT_ALIGNS,
                    Some(self.settings.text_align),
                    Message::TextAlignChanged
                ),
            ]
            .spacing(8)
            .align_y(Vertical::Center),
            row![
                text("Tipografía"),
                pick_list(
                    FONT_FAMILIES,
                    Some(self.settings.font_family),
                    Message::FontFamilyChanged
                ),
            ]
            .spacing(8)
            .align_y(Vertical::Center),
        ]
        .spacing(12)
        .width(Length::Fixed(280.0));

        container(panel)
            .padding(12)
            .style(container::rounded_box)
            .into()
    }

    fn chapter_nav_view(&self) -> Element<'_, Message> {
        let mut list: Column<'_, Message> = column![].spacing(6);
        for (index, chapter) in self.document.chapters().iter().enumerate() {
            let label = if chapter.is_preface() {
                chapter.title.clone()
            } else {
                format!("{}. {}", chapter.chapter, chapter.title)
            };
            let entry = if index == self.reader.current_chapter {
                button(text(label))
            } else {
                button(text(label)).on_press(Message::GoToChapter(index))
            };
            list = list.push(entry.width(Length::Fill).style(button::secondary));
        }

        self.modal_frame("Ir a capítulo", scrollable(list).height(Length::Fill).into())
    }

    fn bookmarks_view(&self) -> Element<'_, Message> {
        let mut list: Column<'_, Message> = column![].spacing(10);
        let mut shown = 0usize;
        for bookmark in self.annotations.bookmarks() {
            // Entries whose paragraph no longer resolves are skipped, not
            // shown broken.
            let (chapter_number, paragraph_number) = bookmark.id.chapter_and_paragraph();
            let Some((chapter, paragraph)) =
                self.document.paragraph(chapter_number, paragraph_number)
            else {
                continue;
            };
            shown += 1;
            list = list.push(self.bookmark_entry(bookmark, chapter, paragraph));
        }

        let body: Element<'_, Message> = if shown == 0 {
            text("Sin marcadores todavía.").into()
        } else {
            scrollable(list).height(Length::Fill).into()
        };
        self.modal_frame("Marcadores", body)
    }

    fn bookmark_entry<'a>(
        &'a self,
        bookmark: &'a Bookmark,
        chapter: &'a Chapter,
        paragraph: &'a Paragraph,
    ) -> Element<'a, Message> {
        let mut entry: Column<'a, Message> = column![
            text(format!("{} · Párrafo {}", chapter.title, paragraph.paragraph)).size(14.0),
            text(snippet(&paragraph.display_text(), 110)).size(13.0),
        ]
        .spacing(3);

        if let Some(note) = &bookmark.note {
            entry = entry.push(text(format!("Nota: {note}")).size(13.0));
        }
        if let Some(tags) = &bookmark.tags {
            if !tags.is_empty() {
                entry = entry.push(text(tags.join(" · ")).size(12.0));
            }
        }

        entry = entry.push(
            row![
                button(text("Ir").size(12.0))
                    .on_press(Message::NavigateToParagraph(bookmark.id.to_string())),
                button(text("Nota y etiquetas").size(12.0)).on_press(Message::OpenNoteEditor(
                    NoteTarget::Bookmark(bookmark.id.clone())
                )),
                button(text("Borrar").size(12.0))
                    .style(button::danger)
                    .on_press(Message::DeleteBookmark(bookmark.id.clone())),
            ]
            .spacing(6),
        );

        container(entry)
            .padding(10)
            .width(Length::Fill)
            .style(container::rounded_box)
            .into()
    }

    fn highlights_view(&self) -> Element<'_, Message> {
        let mut list: Column<'_, Message> = column![].spacing(10);
        for highlight in self.annotations.highlights() {
            let color = highlight.color;
            let swatch = container(text("  "))
                .style(move |_theme: &iced::Theme| container::Style {
                    background: Some(Background::Color(highlight_wash(color))),
                    ..container::Style::default()
                })
                .padding(4);
            let entry = row![
                swatch,
                column![
                    text(snippet(&highlight.text, 90)).size(13.0),
                    text(format!("{} · {}", highlight.paragraph_id, color.label())).size(11.0),
                ]
                .spacing(2)
                .width(Length::Fill),
                button(text("Ir").size(12.0)).on_press(Message::NavigateToParagraph(
                    highlight.paragraph_id.to_string()
                )),
                button(text("Borrar").size(12.0))
                    .style(button::danger)
                    .on_press(Message::DeleteHighlight(highlight.id.clone())),
            ]
            .spacing(8)
            .align_y(Vertical::Center);
            list = list.push(container(entry).padding(8).style(container::rounded_box));
        }

        let body: Element<'_, Message> = if self.annotations.highlights().is_empty() {
            text("Sin resaltados todavía.").into()
        } else {
            scrollable(list).height(Length::Fill).into()
        };
        self.modal_frame("Resaltados", body)
    }

    fn note_editor_view<'a>(&'a self, editor: &'a NoteEditorState) -> Element<'a, Message> {
        let title = match &editor.target {
            NoteTarget::Bookmark(id) => format!("Nota del marcador {id}"),
            NoteTarget::Paragraph(id) => format!("Nota del párrafo {id}"),
        };

        let mut tags_row: Row<'a, Message> = row![].spacing(6);
        for tag in &editor.tags {
            tags_row = tags_row.push(
                button(text(format!("{tag} ✕")).size(12.0))
                    .style(button::secondary)
                    .on_press(Message::RemoveTag(tag.clone())),
            );
        }

        let mut body: Column<'a, Message> = column![
            text_editor(&editor.note)
                .on_action(Message::NoteEdited)
                .height(Length::Fixed(180.0)),
        ]
        .spacing(10);

        if matches!(editor.target, NoteTarget::Bookmark(_)) {
            body = body.push(
                text_input("Añadir etiqueta…", &editor.tag_input)
                    .on_input(Message::TagInputChanged)
                    .on_submit(Message::TagSubmitted),
            );
            body = body.push(tags_row);
        }

        body = body.push(
            row![
                button("Guardar").on_press(Message::SaveNoteEditor),
                button("Cancelar")
                    .style(button::secondary)
                    .on_press(Message::CloseModal),
            ]
            .spacing(8),
        );

        self.modal_frame_owned(title, body.into())
    }

    fn dashboard_view(&self) -> Element<'_, Message> {
        let stats = self.stats();
        let stat = |label: &'static str, value: String| {
            container(
                column![text(value).size(26.0), text(label).size(13.0)]
                    .spacing(2)
                    .align_x(Horizontal::Center),
            )
            .padding(14)
            .width(Length::FillPortion(1))
            .style(container::rounded_box)
        };

        let cards = row![
            stat("Marcadores", stats.bookmarks.to_string()),
            stat("Notas", stats.notes.to_string()),
            stat("Resaltados", stats.highlights.to_string()),
            stat("Progreso", format!("{}%", stats.progress_percent)),
        ]
        .spacing(10);

        let actions = row![
            button("Exportar anotaciones").on_press(Message::ExportAnnotations),
            button("Borrar todos los datos")
                .style(button::danger)
                .on_press(Message::RequestDeleteAll),
        ]
        .spacing(10);

        self.modal_frame(
            "Panel de estudio",
            column![cards, actions].spacing(16).into(),
        )
    }

    fn confirm_delete_view(&self) -> Element<'_, Message> {
        let body = column![
            text("Se borrarán marcadores, notas, resaltados, tema y posiciones de lectura."),
            text("Esta acción no se puede deshacer.").size(13.0),
            row![
                button("Borrar todo")
                    .style(button::danger)
                    .on_press(Message::ConfirmDeleteAll),
                button("Cancelar")
                    .style(button::secondary)
                    .on_press(Message::CloseModal),
            ]
            .spacing(8),
        ]
        .spacing(12);

        self.modal_frame("¿Borrar todos los datos?", body.into())
    }

    fn modal_frame<'a>(
        &'a self,
        title: &'a str,
        body: Element<'a, Message>,
    ) -> Element<'a, Message> {
        self.modal_frame_owned(title.to_string(), body)
    }

    fn modal_frame_owned<'a>(
        &'a self,
        title: String,
        body: Element<'a, Message>,
    ) -> Element<'a, Message> {
        container(
            column![
                row![
                    text(title).size(20.0),
                    horizontal_space(),
                    button(text("✕").size(14.0))
                        .style(button::text)
                        .on_press(Message::CloseModal),
                ]
                .align_y(Vertical::Center),
                body,
            ]
            .spacing(12),
        )
        .padding(16)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    }
}

/// One renderable piece of a paragraph: a slice of the display text
/// (optionally highlighted) or an inline proof reference.
#[derive(Debug, PartialEq, Eq)]
enum ParagraphRun {
    Text {
        start: usize,
        end: usize,
        highlight: Option<HighlightColor>,
    },
    Proof(char),
}

/// Splits a paragraph into runs, cutting text segments wherever a
/// highlight boundary falls. Overlapping highlights keep the earliest.
/// Stored offsets are untrusted; a span outside the display text or off
/// a char boundary is dropped instead of sliced.
fn paragraph_runs(paragraph: &Paragraph, highlights: &[&Highlight]) -> Vec<ParagraphRun> {
    let display = paragraph.display_text();
    let mut spans: Vec<(usize, usize, HighlightColor)> = highlights
        .iter()
        .filter(|h| {
            h.start_offset < h.end_offset
                && h.end_offset <= display.len()
                && display.is_char_boundary(h.start_offset)
                && display.is_char_boundary(h.end_offset)
        })
        .map(|h| (h.start_offset, h.end_offset, h.color))
        .collect();
    spans.sort_by_key(|s| s.0);
    let mut merged: Vec<(usize, usize, HighlightColor)> = Vec::new();
    for span in spans {
        if merged.last().is_none_or(|last| span.0 >= last.1) {
            merged.push(span);
        }
    }

    let mut runs = Vec::new();
    let mut pos = 0usize;
    for segment in paragraph.segments() {
        match segment {
            Segment::ProofRef(marker) => runs.push(ParagraphRun::Proof(marker)),
            Segment::Text(slice) => {
                let seg_start = pos;
                let seg_end = pos + slice.len();
                let mut cursor = seg_start;
                for &(h_start, h_end, color) in &merged {
                    let start = h_start.max(seg_start);
                    let end = h_end.min(seg_end);
                    if start >= end {
                        continue;
                    }
                    if start > cursor {
                        runs.push(ParagraphRun::Text {
                            start: cursor,
                            end: start,
                            highlight: None,
                        });
                    }
                    runs.push(ParagraphRun::Text {
                        start,
                        end,
                        highlight: Some(color),
                    });
                    cursor = end;
                }
                if cursor < seg_end {
                    runs.push(ParagraphRun::Text {
                        start: cursor,
                        end: seg_end,
                        highlight: None,
                    });
                }
                pos = seg_end;
            }
        }
    }
    runs
}

/// Translucent background for highlighted spans.
fn highlight_wash(color: HighlightColor) -> Color {
    match color {
        HighlightColor::Yellow => Color::from_rgba8(0xff, 0xe0, 0x66, 0.45),
        HighlightColor::Pink => Color::from_rgba8(0xff, 0x9e, 0xc6, 0.45),
        HighlightColor::Blue => Color::from_rgba8(0x8e, 0xc5, 0xff, 0.45),
        HighlightColor::Green => Color::from_rgba8(0x9b, 0xe2, 0xa8, 0.45),
    }
}

/// Saturated version for the armory buttons and swatches.
fn highlight_tint(color: HighlightColor) -> Color {
    match color {
        HighlightColor::Yellow => Color::from_rgb8(0xe0, 0xb0, 0x00),
        HighlightColor::Pink => Color::from_rgb8(0xe0, 0x4f, 0x8a),
        HighlightColor::Blue => Color::from_rgb8(0x3d, 0x8b, 0xe8),
        HighlightColor::Green => Color::from_rgb8(0x2f, 0xa3, 0x5c),
    }
}

fn snippet(source: &str, max_chars: usize) -> String {
    if source.chars().count() <= max_chars {
        return source.to_string();
    }
    let cut: String = source.chars().take(max_chars).collect();
    format!("{}…", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Paragraph;

    fn paragraph(text: &str) -> Paragraph {
        Paragraph {
            paragraph: 1,
            text: text.to_string(),
            proofs: Vec::new(),
        }
    }

    fn highlight(start: usize, end: usize, color: HighlightColor) -> Highlight {
        Highlight {
            id: format!("h-{start}-{end}"),
            paragraph_id: ParagraphId::new(1, 1),
            text: String::new(),
            color,
            start_offset: start,
            end_offset: end,
        }
    }

    #[test]
    fn runs_cover_the_display_text_exactly() {
        let p = paragraph("La fe{a} viene por el oír.");
        let h = highlight(3, 7, HighlightColor::Yellow);
        let refs = vec![&h];
        let runs = paragraph_runs(&p, &refs);
        let display = p.display_text();
        let mut covered = 0usize;
        for run in &runs {
            if let ParagraphRun::Text { start, end, .. } = run {
                assert_eq!(*start, covered);
                covered = *end;
            }
        }
        assert_eq!(covered, display.len());
    }

    #[test]
    fn highlight_boundaries_split_a_segment() {
        let p = paragraph("abcdefgh");
        let h = highlight(2, 5, HighlightColor::Blue);
        let refs = vec![&h];
        assert_eq!(
            paragraph_runs(&p, &refs),
            vec![
                ParagraphRun::Text {
                    start: 0,
                    end: 2,
                    highlight: None
                },
                ParagraphRun::Text {
                    start: 2,
                    end: 5,
                    highlight: Some(HighlightColor::Blue)
                },
                ParagraphRun::Text {
                    start: 5,
                    end: 8,
                    highlight: None
                },
            ]
        );
    }

    #[test]
    fn overlapping_highlights_keep_the_earliest() {
        let p = paragraph("abcdefgh");
        let first = highlight(1, 5, HighlightColor::Green);
        let second = highlight(3, 7, HighlightColor::Pink);
        let refs = vec![&first, &second];
        let runs = paragraph_runs(&p, &refs);
        assert!(runs.contains(&ParagraphRun::Text {
            start: 1,
            end: 5,
            highlight: Some(HighlightColor::Green)
        }));
        assert!(!runs.iter().any(|r| matches!(
            r,
            ParagraphRun::Text {
                highlight: Some(HighlightColor::Pink),
                ..
            }
        )));
    }

    #[test]
    fn a_highlight_spanning_a_marker_splits_in_two() {
        let p = paragraph("hola{a} mundo");
        // Display text is "hola mundo"; highlight 2..8 crosses the marker.
        let h = highlight(2, 8, HighlightColor::Yellow);
        let refs = vec![&h];
        let runs = paragraph_runs(&p, &refs);
        let highlighted: Vec<_> = runs
            .iter()
            .filter(|r| {
                matches!(
                    r,
                    ParagraphRun::Text {
                        highlight: Some(_),
                        ..
                    }
                )
            })
            .collect();
        assert_eq!(highlighted.len(), 2);
    }

    #[test]
    fn corrupt_stored_offsets_render_as_plain_text() {
        let p = paragraph("años de gracia");
        let display_len = p.display_text().len();
        // Byte 2 falls inside the two-byte "ñ".
        let mid_char = highlight(1, 2, HighlightColor::Pink);
        let out_of_range = highlight(0, display_len + 4, HighlightColor::Blue);
        let refs = vec![&mid_char, &out_of_range];
        assert_eq!(
            paragraph_runs(&p, &refs),
            vec![ParagraphRun::Text {
                start: 0,
                end: display_len,
                highlight: None
            }]
        );
    }

    #[test]
    fn snippet_truncates_with_ellipsis() {
        assert_eq!(snippet("corto", 10), "corto");
        assert_eq!(snippet("abcdefghij", 4), "abcd…");
    }
}
