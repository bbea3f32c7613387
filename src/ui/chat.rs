// Aprende - arithmetic mini-games and a tutor chatbot for the terminal
// Copyright (C) 2025  Simon Peter Rothgang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use super::{input, layout};
use crate::app::{App, Author};
use crate::ui::theme::{self, Theme};
use crate::view::scrollbar::{self, Scrollbar};
use crate::view::VisibleItem;
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};
use std::sync::Arc;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Bubble width in design-space columns.
const BUBBLE_WIDTH: f32 = 70.0;
/// Columns of padding on each side of the bubble text.
const BUBBLE_PAD: u16 = 1;
/// Rows around the wrapped text: author label above, spacer below.
const BUBBLE_CHROME: u32 = 2;
const USER_LABEL: &str = "Tú";
const BOT_LABEL: &str = "Profe";
const THINKING_TEXT: &str = "Pensando…";

/// Greedy word wrap to `width` display columns. Explicit newlines start a
/// new row; words wider than a row are split.
#[must_use]
pub fn wrap_text(text: &str, width: u16) -> Vec<String> {
    let width = usize::from(width.max(1));
    let mut rows = Vec::new();
    for paragraph in text.lines() {
        let mut row = String::new();
        let mut row_width = 0;
        for word in paragraph.split_whitespace() {
            let word_width = word.width();
            if row_width > 0 && row_width + 1 + word_width <= width {
                row.push(' ');
                row.push_str(word);
                row_width += 1 + word_width;
                continue;
            }
            if row_width > 0 {
                rows.push(std::mem::take(&mut row));
                row_width = 0;
            }
            if word_width <= width {
                row.push_str(word);
                row_width = word_width;
                continue;
            }
            for c in word.chars() {
                let char_width = c.width().unwrap_or(0);
                if row_width > 0 && row_width + char_width > width {
                    rows.push(std::mem::take(&mut row));
                    row_width = 0;
                }
                row.push(c);
                row_width += char_width;
            }
        }
        rows.push(row);
    }
    if rows.is_empty() {
        rows.push(String::new());
    }
    rows
}

fn rows_to_height(rows: usize) -> u32 {
    u32::try_from(rows).unwrap_or(u32::MAX).saturating_add(BUBBLE_CHROME)
}

/// Render the chat body: virtualized bubbles, scrollbar, input line.
pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
    let areas = layout::chat(area);
    let theme = app.theme;
    let chat = &mut app.chat;

    if chat.scale.update_area(areas.messages) {
        chat.bubbles.clear();
    }
    chat.viewport = areas.messages;
    chat.track = areas.scrollbar;

    let bubble_width = chat.scale.cells_x(BUBBLE_WIDTH).clamp(1, areas.messages.width.max(1));
    let text_width = bubble_width.saturating_sub(BUBBLE_PAD * 2).max(1);

    let trailer = chat.is_waiting().then(|| rows_to_height(1));
    let viewport = u32::from(areas.messages.height);
    let bubbles = &chat.bubbles;
    // Positions past the end are clamped inside the scan, so the window is
    // already the one for the clamped offset below.
    let window = chat.store.visible_window_with_trailer(
        chat.scroll.offset(),
        viewport,
        |entry| {
            let rows = bubbles.get_or_insert_with((entry.seq, text_width), || {
                wrap_text(&entry.text, text_width).into()
            });
            rows_to_height(rows.len())
        },
        trailer,
    );
    let total = window.total_height;
    chat.scroll.set_max_scroll(window.max_scroll(viewport));
    if chat.follow_end && !chat.scroll.is_dragging() {
        chat.scroll.scroll_to_end();
    }

    if total == 0 {
        render_welcome(frame, areas.messages, &theme, chat.has_backend());
    }

    for item in &window.items {
        let (author, rows) = match chat.store.get(item.index) {
            Some(entry) => {
                let rows = chat
                    .bubbles
                    .get(&(entry.seq, text_width))
                    .unwrap_or_else(|| wrap_text(&entry.text, text_width).into());
                (entry.author, rows)
            }
            None => (Author::Bot, Arc::from(vec![THINKING_TEXT.to_owned()])),
        };
        let x = match author {
            Author::User => areas.messages.right().saturating_sub(bubble_width),
            Author::Bot => areas.messages.x,
        };
        let lines = bubble_lines(author, &rows, text_width, &theme);
        blit_item(frame.buffer_mut(), areas.messages, item, lines, x, bubble_width);
    }

    let thumb = scrollbar::thumb_geometry(areas.scrollbar, total, viewport, chat.scroll.position());
    chat.thumb = thumb;
    frame.render_widget(
        Scrollbar::new(thumb)
            .track_style(Style::default().fg(theme.dim))
            .thumb_style(Style::default().fg(theme.accent)),
        areas.scrollbar,
    );

    if areas.input_sep.height > 0 {
        let sep = theme::SEPARATOR_CHAR.repeat(usize::from(areas.input_sep.width));
        frame.render_widget(
            Paragraph::new(Span::styled(sep, Style::default().fg(theme.dim))),
            areas.input_sep,
        );
    }
    input::render(frame, areas.input, &app.chat, &theme);
}

fn bubble_lines(author: Author, rows: &[String], text_width: u16, theme: &Theme) -> Vec<Line<'static>> {
    let (label, bg) = match author {
        Author::User => (USER_LABEL, theme.user_bubble),
        Author::Bot => (BOT_LABEL, theme.bot_bubble),
    };
    let label_style = Style::default().fg(theme.accent).add_modifier(Modifier::BOLD);
    let label = Line::from(Span::styled(label, label_style));
    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(match author {
        Author::User => label.right_aligned(),
        Author::Bot => label,
    });
    let pad = " ".repeat(usize::from(BUBBLE_PAD));
    for row in rows {
        let fill = usize::from(text_width).saturating_sub(row.width());
        lines.push(Line::from(Span::styled(
            format!("{pad}{row}{}{pad}", " ".repeat(fill)),
            Style::default().fg(theme.text).bg(bg),
        )));
    }
    lines.push(Line::default());
    lines
}

/// Draw one list item offscreen at full height, then copy only its visible
/// rows into the viewport.
fn blit_item(
    buf: &mut Buffer,
    viewport: Rect,
    item: &VisibleItem,
    lines: Vec<Line<'static>>,
    x: u16,
    width: u16,
) {
    let height = u16::try_from(item.height).unwrap_or(u16::MAX);
    let scratch_area = Rect::new(0, 0, width, height);
    let mut scratch = Buffer::empty(scratch_area);
    Paragraph::new(lines).render(scratch_area, &mut scratch);

    let dest_top = viewport.y.saturating_add(u16::try_from(item.top.max(0)).unwrap_or(u16::MAX));
    let clip_top = u16::try_from(item.clip_top).unwrap_or(u16::MAX);
    let rows = u16::try_from(item.visible_rows).unwrap_or(u16::MAX);
    for row in 0..rows {
        let dest_y = dest_top.saturating_add(row);
        if dest_y >= viewport.bottom() {
            break;
        }
        for col in 0..width {
            let dest_x = x.saturating_add(col);
            if dest_x >= viewport.right() {
                break;
            }
            if let Some(src) = scratch.cell((col, clip_top.saturating_add(row)))
                && let Some(dest) = buf.cell_mut((dest_x, dest_y))
            {
                *dest = src.clone();
            }
        }
    }
}

fn render_welcome(frame: &mut Frame, area: Rect, theme: &Theme, has_backend: bool) {
    let mut lines = vec![
        Line::default(),
        Line::from(Span::styled(
            "¡Hola! Soy tu tutor de matemáticas.",
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Escribe una pregunta y pulsa Enter.",
            Style::default().fg(theme.dim),
        )),
    ];
    if !has_backend {
        lines.push(Line::from(Span::styled(
            "(No hay ningún servicio de chat configurado.)",
            Style::default().fg(theme.wrong),
        )));
    }
    frame.render_widget(Paragraph::new(lines).centered(), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn wrap_breaks_on_words() {
        assert_eq!(wrap_text("uno dos tres", 7), vec!["uno dos", "tres"]);
    }

    #[test]
    fn wrap_splits_long_words() {
        assert_eq!(wrap_text("abcdefgh", 3), vec!["abc", "def", "gh"]);
    }

    #[test]
    fn wrap_keeps_paragraphs() {
        assert_eq!(wrap_text("a\n\nb", 10), vec!["a", "", "b"]);
    }

    #[test]
    fn wrap_empty_text_is_one_row() {
        assert_eq!(wrap_text("", 10), vec![String::new()]);
    }

    #[test]
    fn wrap_counts_wide_chars() {
        assert_eq!(wrap_text("好好好", 4), vec!["好好", "好"]);
    }

    #[test]
    fn blit_copies_only_visible_rows() {
        let viewport = Rect::new(0, 0, 4, 2);
        let mut buf = Buffer::empty(viewport);
        let item =
            VisibleItem { index: 0, top: -1, height: 3, clip_top: 1, visible_rows: 2 };
        let lines = vec![Line::from("aaaa"), Line::from("bbbb"), Line::from("cccc")];
        blit_item(&mut buf, viewport, &item, lines, 0, 4);
        assert_eq!(buf[(0, 0)].symbol(), "b");
        assert_eq!(buf[(3, 1)].symbol(), "c");
    }
}
