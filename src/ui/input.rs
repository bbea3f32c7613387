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

use crate::app::ChatScreen;
use crate::ui::theme::{self, Theme};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::Paragraph;

/// Horizontal padding to match the footer inset.
const INPUT_PAD: u16 = 2;

/// Prompt prefix width: "❯ " = 2 columns
const PROMPT_WIDTH: u16 = 2;

/// Columns to skip so the cursor stays inside a field `content_width` wide.
fn horizontal_scroll(cursor_width: usize, content_width: usize) -> usize {
    cursor_width.saturating_sub(content_width.saturating_sub(1))
}

pub fn render(frame: &mut Frame, area: Rect, chat: &ChatScreen, theme: &Theme) {
    let padded = Rect {
        x: area.x + INPUT_PAD.min(area.width),
        y: area.y,
        width: area.width.saturating_sub(INPUT_PAD * 2),
        height: area.height,
    };
    if padded.width <= PROMPT_WIDTH || padded.height == 0 {
        return;
    }
    let prompt_area = Rect { width: PROMPT_WIDTH, ..padded };
    let text_area = Rect {
        x: padded.x + PROMPT_WIDTH,
        width: padded.width - PROMPT_WIDTH,
        ..padded
    };

    frame.render_widget(
        Paragraph::new(Span::styled(
            format!("{} ", theme::PROMPT_CHAR),
            Style::default().fg(theme.accent),
        )),
        prompt_area,
    );

    if chat.is_waiting() {
        frame.render_widget(
            Paragraph::new(Span::styled("Esperando respuesta…", Style::default().fg(theme.dim))),
            text_area,
        );
        return;
    }

    if chat.input.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled("Escribe tu pregunta…", Style::default().fg(theme.dim))),
            text_area,
        );
        frame.set_cursor_position((text_area.x, text_area.y));
        return;
    }

    let cursor_width = chat.input.cursor_width();
    let skip = horizontal_scroll(cursor_width, usize::from(text_area.width));
    let skip_cols = u16::try_from(skip).unwrap_or(u16::MAX);
    frame.render_widget(
        Paragraph::new(Span::styled(chat.input.text().to_owned(), Style::default().fg(theme.text)))
            .scroll((0, skip_cols)),
        text_area,
    );
    let cursor_x = u16::try_from(cursor_width - skip).unwrap_or(u16::MAX);
    frame.set_cursor_position((text_area.x.saturating_add(cursor_x), text_area.y));
}
