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

use crate::app::{App, Screen};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

const TAB_GAP: u16 = 1;

fn tab_label(index: usize, screen: Screen) -> String {
    format!(" F{} {} ", index + 1, screen.title())
}

/// Draw the tab strip and record each tab's clickable area.
pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
    app.nav_areas.clear();
    let mut spans = Vec::with_capacity(Screen::ALL.len() * 2);
    let mut x = area.x;
    for (index, screen) in Screen::ALL.into_iter().enumerate() {
        let label = tab_label(index, screen);
        let width = u16::try_from(label.width()).unwrap_or(u16::MAX);
        let visible = width.min(area.right().saturating_sub(x));
        if visible > 0 {
            app.nav_areas.push((screen, Rect::new(x, area.y, visible, area.height.min(1))));
        }
        let style = if screen == app.screen {
            Style::default().fg(Color::Black).bg(app.theme.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text)
        };
        spans.push(Span::styled(label, style));
        spans.push(Span::raw(" ".repeat(usize::from(TAB_GAP))));
        x = x.saturating_add(width + TAB_GAP);
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
