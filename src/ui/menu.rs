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

use crate::app::{App, MENU_ENTRIES, Screen};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

/// Image name looked up under `imagenes` for the home screen.
pub const MASCOT_IMAGE: &str = "mascota";

const DEFAULT_MASCOT: &[&str] = &["  ,___,  ", "  (O,O)  ", "  /)_)   ", "   \"\"    "];

fn description(screen: Screen) -> &'static str {
    match screen {
        Screen::Quiz => "sumas, restas, multiplicaciones y divisiones",
        Screen::Memory => "encuentra cada operación con su resultado",
        Screen::Chat => "pregúntale a tu tutor",
        Screen::Menu => "",
    }
}

pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
    let menu = &mut app.menu;
    menu.scale.update_area(area);
    let panel = menu.scale.centered_rect(64.0, 26.0, 0.0, 0.0);

    let art: Vec<String> = if app.media.images.contains(MASCOT_IMAGE) {
        app.media.images.get(MASCOT_IMAGE).to_vec()
    } else {
        DEFAULT_MASCOT.iter().map(|&l| l.to_owned()).collect()
    };
    let entry_rows = u16::try_from(MENU_ENTRIES.len() * 2).unwrap_or(u16::MAX);

    let [title, _, art_area, _, entries_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(entry_rows),
    ])
    .areas(panel);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "¡Aprende jugando!",
            Style::default().fg(app.theme.accent).add_modifier(Modifier::BOLD),
        )))
        .centered(),
        title,
    );

    let art_lines: Vec<Line> = art
        .into_iter()
        .take(usize::from(art_area.height))
        .map(|l| Line::from(Span::styled(l, Style::default().fg(app.theme.text))))
        .collect();
    frame.render_widget(Paragraph::new(art_lines).centered(), art_area);

    menu.entry_areas.clear();
    for (index, screen) in MENU_ENTRIES.into_iter().enumerate() {
        let y = entries_area.y + u16::try_from(index * 2).unwrap_or(u16::MAX);
        if y >= entries_area.bottom() {
            break;
        }
        let row = Rect::new(entries_area.x, y, entries_area.width, 1);
        let selected = index == menu.selected;
        let marker = if selected { "▶" } else { " " };
        let style = if selected {
            Style::default().fg(app.theme.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text)
        };
        let line = Line::from(vec![
            Span::styled(format!("{marker} {}. {}", index + 1, screen.title()), style),
            Span::styled(format!("  {}", description(screen)), Style::default().fg(app.theme.dim)),
        ]);
        frame.render_widget(Paragraph::new(line), row);
        menu.entry_areas.push((screen, row));
    }
}
