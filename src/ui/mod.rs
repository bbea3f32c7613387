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

pub mod big_digits;
mod chat;
mod input;
mod layout;
mod memory;
mod menu;
mod nav;
mod quiz;
pub mod theme;

pub use chat::wrap_text;

use crate::app::{App, Screen};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

pub fn render(frame: &mut Frame, app: &mut App) {
    let areas = layout::compute(frame.area());

    nav::render(frame, areas.nav, app);
    render_separator(frame, areas.nav_sep, app);

    match app.screen {
        Screen::Menu => menu::render(frame, areas.body, app),
        Screen::Quiz => quiz::render(frame, areas.body, app),
        Screen::Memory => memory::render(frame, areas.body, app),
        Screen::Chat => chat::render(frame, areas.body, app),
    }

    if let Some(footer) = areas.footer {
        render_footer(frame, footer, app);
    }
}

const FOOTER_PAD: u16 = 2;

fn footer_hint(app: &App) -> &'static str {
    match app.screen {
        Screen::Menu => "↑↓ elegir · Enter abrir · F1-F4 pestañas · q salir",
        Screen::Quiz => "escribe y Enter · a-d opciones · + - * / operación · Esc menú",
        Screen::Memory => "flechas mover · Enter/Espacio voltear · r repartir · Esc menú",
        Screen::Chat => {
            if app.chat.is_waiting() {
                "pensando... · rueda/RePág/AvPág desplazar · Esc menú"
            } else {
                "Enter enviar · rueda/RePág/AvPág desplazar · Ctrl+L borrar · Esc menú"
            }
        }
    }
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let padded = Rect {
        x: area.x + FOOTER_PAD.min(area.width),
        y: area.y,
        width: area.width.saturating_sub(FOOTER_PAD * 2),
        height: area.height,
    };
    let line = Line::from(Span::styled(footer_hint(app), Style::default().fg(app.theme.dim)));
    frame.render_widget(Paragraph::new(line), padded);
}

fn render_separator(frame: &mut Frame, area: Rect, app: &App) {
    if area.height == 0 {
        return;
    }
    let sep_str = theme::SEPARATOR_CHAR.repeat(area.width as usize);
    let line = Line::from(Span::styled(sep_str, Style::default().fg(app.theme.dim)));
    frame.render_widget(Paragraph::new(line), area);
}
