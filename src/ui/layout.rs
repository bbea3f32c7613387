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

use ratatui::layout::{Constraint, Layout, Rect};

pub struct AppLayout {
    pub nav: Rect,
    pub nav_sep: Rect,
    pub body: Rect,
    pub footer: Option<Rect>,
}

pub fn compute(area: Rect) -> AppLayout {
    if area.height < 6 {
        // Ultra-compact: no separator, no footer
        let [nav, body] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);
        AppLayout { nav, nav_sep: Rect::new(area.x, body.y, area.width, 0), body, footer: None }
    } else {
        let [nav, nav_sep, body, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(area);
        AppLayout { nav, nav_sep, body, footer: Some(footer) }
    }
}

pub struct ChatLayout {
    pub messages: Rect,
    pub scrollbar: Rect,
    pub input_sep: Rect,
    pub input: Rect,
}

/// Split the chat body into message viewport, scrollbar column and the
/// input line underneath.
pub fn chat(body: Rect) -> ChatLayout {
    let [content, input_sep, input] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(u16::from(body.height >= 3)),
        Constraint::Length(1),
    ])
    .areas(body);
    let [messages, scrollbar] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(1)]).areas(content);
    ChatLayout { messages, scrollbar, input_sep, input }
}
