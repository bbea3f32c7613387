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

use crate::app::App;
use crate::games::memory::COLUMNS;
use crate::games::{Card, CardState};
use crate::ui::theme::Theme;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};

/// Tallest card, in rows.
const MAX_CARD_HEIGHT: u16 = 5;
const GAP: u16 = 1;

fn card_style(card: &Card, theme: &Theme) -> (Style, String) {
    match card.state {
        CardState::Hidden => (Style::default().fg(theme.text).bg(theme.card_back), "?".to_owned()),
        CardState::Revealed => {
            (Style::default().fg(Color::Black).bg(theme.card_face), card.label.clone())
        }
        CardState::Matched => (
            Style::default().fg(theme.correct).add_modifier(Modifier::BOLD),
            card.label.clone(),
        ),
    }
}

/// Card rectangles for a `count`-card grid inside `grid`, in card order.
fn card_rects(grid: Rect, count: usize) -> Vec<Rect> {
    if count == 0 || grid.width == 0 || grid.height == 0 {
        return Vec::new();
    }
    let columns = u16::try_from(COLUMNS.min(count)).unwrap_or(1);
    let rows = u16::try_from(count.div_ceil(COLUMNS)).unwrap_or(u16::MAX);
    let card_w = (grid.width.saturating_sub(GAP * (columns - 1)) / columns).max(1);
    let card_h = (grid.height.saturating_sub(GAP * (rows - 1)) / rows).clamp(1, MAX_CARD_HEIGHT);
    let used_w = card_w * columns + GAP * (columns - 1);
    let x0 = grid.x + grid.width.saturating_sub(used_w) / 2;

    (0..count)
        .map_while(|index| {
            let col = u16::try_from(index % COLUMNS).ok()?;
            let row = u16::try_from(index / COLUMNS).ok()?;
            let y = grid.y + row * (card_h + GAP);
            (y + card_h <= grid.bottom())
                .then(|| Rect::new(x0 + col * (card_w + GAP), y, card_w, card_h))
        })
        .collect()
}

pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
    let theme = app.theme;
    let memory = &mut app.memory;
    memory.scale.update_area(area);
    let panel = memory.scale.centered_rect(90.0, 26.0, 0.0, 0.0);
    let game = &memory.game;

    let [header, _, grid, banner] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(panel);

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Memoria", Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)),
            Span::styled(
                format!(
                    "  ·  Parejas {}/{}  ·  Movimientos {}",
                    game.matched_pairs(),
                    game.pairs(),
                    game.moves()
                ),
                Style::default().fg(theme.dim),
            ),
        ]))
        .centered(),
        header,
    );

    memory.card_areas = card_rects(grid, game.cards().len());
    for (index, (card, rect)) in game.cards().iter().zip(&memory.card_areas).enumerate() {
        let (style, label) = card_style(card, &theme);
        let focused = index == game.cursor();
        let border = if focused {
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.dim)
        };
        let block = Block::bordered()
            .border_type(if focused { BorderType::Thick } else { BorderType::Rounded })
            .border_style(border)
            .style(style);
        let inner_height = rect.height.saturating_sub(2);
        let mut lines = vec![Line::default(); usize::from(inner_height.saturating_sub(1) / 2)];
        lines.push(Line::from(label));
        frame.render_widget(Paragraph::new(lines).centered().block(block), *rect);
    }

    if game.is_won() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                format!("¡Ganaste en {} movimientos! Pulsa r para jugar otra vez.", game.moves()),
                Style::default().fg(theme.correct).add_modifier(Modifier::BOLD),
            ))
            .centered(),
            banner,
        );
    }
}
