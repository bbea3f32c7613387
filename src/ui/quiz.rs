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

use super::big_digits;
use crate::app::App;
use crate::games::Feedback;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

/// Problem text size in design-space points.
const PROBLEM_FONT: f32 = 20.0;
/// Scaled size from which the problem is drawn with block digits.
const BLOCK_DIGITS_MIN_FONT: u16 = 24;
const OPTION_LABELS: [char; 4] = ['a', 'b', 'c', 'd'];

pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
    let theme = app.theme;
    let quiz = &mut app.quiz;
    quiz.scale.update_area(area);
    let panel = quiz.scale.centered_rect(80.0, 26.0, 0.0, 0.0);
    let game = &quiz.game;

    let problem_text = format!("{} = ?", game.problem().expression());
    let big = quiz.scale.scale_font(PROBLEM_FONT) >= BLOCK_DIGITS_MIN_FONT
        && big_digits::width(&problem_text) <= usize::from(panel.width);
    let problem_height = if big { big_digits::GLYPH_HEIGHT as u16 } else { 1 };

    let [header, _, problem, _, answer, _, options, _, feedback] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(problem_height),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(panel);

    let header_line = Line::from(vec![
        Span::styled(
            game.operation().title(),
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(
                "  ·  Nivel {}  ·  Puntos {}/{}  ·  Racha {}",
                game.level(),
                game.score(),
                game.attempts(),
                game.streak()
            ),
            Style::default().fg(theme.dim),
        ),
    ]);
    frame.render_widget(Paragraph::new(header_line).centered(), header);

    let problem_style = Style::default().fg(theme.text).add_modifier(Modifier::BOLD);
    let problem_lines: Vec<Line> = if big {
        big_digits::render(&problem_text)
            .into_iter()
            .map(|row| Line::from(Span::styled(row, problem_style)))
            .collect()
    } else {
        vec![Line::from(Span::styled(problem_text, problem_style))]
    };
    frame.render_widget(Paragraph::new(problem_lines).centered(), problem);

    let typed = if game.typed().is_empty() { "_" } else { game.typed() };
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Respuesta: ", Style::default().fg(theme.dim)),
            Span::styled(typed.to_owned(), Style::default().fg(theme.accent)),
        ]))
        .centered(),
        answer,
    );

    let boxes: [Rect; 4] = Layout::horizontal([Constraint::Ratio(1, 4); 4]).spacing(1).areas(options);
    quiz.option_areas.clear();
    for ((label, value), rect) in OPTION_LABELS.iter().zip(game.problem().options).zip(boxes) {
        let block = Block::bordered().border_style(Style::default().fg(theme.dim));
        frame.render_widget(
            Paragraph::new(format!("{label}) {value}")).centered().block(block),
            rect,
        );
        quiz.option_areas.push(rect);
    }

    if let Some(result) = game.feedback() {
        let color = match result {
            Feedback::Correct => theme.correct,
            Feedback::Wrong { .. } => theme.wrong,
        };
        frame.render_widget(
            Paragraph::new(Span::styled(
                result.message(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))
            .centered(),
            feedback,
        );
    }
}
