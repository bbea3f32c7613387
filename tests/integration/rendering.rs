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

use aprende::app::{Author, Screen};
use crossterm::event::{KeyCode, MouseButton, MouseEventKind};
use pretty_assertions::assert_eq;

use crate::helpers::{
    CannedBackend, config_from, mouse, press, render_frame_to_string, settle, test_app,
    test_app_with, type_text,
};

fn last_column(frame: &str) -> String {
    frame.lines().filter_map(|line| line.chars().last()).collect()
}

fn click(app: &mut aprende::app::App, column: u16, row: u16) {
    mouse(app, MouseEventKind::Down(MouseButton::Left), column, row);
    mouse(app, MouseEventKind::Up(MouseButton::Left), column, row);
}

#[test]
fn menu_shows_title_entries_and_tabs() {
    let mut app = test_app();
    let frame = render_frame_to_string(&mut app, 100, 30);
    assert!(frame.contains("¡Aprende jugando!"));
    for screen in Screen::ALL {
        assert!(frame.contains(screen.title()), "missing tab {}", screen.title());
    }
    assert!(frame.contains("▶ 1."));
    assert_eq!(app.nav_areas.len(), Screen::ALL.len());
}

#[test]
fn clicking_a_tab_switches_screen() {
    let mut app = test_app();
    render_frame_to_string(&mut app, 100, 30);
    let (_, area) = app
        .nav_areas
        .iter()
        .copied()
        .find(|(screen, _)| *screen == Screen::Memory)
        .expect("memory tab drawn");
    click(&mut app, area.x + 1, area.y);
    assert_eq!(app.screen, Screen::Memory);
    assert!(render_frame_to_string(&mut app, 100, 30).contains("Parejas 0/"));
}

#[test]
fn chat_renders_both_authors_and_welcome() {
    let mut app = test_app();
    press(&mut app, KeyCode::F(4));
    let empty = render_frame_to_string(&mut app, 80, 24);
    assert!(empty.contains("Escribe tu pregunta"));

    type_text(&mut app, "hola");
    press(&mut app, KeyCode::Enter);
    let frame = render_frame_to_string(&mut app, 80, 24);
    assert!(frame.contains("hola"));
    let bot = app.chat.store.last().expect("bot answer");
    assert_eq!(bot.author, Author::Bot);
    let first_words: String = bot.text.split_whitespace().take(2).collect::<Vec<_>>().join(" ");
    assert!(frame.contains(&first_words), "frame:\n{frame}");
}

#[test]
fn scrollbar_appears_only_when_history_overflows() {
    let mut app = test_app();
    press(&mut app, KeyCode::F(4));
    type_text(&mut app, "una");
    press(&mut app, KeyCode::Enter);
    let short = render_frame_to_string(&mut app, 80, 24);
    assert!(!last_column(&short).contains('█'));

    for i in 0..15 {
        type_text(&mut app, &format!("pregunta {i}"));
        press(&mut app, KeyCode::Enter);
    }
    settle(&mut app, 80, 24);
    let long = render_frame_to_string(&mut app, 80, 24);
    assert!(last_column(&long).contains('█'), "frame:\n{long}");
    assert!(app.chat.thumb.is_some());
}

#[test]
fn quiz_uses_block_digits_only_on_large_windows() {
    let mut app = test_app();
    press(&mut app, KeyCode::F(2));
    let large = render_frame_to_string(&mut app, 200, 60);
    assert!(large.contains('█'), "frame:\n{large}");

    let mut small_app = test_app();
    press(&mut small_app, KeyCode::F(2));
    let small = render_frame_to_string(&mut small_app, 80, 24);
    assert!(!small.contains('█'));
    assert!(small.contains("= ?"));
}

#[test]
fn clicking_an_option_answers_the_quiz() {
    let mut app = test_app();
    press(&mut app, KeyCode::F(2));
    render_frame_to_string(&mut app, 100, 30);
    let problem = app.quiz.game.problem().clone();
    let right = problem
        .options
        .iter()
        .position(|&v| v == problem.answer)
        .expect("answer among options");
    let rect = app.quiz.option_areas[right];
    click(&mut app, rect.x + rect.width / 2, rect.y + 1);

    assert_eq!(app.quiz.game.score(), 1);
    let frame = render_frame_to_string(&mut app, 100, 30);
    assert!(frame.contains("¡Correcto!"));
}

#[test]
fn wrong_option_reveals_the_answer() {
    let mut app = test_app();
    press(&mut app, KeyCode::F(2));
    let problem = app.quiz.game.problem().clone();
    let wrong = problem
        .options
        .iter()
        .position(|&v| v != problem.answer)
        .expect("a distractor");
    press(&mut app, KeyCode::Char(['a', 'b', 'c', 'd'][wrong]));
    let frame = render_frame_to_string(&mut app, 100, 30);
    assert!(frame.contains(&format!("La respuesta era {}", problem.answer)));
}

#[test]
fn memory_shows_win_banner() {
    let mut app = test_app();
    press(&mut app, KeyCode::F(3));
    let pairs = app.memory.game.pairs();
    for pair in 0..pairs {
        let indices: Vec<usize> = app
            .memory
            .game
            .cards()
            .iter()
            .enumerate()
            .filter(|(_, card)| card.pair == pair)
            .map(|(i, _)| i)
            .collect();
        for index in indices {
            app.memory.game.reveal(index);
        }
    }
    assert!(app.memory.game.is_won());
    let frame = render_frame_to_string(&mut app, 100, 30);
    assert!(frame.contains(&format!("¡Ganaste en {pairs} movimientos!")), "frame:\n{frame}");
}

#[test]
fn tiny_terminal_does_not_panic() {
    let mut app = test_app();
    for screen in Screen::ALL {
        app.switch_to(screen);
        for (w, h) in [(10, 3), (20, 5), (300, 90)] {
            render_frame_to_string(&mut app, w, h);
        }
    }
}

#[test]
fn configured_theme_is_applied() {
    let config = config_from(r##"{ "colores": { "acento": "#ff0000" } }"##);
    let app = aprende::app::App::new(&config, aprende::media::Media::silent(), None, 1);
    assert_eq!(app.theme.accent, ratatui::style::Color::Rgb(255, 0, 0));
}

#[tokio::test]
async fn pending_reply_shows_thinking_bubble() {
    let mut app = test_app_with(CannedBackend::ok("vale"));
    press(&mut app, KeyCode::F(4));
    type_text(&mut app, "hola");
    press(&mut app, KeyCode::Enter);
    let waiting = render_frame_to_string(&mut app, 80, 24);
    assert!(waiting.contains("Pensando"), "frame:\n{waiting}");

    tokio::time::timeout(std::time::Duration::from_secs(5), async {
        while app.chat.poll_new_messages().is_empty() {
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("reply within timeout");
    let answered = render_frame_to_string(&mut app, 80, 24);
    assert!(!answered.contains("Pensando"));
    assert!(answered.contains("vale"));
}
