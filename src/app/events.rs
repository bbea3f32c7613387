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

use super::chat::SubmitOutcome;
use super::state::{App, MENU_ENTRIES, Screen};
use crate::games::{AnswerOutcome, Feedback, Operation, RevealOutcome};
use crate::media::{SOUND_CORRECT, SOUND_MATCH, SOUND_WIN, SOUND_WRONG};
use crate::view::scrollbar::{self, ScrollbarHit};
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Position, Rect};

const MOUSE_SCROLL_LINES: f32 = 3.0;
/// Option keys in the quiz, matching the on-screen labels.
const OPTION_KEYS: [char; 4] = ['a', 'b', 'c', 'd'];

pub fn handle_terminal_event(app: &mut App, event: Event) {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
        Event::Mouse(mouse) => handle_mouse(app, mouse),
        Event::Paste(text) if app.screen == Screen::Chat => app.chat.input.insert_str(&text),
        // Resize is picked up by each screen's scale engine on the next frame
        _ => {}
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), m) if m.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }
        (KeyCode::F(n @ 1..=4), _) => app.switch_to(Screen::ALL[usize::from(n - 1)]),
        (KeyCode::Tab, _) => app.switch_to(app.screen.next()),
        (KeyCode::BackTab, _) => app.switch_to(app.screen.prev()),
        (KeyCode::Esc, _) => app.switch_to(Screen::Menu),
        _ => match app.screen {
            Screen::Menu => handle_menu_key(app, key),
            Screen::Quiz => handle_quiz_key(app, key),
            Screen::Memory => handle_memory_key(app, key),
            Screen::Chat => handle_chat_key(app, key),
        },
    }
}

fn handle_menu_key(app: &mut App, key: KeyEvent) {
    let count = MENU_ENTRIES.len();
    match key.code {
        KeyCode::Up => app.menu.selected = (app.menu.selected + count - 1) % count,
        KeyCode::Down => app.menu.selected = (app.menu.selected + 1) % count,
        KeyCode::Enter | KeyCode::Char(' ') => {
            if let Some(&screen) = MENU_ENTRIES.get(app.menu.selected) {
                app.switch_to(screen);
            }
        }
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char(c @ '1'..='9') => {
            let index = usize::from(c as u8 - b'1');
            if let Some(&screen) = MENU_ENTRIES.get(index) {
                app.menu.selected = index;
                app.switch_to(screen);
            }
        }
        _ => {}
    }
}

fn handle_quiz_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char(c) if c.is_ascii_digit() => app.quiz.game.push_digit(c),
        KeyCode::Backspace => app.quiz.game.pop_digit(),
        KeyCode::Enter => {
            if let Some(outcome) = app.quiz.game.submit_typed() {
                after_quiz_answer(app, outcome);
            }
        }
        KeyCode::Char(c) => {
            if let Some(index) = OPTION_KEYS.iter().position(|&k| k == c) {
                if let Some(outcome) = app.quiz.game.choose(index) {
                    after_quiz_answer(app, outcome);
                }
            } else if let Some(operation) = Operation::from_key(c) {
                set_quiz_operation(app, operation);
            }
        }
        _ => {}
    }
}

fn set_quiz_operation(app: &mut App, operation: Operation) {
    if operation == app.quiz.game.operation() {
        return;
    }
    app.quiz.game.set_operation(operation);
    app.media.speech.speak(&app.quiz.game.problem().question());
}

fn after_quiz_answer(app: &mut App, outcome: AnswerOutcome) {
    app.media.sounds.play(if outcome.correct { SOUND_CORRECT } else { SOUND_WRONG });
    let feedback = app.quiz.game.feedback().map(Feedback::message).unwrap_or_default();
    let question = app.quiz.game.problem().question();
    app.media.speech.speak(&format!("{feedback} {question}"));
}

fn handle_memory_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Left => app.memory.game.move_cursor(-1, 0),
        KeyCode::Right => app.memory.game.move_cursor(1, 0),
        KeyCode::Up => app.memory.game.move_cursor(0, -1),
        KeyCode::Down => app.memory.game.move_cursor(0, 1),
        KeyCode::Enter | KeyCode::Char(' ') => {
            let outcome = app.memory.game.reveal_cursor();
            after_reveal(app, outcome);
        }
        KeyCode::Char('r') => app.memory.game.deal(),
        _ => {}
    }
}

fn after_reveal(app: &mut App, outcome: RevealOutcome) {
    match outcome {
        RevealOutcome::Matched { finished: true } => {
            app.media.sounds.play(SOUND_WIN);
            app.media.speech.speak("¡Ganaste!");
        }
        RevealOutcome::Matched { finished: false } => app.media.sounds.play(SOUND_MATCH),
        RevealOutcome::Mismatch => app.media.sounds.play(SOUND_WRONG),
        RevealOutcome::First | RevealOutcome::Ignored => {}
    }
}

fn handle_chat_key(app: &mut App, key: KeyEvent) {
    let chat = &mut app.chat;
    match (key.code, key.modifiers) {
        (KeyCode::Enter, _) => {
            let outcome = chat.submit();
            tracing::debug!(?outcome, "chat submit");
            if outcome == SubmitOutcome::Sent {
                chat.scroll_to_end();
            }
        }
        (KeyCode::Char('l'), m) if m.contains(KeyModifiers::CONTROL) => chat.clear_history(),
        (KeyCode::Char('a'), m) if m.contains(KeyModifiers::CONTROL) => chat.input.move_home(),
        (KeyCode::Char('e'), m) if m.contains(KeyModifiers::CONTROL) => chat.input.move_end(),
        (KeyCode::Char(c), m) if !m.contains(KeyModifiers::CONTROL) => chat.input.insert_char(c),
        (KeyCode::Backspace, _) => chat.input.delete_char_before(),
        (KeyCode::Delete, _) => chat.input.delete_char_after(),
        (KeyCode::Left, _) => chat.input.move_left(),
        (KeyCode::Right, _) => chat.input.move_right(),
        (KeyCode::Up, _) => chat.scroll_by(-1.0),
        (KeyCode::Down, _) => chat.scroll_by(1.0),
        (KeyCode::PageUp, _) => {
            let rows = chat.page_rows();
            chat.scroll_by(-rows);
        }
        (KeyCode::PageDown, _) => {
            let rows = chat.page_rows();
            chat.scroll_by(rows);
        }
        (KeyCode::Home, _) => chat.scroll_to(0.0),
        (KeyCode::End, _) => chat.scroll_to_end(),
        _ => {}
    }
}

fn hit<T: Copy>(areas: &[(T, Rect)], column: u16, row: u16) -> Option<T> {
    let point = Position::new(column, row);
    areas.iter().find(|(_, area)| area.contains(point)).map(|(value, _)| *value)
}

fn hit_index(areas: &[Rect], column: u16, row: u16) -> Option<usize> {
    let point = Position::new(column, row);
    areas.iter().position(|area| area.contains(point))
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let (column, row) = (mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(screen) = hit(&app.nav_areas, column, row) {
                app.switch_to(screen);
                return;
            }
            match app.screen {
                Screen::Menu => {
                    if let Some(screen) = hit(&app.menu.entry_areas, column, row) {
                        app.switch_to(screen);
                    }
                }
                Screen::Quiz => {
                    if let Some(index) = hit_index(&app.quiz.option_areas, column, row)
                        && let Some(outcome) = app.quiz.game.choose(index)
                    {
                        after_quiz_answer(app, outcome);
                    }
                }
                Screen::Memory => {
                    if let Some(index) = hit_index(&app.memory.card_areas, column, row) {
                        let outcome = app.memory.game.reveal(index);
                        after_reveal(app, outcome);
                    }
                }
                Screen::Chat => press_scrollbar(app, column, row),
            }
        }
        MouseEventKind::Drag(MouseButton::Left) if app.screen == Screen::Chat => {
            let chat = &mut app.chat;
            if let Some(thumb) = chat.thumb
                && chat.scroll.is_dragging()
            {
                chat.scroll.drag_to(f32::from(row), scrollbar::drag_track(chat.track, thumb));
                chat.follow_end = chat.scroll.targets_end();
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            let chat = &mut app.chat;
            if chat.scroll.is_dragging() {
                chat.scroll.end_drag();
                chat.follow_end = chat.scroll.targets_end();
            }
        }
        MouseEventKind::ScrollUp if app.screen == Screen::Chat => {
            app.chat.scroll_by(-MOUSE_SCROLL_LINES);
        }
        MouseEventKind::ScrollDown if app.screen == Screen::Chat => {
            app.chat.scroll_by(MOUSE_SCROLL_LINES);
        }
        _ => {}
    }
}

fn press_scrollbar(app: &mut App, column: u16, row: u16) {
    let chat = &mut app.chat;
    match scrollbar::hit_test(chat.track, chat.thumb, chat.scroll.max_scroll(), column, row) {
        ScrollbarHit::Thumb { thumb_top } => chat.scroll.begin_drag(f32::from(row), thumb_top),
        ScrollbarHit::Track { target } => chat.scroll_to(target),
        ScrollbarHit::Outside => {}
    }
}
