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

use aprende::app::{App, Author, HISTORY_CAP};
use aprende::llm::{API_ERROR_REPLY, EMPTY_MESSAGE_REPLY};
use crossterm::event::{KeyCode, MouseEventKind};
use pretty_assertions::assert_eq;
use std::time::Duration;

use crate::helpers::{
    CannedBackend, mouse, press, settle, test_app, test_app_with, type_text,
};

fn open_chat(app: &mut App) {
    press(app, KeyCode::F(4));
}

/// Poll the reply channel the way the render loop does until something lands.
async fn wait_for_reply(app: &mut App) -> Vec<String> {
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            let replies = app.chat.poll_new_messages();
            if !replies.is_empty() {
                return replies;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("reply within timeout")
}

fn texts(app: &App) -> Vec<(Author, String)> {
    app.chat.store.iter().map(|e| (e.author, e.text.clone())).collect()
}

#[tokio::test]
async fn whitespace_input_is_answered_without_network_or_waiting() {
    let backend = CannedBackend::ok("no debería llegar");
    let mut app = test_app_with(backend.clone());
    open_chat(&mut app);
    type_text(&mut app, "   ");
    press(&mut app, KeyCode::Enter);

    assert!(!app.chat.is_waiting());
    assert_eq!(texts(&app), vec![(Author::Bot, EMPTY_MESSAGE_REPLY.to_owned())]);
    tokio::task::yield_now().await;
    assert_eq!(backend.calls(), 0);
    assert!(app.chat.poll_new_messages().is_empty());
}

#[tokio::test]
async fn reply_is_delivered_through_poll() {
    let backend = CannedBackend::ok("¡Son 4!");
    let mut app = test_app_with(backend.clone());
    open_chat(&mut app);
    type_text(&mut app, "¿2 + 2?");
    press(&mut app, KeyCode::Enter);

    assert!(app.chat.is_waiting());
    assert!(app.chat.input.is_empty());
    // A second send while waiting is refused and the typed text is kept.
    type_text(&mut app, "otra");
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.chat.input.text(), "otra");

    let replies = wait_for_reply(&mut app).await;
    assert_eq!(replies, vec!["¡Son 4!".to_owned()]);
    assert!(!app.chat.is_waiting());
    assert_eq!(
        texts(&app),
        vec![(Author::User, "¿2 + 2?".to_owned()), (Author::Bot, "¡Son 4!".to_owned())]
    );
    assert_eq!(backend.calls(), 1);
}

#[tokio::test]
async fn backend_failure_shows_fallback_text() {
    let mut app = test_app_with(CannedBackend::failing());
    open_chat(&mut app);
    type_text(&mut app, "hola");
    press(&mut app, KeyCode::Enter);
    let replies = wait_for_reply(&mut app).await;
    assert_eq!(replies, vec![API_ERROR_REPLY.to_owned()]);
    assert_eq!(app.chat.store.last().map(|e| e.author), Some(Author::Bot));
}

#[test]
fn history_keeps_only_the_most_recent_entries() {
    let mut app = test_app();
    open_chat(&mut app);
    for i in 0..(HISTORY_CAP) {
        type_text(&mut app, &format!("m{i}"));
        press(&mut app, KeyCode::Enter);
    }
    assert_eq!(app.chat.store.len(), HISTORY_CAP);
    let first = app.chat.store.get(0).map(|e| e.text.clone());
    assert_eq!(first, Some(format!("m{}", HISTORY_CAP / 2)));
}

#[test]
fn view_follows_new_messages_until_scrolled_up() {
    let mut app = test_app();
    open_chat(&mut app);
    for i in 0..20 {
        type_text(&mut app, &format!("pregunta {i}"));
        press(&mut app, KeyCode::Enter);
    }
    settle(&mut app, 80, 24);
    let max = app.chat.scroll.max_scroll();
    assert!(max > 0);
    assert_eq!(app.chat.scroll.offset(), max);

    mouse(&mut app, MouseEventKind::ScrollUp, 10, 10);
    settle(&mut app, 80, 24);
    let parked = app.chat.scroll.offset();
    assert_eq!(parked, max - 3);

    type_text(&mut app, "una más");
    press(&mut app, KeyCode::Enter);
    settle(&mut app, 80, 24);
    assert_eq!(app.chat.scroll.offset(), parked);
    assert!(app.chat.scroll.max_scroll() > max);

    press(&mut app, KeyCode::End);
    settle(&mut app, 80, 24);
    assert_eq!(app.chat.scroll.offset(), app.chat.scroll.max_scroll());
    assert!(app.chat.follow_end);
}

#[test]
fn clearing_history_resets_scroll() {
    let mut app = test_app();
    open_chat(&mut app);
    for i in 0..10 {
        type_text(&mut app, &format!("x{i}"));
        press(&mut app, KeyCode::Enter);
    }
    settle(&mut app, 80, 24);
    crate::helpers::ctrl(&mut app, 'l');
    settle(&mut app, 80, 24);
    assert!(app.chat.store.is_empty());
    assert_eq!(app.chat.scroll.offset(), 0);
    assert_eq!(app.chat.scroll.max_scroll(), 0);
}
