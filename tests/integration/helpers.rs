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

use aprende::app::{App, handle_terminal_event};
use aprende::config::Config;
use aprende::llm::{ChatBackend, ChatError};
use aprende::media::Media;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use futures::future::BoxFuture;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::io::{AsyncReadExt as _, AsyncWriteExt as _};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// Backend answering every prompt with a canned reply, counting calls.
pub struct CannedBackend {
    pub reply: Result<String, ()>,
    pub calls: AtomicUsize,
}

impl CannedBackend {
    pub fn ok(reply: &str) -> Arc<Self> {
        Arc::new(Self { reply: Ok(reply.to_owned()), calls: AtomicUsize::new(0) })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self { reply: Err(()), calls: AtomicUsize::new(0) })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ChatBackend for CannedBackend {
    fn reply<'a>(&'a self, _prompt: &'a str) -> BoxFuture<'a, Result<String, ChatError>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let reply = self.reply.clone().map_err(|()| ChatError::EmptyReply);
        Box::pin(async move { reply })
    }
}

pub fn test_app() -> App {
    App::new(&Config::default(), Media::silent(), None, 42)
}

pub fn test_app_with(backend: Arc<dyn ChatBackend>) -> App {
    App::new(&Config::default(), Media::silent(), Some(backend), 42)
}

pub fn config_from(json: &str) -> Config {
    aprende::config::parse(json).expect("valid test config")
}

pub fn press(app: &mut App, code: KeyCode) {
    handle_terminal_event(app, Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
}

pub fn ctrl(app: &mut App, c: char) {
    handle_terminal_event(app, Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)));
}

pub fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

pub fn mouse(app: &mut App, kind: MouseEventKind, column: u16, row: u16) {
    handle_terminal_event(
        app,
        Event::Mouse(MouseEvent { kind, column, row, modifiers: KeyModifiers::NONE }),
    );
}

pub fn render_frame_to_string(app: &mut App, width: u16, height: u16) -> String {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).expect("create test terminal");
    terminal.draw(|f| aprende::ui::render(f, app)).expect("draw frame");

    let mut out = String::new();
    let buffer = terminal.backend().buffer();
    for y in 0..height {
        for x in 0..width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

/// Draw frames with a fixed step until the chat scroll settles.
pub fn settle(app: &mut App, width: u16, height: u16) {
    for _ in 0..200 {
        render_frame_to_string(app, width, height);
        app.tick(0.016);
    }
    render_frame_to_string(app, width, height);
}

/// One-shot HTTP server: accepts a single connection, records the request
/// and answers with the given status line, content type and body.
pub async fn serve_once(
    status_line: &str,
    content_type: &str,
    body: &str,
) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind test listener");
    let addr = listener.local_addr().expect("listener address");
    let response = format!(
        "HTTP/1.1 {status_line}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let request = read_request(&mut socket).await;
        socket.write_all(response.as_bytes()).await.expect("write response");
        let _ = socket.shutdown().await;
        request
    });
    (format!("http://{addr}/v1/chat/completions"), handle)
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0_u8; 4096];
    loop {
        let n = socket.read(&mut chunk).await.expect("read request");
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(header_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
            let body_len = headers
                .lines()
                .find_map(|l| l.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= header_end + 4 + body_len {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}
