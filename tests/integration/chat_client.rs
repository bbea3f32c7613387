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

use aprende::llm::{API_ERROR_REPLY, ChatClient, ChatError, EMPTY_MESSAGE_REPLY};
use pretty_assertions::assert_eq;

use crate::helpers::{config_from, serve_once};

fn client_for(url: &str, stream: bool) -> ChatClient {
    let config = config_from(&format!(
        r#"{{
            "conexion": {{"url": "{url}", "stream": {stream}, "max_tokens": 64}},
            "servicios": {{"openai": {{"api_key": "sk-test", "model": "gpt-test"}}}},
            "prompt_inicial": "Eres un búho que enseña sumas."
        }}"#
    ));
    ChatClient::from_config(&config, None).expect("client from config")
}

#[tokio::test]
async fn json_reply_is_trimmed_and_request_is_well_formed() {
    let body = r#"{"choices":[{"message":{"role":"assistant","content":"  Son 4.  "}}]}"#;
    let (url, server) = serve_once("200 OK", "application/json", body).await;
    let client = client_for(&url, false);

    let reply = client.complete("¿Cuánto es 2 + 2?").await.expect("reply");
    assert_eq!(reply, "Son 4.");

    let request = server.await.expect("server task");
    let lower = request.to_lowercase();
    assert!(lower.starts_with("post /v1/chat/completions"));
    assert!(lower.contains("authorization: bearer sk-test"));
    let json_start = request.find("\r\n\r\n").expect("body separator") + 4;
    let sent: serde_json::Value = serde_json::from_str(&request[json_start..]).expect("json body");
    assert_eq!(sent["model"], "gpt-test");
    assert_eq!(sent["stream"], false);
    assert_eq!(sent["max_tokens"], 64);
    assert_eq!(sent["messages"][0]["role"], "system");
    assert_eq!(sent["messages"][0]["content"], "Eres un búho que enseña sumas.");
    assert_eq!(sent["messages"][1]["role"], "user");
    assert_eq!(sent["messages"][1]["content"], "¿Cuánto es 2 + 2?");
}

#[tokio::test]
async fn streamed_deltas_are_concatenated() {
    let body = concat!(
        "data: {\"choices\":[{\"delta\":{\"role\":\"assistant\"}}]}\n\n",
        "data: {\"choices\":[{\"delta\":{\"content\":\"Hola\"}}]}\n\n",
        "data: {\"choices\":[{\"delta\":{\"content\":\", amigo\"}}]}\n\n",
        "data: [DONE]\n\n",
    );
    let (url, server) = serve_once("200 OK", "text/event-stream", body).await;
    let client = client_for(&url, true);

    let reply = client.complete("hola").await.expect("reply");
    assert_eq!(reply, "Hola, amigo");
    let request = server.await.expect("server task");
    assert!(request.contains("\"stream\":true"));
}

#[tokio::test]
async fn error_status_becomes_status_error() {
    let (url, server) =
        serve_once("500 Internal Server Error", "application/json", r#"{"error":"boom"}"#).await;
    let client = client_for(&url, false);

    let err = client.complete("hola").await.unwrap_err();
    match &err {
        ChatError::Status { status, body } => {
            assert_eq!(*status, 500);
            assert!(body.contains("boom"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.user_message(), API_ERROR_REPLY);
    server.await.expect("server task");
}

#[tokio::test]
async fn empty_completion_is_an_error() {
    let body = r#"{"choices":[{"message":{"role":"assistant","content":"   "}}]}"#;
    let (url, _server) = serve_once("200 OK", "application/json", body).await;
    let client = client_for(&url, false);
    assert!(matches!(client.complete("hola").await, Err(ChatError::EmptyReply)));
}

#[tokio::test]
async fn blank_prompt_never_reaches_the_network() {
    // Nothing listens on this port; a request would fail with Http.
    let client = client_for("http://127.0.0.1:9/v1/chat/completions", false);
    let err = client.complete("  \n ").await.unwrap_err();
    assert!(matches!(err, ChatError::EmptyInput));
    assert_eq!(err.user_message(), EMPTY_MESSAGE_REPLY);
}

#[test]
fn unknown_service_is_reported() {
    let config = config_from(r#"{"servicios": {"openai": {"api_key": "k"}}}"#);
    let err = ChatClient::from_config(&config, Some("mistral")).unwrap_err();
    assert!(matches!(err, ChatError::MissingService(Some(ref name)) if name == "mistral"));
}
