// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 prompt-relay contributors

use prompt_relay::error::{ApiError, RelayError};
use prompt_relay::providers::{AnthropicClient, OpenAiClient};

use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn openai_completion_body(text: &str) -> String {
    serde_json::json!({
        "id": "chatcmpl-test",
        "model": "gpt-4o",
        "choices": [
            {
                "index": 0,
                "message": {"role": "assistant", "content": text},
                "finish_reason": "stop"
            }
        ],
        "usage": {"prompt_tokens": 9, "completion_tokens": 12, "total_tokens": 21}
    })
    .to_string()
}

fn anthropic_message_body(text: &str) -> String {
    serde_json::json!({
        "id": "msg_test",
        "model": "claude-3-5-sonnet-20241022",
        "content": [{"type": "text", "text": text}],
        "stop_reason": "end_turn",
        "usage": {"input_tokens": 9, "output_tokens": 12}
    })
    .to_string()
}

#[tokio::test]
async fn test_openai_complete_returns_response_and_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(serde_json::json!({
            "model": "gpt-4o",
            "messages": [
                {"role": "user", "content": [{"type": "text", "text": "Hello"}]}
            ]
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(openai_completion_body("Hi there.")),
        )
        .mount(&mock_server)
        .await;

    let client = OpenAiClient::with_base_url(
        "test-key",
        "gpt-4o",
        format!("{}/v1/chat/completions", mock_server.uri()),
    );

    let (completion, content) = client.complete("Hello").await.unwrap();

    assert_eq!(content, "Hi there.");
    assert_eq!(completion.id, "chatcmpl-test");
    assert_eq!(completion.choices.len(), 1);
    assert_eq!(completion.usage.unwrap().total_tokens, 21);
}

#[tokio::test]
async fn test_openai_complete_authentication_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string(
            r#"{"error":{"message":"Incorrect API key provided","code":"invalid_api_key"}}"#,
        ))
        .mount(&mock_server)
        .await;

    let client = OpenAiClient::with_base_url(
        "bad-key",
        "gpt-4o",
        format!("{}/v1/chat/completions", mock_server.uri()),
    );

    let err = client.complete("Hello").await.unwrap_err();
    assert!(matches!(
        err,
        RelayError::Api(ApiError::AuthenticationFailed)
    ));
}

#[tokio::test]
async fn test_openai_complete_rate_limited_with_retry_after() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("retry-after", "7")
                .set_body_string(
                    r#"{"error":{"message":"Rate limit reached","code":"rate_limit_exceeded"}}"#,
                ),
        )
        .mount(&mock_server)
        .await;

    let client = OpenAiClient::with_base_url(
        "test-key",
        "gpt-4o",
        format!("{}/v1/chat/completions", mock_server.uri()),
    );

    let err = client.complete("Hello").await.unwrap_err();
    assert!(matches!(err, RelayError::Api(ApiError::RateLimited(7))));
}

#[tokio::test]
async fn test_openai_complete_no_choices() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"id":"chatcmpl-test","model":"gpt-4o","choices":[]}"#,
        ))
        .mount(&mock_server)
        .await;

    let client = OpenAiClient::with_base_url(
        "test-key",
        "gpt-4o",
        format!("{}/v1/chat/completions", mock_server.uri()),
    );

    let err = client.complete("Hello").await.unwrap_err();
    assert!(matches!(err, RelayError::Api(ApiError::InvalidResponse(_))));
}

#[tokio::test]
async fn test_anthropic_complete_returns_response_and_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "test-key"))
        .and(header("anthropic-version", "2023-06-01"))
        .and(body_partial_json(serde_json::json!({
            "model": "claude-3-5-sonnet-20241022",
            "max_tokens": 4096,
            "messages": [
                {"role": "user", "content": [{"type": "text", "text": "Hello"}]}
            ]
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(anthropic_message_body("Hello back.")),
        )
        .mount(&mock_server)
        .await;

    let client = AnthropicClient::with_base_url(
        "test-key",
        "claude-3-5-sonnet-20241022",
        format!("{}/v1/messages", mock_server.uri()),
    );

    let (message, content) = client.complete("Hello").await.unwrap();

    assert_eq!(content, "Hello back.");
    assert_eq!(message.id, "msg_test");
    assert_eq!(message.stop_reason.as_deref(), Some("end_turn"));
}

#[tokio::test]
async fn test_anthropic_complete_authentication_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(401).set_body_string(
            r#"{"error":{"type":"authentication_error","message":"invalid x-api-key"}}"#,
        ))
        .mount(&mock_server)
        .await;

    let client = AnthropicClient::with_base_url(
        "bad-key",
        "claude-3-5-sonnet-20241022",
        format!("{}/v1/messages", mock_server.uri()),
    );

    let err = client.complete("Hello").await.unwrap_err();
    assert!(matches!(
        err,
        RelayError::Api(ApiError::AuthenticationFailed)
    ));
}

#[tokio::test]
async fn test_anthropic_complete_empty_content() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"id":"msg_test","model":"claude-3-5-sonnet-20241022","content":[]}"#,
        ))
        .mount(&mock_server)
        .await;

    let client = AnthropicClient::with_base_url(
        "test-key",
        "claude-3-5-sonnet-20241022",
        format!("{}/v1/messages", mock_server.uri()),
    );

    let err = client.complete("Hello").await.unwrap_err();
    assert!(matches!(err, RelayError::Api(ApiError::InvalidResponse(_))));
}

#[tokio::test]
async fn test_anthropic_complete_server_error_passthrough() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(500).set_body_string(
            r#"{"error":{"type":"api_error","message":"overloaded"}}"#,
        ))
        .mount(&mock_server)
        .await;

    let client = AnthropicClient::with_base_url(
        "test-key",
        "claude-3-5-sonnet-20241022",
        format!("{}/v1/messages", mock_server.uri()),
    );

    let err = client.complete("Hello").await.unwrap_err();
    match err {
        RelayError::Api(ApiError::ServerError { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "overloaded");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
