//! HTTP response sanitization and truncation tests.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use straylight::providers::{check_http_response, ProviderError};

async fn serve_once(status_line: &str, body: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("listener should bind");
    let addr = listener
        .local_addr()
        .expect("listener should expose local addr");

    let status_line_owned = status_line.to_owned();
    let body_owned = body.to_owned();
    tokio::spawn(async move {
        if let Ok((mut socket, _)) = listener.accept().await {
            let mut read_buf = [0_u8; 1024];
            let _ = socket.read(&mut read_buf).await;

            let response = format!(
                "HTTP/1.1 {status_line_owned}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body_owned}",
                body_owned.len()
            );
            let _ = socket.write_all(response.as_bytes()).await;
        }
    });

    format!("http://{addr}/")
}

async fn error_for(status_line: &str, body: &str) -> ProviderError {
    let url = serve_once(status_line, body).await;
    let response = reqwest::get(url).await.expect("request should complete");
    match check_http_response(response).await {
        Ok(_) => panic!("response should fail on non-success status"),
        Err(err) => err,
    }
}

#[tokio::test]
async fn success_body_passes_through() {
    let url = serve_once("200 OK", "all good").await;
    let response = reqwest::get(url).await.expect("request should complete");
    let body = check_http_response(response)
        .await
        .expect("success should pass through");
    assert_eq!(body, "all good");
}

#[tokio::test]
async fn error_body_redacts_api_keys() {
    let raw_key = "sk-abcdefghijklmnopqrstuvwxyz123456";
    let err = error_for("500 Internal Server Error", &format!("bad key {raw_key}")).await;
    match err {
        ProviderError::HttpStatus { status, body } => {
            assert_eq!(status, 500);
            assert!(!body.contains(raw_key));
            assert!(body.contains("[REDACTED]"));
        }
        other => panic!("expected http status error, got: {other}"),
    }
}

#[tokio::test]
async fn error_body_redacts_bot_tokens() {
    let raw_token = "123456789:AAabcdefghijklmnopqrstuvwxyz0123456";
    let err = error_for("403 Forbidden", &format!("token {raw_token} rejected")).await;
    match err {
        ProviderError::HttpStatus { body, .. } => {
            assert!(!body.contains(raw_token));
            assert!(body.contains("[REDACTED]"));
        }
        other => panic!("expected http status error, got: {other}"),
    }
}

#[tokio::test]
async fn error_body_is_truncated() {
    let long_body = "x".repeat(400);
    let err = error_for("500 Internal Server Error", &long_body).await;
    match err {
        ProviderError::HttpStatus { body, .. } => {
            assert!(body.ends_with("...[truncated]"));
        }
        other => panic!("expected http status error, got: {other}"),
    }
}

#[tokio::test]
async fn payment_required_status_stays_in_display_text() {
    // The reply policy matches "402" in the rendered error, so the status
    // code must survive into the display output.
    let err = error_for("402 Payment Required", "Insufficient Balance").await;
    assert!(err.to_string().contains("402"));
}
