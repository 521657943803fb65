// tests/github_client.rs

mod common;
use crate::common::{init_tracing, with_timeout};

use std::error::Error;
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use changed_paths::errors::ChangedPathsError;
use changed_paths::github::{GithubClient, PullRequestInfo, PER_PAGE};

type TestResult = Result<(), Box<dyn Error>>;

/// Canned response for one request: status line and JSON body.
type Reply = (u16, String);

/// Minimal HTTP/1.1 server answering requests in order from `replies`.
///
/// Records the request target (path + query) of every request.
async fn serve(replies: Vec<Reply>) -> std::io::Result<(String, Arc<Mutex<Vec<String>>>)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_task = Arc::clone(&seen);

    tokio::spawn(async move {
        for (status, body) in replies {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };

            let mut request: Vec<u8> = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match socket.read(&mut buf).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }
            let text = String::from_utf8_lossy(&request);
            if let Some(target) = text.split_whitespace().nth(1) {
                seen_task.lock().unwrap().push(target.to_string());
            }

            let response = format!(
                "HTTP/1.1 {status} X\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    Ok((format!("http://{addr}"), seen))
}

fn files_page(prefix: &str, count: usize) -> String {
    let entries: Vec<String> = (0..count)
        .map(|i| format!(r#"{{"filename":"{prefix}/{i}.yaml","status":"modified"}}"#))
        .collect();
    format!("[{}]", entries.join(","))
}

fn pr() -> PullRequestInfo {
    PullRequestInfo {
        number: 9,
        changed_files: 103,
        owner: "acme".to_string(),
        repo: "infra".to_string(),
    }
}

#[tokio::test]
async fn collects_every_page() -> TestResult {
    init_tracing();

    let (url, seen) = serve(vec![
        (200, files_page("a", PER_PAGE)),
        (200, files_page("b", 3)),
    ])
    .await?;
    let client = GithubClient::new(&url, "token")?;

    let files = with_timeout(client.list_files(&pr())).await?;

    assert_eq!(files.len(), PER_PAGE + 3);
    assert_eq!(files[0], "a/0.yaml");
    assert_eq!(files[PER_PAGE + 2], "b/2.yaml");

    let seen = seen.lock().unwrap().clone();
    assert_eq!(seen.len(), 2);
    assert!(seen[0].starts_with("/repos/acme/infra/pulls/9/files?"));
    assert!(seen[0].contains("per_page=100"));
    assert!(seen[0].ends_with("&page=1"));
    assert!(seen[1].ends_with("&page=2"));
    Ok(())
}

#[tokio::test]
async fn retries_server_errors() -> TestResult {
    init_tracing();

    let (url, seen) = serve(vec![
        (502, "{}".to_string()),
        (200, files_page("c", 1)),
    ])
    .await?;
    let client = GithubClient::new(&url, "token")?.with_retry(2, 1);

    let files = with_timeout(client.list_files(&pr())).await?;

    assert_eq!(files, vec!["c/0.yaml"]);
    assert_eq!(seen.lock().unwrap().len(), 2);
    Ok(())
}

#[tokio::test]
async fn client_errors_fail_immediately() -> TestResult {
    init_tracing();

    let (url, seen) = serve(vec![(404, r#"{"message":"Not Found"}"#.to_string())]).await?;
    let client = GithubClient::new(&url, "token")?.with_retry(3, 1);

    match with_timeout(client.list_files(&pr())).await {
        Err(ChangedPathsError::Upstream(msg)) => assert!(msg.contains("404")),
        other => panic!("Expected Upstream error, got: {:?}", other),
    }
    assert_eq!(seen.lock().unwrap().len(), 1);
    Ok(())
}

#[tokio::test]
async fn missing_token_is_config_error() -> TestResult {
    let client = GithubClient::new("http://127.0.0.1:9", "")?;
    assert!(matches!(
        client.list_files(&pr()).await,
        Err(ChangedPathsError::ConfigError(_))
    ));
    Ok(())
}
