//! Exercises `HttpEndpoint` against a one-shot local HTTP server.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use hub_chat_endpoint::{AssistantEndpoint, EndpointError, HttpEndpoint};

/// A captured request: header block (lowercased) and body.
struct Captured {
    head: String,
    body: String,
}

/// Serve exactly one connection with `status` and `body`, optionally
/// sleeping before answering. Returns the URL and a receiver for the
/// captured request.
fn serve_once(status: &str, body: &str, delay: Duration) -> (String, mpsc::Receiver<Captured>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind local listener");
    let addr = listener.local_addr().expect("local addr");
    let status = status.to_string();
    let body = body.to_string();
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let Ok((stream, _)) = listener.accept() else {
            return;
        };
        let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
        let mut head = String::new();
        let mut content_length = 0usize;
        loop {
            let mut line = String::new();
            if reader.read_line(&mut line).unwrap_or(0) == 0 {
                break;
            }
            let lower = line.to_ascii_lowercase();
            if let Some(value) = lower.strip_prefix("content-length:") {
                content_length = value.trim().parse().unwrap_or(0);
            }
            head.push_str(&lower);
            if line == "\r\n" {
                break;
            }
        }
        let mut request_body = vec![0u8; content_length];
        let _ = reader.read_exact(&mut request_body);
        let _ = tx.send(Captured {
            head,
            body: String::from_utf8_lossy(&request_body).into_owned(),
        });

        thread::sleep(delay);
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let mut stream = stream;
        let _ = stream.write_all(response.as_bytes());
        let _ = stream.flush();
    });

    (format!("http://{addr}/chat"), rx)
}

#[test]
fn test_posts_json_and_decodes_reply() {
    let (url, rx) = serve_once(
        "200 OK",
        r#"{"message":"Here is our list of verified manufacturers.","action":"suppliers"}"#,
        Duration::ZERO,
    );
    let endpoint = HttpEndpoint::new(url, Duration::from_secs(5));

    let reply = endpoint.ask("Show me the suppliers").unwrap();
    assert_eq!(reply.message, "Here is our list of verified manufacturers.");
    assert_eq!(reply.navigation_target(), Some("suppliers"));

    let captured = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert!(captured.head.starts_with("post /chat"));
    assert!(captured.head.contains("content-type: application/json"));
    assert_eq!(captured.body, r#"{"message":"Show me the suppliers"}"#);
}

#[test]
fn test_rate_limit_status() {
    let (url, _rx) = serve_once(
        "429 Too Many Requests",
        r#"{"error":"Rate limit exceeded. Please wait before sending more messages.","retry_after":60}"#,
        Duration::ZERO,
    );
    let endpoint = HttpEndpoint::new(url, Duration::from_secs(5));

    let err = endpoint.ask("hello").unwrap_err();
    assert!(err.is_rate_limited(), "expected 429, got {err:?}");
}

#[test]
fn test_server_error_status() {
    let (url, _rx) = serve_once(
        "500 Internal Server Error",
        r#"{"error":"An internal error occurred. Please try again."}"#,
        Duration::ZERO,
    );
    let endpoint = HttpEndpoint::new(url, Duration::from_secs(5));

    assert_eq!(
        endpoint.ask("hello").unwrap_err(),
        EndpointError::Status { status: 500 }
    );
}

#[test]
fn test_malformed_body() {
    let (url, _rx) = serve_once("200 OK", "not json at all", Duration::ZERO);
    let endpoint = HttpEndpoint::new(url, Duration::from_secs(5));

    assert!(matches!(
        endpoint.ask("hello").unwrap_err(),
        EndpointError::Malformed(_)
    ));
}

#[test]
fn test_slow_server_times_out() {
    let (url, _rx) = serve_once(
        "200 OK",
        r#"{"message":"too late"}"#,
        Duration::from_secs(3),
    );
    let endpoint = HttpEndpoint::new(url, Duration::from_millis(200));

    assert_eq!(endpoint.ask("hello").unwrap_err(), EndpointError::Timeout);
}

#[test]
fn test_unreachable_endpoint_is_transport_failure() {
    // Bind then drop to get a port nobody is listening on.
    let port = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let endpoint = HttpEndpoint::new(
        format!("http://127.0.0.1:{port}/chat"),
        Duration::from_secs(2),
    );

    assert!(matches!(
        endpoint.ask("hello").unwrap_err(),
        EndpointError::Transport(_)
    ));
}
