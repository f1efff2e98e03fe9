use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::{self, JoinHandle};

use dashboard_rs::DashboardError;
use dashboard_rs::chart::ChartKind;
use dashboard_rs::net::{
    CSRF_HEADER, CsrfInterceptor, CsrfToken, PendingRequest, RequestInterceptor, UpdateClient,
};

/// One-shot HTTP server on a loopback port: accepts a single connection,
/// captures the raw request, answers with the canned response, and hands the
/// capture back through the join handle.
fn serve_once(
    status_line: &'static str,
    content_type: &'static str,
    body: &'static str,
) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback listener");
    let addr = listener.local_addr().expect("listener address");
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept connection");
        let request = read_request(&mut stream);
        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).expect("write response");
        request
    });
    (format!("http://{addr}"), handle)
}

/// Reads one full request: headers, then as many body bytes as
/// `Content-Length` announces.
fn read_request(stream: &mut TcpStream) -> String {
    let mut data = Vec::new();
    let mut buffer = [0u8; 4096];
    loop {
        let read = stream.read(&mut buffer).expect("read request bytes");
        if read == 0 {
            break;
        }
        data.extend_from_slice(&buffer[..read]);
        if let Some(header_end) = data.windows(4).position(|w| w == b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&data[..header_end]);
            let content_length = headers
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    if name.eq_ignore_ascii_case("content-length") {
                        value.trim().parse::<usize>().ok()
                    } else {
                        None
                    }
                })
                .unwrap_or(0);
            if data.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&data).into_owned()
}

struct HeaderStamp {
    name: &'static str,
    value: &'static str,
}

impl RequestInterceptor for HeaderStamp {
    fn apply(&self, request: &mut PendingRequest) {
        request.set_header(self.name, self.value);
    }
}

#[test]
fn csrf_header_rides_the_posted_form() {
    let (base, server) = serve_once("200 OK", "text/html", "<li>updated</li>");
    let client = UpdateClient::new(base)
        .expect("client must build")
        .with_interceptor(CsrfInterceptor::with_token(CsrfToken::new("wire-tok")));

    let fragment = client
        .post_form("/tasks/7/status/", &[("status", "done")])
        .expect("post must succeed");
    assert_eq!(fragment.status, 200);
    assert_eq!(fragment.body, "<li>updated</li>");

    let request = server.join().expect("server thread");
    let lowered = request.to_ascii_lowercase();
    assert!(request.starts_with("POST /tasks/7/status/ HTTP/1.1"));
    assert!(lowered.contains("x-csrftoken: wire-tok"));
    assert!(lowered.contains("content-type: application/x-www-form-urlencoded"));
    assert!(request.ends_with("status=done"));
}

#[test]
fn tokenless_chain_sends_no_csrf_header() {
    let (base, server) = serve_once("200 OK", "text/html", "<p>ok</p>");
    let client = UpdateClient::new(base)
        .expect("client must build")
        .with_interceptor(CsrfInterceptor::default());

    client.get_fragment("/dashboard/").expect("get must succeed");

    let request = server.join().expect("server thread");
    assert!(request.starts_with("GET /dashboard/ HTTP/1.1"));
    assert!(!request.to_ascii_lowercase().contains("x-csrftoken"));
}

#[test]
fn later_interceptors_overwrite_earlier_header_writes() {
    let (base, server) = serve_once("200 OK", "text/html", "ok");
    let client = UpdateClient::new(base)
        .expect("client must build")
        .with_interceptor(CsrfInterceptor::with_token(CsrfToken::new("early")))
        .with_interceptor(HeaderStamp {
            name: CSRF_HEADER,
            value: "late",
        });
    assert_eq!(client.interceptor_count(), 2);

    client
        .post_form("/tasks/1/", &[("status", "active")])
        .expect("post must succeed");

    let lowered = server.join().expect("server thread").to_ascii_lowercase();
    assert!(lowered.contains("x-csrftoken: late"));
    assert!(!lowered.contains("x-csrftoken: early"));
}

#[test]
fn non_success_fragments_come_back_as_values() {
    let (base, server) = serve_once("404 Not Found", "text/html", "<p>missing</p>");
    let client = UpdateClient::new(base).expect("client must build");

    let fragment = client
        .get_fragment("/tasks/999/")
        .expect("transport must succeed");
    assert_eq!(fragment.status, 404);
    assert!(!fragment.is_success());
    assert_eq!(fragment.body, "<p>missing</p>");
    server.join().expect("server thread");
}

#[test]
fn chart_config_payloads_decode_with_defaults() {
    let (base, server) = serve_once(
        "200 OK",
        "application/json",
        r#"{"data": {"labels": ["ene", "feb", "mar"], "datasets": [{"label": "horas", "data": [4.0, 6.5, 5.0]}]}}"#,
    );
    let client = UpdateClient::new(base).expect("client must build");

    let config = client
        .fetch_chart_config("/charts/hours.json")
        .expect("config must decode");
    assert_eq!(config.kind, ChartKind::Line);
    assert_eq!(config.data.labels, vec!["ene", "feb", "mar"]);
    assert!(config.options.responsive);
    assert!(!config.options.maintain_aspect_ratio);
    server.join().expect("server thread");
}

#[test]
fn non_success_json_responses_become_status_errors() {
    let (base, server) = serve_once("500 Internal Server Error", "text/html", "boom");
    let client = UpdateClient::new(base).expect("client must build");

    let err = client
        .fetch_chart_config("/charts/hours.json")
        .expect_err("server error must fail");
    assert!(matches!(
        err,
        DashboardError::UnexpectedStatus { status: 500, .. }
    ));
    server.join().expect("server thread");
}

#[test]
fn undecodable_json_bodies_become_payload_errors() {
    let (base, server) = serve_once("200 OK", "application/json", "<html>login</html>");
    let client = UpdateClient::new(base).expect("client must build");

    let err = client
        .fetch_chart_config("/charts/hours.json")
        .expect_err("html body must fail to decode");
    assert!(matches!(err, DashboardError::Payload(_)));
    server.join().expect("server thread");
}
