//! Integration tests for the HTTP transport.
//!
//! Each test starts an in-process axum server on an ephemeral port that
//! parses the multipart body, records the parts it saw, and answers with a
//! canned status and body.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::Router;
use procform::ui::memory::{DisplayContent, MemoryView};
use procform::{
    from_data_uri, ClientConfig, FileUpload, FormError, FormHandler, SubmitOutcome, TextInput,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

// ── Test server ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct SeenPart {
    name: String,
    file_name: Option<String>,
    data: Vec<u8>,
}

#[derive(Clone)]
struct Canned {
    status: StatusCode,
    body: &'static str,
    delay: Duration,
    seen: Arc<Mutex<Vec<Vec<SeenPart>>>>,
}

async fn process_data(State(canned): State<Canned>, mut multipart: Multipart) -> (StatusCode, String) {
    let mut parts = Vec::new();
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let data = field.bytes().await.map(|b| b.to_vec()).unwrap_or_default();
        parts.push(SeenPart {
            name,
            file_name,
            data,
        });
    }
    canned.seen.lock().unwrap().push(parts);
    tokio::time::sleep(canned.delay).await;
    (canned.status, canned.body.to_string())
}

struct TestServer {
    url: String,
    seen: Arc<Mutex<Vec<Vec<SeenPart>>>>,
}

impl TestServer {
    async fn start(status: StatusCode, body: &'static str) -> Self {
        Self::start_with_delay(status, body, Duration::ZERO).await
    }

    async fn start_with_delay(status: StatusCode, body: &'static str, delay: Duration) -> Self {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let app = Router::new()
            .route("/process-data", post(process_data))
            .with_state(Canned {
                status,
                body,
                delay,
                seen: seen.clone(),
            });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self {
            url: format!("http://{addr}"),
            seen,
        }
    }

    fn requests(&self) -> Vec<Vec<SeenPart>> {
        self.seen.lock().unwrap().clone()
    }

    fn handler(&self, ui: &MemoryView) -> FormHandler {
        let config = ClientConfig::builder()
            .server_url(&self.url)
            .request_timeout_secs(10)
            .build()
            .expect("valid config");
        FormHandler::new(ui.view(), config).expect("http client")
    }
}

const GROUPED: &str = r#"{"processed_data": "Georgi Petrov, Ivan Ivanov\nMaria Ivanova"}"#;

// ── Tests ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn file_and_text_are_both_sent_and_rendered() {
    let server = TestServer::start(StatusCode::OK, GROUPED).await;
    let ui = MemoryView::new();
    let csv = "Name,Address\nIvan Ivanov, 'ul. Testova 10, Sofia, Bulgaria'\n";
    ui.file_input.select(FileUpload::new("people.csv", csv.as_bytes().to_vec()));
    ui.text_input.set("Maria Ivanova, 'Berlin, Germany'");

    let outcome = server.handler(&ui).submit().await;
    assert!(outcome.is_rendered(), "got: {outcome:?}");

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    let names: Vec<&str> = requests[0].iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["csv_file", "text_input"]);
    assert_eq!(requests[0][0].file_name.as_deref(), Some("people.csv"));
    assert_eq!(requests[0][0].data, csv.as_bytes());
    assert_eq!(requests[0][1].data, b"Maria Ivanova, 'Berlin, Germany'");

    assert_eq!(
        ui.result_display.content(),
        DisplayContent::Paragraphs(vec![
            "Georgi Petrov, Ivan Ivanov".into(),
            "Maria Ivanova".into()
        ])
    );
    assert!(ui.download_link.is_visible());
    let uri = ui.download_link.target().expect("download target set");
    assert_eq!(
        from_data_uri(&uri).unwrap(),
        "Georgi Petrov, Ivan Ivanov\nMaria Ivanova"
    );
}

#[tokio::test]
async fn no_inputs_send_no_parts() {
    let server = TestServer::start(StatusCode::OK, r#"{"processed_data": ""}"#).await;
    let ui = MemoryView::new();

    let outcome = server.handler(&ui).submit().await;
    assert!(outcome.is_rendered());

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].is_empty(), "got parts: {:?}", requests[0]);
    assert_eq!(
        ui.result_display.content(),
        DisplayContent::Paragraphs(vec![String::new()])
    );
}

#[tokio::test]
async fn bad_request_shows_failure_message() {
    let server = TestServer::start(
        StatusCode::BAD_REQUEST,
        r#"{"detail": "Error processing data"}"#,
    )
    .await;
    let ui = MemoryView::new();
    ui.text_input.set("some random text");

    let outcome = server.handler(&ui).submit().await;
    assert!(matches!(outcome, SubmitOutcome::Rejected { status: 400 }));
    assert_eq!(
        ui.result_display.content(),
        DisplayContent::Text("No data provided".into())
    );
    assert!(ui.download_link.target().is_none());
}

#[tokio::test]
async fn html_body_on_success_is_decode_failure() {
    let server = TestServer::start(StatusCode::OK, "<html>oops</html>").await;
    let ui = MemoryView::new();
    ui.text_input.set("x");

    let outcome = server.handler(&ui).submit().await;
    assert!(matches!(outcome, SubmitOutcome::Failed(FormError::Decode { .. })));
    assert_eq!(
        ui.result_display.content(),
        DisplayContent::Text("Could not reach the server".into())
    );
}

#[tokio::test]
async fn missing_field_is_decode_failure() {
    let server = TestServer::start(StatusCode::OK, r#"{"result": "a"}"#).await;
    let ui = MemoryView::new();

    let outcome = server.handler(&ui).submit().await;
    match outcome {
        SubmitOutcome::Failed(e) => assert!(e.to_string().contains("processed_data")),
        other => panic!("expected decode failure, got {other:?}"),
    }
}

#[tokio::test]
async fn slow_server_hits_timeout() {
    let server =
        TestServer::start_with_delay(StatusCode::OK, GROUPED, Duration::from_secs(5)).await;
    let ui = MemoryView::new();
    let config = ClientConfig::builder()
        .server_url(&server.url)
        .request_timeout_secs(1)
        .build()
        .unwrap();
    let handler = FormHandler::new(ui.view(), config).unwrap();

    let outcome = handler.submit().await;
    assert!(
        matches!(outcome, SubmitOutcome::Failed(FormError::Timeout { secs: 1, .. })),
        "got: {outcome:?}"
    );
}

#[tokio::test]
async fn reset_after_success_hides_link() {
    let server = TestServer::start(StatusCode::OK, GROUPED).await;
    let ui = MemoryView::new();
    ui.text_input.set("x");
    let handler = server.handler(&ui);

    handler.submit().await;
    handler.reset();

    assert!(!ui.download_link.is_visible());
    assert_eq!(ui.result_display.content(), DisplayContent::Empty);
    assert_eq!(ui.text_input.value(), "");
}
