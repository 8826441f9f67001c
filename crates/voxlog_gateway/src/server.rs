use crate::html::render_index;
use crate::pipeline::{process_recording, process_text};
use crate::types::{Flash, IndexParams, TextForm};
use axum::{
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use voxlog_cloud::{SentimentAnalyzer, SpeechToText, TextToSpeech};
use voxlog_store::{Folder, Store, StoreError};

/// Shared state for the gateway server.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub stt: Arc<dyn SpeechToText>,
    pub tts: Arc<dyn TextToSpeech>,
    pub sentiment: Arc<dyn SentimentAnalyzer>,
}

impl AppState {
    pub fn new(
        store: Store,
        stt: Arc<dyn SpeechToText>,
        tts: Arc<dyn TextToSpeech>,
        sentiment: Arc<dyn SentimentAnalyzer>,
    ) -> Self {
        Self {
            store: Arc::new(store),
            stt,
            tts,
            sentiment,
        }
    }
}

/// The gateway HTTP server.
///
/// - `GET /` — index page with forms and stored artifacts
/// - `POST /upload` — multipart WAV upload → transcript + sentiment
/// - `POST /upload_text` — text form → sentiment + synthesized speech
/// - `GET /files/:folder/:filename` — serve a stored artifact
/// - `GET /health` — health check
pub struct GatewayServer {
    state: AppState,
    host: String,
    port: u16,
}

impl GatewayServer {
    pub fn new(state: AppState, host: &str, port: u16) -> Self {
        Self {
            state,
            host: host.to_string(),
            port,
        }
    }

    /// Build the router. Exposed so tests can drive handlers directly.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(health))
            .route("/", get(index))
            .route("/upload", post(upload_audio))
            .route("/upload_text", post(upload_text))
            .route("/files/:folder/:filename", get(serve_file))
            .layer(CorsLayer::permissive())
            .with_state(self.state.clone())
    }

    /// Start the server. Spawns a background task and returns its handle.
    pub fn start(self) -> tokio::task::JoinHandle<()> {
        let app = self.router();
        let addr = format!("{}:{}", self.host, self.port);

        tokio::spawn(async move {
            let listener = match tokio::net::TcpListener::bind(&addr).await {
                Ok(l) => l,
                Err(e) => {
                    tracing::error!("Gateway failed to bind {}: {}", addr, e);
                    return;
                }
            };
            tracing::info!("Gateway listening on {}", addr);
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("Gateway server error: {}", e);
            }
        })
    }
}

// ============================================================================
// Route handlers
// ============================================================================

async fn health() -> &'static str {
    "ok"
}

/// GET / — render the index with both folder listings.
async fn index(State(state): State<AppState>, Query(params): Query<IndexParams>) -> Response {
    let recordings = match state.store.list(Folder::Recordings).await {
        Ok(files) => files,
        Err(e) => return internal_error("list recordings", e),
    };
    let synthesized = match state.store.list(Folder::Synthesized).await {
        Ok(files) => files,
        Err(e) => return internal_error("list synthesized", e),
    };
    let flash = params.flash.as_deref().and_then(Flash::from_code);
    Html(render_index(&recordings, &synthesized, flash)).into_response()
}

/// POST /upload — multipart form with an `audio_data` WAV part.
async fn upload_audio(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let mut audio = None;
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                if field.name() == Some("audio_data") {
                    match field.bytes().await {
                        Ok(bytes) => {
                            audio = Some(bytes);
                            break;
                        }
                        Err(e) => {
                            tracing::warn!("Failed to read audio_data part: {}", e);
                            return (StatusCode::BAD_REQUEST, "Malformed upload").into_response();
                        }
                    }
                }
            }
            Ok(None) => break,
            Err(e) => {
                tracing::warn!("Malformed multipart body: {}", e);
                return (StatusCode::BAD_REQUEST, "Malformed upload").into_response();
            }
        }
    }

    let audio = match audio {
        Some(bytes) => bytes,
        None => return Redirect::to(&Flash::NoAudio.redirect_target()).into_response(),
    };
    if audio.is_empty() {
        return Redirect::to(&Flash::EmptyFile.redirect_target()).into_response();
    }

    match process_recording(&state, &audio).await {
        Ok(_) => Redirect::to("/").into_response(),
        Err(e) => upstream_error("recording pipeline", e),
    }
}

/// POST /upload_text — urlencoded form with a `text` field.
async fn upload_text(State(state): State<AppState>, Form(form): Form<TextForm>) -> Response {
    let text = form.text.trim();
    if text.is_empty() {
        return Redirect::to(&Flash::EmptyText.redirect_target()).into_response();
    }

    match process_text(&state, text).await {
        Ok(_) => Redirect::to("/").into_response(),
        Err(e) => upstream_error("text pipeline", e),
    }
}

/// GET /files/:folder/:filename — serve a stored artifact.
async fn serve_file(
    State(state): State<AppState>,
    Path((folder, filename)): Path<(String, String)>,
) -> Response {
    let path = match state.store.resolve(&folder, &filename) {
        Ok(path) => path,
        Err(StoreError::UnknownFolder(_)) => {
            return (StatusCode::NOT_FOUND, "Invalid folder").into_response()
        }
        Err(StoreError::InvalidFilename(_)) => {
            return (StatusCode::NOT_FOUND, "File not found").into_response()
        }
    };
    match tokio::fs::read(&path).await {
        Ok(bytes) => (
            [(header::CONTENT_TYPE, content_type(&filename))],
            bytes,
        )
            .into_response(),
        Err(_) => (StatusCode::NOT_FOUND, "File not found").into_response(),
    }
}

fn content_type(filename: &str) -> &'static str {
    match filename.rsplit_once('.').map(|(_, ext)| ext) {
        Some(ext) if ext.eq_ignore_ascii_case("wav") => "audio/wav",
        Some(ext) if ext.eq_ignore_ascii_case("txt") => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

fn internal_error(what: &str, e: anyhow::Error) -> Response {
    tracing::error!("{} failed: {:#}", what, e);
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
}

fn upstream_error(what: &str, e: anyhow::Error) -> Response {
    tracing::error!("{} failed: {:#}", what, e);
    (StatusCode::BAD_GATEWAY, "Upstream service error").into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;
    use voxlog_cloud::{MockSentimentAnalyzer, MockSpeechToText, MockTextToSpeech};

    fn mock_state(dir: &std::path::Path) -> AppState {
        AppState::new(
            Store::new(dir.join("uploads"), dir.join("tts")),
            Arc::new(MockSpeechToText),
            Arc::new(MockTextToSpeech),
            Arc::new(MockSentimentAnalyzer),
        )
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    const BOUNDARY: &str = "voxlog-test-boundary";

    fn multipart_request(field: &str, content: &[u8]) -> Request<Body> {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; \
                 filename=\"clip.wav\"\r\nContent-Type: audio/wav\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
        Request::builder()
            .method("POST")
            .uri("/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        assert_eq!(health().await, "ok");
    }

    #[test]
    fn test_gateway_server_creates() {
        let dir = tempfile::tempdir().unwrap();
        let server = GatewayServer::new(mock_state(dir.path()), "127.0.0.1", 0);
        assert_eq!(server.host, "127.0.0.1");
        assert_eq!(server.port, 0);
        let _router = server.router();
    }

    #[test]
    fn test_content_type() {
        assert_eq!(content_type("a.wav"), "audio/wav");
        assert_eq!(content_type("a.WAV"), "audio/wav");
        assert_eq!(content_type("a.wav.txt"), "text/plain; charset=utf-8");
        assert_eq!(content_type("blob"), "application/octet-stream");
    }

    #[tokio::test]
    async fn test_index_renders_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let state = mock_state(dir.path());
        let response = index(State(state), Query(IndexParams::default())).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_upload_text_blank_redirects_with_flash() {
        let dir = tempfile::tempdir().unwrap();
        let state = mock_state(dir.path());
        let form = TextForm {
            text: "   \n\t".into(),
        };
        let response = upload_text(State(state), Form(form)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/?flash=empty-text");
    }

    #[tokio::test]
    async fn test_upload_without_audio_part_redirects_with_flash() {
        let dir = tempfile::tempdir().unwrap();
        let server = GatewayServer::new(mock_state(dir.path()), "127.0.0.1", 0);
        let response = server
            .router()
            .oneshot(multipart_request("something_else", b"not audio"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/?flash=no-audio");
    }

    #[tokio::test]
    async fn test_upload_empty_file_redirects_with_flash() {
        let dir = tempfile::tempdir().unwrap();
        let server = GatewayServer::new(mock_state(dir.path()), "127.0.0.1", 0);
        let response = server
            .router()
            .oneshot(multipart_request("audio_data", b""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/?flash=empty-file");
    }

    #[tokio::test]
    async fn test_upload_runs_pipeline_and_redirects_home() {
        let dir = tempfile::tempdir().unwrap();
        let state = mock_state(dir.path());
        state.store.ensure_dirs().await.unwrap();
        let server = GatewayServer::new(state, "127.0.0.1", 0);
        let response = server
            .router()
            .oneshot(multipart_request("audio_data", b"RIFF fake wav"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/");
        // Recording plus its two derived files landed on disk.
        let entries = std::fs::read_dir(dir.path().join("uploads")).unwrap().count();
        assert_eq!(entries, 3);
    }

    #[tokio::test]
    async fn test_serve_unknown_folder_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let state = mock_state(dir.path());
        let response =
            serve_file(State(state), Path(("etc".to_string(), "passwd".to_string()))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(response).await, "Invalid folder");
    }

    #[tokio::test]
    async fn test_serve_missing_file_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let state = mock_state(dir.path());
        state.store.ensure_dirs().await.unwrap();
        let response = serve_file(
            State(state),
            Path(("uploads".to_string(), "nope.wav".to_string())),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(response).await, "File not found");
    }

    #[tokio::test]
    async fn test_serve_traversal_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let state = mock_state(dir.path());
        let response = serve_file(
            State(state),
            Path(("uploads".to_string(), "..%2Fsecret".to_string())),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(response).await, "File not found");
    }
}
