//! Servidor web Axum com WebSocket para aumentação de amostras NER em tempo real

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use ner_aug_core::{
    corpus::demo_sentences, AugmentEvent, AugmentRng, AugmentorConfig, InputCategory, NerAugmentor,
    NerRow, TaggedSpan,
};
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_ADDR: &str = "0.0.0.0:3000";

/// Estado compartilhado da aplicação
struct AppState {
    augmentor: NerAugmentor,
    /// Contador de requisições; cada uma usa o stream seguinte do gerador
    requests: AtomicU64,
}

impl AppState {
    fn next_rng(&self) -> AugmentRng {
        let n = self.requests.fetch_add(1, Ordering::Relaxed);
        self.augmentor.config().rng_for_stream(n)
    }
}

#[derive(Deserialize)]
struct AugmentRequest {
    text: String,
    category: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match std::env::var("NER_AUG_CONFIG") {
        Ok(path) => {
            info!(%path, "carregando configuração");
            AugmentorConfig::from_file(&path)?
        }
        Err(_) => AugmentorConfig::default(),
    };
    info!(
        format = config.tagging_format.name(),
        seed = config.seed,
        "configuração ativa"
    );

    let augmentor = NerAugmentor::new(config)?;
    let state = Arc::new(AppState {
        augmentor,
        requests: AtomicU64::new(0),
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/augment", post(augment_handler))
        .route("/augment/row", post(augment_row_handler))
        .route("/augment/batch", post(augment_batch_handler))
        .route("/demo-rows", get(demo_rows_handler))
        .route("/ws", get(ws_handler))
        .layer(cors)
        .with_state(state);

    let addr: SocketAddr = std::env::var("NER_AUG_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
        .parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("🚀 Servidor de aumentação NER iniciado em http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

fn bad_request(message: impl ToString) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({"error": message.to_string()})),
    )
        .into_response()
}

/// Valida `{text, category}` vindo do cliente
fn parse_request(req: &AugmentRequest) -> Result<(String, InputCategory), String> {
    let text = req.text.trim();
    if text.is_empty() {
        return Err("Texto vazio".to_string());
    }
    let category = req.category.parse::<InputCategory>().map_err(|e| e.to_string())?;
    Ok((text.to_string(), category))
}

/// Aumentação de um span via HTTP POST (sem streaming)
async fn augment_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AugmentRequest>,
) -> Response {
    let (text, category) = match parse_request(&req) {
        Ok(parsed) => parsed,
        Err(message) => return bad_request(message),
    };

    let mut rng = state.next_rng();
    let span: TaggedSpan = state.augmentor.augment(&text, category, &mut rng);
    Json(span).into_response()
}

/// Aumentação de uma sentença anotada
async fn augment_row_handler(
    State(state): State<Arc<AppState>>,
    Json(row): Json<NerRow>,
) -> Response {
    let mut rng = state.next_rng();
    match state.augmentor.augment_row(&row, &mut rng) {
        Ok(out) => Json(out).into_response(),
        Err(e) => bad_request(e),
    }
}

/// Aumentação de várias sentenças (em paralelo, fora do runtime assíncrono)
async fn augment_batch_handler(
    State(state): State<Arc<AppState>>,
    Json(rows): Json<Vec<NerRow>>,
) -> Response {
    info!(rows = rows.len(), "lote recebido");
    let mut rng = state.next_rng();
    let result =
        tokio::task::spawn_blocking(move || state.augmentor.augment_rows(&rows, &mut rng)).await;
    match result {
        Ok(Ok(out)) => Json(out).into_response(),
        Ok(Err(e)) => bad_request(e),
        Err(e) => {
            error!("falha na tarefa de lote: {e}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Retorna as sentenças de demonstração (texto, domínio e linha anotada)
async fn demo_rows_handler() -> impl IntoResponse {
    Json(demo_sentences())
}

/// Upgrade HTTP → WebSocket
async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_websocket(socket, state))
}

/// Lógica do WebSocket: recebe `{text, category}` e envia os eventos da aumentação
async fn handle_websocket(mut socket: WebSocket, state: Arc<AppState>) {
    info!("WebSocket conectado");

    while let Some(Ok(msg)) = socket.recv().await {
        match msg {
            Message::Text(text) => {
                let parsed = serde_json::from_str::<AugmentRequest>(&text)
                    .map_err(|e| e.to_string())
                    .and_then(|req| parse_request(&req));
                let (span_text, category) = match parsed {
                    Ok(parsed) => parsed,
                    Err(message) => {
                        warn!("requisição WebSocket inválida: {message}");
                        let reply = serde_json::json!({"type": "Error", "data": {"message": message}});
                        if socket.send(Message::Text(reply.to_string())).await.is_err() {
                            return;
                        }
                        continue;
                    }
                };

                info!("Aumentando via WebSocket [{category}]: {} chars", span_text.len());

                // A aumentação é síncrona: roda fora do runtime e devolve os eventos
                let (tx, rx) = std::sync::mpsc::channel::<AugmentEvent>();
                let worker = Arc::clone(&state);
                let handle = tokio::task::spawn_blocking(move || {
                    let mut rng = worker.next_rng();
                    worker.augmentor.augment_streaming(&span_text, category, &mut rng, tx);
                });
                handle.await.ok();

                let events: Vec<AugmentEvent> = rx.try_iter().collect();
                for event in &events {
                    if let Ok(json) = serde_json::to_string(event) {
                        if socket.send(Message::Text(json)).await.is_err() {
                            return; // cliente desconectou
                        }
                        // Pausa para a animação passo a passo
                        tokio::time::sleep(tokio::time::Duration::from_millis(35)).await;
                    }
                }
            }
            Message::Close(_) => {
                info!("WebSocket desconectado");
                return;
            }
            Message::Ping(payload) => {
                let _ = socket.send(Message::Pong(payload)).await;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(text: &str, category: &str) -> AugmentRequest {
        AugmentRequest {
            text: text.to_string(),
            category: category.to_string(),
        }
    }

    #[test]
    fn test_parse_request() {
        let (text, category) = parse_request(&request("  Москве ", "LOC")).unwrap();
        assert_eq!(text, "Москве");
        assert_eq!(category, InputCategory::Loc);
    }

    #[test]
    fn test_parse_request_rejects_bad_input() {
        assert!(parse_request(&request("   ", "PER")).is_err());
        let err = parse_request(&request("Иванов", "ORG")).unwrap_err();
        assert!(err.contains("ORG"));
    }

    #[test]
    fn test_requests_use_distinct_streams() {
        use rand::Rng;

        let state = AppState {
            augmentor: NerAugmentor::new(AugmentorConfig::default()).unwrap(),
            requests: AtomicU64::new(0),
        };
        let a: u64 = state.next_rng().gen();
        let b: u64 = state.next_rng().gen();
        assert_ne!(a, b);
        assert_eq!(state.requests.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn test_batch_requests_do_not_repeat() {
        let state = AppState {
            augmentor: NerAugmentor::new(AugmentorConfig::default()).unwrap(),
            requests: AtomicU64::new(0),
        };
        let rows: Vec<NerRow> = demo_sentences().into_iter().map(|s| s.row).collect();
        let first = state.augmentor.augment_rows(&rows, &mut state.next_rng()).unwrap();
        let second = state.augmentor.augment_rows(&rows, &mut state.next_rng()).unwrap();
        assert_ne!(first, second);
    }
}
