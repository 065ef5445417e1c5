//! Word-tile board game backend.
//!
//! The [`game`] module is the move-resolution engine: racks, a 15x15 board,
//! the per-turn placement ledger, word extraction, dictionary-backed scoring
//! and the commit/skip state machine. The rest hosts single-player sessions
//! over HTTP and WebSocket.

pub mod config;
pub mod dictionary;
pub mod game;
pub mod routes;
pub mod session;
pub mod utils;
pub mod websocket;

use std::{sync::Arc, time::Duration};

use axum::{routing::get, Router};
use dashmap::DashMap;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use uuid::Uuid;

use config::Config;
use dictionary::{HttpDictionary, WordListDictionary};
use game::WordValidator;
use session::GameSession;

/// Application state shared across all handlers
pub struct AppState {
    pub config: Config,
    pub validator: WordValidator,
    pub sessions: DashMap<Uuid, Arc<GameSession>>,
}

impl AppState {
    pub fn new(config: Config, validator: WordValidator) -> Self {
        Self {
            config,
            validator,
            sessions: DashMap::new(),
        }
    }

    /// Start a fresh game and register it
    pub fn create_session(&self) -> Arc<GameSession> {
        let session = Arc::new(GameSession::new(self.config.rules()));
        self.sessions.insert(session.game_id, session.clone());
        tracing::info!("Created game {}", session.game_id);
        session
    }

    pub fn session(&self, game_id: &Uuid) -> Option<Arc<GameSession>> {
        self.sessions.get(game_id).map(|entry| entry.value().clone())
    }

    /// Drop sessions idle for longer than `max_idle`, returning their IDs.
    /// A session with a socket attached is never idle.
    pub async fn reap_idle_sessions(&self, max_idle: Duration) -> Vec<Uuid> {
        let stale: Vec<Uuid> = self
            .sessions
            .iter()
            .filter(|entry| {
                let session = entry.value();
                !session.has_live_socket() && session.idle_for() > max_idle
            })
            .map(|entry| *entry.key())
            .collect();

        for game_id in &stale {
            if let Some((_, session)) = self.sessions.remove(game_id) {
                session.end().await;
                tracing::info!("Removed idle game {}", game_id);
            }
        }

        stale
    }
}

/// Pick the dictionary: the HTTP service when a key is configured, otherwise
/// the local word list (empty if it cannot be read).
pub async fn build_validator(config: &Config, http_client: reqwest::Client) -> WordValidator {
    if let Some(api_key) = &config.dictionary.api_key {
        tracing::info!("Using dictionary API at {}", config.dictionary.api_url);
        let dictionary = HttpDictionary::new(http_client, &config.dictionary.api_url, api_key);
        return WordValidator::new(Arc::new(dictionary));
    }

    let dictionary = match WordListDictionary::load(&config.dictionary.word_list_path).await {
        Ok(dict) => {
            tracing::info!("Dictionary loaded successfully");
            dict
        }
        Err(e) => {
            tracing::warn!(
                "Failed to load dictionary: {}. Using empty dictionary for now.",
                e
            );
            tracing::warn!(
                "Set DICTIONARY_API_KEY or download a word list to {} for full functionality",
                config.dictionary.word_list_path
            );
            WordListDictionary::empty()
        }
    };
    WordValidator::new(Arc::new(dictionary))
}

/// Build the full router
pub fn app(state: Arc<AppState>) -> Router {
    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // WebSocket endpoint
        .route("/ws", get(websocket::handle_websocket))
        // API routes
        .merge(routes::create_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Background task that periodically drops idle sessions
pub async fn session_cleanup_task(state: Arc<AppState>) {
    let max_idle = Duration::from_secs(state.config.game.session_idle_secs);
    let mut interval = tokio::time::interval(Duration::from_secs(60));

    loop {
        interval.tick().await;
        state.reap_idle_sessions(max_idle).await;
    }
}
