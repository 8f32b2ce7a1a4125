//! Endpoint HTTP server: verification, dispatch, and reply delivery.

use crate::config::{self, Config};
use crate::corpus::Corpus;
use crate::discord::DiscordClient;
use crate::endpoint::protocol::{
    CommandKind, CommandOption, Interaction, InteractionResponse, InteractionType,
};
use crate::endpoint::verify;
use crate::generate::{generate_reply, ChainGenerator};
use crate::init;
use anyhow::{Context, Result};
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use ed25519_dalek::VerifyingKey;
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;

const SIGNATURE_HEADER: &str = "X-Signature-Ed25519";
const TIMESTAMP_HEADER: &str = "X-Signature-Timestamp";

const MSG_ONE_WORD: &str = "⚠️ Please only provide one word in your prompt";
const MSG_UNKNOWN_WORD: &str = "⚠️ I've never seen that word before!";

/// Shared state for the endpoint (config, key, corpus, follow-up client).
/// The corpus is loaded once before the listener binds and never mutated.
#[derive(Clone)]
pub struct EndpointState {
    pub config: Arc<Config>,
    pub public_key: VerifyingKey,
    pub corpus: Arc<Corpus>,
    pub discord: DiscordClient,
}

/// Run the interaction endpoint; binds to config.endpoint.bind:config.endpoint.port.
/// Requires a configured public key and an initialized corpus (`babble init`).
/// Blocks until shutdown (e.g. Ctrl+C).
pub async fn run_endpoint(config: Config, config_path: PathBuf) -> Result<()> {
    init::require_initialized(&config_path, &config)?;

    let key_hex = config::resolve_public_key(&config)
        .context("discord.publicKey (or DISCORD_PUBLIC_KEY) is required to verify requests")?;
    let public_key = verify::parse_public_key(&key_hex)
        .map_err(|e| anyhow::anyhow!("discord.publicKey: {}", e))?;

    let corpus_path = config::resolve_corpus_path(&config, &config_path);
    let corpus = Arc::new(Corpus::load(&corpus_path)?);

    let application_id = config::resolve_application_id(&config).unwrap_or_default();
    let bot_token = config::resolve_bot_token(&config);
    let discord = DiscordClient::new(application_id, bot_token);
    if config.discord.defer_replies && !discord.can_follow_up() {
        log::warn!(
            "deferReplies is set but applicationId/botToken are missing; replying synchronously"
        );
    }

    let bind_addr = format!("{}:{}", config.endpoint.bind.trim(), config.endpoint.port);
    let state = EndpointState {
        config: Arc::new(config),
        public_key,
        corpus,
        discord,
    };

    let app = Router::new()
        .route("/", get(health_http))
        .route("/api/interactions", post(interaction_handler))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding to {}", bind_addr))?;
    log::info!("interaction endpoint listening on {}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("endpoint server exited")?;
    log::info!("endpoint stopped");
    Ok(())
}

/// Future that completes when the process should shut down (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    log::info!("shutdown signal received, draining connections");
}

/// GET / returns a simple health JSON (for probes).
async fn health_http(State(state): State<EndpointState>) -> Json<serde_json::Value> {
    Json(json!({
        "runtime": "running",
        "words": state.corpus.len(),
        "port": state.config.endpoint.port,
    }))
}

/// POST /api/interactions — verify the signature over the raw bytes, then
/// dispatch by interaction type. Browsers get redirected before verification.
async fn interaction_handler(
    State(state): State<EndpointState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let browser = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(|ua| ua.starts_with("Mozilla"))
        .unwrap_or(false);
    if browser {
        return Redirect::temporary(&state.config.endpoint.landing_url).into_response();
    }

    let signature = headers.get(SIGNATURE_HEADER).and_then(|v| v.to_str().ok());
    let timestamp = headers.get(TIMESTAMP_HEADER).and_then(|v| v.to_str().ok());
    if !verify::verify(&state.public_key, signature, timestamp, &body) {
        log::debug!("rejecting interaction with missing or invalid signature");
        return (StatusCode::UNAUTHORIZED, "invalid request signature").into_response();
    }

    let interaction: Interaction = match serde_json::from_slice(&body) {
        Ok(i) => i,
        Err(e) => {
            log::debug!("unparseable interaction body: {}", e);
            return StatusCode::BAD_REQUEST.into_response();
        }
    };

    match interaction.typ {
        InteractionType::Ping => Json(InteractionResponse::pong()).into_response(),
        InteractionType::ApplicationCommand => handle_command(state, interaction).await,
        InteractionType::Unknown(t) => {
            // Components, autocomplete, etc. are not registered for this app;
            // reject loudly rather than dropping the request without a reply.
            log::warn!("unrecognized interaction type {}, rejecting", t);
            StatusCode::BAD_REQUEST.into_response()
        }
    }
}

/// Handle an application command: extract and validate the prompt, then reply
/// synchronously or acknowledge deferred and deliver via follow-up.
async fn handle_command(state: EndpointState, interaction: Interaction) -> Response {
    let Some(data) = interaction.data else {
        log::debug!("command interaction without data payload");
        return StatusCode::BAD_REQUEST.into_response();
    };
    if data.typ != CommandKind::ChatInput {
        // Context-menu and other subtypes: authenticated but not ours; empty ack.
        return StatusCode::OK.into_response();
    }

    let prompt = data
        .options
        .first()
        .and_then(CommandOption::string_value)
        .map(str::to_string)
        .filter(|s| !s.is_empty());

    if let Some(ref word) = prompt {
        if word.split_whitespace().count() > 1 {
            return Json(InteractionResponse::ephemeral(MSG_ONE_WORD)).into_response();
        }
        if !state.corpus.contains(word) {
            return Json(InteractionResponse::ephemeral(MSG_UNKNOWN_WORD)).into_response();
        }
    }

    let max_attempts = state.config.generation.attempt_bound();
    if state.config.discord.defer_replies && state.discord.can_follow_up() {
        // Ack now to stay inside the platform's response window; the real
        // content goes out via the follow-up token. Once the ack is written
        // this task runs to completion; delivery failure is logged, not
        // surfaced (the HTTP response has already gone out).
        let token = interaction.token.clone();
        let corpus = state.corpus.clone();
        let discord = state.discord.clone();
        tokio::spawn(async move {
            let generator = ChainGenerator::new(corpus);
            let reply = generate_reply(&generator, prompt.as_deref(), max_attempts);
            if let Err(e) = discord.edit_original_response(&token, &reply).await {
                log::warn!("follow-up delivery failed: {}", e);
            }
        });
        Json(InteractionResponse::deferred()).into_response()
    } else {
        let generator = ChainGenerator::new(state.corpus.clone());
        let reply = generate_reply(&generator, prompt.as_deref(), max_attempts);
        Json(InteractionResponse::message(reply)).into_response()
    }
}
