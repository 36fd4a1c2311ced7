//! Interactive chat entry point.
//!
//! Reads one free-text complaint per line from stdin and prints one generated
//! clinic recommendation. The collection must be populated beforehand by the
//! `build-index` binary; this process never rebuilds the index.

mod session;

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use advisor::{Advisor, DEFAULT_TOP_K};
use ai_llm_service::LlmServiceProfiles;
use anyhow::bail;
use clinic_store::{ClinicStore, GeminiEmbedder, GeminiEmbedderConfig, StoreConfig};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::session::{Role, Transcript};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Environment variables may come from a .env file or the process env.
    dotenvy::dotenv().ok();
    init_tracing();

    // Credential problems must surface before any other interface is touched.
    let svc = LlmServiceProfiles::from_env()?;

    let cfg = StoreConfig::from_env();
    let embedder = Arc::new(GeminiEmbedder::new(GeminiEmbedderConfig {
        svc: svc.clone(),
        dim: cfg.embedding_dim,
    }));
    let store = ClinicStore::new(cfg)?;

    match store.count().await? {
        Some(points) if points > 0 => {
            tracing::info!(
                "Collection '{}' loaded with {} symptoms",
                store.collection(),
                points
            );
        }
        _ => bail!(
            "collection '{}' is missing or empty; run `cargo run --bin build-index` first",
            store.collection()
        ),
    }

    let top_k = std::env::var("RAG_TOP_K")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_TOP_K);

    let advisor = Advisor::new(Arc::new(store), embedder, svc, top_k);
    chat_loop(&advisor).await
}

async fn chat_loop(advisor: &Advisor) -> anyhow::Result<()> {
    println!("Describe your complaint and I will suggest a clinic to visit.");
    println!("Commands: /history to review this session, /quit to exit.\n");

    let mut transcript = Transcript::default();
    let stdin = io::stdin();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        match input {
            "/quit" | "/exit" => break,
            "/history" => {
                if transcript.is_empty() {
                    println!("(no messages yet)\n");
                } else {
                    for turn in transcript.turns() {
                        println!("{}: {}", turn.role.label(), turn.content);
                    }
                    println!();
                }
                continue;
            }
            _ => {}
        }

        transcript.push(Role::User, input);
        let answer = advisor.recommend(input).await;
        println!("{answer}\n");
        transcript.push(Role::Assistant, answer);
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .init();
}
