use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use inspira_core::{ChatMessage, ChatRole};
use serde::Deserialize;

use super::print_json;
use crate::AiSearchArgs;
use crate::app::App;
use crate::images::{read_image, read_images, save_images};

pub(crate) async fn run_ai_search_screens(app: &App, args: AiSearchArgs) -> Result<()> {
    let outcome =
        app.ai_search.search_screens(&args.requirement, args.page, args.page_size).await?;
    print_json(&outcome)
}

pub(crate) async fn run_ai_search_projects(app: &App, args: AiSearchArgs) -> Result<()> {
    let outcome =
        app.ai_search.search_projects(&args.requirement, args.page, args.page_size).await?;
    print_json(&outcome)
}

/// One earlier turn as stored in a `--history` file.
#[derive(Debug, Deserialize)]
struct HistoryTurn {
    role: ChatRole,
    text: String,
    #[serde(default)]
    images: Vec<PathBuf>,
}

fn load_history(path: &Path) -> Result<Vec<ChatMessage>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read history {}", path.display()))?;
    let turns: Vec<HistoryTurn> = serde_json::from_str(&raw)
        .with_context(|| format!("invalid history file {}", path.display()))?;
    turns
        .into_iter()
        .map(|turn| {
            let mut message = match turn.role {
                ChatRole::User => ChatMessage::user(turn.text),
                ChatRole::Model => ChatMessage::model(turn.text),
            };
            for image in &turn.images {
                message = message.with_image(read_image(image)?);
            }
            Ok(message)
        })
        .collect()
}

pub(crate) async fn run_chat(
    app: &App,
    text: String,
    images: &[PathBuf],
    history: Option<&Path>,
    save_dir: Option<&Path>,
) -> Result<()> {
    let history = history.map(load_history).transpose()?.unwrap_or_default();
    let message =
        read_images(images)?.into_iter().fold(ChatMessage::user(text), ChatMessage::with_image);

    let reply = app.chat.chat(&history, &message).await?;

    let saved = match save_dir {
        Some(dir) if !reply.images.is_empty() => save_images(dir, "reply", &reply.images)?,
        _ => Vec::new(),
    };
    print_json(&serde_json::json!({
        "text": reply.text,
        "images": reply.images.len(),
        "saved": saved,
    }))
}

pub(crate) async fn run_image(
    app: &App,
    prompt: &str,
    references: &[PathBuf],
    out: &Path,
) -> Result<()> {
    let references = read_images(references)?;
    let reply = app.chat.generate_image(prompt, &references).await?;
    let saved = save_images(out, "image", &reply.images)?;
    tracing::info!(count = saved.len(), dir = %out.display(), "images saved");
    print_json(&serde_json::json!({ "text": reply.text, "saved": saved }))
}
