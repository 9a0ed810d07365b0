//! Notifications with background log writes

use crate::api::ApiState;
use anyhow::{Context, Result};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::path::{Path as FsPath, PathBuf};
use std::sync::Arc;
use tokio::{fs::OpenOptions, io::AsyncWriteExt, task::JoinHandle};
use tracing::{debug, warn};

/// Append-only text log written after responses are sent
#[derive(Debug)]
pub struct NotificationLog {
    path: PathBuf,
}

impl NotificationLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &FsPath {
        &self.path
    }

    /// Append messages in order
    pub async fn append(&self, messages: &[String]) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .with_context(|| format!("Failed to open {}", self.path.display()))?;

        for message in messages {
            file.write_all(message.as_bytes())
                .await
                .context("Failed to write notification log")?;
        }
        file.flush().await?;
        Ok(())
    }

    /// Run `append` on a detached task; failures are logged, never surfaced
    pub fn spawn_append(self: &Arc<Self>, messages: Vec<String>) -> JoinHandle<()> {
        let log = Arc::clone(self);
        tokio::spawn(async move {
            if let Err(e) = log.append(&messages).await {
                warn!("Background log write failed: {:#}", e);
            } else {
                debug!("Wrote {} notification log lines", messages.len());
            }
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct NotificationQuery {
    pub q: Option<String>,
}

/// POST /notifications/send-notification/:email
pub async fn send_notification(
    State(state): State<ApiState>,
    Path(email): Path<String>,
    Query(query): Query<NotificationQuery>,
) -> Json<Value> {
    let mut messages = Vec::with_capacity(2);
    if let Some(q) = query.q.filter(|q| !q.is_empty()) {
        messages.push(format!("found query: {q}\n"));
    }
    messages.push(format!("message to {email}\n"));

    state.notification_log.spawn_append(messages);

    Json(json!({ "message": "Message sent" }))
}
