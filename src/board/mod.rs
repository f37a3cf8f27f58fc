// src/board/mod.rs

use crate::config::Config;
use crate::fetch;
use crate::process::{normalize_rows, parse_rows, ProjectRecord};
use anyhow::Result;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::{sync::RwLock, time::Instant};
use tracing::{debug, error, info};
use url::Url;

/// Shown to visitors whenever a fetch cycle fails, whatever the cause.
pub const FETCH_ERROR_MESSAGE: &str = "Failed to load projects. Please try again later.";

/// What the page currently shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardState {
    pub loading: bool,
    pub error: Option<String>,
    pub projects: Vec<ProjectRecord>,
    pub last_fetch: Option<DateTime<Utc>>,
}

impl Default for BoardState {
    fn default() -> Self {
        Self {
            loading: true,
            error: None,
            projects: Vec::new(),
            last_fetch: None,
        }
    }
}

/// Which projects-section variant to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View<'a> {
    Error(&'a str),
    Loading,
    Empty,
    Projects(&'a [ProjectRecord]),
}

impl BoardState {
    /// Error wins over loading, loading over the empty notice.
    pub fn view(&self) -> View<'_> {
        if let Some(msg) = &self.error {
            View::Error(msg)
        } else if self.loading {
            View::Loading
        } else if self.projects.is_empty() {
            View::Empty
        } else {
            View::Projects(&self.projects)
        }
    }
}

/// Fetch, parse and normalize the sheet once.
pub async fn load_projects(client: &Client, source: &Url) -> Result<Vec<ProjectRecord>> {
    let text = fetch::fetch_csv(client, source).await?;
    let rows = parse_rows(&text)?;
    let projects = normalize_rows(&rows);
    info!(rows = rows.len(), projects = projects.len(), "loaded sheet");
    Ok(projects)
}

/// The published board plus what it needs to refresh itself.
pub struct Board {
    client: Client,
    source: Url,
    state: RwLock<BoardState>,
    /// Token of the most recently started fetch cycle.
    cycle: AtomicU64,
}

impl Board {
    pub fn new(config: &Config) -> Result<Self> {
        let client = fetch::build_client(config.timeout)?;
        Ok(Self::with_client(client, config.sheet_url.clone()))
    }

    pub fn with_client(client: Client, source: Url) -> Self {
        Self {
            client,
            source,
            state: RwLock::new(BoardState::default()),
            cycle: AtomicU64::new(0),
        }
    }

    pub async fn snapshot(&self) -> BoardState {
        self.state.read().await.clone()
    }

    /// Run one fetch cycle and publish its result.
    ///
    /// Only the most recently started cycle may publish; a cycle overtaken by a newer
    /// one drops its result and returns the current snapshot instead.
    #[tracing::instrument(level = "info", skip(self), fields(source = %self.source))]
    pub async fn refresh(&self) -> BoardState {
        let cycle = self.cycle.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.state.write().await;
            state.loading = true;
            state.error = None;
        }

        let start = Instant::now();
        let outcome = load_projects(&self.client, &self.source).await;

        let mut state = self.state.write().await;
        if self.cycle.load(Ordering::SeqCst) != cycle {
            debug!(cycle, "fetch cycle superseded; dropping result");
            return state.clone();
        }

        match outcome {
            Ok(projects) => {
                info!(cycle, projects = projects.len(), elapsed = ?start.elapsed(), "published projects");
                state.projects = projects;
                state.last_fetch = Some(Utc::now());
            }
            Err(e) => {
                error!(cycle, elapsed = ?start.elapsed(), "Error fetching projects: {:#}", e);
                state.projects.clear();
                state.error = Some(FETCH_ERROR_MESSAGE.to_string());
            }
        }
        state.loading = false;
        state.clone()
    }
}
