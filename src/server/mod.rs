// src/server/mod.rs

use crate::board::Board;
use crate::render::{render_page, PageOptions};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::{convert::Infallible, net::SocketAddr, sync::Arc};
use tokio::task::JoinHandle;
use tracing::info;
use warp::{reject::Rejection, reply::Reply, Filter};

#[derive(Debug, Default, Deserialize)]
struct PageQuery {
    banner: Option<String>,
}

impl PageQuery {
    fn show_banner(&self) -> bool {
        !matches!(self.banner.as_deref(), Some("hidden"))
    }
}

fn with_board(board: Arc<Board>) -> impl Filter<Extract = (Arc<Board>,), Error = Infallible> + Clone {
    warp::any().map(move || board.clone())
}

fn with_options(
    options: PageOptions,
) -> impl Filter<Extract = (PageOptions,), Error = Infallible> + Clone {
    warp::any().map(move || options.clone())
}

async fn health_check() -> Result<impl Reply, Rejection> {
    Ok(warp::reply::json(&serde_json::json!({
        "status": "healthy",
        "service": "buildboard"
    })))
}

async fn page(
    query: PageQuery,
    board: Arc<Board>,
    options: PageOptions,
) -> Result<impl Reply, Rejection> {
    let state = board.snapshot().await;
    let options = options.with_banner(query.show_banner());
    Ok(warp::reply::html(render_page(&state, &options)))
}

async fn projects(board: Arc<Board>) -> Result<impl Reply, Rejection> {
    Ok(warp::reply::json(&board.snapshot().await))
}

async fn refresh(board: Arc<Board>) -> Result<impl Reply, Rejection> {
    info!("manual refresh requested");
    Ok(warp::reply::json(&board.refresh().await))
}

/// All HTTP routes of the board.
pub fn routes(
    board: Arc<Board>,
    options: PageOptions,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let health = warp::path!("health")
        .and(warp::get())
        .and_then(health_check);

    let api = warp::path!("api" / "projects")
        .and(warp::get())
        .and(with_board(board.clone()))
        .and_then(projects);

    let manual_refresh = warp::path!("refresh")
        .and(warp::post())
        .and(with_board(board.clone()))
        .and_then(refresh);

    let index = warp::path::end()
        .and(warp::get())
        .and(warp::query::<PageQuery>())
        .and(with_board(board))
        .and(with_options(options))
        .and_then(page);

    health
        .or(api)
        .or(manual_refresh)
        .or(index)
        .with(warp::trace::request())
}

/// Kick off the first fetch cycle without waiting for it.
pub fn spawn_initial_fetch(board: Arc<Board>) -> JoinHandle<()> {
    tokio::spawn(async move {
        board.refresh().await;
    })
}

/// Start the first fetch cycle in the background, then serve until the process exits.
pub async fn serve(board: Arc<Board>, options: PageOptions, addr: SocketAddr) -> Result<()> {
    spawn_initial_fetch(board.clone());

    let (bound, server) = warp::serve(routes(board, options))
        .try_bind_ephemeral(addr)
        .with_context(|| format!("binding {}", addr))?;

    info!("Server listening on http://{}", bound);
    info!("Health check: http://{}/health", bound);
    server.await;
    Ok(())
}
