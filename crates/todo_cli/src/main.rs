//! Task list server entry point.
//!
//! # Responsibility
//! - Read `TODO_*` environment configuration.
//! - Start logging, open the task store and serve the HTTP API.

use log::info;
use std::error::Error;
use todo_api::{AppState, ServerConfig};
use todo_core::db::open_db;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = ServerConfig::from_env()?;

    match config.log_dir.as_deref() {
        Some(dir) => todo_core::init_logging(&config.log_level, dir)?,
        None => todo_core::init_console_logging(&config.log_level)?,
    }

    let conn = open_db(&config.db_path)?;
    let state = AppState::new(conn, config.user_header.clone());

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!(
        "event=server_listen module=cli status=ok addr={} db_path={} user_header={}",
        config.bind_addr,
        config.db_path.display(),
        config.user_header.as_str()
    );
    todo_api::serve(listener, state).await?;
    Ok(())
}
