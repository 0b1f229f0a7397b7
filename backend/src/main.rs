//! # Backend Service
//!
//! Thin entry point that delegates to lib-web for server setup.

use lib_utils::get_env_or;
use lib_web::{start_server, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let host = get_env_or("HOST", "0.0.0.0");
    let port = get_env_or("PORT", "3001");

    let config = ServerConfig {
        bind_address: format!("{host}:{port}"),
        migrations_path: "migrations",
    };

    start_server(config).await
}
