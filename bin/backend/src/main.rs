//! Planning Poker Backend
//!
//! Serves the planning poker JSON API.
//! Runs on BIND_ADDR (default 127.0.0.1:8080).

#[tokio::main]
async fn main() {
    ppk_core::log();
    ppk_core::halt();
    ppk_server::run().await.unwrap();
}
