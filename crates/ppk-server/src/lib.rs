//! HTTP transport for the planning poker engine.
//!
//! Realizes the engine's operation contracts as a JSON API: every route
//! resolves a game through the shared [`Lobby`], invokes one engine
//! operation, and answers with the updated snapshot or a typed error
//! mapped to its status class.
//!
//! ## Routes
//!
//! - `POST /new_game` — create a game, creator becomes moderator
//! - `GET  /game/{id}` — current snapshot
//! - `POST /game/{id}/join` · `/leave` — roster changes
//! - `POST /game/{id}/start_round` · `/vote` · `/reveal` — round lifecycle
//! - `POST /game/{id}/close` — remove the game
//! - `GET  /status` · `/health` — liveness and live-game count
mod dto;
pub mod handlers;

pub use dto::*;

use actix_cors::Cors;
use actix_web::App;
use actix_web::HttpServer;
use actix_web::middleware::Logger;
use actix_web::web;
use ppk_engine::Lobby;

pub async fn run() -> Result<(), std::io::Error> {
    let lobby = web::Data::new(Lobby::new());
    log::info!("starting planning poker server");
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::new("%r %s %Ts"))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header(),
            )
            .app_data(lobby.clone())
            .route("/health", web::get().to(handlers::health))
            .route("/status", web::get().to(handlers::status))
            .route("/new_game", web::post().to(handlers::new_game))
            .service(
                web::scope("/game")
                    .route("/{game_id}", web::get().to(handlers::game))
                    .route("/{game_id}/join", web::post().to(handlers::join))
                    .route("/{game_id}/leave", web::post().to(handlers::leave))
                    .route("/{game_id}/start_round", web::post().to(handlers::start_round))
                    .route("/{game_id}/vote", web::post().to(handlers::vote))
                    .route("/{game_id}/reveal", web::post().to(handlers::reveal))
                    .route("/{game_id}/close", web::post().to(handlers::close)),
            )
    })
    .workers(4)
    .bind(std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string()))?
    .run()
    .await
}
