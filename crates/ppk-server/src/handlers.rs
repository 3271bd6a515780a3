use super::*;
use ppk_core::ID;
use ppk_engine::Lobby;
use ppk_engine::Session;
use ppk_engine::SessionError;
use actix_web::HttpResponse;
use actix_web::Responder;
use actix_web::web;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Map an engine error to its status class: validation 400, lookup 404,
/// state precondition 409, authorization 403.
fn refuse(err: SessionError) -> HttpResponse {
    let body = serde_json::json!({ "error": err.to_string() });
    match err {
        SessionError::InvalidDeck
        | SessionError::InvalidModeratorName
        | SessionError::InvalidPlayerName
        | SessionError::InvalidCard(_) => HttpResponse::BadRequest().json(body),
        SessionError::SessionNotFound | SessionError::PlayerNotFound => {
            HttpResponse::NotFound().json(body)
        }
        SessionError::RoundNotOpen | SessionError::RoundAlreadyOpen => {
            HttpResponse::Conflict().json(body)
        }
        SessionError::NotAuthorized | SessionError::CannotRemoveModerator => {
            HttpResponse::Forbidden().json(body)
        }
    }
}

async fn resolve(
    lobby: &Lobby,
    id: uuid::Uuid,
) -> Result<Arc<Mutex<Session>>, SessionError> {
    lobby.session(ID::from(id)).await
}

pub async fn new_game(lobby: web::Data<Lobby>, req: web::Json<NewGameRequest>) -> impl Responder {
    let req = req.into_inner();
    match lobby.create(req.cards, &req.moderator_name).await {
        Ok((id, moderator, game)) => HttpResponse::Ok().json(serde_json::json!({
            "game_id": id.to_string(),
            "moderator_id": moderator.to_string(),
            "game": game,
        })),
        Err(e) => refuse(e),
    }
}

pub async fn game(lobby: web::Data<Lobby>, path: web::Path<uuid::Uuid>) -> impl Responder {
    match resolve(&lobby, path.into_inner()).await {
        Ok(session) => {
            let snapshot = session.lock().await.snapshot();
            HttpResponse::Ok().json(serde_json::json!({ "game": snapshot }))
        }
        Err(e) => refuse(e),
    }
}

pub async fn join(
    lobby: web::Data<Lobby>,
    path: web::Path<uuid::Uuid>,
    req: web::Json<JoinRequest>,
) -> impl Responder {
    let session = match resolve(&lobby, path.into_inner()).await {
        Ok(session) => session,
        Err(e) => return refuse(e),
    };
    let joined = session.lock().await.join(&req.name);
    match joined {
        Ok((player, game)) => HttpResponse::Ok().json(serde_json::json!({
            "player_id": player.to_string(),
            "game": game,
        })),
        Err(e) => refuse(e),
    }
}

pub async fn leave(
    lobby: web::Data<Lobby>,
    path: web::Path<uuid::Uuid>,
    req: web::Json<LeaveRequest>,
) -> impl Responder {
    let session = match resolve(&lobby, path.into_inner()).await {
        Ok(session) => session,
        Err(e) => return refuse(e),
    };
    let left = session.lock().await.leave(ID::from(req.player_id));
    match left {
        Ok(game) => HttpResponse::Ok().json(serde_json::json!({ "game": game })),
        Err(e) => refuse(e),
    }
}

pub async fn start_round(
    lobby: web::Data<Lobby>,
    path: web::Path<uuid::Uuid>,
    req: web::Json<StartRoundRequest>,
) -> impl Responder {
    let session = match resolve(&lobby, path.into_inner()).await {
        Ok(session) => session,
        Err(e) => return refuse(e),
    };
    let started = session.lock().await.start_round(ID::from(req.player_id));
    match started {
        Ok(game) => HttpResponse::Ok().json(serde_json::json!({ "game": game })),
        Err(e) => refuse(e),
    }
}

pub async fn vote(
    lobby: web::Data<Lobby>,
    path: web::Path<uuid::Uuid>,
    req: web::Json<VoteRequest>,
) -> impl Responder {
    let session = match resolve(&lobby, path.into_inner()).await {
        Ok(session) => session,
        Err(e) => return refuse(e),
    };
    let cast = session
        .lock()
        .await
        .cast_vote(ID::from(req.player_id), &req.vote);
    match cast {
        Ok(game) => HttpResponse::Ok().json(serde_json::json!({ "game": game })),
        Err(e) => refuse(e),
    }
}

pub async fn reveal(
    lobby: web::Data<Lobby>,
    path: web::Path<uuid::Uuid>,
    req: web::Json<RevealRequest>,
) -> impl Responder {
    let session = match resolve(&lobby, path.into_inner()).await {
        Ok(session) => session,
        Err(e) => return refuse(e),
    };
    let revealed = session.lock().await.reveal(ID::from(req.player_id));
    match revealed {
        Ok(game) => HttpResponse::Ok().json(serde_json::json!({ "game": game })),
        Err(e) => refuse(e),
    }
}

pub async fn close(lobby: web::Data<Lobby>, path: web::Path<uuid::Uuid>) -> impl Responder {
    match lobby.close(ID::from(path.into_inner())).await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "status": "closed" })),
        Err(e) => refuse(e),
    }
}

pub async fn status(lobby: web::Data<Lobby>) -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "games": lobby.count().await }))
}

pub async fn health() -> impl Responder {
    HttpResponse::Ok().body("ok")
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn refuse_maps_status_classes() {
        assert_eq!(refuse(SessionError::InvalidDeck).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            refuse(SessionError::InvalidCard("40".to_string())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            refuse(SessionError::SessionNotFound).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            refuse(SessionError::RoundAlreadyOpen).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            refuse(SessionError::NotAuthorized).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            refuse(SessionError::CannotRemoveModerator).status(),
            StatusCode::FORBIDDEN
        );
    }
}
