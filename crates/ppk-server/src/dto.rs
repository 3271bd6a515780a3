use serde::Deserialize;

#[derive(Deserialize)]
pub struct NewGameRequest {
    pub cards: Vec<String>,
    pub moderator_name: String,
}

#[derive(Deserialize)]
pub struct JoinRequest {
    pub name: String,
}

#[derive(Deserialize)]
pub struct LeaveRequest {
    pub player_id: uuid::Uuid,
}

#[derive(Deserialize)]
pub struct StartRoundRequest {
    pub player_id: uuid::Uuid,
}

#[derive(Deserialize)]
pub struct VoteRequest {
    pub player_id: uuid::Uuid,
    pub vote: String,
}

#[derive(Deserialize)]
pub struct RevealRequest {
    pub player_id: uuid::Uuid,
}
