use super::*;
use ppk_core::Unique;
use serde::Serialize;

/// Immutable view of a game: the one shape that crosses the engine
/// boundary. Clients render exclusively from this and never see the
/// engine's internal types.
///
/// While a round is open, only the identifiers of players who have voted
/// are exposed; chosen cards stay hidden until the reveal so estimation
/// stays blind.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub id: String,
    pub deck: Vec<String>,
    pub players: Vec<PlayerView>,
    pub rounds: Vec<RoundView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_round: Option<RoundView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub id: String,
    pub name: String,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoundView {
    pub ordinal: u64,
    pub state: RoundState,
    pub votes: Vec<VoteView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consensus: Option<Verdict>,
}

/// A single vote as exposed to clients. `card` is absent while the round
/// is open.
#[derive(Debug, Clone, Serialize)]
pub struct VoteView {
    pub player_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<String>,
}

impl Snapshot {
    pub fn of(session: &Session) -> Self {
        Self {
            id: session.id().to_string(),
            deck: session.deck().labels().to_vec(),
            players: session.players().iter().map(PlayerView::of).collect(),
            rounds: session.history().iter().map(RoundView::of).collect(),
            current_round: session.current().map(RoundView::of),
        }
    }
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("serialize snapshot")
    }
}

impl PlayerView {
    fn of(player: &Player) -> Self {
        Self {
            id: player.id().to_string(),
            name: player.name().to_string(),
            role: player.role(),
        }
    }
}

impl RoundView {
    fn of(round: &Round) -> Self {
        let hidden = round.is_open();
        Self {
            ordinal: round.ordinal(),
            state: round.state(),
            votes: round
                .votes()
                .iter()
                .map(|vote| VoteView {
                    player_id: vote.player.to_string(),
                    card: (!hidden).then(|| vote.card.clone()),
                })
                .collect(),
            consensus: round.verdict().cloned(),
        }
    }
}
