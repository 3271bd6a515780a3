/// Why a session operation was refused.
///
/// Every kind is a caller-input, authorization, or state-precondition
/// violation: deterministic given current state, reported synchronously,
/// never retried. The transport layer owns the mapping to status codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    InvalidDeck,
    InvalidModeratorName,
    InvalidPlayerName,
    InvalidCard(String),
    SessionNotFound,
    PlayerNotFound,
    RoundNotOpen,
    RoundAlreadyOpen,
    NotAuthorized,
    CannotRemoveModerator,
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDeck => write!(f, "deck must contain at least one card"),
            Self::InvalidModeratorName => write!(f, "moderator name must not be empty"),
            Self::InvalidPlayerName => write!(f, "player name must not be empty"),
            Self::InvalidCard(card) => write!(f, "card {:?} is not in this game's deck", card),
            Self::SessionNotFound => write!(f, "no such game"),
            Self::PlayerNotFound => write!(f, "no such player in this game"),
            Self::RoundNotOpen => write!(f, "no open round"),
            Self::RoundAlreadyOpen => write!(f, "a round is already open"),
            Self::NotAuthorized => write!(f, "only the moderator may do this"),
            Self::CannotRemoveModerator => write!(f, "the moderator cannot leave the game"),
        }
    }
}

impl std::error::Error for SessionError {}
