use super::*;
use ppk_core::ID;
use ppk_core::Unique;
use serde::Serialize;

/// Participant role within a game. Exactly one moderator per game,
/// assigned to the creator at session creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Moderator,
    Voter,
}

/// Identified participant attached to one game. Identity is the generated
/// id, never the display name, so duplicate names are allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    id: ID<Self>,
    name: String,
    role: Role,
}

impl Player {
    pub fn new(id: ID<Self>, name: String, role: Role) -> Self {
        Self { id, name, role }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn role(&self) -> Role {
        self.role
    }
}

impl Unique for Player {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

/// Insertion-ordered registry of the participants in one game.
/// No concurrency control of its own; always accessed under the owning
/// session's lock.
#[derive(Debug, Default)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    pub fn insert(&mut self, player: Player) {
        self.players.push(player);
    }
    /// Remove a player by id. The moderator can never be removed; they
    /// close the game instead of vanishing from it.
    pub fn remove(&mut self, id: ID<Player>) -> Result<Player, SessionError> {
        match self.players.iter().position(|p| p.id() == id) {
            Some(i) if self.players[i].role() == Role::Moderator => {
                Err(SessionError::CannotRemoveModerator)
            }
            Some(i) => Ok(self.players.remove(i)),
            None => Err(SessionError::PlayerNotFound),
        }
    }
    pub fn contains(&self, id: ID<Player>) -> bool {
        self.players.iter().any(|p| p.id() == id)
    }
    pub fn is_moderator(&self, id: ID<Player>) -> bool {
        self.players
            .iter()
            .any(|p| p.id() == id && p.role() == Role::Moderator)
    }
    /// Identifiers of currently registered voters, in join order. This is
    /// what a round captures as its required-voter set when it opens.
    pub fn voters(&self) -> Vec<ID<Player>> {
        self.players
            .iter()
            .filter(|p| p.role() == Role::Voter)
            .map(Player::id)
            .collect()
    }
    pub fn players(&self) -> &[Player] {
        &self.players
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> (Roster, ID<Player>, ID<Player>) {
        let moderator = Player::new(ID::default(), "mod".to_string(), Role::Moderator);
        let voter = Player::new(ID::default(), "ann".to_string(), Role::Voter);
        let (mid, vid) = (moderator.id(), voter.id());
        let mut roster = Roster::default();
        roster.insert(moderator);
        roster.insert(voter);
        (roster, mid, vid)
    }

    #[test]
    fn remove_unknown_player() {
        let (mut roster, _, _) = roster();
        assert_eq!(roster.remove(ID::default()), Err(SessionError::PlayerNotFound));
    }
    #[test]
    fn remove_moderator_refused() {
        let (mut roster, moderator, _) = roster();
        assert_eq!(
            roster.remove(moderator),
            Err(SessionError::CannotRemoveModerator)
        );
        assert!(roster.contains(moderator));
    }
    #[test]
    fn voters_excludes_moderator() {
        let (roster, _, voter) = roster();
        assert_eq!(roster.voters(), vec![voter]);
    }
    #[test]
    fn duplicate_names_coexist() {
        let (mut roster, _, first) = roster();
        let twin = Player::new(ID::default(), "ann".to_string(), Role::Voter);
        let second = twin.id();
        roster.insert(twin);
        assert!(roster.contains(first));
        assert!(roster.contains(second));
        assert_eq!(roster.voters().len(), 2);
    }
}
