use super::*;
use ppk_core::ID;
use serde::Serialize;

/// Lifecycle of a voting round. Revealed is terminal; a new round must be
/// started instead of reopening an old one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundState {
    Open,
    Revealed,
}

/// One recorded vote: who voted, and for which card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vote {
    pub player: ID<Player>,
    pub card: String,
}

/// Outcome of a revealed round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Verdict {
    /// Nobody voted before the reveal.
    NoVotes,
    /// Every recorded vote chose the same card. Non-voters are ignored,
    /// not treated as dissent.
    Unanimous { card: String },
    /// Votes disagree. Tally is ordered by descending count, ties broken
    /// by deck order.
    Split { tally: Vec<Tally> },
}

/// How many votes one card received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub card: String,
    pub count: usize,
}

/// One voting cycle: open for votes, then revealed with a fixed verdict.
#[derive(Debug)]
pub struct Round {
    ordinal: u64,
    state: RoundState,
    votes: Vec<Vote>,
    required: Vec<ID<Player>>,
    verdict: Option<Verdict>,
}

impl Round {
    /// Open a round. `required` is the snapshot of voter ids registered at
    /// start time; it never changes for the round's lifetime.
    pub fn open(ordinal: u64, required: Vec<ID<Player>>) -> Self {
        Self {
            ordinal,
            state: RoundState::Open,
            votes: Vec::new(),
            required,
            verdict: None,
        }
    }
    pub fn ordinal(&self) -> u64 {
        self.ordinal
    }
    pub fn state(&self) -> RoundState {
        self.state
    }
    pub fn is_open(&self) -> bool {
        self.state == RoundState::Open
    }
    pub fn votes(&self) -> &[Vote] {
        &self.votes
    }
    pub fn voted(&self, player: ID<Player>) -> bool {
        self.votes.iter().any(|v| v.player == player)
    }
    pub fn verdict(&self) -> Option<&Verdict> {
        self.verdict.as_ref()
    }
    /// Record or overwrite a player's vote. Last write wins while open.
    pub fn record(&mut self, player: ID<Player>, card: String) {
        match self.votes.iter_mut().find(|v| v.player == player) {
            Some(vote) => vote.card = card,
            None => self.votes.push(Vote { player, card }),
        }
    }
    /// Whether every required voter still present in the roster has voted.
    /// Voters who left since the round started are not waited on; their
    /// recorded votes are retained. A round whose remaining required set is
    /// empty never completes on its own.
    pub fn covered(&self, roster: &Roster) -> bool {
        let pending = self
            .required
            .iter()
            .filter(|id| roster.contains(**id))
            .collect::<Vec<_>>();
        !pending.is_empty() && pending.into_iter().all(|id| self.voted(*id))
    }
    /// Transition to Revealed and fix the verdict. The vote mapping is
    /// immutable from here on.
    pub fn reveal(&mut self, deck: &Deck) {
        self.state = RoundState::Revealed;
        self.verdict = Some(self.consensus(deck));
    }
    /// Group votes by card and derive the verdict. Walking the deck in
    /// order before the stable sort is what makes tie order deterministic.
    fn consensus(&self, deck: &Deck) -> Verdict {
        let mut tally = deck
            .labels()
            .iter()
            .map(|label| Tally {
                card: label.clone(),
                count: self.votes.iter().filter(|v| &v.card == label).count(),
            })
            .filter(|t| t.count > 0)
            .collect::<Vec<_>>();
        tally.sort_by(|a, b| b.count.cmp(&a.count));
        match tally.len() {
            0 => Verdict::NoVotes,
            1 => Verdict::Unanimous {
                card: tally.remove(0).card,
            },
            _ => Verdict::Split { tally },
        }
    }
}
