use super::*;
use ppk_core::ID;
use ppk_core::Unique;

/// One planning poker game: the aggregate owning the deck, the roster,
/// and the round history. All mutating operations run under the lobby's
/// per-session lock and return an immutable [`Snapshot`] on success, so
/// no caller ever observes a half-applied transition.
#[derive(Debug)]
pub struct Session {
    id: ID<Self>,
    deck: Deck,
    roster: Roster,
    history: Vec<Round>,
    current: Option<Round>,
}

impl Session {
    /// Create a game with a validated deck and register its creator as the
    /// moderator. Returns the session together with the moderator's id.
    pub fn create(
        id: ID<Self>,
        cards: Vec<String>,
        moderator: &str,
    ) -> Result<(Self, ID<Player>), SessionError> {
        let deck = Deck::new(cards)?;
        let name = moderator.trim();
        if name.is_empty() {
            return Err(SessionError::InvalidModeratorName);
        }
        let player = Player::new(ID::default(), name.to_string(), Role::Moderator);
        let creator = player.id();
        let mut roster = Roster::default();
        roster.insert(player);
        let session = Self {
            id,
            deck,
            roster,
            history: Vec::new(),
            current: None,
        };
        Ok((session, creator))
    }

    /// Register a new voter. Duplicate display names are allowed; identity
    /// is the generated id, not the name. Joining never changes the
    /// required-voter set of an already-open round.
    pub fn join(&mut self, name: &str) -> Result<(ID<Player>, Snapshot), SessionError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SessionError::InvalidPlayerName);
        }
        let player = Player::new(ID::default(), name.to_string(), Role::Voter);
        let id = player.id();
        self.roster.insert(player);
        log::debug!("[session {}] player {} joined as {:?}", self.id, id, name);
        Ok((id, self.snapshot()))
    }

    /// Remove a voter. Votes they already cast are retained; the open
    /// round stops waiting on them, which can complete it.
    pub fn leave(&mut self, player: ID<Player>) -> Result<Snapshot, SessionError> {
        self.roster.remove(player)?;
        log::debug!("[session {}] player {} left", self.id, player);
        self.autoreveal();
        Ok(self.snapshot())
    }

    /// Open the next round. Moderator only. The required-voter set is
    /// captured here as the voters registered right now.
    pub fn start_round(&mut self, caller: ID<Player>) -> Result<Snapshot, SessionError> {
        self.authorize(caller)?;
        if self.current.is_some() {
            return Err(SessionError::RoundAlreadyOpen);
        }
        let ordinal = self.history.len() as u64;
        self.current = Some(Round::open(ordinal, self.roster.voters()));
        log::debug!("[session {}] round {} opened", self.id, ordinal);
        Ok(self.snapshot())
    }

    /// Record a vote in the open round, overwriting any earlier vote by
    /// the same player. The moderator may vote too. Completes the round
    /// once every required voter has voted.
    pub fn cast_vote(&mut self, player: ID<Player>, card: &str) -> Result<Snapshot, SessionError> {
        if self.current.is_none() {
            return Err(SessionError::RoundNotOpen);
        }
        if !self.roster.contains(player) {
            return Err(SessionError::PlayerNotFound);
        }
        if !self.deck.contains(card) {
            return Err(SessionError::InvalidCard(card.to_string()));
        }
        if let Some(round) = self.current.as_mut() {
            round.record(player, card.to_string());
        }
        log::debug!("[session {}] vote recorded for {}", self.id, player);
        self.autoreveal();
        Ok(self.snapshot())
    }

    /// Reveal the open round early. Moderator only. Revealing with zero
    /// votes is allowed and yields a NoVotes verdict.
    pub fn reveal(&mut self, caller: ID<Player>) -> Result<Snapshot, SessionError> {
        self.authorize(caller)?;
        let mut round = self.current.take().ok_or(SessionError::RoundNotOpen)?;
        round.reveal(&self.deck);
        log::info!(
            "[session {}] round {} revealed: {:?}",
            self.id,
            round.ordinal(),
            round.verdict()
        );
        self.history.push(round);
        Ok(self.snapshot())
    }

    /// Point-in-time view of the whole game.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::of(self)
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }
    pub fn players(&self) -> &[Player] {
        self.roster.players()
    }
    pub fn history(&self) -> &[Round] {
        &self.history
    }
    pub fn current(&self) -> Option<&Round> {
        self.current.as_ref()
    }

    fn authorize(&self, caller: ID<Player>) -> Result<(), SessionError> {
        match self.roster.is_moderator(caller) {
            true => Ok(()),
            false => Err(SessionError::NotAuthorized),
        }
    }

    /// Close out the current round if every required voter has now voted.
    fn autoreveal(&mut self) {
        let done = self
            .current
            .as_ref()
            .is_some_and(|round| round.covered(&self.roster));
        if !done {
            return;
        }
        if let Some(mut round) = self.current.take() {
            round.reveal(&self.deck);
            log::info!(
                "[session {}] round {} auto-revealed: {:?}",
                self.id,
                round.ordinal(),
                round.verdict()
            );
            self.history.push(round);
        }
    }
}

impl Unique for Session {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> (Session, ID<Player>) {
        Session::create(
            ID::default(),
            ["1", "2", "3", "5", "8"].map(String::from).to_vec(),
            "mod",
        )
        .unwrap()
    }

    fn with_voters(count: usize) -> (Session, ID<Player>, Vec<ID<Player>>) {
        let (mut session, moderator) = session();
        let voters = (0..count)
            .map(|i| session.join(&format!("voter-{}", i)).unwrap().0)
            .collect();
        (session, moderator, voters)
    }

    #[test]
    fn create_validates_moderator_name() {
        let result = Session::create(ID::default(), vec!["1".to_string()], "   ");
        assert!(matches!(result, Err(SessionError::InvalidModeratorName)));
    }
    #[test]
    fn create_normalizes_deck() {
        let (session, _) = Session::create(
            ID::default(),
            ["  5", "5", "8"].map(String::from).to_vec(),
            "mod",
        )
        .unwrap();
        assert_eq!(session.deck().labels(), ["5".to_string(), "8".to_string()]);
    }
    #[test]
    fn join_rejects_blank_name() {
        let (mut session, _) = session();
        assert!(matches!(
            session.join("  "),
            Err(SessionError::InvalidPlayerName)
        ));
    }
    #[test]
    fn join_allows_duplicate_names() {
        let (mut session, _) = session();
        let (first, _) = session.join("ann").unwrap();
        let (second, _) = session.join("ann").unwrap();
        assert_ne!(first, second);
        assert_eq!(session.players().len(), 3);
    }
    #[test]
    fn moderator_cannot_leave() {
        let (mut session, moderator) = session();
        assert!(matches!(
            session.leave(moderator),
            Err(SessionError::CannotRemoveModerator)
        ));
        assert_eq!(session.players().len(), 1);
    }
    #[test]
    fn leave_unknown_player() {
        let (mut session, _) = session();
        assert!(matches!(
            session.leave(ID::default()),
            Err(SessionError::PlayerNotFound)
        ));
    }
    #[test]
    fn only_moderator_starts_and_reveals() {
        let (mut session, moderator, voters) = with_voters(1);
        assert!(matches!(
            session.start_round(voters[0]),
            Err(SessionError::NotAuthorized)
        ));
        assert!(session.current().is_none());
        session.start_round(moderator).unwrap();
        assert!(matches!(
            session.reveal(voters[0]),
            Err(SessionError::NotAuthorized)
        ));
        assert!(session.current().is_some());
    }
    #[test]
    fn round_already_open() {
        let (mut session, moderator, _) = with_voters(1);
        session.start_round(moderator).unwrap();
        assert!(matches!(
            session.start_round(moderator),
            Err(SessionError::RoundAlreadyOpen)
        ));
    }
    #[test]
    fn ordinals_are_gapless() {
        let (mut session, moderator, _) = with_voters(1);
        for expected in 0u64..3 {
            let snapshot = session.start_round(moderator).unwrap();
            assert_eq!(snapshot.current_round.unwrap().ordinal, expected);
            session.reveal(moderator).unwrap();
        }
        let ordinals = session
            .history()
            .iter()
            .map(Round::ordinal)
            .collect::<Vec<_>>();
        assert_eq!(ordinals, [0, 1, 2]);
    }
    #[test]
    fn vote_requires_open_round() {
        let (mut session, _, voters) = with_voters(1);
        assert!(matches!(
            session.cast_vote(voters[0], "1"),
            Err(SessionError::RoundNotOpen)
        ));
    }
    #[test]
    fn vote_requires_membership_and_valid_card() {
        let (mut session, moderator, voters) = with_voters(2);
        session.start_round(moderator).unwrap();
        assert!(matches!(
            session.cast_vote(ID::default(), "1"),
            Err(SessionError::PlayerNotFound)
        ));
        assert!(matches!(
            session.cast_vote(voters[0], "40"),
            Err(SessionError::InvalidCard(_))
        ));
    }
    #[test]
    fn revote_overwrites_before_reveal() {
        let (mut session, moderator, voters) = with_voters(2);
        session.start_round(moderator).unwrap();
        session.cast_vote(voters[0], "5").unwrap();
        session.cast_vote(voters[0], "8").unwrap();
        let round = session.current().unwrap();
        assert_eq!(round.votes().len(), 1);
        assert_eq!(round.votes()[0].card, "8");
    }
    #[test]
    fn auto_reveal_on_full_coverage() {
        let (mut session, moderator, voters) = with_voters(2);
        session.start_round(moderator).unwrap();
        session.cast_vote(voters[0], "1").unwrap();
        assert!(session.current().is_some());
        session.cast_vote(voters[1], "2").unwrap();
        assert!(session.current().is_none());
        let round = &session.history()[0];
        let tally = match round.verdict() {
            Some(Verdict::Split { tally }) => tally,
            other => panic!("expected split, got {:?}", other),
        };
        assert_eq!(tally.len(), 2);
        assert!(tally.iter().all(|t| t.count == 1));
    }
    #[test]
    fn unanimous_on_agreement() {
        let (mut session, moderator, voters) = with_voters(2);
        session.start_round(moderator).unwrap();
        session.cast_vote(voters[0], "3").unwrap();
        session.cast_vote(voters[1], "3").unwrap();
        assert_eq!(
            session.history()[0].verdict(),
            Some(&Verdict::Unanimous {
                card: "3".to_string()
            })
        );
    }
    #[test]
    fn moderator_vote_counts_but_is_not_required() {
        let (mut session, moderator, voters) = with_voters(1);
        session.start_round(moderator).unwrap();
        session.cast_vote(moderator, "5").unwrap();
        assert!(session.current().is_some());
        session.cast_vote(voters[0], "5").unwrap();
        assert_eq!(
            session.history()[0].verdict(),
            Some(&Verdict::Unanimous {
                card: "5".to_string()
            })
        );
    }
    #[test]
    fn reveal_with_zero_votes() {
        let (mut session, moderator, _) = with_voters(2);
        session.start_round(moderator).unwrap();
        session.reveal(moderator).unwrap();
        assert_eq!(session.history()[0].verdict(), Some(&Verdict::NoVotes));
    }
    #[test]
    fn vote_after_reveal_is_refused() {
        let (mut session, moderator, voters) = with_voters(2);
        session.start_round(moderator).unwrap();
        session.cast_vote(voters[0], "1").unwrap();
        session.reveal(moderator).unwrap();
        assert!(matches!(
            session.cast_vote(voters[1], "2"),
            Err(SessionError::RoundNotOpen)
        ));
        assert_eq!(session.history()[0].votes().len(), 1);
    }
    #[test]
    fn late_joiner_is_not_waited_on() {
        let (mut session, moderator, voters) = with_voters(1);
        session.start_round(moderator).unwrap();
        let (late, _) = session.join("late").unwrap();
        session.cast_vote(voters[0], "2").unwrap();
        // the round completed without the late joiner
        assert!(session.current().is_none());
        assert!(!session.history()[0].voted(late));
    }
    #[test]
    fn leave_completes_a_waiting_round() {
        let (mut session, moderator, voters) = with_voters(2);
        session.start_round(moderator).unwrap();
        session.cast_vote(voters[0], "3").unwrap();
        session.leave(voters[1]).unwrap();
        assert!(session.current().is_none());
        assert_eq!(
            session.history()[0].verdict(),
            Some(&Verdict::Unanimous {
                card: "3".to_string()
            })
        );
    }
}
