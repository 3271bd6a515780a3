use super::*;

/// Immutable, ordered set of permissible vote values for one game.
/// Labels may be numeric ("5", "13") or symbolic ("?", "OMG"); the engine
/// treats them all as opaque strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    labels: Vec<String>,
}

impl Deck {
    /// Normalize and validate raw card labels: trim each label, drop the
    /// ones that trim to nothing, and de-duplicate preserving first
    /// occurrence. An empty result is an invalid deck.
    pub fn new<I>(cards: I) -> Result<Self, SessionError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut labels = Vec::<String>::new();
        for card in cards {
            let card = card.trim();
            if card.is_empty() {
                continue;
            }
            if labels.iter().any(|label| label == card) {
                continue;
            }
            labels.push(card.to_string());
        }
        if labels.is_empty() {
            return Err(SessionError::InvalidDeck);
        }
        Ok(Self { labels })
    }
    pub fn labels(&self) -> &[String] {
        &self.labels
    }
    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn normalizes_whitespace_and_duplicates() {
        let deck = Deck::new(["  5", "5", "8"].map(String::from)).unwrap();
        assert_eq!(deck.labels(), ["5".to_string(), "8".to_string()]);
    }
    #[test]
    fn preserves_first_occurrence_order() {
        let deck = Deck::new(["13", "1", "13 ", "OMG"].map(String::from)).unwrap();
        assert_eq!(
            deck.labels(),
            ["13".to_string(), "1".to_string(), "OMG".to_string()]
        );
    }
    #[test]
    fn rejects_empty_deck() {
        assert_eq!(Deck::new(Vec::new()), Err(SessionError::InvalidDeck));
        assert_eq!(
            Deck::new(["  ", "\t"].map(String::from)),
            Err(SessionError::InvalidDeck)
        );
    }
    #[test]
    fn membership() {
        let deck = Deck::new(["1", "2", "3"].map(String::from)).unwrap();
        assert!(deck.contains("2"));
        assert!(!deck.contains("4"));
    }
}
