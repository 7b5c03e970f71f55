use serde::{Deserialize, Serialize};
use std::fmt;

/// One card lookup as submitted by a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardQuery {
    pub card: String,
    pub id: String,
    pub holo: bool,
    pub reverse_holo: bool,
    pub first_edition: bool,
    pub card_count: u32,
    pub estimated_grades: Option<Vec<String>>,
}

impl CardQuery {
    pub fn new(card: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            card: card.into(),
            id: id.into(),
            holo: false,
            reverse_holo: false,
            first_edition: false,
            card_count: 1,
            estimated_grades: None,
        }
    }

    pub fn holo(mut self, holo: bool) -> Self {
        self.holo = holo;
        self
    }

    pub fn reverse_holo(mut self, reverse_holo: bool) -> Self {
        self.reverse_holo = reverse_holo;
        self
    }

    pub fn first_edition(mut self, first_edition: bool) -> Self {
        self.first_edition = first_edition;
        self
    }

    pub fn card_count(mut self, card_count: u32) -> Self {
        self.card_count = card_count;
        self
    }

    /// Trimmed, lowercased copy used for searching and for the output identity.
    pub fn normalized(&self) -> Self {
        Self {
            card: self.card.trim().to_lowercase(),
            id: self.id.trim().to_lowercase(),
            ..self.clone()
        }
    }

    /// Name and id carry something besides whitespace and at least one card is owned
    pub fn is_valid(&self) -> bool {
        !self.card.trim().is_empty() && !self.id.trim().is_empty() && self.card_count > 0
    }

    /// Card name with spaces replaced by hyphens, the form product URLs use.
    pub fn slug(&self) -> String {
        self.card.replace(' ', "-")
    }

    pub fn search_terms(&self) -> String {
        format!("{} {}", self.card, self.id)
    }
}

impl fmt::Display for CardQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.card, self.id)
    }
}

/// Outcome of locating the product page for a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedLink {
    /// The search redirected straight to a product page.
    ProductPage(String),
    /// Picked from an ambiguous results listing.
    Matched(String),
    NotFound,
}

impl ResolvedLink {
    pub fn url(&self) -> Option<&str> {
        match self {
            ResolvedLink::ProductPage(url) | ResolvedLink::Matched(url) => Some(url),
            ResolvedLink::NotFound => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_trims_and_lowercases_identity_only() {
        let query = CardQuery::new("  Dark Charizard ", " Team Rocket\t")
            .holo(true)
            .card_count(3);
        let normalized = query.normalized();

        assert_eq!(normalized.card, "dark charizard");
        assert_eq!(normalized.id, "team rocket");
        assert!(normalized.holo);
        assert_eq!(normalized.card_count, 3);
    }

    #[test]
    fn blank_fields_are_invalid() {
        assert!(CardQuery::new("Pikachu", "58").is_valid());
        assert!(!CardQuery::new("   ", "58").is_valid());
        assert!(!CardQuery::new("Pikachu", "").is_valid());
    }

    #[test]
    fn zero_count_is_invalid() {
        assert!(!CardQuery::new("Pikachu", "58").card_count(0).is_valid());
        assert!(CardQuery::new("Pikachu", "58").card_count(1).is_valid());
    }

    #[test]
    fn slug_replaces_each_space() {
        let query = CardQuery::new("mr. mime ex", "122");
        assert_eq!(query.slug(), "mr.-mime-ex");
    }

    #[test]
    fn not_found_has_no_url() {
        assert_eq!(ResolvedLink::NotFound.url(), None);
        assert_eq!(
            ResolvedLink::Matched("https://a/b".into()).url(),
            Some("https://a/b")
        );
    }
}
