use crate::taxonomy::{RoleKind, Taxonomy};
use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

/// Rank of a role within one history row.
///
/// `Tertiary` is reserved for a lower-confidence source; nothing in the loader
/// produces it yet, but weight models carry a factor for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(into = "u8")]
pub enum Primacy {
    Primary,
    Secondary,
    Tertiary,
}

impl Primacy {
    pub fn rank(self) -> u8 {
        match self {
            Self::Primary => 1,
            Self::Secondary => 2,
            Self::Tertiary => 3,
        }
    }
}

impl From<Primacy> for u8 {
    fn from(primacy: Primacy) -> Self {
        primacy.rank()
    }
}

impl TryFrom<u8> for Primacy {
    type Error = InvalidGame;

    fn try_from(rank: u8) -> Result<Self, Self::Error> {
        match rank {
            1 => Ok(Self::Primary),
            2 => Ok(Self::Secondary),
            3 => Ok(Self::Tertiary),
            other => Err(InvalidGame::Primacy(other)),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidGame {
    #[error("unknown association: {0}")]
    Association(String),

    #[error("unknown game type: {0}")]
    GameType(String),

    #[error("no role recorded")]
    MissingRole,

    #[error("unknown role: {0}")]
    Role(String),

    #[error("primacy must be 1, 2 or 3 (got {0})")]
    Primacy(u8),
}

/// One officiated assignment. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Game {
    association: String,
    game_type: String,
    role: String,
    #[serde(skip)]
    kind: RoleKind,
    age: u32,
    primacy: Primacy,
    date: Option<NaiveDate>,
    event: Option<String>,
}

impl Game {
    /// Validates the categorical fields against the taxonomy. The values must
    /// already be normalized; nothing is defaulted here.
    pub fn new(
        taxonomy: &Taxonomy,
        association: &str,
        game_type: &str,
        role: Option<&str>,
        age: u32,
        primacy: Primacy,
    ) -> Result<Self, InvalidGame> {
        if !taxonomy.is_association(association) {
            return Err(InvalidGame::Association(association.to_string()));
        }
        if !taxonomy.is_game_type(game_type) {
            return Err(InvalidGame::GameType(game_type.to_string()));
        }
        let role = match role.map(str::trim) {
            None | Some("") => return Err(InvalidGame::MissingRole),
            Some(role) => role,
        };
        let kind = match taxonomy.role_kind(role) {
            Some(kind) if taxonomy.is_role(role) => kind,
            _ => return Err(InvalidGame::Role(role.to_string())),
        };

        Ok(Self {
            association: association.to_string(),
            game_type: game_type.to_string(),
            role: role.to_string(),
            kind,
            age,
            primacy,
            date: None,
            event: None,
        })
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_event(mut self, event: Option<String>) -> Self {
        self.event = event.filter(|label| !label.is_empty());
        self
    }

    pub fn association(&self) -> &str {
        &self.association
    }

    pub fn game_type(&self) -> &str {
        &self.game_type
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn kind(&self) -> RoleKind {
        self.kind
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn primacy(&self) -> Primacy {
        self.primacy
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn event(&self) -> Option<&str> {
        self.event.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_valid_game() {
        let taxonomy = Taxonomy::default();
        let date = NaiveDate::from_ymd_opt(2018, 6, 1).expect("valid date");
        let game = Game::new(&taxonomy, "WFTDA", "Playoff", Some("CHR"), 0, Primacy::Primary)
            .expect("game should be valid")
            .with_date(date)
            .with_event(Some("Seattle D1".to_string()));

        assert_eq!(game.role(), "CHR");
        assert_eq!(game.kind(), RoleKind::Referee);
        assert_eq!(game.primacy().rank(), 1);
        assert_eq!(game.date(), Some(date));
        assert_eq!(game.event(), Some("Seattle D1"));
    }

    #[test]
    fn blank_or_unknown_role_is_rejected() {
        let taxonomy = Taxonomy::default();
        for role in [None, Some(""), Some("   ")] {
            assert_eq!(
                Game::new(&taxonomy, "WFTDA", "Sanc", role, 1, Primacy::Secondary),
                Err(InvalidGame::MissingRole)
            );
        }
        assert_eq!(
            Game::new(&taxonomy, "WFTDA", "Sanc", Some("ZZ"), 1, Primacy::Secondary),
            Err(InvalidGame::Role("ZZ".to_string()))
        );
    }

    #[test]
    fn categorical_fields_are_not_defaulted() {
        let taxonomy = Taxonomy::default();
        assert_eq!(
            Game::new(&taxonomy, "USARS", "Sanc", Some("JR"), 0, Primacy::Primary),
            Err(InvalidGame::Association("USARS".to_string()))
        );
        assert_eq!(
            Game::new(&taxonomy, "WFTDA", "sanc", Some("JR"), 0, Primacy::Primary),
            Err(InvalidGame::GameType("sanc".to_string()))
        );
    }

    #[test]
    fn primacy_converts_from_rank() {
        assert_eq!(Primacy::try_from(2u8), Ok(Primacy::Secondary));
        assert_eq!(Primacy::try_from(0u8), Err(InvalidGame::Primacy(0)));
        assert_eq!(Primacy::try_from(4u8), Err(InvalidGame::Primacy(4)));
    }

    #[test]
    fn empty_event_is_dropped() {
        let taxonomy = Taxonomy::default();
        let game = Game::new(&taxonomy, "MRDA", "Reg", Some("SK"), 2, Primacy::Primary)
            .expect("game should be valid")
            .with_event(Some(String::new()));
        assert_eq!(game.event(), None);
    }
}
