use super::game::{Game, Primacy};
use crate::taxonomy::RoleKind;
use serde::Serialize;
use std::collections::BTreeMap;

/// Role (or family) name to value, for one weight model.
pub type RoleScores<T> = BTreeMap<String, T>;

/// One person's officiating record.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Official {
    pub name: String,
    pub ref_certification: u8,
    pub nso_certification: u8,
    games: Vec<Game>,
    game_tally: u32,
    ref_tally: u32,
    nso_tally: u32,
    pub(crate) weighting: BTreeMap<String, RoleScores<f64>>,
    pub(crate) qualified_games: BTreeMap<String, RoleScores<u32>>,
}

impl Official {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Appends in document order. Only primary games count toward the tallies.
    pub fn add_game(&mut self, game: Game) {
        if game.primacy() == Primacy::Primary {
            self.game_tally += 1;
            match game.kind() {
                RoleKind::Referee => self.ref_tally += 1,
                RoleKind::Nso => self.nso_tally += 1,
            }
        }
        self.games.push(game);
    }

    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn game_tally(&self) -> u32 {
        self.game_tally
    }

    pub fn ref_tally(&self) -> u32 {
        self.ref_tally
    }

    pub fn nso_tally(&self) -> u32 {
        self.nso_tally
    }

    pub fn certification_for(&self, kind: RoleKind) -> u8 {
        match kind {
            RoleKind::Referee => self.ref_certification,
            RoleKind::Nso => self.nso_certification,
        }
    }

    /// Scores for a model, if it has been applied.
    pub fn weighting(&self, model: &str) -> Option<&RoleScores<f64>> {
        self.weighting.get(model)
    }

    pub fn qualified_games(&self, model: &str) -> Option<&RoleScores<u32>> {
        self.qualified_games.get(model)
    }

    pub fn weight_for(&self, model: &str, role: &str) -> Option<f64> {
        self.weighting(model)
            .and_then(|scores| scores.get(role))
            .copied()
    }

    /// Sum over several roles; roles without a score contribute nothing.
    pub fn weight_for_roles<S: AsRef<str>>(&self, model: &str, roles: &[S]) -> f64 {
        let total: f64 = roles
            .iter()
            .filter_map(|role| self.weight_for(model, role.as_ref()))
            .sum();
        (total * 100.0).round() / 100.0
    }

    pub fn qualified_for(&self, model: &str, role: &str) -> Option<u32> {
        self.qualified_games(model)
            .and_then(|counts| counts.get(role))
            .copied()
    }

    pub fn qualified_for_roles<S: AsRef<str>>(&self, model: &str, roles: &[S]) -> u32 {
        roles
            .iter()
            .filter_map(|role| self.qualified_for(model, role.as_ref()))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::Taxonomy;

    fn game(taxonomy: &Taxonomy, role: &str, primacy: Primacy) -> Game {
        Game::new(taxonomy, "WFTDA", "Sanc", Some(role), 0, primacy).expect("game should be valid")
    }

    #[test]
    fn tallies_only_count_primary_games() {
        let taxonomy = Taxonomy::default();
        let mut official = Official::new("Mike Hammer");
        official.add_game(game(&taxonomy, "JR", Primacy::Primary));
        official.add_game(game(&taxonomy, "OPR", Primacy::Secondary));
        official.add_game(game(&taxonomy, "SK", Primacy::Primary));
        official.add_game(game(&taxonomy, "PT", Primacy::Primary));

        assert_eq!(official.games().len(), 4);
        assert_eq!(official.game_tally(), 3);
        assert_eq!(official.ref_tally(), 1);
        assert_eq!(official.nso_tally(), 2);
    }

    #[test]
    fn games_keep_insertion_order() {
        let taxonomy = Taxonomy::default();
        let mut official = Official::new("A");
        for role in ["IPR", "JR", "CHR"] {
            official.add_game(game(&taxonomy, role, Primacy::Primary));
        }
        let roles: Vec<_> = official.games().iter().map(Game::role).collect();
        assert_eq!(roles, vec!["IPR", "JR", "CHR"]);
    }

    #[test]
    fn unscored_official_has_no_weighting() {
        let official = Official::new("A");
        assert!(official.weighting("std").is_none());
        assert_eq!(official.weight_for("std", "CHR"), None);
        assert_eq!(official.weight_for_roles("std", &["CHR", "HR"]), 0.0);
        assert_eq!(official.qualified_for_roles("std", &["CHR"]), 0);
    }

    #[test]
    fn certification_follows_role_kind() {
        let mut official = Official::new("A");
        official.ref_certification = 3;
        official.nso_certification = 1;
        assert_eq!(official.certification_for(RoleKind::Referee), 3);
        assert_eq!(official.certification_for(RoleKind::Nso), 1);
    }
}
