//! Configurable scoring of a single game.

use crate::record::{Game, Primacy};
use crate::taxonomy::Taxonomy;
use std::collections::BTreeMap;

pub const DEFAULT_CREW_HEAD_UPLIFT: f64 = 1.2;

/// A named scoring function over games.
///
/// The weight table maps association -> game type -> multiplier. A missing
/// entry is how a model opts out of a category: such games weigh 0 and never
/// qualify.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightModel {
    pub name: String,
    table: BTreeMap<String, BTreeMap<String, f64>>,
    pub crew_head_uplift: f64,
    pub secondary_role_factor: f64,
    pub tertiary_role_factor: f64,
    /// Multiplier by age in whole years. Ages past the end use the last entry.
    pub decay: Vec<f64>,
}

impl WeightModel {
    /// Every known association/type pair weighs 1.
    pub fn new(name: &str, taxonomy: &Taxonomy) -> Self {
        let table = taxonomy
            .associations()
            .iter()
            .map(|association| {
                let row = taxonomy
                    .game_types()
                    .iter()
                    .map(|game_type| (game_type.clone(), 1.0))
                    .collect();
                (association.clone(), row)
            })
            .collect();
        Self {
            name: name.to_string(),
            table,
            crew_head_uplift: DEFAULT_CREW_HEAD_UPLIFT,
            secondary_role_factor: 1.0,
            tertiary_role_factor: 1.0,
            decay: vec![1.0],
        }
    }

    pub fn set_weight(&mut self, association: &str, game_type: &str, weight: f64) {
        self.table
            .entry(association.to_string())
            .or_default()
            .insert(game_type.to_string(), weight);
    }

    pub fn remove_association(&mut self, association: &str) {
        self.table.remove(association);
    }

    pub fn remove_game_type(&mut self, association: &str, game_type: &str) {
        if let Some(row) = self.table.get_mut(association) {
            row.remove(game_type);
        }
    }

    pub fn table_weight(&self, association: &str, game_type: &str) -> Option<f64> {
        self.table
            .get(association)
            .and_then(|row| row.get(game_type))
            .copied()
    }

    /// Flat tail: any age past the curve uses its last value. An empty curve
    /// decays everything to 0.
    pub fn decay_factor(&self, age: u32) -> f64 {
        usize::try_from(age)
            .ok()
            .and_then(|index| self.decay.get(index))
            .or_else(|| self.decay.last())
            .copied()
            .unwrap_or(0.0)
    }

    fn primacy_factor(&self, primacy: Primacy) -> f64 {
        match primacy {
            Primacy::Primary => 1.0,
            Primacy::Secondary => self.secondary_role_factor,
            Primacy::Tertiary => self.tertiary_role_factor,
        }
    }

    pub fn weight(&self, game: &Game, taxonomy: &Taxonomy) -> f64 {
        let Some(base) = self.table_weight(game.association(), game.game_type()) else {
            return 0.0;
        };
        let mut weight =
            base * self.primacy_factor(game.primacy()) * self.decay_factor(game.age());
        if taxonomy.is_crew_head(game.role()) {
            weight *= self.crew_head_uplift;
        }
        weight
    }

    /// 1 when the game counts toward a minimum-games threshold, else 0.
    /// Independent of the numeric weight apart from sign checks.
    pub fn qualify(&self, game: &Game) -> u32 {
        let Some(base) = self.table_weight(game.association(), game.game_type()) else {
            return 0;
        };
        let qualifies = game.primacy() == Primacy::Primary
            && self.decay_factor(game.age()) > 0.0
            && base > 0.0;
        u32::from(qualifies)
    }
}
