//! Per-role and per-family totals for scored officials, plus ranking helpers.

use crate::record::{Official, RoleScores};
use crate::taxonomy::Taxonomy;
use crate::weight::WeightModel;
use serde::Serialize;
use std::cmp::Ordering;

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl Official {
    /// Recomputes `weighting` and `qualified_games` for each model from the
    /// full game list. Re-applying a model name replaces its previous entry.
    pub fn apply_weight_models(&mut self, models: &[WeightModel], taxonomy: &Taxonomy) {
        for model in models {
            let (weights, counts) = self.score_model(model, taxonomy);
            self.weighting.insert(model.name.clone(), weights);
            self.qualified_games.insert(model.name.clone(), counts);
        }
    }

    fn score_model(
        &self,
        model: &WeightModel,
        taxonomy: &Taxonomy,
    ) -> (RoleScores<f64>, RoleScores<u32>) {
        let mut weights = RoleScores::new();
        let mut counts = RoleScores::new();

        for role in taxonomy.roles() {
            let (total, qualified) = self
                .games()
                .iter()
                .filter(|game| game.role() == role)
                .fold((0.0, 0u32), |(total, qualified), game| {
                    (
                        total + model.weight(game, taxonomy),
                        qualified + model.qualify(game),
                    )
                });
            weights.insert(role.to_string(), round2(total));
            counts.insert(role.to_string(), qualified);
        }

        // Head totals roll into the crew head slot; the head slot keeps its own value.
        for (head, crew_head) in taxonomy.head_merges() {
            let head_weight = weights.get(head).copied().unwrap_or(0.0);
            let head_count = counts.get(head).copied().unwrap_or(0);
            let slot = weights.entry(crew_head.clone()).or_insert(0.0);
            *slot = round2(*slot + head_weight);
            *counts.entry(crew_head.clone()).or_insert(0) += head_count;
        }

        for family in taxonomy.families() {
            let total: f64 = family
                .roles
                .iter()
                .filter_map(|role| weights.get(role))
                .sum();
            let qualified: u32 = family
                .roles
                .iter()
                .filter_map(|role| counts.get(role))
                .sum();
            weights.insert(family.name.clone(), round2(total));
            counts.insert(family.name.clone(), qualified);
        }

        (weights, counts)
    }
}

/// One line of a per-role ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleRanking<'a> {
    pub name: &'a str,
    pub certification: u8,
    pub weight: f64,
    pub qualified: u32,
}

/// Ranks officials for one role (or family) under one model, highest weight
/// first. Equal weights keep the order of `officials` (the sort is stable);
/// no further tie-break is applied.
pub fn sort_by_role<'a>(
    officials: &'a [Official],
    role: &str,
    model: &str,
    taxonomy: &Taxonomy,
    skip_zero: bool,
) -> Vec<RoleRanking<'a>> {
    let Some(kind) = taxonomy.role_kind(role) else {
        return Vec::new();
    };
    let mut ranking: Vec<_> = officials
        .iter()
        .filter_map(|official| {
            let weight = official.weight_for(model, role);
            if skip_zero && weight.map_or(true, |weight| weight == 0.0) {
                return None;
            }
            Some(RoleRanking {
                name: &official.name,
                certification: official.certification_for(kind),
                weight: weight.unwrap_or(0.0),
                qualified: official.qualified_for(model, role).unwrap_or(0),
            })
        })
        .collect();
    ranking.sort_by(|a, b| b.weight.partial_cmp(&a.weight).unwrap_or(Ordering::Equal));
    ranking
}

/// Fields officials can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfficialKey {
    Name,
    RefCert,
    NsoCert,
    GameTally,
    RefTally,
    NsoTally,
}

impl OfficialKey {
    pub fn compare(self, a: &Official, b: &Official) -> Ordering {
        match self {
            Self::Name => a.name.cmp(&b.name),
            Self::RefCert => a.ref_certification.cmp(&b.ref_certification),
            Self::NsoCert => a.nso_certification.cmp(&b.nso_certification),
            Self::GameTally => a.game_tally().cmp(&b.game_tally()),
            Self::RefTally => a.ref_tally().cmp(&b.ref_tally()),
            Self::NsoTally => a.nso_tally().cmp(&b.nso_tally()),
        }
    }
}

/// Stable sort by one field.
pub fn sort_officials(officials: &[Official], key: OfficialKey, descending: bool) -> Vec<&Official> {
    let mut sorted: Vec<&Official> = officials.iter().collect();
    sorted.sort_by(|a, b| {
        let ordering = key.compare(a, b);
        if descending {
            ordering.reverse()
        } else {
            ordering
        }
    });
    sorted
}
