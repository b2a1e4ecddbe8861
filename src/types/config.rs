use crate::error::ShaftError;
use crate::taxonomy::Taxonomy;
use crate::weight::WeightModel;
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};

pub const DEFAULT_MODEL_NAME: &str = "std";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShaftConfig {
    #[serde(default)]
    pub run: RunConfig,
    pub taxonomy: Option<TaxonomyConfig>,
    #[serde(default)]
    pub models: Vec<ModelConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RunConfig {
    pub freeze_date: Option<NaiveDate>,
    #[serde(default = "default_extension")]
    pub extension: String,
    #[serde(default = "default_min_filename_len")]
    pub min_filename_len: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            freeze_date: None,
            extension: default_extension(),
            min_filename_len: default_min_filename_len(),
        }
    }
}

fn default_extension() -> String {
    "json".to_string()
}

fn default_min_filename_len() -> usize {
    6
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaxonomyConfig {
    pub associations: Option<Vec<String>>,
    pub game_types: Option<Vec<String>>,
    pub ref_roles: Option<Vec<String>>,
    pub nso_roles: Option<Vec<String>>,
    pub nso_families: Option<Vec<FamilyConfig>>,
    pub crew_heads: Option<Vec<String>>,
    pub head_merges: Option<BTreeMap<String, String>>,
    pub role_aliases: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FamilyConfig {
    pub name: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    pub name: String,
    pub crew_head_uplift: Option<f64>,
    pub secondary_role_factor: Option<f64>,
    pub tertiary_role_factor: Option<f64>,
    pub decay: Option<Vec<f64>>,
    #[serde(default)]
    pub weights: BTreeMap<String, BTreeMap<String, f64>>,
    #[serde(default)]
    pub exclude_associations: Vec<String>,
    #[serde(default)]
    pub exclude_game_types: BTreeMap<String, Vec<String>>,
}

impl ModelConfig {
    /// Starts from the all-ones table, applies overrides, then exclusions.
    pub fn build(&self, taxonomy: &Taxonomy) -> Result<WeightModel, ShaftError> {
        let mut model = WeightModel::new(&self.name, taxonomy);
        if let Some(uplift) = self.crew_head_uplift {
            model.crew_head_uplift = uplift;
        }
        if let Some(factor) = self.secondary_role_factor {
            model.secondary_role_factor = factor;
        }
        if let Some(factor) = self.tertiary_role_factor {
            model.tertiary_role_factor = factor;
        }
        if let Some(decay) = &self.decay {
            model.decay = decay.clone();
        }

        for (association, row) in &self.weights {
            if !taxonomy.is_association(association) {
                return Err(ShaftError::ConfigParse(format!(
                    "models.{}.weights: unknown association {association}",
                    self.name
                )));
            }
            for (game_type, weight) in row {
                if !taxonomy.is_game_type(game_type) {
                    return Err(ShaftError::ConfigParse(format!(
                        "models.{}.weights.{association}: unknown game type {game_type}",
                        self.name
                    )));
                }
                if !weight.is_finite() {
                    return Err(ShaftError::ConfigParse(format!(
                        "models.{}.weights.{association}.{game_type} must be finite",
                        self.name
                    )));
                }
                model.set_weight(association, game_type, *weight);
            }
        }

        for association in &self.exclude_associations {
            if !taxonomy.is_association(association) {
                return Err(ShaftError::ConfigParse(format!(
                    "models.{}.exclude_associations: unknown association {association}",
                    self.name
                )));
            }
            model.remove_association(association);
        }
        for (association, game_types) in &self.exclude_game_types {
            if !taxonomy.is_association(association) {
                return Err(ShaftError::ConfigParse(format!(
                    "models.{}.exclude_game_types: unknown association {association}",
                    self.name
                )));
            }
            for game_type in game_types {
                if !taxonomy.is_game_type(game_type) {
                    return Err(ShaftError::ConfigParse(format!(
                        "models.{}.exclude_game_types.{association}: unknown game type {game_type}",
                        self.name
                    )));
                }
                model.remove_game_type(association, game_type);
            }
        }

        Ok(model)
    }

    fn validate(&self) -> Result<(), ShaftError> {
        if self.name.trim().is_empty() {
            return Err(ShaftError::ConfigParse(
                "models.name must not be empty".to_string(),
            ));
        }
        if let Some(uplift) = self.crew_head_uplift {
            if !uplift.is_finite() || uplift < 1.0 {
                return Err(ShaftError::ConfigParse(format!(
                    "models.{}.crew_head_uplift must be at least 1.0",
                    self.name
                )));
            }
        }
        for factor in [self.secondary_role_factor, self.tertiary_role_factor]
            .into_iter()
            .flatten()
        {
            if !factor.is_finite() {
                return Err(ShaftError::ConfigParse(format!(
                    "models.{}: role factors must be finite",
                    self.name
                )));
            }
        }
        if let Some(decay) = &self.decay {
            if decay.is_empty() {
                return Err(ShaftError::ConfigParse(format!(
                    "models.{}.decay must have at least one entry",
                    self.name
                )));
            }
            if decay.iter().any(|factor| !factor.is_finite()) {
                return Err(ShaftError::ConfigParse(format!(
                    "models.{}.decay values must be finite",
                    self.name
                )));
            }
        }
        Ok(())
    }
}

impl ShaftConfig {
    pub fn validate(&self) -> Result<(), ShaftError> {
        if self.run.extension.trim().is_empty() {
            return Err(ShaftError::ConfigParse(
                "run.extension must not be empty".to_string(),
            ));
        }
        let mut names = HashSet::new();
        for model in &self.models {
            model.validate()?;
            if !names.insert(model.name.as_str()) {
                return Err(ShaftError::ConfigParse(format!(
                    "duplicate model name: {}",
                    model.name
                )));
            }
        }
        Ok(())
    }

    pub fn taxonomy(&self) -> Result<Taxonomy, ShaftError> {
        Taxonomy::from_config(self.taxonomy.as_ref())
    }

    /// Builds every configured model, or the single default model when none
    /// are configured.
    pub fn weight_models(&self, taxonomy: &Taxonomy) -> Result<Vec<WeightModel>, ShaftError> {
        if self.models.is_empty() {
            return Ok(vec![WeightModel::new(DEFAULT_MODEL_NAME, taxonomy)]);
        }
        self.models
            .iter()
            .map(|model| model.build(taxonomy))
            .collect()
    }
}
