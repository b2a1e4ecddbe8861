//! Associations, game types and officiating roles known to the tool.
//!
//! The taxonomy is built once at startup (defaults, optionally overridden by
//! `shaft.toml`) and handed around by reference. Nothing mutates it afterwards.

use crate::error::{Result, ShaftError};
use crate::types::config::TaxonomyConfig;
use std::collections::HashSet;

/// Catch-all association for anything not in the known list.
pub const OTHER_ASSOCIATION: &str = "Other";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleKind {
    Referee,
    Nso,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleFamily {
    pub name: String,
    pub roles: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Taxonomy {
    associations: Vec<String>,
    game_types: Vec<String>,
    ref_roles: Vec<String>,
    nso_roles: Vec<String>,
    families: Vec<RoleFamily>,
    crew_heads: Vec<String>,
    head_merges: Vec<(String, String)>,
    role_aliases: Vec<(String, String)>,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

fn default_families() -> Vec<RoleFamily> {
    vec![
        RoleFamily {
            name: "Score Tracking".to_string(),
            roles: owned(&["JT", "SBO", "SK"]),
        },
        RoleFamily {
            name: "Penalty Management".to_string(),
            roles: owned(&["PBM", "PBT", "LT"]),
        },
        RoleFamily {
            name: "Penalty Tracking".to_string(),
            roles: owned(&["PT", "PW", "IWB", "OWB"]),
        },
    ]
}

impl Default for Taxonomy {
    fn default() -> Self {
        let families = default_families();
        let mut nso_roles = owned(&["THNSO", "CHNSO", "HNSO", "NALT"]);
        nso_roles.extend(families.iter().flat_map(|family| family.roles.clone()));
        Self {
            associations: owned(&["WFTDA", "MRDA", "JRDA", OTHER_ASSOCIATION]),
            game_types: owned(&["Champs", "Playoff", "Sanc", "Reg", "Other"]),
            ref_roles: owned(&["THR", "CHR", "HR", "IPR", "JR", "OPR", "RALT"]),
            nso_roles,
            families,
            crew_heads: owned(&["CHR", "CHNSO"]),
            head_merges: vec![
                ("HR".to_string(), "CHR".to_string()),
                ("HNSO".to_string(), "CHNSO".to_string()),
            ],
            role_aliases: vec![("SO".to_string(), "SBO".to_string())],
        }
    }
}

impl Taxonomy {
    /// Builds the taxonomy from the optional `[taxonomy]` table, falling back to
    /// the defaults key by key.
    pub fn from_config(config: Option<&TaxonomyConfig>) -> Result<Self> {
        let mut taxonomy = Self::default();
        let Some(cfg) = config else {
            return Ok(taxonomy);
        };

        if let Some(associations) = &cfg.associations {
            taxonomy.associations = associations
                .iter()
                .map(|association| {
                    let association = association.trim();
                    if association.eq_ignore_ascii_case(OTHER_ASSOCIATION) {
                        OTHER_ASSOCIATION.to_string()
                    } else {
                        association.to_uppercase()
                    }
                })
                .collect();
            if !taxonomy.is_association(OTHER_ASSOCIATION) {
                taxonomy.associations.push(OTHER_ASSOCIATION.to_string());
            }
        }
        if let Some(game_types) = &cfg.game_types {
            taxonomy.game_types = game_types
                .iter()
                .map(|game_type| title_case(game_type.trim()))
                .collect();
        }
        if let Some(ref_roles) = &cfg.ref_roles {
            taxonomy.ref_roles = upper_all(ref_roles);
        }
        if cfg.nso_roles.is_some() || cfg.nso_families.is_some() {
            let families = match &cfg.nso_families {
                Some(families) => families
                    .iter()
                    .map(|family| RoleFamily {
                        name: family.name.clone(),
                        roles: upper_all(&family.roles),
                    })
                    .collect(),
                None => default_families(),
            };
            let mut nso_roles = match &cfg.nso_roles {
                Some(roles) => upper_all(roles),
                None => owned(&["THNSO", "CHNSO", "HNSO", "NALT"]),
            };
            nso_roles.extend(families.iter().flat_map(|family| family.roles.clone()));
            taxonomy.nso_roles = nso_roles;
            taxonomy.families = families;
        }
        if let Some(crew_heads) = &cfg.crew_heads {
            taxonomy.crew_heads = upper_all(crew_heads);
        }
        if let Some(head_merges) = &cfg.head_merges {
            taxonomy.head_merges = head_merges
                .iter()
                .map(|(head, crew_head)| (head.to_uppercase(), crew_head.to_uppercase()))
                .collect();
        }
        if let Some(role_aliases) = &cfg.role_aliases {
            taxonomy.role_aliases = role_aliases
                .iter()
                .map(|(old, new)| (old.to_uppercase(), new.to_uppercase()))
                .collect();
        }

        taxonomy.validate()?;
        Ok(taxonomy)
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for role in self.roles() {
            if !seen.insert(role) {
                return Err(ShaftError::ConfigParse(format!(
                    "taxonomy role listed more than once: {role}"
                )));
            }
        }
        for family in &self.families {
            if self.is_role(&family.name) {
                return Err(ShaftError::ConfigParse(format!(
                    "taxonomy family name collides with a role: {}",
                    family.name
                )));
            }
        }
        for role in self
            .crew_heads
            .iter()
            .chain(self.head_merges.iter().flat_map(|(head, crew)| [head, crew]))
        {
            if !self.is_role(role) {
                return Err(ShaftError::ConfigParse(format!(
                    "taxonomy references unknown role: {role}"
                )));
            }
        }
        for (_, current) in &self.role_aliases {
            if !self.is_role(current) {
                return Err(ShaftError::ConfigParse(format!(
                    "taxonomy alias points at unknown role: {current}"
                )));
            }
        }
        Ok(())
    }

    pub fn associations(&self) -> &[String] {
        &self.associations
    }

    pub fn game_types(&self) -> &[String] {
        &self.game_types
    }

    pub fn families(&self) -> &[RoleFamily] {
        &self.families
    }

    pub fn crew_heads(&self) -> &[String] {
        &self.crew_heads
    }

    pub fn head_merges(&self) -> &[(String, String)] {
        &self.head_merges
    }

    /// Referee roles followed by NSO roles.
    pub fn roles(&self) -> impl Iterator<Item = &str> {
        self.ref_roles
            .iter()
            .chain(self.nso_roles.iter())
            .map(String::as_str)
    }

    /// Every role followed by every family name; the column order of reports.
    pub fn report_columns(&self) -> Vec<&str> {
        self.roles()
            .chain(self.families.iter().map(|family| family.name.as_str()))
            .collect()
    }

    pub fn is_association(&self, value: &str) -> bool {
        self.associations.iter().any(|known| known == value)
    }

    pub fn is_game_type(&self, value: &str) -> bool {
        self.game_types.iter().any(|known| known == value)
    }

    pub fn is_role(&self, value: &str) -> bool {
        self.roles().any(|known| known == value)
    }

    pub fn is_crew_head(&self, role: &str) -> bool {
        self.crew_heads.iter().any(|known| known == role)
    }

    pub fn family(&self, name: &str) -> Option<&RoleFamily> {
        self.families.iter().find(|family| family.name == name)
    }

    /// Families count as NSO columns.
    pub fn role_kind(&self, role: &str) -> Option<RoleKind> {
        if self.ref_roles.iter().any(|known| known == role) {
            Some(RoleKind::Referee)
        } else if self.nso_roles.iter().any(|known| known == role) || self.family(role).is_some()
        {
            Some(RoleKind::Nso)
        } else {
            None
        }
    }

    /// Trims and matches case-insensitively; anything unknown becomes `Other`.
    pub fn normalize_association(&self, raw: &str) -> String {
        let trimmed = raw.trim();
        self.associations
            .iter()
            .find(|known| known.eq_ignore_ascii_case(trimmed))
            .cloned()
            .unwrap_or_else(|| OTHER_ASSOCIATION.to_string())
    }

    /// Trims and title-cases; `None` when the result is not a known type.
    pub fn normalize_game_type(&self, raw: &str) -> Option<String> {
        let candidate = title_case(raw.trim());
        self.is_game_type(&candidate).then_some(candidate)
    }

    /// Trims and upper-cases. Aliases are only applied when `apply_alias` is set.
    pub fn normalize_role(&self, raw: &str, apply_alias: bool) -> String {
        let upper = raw.trim().to_uppercase();
        if apply_alias {
            if let Some((_, current)) = self.role_aliases.iter().find(|(old, _)| *old == upper) {
                return current.clone();
            }
        }
        upper
    }
}

fn upper_all(values: &[String]) -> Vec<String> {
    values.iter().map(|value| value.trim().to_uppercase()).collect()
}

/// First character upper-case, the rest lower-case.
pub fn title_case(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
