use std::collections::{BTreeMap, BTreeSet};

use anyhow::{bail, Result};
use serde::Deserialize;

use crate::models::UNKNOWN_MODE;

/// The three read-only reference tables consulted by the classifier.
///
/// Each table is optional in a config file; a missing table keeps the
/// built-in Ember data.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModeTables {
    /// Production modes that are already normalized. Stored lower-case.
    #[serde(default = "default_canonical")]
    pub canonical: BTreeSet<String>,
    /// Zone key → raw mode → canonical mode. Raw modes are matched as given.
    #[serde(default = "default_specific")]
    pub specific: BTreeMap<String, BTreeMap<String, String>>,
    /// Lower-case raw mode → canonical mode, for any zone.
    #[serde(default = "default_generic")]
    pub generic: BTreeMap<String, String>,
}

impl Default for ModeTables {
    /// Reference data for Ember's yearly electricity dataset.
    fn default() -> Self {
        ModeTables {
            canonical: default_canonical(),
            specific: default_specific(),
            generic: default_generic(),
        }
    }
}

fn default_canonical() -> BTreeSet<String> {
    [
        "battery storage",
        "biomass",
        "coal",
        "gas",
        "geothermal",
        "hydro",
        "hydro storage",
        "nuclear",
        "oil",
        "solar",
        "wind",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_generic() -> BTreeMap<String, String> {
    // Identity entries keep Ember names mapped when a config replaces `canonical`.
    [
        ("bioenergy", "biomass"),
        ("coal", "coal"),
        ("gas", "gas"),
        ("hydro", "hydro"),
        ("nuclear", "nuclear"),
        ("other fossil", UNKNOWN_MODE),
        ("other renewables", UNKNOWN_MODE),
        ("solar", "solar"),
        ("wind", "wind"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

fn default_specific() -> BTreeMap<String, BTreeMap<String, String>> {
    // Ember lumps these into "other"; per-zone generation mixes say what they are.
    let entries = [
        ("BD", "other fossil", "oil"),
        ("NZ", "other renewables", "geothermal"),
        ("TR", "other renewables", "geothermal"),
    ];

    let mut specific: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();
    for (zone, raw, mode) in entries {
        specific
            .entry(zone.to_string())
            .or_default()
            .insert(raw.to_string(), mode.to_string());
    }
    specific
}

impl ModeTables {
    /// Zone-specific override for an exact `(zone_key, raw_mode)` pair.
    pub fn specific_for(&self, zone_key: &str, raw_mode: &str) -> Option<&str> {
        self.specific
            .get(zone_key)
            .and_then(|modes| modes.get(raw_mode))
            .map(String::as_str)
    }

    /// Check that every entry can actually be reached by the decision policy.
    ///
    /// Lookups in `canonical` and `generic` use the case-folded mode, so an
    /// entry with upper-case characters would never match.
    pub fn validate(&self) -> Result<()> {
        for mode in &self.canonical {
            if mode.is_empty() {
                bail!("canonical modes must not be empty");
            }
            if *mode != mode.to_lowercase() {
                bail!("canonical mode {mode:?} must be lower-case");
            }
        }

        for (raw, mode) in &self.generic {
            if *raw != raw.to_lowercase() {
                bail!("generic mapping key {raw:?} must be lower-case");
            }
            if mode.is_empty() {
                bail!("generic mapping for {raw:?} has an empty target");
            }
        }

        for (zone, modes) in &self.specific {
            for (raw, mode) in modes {
                if mode.is_empty() {
                    bail!("specific mapping {zone}/{raw:?} has an empty target");
                }
            }
        }

        Ok(())
    }

    /// Every label the classifier can return with these tables.
    pub fn targets(&self) -> BTreeSet<&str> {
        let mut targets: BTreeSet<&str> = self.canonical.iter().map(String::as_str).collect();
        targets.extend(self.generic.values().map(String::as_str));
        targets.extend(
            self.specific
                .values()
                .flat_map(|modes| modes.values().map(String::as_str)),
        );
        targets.insert(UNKNOWN_MODE);
        targets
    }
}
