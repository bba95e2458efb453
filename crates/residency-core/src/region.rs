//! Jurisdiction-to-region resolution
//!
//! The [`RegionMap`] is the single source of truth for which deployment
//! region serves which jurisdiction. Both the registration gate and any UI
//! offering jurisdiction choices consult it; nothing else may map countries
//! to regions. An unknown jurisdiction refuses registration — silently
//! defaulting to some region would violate the residency guarantee.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{ResidencyError, Result};

/// Identifier of a deployment location (e.g. a cloud provider region code)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionCode(String);

impl RegionCode {
    pub fn new(code: impl Into<String>) -> Self {
        RegionCode(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RegionCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RegionCode {
    fn from(code: &str) -> Self {
        RegionCode(code.to_string())
    }
}

/// Bidirectional mapping between jurisdiction labels and region codes.
///
/// Injectable configuration, not hard-coded logic: construct from pairs or
/// load from JSON (`{"Australia": "ap-southeast-2", ...}`). Construction
/// rejects duplicate jurisdictions and duplicate regions so the inverse
/// lookup stays a function.
#[derive(Debug, Clone)]
pub struct RegionMap {
    by_jurisdiction: HashMap<String, RegionCode>,
    by_region: HashMap<RegionCode, String>,
}

impl RegionMap {
    /// Build a map from (jurisdiction, region) pairs
    pub fn from_pairs<I, J, R>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (J, R)>,
        J: Into<String>,
        R: Into<String>,
    {
        let mut by_jurisdiction = HashMap::new();
        let mut by_region = HashMap::new();

        for (jurisdiction, region) in pairs {
            let jurisdiction = jurisdiction.into();
            let region = RegionCode::new(region);

            if by_jurisdiction.contains_key(&jurisdiction) {
                return Err(ResidencyError::InvalidRegionMap(format!(
                    "duplicate jurisdiction '{}'",
                    jurisdiction
                )));
            }
            if by_region.contains_key(&region) {
                return Err(ResidencyError::InvalidRegionMap(format!(
                    "region '{}' mapped from more than one jurisdiction",
                    region
                )));
            }

            by_region.insert(region.clone(), jurisdiction.clone());
            by_jurisdiction.insert(jurisdiction, region);
        }

        Ok(RegionMap { by_jurisdiction, by_region })
    }

    /// Load a map from its JSON representation
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: HashMap<String, String> = serde_json::from_str(json)
            .map_err(|e| ResidencyError::InvalidRegionMap(e.to_string()))?;
        Self::from_pairs(raw)
    }

    /// The mapping served by the default deployment
    pub fn default_mapping() -> Self {
        Self::from_pairs([
            ("Singapore", "ap-southeast-1"),
            ("Australia", "ap-southeast-2"),
            ("United Kingdom", "eu-west-1"),
            ("United States", "us-east-2"),
        ])
        .expect("default mapping is well-formed")
    }

    /// Resolve a jurisdiction label to its deployment region
    pub fn resolve_region(&self, jurisdiction: &str) -> Option<&RegionCode> {
        self.by_jurisdiction.get(jurisdiction)
    }

    /// Inverse lookup: the jurisdiction served by a region
    pub fn resolve_jurisdiction(&self, region: &RegionCode) -> Option<&str> {
        self.by_region.get(region).map(String::as_str)
    }

    /// Resolve a jurisdiction, failing with `UnsupportedJurisdiction`
    pub fn require_region(&self, jurisdiction: &str) -> Result<&RegionCode> {
        self.resolve_region(jurisdiction)
            .ok_or_else(|| ResidencyError::UnsupportedJurisdiction(jurisdiction.to_string()))
    }

    /// Supported jurisdiction labels, sorted for stable presentation
    pub fn jurisdictions(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = self.by_jurisdiction.keys().map(String::as_str).collect();
        labels.sort_unstable();
        labels
    }

    pub fn len(&self) -> usize {
        self.by_jurisdiction.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_jurisdiction.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_mapping_resolves_australia() {
        let map = RegionMap::default_mapping();
        assert_eq!(
            map.resolve_region("Australia"),
            Some(&RegionCode::from("ap-southeast-2"))
        );
    }

    #[test]
    fn unknown_jurisdiction_is_refused() {
        let map = RegionMap::default_mapping();
        assert_eq!(map.resolve_region("Mars"), None);
        assert_eq!(
            map.require_region("Mars"),
            Err(ResidencyError::UnsupportedJurisdiction("Mars".into()))
        );
    }

    #[test]
    fn round_trip_holds_for_every_entry() {
        let map = RegionMap::default_mapping();
        for jurisdiction in map.jurisdictions() {
            let region = map.resolve_region(jurisdiction).unwrap();
            assert_eq!(map.resolve_jurisdiction(region), Some(jurisdiction));
        }
    }

    #[test]
    fn duplicate_jurisdiction_rejected() {
        let result = RegionMap::from_pairs([
            ("Australia", "ap-southeast-2"),
            ("Australia", "us-east-2"),
        ]);
        assert!(matches!(result, Err(ResidencyError::InvalidRegionMap(_))));
    }

    #[test]
    fn duplicate_region_rejected() {
        let result = RegionMap::from_pairs([
            ("Australia", "ap-southeast-2"),
            ("New Zealand", "ap-southeast-2"),
        ]);
        assert!(matches!(result, Err(ResidencyError::InvalidRegionMap(_))));
    }

    #[test]
    fn loads_from_json() {
        let map = RegionMap::from_json(r#"{"Japan": "ap-northeast-1"}"#).unwrap();
        assert_eq!(
            map.resolve_region("Japan"),
            Some(&RegionCode::from("ap-northeast-1"))
        );
    }

    #[test]
    fn malformed_json_rejected() {
        assert!(matches!(
            RegionMap::from_json("not json"),
            Err(ResidencyError::InvalidRegionMap(_))
        ));
    }
}
