use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

/// Largest multiplier a weight may carry; each unit is one copy of the song in the sampling pool
pub const MAX_WEIGHT: u32 = 1000;

/// Tunables for weighting and selection size
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionConfig {
    #[serde(default = "default_promoted_ids")]
    pub promoted_ids: Vec<String>, // Always weighted highest, favorite or not
    #[serde(default = "default_promoted_weight")]
    pub promoted_weight: u32,
    #[serde(default = "default_favorite_weight")]
    pub favorite_weight: u32,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize, // Retry budget for the duration-range search
    #[serde(default = "default_min_count")]
    pub min_count: usize,
    #[serde(default = "default_max_count")]
    pub max_count: usize,
    #[serde(default = "default_short_max_seconds")]
    pub short_max_seconds: u32, // Exclusive upper bound of the short bucket
    #[serde(default = "default_two_minute_range")]
    pub two_minute_range: DurationRange,
}

/// Inclusive range of seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationRange {
    pub min_seconds: u32,
    pub max_seconds: u32,
}

impl DurationRange {
    pub fn new(min_seconds: u32, max_seconds: u32) -> Self {
        Self {
            min_seconds,
            max_seconds,
        }
    }

    pub fn contains(&self, seconds: u32) -> bool {
        seconds >= self.min_seconds && seconds <= self.max_seconds
    }
}

fn default_promoted_ids() -> Vec<String> {
    ["PL1", "PL2", "PL3", "PL4", "PL5"]
        .iter()
        .map(|id| id.to_string())
        .collect()
}

fn default_promoted_weight() -> u32 {
    7
}

fn default_favorite_weight() -> u32 {
    3
}

fn default_max_attempts() -> usize {
    100
}

fn default_min_count() -> usize {
    3
}

fn default_max_count() -> usize {
    4
}

fn default_short_max_seconds() -> u32 {
    105
}

fn default_two_minute_range() -> DurationRange {
    DurationRange::new(105, 134)
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            promoted_ids: default_promoted_ids(),
            promoted_weight: default_promoted_weight(),
            favorite_weight: default_favorite_weight(),
            max_attempts: default_max_attempts(),
            min_count: default_min_count(),
            max_count: default_max_count(),
            short_max_seconds: default_short_max_seconds(),
            two_minute_range: default_two_minute_range(),
        }
    }
}

impl SelectionConfig {
    /// Load a selection configuration from a JSON object file; missing fields take defaults
    pub fn load_from_file(path: &str) -> Result<SelectionConfig> {
        let content = std::fs::read_to_string(path)?;
        let config: SelectionConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_count == 0 {
            bail!("min_count must be at least 1");
        }
        if self.min_count > self.max_count {
            bail!(
                "min_count ({}) must not exceed max_count ({})",
                self.min_count,
                self.max_count
            );
        }
        if self.promoted_weight == 0 || self.favorite_weight == 0 {
            bail!("weights must be positive");
        }
        if self.promoted_weight > MAX_WEIGHT || self.favorite_weight > MAX_WEIGHT {
            bail!(
                "weights must not exceed {} (promoted_weight {}, favorite_weight {})",
                MAX_WEIGHT,
                self.promoted_weight,
                self.favorite_weight
            );
        }
        if self.two_minute_range.min_seconds > self.two_minute_range.max_seconds {
            bail!("two_minute_range is empty");
        }
        Ok(())
    }

    pub fn is_promoted(&self, id: &str) -> bool {
        self.promoted_ids.iter().any(|promoted| promoted == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_takes_defaults() {
        let config: SelectionConfig = serde_json::from_str(r#"{"favorite_weight": 2}"#).unwrap();

        assert_eq!(config.favorite_weight, 2);
        assert_eq!(config.promoted_weight, 7);
        assert_eq!(config.max_attempts, 100);
        assert_eq!(config.two_minute_range, DurationRange::new(105, 134));
        assert!(config.is_promoted("PL3"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_inverted_counts() {
        let config = SelectionConfig {
            min_count: 5,
            max_count: 4,
            ..SelectionConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_weight() {
        let config = SelectionConfig {
            favorite_weight: 0,
            ..SelectionConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_caps_weights() {
        let at_cap = SelectionConfig {
            promoted_weight: MAX_WEIGHT,
            ..SelectionConfig::default()
        };
        assert!(at_cap.validate().is_ok());

        let json = r#"{"promoted_weight": 4000000000}"#;
        let config: SelectionConfig = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_duration_range_is_inclusive() {
        let range = DurationRange::new(105, 134);
        assert!(range.contains(105));
        assert!(range.contains(134));
        assert!(!range.contains(104));
        assert!(!range.contains(135));
    }
}
