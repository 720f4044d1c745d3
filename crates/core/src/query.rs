//! Structured preference extraction
//!
//! `PreferenceQuery` mirrors the `recommend_products` tool arguments. Every
//! field defaults to empty/absent so a partial or malformed extraction still
//! deserializes; only `category` is required before a search may run, and
//! that check belongs to the orchestrator.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::normalize::{self, Gender};

/// Free-text budget range such as "30000-120000"; the upper bound is the ceiling.
static BUDGET_RANGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{2,})\s*-\s*(\d{2,})").expect("budget range regex"));

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreferenceQuery {
    pub gender: String,
    pub occasion: String,
    /// Required before a search is issued; see [`PreferenceQuery::has_category`].
    pub category: String,
    pub style: String,
    pub fit: String,
    pub brand_pref: String,
    pub brand_avoid: String,
    pub colors_pref: String,
    pub colors_avoid: String,
    pub sizes: String,
    /// Free-form range text, e.g. "30000-120000".
    pub budget: String,
    /// Numeric ceiling if the user stated one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_max: Option<f64>,
    pub notes: String,
}

impl PreferenceQuery {
    pub fn has_category(&self) -> bool {
        !self.category.trim().is_empty()
    }

    pub fn gender(&self) -> Gender {
        normalize::normalize_gender(&self.gender)
    }

    pub fn preferred_colors(&self) -> Vec<String> {
        normalize::normalize_color_list(&self.colors_pref)
    }

    pub fn avoided_colors(&self) -> Vec<String> {
        normalize::normalize_color_list(&self.colors_avoid)
    }

    /// Effective budget ceiling: the explicit numeric ceiling when present,
    /// otherwise the upper bound of a free-text range.
    pub fn budget_ceiling(&self) -> Option<f64> {
        if let Some(max) = self.budget_max {
            if max > 0.0 {
                return Some(max);
            }
        }
        BUDGET_RANGE
            .captures(&self.budget)
            .and_then(|caps| caps[2].parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_with_all_fields_absent() {
        let query: PreferenceQuery = serde_json::from_str("{}").unwrap();
        assert!(!query.has_category());
        assert_eq!(query.gender(), Gender::Unknown);
        assert!(query.budget_ceiling().is_none());
    }

    #[test]
    fn explicit_ceiling_wins_over_range() {
        let query = PreferenceQuery {
            budget: "30000-120000".into(),
            budget_max: Some(80000.0),
            ..Default::default()
        };
        assert_eq!(query.budget_ceiling(), Some(80000.0));
    }

    #[test]
    fn range_upper_bound_used_when_no_explicit_ceiling() {
        let query = PreferenceQuery {
            budget: "entre 30000 - 120000 pesos".into(),
            ..Default::default()
        };
        assert_eq!(query.budget_ceiling(), Some(120000.0));
    }

    #[test]
    fn zero_ceiling_is_treated_as_unset() {
        let query = PreferenceQuery {
            budget_max: Some(0.0),
            budget: "30000-120000".into(),
            ..Default::default()
        };
        assert_eq!(query.budget_ceiling(), Some(120000.0));
    }

    #[test]
    fn short_numbers_do_not_look_like_ranges() {
        let query = PreferenceQuery {
            budget: "1-5".into(),
            ..Default::default()
        };
        assert!(query.budget_ceiling().is_none());
    }

    #[test]
    fn color_lists_come_back_normalized() {
        let query = PreferenceQuery {
            colors_pref: "Rojo, Bordó".into(),
            colors_avoid: " Negro ".into(),
            ..Default::default()
        };
        assert_eq!(query.preferred_colors(), vec!["rojo", "bordó"]);
        assert_eq!(query.avoided_colors(), vec!["negro"]);
    }
}
