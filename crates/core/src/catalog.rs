//! Catalog records
//!
//! Items arrive from the recommendation service loosely typed: price may be
//! a number or a locale-formatted string, color may be a structured list, a
//! delimited string, or absent. Fields this core does not know about are
//! carried through untouched via `extra`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::normalize;

/// Price as it arrives from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceField {
    Number(f64),
    Text(String),
}

/// Item color field: structured list or delimited string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorField {
    List(Vec<String>),
    Text(String),
}

/// One catalog record. Source fields are never mutated by the filtering
/// pipeline; ranking annotations live outside this type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogItem {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub brand: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<PriceField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorField>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub image: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub sku: String,
    /// Passthrough for fields the core does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CatalogItem {
    /// Parsed price; missing or malformed prices are 0.0.
    pub fn parsed_price(&self) -> f64 {
        match &self.price {
            Some(PriceField::Number(n)) => *n,
            Some(PriceField::Text(s)) => normalize::parse_price(s),
            None => 0.0,
        }
    }

    /// Structured color terms, normalized. `None` means no structured color
    /// exists and matching must fall back to text containment.
    pub fn structured_colors(&self) -> Option<Vec<String>> {
        if let Some(list) = &self.colors {
            let terms: Vec<String> = list
                .iter()
                .map(|c| normalize::norm(c))
                .filter(|c| !c.is_empty())
                .collect();
            if !terms.is_empty() {
                return Some(terms);
            }
        }
        let terms = match &self.color {
            Some(ColorField::List(list)) => list
                .iter()
                .map(|c| normalize::norm(c))
                .filter(|c| !c.is_empty())
                .collect::<Vec<_>>(),
            Some(ColorField::Text(s)) => normalize::split_color_field(s),
            None => Vec::new(),
        };
        if terms.is_empty() {
            None
        } else {
            Some(terms)
        }
    }

    /// Fallback text blob for substring color matching.
    pub fn fallback_text(&self) -> String {
        normalize::norm(&format!("{} {}", self.name, self.category))
    }

    /// Price for display: the source value verbatim.
    pub fn display_price(&self) -> String {
        match &self.price {
            Some(PriceField::Number(n)) => {
                if n.fract() == 0.0 {
                    format!("{}", *n as i64)
                } else {
                    format!("{n}")
                }
            }
            Some(PriceField::Text(s)) => s.clone(),
            None => String::new(),
        }
    }
}
