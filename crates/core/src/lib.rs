//! Core types for the stylist chat
//!
//! Shared across all other crates:
//! - Conversation turns replayed to the model as context
//! - The structured preference extraction (`PreferenceQuery`)
//! - Loosely typed catalog records (`CatalogItem`)
//! - Preference normalization helpers

pub mod catalog;
pub mod conversation;
pub mod normalize;
pub mod query;

pub use catalog::{CatalogItem, ColorField, PriceField};
pub use conversation::{Turn, TurnRole};
pub use normalize::{normalize_color_list, normalize_gender, parse_price, Gender};
pub use query::PreferenceQuery;
