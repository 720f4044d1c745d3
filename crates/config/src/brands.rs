//! Brand/gender table
//!
//! Two named sets of brand names partition the brand universe: brands in
//! both sets are unisex, brands in exactly one are gender-exclusive, brands
//! in neither are unknown. This is static market configuration injected into
//! the classifier, not derived from catalog content, so it can be overridden
//! per market through `Settings`.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

fn norm(s: &str) -> String {
    s.trim().to_lowercase()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandGenderSets {
    pub women: BTreeSet<String>,
    pub men: BTreeSet<String>,
}

impl BrandGenderSets {
    pub fn new<W, M>(women: W, men: M) -> Self
    where
        W: IntoIterator,
        W::Item: AsRef<str>,
        M: IntoIterator,
        M::Item: AsRef<str>,
    {
        Self {
            women: women.into_iter().map(|b| norm(b.as_ref())).collect(),
            men: men.into_iter().map(|b| norm(b.as_ref())).collect(),
        }
    }

    /// Brands present in both sets.
    pub fn unisex(&self) -> BTreeSet<String> {
        self.women.intersection(&self.men).cloned().collect()
    }

    /// Brands present only in the women set.
    pub fn women_only(&self) -> BTreeSet<String> {
        self.women.difference(&self.men).cloned().collect()
    }

    /// Brands present only in the men set.
    pub fn men_only(&self) -> BTreeSet<String> {
        self.men.difference(&self.women).cloned().collect()
    }
}

impl Default for BrandGenderSets {
    /// The es-AR market table.
    fn default() -> Self {
        Self::new(
            [
                "kosiuko",
                "mishka",
                "tucci",
                "vesna",
                "maria antonieta",
                "maria cher",
                "prune",
                "portsaid",
                "awada",
                "jazmin chebar",
                "cloetas",
                "cleoetas",
                "harvey willys",
                "ay not dead",
            ],
            [
                "rever pass",
                "herencia",
                "kevingston",
                "bowen",
                "equus",
                "label99",
                "midway",
                "manki",
                "batuk",
                "king of the kongo",
                // "undefined" is a real label in this market, not a sentinel
                "undefined",
                "harvey willys",
                "ay not dead",
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_marks_shared_brands_unisex() {
        let sets = BrandGenderSets::default();
        let unisex = sets.unisex();
        assert!(unisex.contains("harvey willys"));
        assert!(unisex.contains("ay not dead"));
        assert!(!unisex.contains("kosiuko"));
        assert!(!unisex.contains("bowen"));
    }

    #[test]
    fn exclusive_sets_are_disjoint_from_unisex() {
        let sets = BrandGenderSets::default();
        let unisex = sets.unisex();
        for brand in sets.women_only() {
            assert!(!unisex.contains(&brand));
            assert!(!sets.men_only().contains(&brand));
        }
    }

    #[test]
    fn constructor_normalizes_and_dedups() {
        let sets = BrandGenderSets::new(["  Prune ", "PRUNE", "Maria Cher"], ["Bowen"]);
        assert_eq!(sets.women.len(), 2);
        assert!(sets.women.contains("prune"));
        assert!(sets.women.contains("maria cher"));
    }
}
