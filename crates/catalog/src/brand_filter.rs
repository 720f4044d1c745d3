//! Gender/brand classifier
//!
//! Drops items whose brand is exclusively associated with the other gender.
//! Conservative by construction: absence of information never excludes an
//! item, only positive evidence of gender-exclusivity does.

use stylist_config::BrandGenderSets;
use stylist_core::normalize::{norm, Gender};
use stylist_core::CatalogItem;

/// Keep the subset of `items` compatible with the wanted gender.
///
/// Unknown or unisex targets filter nothing. Items with no brand, a unisex
/// brand, or a brand absent from both exclusive sets always pass.
pub fn filter_by_brand_gender(
    items: Vec<CatalogItem>,
    wanted: Gender,
    brands: &BrandGenderSets,
) -> Vec<CatalogItem> {
    if matches!(wanted, Gender::Unknown | Gender::Unisex) {
        return items;
    }

    let unisex = brands.unisex();
    let women_only = brands.women_only();
    let men_only = brands.men_only();

    items
        .into_iter()
        .filter(|item| {
            let brand = norm(&item.brand);
            if brand.is_empty() || unisex.contains(&brand) {
                return true;
            }
            match wanted {
                Gender::Man => !women_only.contains(&brand),
                Gender::Woman => !men_only.contains(&brand),
                Gender::Unisex | Gender::Unknown => true,
            }
        })
        .collect()
}
