//! Result filter & ranker
//!
//! Budget ceiling, color avoidance, color-preference boost, then a stable
//! sort: boosted items first, ascending parsed price within each tier.
//! Scoring annotations live in a local wrapper and never reach the output;
//! input items are not mutated.

use stylist_core::{CatalogItem, PreferenceQuery};

struct Scored<'a> {
    item: &'a CatalogItem,
    price: f64,
    boosted: bool,
}

/// Filter and sort `items` against the query. Returns clones of the
/// survivors; the empty-result fallback is the caller's decision.
pub fn filter_and_rank(items: &[CatalogItem], query: &PreferenceQuery) -> Vec<CatalogItem> {
    let ceiling = query.budget_ceiling();
    let preferred = query.preferred_colors();
    let avoided = query.avoided_colors();

    let mut kept: Vec<Scored<'_>> = Vec::with_capacity(items.len());
    for item in items {
        let price = item.parsed_price();
        if let Some(max) = ceiling {
            if price > max {
                continue;
            }
        }

        // structured membership when the item has colors, substring fallback
        // over name+category text otherwise
        let colors = item.structured_colors();
        let text = item.fallback_text();
        let matches_any = |terms: &[String]| -> bool {
            match &colors {
                Some(list) => terms.iter().any(|t| list.contains(t)),
                None => terms.iter().any(|t| text.contains(t.as_str())),
            }
        };

        if !avoided.is_empty() && matches_any(&avoided) {
            continue;
        }
        let boosted = !preferred.is_empty() && matches_any(&preferred);

        kept.push(Scored {
            item,
            price,
            boosted,
        });
    }

    // sort_by is stable, so equal-key items keep their input order
    kept.sort_by(|a, b| {
        b.boosted
            .cmp(&a.boosted)
            .then_with(|| a.price.total_cmp(&b.price))
    });

    kept.into_iter().map(|s| s.item.clone()).collect()
}
