//! Server-side product markup
//!
//! A minimal, escaped HTML grid the embedding page can drop in as-is. The
//! host site's own commerce rendering is out of scope; this is the generic
//! fallback.

use stylist_core::CatalogItem;

/// Render the filtered items as an HTML grid; empty input renders nothing.
pub fn products_html(items: &[CatalogItem]) -> String {
    if items.is_empty() {
        return String::new();
    }

    let mut html = String::from("<div class=\"stylist-products\">");
    for item in items {
        html.push_str("<article class=\"stylist-product\">");
        if !item.image.is_empty() {
            html.push_str(&format!(
                "<img src=\"{}\" alt=\"{}\">",
                escape(&item.image),
                escape(&item.name)
            ));
        }
        if item.url.is_empty() {
            html.push_str(&format!("<h4>{}</h4>", escape(&item.name)));
        } else {
            html.push_str(&format!(
                "<h4><a href=\"{}\">{}</a></h4>",
                escape(&item.url),
                escape(&item.name)
            ));
        }
        if !item.brand.is_empty() {
            html.push_str(&format!(
                "<span class=\"stylist-product__brand\">{}</span>",
                escape(&item.brand)
            ));
        }
        let price = item.display_price();
        if !price.is_empty() {
            html.push_str(&format!(
                "<span class=\"stylist-product__price\">{}</span>",
                escape(&price)
            ));
        }
        html.push_str("</article>");
    }
    html.push_str("</div>");
    html
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(value: serde_json::Value) -> CatalogItem {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn empty_items_render_nothing() {
        assert_eq!(products_html(&[]), "");
    }

    #[test]
    fn renders_name_brand_and_source_price() {
        let html = products_html(&[item(json!({
            "name": "Camisa Oxford",
            "brand": "Bowen",
            "price": "12.500,00",
            "url": "https://tienda.example/camisa",
        }))]);
        assert!(html.contains("Camisa Oxford"));
        assert!(html.contains("Bowen"));
        // source formatting preserved, not the parsed float
        assert!(html.contains("12.500,00"));
        assert!(html.contains("href=\"https://tienda.example/camisa\""));
    }

    #[test]
    fn escapes_markup_in_fields() {
        let html = products_html(&[item(json!({
            "name": "<script>alert(1)</script>",
        }))]);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
