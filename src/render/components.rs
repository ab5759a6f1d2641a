//! HTML fragment renderers, one per section variant. Each is a pure
//! function of the section's data payload.

use serde_json::Value;

use crate::domain::Menu;

/// Minimal HTML entity escaping for text interpolated into markup.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn text(data: &Value, field: &str) -> String {
    escape(data.get(field).and_then(Value::as_str).unwrap_or(""))
}

/// Rich-text fields are stored as HTML authored in the editor and pass
/// through unescaped.
fn rich(data: &Value, field: &str) -> String {
    data.get(field)
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string()
}

fn number(data: &Value, field: &str) -> Option<i64> {
    data.get(field).and_then(Value::as_i64)
}

fn items(data: &Value) -> Vec<&Value> {
    data.get("items")
        .and_then(Value::as_array)
        .map(|a| a.iter().collect())
        .unwrap_or_default()
}

/// Placeholder for a stored component name with no dispatch entry.
pub fn missing_component(component_name: &str) -> String {
    format!(
        "<div class=\"cms-missing\">Component not found: {}</div>",
        escape(component_name)
    )
}

pub fn render_nav(menu: &Menu) -> String {
    let mut links = String::new();
    for item in menu.visible_top_level() {
        let target = if item.open_in_new_tab {
            " target=\"_blank\" rel=\"noopener\""
        } else {
            ""
        };
        links.push_str(&format!(
            "<li><a href=\"{}\"{}>{}</a></li>",
            escape(&item.url),
            target,
            escape(&item.label)
        ));
    }
    format!("<nav><ul>{}</ul></nav>", links)
}

pub fn hero_default(data: &Value) -> String {
    let bg = text(data, "background_image");
    let style = if bg.is_empty() {
        String::new()
    } else {
        format!(" style=\"background-image:url('{}')\"", bg)
    };
    format!(
        "<section class=\"section-hero section-hero--default\"{style}>\
         <h1>{}</h1><p>{}</p>{}</section>",
        text(data, "headline"),
        text(data, "subline"),
        hero_cta(data),
    )
}

pub fn hero_centered(data: &Value) -> String {
    format!(
        "<section class=\"section-hero section-hero--centered\">\
         <h1>{}</h1><p>{}</p>{}</section>",
        text(data, "headline"),
        text(data, "subline"),
        hero_cta(data),
    )
}

pub fn hero_split(data: &Value) -> String {
    format!(
        "<section class=\"section-hero section-hero--split\">\
         <div class=\"copy\"><h1>{}</h1><p>{}</p>{}</div>\
         <div class=\"media\"><img src=\"{}\" alt=\"\"></div></section>",
        text(data, "headline"),
        text(data, "subline"),
        hero_cta(data),
        text(data, "background_image"),
    )
}

fn hero_cta(data: &Value) -> String {
    let label = text(data, "cta_label");
    if label.is_empty() {
        return String::new();
    }
    format!(
        "<a class=\"cta\" href=\"{}\">{}</a>",
        text(data, "cta_url"),
        label
    )
}

pub fn services_grid(data: &Value) -> String {
    let columns = text(data, "columns");
    let mut cards = String::new();
    for item in items(data) {
        cards.push_str(&format!(
            "<article class=\"card\"><h3>{}</h3><p>{}</p></article>",
            text(item, "title"),
            text(item, "description"),
        ));
    }
    format!(
        "<section class=\"section-services section-services--grid\" data-columns=\"{}\">\
         <h2>{}</h2><p>{}</p><div class=\"grid\">{}</div></section>",
        if columns.is_empty() { "3".into() } else { columns },
        text(data, "heading"),
        text(data, "intro"),
        cards,
    )
}

pub fn services_list(data: &Value) -> String {
    let mut rows = String::new();
    for item in items(data) {
        rows.push_str(&format!(
            "<li><strong>{}</strong> {}</li>",
            text(item, "title"),
            text(item, "description"),
        ));
    }
    format!(
        "<section class=\"section-services section-services--list\">\
         <h2>{}</h2><ul>{}</ul></section>",
        text(data, "heading"),
        rows,
    )
}

pub fn portfolio_cards(data: &Value) -> String {
    portfolio(data, "cards")
}

pub fn portfolio_masonry(data: &Value) -> String {
    portfolio(data, "masonry")
}

fn portfolio(data: &Value, layout: &str) -> String {
    let limit = number(data, "limit").unwrap_or(i64::MAX).max(0) as usize;
    let mut cards = String::new();
    for item in items(data).into_iter().take(limit) {
        cards.push_str(&format!(
            "<figure><img src=\"{}\" alt=\"{}\"><figcaption>{}</figcaption></figure>",
            text(item, "image_url"),
            text(item, "title"),
            text(item, "title"),
        ));
    }
    format!(
        "<section class=\"section-portfolio section-portfolio--{layout}\">\
         <h2>{}</h2><div class=\"wall\">{}</div></section>",
        text(data, "heading"),
        cards,
    )
}

pub fn testimonials_carousel(data: &Value) -> String {
    testimonials(data, "carousel")
}

pub fn testimonials_stacked(data: &Value) -> String {
    testimonials(data, "stacked")
}

fn testimonials(data: &Value, layout: &str) -> String {
    let limit = number(data, "limit").unwrap_or(i64::MAX).max(0) as usize;
    let mut quotes = String::new();
    for item in items(data).into_iter().take(limit) {
        quotes.push_str(&format!(
            "<blockquote><p>{}</p><cite>{}</cite></blockquote>",
            text(item, "quote"),
            text(item, "author_name"),
        ));
    }
    format!(
        "<section class=\"section-testimonials section-testimonials--{layout}\">\
         <h2>{}</h2>{}</section>",
        text(data, "heading"),
        quotes,
    )
}

pub fn about_default(data: &Value) -> String {
    let side = text(data, "image_side");
    format!(
        "<section class=\"section-about\" data-image-side=\"{}\">\
         <img src=\"{}\" alt=\"\"><div><h2>{}</h2>{}</div></section>",
        if side.is_empty() { "left".into() } else { side },
        text(data, "image"),
        text(data, "heading"),
        rich(data, "body"),
    )
}

pub fn cta_banner(data: &Value) -> String {
    cta(data, "banner")
}

pub fn cta_inline(data: &Value) -> String {
    cta(data, "inline")
}

fn cta(data: &Value, layout: &str) -> String {
    format!(
        "<section class=\"section-cta section-cta--{layout}\"><p>{}</p>\
         <a class=\"cta\" href=\"{}\">{}</a></section>",
        text(data, "text"),
        text(data, "button_url"),
        text(data, "button_label"),
    )
}

pub fn contact_default(data: &Value) -> String {
    let map = data
        .get("show_map")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let map_html = if map {
        "<div class=\"map\" data-map></div>"
    } else {
        ""
    };
    format!(
        "<section class=\"section-contact\"><h2>{}</h2><p>{}</p>\
         <form method=\"post\" action=\"/api/enquiries\">\
         <input name=\"email\" type=\"email\" placeholder=\"Your email\">\
         <textarea name=\"message\" placeholder=\"How can we help?\"></textarea>\
         <button type=\"submit\">Send</button></form>{}</section>",
        text(data, "heading"),
        text(data, "intro"),
        map_html,
    )
}

pub fn gallery_grid(data: &Value) -> String {
    let mut cells = String::new();
    if let Some(images) = data.get("images").and_then(Value::as_array) {
        for url in images.iter().filter_map(Value::as_str) {
            cells.push_str(&format!("<img src=\"{}\" alt=\"\">", escape(url)));
        }
    }
    format!(
        "<section class=\"section-gallery\"><h2>{}</h2><div class=\"grid\">{}</div></section>",
        text(data, "heading"),
        cells,
    )
}

pub fn faq_accordion(data: &Value) -> String {
    let mut entries = String::new();
    if let Some(rows) = data.get("items").and_then(Value::as_array) {
        for row in rows.iter().filter_map(Value::as_str) {
            // Stored as "question|answer" per line in the editor
            let (question, answer) = row.split_once('|').unwrap_or((row, ""));
            entries.push_str(&format!(
                "<details><summary>{}</summary><p>{}</p></details>",
                escape(question.trim()),
                escape(answer.trim()),
            ));
        }
    }
    format!(
        "<section class=\"section-faq\"><h2>{}</h2>{}</section>",
        text(data, "heading"),
        entries,
    )
}

pub fn rich_text_block(data: &Value) -> String {
    format!("<section class=\"section-text\">{}</section>", rich(data, "body"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn escape_neutralizes_markup() {
        assert_eq!(escape("<b>&\"'"), "&lt;b&gt;&amp;&quot;&#39;");
    }

    #[test]
    fn hero_escapes_user_content() {
        let html = hero_default(&json!({
            "headline": "<script>alert(1)</script>",
            "subline": "",
        }));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn testimonials_respects_limit() {
        let html = testimonials_stacked(&json!({
            "heading": "Quotes",
            "limit": 1,
            "items": [
                {"quote": "First", "author_name": "A"},
                {"quote": "Second", "author_name": "B"},
            ],
        }));
        assert!(html.contains("First"));
        assert!(!html.contains("Second"));
    }

    #[test]
    fn faq_splits_question_and_answer() {
        let html = faq_accordion(&json!({
            "heading": "FAQ",
            "items": ["How long? | Two weeks"],
        }));
        assert!(html.contains("<summary>How long?</summary>"));
        assert!(html.contains("Two weeks"));
    }
}
