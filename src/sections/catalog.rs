//! Built-in section definitions. Adding a block to the page builder means
//! adding a definition here and a renderer in `render::components`.

use super::{FieldSpec, FieldType, SectionDefinition, SectionVariant};
use crate::constants;
use serde_json::json;

pub fn built_in_definitions() -> Vec<SectionDefinition> {
    vec![
        hero(),
        services(),
        portfolio(),
        testimonials(),
        about(),
        cta(),
        contact(),
        gallery(),
        faq(),
        text(),
    ]
}

fn hero() -> SectionDefinition {
    SectionDefinition {
        id: constants::SECTION_HERO,
        name: "Hero",
        description: "Full-width banner with headline, subline and call to action",
        schema: vec![
            FieldSpec::new("headline", FieldType::Text, "Headline").required(),
            FieldSpec::new("subline", FieldType::Textarea, "Subline"),
            FieldSpec::new("background_image", FieldType::Image, "Background image"),
            FieldSpec::new("cta_label", FieldType::Text, "Button label"),
            FieldSpec::new("cta_url", FieldType::Url, "Button link"),
        ],
        default_data: json!({
            "headline": "Welcome to our studio",
            "subline": "We build brands people remember.",
            "background_image": "",
            "cta_label": "Get in touch",
            "cta_url": "/p/contact",
        }),
        variants: vec![
            SectionVariant { name: "default", component_name: "HeroDefault" },
            SectionVariant { name: "centered", component_name: "HeroCentered" },
            SectionVariant { name: "split", component_name: "HeroSplit" },
        ],
    }
}

fn services() -> SectionDefinition {
    SectionDefinition {
        id: constants::SECTION_SERVICES,
        name: "Services",
        description: "Grid of service cards",
        schema: vec![
            FieldSpec::new("heading", FieldType::Text, "Heading").required(),
            FieldSpec::new("intro", FieldType::Textarea, "Intro text"),
            FieldSpec::new(
                "columns",
                FieldType::Select,
                "Columns",
            )
            .with_options(vec!["2", "3", "4"]),
            FieldSpec::new("show_featured_only", FieldType::Boolean, "Featured only"),
        ],
        default_data: json!({
            "heading": "What we do",
            "intro": "",
            "columns": "3",
            "show_featured_only": false,
        }),
        variants: vec![
            SectionVariant { name: "grid", component_name: "ServicesGrid" },
            SectionVariant { name: "list", component_name: "ServicesList" },
        ],
    }
}

fn portfolio() -> SectionDefinition {
    SectionDefinition {
        id: constants::SECTION_PORTFOLIO,
        name: "Portfolio",
        description: "Selected work, as cards or a masonry wall",
        schema: vec![
            FieldSpec::new("heading", FieldType::Text, "Heading").required(),
            FieldSpec::new("limit", FieldType::Number, "Max items"),
            FieldSpec::new("tag_filter", FieldType::Text, "Filter by tag"),
        ],
        default_data: json!({
            "heading": "Selected work",
            "limit": 6,
            "tag_filter": "",
        }),
        variants: vec![
            SectionVariant { name: "cards", component_name: "PortfolioCards" },
            SectionVariant { name: "masonry", component_name: "PortfolioMasonry" },
        ],
    }
}

fn testimonials() -> SectionDefinition {
    SectionDefinition {
        id: constants::SECTION_TESTIMONIALS,
        name: "Testimonials",
        description: "Client quotes",
        schema: vec![
            FieldSpec::new("heading", FieldType::Text, "Heading"),
            FieldSpec::new("limit", FieldType::Number, "Max quotes"),
        ],
        default_data: json!({
            "heading": "What clients say",
            "limit": 3,
        }),
        variants: vec![
            SectionVariant { name: "carousel", component_name: "TestimonialsCarousel" },
            SectionVariant { name: "stacked", component_name: "TestimonialsStacked" },
        ],
    }
}

fn about() -> SectionDefinition {
    SectionDefinition {
        id: constants::SECTION_ABOUT,
        name: "About",
        description: "Image-and-copy introduction block",
        schema: vec![
            FieldSpec::new("heading", FieldType::Text, "Heading").required(),
            FieldSpec::new("body", FieldType::RichText, "Body").required(),
            FieldSpec::new("image", FieldType::Image, "Image"),
            FieldSpec::new("image_side", FieldType::Select, "Image side")
                .with_options(vec!["left", "right"]),
        ],
        default_data: json!({
            "heading": "About us",
            "body": "<p>We are a small team of designers and engineers.</p>",
            "image": "",
            "image_side": "left",
        }),
        variants: vec![SectionVariant { name: "default", component_name: "AboutDefault" }],
    }
}

fn cta() -> SectionDefinition {
    SectionDefinition {
        id: constants::SECTION_CTA,
        name: "Call to action",
        description: "Banner nudging the visitor toward contact",
        schema: vec![
            FieldSpec::new("text", FieldType::Text, "Text").required(),
            FieldSpec::new("button_label", FieldType::Text, "Button label").required(),
            FieldSpec::new("button_url", FieldType::Url, "Button link").required(),
        ],
        default_data: json!({
            "text": "Ready to start a project?",
            "button_label": "Talk to us",
            "button_url": "/p/contact",
        }),
        variants: vec![
            SectionVariant { name: "banner", component_name: "CtaBanner" },
            SectionVariant { name: "inline", component_name: "CtaInline" },
        ],
    }
}

fn contact() -> SectionDefinition {
    SectionDefinition {
        id: constants::SECTION_CONTACT,
        name: "Contact",
        description: "Contact details with an enquiry form",
        schema: vec![
            FieldSpec::new("heading", FieldType::Text, "Heading"),
            FieldSpec::new("intro", FieldType::Textarea, "Intro text"),
            FieldSpec::new("show_map", FieldType::Boolean, "Show map"),
        ],
        default_data: json!({
            "heading": "Get in touch",
            "intro": "",
            "show_map": false,
        }),
        variants: vec![SectionVariant { name: "default", component_name: "ContactDefault" }],
    }
}

fn gallery() -> SectionDefinition {
    SectionDefinition {
        id: constants::SECTION_GALLERY,
        name: "Gallery",
        description: "Image grid",
        schema: vec![
            FieldSpec::new("heading", FieldType::Text, "Heading"),
            FieldSpec::new("images", FieldType::List, "Image URLs"),
        ],
        default_data: json!({
            "heading": "",
            "images": [],
        }),
        variants: vec![SectionVariant { name: "grid", component_name: "GalleryGrid" }],
    }
}

fn faq() -> SectionDefinition {
    SectionDefinition {
        id: constants::SECTION_FAQ,
        name: "FAQ",
        description: "Question and answer list",
        schema: vec![
            FieldSpec::new("heading", FieldType::Text, "Heading"),
            FieldSpec::new("items", FieldType::List, "Questions (question|answer per line)"),
        ],
        default_data: json!({
            "heading": "Frequently asked questions",
            "items": [],
        }),
        variants: vec![SectionVariant { name: "accordion", component_name: "FaqAccordion" }],
    }
}

fn text() -> SectionDefinition {
    SectionDefinition {
        id: constants::SECTION_TEXT,
        name: "Rich text",
        description: "Free-form formatted copy",
        schema: vec![FieldSpec::new("body", FieldType::RichText, "Body").required()],
        default_data: json!({
            "body": "<p>Write something here.</p>",
        }),
        variants: vec![SectionVariant { name: "default", component_name: "RichTextBlock" }],
    }
}
