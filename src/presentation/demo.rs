//! Demo page served by the `weft` binary.
//!
//! A layout renders whatever children it is given inside `<main>`; the body is
//! a list of cards, every one of which declares the same CSS class and script.
//! The page therefore carries exactly one `<style>` and one `<script>` element,
//! at the first card, or none at all when a global stylesheet covers the class.

use std::io::Write;

use askama::Template;
use once_cell::sync::Lazy;

use crate::application::{
    resources::{render_css_items, render_script_items},
    templates::Templated,
};
use crate::config::PageSettings;
use crate::domain::{
    component::{Component, Fragment, Text},
    context::RenderContext,
    css::{ComponentCssClass, CssClass, class, classes},
    error::RenderError,
    sanitize::{escape_html, sanitize_css, sanitize_url},
    script::{ComponentScript, serialize_script_call},
};

static CARD_CLASS: Lazy<ComponentCssClass> = Lazy::new(|| {
    ComponentCssClass::from_declarations(
        "card",
        &[
            sanitize_css("border", "1px solid #ddd"),
            sanitize_css("border-radius", "6px"),
            sanitize_css("padding", "1rem"),
            sanitize_css("margin", "0 0 1rem"),
        ],
    )
});

const TOGGLE_FUNCTION: &str =
    "function weftToggle(id){var el=document.getElementById(id);if(el){el.hidden=!el.hidden;}}";

/// Every component CSS class used by the demo page.
pub fn component_classes() -> Vec<ComponentCssClass> {
    vec![CARD_CLASS.clone()]
}

#[derive(Template)]
#[template(
    source = "<header><h1>{{ title }}</h1><p>{{ tagline }}</p></header>",
    ext = "html"
)]
struct HeaderTemplate {
    title: String,
    tagline: String,
}

/// Document shell rendering its children inside `<main>`.
pub struct Layout {
    title: String,
    stylesheet: Option<String>,
    header: Templated<HeaderTemplate>,
}

impl Layout {
    pub fn new(title: impl Into<String>, stylesheet: Option<String>) -> Self {
        let title = title.into();
        let header = Templated(HeaderTemplate {
            title: title.clone(),
            tagline: "Rendered by weft components".to_string(),
        });
        Self {
            title,
            stylesheet,
            header,
        }
    }
}

impl Component for Layout {
    fn render(&self, ctx: RenderContext<'_>, w: &mut dyn Write) -> Result<(), RenderError> {
        write!(
            w,
            "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{}</title>",
            escape_html(&self.title)
        )?;
        if let Some(href) = &self.stylesheet {
            write!(
                w,
                "<link rel=\"stylesheet\" href=\"{}\">",
                escape_html(sanitize_url(href).as_str())
            )?;
        }
        w.write_all(b"</head><body>")?;
        self.header.render(ctx.clear_children(), w)?;
        w.write_all(b"<main>")?;
        ctx.children().render(ctx.clear_children(), w)?;
        w.write_all(b"</main></body></html>")?;
        Ok(())
    }
}

/// A card linking somewhere, with an optional collapsible body slot.
pub struct Card {
    id: String,
    title: String,
    href: String,
    accent: Option<String>,
}

impl Card {
    pub fn new(id: impl Into<String>, title: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            href: href.into(),
            accent: None,
        }
    }

    /// Extra class name supplied by the caller; validated before use.
    pub fn with_accent(mut self, accent: impl Into<String>) -> Self {
        self.accent = Some(accent.into());
        self
    }

    fn script(&self) -> ComponentScript {
        ComponentScript::new(
            "weftToggle",
            TOGGLE_FUNCTION,
            serialize_script_call("weftToggle", &[format!("{}-body", self.id)]),
        )
    }
}

impl Component for Card {
    fn render(&self, ctx: RenderContext<'_>, w: &mut dyn Write) -> Result<(), RenderError> {
        let card_class: CssClass = CARD_CLASS.clone().into();
        let script = self.script();
        render_css_items(ctx, w, std::slice::from_ref(&card_class))?;
        render_script_items(ctx, w, std::slice::from_ref(&script))?;

        let mut class_list = vec![card_class];
        if let Some(accent) = &self.accent {
            class_list.push(class(accent));
        }
        let id = escape_html(&self.id);
        write!(
            w,
            "<article id=\"{id}\" class=\"{}\"><h2 onclick=\"{}\">",
            escape_html(&classes(class_list).to_string()),
            script.call,
        )?;
        Text::new(self.title.clone()).render(ctx, w)?;
        write!(w, "</h2><div id=\"{id}-body\">")?;
        ctx.children().render(ctx.clear_children(), w)?;
        write!(
            w,
            "</div><a href=\"{}\">Read more</a></article>",
            escape_html(sanitize_url(&self.href).as_str())
        )?;
        Ok(())
    }
}

/// Layout wrapped around a body, the body handed down as children.
pub struct Page {
    layout: Layout,
    body: Fragment,
}

impl Component for Page {
    fn render(&self, ctx: RenderContext<'_>, w: &mut dyn Write) -> Result<(), RenderError> {
        self.layout.render(ctx.with_children(&self.body), w)
    }
}

/// Card with a body slot.
struct Slotted<C> {
    card: C,
    body: Text,
}

impl<C: Component> Component for Slotted<C> {
    fn render(&self, ctx: RenderContext<'_>, w: &mut dyn Write) -> Result<(), RenderError> {
        self.card.render(ctx.with_children(&self.body), w)
    }
}

/// Build the demo page for `settings`.
///
/// `stylesheet` is the path of the global stylesheet, when one is served.
pub fn demo_page(settings: &PageSettings, stylesheet: Option<String>) -> Page {
    let links = [
        "https://example.com/guide",
        "/docs/components",
        "javascript:alert(1)",
    ];
    let body = (0..settings.cards.get()).fold(Fragment::new(), |body, index| {
        let href = links[index as usize % links.len()];
        let card = Card::new(
            format!("card-{index}"),
            format!("Card {}", index + 1),
            href,
        )
        .with_accent(if index % 2 == 0 { "even" } else { "odd\" onclick=\"x" });
        body.push(Slotted {
            card,
            body: Text::new(format!("Body of card {} <escaped>", index + 1)),
        })
    });

    Page {
        layout: Layout::new(settings.title.clone(), stylesheet),
        body,
    }
}
