//! Construct rendering.
//!
//! Pure functions mapping a recognized [`Construct`]'s captured fields to
//! an HTML fragment. No I/O, no state: the same input always produces the
//! same bytes.
//!
//! Captured fields are interpolated verbatim. Post bodies are trusted,
//! author-supplied text; nothing here escapes or sanitizes them.

use std::fmt::Write;

use super::rule::Construct;

/// U+2014, the output of the `!--` shorthand.
pub const EM_DASH: &str = "\u{2014}";

/// Dispatch a recognized construct to its rendering function.
#[must_use]
pub fn render_construct(construct: &Construct) -> String {
    match construct {
        Construct::EmDash => EM_DASH.to_owned(),
        Construct::Figure { caption, alt, url } => figure(caption, alt, url),
        Construct::Callout {
            text,
            icon,
            color,
            class,
            url,
        } => callout(text, icon, color, class, url),
        Construct::Gallery { urls } => gallery(urls),
    }
}

/// `<figure>` with the image followed by its caption div.
#[must_use]
pub fn figure(caption: &str, alt: &str, url: &str) -> String {
    format!(r#"<figure><img src="{url}" alt="{alt}" /><div>{caption}</div></figure>"#)
}

/// Call-out card: colored backdrop, link wrapper, icon glyph, text body.
///
/// The color is a hex value without the leading `#`; the `#` is part of
/// the template. An empty class leaves a trailing space in the class
/// attribute.
#[must_use]
pub fn callout(text: &str, icon: &str, color: &str, class: &str, url: &str) -> String {
    format!(
        r#"<div class="woo"><div class="woo-fake" style="background: #{color};"></div><a href="{url}"><div class="woo-content-wrapper"><div class="woo-content {class}"><i class="material-icons">{icon}</i><div>{text}</div></div></div></a></div>"#
    )
}

/// Expandable image grid: one cell per URL plus the more/less controls.
///
/// Emitted as a single pass over the URL list, one cell per entry in
/// input order.
#[must_use]
pub fn gallery(urls: &[String]) -> String {
    let mut out = String::with_capacity(256 + urls.len() * 64);
    out.push_str(r#"<div class="gallery less"><div class="gallery-content mdl-grid"><div class="gallery-shadow"></div>"#);
    for url in urls {
        write!(
            out,
            r#"<div class="mdl-cell mdl-cell--4-col"><img src="{url}"></div>"#
        )
        .unwrap();
    }
    out.push_str(r#"</div><div class="gallery-more"><button><i class="material-icons">expand_more</i></button></div><div class="gallery-less"><button><i class="material-icons">expand_less</i></button></div></div>"#);
    out
}
