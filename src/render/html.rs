//! Standalone HTML document rendering for [`Page`].

use std::fmt::Write;

use super::page::{
    Block, Button, CardList, Feature, FooterBlock, Frame, HeroBlock, Image, Nav, Page, Quote,
    Section, TestimonialList,
};

/// Base stylesheet shared by every theme.
const STYLESHEET: &str = include_str!("page.css");

/// Escapes text for HTML element content and attribute values.
///
/// # Examples
///
/// ```
/// use tradeforge::render::html::escape;
///
/// assert_eq!(escape(r#"<a href="x">Tom & Jerry's</a>"#),
///     "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;");
/// ```
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

/// Renders a complete HTML document.
pub fn to_document(page: &Page) -> String {
    let mut out = String::with_capacity(16 * 1024);
    let motion = &page.motion;

    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let _ = writeln!(out, "<title>{}</title>", escape(&page.title));
    let _ = writeln!(
        out,
        "<meta name=\"description\" content=\"{}\">",
        escape(&page.description)
    );
    if !page.keywords.is_empty() {
        let _ = writeln!(
            out,
            "<meta name=\"keywords\" content=\"{}\">",
            escape(&page.keywords.join(", "))
        );
    }
    out.push_str("<style>\n");
    out.push_str(STYLESHEET);
    let _ = writeln!(
        out,
        "@keyframes enter {{ from {{ opacity: {}; transform: translate({}px, {}px) scale({}); }} to {{ opacity: 1; transform: none; }} }}",
        motion.from_opacity, motion.from_x, motion.from_y, motion.from_scale
    );
    let _ = writeln!(
        out,
        ".animate-{} .section {{ animation: enter {}s ease-out both; }}",
        motion.name, motion.duration
    );
    out.push_str("</style>\n</head>\n");

    let _ = writeln!(
        out,
        "<body>\n<div{} data-theme=\"{}\" data-viewport=\"{}\" style=\"max-width: {}px\">",
        attrs(&page.root),
        page.theme.id(),
        page.viewport.id(),
        page.viewport.width_px()
    );
    nav(&mut out, &page.nav);
    out.push_str("<main>\n");
    for (i, section) in page.sections.iter().enumerate() {
        render_section(&mut out, section, i, motion.stagger);
    }
    out.push_str("</main>\n</div>\n</body>\n</html>\n");
    out
}

fn attrs(frame: &Frame) -> String {
    let mut out = String::new();
    if !frame.class.is_empty() {
        let _ = write!(out, " class=\"{}\"", escape(&frame.class));
    }
    if !frame.style.is_empty() {
        let _ = write!(out, " style=\"{}\"", escape(&frame.style));
    }
    out
}

fn button(out: &mut String, button: &Button) {
    let _ = write!(
        out,
        "<a href=\"{}\"{}>{}</a>",
        escape(&button.href),
        attrs(&button.frame),
        escape(&button.label)
    );
}

fn image(out: &mut String, image: &Image) {
    let _ = write!(
        out,
        "<figure{}><img src=\"{}\" alt=\"{}\" loading=\"lazy\"></figure>",
        attrs(&image.frame),
        escape(&image.src),
        escape(&image.alt)
    );
}

fn nav(out: &mut String, nav: &Nav) {
    if let Some(bar) = &nav.top_bar {
        let _ = writeln!(
            out,
            "<div{}><span>{}</span> <a href=\"{}\">{}</a></div>",
            attrs(&bar.frame),
            escape(&bar.message),
            escape(&bar.phone.href),
            escape(&bar.phone.label)
        );
    }
    let _ = write!(out, "<header{}><a href=\"#top\"{}>", attrs(&nav.frame), attrs(&nav.logo_frame));
    for part in &nav.logo {
        if part.highlight {
            let _ = write!(out, "<span class=\"logo-highlight\">{}</span>", escape(&part.text));
        } else {
            let _ = write!(out, "<span>{}</span>", escape(&part.text));
        }
    }
    if let Some(tagline) = &nav.tagline {
        let _ = write!(out, "<small class=\"tagline\">{}</small>", escape(tagline));
    }
    out.push_str("</a>");
    if !nav.links.is_empty() {
        out.push_str("<nav>");
        for link in &nav.links {
            let _ = write!(out, "<a href=\"{}\">{}</a>", escape(&link.href), escape(&link.label));
        }
        out.push_str("</nav>");
    }
    if let Some(cta) = &nav.cta {
        button(out, cta);
    }
    out.push_str("</header>\n");
}

fn render_section(out: &mut String, section: &Section, index: usize, stagger: f64) {
    if let Some(divider) = &section.divider_before {
        let _ = writeln!(out, "<div class=\"divider divider-{}\"></div>", escape(divider));
    }
    let tag = if matches!(section.body, Block::Footer(_)) {
        "footer"
    } else {
        "section"
    };
    let _ = write!(out, "<{tag}");
    if let Some(id) = &section.id {
        let _ = write!(out, " id=\"{}\"", escape(id));
    }
    let _ = write!(
        out,
        " data-section=\"{}\"{} data-delay=\"{:.2}\">",
        section.kind.as_str(),
        attrs(&section.frame),
        stagger * index as f64
    );
    out.push_str("<div class=\"container\">");
    match &section.body {
        Block::Hero(hero) => render_hero(out, hero),
        Block::Badges { heading, items } => {
            if let Some(heading) = heading {
                let _ = write!(out, "<h2>{}</h2>", escape(heading));
            }
            out.push_str("<ul class=\"badges\">");
            for item in items {
                let _ = write!(out, "<li class=\"badge\">{}</li>", escape(item));
            }
            out.push_str("</ul>");
        }
        Block::Cards(list) => render_cards(out, list),
        Block::Feature(feature) => render_feature(out, feature),
        Block::Quote(quote) => render_quote(out, quote),
        Block::Testimonials(list) => render_testimonials(out, list),
        Block::Faq { heading, items } => {
            let _ = write!(out, "<h2>{}</h2><div class=\"faq\">", escape(heading));
            for item in items {
                let _ = write!(
                    out,
                    "<details><summary>{}</summary><p>{}</p></details>",
                    escape(&item.question),
                    escape(&item.answer)
                );
            }
            out.push_str("</div>");
        }
        Block::Callout {
            eyebrow,
            heading,
            text,
            button: cta,
        } => {
            eyebrow_tag(out, eyebrow.as_deref());
            let _ = write!(out, "<h2>{}</h2><p>{}</p>", escape(heading), escape(text));
            if let Some(cta) = cta {
                button(out, cta);
            }
        }
        Block::Footer(footer) => render_footer(out, footer),
    }
    let _ = writeln!(out, "</div></{tag}>");
}

fn eyebrow_tag(out: &mut String, eyebrow: Option<&str>) {
    if let Some(text) = eyebrow {
        let _ = write!(out, "<p class=\"eyebrow\">{}</p>", escape(text));
    }
}

fn render_hero(out: &mut String, hero: &HeroBlock) {
    if hero.backdrop {
        if let Some(img) = &hero.image {
            image(out, img);
        }
    }
    if let Some(decoration) = &hero.decoration {
        let _ = write!(out, "<div{}></div>", attrs(decoration));
    }
    out.push_str("<div class=\"hero-text\">");
    eyebrow_tag(out, hero.eyebrow.as_deref());
    if let Some(badge) = &hero.badge {
        let _ = write!(out, "<span class=\"badge badge-alert\">{}</span>", escape(badge));
    }
    let _ = write!(
        out,
        "<h1>{}</h1><p class=\"subheadline\">{}</p>",
        escape(&hero.headline),
        escape(&hero.subheadline)
    );
    if !hero.actions.is_empty() {
        out.push_str("<div class=\"actions\">");
        for action in &hero.actions {
            button(out, action);
        }
        out.push_str("</div>");
    }
    out.push_str("</div>");
    if !hero.backdrop {
        if let Some(img) = &hero.image {
            image(out, img);
        }
    }
}

fn render_cards(out: &mut String, list: &CardList) {
    eyebrow_tag(out, list.eyebrow.as_deref());
    let _ = write!(out, "<h2>{}</h2>", escape(&list.heading));
    if let Some(intro) = &list.intro {
        let _ = write!(out, "<p class=\"intro\">{}</p>", escape(intro));
    }
    out.push_str("<div class=\"grid\">");
    for card in &list.items {
        let _ = write!(out, "<article{}>", attrs(&card.frame));
        if let Some(label) = &card.label {
            let _ = write!(out, "<span class=\"ordinal\">{}</span>", escape(label));
        }
        if let Some(icon) = &card.icon {
            let _ = write!(out, "<i class=\"icon\" data-icon=\"{}\"></i>", escape(icon));
        }
        let _ = write!(
            out,
            "<h3>{}</h3><p>{}</p></article>",
            escape(&card.title),
            escape(&card.text)
        );
    }
    out.push_str("</div>");
}

fn render_feature(out: &mut String, feature: &Feature) {
    if feature.image_first {
        if let Some(img) = &feature.image {
            image(out, img);
        }
    }
    out.push_str("<div class=\"feature-text\">");
    eyebrow_tag(out, feature.eyebrow.as_deref());
    let _ = write!(out, "<h2>{}</h2>", escape(&feature.heading));
    if !feature.text.is_empty() {
        let _ = write!(out, "<p>{}</p>", escape(&feature.text));
    }
    if !feature.points.is_empty() {
        out.push_str("<ul class=\"points\">");
        for point in &feature.points {
            let _ = write!(out, "<li>{}</li>", escape(point));
        }
        out.push_str("</ul>");
    }
    out.push_str("</div>");
    if !feature.image_first {
        if let Some(img) = &feature.image {
            image(out, img);
        }
    }
}

fn render_quote(out: &mut String, quote: &Quote) {
    if let Some(img) = &quote.image {
        image(out, img);
    }
    eyebrow_tag(out, quote.eyebrow.as_deref());
    let _ = write!(out, "<blockquote>{}", escape(&quote.text));
    if let Some(attribution) = &quote.attribution {
        let _ = write!(out, "<cite>{}</cite>", escape(attribution));
    }
    out.push_str("</blockquote>");
}

fn render_testimonials(out: &mut String, list: &TestimonialList) {
    let _ = write!(out, "<h2>{}</h2><div class=\"grid\">", escape(&list.heading));
    for item in &list.items {
        let stars = "\u{2605}".repeat(usize::from(item.rating));
        let _ = write!(
            out,
            "<figure{}><span class=\"stars\" aria-label=\"{} stars\">{stars}</span><blockquote>{}</blockquote><figcaption><strong>{}</strong>",
            attrs(&list.card),
            item.rating,
            escape(&item.text),
            escape(&item.author)
        );
        if !item.role.is_empty() {
            let _ = write!(out, " <span>{}</span>", escape(&item.role));
        }
        out.push_str("</figcaption></figure>");
    }
    out.push_str("</div>");
}

fn render_footer(out: &mut String, footer: &FooterBlock) {
    out.push_str("<div class=\"footer-columns\"><div>");
    let _ = write!(out, "<h3>{}</h3>", escape(&footer.brand));
    if let Some(text) = &footer.text {
        let _ = write!(out, "<p>{}</p>", escape(text));
    }
    out.push_str("</div><div><h4>Contact</h4><ul>");
    let contact = &footer.contact;
    for line in [&contact.phone, &contact.email, &contact.address] {
        if !line.is_empty() {
            let _ = write!(out, "<li>{}</li>", escape(line));
        }
    }
    out.push_str("</ul></div>");
    for column in &footer.columns {
        let _ = write!(out, "<div><h4>{}</h4><ul>", escape(&column.title));
        for item in &column.items {
            let _ = write!(out, "<li>{}</li>", escape(item));
        }
        out.push_str("</ul></div>");
    }
    let _ = write!(out, "</div><p class=\"legal\">{}</p>", escape(&footer.legal));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_covers_markup_characters() {
        assert_eq!(escape("a < b && c > d"), "a &lt; b &amp;&amp; c &gt; d");
        assert_eq!(escape("it's \"quoted\""), "it&#39;s &quot;quoted&quot;");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_attrs_skip_empty_parts() {
        assert_eq!(attrs(&Frame::default()), "");
        assert_eq!(attrs(&Frame::new("a b", "")), " class=\"a b\"");
        assert_eq!(
            attrs(&Frame::new("", "color: red;")),
            " style=\"color: red;\""
        );
    }
}
