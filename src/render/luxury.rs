//! Premium & Luxury theme.

use super::page::{
    Block, Card, CardList, Feature, FooterBlock, HeroBlock, Link, LogoPart, Nav, Page, Quote,
    Section, TestimonialCard, TestimonialList,
};
use super::{ordinal, Button, Context, Frame, ThemeRenderer, Viewport};
use crate::models::LuxuryOverrides;
use crate::theme::{section_order, SectionKind};

const DEFAULT_ORDER: [SectionKind; 7] = [
    SectionKind::Hero,
    SectionKind::About,
    SectionKind::Quote,
    SectionKind::Services,
    SectionKind::Testimonials,
    SectionKind::ContactCta,
    SectionKind::Footer,
];

/// Sections preceded by the configured divider.
const DIVIDED: [SectionKind; 2] = [SectionKind::About, SectionKind::Testimonials];

const SERVICES_SHOWN: usize = 4;

const FALLBACK_QUOTE: &str = "An experience defined by thoughtfulness, precision, and an unwavering commitment to excellence.";
const FALLBACK_AUTHOR: &str = "A Valued Client";

pub struct LuxuryTheme;

impl ThemeRenderer for LuxuryTheme {
    fn render(&self, ctx: &Context<'_>) -> Page {
        let lux = lux(ctx);
        let divider = match lux.divider.as_str() {
            "none" => None,
            other => Some(other.to_string()),
        };

        let sections = section_order(ctx.blueprint_sections(), &DEFAULT_ORDER)
            .into_iter()
            .filter_map(|kind| {
                let mut section = section(ctx, kind)?;
                if DIVIDED.contains(&kind) {
                    section.divider_before.clone_from(&divider);
                }
                Some(section)
            })
            .collect();

        let p = &lux.palette;
        let root = ctx.root_frame(&format!(
            "--lux-bg: {}; --lux-surface: {}; --lux-accent: {}; --lux-gold: {}; --lux-text: {}; --lux-muted: {}; --lux-heading-font: {}; --lux-body-font: {}; --lux-heading-size: {}; --lux-heading-weight: {}; --lux-letter-spacing: {}; --lux-text-transform: {}; background: var(--lux-bg); color: var(--lux-text); font-family: var(--lux-body-font);",
            p.bg.to_hex(),
            p.surface.to_hex(),
            p.accent.to_hex(),
            p.gold.to_hex(),
            p.text.to_hex(),
            p.muted.to_hex(),
            lux.heading_font,
            lux.body_font,
            lux.heading_size,
            lux.heading_weight,
            lux.letter_spacing,
            lux.text_transform,
        ));
        ctx.page_shell(nav(ctx), sections, root)
    }
}

fn lux<'a>(ctx: &Context<'a>) -> &'a LuxuryOverrides {
    &ctx.style().themes.luxury
}

const HEADING_STYLE: &str = "font-family: var(--lux-heading-font); font-weight: var(--lux-heading-weight); letter-spacing: var(--lux-letter-spacing); text-transform: var(--lux-text-transform);";

fn button(ctx: &Context<'_>, label: &str, href: &str, primary: bool) -> Button {
    let lux = lux(ctx);
    let shape = if lux.button_shape == "rounded-full" {
        "rounded-full"
    } else {
        "rounded-xl"
    };
    let style = match lux.button_style.as_str() {
        "gradient" => {
            "background: linear-gradient(135deg, var(--lux-accent), var(--lux-gold)); color: #ffffff; border: none;"
        }
        "solid" if primary => "background: var(--lux-accent); color: #ffffff; border: none;",
        _ => "background: transparent; color: var(--lux-text); border: 1px solid var(--lux-accent);",
    };
    ctx.styled_button(
        label,
        href,
        &format!("btn btn-lg {shape} {}", ctx.resolved.classes.hover),
        style.to_string(),
    )
}

fn nav(ctx: &Context<'_>) -> Nav {
    let lux = lux(ctx);
    let p = &lux.palette;
    let nav_bg = p.nav_bg.map_or_else(|| "transparent".to_string(), |c| c.to_hex());

    let (class, style) = match lux.nav_style.as_str() {
        "transparent" => ("nav nav-transparent", "background: transparent;".to_string()),
        "floating" => (
            "nav nav-floating shadow-lg",
            format!("background: {nav_bg}; margin: 1rem; border-radius: 9999px;"),
        ),
        "bordered" => (
            "nav nav-bordered",
            format!("background: {nav_bg}; border-bottom: 1px solid var(--lux-gold);"),
        ),
        _ => ("nav nav-solid", format!("background: {nav_bg};")),
    };

    let links = if ctx.viewport() == Viewport::Desktop {
        [("About", "#about"), ("Services", "#services"), ("Contact", "#contact")]
            .into_iter()
            .map(|(label, href)| Link {
                label: label.to_string(),
                href: href.to_string(),
            })
            .collect()
    } else {
        Vec::new()
    };

    let label = if ctx.viewport().is_mobile() {
        "Inquire"
    } else {
        "Request Consultation"
    };

    Nav {
        top_bar: None,
        logo: vec![LogoPart {
            text: lux.brand_name.clone(),
            highlight: false,
        }],
        logo_frame: Frame::new("logo", format!("{HEADING_STYLE} color: {};", p.nav_text.to_hex())),
        tagline: (!ctx.viewport().is_mobile()).then(|| lux.tagline.clone()),
        links,
        cta: Some(button(ctx, label, "#contact", false)),
        frame: Frame::new(format!("{class} nav-sticky"), format!("{style} color: {};", p.nav_text.to_hex())),
    }
}

fn section(ctx: &Context<'_>, kind: SectionKind) -> Option<Section> {
    let content = ctx.content();
    let lux = lux(ctx);
    let media = &ctx.style().media;

    let (id, frame, body) = match kind {
        SectionKind::Hero => return Some(hero(ctx)),
        SectionKind::About | SectionKind::WhyChooseUs => (
            Some("about"),
            ctx.section_frame("about", ""),
            Block::Feature(Feature {
                eyebrow: Some("Our Philosophy".to_string()),
                heading: "Craftsmanship defined by excellence and precision.".to_string(),
                text: content.about.mission.clone(),
                points: if kind == SectionKind::WhyChooseUs {
                    content.about.why_choose_us.clone()
                } else {
                    Vec::new()
                },
                image: ctx.image(&lux.story_image, &lux.brand_name, "story-image").map(|mut image| {
                    image.frame.style = "aspect-ratio: 4 / 5; border-radius: 0;".to_string();
                    image
                }),
                image_first: false,
            }),
        ),
        SectionKind::Quote => (
            None,
            ctx.section_frame("quote-band", "color: #ffffff;"),
            Block::Quote(Quote {
                eyebrow: None,
                text: "Excellence is not a destination, but a standard we uphold in every detail."
                    .to_string(),
                attribution: None,
                image: ctx.image(&media.team_image, "", "quote-backdrop").map(|mut image| {
                    image.frame.style = "filter: brightness(0.35);".to_string();
                    image
                }),
            }),
        ),
        SectionKind::Services => {
            if content.services.is_empty() {
                return None;
            }
            let card = card_frame(ctx);
            let items = content
                .services
                .iter()
                .take(SERVICES_SHOWN)
                .enumerate()
                .map(|(i, service)| Card {
                    label: Some(ordinal(i)),
                    title: service.name.clone(),
                    text: service.description.clone(),
                    icon: None,
                    frame: card.clone(),
                })
                .collect();
            (
                Some("services"),
                ctx.section_frame("services", "background: var(--lux-surface);"),
                Block::Cards(CardList {
                    eyebrow: Some("Services".to_string()),
                    heading: "Our Expertise".to_string(),
                    intro: None,
                    items,
                }),
            )
        }
        SectionKind::Testimonials => {
            let item = content.testimonials.first().map_or_else(
                || TestimonialCard {
                    text: FALLBACK_QUOTE.to_string(),
                    author: FALLBACK_AUTHOR.to_string(),
                    role: String::new(),
                    rating: 5,
                },
                |t| TestimonialCard {
                    text: t.content.clone(),
                    author: t.author.clone(),
                    role: if t.role.is_empty() {
                        String::new()
                    } else {
                        format!("\u{2014} {}", t.role)
                    },
                    rating: t.rating.clamp(1, 5),
                },
            );
            (
                Some("reviews"),
                ctx.section_frame("testimonial text-center", ""),
                Block::Testimonials(TestimonialList {
                    heading: "Client Reflections".to_string(),
                    items: vec![item],
                    card: Frame::new("quote-large", HEADING_STYLE),
                }),
            )
        }
        SectionKind::TrustBadges | SectionKind::Guarantees => {
            let items = if kind == SectionKind::Guarantees {
                &content.guarantees
            } else {
                &content.trust_symbols
            };
            if items.is_empty() {
                return None;
            }
            (
                None,
                ctx.section_frame("badges", "border-top: 1px solid var(--lux-gold); border-bottom: 1px solid var(--lux-gold);"),
                Block::Badges {
                    heading: None,
                    items: items.clone(),
                },
            )
        }
        SectionKind::PainPoints => {
            if content.pain_points.is_empty() {
                return None;
            }
            (
                None,
                ctx.section_frame("considerations", ""),
                Block::Feature(Feature {
                    eyebrow: Some("Considerations".to_string()),
                    heading: "What our clients bring to us".to_string(),
                    text: String::new(),
                    points: content.pain_points.clone(),
                    image: None,
                    image_first: false,
                }),
            )
        }
        SectionKind::Faq => {
            if content.faqs.is_empty() {
                return None;
            }
            (
                None,
                ctx.section_frame("faq", "background: var(--lux-surface);"),
                Block::Faq {
                    heading: "Questions".to_string(),
                    items: content.faqs.clone(),
                },
            )
        }
        SectionKind::ContactCta => (
            Some("contact"),
            ctx.section_frame("contact text-center", ""),
            Block::Callout {
                eyebrow: Some("Contact".to_string()),
                heading: "Begin Your Journey".to_string(),
                text: "We invite you to experience the difference that meticulous craftsmanship and dedicated service can make. Every project begins with a conversation.".to_string(),
                button: Some(button(ctx, "Request a Consultation", "#contact", true)),
            },
        ),
        SectionKind::Footer => return Some(footer(ctx)),
    };

    Some(Section {
        kind,
        variant: None,
        id: id.map(str::to_string),
        divider_before: None,
        frame,
        body,
    })
}

fn card_frame(ctx: &Context<'_>) -> Frame {
    let hover = &ctx.resolved.classes.hover;
    match lux(ctx).card_style.as_str() {
        "bordered" => Frame::new(
            format!("card card-lux {hover}"),
            "border: 1px solid color-mix(in srgb, var(--lux-gold) 40%, transparent);",
        ),
        "elevated" => Frame::new(format!("card card-lux shadow-2xl {hover}"), "background: var(--lux-bg);"),
        "glass" => Frame::new(
            format!("card card-lux card-glass {hover}"),
            "background: rgba(255,255,255,0.05); backdrop-filter: blur(12px); border: 1px solid rgba(255,255,255,0.1);",
        ),
        _ => Frame::new(
            format!("card card-lux {hover}"),
            "border-bottom: 1px solid color-mix(in srgb, var(--lux-muted) 30%, transparent);",
        ),
    }
}

fn hero(ctx: &Context<'_>) -> Section {
    let lux = lux(ctx);
    let tagline = Some(lux.tagline.clone()).filter(|t| !t.is_empty());

    let (layout, eyebrow_style, actions, image, backdrop, min_height) = match lux.hero_layout.as_str() {
        "dramatic" => (
            "dramatic",
            "--eyebrow-color: var(--lux-gold);",
            vec![button(ctx, "Begin Your Journey", "#contact", true)],
            ctx.image(&lux.hero_image, &lux.brand_name, "hero-backdrop"),
            true,
            "100vh",
        ),
        "split" => (
            "split",
            "--eyebrow-color: var(--lux-accent);",
            vec![button(ctx, "Schedule Consultation", "#contact", true)],
            ctx.image(&lux.hero_image, &lux.brand_name, "hero-image").map(|mut image| {
                image.frame.style = "clip-path: polygon(10% 0, 100% 0, 100% 100%, 0 100%);".to_string();
                image
            }),
            false,
            "90vh",
        ),
        "centered" => (
            "centered",
            "--eyebrow-color: var(--lux-gold); --eyebrow-rule: 1px solid var(--lux-gold);",
            vec![button(ctx, "Explore Our Work", "#services", true)],
            ctx.image(&lux.hero_image, &lux.brand_name, "hero-wide").map(|mut image| {
                image.frame.style = "aspect-ratio: 21 / 9;".to_string();
                image
            }),
            false,
            "auto",
        ),
        _ => (
            "editorial",
            "--eyebrow-color: var(--lux-gold);",
            Vec::new(),
            ctx.image(&lux.hero_image, &lux.brand_name, "hero-backdrop"),
            true,
            ctx.pick("85vh", "100vh", "100vh"),
        ),
    };

    Section {
        kind: SectionKind::Hero,
        variant: Some(layout.to_string()),
        id: Some("top".to_string()),
        divider_before: None,
        frame: ctx.section_frame(
            &format!("hero hero-{layout}"),
            format!("min-height: {min_height}; {eyebrow_style}"),
        ),
        body: Block::Hero(HeroBlock {
            eyebrow: tagline,
            badge: None,
            headline: ctx.headline.clone(),
            subheadline: ctx.subheadline.clone(),
            actions,
            image,
            backdrop,
            decoration: backdrop.then(|| {
                Frame::new(
                    "hero-overlay",
                    "background: linear-gradient(to top, var(--lux-bg), transparent 60%);",
                )
            }),
        }),
    }
}

fn footer(ctx: &Context<'_>) -> Section {
    let lux = lux(ctx);
    Section {
        kind: SectionKind::Footer,
        variant: None,
        id: None,
        divider_before: None,
        frame: ctx.section_frame(
            "footer",
            "border-top: 1px solid color-mix(in srgb, var(--lux-gold) 20%, transparent);",
        ),
        body: Block::Footer(FooterBlock {
            brand: lux.brand_name.clone(),
            text: None,
            contact: ctx.content().contact.clone(),
            columns: Vec::new(),
            legal: ctx.legal(&lux.brand_name, false),
        }),
    }
}
