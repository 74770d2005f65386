//! Bold & Conversion theme.
//!
//! High-contrast layout built around the phone number. Colors and the
//! two-part logo come from `themes.bold` of the style record.

use super::page::{
    Block, Card, CardList, Feature, FooterBlock, FooterColumn, HeroBlock, Link, LogoPart, Nav,
    Page, Quote, Section, TestimonialList, TopBar,
};
use super::{ordinal, testimonial_cards, Context, Frame, ThemeRenderer};
use crate::theme::{section_order, SectionKind};

const DEFAULT_ORDER: [SectionKind; 7] = [
    SectionKind::Hero,
    SectionKind::WhyChooseUs,
    SectionKind::PainPoints,
    SectionKind::Services,
    SectionKind::Testimonials,
    SectionKind::ContactCta,
    SectionKind::Footer,
];

pub struct BoldTheme;

impl ThemeRenderer for BoldTheme {
    fn render(&self, ctx: &Context<'_>) -> Page {
        let sections = section_order(ctx.blueprint_sections(), &DEFAULT_ORDER)
            .into_iter()
            .filter_map(|kind| section(ctx, kind))
            .collect();

        let bold = &ctx.style().themes.bold;
        let (bg, text) = if dark(ctx) {
            (bold.hero_background.to_hex(), "#ffffff")
        } else {
            ("#ffffff".to_string(), "#111827")
        };
        let root = ctx.root_frame(&format!(
            "--bold-accent: {}; --bold-secondary: {}; --bold-hero-bg: {}; background: {bg}; color: {text}; font-family: var(--brand-font);",
            bold.accent.to_hex(),
            bold.secondary.to_hex(),
            bold.hero_background.to_hex(),
        ));
        ctx.page_shell(nav(ctx), sections, root)
    }
}

fn dark(ctx: &Context<'_>) -> bool {
    ctx.style().themes.bold.hero_background.is_dark()
}

fn nav(ctx: &Context<'_>) -> Nav {
    let bold = &ctx.style().themes.bold;
    let contact = &ctx.content().contact;

    let message = if ctx.urgent {
        "24/7 Emergency Service".to_string()
    } else {
        format!("Serving {} Area", contact.address)
    };
    let top_bar = TopBar {
        message,
        phone: Link {
            label: format!("Call Now: {}", contact.phone),
            href: ctx.phone_href(),
        },
        frame: Frame::new("top-bar", "background: var(--bold-secondary); color: #ffffff;"),
    };

    let logo = vec![
        LogoPart {
            text: bold.logo_lead.clone(),
            highlight: bold.highlight_first,
        },
        LogoPart {
            text: bold.logo_highlight.clone(),
            highlight: !bold.highlight_first,
        },
    ];
    let logo_style = if bold.italic_logo {
        "font-style: italic; font-weight: 900; text-transform: uppercase;"
    } else {
        "font-weight: 900; text-transform: uppercase;"
    };

    let header_bg = if dark(ctx) { "var(--bold-hero-bg)" } else { "#ffffff" };
    let cta = (!ctx.viewport().is_mobile()).then(|| {
        ctx.styled_button(
            &ctx.cta_primary,
            &ctx.phone_href(),
            "btn btn-md rounded-none btn-accent",
            "background: var(--bold-accent); color: #ffffff;".to_string(),
        )
    });

    Nav {
        top_bar: Some(top_bar),
        logo,
        logo_frame: Frame::new("logo", logo_style),
        tagline: None,
        links: Vec::new(),
        cta,
        frame: Frame::new(
            "nav nav-bold",
            format!("background: {header_bg}; border-bottom: 4px solid var(--bold-accent);"),
        ),
    }
}

fn section(ctx: &Context<'_>, kind: SectionKind) -> Option<Section> {
    let content = ctx.content();
    let (id, frame, body) = match kind {
        SectionKind::Hero => return Some(hero(ctx)),
        SectionKind::WhyChooseUs | SectionKind::TrustBadges => {
            let source = if kind == SectionKind::TrustBadges && !content.trust_symbols.is_empty() {
                &content.trust_symbols
            } else {
                &content.about.why_choose_us
            };
            if source.is_empty() {
                return None;
            }
            (
                None,
                ctx.section_frame("why-band", "background: var(--bold-secondary); color: #ffffff;"),
                Block::Badges {
                    heading: None,
                    items: source.iter().take(3).cloned().collect(),
                },
            )
        }
        SectionKind::PainPoints => {
            if !ctx.urgent || content.pain_points.is_empty() {
                return None;
            }
            (
                None,
                ctx.section_frame("pain-points", ""),
                Block::Feature(Feature {
                    eyebrow: None,
                    heading: "Having These Problems?".to_string(),
                    text: String::new(),
                    points: content.pain_points.iter().take(6).cloned().collect(),
                    image: None,
                    image_first: false,
                }),
            )
        }
        SectionKind::Services => {
            if content.services.is_empty() {
                return None;
            }
            let items = content
                .services
                .iter()
                .enumerate()
                .map(|(i, service)| Card {
                    label: Some(ordinal(i)),
                    title: service.name.clone(),
                    text: service.description.clone(),
                    icon: service.icon.clone(),
                    frame: Frame::new(
                        format!("card card-bold rounded-none {}", ctx.resolved.classes.hover),
                        "border-left: 4px solid var(--bold-accent);",
                    ),
                })
                .collect();
            (
                Some("services"),
                ctx.section_frame("services", ""),
                Block::Cards(CardList {
                    eyebrow: None,
                    heading: "Our Services".to_string(),
                    intro: None,
                    items,
                }),
            )
        }
        SectionKind::About => (
            Some("about"),
            ctx.section_frame("about", ""),
            Block::Feature(Feature {
                eyebrow: None,
                heading: "About Us".to_string(),
                text: content.about.summary.clone(),
                points: Vec::new(),
                image: ctx.image(&ctx.style().media.team_image, "Our team", ""),
                image_first: true,
            }),
        ),
        SectionKind::Quote => (
            None,
            ctx.section_frame("quote", "background: var(--bold-secondary); color: #ffffff;"),
            Block::Quote(Quote {
                eyebrow: None,
                text: content.about.mission.clone(),
                attribution: None,
                image: None,
            }),
        ),
        SectionKind::Guarantees => {
            if content.guarantees.is_empty() {
                return None;
            }
            (
                None,
                ctx.section_frame("guarantees", "background: var(--bold-accent); color: #ffffff;"),
                Block::Badges {
                    heading: Some("Our Guarantees".to_string()),
                    items: content.guarantees.clone(),
                },
            )
        }
        SectionKind::Testimonials => {
            if content.testimonials.is_empty() {
                return None;
            }
            let mut items = testimonial_cards(&content.testimonials);
            for item in &mut items {
                item.author = format!("\u{2014} {}", item.author);
            }
            (
                Some("reviews"),
                ctx.section_frame("testimonials", "background: var(--brand-surface);"),
                Block::Testimonials(TestimonialList {
                    heading: "Customer Reviews".to_string(),
                    items,
                    card: Frame::new("card card-bold rounded-none", "border-top: 4px solid var(--bold-accent);"),
                }),
            )
        }
        SectionKind::Faq => {
            if content.faqs.is_empty() {
                return None;
            }
            (
                None,
                ctx.section_frame("faq", ""),
                Block::Faq {
                    heading: "Common Questions".to_string(),
                    items: content.faqs.clone(),
                },
            )
        }
        SectionKind::ContactCta => (
            None,
            ctx.section_frame("cta-band", "background: var(--bold-accent); color: #ffffff;"),
            Block::Callout {
                eyebrow: None,
                heading: "Ready to Get Started?".to_string(),
                text: "Call now for fast, reliable service.".to_string(),
                button: Some(ctx.styled_button(
                    &content.contact.phone,
                    &ctx.phone_href(),
                    "btn btn-xl rounded-none",
                    "background: #ffffff; color: var(--bold-accent);".to_string(),
                )),
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

fn hero(ctx: &Context<'_>) -> Section {
    let bold = &ctx.style().themes.bold;

    let label = if ctx.urgent {
        ctx.cta_emergency.clone()
    } else {
        ctx.cta_primary.clone()
    };
    let button = ctx.styled_button(
        &label,
        &ctx.phone_href(),
        "btn btn-xl rounded-none btn-accent",
        "background: var(--bold-accent); color: #ffffff;".to_string(),
    );

    let frame_style = if bold.image_frame == "glow" {
        format!(
            "box-shadow: 0 0 30px {}40; border-radius: {};",
            bold.accent.to_hex(),
            bold.image_radius
        )
    } else {
        format!(
            "box-shadow: 12px 12px 0 var(--bold-secondary); border: 4px solid var(--bold-secondary); border-radius: {};",
            bold.image_radius
        )
    };
    let image = ctx.image(&ctx.style().media.hero_image, &ctx.headline, "hero-image").map(|mut image| {
        image.frame.style = frame_style;
        image
    });

    let decoration = (bold.hero_skew.trim() != "0deg" && !ctx.viewport().is_mobile()).then(|| {
        Frame::new(
            "hero-skew",
            format!(
                "background: var(--bold-secondary); transform: skewX({});",
                bold.hero_skew
            ),
        )
    });

    let text_color = if dark(ctx) { "#ffffff" } else { "#111827" };

    Section {
        kind: SectionKind::Hero,
        variant: Some(if ctx.urgent { "emergency" } else { "standard" }.to_string()),
        id: Some("top".to_string()),
        divider_before: None,
        frame: ctx.section_frame(
            "hero hero-bold",
            format!("background: var(--bold-hero-bg); color: {text_color};"),
        ),
        body: Block::Hero(HeroBlock {
            eyebrow: None,
            badge: ctx.urgent.then(|| "Emergency Response".to_string()),
            headline: ctx.headline.clone(),
            subheadline: ctx.subheadline.clone(),
            actions: vec![button],
            image,
            backdrop: false,
            decoration,
        }),
    }
}

fn footer(ctx: &Context<'_>) -> Section {
    let content = ctx.content();
    let trade = ctx.input.trade_name;

    let trust: Vec<String> = if content.trust_symbols.is_empty() {
        content.about.why_choose_us.iter().take(4).cloned().collect()
    } else {
        content.trust_symbols.iter().take(4).cloned().collect()
    };

    Section {
        kind: SectionKind::Footer,
        variant: None,
        id: Some("contact".to_string()),
        divider_before: None,
        frame: ctx.section_frame("footer", "background: var(--bold-secondary); color: #ffffff;"),
        body: Block::Footer(FooterBlock {
            brand: trade.to_string(),
            text: Some(content.about.mission.clone()),
            contact: content.contact.clone(),
            columns: vec![FooterColumn {
                title: "Trust".to_string(),
                items: trust,
            }],
            legal: ctx.legal(trade, true),
        }),
    }
}
