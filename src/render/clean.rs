//! Clean & Trust theme.

use super::page::{
    Block, Card, CardList, Feature, FooterBlock, FooterColumn, HeroBlock, Link, LogoPart, Nav,
    Page, Quote, Section, TestimonialList,
};
use super::{ordinal, testimonial_cards, Context, Frame, ThemeRenderer, Viewport};
use crate::theme::{section_order, HeroLayout, SectionKind, ServiceLayout, TestimonialLayout};

const DEFAULT_ORDER: [SectionKind; 8] = [
    SectionKind::Hero,
    SectionKind::TrustBadges,
    SectionKind::Services,
    SectionKind::WhyChooseUs,
    SectionKind::Testimonials,
    SectionKind::Faq,
    SectionKind::ContactCta,
    SectionKind::Footer,
];

/// Footer background for light pages.
const FOOTER_DARK: &str = "#111827";

/// Longest CTA shown verbatim in the header button.
const NAV_CTA_MAX: usize = 15;

pub struct CleanTheme;

impl ThemeRenderer for CleanTheme {
    fn render(&self, ctx: &Context<'_>) -> Page {
        let sections = section_order(ctx.blueprint_sections(), &DEFAULT_ORDER)
            .into_iter()
            .filter_map(|kind| section(ctx, kind))
            .collect();

        let root = ctx.root_frame(
            "background: var(--brand-bg); color: var(--brand-text); font-family: var(--brand-font);",
        );
        ctx.page_shell(nav(ctx), sections, root)
    }
}

fn nav(ctx: &Context<'_>) -> Nav {
    let style = ctx.style();
    let mobile = ctx.viewport().is_mobile();

    let label = if mobile {
        "Quote".to_string()
    } else if ctx.cta_primary.chars().count() > NAV_CTA_MAX {
        "Get Quote".to_string()
    } else {
        ctx.cta_primary.clone()
    };

    let links = if ctx.viewport() == Viewport::Desktop {
        [("Services", "#services"), ("About", "#about"), ("Reviews", "#reviews"), ("Contact", "#contact")]
            .into_iter()
            .map(|(label, href)| Link {
                label: label.to_string(),
                href: href.to_string(),
            })
            .collect()
    } else {
        Vec::new()
    };

    let frame = match style.components.nav_style.as_str() {
        "transparent-dark" => Frame::new("nav nav-transparent-dark", "background: rgba(0,0,0,0.6); color: #ffffff;"),
        "minimal" => Frame::new("nav nav-minimal", "background: var(--brand-bg);"),
        "floating" => Frame::new(
            "nav nav-floating shadow-lg",
            "background: var(--brand-surface); border-radius: var(--brand-radius);",
        ),
        _ => Frame::new("nav nav-sticky-blur", "background: color-mix(in srgb, var(--brand-bg) 80%, transparent);"),
    };

    Nav {
        top_bar: None,
        logo: vec![LogoPart {
            text: ctx.input.trade_name.to_string(),
            highlight: false,
        }],
        logo_frame: Frame::new("logo", "color: var(--brand-primary); font-weight: var(--brand-heading-weight);"),
        tagline: None,
        links,
        cta: Some(ctx.primary_button(&label, "#contact")),
        frame,
    }
}

fn section(ctx: &Context<'_>, kind: SectionKind) -> Option<Section> {
    let content = ctx.content();
    let (variant, id, frame, body) = match kind {
        SectionKind::Hero => return Some(hero(ctx)),
        SectionKind::TrustBadges => {
            let items: Vec<String> = if content.trust_symbols.is_empty() {
                content.about.why_choose_us.iter().take(4).cloned().collect()
            } else {
                content.trust_symbols.iter().take(4).cloned().collect()
            };
            if items.is_empty() {
                return None;
            }
            (
                None,
                None,
                ctx.section_frame("trust-badges", "background: var(--brand-surface);"),
                Block::Badges {
                    heading: None,
                    items,
                },
            )
        }
        SectionKind::Services => return services(ctx),
        SectionKind::WhyChooseUs | SectionKind::About => (
            None,
            Some("about".to_string()),
            ctx.section_frame("why-choose-us", ""),
            Block::Feature(Feature {
                eyebrow: None,
                heading: if kind == SectionKind::About {
                    "About Us".to_string()
                } else {
                    "Why Choose Us?".to_string()
                },
                text: content.about.summary.clone(),
                points: content.about.why_choose_us.clone(),
                image: ctx.image(&ctx.style().media.team_image, "Our team", ""),
                image_first: false,
            }),
        ),
        SectionKind::Quote => (
            None,
            None,
            ctx.section_frame("quote", "background: var(--brand-surface);"),
            Block::Quote(Quote {
                eyebrow: None,
                text: content.about.mission.clone(),
                attribution: Some(ctx.input.trade_name.to_string()),
                image: None,
            }),
        ),
        SectionKind::Guarantees => {
            if content.guarantees.is_empty() {
                return None;
            }
            (
                None,
                None,
                ctx.section_frame("guarantees", "background: var(--brand-primary); color: #ffffff;"),
                Block::Badges {
                    heading: Some("Our Guarantees".to_string()),
                    items: content.guarantees.clone(),
                },
            )
        }
        SectionKind::PainPoints => {
            if content.pain_points.is_empty() {
                return None;
            }
            (
                None,
                None,
                ctx.section_frame("pain-points", ""),
                Block::Feature(Feature {
                    eyebrow: None,
                    heading: "Problems We Solve".to_string(),
                    text: String::new(),
                    points: content.pain_points.clone(),
                    image: None,
                    image_first: false,
                }),
            )
        }
        SectionKind::Testimonials => return testimonials(ctx),
        SectionKind::Faq => {
            if content.faqs.is_empty() {
                return None;
            }
            (
                None,
                None,
                ctx.section_frame("faq", "background: var(--brand-surface);"),
                Block::Faq {
                    heading: "Frequently Asked Questions".to_string(),
                    items: content.faqs.clone(),
                },
            )
        }
        SectionKind::ContactCta => (
            None,
            None,
            ctx.section_frame("contact-cta", "background: var(--brand-primary); color: #ffffff;"),
            Block::Callout {
                eyebrow: None,
                heading: "Ready to get started?".to_string(),
                text: "Contact us today for a free consultation and estimate.".to_string(),
                button: Some(ctx.secondary_button(&ctx.cta_primary, "#contact")),
            },
        ),
        SectionKind::Footer => return Some(footer(ctx)),
    };

    Some(Section {
        kind,
        variant,
        id,
        divider_before: None,
        frame,
        body,
    })
}

fn hero(ctx: &Context<'_>) -> Section {
    let style = ctx.style();
    let layout = HeroLayout::from_tag(&style.layout.hero_layout);

    let badge_radius = match style.components.badge_style.as_str() {
        "pill" => "9999px".to_string(),
        "angular" => "0".to_string(),
        _ => format!("{}px", style.layout.border_radius),
    };
    let eyebrow_frame = format!("border-radius: {badge_radius};");

    let primary = ctx.primary_button(&ctx.cta_primary, "#contact");
    let image_src = &style.media.hero_image;

    let (actions, image, backdrop, frame, decoration) = match layout {
        HeroLayout::SplitRight => {
            let overlay = (style.imagery.hero_overlay != "none")
                .then(|| Frame::new("hero-overlay", "background: linear-gradient(to top, rgba(0,0,0,0.35), transparent);"));
            (
                vec![primary, ctx.secondary_button(&ctx.cta_secondary, "#services")],
                ctx.image(image_src, &ctx.headline, "hero-image"),
                false,
                ctx.section_frame("hero hero-split-right", ""),
                overlay,
            )
        }
        HeroLayout::FullWidthOverlay => (
            vec![primary, ctx.secondary_button(&ctx.cta_secondary, "#services")],
            ctx.image(image_src, &ctx.headline, "hero-backdrop"),
            true,
            ctx.section_frame("hero hero-full-width-overlay", "color: #ffffff;"),
            Some(Frame::new(
                "hero-overlay",
                "background: linear-gradient(to right, rgba(0,0,0,0.8), rgba(0,0,0,0.4));",
            )),
        ),
        HeroLayout::StackedCentered => (
            vec![
                primary,
                ctx.styled_button(&ctx.cta_secondary, "#services", "btn btn-link", String::new()),
            ],
            ctx.image(image_src, &ctx.headline, "hero-image hero-wide"),
            false,
            ctx.section_frame("hero hero-stacked-centered text-center", ""),
            None,
        ),
        HeroLayout::AsymmetricLeft => (
            vec![
                ctx.styled_button(
                    &ctx.cta_primary,
                    "#contact",
                    &format!("{} btn-gradient", ctx.resolved.classes.button_primary),
                    String::new(),
                ),
                ctx.secondary_button(&ctx.cta_secondary, "#services"),
            ],
            ctx.image(image_src, &ctx.headline, "hero-image hero-portrait"),
            false,
            ctx.section_frame("hero hero-asymmetric-left", ""),
            None,
        ),
    };

    let eyebrow = Some(ctx.tagline.clone()).filter(|t| !t.is_empty());

    Section {
        kind: SectionKind::Hero,
        variant: Some(layout.as_str().to_string()),
        id: Some("top".to_string()),
        divider_before: None,
        frame: Frame::new(frame.class, format!("{} --badge-radius: {badge_radius};", frame.style)),
        body: Block::Hero(HeroBlock {
            eyebrow: eyebrow.map(|t| {
                if layout == HeroLayout::StackedCentered {
                    t.to_uppercase()
                } else {
                    t
                }
            }),
            badge: None,
            headline: ctx.headline.clone(),
            subheadline: ctx.subheadline.clone(),
            actions,
            image,
            backdrop,
            decoration: decoration.or_else(|| Some(Frame::new("hero-badge", eyebrow_frame))),
        }),
    }
}

fn services(ctx: &Context<'_>) -> Option<Section> {
    let content = ctx.content();
    if content.services.is_empty() {
        return None;
    }
    let layout = ServiceLayout::from_tag(&ctx.style().layout.service_layout);

    let (eyebrow, heading, intro) = match layout {
        ServiceLayout::Grid3 | ServiceLayout::Masonry2 => (
            None,
            "Our Services",
            Some("Professional solutions tailored to your needs."),
        ),
        ServiceLayout::ListHorizontal => (None, "WHAT WE DO", None),
        ServiceLayout::Grid2Large => (Some("Services"), "What We Offer", None),
    };

    let items = content
        .services
        .iter()
        .enumerate()
        .map(|(i, service)| {
            let mut frame = ctx.card_frame();
            if layout == ServiceLayout::Masonry2 && i % 3 == 0 && !ctx.viewport().is_mobile() {
                frame.class.push_str(" span-2");
            }
            Card {
                label: (layout == ServiceLayout::ListHorizontal).then(|| ordinal(i)),
                title: service.name.clone(),
                text: service.description.clone(),
                icon: service.icon.clone(),
                frame,
            }
        })
        .collect();

    Some(Section {
        kind: SectionKind::Services,
        variant: Some(layout.as_str().to_string()),
        id: Some("services".to_string()),
        divider_before: None,
        frame: ctx.section_frame(&format!("services services-{}", layout.as_str()), ""),
        body: Block::Cards(CardList {
            eyebrow: eyebrow.map(str::to_string),
            heading: heading.to_string(),
            intro: intro.map(str::to_string),
            items,
        }),
    })
}

fn testimonials(ctx: &Context<'_>) -> Option<Section> {
    let content = ctx.content();
    if content.testimonials.is_empty() {
        return None;
    }
    let layout = TestimonialLayout::from_tag(&ctx.style().layout.testimonial_layout);

    let (heading, take) = match layout {
        TestimonialLayout::Cards => ("What Our Clients Say", usize::MAX),
        TestimonialLayout::Slider => ("CLIENT REVIEWS", usize::MAX),
        TestimonialLayout::QuoteLarge => ("What Our Clients Say", 1),
        TestimonialLayout::Minimal => ("Happy Clients", 2),
    };

    let mut card = ctx.card_frame();
    if layout == TestimonialLayout::Slider {
        card.class.push_str(" card-border text-center");
    }

    Some(Section {
        kind: SectionKind::Testimonials,
        variant: Some(layout.as_str().to_string()),
        id: Some("reviews".to_string()),
        divider_before: None,
        frame: ctx.section_frame(
            &format!("testimonials testimonials-{}", layout.as_str()),
            "background: var(--brand-surface);",
        ),
        body: Block::Testimonials(TestimonialList {
            heading: heading.to_string(),
            items: testimonial_cards(content.testimonials.iter().take(take)),
            card,
        }),
    })
}

fn footer(ctx: &Context<'_>) -> Section {
    let palette = &ctx.style().color_palette;
    let background = if palette.background.is_dark() {
        "var(--brand-surface)".to_string()
    } else {
        FOOTER_DARK.to_string()
    };
    let content = ctx.content();
    let trade = ctx.input.trade_name;

    Section {
        kind: SectionKind::Footer,
        variant: None,
        id: Some("contact".to_string()),
        divider_before: None,
        frame: ctx.section_frame("footer", format!("background: {background}; color: #ffffff;")),
        body: Block::Footer(FooterBlock {
            brand: trade.to_string(),
            text: Some(content.about.mission.clone()),
            contact: content.contact.clone(),
            columns: vec![FooterColumn {
                title: "Legal".to_string(),
                items: vec!["Privacy Policy".to_string(), "Terms of Service".to_string()],
            }],
            legal: ctx.legal(trade, true),
        }),
    }
}
