//! Integration tests for the theme renderers.

use tradeforge::models::ContentRecord;
use tradeforge::registry::StyleRegistry;
use tradeforge::render::{render, RenderInput, Theme, Viewport};
use tradeforge::theme::SectionKind;

mod fixtures;
use fixtures::blueprint_with_sections;

const VIEWPORTS: [Viewport; 3] = [Viewport::Mobile, Viewport::Tablet, Viewport::Desktop];

fn input<'a>(
    registry: &'a StyleRegistry,
    content: &'a ContentRecord,
    slug: &str,
) -> RenderInput<'a> {
    RenderInput {
        trade_name: "Roofer",
        style: registry.resolve(slug),
        content,
        blueprint: None,
        identity: None,
        viewport: Viewport::Desktop,
    }
}

#[test]
fn test_every_style_renders_in_every_theme() {
    let registry = StyleRegistry::load_defaults().unwrap();

    for slug in registry.slugs() {
        let content = ContentRecord::synthesize(slug, slug);
        for theme in Theme::ALL {
            for viewport in VIEWPORTS {
                let page = render(
                    theme,
                    RenderInput {
                        viewport,
                        ..input(&registry, &content, slug)
                    },
                );
                assert_eq!(page.theme, theme);
                assert_eq!(page.slug, slug);
                assert_eq!(page.section_kinds().first(), Some(&SectionKind::Hero));
                assert_eq!(page.section_kinds().last(), Some(&SectionKind::Footer));
                assert!(page.to_html().starts_with("<!DOCTYPE html>"));
            }
        }
    }
}

#[test]
fn test_explicit_section_order_is_preserved() {
    let registry = StyleRegistry::load_defaults().unwrap();
    let content = ContentRecord::synthesize("roofer", "Roofer");
    let blueprint = blueprint_with_sections(&["hero", "faq", "services", "testimonials"]);

    for theme in Theme::ALL {
        let page = render(
            theme,
            RenderInput {
                blueprint: Some(&blueprint),
                ..input(&registry, &content, "roofer")
            },
        );
        assert_eq!(
            page.section_kinds(),
            [
                SectionKind::Hero,
                SectionKind::Faq,
                SectionKind::Services,
                SectionKind::Testimonials,
                SectionKind::Footer
            ],
            "{theme}"
        );
    }
}

#[test]
fn test_duplicates_and_footer_render_once() {
    let registry = StyleRegistry::load_defaults().unwrap();
    let content = ContentRecord::synthesize("roofer", "Roofer");
    let blueprint =
        blueprint_with_sections(&["footer", "hero", "services", "hero", "hologram", "services"]);

    let page = render(
        Theme::Bold,
        RenderInput {
            blueprint: Some(&blueprint),
            ..input(&registry, &content, "roofer")
        },
    );

    assert_eq!(
        page.section_kinds(),
        [SectionKind::Hero, SectionKind::Services, SectionKind::Footer]
    );
}

#[test]
fn test_blueprint_cta_overrides_content() {
    let registry = StyleRegistry::load_defaults().unwrap();
    let content = ContentRecord::synthesize("roofer", "Roofer");
    let blueprint = blueprint_with_sections(&["hero"]);

    let html = render(
        Theme::Clean,
        RenderInput {
            blueprint: Some(&blueprint),
            ..input(&registry, &content, "roofer")
        },
    )
    .to_html();

    assert!(html.contains("Call Today"));
}

#[test]
fn test_viewport_changes_layout_not_content() {
    let registry = StyleRegistry::load_defaults().unwrap();
    let content = ContentRecord::synthesize("painter", "Painter");

    let mobile = render(
        Theme::Luxury,
        RenderInput {
            viewport: Viewport::Mobile,
            ..input(&registry, &content, "painter")
        },
    );
    let desktop = render(Theme::Luxury, input(&registry, &content, "painter"));

    assert_eq!(mobile.title, desktop.title);
    assert_eq!(mobile.section_kinds(), desktop.section_kinds());
    assert_ne!(mobile.root, desktop.root);
}

#[test]
fn test_content_is_escaped() {
    let registry = StyleRegistry::load_defaults().unwrap();
    let mut content = ContentRecord::synthesize("roofer", "Roofer");
    content.hero.headline = "<script>alert('x')</script>".to_string();

    let html = render(Theme::Clean, input(&registry, &content, "roofer")).to_html();

    assert!(!html.contains("<script>alert"));
    assert!(html.contains("&lt;script&gt;"));
}
