//! Rendered page structure.

use serde::Serialize;

use super::{Theme, Viewport};
use crate::models::{ContactInfo, Faq};
use crate::theme::resolver::MotionVariant;
use crate::theme::{CssVar, SectionKind};

/// A fully rendered landing page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    /// Document title
    pub title: String,
    /// Meta description
    pub description: String,
    /// Meta keywords
    pub keywords: Vec<String>,
    /// Theme the page was rendered with
    pub theme: Theme,
    /// Viewport the page was rendered for
    pub viewport: Viewport,
    /// Style slug
    pub slug: String,
    /// Brand CSS custom properties
    pub variables: Vec<CssVar>,
    /// Entrance animation
    pub motion: MotionVariant,
    /// Root wrapper
    pub root: Frame,
    /// Navigation chrome
    pub nav: Nav,
    /// Ordered sections
    pub sections: Vec<Section>,
}

impl Page {
    /// Renders the page as a standalone HTML document.
    pub fn to_html(&self) -> String {
        super::html::to_document(self)
    }

    /// Returns the first section of the given kind.
    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    /// Section kinds in render order.
    pub fn section_kinds(&self) -> Vec<SectionKind> {
        self.sections.iter().map(|s| s.kind).collect()
    }
}

/// Class list and inline declarations of an element.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Frame {
    /// Space-separated classes
    pub class: String,
    /// Inline CSS declarations
    pub style: String,
}

impl Frame {
    /// Creates a frame.
    pub fn new(class: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            style: style.into(),
        }
    }
}

/// A hyperlink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    /// Link text
    pub label: String,
    /// Target
    pub href: String,
}

/// A call-to-action button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Button {
    /// Button text
    pub label: String,
    /// Target
    pub href: String,
    /// Styling
    pub frame: Frame,
}

/// An image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Image {
    /// Source URL
    pub src: String,
    /// Alternative text
    pub alt: String,
    /// Styling of the image container
    pub frame: Frame,
}

/// One segment of a multi-part logo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogoPart {
    /// Text
    pub text: String,
    /// Painted in the accent color
    pub highlight: bool,
}

/// Slim announcement bar above the header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopBar {
    /// Announcement
    pub message: String,
    /// Phone link
    pub phone: Link,
    /// Styling
    pub frame: Frame,
}

/// Navigation chrome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Nav {
    /// Optional announcement bar
    pub top_bar: Option<TopBar>,
    /// Logo segments
    pub logo: Vec<LogoPart>,
    /// Logo styling
    pub logo_frame: Frame,
    /// Tagline under the logo
    pub tagline: Option<String>,
    /// In-page links (empty when collapsed)
    pub links: Vec<Link>,
    /// Header button
    pub cta: Option<Button>,
    /// Styling
    pub frame: Frame,
}

/// A page section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    /// Section kind
    pub kind: SectionKind,
    /// Layout variant tag, when the section has variants
    pub variant: Option<String>,
    /// Anchor id
    pub id: Option<String>,
    /// Divider drawn before the section
    pub divider_before: Option<String>,
    /// Styling, including per-viewport classes
    pub frame: Frame,
    /// Payload
    pub body: Block,
}

/// Typed section payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// Hero banner
    Hero(HeroBlock),
    /// Row of short labels
    Badges {
        /// Optional heading
        heading: Option<String>,
        /// Labels
        items: Vec<String>,
    },
    /// Card list (services)
    Cards(CardList),
    /// Text with points and an optional image
    Feature(Feature),
    /// Pull quote
    Quote(Quote),
    /// Testimonials
    Testimonials(TestimonialList),
    /// Questions and answers
    Faq {
        /// Heading
        heading: String,
        /// Pairs
        items: Vec<Faq>,
    },
    /// Closing call to action
    Callout {
        /// Small label above the heading
        eyebrow: Option<String>,
        /// Heading
        heading: String,
        /// Supporting text
        text: String,
        /// Button
        button: Option<Button>,
    },
    /// Page footer
    Footer(FooterBlock),
}

/// Hero payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeroBlock {
    /// Small label above the headline
    pub eyebrow: Option<String>,
    /// Highlighted badge (e.g. emergency response)
    pub badge: Option<String>,
    /// Headline
    pub headline: String,
    /// Sub-headline
    pub subheadline: String,
    /// Action buttons
    pub actions: Vec<Button>,
    /// Hero image
    pub image: Option<Image>,
    /// Image covers the whole section behind the text
    pub backdrop: bool,
    /// Decorative panel
    pub decoration: Option<Frame>,
}

/// Card list payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardList {
    /// Small label above the heading
    pub eyebrow: Option<String>,
    /// Heading
    pub heading: String,
    /// Intro text
    pub intro: Option<String>,
    /// Cards
    pub items: Vec<Card>,
}

/// A card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    /// Ordinal label (e.g. "01")
    pub label: Option<String>,
    /// Title
    pub title: String,
    /// Body text
    pub text: String,
    /// Icon key
    pub icon: Option<String>,
    /// Styling
    pub frame: Frame,
}

/// Feature payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feature {
    /// Small label above the heading
    pub eyebrow: Option<String>,
    /// Heading
    pub heading: String,
    /// Body text
    pub text: String,
    /// Bullet points
    pub points: Vec<String>,
    /// Image
    pub image: Option<Image>,
    /// Image before text
    pub image_first: bool,
}

/// Pull quote payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quote {
    /// Small label above the quote
    pub eyebrow: Option<String>,
    /// Quote text
    pub text: String,
    /// Attribution
    pub attribution: Option<String>,
    /// Background image
    pub image: Option<Image>,
}

/// Testimonials payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestimonialList {
    /// Heading
    pub heading: String,
    /// Quotes
    pub items: Vec<TestimonialCard>,
    /// Card styling
    pub card: Frame,
}

/// One testimonial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestimonialCard {
    /// Quote text
    pub text: String,
    /// Author
    pub author: String,
    /// Author role or location
    pub role: String,
    /// Stars (1-5)
    pub rating: u8,
}

/// Footer payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FooterBlock {
    /// Brand name
    pub brand: String,
    /// Short text under the brand
    pub text: Option<String>,
    /// Contact details
    pub contact: ContactInfo,
    /// Extra link columns
    pub columns: Vec<FooterColumn>,
    /// Copyright line
    pub legal: String,
}

/// A titled footer column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FooterColumn {
    /// Title
    pub title: String,
    /// Entries
    pub items: Vec<String>,
}
