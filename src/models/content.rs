//! Page content records and their deterministic synthesis.

use serde::{Deserialize, Serialize};

use super::identity::TradeIdentity;

/// Placeholder phone number used by synthesized content.
const DEFAULT_PHONE: &str = "(555) 123-4567";
/// Placeholder street address used by synthesized content.
const DEFAULT_ADDRESS: &str = "123 Main St, Your City, ST";
/// City substituted into `{city}` hero patterns.
const DEFAULT_CITY: &str = "Your City";

/// All textual content of a trade's landing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecord {
    /// Hero block
    pub hero: HeroContent,
    /// About block
    pub about: AboutContent,
    /// Offered services
    pub services: Vec<ServiceItem>,
    /// Customer testimonials
    pub testimonials: Vec<Testimonial>,
    /// Frequently asked questions
    pub faqs: Vec<Faq>,
    /// Contact details
    pub contact: ContactInfo,
    /// Search metadata
    pub seo: SeoInfo,
    /// Trust symbols shown as badges
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trust_symbols: Vec<String>,
    /// Guarantees
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub guarantees: Vec<String>,
    /// Customer pain points
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pain_points: Vec<String>,
}

/// Hero block content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroContent {
    /// Main headline
    pub headline: String,
    /// Sub-headline
    pub subheadline: String,
    /// Primary CTA text
    pub cta_primary: String,
    /// Secondary CTA text
    pub cta_secondary: String,
}

/// About block content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AboutContent {
    /// Short company summary
    pub summary: String,
    /// Mission statement
    pub mission: String,
    /// Reasons to choose this business
    pub why_choose_us: Vec<String>,
}

/// A single service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceItem {
    /// Service name
    pub name: String,
    /// Service description
    pub description: String,
    /// Optional icon key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// A customer testimonial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    /// Author name
    pub author: String,
    /// Author role or location
    pub role: String,
    /// Testimonial text
    pub content: String,
    /// Rating (1-5)
    pub rating: u8,
}

/// A question/answer pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faq {
    /// Question
    #[serde(rename = "q", alias = "question")]
    pub question: String,
    /// Answer
    #[serde(rename = "a", alias = "answer")]
    pub answer: String,
}

/// Contact details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    /// Phone number
    pub phone: String,
    /// Email address
    pub email: String,
    /// Street address
    pub address: String,
}

/// Search engine metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoInfo {
    /// Page title
    pub title: String,
    /// Meta description
    pub description: String,
    /// Meta keywords
    pub keywords: Vec<String>,
}

impl ContentRecord {
    /// Synthesizes the default content for a trade.
    ///
    /// Output depends only on `slug` and `name`, so repeated calls produce
    /// identical records.
    ///
    /// # Examples
    ///
    /// ```
    /// use tradeforge::models::ContentRecord;
    ///
    /// let content = ContentRecord::synthesize("roofer", "Roofer");
    /// assert_eq!(content.hero.headline, "Professional Roofer Services");
    /// assert_eq!(content.contact.email, "contact@rooferpros.com");
    /// ```
    #[must_use]
    pub fn synthesize(slug: &str, name: &str) -> Self {
        Self {
            hero: HeroContent {
                headline: format!("Professional {name} Services"),
                subheadline:
                    "Reliable, efficient, and affordable solutions for your home and business."
                        .to_string(),
                cta_primary: "Get a Quote".to_string(),
                cta_secondary: "Our Services".to_string(),
            },
            about: AboutContent {
                summary: format!("We are a dedicated team of expert {name}s with years of experience."),
                mission: "To provide top-quality service with integrity and transparency."
                    .to_string(),
                why_choose_us: vec![
                    "Licensed & Insured".to_string(),
                    "24/7 Emergency Service".to_string(),
                    "Satisfaction Guaranteed".to_string(),
                ],
            },
            services: vec![
                service("Emergency Repairs", "Available 24/7 for urgent issues.", "alert-circle"),
                service("Installation", "Professional installation of all equipment.", "wrench"),
                service(
                    "Maintenance",
                    "Regular check-ups to keep things running smoothly.",
                    "clipboard-check",
                ),
            ],
            testimonials: vec![
                Testimonial {
                    author: "John Doe".to_string(),
                    role: "Homeowner".to_string(),
                    content: "Excellent service! They arrived on time and fixed the issue quickly."
                        .to_string(),
                    rating: 5,
                },
                Testimonial {
                    author: "Jane Smith".to_string(),
                    role: "Business Owner".to_string(),
                    content: "Very professional team. Highly recommended.".to_string(),
                    rating: 5,
                },
            ],
            faqs: vec![
                Faq {
                    question: "Do you offer free estimates?".to_string(),
                    answer: "Yes, we provide free, no-obligation estimates for all jobs."
                        .to_string(),
                },
                Faq {
                    question: "Are you licensed and insured?".to_string(),
                    answer: "Absolutely. We are fully licensed and carry comprehensive liability insurance."
                        .to_string(),
                },
            ],
            contact: default_contact(slug),
            seo: SeoInfo {
                title: format!("Best {name} in Town - Professional Services"),
                description: format!(
                    "Top-rated {name} providing emergency repairs, installation, and maintenance. Call now!"
                ),
                keywords: vec![
                    name.to_string(),
                    "repair".to_string(),
                    "installation".to_string(),
                    "emergency".to_string(),
                ],
            },
            trust_symbols: Vec::new(),
            guarantees: Vec::new(),
            pain_points: Vec::new(),
        }
    }

    /// Builds content from a trade identity profile.
    #[must_use]
    pub fn from_identity(identity: &TradeIdentity) -> Self {
        let trade = identity.trade.as_str();
        let trade_lower = trade.to_lowercase();

        let headline = identity
            .hero_patterns
            .first()
            .map(|pattern| pattern.replace("{city}", DEFAULT_CITY))
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(|| format!("Professional {trade} Services"));

        let why_choose_us = if identity.guarantees.is_empty() {
            vec![
                "Licensed & Insured".to_string(),
                "24/7 Service".to_string(),
                "Satisfaction Guaranteed".to_string(),
            ]
        } else {
            identity.guarantees.clone()
        };

        let lead_service = identity
            .services
            .first()
            .map_or("professional services", |s| s.name.as_str());

        let mut keywords = vec![trade_lower.clone()];
        keywords.extend(identity.pain_points.iter().take(3).cloned());

        Self {
            hero: HeroContent {
                headline,
                subheadline: identity.tagline.clone(),
                cta_primary: identity.cta_options.primary.clone(),
                cta_secondary: identity.cta_options.secondary.clone(),
            },
            about: AboutContent {
                summary: format!(
                    "We are a dedicated team of expert {trade}s serving your local area with {} service.",
                    identity.tone
                ),
                mission: format!(
                    "{} - Your trusted local {trade_lower} for all your needs.",
                    identity.tagline
                ),
                why_choose_us,
            },
            services: identity
                .services
                .iter()
                .map(|s| ServiceItem {
                    name: s.name.clone(),
                    description: s.description.clone(),
                    icon: (!s.icon.is_empty()).then(|| s.icon.clone()),
                })
                .collect(),
            testimonials: identity
                .testimonials
                .iter()
                .map(|t| Testimonial {
                    author: t.author.clone(),
                    role: t.location.clone(),
                    content: t.quote.clone(),
                    rating: t.rating.clamp(1, 5),
                })
                .collect(),
            faqs: identity
                .faqs
                .iter()
                .map(|f| Faq {
                    question: f.question.clone(),
                    answer: f.answer.clone(),
                })
                .collect(),
            contact: default_contact(&identity.slug),
            seo: SeoInfo {
                title: format!("Best {trade} in Town - {}", identity.tagline),
                description: format!("Top-rated {trade_lower} providing {lead_service}. Call now!"),
                keywords,
            },
            trust_symbols: identity.trust_symbols.clone(),
            guarantees: identity.guarantees.clone(),
            pain_points: identity.pain_points.clone(),
        }
    }
}

fn service(name: &str, description: &str, icon: &str) -> ServiceItem {
    ServiceItem {
        name: name.to_string(),
        description: description.to_string(),
        icon: Some(icon.to_string()),
    }
}

fn default_contact(slug: &str) -> ContactInfo {
    ContactInfo {
        phone: DEFAULT_PHONE.to_string(),
        email: format!("contact@{slug}pros.com"),
        address: DEFAULT_ADDRESS.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::identity::{
        CtaOptions, IdentityFaq, IdentityPalette, IdentityService, IdentityTestimonial,
    };

    #[test]
    fn test_synthesize_is_complete() {
        let content = ContentRecord::synthesize("gas-engineer", "Gas Engineer");
        assert!(!content.hero.headline.is_empty());
        assert!(!content.services.is_empty());
        assert!(!content.faqs.is_empty());
        assert_eq!(content.contact.email, "contact@gas-engineerpros.com");
        assert_eq!(content.seo.keywords[0], "Gas Engineer");
    }

    #[test]
    fn test_synthesize_is_deterministic() {
        assert_eq!(
            ContentRecord::synthesize("tiler", "Tiler"),
            ContentRecord::synthesize("tiler", "Tiler")
        );
    }

    #[test]
    fn test_faq_serializes_with_short_keys() {
        let faq = Faq {
            question: "Q?".to_string(),
            answer: "A.".to_string(),
        };
        let json = serde_json::to_value(&faq).unwrap();
        assert_eq!(json["q"], "Q?");
        assert_eq!(json["a"], "A.");

        let parsed: Faq = serde_json::from_str(r#"{"question":"Q?","answer":"A."}"#).unwrap();
        assert_eq!(parsed, faq);
    }

    #[test]
    fn test_from_identity_maps_fields() {
        let identity = TradeIdentity {
            trade: "Roofer".to_string(),
            slug: "roofer".to_string(),
            tone: "calm".to_string(),
            tagline: "Dry Homes Guaranteed".to_string(),
            hero_patterns: vec!["Expert Roofer in {city}".to_string()],
            pain_points: vec![
                "Leaks".to_string(),
                "Storm damage".to_string(),
                "Moss".to_string(),
                "Sagging".to_string(),
            ],
            services: vec![IdentityService {
                name: "Re-roofing".to_string(),
                description: "Full replacement".to_string(),
                icon: "home".to_string(),
            }],
            cta_style: "urgent".to_string(),
            cta_options: CtaOptions::default(),
            image_tags: vec![],
            color_palette: IdentityPalette::default(),
            trust_symbols: vec!["Licensed".to_string()],
            guarantees: vec!["10 Year Warranty".to_string()],
            testimonials: vec![IdentityTestimonial {
                quote: "Great".to_string(),
                author: "Sam".to_string(),
                location: "Leeds".to_string(),
                rating: 9,
            }],
            faqs: vec![IdentityFaq {
                question: "Insured?".to_string(),
                answer: "Yes".to_string(),
            }],
        };

        let content = ContentRecord::from_identity(&identity);
        assert_eq!(content.hero.headline, "Expert Roofer in Your City");
        assert_eq!(content.hero.subheadline, "Dry Homes Guaranteed");
        assert_eq!(content.about.why_choose_us, vec!["10 Year Warranty"]);
        assert_eq!(content.testimonials[0].role, "Leeds");
        assert_eq!(content.testimonials[0].rating, 5);
        assert_eq!(content.seo.keywords, vec!["roofer", "Leaks", "Storm damage", "Moss"]);
        assert_eq!(content.seo.description, "Top-rated roofer providing Re-roofing. Call now!");
        assert_eq!(content.trust_symbols, vec!["Licensed"]);
    }
}
