//! Property and site configuration.
//!
//! Handles loading, validating, and merging `property.toml`. The entire site
//! is driven by one explicitly constructed, immutable [`PropertyConfig`]
//! value: the composition root loads it once and threads it down — nothing
//! reads ambient/static state.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown by `villa-press gen-config`
//!
//! [property]
//! headline = "East Hampton Retreat Close to Everything"
//! bedrooms = 6
//!
//! [[slides]]
//! id = "pool"                # doubles as the URL fragment anchor
//! title = "Welcome to Your Summer Home"
//! description = "A place to relax and unwind"
//!
//! [[rent_periods]]
//! id = "july"
//! label = "July"
//! amount = 85_000
//!
//! [form]
//! endpoint = "/.netlify/functions/send-interest-email"
//! encoding = "json"          # or "form"
//! phone = true               # deployment capability flags for optional fields
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse — override just the values you want. Unknown keys
//! are rejected to catch typos early. Array-valued sections (`slides`,
//! `rent_periods`, `amenities`) replace the defaults wholesale when present.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Complete site configuration loaded from `property.toml`.
///
/// All fields have defaults describing the stock demo property. User config
/// files need only specify the values they want to override.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PropertyConfig {
    /// The property's facts and copy.
    pub property: PropertyFacts,
    /// Contact email, stored in two parts so the address never appears whole.
    pub contact: ContactConfig,
    /// Carousel slides; insertion order is display and autoplay order.
    pub slides: Vec<Slide>,
    /// Rental periods offered, in display order.
    pub rent_periods: Vec<RentPeriod>,
    /// Id of the period preselected in the bottom bar.
    pub default_period_id: String,
    /// Lead form capability flags and transport settings.
    pub form: FormConfig,
    /// Autoplay and scroll-hint timing.
    pub timing: TimingConfig,
    /// Site color scheme.
    pub colors: ColorScheme,
    /// Privacy-policy page body, markdown.
    pub privacy: String,
}

impl Default for PropertyConfig {
    fn default() -> Self {
        Self {
            property: PropertyFacts::default(),
            contact: ContactConfig::default(),
            slides: Slide::stock(),
            rent_periods: RentPeriod::stock(),
            default_period_id: "august".to_string(),
            form: FormConfig::default(),
            timing: TimingConfig::default(),
            colors: ColorScheme::default(),
            privacy: stock_privacy_md().to_string(),
        }
    }
}

impl PropertyConfig {
    /// Validate config values and cross-references.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.slides.is_empty() {
            return Err(ConfigError::Validation("slides must not be empty".into()));
        }
        let mut seen = std::collections::HashSet::new();
        for slide in &self.slides {
            if !is_fragment_safe(&slide.id) {
                return Err(ConfigError::Validation(format!(
                    "slide id '{}' is not URL-fragment-safe (use ASCII letters, digits, dashes)",
                    slide.id
                )));
            }
            if !seen.insert(slide.id.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate slide id '{}'",
                    slide.id
                )));
            }
        }
        let mut period_ids = std::collections::HashSet::new();
        for period in &self.rent_periods {
            if !period_ids.insert(period.id.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate rent period id '{}'",
                    period.id
                )));
            }
        }
        if self.period(&self.default_period_id).is_none() {
            return Err(ConfigError::Validation(format!(
                "default_period_id '{}' does not name a rent period",
                self.default_period_id
            )));
        }
        if self.timing.autoplay_interval_ms < 1000 {
            return Err(ConfigError::Validation(
                "timing.autoplay_interval_ms must be at least 1000".into(),
            ));
        }
        if self.form.endpoint.is_empty() {
            return Err(ConfigError::Validation("form.endpoint must not be empty".into()));
        }
        Ok(())
    }

    /// Look up a rent period by id.
    pub fn period(&self, id: &str) -> Option<&RentPeriod> {
        self.rent_periods.iter().find(|p| p.id == id)
    }

    /// Position of a slide id in display order.
    pub fn slide_index(&self, id: &str) -> Option<usize> {
        self.slides.iter().position(|s| s.id == id)
    }
}

/// Allowed fragment characters: ASCII alphanumerics and dashes.
fn is_fragment_safe(id: &str) -> bool {
    !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// The property's facts and copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PropertyFacts {
    pub address: String,
    pub headline: String,
    pub bedrooms: u32,
    /// May be fractional (half baths).
    pub bathrooms: f64,
    pub square_feet: u32,
    pub acreage: f64,
    pub minutes_to_town: u32,
    /// "About this property" paragraphs.
    pub about: Vec<String>,
    pub amenities: Vec<String>,
}

impl Default for PropertyFacts {
    fn default() -> Self {
        Self {
            address: "Fieldview Lane, East Hampton Village Fringe".to_string(),
            headline: "East Hampton Retreat Close to Everything".to_string(),
            bedrooms: 6,
            bathrooms: 4.5,
            square_feet: 4000,
            acreage: 1.0,
            minutes_to_town: 3,
            about: vec![
                "Welcome to this stunning contemporary home that seamlessly blends \
                 modern luxury with comfortable living. Designed for those who \
                 appreciate refined aesthetics and premium quality, this residence \
                 offers an unparalleled lifestyle experience."
                    .to_string(),
                "Every detail has been carefully curated to provide the ultimate in \
                 comfort and sophistication. From the gourmet kitchen perfect for \
                 entertaining to the serene primary suite, this home is a true \
                 sanctuary minutes from the village."
                    .to_string(),
            ],
            amenities: vec![
                "Gourmet Kitchen with Premium Appliances".to_string(),
                "Smart Home Technology".to_string(),
                "Private Backyard with Patio".to_string(),
                "Two-Car Garage".to_string(),
                "Hardwood Floors Throughout".to_string(),
                "Central Air Conditioning".to_string(),
                "In-Unit Washer & Dryer".to_string(),
                "Walk-in Closets".to_string(),
            ],
        }
    }
}

/// Contact email split into parts so the address never appears whole in
/// configuration or markup scraped from the repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactConfig {
    pub email_user: String,
    pub email_domain: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            email_user: "hello".to_string(),
            email_domain: "outeasthomes.com".to_string(),
        }
    }
}

impl ContactConfig {
    /// Assemble the full address at the single point of use.
    pub fn email(&self) -> String {
        format!("{}@{}", self.email_user, self.email_domain)
    }
}

/// One carousel slide. `id` doubles as the URL fragment anchor and as the
/// base name of the optimized image variants (`{id}-small.avif`, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Slide {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Image alt text; defaults to the title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
}

impl Slide {
    pub fn alt(&self) -> &str {
        self.alt_text.as_deref().unwrap_or(&self.title)
    }

    fn stock() -> Vec<Slide> {
        let slide = |id: &str, title: &str, description: &str| Slide {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            alt_text: None,
        };
        vec![
            slide("pool", "Welcome to Your Summer Home", "A place to relax and unwind"),
            slide(
                "living-room",
                "Spacious Living Room",
                "Double high ceiling fills the room with light",
            ),
            slide(
                "kitchen",
                "Gourmet Kitchen",
                "Premium appliances, marble countertops, and room for many cooks",
            ),
            slide(
                "backyard",
                "Private, Expansive Backyard",
                "Landscaping that changes by the month",
            ),
            slide(
                "bedroom",
                "Primary Suite",
                "Walk-in closet, shower & tub bathroom, direct access to outdoor lounge area",
            ),
            slide(
                "exterior",
                "Finca Hamptones",
                "A welcoming home 3 minutes from East Hampton Village",
            ),
        ]
    }
}

/// A rental period on offer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RentPeriod {
    pub id: String,
    pub label: String,
    pub description: String,
    /// Whole dollars.
    pub amount: u64,
}

impl RentPeriod {
    fn stock() -> Vec<RentPeriod> {
        let period = |id: &str, label: &str, description: &str, amount: u64| RentPeriod {
            id: id.to_string(),
            label: label.to_string(),
            description: description.to_string(),
            amount,
        };
        vec![
            period("july", "July", "Full month of July", 85_000),
            period("august", "August", "Full month of August", 95_000),
            period("md_to_ld", "Memorial Day-Labor Day", "Seasonal stay", 220_000),
        ]
    }
}

/// How the submission body is encoded on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyEncoding {
    Json,
    Form,
}

/// Lead form settings.
///
/// The optional fields are deployment capability flags: one canonical schema
/// validates every deployment, the flags only select which fields render and
/// submit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormConfig {
    /// Relative submission endpoint.
    pub endpoint: String,
    pub encoding: BodyEncoding,
    /// Enable the optional phone field.
    pub phone: bool,
    /// Enable the optional free-text message field.
    pub message: bool,
    /// Enable the rental-period selector.
    pub period: bool,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            endpoint: "/.netlify/functions/send-interest-email".to_string(),
            encoding: BodyEncoding::Json,
            phone: true,
            message: true,
            period: true,
        }
    }
}

/// Autoplay and scroll-hint timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimingConfig {
    /// Autoplay advance interval. Deployments run 3000-4000.
    pub autoplay_interval_ms: u64,
    /// Dwell before the scroll hint appears.
    pub scroll_hint_dwell_ms: u64,
    /// Scroll distance that permanently suppresses the hint.
    pub scroll_suppress_px: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            autoplay_interval_ms: 3000,
            scroll_hint_dwell_ms: 15_000,
            scroll_suppress_px: 64,
        }
    }
}

/// Site color scheme, emitted as CSS custom properties.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    pub text: String,
    pub text_muted: String,
    pub border: String,
    pub accent: String,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            background: "#faf8f5".to_string(),
            text: "#1d2733".to_string(),
            text_muted: "#5b6672".to_string(),
            border: "#e3ded6".to_string(),
            accent: "#b5803c".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(PropertyConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely — including
///   arrays, so a user `slides` list replaces the stock slides wholesale.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file doesn't exist.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<PropertyConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: PropertyConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the property config from the given TOML file path.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result. A missing file yields the stock demo config.
pub fn load_config(path: &Path) -> Result<PropertyConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(path)?;
    resolve_config(base, overlay)
}

/// Stock privacy-policy body, markdown.
fn stock_privacy_md() -> &'static str {
    r#"We respect your privacy. We only collect your name, email, and phone
number via our website to facilitate a direct conversation regarding the
rental of our property.

## Data Use

We do not sell your data. We only use it to contact you regarding your
inquiry.

## Data Storage

Your information is stored securely and is only accessible by the property
management.

## Opt-Out

You may request the deletion of your information at any time by replying to
our correspondence.
"#
}

/// Returns a fully-commented stock `property.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> String {
    let defaults = PropertyConfig::default();
    let body = toml::to_string_pretty(&defaults).expect("default config must serialize");
    format!(
        "# villa-press configuration\n\
         # ========================\n\
         # All settings are optional. Remove any you don't need — the values\n\
         # below are the stock defaults. Unknown keys cause an error.\n\
         #\n\
         # Slide ids double as URL fragment anchors and as the base names of the\n\
         # optimized images (an id of \"pool\" expects pool-small.avif etc. in the\n\
         # optimized directory). Array sections (slides, rent_periods, amenities)\n\
         # replace the defaults wholesale when present.\n\n{}",
        body
    )
}

/// Generate CSS custom properties from the color scheme.
pub fn generate_color_css(colors: &ColorScheme) -> String {
    format!(
        r#":root {{
    --color-bg: {bg};
    --color-text: {text};
    --color-text-muted: {text_muted};
    --color-border: {border};
    --color-accent: {accent};
}}"#,
        bg = colors.background,
        text = colors.text,
        text_muted = colors.text_muted,
        border = colors.border,
        accent = colors.accent,
    )
}
