//! Marketplace profiles
//!
//! Static, process-wide listing constraints for each supported sales
//! channel: title length limit, description template, keyword guidance.
//! Profiles are configuration, never mutated at runtime.

use clap::ValueEnum;

/// Supported marketplaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MarketplaceKey {
    Amazon,
    Flipkart,
    Meesho,
    Myntra,
}

/// Listing constraints for one sales channel
#[derive(Debug)]
pub struct MarketplaceProfile {
    /// Display name
    pub name: &'static str,
    /// Hard title length limit in characters
    pub title_max_length: usize,
    /// Description template with {description}, {category}, {price} slots
    pub description_template: &'static str,
    /// Semicolon-separated tokens merged into every row's keywords
    pub keyword_hint: &'static str,
}

static AMAZON: MarketplaceProfile = MarketplaceProfile {
    name: "Amazon",
    title_max_length: 200,
    description_template: "{description} Crafted for {category} shoppers. Premium pick at just ₹{price}.",
    keyword_hint: "bestseller;premium;fast delivery",
};

static FLIPKART: MarketplaceProfile = MarketplaceProfile {
    name: "Flipkart",
    title_max_length: 100,
    description_template: "{description} A {category} favourite, now at ₹{price} only.",
    keyword_hint: "value pick;trending;big savings",
};

static MEESHO: MarketplaceProfile = MarketplaceProfile {
    name: "Meesho",
    title_max_length: 120,
    description_template: "{description} Everyday {category} essential priced at ₹{price}.",
    keyword_hint: "budget friendly;daily use;reseller favourite",
};

static MYNTRA: MarketplaceProfile = MarketplaceProfile {
    name: "Myntra",
    title_max_length: 60,
    description_template: "{description} Fresh off the {category} edit, yours for ₹{price}.",
    keyword_hint: "fashion forward;new arrival;style edit",
};

impl MarketplaceKey {
    /// All marketplaces, in display order
    pub const ALL: [MarketplaceKey; 4] = [
        MarketplaceKey::Amazon,
        MarketplaceKey::Flipkart,
        MarketplaceKey::Meesho,
        MarketplaceKey::Myntra,
    ];

    /// Lowercase key used in exports and filenames
    pub fn key(&self) -> &'static str {
        match self {
            MarketplaceKey::Amazon => "amazon",
            MarketplaceKey::Flipkart => "flipkart",
            MarketplaceKey::Meesho => "meesho",
            MarketplaceKey::Myntra => "myntra",
        }
    }

    /// The static profile for this marketplace
    pub fn profile(&self) -> &'static MarketplaceProfile {
        match self {
            MarketplaceKey::Amazon => &AMAZON,
            MarketplaceKey::Flipkart => &FLIPKART,
            MarketplaceKey::Meesho => &MEESHO,
            MarketplaceKey::Myntra => &MYNTRA,
        }
    }
}
