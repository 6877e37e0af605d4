//! # Product Types
//!
//! Catalog types for the hatrack storefront. Products live in the backing
//! store; the slug is derived from the display name and must stay unique.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ShopError, ShopResult};

/// Supported currencies (ISO 4217)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    INR,
    USD,
    EUR,
    GBP,
}

impl Currency {
    /// Returns the ISO 4217 currency code
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::INR => "INR",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
        }
    }

    /// Convert a decimal amount to the smallest currency unit (paise, cents)
    pub fn to_smallest_unit(&self, amount: f64) -> i64 {
        (amount * 100.0).round() as i64
    }

    /// Convert from smallest unit back to decimal
    pub fn from_smallest_unit(&self, amount: i64) -> f64 {
        amount as f64 / 100.0
    }

    /// Parse an ISO 4217 code
    pub fn parse(s: &str) -> ShopResult<Self> {
        match s {
            "INR" => Ok(Currency::INR),
            "USD" => Ok(Currency::USD),
            "EUR" => Ok(Currency::EUR),
            "GBP" => Ok(Currency::GBP),
            other => Err(ShopError::InvalidRequest(format!(
                "unsupported currency: {}",
                other
            ))),
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::INR
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Price with amount in smallest currency unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in smallest currency unit (paise for INR)
    pub amount: i64,
    /// Currency
    #[serde(default)]
    pub currency: Currency,
}

impl Price {
    /// Create a new price from a decimal amount
    pub fn new(amount: f64, currency: Currency) -> Self {
        Self {
            amount: currency.to_smallest_unit(amount),
            currency,
        }
    }

    /// Create a price from the smallest unit
    pub fn from_minor(amount: i64, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Get the decimal amount
    pub fn as_decimal(&self) -> f64 {
        self.currency.from_smallest_unit(self.amount)
    }

    /// Format for display (e.g., "₹499.00")
    pub fn display(&self) -> String {
        let symbol = match self.currency {
            Currency::INR => "₹",
            Currency::USD => "$",
            Currency::EUR => "€",
            Currency::GBP => "£",
        };
        format!("{}{:.2}", symbol, self.as_decimal())
    }
}

/// Headwear categories (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    BaseballCap,
    Snapback,
    Beanie,
    BucketHat,
    Fedora,
    Visor,
}

impl Category {
    /// All known categories, for listings and validation messages
    pub const ALL: [Category; 6] = [
        Category::BaseballCap,
        Category::Snapback,
        Category::Beanie,
        Category::BucketHat,
        Category::Fedora,
        Category::Visor,
    ];

    /// Returns the kebab-case tag used on the wire and in the store
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::BaseballCap => "baseball-cap",
            Category::Snapback => "snapback",
            Category::Beanie => "beanie",
            Category::BucketHat => "bucket-hat",
            Category::Fedora => "fedora",
            Category::Visor => "visor",
        }
    }

    /// Parse a category tag
    pub fn parse(s: &str) -> ShopResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ShopError::InvalidRequest(format!("unknown category: {}", s)))
    }
}

/// Reference to an image on the external asset host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Public URL served by the asset host
    pub url: String,

    /// Asset-host identifier, kept so the asset can be managed later
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<String>,
}

/// A customer review, embedded in the product record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    /// Reviewer's user id
    pub user_id: Uuid,

    /// Reviewer display name (denormalized)
    pub author: String,

    /// Star rating, 1..=5
    pub rating: u8,

    /// Free-text comment
    pub comment: String,

    /// When the review was left
    pub created_at: DateTime<Utc>,
}

impl Review {
    /// Validate the rating range
    pub fn validate(&self) -> ShopResult<()> {
        if !(1..=5).contains(&self.rating) {
            return Err(ShopError::InvalidRequest(
                "rating must be between 1 and 5".to_string(),
            ));
        }
        Ok(())
    }
}

/// A product in the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique product id
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// URL-safe identifier derived from the name; unique across the catalog
    pub slug: String,

    /// Long description
    pub description: String,

    /// List price
    pub price: Price,

    /// Optional discounted price; when present this is what the customer pays
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_price: Option<Price>,

    /// Category tag
    pub category: Category,

    /// Image references on the asset host
    #[serde(default)]
    pub images: Vec<ImageRef>,

    /// Free-text care instructions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub care_instructions: Option<String>,

    /// Embedded customer reviews
    #[serde(default)]
    pub reviews: Vec<Review>,

    /// Created timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Create a product with a freshly derived slug
    pub fn new(name: impl Into<String>, description: impl Into<String>, price: Price, category: Category) -> Self {
        let name = name.into();
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            slug: slugify(&name),
            name,
            description: description.into(),
            price,
            discount_price: None,
            category,
            images: Vec::new(),
            care_instructions: None,
            reviews: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Rename the product, re-deriving the slug
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.slug = slugify(&self.name);
    }

    /// The price the customer actually pays
    pub fn effective_price(&self) -> Price {
        self.discount_price.unwrap_or(self.price)
    }

    /// Builder: set the discounted price
    pub fn with_discount(mut self, price: Price) -> Self {
        self.discount_price = Some(price);
        self
    }

    /// Builder: attach an image reference
    pub fn with_image(mut self, image: ImageRef) -> Self {
        self.images.push(image);
        self
    }

    /// Builder: set care instructions
    pub fn with_care_instructions(mut self, text: impl Into<String>) -> Self {
        self.care_instructions = Some(text.into());
        self
    }
}

/// Sort orders accepted by the catalog listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductSort {
    /// Most recently created first
    Newest,
    /// Cheapest effective price first
    PriceAsc,
    /// Most expensive effective price first
    PriceDesc,
}

impl Default for ProductSort {
    fn default() -> Self {
        ProductSort::Newest
    }
}

impl ProductSort {
    /// Parse a sort tag from a query parameter
    pub fn parse(s: &str) -> ShopResult<Self> {
        match s {
            "newest" => Ok(ProductSort::Newest),
            "price_asc" => Ok(ProductSort::PriceAsc),
            "price_desc" => Ok(ProductSort::PriceDesc),
            other => Err(ShopError::InvalidRequest(format!(
                "unknown sort: {} (expected newest, price_asc or price_desc)",
                other
            ))),
        }
    }
}

/// Derive a URL-safe slug from a display name.
///
/// Lowercases the input, keeps ASCII alphanumerics, and collapses every
/// other run of characters into a single hyphen. Deterministic: the same
/// name always yields the same slug.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_sep = false;

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_sep && !slug.is_empty() {
                slug.push('-');
            }
            pending_sep = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_sep = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Classic Baseball Cap"), "classic-baseball-cap");
        assert_eq!(slugify("  Wool Beanie -- Navy  "), "wool-beanie-navy");
        assert_eq!(slugify("Fedora (Limited Edition!)"), "fedora-limited-edition");
        assert_eq!(slugify("UPPER case 42"), "upper-case-42");
    }

    #[test]
    fn test_slugify_deterministic() {
        assert_eq!(slugify("Bucket Hat"), slugify("Bucket Hat"));
    }

    #[test]
    fn test_rename_rederives_slug() {
        let mut product = Product::new(
            "Snapback One",
            "A snapback",
            Price::new(499.0, Currency::INR),
            Category::Snapback,
        );
        assert_eq!(product.slug, "snapback-one");

        product.rename("Snapback Two");
        assert_eq!(product.slug, "snapback-two");
    }

    #[test]
    fn test_effective_price() {
        let product = Product::new(
            "Visor",
            "A visor",
            Price::new(299.0, Currency::INR),
            Category::Visor,
        );
        assert_eq!(product.effective_price().amount, 29900);

        let discounted = product.with_discount(Price::new(199.0, Currency::INR));
        assert_eq!(discounted.effective_price().amount, 19900);
    }

    #[test]
    fn test_price_display() {
        let price = Price::new(499.0, Currency::INR);
        assert_eq!(price.display(), "₹499.00");

        let usd = Price::new(29.99, Currency::USD);
        assert_eq!(usd.display(), "$29.99");
    }

    #[test]
    fn test_category_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::parse(category.as_str()).unwrap(), category);
        }
        assert!(Category::parse("sombrero").is_err());
    }

    #[test]
    fn test_review_validation() {
        let review = Review {
            user_id: Uuid::new_v4(),
            author: "A. Customer".to_string(),
            rating: 5,
            comment: "Fits great".to_string(),
            created_at: Utc::now(),
        };
        assert!(review.validate().is_ok());

        let bad = Review { rating: 6, ..review };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_sort_parse() {
        assert_eq!(ProductSort::parse("price_asc").unwrap(), ProductSort::PriceAsc);
        assert!(ProductSort::parse("cheapest").is_err());
    }
}
