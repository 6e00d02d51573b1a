//! # Product Model
//!
//! Catalog entries as delivered by the remote API, plus the display rules
//! for prices and categories.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Unit appended to rendered prices
pub const CURRENCY_UNIT: &str = "synapses";

/// Label shown instead of a price for priceless products
pub const PRICELESS_LABEL: &str = "Priceless";

/// A catalog entry. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub category: String,
    /// `None` (or zero) marks a priceless product
    #[serde(default, deserialize_with = "deserialize_price")]
    pub price: Option<u64>,
}

/// Prices are whole amounts. Integral floats such as `750.0` are accepted;
/// fractional or negative values are rejected.
fn deserialize_price<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(number) = Option::<serde_json::Number>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if let Some(amount) = number.as_u64() {
        return Ok(Some(amount));
    }
    match number.as_f64() {
        Some(amount) if amount >= 0.0 && amount.fract() == 0.0 && amount <= u64::MAX as f64 => {
            Ok(Some(amount as u64))
        }
        _ => Err(D::Error::custom(format!(
            "price must be a whole non-negative amount, got {number}"
        ))),
    }
}

impl Product {
    /// A product without a price, or priced at zero
    pub fn is_priceless(&self) -> bool {
        matches!(self.price, None | Some(0))
    }

    /// Price as it contributes to totals
    pub fn price_or_zero(&self) -> u64 {
        self.price.unwrap_or(0)
    }

    pub fn category_kind(&self) -> CategoryKind {
        CategoryKind::from_label(&self.category)
    }
}

/// Visual category of a product card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryKind {
    Soft,
    Hard,
    Other,
    Additional,
    Button,
    Unknown,
}

impl CategoryKind {
    /// Map the label the API sends to a category
    pub fn from_label(label: &str) -> Self {
        match label {
            "софт-скил" => Self::Soft,
            "хард-скил" => Self::Hard,
            "другое" => Self::Other,
            "дополнительное" => Self::Additional,
            "кнопка" => Self::Button,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Soft => "soft",
            Self::Hard => "hard",
            Self::Other => "other",
            Self::Additional => "additional",
            Self::Button => "button",
            Self::Unknown => "unknown",
        }
    }
}

/// Group digits in threes separated by spaces: `1450000` -> `1 450 000`
pub fn format_amount(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    grouped
}

/// Render a product price, using the priceless label for `None` and zero
pub fn format_price(price: Option<u64>) -> String {
    match price {
        Some(amount) if amount > 0 => format!("{} {}", format_amount(amount), CURRENCY_UNIT),
        _ => PRICELESS_LABEL.to_string(),
    }
}
