use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Upper bound of the image list. URL order is display order; the first
/// entry is the primary thumbnail.
pub const MAX_PRODUCT_IMAGES: usize = 4;

pub const SIZE_LABELS: [&str; 5] = ["S", "M", "L", "XL", "XXL"];

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub name_en: String,
    pub name_tr: String,
    pub description: String,
    pub description_en: String,
    pub description_tr: String,
    pub price: Decimal,
    pub discount: i32,
    pub category: String,
    pub sub_category: String,
    pub product_type: Option<String>,
    pub sizes: Vec<String>,
    pub image: Vec<String>,
    pub bestseller: bool,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub date: DateTime<Utc>,
}

impl Product {
    /// Price after the discount percentage. Computed at read time, never persisted.
    pub fn effective_price(&self) -> Decimal {
        if self.discount > 0 {
            self.price * (Decimal::ONE - Decimal::from(self.discount) / Decimal::from(100))
        } else {
            self.price
        }
    }
}

/// Wire shape of a product record: the row plus its computed effective price.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductJson {
    #[serde(flatten)]
    pub product: Product,
    pub effective_price: Decimal,
}

impl From<Product> for ProductJson {
    fn from(product: Product) -> Self {
        let effective_price = product.effective_price();
        Self {
            product,
            effective_price,
        }
    }
}

/// Admin payload for both create and update. Everything is optional here;
/// the handlers decide what is required for each operation.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    pub name: Option<String>,
    pub name_en: Option<String>,
    pub name_tr: Option<String>,
    pub description: Option<String>,
    pub description_en: Option<String>,
    pub description_tr: Option<String>,
    pub price: Option<Decimal>,
    pub discount: Option<i32>,
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub product_type: Option<String>,
    pub sizes: Option<Vec<String>>,
    pub image: Option<Vec<String>>,
    pub bestseller: Option<bool>,
}

/// A validated product ready for insertion. Name and description trios are
/// backfilled, category fields are checked against the closed sets, and the
/// image list is within bounds.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub name_en: String,
    pub name_tr: String,
    pub description: String,
    pub description_en: String,
    pub description_tr: String,
    pub price: Decimal,
    pub discount: i32,
    pub category: Category,
    pub sub_category: SubCategory,
    pub product_type: Option<String>,
    pub sizes: Vec<String>,
    pub image: Vec<String>,
    pub bestseller: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Men,
    Women,
    Kids,
}

impl Category {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Men" => Some(Self::Men),
            "Women" => Some(Self::Women),
            "Kids" => Some(Self::Kids),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Men => "Men",
            Self::Women => "Women",
            Self::Kids => "Kids",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubCategory {
    Topwear,
    Bottomwear,
    Winterwear,
}

impl SubCategory {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Topwear" => Some(Self::Topwear),
            "Bottomwear" => Some(Self::Bottomwear),
            "Winterwear" => Some(Self::Winterwear),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Topwear => "Topwear",
            Self::Bottomwear => "Bottomwear",
            Self::Winterwear => "Winterwear",
        }
    }
}

pub fn is_valid_size(label: &str) -> bool {
    SIZE_LABELS.contains(&label)
}
