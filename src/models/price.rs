use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

use super::{CardQuery, NOT_AVAILABLE};

/// A scraped value, or the explicit marker that it could not be determined.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldValue {
    Present(String),
    #[default]
    NotAvailable,
}

impl FieldValue {
    pub fn as_present(&self) -> Option<&str> {
        match self {
            FieldValue::Present(value) => Some(value),
            FieldValue::NotAvailable => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, FieldValue::Present(_))
    }
}

impl From<Option<String>> for FieldValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(FieldValue::NotAvailable, FieldValue::Present)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Present(value) => write!(f, "{}", value),
            FieldValue::NotAvailable => write!(f, "{}", NOT_AVAILABLE),
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Present(value) => serializer.serialize_str(value),
            FieldValue::NotAvailable => serializer.serialize_str(NOT_AVAILABLE),
        }
    }
}

/// Rows of the price table we keep, in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriceTier {
    Ungraded,
    Grade1,
    Grade2,
    Grade3,
    Grade4,
    Grade5,
    Grade6,
    Grade7,
    Grade8,
    Grade9,
    Grade9Half,
    Sgc10,
    Cgc10,
    Psa10,
    Bgs10,
    Bgs10Black,
    Cgc10Pristine,
}

impl PriceTier {
    pub const COUNT: usize = 17;

    pub const ALL: [PriceTier; PriceTier::COUNT] = [
        PriceTier::Ungraded,
        PriceTier::Grade1,
        PriceTier::Grade2,
        PriceTier::Grade3,
        PriceTier::Grade4,
        PriceTier::Grade5,
        PriceTier::Grade6,
        PriceTier::Grade7,
        PriceTier::Grade8,
        PriceTier::Grade9,
        PriceTier::Grade9Half,
        PriceTier::Sgc10,
        PriceTier::Cgc10,
        PriceTier::Psa10,
        PriceTier::Bgs10,
        PriceTier::Bgs10Black,
        PriceTier::Cgc10Pristine,
    ];

    /// Row label on the price page, also the output key.
    pub fn label(&self) -> &'static str {
        match self {
            PriceTier::Ungraded => "Ungraded",
            PriceTier::Grade1 => "Grade 1",
            PriceTier::Grade2 => "Grade 2",
            PriceTier::Grade3 => "Grade 3",
            PriceTier::Grade4 => "Grade 4",
            PriceTier::Grade5 => "Grade 5",
            PriceTier::Grade6 => "Grade 6",
            PriceTier::Grade7 => "Grade 7",
            PriceTier::Grade8 => "Grade 8",
            PriceTier::Grade9 => "Grade 9",
            PriceTier::Grade9Half => "Grade 9.5",
            PriceTier::Sgc10 => "SGC 10",
            PriceTier::Cgc10 => "CGC 10",
            PriceTier::Psa10 => "PSA 10",
            PriceTier::Bgs10 => "BGS 10",
            PriceTier::Bgs10Black => "BGS 10 Black",
            PriceTier::Cgc10Pristine => "CGC 10 Pristine",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        PriceTier::ALL.into_iter().find(|tier| tier.label() == label)
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

/// Every key a serialized [`PriceRecord`] carries, whatever path produced it.
pub const RECORD_KEYS: [&str; 22] = [
    "card",
    "id",
    "Ungraded",
    "Grade 1",
    "Grade 2",
    "Grade 3",
    "Grade 4",
    "Grade 5",
    "Grade 6",
    "Grade 7",
    "Grade 8",
    "Grade 9",
    "Grade 9.5",
    "SGC 10",
    "CGC 10",
    "PSA 10",
    "BGS 10",
    "BGS 10 Black",
    "CGC 10 Pristine",
    "final_link",
    "card_count",
    "img_link",
];

/// Normalized price data for one card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceRecord {
    pub card: String,
    pub id: String,
    pub card_count: u32,
    prices: [FieldValue; PriceTier::COUNT],
    pub final_link: FieldValue,
    pub img_link: FieldValue,
}

impl PriceRecord {
    /// Identity from the query, everything else not available.
    pub fn unavailable(query: &CardQuery) -> Self {
        Self {
            card: query.card.clone(),
            id: query.id.clone(),
            card_count: query.card_count,
            prices: Default::default(),
            final_link: FieldValue::NotAvailable,
            img_link: FieldValue::NotAvailable,
        }
    }

    pub fn price(&self, tier: PriceTier) -> &FieldValue {
        &self.prices[tier.index()]
    }

    pub fn set_price(&mut self, tier: PriceTier, value: impl Into<String>) {
        self.prices[tier.index()] = FieldValue::Present(value.into());
    }

    pub fn prices(&self) -> impl Iterator<Item = (PriceTier, &FieldValue)> {
        PriceTier::ALL.into_iter().zip(self.prices.iter())
    }

    pub fn has_any_price(&self) -> bool {
        self.prices.iter().any(FieldValue::is_available)
    }
}

impl Serialize for PriceRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(RECORD_KEYS.len()))?;
        map.serialize_entry("card", &self.card)?;
        map.serialize_entry("id", &self.id)?;
        for (tier, value) in self.prices() {
            map.serialize_entry(tier.label(), value)?;
        }
        map.serialize_entry("final_link", &self.final_link)?;
        map.serialize_entry("card_count", &self.card_count)?;
        map.serialize_entry("img_link", &self.img_link)?;
        map.end()
    }
}
