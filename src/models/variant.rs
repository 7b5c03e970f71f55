use serde::{Deserialize, Serialize};

/// A collectible variant of a printing (shadowless, alternate art...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardVariant {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub id: String,
    pub img_link: String,
    pub final_link: String,
    pub price_modifier: f64,
}
