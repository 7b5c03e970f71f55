//! Static variant lookup. Rules live in a JSON catalog so new cards and sets
//! can be added without touching code.

use regex::{Regex, RegexBuilder};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

use crate::error::CatalogError;
use crate::models::CardVariant;

const BUILTIN_CATALOG: &str = include_str!("catalog.json");

#[derive(Debug, Deserialize)]
struct CatalogFile {
    img_link_template: String,
    final_link_template: String,
    rules: Vec<RuleSpec>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum RuleSpec {
    NameContains {
        #[serde(rename = "type")]
        variant_type: String,
        suffix: String,
        label: String,
        price_modifier: f64,
        names: Vec<String>,
    },
    SetPattern {
        #[serde(rename = "type")]
        variant_type: String,
        suffix: String,
        label: String,
        price_modifier: f64,
        pattern: String,
    },
    Artwork {
        #[serde(rename = "type")]
        variant_type: String,
        cards: Vec<ArtworkCard>,
    },
}

#[derive(Debug, Clone, Deserialize)]
struct VariantSpec {
    suffix: String,
    label: String,
    price_modifier: f64,
}

#[derive(Debug, Deserialize)]
struct ArtworkCard {
    key: String,
    variants: Vec<VariantSpec>,
}

enum Rule {
    /// Card name contains one of `names` (case-insensitive).
    NameContains {
        variant_type: String,
        variant: VariantSpec,
        names: Vec<String>,
    },
    /// Card id matches `pattern`.
    SetPattern {
        variant_type: String,
        variant: VariantSpec,
        pattern: Regex,
    },
    /// First key contained in the card name contributes all its artworks.
    Artwork {
        variant_type: String,
        cards: Vec<ArtworkCard>,
    },
}

pub struct VariantCatalog {
    img_link_template: String,
    final_link_template: String,
    rules: Vec<Rule>,
}

impl VariantCatalog {
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_json(&json)?;
        info!("Loaded variant catalog from {} ({} rules)", path.display(), catalog.rules.len());
        Ok(catalog)
    }

    /// The catalog at `path` if given, else the built-in one.
    pub fn load(path: Option<&str>) -> Result<Self, CatalogError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::builtin(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        let rules = file
            .rules
            .into_iter()
            .map(compile_rule)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            img_link_template: file.img_link_template,
            final_link_template: file.final_link_template,
            rules,
        })
    }

    /// All variants of a card, in rule order.
    pub fn variants_for(&self, card: &str, id: &str) -> Vec<CardVariant> {
        let card_lower = card.to_lowercase();
        let mut variants = Vec::new();

        for rule in &self.rules {
            match rule {
                Rule::NameContains {
                    variant_type,
                    variant,
                    names,
                } => {
                    if names.iter().any(|name| card_lower.contains(&name.to_lowercase())) {
                        variants.push(self.build(variant_type, variant, card, id));
                    }
                }
                Rule::SetPattern {
                    variant_type,
                    variant,
                    pattern,
                } => {
                    if pattern.is_match(id) {
                        variants.push(self.build(variant_type, variant, card, id));
                    }
                }
                Rule::Artwork {
                    variant_type,
                    cards,
                } => {
                    if let Some(entry) = cards.iter().find(|c| card_lower.contains(&c.key.to_lowercase())) {
                        variants.extend(
                            entry
                                .variants
                                .iter()
                                .map(|variant| self.build(variant_type, variant, card, id)),
                        );
                    }
                }
            }
        }

        variants
    }

    fn build(&self, variant_type: &str, variant: &VariantSpec, card: &str, id: &str) -> CardVariant {
        let variant_id = format!("{}_{}", id, variant.suffix);
        CardVariant {
            kind: variant_type.to_string(),
            name: format!("{} ({})", card, variant.label),
            img_link: self.img_link_template.replace("{id}", &variant_id),
            final_link: self.final_link_template.replace("{id}", &variant_id),
            id: variant_id,
            price_modifier: variant.price_modifier,
        }
    }
}

fn compile_rule(spec: RuleSpec) -> Result<Rule, CatalogError> {
    Ok(match spec {
        RuleSpec::NameContains {
            variant_type,
            suffix,
            label,
            price_modifier,
            names,
        } => Rule::NameContains {
            variant_type,
            variant: VariantSpec {
                suffix,
                label,
                price_modifier,
            },
            names,
        },
        RuleSpec::SetPattern {
            variant_type,
            suffix,
            label,
            price_modifier,
            pattern,
        } => {
            let compiled = RegexBuilder::new(&pattern)
                .case_insensitive(true)
                .build()
                .map_err(|source| CatalogError::Pattern { pattern, source })?;
            Rule::SetPattern {
                variant_type,
                variant: VariantSpec {
                    suffix,
                    label,
                    price_modifier,
                },
                pattern: compiled,
            }
        }
        RuleSpec::Artwork {
            variant_type,
            cards,
        } => Rule::Artwork {
            variant_type,
            cards,
        },
    })
}
