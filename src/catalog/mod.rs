// ABOUTME: Resource-type catalog consumed by the creation wizard
// Describes which resource types exist, which SKUs they offer and whether they expose settings

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod pricing;

pub use pricing::{is_paid_in_catalog, PaidClassifier};

/// SKU every resource type falls back to when nothing else was chosen
pub const FREE_SKU: &str = "free";

/// Closed set of resource types the platform can provision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceType {
    #[serde(rename = "Konnektr.Graph")]
    Graph,
    #[serde(rename = "Konnektr.Flow")]
    Flow,
    #[serde(rename = "Konnektr.Assembler")]
    Assembler,
    #[serde(rename = "Konnektr.Compass")]
    Compass,
}

impl ResourceType {
    /// Get all resource types in catalog order
    pub fn all() -> &'static [ResourceType] {
        &[Self::Graph, Self::Flow, Self::Assembler, Self::Compass]
    }

    /// Identifier used by the REST API and entry URLs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Graph => "Konnektr.Graph",
            Self::Flow => "Konnektr.Flow",
            Self::Assembler => "Konnektr.Assembler",
            Self::Compass => "Konnektr.Compass",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        Self::all()
            .iter()
            .copied()
            .find(|candidate| candidate.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| format!("unknown resource type `{trimmed}`"))
    }
}

/// A pricing tier offered by a resource type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkuOption {
    /// Tier identifier (e.g. "free", "standard")
    pub sku: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Monthly price in cents; zero means the tier is free
    #[serde(default)]
    pub monthly_price_cents: u64,
}

impl SkuOption {
    pub fn new(sku: &str, name: &str, monthly_price_cents: u64) -> Self {
        Self {
            sku: sku.to_string(),
            name: name.to_string(),
            monthly_price_cents,
        }
    }
}

/// Catalog entry describing one resource type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceTypeDefinition {
    pub id: ResourceType,

    #[serde(default)]
    pub display_name: String,

    /// Whether the type has a settings form at all
    #[serde(default)]
    pub has_settings: bool,

    /// Whether that settings form is ready for production use
    #[serde(default)]
    pub settings_ready: bool,

    /// Whether settings must be captured before creation
    #[serde(default)]
    pub requires_settings: bool,

    #[serde(default)]
    pub skus: Vec<SkuOption>,
}

impl ResourceTypeDefinition {
    /// The settings step is only offered for types whose settings are usable
    pub fn offers_settings(&self) -> bool {
        self.has_settings && self.settings_ready
    }

    pub fn sku(&self, sku: &str) -> Option<&SkuOption> {
        self.skus.iter().find(|option| option.sku == sku)
    }

    pub fn offers_sku(&self, sku: &str) -> bool {
        self.sku(sku).is_some()
    }
}

/// Read-only list of resource types available for creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub resource_types: Vec<ResourceTypeDefinition>,
}

impl Catalog {
    pub fn new(resource_types: Vec<ResourceTypeDefinition>) -> Self {
        Self { resource_types }
    }

    /// Look up a resource type definition
    pub fn get(&self, id: ResourceType) -> Option<&ResourceTypeDefinition> {
        self.resource_types.iter().find(|definition| definition.id == id)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(vec![
            ResourceTypeDefinition {
                id: ResourceType::Graph,
                display_name: "Graph".to_string(),
                has_settings: true,
                settings_ready: false,
                requires_settings: false,
                skus: vec![
                    SkuOption::new(FREE_SKU, "Free", 0),
                    SkuOption::new("standard", "Standard", 4_900),
                    SkuOption::new("premium", "Premium", 19_900),
                ],
            },
            ResourceTypeDefinition {
                id: ResourceType::Flow,
                display_name: "Flow".to_string(),
                has_settings: true,
                settings_ready: true,
                requires_settings: true,
                skus: vec![
                    SkuOption::new(FREE_SKU, "Free", 0),
                    SkuOption::new("standard", "Standard", 2_900),
                ],
            },
            ResourceTypeDefinition {
                id: ResourceType::Assembler,
                display_name: "Assembler".to_string(),
                has_settings: true,
                settings_ready: true,
                requires_settings: false,
                skus: vec![
                    SkuOption::new(FREE_SKU, "Free", 0),
                    SkuOption::new("standard", "Standard", 3_900),
                ],
            },
            ResourceTypeDefinition {
                id: ResourceType::Compass,
                display_name: "Compass".to_string(),
                has_settings: false,
                settings_ready: false,
                requires_settings: false,
                skus: vec![SkuOption::new("standard", "Standard", 9_900)],
            },
        ])
    }
}
