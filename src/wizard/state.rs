// ABOUTME: Wizard state for the resource-creation flow
// Holds user inputs and sticky skip flags; mutated only through StateChange

use serde::Serialize;
use serde_json::Value;

use super::slug::IdDerivation;
use crate::catalog::{Catalog, ResourceType};

/// Everything the user has entered so far in one creation session
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardState {
    /// Target project
    pub project_id: Option<String>,
    /// Selected resource type
    pub resource_type: Option<ResourceType>,
    /// User-facing name
    pub resource_name: String,
    /// Slug identifier, derived from the name unless edited by hand
    pub resource_id: String,
    /// Selected pricing tier
    pub sku: String,
    /// Type-specific configuration, never inspected by the wizard
    pub settings: Option<Value>,
    /// User dismissed the settings step for this session
    pub skip_settings: bool,
    /// User dismissed the access step for this session
    pub skip_access: bool,
    #[serde(skip)]
    id_derivation: IdDerivation,
}

/// A single user-driven edit of the wizard state
#[derive(Debug, Clone, PartialEq)]
pub enum StateChange {
    SelectProject(String),
    SelectResourceType(ResourceType),
    SetName(String),
    SetResourceId(String),
    SelectSku(String),
    CaptureSettings(Value),
    ClearSettings,
}

impl StateChange {
    pub fn describe(&self) -> &'static str {
        match self {
            Self::SelectProject(_) => "select_project",
            Self::SelectResourceType(_) => "select_resource_type",
            Self::SetName(_) => "set_name",
            Self::SetResourceId(_) => "set_resource_id",
            Self::SelectSku(_) => "select_sku",
            Self::CaptureSettings(_) => "capture_settings",
            Self::ClearSettings => "clear_settings",
        }
    }
}

impl WizardState {
    pub fn new(default_sku: &str) -> Self {
        Self {
            project_id: None,
            resource_type: None,
            resource_name: String::new(),
            resource_id: String::new(),
            sku: default_sku.to_string(),
            settings: None,
            skip_settings: false,
            skip_access: false,
            id_derivation: IdDerivation::default(),
        }
    }

    /// Whether the resource id was typed by hand
    pub fn id_manually_edited(&self) -> bool {
        self.id_derivation.is_manually_edited()
    }

    /// Apply one edit
    ///
    /// Changing the resource type drops captured settings. When the new type
    /// does not offer the current tier the sku falls back to `default_sku`,
    /// or to the type's first tier if that is not offered either.
    pub fn apply(&mut self, change: StateChange, catalog: &Catalog, default_sku: &str) {
        match change {
            StateChange::SelectProject(project_id) => {
                self.project_id = Some(project_id);
            }
            StateChange::SelectResourceType(resource_type) => {
                if self.resource_type == Some(resource_type) {
                    return;
                }
                self.resource_type = Some(resource_type);
                self.settings = None;
                self.ensure_sku_offered(catalog, default_sku);
            }
            StateChange::SetName(name) => {
                if let Some(id) = self.id_derivation.on_name_changed(&name) {
                    self.resource_id = id;
                }
                self.resource_name = name;
            }
            StateChange::SetResourceId(id) => {
                self.id_derivation.on_id_edited(&id, &self.resource_name);
                self.resource_id = id;
            }
            StateChange::SelectSku(sku) => {
                self.sku = sku;
            }
            StateChange::CaptureSettings(settings) => {
                self.settings = Some(settings);
            }
            StateChange::ClearSettings => {
                self.settings = None;
            }
        }
    }

    /// Make the sku one the selected type offers
    ///
    /// Falls back to `default_sku`, or to the type's first tier if that is not
    /// offered either. Types missing from the catalog keep their sku.
    pub fn ensure_sku_offered(&mut self, catalog: &Catalog, default_sku: &str) {
        let Some(definition) = self.resource_type.and_then(|id| catalog.get(id)) else {
            return;
        };
        if definition.offers_sku(&self.sku) {
            return;
        }
        self.sku = if definition.offers_sku(default_sku) {
            default_sku.to_string()
        } else {
            definition
                .skus
                .first()
                .map_or_else(|| default_sku.to_string(), |option| option.sku.clone())
        };
    }

    /// Name, id and tier are all filled in
    pub fn has_identity(&self) -> bool {
        !self.resource_name.trim().is_empty()
            && !self.resource_id.is_empty()
            && !self.sku.is_empty()
    }
}
