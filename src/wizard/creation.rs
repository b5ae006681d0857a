// ABOUTME: Contract with the resource-creation collaborator
// The wizard assembles the payload; the collaborator performs the I/O

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::CreationError;
use crate::catalog::ResourceType;

/// Payload sent to the creation endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateResourceRequest {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    pub sku: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<Value>,
}

/// What the collaborator reports back after a successful creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedResource {
    pub id: String,
    pub project_id: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// Performs the actual creation call (REST, queue, ...)
///
/// Retries and deduplication of concurrent calls belong to the implementor.
#[async_trait]
pub trait ResourceCreator: Send + Sync {
    async fn create_resource(
        &self,
        project_id: &str,
        request: &CreateResourceRequest,
    ) -> Result<CreatedResource, CreationError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_serializes_in_api_shape() {
        let request = CreateResourceRequest {
            id: "plant-a".to_string(),
            name: "Plant A".to_string(),
            resource_type: ResourceType::Graph,
            sku: "free".to_string(),
            settings: None,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"id": "plant-a", "name": "Plant A", "type": "Konnektr.Graph", "sku": "free"})
        );
    }

    #[test]
    fn test_request_includes_settings_when_present() {
        let request = CreateResourceRequest {
            id: "f".to_string(),
            name: "F".to_string(),
            resource_type: ResourceType::Flow,
            sku: "standard".to_string(),
            settings: Some(json!({"schedule": "hourly"})),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["settings"]["schedule"], "hourly");
    }
}
