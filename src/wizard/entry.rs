// ABOUTME: Entry-URL preselection for the creation wizard
// Parses resourceType, sku/tier and projectId query parameters

use tracing::warn;
use url::form_urlencoded;

use crate::catalog::ResourceType;

/// Preselections carried by the entry URL
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryParams {
    pub resource_type: Option<ResourceType>,
    pub sku: Option<String>,
    pub project_id: Option<String>,
}

impl EntryParams {
    /// Parse a query string, a `?`-prefixed query or a full URL
    ///
    /// Unknown resource types and empty values are dropped. `sku` takes
    /// precedence over its alias `tier`.
    pub fn from_query(raw: &str) -> Self {
        let query = match raw.split_once('?') {
            Some((_, query)) => query,
            None => raw,
        };
        let query = query.split('#').next().unwrap_or_default();

        let mut params = Self::default();
        let mut tier = None;

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            match key.as_ref() {
                "resourceType" => match value.parse::<ResourceType>() {
                    Ok(resource_type) => params.resource_type = Some(resource_type),
                    Err(e) => warn!("Ignoring entry parameter resourceType: {}", e),
                },
                "sku" => params.sku = Some(value.to_string()),
                "tier" => tier = Some(value.to_string()),
                "projectId" => params.project_id = Some(value.to_string()),
                _ => {}
            }
        }

        if params.sku.is_none() {
            params.sku = tier;
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_query() {
        let params = EntryParams::from_query("resourceType=Konnektr.Graph&sku=standard&projectId=p-1");
        assert_eq!(params.resource_type, Some(ResourceType::Graph));
        assert_eq!(params.sku.as_deref(), Some("standard"));
        assert_eq!(params.project_id.as_deref(), Some("p-1"));
    }

    #[test]
    fn test_parse_full_url_with_fragment() {
        let params = EntryParams::from_query(
            "https://app.konnektr.io/resources/new?resourceType=Konnektr.Flow&tier=free#top",
        );
        assert_eq!(params.resource_type, Some(ResourceType::Flow));
        assert_eq!(params.sku.as_deref(), Some("free"));
        assert!(params.project_id.is_none());
    }

    #[test]
    fn test_sku_wins_over_tier() {
        let params = EntryParams::from_query("?tier=free&sku=premium");
        assert_eq!(params.sku.as_deref(), Some("premium"));
    }

    #[test]
    fn test_unknown_type_and_empty_values_dropped() {
        let params = EntryParams::from_query("resourceType=Konnektr.Nope&projectId=&sku=%20");
        assert_eq!(params, EntryParams::default());
    }

    #[test]
    fn test_percent_decoding() {
        let params = EntryParams::from_query("projectId=team%20alpha");
        assert_eq!(params.project_id.as_deref(), Some("team alpha"));
    }
}
