// ABOUTME: Paid-tier classification for (resource type, sku) pairs

use super::{Catalog, ResourceType, FREE_SKU};

/// Decides whether a resource type at a given sku is billable
pub trait PaidClassifier {
    fn is_paid(&self, resource_type: ResourceType, sku: &str) -> bool;
}

impl<F> PaidClassifier for F
where
    F: Fn(ResourceType, &str) -> bool,
{
    fn is_paid(&self, resource_type: ResourceType, sku: &str) -> bool {
        self(resource_type, sku)
    }
}

/// Paid iff the catalog lists a non-zero monthly price
pub fn is_paid_in_catalog(catalog: &Catalog, resource_type: ResourceType, sku: &str) -> bool {
    match catalog.get(resource_type).and_then(|d| d.sku(sku)) {
        Some(option) => option.monthly_price_cents > 0,
        // Unlisted tiers are billable unless they are the free tier
        None => sku != FREE_SKU,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_prices() {
        let catalog = Catalog::default();
        assert!(!is_paid_in_catalog(&catalog, ResourceType::Graph, "free"));
        assert!(is_paid_in_catalog(&catalog, ResourceType::Graph, "standard"));
        assert!(is_paid_in_catalog(&catalog, ResourceType::Graph, "enterprise"));
        assert!(!is_paid_in_catalog(&catalog, ResourceType::Compass, "free"));
    }

    #[test]
    fn test_closure_classifier() {
        let never = |_: ResourceType, _: &str| false;
        assert!(!never.is_paid(ResourceType::Flow, "standard"));
    }
}
