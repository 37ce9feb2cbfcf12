use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::product_info::{ConsumerFlow, SubscriptionProductInfo};
use crate::promo_definitions::PromoType;

/// A store product as materialized by the external store layer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StoreProduct {
    pub product_id: String,
    pub localized_price: String,
}

/// Read side of the product catalog snapshot the store layer keeps warm.
pub trait ProductCatalog: Send + Sync {
    fn lookup(&self, reference_name: &str) -> Option<StoreProduct>;
}

/// In-memory snapshot keyed by reference name.
#[derive(Debug, Clone, Default)]
pub struct SnapshotProductCatalog {
    products: HashMap<String, StoreProduct>,
}

impl SnapshotProductCatalog {
    pub fn new(products: HashMap<String, StoreProduct>) -> SnapshotProductCatalog {
        SnapshotProductCatalog { products }
    }

    pub fn insert(&mut self, reference_name: &str, product: StoreProduct) {
        self.products.insert(reference_name.to_string(), product);
    }
}

impl ProductCatalog for SnapshotProductCatalog {
    fn lookup(&self, reference_name: &str) -> Option<StoreProduct> {
        self.products.get(reference_name).cloned()
    }
}

/// Both tiers of an offer, resolved against the catalog. Does not exist
/// until both lookups succeed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SubscriptionProduct {
    pub yearly: StoreProduct,
    pub monthly: StoreProduct,
}

impl SubscriptionProduct {
    /// Fail-closed: an offer with a missing tier cannot be presented, so a
    /// partial resolution yields `None`. No retries; the catalog is a
    /// snapshot.
    pub fn resolve(
        info: &SubscriptionProductInfo,
        catalog: &dyn ProductCatalog,
    ) -> Option<SubscriptionProduct> {
        let yearly = catalog.lookup(&info.reference_name.yearly)?;
        let monthly = catalog.lookup(&info.reference_name.monthly)?;

        Some(SubscriptionProduct { yearly, monthly })
    }

    /// The no-promo products for the given flow.
    pub fn default_product(
        flow: ConsumerFlow,
        catalog: &dyn ProductCatalog,
    ) -> Option<SubscriptionProduct> {
        SubscriptionProduct::resolve(
            &SubscriptionProductInfo::for_promo(PromoType::None, flow),
            catalog,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::catalog_with_reference_names;

    #[test]
    fn test_resolve_requires_both_tiers() {
        let info = SubscriptionProductInfo::for_promo(PromoType::Bts2022Annual5999, ConsumerFlow::D2C);

        let monthly_only = catalog_with_reference_names(&["monthly_recurring_999_d2c"]);
        assert_eq!(SubscriptionProduct::resolve(&info, &monthly_only), None);

        let yearly_only = catalog_with_reference_names(&["yearly_intro_5999_recurring_7999_d2c"]);
        assert_eq!(SubscriptionProduct::resolve(&info, &yearly_only), None);

        let both = catalog_with_reference_names(&[
            "yearly_intro_5999_recurring_7999_d2c",
            "monthly_recurring_999_d2c",
        ]);
        let product = SubscriptionProduct::resolve(&info, &both).unwrap();
        assert_eq!(
            product.yearly.product_id,
            "com.getepic.yearly_intro_5999_recurring_7999_d2c"
        );
        assert_eq!(product.monthly.product_id, "com.getepic.monthly_recurring_999_d2c");
    }

    #[test]
    fn test_default_product_resolves_the_flow_specific_descriptor() {
        let catalog = catalog_with_reference_names(&[
            "yearly_e2c_recurring_7999",
            "monthly_e2c_recurring_999",
        ]);

        let e2c = SubscriptionProduct::default_product(ConsumerFlow::E2C, &catalog).unwrap();
        assert_eq!(e2c.yearly.product_id, "com.getepic.yearly_e2c_recurring_7999");

        // The D2C defaults are not in this snapshot, so the D2C lookup
        // fails closed.
        assert_eq!(SubscriptionProduct::default_product(ConsumerFlow::D2C, &catalog), None);
    }
}
