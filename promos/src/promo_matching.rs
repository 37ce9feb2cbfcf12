use std::sync::Arc;

use tracing::instrument;

use crate::override_cache::OverrideCache;
use crate::product_catalog::{ProductCatalog, SubscriptionProduct};
use crate::product_info::{ConsumerFlow, SubscriptionProductInfo};
use crate::promo_definitions::{PromoFlag, PromoType};
use crate::providers::{AccountProvider, ConsumerFlowProvider, FeatureFlagProvider};

/// Resolution result: the active promo plus its descriptor for the current
/// consumer flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromoMatch {
    pub promo_type: PromoType,
    pub product_info: SubscriptionProductInfo,
}

/// Stateless resolver for the active promo. Every collaborator comes in by
/// injection so resolution is deterministic under test; there is no global
/// "current promo" anywhere.
#[derive(Clone)]
pub struct PromoMatcher {
    accounts: Arc<dyn AccountProvider>,
    flags: Arc<dyn FeatureFlagProvider>,
    consumer_flow: Arc<dyn ConsumerFlowProvider>,
    overrides: OverrideCache,
    honor_overrides: bool,
}

impl PromoMatcher {
    /// `honor_overrides` is the debug/internal build gate, see
    /// [`crate::config::Config::overrides_enabled`].
    pub fn new(
        accounts: Arc<dyn AccountProvider>,
        flags: Arc<dyn FeatureFlagProvider>,
        consumer_flow: Arc<dyn ConsumerFlowProvider>,
        overrides: OverrideCache,
        honor_overrides: bool,
    ) -> PromoMatcher {
        PromoMatcher {
            accounts,
            flags,
            consumer_flow,
            overrides,
            honor_overrides,
        }
    }

    /// The single active promo type for now. Ordered, first match wins:
    /// signed-out and unlimited accounts get no promo, then the forced
    /// override (debug/internal builds only), then the flags in fixed
    /// priority order. Absence of data degrades to `None`; nothing here
    /// fails.
    #[instrument(skip_all)]
    pub fn resolve(&self) -> PromoType {
        let account_id = match self.accounts.current_account_id() {
            Some(account_id) => account_id,
            None => return PromoType::None,
        };
        if self.accounts.is_unlimited_subscriber() {
            return PromoType::None;
        }

        // Forced promo from dev settings. The store is only consulted when
        // overrides are honored; release builds never read the key.
        if self.honor_overrides {
            if let Some(raw_value) = self.overrides.get(&account_id) {
                match PromoType::from_raw_value(&raw_value) {
                    Some(promo_type) => return promo_type,
                    None => {
                        tracing::warn!(raw_value = %raw_value, "ignoring unknown promo override")
                    }
                }
            }
        }

        if self.flags.is_active(PromoFlag::Bts2022Annual5999Promo) {
            PromoType::Bts2022Annual5999
        } else if self.flags.is_active(PromoFlag::Annual6399Promo) {
            PromoType::Annual6399
        } else if self.flags.is_active(PromoFlag::OneDollarPromo) {
            PromoType::OneDollar
        } else {
            PromoType::None
        }
    }

    pub fn consumer_flow(&self) -> ConsumerFlow {
        if self.consumer_flow.should_use_e2c_product() {
            ConsumerFlow::E2C
        } else {
            ConsumerFlow::D2C
        }
    }

    /// Resolution plus the descriptor for the current flow.
    pub fn get_match(&self) -> PromoMatch {
        let promo_type = self.resolve();
        let product_info = SubscriptionProductInfo::for_promo(promo_type, self.consumer_flow());

        PromoMatch {
            promo_type,
            product_info,
        }
    }

    /// Store products for the active promo, or the flow's defaults when no
    /// promo is active. Absent unless both tiers are in the catalog.
    pub fn current_products(&self, catalog: &dyn ProductCatalog) -> Option<SubscriptionProduct> {
        SubscriptionProduct::resolve(&self.get_match().product_info, catalog)
    }
}
