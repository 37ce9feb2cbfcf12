use crate::promo_definitions::PromoFlag;

/// Account/session state the resolver consults. Backed by the app's
/// session layer in production.
pub trait AccountProvider: Send + Sync {
    fn current_account_id(&self) -> Option<String>;
    fn is_unlimited_subscriber(&self) -> bool;
}

/// Feature flag backend, evaluated per promo flag key.
pub trait FeatureFlagProvider: Send + Sync {
    fn is_active(&self, flag: PromoFlag) -> bool;
}

/// Which consumer funnel the current session is in.
pub trait ConsumerFlowProvider: Send + Sync {
    fn should_use_e2c_product(&self) -> bool;
}
