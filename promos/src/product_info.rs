use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::promo_definitions::PromoType;

/// Which consumer funnel the current session is in. E2C
/// (enterprise/education to consumer) gets its own product identifiers for
/// some promos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsumerFlow {
    D2C,
    E2C,
}

/// Yearly/monthly tier of one identifier kind.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProductPair {
    pub yearly: String,
    pub monthly: String,
}

impl ProductPair {
    fn new(yearly: &str, monthly: &str) -> ProductPair {
        ProductPair {
            yearly: yearly.to_string(),
            monthly: monthly.to_string(),
        }
    }
}

/// Everything the subscription page needs to present one offer: the
/// reference names used to look up store products, the store-facing product
/// ids, and the legal disclosure. Values are constants; legal text arrives
/// here already localized.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionProductInfo {
    pub reference_name: ProductPair,
    pub product_id: ProductPair,
    pub legal_text: String,
}

const DEFAULT_LEGAL_TEXT: &str = "*Compare average monthly cost for Epic to one physical book. Payment will be charged to iTunes account at confirmation of purchase. Subscription automatically renews unless auto-renew is turned off at least 24-hours before the end of the current period. Account will be charged for renewal within 24-hours prior to the end of the current period, and identify the cost of the renewal. Subscriptions may be managed by the user and auto-renewal may be turned off by going to the user\u{2019}s account settings after purchase. Any unused portion of a free trial period, if offered, will be fortified when the user purchases a subscription to that publication where applicable.";

const PROMO_LEGAL_TEXT: &str = "*Compare average monthly cost for Epic to one physical book. Subscription will automatically renew unless you cancel at least 24 hours before the current period ends. You can manage and cancel your subscription on the App Store account settings.  See our Terms of Services and Privacy Policy for more information.";

const BTS2022_ANNUAL_5999_LEGAL_TEXT: &str = "*Compare average monthly cost for Epic to one physical book. Subscription will automatically renew unless you cancel at least 24 hours before the current period ends. You can manage and cancel your subscription on the App Store account settings.  See our Terms of Services and Privacy Policy for more information.";

/// Default offer when no promo is active, D2C funnel.
pub static DEFAULT_D2C_PRODUCT_INFO: Lazy<SubscriptionProductInfo> =
    Lazy::new(|| SubscriptionProductInfo {
        reference_name: ProductPair::new("yearlySubD2C7999", "monthlySubD2C999"),
        product_id: ProductPair::new(
            "com.getepic.yearly_d2c_recurring_7999",
            "com.getepic.monthly_d2c_recurring_999",
        ),
        legal_text: DEFAULT_LEGAL_TEXT.to_string(),
    });

/// Default offer when no promo is active, E2C funnel.
pub static DEFAULT_E2C_PRODUCT_INFO: Lazy<SubscriptionProductInfo> =
    Lazy::new(|| SubscriptionProductInfo {
        reference_name: ProductPair::new("yearly_e2c_recurring_7999", "monthly_e2c_recurring_999"),
        product_id: ProductPair::new(
            "com.getepic.yearly_e2c_recurring_7999",
            "com.getepic.monthly_e2c_recurring_999",
        ),
        legal_text: DEFAULT_LEGAL_TEXT.to_string(),
    });

impl SubscriptionProductInfo {
    /// Descriptor for a promo type under the given consumer flow. Pure and
    /// total; every arm returns a constant. Only `Bts2022Annual5999`
    /// branches on the flow, so callers must not assume uniform behavior
    /// across promo types.
    pub fn for_promo(promo_type: PromoType, flow: ConsumerFlow) -> SubscriptionProductInfo {
        match promo_type {
            PromoType::None => match flow {
                ConsumerFlow::D2C => DEFAULT_D2C_PRODUCT_INFO.clone(),
                ConsumerFlow::E2C => DEFAULT_E2C_PRODUCT_INFO.clone(),
            },
            PromoType::OneDollar => SubscriptionProductInfo {
                reference_name: ProductPair::new(
                    "epic_1month_for_1_recurring_1y_for_7999_d2c",
                    "epic_1month_for_1_recurring_999_d2c",
                ),
                product_id: ProductPair::new(
                    "com.getepic.epic_1month_for_1_recurring_1y_for_7999_d2c",
                    "com.getepic.epic_1month_for_1_recurring_999_d2c",
                ),
                legal_text: PROMO_LEGAL_TEXT.to_string(),
            },
            PromoType::Annual6399 => SubscriptionProductInfo {
                reference_name: ProductPair::new(
                    "yearly_sub_intro_6399_recurring_7999",
                    "monthly_d2c_recurring_999_promo_group",
                ),
                product_id: ProductPair::new(
                    "com.getepic.yearly_sub_intro_6399_recurring_7999",
                    "com.getepic.monthly_d2c_recurring_999_promo_group",
                ),
                legal_text: PROMO_LEGAL_TEXT.to_string(),
            },
            PromoType::Bts2022Annual5999 => match flow {
                ConsumerFlow::E2C => SubscriptionProductInfo {
                    reference_name: ProductPair::new(
                        "yearly_intro_5999_recurring_7999_e2c",
                        "monthly_recurring_999_e2c",
                    ),
                    product_id: ProductPair::new(
                        "com.getepic.yearly_intro_5999_recurring_7999_e2c",
                        "com.getepic.monthly_recurring_999_e2c",
                    ),
                    legal_text: BTS2022_ANNUAL_5999_LEGAL_TEXT.to_string(),
                },
                ConsumerFlow::D2C => SubscriptionProductInfo {
                    reference_name: ProductPair::new(
                        "yearly_intro_5999_recurring_7999_d2c",
                        "monthly_recurring_999_d2c",
                    ),
                    product_id: ProductPair::new(
                        "com.getepic.yearly_intro_5999_recurring_7999_d2c",
                        "com.getepic.monthly_recurring_999_d2c",
                    ),
                    legal_text: BTS2022_ANNUAL_5999_LEGAL_TEXT.to_string(),
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_returns_the_default_for_each_flow() {
        assert_eq!(
            SubscriptionProductInfo::for_promo(PromoType::None, ConsumerFlow::D2C),
            *DEFAULT_D2C_PRODUCT_INFO
        );
        assert_eq!(
            SubscriptionProductInfo::for_promo(PromoType::None, ConsumerFlow::E2C),
            *DEFAULT_E2C_PRODUCT_INFO
        );
    }

    #[test]
    fn test_one_dollar_ignores_the_consumer_flow() {
        let d2c = SubscriptionProductInfo::for_promo(PromoType::OneDollar, ConsumerFlow::D2C);
        let e2c = SubscriptionProductInfo::for_promo(PromoType::OneDollar, ConsumerFlow::E2C);
        assert_eq!(d2c, e2c);
        assert_eq!(
            d2c.reference_name.yearly,
            "epic_1month_for_1_recurring_1y_for_7999_d2c"
        );
    }

    #[test]
    fn test_annual_6399_ignores_the_consumer_flow() {
        let d2c = SubscriptionProductInfo::for_promo(PromoType::Annual6399, ConsumerFlow::D2C);
        let e2c = SubscriptionProductInfo::for_promo(PromoType::Annual6399, ConsumerFlow::E2C);
        assert_eq!(d2c, e2c);
        assert_eq!(d2c.product_id.monthly, "com.getepic.monthly_d2c_recurring_999_promo_group");
    }

    #[test]
    fn test_bts_2022_branches_on_flow_but_shares_legal_text() {
        let d2c = SubscriptionProductInfo::for_promo(PromoType::Bts2022Annual5999, ConsumerFlow::D2C);
        let e2c = SubscriptionProductInfo::for_promo(PromoType::Bts2022Annual5999, ConsumerFlow::E2C);

        assert_ne!(d2c.reference_name, e2c.reference_name);
        assert_eq!(d2c.reference_name.yearly, "yearly_intro_5999_recurring_7999_d2c");
        assert_eq!(e2c.reference_name.yearly, "yearly_intro_5999_recurring_7999_e2c");
        assert_eq!(d2c.legal_text, e2c.legal_text);
    }
}
