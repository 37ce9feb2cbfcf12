use std::sync::Arc;

use anyhow::Result;
use assert_json_diff::assert_json_include;
use serde_json::json;

use promos::override_cache::OverrideCache;
use promos::product_info::{ConsumerFlow, SubscriptionProductInfo};
use promos::promo_definitions::{PromoFlag, PromoType};
use promos::promo_matching::PromoMatcher;
use promos::test_utils::{
    catalog_with_reference_names, random_string, setup_memory_store, StubAccountProvider,
    StubConsumerFlowProvider, StubFlagProvider,
};

#[test]
fn it_resolves_the_bts_offer_end_to_end() -> Result<()> {
    let matcher = PromoMatcher::new(
        Arc::new(StubAccountProvider::signed_in("u1")),
        Arc::new(StubFlagProvider::with_active(&[
            PromoFlag::Bts2022Annual5999Promo,
        ])),
        Arc::new(StubConsumerFlowProvider { e2c: false }),
        OverrideCache::new(setup_memory_store()),
        false,
    );

    let promo_match = matcher.get_match();
    assert_eq!(promo_match.promo_type, PromoType::Bts2022Annual5999);
    assert_eq!(
        promo_match.product_info.reference_name.yearly,
        "yearly_intro_5999_recurring_7999_d2c"
    );

    let catalog = catalog_with_reference_names(&[
        "yearly_intro_5999_recurring_7999_d2c",
        "monthly_recurring_999_d2c",
    ]);
    let products = matcher
        .current_products(&catalog)
        .expect("both tiers are in the catalog");
    assert_eq!(
        products.yearly.product_id,
        "com.getepic.yearly_intro_5999_recurring_7999_d2c"
    );
    assert_eq!(
        products.monthly.product_id,
        "com.getepic.monthly_recurring_999_d2c"
    );

    Ok(())
}

#[test]
fn it_honors_a_forced_promo_set_through_the_cache() -> Result<()> {
    let account_id = random_string("acct_", 12);
    let overrides = OverrideCache::new(setup_memory_store());
    overrides.set(&account_id, PromoType::Annual6399.raw_value());

    let matcher = PromoMatcher::new(
        Arc::new(StubAccountProvider::signed_in(&account_id)),
        Arc::new(StubFlagProvider::with_active(&[PromoFlag::OneDollarPromo])),
        Arc::new(StubConsumerFlowProvider { e2c: false }),
        overrides,
        true,
    );

    assert_eq!(matcher.resolve(), PromoType::Annual6399);

    Ok(())
}

#[test]
fn it_falls_back_to_default_products_when_no_promo_is_active() -> Result<()> {
    let matcher = PromoMatcher::new(
        Arc::new(StubAccountProvider::signed_in("u1")),
        Arc::new(StubFlagProvider::default()),
        Arc::new(StubConsumerFlowProvider { e2c: false }),
        OverrideCache::new(setup_memory_store()),
        false,
    );

    assert_eq!(matcher.resolve(), PromoType::None);

    let catalog = catalog_with_reference_names(&["yearlySubD2C7999", "monthlySubD2C999"]);
    let products = matcher
        .current_products(&catalog)
        .expect("the default tiers are in the catalog");
    assert_eq!(products.yearly.product_id, "com.getepic.yearlySubD2C7999");

    Ok(())
}

#[test]
fn it_withholds_the_offer_when_the_catalog_is_incomplete() -> Result<()> {
    let matcher = PromoMatcher::new(
        Arc::new(StubAccountProvider::signed_in("u1")),
        Arc::new(StubFlagProvider::with_active(&[
            PromoFlag::Bts2022Annual5999Promo,
        ])),
        Arc::new(StubConsumerFlowProvider { e2c: false }),
        OverrideCache::new(setup_memory_store()),
        false,
    );

    // Monthly tier only: the pair must be absent, never half-filled.
    let catalog = catalog_with_reference_names(&["monthly_recurring_999_d2c"]);
    assert_eq!(matcher.current_products(&catalog), None);

    Ok(())
}

#[test]
fn it_serializes_descriptors_with_camel_case_params() -> Result<()> {
    let info = SubscriptionProductInfo::for_promo(PromoType::OneDollar, ConsumerFlow::D2C);
    let json_data = serde_json::to_value(&info)?;

    assert_json_include!(
        actual: json_data,
        expected: json!({
            "referenceName": {
                "yearly": "epic_1month_for_1_recurring_1y_for_7999_d2c",
                "monthly": "epic_1month_for_1_recurring_999_d2c",
            },
            "productId": {
                "yearly": "com.getepic.epic_1month_for_1_recurring_1y_for_7999_d2c",
                "monthly": "com.getepic.epic_1month_for_1_recurring_999_d2c",
            },
        })
    );

    Ok(())
}
