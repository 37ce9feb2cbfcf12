use std::sync::Arc;

use anyhow::Error;
use rand::{distributions::Alphanumeric, Rng};

use crate::override_cache::PROMO_OVERRIDE_CACHE_PREFIX;
use crate::product_catalog::{SnapshotProductCatalog, StoreProduct};
use crate::promo_definitions::PromoFlag;
use crate::providers::{AccountProvider, ConsumerFlowProvider, FeatureFlagProvider};
use crate::store::{Client, MemoryClient};

pub fn random_string(prefix: &str, length: usize) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(Alphanumeric)
        .take(length)
        .map(char::from)
        .collect();
    format!("{}{}", prefix, suffix)
}

pub fn setup_memory_store() -> Arc<MemoryClient> {
    Arc::new(MemoryClient::new())
}

/// Seeds a forced promo for the account directly in the store, bypassing
/// the cache's write guard.
pub fn insert_override_for_account(
    client: Arc<MemoryClient>,
    account_id: &str,
    raw_value: &str,
) -> Result<(), Error> {
    client.set(
        format!("{}{}", PROMO_OVERRIDE_CACHE_PREFIX, account_id),
        raw_value.to_string(),
    )?;

    Ok(())
}

pub struct StubAccountProvider {
    pub account_id: Option<String>,
    pub unlimited: bool,
}

impl StubAccountProvider {
    pub fn signed_in(account_id: &str) -> StubAccountProvider {
        StubAccountProvider {
            account_id: Some(account_id.to_string()),
            unlimited: false,
        }
    }

    pub fn signed_out() -> StubAccountProvider {
        StubAccountProvider {
            account_id: None,
            unlimited: false,
        }
    }

    pub fn unlimited(account_id: &str) -> StubAccountProvider {
        StubAccountProvider {
            account_id: Some(account_id.to_string()),
            unlimited: true,
        }
    }
}

impl AccountProvider for StubAccountProvider {
    fn current_account_id(&self) -> Option<String> {
        self.account_id.clone()
    }

    fn is_unlimited_subscriber(&self) -> bool {
        self.unlimited
    }
}

#[derive(Default)]
pub struct StubFlagProvider {
    active: Vec<PromoFlag>,
}

impl StubFlagProvider {
    pub fn with_active(active: &[PromoFlag]) -> StubFlagProvider {
        StubFlagProvider {
            active: active.to_vec(),
        }
    }
}

impl FeatureFlagProvider for StubFlagProvider {
    fn is_active(&self, flag: PromoFlag) -> bool {
        self.active.contains(&flag)
    }
}

pub struct StubConsumerFlowProvider {
    pub e2c: bool,
}

impl ConsumerFlowProvider for StubConsumerFlowProvider {
    fn should_use_e2c_product(&self) -> bool {
        self.e2c
    }
}

/// Catalog snapshot holding a synthetic store product per reference name.
pub fn catalog_with_reference_names(reference_names: &[&str]) -> SnapshotProductCatalog {
    let mut catalog = SnapshotProductCatalog::default();
    for reference_name in reference_names {
        catalog.insert(
            reference_name,
            StoreProduct {
                product_id: format!("com.getepic.{}", reference_name),
                localized_price: "$79.99".to_string(),
            },
        );
    }

    catalog
}
