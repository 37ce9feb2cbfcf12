use std::sync::Arc;

use tracing::instrument;

use crate::store::{Client, StoreError};

/// Fixed namespace for per-account forced promo types. Key layout is
/// internal; the durable value is the promo raw value, never an index.
pub const PROMO_OVERRIDE_CACHE_PREFIX: &str = "promos:1:account_promo_override_";

/// Debug/testing aid: remembers a forced promo raw value per account so
/// dev settings can pin a promo without flipping flags.
#[derive(Clone)]
pub struct OverrideCache {
    client: Arc<dyn Client + Send + Sync>,
}

impl OverrideCache {
    pub fn new(client: Arc<dyn Client + Send + Sync>) -> OverrideCache {
        OverrideCache { client }
    }

    /// Forces a promo raw value for the account. A missing account id makes
    /// this a no-op; an existing value is overwritten. No expiry.
    #[instrument(skip_all)]
    pub fn set(&self, account_id: &str, raw_value: &str) {
        if account_id.is_empty() {
            return;
        }

        if let Err(e) = self
            .client
            .set(override_key(account_id), raw_value.to_string())
        {
            tracing::error!("failed to write promo override: {}", e);
        }
    }

    /// Forced raw value for the account, if any. A missing account id, a
    /// missing key, an empty stored value, and a store failure all read as
    /// no override.
    #[instrument(skip_all)]
    pub fn get(&self, account_id: &str) -> Option<String> {
        if account_id.is_empty() {
            return None;
        }

        match self.client.get(override_key(account_id)) {
            Ok(raw_value) if raw_value.is_empty() => None,
            Ok(raw_value) => Some(raw_value),
            Err(StoreError::NotFound) => None,
            Err(e) => {
                tracing::error!("failed to read promo override: {}", e);
                None
            }
        }
    }
}

fn override_key(account_id: &str) -> String {
    format!("{PROMO_OVERRIDE_CACHE_PREFIX}{account_id}")
}
