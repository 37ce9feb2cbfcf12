use serde::{Deserialize, Serialize};

// TRICKY: Raw values ride along as params on data analytics events, so they
// are the durable external contract. Never change a raw value once it has
// shipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub enum PromoType {
    #[default]
    #[serde(rename = "none")]
    None,
    #[serde(rename = "one_dollar")]
    OneDollar,
    // nrmp2022 -> national reading month promo 2022
    #[serde(rename = "nrmp2022")]
    Annual6399,
    #[serde(rename = "bts2022")]
    Bts2022Annual5999,
}

/// Canonical declaration order. [`PromoType::index`] and
/// [`PromoType::from_index`] are positions in this table.
pub const PROMO_TYPES: [PromoType; 4] = [
    PromoType::None,
    PromoType::OneDollar,
    PromoType::Annual6399,
    PromoType::Bts2022Annual5999,
];

impl PromoType {
    pub fn raw_value(&self) -> &'static str {
        match self {
            PromoType::None => "none",
            PromoType::OneDollar => "one_dollar",
            PromoType::Annual6399 => "nrmp2022",
            PromoType::Bts2022Annual5999 => "bts2022",
        }
    }

    pub fn from_raw_value(raw_value: &str) -> Option<PromoType> {
        PROMO_TYPES
            .iter()
            .copied()
            .find(|promo_type| promo_type.raw_value() == raw_value)
    }

    /// Position in [`PROMO_TYPES`]. Derived only: inserting or reordering a
    /// case shifts every later index, so a stored index goes stale silently.
    /// Persist [`PromoType::raw_value`] instead.
    pub fn index(&self) -> usize {
        PROMO_TYPES
            .iter()
            .position(|promo_type| promo_type == self)
            .expect("promo type missing from PROMO_TYPES")
    }

    /// Legacy lookup for overrides that were stored by index. Prefer
    /// [`PromoType::from_raw_value`] for anything persisted.
    pub fn from_index(index: usize) -> Option<PromoType> {
        PROMO_TYPES.get(index).copied()
    }

    /// `false` only for `None`: there is no offer to present.
    pub fn is_valid(&self) -> bool {
        !matches!(self, PromoType::None)
    }
}

impl std::fmt::Display for PromoType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.raw_value())
    }
}

/// The three promo feature flags, in resolution priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromoFlag {
    Bts2022Annual5999Promo,
    Annual6399Promo,
    OneDollarPromo,
}

impl PromoFlag {
    /// Key handed to the feature flag backend.
    pub fn key(&self) -> &'static str {
        match self {
            PromoFlag::Bts2022Annual5999Promo => "bts2022-annual-5999-promo",
            PromoFlag::Annual6399Promo => "annual-6399-promo",
            PromoFlag::OneDollarPromo => "one-dollar-promo",
        }
    }
}
