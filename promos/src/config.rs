use envconfig::Envconfig;

#[derive(Envconfig, Clone)]
pub struct Config {
    /// Opts internal/adhoc release builds into the forced promo path.
    #[envconfig(default = "false")]
    pub honor_promo_overrides: bool,
}

impl Config {
    /// Whether forced promo overrides are honored: always in debug builds,
    /// by env opt-in everywhere else. Handed to
    /// [`crate::promo_matching::PromoMatcher::new`] so both gate positions
    /// stay testable.
    pub fn overrides_enabled(&self) -> bool {
        self.honor_promo_overrides || cfg!(debug_assertions)
    }
}
