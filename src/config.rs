pub const STORE_URL_VAR: &str = "ROSTERD_STORE_URL";
pub const STORE_KEY_VAR: &str = "ROSTERD_STORE_KEY";

/// Connection settings for the hosted store. Read from the environment
/// unless the UI supplies them on `store.connect`.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// REST root of the hosted store, e.g. `https://proj.example.co/rest/v1`.
    pub url: String,
    pub api_key: String,
}

impl StoreConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let url = std::env::var(STORE_URL_VAR)
            .map_err(|_| anyhow::anyhow!("missing {STORE_URL_VAR}"))?;
        let api_key = std::env::var(STORE_KEY_VAR)
            .map_err(|_| anyhow::anyhow!("missing {STORE_KEY_VAR}"))?;
        Ok(Self { url, api_key })
    }
}
