use bounty_core::ApiConfig;
use rand::Rng;

/// Range of the per-session client version header.
const CLIENT_VERSION_RANGE: std::ops::RangeInclusive<u32> = 1_000_000..=9_999_999;

/// Browser identity presented to the marketplace for one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientFingerprint {
    pub user_agent: String,
    pub client_version: u32,
}

/// Desktop browsers the session may present as.
const USER_AGENTS: [&str; 4] = [
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/109.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64; rv:125.0) Gecko/20100101 Firefox/125.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_4) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15",
];

impl ClientFingerprint {
    /// Draw a user agent and a 7-digit client version for a new session
    pub fn randomized() -> Self {
        let mut rng = rand::thread_rng();
        Self {
            user_agent: USER_AGENTS[rng.gen_range(0..USER_AGENTS.len())].to_string(),
            client_version: rng.gen_range(CLIENT_VERSION_RANGE),
        }
    }

    /// Randomized fingerprint with any values pinned in the config applied
    pub fn from_config(api: &ApiConfig) -> Self {
        let mut fingerprint = Self::randomized();
        if let Some(user_agent) = &api.user_agent {
            fingerprint.user_agent.clone_from(user_agent);
        }
        if let Some(version) = api.client_version {
            fingerprint.client_version = version;
        }
        fingerprint
    }
}
