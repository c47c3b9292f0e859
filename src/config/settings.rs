use serde::Deserialize;

/// Production CCS endpoint.
pub const PRODUCTION_HOST: &str = "gcm.googleapis.com:5235";

/// Pre-production (staging) CCS endpoint.
pub const STAGING_HOST: &str = "gcm-preprod.googleapis.com:5236";

/// Top-level configuration settings for a CCS client.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Settings {
    pub ccs: CcsSettings,
    pub log: LogSettings,
}

/// Where and as whom to connect.
///
/// `sender_id` may be given bare or already qualified with the GCM domain.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct CcsSettings {
    pub host: String,
    pub sender_id: String,
    pub api_key: String,
    /// Asks the transport to dump all CCS traffic.
    pub debug: bool,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub level: String,
}

/// Partial configuration settings loaded from files or environment.
///
/// Missing values are filled in from `Settings::default()`.
#[derive(Debug, Deserialize)]
pub struct PartialSettings {
    pub ccs: Option<PartialCcsSettings>,
    pub log: Option<PartialLogSettings>,
}

#[derive(Debug, Deserialize)]
pub struct PartialCcsSettings {
    pub host: Option<String>,
    pub sender_id: Option<String>,
    pub api_key: Option<String>,
    pub debug: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct PartialLogSettings {
    pub level: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ccs: CcsSettings {
                host: STAGING_HOST.to_string(),
                sender_id: String::new(),
                api_key: String::new(),
                debug: false,
            },
            log: LogSettings {
                level: "info".to_string(),
            },
        }
    }
}

impl PartialSettings {
    /// Merges with defaults
    pub fn merge_with(self, default: Settings) -> Settings {
        let ccs = self.ccs;
        let log = self.log;

        Settings {
            ccs: CcsSettings {
                host: ccs
                    .as_ref()
                    .and_then(|c| c.host.clone())
                    .unwrap_or(default.ccs.host),
                sender_id: ccs
                    .as_ref()
                    .and_then(|c| c.sender_id.clone())
                    .unwrap_or(default.ccs.sender_id),
                api_key: ccs
                    .as_ref()
                    .and_then(|c| c.api_key.clone())
                    .unwrap_or(default.ccs.api_key),
                debug: ccs
                    .as_ref()
                    .and_then(|c| c.debug)
                    .unwrap_or(default.ccs.debug),
            },
            log: LogSettings {
                level: log
                    .as_ref()
                    .and_then(|l| l.level.clone())
                    .unwrap_or(default.log.level),
            },
        }
    }
}
