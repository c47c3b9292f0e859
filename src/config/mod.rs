mod settings;

use crate::config::settings::PartialSettings;
use config::{Config, ConfigError, Environment, File};

pub use settings::{CcsSettings, LogSettings, PRODUCTION_HOST, STAGING_HOST, Settings};

/// Loads the configuration from `config/default` (any format the `config`
/// crate understands, optional) and `GCM_`-prefixed environment variables,
/// e.g. `GCM_CCS__SENDER_ID`. A `.env` file in the working directory is
/// honoured. Missing values fall back to `Settings::default()`.
pub fn load_config() -> Result<Settings, ConfigError> {
    let _ = dotenvy::dotenv();

    let builder = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(
            Environment::with_prefix("GCM")
                .prefix_separator("_")
                .separator("__"),
        );

    let config = builder.build()?;
    let partial: PartialSettings = config.try_deserialize()?;

    Ok(partial.merge_with(Settings::default()))
}
