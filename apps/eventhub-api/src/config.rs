use core_config::{AppInfo, FromEnv, app_info, env_or_default, server::ServerConfig};
use database::mongodb::MongoConfig;
use domain_events::TicketmasterConfig;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `core_config` and `database`
/// libraries. Every setting is environment-derived; the built-in defaults
/// target local development only.
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub environment: Environment,
    pub mongodb: MongoConfig,
    pub ticketmaster: TicketmasterConfig,
    /// Session signing key (SECRET_KEY)
    pub secret_key: String,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let mongodb = MongoConfig::from_env()?;
        let server = ServerConfig::from_env()?;

        let mut ticketmaster =
            TicketmasterConfig::new(env_or_default("TICKETMASTER_API_KEY", "dev-api-key"));
        if let Ok(base_url) = std::env::var("TICKETMASTER_BASE_URL") {
            ticketmaster = ticketmaster.with_base_url(base_url);
        }

        let secret_key = env_or_default("SECRET_KEY", "dev-secret-key-change-in-production");

        Ok(Self {
            app: app_info!(),
            server,
            environment,
            mongodb,
            ticketmaster,
            secret_key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_loads_with_local_dev_defaults() {
        temp_env::with_vars(
            [
                ("APP_ENV", None::<&str>),
                ("HOST", None),
                ("PORT", None),
                ("MONGODB_URL", None),
                ("MONGO_URL", None),
                ("MONGODB_DATABASE", None),
                ("MONGO_DATABASE", None),
                ("TICKETMASTER_API_KEY", None),
                ("TICKETMASTER_BASE_URL", None),
                ("SECRET_KEY", None),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.app.name, "eventhub-api");
                assert_eq!(config.environment, Environment::Development);
                assert_eq!(config.server.port, 5000);
                assert_eq!(config.mongodb.url(), "mongodb://localhost:27017");
                assert_eq!(config.mongodb.database(), "eventhub");
                assert_eq!(config.ticketmaster.api_key, "dev-api-key");
                assert_eq!(
                    config.ticketmaster.base_url,
                    "https://app.ticketmaster.com/discovery/v2"
                );
                assert_eq!(config.secret_key, "dev-secret-key-change-in-production");
            },
        );
    }

    #[test]
    fn test_config_reads_environment_overrides() {
        temp_env::with_vars(
            [
                ("TICKETMASTER_API_KEY", Some("real-key")),
                ("TICKETMASTER_BASE_URL", Some("http://localhost:9999/v2")),
                ("SECRET_KEY", Some("prod-secret")),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.ticketmaster.api_key, "real-key");
                assert_eq!(config.ticketmaster.base_url, "http://localhost:9999/v2");
                assert_eq!(config.secret_key, "prod-secret");
            },
        );
    }
}
