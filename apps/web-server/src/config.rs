//! Application configuration loaded from environment variables.

use std::env;

use yatube_infra::JwtConfig;
#[cfg(feature = "postgres")]
use yatube_infra::database::DatabaseConfig;

/// Settings the page handlers read on every request.
#[derive(Debug, Clone)]
pub struct SiteSettings {
    /// Posts shown on one listing page.
    pub posts_per_page: u64,
    /// Where anonymous users are sent by the create and edit pages.
    pub login_url: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            posts_per_page: 10,
            login_url: "/auth/login/".to_string(),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    #[cfg(feature = "postgres")]
    pub database: Option<DatabaseConfig>,
    pub site: SiteSettings,
    pub jwt: JwtConfig,
}

fn parsed_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.parse().ok())
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        #[cfg(feature = "postgres")]
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: parsed_var("DB_MAX_CONNECTIONS").unwrap_or(100),
            min_connections: parsed_var("DB_MIN_CONNECTIONS").unwrap_or(10),
            auto_migrate: env::var("DB_AUTO_MIGRATE")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        });

        let defaults = SiteSettings::default();
        let site = SiteSettings {
            posts_per_page: parsed_var::<u64>("POSTS_PER_PAGE")
                .filter(|n| *n > 0)
                .unwrap_or(defaults.posts_per_page),
            login_url: env::var("LOGIN_URL").unwrap_or(defaults.login_url),
        };

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parsed_var("PORT").unwrap_or(8080),
            #[cfg(feature = "postgres")]
            database,
            site,
            jwt: JwtConfig::from_env(),
        }
    }
}
