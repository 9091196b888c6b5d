//! Application state - shared across all handlers.

use std::sync::Arc;

use yatube_core::ports::{
    GroupRepository, PasswordService, PostRepository, TokenService, UserRepository,
};
use yatube_infra::{Argon2PasswordService, InMemoryStore, JwtTokenService};

use crate::config::{AppConfig, SiteSettings};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub groups: Arc<dyn GroupRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub tokens: Arc<dyn TokenService>,
    pub passwords: Arc<dyn PasswordService>,
    pub site: Arc<SiteSettings>,
}

impl AppState {
    /// State backed by an in-memory store.
    pub fn in_memory(
        store: &InMemoryStore,
        site: SiteSettings,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users: Arc::new(store.users()),
            groups: Arc::new(store.groups()),
            posts: Arc::new(store.posts()),
            tokens,
            passwords: Arc::new(Argon2PasswordService::new()),
            site: Arc::new(site),
        }
    }

    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(config.jwt.clone()));

        #[cfg(feature = "postgres")]
        {
            if let Some(db_config) = &config.database {
                match Self::postgres(db_config, config.site.clone(), tokens.clone()).await {
                    Ok(state) => return state,
                    Err(e) => tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    ),
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            }
        }

        #[cfg(not(feature = "postgres"))]
        tracing::info!("Running without postgres feature - using in-memory repositories");

        Self::in_memory(&InMemoryStore::new(), config.site.clone(), tokens)
    }

    #[cfg(feature = "postgres")]
    async fn postgres(
        db_config: &yatube_infra::database::DatabaseConfig,
        site: SiteSettings,
        tokens: Arc<dyn TokenService>,
    ) -> Result<Self, migration::DbErr> {
        use migration::{Migrator, MigratorTrait};
        use yatube_infra::database::{
            DatabaseConnections, PostgresGroupRepository, PostgresPostRepository,
            PostgresUserRepository,
        };

        let connections = DatabaseConnections::init(db_config).await?;
        if db_config.auto_migrate {
            Migrator::up(&connections.main, None).await?;
            tracing::info!("Migrations applied");
        }

        let db = connections.main;
        tracing::info!("Application state initialized (postgres)");
        Ok(Self {
            users: Arc::new(PostgresUserRepository::new(db.clone())),
            groups: Arc::new(PostgresGroupRepository::new(db.clone())),
            posts: Arc::new(PostgresPostRepository::new(db)),
            tokens,
            passwords: Arc::new(Argon2PasswordService::new()),
            site: Arc::new(site),
        })
    }
}
