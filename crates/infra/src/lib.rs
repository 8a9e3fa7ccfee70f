mod config;
mod repos;
mod system;

pub use config::Config;
pub use repos::{
    AppointmentStoreError, IAppointmentRepo, IDoctorRepo, IUserRepo, Repos, UserStoreError,
};
use sqlx::{
    migrate::MigrateError,
    postgres::{PgPool, PgPoolOptions},
};
use std::{sync::Arc, time::Duration};
pub use system::{ISys, RealSys, StaticTimeSys};
use tracing::info;

#[derive(Clone)]
pub struct DocbookContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
}

impl DocbookContext {
    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
        }
    }

    async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        let config = Config::new();
        let pool = PgPoolOptions::new()
            .max_connections(config.pg_pool_max)
            .acquire_timeout(Duration::from_secs(config.pg_acquire_timeout_secs))
            .connect(connection_string)
            .await?;
        run_migration(&pool).await?;

        Ok(Self {
            repos: Repos::create_postgres(pool),
            config,
            sys: Arc::new(RealSys {}),
        })
    }
}

const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

/// Will setup the infrastructure context given the environment.
/// Uses postgres when `DATABASE_URL` is set and inmemory repos otherwise.
pub async fn setup_context() -> anyhow::Result<DocbookContext> {
    match std::env::var(PSQL_CONNECTION_STRING) {
        Ok(connection_string) if !connection_string.is_empty() => {
            info!(
                "{} env var was provided. Going to use postgres.",
                PSQL_CONNECTION_STRING
            );
            DocbookContext::create_postgres(&connection_string).await
        }
        _ => {
            info!(
                "{} env var was not provided. Going to use inmemory infra.",
                PSQL_CONNECTION_STRING
            );
            Ok(DocbookContext::create_inmemory())
        }
    }
}

pub async fn run_migration(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!().run(pool).await
}
