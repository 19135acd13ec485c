//! Shared application state

use crate::{
    config::Config,
    db::CatalogStore,
    services::{CourseService, StudentService},
    Error, Result,
};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use std::{str::FromStr, sync::Arc, time::Duration};

#[derive(Debug, Clone)]
pub struct AppStateOptions {
    pub run_migrations: bool,
}

impl Default for AppStateOptions {
    fn default() -> Self {
        Self {
            run_migrations: true,
        }
    }
}

/// Shared application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db_pool: SqlitePool,
    pub courses: Arc<CourseService>,
    pub students: Arc<StudentService>,
}

impl AppState {
    /// Initialize the application state
    pub async fn new(config: Config) -> Result<Self> {
        Self::new_with_options(config, AppStateOptions::default()).await
    }

    pub async fn new_with_options(config: Config, options: AppStateOptions) -> Result<Self> {
        tracing::info!("Initializing application state...");

        let config = Arc::new(config);

        let db_pool = create_db_pool(config.as_ref()).await?;

        if options.run_migrations {
            tracing::info!("Running database migrations...");
            sqlx::migrate!("./migrations")
                .run(&db_pool)
                .await
                .map_err(|e| Error::Internal(format!("Migration failed: {e}")))?;
        }

        let store = CatalogStore::new(db_pool.clone());
        let courses = Arc::new(CourseService::new(store.clone()));
        let students = Arc::new(StudentService::new(store));

        tracing::info!("Application state initialized");

        Ok(Self {
            config,
            db_pool,
            courses,
            students,
        })
    }
}

async fn create_db_pool(config: &Config) -> Result<SqlitePool> {
    tracing::info!("Creating database connection pool...");

    let options = SqliteConnectOptions::from_str(&config.database.url)?
        .create_if_missing(true)
        // Enrollment rows must go away with their course/student.
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .min_connections(config.database.pool_min_size)
        .max_connections(config.database.pool_max_size)
        .acquire_timeout(Duration::from_secs(config.database.pool_timeout_seconds))
        .connect_with(options)
        .await?;

    tracing::info!(
        "Database pool created (min: {}, max: {})",
        config.database.pool_min_size,
        config.database.pool_max_size
    );

    Ok(pool)
}
