use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{auth::repo::UserRepo, parts::repo::PartRepo, repairs::repo::RepairRepo};

/// Everything the handlers need from persistence.
pub trait Database: UserRepo + RepairRepo + PartRepo {}

impl<T> Database for T where T: UserRepo + RepairRepo + PartRepo {}

/// Postgres-backed store.
#[derive(Clone)]
pub struct PgStore {
    pub pool: PgPool,
}

impl PgStore {
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .context("connect to database")?;
        Ok(Self { pool })
    }

    pub async fn migrate(&self) {
        if let Err(e) = sqlx::migrate!("./migrations").run(&self.pool).await {
            tracing::warn!(error = %e, "migration failed; continuing");
        }
    }
}
