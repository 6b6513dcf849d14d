use anyhow::Context;
use async_trait::async_trait;

use super::repo_types::{NewSparePart, SparePart};
use crate::db::PgStore;

#[async_trait]
pub trait PartRepo: Send + Sync {
    async fn create_part(&self, new: NewSparePart) -> anyhow::Result<SparePart>;
    async fn list_parts(&self) -> anyhow::Result<Vec<SparePart>>;
    /// Overwrites stock as given, negative values included.
    async fn update_stock(&self, id: i32, stock: i32) -> anyhow::Result<Option<SparePart>>;
}

#[async_trait]
impl PartRepo for PgStore {
    async fn create_part(&self, new: NewSparePart) -> anyhow::Result<SparePart> {
        let part = sqlx::query_as::<_, SparePart>(
            r#"
            INSERT INTO spare_parts (name, stock, image)
            VALUES ($1, $2, $3)
            RETURNING id, name, stock, image
            "#,
        )
        .bind(new.name)
        .bind(new.stock)
        .bind(new.image)
        .fetch_one(&self.pool)
        .await
        .context("insert spare part")?;
        Ok(part)
    }

    async fn list_parts(&self) -> anyhow::Result<Vec<SparePart>> {
        let parts = sqlx::query_as::<_, SparePart>(
            r#"SELECT id, name, stock, image FROM spare_parts ORDER BY id"#,
        )
        .fetch_all(&self.pool)
        .await
        .context("list spare parts")?;
        Ok(parts)
    }

    async fn update_stock(&self, id: i32, stock: i32) -> anyhow::Result<Option<SparePart>> {
        let part = sqlx::query_as::<_, SparePart>(
            r#"
            UPDATE spare_parts
               SET stock = $1
             WHERE id = $2
            RETURNING id, name, stock, image
            "#,
        )
        .bind(stock)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("update spare part stock")?;
        Ok(part)
    }
}
