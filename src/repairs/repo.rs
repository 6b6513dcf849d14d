use anyhow::Context;
use async_trait::async_trait;
use uuid::Uuid;

use super::repo_types::{NewSupportRequest, RequestUserRow, RequestWithUser, SupportRequest};
use crate::db::PgStore;

#[async_trait]
pub trait RepairRepo: Send + Sync {
    async fn create_request(&self, new: NewSupportRequest) -> anyhow::Result<SupportRequest>;
    async fn list_requests_with_user(&self) -> anyhow::Result<Vec<RequestWithUser>>;
    /// Newest first.
    async fn list_requests_by_user(&self, user_id: Uuid) -> anyhow::Result<Vec<SupportRequest>>;
    /// Sets the message and approves in one statement; `None` if no such request.
    async fn reply_to_request(
        &self,
        id: Uuid,
        admin_message: &str,
    ) -> anyhow::Result<Option<SupportRequest>>;
}

#[async_trait]
impl RepairRepo for PgStore {
    async fn create_request(&self, new: NewSupportRequest) -> anyhow::Result<SupportRequest> {
        let row = sqlx::query_as::<_, SupportRequest>(
            r#"
            INSERT INTO support_requests (user_id, device, issue, scheduled)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, device, issue, scheduled, admin_message, status, created_at
            "#,
        )
        .bind(new.user_id)
        .bind(new.device)
        .bind(new.issue)
        .bind(new.scheduled)
        .fetch_one(&self.pool)
        .await
        .context("insert support request")?;
        Ok(row)
    }

    async fn list_requests_with_user(&self) -> anyhow::Result<Vec<RequestWithUser>> {
        let rows = sqlx::query_as::<_, RequestUserRow>(
            r#"
            SELECT r.id, r.user_id, r.device, r.issue, r.scheduled, r.admin_message,
                   r.status, r.created_at,
                   u.name AS user_name, u.email AS user_email, u.contact AS user_contact,
                   u.address AS user_address, u.role AS user_role,
                   u.created_at AS user_created_at
              FROM support_requests r
              JOIN users u ON u.id = r.user_id
             ORDER BY r.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("list support requests")?;
        Ok(rows.into_iter().map(RequestWithUser::from).collect())
    }

    async fn list_requests_by_user(&self, user_id: Uuid) -> anyhow::Result<Vec<SupportRequest>> {
        let rows = sqlx::query_as::<_, SupportRequest>(
            r#"
            SELECT id, user_id, device, issue, scheduled, admin_message, status, created_at
              FROM support_requests
             WHERE user_id = $1
             ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .context("list support requests by user")?;
        Ok(rows)
    }

    async fn reply_to_request(
        &self,
        id: Uuid,
        admin_message: &str,
    ) -> anyhow::Result<Option<SupportRequest>> {
        let row = sqlx::query_as::<_, SupportRequest>(
            r#"
            UPDATE support_requests
               SET admin_message = $1, status = 'Approved'
             WHERE id = $2
            RETURNING id, user_id, device, issue, scheduled, admin_message, status, created_at
            "#,
        )
        .bind(admin_message)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("reply to support request")?;
        Ok(row)
    }
}
