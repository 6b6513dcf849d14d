use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::{dto::PublicUser, Role};

/// Lifecycle of a support request: Pending -> Approved, one way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, sqlx::Type)]
#[sqlx(type_name = "request_status")]
pub enum RequestStatus {
    #[default]
    Pending,
    Approved,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SupportRequest {
    pub id: Uuid,
    pub user_id: Uuid,
    pub device: String,
    pub issue: String,
    #[serde(with = "time::serde::rfc3339")]
    pub scheduled: OffsetDateTime,
    pub admin_message: Option<String>,
    pub status: RequestStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewSupportRequest {
    pub user_id: Uuid,
    pub device: String,
    pub issue: String,
    pub scheduled: OffsetDateTime,
}

/// A request together with its owner, as listed to admins.
#[derive(Debug, Clone, Serialize)]
pub struct RequestWithUser {
    #[serde(flatten)]
    pub request: SupportRequest,
    pub user: PublicUser,
}

/// Flat row of the requests/users join.
#[derive(Debug, FromRow)]
pub(crate) struct RequestUserRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub device: String,
    pub issue: String,
    pub scheduled: OffsetDateTime,
    pub admin_message: Option<String>,
    pub status: RequestStatus,
    pub created_at: OffsetDateTime,
    pub user_name: Option<String>,
    pub user_email: String,
    pub user_contact: Option<String>,
    pub user_address: Option<String>,
    pub user_role: Role,
    pub user_created_at: OffsetDateTime,
}

impl From<RequestUserRow> for RequestWithUser {
    fn from(r: RequestUserRow) -> Self {
        Self {
            request: SupportRequest {
                id: r.id,
                user_id: r.user_id,
                device: r.device,
                issue: r.issue,
                scheduled: r.scheduled,
                admin_message: r.admin_message,
                status: r.status,
                created_at: r.created_at,
            },
            user: PublicUser {
                id: r.user_id,
                name: r.user_name,
                email: r.user_email,
                contact: r.user_contact,
                address: r.user_address,
                role: r.user_role,
                created_at: r.user_created_at,
            },
        }
    }
}
