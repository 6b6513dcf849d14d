use serde::Deserialize;
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo_types::NewSupportRequest;

/// Body of `POST /api/repair`. Every field is optional at the parse level so
/// that absence is reported uniformly as "All fields are required".
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRepairRequest {
    pub user_id: Option<Uuid>,
    pub device: Option<String>,
    pub issue: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub scheduled: Option<OffsetDateTime>,
}

impl CreateRepairRequest {
    /// `None` if any field is missing or blank.
    pub fn into_new(self) -> Option<NewSupportRequest> {
        Some(NewSupportRequest {
            user_id: self.user_id?,
            device: non_blank(self.device)?,
            issue: non_blank(self.issue)?,
            scheduled: self.scheduled?,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyRequest {
    pub admin_message: Option<String>,
}

fn non_blank(s: Option<String>) -> Option<String> {
    s.filter(|v| !v.trim().is_empty())
}
