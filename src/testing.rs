//! In-memory stand-in for the Postgres store, used by router tests.

use std::sync::Mutex;

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::{
    dto::PublicUser,
    repo::UserRepo,
    repo_types::{NewUser, User},
};
use crate::parts::{
    repo::PartRepo,
    repo_types::{NewSparePart, SparePart},
};
use crate::repairs::{
    repo::RepairRepo,
    repo_types::{NewSupportRequest, RequestStatus, RequestWithUser, SupportRequest},
};

#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<Vec<User>>,
    requests: Mutex<Vec<SupportRequest>>,
    parts: Mutex<Vec<SparePart>>,
}

impl MemoryStore {
    pub fn user_count(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl UserRepo for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn create_user(&self, user: NewUser) -> anyhow::Result<User> {
        let mut users = self.users.lock().unwrap();
        anyhow::ensure!(
            users.iter().all(|u| u.email != user.email),
            "duplicate key value violates unique constraint \"users_email_key\""
        );
        let user = User {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            contact: user.contact,
            address: user.address,
            role: user.role,
            created_at: OffsetDateTime::now_utc(),
        };
        users.push(user.clone());
        Ok(user)
    }
}

#[async_trait]
impl RepairRepo for MemoryStore {
    async fn create_request(&self, new: NewSupportRequest) -> anyhow::Result<SupportRequest> {
        let request = SupportRequest {
            id: Uuid::new_v4(),
            user_id: new.user_id,
            device: new.device,
            issue: new.issue,
            scheduled: new.scheduled,
            admin_message: None,
            status: RequestStatus::Pending,
            created_at: OffsetDateTime::now_utc(),
        };
        self.requests.lock().unwrap().push(request.clone());
        Ok(request)
    }

    async fn list_requests_with_user(&self) -> anyhow::Result<Vec<RequestWithUser>> {
        let users = self.users.lock().unwrap();
        let requests = self.requests.lock().unwrap();
        let mut out: Vec<RequestWithUser> = requests
            .iter()
            .filter_map(|r| {
                let owner = users.iter().find(|u| u.id == r.user_id)?;
                Some(RequestWithUser {
                    request: r.clone(),
                    user: PublicUser::from(owner.clone()),
                })
            })
            .collect();
        out.reverse();
        Ok(out)
    }

    async fn list_requests_by_user(&self, user_id: Uuid) -> anyhow::Result<Vec<SupportRequest>> {
        // insertion order is creation order
        Ok(self
            .requests
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn reply_to_request(
        &self,
        id: Uuid,
        admin_message: &str,
    ) -> anyhow::Result<Option<SupportRequest>> {
        let mut requests = self.requests.lock().unwrap();
        Ok(requests.iter_mut().find(|r| r.id == id).map(|r| {
            r.admin_message = Some(admin_message.to_string());
            r.status = RequestStatus::Approved;
            r.clone()
        }))
    }
}

#[async_trait]
impl PartRepo for MemoryStore {
    async fn create_part(&self, new: NewSparePart) -> anyhow::Result<SparePart> {
        let mut parts = self.parts.lock().unwrap();
        let part = SparePart {
            id: parts.len() as i32 + 1,
            name: new.name,
            stock: new.stock,
            image: new.image,
        };
        parts.push(part.clone());
        Ok(part)
    }

    async fn list_parts(&self) -> anyhow::Result<Vec<SparePart>> {
        Ok(self.parts.lock().unwrap().clone())
    }

    async fn update_stock(&self, id: i32, stock: i32) -> anyhow::Result<Option<SparePart>> {
        let mut parts = self.parts.lock().unwrap();
        Ok(parts.iter_mut().find(|p| p.id == id).map(|p| {
            p.stock = stock;
            p.clone()
        }))
    }
}
