use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use super::{claims::Identity, jwt::JwtKeys, repo_types::Role};
use crate::error::AppError;

/// Verifies the bearer token and stores the caller's [`Identity`] in the
/// request extensions. A missing token is 401, a bad or expired one is 403.
pub async fn authenticate(
    State(keys): State<JwtKeys>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(bearer_token)
        .ok_or(AppError::Unauthorized)?;

    let claims = keys.verify(token).map_err(|e| {
        warn!(error = %e, "invalid or expired token");
        AppError::Forbidden
    })?;

    let identity = Identity::from(claims);
    debug!(user_id = %identity.id, email = %identity.email, role = %identity.role, "authenticated");
    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Fails with Forbidden unless the identity holds one of `allowed`.
pub fn authorize(identity: &Identity, allowed: &[Role]) -> Result<(), AppError> {
    if allowed.contains(&identity.role) {
        Ok(())
    } else {
        warn!(user_id = %identity.id, role = %identity.role, "role not allowed");
        Err(AppError::Forbidden)
    }
}

async fn require_roles(allowed: &[Role], request: Request, next: Next) -> Result<Response, AppError> {
    // authenticate must run first
    let identity = request
        .extensions()
        .get::<Identity>()
        .ok_or(AppError::Unauthorized)?;
    authorize(identity, allowed)?;
    Ok(next.run(request).await)
}

pub async fn admin_only(request: Request, next: Next) -> Result<Response, AppError> {
    require_roles(&[Role::Admin], request, next).await
}

pub async fn customer_only(request: Request, next: Next) -> Result<Response, AppError> {
    require_roles(&[Role::Customer], request, next).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn identity(role: Role) -> Identity {
        Identity {
            id: Uuid::new_v4(),
            email: "a@x.com".into(),
            role,
        }
    }

    #[test]
    fn authorize_accepts_listed_role() {
        assert!(authorize(&identity(Role::Admin), &[Role::Admin]).is_ok());
        assert!(authorize(&identity(Role::Customer), &[Role::Admin, Role::Customer]).is_ok());
    }

    #[test]
    fn authorize_rejects_other_role() {
        let err = authorize(&identity(Role::Customer), &[Role::Admin]).unwrap_err();
        assert!(matches!(err, AppError::Forbidden));
        let err = authorize(&identity(Role::Admin), &[Role::Customer]).unwrap_err();
        assert!(matches!(err, AppError::Forbidden));
    }

    #[test]
    fn bearer_token_parsing() {
        assert_eq!(bearer_token("Bearer abc"), Some("abc"));
        assert_eq!(bearer_token("bearer abc"), Some("abc"));
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("Bearer"), None);
        assert_eq!(bearer_token("Basic abc"), None);
    }
}
