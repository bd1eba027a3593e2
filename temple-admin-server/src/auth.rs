use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use temple_admin_api::ApiError;
use temple_admin_db::models::user::UserModel;

use crate::error::AppResult;
use crate::state::AppState;

/// What a handler is about to do with the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
    ManageUsers,
}

/// The token of an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Resolves the caller and checks their role against `access`.
pub async fn require_user(
    state: &AppState,
    headers: &HeaderMap,
    access: Access,
) -> AppResult<UserModel> {
    let token = bearer_token(headers)
        .ok_or_else(|| ApiError::Unauthorized("missing bearer token".to_string()))?;
    let user = state.services.users.authenticate(token).await?;
    let allowed = match access {
        Access::Read => true,
        Access::Write => user.role.can_write(),
        Access::ManageUsers => user.role.can_manage_users(),
    };
    if !allowed {
        return Err(ApiError::Forbidden(format!("{:?} role may not perform this action", user.role)).into());
    }
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token(&headers("Bearer abc123")), Some("abc123"));
        assert_eq!(bearer_token(&headers("bearer abc123")), Some("abc123"));
        assert_eq!(bearer_token(&headers("Basic abc123")), None);
        assert_eq!(bearer_token(&headers("Bearer ")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}
