use axum::http::HeaderMap;

use backend_domain::value_objects::{MemberId, MemberRole};
use backend_domain::RuntimeConfig;

use crate::error::HttpError;

pub const MEMBER_ID_HEADER: &str = "X-Member-Id";
pub const MEMBER_ROLE_HEADER: &str = "X-Member-Role";

/// The club member a request acts as, taken from the identity headers
/// the reverse proxy injects after login.
#[derive(Debug, Clone)]
pub struct ActingMember {
    pub id: MemberId,
    pub role: MemberRole,
}

pub fn authorize(config: &RuntimeConfig, headers: &HeaderMap) -> bool {
    if let Some(api_token) = &config.api_token {
        return extract_bearer(headers)
            .map(|v| v == *api_token)
            .unwrap_or(false);
    }
    true
}

pub fn acting_member(headers: &HeaderMap) -> Result<ActingMember, HttpError> {
    let id = headers
        .get(MEMBER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| HttpError::BadRequest(format!("{} header is required", MEMBER_ID_HEADER)))?;

    // An unknown or missing role degrades to plain member.
    let role = headers
        .get(MEMBER_ROLE_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(MemberRole::from)
        .unwrap_or(MemberRole::Member);

    Ok(ActingMember {
        id: MemberId(id.to_string()),
        role,
    })
}

pub fn require_manager(member: &ActingMember) -> Result<(), HttpError> {
    if member.role.can_manage_events() {
        Ok(())
    } else {
        Err(HttpError::Forbidden(
            "requires admin or trainer role".to_string(),
        ))
    }
}

fn extract_bearer(headers: &HeaderMap) -> Option<String> {
    let value = headers.get("Authorization")?.to_str().ok()?.trim();
    let prefix = "Bearer ";
    if !value.starts_with(prefix) {
        return None;
    }
    let token = value[prefix.len()..].trim();
    if token.is_empty() {
        return None;
    }
    Some(token.to_string())
}
