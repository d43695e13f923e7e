use crate::domain::models::user::Role;
use crate::state::AppState;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, StatusCode},
};
use std::sync::Arc;
use tower_cookies::Cookies;
use tracing::Span;

/// The authenticated caller, decoded from the access-token cookie. Mutating
/// requests must also echo the session's CSRF token in `X-CSRF-Token`.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub email: String,
    pub role: Role,
    pub trainer_name: Option<String>,
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let cookies = parts
            .extensions
            .get::<Cookies>()
            .ok_or(StatusCode::INTERNAL_SERVER_ERROR)?;

        let access_token = cookies
            .get("access_token")
            .ok_or(StatusCode::UNAUTHORIZED)?
            .value()
            .to_string();

        let app_state = <Arc<AppState> as FromRef<S>>::from_ref(state);
        let claims = app_state
            .auth_service
            .verify_token(&access_token)
            .map_err(|_| StatusCode::UNAUTHORIZED)?;

        let method = &parts.method;
        if method != "GET" && method != "HEAD" && method != "OPTIONS" {
            let csrf_header_val = parts
                .headers
                .get("X-CSRF-Token")
                .ok_or(StatusCode::FORBIDDEN)?
                .to_str()
                .map_err(|_| StatusCode::FORBIDDEN)?;

            if csrf_header_val != claims.csrf_token {
                return Err(StatusCode::FORBIDDEN);
            }
        }

        Span::current().record("user", claims.sub.as_str());

        Ok(CurrentUser {
            email: claims.sub,
            role: claims.role,
            trainer_name: claims.trainer_name,
        })
    }
}
