use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use tracing::debug;
use vconf::kernel::security::Actor;

/// A caller authenticated by bearer token as a superuser actor.
#[derive(Debug, Clone)]
pub(crate) struct Superuser(pub(crate) Actor);

impl FromRequestParts<AppState> for Superuser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ApiError::Forbidden {
                message: "missing bearer token".into(),
                context: None,
            })?;

        match state.actors.by_token(token) {
            Some(actor) if actor.superuser => Ok(Self(actor)),
            Some(actor) => {
                debug!(username = %actor.username, "Rejected non-superuser");
                Err(ApiError::Forbidden {
                    message: "superuser required".into(),
                    context: Some(actor.username.into()),
                })
            },
            None => Err(ApiError::Forbidden { message: "unknown token".into(), context: None }),
        }
    }
}
