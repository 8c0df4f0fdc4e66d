use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::jwt::{verify_token, Role, TokenType};
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub role: Role,
    /// Raw zone name from the token; the normalizer handles bad values.
    pub timezone: String,
}

impl AuthUser {
    pub fn require_client(&self) -> Result<(), AppError> {
        match self.role {
            Role::Client => Ok(()),
            Role::Coach => Err(AppError::Forbidden),
        }
    }

    pub fn require_coach(&self) -> Result<(), AppError> {
        match self.role {
            Role::Coach => Ok(()),
            Role::Client => Err(AppError::Forbidden),
        }
    }
}

pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(AppError::Unauthorized)?;

    let token_data = verify_token(token, &state.config)?;

    if token_data.claims.token_type != TokenType::Access {
        return Err(AppError::Unauthorized);
    }

    let auth_user = AuthUser {
        id: token_data.claims.sub,
        role: token_data.claims.role,
        timezone: token_data.claims.tz.unwrap_or_else(|| "UTC".into()),
    };

    req.extensions_mut().insert(auth_user);
    Ok(next.run(req).await)
}
