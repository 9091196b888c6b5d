//! Authentication extractors.

use actix_web::{
    FromRequest, HttpRequest, HttpResponse, ResponseError, dev::Payload, http::StatusCode,
    http::header, web,
};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use url::form_urlencoded::byte_serialize;

use yatube_core::domain::User;

use crate::middleware::error::AppError;
use crate::state::AppState;

/// Cookie holding the access token for browser clients.
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Authenticated requester. Anonymous requests are redirected to the login
/// page with the current path as `next`.
///
/// ```ignore
/// async fn post_create(identity: Identity) -> impl Responder {
///     format!("Hello, {}!", identity.user.username)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Identity {
    pub user: User,
}

/// Bearer token from the `Authorization` header, else the access token cookie.
fn request_token(req: &HttpRequest) -> Option<String> {
    let bearer = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string);

    bearer.or_else(|| {
        req.cookie(ACCESS_TOKEN_COOKIE)
            .map(|c| c.value().to_string())
    })
}

/// Resolve the requester. Invalid tokens and deleted users count as anonymous.
pub async fn resolve_user(state: &AppState, req: &HttpRequest) -> Result<Option<User>, AppError> {
    let Some(token) = request_token(req) else {
        return Ok(None);
    };

    let claims = match state.tokens.validate_token(&token) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring invalid access token");
            return Ok(None);
        }
    };

    Ok(state.users.find_by_id(claims.user_id).await?)
}

/// Redirect to the login page, remembering where the user was going.
#[derive(Debug)]
pub struct LoginRedirect {
    location: String,
}

impl LoginRedirect {
    /// `next` is the full path and query of the request. It is escaped as a
    /// query value, with slashes left readable.
    pub fn new(login_url: &str, next: &str) -> Self {
        let next: String = byte_serialize(next.as_bytes()).collect();
        Self {
            location: format!("{}?next={}", login_url, next.replace("%2F", "/")),
        }
    }
}

impl fmt::Display for LoginRedirect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Login required, redirecting to {}", self.location)
    }
}

impl ResponseError for LoginRedirect {
    fn status_code(&self) -> StatusCode {
        StatusCode::FOUND
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::Found()
            .insert_header((header::LOCATION, self.location.as_str()))
            .finish()
    }
}

impl FromRequest for Identity {
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let Some(state) = req.app_data::<web::Data<AppState>>() else {
                tracing::error!("AppState not found in app data");
                return Err(AppError::Internal("Server configuration error".to_string()).into());
            };

            match resolve_user(state, &req).await? {
                Some(user) => Ok(Identity { user }),
                None => {
                    let next = req
                        .uri()
                        .path_and_query()
                        .map_or_else(|| req.path(), |pq| pq.as_str());
                    Err(LoginRedirect::new(&state.site.login_url, next).into())
                }
            }
        })
    }
}
