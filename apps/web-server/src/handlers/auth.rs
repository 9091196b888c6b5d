//! Authentication handlers.

use actix_web::{
    HttpResponse,
    cookie::{Cookie, SameSite},
    web,
};
use serde::Deserialize;

use yatube_core::domain::{NewUser, User};
use yatube_core::ports::AuthError;
use yatube_shared::dto::{AuthResponse, LoginPageContext, LoginRequest, SignupRequest};

use super::redirect;
use crate::middleware::auth::ACCESS_TOKEN_COOKIE;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Deserialize)]
pub struct LoginPageQuery {
    next: Option<String>,
}

fn access_cookie(token: &str) -> Cookie<'static> {
    Cookie::build(ACCESS_TOKEN_COOKIE, token.to_string())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish()
}

/// Issue a token for `user` and return it in both the body and the cookie.
fn authenticated(
    state: &AppState,
    user: &User,
    mut response: actix_web::HttpResponseBuilder,
) -> AppResult<HttpResponse> {
    let token = state.tokens.generate_token(user.id, &user.username)?;

    Ok(response.cookie(access_cookie(&token)).json(AuthResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: state.tokens.expiration_seconds().max(0) as u64,
        username: user.username.clone(),
    }))
}

/// GET /auth/login/
pub async fn login_page(query: web::Query<LoginPageQuery>) -> HttpResponse {
    HttpResponse::Ok().json(LoginPageContext {
        next: query.into_inner().next,
    })
}

/// POST /auth/signup/
pub async fn signup(
    state: web::Data<AppState>,
    body: web::Json<SignupRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    User::validate_username(&req.username)?;
    if req.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::BadRequest(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }

    if state.users.find_by_username(&req.username).await?.is_some() {
        return Err(AppError::Conflict("Username already taken".to_string()));
    }

    let password_hash = state.passwords.hash(&req.password)?;
    let user = state
        .users
        .create(NewUser::new(req.username, password_hash))
        .await?;

    tracing::info!(user_id = user.id, username = %user.username, "User signed up");
    authenticated(&state, &user, HttpResponse::Created())
}

/// POST /auth/login/
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let user = state
        .users
        .find_by_username(&req.username)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    if !state.passwords.verify(&req.password, &user.password_hash)? {
        tracing::debug!(username = %req.username, "Login rejected");
        return Err(AuthError::InvalidCredentials.into());
    }

    authenticated(&state, &user, HttpResponse::Ok())
}

/// POST /auth/logout/
pub async fn logout() -> HttpResponse {
    let mut response = redirect("/");
    let mut cookie = access_cookie("");
    cookie.make_removal();
    if let Err(e) = response.add_cookie(&cookie) {
        tracing::warn!(error = %e, "Failed to clear access token cookie");
    }
    response
}
