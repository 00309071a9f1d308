//! User account endpoints
//!
//! Registration and login set an HttpOnly session cookie carrying the
//! signed token; logout requires a valid session and clears it.

use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::models::{NewUser, ProfileUpdate, UserProfile};
use crate::session::{self, SESSION_COOKIE, SESSION_TTL_DAYS};
use crate::state::AppState;
use crate::{PlannerError, Result};

/// Account routes, mounted at the application root
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/{id}", get(get_profile).put(update_profile))
}

fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::days(SESSION_TTL_DAYS))
        .build()
}

async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(new_user): Json<NewUser>,
) -> Result<(StatusCode, CookieJar, Json<Value>)> {
    let user = state.users.register(new_user).await?;
    let token = session::issue(state.session_secret(), user.id, &user.email)?;
    let jar = jar.add(session_cookie(token));

    Ok((
        StatusCode::CREATED,
        jar,
        Json(json!({
            "message": "User registered successfully",
            "user": user.profile(),
        })),
    ))
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(credentials): Json<LoginRequest>,
) -> Result<(CookieJar, Json<Value>)> {
    let user = state
        .users
        .login(&credentials.email, &credentials.password)
        .await?;
    let token = session::issue(state.session_secret(), user.id, &user.email)?;
    let jar = jar.add(session_cookie(token));

    Ok((
        jar,
        Json(json!({
            "message": "Logged in successfully",
            "user": user.profile(),
        })),
    ))
}

async fn logout(State(state): State<AppState>, jar: CookieJar) -> Result<(CookieJar, Json<Value>)> {
    let token = jar
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .ok_or_else(|| PlannerError::unauthorized("You don't have any authorisation"))?;

    session::verify(state.session_secret(), &token)?;

    let jar = jar.remove(Cookie::build((SESSION_COOKIE, "")).path("/").build());
    Ok((jar, Json(json!({ "message": "Logged out successfully" }))))
}

async fn get_profile(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<UserProfile>> {
    let user = state
        .users
        .by_id(id)
        .await?
        .ok_or_else(|| PlannerError::not_found("User Not Found"))?;
    Ok(Json(user.profile()))
}

async fn update_profile(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<Value>> {
    let user = state.users.update_profile(id, update).await?;
    Ok(Json(json!({
        "message": "Profile updated successfully",
        "user": user.profile(),
    })))
}
