use axum::extract::{Path, State};
use axum::Json;
use common_auth::AuthContext;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::api_error::ApiError;
use crate::app::AppState;
use crate::user_store::{NewUser, UserRecord, UserStoreError};

#[derive(Deserialize)]
pub struct Credentials {
    pub user_name: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct RemoveUser {
    pub user_name: String,
}

pub async fn list_users(
    State(state): State<AppState>,
    _auth: AuthContext,
) -> Result<Json<Vec<UserRecord>>, ApiError> {
    let users = state.users.list().await?;
    Ok(Json(users))
}

pub async fn get_user(
    State(state): State<AppState>,
    _auth: AuthContext,
    Path(username): Path<String>,
) -> Result<Json<Option<UserRecord>>, ApiError> {
    let user = state.users.get(&username).await?;
    Ok(Json(user))
}

/// Creates a user and immediately signs them in: the response body is the
/// signed token string.
pub async fn create_user(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(new_user): Json<NewUser>,
) -> Result<Json<String>, ApiError> {
    let user = state.users.create(new_user).await?;
    state.metrics.signup();
    debug!(actor = %auth.claims.username, user_id = user.id, "Created user");

    let token = state.token_signer.issue(&user).map_err(|err| {
        warn!(user_id = user.id, error = %err, "Failed to issue token");
        ApiError::internal("Unable to issue authentication token.")
    })?;
    Ok(Json(token))
}

/// Removing a username that does not exist responds with null, not an error.
pub async fn remove_user(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(body): Json<RemoveUser>,
) -> Result<Json<Option<UserRecord>>, ApiError> {
    let removed = state.users.delete(&body.user_name).await?;
    if removed.is_some() {
        debug!(actor = %auth.claims.username, user_name = %body.user_name, "Removed user");
    }
    Ok(Json(removed))
}

pub async fn authenticate(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<String>, ApiError> {
    let user = match state
        .users
        .authenticate(&credentials.user_name, &credentials.password)
        .await
    {
        Ok(user) => {
            state.metrics.login_attempt("success");
            user
        }
        Err(err @ UserStoreError::InvalidCredentials) => {
            state.metrics.login_attempt("invalid");
            return Err(err.into());
        }
        Err(err) => {
            state.metrics.login_attempt("error");
            return Err(err.into());
        }
    };

    let token = state.token_signer.issue(&user).map_err(|err| {
        warn!(user_id = user.id, error = %err, "Failed to issue token");
        ApiError::internal("Unable to issue authentication token.")
    })?;
    Ok(Json(token))
}
