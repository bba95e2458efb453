//! Identity-provider lifecycle hook handlers
//!
//! The identity provider invokes these on sign-up and on every
//! authentication attempt. Hook failures propagate back to the provider,
//! which translates them into a blocked sign-up or a rejected
//! authentication — from the outside an operation either fully succeeds or
//! is visibly rejected.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use residency_core::{RegionCode, ResidencyError};

use crate::api::error::ApiError;
use crate::api::AppState;
use crate::gates;

/// Attributes of the user involved in the lifecycle event
#[derive(Debug, Deserialize)]
pub struct UserAttributes {
    /// Verified email address (the durable identity attribute)
    pub email: Option<String>,
    /// Declared jurisdiction, present at sign-up only
    pub jurisdiction: Option<String>,
}

/// Lifecycle hook event as delivered by the identity provider
#[derive(Debug, Deserialize)]
pub struct HookEvent {
    /// Region identifier of the invoking deployment
    pub region: String,
    pub user_attributes: UserAttributes,
}

/// Response to a pre-sign-up hook
#[derive(Debug, Serialize)]
pub struct PreSignupResponse {
    /// Derived pseudonymous identifier (non-secret)
    pub user_id: String,
    /// The user's home region after registration
    pub region: String,
    /// Provider policy: confirm the account without a confirmation step
    pub auto_confirm_user: bool,
    /// Provider policy: mark the verified email as verified
    pub auto_verify_email: bool,
}

/// Response to a successful pre-authentication hook
#[derive(Debug, Serialize)]
pub struct PreAuthResponse {
    pub allow: bool,
    /// The region that admitted the attempt
    pub region: String,
}

/// Registration gate hook
///
/// POST /v1/hooks/pre-signup
///
/// Invoked once during account creation, before the account is considered
/// provisioned. A missing email or jurisdiction, an unsupported
/// jurisdiction, or an unreachable store all block sign-up.
pub async fn pre_signup(
    State(state): State<Arc<AppState>>,
    Json(event): Json<HookEvent>,
) -> Result<Json<PreSignupResponse>, ApiError> {
    let email = event
        .user_attributes
        .email
        .as_deref()
        .ok_or(ResidencyError::MissingAttribute("email"))?;
    let jurisdiction = event
        .user_attributes
        .jurisdiction
        .as_deref()
        .ok_or(ResidencyError::MissingAttribute("jurisdiction"))?;

    let decision = gates::register(
        state.store.as_ref(),
        &state.regions,
        &state.retry,
        email,
        jurisdiction,
    )
    .await?;

    Ok(Json(PreSignupResponse {
        user_id: decision.user_id.to_string(),
        region: decision.region.to_string(),
        auto_confirm_user: true,
        auto_verify_email: true,
    }))
}

/// Admission gate hook
///
/// POST /v1/hooks/pre-auth
///
/// Invoked on every authentication attempt in the region handling the
/// request. Passes silently on a match; rejects with `WRONG_REGION` or
/// `NO_RESIDENCY_RECORD` otherwise. Read-only.
pub async fn pre_auth(
    State(state): State<Arc<AppState>>,
    Json(event): Json<HookEvent>,
) -> Result<Json<PreAuthResponse>, ApiError> {
    let email = event
        .user_attributes
        .email
        .as_deref()
        .ok_or(ResidencyError::MissingAttribute("email"))?;

    let current_region = RegionCode::new(event.region);
    let admitted = gates::admit(
        state.store.as_ref(),
        &state.retry,
        &state.grace,
        email,
        &current_region,
    )
    .await?;

    Ok(Json(PreAuthResponse {
        allow: true,
        region: admitted.to_string(),
    }))
}
