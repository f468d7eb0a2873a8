//! Tenant and role-based access control extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests that lack a tenant
//! context or whose role does not meet the minimum requirement.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use tourdesk_core::error::CoreError;
use tourdesk_core::roles::can_manage;
use tourdesk_core::types::DbId;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// An authenticated user acting for a tenant.
///
/// Rejects with 401 when the token carries no tenant.
///
/// ```ignore
/// async fn list(user: TenantUser) -> AppResult<Json<()>> {
///     tracing::debug!(tenant_id = user.tenant_id, "listing");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct TenantUser {
    pub user_id: DbId,
    pub tenant_id: DbId,
    pub role: String,
}

impl FromRequestParts<AppState> for TenantUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        let tenant_id = user.tenant_id.ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Tenant context required".into()))
        })?;
        Ok(TenantUser {
            user_id: user.user_id,
            tenant_id,
            role: user.role,
        })
    }
}

/// Requires a tenant user with the `manager` or `admin` role.
/// Rejects with 403 Forbidden otherwise.
pub struct RequireManager(pub TenantUser);

impl FromRequestParts<AppState> for RequireManager {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = TenantUser::from_request_parts(parts, state).await?;
        if !can_manage(&user.role) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Manager or Admin role required".into(),
            )));
        }
        Ok(RequireManager(user))
    }
}
