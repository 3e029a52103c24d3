use std::sync::Arc;

use poem::http::HeaderMap;
use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::api::helpers;
use crate::errors::api::AdminError;
use crate::services::{AdminService, TokenService};
use crate::types::dto::admin::StatsResponse;

/// Admin dashboard API endpoints
pub struct AdminApi {
    admin_service: Arc<AdminService>,
    token_service: Arc<TokenService>,
}

impl AdminApi {
    /// Create a new AdminApi with the given AdminService
    pub fn new(admin_service: Arc<AdminService>, token_service: Arc<TokenService>) -> Self {
        Self {
            admin_service,
            token_service,
        }
    }
}

/// API tags for admin endpoints
#[derive(Tags)]
enum AdminTags {
    /// Admin dashboard
    Admin,
}

#[OpenApi(prefix_path = "/admin")]
impl AdminApi {
    /// Aggregate issue and user counts (admin only)
    #[oai(path = "/stats", method = "get", tag = "AdminTags::Admin")]
    async fn stats(&self, headers: &HeaderMap) -> Result<Json<StatsResponse>, AdminError> {
        let claims = helpers::authenticate(headers, &self.token_service)?;

        let stats = self.admin_service.stats(&claims).await?;

        Ok(Json(stats))
    }
}
