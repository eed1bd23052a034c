use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, guard, web};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::SnaplinkError;
use crate::storage::LinkStore;
use crate::utils::normalize_target_url;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateRequest {
    /// `null` 与缺省都按空串处理
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateResponse {
    pub url: String,
}

pub struct ShortenService {}

impl ShortenService {
    pub async fn create_url(
        req: HttpRequest,
        body: web::Json<CreateRequest>,
        store: web::Data<Arc<dyn LinkStore>>,
    ) -> Result<HttpResponse, SnaplinkError> {
        let target = normalize_target_url(body.url.as_deref().unwrap_or_default())?;
        let short_url = store.create_url(&target).await?;

        info!(id = %short_url.id, target = %short_url.url, "short url created");

        Ok(HttpResponse::Created().json(CreateResponse {
            url: Self::absolute_short_url(&req, &short_url.id),
        }))
    }

    /// scheme + host as seen by the client, then the id
    fn absolute_short_url(req: &HttpRequest, id: &str) -> String {
        let info = req.connection_info();
        format!("{}://{}/{}", info.scheme(), info.host(), id)
    }
}

/// Shorten 路由配置
pub fn shorten_routes() -> actix_web::Resource {
    web::resource("/new")
        .guard(guard::Post())
        .to(ShortenService::create_url)
}
