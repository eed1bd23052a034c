use std::sync::Arc;

use actix_web::http::Method;
use actix_web::http::header::{self, HeaderName, HeaderValue};
use actix_web::{HttpRequest, HttpResponse, guard, web};
use tracing::{Instrument, debug, error, trace};

use crate::errors::SnaplinkError;
use crate::storage::{LinkStore, NewVisit};

pub struct RedirectService {}

impl RedirectService {
    pub async fn handle_visit(
        req: HttpRequest,
        path: web::Path<String>,
        store: web::Data<Arc<dyn LinkStore>>,
    ) -> Result<HttpResponse, SnaplinkError> {
        let id = path.into_inner();

        if !store.is_plausible_id(&id) {
            trace!("Invalid short id rejected: {}", id);
            return Err(Self::not_found());
        }

        let short_url = match store.get_url(&id).await {
            Ok(short_url) => short_url,
            Err(SnaplinkError::NotFound(_)) => {
                debug!("Short id not found: {}", id);
                return Err(Self::not_found());
            }
            Err(e) => return Err(e),
        };

        let location = HeaderValue::from_str(&short_url.url).map_err(|e| {
            SnaplinkError::internal(format!("stored url for {} is not a header value: {}", id, e))
        })?;
        let response = HttpResponse::TemporaryRedirect()
            .insert_header((header::LOCATION, location))
            .finish();

        // HEAD 多来自链接预览和探活，不计为访问
        if req.method() != Method::HEAD {
            Self::record_visit(Arc::clone(store.get_ref()), short_url.id, Self::visitor(&req));
        }

        Ok(response)
    }

    fn not_found() -> SnaplinkError {
        SnaplinkError::not_found("url not found")
    }

    fn visitor(req: &HttpRequest) -> NewVisit {
        NewVisit {
            ip: req
                .peer_addr()
                .map(|addr| addr.ip().to_string())
                .unwrap_or_default(),
            referer: Self::header_value(req, header::REFERER),
            user_agent: Self::header_value(req, header::USER_AGENT),
        }
    }

    fn header_value(req: &HttpRequest, name: HeaderName) -> String {
        req.headers()
            .get(name)
            .and_then(|h| h.to_str().ok())
            .unwrap_or_default()
            .to_string()
    }

    /// 异步记录访问，不阻塞跳转响应
    fn record_visit(store: Arc<dyn LinkStore>, id: String, visit: NewVisit) {
        tokio::spawn(
            async move {
                if let Err(e) = store.register_visit(&id, visit).await {
                    error!(id = %id, "error registering visit: {}", e);
                }
            }
            .in_current_span(),
        );
    }
}

/// Redirect 路由配置
pub fn redirect_routes() -> actix_web::Resource {
    web::resource("/{id}")
        .guard(guard::Any(guard::Get()).or(guard::Head()))
        .to(RedirectService::handle_visit)
}
