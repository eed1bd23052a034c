//! HTTP surface
//!
//! - `POST /new` creates a short url
//! - `GET /{id}` redirects to the stored url
//!
//! [`configure`] registers routes and the JSON extractor config;
//! [`build_app`] adds the store and the middleware stack on top.

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::errors::SnaplinkError;
use crate::storage::LinkStore;

pub mod error;
pub mod middleware;
pub mod services;

pub use error::{ErrorBody, json_error_handler};

/// 请求体大小上限
pub const JSON_BODY_LIMIT: usize = 64 * 1024;

/// Full application: store, routes and middleware.
///
/// Middleware order, outermost first: CORS, request id, access log, panic
/// recovery, error normalization.
pub fn build_app(
    store: Arc<dyn LinkStore>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(middleware::ErrorNormalizer)
        .wrap(middleware::Recover)
        .wrap(middleware::AccessLog)
        .wrap(middleware::RequestIdMiddleware)
        .wrap(Cors::permissive())
        .app_data(web::Data::new(store))
        .configure(configure)
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .limit(JSON_BODY_LIMIT)
            .error_handler(json_error_handler),
    )
    .service(services::shorten_routes())
    .service(services::redirect_routes())
    .default_service(web::to(route_not_found));
}

async fn route_not_found() -> Result<actix_web::HttpResponse, SnaplinkError> {
    Err(SnaplinkError::not_found("not found"))
}
