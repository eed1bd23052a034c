//! Panic recovery middleware
//!
//! A panic raised while building or polling the inner service future is caught
//! here and surfaced as a masked [`SnaplinkError::Internal`], which the
//! dispatcher renders as the normalized 500 body. The panic hook has already
//! logged the backtrace by the time we see the payload.
//!
//! The `HttpRequest` must not be cloned before the inner call: the router
//! needs exclusive access to it while matching.

use actix_service::{Service, Transform};
use actix_web::{
    Error,
    dev::{ServiceRequest, ServiceResponse},
};
use futures_util::FutureExt;
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;
use tracing::error;

use crate::errors::SnaplinkError;
use crate::system::panic_message;

#[derive(Clone, Default)]
pub struct Recover;

impl<S, B> Transform<S, ServiceRequest> for Recover
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RecoverService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RecoverService {
            service: Rc::new(service),
        }))
    }
}

pub struct RecoverService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RecoverService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let method = req.method().clone();
        let path = req.path().to_string();

        Box::pin(async move {
            let outcome = match panic::catch_unwind(AssertUnwindSafe(|| srv.call(req))) {
                Ok(fut) => AssertUnwindSafe(fut).catch_unwind().await,
                Err(payload) => Err(payload),
            };

            outcome.unwrap_or_else(|payload| {
                let message = panic_message(payload.as_ref());
                error!(method = %method, path = %path, "handler panicked: {}", message);
                Err(SnaplinkError::internal(format!("handler panicked: {message}")).into())
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};

    use crate::api::error::ErrorBody;

    async fn exploding() -> HttpResponse {
        panic!("kaboom")
    }

    async fn echo(id: web::Path<String>) -> HttpResponse {
        HttpResponse::Ok().body(id.into_inner())
    }

    #[actix_web::test]
    async fn test_matched_routes_pass_through() {
        let app = test::init_service(
            App::new()
                .wrap(Recover)
                .route("/echo/{id}", web::get().to(echo)),
        )
        .await;

        let req = test::TestRequest::get().uri("/echo/abcd").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(test::read_body(resp).await, "abcd");
    }

    #[actix_web::test]
    async fn test_panic_becomes_masked_error() {
        let app = test::init_service(
            App::new()
                .wrap(Recover)
                .route("/boom", web::get().to(exploding))
                .route("/echo/{id}", web::get().to(echo)),
        )
        .await;

        let req = test::TestRequest::get().uri("/boom").to_request();
        let err = test::try_call_service(&app, req).await.err().unwrap();
        assert!(matches!(
            err.as_error::<SnaplinkError>(),
            Some(SnaplinkError::Internal(msg)) if msg.contains("kaboom")
        ));

        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: ErrorBody =
            serde_json::from_slice(&to_bytes(resp.into_body()).await.unwrap()).unwrap();
        assert_eq!(body.error, "internal error");

        let req = test::TestRequest::get().uri("/echo/next").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
