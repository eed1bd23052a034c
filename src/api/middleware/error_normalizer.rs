//! Error normalization middleware
//!
//! Handlers report failures as [`SnaplinkError`], which already renders the
//! uniform JSON body. Anything else that surfaces as a response error (actix
//! extractor failures, missing app data) is logged and replaced with the
//! opaque 500 body. A service-level `Err` is passed on as a masked
//! [`SnaplinkError::Internal`] so the dispatcher renders the same body.

use actix_service::{Service, Transform};
use actix_web::{
    Error,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::error;

use crate::api::error::internal_error_response;
use crate::errors::SnaplinkError;

#[derive(Clone, Default)]
pub struct ErrorNormalizer;

impl<S, B> Transform<S, ServiceRequest> for ErrorNormalizer
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = ErrorNormalizerService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ErrorNormalizerService {
            service: Rc::new(service),
        }))
    }
}

pub struct ErrorNormalizerService<S> {
    service: Rc<S>,
}

fn is_domain_error(err: &Error) -> bool {
    err.as_error::<SnaplinkError>().is_some()
}

impl<S, B> Service<ServiceRequest> for ErrorNormalizerService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
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

        Box::pin(async move {
            let res = match srv.call(req).await {
                Ok(res) => res,
                Err(e) if is_domain_error(&e) => return Err(e),
                // 渲染时由 ResponseError 记录完整错误
                Err(e) => return Err(SnaplinkError::internal(e.to_string()).into()),
            };

            let foreign = res
                .response()
                .error()
                .filter(|e| !is_domain_error(e))
                .map(|e| e.to_string());

            match foreign {
                Some(detail) => {
                    error!("masking internal error: {}", detail);
                    Ok(res
                        .into_response(internal_error_response())
                        .map_into_right_body())
                }
                None => Ok(res.map_into_left_body()),
            }
        })
    }
}
