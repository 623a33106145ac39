use actix_web::{
  Error, HttpMessage, HttpResponse,
  body::EitherBody,
  dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures_util::future::LocalBoxFuture;
use std::{
  future::{Ready, ready},
  rc::Rc,
  sync::Arc,
};

use crate::{
  adapters::http::errors::{ApiError, AuthErrorKind},
  domain::auth::{Owner, SessionVerifier},
};

/// Authentication middleware that resolves the bearer session token to the
/// owning user and attaches the [`Owner`] to request extensions.
///
/// Session issuance is the external auth service's concern; this middleware
/// only needs the ownership-scoping key. Requests without a valid live
/// session are rejected with 401 before reaching any handler.
pub struct AuthMiddleware {
  verifier: Arc<dyn SessionVerifier>,
}

impl AuthMiddleware {
  pub fn new(verifier: Arc<dyn SessionVerifier>) -> Self {
    Self { verifier }
  }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Transform = AuthMiddlewareService<S>;
  type InitError = ();
  type Future = Ready<Result<Self::Transform, Self::InitError>>;

  fn new_transform(&self, service: S) -> Self::Future {
    ready(Ok(AuthMiddlewareService {
      service: Rc::new(service),
      verifier: self.verifier.clone(),
    }))
  }
}

pub struct AuthMiddlewareService<S> {
  service: Rc<S>,
  verifier: Arc<dyn SessionVerifier>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

  forward_ready!(service);

  fn call(&self, req: ServiceRequest) -> Self::Future {
    let service = Rc::clone(&self.service);
    let verifier = self.verifier.clone();

    Box::pin(async move {
      let token = match extract_session_token(&req) {
        Ok(token) => token,
        Err(e) => {
          let (request, _) = req.into_parts();
          let response = HttpResponse::Unauthorized().json(e).map_into_right_body();
          return Ok(ServiceResponse::new(request, response));
        }
      };

      let owner = match verifier.verify(&token).await {
        Ok(Some(owner)) => owner,
        Ok(None) => {
          let (request, _) = req.into_parts();
          let response = HttpResponse::Unauthorized()
            .json(ApiError::Auth(AuthErrorKind::InvalidSession))
            .map_into_right_body();
          return Ok(ServiceResponse::new(request, response));
        }
        Err(e) => {
          let (request, _) = req.into_parts();
          let api_error: ApiError = e.into();
          let response = HttpResponse::Unauthorized()
            .json(api_error)
            .map_into_right_body();
          return Ok(ServiceResponse::new(request, response));
        }
      };

      req.extensions_mut().insert(owner);

      let res = service.call(req).await?;
      Ok(res.map_into_left_body())
    })
  }
}

/// Extract session token from Authorization header
fn extract_session_token(req: &ServiceRequest) -> Result<String, ApiError> {
  req
    .headers()
    .get("Authorization")
    .and_then(|h| h.to_str().ok())
    .and_then(|s| s.strip_prefix("Bearer "))
    .map(|s| s.to_string())
    .ok_or(ApiError::Auth(AuthErrorKind::InvalidToken))
}

/// Extension trait to extract the authenticated owner from a request
pub trait RequestOwner {
  /// Get the authenticated owner from request extensions
  ///
  /// # Panics
  ///
  /// Panics if no owner is present. Only call this in handlers behind
  /// AuthMiddleware.
  fn owner(&self) -> Owner;
}

impl RequestOwner for actix_web::HttpRequest {
  fn owner(&self) -> Owner {
    self
      .extensions()
      .get::<Owner>()
      .copied()
      .expect("Owner not found in request extensions. Did you forget to add AuthMiddleware?")
  }
}
