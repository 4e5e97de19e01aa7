//! Principal extractors.
//!
//! The acting principal comes from `Authorization: Bearer <token>`. A request
//! without the header is anonymous; a header whose token resolves to nobody
//! is rejected outright.

use crate::error::ApiError;
use crate::handlers::AppState;
use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;
use rt_core::error::AppError;
use rt_core::models::Principal;

/// The caller's principal, if they sent credentials.
#[derive(Debug, Clone)]
pub struct MaybePrincipal(pub Option<Principal>);

impl MaybePrincipal {
    pub fn principal(&self) -> Option<&Principal> {
        self.0.as_ref()
    }
}

/// A principal is mandatory; anonymous requests get 401.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Principal);

/// The token of a `Bearer` credential. The scheme name is case-insensitive.
fn bearer_token(req: &HttpRequest) -> Option<String> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim_start().split_once(' ')?;
    scheme
        .eq_ignore_ascii_case("bearer")
        .then(|| token.trim().to_string())
}

impl FromRequest for MaybePrincipal {
    type Error = ApiError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let token = bearer_token(req);

        Box::pin(async move {
            let Some(token) = token else {
                return Ok(MaybePrincipal(None));
            };
            let state = state.ok_or_else(|| anyhow::anyhow!("AppState is not registered"))?;
            match state.auth.resolve(&token).await? {
                Some(principal) => Ok(MaybePrincipal(Some(principal))),
                None => Err(AppError::Unauthorized("invalid bearer token".to_string()).into()),
            }
        })
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = ApiError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let maybe = MaybePrincipal::from_request(req, payload);

        Box::pin(async move {
            maybe.await?.0.map(AuthenticatedUser).ok_or_else(|| {
                AppError::Unauthorized("authentication required".to_string()).into()
            })
        })
    }
}
