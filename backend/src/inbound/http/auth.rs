//! Bearer-token extractor for write endpoints.
//!
//! Handlers that need an identity take a [`SessionUser`] parameter; the
//! extractor runs the [`SessionAuthenticator`] registered as app data and
//! fails with `401` before the handler body runs.

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::{Ready, ready};
use tracing::error;

use crate::domain::{AuthenticatedUser, Error, SessionAuthenticator, SessionRejection};

/// Authenticated caller extracted from the `Authorization` header.
#[derive(Debug, Clone)]
pub struct SessionUser(pub AuthenticatedUser);

impl SessionUser {
    #[must_use]
    pub fn into_inner(self) -> AuthenticatedUser {
        self.0
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, Error> {
    let Some(authenticator) = req.app_data::<web::Data<SessionAuthenticator>>() else {
        error!("session authenticator not registered as app data");
        return Err(Error::internal("session authenticator unavailable"));
    };
    let header = match req.headers().get(AUTHORIZATION) {
        None => None,
        Some(value) => Some(value.to_str().map_err(|_| SessionRejection::Malformed)?),
    };
    Ok(authenticator.authenticate(header)?)
}

impl FromRequest for SessionUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req).map(SessionUser))
    }
}
