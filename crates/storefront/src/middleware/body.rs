//! Request body extractor accepting JSON or URL-encoded forms.

use axum::{
    Form, Json,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
};
use serde::de::DeserializeOwned;

use crate::error::{AppError, INVALID_BODY};

/// Deserializes the body as a form when the request says
/// `application/x-www-form-urlencoded`, and as JSON otherwise.
///
/// Any failure is rejected with a 400 [`AppError::BadRequest`].
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonOrForm<T>(pub T);

impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form(&req) {
            let Form(value) = Form::<T>::from_request(req, state).await.map_err(|e| {
                tracing::debug!(error = %e, "Rejected form body");
                AppError::BadRequest(INVALID_BODY.to_owned())
            })?;
            return Ok(Self(value));
        }

        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|e| {
            tracing::debug!(error = %e, "Rejected JSON body");
            AppError::BadRequest(INVALID_BODY.to_owned())
        })?;
        Ok(Self(value))
    }
}

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"))
}
