use axum::extract::{FromRequest, FromRequestParts};

use crate::util::error::HandlerError;

/// `Json` whose rejections are reported as a JSON `HandlerError`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(HandlerError))]
pub struct ApiJson<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(HandlerError))]
pub struct ApiQuery<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(HandlerError))]
pub struct ApiPath<T>(pub T);
