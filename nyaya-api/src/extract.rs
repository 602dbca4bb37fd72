//! Request extractors whose rejections use the JSON error envelope
//!
//! Thin wrappers over axum's `Json`, `Path` and `Query`. The status code of
//! the underlying rejection is preserved (422 for a well-formed body of the
//! wrong shape, 400 for a malformed id or body, 415 for a missing content type).

use axum::extract::{FromRequest, FromRequestParts};

use crate::ApiError;

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);
