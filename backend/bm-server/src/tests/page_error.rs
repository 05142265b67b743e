use crate::handlers::error::PageError;

use bm_supabase::BackendError;

use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use googletest::assert_that;
use googletest::prelude::eq;

#[test]
fn given_unauthenticated_when_responded_then_redirect_to_login() {
    let response = PageError::unauthenticated().into_response();

    assert_that!(response.status(), eq(StatusCode::SEE_OTHER));
    assert_eq!(response.headers()[header::LOCATION], "/login");
}

#[test]
fn given_unauthorized_backend_error_when_converted_then_unauthenticated() {
    let error = PageError::from(BackendError::api(401, "invalid JWT"));

    assert!(matches!(error, PageError::Unauthenticated { .. }));
}

#[test]
fn given_backend_failure_when_responded_then_bad_gateway() {
    let error = PageError::from(BackendError::api(500, "boom"));

    let response = error.into_response();

    assert_that!(response.status(), eq(StatusCode::BAD_GATEWAY));
}
