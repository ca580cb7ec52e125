//! Steps shared by every clinic HTTP feature.

use actix_web::http::Method;
use rstest_bdd_macros::{given, then};
use serde_json::Value;

use crate::harness::{
    PASSWORD, RequestSpec, SharedWorld, WorldFixture, perform_json_request, sign_in,
};

pub(crate) fn error_message(world: &SharedWorld) -> Option<String> {
    world
        .borrow()
        .last_body
        .as_ref()
        .and_then(|body| body.get("message"))
        .and_then(Value::as_str)
        .map(str::to_owned)
}

pub(crate) fn list_doctors(world: &SharedWorld, query: &str) {
    let path = format!("/api/v1/admin/doctors{query}");
    perform_json_request(
        world,
        RequestSpec {
            method: Method::GET,
            path: &path,
            payload: None,
            label: "roster request",
        },
    );
}

#[given("a running clinic server")]
fn a_running_clinic_server(world: &WorldFixture) {
    let _ = world;
}

#[given("the client is signed in as {email}")]
fn the_client_is_signed_in_as(world: &WorldFixture, email: String) {
    let world = world.world();
    sign_in(&world, &email, PASSWORD);
    assert_eq!(world.borrow().last_status, Some(200), "sign-in as {email}");
    assert!(world.borrow().session_cookie.is_some(), "session cookie");
}

#[then("the response status is {status}")]
fn the_response_status_is(world: &WorldFixture, status: u16) {
    assert_eq!(world.world().borrow().last_status, Some(status));
}

#[then("the error message is {message}")]
fn the_error_message_is(world: &WorldFixture, message: String) {
    assert_eq!(error_message(&world.world()), Some(message));
}
