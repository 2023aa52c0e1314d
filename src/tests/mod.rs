mod plan;
mod zone;

use crate::api::PiholeClient;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const SID: &str = "Op+J4qepBOs6PuM0YDOoxg=";

pub fn auth_response() -> Value {
    json!({
        "session": {
            "valid": true,
            "totp": false,
            "sid": SID,
            "csrf": "o0L+GeqnuMXJUbwmHKBNPw=",
            "validity": 1800,
            "message": "password correct"
        },
        "took": 0.03569769859313965
    })
}

/// Mounts a successful `/api/auth` expected to be hit `times` times.
pub async fn mock_auth(server: &MockServer, times: u64) {
    Mock::given(method("POST"))
        .and(path("/api/auth"))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_response()))
        .expect(times)
        .mount(server)
        .await;
}

pub fn hosts_body(hosts: &[&str]) -> Value {
    json!({ "config": { "dns": { "hosts": hosts } }, "took": 0.0003 })
}

pub fn cnames_body(cnames: &[&str]) -> Value {
    json!({ "config": { "dns": { "cnameRecords": cnames } }, "took": 0.0003 })
}

pub async fn mock_lists(server: &MockServer, hosts: &[&str], cnames: &[&str]) {
    Mock::given(method("GET"))
        .and(path("/api/config/dns/hosts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(hosts_body(hosts)))
        .expect(1)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/config/dns/cnameRecords"))
        .respond_with(ResponseTemplate::new(200).set_body_json(cnames_body(cnames)))
        .expect(1)
        .mount(server)
        .await;
}

pub fn client_for(server: &MockServer) -> PiholeClient {
    PiholeClient::new(&server.uri(), "password", None, true).unwrap()
}
