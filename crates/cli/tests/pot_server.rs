//! End-to-end pot control over the real transport.

use httpot::{RequestOptions, Server, request};
use httpot_cli::{Pot, build_router};

fn demo_pots() -> Vec<Pot> {
    vec![
        Pot::new(&["coffee", "tea"], &["Cream", "Sugar"]),
        Pot::new(&["tea"], &["Sugar"]),
    ]
}

fn brew_request(body: &str) -> RequestOptions {
    let mut options = RequestOptions::new("POST");
    options.body = Some(body.to_string());
    options
}

#[test]
fn brew_lifecycle_over_the_wire() {
    let mut server = Server::new("127.0.0.1:18090", build_router(demo_pots()));
    server.start().expect("server start");

    let url = "http://127.0.0.1:18090/pot-0/coffee";

    let response = request(url, &brew_request("start")).expect("start response");
    assert_eq!(response.status_code, 200);
    assert_eq!(response.protocol, "HTCPCP/1.0");
    assert_eq!(response.body, "Started brewing");

    let response = request(url, &brew_request("stop")).expect("stop response");
    assert_eq!(response.status_code, 200);
    assert_eq!(response.body, "Stopped brewing");

    server.stop();
}

#[test]
fn stop_before_start_reports_500() {
    let mut server = Server::new("127.0.0.1:18091", build_router(demo_pots()));
    server.start().expect("server start");

    let url = "http://127.0.0.1:18091/pot-1/tea";
    let response = request(url, &brew_request("stop")).expect("response");
    assert_eq!(response.status_code, 500);
    assert_eq!(response.body, "");

    server.stop();
}

#[test]
fn index_advertises_alternates() {
    let mut server = Server::new("127.0.0.1:18092", build_router(demo_pots()));
    server.start().expect("server start");

    let response = request(
        "http://127.0.0.1:18092/",
        &RequestOptions::new("BREW"),
    )
    .expect("response");

    assert_eq!(response.status_code, 300);
    let alternates = response.headers.get("Alternates").expect("header");
    assert!(alternates.contains("/pot-0/coffee"));
    assert!(alternates.contains("/pot-1/tea"));

    server.stop();
}

#[test]
fn teapot_discrimination_over_the_wire() {
    let mut server = Server::new("127.0.0.1:18093", build_router(demo_pots()));
    server.start().expect("server start");

    let mut options = brew_request("start");
    options
        .headers
        .push(("Content-Type".to_string(), "message/coffeepot".to_string()));
    let response = request("http://127.0.0.1:18093/pot-1/coffee", &options).expect("response");

    assert_eq!(response.status_code, 418);
    assert_eq!(response.body, "I'm a teapot");

    server.stop();
}
