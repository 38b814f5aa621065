//! HTCPCP route set: the alternates index and the per-pot brew endpoint.

use std::sync::Arc;

use httpot::router::HandlerError;
use httpot::{HandlerRequest, ResponseHeader, RouteResponse, Router};

use crate::pot::{self, Pot};

/// Protocol string stamped on every pot response.
pub const POT_PROTOCOL: &str = "HTCPCP/1.0";

/// Build the coffee-pot router over a fixed set of pots.
///
/// `BREW /` returns the alternates index; `BREW` and `POST` on
/// `/pot-:id:/:type:` drive brewing. Routes are registered under the
/// transport's default protocol so standard clients reach them; the
/// responses themselves announce `HTCPCP/1.0`.
pub fn build_router(pots: Vec<Pot>) -> Router {
    let pots = Arc::new(pots);
    let mut router = Router::new();

    let index_pots = pots.clone();
    router.add_route("BREW", "/", move |_| Ok(index(&index_pots)));

    let brew_pots = pots.clone();
    router.add_route("BREW", "/pot-:id:/:type:", move |request| {
        brew(&brew_pots, request)
    });
    let brew_pots = pots;
    router.add_route("POST", "/pot-:id:/:type:", move |request| {
        brew(&brew_pots, request)
    });

    router
}

fn pot_response(status_code: u16, body: Option<String>) -> RouteResponse {
    RouteResponse {
        header: ResponseHeader::new()
            .set_protocol(POT_PROTOCOL)
            .set_status_code(status_code),
        body,
    }
}

/// `300` with an `Alternates` header listing every pot/type endpoint.
fn index(pots: &[Pot]) -> RouteResponse {
    RouteResponse {
        header: ResponseHeader::new()
            .set_protocol(POT_PROTOCOL)
            .set_status_code(300)
            .add_header("Alternates", &alternates_header(pots)),
        body: None,
    }
}

fn alternates_header(pots: &[Pot]) -> String {
    let mut lines = vec!["{\"/\" {type message/coffeepot}}".to_string()];
    for (i, pot) in pots.iter().enumerate() {
        for brew_type in pot.types() {
            let mime = if brew_type == "coffee" {
                "message/coffeepot"
            } else {
                "message/teapot"
            };
            lines.push(format!("{{\"/pot-{i}/{brew_type}\" {{type {mime}}}}}"));
        }
    }
    lines.join(", ")
}

/// Brew endpoint.
///
/// Accepts body `start` or `stop`. Additions come from the
/// `Accept-Additions` header (semicolon-separated, unknown names
/// dropped). `Content-Type: message/coffeepot` against a pot that cannot
/// brew coffee is answered with `418`. A `stop` with no brew in progress
/// fails, which the server reports as a `500`.
fn brew(pots: &[Pot], request: HandlerRequest) -> Result<RouteResponse, HandlerError> {
    let params = request.params.unwrap_or_default();
    let id = params.get("id").and_then(|v| v.parse::<usize>().ok());
    let brew_type = params.get("type");

    let (Some(id), Some(brew_type)) = (id, brew_type) else {
        return Ok(pot_response(
            400,
            Some(serde_json::json!({"message": "Invalid or missing param"}).to_string()),
        ));
    };

    let Some(pot) = pots.get(id) else {
        return Ok(pot_response(404, Some("No such pot".to_string())));
    };

    if request.headers.get("Content-Type") == Some("message/coffeepot") && !pot.supports("coffee") {
        return Ok(pot_response(418, Some("I'm a teapot".to_string())));
    }

    if !pot.supports(brew_type) {
        return Ok(pot_response(406, Some("Invalid type".to_string())));
    }

    match request.body.as_deref() {
        Some("start") => {
            let additions = request
                .headers
                .get("Accept-Additions")
                .map(|value| {
                    value
                        .split(';')
                        .map(str::trim)
                        .filter(|a| pot::is_known_addition(a))
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default();
            pot.start(additions);
            Ok(pot_response(200, Some("Started brewing".to_string())))
        }
        Some("stop") => {
            pot.stop()?;
            Ok(pot_response(200, Some("Stopped brewing".to_string())))
        }
        _ => Ok(pot_response(400, Some("Invalid body".to_string()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpot::HeaderMap;

    fn demo_pots() -> Vec<Pot> {
        vec![
            Pot::new(&["coffee", "tea"], &["Cream", "Sugar"]),
            Pot::new(&["tea"], &["Sugar"]),
        ]
    }

    fn post(
        router: &Router,
        path: &str,
        headers: HeaderMap,
        body: &str,
    ) -> Result<httpot::RouterResponse, HandlerError> {
        router.handle_route("POST", "HTTP/1.0", path, headers, Some(body.to_string()))
    }

    #[test]
    fn index_lists_alternates() {
        let router = build_router(demo_pots());
        let response = router
            .handle_route("BREW", "HTTP/1.0", "/", HeaderMap::new(), None)
            .unwrap();
        assert_eq!(response.header.status_code(), 300);
        let alternates = response.header.header("Alternates").expect("header");
        assert!(alternates.contains("{\"/pot-0/coffee\" {type message/coffeepot}}"));
        assert!(alternates.contains("{\"/pot-1/tea\" {type message/teapot}}"));
    }

    #[test]
    fn start_then_stop_brewing() {
        let router = build_router(demo_pots());
        let response = post(&router, "/pot-0/coffee", HeaderMap::new(), "start").unwrap();
        assert_eq!(response.header.status_code(), 200);
        assert_eq!(response.body.as_deref(), Some(b"Started brewing".as_slice()));

        let response = post(&router, "/pot-0/coffee", HeaderMap::new(), "stop").unwrap();
        assert_eq!(response.header.status_code(), 200);
        assert_eq!(response.body.as_deref(), Some(b"Stopped brewing".as_slice()));
    }

    #[test]
    fn stop_before_start_is_a_fault() {
        let router = build_router(demo_pots());
        assert!(post(&router, "/pot-1/tea", HeaderMap::new(), "stop").is_err());
    }

    #[test]
    fn teapot_refuses_coffeepot_messages() {
        let router = build_router(demo_pots());
        let mut headers = HeaderMap::new();
        headers.insert("Content-Type", "message/coffeepot");
        let response = post(&router, "/pot-1/coffee", headers, "start").unwrap();
        assert_eq!(response.header.status_code(), 418);
        assert_eq!(response.body.as_deref(), Some(b"I'm a teapot".as_slice()));
    }

    #[test]
    fn unsupported_type_yields_406() {
        let router = build_router(demo_pots());
        let response = post(&router, "/pot-0/cocoa", HeaderMap::new(), "start").unwrap();
        assert_eq!(response.header.status_code(), 406);
    }

    #[test]
    fn invalid_body_yields_400() {
        let router = build_router(demo_pots());
        let response = post(&router, "/pot-0/coffee", HeaderMap::new(), "percolate").unwrap();
        assert_eq!(response.header.status_code(), 400);
    }

    #[test]
    fn unknown_pot_yields_404() {
        let router = build_router(demo_pots());
        let response = post(&router, "/pot-9/coffee", HeaderMap::new(), "start").unwrap();
        assert_eq!(response.header.status_code(), 404);
    }
}
