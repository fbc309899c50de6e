use std::io::{self, Read};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use inbound::{BodyError, BodyStream, Exchange, Request, RequestError, RouteConfig};

fn exchange(method: &str, uri: &str) -> Exchange {
    Exchange::builder().method(method).uri(uri).build().unwrap()
}

fn with_body(method: &str, uri: &str, body: &'static str) -> Exchange {
    Exchange::builder()
        .method(method)
        .uri(uri)
        .body(BodyStream::once(body))
        .build()
        .unwrap()
}

#[test]
fn body_is_captured_for_body_carrying_methods() {
    for method in ["POST", "PUT", "PATCH"] {
        let route = RouteConfig::new();
        let request = Request::new(&route, with_body(method, "/submit", "hello")).unwrap();

        assert_eq!(request.method().as_str(), method);
        assert_eq!(request.raw_body().unwrap().as_ref(), b"hello");
    }
}

#[test]
fn body_is_absent_for_other_methods() {
    for method in ["GET", "DELETE", "OPTIONS", "HEAD", "TRACE", "CONNECT"] {
        let route = RouteConfig::new();
        // A body is attached, but these methods never read it.
        let request = Request::new(&route, with_body(method, "/", "ignored")).unwrap();

        assert!(matches!(request.raw_body(), Err(BodyError::Unavailable)));
        assert!(matches!(request.body(), Err(BodyError::Unavailable)));
    }
}

#[test]
fn unknown_method_fails_construction() {
    let route = RouteConfig::new();

    match Request::new(&route, exchange("BREW", "/")) {
        Err(RequestError::UnsupportedMethod(token)) => assert_eq!(token.as_str(), "BREW"),
        other => panic!("expected UnsupportedMethod, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn method_tokens_are_case_sensitive() {
    let route = RouteConfig::new();
    assert!(matches!(
        Request::new(&route, exchange("get", "/")),
        Err(RequestError::UnsupportedMethod(_))
    ));
}

struct FailingBody;

impl Read for FailingBody {
    fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::ConnectionReset, "peer went away"))
    }
}

#[test]
fn body_read_failure_aborts_construction() {
    let route = RouteConfig::new();
    let exchange = Exchange::builder()
        .method("POST")
        .uri("/submit")
        .body(BodyStream::stream(FailingBody))
        .build()
        .unwrap();

    assert!(matches!(
        Request::new(&route, exchange),
        Err(RequestError::BodyRead(_))
    ));
}

#[test]
fn bodyless_methods_never_touch_the_stream() {
    let route = RouteConfig::new();
    let exchange = Exchange::builder()
        .method("GET")
        .body(BodyStream::stream(FailingBody))
        .build()
        .unwrap();

    assert!(Request::new(&route, exchange).is_ok());
}

#[test]
fn body_decodes_as_utf8() {
    let route = RouteConfig::new();
    let request = Request::new(&route, with_body("POST", "/", "héllo")).unwrap();

    assert_eq!(request.body().unwrap(), "héllo");
}

#[test]
fn invalid_utf8_is_replaced_not_rejected() {
    let route = RouteConfig::new();
    let exchange = Exchange::builder()
        .method("POST")
        .body(BodyStream::once(vec![0x68, 0x69, 0xff]))
        .build()
        .unwrap();
    let request = Request::new(&route, exchange).unwrap();

    assert_eq!(request.body().unwrap(), "hi\u{fffd}");
}

#[cfg(feature = "json")]
#[test]
fn json_body_round_trips() {
    let route = RouteConfig::new();
    let request =
        Request::new(&route, with_body("POST", "/", r#"{"name":"ada","id":42}"#)).unwrap();

    let value = request.body_as_json().unwrap();
    assert_eq!(value["name"], "ada");
    assert_eq!(value["id"], 42);

    #[derive(serde::Deserialize, PartialEq, Debug)]
    struct User {
        name: String,
        id: u32,
    }

    let user: User = request.json().unwrap();
    assert_eq!(
        user,
        User {
            name: "ada".to_owned(),
            id: 42
        }
    );
}

#[cfg(feature = "json")]
#[test]
fn malformed_json_reports_the_parse_error() {
    let route = RouteConfig::new();
    let request = Request::new(&route, with_body("POST", "/", "{not json")).unwrap();

    assert!(matches!(
        request.body_as_json(),
        Err(BodyError::MalformedJson(_))
    ));
}

#[cfg(feature = "json")]
#[test]
fn json_needs_a_captured_body() {
    let route = RouteConfig::new();
    let request = Request::new(&route, exchange("GET", "/")).unwrap();

    assert!(matches!(request.body_as_json(), Err(BodyError::Unavailable)));
}

#[test]
fn path_and_host_come_from_the_uri() {
    let route = RouteConfig::new();

    let request = Request::new(&route, exchange("GET", "http://example.com/users/42?x=1")).unwrap();
    assert_eq!(request.path(), "/users/42");
    assert_eq!(request.host(), Some("example.com"));

    let request = Request::new(&route, exchange("GET", "/users/42")).unwrap();
    assert_eq!(request.path(), "/users/42");
    assert_eq!(request.host(), None);
}

#[test]
fn remote_ip_is_optional() {
    let route = RouteConfig::new();

    let addr: SocketAddr = "127.0.0.1:4000".parse().unwrap();
    let exchange_with_peer = Exchange::builder().remote_addr(addr).build().unwrap();
    let request = Request::new(&route, exchange_with_peer).unwrap();
    assert_eq!(request.ip(), Some(IpAddr::V4(Ipv4Addr::LOCALHOST)));

    let request = Request::new(&route, exchange("GET", "/")).unwrap();
    assert_eq!(request.ip(), None);
}

#[test]
fn query_params_preserve_order_and_duplicates() {
    let route = RouteConfig::new();
    let request = Request::new(&route, exchange("GET", "/search?a=1&b=2&a=3")).unwrap();

    let params = request.query_params();
    let pairs: Vec<_> = params.iter().map(|p| (p.key(), p.value())).collect();
    assert_eq!(pairs, [("a", "1"), ("b", "2"), ("a", "3")]);
}

#[test]
fn malformed_query_tokens_are_dropped() {
    let route = RouteConfig::new();
    let request = Request::new(&route, exchange("GET", "/search?a=1&bad&c=3")).unwrap();

    let params = request.query_params();
    let pairs: Vec<_> = params.iter().map(|p| (p.key(), p.value())).collect();
    assert_eq!(pairs, [("a", "1"), ("c", "3")]);
}

#[test]
fn missing_query_component_yields_no_params() {
    let route = RouteConfig::new();
    let request = Request::new(&route, exchange("GET", "/search")).unwrap();

    assert!(request.query_params().is_empty());
}

#[test]
fn query_params_filter_by_exact_key() {
    let route = RouteConfig::new();
    let request = Request::new(&route, exchange("GET", "/search?a=1&b=2&a=3")).unwrap();

    let named = request.query_params_named("a");
    let values: Vec<_> = named.iter().map(|p| p.value()).collect();
    assert_eq!(values, ["1", "3"]);

    assert_eq!(request.first_query_param("a").unwrap().value(), "1");
    assert!(request.first_query_param("zzz").is_none());
}

#[test]
fn route_param_extracts_by_position() {
    let route = RouteConfig::new().param("id", 2);
    let request = Request::new(&route, exchange("GET", "/users/42/profile")).unwrap();

    assert_eq!(request.route_param("id"), Some("42"));
}

#[test]
fn route_param_tolerates_short_paths() {
    let route = RouteConfig::new().param("id", 2);
    let request = Request::new(&route, exchange("GET", "/users")).unwrap();

    assert_eq!(request.route_param("id"), None);
}

#[test]
fn route_param_unknown_name_is_absent() {
    let route = RouteConfig::new().param("id", 2);
    let request = Request::new(&route, exchange("GET", "/users/42/profile")).unwrap();

    assert_eq!(request.route_param("post"), None);
}

#[test]
fn trailing_slash_adds_no_segment() {
    let route = RouteConfig::new().param("tail", 3);
    let request = Request::new(&route, exchange("GET", "/users/42/")).unwrap();

    assert_eq!(request.route_param("tail"), None);
}

#[test]
fn route_config_from_template() {
    let route = RouteConfig::from_template("/users/:id/posts/:post");
    assert_eq!(route.param_index("id"), Some(2));
    assert_eq!(route.param_index("post"), Some(4));
    assert_eq!(route.param_index("users"), None);

    let request = Request::new(&route, exchange("GET", "/users/7/posts/9")).unwrap();
    assert_eq!(request.route_param("id"), Some("7"));
    assert_eq!(request.route_param("post"), Some("9"));
}

#[test]
fn cookies_concatenate_across_headers() {
    let route = RouteConfig::new();
    let exchange = Exchange::builder()
        .header("Cookie", "x=1; y=2")
        .header("Cookie", "z=3")
        .build()
        .unwrap();
    let request = Request::new(&route, exchange).unwrap();

    let cookies = request.cookies();
    let pairs: Vec<_> = cookies.iter().map(|c| (c.name(), c.value())).collect();
    assert_eq!(pairs, [("x", "1"), ("y", "2"), ("z", "3")]);
}

#[test]
fn headers_flatten_in_received_order() {
    let route = RouteConfig::new();
    let exchange = Exchange::builder()
        .header("Accept", "text/html")
        .header("X-Tag", "a")
        .header("X-Tag", "b")
        .build()
        .unwrap();
    let request = Request::new(&route, exchange).unwrap();

    let headers = request.headers();
    let pairs: Vec<_> = headers.iter().map(|h| (h.name(), h.value())).collect();
    assert_eq!(
        pairs,
        [("Accept", "text/html"), ("X-Tag", "a"), ("X-Tag", "b")]
    );

    assert_eq!(request.headers_named("X-Tag").len(), 2);
    assert_eq!(request.first_header("X-Tag").unwrap().value(), "a");
}

#[test]
fn header_lookup_is_byte_exact() {
    let route = RouteConfig::new();
    let exchange = Exchange::builder()
        .header("X-Tag", "a")
        .build()
        .unwrap();
    let request = Request::new(&route, exchange).unwrap();

    assert!(request.first_header("x-tag").is_none());
    assert!(request.headers_named("x-tag").is_empty());
}

#[test]
fn content_type_comes_from_the_first_matching_header() {
    let route = RouteConfig::new();
    let exchange = Exchange::builder()
        .header("Content-Type", "application/json; charset=utf-8")
        .header("Content-Type", "text/plain")
        .build()
        .unwrap();
    let request = Request::new(&route, exchange).unwrap();

    let content_type = request.content_type().unwrap();
    assert_eq!(content_type.as_str(), "application/json; charset=utf-8");
    assert!(content_type.is_json());
}

#[test]
fn content_type_is_absent_without_the_header() {
    let route = RouteConfig::new();
    let request = Request::new(&route, exchange("GET", "/")).unwrap();

    assert!(request.content_type().is_none());
}

#[test]
fn attributes_overwrite_and_remove() {
    let route = RouteConfig::new();
    let mut request = Request::new(&route, exchange("GET", "/")).unwrap();

    request.set_attribute("user", "ada".to_owned());
    request.set_attribute("user", "grace".to_owned());
    assert!(request.has_attribute("user"));
    assert_eq!(request.attribute::<String>("user").unwrap(), "grace");

    assert!(request.remove_attribute("user"));
    assert!(!request.remove_attribute("user"));
    assert!(!request.has_attribute("user"));
    assert!(request.attribute::<String>("missing").is_none());
}

#[test]
fn attributes_read_back_by_type() {
    let route = RouteConfig::new();
    let mut request = Request::new(&route, exchange("GET", "/")).unwrap();

    request.set_attribute("count", 3u32);
    assert_eq!(request.attribute::<u32>("count"), Some(&3));
    assert!(request.attribute::<String>("count").is_none());
}
