use std::net::{TcpListener, TcpStream};
use std::time::Duration;

use pharma_engine::{FailureKind, ProductRecord, ReqwestSearchClient, SearchClient, SearchSettings};
use pretty_assertions::assert_eq;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ReqwestSearchClient {
    client_with(SearchSettings {
        base_url: server.uri(),
        ..SearchSettings::default()
    })
}

fn client_with(settings: SearchSettings) -> ReqwestSearchClient {
    ReqwestSearchClient::new(settings).expect("client builds")
}

#[tokio::test]
async fn search_returns_products_in_response_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/buscar_productos"))
        .and(query_param("keyword", "jabon dove"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"productos":[
                {"name":"Jabon Dove","offerPrice":"S/ 15","regularPrice":"S/ 20",
                 "imageUrl":"https://img/dove.jpg","link":"https://inka/dove","pharmacy":"Inkafarma"},
                {"nombre":"Jabon Nivea","precio_oferta":"S/ 8","precio_regular":"No disponible",
                 "imagen":"https://img/nivea.jpg","link":"https://mifa/nivea","farmacia":"Mifarma"}
            ]}"#,
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let records = client_for(&server).search("  jabon dove ").await.expect("search ok");

    assert_eq!(
        records,
        vec![
            ProductRecord {
                name: "Jabon Dove".to_string(),
                offer_price: "S/ 15".to_string(),
                regular_price: "S/ 20".to_string(),
                image_url: "https://img/dove.jpg".to_string(),
                link: "https://inka/dove".to_string(),
                pharmacy: "Inkafarma".to_string(),
            },
            ProductRecord {
                name: "Jabon Nivea".to_string(),
                offer_price: "S/ 8".to_string(),
                regular_price: "No disponible".to_string(),
                image_url: "https://img/nivea.jpg".to_string(),
                link: "https://mifa/nivea".to_string(),
                pharmacy: "Mifarma".to_string(),
            },
        ]
    );
}

#[tokio::test]
async fn missing_product_array_is_empty_not_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/buscar_productos"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"{"mensaje":"sin resultados"}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let records = client_for(&server).search("xyz").await.expect("search ok");
    assert!(records.is_empty());
}

#[tokio::test]
async fn blank_keyword_never_reaches_the_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    for keyword in ["", "   ", "\t\n"] {
        let err = client.search(keyword).await.unwrap_err();
        assert_eq!(err.kind, FailureKind::EmptyKeyword);
    }
}

#[tokio::test]
async fn server_error_carries_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/buscar_productos"))
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server).search("alcohol").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(502));
}

#[tokio::test]
async fn slow_response_times_out_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/buscar_productos"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_string(r#"{"productos":[]}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_with(SearchSettings {
        base_url: server.uri(),
        request_timeout: Duration::from_millis(50),
        ..SearchSettings::default()
    });

    let err = client.search("vitamina c").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn unreachable_host_is_network_failure() {
    let client = client_with(SearchSettings {
        base_url: "http://127.0.0.1:1".to_string(),
        connect_timeout: Duration::from_secs(2),
        ..SearchSettings::default()
    });

    let err = client.search("gasas").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Network);
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/buscar_productos"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"productos":[{"name":"x"}]}"#))
        .mount(&server)
        .await;

    let client = client_with(SearchSettings {
        base_url: server.uri(),
        max_bytes: 10,
        ..SearchSettings::default()
    });

    let err = client.search("x").await.unwrap_err();
    assert!(matches!(err.kind, FailureKind::TooLarge { max_bytes: 10, .. }));
}

/// Listener that never accepts, with its accept queue saturated so new connects hang.
fn stalled_listener() -> (TcpListener, Vec<TcpStream>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind listener");
    let addr = listener.local_addr().expect("listener address");
    let mut held = Vec::new();
    for _ in 0..1024 {
        match TcpStream::connect_timeout(&addr, Duration::from_millis(100)) {
            Ok(stream) => held.push(stream),
            Err(_) => break,
        }
    }
    (listener, held)
}

#[tokio::test]
async fn connect_timeout_is_network_failure_not_timeout() {
    let (listener, _held) = stalled_listener();
    let addr = listener.local_addr().expect("listener address");

    let client = client_with(SearchSettings {
        base_url: format!("http://{addr}"),
        connect_timeout: Duration::from_millis(300),
        ..SearchSettings::default()
    });

    let err = tokio::time::timeout(Duration::from_secs(10), client.search("jabon"))
        .await
        .expect("connect attempt gives up well before the request budget")
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Network);
}
