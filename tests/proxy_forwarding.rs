//! End-to-end forwarding tests against a mock admin server.

use std::time::Duration;

use common::{http_client, proxy_config, start_programmable_backend, start_proxy, MockReply};

mod common;

#[tokio::test]
async fn test_ok_body_is_streamed_without_content_type() {
    let (backend, captured) = start_programmable_backend(|_| {
        MockReply::new(200, "ok").with_content_type("text/html; charset=ISO-8859-1")
    })
    .await;
    let (proxy, shutdown) = start_proxy(proxy_config(backend)).await;

    let res = http_client()
        .get(format!("http://{}/heatmap/fh/index.fhjsp", proxy))
        .send()
        .await
        .expect("Proxy unreachable");

    assert_eq!(res.status(), 200);
    assert!(res.headers().get("content-type").is_none());
    assert_eq!(res.text().await.unwrap(), "ok");

    let captured = captured.lock().unwrap();
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].request_line, "GET /heatmap/fh/index.jsp HTTP/1.1");

    shutdown.trigger();
}

#[tokio::test]
async fn test_content_type_propagation_when_enabled() {
    let (backend, _) = start_programmable_backend(|_| {
        MockReply::new(200, "<p>ok</p>").with_content_type("text/html; charset=utf-8")
    })
    .await;
    let mut config = proxy_config(backend);
    config.proxy.propagate_content_type = true;
    let (proxy, shutdown) = start_proxy(config).await;

    let res = http_client()
        .get(format!("http://{}/preview/page.fhjsp", proxy))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()["content-type"], "text/html; charset=utf-8");

    shutdown.trigger();
}

#[tokio::test]
async fn test_non_ok_status_is_relayed_without_body() {
    let (backend, _) = start_programmable_backend(|_| MockReply::new(404, "missing page")).await;
    let (proxy, shutdown) = start_proxy(proxy_config(backend)).await;

    let res = http_client()
        .get(format!("http://{}/preview/nothing.fhjsp", proxy))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 404);
    assert_eq!(res.text().await.unwrap(), "");

    shutdown.trigger();
}

#[tokio::test]
async fn test_server_error_status_is_relayed() {
    let (backend, _) = start_programmable_backend(|_| MockReply::new(503, "down")).await;
    let (proxy, shutdown) = start_proxy(proxy_config(backend)).await;

    let res = http_client()
        .get(format!("http://{}/heatmap", proxy))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 503);
    assert_eq!(res.text().await.unwrap(), "");

    shutdown.trigger();
}

#[tokio::test]
async fn test_query_string_is_rebuilt() {
    let (backend, captured) = start_programmable_backend(|_| MockReply::new(200, "")).await;
    let (proxy, shutdown) = start_proxy(proxy_config(backend)).await;

    let res = http_client()
        .get(format!(
            "http://{}/preview/a/b/page.fhjsp?b=2&a=hello%20world&b=3&path=%2Fcatalog01",
            proxy
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    let captured = captured.lock().unwrap();
    assert_eq!(
        captured[0].request_line,
        "GET /preview/a/b/page.jsp?b=2&a=hello+world&path=%2Fcatalog01 HTTP/1.1"
    );

    shutdown.trigger();
}

#[tokio::test]
async fn test_non_ajax_request_relays_no_headers() {
    let (backend, captured) = start_programmable_backend(|_| MockReply::new(200, "ok")).await;
    let (proxy, shutdown) = start_proxy(proxy_config(backend)).await;

    http_client()
        .get(format!("http://{}/heatmap/data.js", proxy))
        .header("X-Custom", "1")
        .header("User-Agent", "Mozilla/5.0")
        .header("Cookie", "JSESSIONID=abc")
        .send()
        .await
        .unwrap();

    let captured = captured.lock().unwrap();
    let names = captured[0].header_names();
    assert!(names.contains(&"host".to_string()));
    // only transport-level headers added by the client itself
    assert!(
        names.iter().all(|n| n == "host" || n == "content-length"),
        "unexpected headers relayed: {:?}",
        names
    );

    shutdown.trigger();
}

#[tokio::test]
async fn test_ajax_request_relays_allow_listed_headers() {
    let (backend, captured) = start_programmable_backend(|_| MockReply::new(200, "ok")).await;
    let (proxy, shutdown) = start_proxy(proxy_config(backend)).await;

    http_client()
        .get(format!("http://{}/heatmap/ajax", proxy))
        .header("X-Requested-With", "XMLHttpRequest")
        .header("User-Agent", "Mozilla/5.0")
        .header("Wicket-Ajax", "true")
        .header("Cookie", "JSESSIONID=abc")
        .header("Accept", "text/xml")
        .send()
        .await
        .unwrap();

    let captured = captured.lock().unwrap();
    let request = &captured[0];
    assert_eq!(request.header("x-requested-with"), Some("XMLHttpRequest"));
    assert_eq!(request.header("user-agent"), Some("Mozilla/5.0"));
    assert_eq!(request.header("wicket-ajax"), Some("true"));
    assert!(request.header("cookie").is_none());
    assert!(request.header("accept").is_none());
    // the proxy's own request ID stays local
    assert!(request.header("x-request-id").is_none());

    shutdown.trigger();
}

#[tokio::test]
async fn test_caller_request_id_is_relayed_unchanged() {
    let (backend, captured) = start_programmable_backend(|_| MockReply::new(200, "ok")).await;
    let (proxy, shutdown) = start_proxy(proxy_config(backend)).await;

    let res = http_client()
        .get(format!("http://{}/heatmap/ajax", proxy))
        .header("X-Requested-With", "XMLHttpRequest")
        .header("X-Request-Id", "caller-42")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()["x-request-id"], "caller-42");

    let captured = captured.lock().unwrap();
    assert_eq!(captured[0].header("x-request-id"), Some("caller-42"));

    shutdown.trigger();
}

#[tokio::test]
async fn test_trailing_slash_reaches_backend() {
    let (backend, captured) = start_programmable_backend(|_| MockReply::new(200, "ok")).await;
    let (proxy, shutdown) = start_proxy(proxy_config(backend)).await;

    let res = http_client()
        .get(format!("http://{}/heatmap/", proxy))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    let captured = captured.lock().unwrap();
    assert_eq!(captured[0].request_line, "GET /heatmap/ HTTP/1.1");

    shutdown.trigger();
}

#[tokio::test]
async fn test_drained_error_response_keeps_connection_pooled() {
    let (backend, captured) = start_programmable_backend(|request| {
        if request.target().starts_with("/preview/missing") {
            MockReply::new(404, "missing page").keep_alive()
        } else {
            MockReply::new(200, "ok").keep_alive()
        }
    })
    .await;
    let (proxy, shutdown) = start_proxy(proxy_config(backend)).await;
    let client = http_client();

    let res = client
        .get(format!("http://{}/preview/missing.fhjsp", proxy))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);
    assert_eq!(res.text().await.unwrap(), "");

    tokio::time::sleep(Duration::from_millis(50)).await;
    let res = client
        .get(format!("http://{}/preview/page.fhjsp", proxy))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    let captured = captured.lock().unwrap();
    assert_eq!(captured.len(), 2);
    assert_eq!(captured[0].connection, captured[1].connection);

    shutdown.trigger();
}

#[tokio::test]
async fn test_oversized_error_body_is_discarded() {
    let (backend, captured) = start_programmable_backend(|request| {
        if request.target().starts_with("/preview/huge") {
            MockReply::new(500, "e".repeat(256 * 1024)).keep_alive()
        } else {
            MockReply::new(200, "ok").keep_alive()
        }
    })
    .await;
    let (proxy, shutdown) = start_proxy(proxy_config(backend)).await;
    let client = http_client();

    let res = client
        .get(format!("http://{}/preview/huge", proxy))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 500);
    assert_eq!(res.text().await.unwrap(), "");

    let res = client
        .get(format!("http://{}/preview/after", proxy))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "ok");

    let captured = captured.lock().unwrap();
    assert_eq!(captured.len(), 2);
    assert_ne!(captured[0].connection, captured[1].connection);

    shutdown.trigger();
}

#[tokio::test]
async fn test_truncated_body_does_not_poison_later_requests() {
    let (backend, captured) = start_programmable_backend(|request| {
        if request.target().starts_with("/heatmap/broken") {
            MockReply::new(200, "x".repeat(100)).truncated_to(10)
        } else {
            MockReply::new(200, "ok")
        }
    })
    .await;
    let (proxy, shutdown) = start_proxy(proxy_config(backend)).await;
    let client = http_client();

    let res = client
        .get(format!("http://{}/heatmap/broken", proxy))
        .send()
        .await;
    let complete = match res {
        Ok(res) => matches!(res.bytes().await, Ok(body) if body.len() == 100),
        Err(_) => false,
    };
    assert!(!complete, "a cut-off backend body must not reach the caller whole");

    let res = client
        .get(format!("http://{}/heatmap/next", proxy))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "ok");

    assert_eq!(captured.lock().unwrap().len(), 2);

    shutdown.trigger();
}

#[tokio::test]
async fn test_basic_auth_on_every_call() {
    let (backend, captured) = start_programmable_backend(|_| MockReply::new(200, "ok")).await;
    let mut config = proxy_config(backend);
    config.backend.username = Some("admin".into());
    config.backend.password = Some("secret".into());
    let (proxy, shutdown) = start_proxy(config).await;

    let client = http_client();
    for path in ["/heatmap/one", "/preview/two"] {
        let res = client
            .get(format!("http://{}{}", proxy, path))
            .header("Authorization", "Bearer caller-token")
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 200);
    }

    let captured = captured.lock().unwrap();
    assert_eq!(captured.len(), 2);
    for request in captured.iter() {
        assert_eq!(request.header("authorization"), Some("Basic YWRtaW46c2VjcmV0"));
    }

    shutdown.trigger();
}

#[tokio::test]
async fn test_empty_username_sends_no_credentials() {
    let (backend, captured) = start_programmable_backend(|_| MockReply::new(200, "ok")).await;
    let mut config = proxy_config(backend);
    config.backend.username = Some(String::new());
    let (proxy, shutdown) = start_proxy(config).await;

    http_client()
        .get(format!("http://{}/heatmap/x", proxy))
        .send()
        .await
        .unwrap();

    let captured = captured.lock().unwrap();
    assert!(captured[0].header("authorization").is_none());

    shutdown.trigger();
}

#[tokio::test]
async fn test_only_get_is_proxied() {
    let (backend, captured) = start_programmable_backend(|_| MockReply::new(200, "ok")).await;
    let (proxy, shutdown) = start_proxy(proxy_config(backend)).await;

    let client = http_client();
    let res = client
        .post(format!("http://{}/heatmap/x", proxy))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 405);

    let res = client
        .get(format!("http://{}/elsewhere/x", proxy))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);

    assert!(captured.lock().unwrap().is_empty());

    shutdown.trigger();
}
