use axum::{
    body::Body,
    extract::connect_info::MockConnectInfo,
    http::{Request, StatusCode},
    Router,
};
use bytes::Bytes;
use futures_util::StreamExt;
use robot_panel::{
    web::create_app, AirQualityReading, AppState, EnvReading, FrameBuffer, SensorRecord,
    SensorStore, WebConfig,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tower::ServiceExt;

fn test_state() -> AppState {
    AppState::new(SensorStore::new(), Arc::new(FrameBuffer::new()))
}

fn test_app(state: AppState) -> Router {
    let addr: SocketAddr = "127.0.0.1:4242".parse().unwrap();
    create_app(&WebConfig::default(), state).layer(MockConnectInfo(addr))
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn reference_record() -> SensorRecord {
    SensorRecord {
        bme280: Some(EnvReading {
            temperature_c: 22.5,
            humidity_pct: 41.3,
            pressure_hpa: 1013,
        }),
        ens160: Some(AirQualityReading {
            aqi: 42,
            tvoc_ppb: 120,
            eco2_ppm: 450,
        }),
        ts: Some(1723021200.0),
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle)
}

/// Before the first successful poll, the API serves the empty record.
#[tokio::test]
async fn sensors_api_is_all_nulls_at_startup() {
    let response = test_app(test_state())
        .oneshot(get_request("/api/sensors"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"bme280": null, "ens160": null, "ts": null})
    );
}

/// After a poll cycle the API serves exactly that cycle's readings and
/// timestamp.
#[tokio::test]
async fn sensors_api_serves_the_exact_poll_cycle_values() {
    let state = test_state();
    state.store.replace(reference_record()).await;

    let response = test_app(state)
        .oneshot(get_request("/api/sensors"))
        .await
        .unwrap();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "bme280": {"temperature_c": 22.5, "humidity_pct": 41.3, "pressure_hpa": 1013},
            "ens160": {"aqi": 42, "tvoc_ppb": 120, "eco2_ppm": 450},
            "ts": 1723021200.0
        })
    );
}

#[tokio::test]
async fn unknown_path_returns_404() {
    let response = test_app(test_state())
        .oneshot(get_request("/unknown"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Two stream clients woken by the same publish both receive the same frame.
#[tokio::test]
async fn two_stream_clients_receive_the_same_frame() {
    let state = test_state();
    let frames = state.frames.clone();
    let app = test_app(state);

    let first = app
        .clone()
        .oneshot(get_request("/stream.mjpg"))
        .await
        .unwrap();
    let second = app.oneshot(get_request("/stream.mjpg")).await.unwrap();
    let mut first_body = first.into_body().into_data_stream();
    let mut second_body = second.into_body().into_data_stream();

    frames.publish(Bytes::from_static(b"shared-frame"));

    let a = first_body.next().await.unwrap().unwrap();
    let b = second_body.next().await.unwrap().unwrap();
    assert_eq!(a, b);
    assert!(a.ends_with(b"shared-frame\r\n"));
}

/// A stream client that abruptly closes its socket takes down only its own
/// handler; the server keeps answering other clients.
#[tokio::test]
async fn stream_client_disconnect_leaves_the_server_running() {
    let store = SensorStore::new();
    let frames = Arc::new(FrameBuffer::new());
    let app = create_app(
        &WebConfig::default(),
        AppState::new(store.clone(), frames.clone()),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .unwrap();
    });

    // Keep frames flowing so the stream handler has parts to write.
    let feeder = {
        let frames = frames.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_millis(10));
            loop {
                ticker.tick().await;
                frames.publish(Bytes::from_static(b"\xFF\xD8test"));
            }
        })
    };

    // First client: open the stream, read until a frame part arrives, then
    // drop the socket without any goodbye.
    {
        let mut socket = TcpStream::connect(addr).await.unwrap();
        socket
            .write_all(b"GET /stream.mjpg HTTP/1.1\r\nHost: panel\r\n\r\n")
            .await
            .unwrap();

        let mut collected = Vec::new();
        let mut buf = [0u8; 4096];
        timeout(Duration::from_secs(5), async {
            while !contains(&collected, b"--FRAME") {
                let n = socket.read(&mut buf).await.unwrap();
                assert!(n > 0, "server closed the stream early");
                collected.extend_from_slice(&buf[..n]);
            }
        })
        .await
        .unwrap();

        assert!(contains(&collected, b"200 OK"));
        assert!(contains(
            &collected,
            b"multipart/x-mixed-replace; boundary=FRAME"
        ));
    }

    // Let the server notice the dead connection.
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(!server.is_finished(), "server died with the stream client");

    // Second client: the JSON endpoint still answers.
    store.replace(reference_record()).await;
    let mut socket = TcpStream::connect(addr).await.unwrap();
    socket
        .write_all(b"GET /api/sensors HTTP/1.1\r\nHost: panel\r\nConnection: close\r\n\r\n")
        .await
        .unwrap();
    let mut response = Vec::new();
    timeout(Duration::from_secs(5), socket.read_to_end(&mut response))
        .await
        .unwrap()
        .unwrap();

    let text = String::from_utf8_lossy(&response);
    assert!(text.contains("200 OK"));
    assert!(text.contains("\"temperature_c\":22.5"));

    feeder.abort();
    server.abort();
}
