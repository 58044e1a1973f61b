//! HTTP handlers for the panel endpoints.

use crate::camera::buffer::FrameBuffer;
use crate::telemetry::store::SensorStore;
use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json, Response},
};
use bytes::{BufMut, Bytes, BytesMut};
use futures_util::stream;
use std::convert::Infallible;
use std::fmt::Write as _;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, info};

/// Shared state injected into every handler: the two producer-owned cells.
///
/// Handlers only ever read from these; the poll loop and the camera encoder
/// are the sole writers.
#[derive(Clone)]
pub struct AppState {
    /// Latest combined sensor snapshot
    pub store: SensorStore,
    /// Latest encoded camera frame
    pub frames: Arc<FrameBuffer>,
}

impl AppState {
    /// Bundle the two shared cells for the router.
    pub fn new(store: SensorStore, frames: Arc<FrameBuffer>) -> Self {
        Self { store, frames }
    }
}

/// Serve the embedded panel page.
pub async fn index() -> Html<&'static str> {
    Html(PANEL_HTML)
}

/// Serve the current sensor snapshot as JSON.
///
/// The body is one atomic snapshot; sub-readings that have not been produced
/// yet serialize as `null`.
pub async fn sensors(State(state): State<AppState>) -> Response {
    let record = state.store.snapshot().await;
    (
        [
            (header::CONTENT_TYPE, "application/json; charset=utf-8"),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        Json(record),
    )
        .into_response()
}

/// Serve the live MJPEG stream.
///
/// Writes the multipart headers once, then one `--FRAME` part per produced
/// frame until the client disconnects. The handler blocks on the frame
/// buffer between parts, so an idle camera costs nothing and a slow client
/// only skips frames — it never backs up the producer or other clients.
pub async fn stream(
    State(state): State<AppState>,
    ConnectInfo(client): ConnectInfo<SocketAddr>,
) -> Response {
    info!(%client, "mjpeg stream client connected");

    let frames = state.frames.clone();
    let guard = StreamGuard { client };
    let body_stream = stream::unfold((0u64, guard), move |(last_seen, guard)| {
        let frames = frames.clone();
        async move {
            let frame = frames.next_frame(last_seen).await;
            let part = mjpeg_part(&frame.bytes);
            Some((Ok::<_, Infallible>(part), (frame.generation, guard)))
        }
    });

    Response::builder()
        .status(StatusCode::OK)
        .header(
            header::CONTENT_TYPE,
            "multipart/x-mixed-replace; boundary=FRAME",
        )
        .header(header::CACHE_CONTROL, "no-cache, private")
        .header(header::PRAGMA, "no-cache")
        .header(header::AGE, "0")
        .body(Body::from_stream(body_stream))
        .expect("static stream headers are valid")
}

/// Fallback for unknown routes: 404 with an empty body.
pub async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

/// Logs the end of a stream connection.
///
/// Hyper signals a broken or closed client by dropping the body stream; the
/// handler never sees the write error itself, so teardown is observed here.
struct StreamGuard {
    client: SocketAddr,
}

impl Drop for StreamGuard {
    fn drop(&mut self) {
        debug!(client = %self.client, "mjpeg stream client disconnected");
    }
}

/// Build one multipart body part: boundary line, per-part headers, blank
/// line, JPEG bytes, trailing separator.
fn mjpeg_part(jpeg: &Bytes) -> Bytes {
    let mut buf = BytesMut::with_capacity(jpeg.len() + 128);
    write!(
        buf,
        "--FRAME\r\nContent-Type: image/jpeg\r\nContent-Length: {}\r\n\r\n",
        jpeg.len()
    )
    .unwrap();
    buf.put_slice(jpeg);
    buf.put_slice(b"\r\n");
    buf.freeze()
}

/// The embedded panel page: camera stream plus sensor tiles, refreshed from
/// `/api/sensors` every 15 seconds.
const PANEL_HTML: &str = r#"<!doctype html>
<html>
<head>
  <meta charset="utf-8" />
  <title>Robot Panel</title>
  <style>
    body { font-family: sans-serif; background: #111; color: #eee; text-align: center; }
    h1 { margin-top: 16px; }

    .wrap { display:flex; gap:20px; justify-content:center; align-items:flex-start; flex-wrap:wrap; margin: 16px; }
    .card { background:#1b1b1b; padding:16px; border-radius:12px; box-shadow: 0 6px 20px rgba(0,0,0,.35); }

    img { width:640px; max-width:95vw; border-radius:12px; border:2px solid #333; }
    .muted { color:#aaa; font-size: 12px; margin-top: 8px; }

    .grid { display:grid; grid-template-columns: 1fr; gap: 12px; min-width: 320px; }
    .section { background:#141414; border:1px solid #2a2a2a; border-radius:12px; padding:12px; text-align:left; }
    .section h3 { margin: 0 0 10px 0; font-size: 14px; color:#ddd; }

    .row { display:flex; justify-content:space-between; align-items:baseline; padding: 6px 0; border-bottom: 1px solid #222; }
    .row:last-child { border-bottom: none; }

    .label { color:#bbb; font-size: 13px; }
    .value { font-size: 20px; font-weight: 700; }
    .unit { font-size: 12px; color:#aaa; margin-left: 6px; font-weight: 500; }
  </style>
</head>
<body>
  <h1>Robot Panel</h1>

  <div class="wrap">
    <div class="card">
      <h2>Camera</h2>
      <img src="/stream.mjpg" />
      <div class="muted">MJPEG stream</div>
    </div>

    <div class="card">
      <h2>Sensors</h2>

      <div class="grid">
        <div class="section">
          <h3>Environment</h3>
          <div class="row">
            <div class="label">Temperature</div>
            <div><span class="value" id="temp">--</span><span class="unit">&deg;C</span></div>
          </div>
          <div class="row">
            <div class="label">Humidity</div>
            <div><span class="value" id="hum">--</span><span class="unit">%</span></div>
          </div>
          <div class="row">
            <div class="label">Pressure</div>
            <div><span class="value" id="pres">--</span><span class="unit">hPa</span></div>
          </div>
        </div>

        <div class="section">
          <h3>Air quality</h3>
          <div class="row">
            <div class="label">AQI</div>
            <div><span class="value" id="aqi">--</span></div>
          </div>
          <div class="row">
            <div class="label">TVOC</div>
            <div><span class="value" id="tvoc">--</span><span class="unit">ppb</span></div>
          </div>
          <div class="row">
            <div class="label">eCO2</div>
            <div><span class="value" id="eco2">--</span><span class="unit">ppm</span></div>
          </div>
        </div>

        <div class="muted" id="ts">Last update: --</div>
      </div>
    </div>
  </div>

<script>
function setText(id, v) {
  const el = document.getElementById(id);
  if (!el) return;
  el.textContent = (v === undefined || v === null) ? "--" : v;
}

async function refresh() {
  try {
    const r = await fetch("/api/sensors", { cache: "no-store" });
    const j = await r.json();

    const bme = j.bme280 || {};
    const ens = j.ens160 || {};

    setText("temp", bme.temperature_c);
    setText("hum",  bme.humidity_pct);
    setText("pres", bme.pressure_hpa);

    setText("aqi",  ens.aqi);
    setText("tvoc", ens.tvoc_ppb);
    setText("eco2", ens.eco2_ppm);

    if (j.ts) {
      const dt = new Date(j.ts * 1000);
      document.getElementById("ts").textContent = "Last update: " + dt.toLocaleString();
    }
  } catch (e) {
    // panel keeps the last values on fetch errors
  }
}

setInterval(refresh, 15000);
refresh();
</script>
</body>
</html>
"#;
