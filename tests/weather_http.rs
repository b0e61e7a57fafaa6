//! Weather and contact clients against a local `axum` server.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use particles::EffectKind;
use sitefx::config::{ContactConfig, SiteConfig, WeatherConfig};
use sitefx::contact::{ContactMessage, EmailJsSender, MessageSender};
use sitefx::error::{SendError, WeatherError};
use sitefx::locate::{Coordinates, FixedLocator};
use sitefx::pipeline::{EffectTarget, Fallback, Source, select_and_apply};
use sitefx::weather::{OpenWeatherClient, Selection, WeatherSource};
use time::{Date, Month};

type Seen = Arc<Mutex<Vec<HashMap<String, String>>>>;

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn weather_server(status: StatusCode, body: &'static str) -> (String, Seen) {
    let seen: Seen = Arc::default();
    let app = Router::new()
        .route(
            "/weather",
            get(move |State(seen): State<Seen>, Query(q): Query<HashMap<String, String>>| async move {
                seen.lock().unwrap().push(q);
                (status, body)
            }),
        )
        .with_state(Arc::clone(&seen));
    (format!("{}/weather", serve(app).await), seen)
}

fn client(base_url: String) -> OpenWeatherClient {
    let cfg = WeatherConfig { api_key: Some("test-key".into()), base_url };
    OpenWeatherClient::from_config(&cfg).unwrap().unwrap()
}

#[derive(Default)]
struct CountingTarget {
    applied: Vec<Selection>,
}

impl EffectTarget for CountingTarget {
    fn apply(&mut self, selection: Selection) -> Result<(), particles::FxError> {
        self.applied.push(selection);
        Ok(())
    }
}

const OSLO: Coordinates = Coordinates { latitude: 59.91, longitude: 10.75 };

fn march() -> Date {
    Date::from_calendar_date(2026, Month::March, 3).unwrap()
}

#[tokio::test]
async fn server_error_falls_back_to_season_once() {
    let (url, seen) = weather_server(StatusCode::INTERNAL_SERVER_ERROR, "oops").await;
    let weather = client(url);
    let mut target = CountingTarget::default();

    let r = select_and_apply(march(), &SiteConfig::default(), &FixedLocator::at(OSLO), Some(&weather), &mut target)
        .await
        .unwrap();

    assert_eq!(r.source, Source::Seasonal(Fallback::WeatherFailed));
    assert_eq!(target.applied, vec![Selection::Effect(EffectKind::Rain)]);
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn status_error_is_reported() {
    let (url, _seen) = weather_server(StatusCode::UNAUTHORIZED, r#"{"cod":401}"#).await;
    let err = client(url).current(OSLO).await.unwrap_err();
    assert_eq!(err, WeatherError::Status { status: 401 });
}

#[tokio::test]
async fn snowy_response_selects_snow_and_sends_query() {
    let body = r#"{"weather":[{"id":600,"main":"Snow"}],"main":{"temp":-4.5}}"#;
    let (url, seen) = weather_server(StatusCode::OK, body).await;
    let weather = client(url);
    let mut target = CountingTarget::default();

    let r = select_and_apply(march(), &SiteConfig::default(), &FixedLocator::at(OSLO), Some(&weather), &mut target)
        .await
        .unwrap();

    assert_eq!(r.source, Source::Weather);
    assert_eq!(target.applied, vec![Selection::Effect(EffectKind::Snow)]);

    let seen = seen.lock().unwrap();
    let query = &seen[0];
    assert_eq!(query["lat"], "59.91");
    assert_eq!(query["lon"], "10.75");
    assert_eq!(query["appid"], "test-key");
    assert_eq!(query["units"], "metric");
}

#[tokio::test]
async fn html_body_is_parse_failure() {
    let (url, _seen) = weather_server(StatusCode::OK, "<html>maintenance</html>").await;
    let err = client(url).current(OSLO).await.unwrap_err();
    assert!(matches!(err, WeatherError::Parse(_)));
}

#[tokio::test]
async fn unreachable_weather_is_request_error() {
    let err = client("http://127.0.0.1:1/weather".into()).current(OSLO).await.unwrap_err();
    assert!(matches!(err, WeatherError::Request(_)));
}

// =============================================================
// contact backend
// =============================================================

type Posted = Arc<Mutex<Vec<serde_json::Value>>>;

async fn contact_server(status: StatusCode) -> (String, Posted) {
    let posted: Posted = Arc::default();
    let app = Router::new()
        .route(
            "/send",
            post(move |State(posted): State<Posted>, Json(body): Json<serde_json::Value>| async move {
                posted.lock().unwrap().push(body);
                (status, "OK").into_response()
            }),
        )
        .with_state(Arc::clone(&posted));
    (format!("{}/send", serve(app).await), posted)
}

fn sender(endpoint: String) -> EmailJsSender {
    EmailJsSender::new(ContactConfig {
        endpoint,
        service_id: "svc".into(),
        template_id: "tpl".into(),
        public_key: "pk".into(),
    })
    .unwrap()
}

#[tokio::test]
async fn contact_posts_template_params() {
    let (url, posted) = contact_server(StatusCode::OK).await;
    let message = ContactMessage::new("Ada", "ada@example.com", "Hi!");
    sender(url).send(&message).await.unwrap();

    let posted = posted.lock().unwrap();
    assert_eq!(posted.len(), 1);
    assert_eq!(posted[0]["service_id"], "svc");
    assert_eq!(posted[0]["user_id"], "pk");
    assert_eq!(posted[0]["template_params"]["reply_to"], "ada@example.com");
}

#[tokio::test]
async fn contact_rejection_carries_status_and_body() {
    let (url, _posted) = contact_server(StatusCode::BAD_REQUEST).await;
    let message = ContactMessage::new("Ada", "ada@example.com", "Hi!");
    let err = sender(url).send(&message).await.unwrap_err();
    assert_eq!(err, SendError::Status { status: 400, body: "OK".into() });
}
