use std::cell::Cell;

use particles::host::ManualHost;
use particles::surface::{Recorder, Viewport};
use particles::{EffectKind, FxState};
use time::{Date, Month};

use super::*;
use crate::error::{LocateError, WeatherError};
use crate::locate::FixedLocator;
use crate::weather::Conditions;

fn date(month: Month) -> Date {
    Date::from_calendar_date(2026, month, 15).unwrap()
}

const LONDON: Coordinates = Coordinates { latitude: 51.5, longitude: -0.12 };
const SYDNEY: Coordinates = Coordinates { latitude: -33.9, longitude: 151.2 };

struct FakeWeather {
    result: Result<Conditions, WeatherError>,
    calls: Cell<usize>,
}

impl FakeWeather {
    fn ok(code: u32, temperature_c: f64) -> Self {
        Self { result: Ok(Conditions { code, temperature_c }), calls: Cell::new(0) }
    }

    fn failing(error: WeatherError) -> Self {
        Self { result: Err(error), calls: Cell::new(0) }
    }
}

#[async_trait::async_trait(?Send)]
impl WeatherSource for FakeWeather {
    async fn current(&self, _at: Coordinates) -> Result<Conditions, WeatherError> {
        self.calls.set(self.calls.get() + 1);
        self.result.clone()
    }
}

#[derive(Default)]
struct CountingTarget {
    applied: Vec<Selection>,
}

impl EffectTarget for CountingTarget {
    fn apply(&mut self, selection: Selection) -> Result<(), FxError> {
        self.applied.push(selection);
        Ok(())
    }
}

// =============================================================
// resolve
// =============================================================

#[tokio::test]
async fn weather_decides_when_available() {
    let weather = FakeWeather::ok(601, -3.0);
    let r = resolve(date(Month::July), &SiteConfig::default(), &FixedLocator::at(LONDON), Some(&weather)).await;
    assert_eq!(r.selection, Selection::Effect(EffectKind::Snow));
    assert_eq!(r.source, Source::Weather);
    assert_eq!(r.coordinates, Some(LONDON));
    assert_eq!(weather.calls.get(), 1);
}

#[tokio::test]
async fn hot_weather_selects_hot() {
    let weather = FakeWeather::ok(800, 34.0);
    let r = resolve(date(Month::July), &SiteConfig::default(), &FixedLocator::at(LONDON), Some(&weather)).await;
    assert_eq!(r.selection, Selection::Hot);
}

#[tokio::test]
async fn configured_hot_threshold_is_used() {
    let config = SiteConfig { hot_threshold_c: 20.0, ..SiteConfig::default() };
    let weather = FakeWeather::ok(801, 21.0);
    let r = resolve(date(Month::May), &config, &FixedLocator::at(LONDON), Some(&weather)).await;
    assert_eq!(r.selection, Selection::Hot);
}

#[tokio::test]
async fn no_location_uses_default_hemisphere() {
    let weather = FakeWeather::ok(500, 10.0);
    let locator = FixedLocator::failing(LocateError::Denied);
    let r = resolve(date(Month::January), &SiteConfig::default(), &locator, Some(&weather)).await;
    assert_eq!(r.selection, Selection::Effect(EffectKind::Snow));
    assert_eq!(r.source, Source::Seasonal(Fallback::NoLocation));
    assert_eq!(r.coordinates, None);
    assert_eq!(weather.calls.get(), 0);
}

#[tokio::test]
async fn locate_timeout_falls_back() {
    let config = SiteConfig { default_hemisphere: Hemisphere::South, ..SiteConfig::default() };
    let locator = FixedLocator::failing(LocateError::Timeout(5_000));
    let r = resolve(date(Month::January), &config, &locator, None).await;
    assert_eq!(r.selection, Selection::Effect(EffectKind::Sun));
    assert_eq!(r.source, Source::Seasonal(Fallback::NoLocation));
}

#[tokio::test]
async fn disabled_weather_uses_latitude_hemisphere() {
    let r = resolve(date(Month::January), &SiteConfig::default(), &FixedLocator::at(SYDNEY), None).await;
    assert_eq!(r.selection, Selection::Effect(EffectKind::Sun));
    assert_eq!(r.source, Source::Seasonal(Fallback::WeatherDisabled));
    assert_eq!(r.coordinates, Some(SYDNEY));
}

#[tokio::test]
async fn weather_failure_uses_default_hemisphere() {
    let weather = FakeWeather::failing(WeatherError::Status { status: 500 });
    let r = resolve(date(Month::January), &SiteConfig::default(), &FixedLocator::at(SYDNEY), Some(&weather)).await;
    assert_eq!(r.selection, Selection::Effect(EffectKind::Snow));
    assert_eq!(r.source, Source::Seasonal(Fallback::WeatherFailed));
    assert_eq!(weather.calls.get(), 1);
}

#[test]
fn source_serializes_with_reason() {
    let json = serde_json::to_value(Source::Seasonal(Fallback::WeatherFailed)).unwrap();
    assert_eq!(json, serde_json::json!({ "mode": "seasonal", "reason": "weather_failed" }));
    let json = serde_json::to_value(Source::Weather).unwrap();
    assert_eq!(json, serde_json::json!({ "mode": "weather" }));
}

// =============================================================
// select_and_apply
// =============================================================

#[tokio::test]
async fn failed_weather_applies_fallback_once() {
    let weather = FakeWeather::failing(WeatherError::Parse("eof".into()));
    let mut target = CountingTarget::default();
    let r = select_and_apply(
        date(Month::October),
        &SiteConfig::default(),
        &FixedLocator::at(LONDON),
        Some(&weather),
        &mut target,
    )
    .await
    .unwrap();
    assert_eq!(target.applied, vec![Selection::Effect(EffectKind::Leaves)]);
    assert_eq!(r.source, Source::Seasonal(Fallback::WeatherFailed));
}

#[test]
fn controller_target_starts_and_stops() {
    let viewport = Viewport::new(400.0, 300.0, 1.0);
    let mut fx = FxController::new(Recorder::new(), ManualHost::new(viewport), 7);

    fx.apply(Selection::Effect(EffectKind::Rain)).unwrap();
    assert_eq!(fx.state(), FxState::Running(EffectKind::Rain));
    assert_eq!(fx.particles().len(), 150);

    fx.apply(Selection::Hot).unwrap();
    assert_eq!(fx.state(), FxState::Idle);
    assert_eq!(fx.host().pending_frames(), 0);
    assert_eq!(fx.host().listener_count(), 0);
    assert!(!fx.surface().is_visible());
}

#[tokio::test]
async fn select_and_apply_drives_controller() {
    let viewport = Viewport::new(400.0, 300.0, 2.0);
    let mut fx = FxController::new(Recorder::new(), ManualHost::new(viewport), 11);
    let weather = FakeWeather::ok(311, 14.0);

    select_and_apply(date(Month::August), &SiteConfig::default(), &FixedLocator::at(LONDON), Some(&weather), &mut fx)
        .await
        .unwrap();

    assert_eq!(fx.kind(), EffectKind::Rain);
    assert_eq!(fx.host().pending_frames(), 1);
}
