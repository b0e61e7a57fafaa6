use super::*;

const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

#[test]
fn every_month_maps_to_a_seasonal_kind_in_both_hemispheres() {
    let seasonal = [EffectKind::Snow, EffectKind::Rain, EffectKind::Sun, EffectKind::Leaves];
    for month in MONTHS {
        for hemisphere in [Hemisphere::North, Hemisphere::South] {
            let kind = seasonal_effect(month, hemisphere);
            assert!(seasonal.contains(&kind), "{month} {hemisphere} -> {kind}");
        }
    }
}

#[test]
fn january_is_snow_north_and_sun_south() {
    assert_eq!(seasonal_effect(Month::January, Hemisphere::North), EffectKind::Snow);
    assert_eq!(seasonal_effect(Month::January, Hemisphere::South), EffectKind::Sun);
}

#[test]
fn northern_calendar() {
    let expected = [
        (Month::December, EffectKind::Snow),
        (Month::February, EffectKind::Snow),
        (Month::March, EffectKind::Rain),
        (Month::May, EffectKind::Rain),
        (Month::June, EffectKind::Sun),
        (Month::August, EffectKind::Sun),
        (Month::September, EffectKind::Leaves),
        (Month::November, EffectKind::Leaves),
    ];
    for (month, kind) in expected {
        assert_eq!(seasonal_effect(month, Hemisphere::North), kind, "{month}");
    }
}

#[test]
fn hemispheres_are_two_seasons_apart() {
    for month in MONTHS {
        let north = seasonal_effect(month, Hemisphere::North);
        let south = seasonal_effect(month, Hemisphere::South);
        assert_ne!(north, south, "{month}");
        let shifted = ROTATION[(season_index(month) + 2) % 4];
        assert_eq!(south, shifted, "{month}");
    }
}

#[test]
fn buckets_are_contiguous_three_month_runs() {
    let indices: Vec<_> = MONTHS.iter().map(|m| season_index(*m)).collect();
    assert_eq!(indices, [0, 0, 1, 1, 1, 2, 2, 2, 3, 3, 3, 0]);
}

#[test]
fn hemisphere_from_latitude_sign() {
    assert_eq!(Hemisphere::from_latitude(51.5), Hemisphere::North);
    assert_eq!(Hemisphere::from_latitude(0.0), Hemisphere::North);
    assert_eq!(Hemisphere::from_latitude(-33.9), Hemisphere::South);
    assert_eq!(Hemisphere::from_latitude(f64::NAN), Hemisphere::North);
}

#[test]
fn hemisphere_parses_names() {
    assert_eq!("North".parse::<Hemisphere>(), Ok(Hemisphere::North));
    assert_eq!(" s ".parse::<Hemisphere>(), Ok(Hemisphere::South));
    let err = "east".parse::<Hemisphere>().unwrap_err();
    assert!(err.to_string().contains("expected 'north' or 'south'"));
}
