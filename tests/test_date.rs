//! Tests for the calendar `Date` type.

use ecb_rates_sdk::{Date, RatesError, MIN_DATE};

#[test]
fn test_parse_and_display() {
    let date: Date = "2024-04-05".parse().unwrap();
    assert_eq!(date.year(), 2024);
    assert_eq!(date.month(), 4);
    assert_eq!(date.day(), 5);
    assert_eq!(date.to_string(), "2024-04-05");
}

#[test]
fn test_display_pads_components() {
    let date = Date::new(1999, 1, 4).unwrap();
    assert_eq!(date.to_string(), "1999-01-04");
    assert_eq!(date, MIN_DATE);
}

#[test]
fn test_display_parse_round_trip_for_every_day() {
    // 1999-01-04 until past 2100-03-01
    let mut day = MIN_DATE;
    let mut leap_days = 0;
    for _ in 0..37_000 {
        let shown = day.to_string();
        assert_eq!(shown.parse::<Date>().unwrap(), day, "{shown}");
        if day.month() == 2 && day.day() == 29 {
            leap_days += 1;
        }
        day = day.add_days(1);
    }
    assert!(day > Date::new(2100, 3, 1).unwrap());
    assert_eq!(leap_days, 25);
}

#[test]
fn test_century_non_leap_year() {
    let day = Date::new(2100, 2, 28).unwrap();
    assert_eq!(day.add_days(1).to_string(), "2100-03-01");
    assert!("2100-02-29".parse::<Date>().is_err());
    assert_eq!(Date::new(2000, 2, 28).unwrap().add_days(1).to_string(), "2000-02-29");
}

#[test]
fn test_parse_rejects_unpadded() {
    let err = "2004-2-15".parse::<Date>().unwrap_err();
    assert!(matches!(err, RatesError::DateParse { .. }));
}

#[test]
fn test_parse_rejects_garbage() {
    for input in ["", "yesterday", "2024/04/05", "2024-04-05T00:00:00", "20240405"] {
        assert!(
            input.parse::<Date>().is_err(),
            "{input:?} should not parse"
        );
    }
}

#[test]
fn test_parse_rejects_impossible_date() {
    let err = "2023-02-30".parse::<Date>().unwrap_err();
    match err {
        RatesError::DateParse { input, .. } => assert_eq!(input, "2023-02-30"),
        other => panic!("unexpected error {other:?}"),
    }
    assert!(Date::new(2023, 2, 30).is_err());
    assert!(Date::new(2024, 2, 29).is_ok());
}

#[test]
fn test_ordering_is_calendrical() {
    let a: Date = "2023-12-31".parse().unwrap();
    let b: Date = "2024-01-01".parse().unwrap();
    assert!(a < b);
    assert_eq!(a.max(b), b);
}

#[test]
fn test_add_days_crosses_month_and_year() {
    let date: Date = "2024-02-28".parse().unwrap();
    assert_eq!(date.add_days(1).to_string(), "2024-02-29");
    assert_eq!(date.add_days(2).to_string(), "2024-03-01");

    let new_year: Date = "2024-01-01".parse().unwrap();
    assert_eq!(new_year.add_days(-1).to_string(), "2023-12-31");
    assert_eq!(new_year.add_days(0), new_year);
}

#[test]
fn test_days_since() {
    let a: Date = "2000-01-01".parse().unwrap();
    let b: Date = "2000-01-30".parse().unwrap();
    assert_eq!(b.days_since(&a), 29);
    assert_eq!(a.days_since(&b), -29);
}

#[test]
fn test_serde_uses_string_form() {
    let date: Date = "2024-04-05".parse().unwrap();
    let json = serde_json::to_string(&date).unwrap();
    assert_eq!(json, "\"2024-04-05\"");

    let back: Date = serde_json::from_str(&json).unwrap();
    assert_eq!(back, date);
    assert!(serde_json::from_str::<Date>("\"2024-4-5\"").is_err());
}

#[test]
fn test_naive_date_conversions() {
    let naive = chrono::NaiveDate::from_ymd_opt(2010, 6, 15).unwrap();
    let date = Date::from(naive);
    assert_eq!(date.naive(), naive);
    assert_eq!(chrono::NaiveDate::from(date), naive);
}
