//! Live smoke test against the ECB website.
//!
//! Downloads every published document and exercises the public query
//! surface on real data.
//!
//! Run with:
//! ```sh
//! cargo test -- --ignored --nocapture
//! ```

use ecb_rates_sdk::{EcbRatesSdk, Period, TimeSeries, DEFAULT_DAY_RANGE_LIMIT, MIN_DATE};

#[test]
#[ignore]
fn smoke_test() {
    let tmp = tempfile::tempdir().unwrap();
    let sdk = EcbRatesSdk::builder().cache_dir(tmp.path()).build().unwrap();
    eprintln!("{sdk}");

    let latest = sdk.latest().unwrap();
    eprintln!("latest snapshot: {} ({} currencies)", latest.date, latest.rates.len());
    assert_eq!(latest.rate("EUR"), Some(1.0));
    assert!(latest.rate("USD").is_some());

    let recent = sdk.ordered_time_series(Period::Last90Days).unwrap();
    assert!(recent.len() > 40);
    assert_eq!(recent.newest().map(|r| r.date), Some(latest.date));

    let history = sdk.time_series(Period::Whole).unwrap();
    eprintln!("full history: {} snapshots", history.len());
    assert!(history.rates_on(&MIN_DATE).is_some());

    // every weekend day can be approximated from its neighbours
    let mut day = MIN_DATE;
    while day < latest.date {
        assert!(
            history.approximate_rate(&day, "USD", 5).is_some(),
            "no USD rate around {day}"
        );
        day = day.add_days(1);
    }

    let hybrid = sdk.hybrid_time_series(Period::Whole).unwrap();
    assert_eq!(hybrid.len(), history.len());
    assert_eq!(
        hybrid.approximate_rates(&latest.date, DEFAULT_DAY_RANGE_LIMIT),
        history.approximate_rates(&latest.date, DEFAULT_DAY_RANGE_LIMIT)
    );
}
