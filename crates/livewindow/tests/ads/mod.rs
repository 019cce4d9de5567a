use std::sync::Arc;

use livewindow::{AdGroupTime, AdInsertion, AdMetadata, LiveWindow, TimelineParams};

use crate::{content_ad_ad, AssertWrapper};

fn window(ad_insertion: AdInsertion, now_us: i64) -> LiveWindow {
    let params = TimelineParams::new(content_ad_ad(), 0, 50_000_000)
        .assert_success()
        .with_ad_insertion(ad_insertion);
    LiveWindow::locate(Arc::new(params), now_us).assert_success()
}

#[test]
fn populated_ad_periods() {
    let window = window(AdInsertion::Populated { played: false }, 100_000_000);

    assert_eq!(window.period_count(), 3);
    let uids: Vec<_> = window.periods().iter().map(|p| p.uid.to_string()).collect();
    assert_eq!(uids, ["uid-3[c]", "uid-4[a]", "uid-5[a]"]);

    let content = window.period(0).unwrap();
    assert_eq!(content.ad, AdMetadata::Placeholder);
    assert_eq!(content.ad.ad_group_count(), 1);
    assert!(content.ad.ends_with_live_postroll_placeholder());

    for ad_period in &window.periods()[1..] {
        assert!(ad_period.is_ad());
        assert_eq!(ad_period.ad.ad_group_count(), 2);

        let group = ad_period.ad.ad_group(0).unwrap();
        assert_eq!(group.time, AdGroupTime::Us(0));
        assert_eq!(group.count, Some(1));
        assert_eq!(group.ad_duration_us(0), Some(10_000_000));
        assert_eq!(group.content_resume_offset_us, 10_000_000);
        assert!(group.server_side_inserted);
        assert!(!group.played);

        let postroll = ad_period.ad.ad_group(1).unwrap();
        assert_eq!(postroll.time, AdGroupTime::EndOfSource);
        assert_eq!(postroll.count, None);
        assert!(postroll.server_side_inserted);
    }

    // The last period has no duration yet, but its ad still spans the whole pattern slot.
    assert_eq!(window.period(2).unwrap().duration_us, None);
    assert_eq!(
        window.period(2).unwrap().ad.ad_group(0).unwrap().ad_duration_us(0),
        Some(10_000_000)
    );
}

#[test]
fn played_flag_is_carried() {
    let window = window(AdInsertion::Populated { played: true }, 100_000_000);

    let group = window.period(1).unwrap().ad.ad_group(0).unwrap();
    assert!(group.played);
    assert!(!window.period(1).unwrap().ad.ad_group(1).unwrap().played);
}

#[test]
fn unpopulated_periods_only_carry_placeholder() {
    let window = window(AdInsertion::Unpopulated, 100_000_000);

    assert_eq!(window.period_count(), 3);
    for period in window.periods() {
        assert_eq!(period.ad, AdMetadata::Placeholder);
        assert_eq!(period.ad.ad_group_count(), 1);
        assert!(period.ad.ad_group(0).unwrap().is_live_postroll_placeholder());
    }
}

#[test]
fn content_only_periods_carry_nothing() {
    let window = window(AdInsertion::ContentOnly, 100_000_000);

    assert!(window.periods().iter().all(|p| p.ad == AdMetadata::None));
    // Kinds are still known from the pattern.
    assert!(window.period(1).unwrap().is_ad());
    assert!(!window.period(0).unwrap().is_ad());
}

#[test]
fn metadata_follows_advance() {
    let window = window(AdInsertion::Populated { played: false }, 100_000_000);
    let advanced = window.advance(30_000_000).assert_success();

    let kinds: Vec<_> = advanced
        .periods()
        .iter()
        .map(|p| (p.uid.to_string(), p.ad.ad_group_count()))
        .collect();
    assert_eq!(
        kinds,
        [
            ("uid-4[a]".to_string(), 2),
            ("uid-5[a]".to_string(), 2),
            ("uid-6[c]".to_string(), 1),
        ]
    );
}

#[test]
fn serialized_window() {
    let window = window(AdInsertion::Populated { played: false }, 100_000_000);
    let json = serde_json::to_value(&window).assert_success();

    let periods = json["periods"].as_array().unwrap();
    assert_eq!(periods.len(), 3);
    assert_eq!(periods[0]["uid"], "uid-3[c]");
    assert_eq!(periods[0]["ad"]["state"], "placeholder");
    assert_eq!(periods[1]["ad"]["state"], "populated");
    assert_eq!(periods[1]["ad"]["time"]["us"], 0);
    assert_eq!(periods[1]["ad"]["count"], 1);
    assert!(periods[2]["duration_us"].is_null());
    assert_eq!(json["bounds"]["first_period_index"], 3);
}
