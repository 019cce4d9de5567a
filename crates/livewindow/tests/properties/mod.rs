use std::sync::Arc;

use livewindow::{locator, LiveTimeline, LiveWindow, PeriodKind, PeriodPattern, TimelineParams};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{assert_expected_window, init_test_tracing, naive_window, AssertWrapper, A_DAY_US};

fn random_pattern(rng: &mut StdRng) -> PeriodPattern {
    let len = rng.gen_range(1..=6);
    let kinds: Vec<_> = (0..len)
        .map(|_| {
            if rng.gen_bool(0.5) {
                PeriodKind::Ad
            } else {
                PeriodKind::Content
            }
        })
        .collect();
    let durations: Vec<_> = (0..len).map(|_| rng.gen_range(1..=40_000_000)).collect();
    PeriodPattern::new(kinds, durations).assert_success()
}

fn random_params(rng: &mut StdRng) -> TimelineParams {
    let pattern = random_pattern(rng);
    let availability_start_time_us = rng.gen_range(0..=A_DAY_US);
    let live_window_duration_us = rng.gen_range(1..=200_000_000);
    TimelineParams::new(
        pattern,
        availability_start_time_us,
        live_window_duration_us,
    )
    .assert_success()
}

#[test]
fn advancing_matches_locating() {
    init_test_tracing();
    let mut rng = StdRng::seed_from_u64(0x11fe_71de);

    for _ in 0..200 {
        let params = random_params(&mut rng);
        let now_us = params.availability_start_time_us + rng.gen_range(0..=300_000_000);
        let mut timeline = LiveTimeline::new(params.clone(), now_us).assert_success();

        for _ in 0..50 {
            let delta_us = match rng.gen_range(0..4) {
                0 => 0,
                1 => rng.gen_range(1..=1_000),
                2 => rng.gen_range(1..=60_000_000),
                _ => rng.gen_range(1..=3_600_000_000),
            };
            let advanced = timeline.advance_now_us(delta_us).assert_success();
            let located = locator::locate(
                &params.pattern,
                params.availability_start_time_us,
                params.live_window_duration_us,
                advanced.now_us(),
            )
            .assert_success();

            assert_eq!(*advanced.bounds(), located);
        }
    }
}

#[test]
fn located_window_matches_naive_walk() {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..300 {
        let params = Arc::new(random_params(&mut rng));
        // Bounded in cycles so the naive walk stays short for tiny periods.
        let max_elapsed_us =
            params.pattern.cycle_duration_us() * 40 + params.live_window_duration_us;
        let now_us = params.availability_start_time_us + rng.gen_range(0..=max_elapsed_us);
        let window = LiveWindow::locate(params.clone(), now_us).assert_success();

        assert_expected_window(
            &window,
            &naive_window(
                &params.pattern,
                params.availability_start_time_us,
                params.live_window_duration_us,
                now_us,
            ),
        );
    }
}

#[test]
fn window_covers_live_interval() {
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..500 {
        let params = Arc::new(random_params(&mut rng));
        let now_us = params.availability_start_time_us + rng.gen_range(1..=10 * A_DAY_US);
        let window = LiveWindow::locate(params.clone(), now_us).assert_success();

        let first = window.period(0).unwrap();
        assert!(first.position_in_window_us <= 0);
        assert!(first.position_in_window_us + params.pattern.duration_of(first.id()) > 0);

        let last_index = window.period_count() - 1;
        let last = window.period(last_index).unwrap();
        let last_start_us = window.period_start_time_us(last_index).unwrap();
        assert!(last_start_us < now_us);
        assert!(last_start_us + params.pattern.duration_of(last.id()) >= now_us);
        assert_eq!(last.duration_us, None);

        for pair in window.periods().windows(2) {
            assert_eq!(pair[1].id(), pair[0].id() + 1);
            assert_eq!(
                pair[1].position_in_window_us,
                pair[0].position_in_window_us + pair[0].duration_us.unwrap()
            );
        }
    }
}

#[test]
fn period_identity_is_stable() {
    let mut rng = StdRng::seed_from_u64(1_000_003);

    for _ in 0..200 {
        let params = random_params(&mut rng);
        let now_us = params.availability_start_time_us + rng.gen_range(0..=A_DAY_US);
        let mut timeline = LiveTimeline::new(params, now_us).assert_success();

        for _ in 0..20 {
            let before = timeline.snapshot();
            let delta_us = rng.gen_range(0..=30_000_000);
            let after = timeline.advance_now_us(delta_us).assert_success();

            // Ids never move backwards at either end.
            assert!(after.bounds().first_period_index >= before.bounds().first_period_index);
            assert!(after.bounds().last_period_index >= before.bounds().last_period_index);

            // A period visible in both windows keeps its absolute start, so its position only
            // shifts by the amount the window start moved.
            let shift_us = after.window_start_time_us() - before.window_start_time_us();
            for (i, period) in before.periods().iter().enumerate() {
                let Some(j) = after.index_of_period(&period.uid) else {
                    continue;
                };
                let moved = after.period(j).unwrap();
                assert_eq!(moved.uid, period.uid);
                assert_eq!(
                    moved.position_in_window_us,
                    period.position_in_window_us - shift_us
                );
                assert_eq!(
                    after.period_start_time_us(j),
                    before.period_start_time_us(i)
                );
            }
        }
    }
}

#[test]
fn unclamped_window_slides_by_delta() {
    let mut rng = StdRng::seed_from_u64(99);

    for _ in 0..100 {
        let params = random_params(&mut rng);
        let now_us = params.availability_start_time_us
            + params.live_window_duration_us
            + rng.gen_range(0..=A_DAY_US);
        let mut timeline = LiveTimeline::new(params.clone(), now_us).assert_success();

        let before = timeline.snapshot();
        let delta_us = rng.gen_range(0..=10_000_000);
        let after = timeline.advance_now_us(delta_us).assert_success();

        assert_eq!(after.duration_us(), params.live_window_duration_us);
        assert_eq!(
            after.window_start_time_us(),
            before.window_start_time_us() + delta_us
        );
        if let Some(j) = after.index_of_period(&before.period(0).unwrap().uid) {
            assert_eq!(
                after.period(j).unwrap().position_in_window_us,
                before.period(0).unwrap().position_in_window_us - delta_us
            );
        }
    }
}
