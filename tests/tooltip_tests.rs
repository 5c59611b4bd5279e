//! Tooltip fade and templating tests against the public API.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp, clippy::panic)]

use pivotgrid::error::PivotError;
use pivotgrid::tooltip::{
    placement, render_template, FadeAnimation, FadePhase, FadeTick, TARGET_ALPHA,
};

#[test]
fn full_fade_cycle_shows_then_hides() {
    let mut fade = FadeAnimation::new(10);

    fade.start(FadePhase::In);
    let mut last_tick = fade.tick();
    while let FadeTick::Step(_) = last_tick {
        last_tick = fade.tick();
    }
    assert_eq!(last_tick, FadeTick::Done { visible: true });
    assert_eq!(fade.opacity(), f64::from(TARGET_ALPHA) / 100.0);

    fade.start(FadePhase::Out);
    let mut last_tick = fade.tick();
    while let FadeTick::Step(_) = last_tick {
        last_tick = fade.tick();
    }
    assert_eq!(last_tick, FadeTick::Done { visible: false });
    assert_eq!(fade.opacity(), 0.0);
}

#[test]
fn interrupting_a_fade_in_fades_out_from_the_interruption_point() {
    let mut fade = FadeAnimation::new(20);
    fade.start(FadePhase::In);
    let _ = fade.tick();
    let _ = fade.tick();
    assert_eq!(fade.opacity(), 0.4);

    // The host cleared its timer and flipped the phase; ticks now walk
    // back down from 40%.
    fade.start(FadePhase::Out);
    assert_eq!(fade.tick(), FadeTick::Step(0.2));
    assert_eq!(fade.tick(), FadeTick::Step(0.0));
    assert_eq!(fade.tick(), FadeTick::Done { visible: false });
}

#[test]
fn malformed_coordinates_fail_fatally() {
    let err = placement(f64::NAN, 42.0, 10.0, 3.0).expect_err("NaN pointer x");
    assert!(matches!(err, PivotError::TooltipCoordinates(_, _)));
    assert!(err.to_string().contains("Undefined tooltip coordinates"));
}

#[test]
fn template_resolves_header_and_value() {
    let html = render_template("<i>{{_name}}</i> = {{value}}", "Total", "989");
    assert_eq!(html, "<i>Total</i> = 989");
}

#[test]
fn blank_header_flows_through_the_template() {
    // Columns past the configured headers resolve to a blank label.
    let html = render_template("{{_name}}: {{value}}", "&nbsp;", "7");
    assert_eq!(html, "&nbsp;: 7");
}
