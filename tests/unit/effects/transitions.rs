use super::*;
use crate::timeline::allocate::{allocate_durations, layout_timeline};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn assert_window(w: Option<FadeWindow>, start: f64, end: f64) {
    let w = w.expect("window present");
    assert!(
        close(w.start, start) && close(w.end, end),
        "{w:?} != [{start}, {end}]"
    );
}

#[test]
fn three_slide_thirty_second_schedule() {
    let timeline = layout_timeline(&allocate_durations(30.0, 3).unwrap());
    let tr = schedule_transitions(&timeline, 0.2).unwrap();

    assert!(tr[0].fade_in.is_none());
    assert_window(tr[0].fade_out, 9.8, 10.0);

    assert_window(tr[1].fade_in, 10.0, 10.2);
    assert_window(tr[1].fade_out, 19.8, 20.0);

    assert_window(tr[2].fade_in, 20.0, 20.2);
    assert!(tr[2].fade_out.is_none());
}

#[test]
fn single_slide_has_no_fades() {
    let timeline = layout_timeline(&[5.0]);
    let tr = schedule_transitions(&timeline, 0.2).unwrap();
    assert!(tr[0].fade_in.is_none());
    assert!(tr[0].fade_out.is_none());
    assert_eq!(tr[0].alpha_at(2.5), 1.0);
}

#[test]
fn short_slides_clamp_to_half_duration() {
    let timeline = layout_timeline(&[0.3, 0.3, 0.3]);
    let tr = schedule_transitions(&timeline, 0.2).unwrap();
    for (slot, t) in timeline.iter().zip(&tr) {
        assert!(t.fade_secs <= slot.duration / 2.0 + 1e-12);
        assert!(close(t.fade_secs, 0.15));
    }
    let mid = &tr[1];
    let fin = mid.fade_in.unwrap();
    let fout = mid.fade_out.unwrap();
    assert!(fin.end <= fout.start + 1e-12);
}

#[test]
fn effective_fade_never_exceeds_half_duration() {
    for &d in &[0.0, 0.01, 0.2, 0.39, 0.4, 0.41, 3.0, 100.0] {
        for &f in &[0.0, 0.05, 0.2, 0.5, 2.0] {
            let e = effective_fade(d, f);
            assert!(e <= d / 2.0 + 1e-15);
            assert!(e <= f);
            assert!(e >= 0.0);
        }
    }
}

#[test]
fn alpha_ramps_linearly() {
    let timeline = layout_timeline(&allocate_durations(30.0, 3).unwrap());
    let tr = schedule_transitions(&timeline, 0.2).unwrap();
    let mid = &tr[1];

    assert_eq!(mid.alpha_at(10.0), 0.0);
    assert!(close(mid.alpha_at(10.1), 0.5));
    assert_eq!(mid.alpha_at(15.0), 1.0);
    assert!(close(mid.alpha_at(19.9), 0.5));
    assert_eq!(mid.alpha_at(20.0), 0.0);

    // First slide is fully opaque at the very start.
    assert_eq!(tr[0].alpha_at(0.0), 1.0);
    // Last slide is fully opaque at the very end.
    assert_eq!(tr[2].alpha_at(30.0), 1.0);
}

#[test]
fn zero_fade_disables_ramps() {
    let timeline = layout_timeline(&[1.0, 1.0]);
    let tr = schedule_transitions(&timeline, 0.0).unwrap();
    assert_eq!(tr[0].alpha_at(1.0), 1.0);
    assert_eq!(tr[1].alpha_at(1.0), 1.0);
}

#[test]
fn negative_fade_is_rejected() {
    let timeline = layout_timeline(&[1.0]);
    assert!(schedule_transitions(&timeline, -0.1).is_err());
    assert!(schedule_transitions(&timeline, f64::NAN).is_err());
}
