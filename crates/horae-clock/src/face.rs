//! The clock face: one complete frame per call.

use std::f32::consts::FRAC_PI_2;

use horae_engine::coords::{Transform, Vec2, Viewport};
use horae_engine::scene::DrawList;

use crate::geometry::{clock_polar_to_cartesian, hours_to_angle, minutes_to_angle, seconds_to_angle};
use crate::moment::Moment;
use crate::painter::Painter;
use crate::style::{FaceStyle, DESIGN_EXTENT, MIN_SCALE};

// Design-unit dimensions.
const RING_RADIUS: f32 = 120.0;
const NUMERAL_DISTANCE: f32 = 90.0;
const HOUR_TICK_INNER: f32 = 105.0;
const MINUTE_TICK_INNER: f32 = 112.0;

const DAY_LABEL_DISTANCE: f32 = 47.0;
const DAY_LABEL_ANGLE: f32 = FRAC_PI_2;

const HUB_RADIUS: f32 = 3.0;
const SECOND_HUB_RADIUS: f32 = 2.0;

const HOUR_HAND: f32 = 60.0;
const MINUTE_HAND: f32 = 95.0;
const SECOND_HAND_TAIL: f32 = -25.0;
const SECOND_HAND: f32 = 100.0;

/// Commands recorded by the static pass: ring, 12 × (numeral + tick), 61 ticks.
pub const STATIC_COMMANDS: usize = 1 + 12 * 2 + 61;
/// Commands recorded by the dynamic pass.
pub const DYNAMIC_COMMANDS: usize = 6;

/// Records the full face for `moment` into `out`, replacing its contents.
///
/// The face is centered in `viewport` and scaled so the 270-unit design
/// space fits the smaller dimension.
pub fn render_frame(viewport: Viewport, moment: Moment, style: &FaceStyle, out: &mut DrawList) {
    out.clear();

    let transform = Transform::fit(viewport, DESIGN_EXTENT, MIN_SCALE);
    let mut painter = Painter::new(out, transform);

    draw_static(&mut painter, style);
    draw_dynamic(&mut painter, moment, style);
}

fn draw_static(p: &mut Painter<'_>, style: &FaceStyle) {
    p.stroke_circle(Vec2::zero(), RING_RADIUS, style.primary_pen);

    for hour in 1..=12u32 {
        let angle = hours_to_angle(hour as f32);
        let font = if hour % 3 == 0 { style.emphasized } else { style.regular };

        p.text_centered(
            hour.to_string(),
            font,
            style.primary,
            clock_polar_to_cartesian(NUMERAL_DISTANCE, angle),
        );
        p.line(
            clock_polar_to_cartesian(HOUR_TICK_INNER, angle),
            clock_polar_to_cartesian(RING_RADIUS, angle),
            style.primary_pen,
        );
    }

    // 0 and 60 land on the same spot; both are drawn.
    for minute in 0..=60u32 {
        let angle = minutes_to_angle(minute as f32);
        p.line(
            clock_polar_to_cartesian(MINUTE_TICK_INNER, angle),
            clock_polar_to_cartesian(RING_RADIUS, angle),
            style.thin_pen,
        );
    }
}

fn draw_dynamic(p: &mut Painter<'_>, moment: Moment, style: &FaceStyle) {
    p.text_centered(
        moment.day.to_string(),
        style.regular,
        style.highlight,
        clock_polar_to_cartesian(DAY_LABEL_DISTANCE, DAY_LABEL_ANGLE),
    );

    p.fill_circle(Vec2::zero(), HUB_RADIUS, style.primary);

    let hours = moment.hour as f32 + moment.minute as f32 / 60.0;
    p.line(Vec2::zero(), clock_polar_to_cartesian(HOUR_HAND, hours_to_angle(hours)), style.bold_pen);

    let minutes = moment.minute as f32 + moment.second as f32 / 60.0;
    p.line(
        Vec2::zero(),
        clock_polar_to_cartesian(MINUTE_HAND, minutes_to_angle(minutes)),
        style.primary_pen,
    );

    p.fill_circle(Vec2::zero(), SECOND_HUB_RADIUS, style.highlight);

    let angle = seconds_to_angle(moment.second);
    p.line(
        clock_polar_to_cartesian(SECOND_HAND_TAIL, angle),
        clock_polar_to_cartesian(SECOND_HAND, angle),
        style.highlight_pen,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    use horae_engine::scene::{CircleCmd, DrawCmd, LineCmd, TextCmd};
    use horae_engine::text::FontId;

    use crate::style::{EMPHASIZED_SIZE, REGULAR_SIZE};

    const EPS: f32 = 1e-3;

    fn approx_v(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS
    }

    fn style() -> FaceStyle {
        FaceStyle::new(FontId::new(0))
    }

    fn frame(w: f32, h: f32, moment: Moment) -> DrawList {
        let mut list = DrawList::new();
        render_frame(Viewport::new(w, h), moment, &style(), &mut list);
        list
    }

    fn line(list: &DrawList, i: usize) -> &LineCmd {
        match &list.items()[i].cmd {
            DrawCmd::Line(l) => l,
            other => panic!("item {i} is not a line: {other:?}"),
        }
    }

    fn circle(list: &DrawList, i: usize) -> &CircleCmd {
        match &list.items()[i].cmd {
            DrawCmd::Circle(c) => c,
            other => panic!("item {i} is not a circle: {other:?}"),
        }
    }

    fn text(list: &DrawList, i: usize) -> &TextCmd {
        match &list.items()[i].cmd {
            DrawCmd::Text(t) => t,
            other => panic!("item {i} is not text: {other:?}"),
        }
    }

    // Dynamic pass indices.
    const DAY: usize = STATIC_COMMANDS;
    const HUB: usize = STATIC_COMMANDS + 1;
    const HOUR: usize = STATIC_COMMANDS + 2;
    const MINUTE: usize = STATIC_COMMANDS + 3;
    const SECOND_HUB: usize = STATIC_COMMANDS + 4;
    const SECOND: usize = STATIC_COMMANDS + 5;

    const THREE: Moment = Moment::new(3, 0, 0, 15);

    // ── structure ──

    #[test]
    fn records_static_then_dynamic_commands() {
        let list = frame(270.0, 270.0, THREE);
        assert_eq!(STATIC_COMMANDS, 86);
        assert_eq!(list.len(), STATIC_COMMANDS + DYNAMIC_COMMANDS);

        let ring = circle(&list, 0);
        assert_eq!(ring.radius, 120.0);
        assert_eq!(ring.fill, None);
        assert_eq!(ring.stroke, Some(style().primary_pen));

        // 12 numeral/tick pairs, then 61 minute ticks.
        for h in 0..12 {
            text(&list, 1 + 2 * h);
            line(&list, 2 + 2 * h);
        }
        for m in 0..61 {
            assert_eq!(line(&list, 25 + m).stroke, style().thin_pen);
        }

        text(&list, DAY);
        assert_eq!(circle(&list, HUB).fill, Some(style().primary));
        assert_eq!(line(&list, HOUR).stroke, style().bold_pen);
        assert_eq!(line(&list, MINUTE).stroke, style().primary_pen);
        assert_eq!(circle(&list, SECOND_HUB).fill, Some(style().highlight));
        assert_eq!(line(&list, SECOND).stroke, style().highlight_pen);
    }

    #[test]
    fn paint_order_matches_record_order() {
        let mut list = frame(300.0, 200.0, THREE);
        let recorded: Vec<DrawCmd> = list.items().iter().map(|i| i.cmd.clone()).collect();
        let painted: Vec<DrawCmd> = list.iter_in_paint_order().map(|i| i.cmd.clone()).collect();
        assert_eq!(recorded, painted);
    }

    #[test]
    fn only_quarter_hours_are_emphasized() {
        let list = frame(270.0, 270.0, THREE);
        for h in 1..=12u32 {
            let t = text(&list, 1 + 2 * (h as usize - 1));
            assert_eq!(t.text, h.to_string());
            let expected = if h % 3 == 0 { EMPHASIZED_SIZE } else { REGULAR_SIZE };
            assert_eq!(t.size, expected, "numeral {h}");
        }
    }

    #[test]
    fn twelve_sits_at_the_top() {
        let list = frame(270.0, 270.0, THREE);
        let twelve = text(&list, 23);
        assert_eq!(twelve.text, "12");
        assert!(approx_v(twelve.position, Vec2::new(135.0, 45.0)));
    }

    // ── hands ──

    #[test]
    fn three_oclock() {
        let list = frame(270.0, 270.0, THREE);
        let center = Vec2::new(135.0, 135.0);

        assert_eq!(line(&list, HOUR).from, center);
        assert!(approx_v(line(&list, HOUR).to, Vec2::new(195.0, 135.0)));
        assert!(approx_v(line(&list, MINUTE).to, Vec2::new(135.0, 40.0)));

        let second = line(&list, SECOND);
        assert!(approx_v(second.from, Vec2::new(135.0, 160.0)));
        assert!(approx_v(second.to, Vec2::new(135.0, 35.0)));

        let day = text(&list, DAY);
        assert_eq!(day.text, "15");
        assert_eq!(day.color, style().highlight);
        assert_eq!(day.size, REGULAR_SIZE);
        assert!(approx_v(day.position, Vec2::new(182.0, 135.0)));
    }

    #[test]
    fn half_past_six() {
        let list = frame(270.0, 270.0, Moment::new(6, 30, 0, 1));
        let center = Vec2::new(135.0, 135.0);

        let hour = line(&list, HOUR).to - center;
        assert!(approx_v(hour, clock_polar_to_cartesian(60.0, 13.0 * PI / 12.0)));

        let minute = line(&list, MINUTE).to - center;
        assert!(approx_v(minute, Vec2::new(0.0, 95.0)));
    }

    #[test]
    fn hands_use_fractional_progress() {
        // 9:45:30: hour hand three quarters of the way to 10.
        let list = frame(270.0, 270.0, Moment::new(9, 45, 30, 1));
        let center = Vec2::new(135.0, 135.0);

        let hour = line(&list, HOUR).to - center;
        assert!(approx_v(hour, clock_polar_to_cartesian(60.0, hours_to_angle(9.75))));

        let minute = line(&list, MINUTE).to - center;
        assert!(approx_v(minute, clock_polar_to_cartesian(95.0, minutes_to_angle(45.5))));
    }

    #[test]
    fn afternoon_hours_wrap() {
        let am = frame(270.0, 270.0, Moment::new(3, 0, 0, 1));
        let pm = frame(270.0, 270.0, Moment::new(15, 0, 0, 1));
        assert!(approx_v(line(&am, HOUR).to, line(&pm, HOUR).to));
    }

    // ── transform ──

    #[test]
    fn doubling_the_viewport_doubles_the_geometry() {
        let small = frame(270.0, 270.0, Moment::new(10, 8, 42, 28));
        let big = frame(540.0, 540.0, Moment::new(10, 8, 42, 28));
        let (cs, cb) = (Vec2::new(135.0, 135.0), Vec2::new(270.0, 270.0));

        for (s, b) in small.items().iter().zip(big.items()) {
            match (&s.cmd, &b.cmd) {
                (DrawCmd::Line(s), DrawCmd::Line(b)) => {
                    assert!(approx_v((s.from - cs) * 2.0, b.from - cb));
                    assert!(approx_v((s.to - cs) * 2.0, b.to - cb));
                    assert_eq!(s.stroke.width * 2.0, b.stroke.width);
                }
                (DrawCmd::Circle(s), DrawCmd::Circle(b)) => {
                    assert!(approx_v((s.center - cs) * 2.0, b.center - cb));
                    assert_eq!(s.radius * 2.0, b.radius);
                }
                (DrawCmd::Text(s), DrawCmd::Text(b)) => {
                    assert_eq!(s.text, b.text);
                    assert!(approx_v((s.position - cs) * 2.0, b.position - cb));
                    assert!((s.size * 2.0 - b.size).abs() < EPS);
                }
                (s, b) => panic!("command kinds differ: {s:?} vs {b:?}"),
            }
        }
    }

    #[test]
    fn face_fits_the_smaller_dimension() {
        let list = frame(800.0, 270.0, THREE);
        let ring = circle(&list, 0);
        assert_eq!(ring.center, Vec2::new(400.0, 135.0));
        assert_eq!(ring.radius, 120.0);
    }

    #[test]
    fn degenerate_viewport_still_records_finite_geometry() {
        let list = frame(0.0, 0.0, THREE);
        assert_eq!(list.len(), STATIC_COMMANDS + DYNAMIC_COMMANDS);
        assert!(circle(&list, 0).radius > 0.0);
        assert!(line(&list, HOUR).to.is_finite());
    }

    #[test]
    fn same_input_same_frame() {
        let m = Moment::new(23, 59, 59, 31);
        let mut list = frame(321.0, 123.0, m);
        let again = frame(321.0, 123.0, m);
        assert_eq!(list, again);

        // Re-rendering into a used list replaces its contents.
        render_frame(Viewport::new(321.0, 123.0), m, &style(), &mut list);
        assert_eq!(list, again);
    }
}
