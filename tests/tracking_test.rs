use std::collections::VecDeque;

use gesturetrack_rs::tracker::landmark::{INDEX_MCP, INDEX_TIP, PINKY_MCP, WRIST};
use gesturetrack_rs::{
    Cursor, DebounceConfig, Frame, FrameSize, FrameSource, GestureClassifier, GestureConfig,
    GestureLabel, GesturePipeline, GestureTracker, HandCandidate, HandCandidateBuilder,
    HandSelector, Landmark, LandmarkSource, LockState, OneEuroFilter, SelectionOutcome,
    StrokeCommand, StrokeController, TemporalDebouncer, Tool,
};
use nalgebra::Point2;

const POINT: [bool; 5] = [false, true, false, false, false];
const PALM: [bool; 5] = [true; 5];
const FIST: [bool; 5] = [false; 5];

/// Upright right hand with its wrist at (0.5 + dx, 0.8 + dy).
fn hand(extended: [bool; 5], dx: f32, dy: f32) -> HandCandidate {
    let mut pts = [[0.0_f32; 3]; 21];
    pts[0] = [0.5, 0.8, 0.0];

    for (finger, bx) in [0.44_f32, 0.48, 0.52, 0.56].into_iter().enumerate() {
        let mcp = 5 + finger * 4;
        pts[mcp] = [bx, 0.6, 0.0];
        pts[mcp + 1] = [bx, 0.5, 0.0];
        if extended[finger + 1] {
            pts[mcp + 2] = [bx, 0.42, -0.03];
            pts[mcp + 3] = [bx, 0.35, -0.06];
        } else {
            pts[mcp + 2] = [bx, 0.56, 0.01];
            pts[mcp + 3] = [bx, 0.62, 0.02];
        }
    }

    pts[1] = [0.45, 0.75, 0.0];
    pts[2] = [0.41, 0.69, 0.0];
    pts[3] = [0.38, 0.64, 0.0];
    pts[4] = if extended[0] {
        [0.30, 0.58, 0.0]
    } else {
        [0.50, 0.62, 0.0]
    };

    for p in pts.iter_mut() {
        p[0] += dx;
        p[1] += dy;
    }

    HandCandidateBuilder::new()
        .points(&pts)
        .handedness("Right")
        .build()
        .unwrap()
}

fn pixels(lm: Landmark) -> Cursor {
    let (x, y) = lm.to_pixels(FrameSize::default());
    Cursor::new(x, y)
}

#[test]
fn test_lock_persists_through_short_occlusion() {
    let mut tracker = GestureTracker::default();
    let followed = hand(POINT, -0.2, 0.0);
    tracker.update(&[followed.clone()], 0.0);
    let locked_wrist = tracker.hand_state().last_wrist;
    assert_eq!(locked_wrist, Some(followed.wrist().xy()));

    for i in 1..=15 {
        let out = tracker.update(&[], i as f64 / 60.0);
        assert_eq!(out.selection, SelectionOutcome::Lost);
        assert_eq!(tracker.hand_state().last_wrist, locked_wrist);
        assert_eq!(tracker.hand_state().lost_frames, i);
    }

    // A re-centering selector would pick the hand nearer the frame center.
    let centered = hand(POINT, 0.0, 0.0);
    let out = tracker.update(&[centered, followed.clone()], 16.0 / 60.0);
    assert_eq!(out.selection, SelectionOutcome::Tracked);
    assert_eq!(tracker.hand_state().last_wrist, Some(followed.wrist().xy()));
    assert_eq!(tracker.hand_state().lost_frames, 0);
}

#[test]
fn test_lock_resets_after_max_lost_frames() {
    let config = GestureConfig {
        debounce: DebounceConfig { window_size: 1 },
        ..GestureConfig::default()
    };
    let mut tracker = GestureTracker::new(&config);
    let left = hand(POINT, -0.2, 0.0);
    let mut t = 0.0;
    for _ in 0..5 {
        tracker.update(&[left.clone()], t);
        t += 1.0 / 60.0;
    }

    for i in 1..=16 {
        let out = tracker.update(&[], t);
        t += 1.0 / 60.0;
        if i <= 15 {
            assert_eq!(out.selection, SelectionOutcome::Lost);
        } else {
            assert_eq!(out.selection, SelectionOutcome::Released);
        }
    }
    assert_eq!(tracker.hand_state().state, LockState::Unlocked);
    assert_eq!(tracker.hand_state().last_wrist, None);

    let centered = hand(POINT, 0.0, 0.0);
    let out = tracker.update(&[left, centered.clone()], t);
    assert_eq!(out.selection, SelectionOutcome::Acquired);
    assert_eq!(tracker.hand_state().last_wrist, Some(centered.wrist().xy()));

    // Smoothing history is gone: the cursor is the raw fingertip.
    assert_eq!(out.gesture, GestureLabel::Drawing);
    assert_eq!(out.cursor, pixels(centered.landmark(INDEX_TIP)));
}

#[test]
fn test_repeated_jumps_release_like_empty_ticks() {
    let mut tracker = GestureTracker::default();
    let followed = hand(FIST, -0.2, 0.0);
    tracker.update(&[followed.clone()], 0.0);

    // Wrist 0.4 away from the lock, beyond the 0.3 jump threshold.
    let stranger = hand(FIST, 0.2, 0.0);
    for i in 1..=16 {
        let out = tracker.update(&[stranger.clone()], i as f64 / 60.0);
        assert!(!out.is_tracking, "tick {i}");
        if i <= 15 {
            assert_eq!(out.selection, SelectionOutcome::Lost, "tick {i}");
            assert_eq!(tracker.hand_state().last_wrist, Some(followed.wrist().xy()));
            assert_eq!(tracker.hand_state().lost_frames, i);
        } else {
            assert_eq!(out.selection, SelectionOutcome::Released);
        }
    }
    assert_eq!(tracker.hand_state().state, LockState::Unlocked);

    let out = tracker.update(&[stranger.clone()], 17.0 / 60.0);
    assert_eq!(out.selection, SelectionOutcome::Acquired);
    assert_eq!(tracker.hand_state().last_wrist, Some(stranger.wrist().xy()));
}

#[test]
fn test_selector_is_idempotent_on_static_hand() {
    let mut selector = HandSelector::default();
    let still = hand(FIST, 0.02, -0.1);
    let far = hand(FIST, 0.45, 0.15);

    for _ in 0..30 {
        let sel = selector.select(&[still.clone(), far.clone()]);
        assert_eq!(sel.index, Some(0));
        assert_eq!(selector.state().last_wrist, Some(still.wrist().xy()));
    }
}

#[test]
fn test_smoother_never_overshoots() {
    let mut filter = OneEuroFilter::default();
    filter.smooth_point(Point2::new(0.0, 0.0), 0.0);
    let out = filter.smooth_point(Point2::new(10.0, 10.0), 1.0 / 60.0);
    assert!((0.0..=10.0).contains(&out.x));
    assert!((0.0..=10.0).contains(&out.y));
}

#[test]
fn test_classifier_fixtures() {
    let classifier = GestureClassifier::default();
    let frame = FrameSize::default();

    let pointing = hand(POINT, 0.0, 0.0);
    let raw = classifier.classify(&pointing, frame);
    assert_eq!(raw.label, GestureLabel::Drawing);
    assert_eq!(raw.cursor, pixels(pointing.landmark(INDEX_TIP)));

    let palm = hand(PALM, 0.0, 0.0);
    let raw = classifier.classify(&palm, frame);
    assert_eq!(raw.label, GestureLabel::Erasing);
    let center = Landmark::mean(&[
        palm.landmark(WRIST),
        palm.landmark(INDEX_MCP),
        palm.landmark(PINKY_MCP),
    ]);
    assert_eq!(raw.cursor, pixels(center));

    let fist = classifier.classify(&hand(FIST, 0.0, 0.0), frame);
    assert_eq!(fist.label, GestureLabel::Idle);
    assert!(fist.cursor.is_sentinel());
}

#[test]
fn test_debounce_sequences() {
    use GestureLabel::{Drawing, Idle};

    let mut d = TemporalDebouncer::default();
    let stable = [Drawing, Drawing, Drawing, Idle]
        .into_iter()
        .map(|l| d.push(l))
        .last();
    assert_eq!(stable, Some(Drawing));

    let mut d = TemporalDebouncer::default();
    let stable = [Drawing, Idle, Drawing, Idle]
        .into_iter()
        .map(|l| d.push(l))
        .last();
    assert_eq!(stable, Some(Idle));
}

#[test]
fn test_draw_then_release_scenario() {
    let mut tracker = GestureTracker::default();
    let pointing = hand(POINT, 0.0, 0.0);
    let fist = hand(FIST, 0.0, 0.0);

    for tick in 1..=20 {
        let current = if tick <= 10 { &pointing } else { &fist };
        let out = tracker.update(std::slice::from_ref(current), tick as f64 / 60.0);

        if (3..=11).contains(&tick) {
            assert_eq!(out.gesture, GestureLabel::Drawing, "tick {tick}");
        }
        if tick >= 12 {
            assert_eq!(out.gesture, GestureLabel::Idle, "tick {tick}");
        }
        if out.gesture == GestureLabel::Idle || out.gesture != out.raw {
            assert!(out.cursor.is_sentinel(), "tick {tick}");
        } else {
            assert!(!out.cursor.is_sentinel(), "tick {tick}");
        }
    }
}

struct Camera {
    frames: usize,
}

impl FrameSource for Camera {
    fn grab(&mut self) -> Option<Frame> {
        if self.frames == 0 {
            return None;
        }
        self.frames -= 1;
        Some(Frame::new(vec![0; 4], 640, 480))
    }
}

struct Script {
    hands: VecDeque<Vec<HandCandidate>>,
}

impl LandmarkSource for Script {
    type Error = std::convert::Infallible;

    fn detect(
        &mut self,
        _input: &[u8],
        _width: u32,
        _height: u32,
    ) -> Result<Vec<HandCandidate>, Self::Error> {
        Ok(self.hands.pop_front().unwrap_or_default())
    }
}

#[test]
fn test_pipeline_drives_stroke() {
    let mut hands = VecDeque::new();
    for i in 0..6 {
        hands.push_back(vec![hand(POINT, i as f32 * 0.01, 0.0)]);
    }
    for _ in 0..4 {
        hands.push_back(vec![hand(FIST, 0.05, 0.0)]);
    }

    let config = GestureConfig::default();
    let mut pipeline = GesturePipeline::new(Camera { frames: 10 }, Script { hands }, &config);
    let mut stroke = StrokeController::new(config.stroke.clone(), config.frame);

    let mut commands = Vec::new();
    for _ in 0..12 {
        let result = pipeline.tick();
        commands.push(stroke.apply(&result));
    }

    assert!(matches!(
        commands[0],
        StrokeCommand::Begin {
            tool: Tool::Brush,
            ..
        }
    ));
    assert!(
        commands[1..6]
            .iter()
            .all(|c| matches!(c, StrokeCommand::Continue(_)))
    );
    assert_eq!(commands[6], StrokeCommand::End);
    assert!(commands[7..].iter().all(|c| *c == StrokeCommand::None));
    assert_eq!(stroke.active_tool(), None);
}
