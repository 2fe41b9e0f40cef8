use crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use osctl::{
    ControlWidget, Direction, Encoder, EncoderError, EncoderOptions, EventMeta, InputError,
    MessageSender, OscTarget, ProgressMode,
};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct RecordingSender {
    sent: Mutex<Vec<(String, i32)>>,
}

impl RecordingSender {
    fn sent(&self) -> Vec<(String, i32)> {
        self.sent.lock().unwrap().clone()
    }
}

impl MessageSender for RecordingSender {
    fn send(&self, target: &OscTarget, argument: i32) {
        self.sent
            .lock()
            .unwrap()
            .push((target.route.clone(), argument));
    }
}

fn options() -> EncoderOptions {
    EncoderOptions {
        target: OscTarget::new("/remote/enc/1", "localhost", 10111),
        ..EncoderOptions::default()
    }
}

fn encoder() -> (Encoder, Arc<RecordingSender>) {
    let sender = Arc::new(RecordingSender::default());
    let encoder = Encoder::new(options(), sender.clone()).expect("valid options");
    (encoder, sender)
}

fn wheel(kind: MouseEventKind) -> MouseEvent {
    MouseEvent {
        kind,
        column: 0,
        row: 0,
        modifiers: KeyModifiers::NONE,
    }
}

#[test]
fn construction_rejects_bad_options() {
    let sender = Arc::new(RecordingSender::default());
    let cases = [
        (
            EncoderOptions::default(),
            EncoderError::EmptyRoute,
        ),
        (
            EncoderOptions {
                center_percent: 101,
                ..options()
            },
            EncoderError::InvalidCenterPercent(101),
        ),
        (
            EncoderOptions {
                center_percent: -1,
                ..options()
            },
            EncoderError::InvalidCenterPercent(-1),
        ),
        (
            EncoderOptions {
                start_angle: 360,
                ..options()
            },
            EncoderError::InvalidStartAngle(360),
        ),
        (
            EncoderOptions {
                target: OscTarget::new("remote/enc/1", "localhost", 10111),
                ..options()
            },
            EncoderError::InvalidRoute("remote/enc/1".to_string()),
        ),
        (
            EncoderOptions {
                target: OscTarget::new("/remote/enc/1", "localhost", 0),
                ..options()
            },
            EncoderError::InvalidPort,
        ),
    ];
    for (opts, expected) in cases {
        match Encoder::new(opts, sender.clone()) {
            Err(err) => assert_eq!(err, expected),
            Ok(_) => panic!("expected {expected}"),
        }
    }
}

#[test]
fn new_encoder_starts_empty_at_start_angle() {
    let sender = Arc::new(RecordingSender::default());
    let encoder = Encoder::new(
        EncoderOptions {
            start_angle: 45,
            ..options()
        },
        sender,
    )
    .unwrap();
    let state = encoder.state();
    assert_eq!(state.current, 0);
    assert_eq!(state.total, 100);
    assert_eq!(state.angle, 45);
}

#[test]
fn percent_accepts_whole_range() {
    let (encoder, _) = encoder();
    for p in 0..=100 {
        encoder.set_percent(p).unwrap();
        let state = encoder.state();
        assert_eq!((state.current, state.total), (p, 100));
        assert_eq!(state.mode, ProgressMode::Percent);
    }
}

#[test]
fn percent_out_of_range_leaves_state() {
    let (encoder, _) = encoder();
    encoder.set_percent(42).unwrap();
    for p in [-1, 101, i32::MIN, i32::MAX] {
        assert_eq!(encoder.set_percent(p), Err(EncoderError::InvalidPercent(p)));
        assert_eq!(encoder.state().current, 42);
    }
}

#[test]
fn absolute_sets_scale_and_text() {
    let (encoder, _) = encoder();
    encoder.set_absolute(5, 10).unwrap();
    let state = encoder.state();
    assert_eq!((state.current, state.total), (5, 10));
    assert_eq!(state.progress_text(), "5/10");

    encoder.set_percent(50).unwrap();
    assert_eq!(encoder.state().progress_text(), "50%");
}

#[test]
fn absolute_rejects_bad_scale() {
    let (encoder, _) = encoder();
    encoder.set_absolute(3, 4).unwrap();
    for (value, total) in [(1, 0), (0, -5), (11, 10), (-1, 10)] {
        assert_eq!(
            encoder.set_absolute(value, total),
            Err(EncoderError::InvalidAbsolute { value, total })
        );
    }
    let state = encoder.state();
    assert_eq!((state.current, state.total), (3, 4));
}

#[test]
fn overrides_commit_with_value() {
    let (encoder, _) = encoder();
    encoder
        .set_percent_with(30, |opts| {
            opts.center_percent = 40;
            opts.start_angle = 180;
            opts.direction = Direction::CounterClockwise;
        })
        .unwrap();
    let opts = encoder.encoder_options();
    assert_eq!(opts.center_percent, 40);
    assert_eq!(opts.direction, Direction::CounterClockwise);
    let state = encoder.state();
    assert_eq!(state.current, 30);
    assert_eq!(state.angle, 180);
}

#[test]
fn invalid_overrides_change_nothing() {
    let (encoder, _) = encoder();
    encoder.set_percent(10).unwrap();
    let before = encoder.encoder_options();

    let err = encoder
        .set_percent_with(20, |opts| {
            opts.label = "changed".to_string();
            opts.start_angle = 400;
        })
        .unwrap_err();
    assert_eq!(err, EncoderError::InvalidStartAngle(400));
    assert_eq!(encoder.state().current, 10);
    assert_eq!(encoder.encoder_options(), before);

    let err = encoder
        .set_absolute_with(2, 4, |opts| opts.target.route.clear())
        .unwrap_err();
    assert_eq!(err, EncoderError::EmptyRoute);
    assert_eq!(encoder.state().current, 10);
}

#[test]
fn set_options_is_validated() {
    let (encoder, _) = encoder();
    let bad = EncoderOptions {
        center_percent: 200,
        ..options()
    };
    assert!(encoder.set_options(bad).is_err());
    assert_eq!(encoder.encoder_options().center_percent, 15);

    let good = EncoderOptions {
        label: "E9".to_string(),
        ..options()
    };
    encoder.set_options(good).unwrap();
    assert_eq!(encoder.encoder_options().label, "E9");
}

#[test]
fn wheel_down_wraps_forward() {
    let (encoder, sender) = encoder();
    encoder
        .handle_mouse(&wheel(MouseEventKind::ScrollDown), &EventMeta::default())
        .unwrap();
    assert_eq!(encoder.state().current, 1);
    assert_eq!(sender.sent(), vec![("/remote/enc/1".to_string(), 1)]);

    encoder.set_percent(99).unwrap();
    encoder
        .handle_mouse(&wheel(MouseEventKind::ScrollDown), &EventMeta::default())
        .unwrap();
    assert_eq!(encoder.state().current, 0);
}

#[test]
fn wheel_up_from_zero_wraps_to_last() {
    let (encoder, sender) = encoder();
    encoder
        .handle_mouse(&wheel(MouseEventKind::ScrollUp), &EventMeta::default())
        .unwrap();
    assert_eq!(encoder.state().current, 99);
    assert_eq!(sender.sent(), vec![("/remote/enc/1".to_string(), -1)]);

    encoder.set_absolute(0, 8).unwrap();
    encoder
        .handle_mouse(&wheel(MouseEventKind::ScrollUp), &EventMeta::default())
        .unwrap();
    assert_eq!(encoder.state().current, 7);
}

#[test]
fn other_mouse_events_send_nothing() {
    let (encoder, sender) = encoder();
    encoder.set_percent(5).unwrap();
    for kind in [
        MouseEventKind::Down(MouseButton::Left),
        MouseEventKind::Moved,
        MouseEventKind::Up(MouseButton::Right),
    ] {
        encoder.handle_mouse(&wheel(kind), &EventMeta::default()).unwrap();
    }
    assert_eq!(encoder.state().current, 5);
    assert!(sender.sent().is_empty());
}

#[test]
fn keyboard_is_unsupported() {
    let (encoder, sender) = encoder();
    let key = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
    assert_eq!(
        encoder.handle_keyboard(&key, &EventMeta::default()),
        Err(InputError::Unsupported("Encoder"))
    );
    assert!(sender.sent().is_empty());
}

#[test]
fn widget_options_describe_circle() {
    let (encoder, _) = encoder();
    let opts = encoder.options();
    assert_eq!(opts.ratio, (4, 2));
    assert_eq!(opts.minimum_size, (3, 3));
    assert!(!opts.want_keyboard);
    assert!(opts.want_mouse);
}
