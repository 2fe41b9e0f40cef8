use osctl::config::LabelAlign;
use osctl::{
    ConfigError, DashboardConfig, Direction, EncoderError, KeyToggle, MessageSender, OscTarget,
    PlayMode,
};
use ratatui::{layout::Alignment, style::Color};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Default)]
struct RecordingSender {
    sent: Mutex<Vec<(OscTarget, i32)>>,
}

impl MessageSender for RecordingSender {
    fn send(&self, target: &OscTarget, argument: i32) {
        self.sent.lock().unwrap().push((target.clone(), argument));
    }
}

#[test]
fn defaults_describe_three_encoders_and_keys() {
    let config = DashboardConfig::default();
    assert_eq!(config.osc.host, "localhost");
    assert_eq!(config.osc.port, 10111);

    let options = config.encoder_options().unwrap();
    let routes: Vec<_> = options.iter().map(|o| o.target.route.as_str()).collect();
    assert_eq!(routes, ["/remote/enc/1", "/remote/enc/2", "/remote/enc/3"]);
    let labels: Vec<_> = options.iter().map(|o| o.label.as_str()).collect();
    assert_eq!(labels, ["E1", "E2", "E3"]);
    assert!(options.iter().all(|o| o.cell_style.fg == Some(Color::Green)));
    assert!(options.iter().all(|o| o.start_angle == 90 && o.center_percent == 15));

    let keys = config.key_toggles().unwrap();
    let bindings: Vec<_> = keys.iter().map(|k| (k.key, k.target.route.as_str())).collect();
    assert_eq!(
        bindings,
        [('1', "/remote/key/1"), ('2', "/remote/key/2"), ('3', "/remote/key/3")]
    );

    let plan = config.encoders[0].plan();
    assert_eq!(plan.start, 25);
    assert_eq!(plan.step, 1);
    assert_eq!(plan.delay, Duration::from_millis(60));
    assert_eq!(plan.mode, PlayMode::Percent);
}

#[test]
fn toml_overrides_defaults() {
    let config = DashboardConfig::from_toml_str(
        r#"
        [osc]
        host = "10.0.0.7"
        port = 9000

        [[encoders]]
        label = "Cutoff"
        route = "/synth/cutoff"
        color = "magenta"
        center_percent = 40
        start_angle = 0
        direction = "counter-clockwise"
        label_align = "right"
        mode = "absolute"
        delay_ms = 0
        "#,
    )
    .unwrap();

    assert_eq!(config.encoders.len(), 1);
    assert_eq!(config.keys.len(), 3);
    assert_eq!(config.encoders[0].label_align, LabelAlign::Right);

    let opts = &config.encoder_options().unwrap()[0];
    assert_eq!(opts.target, OscTarget::new("/synth/cutoff", "10.0.0.7", 9000));
    assert_eq!(opts.direction, Direction::CounterClockwise);
    assert_eq!(opts.label_align, Alignment::Right);
    assert_eq!(opts.cell_style.fg, Some(Color::Magenta));
    assert_eq!(opts.center_percent, 40);

    let plan = config.encoders[0].plan();
    assert_eq!(plan.mode, PlayMode::Absolute);
    assert_eq!(plan.delay, Duration::from_millis(1));

    let keys = config.key_toggles().unwrap();
    assert_eq!(keys[0].target.host, "10.0.0.7");
}

#[test]
fn command_line_endpoint_wins() {
    let config = DashboardConfig::default().with_endpoint(Some("192.168.1.20".to_string()), None);
    assert_eq!(config.osc.host, "192.168.1.20");
    assert_eq!(config.osc.port, 10111);

    let config = config.with_endpoint(None, Some(57120));
    let opts = config.encoder_options().unwrap();
    assert_eq!(opts[2].target.port, 57120);
    assert_eq!(opts[2].target.host, "192.168.1.20");
}

#[test]
fn invalid_encoder_is_fatal() {
    let err = DashboardConfig::from_toml_str(
        r#"
        [[encoders]]
        label = "E1"
        route = "/remote/enc/1"
        start_angle = 360
        "#,
    )
    .unwrap()
    .encoder_options()
    .unwrap_err();
    match err {
        ConfigError::Encoder { label, source } => {
            assert_eq!(label, "E1");
            assert_eq!(source, EncoderError::InvalidStartAngle(360));
        }
        other => panic!("unexpected error {other}"),
    }

    let missing_route = DashboardConfig::from_toml_str("[[encoders]]\nlabel = \"E1\"\n")
        .unwrap()
        .encoder_options();
    assert!(matches!(
        missing_route,
        Err(ConfigError::Encoder {
            source: EncoderError::EmptyRoute,
            ..
        })
    ));
}

#[test]
fn bad_color_and_key_are_rejected() {
    let config = DashboardConfig::from_toml_str(
        "[[encoders]]\nroute = \"/e\"\ncolor = \"not-a-color\"\n",
    )
    .unwrap();
    assert!(matches!(
        config.encoder_options(),
        Err(ConfigError::InvalidColor(name)) if name == "not-a-color"
    ));

    let config =
        DashboardConfig::from_toml_str("[[keys]]\nkey = \"12\"\nroute = \"/k\"\n").unwrap();
    assert!(matches!(config.key_toggles(), Err(ConfigError::InvalidKey(_))));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let err = DashboardConfig::from_toml_str("[osc\nport = 1").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));

    let err = DashboardConfig::load("/nonexistent/osctl.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn key_toggle_alternates_and_reports() {
    let sender = RecordingSender::default();
    let mut key = KeyToggle::new("K1", '1', OscTarget::new("/remote/key/1", "localhost", 10111));
    assert_eq!(key.state(), 0);
    assert_eq!(key.toggle(&sender), 1);
    assert_eq!(key.toggle(&sender), 0);
    assert_eq!(key.toggle(&sender), 1);

    let sent: Vec<i32> = sender.sent.lock().unwrap().iter().map(|(_, arg)| *arg).collect();
    assert_eq!(sent, [1, 0, 1]);
    assert!(key.matches('1'));
    assert!(!key.matches('2'));
}

#[test]
fn driver_settings_are_checked_on_load() {
    let cases = [
        ("start = 150", "start", 150),
        ("start = -1", "start", -1),
        ("step = 0", "step", 0),
        ("step = -3", "step", -3),
        ("step = 101", "step", 101),
    ];
    for (line, expected_field, expected_value) in cases {
        let text = format!("[[encoders]]\nlabel = \"E1\"\nroute = \"/e\"\n{line}\n");
        match DashboardConfig::from_toml_str(&text) {
            Err(ConfigError::InvalidPlan {
                label, field, value, ..
            }) => {
                assert_eq!(label, "E1");
                assert_eq!(field, expected_field);
                assert_eq!(value, expected_value);
            }
            other => panic!("{line}: expected invalid plan, got {other:?}"),
        }
    }

    let edges = DashboardConfig::from_toml_str(
        "[[encoders]]\nroute = \"/e\"\nstart = 100\nstep = 100\n",
    )
    .unwrap();
    let plan = edges.encoders[0].plan();
    assert_eq!((plan.start, plan.step), (100, 100));
}
