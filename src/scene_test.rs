use super::*;

#[test]
fn default_config_matches_classic_scene() {
    let config = SceneConfig::default();
    assert_eq!((config.width, config.height), (800, 600));
    assert_eq!((config.left, config.top), (10.0, 10.0));
    assert_eq!(config.background, "lightgray");
    assert_eq!(config.frame_interval_ms, 50);
    assert_eq!(config.loop_mode, LoopMode::Interval);
    assert!(config.validate().is_ok());
}

#[test]
fn empty_object_deserializes_to_defaults() {
    let config: SceneConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, SceneConfig::default());
}

#[test]
fn camel_case_fields_are_read() {
    let config: SceneConfig = serde_json::from_str(
        r#"{ "width": 320, "frameIntervalMs": 16, "loopMode": "animationFrame", "background": "black" }"#,
    )
    .unwrap();
    assert_eq!(config.width, 320);
    assert_eq!(config.height, 600);
    assert_eq!(config.frame_interval_ms, 16);
    assert_eq!(config.loop_mode, LoopMode::AnimationFrame);
    assert_eq!(config.background, "black");
}

#[test]
fn unknown_loop_mode_is_rejected() {
    let result = serde_json::from_str::<SceneConfig>(r#"{ "loopMode": "sometimes" }"#);
    assert!(result.is_err());
}

#[test]
fn zero_size_fails_validation() {
    let config = SceneConfig { width: 0, ..SceneConfig::default() };
    assert!(matches!(config.validate(), Err(GameError::InvalidConfig(_))));
}

#[test]
fn zero_interval_fails_only_for_interval_mode() {
    let interval = SceneConfig { frame_interval_ms: 0, ..SceneConfig::default() };
    assert!(interval.validate().is_err());

    let raf = SceneConfig {
        frame_interval_ms: 0,
        loop_mode: LoopMode::AnimationFrame,
        ..SceneConfig::default()
    };
    assert!(raf.validate().is_ok());
}

#[test]
fn cancelling_a_frame_loop_clears_its_flag() {
    let running = Rc::new(Cell::new(true));
    LoopHandle::AnimationFrame(Rc::clone(&running)).cancel();
    assert!(!running.get());
}
