use dock_shell::app::Application;
use dock_shell::backend::{HeadlessBackend, PlatformEvent, WindowBackend};
use dock_shell::chrome::Lifecycle;
use dock_shell::settings::{Settings, keys};

fn unlocked_settings() -> Settings {
    let mut settings = Settings::new();
    settings.set_bool(keys::FRAME_RATE_LOCKED, false);
    settings.set_int(keys::WINDOW_POS_X, 0);
    settings.set_int(keys::WINDOW_POS_Y, 0);
    settings.set_int(keys::WINDOW_WIDTH, 800);
    settings.set_int(keys::WINDOW_HEIGHT, 600);
    settings
}

#[test]
fn run_exits_on_close_requested() {
    let mut backend = HeadlessBackend::new();
    backend.queue_event(PlatformEvent::CloseRequested);
    let mut app = Application::new(backend, unlocked_settings());
    app.run("shell").unwrap();
    assert!(!app.is_running());
    assert_eq!(app.chrome().lifecycle(), Lifecycle::Destroyed);
    assert!(!app.chrome().backend().is_created());
}

#[test]
fn window_title_reaches_the_backend() {
    let mut app = Application::new(HeadlessBackend::new(), unlocked_settings());
    app.initialize("my shell").unwrap();
    assert_eq!(app.chrome().backend().title(), "my shell");
    app.chrome_mut().set_title("renamed");
    assert_eq!(app.chrome().backend().title(), "renamed");
}

#[test]
fn minimized_frames_skip_present_but_keep_lifecycle() {
    use dock_shell::backend::headless::RecordedOp;

    let mut app = Application::new(HeadlessBackend::new(), unlocked_settings());
    app.initialize("shell").unwrap();
    app.run_frame().unwrap();
    let presents_before = app
        .chrome()
        .backend()
        .ops
        .iter()
        .filter(|op| matches!(op, RecordedOp::Present))
        .count();
    assert_eq!(presents_before, 1);

    app.chrome_mut().minimize();
    app.run_frame().unwrap();
    app.run_frame().unwrap();
    let presents_after = app
        .chrome()
        .backend()
        .ops
        .iter()
        .filter(|op| matches!(op, RecordedOp::Present))
        .count();
    assert_eq!(presents_after, presents_before);
    assert_eq!(app.chrome().lifecycle(), Lifecycle::Shown);
}

#[test]
fn compositor_flush_precedes_present() {
    use dock_shell::backend::headless::RecordedOp;

    let mut app = Application::new(HeadlessBackend::new(), unlocked_settings());
    app.initialize("shell").unwrap();
    app.run_frame().unwrap();
    let ops = &app.chrome().backend().ops;
    let flush = ops
        .iter()
        .position(|op| matches!(op, RecordedOp::FlushCompositor))
        .unwrap();
    let present = ops
        .iter()
        .position(|op| matches!(op, RecordedOp::Present))
        .unwrap();
    assert!(flush < present);
}
