use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

static TUI_MODE: AtomicBool = AtomicBool::new(false);

pub fn init_logger(level: log::LevelFilter) {
    // Every record goes to tui-logger so the log pane has history once the
    // terminal UI starts; the console only sees records before that.
    let drain = tui_logger::Drain::new();
    let result = env_logger::Builder::default()
        .filter_level(level)
        .filter_module("reqwest", log::LevelFilter::Warn)
        .filter_module("hyper", log::LevelFilter::Warn)
        .format(move |buf, record| {
            drain.log(record);

            if TUI_MODE.load(Ordering::Relaxed) {
                return Ok(());
            }

            let timestamp = chrono::Local::now().format("%H:%M:%S").to_string();
            let level = record.level();
            let message = record.args();
            let target = record.target();

            if target != record.module_path().unwrap_or("unknown") {
                writeln!(buf, "[{timestamp}] {level} [{target}]: {message}")
            } else {
                writeln!(buf, "[{timestamp}] {level}: {message}")
            }
        })
        .try_init();

    if let Err(e) = result {
        eprintln!("Logger already initialized: {e}");
    }
    tui_logger::set_default_level(level);

    log::debug!("Logger initialized with {level} level");
}

pub fn switch_to_tui_logging() {
    TUI_MODE.store(true, Ordering::Relaxed);
    log::info!("Switched to TUI logging mode");
}

pub fn switch_to_console_logging() {
    TUI_MODE.store(false, Ordering::Relaxed);
}
