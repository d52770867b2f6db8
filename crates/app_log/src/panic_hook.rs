//! Panic hook for crash reporting

use backtrace::Backtrace;
use chrono::{DateTime, Local};
use std::panic::PanicHookInfo;
use std::path::PathBuf;

/// Initialize the panic hook for crash reporting
pub fn init_panic_hook() {
    std::panic::set_hook(Box::new(panic_handler));
    tracing::debug!("Panic hook initialized");
}

fn panic_handler(info: &PanicHookInfo) {
    let now = Local::now();
    let thread = std::thread::current();
    let report = crash_report(
        now,
        thread.name().unwrap_or("<unnamed>"),
        &info
            .location()
            .map_or_else(|| "<unknown>".to_string(), |l| l.to_string()),
        payload_message(info),
        &Backtrace::new(),
    );

    eprintln!("{}", report);
    tracing::error!("{}", report);

    let dump_path = crash_dump_path(now);
    if let Err(e) = std::fs::write(&dump_path, &report) {
        eprintln!("Failed to write crash dump: {}", e);
    } else {
        eprintln!("Crash report written to {}", dump_path.display());
    }
}

fn payload_message<'a>(info: &'a PanicHookInfo) -> &'a str {
    let payload = info.payload();
    let static_str: Option<&'a str> = payload.downcast_ref::<&'static str>().copied();
    static_str
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("<unknown>")
}

fn crash_report(
    timestamp: DateTime<Local>,
    thread_name: &str,
    location: &str,
    payload: &str,
    backtrace: &Backtrace,
) -> String {
    format!(
        "=== CRITICAL PANIC ===\n\
         Timestamp: {}\n\
         Thread: {}\n\
         Location: {}\n\
         Payload: {}\n\n\
         Stack Trace:\n{:?}",
        timestamp.to_rfc3339(),
        thread_name,
        location,
        payload,
        backtrace
    )
}

fn crash_dump_path(now: DateTime<Local>) -> PathBuf {
    std::env::temp_dir().join(format!("folio_crash_{}.txt", now.format("%Y%m%d_%H%M%S")))
}
