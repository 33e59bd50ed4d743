//! Terminal progress for the CLIs.
//!
//! Bars and spinners draw on stderr so stdout stays clean for the report.
//! With `--log-only` they are hidden and phases print `[PHASE] n/total` lines
//! instead. Library code never creates a visible bar on its own: callers hand
//! in a bar, or `ProgressBar::hidden()`.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Set once from args in main
static LOG_ONLY: AtomicBool = AtomicBool::new(false);

pub const BAR_TEMPLATE: &str = "{msg} [{elapsed_precise}] [{bar:30.cyan/blue}] {pos}/{len} entries";
pub const SPINNER_TEMPLATE: &str = "{spinner} {msg} [{elapsed_precise}]";

pub fn set_log_only(value: bool) {
    LOG_ONLY.store(value, Ordering::Relaxed);
}

pub fn is_log_only() -> bool {
    LOG_ONLY.load(Ordering::Relaxed)
}

/// "250ms" under a second, "1.5s" above.
pub fn format_duration(d: Duration) -> String {
    if d < Duration::from_secs(1) {
        format!("{}ms", d.as_millis())
    } else {
        format!("{:.1}s", d.as_secs_f64())
    }
}

/// Point `pb` at stderr with `template`, or hide it in log-only mode.
/// A template that fails to parse leaves indicatif's default style.
fn attach(pb: ProgressBar, template: &str) -> ProgressBar {
    if is_log_only() {
        pb.set_draw_target(ProgressDrawTarget::hidden());
        return pb;
    }
    pb.set_draw_target(ProgressDrawTarget::stderr());
    if let Ok(style) = ProgressStyle::with_template(template) {
        pb.set_style(style.progress_chars("=> "));
    }
    pb
}

/// Bar for a lineup phase. Length starts at zero; the consumer sets it once
/// the entry count is known (`pipeline::match_entries` does).
pub fn create_progress_bar(msg: &str) -> ProgressBar {
    let pb = attach(ProgressBar::new(0), BAR_TEMPLATE);
    pb.set_message(msg.to_string());
    pb
}

/// Spinner for steps with no known length, such as loading reference data.
pub fn create_spinner(msg: &str) -> ProgressBar {
    let pb = attach(ProgressBar::new_spinner(), SPINNER_TEMPLATE);
    if !pb.is_hidden() {
        pb.enable_steady_tick(Duration::from_millis(100));
    }
    pb.set_message(msg.to_string());
    pb
}

/// The log-only line for `current` of `total`, if one is due.
/// Lines are due every `interval` items and on the last one.
pub fn progress_line(phase: &str, current: u64, total: u64, interval: u64) -> Option<String> {
    if total == 0 || interval == 0 {
        return None;
    }
    if current % interval != 0 && current != total {
        return None;
    }
    let pct = 100.0 * current as f64 / total as f64;
    Some(format!("[{}] {}/{} ({:.1}%)", phase, current, total, pct))
}

/// Print `progress_line` to stderr in log-only mode.
pub fn log_progress(phase: &str, current: u64, total: u64, interval: u64) {
    if !is_log_only() {
        return;
    }
    if let Some(line) = progress_line(phase, current, total, interval) {
        eprintln!("{}", line);
    }
}
