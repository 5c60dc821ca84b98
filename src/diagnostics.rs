//! Process-wide diagnostics for failures nothing else handled.

use std::backtrace::Backtrace;
use std::error::Error as _;
use std::fmt::Write as _;

use chrono::Local;
use tracing::error;

use crate::error::SimError;

const RULE: &str = "================================================================================";

/// Install a panic hook that prints a detailed report and exits with status 1.
pub fn install_error_handler() {
    std::panic::set_hook(Box::new(|info| {
        let message = info
            .payload()
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "<non-string panic payload>".to_string());
        let location = info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_else(|| "<unknown>".to_string());

        error!(%message, %location, "panic");

        eprintln!("\n{RULE}");
        eprintln!("EXCEPTION INTERCEPTED");
        eprintln!("{RULE}");
        eprintln!("Time: {}", Local::now().format("%Y-%m-%d %H:%M:%S"));
        eprintln!("Panic Message: {message}");
        eprintln!("\nError Location: {location}");
        eprintln!("\nFull Stack Trace:");
        eprintln!("{}", "-".repeat(RULE.len()));
        eprintln!("{}", Backtrace::force_capture());
        eprintln!("{RULE}");

        std::process::exit(1);
    }));
}

/// Render an uncaught error: kind, message, and every cause in the chain.
pub fn format_error_report(err: &SimError) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "ERROR");
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "Time: {}", Local::now().format("%Y-%m-%d %H:%M:%S"));
    let _ = writeln!(out, "Error Kind: {}", err.kind());
    let _ = writeln!(out, "Error Message: {err}");

    let mut source = err.source();
    let mut depth = 1;
    while let Some(cause) = source {
        let _ = writeln!(out, "  caused by [{depth}]: {cause}");
        source = cause.source();
        depth += 1;
    }
    let _ = write!(out, "{RULE}");
    out
}

/// Log and print `err`, then exit with status 1.
pub fn report_fatal(err: &SimError) -> ! {
    error!(kind = err.kind(), error = %err, "uncaught error");
    eprintln!("{}", format_error_report(err));
    std::process::exit(1)
}
