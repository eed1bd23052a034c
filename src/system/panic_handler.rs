//! Panic handler module
//!
//! Every panic is logged with its location and a captured backtrace. The
//! recovery middleware turns handler panics into a 500 response; this hook
//! only makes sure the stack trace ends up in the logs.

use std::backtrace::Backtrace;
use std::panic::{self, PanicHookInfo};

/// Output style for panic reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanicStyle {
    /// Structured log event only
    Structured,
    /// Log event plus a colored report on stderr
    Development,
}

pub fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

fn panic_location(info: &PanicHookInfo<'_>) -> String {
    info.location()
        .map(|loc| format!("{}:{}:{}", loc.file(), loc.line(), loc.column()))
        .unwrap_or_else(|| "Unknown location".to_string())
}

/// Install custom panic hook
pub fn install_panic_hook(style: PanicStyle) {
    panic::set_hook(Box::new(move |info| {
        let message = panic_message(info.payload());
        let location = panic_location(info);
        let backtrace = Backtrace::force_capture();

        tracing::error!(
            panic.message = %message,
            panic.location = %location,
            panic.backtrace = %backtrace,
            "panic"
        );

        if style == PanicStyle::Development {
            display_development_panic(&message, &location, &backtrace);
        }
    }));
}

fn display_development_panic(message: &str, location: &str, backtrace: &Backtrace) {
    use colored::Colorize;

    eprintln!();
    eprintln!("{}", "═══════════════════════════════════════════════════".red().bold());
    eprintln!("{}", "PANIC".red().bold());
    eprintln!("{}", "═══════════════════════════════════════════════════".red().bold());
    eprintln!("{} {}", "Reason:".yellow().bold(), message.white());
    eprintln!("{} {}", "Location:".yellow().bold(), location.white());
    eprintln!("{}", "Backtrace:".yellow().bold());
    eprintln!("{}", format!("{}", backtrace).dimmed());
    eprintln!("{}", "═══════════════════════════════════════════════════".red().bold());
    eprintln!();
}
