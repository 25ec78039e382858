use colored::Colorize;
use std::sync::atomic::{AtomicBool, Ordering};

static QUIET: AtomicBool = AtomicBool::new(false);
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Disable colors when stdout is not a terminal or NO_COLOR is set.
pub fn init_colors() {
    if std::env::var_os("NO_COLOR").is_some() || !atty::is(atty::Stream::Stdout) {
        colored::control::set_override(false);
    }
}

pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::Relaxed);
}

pub fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

pub fn header(title: &str) {
    if !is_quiet() {
        println!("\n{}", title.bold().underline());
    }
}

pub fn success(msg: &str) {
    if !is_quiet() {
        println!("{} {}", "✓".green().bold(), msg);
    }
}

pub fn info(msg: &str) {
    if !is_quiet() {
        println!("{} {}", "ℹ".blue().bold(), msg);
    }
}

pub fn verbose(msg: &str) {
    if is_verbose() && !is_quiet() {
        println!("  {}", msg.dimmed());
    }
}

pub fn warning(msg: &str) {
    eprintln!("{} {}", "⚠".yellow().bold(), msg);
}

pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red().bold(), msg);
}

pub fn separator() {
    if !is_quiet() {
        println!("{}", "─".repeat(60).bright_black());
    }
}

pub fn keyval(key: &str, val: &str) {
    if !is_quiet() {
        println!("{}: {}", key.bold(), val);
    }
}

pub fn indent(msg: &str, level: usize) {
    if !is_quiet() {
        let spaces = " ".repeat(level * 2);
        println!("{}{}", spaces, msg);
    }
}
