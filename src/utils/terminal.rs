//! Terminal output utilities

use console::style;

/// Print a stage banner, e.g. `----- Building -----`
pub fn print_stage_title(title: &str) {
    println!("{}", style(format!("----- {} -----", title)).bold());
}

/// Print a warning message to stderr
pub fn print_warning(message: &str) {
    eprintln!("{}: {}", style("warning").yellow().bold(), message);
}

/// Print an error message to stderr
pub fn print_error(message: &str) {
    eprintln!("{}: {}", style("error").red().bold(), message);
}

/// Disable colors on both output streams
pub fn disable_colors() {
    console::set_colors_enabled(false);
    console::set_colors_enabled_stderr(false);
}
