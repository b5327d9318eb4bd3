//! CLI progress display utilities
//!
//! Step indicators with emojis for multi-stage commands such as `export`.

use std::time::Duration;

use console::{Emoji, style};

// =============================================================================
// Emoji Constants (with ASCII fallbacks for terminals without emoji support)
// =============================================================================

/// Magnifying glass - for reading/scanning operations
pub static LOOKING_GLASS: Emoji<'_, '_> = Emoji("🔍 ", "");
/// Floppy disk - for writing/saving operations
pub static DISK: Emoji<'_, '_> = Emoji("💾 ", "");
/// Sparkles - for completion
pub static SPARKLE: Emoji<'_, '_> = Emoji("✨ ", "");

/// Print a step indicator: `[1/2] 🔍 Message...`
///
/// # Example
/// ```ignore
/// print_step(1, 2, LOOKING_GLASS, "Reading scene...");
/// print_step(2, 2, DISK, "Writing blob...");
/// ```
pub fn print_step(current: usize, total: usize, emoji: Emoji, msg: &str) {
    println!(
        "{} {}{}",
        style(format!("[{current}/{total}]")).bold().dim(),
        emoji,
        msg
    );
}

/// Print completion message: `✨ Done in 12.3ms`
pub fn print_done(elapsed: Duration) {
    println!("{SPARKLE} Done in {elapsed:.1?}");
}

/// Print a failure line in red, for soft failures the command still reports on.
pub fn print_error(msg: &str) {
    eprintln!("{}", style(msg).red().bold());
}
