//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.
//! Status lines go to stderr so stdout stays clean for GeoJSON.

use colored::Colorize;

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Print success status (green checkmark) to stderr
pub fn success(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{} {}", "✓".green(), msg);
}

/// Print failure status (red X, indented)
pub fn failure(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("  {} {}", "✗".red(), msg);
}

/// Print labelled statistic to stderr (cyan label)
pub fn stat(label: &str, msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("  {:<9} {}", format!("{label}:").cyan(), msg);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print a color swatch followed by text
pub fn swatch(hex: &str, msg: &(impl std::fmt::Display + ?Sized)) {
    let (r, g, b) = parse_hex(hex).unwrap_or((204, 204, 204));
    println!("  {} {:<8} {}", "██".truecolor(r, g, b), hex, msg);
}

/// Print plain output (no color, for data lines)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

/// Parse `#rrggbb` into its components.
fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("#FC4E2A"), Some((0xFC, 0x4E, 0x2A)));
        assert_eq!(parse_hex("#cccccc"), Some((0xCC, 0xCC, 0xCC)));
        assert_eq!(parse_hex("FC4E2A"), None);
        assert_eq!(parse_hex("#FC4"), None);
        assert_eq!(parse_hex("#GG0000"), None);
    }
}
