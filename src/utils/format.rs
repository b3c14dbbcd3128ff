//! Number and function-name formatting shared by the report renderers.

use super::config::DisplayRules;

const KIB: u64 = 1024;
const MIB: u64 = 1024 * 1024;

/// Format a byte count as `B`, `KB` or `MB` with one decimal
pub fn fmt_bytes(n: u64) -> String {
    if n >= MIB {
        format!("{:.1} MB", n as f64 / MIB as f64)
    } else if n >= KIB {
        format!("{:.1} KB", n as f64 / KIB as f64)
    } else {
        format!("{} B", n)
    }
}

/// Format an integer with thousands separators
pub fn fmt_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Signed count with an explicit `+` on growth
pub fn fmt_signed_count(n: i64) -> String {
    let sign = if n > 0 {
        "+"
    } else if n < 0 {
        "-"
    } else {
        ""
    };
    format!("{}{}", sign, fmt_count(n.unsigned_abs()))
}

/// Signed byte delta, `+` on growth
pub fn fmt_signed_bytes(n: i64) -> String {
    let sign = if n > 0 {
        "+"
    } else if n < 0 {
        "-"
    } else {
        ""
    };
    format!("{}{}", sign, fmt_bytes(n.unsigned_abs()))
}

/// Shorten a function name for a table column
///
/// Applies the alias table in order, drops generic brackets, then
/// truncates to `max_len` characters.
pub fn shorten_fn(name: &str, rules: &DisplayRules, max_len: usize) -> String {
    let mut s = name.to_string();
    for (from, to) in &rules.aliases {
        if !from.is_empty() {
            s = s.replace(from.as_str(), to);
        }
    }
    s.retain(|c| c != '<' && c != '>');

    if s.chars().count() > max_len {
        let keep = max_len.saturating_sub(3);
        let mut cut: String = s.chars().take(keep).collect();
        cut.push_str("...");
        cut
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_bytes() {
        assert_eq!(fmt_bytes(0), "0 B");
        assert_eq!(fmt_bytes(1023), "1023 B");
        assert_eq!(fmt_bytes(1024), "1.0 KB");
        assert_eq!(fmt_bytes(1536), "1.5 KB");
        assert_eq!(fmt_bytes(4 * 1024 * 1024), "4.0 MB");
    }

    #[test]
    fn test_fmt_count() {
        assert_eq!(fmt_count(0), "0");
        assert_eq!(fmt_count(999), "999");
        assert_eq!(fmt_count(1000), "1,000");
        assert_eq!(fmt_count(1_234_567), "1,234,567");
    }

    #[test]
    fn test_signed() {
        assert_eq!(fmt_signed_count(1200), "+1,200");
        assert_eq!(fmt_signed_count(-3), "-3");
        assert_eq!(fmt_signed_count(0), "0");
        assert_eq!(fmt_signed_bytes(2048), "+2.0 KB");
        assert_eq!(fmt_signed_bytes(-10), "-10 B");
    }

    #[test]
    fn test_shorten_fn_aliases() {
        let rules = DisplayRules::default();
        assert_eq!(
            shorten_fn("epub_stream::zip::ZipArchive::read", &rules, 72),
            "zip::ZipArchive::read"
        );
        assert_eq!(
            shorten_fn("<alloc::vec::Vec<u8>>::push", &rules, 72),
            "alloc::vec::Vecu8::push"
        );
    }

    #[test]
    fn test_shorten_fn_truncates() {
        let rules = DisplayRules::default();
        let long = "a".repeat(100);
        let short = shorten_fn(&long, &rules, 20);
        assert_eq!(short.chars().count(), 20);
        assert!(short.ends_with("..."));
    }
}
