//! Number formatting for result cards.

/// Fixed decimals, switching to scientific notation for very large or very
/// small magnitudes (e.g. particle counts, ion concentrations).
pub fn number(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return "—".to_string();
    }
    let magnitude = value.abs();
    if magnitude != 0.0 && (magnitude >= 1e7 || magnitude < 1e-3) {
        return format!("{:.*e}", decimals.max(2), value);
    }
    let rendered = format!("{:.*}", decimals, value);
    // Avoid "-0.00"
    if rendered.trim_start_matches('-').chars().all(|c| c == '0' || c == '.') {
        return rendered.trim_start_matches('-').to_string();
    }
    rendered
}

/// Number followed by a unit, e.g. "523.599 µm³"
pub fn with_unit(value: f64, decimals: usize, unit: &str) -> String {
    format!("{} {}", number(value, decimals), unit)
}

/// Fraction rendered as a percentage, e.g. 0.4231 → "42.31%"
pub fn percent(fraction: f64, decimals: usize) -> String {
    format!("{}%", number(fraction * 100.0, decimals))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed() {
        assert_eq!(number(523.5987755982989, 3), "523.599");
        assert_eq!(number(0.6, 3), "0.600");
        assert_eq!(number(0.0, 2), "0.00");
        assert_eq!(number(-0.0001, 2), "-1.00e-4");
    }

    #[test]
    fn test_scientific() {
        assert_eq!(number(6.02214076e23, 3), "6.022e23");
        assert_eq!(number(1.0e-7, 2), "1.00e-7");
    }

    #[test]
    fn test_negative_zero_cleanup() {
        assert_eq!(number(-0.0, 2), "0.00");
        assert_eq!(number(-0.004, 2), "0.00");
    }

    #[test]
    fn test_helpers() {
        assert_eq!(with_unit(1.5, 1, "mol"), "1.5 mol");
        assert_eq!(percent(0.4231, 2), "42.31%");
    }
}
