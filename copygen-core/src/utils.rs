//! Shared utility functions.

/// Replace every `" YEAR"` in a header with a space followed by `year`.
///
/// This is a plain textual replacement, not templating.
pub fn substitute_year(header: &str, year: &str) -> String {
    header.replace(" YEAR", &format!(" {}", year))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitute_year() {
        assert_eq!(
            substitute_year("Copyright YEAR Example", "2024"),
            "Copyright 2024 Example"
        );
        assert_eq!(substitute_year("No placeholder here", "2024"), "No placeholder here");
        assert_eq!(substitute_year("YEAR at start", "2024"), "YEAR at start");
        assert_eq!(substitute_year("a YEAR b YEAR", "1999"), "a 1999 b 1999");
    }

    #[test]
    fn test_substitute_empty_year() {
        assert_eq!(substitute_year("Copyright YEAR Example", ""), "Copyright  Example");
    }
}
