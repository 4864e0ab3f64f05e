//! Common validation utilities

/// Check if a string is not empty once surrounding whitespace is removed
pub fn not_blank(value: &str) -> bool {
    !value.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_blank() {
        assert!(not_blank("a"));
        assert!(not_blank(" a "));
        assert!(!not_blank(""));
        assert!(!not_blank(" \t\n"));
    }
}
