//! Candidate email validation.

/// Returns `true` if `email` passes the acceptance rules:
/// at least 5 characters, exactly one `@`, no leading or trailing `.`,
/// and no `..` anywhere. Invalid candidates are silently dropped by callers.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    if email.len() < 5 {
        return false;
    }
    if email.chars().filter(|c| *c == '@').count() != 1 {
        return false;
    }
    if email.starts_with('.') || email.ends_with('.') {
        return false;
    }
    if email.contains("..") {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_too_short() {
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn rejects_wrong_at_count() {
        assert!(!is_valid_email("a@@b.com"));
        assert!(!is_valid_email("nobody.example.com"));
    }

    #[test]
    fn rejects_leading_or_trailing_dot() {
        assert!(!is_valid_email(".a@b.com"));
        assert!(!is_valid_email("a@b.com."));
    }

    #[test]
    fn rejects_double_dot() {
        assert!(!is_valid_email("a@b..com"));
    }

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("jane.doe@example.co.uk"));
        assert!(is_valid_email("info@example.com"));
    }
}
