/// Emails are compared and stored in this form everywhere.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_trims() {
        assert_eq!(normalize_email("  Foo@Bar.COM "), "foo@bar.com");
        assert_eq!(normalize_email("user@example.com"), "user@example.com");
    }
}
