//! Display-name derivation for users whose profile carries no name:
//! the email local-part, de-punctuated, de-numbered, and title-cased.

/// Turns an email's local part into a readable display name:
/// `"jane.doe42"` becomes `"Jane Doe"`. Falls back to `"User"` when
/// nothing printable survives.
pub fn name_from_email(email: &str) -> String {
    let local = email.split('@').next().unwrap_or_default();
    let cleaned: String = local
        .chars()
        .map(|c| if c == '.' || c == '_' { ' ' } else { c })
        .filter(|c| !c.is_ascii_digit())
        .collect();

    let name = cleaned
        .split_whitespace()
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ");

    if name.is_empty() {
        "User".to_string()
    } else {
        name
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_separators_and_digits() {
        assert_eq!(name_from_email("jane.doe42@example.com"), "Jane Doe");
        assert_eq!(name_from_email("bob_smith@example.com"), "Bob Smith");
    }

    #[test]
    fn plain_prefix_is_title_cased() {
        assert_eq!(name_from_email("ALICE@example.com"), "Alice");
    }

    #[test]
    fn empty_or_numeric_prefix_falls_back() {
        assert_eq!(name_from_email("12345@example.com"), "User");
        assert_eq!(name_from_email("@example.com"), "User");
    }
}
