/// Validate email format
/// Checks for basic RFC 5322 compliance without full regex
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    // Must have exactly one @ symbol
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if domain.contains('@') {
        return false;
    }

    // Local part (before @) checks
    if local.is_empty() || local.len() > 64 {
        return false;
    }

    // Domain checks
    if domain.is_empty() || domain.len() > 255 {
        return false;
    }

    // Domain must have at least one dot
    if !domain.contains('.') {
        return false;
    }

    // Domain can't start/end with dot or hyphen
    if domain.starts_with('.')
        || domain.ends_with('.')
        || domain.starts_with('-')
        || domain.ends_with('-')
    {
        return false;
    }

    // No consecutive dots
    if domain.contains("..") {
        return false;
    }

    // Domain must have valid TLD (at least 2 chars after last dot)
    if let Some(last_dot) = domain.rfind('.') {
        let tld = &domain[last_dot + 1..];
        if tld.len() < 2 {
            return false;
        }
    }

    true
}

/// Lowercased domain part of an address
pub fn email_domain(email: &str) -> Option<String> {
    email
        .rsplit_once('@')
        .map(|(_, domain)| domain.trim().to_lowercase())
        .filter(|d| !d.is_empty())
}
