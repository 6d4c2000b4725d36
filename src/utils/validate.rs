//! Field-format checks shared by the intake forms.

pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Loose shape check: something before `@`, a domain with a dot, no
/// whitespace anywhere.
pub fn is_valid_email(email: &str) -> bool {
    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.rsplit_once('@') else {
        return false;
    };
    if local.is_empty() {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

pub fn is_ten_digit_phone(phone: &str) -> bool {
    phone.len() == 10 && phone.bytes().all(|b| b.is_ascii_digit())
}

/// Contact-form phone: optional leading `+`, then at least ten characters
/// drawn from digits, spaces and hyphens.
pub fn is_relaxed_phone(phone: &str) -> bool {
    let rest = phone.strip_prefix('+').unwrap_or(phone);
    rest.len() >= 10
        && rest
            .bytes()
            .all(|b| b.is_ascii_digit() || b == b' ' || b == b'-')
}

pub fn is_github_url(url: &str) -> bool {
    url.starts_with("https://github.com/")
}

pub fn is_linkedin_url(url: &str) -> bool {
    url.starts_with("https://www.linkedin.com/") || url.starts_with("https://linkedin.com/")
}

/// http(s) URL with a nonempty, whitespace-free host.
pub fn is_well_formed_url(url: &str) -> bool {
    let Some(rest) = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
    else {
        return false;
    };
    let host = rest.split(['/', '?', '#']).next().unwrap_or("");
    !host.is_empty() && !host.chars().any(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("first.last@sub.example.co"));
        assert!(!is_valid_email("userexample.com"));
        assert!(!is_valid_email("user@example"));
        assert!(!is_valid_email("user@.com"));
        assert!(!is_valid_email("user name@example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn ten_digit_phone_is_exact() {
        assert!(is_ten_digit_phone("0123456789"));
        assert!(!is_ten_digit_phone("012345678"));
        assert!(!is_ten_digit_phone("01234567890"));
        assert!(!is_ten_digit_phone("01234 6789"));
    }

    #[test]
    fn relaxed_phone_allows_separators_and_plus() {
        assert!(is_relaxed_phone("+44 20 7946 0958"));
        assert!(is_relaxed_phone("020-7946-0958"));
        assert!(!is_relaxed_phone("+123"));
        assert!(!is_relaxed_phone("(020) 79460958"));
    }

    #[test]
    fn profile_url_prefixes() {
        assert!(is_github_url("https://github.com/octocat"));
        assert!(!is_github_url("http://github.com/octocat"));
        assert!(is_linkedin_url("https://www.linkedin.com/in/someone"));
        assert!(is_linkedin_url("https://linkedin.com/in/someone"));
        assert!(!is_linkedin_url("https://uk.linkedin.com/in/someone"));
    }

    #[test]
    fn portfolio_urls_need_scheme_and_host() {
        assert!(is_well_formed_url("https://example.dev"));
        assert!(is_well_formed_url("http://example.dev/work?tab=1"));
        assert!(!is_well_formed_url("example.dev"));
        assert!(!is_well_formed_url("ftp://example.dev"));
        assert!(!is_well_formed_url("https://"));
    }
}
