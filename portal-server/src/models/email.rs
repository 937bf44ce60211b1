//! Email address validation
//!
//! Syntax checks only; deliverability is never probed.

use once_cell::sync::Lazy;
use regex::Regex;

use super::ValidationError;

/// Maximum length of a full address (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Maximum length of the part before `@`
const MAX_LOCAL_PART_LEN: usize = 64;

/// Unquoted local part: RFC 5322 atext plus dots
static LOCAL_PART_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~.-]+$").expect("invalid local part regex")
});

/// One DNS label: alphanumeric ends, hyphens allowed inside, max 63 chars
static DOMAIN_LABEL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?$")
        .expect("invalid domain label regex")
});

/// Validated email address
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Parse and normalize an email address.
    ///
    /// Surrounding whitespace is trimmed and the domain is lower-cased;
    /// the local part is kept as given.
    ///
    /// # Example
    /// ```
    /// use portal_server::models::EmailAddress;
    ///
    /// let email = EmailAddress::new(" ada@Example.ORG ").unwrap();
    /// assert_eq!(email.as_str(), "ada@example.org");
    /// assert!(EmailAddress::new("not-an-email").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "email" });
        }

        if trimmed.len() > MAX_EMAIL_LEN {
            return Err(ValidationError::TooLong {
                field: "email",
                max: MAX_EMAIL_LEN,
            });
        }

        let Some((local, domain)) = trimmed.split_once('@') else {
            return Err(invalid("must contain an '@' symbol"));
        };

        if domain.contains('@') {
            return Err(invalid("must contain a single '@' symbol"));
        }

        validate_local_part(local)?;
        validate_domain(domain)?;

        Ok(Self(format!("{}@{}", local, domain.to_ascii_lowercase())))
    }

    /// Get the address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn invalid(reason: &'static str) -> ValidationError {
    ValidationError::InvalidFormat {
        field: "email",
        reason,
    }
}

fn validate_local_part(local: &str) -> Result<(), ValidationError> {
    if local.is_empty() {
        return Err(invalid("missing the part before '@'"));
    }

    if local.len() > MAX_LOCAL_PART_LEN {
        return Err(invalid("the part before '@' exceeds 64 characters"));
    }

    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return Err(invalid("misplaced '.' before '@'"));
    }

    if !LOCAL_PART_RE.is_match(local) {
        return Err(invalid("invalid character before '@'"));
    }

    Ok(())
}

fn validate_domain(domain: &str) -> Result<(), ValidationError> {
    if domain.is_empty() {
        return Err(invalid("missing domain after '@'"));
    }

    if !domain.contains('.') {
        return Err(invalid("domain must contain a '.'"));
    }

    if !domain.split('.').all(|label| DOMAIN_LABEL_RE.is_match(label)) {
        return Err(invalid("domain is not a valid host name"));
    }

    // A numeric top-level label is an IP literal, not a host name
    let tld_is_numeric = domain
        .rsplit('.')
        .next()
        .is_some_and(|tld| tld.chars().all(|c| c.is_ascii_digit()));
    if tld_is_numeric {
        return Err(invalid("domain is not a valid host name"));
    }

    Ok(())
}
