//! Argument checks shared by the section wrappers
//!
//! All lengths are counted in characters after trimming surrounding whitespace,
//! which is how the web service counts them as well.

use crate::error::{GenesisError, Result};

/// Largest page the web service hands out
pub const MAX_PAGE_LENGTH: u32 = 2500;

/// Check the length of a required text argument and return it trimmed
pub(crate) fn length<'a>(field: &'static str, value: &'a str, min: usize, max: usize) -> Result<&'a str> {
    let trimmed = value.trim();
    let count = trimmed.chars().count();
    if count < min || count > max {
        let message = if count == 0 {
            "is required and may not be empty".to_string()
        } else if min == max {
            format!("must be exactly {} characters long (got {})", min, count)
        } else {
            format!("must be between {} and {} characters long (got {})", min, max, count)
        };
        return Err(GenesisError::validation(field, message));
    }
    Ok(trimmed)
}

/// Like [`length`] but `None` passes unchecked
pub(crate) fn opt_length<'a>(
    field: &'static str,
    value: Option<&'a str>,
    min: usize,
    max: usize,
) -> Result<Option<&'a str>> {
    value.map(|v| length(field, v, min, max)).transpose()
}

/// Object names (tables, cubes, time series, ...) are 1 to 15 characters
pub(crate) fn object_name(name: &str) -> Result<&str> {
    length("name", name, 1, 15)
}

/// Reject the `*` wildcard where the web service expects an exact name
pub(crate) fn no_wildcard<'a>(field: &'static str, value: &'a str) -> Result<&'a str> {
    if value.contains('*') {
        return Err(GenesisError::validation(field, "may not contain wildcards (*)"));
    }
    Ok(value)
}

/// Number of results per request (`pagelength`)
pub(crate) fn page_length(results: u32) -> Result<u32> {
    range("results", results, 1, MAX_PAGE_LENGTH)
}

pub(crate) fn range<T>(field: &'static str, value: T, min: T, max: T) -> Result<T>
where
    T: PartialOrd + std::fmt::Display + Copy,
{
    if value < min || value > max {
        return Err(GenesisError::validation(
            field,
            format!("must be between {} and {} (got {})", min, max, value),
        ));
    }
    Ok(value)
}

/// User names are exactly 10 characters without whitespace
pub(crate) fn username(value: &str) -> Result<&str> {
    no_whitespace("username", value)?;
    length("username", value, 10, 10)
}

/// Passwords are 10 to 20 characters without whitespace
pub(crate) fn password<'a>(field: &'static str, value: &'a str) -> Result<&'a str> {
    no_whitespace(field, value)?;
    length(field, value, 10, 20)
}

fn no_whitespace(field: &'static str, value: &str) -> Result<()> {
    if value.chars().any(char::is_whitespace) {
        return Err(GenesisError::validation(field, "may not contain whitespace"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lengths_are_counted_after_trimming() {
        assert_eq!(length("selection", "  12411*  ", 1, 10).unwrap(), "12411*");
        assert!(length("selection", "   ", 1, 10).is_err());
        assert!(length("selection", "12345678901", 1, 10).is_err());
        // umlauts count as one character
        assert!(length("name", "Bevölkerung", 1, 11).is_ok());
    }

    #[test]
    fn optional_values_pass_when_absent() {
        assert_eq!(opt_length("selection", None, 1, 15).unwrap(), None);
        assert!(opt_length("selection", Some(""), 1, 15).is_err());
    }

    #[test]
    fn page_length_bounds() {
        assert!(page_length(0).is_err());
        assert!(page_length(1).is_ok());
        assert!(page_length(2500).is_ok());
        assert!(page_length(2501).is_err());
    }

    #[test]
    fn credential_rules() {
        assert!(username("ABCDEFGHIJ").is_ok());
        assert!(username("ABCDEFGHI").is_err());
        assert!(username("ABCDE GHIJ").is_err());
        assert!(password("password", "0123456789").is_ok());
        assert!(password("password", "012345678901234567890").is_err());
        assert!(password("password", "01234 56789").is_err());
    }

    #[test]
    fn wildcards() {
        assert!(no_wildcard("name", "12411").is_ok());
        assert!(no_wildcard("name", "124*").is_err());
    }
}
