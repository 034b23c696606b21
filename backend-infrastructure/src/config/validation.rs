use anyhow::{anyhow, Result};

/// Ids coming from config and roster files end up in URLs and store
/// keys, so they must be non-empty and free of whitespace.
pub fn validate_identifier(value: &str, field: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(anyhow!("{} is empty", field));
    }
    if value.chars().any(char::is_whitespace) {
        return Err(anyhow!("{} must not contain whitespace: '{}'", field, value));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_slugs() {
        validate_identifier("first-team", "team_id").expect("slug is valid");
        validate_identifier("m_01", "member id").expect("slug is valid");
    }

    #[test]
    fn rejects_empty_and_spaced_values() {
        assert!(validate_identifier("", "team_id").is_err());
        assert!(validate_identifier("first team", "team_id").is_err());
    }
}
