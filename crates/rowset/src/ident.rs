//! Safe handling of SQL entity names.
//!
//! Statement specs carry table, column and alias names as plain strings that
//! end up interpolated into SQL text. Before any text is assembled, every
//! such name is checked against a denylist of statement-injection characters;
//! a match raises [`RowsetError::UnsafeIdentifier`] naming the offender.
//!
//! The check is deliberately a denylist rather than a grammar: entity
//! transforms may legitimately add quoting or casing to a name, so the only
//! thing rejected outright is text that could terminate or comment out the
//! statement being built.

use crate::error::{RowsetError, RowsetResult};
use std::sync::Arc;

/// Optional transform applied to the string form of an entity name
/// (quoting, casing). Table and column transforms are configured
/// independently on each statement builder.
pub type EntityTransform = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Character/sequence denylist: statement separator, NUL, comment openers.
const DENIED_CHARS: &[char] = &[';', '\0'];
const DENIED_SEQUENCES: &[&str] = &["--", "/*"];

/// Check one entity name against the injection denylist.
///
/// Runs before any SQL text is assembled. An empty name is a malformed spec,
/// not an injection attempt.
pub fn ensure_safe(ident: &str) -> RowsetResult<()> {
    if ident.is_empty() {
        return Err(RowsetError::malformed("empty identifier"));
    }
    if ident.contains(DENIED_CHARS) || DENIED_SEQUENCES.iter().any(|s| ident.contains(s)) {
        return Err(RowsetError::unsafe_identifier(ident));
    }
    Ok(())
}

/// Check an entity name, then apply the optional transform to its string form.
pub fn render_entity(ident: &str, transform: Option<&EntityTransform>) -> RowsetResult<String> {
    ensure_safe(ident)?;
    Ok(match transform {
        Some(f) => f(ident),
        None => ident.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_name_is_safe() {
        assert!(ensure_safe("users").is_ok());
        assert!(ensure_safe("public.users").is_ok());
        assert!(ensure_safe("\"CamelCase\"").is_ok());
    }

    #[test]
    fn rejects_statement_separator() {
        let err = ensure_safe("users; DROP TABLE users").unwrap_err();
        assert!(err.is_unsafe_identifier());
        assert!(err.to_string().contains("users; DROP TABLE users"));
    }

    #[test]
    fn rejects_nul() {
        assert!(ensure_safe("users\0").unwrap_err().is_unsafe_identifier());
    }

    #[test]
    fn rejects_line_comment() {
        assert!(ensure_safe("users --").unwrap_err().is_unsafe_identifier());
    }

    #[test]
    fn rejects_block_comment() {
        assert!(ensure_safe("users /*").unwrap_err().is_unsafe_identifier());
    }

    #[test]
    fn empty_name_is_malformed_not_unsafe() {
        assert!(ensure_safe("").unwrap_err().is_malformed());
    }

    #[test]
    fn transform_applies_after_check() {
        let upper: EntityTransform = Arc::new(|s: &str| s.to_uppercase());
        assert_eq!(render_entity("users", Some(&upper)).unwrap(), "USERS");
        assert!(render_entity("users;", Some(&upper)).is_err());
    }
}
