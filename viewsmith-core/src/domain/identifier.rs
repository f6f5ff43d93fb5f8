// viewsmith-core/src/domain/identifier.rs

use crate::domain::error::DomainError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

fn re_identifier() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_$]*(\.[A-Za-z_][A-Za-z0-9_$]*)?$")
            .unwrap_or_else(|_| Regex::new("$^").unwrap_or_else(|_| unreachable!()))
    })
}

/// A view (or relation) name that is safe to splice into DDL and file paths.
///
/// Identifiers cannot be bound as statement parameters, so `DROP VIEW` is
/// built by interpolation. Only bare or schema-qualified names made of
/// letters, digits, `_` and `$` are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ViewName(String);

impl ViewName {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        if re_identifier().is_match(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(DomainError::InvalidIdentifier(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `DROP VIEW IF EXISTS <name>;`
    pub fn drop_statement(&self) -> String {
        format!("DROP VIEW IF EXISTS {};", self.0)
    }
}

impl fmt::Display for ViewName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ViewName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ViewName> for String {
    fn from(value: ViewName) -> Self {
        value.0
    }
}
