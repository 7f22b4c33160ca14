use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

use crate::core::constants::LOCATOR_FIELD;
use crate::core::errors::LedgerError;

/// The message handed to the chain-submission service:
/// `<app-id>:v<schema-version>:<hex-commitment-hash>[ locator:<locator>]`.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct AnchorMessage {
    pub app_id: String,
    pub schema_version: u32,
    pub commitment_hash: String,
    pub locator: Option<String>,
}

impl AnchorMessage {
    /// Parses a wire message. Suffix fields other than `locator:` are skipped so that
    /// newer writers stay readable.
    pub fn parse(message: &str) -> Result<Self, LedgerError> {
        let mut fields = message.split_whitespace();
        let head = fields
            .next()
            .ok_or_else(|| LedgerError::MalformedAnchor("empty message".to_string()))?;

        let mut parts = head.splitn(3, ':');
        let (Some(app_id), Some(version), Some(hash)) = (parts.next(), parts.next(), parts.next()) else {
            return Err(LedgerError::MalformedAnchor(
                "expected <app-id>:v<version>:<hash>".to_string(),
            ));
        };
        if app_id.is_empty() {
            return Err(LedgerError::MalformedAnchor("missing app id".to_string()));
        }
        let schema_version = version
            .strip_prefix('v')
            .and_then(|v| v.parse::<u32>().ok())
            .ok_or_else(|| LedgerError::MalformedAnchor(format!("bad schema version `{}`", version)))?;
        if hash.is_empty() || hex::decode(hash).is_err() {
            return Err(LedgerError::MalformedAnchor("commitment hash is not hex".to_string()));
        }

        let locator = fields
            .find_map(|field| field.strip_prefix(LOCATOR_FIELD))
            .filter(|l| !l.is_empty())
            .map(String::from);

        Ok(AnchorMessage {
            app_id: app_id.to_string(),
            schema_version,
            commitment_hash: hash.to_ascii_lowercase(),
            locator,
        })
    }
}

impl fmt::Display for AnchorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:v{}:{}", self.app_id, self.schema_version, self.commitment_hash)?;
        if let Some(locator) = &self.locator {
            write!(f, " {}{}", LOCATOR_FIELD, locator)?;
        }
        Ok(())
    }
}
