//! DTOs for the trading API reads shown in the shell pages.
//!
//! DESIGN
//! ======
//! Only the fields the pages display are modeled; serde ignores the rest so
//! server-side additions never break decoding.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// An exchange integration account.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IntegrationAccount {
    pub id: String,
    /// Exchange API key; shown abbreviated.
    pub api_key: String,
    /// Batch the account is grouped into, if any.
    #[serde(default)]
    pub batch_id: Option<String>,
    #[serde(default)]
    pub proxy: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl IntegrationAccount {
    /// `abcd...wxyz` form of the API key.
    #[must_use]
    pub fn masked_api_key(&self) -> String {
        let chars: Vec<char> = self.api_key.chars().collect();
        if chars.len() <= 8 {
            return self.api_key.clone();
        }
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    }

    /// Short label used in lists: `Account 1a2b3c4d`.
    #[must_use]
    pub fn label(&self) -> String {
        let short: String = self.id.chars().take(8).collect();
        format!("Account {short}")
    }
}

/// A named group of integration accounts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// An automated trading unit spawned against a batch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: String,
    pub symbol: String,
    /// Numeric or decimal-string size, rendered as received.
    #[serde(default)]
    pub size: serde_json::Value,
    #[serde(default)]
    pub batch_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub deleted_at: Option<String>,
}

impl Unit {
    #[must_use]
    pub fn size_label(&self) -> String {
        match &self.size {
            serde_json::Value::Null => "-".to_owned(),
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    #[must_use]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}
