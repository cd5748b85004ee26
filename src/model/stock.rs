//! Warehouse metadata attached to stored plans.

use serde::{Deserialize, Serialize};

use crate::error::{HistoryError, HistoryResult};

/// Stock accounting ticket in `NNN/YYYY` form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockTicket(String);

impl StockTicket {
    /// Parse `\d{1,3}/\d{4}`, zero-padding the sequence number to three digits.
    pub fn parse(value: &str) -> HistoryResult<Self> {
        let value = value.trim();
        let invalid = || HistoryError::InvalidStockTicket {
            value: value.to_string(),
        };

        let (number, year) = value.split_once('/').ok_or_else(invalid)?;
        let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());

        if !all_digits(number) || number.len() > 3 || !all_digits(year) || year.len() != 4 {
            return Err(invalid());
        }

        Ok(Self(format!("{:0>3}/{}", number, year)))
    }

    /// Parse an optional ticket; blank input means none.
    pub fn parse_optional(value: &str) -> HistoryResult<Option<Self>> {
        if value.trim().is_empty() {
            Ok(None)
        } else {
            Self::parse(value).map(Some)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StockTicket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Free-form material code, restricted to ASCII letters and digits.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MaterialCode(String);

impl MaterialCode {
    pub fn parse(value: &str) -> HistoryResult<Self> {
        let value = value.trim();
        if value.chars().all(|c| c.is_ascii_alphanumeric()) {
            Ok(Self(value.to_string()))
        } else {
            Err(HistoryError::InvalidMaterialCode {
                value: value.to_string(),
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MaterialCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
