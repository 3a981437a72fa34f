//! Person Name Value Object

use kernel::contact::{optional_text, required_text};
use kernel::error::app_error::AppResult;
use serde::{Deserialize, Serialize};

const NAME_MAX: usize = 256;

/// First, optional middle, and last name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonName {
    pub first: String,
    #[serde(default)]
    pub middle: Option<String>,
    pub last: String,
}

impl PersonName {
    pub fn new(first: &str, middle: Option<&str>, last: &str) -> AppResult<Self> {
        Ok(Self {
            first: required_text("name.first", first, 2, NAME_MAX)?,
            middle: optional_text("name.middle", middle, NAME_MAX)?,
            last: required_text("name.last", last, 2, NAME_MAX)?,
        })
    }

    pub fn full(&self) -> String {
        match &self.middle {
            Some(middle) => format!("{} {} {}", self.first, middle, self.last),
            None => format!("{} {}", self.first, self.last),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_middle_is_dropped() {
        let name = PersonName::new(" Dana ", Some(""), "Levi").unwrap();
        assert_eq!(name.first, "Dana");
        assert_eq!(name.middle, None);
        assert_eq!(name.full(), "Dana Levi");
    }

    #[test]
    fn test_short_names_rejected() {
        assert!(PersonName::new("D", None, "Levi").is_err());
        assert!(PersonName::new("Dana", None, "").is_err());
    }
}
