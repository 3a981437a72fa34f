//! Contact Value Objects
//!
//! Phone, image and postal address. Business cards and user profiles share
//! the same shapes and the same validation rules.

use serde::{Deserialize, Deserializer, Serialize, de};
use url::Url;

use crate::error::app_error::{AppError, AppResult};

/// Placeholder used when a card or profile has no picture
pub const DEFAULT_IMAGE_URL: &str =
    "https://cdn.pixabay.com/photo/2016/04/01/10/11/avatar-1299805_960_720.png";
pub const DEFAULT_IMAGE_ALT: &str = "business card image";

const PHONE_MIN_DIGITS: usize = 9;
const PHONE_MAX_DIGITS: usize = 11;
const SHORT_TEXT_MAX: usize = 256;

/// Check a required text field after trimming
///
/// Returns the trimmed value.
pub fn required_text(field: &str, value: &str, min: usize, max: usize) -> AppResult<String> {
    let trimmed = value.trim();
    let len = trimmed.chars().count();
    if len < min || len > max {
        return Err(AppError::bad_request(format!(
            "\"{field}\" length must be between {min} and {max} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Like [`required_text`], but blank input becomes `None`
pub fn optional_text(field: &str, value: Option<&str>, max: usize) -> AppResult<Option<String>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => required_text(field, v, 1, max).map(Some),
    }
}

/// Absolute http(s) URL
pub fn http_url(field: &str, value: &str) -> AppResult<String> {
    let url = Url::parse(value.trim())
        .map_err(|e| AppError::bad_request(format!("\"{field}\" must be a valid URL")).with_source(e))?;
    match url.scheme() {
        "http" | "https" => Ok(url.to_string()),
        other => Err(AppError::bad_request(format!(
            "\"{field}\" must use http or https (got {other})"
        ))),
    }
}

// ============================================================================
// Phone
// ============================================================================

/// Phone number as typed by the user
///
/// Spaces and dashes are accepted; 9 to 11 digits, optional leading `+`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Phone(String);

impl Phone {
    pub fn new(raw: impl Into<String>) -> AppResult<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        let body = trimmed.strip_prefix('+').unwrap_or(trimmed);

        let mut digits = 0usize;
        for c in body.chars() {
            match c {
                '0'..='9' => digits += 1,
                ' ' | '-' => {}
                _ => {
                    return Err(AppError::bad_request(
                        "\"phone\" may only contain digits, spaces and dashes",
                    ));
                }
            }
        }

        if !(PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digits) {
            return Err(AppError::bad_request(format!(
                "\"phone\" must contain {PHONE_MIN_DIGITS} to {PHONE_MAX_DIGITS} digits"
            )));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn from_db(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Phone {
    type Error = AppError;

    fn try_from(value: String) -> AppResult<Self> {
        Phone::new(value)
    }
}

impl From<Phone> for String {
    fn from(phone: Phone) -> Self {
        phone.0
    }
}

// ============================================================================
// Image
// ============================================================================

/// Picture reference (`{ url, alt }`)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Image {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub alt: String,
}

impl Image {
    pub fn placeholder() -> Self {
        Self {
            url: DEFAULT_IMAGE_URL.to_string(),
            alt: DEFAULT_IMAGE_ALT.to_string(),
        }
    }

    /// Validate, filling blanks from the placeholder
    pub fn validated(self) -> AppResult<Self> {
        let url = if self.url.trim().is_empty() {
            DEFAULT_IMAGE_URL.to_string()
        } else {
            http_url("image.url", &self.url)?
        };
        let alt = optional_text("image.alt", Some(&self.alt), SHORT_TEXT_MAX)?
            .unwrap_or_else(|| DEFAULT_IMAGE_ALT.to_string());
        Ok(Self { url, alt })
    }
}

// ============================================================================
// Address
// ============================================================================

/// Postal address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default)]
    pub state: Option<String>,
    pub country: String,
    pub city: String,
    pub street: String,
    #[serde(deserialize_with = "whole_number")]
    pub house_number: i32,
    #[serde(default, deserialize_with = "optional_whole_number")]
    pub zip: Option<i32>,
}

/// Form inputs post numbers as text
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(i64),
    Text(String),
}

impl NumberOrText {
    fn into_i32<E: de::Error>(self) -> Result<Option<i32>, E> {
        let value = match self {
            NumberOrText::Number(n) => n,
            NumberOrText::Text(text) => match text.trim() {
                "" => return Ok(None),
                digits => digits
                    .parse::<i64>()
                    .map_err(|_| E::custom(format!("expected a whole number, got {text:?}")))?,
            },
        };
        i32::try_from(value)
            .map(Some)
            .map_err(|_| E::custom(format!("{value} is out of range")))
    }
}

fn whole_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    NumberOrText::deserialize(deserializer)?
        .into_i32()?
        .ok_or_else(|| de::Error::custom("expected a whole number, got an empty string"))
}

fn optional_whole_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<i32>, D::Error> {
    match Option::<NumberOrText>::deserialize(deserializer)? {
        Some(value) => value.into_i32(),
        None => Ok(None),
    }
}

impl Address {
    pub fn validated(self) -> AppResult<Self> {
        if self.house_number < 1 {
            return Err(AppError::bad_request(
                "\"address.houseNumber\" must be greater than or equal to 1",
            ));
        }
        if matches!(self.zip, Some(z) if z < 0) {
            return Err(AppError::bad_request(
                "\"address.zip\" must be greater than or equal to 0",
            ));
        }

        Ok(Self {
            state: optional_text("address.state", self.state.as_deref(), SHORT_TEXT_MAX)?,
            country: required_text("address.country", &self.country, 2, SHORT_TEXT_MAX)?,
            city: required_text("address.city", &self.city, 2, SHORT_TEXT_MAX)?,
            street: required_text("address.street", &self.street, 2, SHORT_TEXT_MAX)?,
            house_number: self.house_number,
            zip: self.zip,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address() -> Address {
        Address {
            state: Some("  ".to_string()),
            country: " Israel ".to_string(),
            city: "Haifa".to_string(),
            street: "Herzl".to_string(),
            house_number: 12,
            zip: Some(3303112),
        }
    }

    #[test]
    fn test_phone_valid() {
        assert!(Phone::new("050-1234567").is_ok());
        assert!(Phone::new("+972 50 123 4567").is_ok());
        assert!(Phone::new("031234567").is_ok());
    }

    #[test]
    fn test_phone_invalid() {
        assert!(Phone::new("12345").is_err());
        assert!(Phone::new("050-123456789012").is_err());
        assert!(Phone::new("050-CALL-NOW").is_err());
    }

    #[test]
    fn test_image_defaults() {
        let image = Image::default().validated().unwrap();
        assert_eq!(image, Image::placeholder());
    }

    #[test]
    fn test_image_rejects_non_http() {
        let image = Image {
            url: "ftp://files.acme.com/logo.png".to_string(),
            alt: String::new(),
        };
        assert!(image.validated().is_err());
    }

    #[test]
    fn test_address_trims_and_drops_blank_state() {
        let address = address().validated().unwrap();
        assert_eq!(address.country, "Israel");
        assert_eq!(address.state, None);
    }

    #[test]
    fn test_address_rejects_bad_house_number() {
        let mut bad = address();
        bad.house_number = 0;
        assert!(bad.validated().is_err());
    }

    #[test]
    fn test_address_accepts_numbers_posted_as_text() {
        let address: Address = serde_json::from_value(serde_json::json!({
            "country": "Israel",
            "city": "Haifa",
            "street": "Herzl",
            "houseNumber": " 12 ",
            "zip": ""
        }))
        .unwrap();
        assert_eq!(address.house_number, 12);
        assert_eq!(address.zip, None);

        let address: Address = serde_json::from_value(serde_json::json!({
            "country": "Israel",
            "city": "Haifa",
            "street": "Herzl",
            "houseNumber": 12,
            "zip": "3303112"
        }))
        .unwrap();
        assert_eq!(address.zip, Some(3303112));
    }

    #[test]
    fn test_address_rejects_non_numeric_house_number() {
        for house_number in [serde_json::json!("twelve"), serde_json::json!(""), serde_json::json!(12.5)] {
            let result = serde_json::from_value::<Address>(serde_json::json!({
                "country": "Israel",
                "city": "Haifa",
                "street": "Herzl",
                "houseNumber": house_number
            }));
            assert!(result.is_err());
        }
    }

    #[test]
    fn test_address_json_shape() {
        let json = serde_json::to_value(address()).unwrap();
        assert_eq!(json["houseNumber"], 12);
        assert_eq!(json["zip"], 3303112);
    }

    #[test]
    fn test_required_text_bounds() {
        assert!(required_text("title", "A", 2, 256).is_err());
        assert_eq!(required_text("title", " Ab ", 2, 256).unwrap(), "Ab");
    }
}
