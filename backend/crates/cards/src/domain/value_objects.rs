//! Domain Value Objects

use std::fmt;

use kernel::{
    contact::{Address, Image, Phone, http_url, required_text},
    email::Email,
    error::app_error::{AppError, AppResult},
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const TITLE_MAX: usize = 256;
const DESCRIPTION_MAX: usize = 1024;

// ============================================================================
// BizNumber
// ============================================================================

/// Seven digit number printed on a card, unique across all cards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BizNumber(i32);

impl BizNumber {
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for BizNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Price
// ============================================================================

/// Price in cents
///
/// Accepted as `"12.5"`, `"$12.50"` or a JSON number; always rendered with
/// a leading dollar sign and two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Price(i64);

impl Price {
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn cents(&self) -> i64 {
        self.0
    }

    pub fn parse(raw: &str) -> AppResult<Self> {
        let trimmed = raw.trim();
        let amount = trimmed.strip_prefix('$').unwrap_or(trimmed).trim();

        let (whole, fraction) = amount.split_once('.').unwrap_or((amount, ""));
        let valid = !whole.is_empty()
            && whole.chars().all(|c| c.is_ascii_digit())
            && fraction.len() <= 2
            && fraction.chars().all(|c| c.is_ascii_digit());
        if !valid {
            return Err(invalid_price());
        }

        let whole: i64 = whole.parse().map_err(|_| invalid_price())?;
        let fraction: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid_price())? * 10,
            _ => fraction.parse().map_err(|_| invalid_price())?,
        };

        whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(fraction))
            .map(Self)
            .ok_or_else(invalid_price)
    }

    pub fn from_amount(amount: f64) -> AppResult<Self> {
        if !amount.is_finite() || amount < 0.0 || amount > (i64::MAX / 100) as f64 {
            return Err(invalid_price());
        }
        Ok(Self((amount * 100.0).round() as i64))
    }
}

fn invalid_price() -> AppError {
    AppError::bad_request("\"price\" must be a non-negative amount like 12.50")
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(f64),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Text(s) => Price::parse(&s),
            Raw::Number(n) => Price::from_amount(n),
        }
        .map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// CardContent
// ============================================================================

/// Everything on a card that its owner may edit
#[derive(Debug, Clone, PartialEq)]
pub struct CardContent {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub phone: Phone,
    pub email: Email,
    pub web: Option<String>,
    pub image: Image,
    pub address: Address,
    pub price: Option<Price>,
}

/// Unvalidated card fields as submitted by a client
#[derive(Debug, Clone)]
pub struct CardDraft {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub phone: String,
    pub email: String,
    pub web: Option<String>,
    pub image: Image,
    pub address: Address,
    pub price: Option<Price>,
}

impl CardContent {
    pub fn new(draft: CardDraft) -> AppResult<Self> {
        let web = match draft.web.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(url) => Some(http_url("web", url)?),
        };

        Ok(Self {
            title: required_text("title", &draft.title, 2, TITLE_MAX)?,
            subtitle: required_text("subtitle", &draft.subtitle, 2, TITLE_MAX)?,
            description: required_text("description", &draft.description, 2, DESCRIPTION_MAX)?,
            phone: Phone::new(draft.phone)?,
            email: Email::new(draft.email)?,
            web,
            image: draft.image.validated()?,
            address: draft.address.validated()?,
            price: draft.price,
        })
    }

    /// Back to a draft, so an update can overlay fields and revalidate
    pub fn to_draft(&self) -> CardDraft {
        CardDraft {
            title: self.title.clone(),
            subtitle: self.subtitle.clone(),
            description: self.description.clone(),
            phone: self.phone.as_str().to_string(),
            email: self.email.as_str().to_string(),
            web: self.web.clone(),
            image: self.image.clone(),
            address: self.address.clone(),
            price: self.price,
        }
    }
}
