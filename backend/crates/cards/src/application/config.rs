//! Application Configuration

use std::ops::RangeInclusive;

use kernel::contact::Image;
use rand::Rng;

use crate::domain::value_objects::BizNumber;

/// Cards application configuration
#[derive(Debug, Clone)]
pub struct CardsConfig {
    /// bizNumbers are drawn uniformly from this range
    pub biz_number_range: RangeInclusive<i32>,
    /// Draws before card creation gives up
    pub biz_number_max_attempts: u32,
    /// Used for any blank `image.url` / `image.alt`
    pub default_image: Image,
}

impl Default for CardsConfig {
    fn default() -> Self {
        Self {
            biz_number_range: 1_000_000..=9_999_999,
            biz_number_max_attempts: 10,
            default_image: Image::placeholder(),
        }
    }
}

impl CardsConfig {
    pub fn random_biz_number(&self) -> BizNumber {
        BizNumber::new(rand::rng().random_range(self.biz_number_range.clone()))
    }

    /// Fill blank image fields from [`Self::default_image`]
    pub fn image_or_default(&self, image: Image) -> Image {
        Image {
            url: if image.url.trim().is_empty() {
                self.default_image.url.clone()
            } else {
                image.url
            },
            alt: if image.alt.trim().is_empty() {
                self.default_image.alt.clone()
            } else {
                image.alt
            },
        }
    }
}
