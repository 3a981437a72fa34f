//! User Role
//!
//! Two independent flags: business users publish cards, admins manage
//! every card and user.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRole {
    pub is_business: bool,
    pub is_admin: bool,
}

impl UserRole {
    /// Role granted at registration; admin is never self-assigned
    #[inline]
    pub const fn registered(is_business: bool) -> Self {
        Self {
            is_business,
            is_admin: false,
        }
    }

    #[inline]
    pub const fn admin() -> Self {
        Self {
            is_business: true,
            is_admin: true,
        }
    }

    #[inline]
    pub const fn can_publish(&self) -> bool {
        self.is_business || self.is_admin
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        match (self.is_admin, self.is_business) {
            (true, _) => "admin",
            (false, true) => "business",
            (false, false) => "user",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
