//! User Details Entity
//!
//! Profile collected at registration.

use chrono::{DateTime, Utc};
use kernel::{
    contact::{Address, Image, Phone},
    id::UserId,
};

use crate::domain::value_object::person_name::PersonName;

#[derive(Debug, Clone)]
pub struct UserDetails {
    pub user_id: UserId,
    pub name: PersonName,
    pub phone: Phone,
    pub image: Image,
    pub address: Address,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserDetails {
    pub fn new(
        user_id: UserId,
        name: PersonName,
        phone: Phone,
        image: Image,
        address: Address,
    ) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            name,
            phone,
            image,
            address,
            created_at: now,
            updated_at: now,
        }
    }
}
