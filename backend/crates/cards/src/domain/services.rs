//! Domain Services
//!
//! Authorization rules shared by every card handler.

use kernel::principal::Principal;

use crate::domain::entities::Card;
use crate::error::{CardError, CardResult};

/// Business users and admins only
pub fn ensure_publisher(principal: &Principal) -> CardResult<()> {
    if principal.can_publish() {
        Ok(())
    } else {
        Err(CardError::NotPublisher)
    }
}

/// Admin, or the business user who published `card`
///
/// `action` names the attempted operation in the 403 message.
pub fn authorize_owner(principal: &Principal, card: &Card, action: &'static str) -> CardResult<()> {
    if principal.can_manage(card.user_id) {
        Ok(())
    } else {
        tracing::warn!(
            user_id = %principal.user_id,
            card_id = %card.card_id,
            "User is not authorized to {action} this card"
        );
        Err(CardError::NotOwner(action))
    }
}
