//! PostgreSQL Repository Implementation
//!
//! `likes` and `add_to_cart` are `UUID[]` columns; toggles and cart changes
//! are single `UPDATE ... RETURNING` statements.

use chrono::{DateTime, Utc};
use kernel::{
    contact::{Address, Image, Phone},
    email::Email,
    id::{CardId, UserId},
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::{Card, CartChange, LikeState};
use crate::domain::repository::CardRepository;
use crate::domain::value_objects::{BizNumber, CardContent, Price};
use crate::error::{CardError, CardResult};

const UNIQUE_VIOLATION: &str = "23505";

const CARD_COLUMNS: &str = r#"
    card_id, user_id, biz_number,
    title, subtitle, description, phone, email, web,
    image_url, image_alt,
    state, country, city, street, house_number, zip,
    price_cents, likes, add_to_cart, created_at, updated_at
"#;

/// PostgreSQL-backed card repository
#[derive(Clone)]
pub struct PgCardRepository {
    pool: PgPool,
}

impl PgCardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_where(&self, condition: &str, user_id: Option<&UserId>) -> CardResult<Vec<Card>> {
        let sql = format!("SELECT {CARD_COLUMNS} FROM cards {condition} ORDER BY created_at");
        let mut query = sqlx::query_as::<_, CardRow>(&sql);
        if let Some(user_id) = user_id {
            query = query.bind(*user_id.as_uuid());
        }
        let rows = query.fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(CardRow::into_card).collect())
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION))
}

impl CardRepository for PgCardRepository {
    async fn create(&self, card: &Card) -> CardResult<()> {
        let c = &card.content;
        sqlx::query(
            r#"
            INSERT INTO cards (
                card_id, user_id, biz_number,
                title, subtitle, description, phone, email, web,
                image_url, image_alt,
                state, country, city, street, house_number, zip,
                price_cents, likes, add_to_cart, created_at, updated_at
            ) VALUES (
                $1, $2, $3,
                $4, $5, $6, $7, $8, $9,
                $10, $11,
                $12, $13, $14, $15, $16, $17,
                $18, $19, $20, $21, $22
            )
            "#,
        )
        .bind(card.card_id.as_uuid())
        .bind(card.user_id.as_uuid())
        .bind(card.biz_number.value())
        .bind(&c.title)
        .bind(&c.subtitle)
        .bind(&c.description)
        .bind(c.phone.as_str())
        .bind(c.email.as_str())
        .bind(c.web.as_deref())
        .bind(&c.image.url)
        .bind(&c.image.alt)
        .bind(c.address.state.as_deref())
        .bind(&c.address.country)
        .bind(&c.address.city)
        .bind(&c.address.street)
        .bind(c.address.house_number)
        .bind(c.address.zip)
        .bind(c.price.map(|p| p.cents()))
        .bind(uuids(&card.likes))
        .bind(uuids(&card.add_to_cart))
        .bind(card.created_at)
        .bind(card.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                CardError::BizNumberTaken(card.biz_number.value())
            } else {
                CardError::Database(e)
            }
        })?;

        Ok(())
    }

    async fn biz_number_exists(&self, biz_number: BizNumber) -> CardResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM cards WHERE biz_number = $1)",
        )
        .bind(biz_number.value())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn find_by_id(&self, card_id: &CardId) -> CardResult<Option<Card>> {
        let sql = format!("SELECT {CARD_COLUMNS} FROM cards WHERE card_id = $1");
        let row = sqlx::query_as::<_, CardRow>(&sql)
            .bind(card_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(CardRow::into_card))
    }

    async fn list_all(&self) -> CardResult<Vec<Card>> {
        self.fetch_where("", None).await
    }

    async fn list_by_owner(&self, user_id: &UserId) -> CardResult<Vec<Card>> {
        self.fetch_where("WHERE user_id = $1", Some(user_id)).await
    }

    async fn list_liked_by(&self, user_id: &UserId) -> CardResult<Vec<Card>> {
        self.fetch_where("WHERE $1 = ANY(likes)", Some(user_id)).await
    }

    async fn list_in_cart_of(&self, user_id: &UserId) -> CardResult<Vec<Card>> {
        self.fetch_where("WHERE $1 = ANY(add_to_cart)", Some(user_id))
            .await
    }

    async fn update_content(&self, card: &Card) -> CardResult<Option<Card>> {
        let c = &card.content;
        let sql = format!(
            r#"
            UPDATE cards SET
                title = $2, subtitle = $3, description = $4,
                phone = $5, email = $6, web = $7,
                image_url = $8, image_alt = $9,
                state = $10, country = $11, city = $12, street = $13,
                house_number = $14, zip = $15,
                price_cents = $16, updated_at = $17
            WHERE card_id = $1
            RETURNING {CARD_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, CardRow>(&sql)
            .bind(card.card_id.as_uuid())
            .bind(&c.title)
            .bind(&c.subtitle)
            .bind(&c.description)
            .bind(c.phone.as_str())
            .bind(c.email.as_str())
            .bind(c.web.as_deref())
            .bind(&c.image.url)
            .bind(&c.image.alt)
            .bind(c.address.state.as_deref())
            .bind(&c.address.country)
            .bind(&c.address.city)
            .bind(&c.address.street)
            .bind(c.address.house_number)
            .bind(c.address.zip)
            .bind(c.price.map(|p| p.cents()))
            .bind(card.updated_at)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(CardRow::into_card))
    }

    async fn delete(&self, card_id: &CardId) -> CardResult<Option<Card>> {
        let sql = format!("DELETE FROM cards WHERE card_id = $1 RETURNING {CARD_COLUMNS}");
        let row = sqlx::query_as::<_, CardRow>(&sql)
            .bind(card_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(CardRow::into_card))
    }

    async fn toggle_like(
        &self,
        card_id: &CardId,
        user_id: &UserId,
    ) -> CardResult<Option<(Card, LikeState)>> {
        let sql = format!(
            r#"
            UPDATE cards SET
                likes = CASE
                    WHEN $2 = ANY(likes) THEN array_remove(likes, $2)
                    ELSE array_append(likes, $2)
                END,
                updated_at = NOW()
            WHERE card_id = $1
            RETURNING {CARD_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, CardRow>(&sql)
            .bind(card_id.as_uuid())
            .bind(user_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|row| {
            let card = row.into_card();
            let state = if card.is_liked_by(user_id) {
                LikeState::Liked
            } else {
                LikeState::Unliked
            };
            (card, state)
        }))
    }

    async fn add_to_cart(
        &self,
        card_id: &CardId,
        user_id: &UserId,
    ) -> CardResult<Option<(Card, CartChange)>> {
        // The presence check is re-evaluated under the row lock
        let sql = format!(
            r#"
            UPDATE cards SET
                add_to_cart = array_append(add_to_cart, $2),
                updated_at = NOW()
            WHERE card_id = $1 AND NOT ($2 = ANY(add_to_cart))
            RETURNING {CARD_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, CardRow>(&sql)
            .bind(card_id.as_uuid())
            .bind(user_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        if let Some(row) = row {
            return Ok(Some((row.into_card(), CartChange::Added)));
        }

        // Nothing updated: either already in the cart or no such card
        Ok(self
            .find_by_id(card_id)
            .await?
            .map(|card| (card, CartChange::AlreadyPresent)))
    }

    async fn remove_from_cart(
        &self,
        card_id: &CardId,
        user_id: &UserId,
    ) -> CardResult<Option<Card>> {
        let sql = format!(
            r#"
            UPDATE cards SET
                add_to_cart = array_remove(add_to_cart, $2),
                updated_at = NOW()
            WHERE card_id = $1
            RETURNING {CARD_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, CardRow>(&sql)
            .bind(card_id.as_uuid())
            .bind(user_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(CardRow::into_card))
    }
}

fn uuids(ids: &[UserId]) -> Vec<Uuid> {
    ids.iter().map(|id| *id.as_uuid()).collect()
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct CardRow {
    card_id: Uuid,
    user_id: Uuid,
    biz_number: i32,
    title: String,
    subtitle: String,
    description: String,
    phone: String,
    email: String,
    web: Option<String>,
    image_url: String,
    image_alt: String,
    state: Option<String>,
    country: String,
    city: String,
    street: String,
    house_number: i32,
    zip: Option<i32>,
    price_cents: Option<i64>,
    likes: Vec<Uuid>,
    add_to_cart: Vec<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CardRow {
    fn into_card(self) -> Card {
        Card {
            card_id: CardId::from_uuid(self.card_id),
            user_id: UserId::from_uuid(self.user_id),
            biz_number: BizNumber::new(self.biz_number),
            content: CardContent {
                title: self.title,
                subtitle: self.subtitle,
                description: self.description,
                phone: Phone::from_db(self.phone),
                email: Email::from_db(self.email),
                web: self.web,
                image: Image {
                    url: self.image_url,
                    alt: self.image_alt,
                },
                address: Address {
                    state: self.state,
                    country: self.country,
                    city: self.city,
                    street: self.street,
                    house_number: self.house_number,
                    zip: self.zip,
                },
                price: self.price_cents.map(Price::from_cents),
            },
            likes: self.likes.into_iter().map(UserId::from_uuid).collect(),
            add_to_cart: self.add_to_cart.into_iter().map(UserId::from_uuid).collect(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
