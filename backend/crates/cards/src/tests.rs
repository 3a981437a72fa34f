//! Router tests for the `/api/cards` endpoints over the in-memory repository
//!
//! The auth middleware is not part of this crate; requests carry their
//! `Principal` in extensions the way it would have attached one.

#[cfg(test)]
mod router_tests {
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Method, Request, StatusCode, header},
    };
    use kernel::{id::UserId, principal::Principal};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::application::config::CardsConfig;
    use crate::infra::memory::InMemoryCardRepository;
    use crate::presentation::{CardsAppState, cards_router_generic};

    fn app() -> Router {
        let state = CardsAppState::new(InMemoryCardRepository::new(), CardsConfig::default());
        Router::new().nest("/api/cards", cards_router_generic(state))
    }

    fn business() -> Principal {
        Principal::new(UserId::new(), true, false)
    }

    fn regular() -> Principal {
        Principal::new(UserId::new(), false, false)
    }

    fn admin() -> Principal {
        Principal::new(UserId::new(), false, true)
    }

    fn card_body() -> Value {
        json!({
            "title": "Levi Plumbing",
            "subtitle": "Pipes and boilers",
            "description": "Family business since 1987",
            "phone": "050-1234567",
            "email": "Office@LeviPlumbing.co.il",
            "web": "https://leviplumbing.co.il",
            "image": { "url": "", "alt": "" },
            "address": {
                "country": "Israel",
                "city": "Haifa",
                "street": "Herzl",
                "houseNumber": 12
            },
            "price": "12.5"
        })
    }

    fn request(method: Method, uri: &str, as_user: Option<Principal>, body: Option<&Value>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let mut req = builder.body(body).unwrap();
        if let Some(principal) = as_user {
            req.extensions_mut().insert(principal);
        }
        req
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let res = app.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    async fn create_card(app: &Router, owner: Principal) -> Value {
        let (status, body) = send(
            app,
            request(Method::POST, "/api/cards", Some(owner), Some(&card_body())),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body["card"].clone()
    }

    fn card_uri(card: &Value) -> String {
        format!("/api/cards/{}", card["_id"].as_str().unwrap())
    }

    // ------------------------------------------------------------------
    // Create
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn test_business_user_creates_card() {
        let app = app();
        let owner = business();
        let card = create_card(&app, owner).await;

        assert_eq!(card["userId"], owner.user_id.to_string());
        assert_eq!(card["email"], "office@leviplumbing.co.il");
        assert_eq!(card["price"], "$12.50");
        assert_eq!(card["likes"], json!([]));
        assert_eq!(card["addToCart"], json!([]));
        assert_eq!(card["image"]["alt"], "business card image");

        let biz_number = card["bizNumber"].as_i64().unwrap();
        assert!((1_000_000..=9_999_999).contains(&biz_number));
    }

    #[tokio::test]
    async fn test_server_owned_fields_are_ignored() {
        let app = app();
        let owner = business();
        let mut body = card_body();
        body["bizNumber"] = json!(42);
        body["likes"] = json!([UserId::new().to_string()]);
        body["userId"] = json!(UserId::new().to_string());

        let (status, created) = send(
            &app,
            request(Method::POST, "/api/cards", Some(owner), Some(&body)),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_ne!(created["card"]["bizNumber"], 42);
        assert_eq!(created["card"]["likes"], json!([]));
        assert_eq!(created["card"]["userId"], owner.user_id.to_string());
    }

    #[tokio::test]
    async fn test_admin_may_create_card() {
        let app = app();
        create_card(&app, admin()).await;
    }

    #[tokio::test]
    async fn test_regular_user_cannot_create_card() {
        let app = app();
        let (status, body) = send(
            &app,
            request(Method::POST, "/api/cards", Some(regular()), Some(&card_body())),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Unauthorized");
    }

    #[tokio::test]
    async fn test_regular_user_with_bad_body_still_gets_401() {
        let app = app();
        let (status, _) = send(
            &app,
            request(Method::POST, "/api/cards", Some(regular()), Some(&json!({ "title": 1 }))),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_anonymous_cannot_create_card() {
        let app = app();
        let (status, _) = send(
            &app,
            request(Method::POST, "/api/cards", None, Some(&card_body())),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_create_accepts_house_number_as_text() {
        let app = app();
        let mut body = card_body();
        body["address"]["houseNumber"] = json!("12");
        body["address"]["zip"] = json!("3303112");

        let (status, created) = send(
            &app,
            request(Method::POST, "/api/cards", Some(business()), Some(&body)),
        )
        .await;

        assert_eq!(status, StatusCode::OK, "{created}");
        assert_eq!(created["card"]["address"]["houseNumber"], 12);
        assert_eq!(created["card"]["address"]["zip"], 3303112);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_fields() {
        let app = app();
        let mut body = card_body();
        body["phone"] = json!("12");

        let (status, error) = send(
            &app,
            request(Method::POST, "/api/cards", Some(business()), Some(&body)),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(error["message"].as_str().unwrap().contains("phone"));
    }

    // ------------------------------------------------------------------
    // Read
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn test_list_and_get_are_public() {
        let app = app();
        let card = create_card(&app, business()).await;

        let (status, list) = send(&app, request(Method::GET, "/api/cards", None, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list.as_array().unwrap().len(), 1);

        let (status, fetched) = send(&app, request(Method::GET, &card_uri(&card), None, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["_id"], card["_id"]);
    }

    #[tokio::test]
    async fn test_get_missing_card_is_404() {
        let app = app();
        let uri = format!("/api/cards/{}", UserId::new());
        let (status, body) = send(&app, request(Method::GET, &uri, None, None)).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Card not found");
    }

    #[tokio::test]
    async fn test_malformed_id_is_400() {
        let app = app();
        let (status, body) = send(
            &app,
            request(Method::GET, "/api/cards/not-a-card", None, None),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], 400);
    }

    #[tokio::test]
    async fn test_my_cards_lists_only_own_cards() {
        let app = app();
        let owner = business();
        create_card(&app, owner).await;
        create_card(&app, owner).await;
        create_card(&app, business()).await;

        let (status, mine) = send(
            &app,
            request(Method::GET, "/api/cards/my-cards", Some(owner), None),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let mine = mine.as_array().unwrap();
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|c| c["userId"] == owner.user_id.to_string()));
    }

    #[tokio::test]
    async fn test_my_cards_requires_business_role() {
        let app = app();
        let (status, _) = send(
            &app,
            request(Method::GET, "/api/cards/my-cards", Some(regular()), None),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    // ------------------------------------------------------------------
    // Update
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn test_owner_updates_card_fields() {
        let app = app();
        let owner = business();
        let card = create_card(&app, owner).await;

        let (status, updated) = send(
            &app,
            request(
                Method::PUT,
                &card_uri(&card),
                Some(owner),
                Some(&json!({ "title": "Levi & Sons Plumbing", "price": "$20", "bizNumber": 1 })),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["title"], "Levi & Sons Plumbing");
        assert_eq!(updated["price"], "$20.00");
        assert_eq!(updated["subtitle"], card["subtitle"]);
        assert_eq!(updated["bizNumber"], card["bizNumber"]);
    }

    #[tokio::test]
    async fn test_update_with_null_price_clears_it() {
        let app = app();
        let owner = business();
        let card = create_card(&app, owner).await;

        let (status, kept) = send(
            &app,
            request(Method::PUT, &card_uri(&card), Some(owner), Some(&json!({ "subtitle": "Boilers" }))),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(kept["price"], "$12.50");

        let (status, cleared) = send(
            &app,
            request(Method::PUT, &card_uri(&card), Some(owner), Some(&json!({ "price": null }))),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(cleared.get("price").is_none());
        assert_eq!(cleared["subtitle"], "Boilers");
    }

    #[tokio::test]
    async fn test_other_business_user_cannot_update() {
        let app = app();
        let card = create_card(&app, business()).await;

        let (status, body) = send(
            &app,
            request(
                Method::PUT,
                &card_uri(&card),
                Some(business()),
                Some(&json!({ "title": "Hijacked" })),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["message"], "You are not authorized to edit this card");
    }

    #[tokio::test]
    async fn test_admin_updates_any_card() {
        let app = app();
        let card = create_card(&app, business()).await;

        let (status, updated) = send(
            &app,
            request(
                Method::PUT,
                &card_uri(&card),
                Some(admin()),
                Some(&json!({ "subtitle": "Moderated" })),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["subtitle"], "Moderated");
    }

    #[tokio::test]
    async fn test_update_missing_card_is_404() {
        let app = app();
        let uri = format!("/api/cards/{}", UserId::new());
        let (status, _) = send(
            &app,
            request(Method::PUT, &uri, Some(admin()), Some(&json!({ "title": "Nope" }))),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_revalidates_merged_card() {
        let app = app();
        let owner = business();
        let card = create_card(&app, owner).await;

        let (status, _) = send(
            &app,
            request(Method::PUT, &card_uri(&card), Some(owner), Some(&json!({ "email": "nope" }))),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    // ------------------------------------------------------------------
    // Delete
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn test_owner_deletes_card() {
        let app = app();
        let owner = business();
        let card = create_card(&app, owner).await;
        let uri = card_uri(&card);

        let (status, body) = send(&app, request(Method::DELETE, &uri, Some(owner), None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Card deleted successfully");
        assert_eq!(body["deletedCard"]["_id"], card["_id"]);

        let (status, _) = send(&app, request(Method::GET, &uri, None, None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, request(Method::DELETE, &uri, Some(owner), None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_non_owner_cannot_delete() {
        let app = app();
        let card = create_card(&app, business()).await;

        for intruder in [business(), regular()] {
            let (status, body) = send(
                &app,
                request(Method::DELETE, &card_uri(&card), Some(intruder), None),
            )
            .await;
            assert_eq!(status, StatusCode::FORBIDDEN);
            assert_eq!(body["message"], "You are not authorized to delete this card");
        }
    }

    #[tokio::test]
    async fn test_admin_deletes_any_card() {
        let app = app();
        let card = create_card(&app, business()).await;

        let (status, _) = send(
            &app,
            request(Method::DELETE, &card_uri(&card), Some(admin()), None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    // ------------------------------------------------------------------
    // Likes
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn test_like_twice_unlikes() {
        let app = app();
        let card = create_card(&app, business()).await;
        let fan = regular();
        let uri = card_uri(&card);
        let id = card["_id"].as_str().unwrap();

        let (status, liked) = send(&app, request(Method::PATCH, &uri, Some(fan), None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(liked["message"], format!("Card {id} liked by the user"));
        assert_eq!(liked["card"]["likes"], json!([fan.user_id.to_string()]));

        let (status, unliked) = send(&app, request(Method::PATCH, &uri, Some(fan), None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(unliked["message"], format!("Card {id} un-liked by the user"));
        assert_eq!(unliked["card"]["likes"], json!([]));
    }

    #[tokio::test]
    async fn test_favorites_lists_liked_cards() {
        let app = app();
        let liked = create_card(&app, business()).await;
        create_card(&app, business()).await;
        let fan = regular();

        send(&app, request(Method::PATCH, &card_uri(&liked), Some(fan), None)).await;

        let (status, favorites) = send(
            &app,
            request(Method::GET, "/api/cards/favorites", Some(fan), None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let favorites = favorites.as_array().unwrap();
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0]["_id"], liked["_id"]);
    }

    #[tokio::test]
    async fn test_like_requires_authentication() {
        let app = app();
        let card = create_card(&app, business()).await;
        let (status, _) = send(&app, request(Method::PATCH, &card_uri(&card), None, None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_like_missing_card_is_404() {
        let app = app();
        let uri = format!("/api/cards/{}", UserId::new());
        let (status, _) = send(&app, request(Method::PATCH, &uri, Some(regular()), None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    // ------------------------------------------------------------------
    // Cart
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn test_add_to_cart_is_idempotent() {
        let app = app();
        let card = create_card(&app, business()).await;
        let buyer = regular();
        let uri = format!("{}/add-to-cart", card_uri(&card));
        let id = card["_id"].as_str().unwrap();

        let (status, first) = send(&app, request(Method::POST, &uri, Some(buyer), None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(first["message"], format!("Card {id} added to the user's cart"));

        let (status, second) = send(&app, request(Method::POST, &uri, Some(buyer), None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(second["message"], format!("Card {id} is already in the user's cart"));
        assert_eq!(second["card"]["addToCart"], json!([buyer.user_id.to_string()]));
    }

    #[tokio::test]
    async fn test_cart_listing_and_removal() {
        let app = app();
        let card = create_card(&app, business()).await;
        let buyer = regular();
        let uri = format!("{}/add-to-cart", card_uri(&card));

        send(&app, request(Method::POST, &uri, Some(buyer), None)).await;

        let (_, cart) = send(&app, request(Method::GET, "/api/cards/cart", Some(buyer), None)).await;
        assert_eq!(cart.as_array().unwrap().len(), 1);

        let (status, removed) = send(&app, request(Method::DELETE, &uri, Some(buyer), None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(removed["card"]["addToCart"], json!([]));

        let (_, cart) = send(&app, request(Method::GET, "/api/cards/cart", Some(buyer), None)).await;
        assert_eq!(cart, json!([]));
    }

    #[tokio::test]
    async fn test_cart_requires_authentication() {
        let app = app();
        let (status, _) = send(&app, request(Method::GET, "/api/cards/cart", None, None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    // ------------------------------------------------------------------
    // Concurrent engagement
    // ------------------------------------------------------------------

    const CONCURRENT_REQUESTS: usize = 16;

    async fn send_concurrently(app: &Router, method: Method, uri: &str, as_user: Principal, times: usize) {
        let handles: Vec<_> = (0..times)
            .map(|_| {
                let app = app.clone();
                let req = request(method.clone(), uri, Some(as_user), None);
                tokio::spawn(async move { send(&app, req).await })
            })
            .collect();

        for handle in handles {
            let (status, _) = handle.await.unwrap();
            assert_eq!(status, StatusCode::OK);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_add_to_cart_keeps_single_entry() {
        let app = app();
        let card = create_card(&app, business()).await;
        let buyer = regular();
        let uri = format!("{}/add-to-cart", card_uri(&card));

        send_concurrently(&app, Method::POST, &uri, buyer, CONCURRENT_REQUESTS).await;

        let (_, stored) = send(&app, request(Method::GET, &card_uri(&card), None, None)).await;
        assert_eq!(stored["addToCart"], json!([buyer.user_id.to_string()]));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_like_toggles_cancel_out() {
        let app = app();
        let card = create_card(&app, business()).await;
        let fan = regular();

        send_concurrently(&app, Method::PATCH, &card_uri(&card), fan, 2 * CONCURRENT_REQUESTS).await;

        let (_, stored) = send(&app, request(Method::GET, &card_uri(&card), None, None)).await;
        assert_eq!(stored["likes"], json!([]));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_likes_from_many_users_are_all_kept() {
        let app = app();
        let card = create_card(&app, business()).await;
        let fans: Vec<Principal> = (0..CONCURRENT_REQUESTS).map(|_| regular()).collect();

        let handles: Vec<_> = fans
            .iter()
            .map(|fan| {
                let app = app.clone();
                let req = request(Method::PATCH, &card_uri(&card), Some(*fan), None);
                tokio::spawn(async move { send(&app, req).await })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.await.unwrap().0, StatusCode::OK);
        }

        let (_, stored) = send(&app, request(Method::GET, &card_uri(&card), None, None)).await;
        let likes = stored["likes"].as_array().unwrap();
        assert_eq!(likes.len(), CONCURRENT_REQUESTS);
        for fan in &fans {
            assert!(likes.contains(&json!(fan.user_id.to_string())));
        }
    }
}
