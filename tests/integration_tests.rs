//! 통합 테스트: 실행 중인 서버(localhost:3000)와 데이터베이스가 필요합니다.
//! `cargo test -- --ignored` 로 실행하세요.

use axum::http::StatusCode;
use chrono::{DateTime, Duration, Utc};
use marketplace_service::categories::model::Category;
use marketplace_service::database::DatabaseManager;
use marketplace_service::items::model::Item;
use marketplace_service::messaging;
use marketplace_service::offers::model::Offer;
use marketplace_service::users::model::User;
use marketplace_service::{offers, transactions};
use reqwest::Client;
use serde_json::json;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// 트레이싱 초기화
fn init_tracing() {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .without_time()
        .with_target(false)
        .with_test_writer()
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("트레이싱 구독자 설정 실패");
}

/// 데이터베이스 매니저 설정
async fn setup() -> Arc<DatabaseManager> {
    Arc::new(DatabaseManager::new().await)
}

/// API 경로 생성
fn api(path: &str) -> String {
    format!("http://localhost:3000/api{}", path)
}

/// 회원 가입과 로그인 테스트
#[tokio::test]
#[ignore]
async fn test_register_and_login() {
    let client = Client::new();
    let unique = Uuid::new_v4().simple().to_string();
    let email = format!("signup-{}@test.rw", unique);

    let register_data = json!({
        "username": format!("signup-{}", unique),
        "email": email,
        "password": "secret-password"
    });

    let response = client
        .post(api("/auth/register"))
        .json(&register_data)
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "User registered successfully");
    assert_eq!(body["user"]["email"], email.as_str());

    // 가입 직후 로그인 가능
    let response = client
        .post(api("/auth/login"))
        .json(&json!({ "email": email, "password": "secret-password" }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let user: Value = response.json().await.unwrap();
    assert_eq!(user["email"], email.as_str());
    // 비밀번호 해시는 응답에 포함되지 않음
    assert!(user.get("password_hash").is_none());

    // 잘못된 비밀번호는 401
    let response = client
        .post(api("/auth/login"))
        .json(&json!({ "email": email, "password": "wrong-password" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["code"], "WRONG_PASSWORD");
}

/// 상품 등록, 조회수 증가, 키워드 검색 테스트
#[tokio::test]
#[ignore]
async fn test_item_listing_and_search() {
    let db_manager = setup().await;
    let client = Client::new();

    let seller = create_test_user(&db_manager, "seller").await;
    let category = create_test_category(&db_manager).await;
    let unique = Uuid::new_v4().simple().to_string();

    let item_data = json!({
        "seller_id": seller.id,
        "title": format!("Graphene Kettle {}", unique),
        "description": "Barely used kettle",
        "category_id": category.id,
        "price": 15000
    });

    let response = client
        .post(api("/items"))
        .json(&item_data)
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let item: Value = response.json().await.unwrap();
    let item_id = item["id"].as_i64().unwrap();
    assert_eq!(item["status"], "AVAILABLE");

    // 상세 조회마다 조회수 증가
    for _ in 0..2 {
        let response = client
            .get(api(&format!("/items/{}", item_id)))
            .send()
            .await
            .expect("Failed to send request");
        assert!(response.status().is_success());
    }

    let response = client
        .get(api(&format!("/items/{}", item_id)))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let item: Value = response.json().await.unwrap();
    assert!(item["views"].as_i64().unwrap() >= 2);

    // 키워드 검색으로 방금 등록한 상품 조회
    let response = client
        .get(format!("{}?keyword={}", api("/items/search"), unique))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let results: Value = response.json().await.unwrap();
    let results = results.as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["id"].as_i64().unwrap(), item_id);

    // 허용되지 않은 상품 상태값은 400
    let response = client
        .get(api("/items/condition/BROKEN"))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["code"], "INVALID_CONDITION");
}

/// 제안 협상 흐름 테스트 (제안, 역제안, 수락, 거래 생성)
#[tokio::test]
#[ignore]
async fn test_offer_negotiation() {
    let db_manager = setup().await;
    let client = Client::new();

    let buyer = create_test_user(&db_manager, "nego-buyer").await;
    let seller = create_test_user(&db_manager, "nego-seller").await;
    let category = create_test_category(&db_manager).await;
    let item = create_test_item(&db_manager, seller.id, category.id, 50000).await;

    let response = client
        .post(api("/offers/make"))
        .json(&json!({
            "buyer_id": buyer.id,
            "seller_id": seller.id,
            "item_id": item.id,
            "amount": 40000
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let offer: Value = response.json().await.unwrap();
    let offer_id = offer["id"].as_i64().unwrap();
    assert_eq!(offer["status"], "PENDING");

    // 판매자 역제안
    let response = client
        .put(api(&format!("/offers/{}/counter", offer_id)))
        .json(&json!({ "counter_amount": 45000 }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let offer: Value = response.json().await.unwrap();
    assert_eq!(offer["status"], "COUNTERED");
    assert_eq!(offer["counter_offer_amount"].as_i64().unwrap(), 45000);

    // 구매자가 역제안 수락
    let response = client
        .put(api(&format!("/offers/{}/respond-counter", offer_id)))
        .json(&json!({ "accept": true }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let offer: Value = response.json().await.unwrap();
    assert_eq!(offer["status"], "ACCEPTED");

    // 수락된 제안으로 거래 생성: 역제안 금액이 거래 금액이 됨
    let response = client
        .post(api(&format!("/transactions/from-offer/{}", offer_id)))
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let transaction: Value = response.json().await.unwrap();
    assert_eq!(transaction["amount"].as_i64().unwrap(), 45000);
    assert_eq!(transaction["status"], "PENDING");

    let stored =
        transactions::queries::get_transaction(&db_manager, transaction["id"].as_i64().unwrap())
            .await
            .unwrap()
            .unwrap();
    assert_eq!(stored.buyer_id, buyer.id);
    assert_eq!(stored.seller_id, seller.id);
}

/// 같은 상품에 대한 중복 대기 제안 거부 테스트
#[tokio::test]
#[ignore]
async fn test_duplicate_pending_offer() {
    let db_manager = setup().await;
    let client = Client::new();

    let buyer = create_test_user(&db_manager, "dup-buyer").await;
    let seller = create_test_user(&db_manager, "dup-seller").await;
    let category = create_test_category(&db_manager).await;
    let item = create_test_item(&db_manager, seller.id, category.id, 30000).await;

    let offer_data = json!({
        "buyer_id": buyer.id,
        "seller_id": seller.id,
        "item_id": item.id,
        "amount": 25000
    });

    let response = client
        .post(api("/offers/make"))
        .json(&offer_data)
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let response = client
        .post(api("/offers/make"))
        .json(&offer_data)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["code"], "ALREADY_PENDING");
}

/// 제안 상태 전이 가드 테스트
#[tokio::test]
#[ignore]
async fn test_offer_guards() {
    let db_manager = setup().await;
    let client = Client::new();

    let buyer = create_test_user(&db_manager, "guard-buyer").await;
    let seller = create_test_user(&db_manager, "guard-seller").await;
    let stranger = create_test_user(&db_manager, "guard-stranger").await;
    let category = create_test_category(&db_manager).await;
    let item = create_test_item(&db_manager, seller.id, category.id, 20000).await;

    let response = client
        .post(api("/offers/make"))
        .json(&json!({
            "buyer_id": buyer.id,
            "seller_id": seller.id,
            "item_id": item.id,
            "amount": 18000
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let offer: Value = response.json().await.unwrap();
    let offer_id = offer["id"].as_i64().unwrap();

    // 구매자 본인만 철회 가능
    let response = client
        .put(format!(
            "{}?buyer_id={}",
            api(&format!("/offers/{}/cancel", offer_id)),
            stranger.id
        ))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["code"], "NOT_BUYER");

    let response = client
        .put(api(&format!("/offers/{}/reject", offer_id)))
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    // 이미 거절된 제안은 수락 불가
    let response = client
        .put(api(&format!("/offers/{}/accept", offer_id)))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["code"], "INVALID_STATUS");
}

/// 수기 결제 확인 전체 흐름 테스트
#[tokio::test]
#[ignore]
async fn test_payment_flow() {
    // 테스트 시작 시 tracing 초기화
    init_tracing();

    let db_manager = setup().await;
    let client = Client::new();

    let buyer = create_test_user(&db_manager, "pay-buyer").await;
    let seller = create_test_user(&db_manager, "pay-seller").await;
    let category = create_test_category(&db_manager).await;
    let item = create_test_item(&db_manager, seller.id, category.id, 80000).await;

    let response = client
        .post(api("/transactions"))
        .json(&json!({
            "buyer_id": buyer.id,
            "seller_id": seller.id,
            "item_id": item.id,
            "amount": 80000
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let transaction: Value = response.json().await.unwrap();
    let transaction_id = transaction["id"].as_i64().unwrap();
    assert_eq!(transaction["status"], "PENDING");
    assert!(transaction["transaction_reference"]
        .as_str()
        .unwrap()
        .starts_with("TXN-"));

    info!("거래 생성 완료 id: {}", transaction_id);

    // 구매자 결제 전송
    let response = client
        .put(api(&format!(
            "/transactions/{}/process-payment",
            transaction_id
        )))
        .json(&json!({ "payment_reference": "MOMO-12345" }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let transaction: Value = response.json().await.unwrap();
    assert_eq!(transaction["status"], "PAYMENT_SENT");

    // 판매자 결제 확인
    let response = client
        .put(format!(
            "{}?seller_id={}",
            api(&format!("/transactions/{}/confirm-payment", transaction_id)),
            seller.id
        ))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let transaction: Value = response.json().await.unwrap();
    assert_eq!(transaction["status"], "PAYMENT_CONFIRMED");

    // 수령 정보 등록
    let response = client
        .put(api(&format!("/transactions/{}/delivery-info", transaction_id)))
        .json(&json!({
            "pickup_location": "Kimironko Market",
            "pickup_date": (Utc::now() + Duration::days(1)).to_rfc3339()
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let transaction: Value = response.json().await.unwrap();
    assert_eq!(transaction["status"], "PICKUP_ARRANGED");

    // 판매자 전달 확인
    let response = client
        .put(format!(
            "{}?seller_id={}",
            api(&format!(
                "/transactions/{}/confirm-delivered",
                transaction_id
            )),
            seller.id
        ))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let transaction: Value = response.json().await.unwrap();
    assert_eq!(transaction["status"], "PICKUP_COMPLETED");

    // 구매자 수령 확인으로 거래 완료
    let response = client
        .put(format!(
            "{}?buyer_id={}",
            api(&format!("/transactions/{}/confirm-received", transaction_id)),
            buyer.id
        ))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let transaction: Value = response.json().await.unwrap();
    assert_eq!(transaction["status"], "COMPLETED");

    // 영수증 발급
    let response = client
        .get(api(&format!("/transactions/{}/receipt", transaction_id)))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.unwrap();
    let receipt = body["receipt"].as_str().unwrap();
    assert!(receipt.contains("TRANSACTION RECEIPT"));
    assert!(receipt.contains(&buyer.username));
    assert!(receipt.contains(&seller.username));

    let stored = transactions::queries::get_transaction(&db_manager, transaction_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, "COMPLETED");
    assert!(stored.completed_at.is_some());
}

/// 거래 상태 전이 가드 테스트
#[tokio::test]
#[ignore]
async fn test_transaction_guards() {
    let db_manager = setup().await;
    let client = Client::new();

    let buyer = create_test_user(&db_manager, "txg-buyer").await;
    let seller = create_test_user(&db_manager, "txg-seller").await;
    let stranger = create_test_user(&db_manager, "txg-stranger").await;
    let category = create_test_category(&db_manager).await;
    let item = create_test_item(&db_manager, seller.id, category.id, 60000).await;

    let response = client
        .post(api("/transactions"))
        .json(&json!({
            "buyer_id": buyer.id,
            "seller_id": seller.id,
            "item_id": item.id,
            "amount": 60000
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let transaction: Value = response.json().await.unwrap();
    let transaction_id = transaction["id"].as_i64().unwrap();

    // 수령 완료 전에는 거래 완료 불가
    let response = client
        .put(api(&format!("/transactions/{}/complete", transaction_id)))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["code"], "INVALID_STATUS");

    // 취소 또는 분쟁 상태가 아니면 환불 불가
    let response = client
        .put(api(&format!("/transactions/{}/refund", transaction_id)))
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["code"], "INVALID_STATUS");

    // 결제 확인은 해당 거래의 판매자만 가능
    let response = client
        .put(format!(
            "{}?seller_id={}",
            api(&format!("/transactions/{}/confirm-payment", transaction_id)),
            stranger.id
        ))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["code"], "NOT_SELLER");

    // 거래 당사자가 아니면 취소 불가
    let response = client
        .put(api(&format!("/transactions/{}/cancel", transaction_id)))
        .json(&json!({ "user_id": stranger.id, "reason": "changed my mind" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["code"], "NOT_OWNER");
}

/// 만료된 제안 일괄 처리 테스트
#[tokio::test]
#[ignore]
async fn test_mark_expired_offers() {
    let db_manager = setup().await;
    let client = Client::new();

    let buyer = create_test_user(&db_manager, "exp-buyer").await;
    let seller = create_test_user(&db_manager, "exp-seller").await;
    let category = create_test_category(&db_manager).await;
    let stale_item = create_test_item(&db_manager, seller.id, category.id, 10000).await;
    let fresh_item = create_test_item(&db_manager, seller.id, category.id, 12000).await;

    let stale = create_test_offer(
        &db_manager,
        buyer.id,
        seller.id,
        stale_item.id,
        9000,
        Some(Utc::now() - Duration::hours(1)),
    )
    .await;
    let fresh = create_test_offer(
        &db_manager,
        buyer.id,
        seller.id,
        fresh_item.id,
        11000,
        Some(Utc::now() + Duration::hours(24)),
    )
    .await;

    let response = client
        .post(api("/offers/mark-expired"))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.unwrap();
    assert!(body["count"].as_i64().unwrap() >= 1);

    let stale = offers::queries::get_offer(&db_manager, stale.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stale.status, "EXPIRED");
    assert!(stale.is_expired);

    // 만료 시각이 지나지 않은 제안은 그대로 유지
    let fresh = offers::queries::get_offer(&db_manager, fresh.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fresh.status, "PENDING");
    assert!(!fresh.is_expired);
}

/// 대화 시작, 미확인 메시지 집계, 일괄 읽음 처리 테스트
#[tokio::test]
#[ignore]
async fn test_messaging_flow() {
    let db_manager = setup().await;
    let client = Client::new();

    let alice = create_test_user(&db_manager, "msg-alice").await;
    let bob = create_test_user(&db_manager, "msg-bob").await;
    let category = create_test_category(&db_manager).await;
    let item = create_test_item(&db_manager, bob.id, category.id, 5000).await;

    let response = client
        .post(api("/messages/start-conversation"))
        .json(&json!({
            "sender_id": alice.id,
            "receiver_id": bob.id,
            "item_id": item.id,
            "content": "Is this still available?"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let response = client
        .post(api("/messages/send"))
        .json(&json!({
            "sender_id": bob.id,
            "receiver_id": alice.id,
            "content": "Yes, it is!"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    // 대화 조회는 보낸 시각 오름차순
    let response = client
        .get(api(&format!(
            "/messages/conversation/{}/{}",
            alice.id, bob.id
        )))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let conversation: Value = response.json().await.unwrap();
    let conversation = conversation.as_array().unwrap();
    assert_eq!(conversation.len(), 2);
    assert_eq!(conversation[0]["content"], "Is this still available?");
    assert_eq!(conversation[1]["content"], "Yes, it is!");

    let unread = messaging::queries::count_unread_messages(&db_manager, bob.id)
        .await
        .unwrap();
    assert_eq!(unread, 1);

    // 일괄 읽음 처리 후 미확인 메시지 없음
    let response = client
        .put(format!(
            "{}?receiver_id={}&sender_id={}",
            api("/messages/mark-all-read"),
            bob.id,
            alice.id
        ))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["count"].as_i64().unwrap(), 1);

    let response = client
        .get(api(&format!("/messages/user/{}/unread-count", bob.id)))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["unreadCount"].as_i64().unwrap(), 0);
}

/// 검증 없는 제안 직접 생성 테스트
#[tokio::test]
#[ignore]
async fn test_direct_offer_create() {
    let db_manager = setup().await;
    let client = Client::new();

    let buyer = create_test_user(&db_manager, "raw-buyer").await;
    let seller = create_test_user(&db_manager, "raw-seller").await;
    let category = create_test_category(&db_manager).await;
    let item = create_test_item(&db_manager, seller.id, category.id, 35000).await;

    let offer_data = json!({
        "buyer_id": buyer.id,
        "seller_id": seller.id,
        "item_id": item.id,
        "offered_amount": 32000
    });

    let response = client
        .post(api("/offers"))
        .json(&offer_data)
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let offer: Value = response.json().await.unwrap();
    assert_eq!(offer["status"], "PENDING");
    assert_eq!(offer["offered_amount"].as_i64().unwrap(), 32000);

    // 직접 생성은 중복 대기 제안 검사를 거치지 않음
    let response = client
        .post(api("/offers"))
        .json(&offer_data)
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let stored = offers::queries::get_offer(&db_manager, offer["id"].as_i64().unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, "PENDING");
    assert_eq!(stored.buyer_id, buyer.id);
}

/// 테스트용 사용자 생성
async fn create_test_user(db_manager: &DatabaseManager, prefix: &str) -> User {
    let unique = Uuid::new_v4().simple().to_string();
    let username = format!("{}-{}", prefix, unique);
    let email = format!("{}@test.rw", username);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, User>(
                    "INSERT INTO users (username, email, password_hash, is_active, created_at)
                     VALUES ($1, $2, $3, TRUE, $4)
                     RETURNING *",
                )
                .bind(&username)
                .bind(&email)
                .bind("test-password-hash")
                .bind(Utc::now())
                .fetch_one(&mut **tx)
                .await
            })
        })
        .await
        .unwrap()
}

/// 테스트용 카테고리 생성
async fn create_test_category(db_manager: &DatabaseManager) -> Category {
    let name = format!("category-{}", Uuid::new_v4().simple());
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Category>(
                    "INSERT INTO categories (name, created_at)
                     VALUES ($1, $2)
                     RETURNING *",
                )
                .bind(&name)
                .bind(Utc::now())
                .fetch_one(&mut **tx)
                .await
            })
        })
        .await
        .unwrap()
}

/// 테스트용 상품 생성
async fn create_test_item(
    db_manager: &DatabaseManager,
    seller_id: i64,
    category_id: i64,
    price: i64,
) -> Item {
    let title = format!("item-{}", Uuid::new_v4().simple());
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Item>(
                    "INSERT INTO items (seller_id, title, category_id, price, created_at)
                     VALUES ($1, $2, $3, $4, $5)
                     RETURNING *",
                )
                .bind(seller_id)
                .bind(&title)
                .bind(category_id)
                .bind(price)
                .bind(Utc::now())
                .fetch_one(&mut **tx)
                .await
            })
        })
        .await
        .unwrap()
}

/// 테스트용 제안 생성
async fn create_test_offer(
    db_manager: &DatabaseManager,
    buyer_id: i64,
    seller_id: i64,
    item_id: i64,
    offered_amount: i64,
    expires_at: Option<DateTime<Utc>>,
) -> Offer {
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Offer>(
                    "INSERT INTO offers (buyer_id, seller_id, item_id, offered_amount, status, expires_at, created_at)
                     VALUES ($1, $2, $3, $4, 'PENDING', $5, $6)
                     RETURNING *",
                )
                .bind(buyer_id)
                .bind(seller_id)
                .bind(item_id)
                .bind(offered_amount)
                .bind(expires_at)
                .bind(Utc::now())
                .fetch_one(&mut **tx)
                .await
            })
        })
        .await
        .unwrap()
}
