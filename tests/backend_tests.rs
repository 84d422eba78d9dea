// =====================================================
// FILE: tests/backend_tests.rs - MOCK BACKEND
// =====================================================

use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use agri_portal::backend::{BackendClient, PriceQuery};
use agri_portal::core::config::BackendConfig;
use agri_portal::view::header::PROFILE_BLOCK;
use agri_portal::{open_page, CommandHandler, Config, Dictionary, MemoryStore, Store, StoreHandle};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
struct MockState {
    commodities: Mutex<Vec<String>>,
    diseases: Mutex<Vec<(String, String)>>,
    posts: Mutex<Vec<String>>,
    logged_in: Mutex<bool>,
}

async fn admin_data(state: web::Data<MockState>) -> HttpResponse {
    let commodities = state.commodities.lock().unwrap().clone();
    let diseases: Vec<Value> = state
        .diseases
        .lock()
        .unwrap()
        .iter()
        .map(|(name, solution)| json!({ "name": name, "solution": solution }))
        .collect();
    HttpResponse::Ok().json(json!({ "commodities": commodities, "diseases": diseases }))
}

async fn add_commodity(state: web::Data<MockState>, body: web::Json<Value>) -> HttpResponse {
    let name = body["name"].as_str().unwrap_or_default().to_string();
    if name == "Broken" {
        return HttpResponse::InternalServerError().finish();
    }
    state.posts.lock().unwrap().push(format!("add:{}", name));
    state.commodities.lock().unwrap().push(name);
    HttpResponse::Ok().json(json!({ "ok": true }))
}

async fn delete_commodity(state: web::Data<MockState>, body: web::Json<Value>) -> HttpResponse {
    let name = body["name"].as_str().unwrap_or_default().to_string();
    state.posts.lock().unwrap().push(format!("delete:{}", name));
    state.commodities.lock().unwrap().retain(|c| *c != name);
    HttpResponse::Ok().json(json!({ "ok": true }))
}

async fn add_disease(state: web::Data<MockState>, body: web::Json<Value>) -> HttpResponse {
    let name = body["name"].as_str().unwrap_or_default().to_string();
    let solution = body["solution"].as_str().unwrap_or_default().to_string();
    state.posts.lock().unwrap().push(format!("disease:{}", name));
    state.diseases.lock().unwrap().push((name, solution));
    HttpResponse::Ok().json(json!({ "ok": true }))
}

async fn price(req: HttpRequest) -> HttpResponse {
    let query = req.query_string().to_string();
    if query.contains("commodity=Banana") {
        return HttpResponse::Ok().json(json!({ "data": [] }));
    }
    assert!(query.contains("ai=1"), "{}", query);
    HttpResponse::Ok().json(json!({
        "data": [
            {"commodity": "Tomato", "state": "Tamil Nadu", "market": "Erode",
             "modal_price": "2600", "arrival_date": "03/01/2025"},
            {"commodity": "Tomato", "state": "Tamil Nadu", "market": "Erode",
             "modal_price": 2400, "arrival_date": "02/01/2025"}
        ],
        "ai": {"enabled": true, "parsed": {"recommended_modal_price": 2500, "currency": "INR",
               "rationale": "Steady arrivals"}}
    }))
}

async fn predict(body: web::Bytes) -> HttpResponse {
    let text = String::from_utf8_lossy(&body);
    if !text.contains("name=\"image\"") {
        return HttpResponse::BadRequest().finish();
    }
    HttpResponse::Ok().json(json!({
        "disease": "Leaf Blight", "confidence": 0.9876, "solution": "Spray copper fungicide"
    }))
}

async fn user(state: web::Data<MockState>) -> HttpResponse {
    if *state.logged_in.lock().unwrap() {
        HttpResponse::Ok().json(json!({ "logged": true, "user": { "email": "ravi@farm.in" } }))
    } else {
        HttpResponse::Ok().json(json!({ "logged": false }))
    }
}

async fn logout(state: web::Data<MockState>) -> HttpResponse {
    *state.logged_in.lock().unwrap() = false;
    HttpResponse::Ok().finish()
}

/// Starts the mock on an ephemeral port and returns its base URL.
fn start_mock(state: web::Data<MockState>) -> String {
    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .route("/admin/data", web::get().to(admin_data))
            .route("/admin/add_commodity", web::post().to(add_commodity))
            .route("/admin/delete_commodity", web::post().to(delete_commodity))
            .route("/admin/add_disease", web::post().to(add_disease))
            .route("/price", web::get().to(price))
            .route("/predict", web::post().to(predict))
            .route("/api/user", web::get().to(user))
            .route("/auth/logout", web::post().to(logout))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .expect("bind mock backend");

    let addr = server.addrs()[0];
    actix_rt::spawn(server.run());
    format!("http://{}", addr)
}

fn handler_for(base_url: &str) -> CommandHandler {
    let mut config = Config::default();
    config.backend.base_url = base_url.to_string();
    config.backend.timeout = Duration::from_secs(5);

    let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
    let page = open_page(
        &config,
        StoreHandle::new(store),
        Arc::new(Dictionary::embedded().unwrap()),
    )
    .unwrap();
    CommandHandler::new(page)
}

#[actix_rt::test]
async fn price_view_renders_ai_cards_and_chart() {
    let base = start_mock(web::Data::new(MockState::default()));
    let handler = handler_for(&base);

    let result = handler.handle_input(r#"price Tomato "Tamil Nadu" Erode"#).await;
    assert!(result.success, "{}", result.message);
    let text = result.message;
    assert!(text.starts_with("AI Recommended Price: ₹2500 / 100kg\nWhy: Steady arrivals"), "{}", text);
    assert!(text.contains("Commodity: Tomato\nState: Tamil Nadu\nMarket: Erode\nModal Price: ₹2600"));
    assert!(text.contains("Modal Price (₹)\n02/01/2025 |"));
    assert!(text.trim_end().ends_with("2600"));

    let result = handler.handle_input(r#"price Banana "Tamil Nadu" Erode"#).await;
    assert_eq!(result.message, "No data found");
}

#[actix_rt::test]
async fn price_cards_follow_the_language() {
    let base = start_mock(web::Data::new(MockState::default()));
    let handler = handler_for(&base);
    handler.handle_input("lang ta").await;

    // localized commodity goes out in English
    let result = handler.handle_input(r#"price தக்காளி "Tamil Nadu" Erode"#).await;
    assert!(result.message.contains("பொருள்: தக்காளி"), "{}", result.message);
    assert!(result.message.contains("சந்தை: Erode"));
}

#[actix_rt::test]
async fn admin_panel_round_trip() {
    let state = web::Data::new(MockState::default());
    let base = start_mock(state.clone());
    let handler = handler_for(&base);

    let result = handler.handle_input("admin add Turmeric").await;
    assert!(result.message.contains("Commodities:\n  - Turmeric"), "{}", result.message);

    handler.handle_input(r#"admin disease "Leaf Blight | Spray copper""#).await;
    let result = handler.handle_input("admin delete Turmeric").await;
    assert!(!result.message.contains("Turmeric"));
    assert!(result.message.contains("  - Leaf Blight: Spray copper"));

    // blank input sends nothing
    handler.handle_input("admin add").await;
    handler.handle_input("admin disease Rust").await;
    assert_eq!(
        *state.posts.lock().unwrap(),
        vec!["add:Turmeric", "disease:Leaf Blight", "delete:Turmeric"]
    );
}

#[actix_rt::test]
async fn admin_reloads_after_failed_change() {
    let state = web::Data::new(MockState::default());
    state.commodities.lock().unwrap().push("Paddy".to_string());
    let base = start_mock(state.clone());
    let handler = handler_for(&base);

    let result = handler.handle_input("admin add Broken").await;
    assert!(result.success);
    assert_eq!(result.message, "Commodities:\n  - Paddy\nDiseases:");
}

#[actix_rt::test]
async fn predict_uploads_image() {
    let base = start_mock(web::Data::new(MockState::default()));
    let handler = handler_for(&base);

    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("leaf.jpg");
    std::fs::write(&image, [0xFFu8, 0xD8, 0xFF, 0xE0]).unwrap();

    let line = format!("predict \"{}\"", image.display());
    let result = handler.handle_input(&line).await;
    assert_eq!(
        result.message,
        "Disease: Leaf Blight\nConfidence: 98.76%\nSolution: Spray copper fungicide"
    );

    let result = handler.handle_input("predict /no/such/leaf.jpg").await;
    assert!(!result.success);
}

#[actix_rt::test]
async fn profile_follows_session() {
    let state = web::Data::new(MockState::default());
    *state.logged_in.lock().unwrap() = true;
    let base = start_mock(state.clone());
    let handler = handler_for(&base);

    let result = handler.handle_input("user").await;
    assert_eq!(result.message, "Signed in as ravi@farm.in");
    assert_eq!(handler.page().text(PROFILE_BLOCK).as_deref(), Some("ravi"));

    let result = handler.handle_input("logout").await;
    assert_eq!(result.message, "Logged out");
    assert_eq!(handler.page().text(PROFILE_BLOCK).as_deref(), Some("Login"));
}

#[actix_rt::test]
async fn client_reports_http_errors() {
    let base = start_mock(web::Data::new(MockState::default()));
    let client = BackendClient::new(&BackendConfig {
        base_url: base,
        timeout: Duration::from_secs(5),
    })
    .unwrap();

    let response = client
        .price(&PriceQuery::new("Tomato", "Tamil Nadu", "Erode"))
        .await
        .unwrap();
    assert_eq!(response.data.len(), 2);
    assert_eq!(response.data[1].modal_price.as_integer(), Some(2400));

    let missing = BackendClient::new(&BackendConfig {
        base_url: format!("{}/nothing", client.base_url()),
        timeout: Duration::from_secs(5),
    })
    .unwrap();
    match missing.user().await {
        Err(agri_portal::AppError::Backend(msg)) => assert!(msg.contains("404"), "{}", msg),
        other => panic!("expected a backend error, got {:?}", other),
    }
}

#[actix_rt::test]
async fn unreachable_backend_degrades_to_fallback_text() {
    let handler = handler_for("http://127.0.0.1:9");

    let result = handler.handle_input("price Tomato Kerala Palakkad").await;
    assert_eq!(result.message, "No data found");
    let result = handler.handle_input("admin").await;
    assert_eq!(result.message, "Admin data unavailable");
    let result = handler.handle_input("admin add Turmeric").await;
    assert!(result.success);
    assert_eq!(result.message, "Admin data unavailable");
    let result = handler.handle_input("user").await;
    assert_eq!(result.message, "Login");
    let result = handler.handle_input("logout").await;
    assert_eq!(result.message, "Logout failed");
}
