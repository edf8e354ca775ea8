use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use axum_test::{
    TestServer,
    multipart::{MultipartForm, Part},
};
use clap::Parser;
use dishlens_api::{
    application::http::server::http_server::{router, state},
    args::Args,
};
use serde_json::{Value, json};
use tempfile::TempDir;
use test_context::{AsyncTestContext, test_context};

const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR\0\0\0\x01\0\0\0\x01";

const SALTENA_REPLY: &str = r#"Here is the analysis:
```json
{"nombre_plato": "Salteña", "receta": {"ingredientes": ["carne", "papa", "ají"], "pasos": ["Preparar el jigote", "Hornear"]}, "datos_curiosos": ["Se come a media mañana"]}
```"#;

#[derive(Clone)]
struct ScriptedReply {
    status: StatusCode,
    text: String,
    delay: Option<Duration>,
}

/// Local stand-in for the Gemini `generateContent` endpoint.
#[derive(Clone)]
struct FakeGemini {
    reply: Arc<Mutex<ScriptedReply>>,
    calls: Arc<Mutex<Vec<Value>>>,
}

impl FakeGemini {
    fn reply_with(&self, text: &str) {
        *self.reply.lock().unwrap() = ScriptedReply {
            status: StatusCode::OK,
            text: text.to_string(),
            delay: None,
        };
    }

    fn fail_with(&self, status: StatusCode) {
        self.reply.lock().unwrap().status = status;
    }

    fn delay_by(&self, delay: Duration) {
        self.reply.lock().unwrap().delay = Some(delay);
    }

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn last_call(&self) -> Value {
        self.calls.lock().unwrap().last().cloned().unwrap_or(Value::Null)
    }
}

async fn generate_content(
    State(fake): State<FakeGemini>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    fake.calls.lock().unwrap().push(body);
    let reply = fake.reply.lock().unwrap().clone();

    if let Some(delay) = reply.delay {
        tokio::time::sleep(delay).await;
    }

    if !reply.status.is_success() {
        return (reply.status, Json(json!({"error": {"message": "scripted failure"}})));
    }

    (
        reply.status,
        Json(json!({
            "candidates": [{"content": {"parts": [{"text": reply.text}]}}]
        })),
    )
}

async fn spawn_fake_gemini() -> (FakeGemini, String) {
    let fake = FakeGemini {
        reply: Arc::new(Mutex::new(ScriptedReply {
            status: StatusCode::OK,
            text: "{}".to_string(),
            delay: None,
        })),
        calls: Arc::new(Mutex::new(Vec::new())),
    };

    let app = Router::new()
        .route("/v1beta/models/{*rest}", post(generate_content))
        .with_state(fake.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (fake, format!("http://{address}"))
}

struct ApiContext {
    server: TestServer,
    gemini: FakeGemini,
    _dir: TempDir,
}

impl AsyncTestContext for ApiContext {
    async fn setup() -> Self {
        let dir = TempDir::new().unwrap();
        let (gemini, base_url) = spawn_fake_gemini().await;
        let database_url = format!("sqlite://{}", dir.path().join("api.db").display());

        let args = Args::parse_from([
            "dishlens-api",
            "--database-url",
            database_url.as_str(),
            "--gemini-api-key",
            "test-key",
            "--gemini-base-url",
            base_url.as_str(),
            "--llm-timeout-secs",
            "1",
            "--server-root-path",
            "",
            "--server-allowed-origins",
            "*",
        ]);

        let app_state = state(Arc::new(args)).await.unwrap();
        let server = TestServer::new(router(app_state).unwrap()).unwrap();

        ApiContext {
            server,
            gemini,
            _dir: dir,
        }
    }
}

impl ApiContext {
    async fn upload(&self, part: Part) -> axum_test::TestResponse {
        self.server
            .post("/analyze_food")
            .multipart(MultipartForm::new().add_part("file", part))
            .await
    }

    async fn upload_png(&self) -> axum_test::TestResponse {
        self.upload(
            Part::bytes(PNG_BYTES.to_vec())
                .file_name("dish.png")
                .mime_type("image/png"),
        )
        .await
    }

    /// Stores one analysis through the API and returns its id.
    async fn analyze(&self, reply: &str) -> i64 {
        self.gemini.reply_with(reply);
        let response = self.upload_png().await;
        response.assert_status_ok();
        response
            .header("location")
            .to_str()
            .unwrap()
            .rsplit('/')
            .next()
            .unwrap()
            .parse()
            .unwrap()
    }
}

fn assert_error(body: &Value, status: u16) {
    assert_eq!(body["status"], status);
    assert!(body["code"].as_str().unwrap().starts_with("E_"));
    assert!(body["message"].is_string());
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_index_lists_endpoints(ctx: &mut ApiContext) {
    let response = ctx.server.get("/").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert!(body["message"].is_string());
    assert!(body["version"].is_string());
    assert!(body["endpoints"]["/analyze_food"].is_string());
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_health_reports_ok(ctx: &mut ApiContext) {
    let response = ctx.server.get("/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert!(body["database_latency_ms"].is_u64());
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_analyze_food_returns_spanish_shape_and_location(ctx: &mut ApiContext) {
    ctx.gemini.reply_with(SALTENA_REPLY);

    let response = ctx.upload_png().await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["nombre_plato"], "Salteña");
    assert_eq!(body["receta"]["ingredientes"], json!(["carne", "papa", "ají"]));
    assert_eq!(body["receta"]["pasos"].as_array().unwrap().len(), 2);
    assert_eq!(body["datos_curiosos"].as_array().unwrap().len(), 1);

    let location = response.header("location").to_str().unwrap().to_string();
    assert!(location.starts_with("/analysis/"));

    let call = ctx.gemini.last_call();
    assert_eq!(
        call["contents"][0]["parts"][1]["inline_data"]["mime_type"],
        "image/png"
    );

    let stored = ctx.server.get(&location).await;
    stored.assert_status_ok();
    let record: Value = stored.json();
    assert_eq!(record["dish_name"], "Salteña");
    assert_eq!(record["recipe_steps"][1], "Hornear");
    assert_eq!(record["image_hash"].as_str().unwrap().len(), 64);
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_unparsable_reply_still_yields_full_shape(ctx: &mut ApiContext) {
    ctx.gemini.reply_with("Sorry, I cannot identify this.");

    let response = ctx.upload_png().await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["nombre_plato"], "Unknown dish");
    assert_eq!(body["receta"]["ingredientes"], json!([]));
    assert_eq!(body["receta"]["pasos"], json!([]));
    assert_eq!(body["datos_curiosos"], json!([]));

    let history: Value = ctx.server.get("/history").await.json();
    assert_eq!(history.as_array().unwrap().len(), 1);
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_non_image_upload_is_rejected_before_upstream(ctx: &mut ApiContext) {
    let response = ctx
        .upload(
            Part::bytes(b"plain text, not a photo".to_vec())
                .file_name("notes.txt")
                .mime_type("text/plain"),
        )
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_error(&response.json(), 400);

    let disguised = ctx
        .upload(
            Part::bytes(b"GIF89a not supported".to_vec())
                .file_name("dish.png")
                .mime_type("image/png"),
        )
        .await;
    disguised.assert_status(StatusCode::BAD_REQUEST);

    assert_eq!(ctx.gemini.call_count(), 0);
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_missing_file_field_is_bad_request(ctx: &mut ApiContext) {
    let response = ctx
        .server
        .post("/analyze_food")
        .multipart(MultipartForm::new().add_text("comment", "no file here"))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_error(&response.json(), 400);
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_non_multipart_body_is_bad_request(ctx: &mut ApiContext) {
    let response = ctx.server.post("/analyze_food").text("not a form").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_error(&response.json(), 400);
    assert_eq!(ctx.gemini.call_count(), 0);
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_upstream_failure_maps_to_bad_gateway(ctx: &mut ApiContext) {
    ctx.gemini.fail_with(StatusCode::INTERNAL_SERVER_ERROR);

    let response = ctx.upload_png().await;
    response.assert_status(StatusCode::BAD_GATEWAY);
    assert_error(&response.json(), 502);

    let history: Value = ctx.server.get("/history").await.json();
    assert_eq!(history, json!([]));
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_upstream_timeout_maps_to_gateway_timeout(ctx: &mut ApiContext) {
    ctx.gemini.reply_with(SALTENA_REPLY);
    ctx.gemini.delay_by(Duration::from_secs(3));

    let response = ctx.upload_png().await;
    response.assert_status(StatusCode::GATEWAY_TIMEOUT);
    assert_error(&response.json(), 504);
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_nutrition_with_and_without_ingredients(ctx: &mut ApiContext) {
    ctx.gemini.reply_with(
        r#"{"serving_size": "1 plato", "calories": "480 kcal", "proteins": 25, "carbs": 55, "fats": 18, "fiber": 5, "notes": "Alto en carbohidratos", "reasoning": "Porción típica."}"#,
    );

    let response = ctx
        .server
        .get("/nutrition/Pique%20macho")
        .add_query_param("ingredients", "carne, salchicha, papa")
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["dish_name"], "Pique macho");
    assert_eq!(body["nutrition"]["calories"], 480.0);
    assert_eq!(body["agent_reasoning"], "Porción típica.");

    let prompt = ctx.gemini.last_call()["contents"][0]["parts"][0]["text"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(prompt.contains("carne, salchicha, papa"));

    let inferred = ctx.server.get("/nutrition/Anticucho").await;
    inferred.assert_status_ok();
    let prompt = ctx.gemini.last_call()["contents"][0]["parts"][0]["text"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(prompt.contains("infer the typical ingredients"));
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_nutrition_for_blank_dish_name_is_bad_request(ctx: &mut ApiContext) {
    let response = ctx.server.get("/nutrition/%20%20").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(ctx.gemini.call_count(), 0);
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_compare_two_stored_dishes(ctx: &mut ApiContext) {
    let first = ctx.analyze(SALTENA_REPLY).await;
    let second = ctx
        .analyze(r#"{"dish_name": "Empanada", "ingredients": ["Carne", "cebolla"]}"#)
        .await;

    ctx.gemini.reply_with("I would rather not compare these.");

    let response = ctx
        .server
        .get("/compare")
        .add_query_param("analysis_id1", first)
        .add_query_param("analysis_id2", second)
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["dish1"]["dish_name"], "Salteña");
    assert_eq!(body["dish2"]["dish_name"], "Empanada");
    assert_eq!(body["comparison"]["common_ingredients"], json!(["carne"]));
    assert_eq!(body["comparison"]["unique_to_dish2"], json!(["cebolla"]));
    assert!(body["agent_reasoning"].is_string());
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_compare_same_dish_skips_upstream(ctx: &mut ApiContext) {
    let id = ctx.analyze(SALTENA_REPLY).await;
    let calls_before = ctx.gemini.call_count();

    let response = ctx
        .server
        .get("/compare")
        .add_query_param("analysis_id1", id)
        .add_query_param("analysis_id2", id)
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["comparison"]["similarity_score"], 100.0);
    assert_eq!(ctx.gemini.call_count(), calls_before);
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_compare_missing_dish_is_not_found(ctx: &mut ApiContext) {
    let id = ctx.analyze(SALTENA_REPLY).await;

    let response = ctx
        .server
        .get("/compare")
        .add_query_param("analysis_id1", id)
        .add_query_param("analysis_id2", 9999)
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    let body: Value = response.json();
    assert_error(&body, 404);
    assert!(body["message"].as_str().unwrap().contains("9999"));
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_compare_with_zero_id_is_not_found(ctx: &mut ApiContext) {
    let id = ctx.analyze(SALTENA_REPLY).await;
    let calls_before = ctx.gemini.call_count();

    let response = ctx
        .server
        .get("/compare")
        .add_query_param("analysis_id1", 0)
        .add_query_param("analysis_id2", id)
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_error(&response.json(), 404);
    assert_eq!(ctx.gemini.call_count(), calls_before);
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_compare_requires_both_ids(ctx: &mut ApiContext) {
    let response = ctx
        .server
        .get("/compare")
        .add_query_param("analysis_id1", 1)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_error(&response.json(), 400);
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_history_order_and_limit(ctx: &mut ApiContext) {
    for name in ["Salteña", "Silpancho", "Majadito"] {
        ctx.analyze(&format!(r#"{{"dish_name": "{name}"}}"#)).await;
    }

    let response = ctx.server.get("/history").add_query_param("limit", 2).await;
    response.assert_status_ok();

    let body: Value = response.json();
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|record| record["dish_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Majadito", "Silpancho"]);

    let response = ctx.server.get("/history").add_query_param("limit", 500).await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body.as_array().unwrap().len(), 3);

    for limit in ["0", "-1", "abc"] {
        let response = ctx.server.get("/history").add_query_param("limit", limit).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_error(&response.json(), 400);
    }
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_get_analysis_is_idempotent_and_validates_id(ctx: &mut ApiContext) {
    let id = ctx.analyze(SALTENA_REPLY).await;

    let first: Value = ctx.server.get(&format!("/analysis/{id}")).await.json();
    let second: Value = ctx.server.get(&format!("/analysis/{id}")).await.json();
    assert_eq!(first, second);

    let missing = ctx.server.get("/analysis/424242").await;
    missing.assert_status(StatusCode::NOT_FOUND);
    assert_error(&missing.json(), 404);

    let malformed = ctx.server.get("/analysis/not-a-number").await;
    malformed.assert_status(StatusCode::BAD_REQUEST);
    assert_error(&malformed.json(), 400);
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_unknown_route_uses_error_schema(ctx: &mut ApiContext) {
    let response = ctx.server.get("/does-not-exist").await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_error(&response.json(), 404);
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_openapi_document_lists_routes(ctx: &mut ApiContext) {
    let response = ctx.server.get("/api-docs/openapi.json").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert!(body["paths"]["/analyze_food"].is_object());
    assert!(body["paths"]["/compare"].is_object());
    assert!(body["paths"]["/health"].is_object());
}
