//! HTTP tests for surveys, questions and responses

#[macro_use]
mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};
use uuid::Uuid;

use common::{TestContext, EMAIL};

#[actix_web::test]
async fn test_create_survey_requires_session() {
    let ctx = TestContext::new();
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/survey/create-survey")
        .set_json(json!({ "title": "Customer Satisfaction" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Unauthenticated! Please login.");

    let req = test::TestRequest::post()
        .uri("/api/v1/survey/create-survey")
        .insert_header(("authorization", "Bearer not.a.token"))
        .set_json(json!({ "title": "Customer Satisfaction" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_create_survey_without_title() {
    let ctx = TestContext::new();
    let app = init_app!(ctx);
    let token = signed_up_token!(app, ctx, EMAIL);

    let req = test::TestRequest::post()
        .uri("/api/v1/survey/create-survey")
        .insert_header(("authorization", token))
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Please provide the title of the survey");
}

#[actix_web::test]
async fn test_survey_lifecycle() {
    let ctx = TestContext::new();
    let app = init_app!(ctx);
    let token = signed_up_token!(app, ctx, EMAIL);

    // Create twice with the same title to exercise slug suffixes
    let mut urls = Vec::new();
    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri("/api/v1/survey/create-survey")
            .insert_header(("authorization", format!("Bearer {}", token)))
            .set_json(json!({ "title": "Customer Satisfaction" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Survey url successfully created");
        urls.push(body["body"].as_str().unwrap().to_string());
    }
    assert_eq!(
        urls,
        vec![
            "http://surveys.test/api/v1/survey/get-survey/customer-satisfaction".to_string(),
            "http://surveys.test/api/v1/survey/get-survey/customer-satisfaction-2".to_string(),
        ]
    );

    let req = test::TestRequest::get()
        .uri("/api/v1/survey/get-survey/customer-satisfaction")
        .to_request();
    let survey: Value = test::call_and_read_body_json(&app, req).await;
    let survey_id = survey["body"]["id"].as_str().unwrap().to_string();

    // Token supplied in the body instead of the header
    let req = test::TestRequest::post()
        .uri("/api/v1/question/create-question")
        .set_json(json!({
            "question": "How likely are you to recommend us?",
            "survey": survey_id,
            "authorization": token
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Successfully created question");
    let question_id = body["body"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri("/api/v1/survey/get-survey/customer-satisfaction")
        .to_request();
    let survey: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(survey["message"], "Survey successfully retrieved");
    assert_eq!(survey["body"]["questions"][0]["question"], "How likely are you to recommend us?");

    let req = test::TestRequest::post()
        .uri("/api/v1/survey/response")
        .set_json(json!([
            { "question": question_id, "answer": "Very likely" },
            { "question": question_id, "answer": "Unlikely" }
        ]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Response successful");
    assert_eq!(body["body"].as_array().unwrap().len(), 2);

    let req = test::TestRequest::get()
        .uri("/api/v1/survey/get-responses?slug=customer-satisfaction")
        .insert_header(("authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["body"]["name"], "Acme Research Ltd");
    assert_eq!(body["body"]["title"], "Customer Satisfaction");
    assert_eq!(
        body["body"]["responses"],
        json!([{
            "question": "How likely are you to recommend us?",
            "answers": ["Very likely", "Unlikely"]
        }])
    );
}

#[actix_web::test]
async fn test_question_for_someone_elses_survey() {
    let ctx = TestContext::new();
    let app = init_app!(ctx);
    let owner = signed_up_token!(app, ctx, EMAIL);
    let other = signed_up_token!(app, ctx, "other@acme.net");

    let req = test::TestRequest::post()
        .uri("/api/v1/survey/create-survey")
        .insert_header(("authorization", owner))
        .set_json(json!({ "title": "Team Pulse" }))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/survey/get-survey/team-pulse")
        .to_request();
    let survey: Value = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/question/create-question")
        .insert_header(("authorization", other))
        .set_json(json!({ "question": "Anything else?", "survey": survey["body"]["id"] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Survey not found");
}

#[actix_web::test]
async fn test_get_unknown_survey() {
    let ctx = TestContext::new();
    let app = init_app!(ctx);

    let req = test::TestRequest::get()
        .uri("/api/v1/survey/get-survey/does-not-exist")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Survey not found");
}

#[actix_web::test]
async fn test_response_validation() {
    let ctx = TestContext::new();
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/survey/response")
        .set_json(json!([{ "question": Uuid::new_v4() }]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "\"[0].answer\" is required");

    let req = test::TestRequest::post()
        .uri("/api/v1/survey/response")
        .set_json(json!([]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_get_responses_without_surveys() {
    let ctx = TestContext::new();
    let app = init_app!(ctx);
    let token = signed_up_token!(app, ctx, EMAIL);

    let req = test::TestRequest::get()
        .uri("/api/v1/survey/get-responses")
        .insert_header(("authorization", token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Survey could not be found");
}

#[actix_web::test]
async fn test_health_and_malformed_json() {
    let ctx = TestContext::new();
    let app = init_app!(ctx);

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "healthy");

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "error");
}
