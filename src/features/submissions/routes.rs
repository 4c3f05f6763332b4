use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::submissions::handlers;
use crate::features::submissions::services::SubmissionService;

/// Create routes for the submissions feature (all protected)
pub fn routes(service: Arc<SubmissionService>) -> Router {
    Router::new()
        .route(
            "/api/submissions",
            get(handlers::list_submissions).post(handlers::create_submission),
        )
        .route("/api/submissions/{id}", get(handlers::get_submission))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::challenges::models::ChallengeCategory;
    use crate::shared::test_helpers::{
        create_test_user, sample_challenge, test_grading_service, with_authenticated_user,
        FakeCompletionClient, InMemorySubmissionStore,
    };
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    struct Harness {
        server: TestServer,
        client: Arc<FakeCompletionClient>,
    }

    fn harness(categories: &[ChallengeCategory], reply: &str) -> (Harness, Vec<uuid::Uuid>) {
        let challenges: Vec<_> = categories.iter().map(|c| sample_challenge(*c)).collect();
        let ids = challenges.iter().map(|c| c.id).collect();

        let store = Arc::new(InMemorySubmissionStore::with_challenges(challenges));
        let client = Arc::new(FakeCompletionClient::replying(reply));
        let service = Arc::new(SubmissionService::new(
            store,
            test_grading_service(client.clone()),
        ));

        let app = with_authenticated_user(routes(service), create_test_user());
        let server = TestServer::new(app).unwrap();

        (Harness { server, client }, ids)
    }

    #[tokio::test]
    async fn test_create_submission_returns_201_with_grade() {
        let reply = "Sure! {\"score\": 82, \"feedback\": \"Good job\", \"breakdown\": {\"accuracy\":35,\"completeness\":25,\"clarity\":15,\"depth\":7}}";
        let (h, ids) = harness(&[ChallengeCategory::Comprehension], reply);

        let response = h
            .server
            .post("/api/submissions")
            .json(&json!({
                "challenge_id": ids[0],
                "explanation": "It walks the list and memoizes results."
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["score"], json!(82.0));
        assert_eq!(body["data"]["max_score"], json!(100.0));
        assert_eq!(body["data"]["is_correct"], true);
        assert_eq!(body["data"]["feedback"], "Good job");
        assert_eq!(body["data"]["grading_details"]["depth"], 7);
        assert_eq!(h.client.call_count(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_submission_returns_409() {
        let (h, ids) = harness(&[ChallengeCategory::Debugging], "unused");
        let payload = json!({"challenge_id": ids[0], "code": "print(1)"});

        let first = h.server.post("/api/submissions").json(&payload).await;
        first.assert_status(StatusCode::CREATED);
        let body: Value = first.json();
        assert_eq!(body["data"]["score"], json!(75.0));

        let second = h.server.post("/api/submissions").json(&payload).await;
        second.assert_status(StatusCode::CONFLICT);
        let body: Value = second.json();
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_unknown_challenge_returns_404() {
        let (h, _) = harness(&[], "unused");

        let response = h
            .server
            .post("/api/submissions")
            .json(&json!({"challenge_id": uuid::Uuid::now_v7(), "explanation": "x"}))
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_missing_explanation_returns_400() {
        let (h, ids) = harness(&[ChallengeCategory::Comprehension], "unused");

        let response = h
            .server
            .post("/api/submissions")
            .json(&json!({"challenge_id": ids[0], "explanation": ""}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["message"], "explanation required");
        assert_eq!(h.client.call_count(), 0);
    }

    #[tokio::test]
    async fn test_malformed_body_returns_400_envelope() {
        let (h, _) = harness(&[], "unused");

        let response = h
            .server
            .post("/api/submissions")
            .json(&json!({"challenge_id": "not-a-uuid"}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_list_and_get_own_submissions() {
        let (h, ids) = harness(&[ChallengeCategory::Design, ChallengeCategory::Design], "unused");

        for id in &ids {
            h.server
                .post("/api/submissions")
                .json(&json!({"challenge_id": id}))
                .await
                .assert_status(StatusCode::CREATED);
        }

        let list = h.server.get("/api/submissions").await;
        list.assert_status_ok();
        let body: Value = list.json();
        assert_eq!(body["meta"]["total"], 2);
        let first_id = body["data"][0]["id"].as_str().unwrap().to_string();

        let one = h.server.get(&format!("/api/submissions/{}", first_id)).await;
        one.assert_status_ok();

        let missing = h
            .server
            .get(&format!("/api/submissions/{}", uuid::Uuid::now_v7()))
            .await;
        missing.assert_status(StatusCode::NOT_FOUND);
    }
}
