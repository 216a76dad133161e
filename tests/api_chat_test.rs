//! Integration tests for the chat API endpoint

mod test_utils;

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    use crate::test_utils::test_app;

    // The gibberish and validation tests never reach the calendar, so an
    // unroutable provider address proves no collaborator call is made.
    const UNROUTABLE_GCAL_URL: &str = "http://127.0.0.1:1";

    fn chat_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/chat")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    /// Tests the liveness route responds
    #[tokio::test]
    async fn it_responds_on_the_liveness_route() {
        let app = test_app(UNROUTABLE_GCAL_URL);

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    /// Tests chat endpoint returns 400 for a blank message
    #[tokio::test]
    async fn it_returns_400_for_blank_message() {
        let app = test_app(UNROUTABLE_GCAL_URL);

        let response = app
            .oneshot(chat_request(r#"{"message": "   "}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    /// Tests chat endpoint rejects a payload without a message field
    #[tokio::test]
    async fn it_rejects_payload_without_message() {
        let app = test_app(UNROUTABLE_GCAL_URL);

        let response = app
            .oneshot(chat_request(r#"{"text": "tomorrow at 3 pm"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    /// Tests a message with no temporal expression gets the rephrase
    /// prompt without any calendar call
    #[tokio::test]
    async fn it_prompts_rephrase_for_gibberish() {
        let app = test_app(UNROUTABLE_GCAL_URL);

        let response = app
            .oneshot(chat_request(r#"{"message": "asdfghjkl"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed["status"], "success");
        assert!(
            parsed["response"]
                .as_str()
                .unwrap()
                .contains("couldn't understand the time")
        );
    }
}
