#[cfg(test)]
mod chat_handler_tests {
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Request, StatusCode},
    };
    use async_trait::async_trait;
    use serde_json::{Value, json};
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt;

    use crate::api::{app_state::AppState, create_router};
    use crate::config::config::AppConfig;
    use crate::error::{AppError, CompositionError, ResolutionError, Result};
    use crate::models::chat::ChatResponse;
    use crate::models::intention::Intention;
    use crate::observability::AppMetrics;
    use crate::services::chat::{ChatService, MockChatService};

    fn router_for(
        service: Box<dyn ChatService>,
        request_timeout: Duration,
    ) -> (Router, Arc<AppMetrics>) {
        let metrics = Arc::new(AppMetrics::default());
        let state = AppState::new(service, metrics.clone(), request_timeout);
        (create_router(state), metrics)
    }

    fn app_with(service: MockChatService) -> (Router, Arc<AppMetrics>) {
        let timeout = Duration::from_secs(AppConfig::development().server.request_timeout);
        router_for(Box::new(service), timeout)
    }

    /// Chat service that answers only after a fixed delay.
    struct SlowChatService {
        delay: Duration,
    }

    #[async_trait]
    impl ChatService for SlowChatService {
        async fn search(&self, _instruction: &str) -> Result<ChatResponse> {
            tokio::time::sleep(self.delay).await;
            Ok(ChatResponse {
                intention: Intention::FindAllLikes,
                data: "too late".into(),
            })
        }
    }

    fn post_search(body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/protohush/search")
            .header("Content-Type", "application/json")
            .body(body.into())
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_search_returns_200_with_reply() {
        let mut service = MockChatService::new();
        service
            .expect_search()
            .withf(|instruction| instruction == "give me my last 3 likes")
            .times(1)
            .returning(|_| {
                Ok(ChatResponse {
                    intention: Intention::FindLikesSortedByDate,
                    data: "Here are your last 3 likes.".into(),
                })
            });
        let (app, metrics) = app_with(service);

        let response = app
            .oneshot(post_search(
                json!({"message": "give me my last 3 likes"}).to_string(),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["intention"], "FindLikesSortedByDate");
        assert_eq!(body["data"], "Here are your last 3 likes.");
        assert!(metrics.gather().contains("chat_requests_total 1"));
    }

    #[tokio::test]
    async fn test_unparseable_body_returns_400() {
        let (app, _) = app_with(MockChatService::new());

        let response = app.oneshot(post_search("not json")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "Bad request");
    }

    #[tokio::test]
    async fn test_wrong_message_type_returns_400() {
        let (app, _) = app_with(MockChatService::new());

        let response = app
            .oneshot(post_search(json!({"message": 42}).to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_resolution_failure_returns_500_without_detail() {
        let mut service = MockChatService::new();
        service.expect_search().returning(|_| {
            Err(AppError::Resolution(ResolutionError::MalformedModelOutput(
                "expected value at line 1 column 1".into(),
            )))
        });
        let (app, metrics) = app_with(service);

        let response = app
            .oneshot(post_search(json!({"message": "likes"}).to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body["error"], "Internal Server Error");
        assert!(!body.to_string().contains("line 1 column 1"));
        assert!(metrics.gather().contains("errors_total 1"));
    }

    #[tokio::test]
    async fn test_composition_failure_returns_500() {
        let mut service = MockChatService::new();
        service
            .expect_search()
            .returning(|_| Err(AppError::Composition(CompositionError::EmptyReply)));
        let (app, _) = app_with(service);

        let response = app
            .oneshot(post_search(json!({"message": "followers"}).to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(response).await["error"], "Internal Server Error");
    }

    #[tokio::test]
    async fn test_unknown_intention_is_counted() {
        let mut service = MockChatService::new();
        service.expect_search().returning(|_| {
            Ok(ChatResponse {
                intention: Intention::Unrecognized(String::new()),
                data: "I did not understand that.".into(),
            })
        });
        let (app, metrics) = app_with(service);

        let response = app
            .oneshot(post_search(json!({"message": ""}).to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["intention"], "");
        assert!(metrics.gather().contains("unknown_intentions_total 1"));
    }

    #[tokio::test]
    async fn test_known_intention_is_not_counted_as_unknown() {
        let mut service = MockChatService::new();
        service.expect_search().returning(|_| {
            Ok(ChatResponse {
                intention: Intention::FindAllFollowers,
                data: "You have two followers.".into(),
            })
        });
        let (app, metrics) = app_with(service);

        app.oneshot(post_search(json!({"message": "followers"}).to_string()))
            .await
            .unwrap();

        assert!(metrics.gather().contains("unknown_intentions_total 0"));
    }

    #[tokio::test]
    async fn test_slow_search_returns_500_and_counts_error() {
        let service = SlowChatService {
            delay: Duration::from_secs(2),
        };
        let (app, metrics) = router_for(Box::new(service), Duration::from_millis(50));

        let response = app
            .oneshot(post_search(json!({"message": "likes"}).to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body["error"], "Internal Server Error");
        assert!(metrics.gather().contains("errors_total 1"));
    }

    #[tokio::test]
    async fn test_get_is_not_allowed() {
        let (app, _) = app_with(MockChatService::new());

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/protohush/search")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
