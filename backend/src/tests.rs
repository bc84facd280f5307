#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use rocket::http::{Header, Method, Status};
    use rocket::local::blocking::Client;
    use serde_json::{json, Value};
    use crate::{
        build_rocket,
        config::{AllowedOrigins, AppConfig},
        routes::AppState,
        store::SessionStore,
    };

    fn client_with(config: AppConfig) -> Client {
        Client::tracked(build_rocket(config, AppState::new())).expect("valid rocket instance")
    }

    fn client() -> Client {
        client_with(AppConfig::default())
    }

    fn post(client: &Client, uri: &str) -> (Status, Value) {
        let resp = client.post(uri).dispatch();
        (resp.status(), resp.into_json().unwrap_or(Value::Null))
    }

    fn get(client: &Client, uri: &str) -> (Status, Value) {
        let resp = client.get(uri).dispatch();
        (resp.status(), resp.into_json().unwrap_or(Value::Null))
    }

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let secrets: HashMap<&str, &str> = pairs.iter().cloned().collect();
        AppConfig::from_lookup(|key| secrets.get(key).map(|v| v.to_string()))
    }

    #[test]
    fn test_initial_status() {
        let client = client();
        assert_eq!(get(&client, "/status"), (Status::Ok, json!({ "status": "VOTING_NOT_STARTED" })));
        assert_eq!(get(&client, "/getresults"), (Status::Ok, json!([])));
    }

    #[test]
    fn test_advance_and_status() {
        let client = client();
        let (status, body) = post(&client, "/setcurrentperson?description=Ivan%20Petrov");
        assert_eq!(status, Status::Ok);
        assert_eq!(body, json!({
            "success": true,
            "message": "Voting opened for participant #1",
            "personnum": 1,
            "description": "Ivan Petrov",
        }));

        assert_eq!(get(&client, "/status").1, json!({
            "status": "VOTING",
            "personnum": 1,
            "description": "Ivan Petrov",
        }));
    }

    #[test]
    fn test_vote_accepted() {
        let client = client();
        post(&client, "/setcurrentperson?description=Alice");
        assert_eq!(
            post(&client, "/vote?personnum=1&rating=5"),
            (Status::Ok, json!({ "success": true, "message": "Vote accepted" }))
        );
        assert_eq!(post(&client, "/vote?personnum=1&rating=1").0, Status::Ok);
    }

    #[test]
    fn test_engine_rejections_are_bad_requests() {
        let client = client();
        assert_eq!(
            post(&client, "/vote?personnum=1&rating=3"),
            (Status::BadRequest, json!({ "detail": "Voting is not active" }))
        );

        post(&client, "/setcurrentperson?description=Alice");
        assert_eq!(
            post(&client, "/vote?personnum=2&rating=5"),
            (Status::BadRequest, json!({ "detail": "Cannot vote for future participants. Current number: 1" }))
        );

        post(&client, "/setcurrentperson?description=VOTING_FINISHED");
        assert_eq!(post(&client, "/vote?personnum=1&rating=3").0, Status::BadRequest);
    }

    #[test]
    fn test_boundary_validation_is_unprocessable() {
        let client = client();
        post(&client, "/setcurrentperson?description=Alice");

        for uri in [
            "/vote?personnum=1&rating=0",
            "/vote?personnum=1&rating=6",
            "/vote?personnum=0&rating=3",
            "/vote?personnum=-1&rating=3",
            "/vote?personnum=abc&rating=3",
            "/vote?personnum=1&rating=4.5",
            "/vote?personnum=1",
            "/vote",
        ] {
            let (status, body) = post(&client, uri);
            assert_eq!(status, Status::UnprocessableEntity, "{}", uri);
            assert!(body["detail"].is_string(), "{}", uri);
        }

        assert_eq!(post(&client, "/setcurrentperson?description=").0, Status::UnprocessableEntity);
        assert_eq!(post(&client, "/setcurrentperson").0, Status::UnprocessableEntity);
        assert_eq!(post(&client, "/admin/next?description=").0, Status::UnprocessableEntity);

        // nothing reached the session
        assert_eq!(get(&client, "/getresults").1, json!([]));
        assert_eq!(get(&client, "/status").1["personnum"], 1);
    }

    #[test]
    fn test_full_round() {
        let client = client();
        post(&client, "/setcurrentperson?description=A");
        for _ in 0..3 { post(&client, "/vote?personnum=1&rating=5"); }
        post(&client, "/setcurrentperson?description=B");
        for _ in 0..2 { post(&client, "/vote?personnum=2&rating=3"); }
        post(&client, "/setcurrentperson?description=C");

        assert_eq!(
            post(&client, "/setcurrentperson?description=VOTING_FINISHED"),
            (Status::Ok, json!({ "success": true, "message": "Voting finished", "status": "VOTING_FINISHED" }))
        );
        assert_eq!(get(&client, "/status").1, json!({ "status": "VOTING_FINISHED" }));

        let expected = json!([
            { "personnum": 1, "description": "A", "rating": 5.0 },
            { "personnum": 2, "description": "B", "rating": 3.0 },
        ]);
        assert_eq!(get(&client, "/getresults"), (Status::Ok, expected.clone()));
        assert_eq!(get(&client, "/getresults").1, expected);

        assert_eq!(
            post(&client, "/setcurrentperson?description=VOTING_RESTART"),
            (Status::Ok, json!({
                "success": true,
                "message": "Voting reset to initial state",
                "status": "VOTING_NOT_STARTED",
            }))
        );
        assert_eq!(get(&client, "/getresults").1, json!([]));
        assert_eq!(get(&client, "/status").1, json!({ "status": "VOTING_NOT_STARTED" }));
    }

    #[test]
    fn test_average_is_rounded() {
        let client = client();
        post(&client, "/setcurrentperson?description=Ivan");
        for rating in [5, 4, 5, 5, 4] {
            post(&client, &format!("/vote?personnum=1&rating={}", rating));
        }
        assert_eq!(get(&client, "/getresults").1[0]["rating"], json!(4.6));
    }

    #[test]
    fn test_structured_admin_channel() {
        let client = client();
        assert_eq!(
            post(&client, "/admin/next?description=VOTING_FINISHED"),
            (Status::Ok, json!({
                "success": true,
                "message": "Voting opened for participant #1",
                "personnum": 1,
                "description": "VOTING_FINISHED",
            }))
        );
        assert_eq!(get(&client, "/status").1["status"], "VOTING");

        post(&client, "/vote?personnum=1&rating=2");
        assert_eq!(post(&client, "/admin/finish").1["status"], "VOTING_FINISHED");
        assert_eq!(get(&client, "/getresults").1[0]["description"], "VOTING_FINISHED");

        assert_eq!(post(&client, "/admin/restart").1["status"], "VOTING_NOT_STARTED");
        assert_eq!(get(&client, "/getresults").1, json!([]));
    }

    #[test]
    fn test_cors_headers() {
        let client = client();
        let resp = client.get("/status")
            .header(Header::new("Origin", "http://localhost:3000"))
            .dispatch();
        assert_eq!(resp.headers().get_one("Access-Control-Allow-Origin"), Some("http://localhost:3000"));
        assert_eq!(resp.headers().get_one("Access-Control-Allow-Credentials"), Some("true"));

        let preflight = client.req(Method::Options, "/vote")
            .header(Header::new("Origin", "https://vote.example.org"))
            .dispatch();
        assert_eq!(preflight.status(), Status::Ok);
        assert_eq!(preflight.headers().get_one("Access-Control-Allow-Origin"), Some("https://vote.example.org"));

        let resp = client.get("/status").dispatch();
        assert!(resp.headers().get_one("Access-Control-Allow-Origin").is_none());
    }

    #[test]
    fn test_cors_origin_list() {
        let client = client_with(config_from(&[("CORS_ALLOWED_ORIGINS", "https://a.example, https://b.example/")]));
        let allowed = client.get("/status").header(Header::new("Origin", "https://b.example")).dispatch();
        assert_eq!(allowed.headers().get_one("Access-Control-Allow-Origin"), Some("https://b.example"));

        let denied = client.get("/status").header(Header::new("Origin", "https://evil.example")).dispatch();
        assert!(denied.headers().get_one("Access-Control-Allow-Origin").is_none());
    }

    #[test]
    fn test_base_path() {
        let client = client_with(config_from(&[("API_BASE_PATH", "/api/")]));
        assert_eq!(get(&client, "/api/status").0, Status::Ok);
        assert_eq!(
            get(&client, "/status"),
            (Status::NotFound, json!({ "detail": "The requested resource was not found.", "status": 404 }))
        );
    }

    #[test]
    fn test_unknown_route_uses_json_catcher() {
        let client = client();
        let expected = json!({ "detail": "The requested resource was not found.", "status": 404 });
        assert_eq!(get(&client, "/results"), (Status::NotFound, expected.clone()));
        assert_eq!(post(&client, "/status"), (Status::NotFound, expected));
    }

    #[test]
    fn test_config_parsing() {
        assert_eq!(config_from(&[]), AppConfig::default());

        let config = config_from(&[("API_BASE_PATH", "/api"), ("CORS_ALLOWED_ORIGINS", "*")]);
        assert_eq!(config.base_path, "/api");
        assert_eq!(config.allowed_origins, AllowedOrigins::Any);

        assert_eq!(config_from(&[("API_BASE_PATH", "api")]).base_path, "/");
        assert_eq!(config_from(&[("API_BASE_PATH", "/api?x=1")]).base_path, "/");
        assert_eq!(config_from(&[("API_BASE_PATH", "/")]).base_path, "/");

        let config = config_from(&[("CORS_ALLOWED_ORIGINS", "http://localhost:8080")]);
        assert_eq!(config.allowed_origins, AllowedOrigins::List(vec!["http://localhost:8080".into()]));
        assert!(!config.allowed_origins.allows("http://localhost:3000"));
    }

    #[test]
    fn test_store_serializes_votes() {
        let store = SessionStore::new();
        store.with(|s| s.advance("A")).unwrap();

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    for _ in 0..25 {
                        store.with(|s| s.submit_vote(1, 4)).unwrap().unwrap();
                    }
                });
            }
        });

        let votes = store.with(|s| s.record(1).map(|r| r.votes().len())).unwrap();
        assert_eq!(votes, Some(200));
    }

    #[rocket::async_test]
    async fn test_concurrent_votes() {
        use rocket::local::asynchronous::Client;

        let client = Client::tracked(build_rocket(AppConfig::default(), AppState::new())).await.unwrap();
        client.post("/setcurrentperson?description=Alice").dispatch().await;

        let requests = (0..40).map(|i| {
            let rating = if i % 2 == 0 { 5 } else { 3 };
            client.post(format!("/vote?personnum=1&rating={}", rating)).dispatch()
        });
        let responses = futures::future::join_all(requests).await;
        assert!(responses.iter().all(|r| r.status() == Status::Ok));

        let results: Value = client.get("/getresults").dispatch().await.into_json().await.unwrap();
        assert_eq!(results, json!([{ "personnum": 1, "description": "Alice", "rating": 4.0 }]));
    }
}
