// Web Integration Tests
//
// Drive the full router in-process: pages, JSON API, htmx fragments and 404s.
// Run with: cargo test --test web_integration_tests

#[cfg(feature = "web")]
mod web_tests {
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        response::Response,
    };
    use science_calculators::{create_router, AppState, Catalog, SiteConfig};
    use serde_json::Value;
    use tower::ServiceExt; // for oneshot

    fn create_test_app() -> axum::Router {
        let state = AppState::new(SiteConfig::default()).expect("builtin registry");
        create_router(state)
    }

    async fn get(uri: &str) -> Response {
        create_test_app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn post_json(uri: &str, body: Value) -> Response {
        create_test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn post_form(uri: &str, body: &str, htmx: bool) -> Response {
        let mut request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if htmx {
            request = request.header("HX-Request", "true");
        }
        create_test_app()
            .oneshot(request.body(Body::from(body.to_string())).unwrap())
            .await
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        String::from_utf8(body.to_vec()).expect("Body is not UTF-8")
    }

    async fn json_response(response: Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        serde_json::from_slice(&body).expect("Failed to parse JSON")
    }

    // =========================================================================
    // Section 1: Health and pages
    // =========================================================================

    #[tokio::test]
    async fn test_health_check() {
        let response = get("/health").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_response(response).await;
        assert_eq!(body["status"], "healthy");
        assert!(body["timestamp"].is_string());
        assert_eq!(
            body["calculators"].as_u64(),
            Some(Catalog::builtin().calculator_count() as u64)
        );
    }

    #[tokio::test]
    async fn test_home_lists_every_category() {
        let response = get("/").await;
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        for category in Catalog::builtin().list_categories() {
            assert!(html.contains(&category.path()), "home is missing {}", category.id);
        }
    }

    #[tokio::test]
    async fn test_home_category_filter() {
        let html = body_text(get("/?category=ecology").await).await;
        assert!(html.contains("/calculator/shannon-diversity"));
        assert!(!html.contains("/calculator/bmi"));
    }

    #[tokio::test]
    async fn test_every_catalog_calculator_has_a_page() {
        for id in Catalog::builtin().all_calculator_ids() {
            let response = get(&format!("/calculator/{}", id)).await;
            assert_eq!(response.status(), StatusCode::OK, "/calculator/{} is a dead link", id);
            let html = body_text(response).await;
            assert!(!html.contains("Page Not Found"), "/calculator/{} rendered not found", id);
        }
    }

    #[tokio::test]
    async fn test_category_page_shows_count() {
        let catalog = Catalog::builtin();
        let biology = catalog.find_category("biology").unwrap();
        let expected: usize = biology
            .subcategories()
            .iter()
            .map(|s| s.calculators.len())
            .sum();

        let response = get("/category/biology").await;
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains(&format!("{} calculators available", expected)));
        assert!(html.contains("/category/biology/genetics"));
    }

    #[tokio::test]
    async fn test_biology_subcategory_page() {
        let response = get("/category/biology/molecular-biology").await;
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("/calculator/dna-transcription"));
        assert!(html.contains("/calculator/primer-tm"));
    }

    #[tokio::test]
    async fn test_empty_category_renders() {
        let response = get("/category/finance").await;
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("0 calculators available"));
        assert!(html.contains("No calculators in this category yet."));
    }

    // =========================================================================
    // Section 2: Not found
    // =========================================================================

    #[tokio::test]
    async fn test_unknown_routes_are_404() {
        for uri in [
            "/no/such/page",
            "/category/astronomy",
            "/category/biology/astrobiology",
            "/category/chemistry/solutions",
            "/calculator/warp-drive",
        ] {
            let response = get(uri).await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{}", uri);
            assert!(body_text(response).await.contains("Page Not Found"), "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_unknown_api_calculator_is_json_404() {
        let response = post_json("/api/calculators/warp-drive", serde_json::json!({})).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = json_response(response).await;
        assert!(body["error"].as_str().unwrap().contains("warp-drive"));
    }

    // =========================================================================
    // Section 3: Search
    // =========================================================================

    #[tokio::test]
    async fn test_api_search_empty_query_is_empty() {
        for uri in ["/api/search", "/api/search?q="] {
            let body = json_response(get(uri).await).await;
            assert_eq!(body["count"], 0, "{}", uri);
            assert_eq!(body["results"].as_array().unwrap().len(), 0);
        }
    }

    #[tokio::test]
    async fn test_api_search_is_case_insensitive() {
        let body = json_response(get("/api/search?q=HARDY").await).await;
        let paths: Vec<&str> = body["results"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|r| r["path"].as_str())
            .collect();
        assert!(paths.contains(&"/calculator/hardy-weinberg"));
    }

    #[tokio::test]
    async fn test_api_search_matches_parent_category() {
        let body = json_response(get("/api/search?q=ecology").await).await;
        let results = body["results"].as_array().unwrap();
        assert_eq!(results[0]["kind"], "category");
        assert!(results
            .iter()
            .any(|r| r["path"] == "/calculator/mark-recapture"));
    }

    #[tokio::test]
    async fn test_search_page_and_fragment() {
        let html = body_text(get("/search?q=ph").await).await;
        assert!(html.contains("<html"));
        assert!(html.contains("/calculator/ph"));

        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .uri("/search?q=ph")
                    .header("HX-Request", "true")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let fragment = body_text(response).await;
        assert!(!fragment.contains("<html"));
        assert!(fragment.contains("/calculator/buffer-ph"));
    }

    #[tokio::test]
    async fn test_catalog_endpoint() {
        let body = json_response(get("/api/catalog").await).await;
        let categories = body["categories"].as_array().unwrap();
        assert_eq!(categories.len(), 13);
        assert_eq!(categories[0]["id"], "biology");
        assert_eq!(
            body["calculator_count"].as_u64(),
            Some(Catalog::builtin().calculator_count() as u64)
        );
    }

    // =========================================================================
    // Section 4: Calculator evaluation
    // =========================================================================

    #[tokio::test]
    async fn test_hardy_weinberg_at_equilibrium() {
        let response = post_json(
            "/api/calculators/hardy-weinberg",
            serde_json::json!({"dominant": 0.49, "heterozygous": 0.42, "recessive": 0.09}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_response(response).await;
        assert_eq!(body["status"], "computed");
        let fields = body["result"]["fields"].as_array().unwrap();
        let value = |label: &str| {
            fields
                .iter()
                .find(|f| f["label"] == label)
                .and_then(|f| f["value"].as_str())
                .map(str::to_string)
        };
        assert_eq!(value("p (dominant allele)").as_deref(), Some("0.7000"));
        assert_eq!(value("q (recessive allele)").as_deref(), Some("0.3000"));
        assert_eq!(value("Expected Aa (2pq)").as_deref(), Some("0.4200"));
        assert_eq!(value("Chi-square").as_deref(), Some("0.0000"));
        assert_eq!(body["share"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_blood_pressure_rejects_inverted_reading() {
        let body = json_response(
            post_json(
                "/api/calculators/blood-pressure",
                serde_json::json!({"systolic": 80, "diastolic": 90}),
            )
            .await,
        )
        .await;
        assert_eq!(body["status"], "rejected");
        assert_eq!(
            body["message"],
            "Systolic pressure must be greater than diastolic pressure"
        );
        assert!(body.get("share").is_none());
    }

    #[tokio::test]
    async fn test_dna_transcription() {
        let body = json_response(
            post_json(
                "/api/calculators/dna-transcription",
                serde_json::json!({"sequence": "ATGC"}),
            )
            .await,
        )
        .await;
        let fields = body["result"]["fields"].as_array().unwrap();
        let complement = fields.iter().find(|f| f["label"] == "Complementary strand").unwrap();
        let mrna = fields.iter().find(|f| f["label"] == "mRNA").unwrap();
        assert_eq!(complement["value"], "TACG");
        assert_eq!(mrna["value"], "AUGC");
    }

    #[tokio::test]
    async fn test_missing_field_names_the_field() {
        let body = json_response(
            post_json("/api/calculators/bmi", serde_json::json!({"weight": 70})).await,
        )
        .await;
        assert_eq!(body["status"], "rejected");
        assert_eq!(body["field"], "height");
    }

    #[tokio::test]
    async fn test_nested_json_value_is_bad_request() {
        let response = post_json(
            "/api/calculators/bmi",
            serde_json::json!({"weight": [70], "height": 175}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_form_post_renders_full_page() {
        let response = post_form("/calculator/bmi", "weight=70&height=175", false).await;
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("<html"));
        assert!(html.contains("22.9"));
        assert!(html.contains("value=\"70\""));
    }

    #[tokio::test]
    async fn test_htmx_post_returns_result_fragment() {
        let response = post_form("/calculator/blood-pressure", "systolic=80&diastolic=90", true).await;
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(!html.contains("<html"));
        assert!(html.contains("Systolic pressure must be greater than diastolic pressure"));
    }

    #[tokio::test]
    async fn test_share_links_point_at_calculator() {
        let response = post_form("/calculator/bmi", "weight=70&height=175", true).await;
        let html = body_text(response).await;
        assert!(html.contains("https://t.me/share/url?url="));
        assert!(html.contains("localhost%3A3000%2Fcalculator%2Fbmi"));
    }

    #[tokio::test]
    async fn test_static_assets_served() {
        let response = get("/static/share.js").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("navigator.share"));
    }
}
