//! HTTP handlers and route configuration.

mod auth;
mod health;
mod posts;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            .route("/register", web::post().to(auth::register))
            .route("/login", web::post().to(auth::login))
            // Post routes - bearer token required
            .service(
                web::scope("/v1/posts")
                    .route("", web::get().to(posts::list_posts))
                    .route("", web::post().to(posts::create_post))
                    .route("/search", web::get().to(posts::search_posts))
                    .route("/sort", web::get().to(posts::sort_posts))
                    .route("/{post_id}", web::put().to(posts::update_post))
                    .route("/{post_id}", web::delete().to(posts::delete_post))
                    .route("/{post_id}/comments", web::post().to(posts::add_comment)),
            ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use actix_web::{App, http::StatusCode, test};
    use serde_json::json;

    use quill_core::ports::{PasswordService, TokenService};
    use quill_infra::auth::JwtConfig;
    use quill_infra::{Argon2PasswordService, JwtTokenService, PostCollection, UserStore};

    use crate::middleware::error::{json_error_handler, query_error_handler};
    use crate::state::AppState;

    fn test_state() -> AppState {
        let path = std::env::temp_dir().join(format!("quill-api-{}.json", uuid::Uuid::new_v4()));
        AppState {
            posts: Arc::new(PostCollection::open(path)),
            users: Arc::new(UserStore::new()),
        }
    }

    fn test_token_service() -> Arc<dyn TokenService> {
        Arc::new(JwtTokenService::new(JwtConfig {
            secret: "test-secret-key".to_string(),
            expiration_hours: 1,
            issuer: "test-issuer".to_string(),
        }))
    }

    macro_rules! init_app {
        ($state:expr, $tokens:expr) => {{
            let password_service: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());
            test::init_service(
                App::new()
                    .app_data(web::Data::new($state.clone()))
                    .app_data(web::Data::new($tokens.clone()))
                    .app_data(web::Data::new(password_service))
                    .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                    .app_data(web::QueryConfig::default().error_handler(query_error_handler))
                    .configure(configure_routes),
            )
            .await
        }};
    }

    fn bearer(token: &str) -> (&'static str, String) {
        ("Authorization", format!("Bearer {token}"))
    }

    #[actix_rt::test]
    async fn test_register_login_and_authorized_access() {
        let state = test_state();
        let tokens = test_token_service();
        let app = init_app!(state, tokens);

        // Register
        let req = test::TestRequest::post()
            .uri("/api/register")
            .set_json(json!({"username": "john_doe", "password": "password123"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        // Registering the same username again fails
        let req = test::TestRequest::post()
            .uri("/api/register")
            .set_json(json!({"username": "john_doe", "password": "password123"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "User already exists");

        // Missing password
        let req = test::TestRequest::post()
            .uri("/api/register")
            .set_json(json!({"username": "jane_doe"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        // Wrong password
        let req = test::TestRequest::post()
            .uri("/api/login")
            .set_json(json!({"username": "john_doe", "password": "nope"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        // Correct password yields a token
        let req = test::TestRequest::post()
            .uri("/api/login")
            .set_json(json!({"username": "john_doe", "password": "password123"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        let token = body["access_token"].as_str().unwrap().to_string();

        // The token authorizes the posts listing
        let req = test::TestRequest::get()
            .uri("/api/v1/posts")
            .insert_header(bearer(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        // No token, no access
        let req = test::TestRequest::get().uri("/api/v1/posts").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["error"].is_string());
    }

    #[actix_rt::test]
    async fn test_post_crud_flow() {
        let state = test_state();
        let tokens = test_token_service();
        let token = tokens.generate_token("tester").unwrap();
        let app = init_app!(state, tokens);

        // Create
        let req = test::TestRequest::post()
            .uri("/api/v1/posts")
            .insert_header(bearer(&token))
            .set_json(json!({"title": "First post", "content": "Hello", "author": "alice"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let post: serde_json::Value = test::read_body_json(resp).await;
        let post_id = post["id"].as_str().unwrap().to_string();
        assert_eq!(post["title"], "First post");

        // Missing author is invalid
        let req = test::TestRequest::post()
            .uri("/api/v1/posts")
            .insert_header(bearer(&token))
            .set_json(json!({"title": "x", "content": "y"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Missing or empty field: author");

        // Update
        let req = test::TestRequest::put()
            .uri(&format!("/api/v1/posts/{post_id}"))
            .insert_header(bearer(&token))
            .set_json(json!({"title": "Edited", "content": "Hello", "author": "alice"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["title"], "Edited");

        // Updating a missing post is a 404
        let req = test::TestRequest::put()
            .uri("/api/v1/posts/no-such-id")
            .insert_header(bearer(&token))
            .set_json(json!({"title": "a", "content": "b", "author": "c"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        // Attach a comment
        let req = test::TestRequest::post()
            .uri(&format!("/api/v1/posts/{post_id}/comments"))
            .insert_header(bearer(&token))
            .set_json(json!({"content": "nice one"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let comment: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(comment["post_id"].as_str().unwrap(), post_id);

        // Delete, then delete again
        let req = test::TestRequest::delete()
            .uri(&format!("/api/v1/posts/{post_id}"))
            .insert_header(bearer(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/v1/posts/{post_id}"))
            .insert_header(bearer(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_rt::test]
    async fn test_search_sort_and_pagination() {
        let state = test_state();
        let tokens = test_token_service();
        let token = tokens.generate_token("tester").unwrap();
        let app = init_app!(state, tokens);

        for (title, content, author) in [
            ("b", "First post body", "alice"),
            ("a", "Second post body", "bob"),
            ("c", "Third post body", "carol"),
        ] {
            let req = test::TestRequest::post()
                .uri("/api/v1/posts")
                .insert_header(bearer(&token))
                .set_json(json!({"title": title, "content": content, "author": author}))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::CREATED);
        }

        // Case-insensitive search
        let req = test::TestRequest::get()
            .uri("/api/v1/posts/search?query=first")
            .insert_header(bearer(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["results"].as_array().unwrap().len(), 1);
        assert_eq!(body["results"][0]["title"], "b");

        // Missing query parameter
        let req = test::TestRequest::get()
            .uri("/api/v1/posts/search")
            .insert_header(bearer(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        // Sort descending by title
        let req = test::TestRequest::get()
            .uri("/api/v1/posts/sort?sort_by=title&direction=desc")
            .insert_header(bearer(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        let titles: Vec<&str> = body["results"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["c", "b", "a"]);

        // Invalid sort field
        let req = test::TestRequest::get()
            .uri("/api/v1/posts/sort?sort_by=bogus")
            .insert_header(bearer(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        // Non-positive pagination parameters
        let req = test::TestRequest::get()
            .uri("/api/v1/posts?page=0")
            .insert_header(bearer(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        // Non-integer pagination parameters
        let req = test::TestRequest::get()
            .uri("/api/v1/posts?page=abc")
            .insert_header(bearer(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        // A short page produces a next-page link
        let req = test::TestRequest::get()
            .uri("/api/v1/posts?page=1&per_page=2")
            .insert_header(bearer(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["results"].as_array().unwrap().len(), 2);
        let next_url = body["next_url"].as_str().unwrap();
        assert!(next_url.contains("page=2&per_page=2"));
    }
}
