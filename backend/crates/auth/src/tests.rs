//! Unit and router tests for the auth crate

#[cfg(test)]
mod support {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use kernel::id::UserId;
    use platform::token::{TokenConfig, TokenIssuer};
    use uuid::Uuid;

    use crate::domain::entity::User;
    use crate::domain::repository::UserRepository;
    use crate::domain::value_object::email::Email;
    use crate::error::AuthResult;

    /// In-memory user table
    #[derive(Clone, Default)]
    pub struct MemoryUserRepository {
        users: Arc<Mutex<HashMap<Uuid, User>>>,
    }

    impl MemoryUserRepository {
        pub fn get_by_email(&self, email: &str) -> Option<User> {
            let users = self.users.lock().unwrap();
            users.values().find(|u| u.email.as_str() == email).cloned()
        }

        pub fn len(&self) -> usize {
            self.users.lock().unwrap().len()
        }
    }

    impl UserRepository for MemoryUserRepository {
        async fn create(&self, user: &User) -> AuthResult<Option<User>> {
            let mut users = self.users.lock().unwrap();
            if users.values().any(|u| u.email == user.email) {
                return Ok(None);
            }
            users.insert(*user.user_id.as_uuid(), user.clone());
            Ok(Some(user.clone()))
        }

        async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
            Ok(self.users.lock().unwrap().get(user_id.as_uuid()).cloned())
        }

        async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
            Ok(self.get_by_email(email.as_str()))
        }

        async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
            Ok(self.get_by_email(email.as_str()).is_some())
        }

        async fn find_by_refresh_token(&self, token: &str) -> AuthResult<Option<User>> {
            let users = self.users.lock().unwrap();
            Ok(users
                .values()
                .find(|u| u.refresh_token.as_deref() == Some(token))
                .cloned())
        }

        async fn update_refresh_token(
            &self,
            email: &Email,
            token: Option<&str>,
        ) -> AuthResult<Option<User>> {
            let mut users = self.users.lock().unwrap();
            let Some(user) = users.values_mut().find(|u| &u.email == email) else {
                return Ok(None);
            };
            user.refresh_token = token.map(str::to_string);
            Ok(Some(user.clone()))
        }

        async fn revoke_refresh_token(&self, token: &str) -> AuthResult<u64> {
            let mut users = self.users.lock().unwrap();
            let mut changed = 0;
            for user in users.values_mut() {
                if user.refresh_token.as_deref() == Some(token) {
                    user.refresh_token = None;
                    changed += 1;
                }
            }
            Ok(changed)
        }
    }

    pub fn issuer() -> Arc<TokenIssuer> {
        Arc::new(TokenIssuer::new(TokenConfig::with_random_secrets()).unwrap())
    }
}

#[cfg(test)]
mod use_case_tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::http::StatusCode;
    use platform::token::{TokenConfig, TokenIssuer};
    use platform::upload::StagedFile;

    use super::support::{MemoryUserRepository, issuer};
    use crate::application::config::AuthConfig;
    use crate::application::{
        AuthenticateUseCase, GetUserUseCase, LoginInput, LoginUseCase, LogoutOutcome,
        LogoutUseCase, RefreshUseCase, RegisterInput, RegisterUseCase, SessionOutput,
    };
    use crate::domain::repository::UserRepository;
    use crate::error::AuthError;

    fn register_input(email: &str) -> RegisterInput {
        RegisterInput {
            username: Some("writer".to_string()),
            email: Some(email.to_string()),
            password: Some("correct horse".to_string()),
            image: None,
        }
    }

    async fn registered(repo: &Arc<MemoryUserRepository>) -> SessionOutput {
        let tokens = issuer();
        RegisterUseCase::new(repo.clone(), tokens)
            .execute(register_input("writer@example.com"))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_register_stores_refresh_token() {
        let repo = Arc::new(MemoryUserRepository::default());
        let output = registered(&repo).await;

        let stored = repo.get_by_email("writer@example.com").unwrap();
        assert_eq!(stored.refresh_token, output.refresh_token);
        assert!(!output.access_token.is_empty());
        assert_eq!(output.user.user_name, "writer");
        assert_eq!(output.user.user_role.code(), "user");
    }

    #[tokio::test]
    async fn test_register_normalizes_email() {
        let repo = Arc::new(MemoryUserRepository::default());
        let output = RegisterUseCase::new(repo.clone(), issuer())
            .execute(register_input("  Writer@Example.COM "))
            .await
            .unwrap();

        assert_eq!(output.user.email, "writer@example.com");
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let repo = Arc::new(MemoryUserRepository::default());
        registered(&repo).await;

        let err = RegisterUseCase::new(repo.clone(), issuer())
            .execute(register_input("writer@example.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::UserExists));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_register_rejects_bad_shape() {
        let repo = Arc::new(MemoryUserRepository::default());
        let use_case = RegisterUseCase::new(repo.clone(), issuer());

        let mut short_password = register_input("a@example.com");
        short_password.password = Some("short".to_string());
        let mut short_name = register_input("b@example.com");
        short_name.username = Some("ab".to_string());
        let mut bad_email = register_input("not-an-email");
        bad_email.email = Some("not-an-email".to_string());
        let mut missing = register_input("c@example.com");
        missing.password = None;

        for input in [short_password, short_name, bad_email, missing] {
            let err = use_case.execute(input).await.unwrap_err();
            assert!(matches!(err, AuthError::InvalidCredentials));
        }
        assert_eq!(repo.len(), 0);
    }

    #[tokio::test]
    async fn test_register_failure_discards_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("1700000000000-me.png");
        tokio::fs::write(&path, b"png").await.unwrap();

        let repo = Arc::new(MemoryUserRepository::default());
        let mut input = register_input("a@example.com");
        input.password = Some("short".to_string());
        input.image = Some(StagedFile {
            path: path.clone(),
            content_type: "image/png".to_string(),
            size: 3,
        });

        let err = RegisterUseCase::new(repo, issuer())
            .execute(input)
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::InvalidCredentials));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_register_keeps_image_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("1700000000000-me.png");
        tokio::fs::write(&path, b"png").await.unwrap();

        let repo = Arc::new(MemoryUserRepository::default());
        let mut input = register_input("a@example.com");
        input.image = Some(StagedFile {
            path: path.clone(),
            content_type: "image/png".to_string(),
            size: 3,
        });

        let output = RegisterUseCase::new(repo, issuer())
            .execute(input)
            .await
            .unwrap();

        assert!(path.exists());
        assert_eq!(
            output.user.image_path.as_deref(),
            Some(path.to_string_lossy().as_ref())
        );
    }

    #[tokio::test]
    async fn test_login_errors() {
        let repo = Arc::new(MemoryUserRepository::default());
        let tokens = issuer();
        RegisterUseCase::new(repo.clone(), tokens.clone())
            .execute(register_input("writer@example.com"))
            .await
            .unwrap();
        let login = LoginUseCase::new(repo.clone(), tokens);

        let err = login
            .execute(LoginInput {
                email: Some("nobody@example.com".to_string()),
                password: Some("correct horse".to_string()),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::EmailNotFound));

        let err = login
            .execute(LoginInput {
                email: Some("writer@example.com".to_string()),
                password: Some("wrong horse!".to_string()),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::WrongPassword));

        let err = login
            .execute(LoginInput {
                email: Some("writer@example.com".to_string()),
                password: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_overwrites_refresh_token() {
        let repo = Arc::new(MemoryUserRepository::default());
        let tokens = issuer();
        let first = RegisterUseCase::new(repo.clone(), tokens.clone())
            .execute(register_input("writer@example.com"))
            .await
            .unwrap();

        let second = LoginUseCase::new(repo.clone(), tokens)
            .execute(LoginInput {
                email: Some("WRITER@example.com".to_string()),
                password: Some("correct horse".to_string()),
            })
            .await
            .unwrap();

        assert_ne!(first.refresh_token, second.refresh_token);
        let stored = repo.get_by_email("writer@example.com").unwrap();
        assert_eq!(stored.refresh_token, second.refresh_token);
    }

    #[tokio::test]
    async fn test_refresh_without_rotation() {
        let repo = Arc::new(MemoryUserRepository::default());
        let tokens = issuer();
        let session = RegisterUseCase::new(repo.clone(), tokens.clone())
            .execute(register_input("writer@example.com"))
            .await
            .unwrap();

        let refresh = RefreshUseCase::new(repo.clone(), tokens.clone(), Arc::new(AuthConfig::default()));
        let output = refresh.execute(session.refresh_token.clone()).await.unwrap();

        assert!(output.refresh_token.is_none());
        let claims = tokens.verify_access(&output.access_token).unwrap();
        assert_eq!(claims.email, "writer@example.com");
        let stored = repo.get_by_email("writer@example.com").unwrap();
        assert_eq!(stored.refresh_token, session.refresh_token);
    }

    #[tokio::test]
    async fn test_refresh_with_rotation() {
        let repo = Arc::new(MemoryUserRepository::default());
        let tokens = issuer();
        let session = RegisterUseCase::new(repo.clone(), tokens.clone())
            .execute(register_input("writer@example.com"))
            .await
            .unwrap();

        let config = AuthConfig {
            rotate_refresh_on_use: true,
            ..AuthConfig::default()
        };
        let refresh = RefreshUseCase::new(repo.clone(), tokens, Arc::new(config));
        let output = refresh.execute(session.refresh_token.clone()).await.unwrap();

        let rotated = output.refresh_token.clone().unwrap();
        assert_ne!(Some(rotated.clone()), session.refresh_token);
        let stored = repo.get_by_email("writer@example.com").unwrap();
        assert_eq!(stored.refresh_token, Some(rotated));

        // The previous token no longer matches any user
        let err = refresh.execute(session.refresh_token).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidUser));
    }

    #[tokio::test]
    async fn test_refresh_errors() {
        let repo = Arc::new(MemoryUserRepository::default());
        let tokens = issuer();
        let refresh = RefreshUseCase::new(repo.clone(), tokens.clone(), Arc::new(AuthConfig::default()));

        let err = refresh.execute(None).await.unwrap_err();
        assert!(matches!(err, AuthError::MissingRefreshToken));

        let err = refresh.execute(Some(String::new())).await.unwrap_err();
        assert!(matches!(err, AuthError::MissingRefreshToken));

        let err = refresh.execute(Some("not-stored".to_string())).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidUser));
    }

    #[tokio::test]
    async fn test_refresh_rejects_foreign_signature() {
        let repo = Arc::new(MemoryUserRepository::default());
        // Registered with one issuer, refreshed with another
        let session = RegisterUseCase::new(repo.clone(), issuer())
            .execute(register_input("writer@example.com"))
            .await
            .unwrap();

        let refresh = RefreshUseCase::new(repo, issuer(), Arc::new(AuthConfig::default()));
        let err = refresh.execute(session.refresh_token).await.unwrap_err();
        assert!(matches!(err, AuthError::Unauthorized));
    }

    #[tokio::test]
    async fn test_refresh_rejects_email_claim_mismatch() {
        let repo = Arc::new(MemoryUserRepository::default());
        let tokens = issuer();
        RegisterUseCase::new(repo.clone(), tokens.clone())
            .execute(register_input("writer@example.com"))
            .await
            .unwrap();

        // Validly signed, stored on the writer's row, but issued for someone else
        let foreign = tokens.issue_refresh("reader@example.com").unwrap();
        let writer = repo.get_by_email("writer@example.com").unwrap();
        repo.update_refresh_token(&writer.email, Some(&foreign))
            .await
            .unwrap();

        let refresh = RefreshUseCase::new(repo, tokens, Arc::new(AuthConfig::default()));
        let err = refresh.execute(Some(foreign)).await.unwrap_err();
        assert!(matches!(err, AuthError::Unauthorized));
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_refresh_rejects_expired_stored_token() {
        let secrets = || TokenConfig::new("access-secret".as_bytes(), "refresh-secret".as_bytes());
        let short_lived = Arc::new(
            TokenIssuer::new({
                let mut config = secrets();
                config.refresh_ttl = Duration::ZERO;
                config
            })
            .unwrap(),
        );
        let tokens = Arc::new(TokenIssuer::new(secrets()).unwrap());

        let repo = Arc::new(MemoryUserRepository::default());
        let session = RegisterUseCase::new(repo.clone(), short_lived)
            .execute(register_input("writer@example.com"))
            .await
            .unwrap();
        let stored = repo.get_by_email("writer@example.com").unwrap();
        assert_eq!(stored.refresh_token, session.refresh_token);

        // exp has whole-second resolution
        tokio::time::sleep(Duration::from_millis(1100)).await;

        let refresh = RefreshUseCase::new(repo, tokens, Arc::new(AuthConfig::default()));
        let err = refresh.execute(session.refresh_token).await.unwrap_err();
        assert!(matches!(err, AuthError::Unauthorized));
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_logout_soft_and_revoking() {
        let repo = Arc::new(MemoryUserRepository::default());
        let session = registered(&repo).await;

        let soft = LogoutUseCase::new(repo.clone(), Arc::new(AuthConfig::default()));
        assert_eq!(soft.execute(None).await.unwrap(), LogoutOutcome::NoSession);
        assert_eq!(
            soft.execute(session.refresh_token.clone()).await.unwrap(),
            LogoutOutcome::Cleared
        );
        let stored = repo.get_by_email("writer@example.com").unwrap();
        assert_eq!(stored.refresh_token, session.refresh_token);

        let config = AuthConfig {
            revoke_on_logout: true,
            ..AuthConfig::default()
        };
        let revoking = LogoutUseCase::new(repo.clone(), Arc::new(config));
        assert_eq!(
            revoking.execute(session.refresh_token).await.unwrap(),
            LogoutOutcome::Cleared
        );
        let stored = repo.get_by_email("writer@example.com").unwrap();
        assert!(stored.refresh_token.is_none());
    }

    #[tokio::test]
    async fn test_authenticate() {
        let repo = Arc::new(MemoryUserRepository::default());
        let tokens = issuer();
        let session = RegisterUseCase::new(repo.clone(), tokens.clone())
            .execute(register_input("writer@example.com"))
            .await
            .unwrap();
        let authenticate = AuthenticateUseCase::new(repo.clone(), tokens.clone());

        let header = format!("Bearer {}", session.access_token);
        let current = authenticate.execute(Some(&header)).await.unwrap();
        assert_eq!(current.user_id, session.user.user_id);
        assert_eq!(current.email, "writer@example.com");

        assert!(matches!(
            authenticate.execute(None).await.unwrap_err(),
            AuthError::Unauthorized
        ));
        assert!(matches!(
            authenticate.execute(Some("Bearer garbage")).await.unwrap_err(),
            AuthError::Unauthorized
        ));

        // A refresh token is not an access token
        let header = format!("Bearer {}", session.refresh_token.unwrap());
        assert!(matches!(
            authenticate.execute(Some(&header)).await.unwrap_err(),
            AuthError::Unauthorized
        ));

        // Valid token for an email that no longer resolves
        let orphan = tokens.issue_access("ghost@example.com").unwrap();
        let header = format!("Bearer {orphan}");
        assert!(matches!(
            authenticate.execute(Some(&header)).await.unwrap_err(),
            AuthError::Unauthorized
        ));
    }

    #[tokio::test]
    async fn test_get_user() {
        let repo = Arc::new(MemoryUserRepository::default());
        let session = registered(&repo).await;
        let get_user = GetUserUseCase::new(repo);

        let profile = get_user
            .execute(&session.user.user_id.to_string())
            .await
            .unwrap();
        assert_eq!(profile, session.user);

        assert!(matches!(
            get_user.execute("123").await.unwrap_err(),
            AuthError::InvalidParams
        ));
        assert!(matches!(
            get_user
                .execute("6f1c2a3e-7b8d-4e9f-a0b1-c2d3e4f5a6b7")
                .await
                .unwrap_err(),
            AuthError::UserNotFound
        ));
    }
}

#[cfg(test)]
mod models_tests {
    use chrono::Utc;
    use kernel::id::UserId;

    use crate::domain::entity::UserProfile;
    use crate::domain::value_object::user_role::UserRole;
    use crate::presentation::dto::{LoginRequest, UserResponse};

    #[test]
    fn test_user_response_serialization() {
        let profile = UserProfile {
            user_id: UserId::new(),
            user_name: "writer".to_string(),
            email: "writer@example.com".to_string(),
            image_path: Some("public/images/personal/1-me.png".to_string()),
            user_role: UserRole::Admin,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(UserResponse::from(profile)).unwrap();
        assert_eq!(json["username"], "writer");
        assert_eq!(json["userImagePath"], "public/images/personal/1-me.png");
        assert_eq!(json["role"], "admin");
        assert!(json.get("password").is_none());
        assert!(json.get("refreshToken").is_none());
    }

    #[test]
    fn test_login_request_missing_fields() {
        let req: LoginRequest = serde_json::from_str("{}").unwrap();
        assert!(req.email.is_none());
        assert!(req.password.is_none());
    }
}

#[cfg(test)]
mod router_tests {
    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use axum::response::Response;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::support::{MemoryUserRepository, issuer};
    use crate::application::config::AuthConfig;
    use crate::presentation::handlers::AuthAppState;
    use crate::presentation::middleware::protect;
    use crate::presentation::router::{auth_router_generic, users_router};

    const BOUNDARY: &str = "auth-test-boundary";

    struct TestApp {
        router: Router,
        repo: MemoryUserRepository,
        _uploads: tempfile::TempDir,
    }

    fn app() -> TestApp {
        let uploads = tempfile::tempdir().unwrap();
        let repo = MemoryUserRepository::default();
        let config = AuthConfig::development().with_upload_root(uploads.path());
        let state = AuthAppState::new(repo.clone(), issuer(), config);

        let router = auth_router_generic(state.clone())
            .merge(protect(users_router(state.clone()), state));

        TestApp {
            router,
            repo,
            _uploads: uploads,
        }
    }

    fn multipart_body(fields: &[(&str, &str)], image: Option<(&str, &str, &[u8])>) -> Vec<u8> {
        let mut body = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        if let Some((file_name, content_type, bytes)) = image {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn register_request(email: &str, image: Option<(&str, &str, &[u8])>) -> Request<Body> {
        let body = multipart_body(
            &[
                ("username", "writer"),
                ("email", email),
                ("password", "correct horse"),
            ],
            image,
        );
        Request::builder()
            .method("POST")
            .uri("/register")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn set_cookie(response: &Response) -> Option<String> {
        response
            .headers()
            .get(header::SET_COOKIE)
            .map(|v| v.to_str().unwrap().to_string())
    }

    /// `jwt=<token>` pair out of a Set-Cookie header
    fn cookie_pair(set_cookie: &str) -> String {
        set_cookie.split(';').next().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_register_sets_cookie() {
        let app = app();
        let response = app
            .router
            .clone()
            .oneshot(register_request("writer@example.com", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let cookie = set_cookie(&response).unwrap();
        assert!(cookie.starts_with("jwt="));
        assert!(cookie.contains("HttpOnly"));

        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["user"]["email"], "writer@example.com");
        assert!(json["token"].as_str().is_some());
        assert!(json["user"].get("password").is_none());
    }

    #[tokio::test]
    async fn test_register_with_image() {
        let app = app();
        let response = app
            .router
            .clone()
            .oneshot(register_request(
                "writer@example.com",
                Some(("me.png", "image/png", b"\x89PNG")),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let json = body_json(response).await;
        let path = json["user"]["userImagePath"].as_str().unwrap().to_string();
        assert!(path.ends_with("-me.png"));
        assert!(std::path::Path::new(&path).exists());
    }

    #[tokio::test]
    async fn test_register_rejects_wrong_file_type() {
        let app = app();
        let response = app
            .router
            .clone()
            .oneshot(register_request(
                "writer@example.com",
                Some(("notes.txt", "text/plain", b"hello")),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let json = body_json(response).await;
        assert_eq!(json["message"], "Invalid file format");
        assert_eq!(app.repo.len(), 0);
    }

    #[tokio::test]
    async fn test_register_conflict_removes_upload() {
        let app = app();
        app.router
            .clone()
            .oneshot(register_request("writer@example.com", None))
            .await
            .unwrap();

        let response = app
            .router
            .clone()
            .oneshot(register_request(
                "writer@example.com",
                Some(("me.png", "image/png", b"\x89PNG")),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        let avatars = app._uploads.path().join("personal");
        let leftover = std::fs::read_dir(&avatars)
            .map(|entries| entries.count())
            .unwrap_or(0);
        assert_eq!(leftover, 0);
    }

    #[tokio::test]
    async fn test_login_flow() {
        let app = app();
        app.router
            .clone()
            .oneshot(register_request("writer@example.com", None))
            .await
            .unwrap();

        let response = app
            .router
            .clone()
            .oneshot(json_request(
                "/login",
                json!({"email": "writer@example.com", "password": "correct horse"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let cookie = set_cookie(&response).unwrap();
        let stored = app.repo.get_by_email("writer@example.com").unwrap();
        assert_eq!(
            cookie_pair(&cookie),
            format!("jwt={}", stored.refresh_token.unwrap())
        );

        let response = app
            .router
            .clone()
            .oneshot(json_request(
                "/login",
                json!({"email": "writer@example.com", "password": "wrong horse!"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Wrong email/password");
    }

    #[tokio::test]
    async fn test_login_malformed_body() {
        let app = app();
        let request = Request::builder()
            .method("POST")
            .uri("/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = app.router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["message"], "Invalid credentials");
    }

    #[tokio::test]
    async fn test_refresh_and_logout() {
        let app = app();
        let response = app
            .router
            .clone()
            .oneshot(register_request("writer@example.com", None))
            .await
            .unwrap();
        let cookie = cookie_pair(&set_cookie(&response).unwrap());

        // No cookie
        let response = app
            .router
            .clone()
            .oneshot(json_request("/refresh", json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let request = Request::builder()
            .method("POST")
            .uri("/refresh")
            .header(header::COOKIE, &cookie)
            .body(Body::empty())
            .unwrap();
        let response = app.router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(set_cookie(&response).is_none());
        let json = body_json(response).await;
        assert!(json["token"].as_str().is_some());

        let request = Request::builder()
            .method("POST")
            .uri("/logout")
            .header(header::COOKIE, &cookie)
            .body(Body::empty())
            .unwrap();
        let response = app.router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let cleared = set_cookie(&response).unwrap();
        assert!(cleared.contains("Max-Age=0"));
        let json = body_json(response).await;
        assert_eq!(json["message"], "cookie cleared");
        assert_eq!(json["token"], Value::Null);

        let request = Request::builder()
            .method("POST")
            .uri("/logout")
            .body(Body::empty())
            .unwrap();
        let response = app.router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_protected_user_route() {
        let app = app();
        let response = app
            .router
            .clone()
            .oneshot(register_request("writer@example.com", None))
            .await
            .unwrap();
        let json = body_json(response).await;
        let token = json["token"].as_str().unwrap().to_string();
        let user_id = json["user"]["id"].as_str().unwrap().to_string();

        let request = Request::builder()
            .uri(format!("/users/{user_id}"))
            .body(Body::empty())
            .unwrap();
        let response = app.router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let request = Request::builder()
            .uri(format!("/users/{user_id}"))
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap();
        let response = app.router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["user"]["username"], "writer");

        let request = Request::builder()
            .uri("/users/not-a-uuid")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap();
        let response = app.router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
