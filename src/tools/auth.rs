//! Account Tools
//!
//! Login, registration and the stored session.

use std::sync::Mutex;

use serde::Serialize;

use crate::auth::{AuthClient, Credentials, Registration, Session};

pub const LOGIN_FAILED_MESSAGE: &str = "Login failed";
pub const REGISTRATION_FAILED_MESSAGE: &str = "Registration failed";

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub success: bool,
    pub was_logged_in: bool,
}

#[derive(Debug, Serialize)]
pub struct SessionStatusResponse {
    pub authenticated: bool,
    pub auth_required: bool,
}

fn require(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{} is required", field));
    }
    Ok(())
}

fn remember_token(session: &Mutex<Session>, token: String) -> Result<(), String> {
    let mut session = session
        .lock()
        .map_err(|_| "Session state is unavailable".to_string())?;
    session
        .store_token(token)
        .map_err(|e| format!("Failed to store session: {}", e))
}

/// Log in and keep the returned token
pub async fn login(
    client: &AuthClient,
    session: &Mutex<Session>,
    username: &str,
    password: &str,
) -> Result<LoginResponse, String> {
    require("username", username)?;
    require("password", password)?;

    let credentials = Credentials {
        username: username.to_string(),
        password: password.to_string(),
    };
    let token = client.login(&credentials).await.map_err(|e| {
        tracing::warn!(username, error = %e, "Login rejected");
        e.user_message(LOGIN_FAILED_MESSAGE)
    })?;
    if token.trim().is_empty() {
        tracing::warn!(username, "Login returned an empty token");
        return Err(LOGIN_FAILED_MESSAGE.to_string());
    }

    remember_token(session, token)?;
    Ok(LoginResponse {
        success: true,
        username: credentials.username,
    })
}

/// Create an account. Does not log in.
pub async fn register(
    client: &AuthClient,
    username: &str,
    email: &str,
    password: &str,
) -> Result<RegisterResponse, String> {
    require("username", username)?;
    require("email", email)?;
    require("password", password)?;

    let registration = Registration {
        username: username.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    };
    let message = client.register(&registration).await.map_err(|e| {
        tracing::warn!(username, error = %e, "Registration rejected");
        e.user_message(REGISTRATION_FAILED_MESSAGE)
    })?;

    Ok(RegisterResponse {
        success: true,
        message,
    })
}

pub fn logout(session: &mut Session) -> Result<LogoutResponse, String> {
    let was_logged_in = session.is_authenticated();
    session
        .clear()
        .map_err(|e| format!("Failed to clear session: {}", e))?;
    Ok(LogoutResponse {
        success: true,
        was_logged_in,
    })
}

pub fn session_status(session: &Session, auth_required: bool) -> SessionStatusResponse {
    SessionStatusResponse {
        authenticated: session.is_authenticated(),
        auth_required,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use crate::api::ApiClient;
    use crate::storage::MemoryStorage;

    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::Value;

    /// Backend that hands out `token` to every login
    async fn backend_with_token(token: &'static str) -> AuthClient {
        let app = Router::new().route(
            "/api/users/login",
            post(move |Json(_): Json<Value>| async move { Json(serde_json::json!({ "token": token })) }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        AuthClient::new(ApiClient::new(&format!("http://{}", addr), Duration::from_secs(5)).unwrap())
    }

    fn offline_client() -> AuthClient {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        AuthClient::new(ApiClient::new(&format!("http://{}", addr), Duration::from_secs(2)).unwrap())
    }

    #[tokio::test]
    async fn test_login_failure_leaves_session_empty() {
        let session = Mutex::new(Session::load(Arc::new(MemoryStorage::default())).unwrap());

        let err = login(&offline_client(), &session, "anna", "secret").await.unwrap_err();
        assert_eq!(err, LOGIN_FAILED_MESSAGE);
        assert!(!session.lock().unwrap().is_authenticated());
    }

    #[tokio::test]
    async fn test_login_stores_token() {
        let storage = Arc::new(MemoryStorage::default());
        let session = Mutex::new(Session::load(storage.clone()).unwrap());

        let response = login(&backend_with_token("tok-9").await, &session, "anna", "secret").await.unwrap();
        assert!(response.success);
        assert_eq!(session.lock().unwrap().token(), Some("tok-9"));
        assert!(Session::load(storage).unwrap().is_authenticated());
    }

    #[tokio::test]
    async fn test_empty_token_is_not_a_login() {
        let storage = Arc::new(MemoryStorage::default());
        let session = Mutex::new(Session::load(storage.clone()).unwrap());

        let err = login(&backend_with_token("").await, &session, "anna", "secret").await.unwrap_err();
        assert_eq!(err, LOGIN_FAILED_MESSAGE);
        assert!(!session.lock().unwrap().is_authenticated());
        assert!(!Session::load(storage).unwrap().is_authenticated());
    }

    #[tokio::test]
    async fn test_required_fields() {
        let session = Mutex::new(Session::load(Arc::new(MemoryStorage::default())).unwrap());
        assert_eq!(
            login(&offline_client(), &session, " ", "secret").await.unwrap_err(),
            "username is required"
        );
        assert_eq!(
            register(&offline_client(), "anna", "", "secret").await.unwrap_err(),
            "email is required"
        );
    }

    #[test]
    fn test_logout_and_status() {
        let mut session = Session::load(Arc::new(MemoryStorage::default())).unwrap();
        session.store_token("tok".into()).unwrap();
        assert!(session_status(&session, true).authenticated);

        let response = logout(&mut session).unwrap();
        assert!(response.was_logged_in);
        assert!(!session_status(&session, true).authenticated);
    }
}
