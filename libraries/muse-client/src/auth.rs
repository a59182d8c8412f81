//! Login and registration against the Muse API.

use crate::error::{ClientError, Result};
use crate::session::Session;
use crate::types::{ApiError, LoginRequest, LoginResponse, RegisterRequest, UserInfo};
use muse_core::{LoginCredentials, Registration};
use reqwest::{Client, StatusCode};
use tracing::{debug, info, warn};

/// Authentication client. Successful logins are stored in the session.
pub struct AuthClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    session: &'a Session,
}

impl<'a> AuthClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, session: &'a Session) -> Self {
        Self {
            http,
            base_url,
            session,
        }
    }

    /// Login with email and password.
    ///
    /// The credentials are checked locally first; nothing is sent when they
    /// fail.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<LoginResponse> {
        credentials.validate()?;

        let url = format!("{}/auth/login", self.base_url);
        debug!(url = %url, email = %credentials.email.trim(), "Attempting login");

        let request = LoginRequest {
            email: credentials.email.trim().to_string(),
            password: credentials.password.clone(),
        };

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ClientError::network(&e))?;

        let status = response.status();

        if status.is_success() {
            let login_response: LoginResponse = response.json().await.map_err(|e| {
                ClientError::ParseError(format!("Failed to parse login response: {}", e))
            })?;

            self.session
                .set_credential(login_response.access_token.clone())
                .await?;
            info!("Login successful");
            Ok(login_response)
        } else if status == StatusCode::UNAUTHORIZED {
            let body = response.bytes().await.unwrap_or_default();
            warn!(status = %status, "Login failed: invalid credentials");
            Err(ClientError::Unauthorized {
                message: ApiError::message_from(&body)
                    .unwrap_or_else(|| "Correo o contraseña incorrectos".to_string()),
            })
        } else {
            let body = response.bytes().await.unwrap_or_default();
            Err(ClientError::Remote {
                status: status.as_u16(),
                message: ApiError::message_from(&body)
                    .unwrap_or_else(|| "Error al iniciar sesión".to_string()),
            })
        }
    }

    /// Create an account. Does not log in.
    pub async fn register(&self, registration: &Registration) -> Result<Option<UserInfo>> {
        registration.validate()?;

        let url = format!("{}/auth/register", self.base_url);
        debug!(url = %url, email = %registration.email.trim(), "Registering account");

        let request = RegisterRequest {
            name: registration.name.trim().to_string(),
            lastname: registration.lastname.trim().to_string(),
            email: registration.email.trim().to_string(),
            password: registration.password.clone(),
        };

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ClientError::network(&e))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ClientError::network(&e))?;

        if status.is_success() {
            info!("Registration successful");
            Ok(serde_json::from_slice(&body).ok())
        } else {
            let message = ApiError::message_from(&body)
                .unwrap_or_else(|| "Error al registrar usuario".to_string());
            warn!(status = %status, message = %message, "Registration rejected");
            Err(match status {
                StatusCode::CONFLICT => ClientError::Conflict { message },
                _ => ClientError::Remote {
                    status: status.as_u16(),
                    message,
                },
            })
        }
    }

    /// End the session locally.
    pub async fn logout(&self) -> Result<()> {
        self.session.invalidate().await?;
        info!("Logged out");
        Ok(())
    }
}
