use hc_core::services::{DoctorRegistration, UserRegistration};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterUserRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 8, max = 128))]
    pub password: String,

    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

impl From<RegisterUserRequest> for UserRegistration {
    fn from(req: RegisterUserRequest) -> Self {
        Self {
            email: req.email,
            password: req.password,
            name: req.name,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterDoctorRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 8, max = 128))]
    pub password: String,

    #[validate(length(min = 1, max = 100))]
    pub name: String,

    pub specialization_id: Uuid,

    /// Practice license (STR) number
    #[validate(length(min = 1, max = 64))]
    pub license_number: String,
}

impl From<RegisterDoctorRequest> for DoctorRegistration {
    fn from(req: RegisterDoctorRequest) -> Self {
        Self {
            email: req.email,
            password: req.password,
            name: req.name,
            specialization_id: req.specialization_id,
            license_number: req.license_number,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Body of `POST /verify-email`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyEmailRequest {
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    pub token: String,

    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

/// Account summary returned after registration or verification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    pub id: Uuid,
    pub email: String,
    pub role: hc_core::Role,
    pub is_verified: bool,
}

impl From<hc_core::Account> for AccountResponse {
    fn from(account: hc_core::Account) -> Self {
        Self {
            id: account.id,
            email: account.email,
            role: account.role,
            is_verified: account.is_verified,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
