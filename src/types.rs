// ABOUTME: Type definitions for API requests and responses
// ABOUTME: Profile updates use the double-Option pattern to tell absent keys from explicit nulls

use serde::{Deserialize, Deserializer, Serialize};

use crate::entities::user;

#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub phone_number: Option<String>,
    pub gender: Option<String>,
    pub medical_history: Option<String>,
    pub allergies: Option<String>,
    pub created_at: String,
}

impl From<&user::Model> for ProfileResponse {
    fn from(user: &user::Model) -> Self {
        Self {
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            date_of_birth: user.date_of_birth.map(|d| d.format("%Y-%m-%d").to_string()),
            phone_number: user.phone_number.clone(),
            gender: user.gender.clone(),
            medical_history: user.medical_history.clone(),
            allergies: user.allergies.clone(),
            created_at: user.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Partial profile update. Outer `None` = key absent (leave stored value
/// untouched), `Some(None)` = explicit null, `Some(Some(v))` = new value.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateProfileRequest {
    #[serde(deserialize_with = "patch_field")]
    pub first_name: Option<Option<String>>,
    #[serde(deserialize_with = "patch_field")]
    pub last_name: Option<Option<String>>,
    #[serde(deserialize_with = "patch_field")]
    pub phone_number: Option<Option<String>>,
    #[serde(deserialize_with = "patch_field")]
    pub date_of_birth: Option<Option<String>>,
    #[serde(deserialize_with = "patch_field")]
    pub gender: Option<Option<String>>,
    #[serde(deserialize_with = "patch_field")]
    pub medical_history: Option<Option<String>>,
    #[serde(deserialize_with = "patch_field")]
    pub allergies: Option<Option<String>>,
}

fn patch_field<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DeleteUserRequest {
    pub user_id: Option<i32>,
    pub admin_password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TestEmailRequest {
    pub to_email: Option<String>,
    pub subject: Option<String>,
    pub body: Option<String>,
    pub admin_password: Option<String>,
}
