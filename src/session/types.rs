use serde::{Deserialize, Serialize};

use crate::models::{ProfileVisibility, Role};

/// Data collected by the sign-up form
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupData {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Partial settings change; `None` keeps the current value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    pub email_notifications: Option<bool>,
    pub push_notifications: Option<bool>,
    pub marketing_emails: Option<bool>,
    pub profile_visibility: Option<ProfileVisibility>,
}

/// Profile edit submitted from the edit-profile form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub brand_name: Option<String>,
    pub address: Option<String>,
    pub area_of_specialization: Option<String>,
    pub about: Option<String>,
    pub image_url: Option<String>,
    pub settings: Option<SettingsUpdate>,
}
