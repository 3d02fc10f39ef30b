use chrono::{DateTime, Utc};
use log::warn;
use regex::Regex;
use rocket::FromForm;
use serde::{Deserialize, Serialize};

use crate::db::DbPool;
use crate::models::local_store::LocalStore;

/// Local-store key holding the JSON-encoded inquiry list, newest first.
pub const INQUIRY_STORE_KEY: &str = "ssa_inquiries";

/// A submitted contact/project request. Immutable once created; the store
/// only ever prepends, it never edits or deletes.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Inquiry {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub area_sq_ft: String,
    #[serde(rename = "type")]
    pub project_type: String,
    pub location: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, FromForm)]
pub struct InquiryForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[field(name = "area")]
    pub area_sq_ft: String,
    #[field(name = "type")]
    pub project_type: String,
    #[field(default = String::new())]
    pub location: String,
    #[field(default = String::new())]
    pub message: String,
    /// Page the form was submitted from; the handler redirects back to it.
    #[field(default = String::new())]
    pub page: String,
}

impl InquiryForm {
    /// Validate in order; the first failing rule wins and later rules are
    /// not evaluated.
    pub fn validate(&self) -> Result<(), String> {
        let required = [
            &self.name,
            &self.email,
            &self.phone,
            &self.area_sq_ft,
            &self.project_type,
        ];
        if required.iter().any(|field| field.trim().is_empty()) {
            return Err("Please fill in all required fields.".to_string());
        }

        let email_pattern =
            Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid");
        if !email_pattern.is_match(self.email.trim()) {
            return Err("Please enter a valid email address.".to_string());
        }

        // Digits, +, -, parentheses, and spaces; at least 7 characters
        let phone_pattern = Regex::new(r"^[0-9+\-()\s]{7,}$").expect("phone pattern is valid");
        if !phone_pattern.is_match(self.phone.trim()) {
            return Err("Please enter a valid phone number.".to_string());
        }

        Ok(())
    }

    pub fn to_inquiry(&self) -> Inquiry {
        Inquiry {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            area_sq_ft: self.area_sq_ft.trim().to_string(),
            project_type: self.project_type.trim().to_string(),
            location: self.location.trim().to_string(),
            message: self.message.trim().to_string(),
            created_at: Utc::now(),
        }
    }
}

impl Inquiry {
    /// The stored list, newest first. An absent or unparsable value
    /// degrades to an empty list rather than an error.
    pub fn load_all(pool: &DbPool) -> Vec<Inquiry> {
        match LocalStore::get(pool, INQUIRY_STORE_KEY) {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("Stored inquiry list is unreadable, treating as empty: {}", e);
                Vec::new()
            }),
            None => Vec::new(),
        }
    }

    /// Prepend an inquiry and write the whole list back. Read-modify-write
    /// happens within one synchronous call, matching the single-flow
    /// storage contract.
    pub fn append(pool: &DbPool, inquiry: Inquiry) -> Result<(), String> {
        let mut list = Self::load_all(pool);
        list.insert(0, inquiry);
        let encoded = serde_json::to_string(&list).map_err(|e| e.to_string())?;
        LocalStore::set(pool, INQUIRY_STORE_KEY, &encoded)
    }

    pub fn count(pool: &DbPool) -> usize {
        Self::load_all(pool).len()
    }
}
