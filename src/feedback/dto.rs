use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::repo::NewFeedback;
use crate::auth::services::is_valid_email;

pub type FieldErrors = BTreeMap<&'static str, &'static str>;

/// Submitted form values, echoed back when the form is redisplayed.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FeedbackForm {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub body: String,
}

impl FeedbackForm {
    pub fn validate(&self) -> Result<NewFeedback, FieldErrors> {
        let mut errors = FieldErrors::new();
        let full_name = self.full_name.trim();
        let email = self.email.trim();
        let phone = self.phone.trim();
        let body = self.body.trim();

        if full_name.is_empty() {
            errors.insert("full_name", "Please enter your name.");
        }
        if email.is_empty() {
            errors.insert("email", "Please enter your email.");
        } else if !is_valid_email(email) {
            errors.insert("email", "Not a valid email address.");
        }
        if phone.is_empty() {
            errors.insert("phone", "Please enter your phone number.");
        }
        if body.is_empty() {
            errors.insert("body", "Please enter a message.");
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(NewFeedback {
            full_name: full_name.into(),
            email: email.into(),
            phone: phone.into(),
            body: body.into(),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct HomePage {
    pub title: &'static str,
    pub form: FeedbackForm,
    pub errors: FieldErrors,
}
