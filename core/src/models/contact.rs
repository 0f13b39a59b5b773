// core/src/models/contact.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContactForm {
  pub name: String,
  pub email: String,
  #[serde(default)]
  pub subject: String,
  pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
  #[serde(flatten)]
  pub form: ContactForm,
  pub timestamp: DateTime<Utc>,
  pub id: String,
}
