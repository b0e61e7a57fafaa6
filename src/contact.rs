//! Contact form: validation, submission flow, and the EmailJS-style sender.
//!
//! The flow is written against [`FormView`] and [`MessageSender`] so it runs
//! the same in the browser and under `tokio` tests. The submit control is
//! re-enabled by the [`Submitting`] guard's `Drop`, which covers success,
//! failure, and the submit future being dropped mid-send.

use serde::Serialize;

use crate::config::ContactConfig;
use crate::error::{SendError, ValidationError};

#[cfg(test)]
#[path = "contact_test.rs"]
mod contact_test;

pub const FORM_ID: &str = "contact-form";
pub const STATUS_ID: &str = "form-status";

/// Names of the form's `name`, `email` and `message` fields.
pub const FIELDS: [&str; 3] = ["name", "email", "message"];

// =============================================================================
// MESSAGE
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactMessage {
    /// Trim all fields.
    #[must_use]
    pub fn new(name: &str, email: &str, message: &str) -> Self {
        Self { name: name.trim().to_owned(), email: email.trim().to_owned(), message: message.trim().to_owned() }
    }

    /// # Errors
    ///
    /// Returns the first problem found, in field order.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::Missing("name"));
        }
        if self.email.trim().is_empty() {
            return Err(ValidationError::Missing("email"));
        }
        match self.email.trim().split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {}
            _ => return Err(ValidationError::InvalidEmail),
        }
        if self.message.trim().is_empty() {
            return Err(ValidationError::Missing("message"));
        }
        Ok(())
    }
}

// =============================================================================
// STATUS
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormStatus {
    #[default]
    Idle,
    Sending,
    Sent,
    Failed,
    Invalid(String),
}

impl FormStatus {
    /// Text for the form's status line.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            FormStatus::Idle => "",
            FormStatus::Sending => "Sending…",
            FormStatus::Sent => "Thanks! Your message has been sent.",
            FormStatus::Failed => "Sorry, something went wrong. Please try again.",
            FormStatus::Invalid(reason) => reason,
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, FormStatus::Failed | FormStatus::Invalid(_))
    }
}

// =============================================================================
// SEAMS
// =============================================================================

/// The form's visible controls.
pub trait FormView {
    fn set_submitting(&mut self, submitting: bool);
    fn show_status(&mut self, status: &FormStatus);
    /// Clear all fields.
    fn reset(&mut self);
}

#[async_trait::async_trait(?Send)]
pub trait MessageSender {
    /// # Errors
    ///
    /// Returns a [`SendError`] if the backend did not accept the message.
    async fn send(&self, message: &ContactMessage) -> Result<(), SendError>;
}

/// Disables submit for its lifetime.
pub struct Submitting<'a, V: FormView> {
    view: &'a mut V,
}

impl<'a, V: FormView> Submitting<'a, V> {
    pub fn begin(view: &'a mut V) -> Self {
        view.set_submitting(true);
        view.show_status(&FormStatus::Sending);
        Self { view }
    }

    pub fn view(&mut self) -> &mut V {
        &mut *self.view
    }
}

impl<V: FormView> Drop for Submitting<'_, V> {
    fn drop(&mut self) {
        self.view.set_submitting(false);
    }
}

/// Validate, send, and report. Invalid input never reaches the sender.
pub async fn submit<V: FormView>(view: &mut V, sender: &dyn MessageSender, message: &ContactMessage) -> FormStatus {
    if let Err(e) = message.validate() {
        let status = FormStatus::Invalid(e.to_string());
        view.show_status(&status);
        return status;
    }

    let mut guard = Submitting::begin(view);
    let status = match sender.send(message).await {
        Ok(()) => {
            tracing::info!("contact message sent");
            guard.view().reset();
            FormStatus::Sent
        }
        Err(e) => {
            tracing::error!(error = %e, "contact message failed");
            FormStatus::Failed
        }
    };
    guard.view().show_status(&status);
    status
}

// =============================================================================
// EMAILJS
// =============================================================================

pub struct EmailJsSender {
    http: reqwest::Client,
    config: ContactConfig,
}

impl EmailJsSender {
    /// # Errors
    ///
    /// Returns [`SendError::HttpClientBuild`] if the HTTP client fails to
    /// build.
    pub fn new(config: ContactConfig) -> Result<Self, SendError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| SendError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, config })
    }

    /// Request body for `message`.
    #[must_use]
    pub fn request_body<'a>(&'a self, message: &'a ContactMessage) -> EmailJsRequest<'a> {
        EmailJsRequest {
            service_id: &self.config.service_id,
            template_id: &self.config.template_id,
            user_id: &self.config.public_key,
            template_params: TemplateParams {
                from_name: &message.name,
                reply_to: &message.email,
                message: &message.message,
            },
        }
    }
}

#[async_trait::async_trait(?Send)]
impl MessageSender for EmailJsSender {
    async fn send(&self, message: &ContactMessage) -> Result<(), SendError> {
        let response = self
            .http
            .post(&self.config.endpoint)
            .json(&self.request_body(message))
            .send()
            .await
            .map_err(|e| SendError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| SendError::Request(e.to_string()))?;

        if !(200..300).contains(&status) {
            return Err(SendError::Status { status, body: text });
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct EmailJsRequest<'a> {
    pub service_id: &'a str,
    pub template_id: &'a str,
    pub user_id: &'a str,
    pub template_params: TemplateParams<'a>,
}

#[derive(Debug, Serialize)]
pub struct TemplateParams<'a> {
    pub from_name: &'a str,
    pub reply_to: &'a str,
    pub message: &'a str,
}
