//! Lead-capture form: validation, submission, conversion tracking.
//!
//! One canonical field set covers every deployment; the optional fields
//! (phone, message, rental period) are switched on per deployment by the
//! capability flags in [`crate::config::FormConfig`], and a single validation
//! pass applies regardless of which fields are active.
//!
//! Submission is a single in-flight operation: `begin_submit` validates and
//! arms the gate, the transport carries the payload, `finish_submit` settles
//! the gate, resets the fields (after every attempt, success or not), and
//! fires the one-shot conversion event on the first success. Nothing is
//! persisted and nothing retries automatically — a failed attempt leaves the
//! modal open for the visitor to try again.

use crate::config::{BodyEncoding, PropertyConfig};
use super::capability::ConversionTracker;
use serde::Serialize;
use thiserror::Error;

/// Validation bounds for the canonical field set.
const NAME_MIN: usize = 2;
const NAME_MAX: usize = 100;
const EMAIL_MAX: usize = 255;
const PHONE_MAX: usize = 16;
const MESSAGE_MIN: usize = 50;
const MESSAGE_MAX: usize = 1000;

#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("transport error: {0}")]
    Transport(String),
}

/// A field-level validation failure. Recoverable: the visitor corrects the
/// field and resubmits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// A validated inquiry, trimmed and ready to transmit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadInquiry {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: Option<String>,
    pub period_id: Option<String>,
}

/// Wire payload for one submission attempt.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LeadPayload {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_label: Option<String>,
    /// Recipient address, assembled from the split config parts.
    pub to: String,
}

/// Capability for carrying a payload to the mail-relay endpoint.
pub trait LeadTransport {
    fn send(
        &self,
        endpoint: &str,
        encoding: BodyEncoding,
        payload: &LeadPayload,
    ) -> Result<(), SubmitError>;
}

/// Production transport: one blocking POST per attempt.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpTransport {
    /// `base_url` is the site origin the relative endpoint hangs off.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            base_url: base_url.into(),
        }
    }
}

impl LeadTransport for HttpTransport {
    fn send(
        &self,
        endpoint: &str,
        encoding: BodyEncoding,
        payload: &LeadPayload,
    ) -> Result<(), SubmitError> {
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), endpoint);
        let request = match encoding {
            BodyEncoding::Json => self.client.post(&url).json(payload),
            BodyEncoding::Form => self.client.post(&url).form(payload),
        };
        request.send()?.error_for_status()?;
        Ok(())
    }
}

/// Why a submission attempt never reached the transport.
#[derive(Debug, PartialEq, Eq)]
pub enum BeginError {
    /// A previous attempt hasn't settled yet.
    AlreadyInFlight,
    /// Field-level validation failures.
    Invalid(Vec<FieldError>),
}

/// Final outcome of a submission attempt.
#[derive(Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blocked before any network call.
    Rejected(Vec<FieldError>),
    /// A previous attempt hasn't settled yet.
    AlreadyInFlight,
    /// Delivered; the modal closes.
    Sent,
    /// Transport failed; the modal stays open for a manual retry.
    Failed(String),
}

/// The lead form's raw field values and submission state.
#[derive(Debug, Default)]
pub struct LeadForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub period_id: Option<String>,
    submitting: bool,
    conversion_fired: bool,
}

impl LeadForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// A form pre-filled with raw field values, as after visitor input.
    pub fn with_fields(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        message: impl Into<String>,
        period_id: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            message: message.into(),
            period_id,
            ..Self::default()
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Validate the current field values against the deployment's flags.
    pub fn validate(&self, config: &PropertyConfig) -> Result<LeadInquiry, Vec<FieldError>> {
        let flags = &config.form;
        let mut errors = Vec::new();

        let name = self.name.trim();
        if name.chars().count() < NAME_MIN {
            errors.push(FieldError::new(
                "name",
                format!("Name must be at least {NAME_MIN} characters"),
            ));
        } else if name.chars().count() > NAME_MAX {
            errors.push(FieldError::new(
                "name",
                format!("Name must be less than {NAME_MAX} characters"),
            ));
        }

        let email = self.email.trim();
        if !is_valid_email(email) {
            errors.push(FieldError::new("email", "Please enter a valid email address"));
        } else if email.chars().count() > EMAIL_MAX {
            errors.push(FieldError::new(
                "email",
                format!("Email must be less than {EMAIL_MAX} characters"),
            ));
        }

        let phone = enabled_value(flags.phone, &self.phone);
        if let Some(p) = &phone {
            if p.chars().count() > PHONE_MAX {
                errors.push(FieldError::new("phone", "Phone number is too long"));
            }
        }

        let message = enabled_value(flags.message, &self.message);
        if let Some(m) = &message {
            let len = m.chars().count();
            if len < MESSAGE_MIN {
                errors.push(FieldError::new(
                    "message",
                    format!("Message must be at least {MESSAGE_MIN} characters"),
                ));
            } else if len > MESSAGE_MAX {
                errors.push(FieldError::new(
                    "message",
                    format!("Message must be less than {MESSAGE_MAX} characters"),
                ));
            }
        }

        let period_id = if flags.period { self.period_id.clone() } else { None };
        if let Some(id) = &period_id {
            if config.period(id).is_none() {
                errors.push(FieldError::new("period", "Please select a rental period"));
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(LeadInquiry {
            name: name.to_string(),
            email: email.to_string(),
            phone,
            message,
            period_id,
        })
    }

    /// Validate and arm the in-flight gate, producing the wire payload.
    pub fn begin_submit(&mut self, config: &PropertyConfig) -> Result<LeadPayload, BeginError> {
        if self.submitting {
            return Err(BeginError::AlreadyInFlight);
        }
        let inquiry = self.validate(config).map_err(BeginError::Invalid)?;
        self.submitting = true;

        let period_label = inquiry
            .period_id
            .as_deref()
            .and_then(|id| config.period(id))
            .map(|p| p.label.clone());

        Ok(LeadPayload {
            name: inquiry.name,
            email: inquiry.email,
            phone: inquiry.phone,
            message: inquiry.message,
            period_id: inquiry.period_id,
            period_label,
            to: config.contact.email(),
        })
    }

    /// Settle the gate: reset the fields whatever happened, fire the one-shot
    /// conversion event on the first success.
    pub fn finish_submit(
        &mut self,
        result: Result<(), SubmitError>,
        tracker: &dyn ConversionTracker,
    ) -> SubmitOutcome {
        self.submitting = false;
        self.reset_fields();
        match result {
            Ok(()) => {
                if !self.conversion_fired {
                    tracker.lead_submitted();
                    self.conversion_fired = true;
                }
                SubmitOutcome::Sent
            }
            Err(e) => {
                log::warn!("lead submission failed: {e}");
                SubmitOutcome::Failed(e.to_string())
            }
        }
    }

    /// One full attempt: validate, transmit once, settle.
    pub fn submit(
        &mut self,
        config: &PropertyConfig,
        transport: &dyn LeadTransport,
        tracker: &dyn ConversionTracker,
    ) -> SubmitOutcome {
        let payload = match self.begin_submit(config) {
            Ok(payload) => payload,
            Err(BeginError::AlreadyInFlight) => return SubmitOutcome::AlreadyInFlight,
            Err(BeginError::Invalid(errors)) => return SubmitOutcome::Rejected(errors),
        };
        let result = transport.send(&config.form.endpoint, config.form.encoding, &payload);
        self.finish_submit(result, tracker)
    }

    fn reset_fields(&mut self) {
        self.name.clear();
        self.email.clear();
        self.phone.clear();
        self.message.clear();
        self.period_id = None;
    }
}

/// A field value counts only when its capability flag is on and the trimmed
/// value is non-empty.
fn enabled_value(enabled: bool, raw: &str) -> Option<String> {
    if !enabled {
        return None;
    }
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Structural email check: one `@`, non-empty local part, dotted domain,
/// no whitespace.
fn is_valid_email(email: &str) -> bool {
    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && tld.len() >= 2,
        None => false,
    }
}
