//! Registration form model: account and personal-information steps, the
//! signature slot filled by the capture widget, and the JSON payload sent to
//! the registration backend.

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

use serde::{Deserialize, Serialize};
use tracing::debug;

use signature::blank::{self, BlankPolicy, SignatureCheck};
use signature::export::{png_data_uri, strip_data_uri_prefix};
use signature::{EncodedImage, SignatureHost};

pub const USERNAME_REQUIRED: &str = "Username is required";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const PASSWORD_REQUIRED: &str = "Password is required";
pub const PASSWORDS_MUST_MATCH: &str = "Passwords must match";
pub const ALL_FIELDS_REQUIRED: &str = "All fields are required.";
pub const SIGNATURE_REQUIRED: &str = "Signature is required.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Username,
    Email,
    Password,
    ConfirmPassword,
    PersonalInfo,
    Signature,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

impl FieldError {
    const fn new(field: Field, message: &'static str) -> Self {
        Self { field, message }
    }
}

/// Validation failure with every offending field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", join_messages(.errors))]
pub struct FormError {
    pub errors: Vec<FieldError>,
}

impl FormError {
    #[must_use]
    pub fn has(&self, field: Field) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    #[must_use]
    pub fn message(&self, field: Field) -> Option<&'static str> {
        self.errors.iter().find(|e| e.field == field).map(|e| e.message)
    }
}

fn join_messages(errors: &[FieldError]) -> String {
    errors.iter().map(|e| e.message).collect::<Vec<_>>().join(", ")
}

fn missing(value: &str) -> bool {
    value.trim().is_empty()
}

// =============================================================================
// ACCOUNT STEP
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccountForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl AccountForm {
    /// Required fields and matching passwords. All failures are reported.
    ///
    /// # Errors
    ///
    /// Returns a [`FormError`] listing each failing field.
    pub fn validate(&self) -> Result<(), FormError> {
        let mut errors = Vec::new();
        if missing(&self.username) {
            errors.push(FieldError::new(Field::Username, USERNAME_REQUIRED));
        }
        if missing(&self.email) {
            errors.push(FieldError::new(Field::Email, EMAIL_REQUIRED));
        }
        if missing(&self.password) {
            errors.push(FieldError::new(Field::Password, PASSWORD_REQUIRED));
        }
        if self.password != self.confirm_password {
            errors.push(FieldError::new(Field::ConfirmPassword, PASSWORDS_MUST_MATCH));
        }
        if errors.is_empty() { Ok(()) } else { Err(FormError { errors }) }
    }
}

// =============================================================================
// PERSONAL INFORMATION STEP
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfoForm {
    pub first_name: String,
    pub last_name: String,
    pub id_card: String,
    pub phone_number: String,
    pub address: String,
    /// `data:image/png;base64,...` as produced by the capture widget.
    pub signature: String,
}

impl PersonalInfoForm {
    /// Text fields first, then the signature. Stops at the first failing
    /// group, so at most one error is reported.
    ///
    /// A signature that decodes to a blank image, or does not decode at all,
    /// counts as missing.
    ///
    /// # Errors
    ///
    /// Returns a [`FormError`] with a single entry.
    pub fn validate(&self, policy: &BlankPolicy) -> Result<(), FormError> {
        let text = [&self.first_name, &self.last_name, &self.id_card, &self.phone_number, &self.address];
        if text.iter().any(|v| missing(v)) {
            return Err(FormError { errors: vec![FieldError::new(Field::PersonalInfo, ALL_FIELDS_REQUIRED)] });
        }
        if missing(&self.signature) {
            return Err(FormError { errors: vec![FieldError::new(Field::Signature, SIGNATURE_REQUIRED)] });
        }
        match blank::check_data_uri(&self.signature, policy) {
            SignatureCheck::Signed => Ok(()),
            SignatureCheck::Blank | SignatureCheck::Invalid(_) => {
                Err(FormError { errors: vec![FieldError::new(Field::Signature, SIGNATURE_REQUIRED)] })
            }
        }
    }

    /// Take the slot's saved signature, if any. An unsaved slot leaves the
    /// current signature in place.
    pub fn accept_signature(&mut self, slot: &SignatureSlot) {
        if let Some(uri) = slot.data_uri() {
            self.signature = uri.to_owned();
        }
    }
}

// =============================================================================
// SIGNATURE SLOT
// =============================================================================

/// Host side of an embedded capture widget: remembers the last saved image
/// and whether the widget is showing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignatureSlot {
    saved: Option<String>,
    open: bool,
}

impl SignatureSlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the widget.
    pub fn open(&mut self) {
        self.open = true;
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub fn data_uri(&self) -> Option<&str> {
        self.saved.as_deref()
    }
}

impl SignatureHost for SignatureSlot {
    fn on_save(&mut self, image: EncodedImage) {
        debug!(bytes = image.bytes().len(), "signature stored in form");
        self.saved = Some(image.to_data_uri());
    }

    fn on_close(&mut self) {
        self.open = false;
    }
}

// =============================================================================
// PAYLOAD
// =============================================================================

/// Both steps of the signup flow together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrationForm {
    pub account: AccountForm,
    pub personal: PersonalInfoForm,
}

impl RegistrationForm {
    /// Validate both steps and build the payload.
    ///
    /// # Errors
    ///
    /// Returns the account step's errors if any, otherwise the personal step's.
    pub fn submit(&self, policy: &BlankPolicy) -> Result<RegistrationPayload, FormError> {
        self.account.validate()?;
        self.personal.validate(policy)?;
        Ok(RegistrationPayload::build(&self.account, &self.personal))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub first_name: String,
    pub last_name: String,
    pub id_card: String,
    pub phone_number: String,
    pub address: String,
}

/// JSON body of the registration request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationPayload {
    pub username: String,
    pub email: String,
    pub password: String,
    /// Bare base64 PNG, MIME prefix removed; empty when no signature.
    pub signature: String,
    pub personal_info: PersonalInfo,
}

impl RegistrationPayload {
    /// Map the form steps onto the request body. Does not validate.
    #[must_use]
    pub fn build(account: &AccountForm, personal: &PersonalInfoForm) -> Self {
        let signature =
            if personal.signature.is_empty() { String::new() } else { strip_data_uri_prefix(&personal.signature).to_owned() };
        Self {
            username: account.username.clone(),
            email: account.email.clone(),
            password: account.password.clone(),
            signature,
            personal_info: PersonalInfo {
                first_name: personal.first_name.clone(),
                last_name: personal.last_name.clone(),
                id_card: personal.id_card.clone(),
                phone_number: personal.phone_number.clone(),
                address: personal.address.clone(),
            },
        }
    }

    /// The stored signature as a displayable PNG data URI.
    #[must_use]
    pub fn signature_data_uri(&self) -> Option<String> {
        if self.signature.is_empty() { None } else { Some(png_data_uri(&self.signature)) }
    }
}
