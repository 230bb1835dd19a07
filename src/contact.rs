use std::rc::Rc;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use wasm_bindgen::JsCast;
use web_sys::{Document, FormData, HtmlFormElement};

use crate::dom;
use crate::error::SiteError;
use crate::notify::{Kind, Notifier};

pub const SUCCESS_MESSAGE: &str =
    "Thank you for contacting us! We will get back to you within 24 hours.";

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

/// The message shown to the visitor is the error's display text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in all required fields")]
    MissingField,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Please enter a valid 10-digit phone number")]
    InvalidPhone,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    pub fn from_form_data(data: &FormData) -> Self {
        let field = |name: &str| data.get(name).as_string().unwrap_or_default();
        ContactForm {
            name: field("name"),
            email: field("email"),
            phone: field("phone"),
            subject: field("subject"),
            message: field("message"),
        }
    }

    /// Checks run in order and stop at the first failure.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let fields = [&self.name, &self.email, &self.phone, &self.subject, &self.message];
        if fields.iter().any(|value| value.is_empty()) {
            return Err(ValidationError::MissingField);
        }
        if !is_valid_email(&self.email) {
            return Err(ValidationError::InvalidEmail);
        }
        if !is_valid_phone(&self.phone) {
            return Err(ValidationError::InvalidPhone);
        }
        Ok(())
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Exactly ten digits once spaces and hyphens are stripped.
pub fn is_valid_phone(phone: &str) -> bool {
    let digits: String = phone
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();
    digits.len() == 10 && digits.bytes().all(|b| b.is_ascii_digit())
}

pub fn install(document: &Document, notifier: Rc<Notifier>) -> Result<(), SiteError> {
    let Some(form) = document.get_element_by_id("contactForm") else {
        return Ok(());
    };
    let Ok(form) = form.dyn_into::<HtmlFormElement>() else {
        log::warn!("#contactForm is not a form element");
        return Ok(());
    };

    let target = form.clone();
    dom::listen(&target, "submit", move |event| {
        event.prevent_default();
        if let Err(err) = submit(&form, &notifier) {
            log::warn!("contact form submission failed: {}", err);
        }
    })
}

fn submit(form: &HtmlFormElement, notifier: &Notifier) -> Result<(), SiteError> {
    let data = FormData::new_with_form(form)?;
    match ContactForm::from_form_data(&data).validate() {
        Ok(()) => {
            notifier.present(SUCCESS_MESSAGE, Kind::Success)?;
            form.reset();
            log::info!("contact form accepted");
        }
        Err(rejection) => notifier.present(&rejection.to_string(), Kind::Error)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactForm {
        ContactForm {
            name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            phone: "555-123-4567".into(),
            subject: "Quote".into(),
            message: "Hello there".into(),
        }
    }

    #[test]
    fn complete_form_passes() {
        assert_eq!(filled().validate(), Ok(()));
    }

    #[test]
    fn any_empty_field_is_missing() {
        let blanks: [fn(&mut ContactForm); 5] = [
            |f| f.name.clear(),
            |f| f.email.clear(),
            |f| f.phone.clear(),
            |f| f.subject.clear(),
            |f| f.message.clear(),
        ];
        for blank in blanks {
            let mut form = filled();
            blank(&mut form);
            assert_eq!(form.validate(), Err(ValidationError::MissingField));
        }
    }

    #[test]
    fn missing_field_wins_over_bad_email() {
        let mut form = filled();
        form.email = "nope".into();
        form.message.clear();
        assert_eq!(form.validate(), Err(ValidationError::MissingField));
    }

    #[test]
    fn bad_email_checked_before_phone() {
        let mut form = filled();
        form.email = "ada.example.com".into();
        form.phone = "123".into();
        assert_eq!(form.validate(), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn bad_phone_is_rejected() {
        let mut form = filled();
        form.phone = "12345".into();
        assert_eq!(form.validate(), Err(ValidationError::InvalidPhone));
    }

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("x@y.z"));
        assert!(is_valid_email("first.last@mail.example.org"));
        assert!(!is_valid_email("xy.z"));
        assert!(!is_valid_email("x@yz"));
        assert!(!is_valid_email("x@y."));
        assert!(!is_valid_email("@y.z"));
        assert!(!is_valid_email("x y@y.z"));
        assert!(!is_valid_email("x@@y.z"));
    }

    #[test]
    fn phone_shapes() {
        assert!(is_valid_phone("5551234567"));
        assert!(is_valid_phone("555 123 4567"));
        assert!(is_valid_phone("555-123-4567"));
        assert!(is_valid_phone(" 555 - 123 - 4567 "));
        assert!(!is_valid_phone("555123456"));
        assert!(!is_valid_phone("55512345678"));
        assert!(!is_valid_phone("(555)1234567"));
        assert!(!is_valid_phone("555123456a"));
        assert!(!is_valid_phone("+15551234567"));
    }

    #[test]
    fn messages_match_what_visitors_see() {
        assert_eq!(
            ValidationError::MissingField.to_string(),
            "Please fill in all required fields"
        );
        assert_eq!(
            ValidationError::InvalidPhone.to_string(),
            "Please enter a valid 10-digit phone number"
        );
    }
}
