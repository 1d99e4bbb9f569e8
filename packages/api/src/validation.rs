//! Form validation shared by the browser and the server functions.
//!
//! Sign-in and sign-up rules are checked in the form before submitting and
//! again in [`crate::register`] / [`crate::login_password`]. [`DealForm`]
//! holds the raw text of the create/edit deal form and turns it into the
//! matching request body.

use store::{Deal, DealStage, DealUpdate, NewDeal};

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Which form field a [`ValidationError`] belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Password,
    ConfirmPassword,
    Client,
    Product,
    Stage,
    Amount,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Name is required")]
    NameRequired,
    #[error("Email is required")]
    EmailRequired,
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Password is required")]
    PasswordRequired,
    #[error("Password must be at least 8 characters")]
    PasswordTooShort,
    #[error("Passwords must match")]
    PasswordMismatch,
    #[error("Client is required")]
    ClientRequired,
    #[error("Product is required")]
    ProductRequired,
    #[error("Stage is required")]
    StageRequired,
    #[error("Unknown stage: {0}")]
    UnknownStage(String),
    #[error("Amount must be a positive number")]
    InvalidAmount,
}

impl ValidationError {
    pub fn field(&self) -> Field {
        match self {
            ValidationError::NameRequired => Field::Name,
            ValidationError::EmailRequired | ValidationError::InvalidEmail => Field::Email,
            ValidationError::PasswordRequired | ValidationError::PasswordTooShort => {
                Field::Password
            }
            ValidationError::PasswordMismatch => Field::ConfirmPassword,
            ValidationError::ClientRequired => Field::Client,
            ValidationError::ProductRequired => Field::Product,
            ValidationError::StageRequired | ValidationError::UnknownStage(_) => Field::Stage,
            ValidationError::InvalidAmount => Field::Amount,
        }
    }
}

/// The first error reported for `field`, if any.
pub fn error_for(errors: &[ValidationError], field: Field) -> Option<&ValidationError> {
    errors.iter().find(|e| e.field() == field)
}

/// `local@domain.tld` with no whitespace.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::EmailRequired);
    }
    let Some((local, domain)) = email.split_once('@') else {
        return Err(ValidationError::InvalidEmail);
    };
    let valid = !local.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'));
    if valid {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

/// Every problem with a sign-in form, in field order.
pub fn validate_sign_in(email: &str, password: &str) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if let Err(e) = validate_email(email) {
        errors.push(e);
    }
    if password.is_empty() {
        errors.push(ValidationError::PasswordRequired);
    }
    errors
}

/// Every problem with a sign-up form, in field order.
pub fn validate_sign_up(
    name: &str,
    email: &str,
    password: &str,
    confirm: &str,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if name.trim().is_empty() {
        errors.push(ValidationError::NameRequired);
    }
    if let Err(e) = validate_email(email) {
        errors.push(e);
    }
    if password.is_empty() {
        errors.push(ValidationError::PasswordRequired);
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        errors.push(ValidationError::PasswordTooShort);
    }
    if password != confirm {
        errors.push(ValidationError::PasswordMismatch);
    }
    errors
}

/// Raw values of the create/edit deal form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DealForm {
    pub client_id: String,
    pub product_id: String,
    pub stage: String,
    pub amount: String,
    pub notes: String,
}

impl DealForm {
    /// Form prefilled from an existing deal.
    pub fn from_deal(deal: &Deal) -> Self {
        Self {
            client_id: deal.client_id.clone(),
            product_id: deal.product_id.clone(),
            stage: deal.stage.to_string(),
            amount: deal.value.map(|v| v.to_string()).unwrap_or_default(),
            notes: deal.notes.clone().unwrap_or_default(),
        }
    }

    fn parse_stage(&self) -> Result<DealStage, ValidationError> {
        if self.stage.trim().is_empty() {
            return Err(ValidationError::StageRequired);
        }
        self.stage
            .parse()
            .map_err(|_| ValidationError::UnknownStage(self.stage.clone()))
    }

    fn parse_amount(&self) -> Result<Option<f64>, ValidationError> {
        let raw = self.amount.trim().replace([',', '$'], "");
        if raw.is_empty() {
            return Ok(None);
        }
        match raw.parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 => Ok(Some(v)),
            _ => Err(ValidationError::InvalidAmount),
        }
    }

    fn notes(&self) -> Option<String> {
        let notes = self.notes.trim();
        (!notes.is_empty()).then(|| notes.to_string())
    }

    pub fn errors(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        if self.client_id.trim().is_empty() {
            errors.push(ValidationError::ClientRequired);
        }
        if self.product_id.trim().is_empty() {
            errors.push(ValidationError::ProductRequired);
        }
        if let Err(e) = self.parse_stage() {
            errors.push(e);
        }
        if let Err(e) = self.parse_amount() {
            errors.push(e);
        }
        errors
    }

    /// Body for `POST /deals`.
    pub fn to_new_deal(&self) -> Result<NewDeal, Vec<ValidationError>> {
        let errors = self.errors();
        if !errors.is_empty() {
            return Err(errors);
        }
        let mut deal = NewDeal::new(
            self.client_id.trim(),
            self.product_id.trim(),
            self.parse_stage().map_err(|e| vec![e])?,
        );
        deal.amount = self.parse_amount().map_err(|e| vec![e])?;
        deal.notes = self.notes();
        Ok(deal)
    }

    /// Body for `PATCH /deals/{id}` carrying only what differs from `original`.
    pub fn to_update(&self, original: &Deal) -> Result<DealUpdate, Vec<ValidationError>> {
        let errors = self.errors();
        if !errors.is_empty() {
            return Err(errors);
        }
        let stage = self.parse_stage().map_err(|e| vec![e])?;
        let amount = self.parse_amount().map_err(|e| vec![e])?;
        let client_id = self.client_id.trim();
        let product_id = self.product_id.trim();
        let notes = self.notes();

        Ok(DealUpdate {
            client_id: (client_id != original.client_id).then(|| client_id.to_string()),
            product_id: (product_id != original.product_id).then(|| product_id.to_string()),
            stage: (stage != original.stage).then_some(stage),
            created_at: None,
            amount: (amount != original.value).then_some(amount),
            notes: (notes != original.notes).then_some(notes),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::sample;

    #[test]
    fn test_email_rules() {
        assert_eq!(validate_email("ada@example.com"), Ok(()));
        assert_eq!(validate_email("  ada@example.com "), Ok(()));
        assert_eq!(validate_email(""), Err(ValidationError::EmailRequired));
        assert_eq!(validate_email("ada"), Err(ValidationError::InvalidEmail));
        assert_eq!(validate_email("@example.com"), Err(ValidationError::InvalidEmail));
        assert_eq!(validate_email("ada@example"), Err(ValidationError::InvalidEmail));
        assert_eq!(validate_email("ada@@example.com"), Err(ValidationError::InvalidEmail));
        assert_eq!(validate_email("a da@example.com"), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn test_sign_in() {
        assert!(validate_sign_in("ada@example.com", "x").is_empty());
        assert_eq!(
            validate_sign_in("nope", ""),
            vec![ValidationError::InvalidEmail, ValidationError::PasswordRequired]
        );
    }

    #[test]
    fn test_sign_up() {
        assert!(validate_sign_up("Ada", "ada@example.com", "longenough", "longenough").is_empty());

        let errors = validate_sign_up(" ", "ada@example.com", "short", "other");
        assert_eq!(
            errors,
            vec![
                ValidationError::NameRequired,
                ValidationError::PasswordTooShort,
                ValidationError::PasswordMismatch,
            ]
        );
        assert_eq!(
            error_for(&errors, Field::Password).map(|e| e.to_string()),
            Some("Password must be at least 8 characters".to_string())
        );
        assert!(error_for(&errors, Field::Email).is_none());
    }

    #[test]
    fn test_deal_form_required_fields() {
        let errors = DealForm::default().errors();
        assert_eq!(
            errors,
            vec![
                ValidationError::ClientRequired,
                ValidationError::ProductRequired,
                ValidationError::StageRequired,
            ]
        );

        let form = DealForm {
            client_id: "client-1".into(),
            product_id: "product-1".into(),
            stage: "Negotiation".into(),
            amount: "-5".into(),
            ..DealForm::default()
        };
        assert_eq!(
            form.errors(),
            vec![
                ValidationError::UnknownStage("Negotiation".into()),
                ValidationError::InvalidAmount,
            ]
        );
    }

    #[test]
    fn test_deal_form_to_new_deal() {
        let form = DealForm {
            client_id: "client-1".into(),
            product_id: "product-2".into(),
            stage: "Contacted".into(),
            amount: "$1,250.50".into(),
            notes: "  call back  ".into(),
        };
        let deal = form.to_new_deal().unwrap();
        assert_eq!(deal.stage, DealStage::Contacted);
        assert_eq!(deal.amount, Some(1250.5));
        assert_eq!(deal.notes.as_deref(), Some("call back"));
        assert!(deal.created_at.is_none());
    }

    #[test]
    fn test_deal_form_update_only_sends_changes() {
        let original = sample::deals().remove(0);
        let mut form = DealForm::from_deal(&original);
        assert!(form.to_update(&original).unwrap().is_empty());

        form.stage = "Deal Finalized".into();
        let update = form.to_update(&original).unwrap();
        assert_eq!(update, DealUpdate::stage(DealStage::DealFinalized));
    }

    #[test]
    fn test_deal_form_update_clears_emptied_fields() {
        let mut original = sample::deals().remove(0);
        original.value = Some(500.0);
        original.notes = Some("old notes".to_string());

        let mut form = DealForm::from_deal(&original);
        form.notes = "  ".into();
        form.amount = String::new();
        let update = form.to_update(&original).unwrap();
        assert!(!update.is_empty());
        assert_eq!(update.amount, Some(None));
        assert_eq!(update.notes, Some(None));

        original.apply(&update, "2024-02-01T00:00:00Z");
        assert!(original.value.is_none());
        assert!(original.notes.is_none());
    }

    #[test]
    fn test_deal_form_update_sends_new_values() {
        let original = sample::deals().remove(0);
        let mut form = DealForm::from_deal(&original);
        form.amount = "42".into();
        form.notes = "follow up".into();
        let update = form.to_update(&original).unwrap();
        assert_eq!(update.amount, Some(Some(42.0)));
        assert_eq!(update.notes, Some(Some("follow up".to_string())));
    }
}
