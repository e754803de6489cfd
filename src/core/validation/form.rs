//! Invoice form validation
//!
//! Create and update share the same rules:
//!
//! | field        | rule                          |
//! |--------------|-------------------------------|
//! | `customerId` | present and non-empty         |
//! | `amount`     | at least one cent, fits `i64` |
//! | `status`     | `pending` or `paid`           |

use super::validators::{number, one_of, text};
use super::{FieldErrors, FormValidator, RawForm};
use crate::core::invoice::{Cents, InvoiceStatus};
use validator::Validate;

/// Form field names as submitted by the client
pub mod fields {
    pub const CUSTOMER_ID: &str = "customerId";
    pub const AMOUNT: &str = "amount";
    pub const STATUS: &str = "status";
}

/// Validation messages shown next to the form fields
pub mod messages {
    pub const CUSTOMER_REQUIRED: &str = "Please select a customer.";
    pub const AMOUNT_NOT_A_NUMBER: &str = "Expected number, received nan";
    pub const AMOUNT_NOT_POSITIVE: &str = "Please enter an amount greater than $0.";
    pub const AMOUNT_TOO_LARGE: &str = "Please enter a smaller amount.";
    pub const STATUS_INVALID: &str = "Please select an invoice status.";
}

/// Validated invoice form values
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceFields {
    pub customer_id: String,
    /// Rounded to the cent, strictly positive
    pub amount: Cents,
    pub status: InvoiceStatus,
}

/// Coerced values awaiting the declarative rules
#[derive(Debug, Validate)]
struct InvoiceDraft {
    #[validate(length(min = 1, message = "Please select a customer."))]
    customer_id: String,
    /// Cents after rounding
    #[validate(range(min = 1, message = "Please enter an amount greater than $0."))]
    amount: i64,
}

/// Validator for the invoice create and update forms
#[derive(Debug, Clone, Copy, Default)]
pub struct InvoiceFormValidator;

impl InvoiceFormValidator {
    pub fn new() -> Self {
        Self
    }
}

impl FormValidator for InvoiceFormValidator {
    type Output = InvoiceFields;

    fn validate(&self, raw: &RawForm) -> Result<InvoiceFields, FieldErrors> {
        let mut errors = FieldErrors::new();

        let customer_id = text()(raw.get(fields::CUSTOMER_ID)).unwrap_or_default();
        let amount = number(messages::AMOUNT_NOT_A_NUMBER)(raw.get(fields::AMOUNT));
        let status = one_of::<InvoiceStatus>(messages::STATUS_INVALID)(raw.get(fields::STATUS));
        let cents = amount.and_then(|dollars| match Cents::from_dollars(dollars) {
            Some(cents) => Ok(cents.get()),
            // hugely negative: still below one cent
            None if dollars < 0.0 => Ok(0),
            None => Err(messages::AMOUNT_TOO_LARGE.to_string()),
        });

        let draft = InvoiceDraft {
            customer_id,
            // a failed coercion is reported on its own, not as a range error
            amount: *cents.as_ref().unwrap_or(&1),
        };

        if let Err(rule_errors) = draft.validate() {
            let by_field = rule_errors.field_errors();
            for (rust_name, form_name) in [
                ("customer_id", fields::CUSTOMER_ID),
                ("amount", fields::AMOUNT),
            ] {
                for err in by_field.get(rust_name).into_iter().flat_map(|v| v.iter()) {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| err.code.to_string());
                    errors.add(form_name, message);
                }
            }
        }

        if let Err(message) = &cents {
            errors.add(fields::AMOUNT, message.clone());
        }
        if let Err(message) = &status {
            errors.add(fields::STATUS, message.clone());
        }

        match (errors.into_result(), cents, status) {
            (Ok(()), Ok(cents), Ok(status)) => Ok(InvoiceFields {
                customer_id: draft.customer_id,
                amount: Cents::new(cents),
                status,
            }),
            (Err(errors), _, _) => Err(errors),
            // unreachable: a failed coercion always records an error
            (Ok(()), _, _) => Err(FieldErrors::new()),
        }
    }
}
