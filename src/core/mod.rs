//! Core module containing the invoice domain, validation and service seams

pub mod auth;
pub mod effects;
pub mod error;
pub mod invoice;
pub mod service;
pub mod validation;

pub use auth::{Authenticator, Credentials, SignInError};
pub use effects::{ActionOutcome, Effect, OutcomeKind};
pub use error::{ActionError, AuthError, ConfigError, StorageError};
pub use invoice::{Cents, Invoice, InvoiceChanges, InvoiceId, InvoiceStatus, NewInvoice};
pub use service::{InvoiceStore, StorageResult};
pub use validation::{FieldErrors, FormValidator, RawForm};
