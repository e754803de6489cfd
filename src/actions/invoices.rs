//! Create, update and delete actions for invoices
//!
//! Each action is one pass through the pipeline:
//!
//! ```text
//! RawForm ─▶ validate ─▶ cents + date ─▶ one statement ─▶ [Refresh, Redirect]
//!               │                             │
//!               └─▶ Rejected (field errors)   └─▶ Failed (database error)
//! ```
//!
//! Nothing is kept between calls; concurrent requests share only the store.

use super::state::{ActionState, messages};
use crate::config::{ActionsConfig, MissingRowPolicy};
use crate::core::effects::{ActionOutcome, Effect, OutcomeKind};
use crate::core::invoice::{InvoiceChanges, InvoiceId, NewInvoice};
use crate::core::service::InvoiceStore;
use crate::core::validation::{
    FieldErrors, FormValidator, InvoiceFields, InvoiceFormValidator, RawForm,
};
use chrono::{NaiveDate, Utc};
use std::sync::Arc;

fn utc_today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Form actions for the invoices resource
#[derive(Clone)]
pub struct InvoiceActions {
    store: Arc<dyn InvoiceStore>,
    config: ActionsConfig,
    validator: InvoiceFormValidator,
    today: fn() -> NaiveDate,
}

impl InvoiceActions {
    pub fn new(store: Arc<dyn InvoiceStore>, config: ActionsConfig) -> Self {
        Self {
            store,
            config,
            validator: InvoiceFormValidator::new(),
            today: utc_today,
        }
    }

    /// Replace the clock used for the issue date
    pub fn with_today(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn config(&self) -> &ActionsConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn InvoiceStore> {
        &self.store
    }

    /// Validate and insert a new invoice
    #[tracing::instrument(name = "create_invoice", skip_all)]
    pub async fn create(&self, input: &RawForm) -> ActionOutcome {
        let fields = match self.validate(input) {
            Ok(fields) => fields,
            Err(rejected) => {
                return rejected.with_message(messages::CREATE_MISSING_FIELDS);
            }
        };

        let row = NewInvoice {
            customer_id: fields.customer_id,
            amount: fields.amount,
            status: fields.status,
            date: (self.today)(),
        };
        let amount = row.amount;

        match self.store.insert(row).await {
            Ok(id) => {
                tracing::info!(invoice_id = %id, cents = amount.get(), "invoice created");
                self.back_to_listing()
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to create invoice");
                ActionOutcome::halted(
                    OutcomeKind::Failed,
                    ActionState::message(messages::CREATE_DATABASE_ERROR),
                )
            }
        }
    }

    /// Validate and overwrite customer, amount and status of `id`
    ///
    /// The id is not checked before the write.
    #[tracing::instrument(name = "update_invoice", skip_all, fields(invoice_id = %id))]
    pub async fn update(&self, id: &InvoiceId, input: &RawForm) -> ActionOutcome {
        let fields = match self.validate(input) {
            Ok(fields) => fields,
            Err(rejected) => {
                return rejected.with_message(messages::UPDATE_MISSING_FIELDS);
            }
        };

        let changes = InvoiceChanges {
            customer_id: fields.customer_id,
            amount: fields.amount,
            status: fields.status,
        };
        let amount = changes.amount;

        match self.store.update(id, changes).await {
            Ok(0) if self.config.missing_row_policy == MissingRowPolicy::Report => {
                tracing::warn!("update matched no invoice");
                ActionOutcome::halted(
                    OutcomeKind::NotFound,
                    ActionState::message(messages::UPDATE_NOT_FOUND),
                )
            }
            Ok(rows) => {
                tracing::info!(rows, cents = amount.get(), "invoice updated");
                self.back_to_listing()
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to update invoice");
                ActionOutcome::halted(
                    OutcomeKind::Failed,
                    ActionState::message(messages::UPDATE_DATABASE_ERROR),
                )
            }
        }
    }

    /// Delete `id` and refresh the listing; no redirect
    #[tracing::instrument(name = "delete_invoice", skip_all, fields(invoice_id = %id))]
    pub async fn delete(&self, id: &InvoiceId) -> ActionOutcome {
        match self.store.delete(id).await {
            Ok(0) if self.config.missing_row_policy == MissingRowPolicy::Report => {
                tracing::warn!("delete matched no invoice");
                ActionOutcome::halted(
                    OutcomeKind::NotFound,
                    ActionState::message(messages::DELETE_NOT_FOUND),
                )
            }
            Ok(rows) => {
                tracing::info!(rows, "invoice deleted");
                ActionOutcome::completed(
                    ActionState::message(messages::DELETED),
                    vec![Effect::Refresh(self.config.listing_path.clone())],
                )
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to delete invoice");
                ActionOutcome::halted(
                    OutcomeKind::Failed,
                    ActionState::message(messages::DELETE_DATABASE_ERROR),
                )
            }
        }
    }

    fn validate(&self, input: &RawForm) -> Result<InvoiceFields, Rejected> {
        self.validator.validate(input).map_err(|errors| {
            tracing::warn!(fields = ?errors.field_names(), "invoice form rejected");
            Rejected(errors)
        })
    }

    fn back_to_listing(&self) -> ActionOutcome {
        let path = &self.config.listing_path;
        ActionOutcome::completed(
            ActionState::default(),
            vec![Effect::Refresh(path.clone()), Effect::Redirect(path.clone())],
        )
    }
}

struct Rejected(FieldErrors);

impl Rejected {
    fn with_message(self, message: &str) -> ActionOutcome {
        ActionOutcome::halted(OutcomeKind::Rejected, ActionState::invalid(self.0, message))
    }
}
