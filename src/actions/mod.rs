//! Server-side form actions
//!
//! Actions validate raw form input, run at most one persistence statement and
//! describe the follow-up (refresh, redirect) as [`Effect`](crate::core::Effect)
//! values instead of performing it.

pub mod auth;
pub mod invoices;
pub mod state;

pub use auth::AuthActions;
pub use invoices::InvoiceActions;
pub use state::{ActionState, messages};
