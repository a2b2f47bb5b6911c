//! Application layer of the payment wizard.
//!
//! `WizardStore` owns the session and is driven through a single command
//! queue (`dispatcher`), so every update, including the bursty keypad ones,
//! is applied against the committed amount. `PaymentWizard` sits on top and
//! plays the part of the views: it guards step transitions and submits the
//! payment when the confirmation step is entered.

pub mod dispatcher;
pub mod keypad;
pub mod store;
pub mod wizard;
