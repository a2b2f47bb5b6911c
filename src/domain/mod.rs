//! Domain types of the payment wizard: cards, amounts, the session record and
//! the ports through which the wizard reaches its collaborators.

pub mod action;
pub mod amount;
pub mod card;
pub mod payment;
pub mod ports;
pub mod session;
