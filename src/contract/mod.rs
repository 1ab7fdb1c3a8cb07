//! Unsigned contract calls for the vault contract.
//!
//! # Modules
//!
//! - [`types`] — `Action`, `FunctionCallAction`, gas and deposit constants
//! - [`validation`] — `Field`, `FieldKind`, `ValidationError`, `validate`
//! - [`methods`] — per-endpoint `ContractMethod` tables and `Service`
//! - [`builder`] — request body to `Action`

pub mod builder;
pub mod methods;
pub mod types;
pub mod validation;

pub use builder::build_function_call;
pub use methods::{ContractMethod, Service, API_PREFIX};
pub use types::{Action, Balance, CallArgs, FunctionCallAction, Gas};
pub use validation::{validate, Field, FieldKind, ValidationError};
