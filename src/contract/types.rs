//! Wire types for unsigned contract calls.
//!
//! An [`Action`] serializes byte-identically to the transaction action shape
//! wallets and assistant front-ends expect:
//!
//! ```json
//! {
//!   "type": "FunctionCall",
//!   "params": {
//!     "methodName": "claim_vault",
//!     "args": { "index": 3 },
//!     "gas": "10000000000000",
//!     "deposit": "0"
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Gas units attached to a call.
pub type Gas = u64;

/// Amount in yoctoNEAR.
pub type Balance = u128;

/// One tera-gas.
pub const TGAS: Gas = 1_000_000_000_000;

/// Gas for view calls and cheap state changes.
pub const DEFAULT_GAS: Gas = 10 * TGAS;

/// Gas for calls that schedule cross-contract promises.
pub const HEAVY_GAS: Gas = 30 * TGAS;

/// The minimal attached deposit, required by payable methods.
pub const ONE_YOCTO: Balance = 1;

/// Named arguments of a contract call, passed through verbatim.
pub type CallArgs = Map<String, Value>;

/// An unsigned transaction action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "params")]
pub enum Action {
    FunctionCall(FunctionCallAction),
}

impl Action {
    /// Returns the function-call parameters.
    pub fn as_function_call(&self) -> &FunctionCallAction {
        match self {
            Action::FunctionCall(call) => call,
        }
    }
}

/// Parameters of a `FunctionCall` action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionCallAction {
    pub method_name: String,
    pub args: CallArgs,
    #[serde(with = "dec_format")]
    pub gas: Gas,
    #[serde(with = "dec_format")]
    pub deposit: Balance,
}

/// Serializes integers as decimal strings.
///
/// JSON numbers lose precision above 2^53 in most clients, so gas and
/// balances always travel as strings.
pub mod dec_format {
    use std::fmt::Display;
    use std::str::FromStr;

    use serde::de;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S, T>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Display,
    {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: FromStr,
        T::Err: Display,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
