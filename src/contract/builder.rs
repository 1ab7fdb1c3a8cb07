//! Builds function-call actions from validated request bodies.

use serde_json::Value;

use super::methods::ContractMethod;
use super::types::{Action, CallArgs, FunctionCallAction};
use super::validation::{validate, ValidationError};

/// Wrap already validated arguments in the method's fixed call parameters.
pub fn build_function_call(method: &ContractMethod, args: CallArgs) -> Action {
    Action::FunctionCall(FunctionCallAction {
        method_name: method.name.to_string(),
        args,
        gas: method.gas,
        deposit: method.deposit,
    })
}

impl ContractMethod {
    /// Validate `body` and build the unsigned call for this method.
    pub fn function_call(&self, body: &Value) -> Result<Action, ValidationError> {
        let args = validate(self.fields, body)?;
        Ok(build_function_call(self, args))
    }
}
