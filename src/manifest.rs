//! Plugin manifest served at `/.well-known/ai-plugin.json`.
//!
//! The manifest is an OpenAPI 3.0 document with an `x-mb` extension that
//! registers the service as an assistant able to generate transactions.
//! Paths are derived from the service's method table so the manifest always
//! matches the routes actually served.

use serde_json::{json, Map, Value};

use crate::contract::{ContractMethod, Service};

/// Path the manifest is served under.
pub const MANIFEST_PATH: &str = "/.well-known/ai-plugin.json";

/// Path of the liveness endpoint.
pub const PING_PATH: &str = "/api/ping";

const ASSISTANT_INSTRUCTIONS: &str = "You help users interact with the vault contract. \
Use the endpoints to build function calls, then pass the returned FunctionCall action \
to the generate-transaction tool so the user can review and sign it. \
Never invent arguments: ask the user for any required value that is missing.";

/// Build the manifest for `service`, advertising `server_url`.
pub fn plugin_manifest(service: Service, server_url: &str) -> Value {
    let mut paths = Map::new();
    for method in service.methods() {
        paths.insert(method.path(), json!({ "post": method_operation(method) }));
    }
    paths.insert(PING_PATH.to_string(), json!({ "get": ping_operation() }));

    json!({
        "openapi": "3.0.0",
        "info": {
            "title": "Vault Agent",
            "description": "API for building function calls against the vault and auction contract",
            "version": crate::VERSION,
        },
        "servers": [{ "url": server_url }],
        "x-mb": {
            "assistant": {
                "name": "Vault Assistant",
                "description": "Builds transactions for claiming vaults, bidding in auctions and administering the vault contract",
                "instructions": ASSISTANT_INSTRUCTIONS,
                "tools": [{ "type": "generate-transaction" }],
            }
        },
        "paths": paths,
        "components": {
            "schemas": {
                "FunctionCall": function_call_schema(),
                "Error": {
                    "type": "object",
                    "required": ["error"],
                    "properties": {
                        "error": { "type": "string" }
                    }
                }
            }
        }
    })
}

fn method_operation(method: &ContractMethod) -> Value {
    let mut operation = json!({
        "operationId": method.name,
        "summary": method.summary,
        "responses": {
            "200": {
                "description": format!("FunctionCall action for {}", method.name),
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/FunctionCall" }
                    }
                }
            }
        }
    });

    if !method.fields.is_empty() {
        operation["requestBody"] = request_body_schema(method);
        operation["responses"]["400"] = json!({
            "description": "A required field is missing or has the wrong type",
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/Error" }
                }
            }
        });
    }

    operation
}

fn request_body_schema(method: &ContractMethod) -> Value {
    let properties: Map<String, Value> = method
        .fields
        .iter()
        .map(|field| {
            (
                field.name.to_string(),
                json!({
                    "type": field.kind.schema_type(),
                    "description": field.description,
                }),
            )
        })
        .collect();
    let required: Vec<&str> = method.fields.iter().map(|f| f.name).collect();

    json!({
        "required": true,
        "content": {
            "application/json": {
                "schema": {
                    "type": "object",
                    "required": required,
                    "properties": properties,
                }
            }
        }
    })
}

fn ping_operation() -> Value {
    json!({
        "operationId": "ping",
        "summary": "Liveness check",
        "responses": {
            "200": {
                "description": "The service is up",
                "content": {
                    "application/json": {
                        "schema": {
                            "type": "object",
                            "properties": {
                                "message": { "type": "string", "example": "pong" }
                            }
                        }
                    }
                }
            }
        }
    })
}

fn function_call_schema() -> Value {
    json!({
        "type": "object",
        "required": ["type", "params"],
        "properties": {
            "type": { "type": "string", "enum": ["FunctionCall"] },
            "params": {
                "type": "object",
                "required": ["methodName", "args", "gas", "deposit"],
                "properties": {
                    "methodName": { "type": "string" },
                    "args": { "type": "object" },
                    "gas": { "type": "string", "example": "10000000000000" },
                    "deposit": { "type": "string", "example": "0" }
                }
            }
        }
    })
}
