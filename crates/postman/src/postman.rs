//! Postman Collection v2.1 output model.

use serde::Serialize;

pub const SCHEMA_V2_1: &str =
    "https://schema.getpostman.com/json/collection/v2.1.0/collection.json";

#[derive(Debug, Clone, Serialize)]
pub struct Collection {
    pub info: CollectionInfo,
    pub auth: Auth,
    pub variable: Vec<Variable>,
    pub item: Vec<Folder>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CollectionInfo {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub schema: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Auth {
    #[serde(rename = "type")]
    pub auth_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bearer: Option<Vec<KeyValue>>,
}

impl Auth {
    /// Bearer auth reading the token from a collection variable.
    pub fn bearer_variable(variable: &str) -> Self {
        Self {
            auth_type: "bearer",
            bearer: Some(vec![KeyValue {
                key: "token".to_string(),
                value: format!("{{{{{variable}}}}}"),
                value_type: Some("string"),
                description: None,
                disabled: None,
            }]),
        }
    }

    pub fn none() -> Self {
        Self {
            auth_type: "noauth",
            bearer: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyValue {
    pub key: String,
    pub value: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub value_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Variable {
    pub key: String,
    pub value: String,
    #[serde(rename = "type")]
    pub value_type: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Folder {
    pub name: String,
    pub item: Vec<Item>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Item {
    pub name: String,
    pub request: Request,
}

#[derive(Debug, Clone, Serialize)]
pub struct Request {
    pub method: String,
    pub header: Vec<KeyValue>,
    pub url: Url,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Body>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth: Option<Auth>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Url {
    pub raw: String,
    pub host: Vec<String>,
    pub path: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub query: Vec<KeyValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub variable: Vec<KeyValue>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Body {
    pub mode: &'static str,
    pub raw: String,
    pub options: BodyOptions,
}

#[derive(Debug, Clone, Serialize)]
pub struct BodyOptions {
    pub raw: RawOptions,
}

#[derive(Debug, Clone, Serialize)]
pub struct RawOptions {
    pub language: &'static str,
}

impl Body {
    pub fn json(raw: String) -> Self {
        Self {
            mode: "raw",
            raw,
            options: BodyOptions {
                raw: RawOptions { language: "json" },
            },
        }
    }
}
