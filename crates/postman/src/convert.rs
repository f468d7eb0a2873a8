//! OpenAPI → Postman conversion.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::openapi::{Components, OpenApi, Operation, Parameter, ParameterOrRef};
use crate::postman::{
    Auth, Body, Collection, CollectionInfo, Folder, Item, KeyValue, Request, Url, Variable,
    SCHEMA_V2_1,
};

/// Base URL used when the document declares no servers.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Folder for operations without tags.
pub const UNTAGGED_FOLDER: &str = "General";

const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";
const PARAMETER_REF_PREFIX: &str = "#/components/parameters/";

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid OpenAPI document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unresolved parameter reference '{0}'")]
    UnresolvedParameter(String),
}

#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Collection name; defaults to the document title.
    pub name: Option<String>,
}

/// Counts reported after writing a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionSummary {
    pub folders: usize,
    pub requests: usize,
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Read an OpenAPI JSON file and write the Postman collection next to it.
pub fn convert_file(
    input: &Path,
    output: &Path,
    options: &ConvertOptions,
) -> Result<ConversionSummary, ConvertError> {
    let text = std::fs::read_to_string(input).map_err(|source| ConvertError::Read {
        path: input.to_path_buf(),
        source,
    })?;
    let document: OpenApi = serde_json::from_str(&text)?;
    tracing::debug!(
        path = %input.display(),
        paths = document.paths.len(),
        "Parsed OpenAPI document"
    );
    let collection = convert(&document, options)?;

    let write_err = |source: std::io::Error| ConvertError::Write {
        path: output.to_path_buf(),
        source,
    };
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }
    let mut json = serde_json::to_string_pretty(&collection)?;
    json.push('\n');
    std::fs::write(output, json).map_err(write_err)?;

    Ok(ConversionSummary {
        folders: collection.item.len(),
        requests: collection.item.iter().map(|f| f.item.len()).sum(),
    })
}

/// Build a Postman collection from a parsed OpenAPI document.
pub fn convert(document: &OpenApi, options: &ConvertOptions) -> Result<Collection, ConvertError> {
    let mut folders: IndexMap<String, Vec<Item>> = IndexMap::new();

    for (path, path_item) in &document.paths {
        for (method, operation) in path_item.operations() {
            let mut parameters = resolve_parameters(&path_item.parameters, &document.components)?;
            for parameter in resolve_parameters(&operation.parameters, &document.components)? {
                // Operation-level parameters override path-level ones.
                parameters
                    .retain(|p| !(p.name == parameter.name && p.location == parameter.location));
                parameters.push(parameter);
            }

            let item = build_item(method, path, operation, &parameters, &document.components);
            let folder = operation
                .tags
                .first()
                .cloned()
                .unwrap_or_else(|| UNTAGGED_FOLDER.to_string());
            folders.entry(folder).or_default().push(item);
        }
    }

    let base_url = document
        .servers
        .first()
        .map(|s| s.url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    Ok(Collection {
        info: CollectionInfo {
            name: options
                .name
                .clone()
                .unwrap_or_else(|| document.info.title.clone()),
            description: document.info.description.clone(),
            schema: SCHEMA_V2_1,
        },
        auth: Auth::bearer_variable("authToken"),
        variable: vec![
            Variable {
                key: "baseUrl".to_string(),
                value: base_url,
                value_type: "string",
            },
            Variable {
                key: "authToken".to_string(),
                value: String::new(),
                value_type: "string",
            },
        ],
        item: folders
            .into_iter()
            .map(|(name, item)| Folder { name, item })
            .collect(),
    })
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

fn resolve_parameters(
    parameters: &[ParameterOrRef],
    components: &Components,
) -> Result<Vec<Parameter>, ConvertError> {
    parameters
        .iter()
        .map(|p| match p {
            ParameterOrRef::Inline(parameter) => Ok(parameter.clone()),
            ParameterOrRef::Ref { reference } => reference
                .strip_prefix(PARAMETER_REF_PREFIX)
                .and_then(|name| components.parameters.get(name))
                .cloned()
                .ok_or_else(|| ConvertError::UnresolvedParameter(reference.clone())),
        })
        .collect()
}

fn build_item(
    method: &str,
    path: &str,
    operation: &Operation,
    parameters: &[Parameter],
    components: &Components,
) -> Item {
    let name = operation
        .summary
        .clone()
        .or_else(|| operation.operation_id.clone())
        .unwrap_or_else(|| format!("{method} {path}"));

    let mut header = Vec::new();
    let mut query = Vec::new();
    let mut variable = Vec::new();
    for parameter in parameters {
        let value = parameter_value(parameter);
        match parameter.location.as_str() {
            "query" => query.push(KeyValue {
                key: parameter.name.clone(),
                value,
                value_type: None,
                description: parameter.description.clone(),
                disabled: Some(!parameter.required),
            }),
            "path" => variable.push(KeyValue {
                key: parameter.name.clone(),
                value,
                value_type: None,
                description: parameter.description.clone(),
                disabled: None,
            }),
            "header" => header.push(KeyValue {
                key: parameter.name.clone(),
                value,
                value_type: Some("text"),
                description: parameter.description.clone(),
                disabled: Some(!parameter.required),
            }),
            _ => {}
        }
    }

    let body = operation
        .request_body
        .as_ref()
        .and_then(|body| {
            body.content
                .iter()
                .find(|(content_type, _)| content_type.contains("json"))
        })
        .map(|(_, media)| {
            let example = media.example.clone().unwrap_or_else(|| {
                media
                    .schema
                    .as_ref()
                    .map(|schema| example_for_schema(schema, components, &mut Vec::new()))
                    .unwrap_or_else(|| Value::Object(Map::new()))
            });
            Body::json(serde_json::to_string_pretty(&example).unwrap_or_default())
        });
    if body.is_some() {
        header.push(KeyValue {
            key: "Content-Type".to_string(),
            value: "application/json".to_string(),
            value_type: Some("text"),
            description: None,
            disabled: None,
        });
    }

    let auth = match &operation.security {
        Some(requirements) if requirements.is_empty() => Some(Auth::none()),
        _ => None,
    };

    Item {
        name,
        request: Request {
            method: method.to_string(),
            header,
            url: build_url(path, query, variable),
            body,
            auth,
            description: operation.description.clone(),
        },
    }
}

/// Postman URL for an OpenAPI path: `{param}` segments become `:param`.
fn build_url(path: &str, query: Vec<KeyValue>, variable: Vec<KeyValue>) -> Url {
    let segments: Vec<String> = path
        .split('/')
        .filter(|s| !s.is_empty())
        .map(to_postman_segment)
        .collect();

    let mut raw = format!("{{{{baseUrl}}}}/{}", segments.join("/"));
    let enabled: Vec<String> = query
        .iter()
        .filter(|q| q.disabled != Some(true))
        .map(|q| format!("{}={}", q.key, q.value))
        .collect();
    if !enabled.is_empty() {
        raw.push('?');
        raw.push_str(&enabled.join("&"));
    }

    Url {
        raw,
        host: vec!["{{baseUrl}}".to_string()],
        path: segments,
        query,
        variable,
    }
}

fn to_postman_segment(segment: &str) -> String {
    match segment
        .strip_prefix('{')
        .and_then(|s| s.strip_suffix('}'))
    {
        Some(name) => format!(":{name}"),
        None => segment.to_string(),
    }
}

fn parameter_value(parameter: &Parameter) -> String {
    let example = parameter
        .example
        .as_ref()
        .or_else(|| parameter.schema.as_ref().and_then(|s| s.get("example")));
    match example {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Example synthesis
// ---------------------------------------------------------------------------

/// Build an example value for a JSON schema.
///
/// Uses the schema's own `example` when present; otherwise fills required
/// properties with type-appropriate placeholders. `visiting` holds the
/// component schemas on the current path; a reference back into it yields
/// `null`.
pub fn example_for_schema(
    schema: &Value,
    components: &Components,
    visiting: &mut Vec<String>,
) -> Value {
    if let Some(reference) = schema.get("$ref").and_then(Value::as_str) {
        let Some(name) = reference.strip_prefix(SCHEMA_REF_PREFIX) else {
            return Value::Null;
        };
        if visiting.iter().any(|v| v == name) {
            return Value::Null;
        }
        let Some(target) = components.schemas.get(name) else {
            return Value::Null;
        };
        visiting.push(name.to_string());
        let example = example_for_schema(target, components, visiting);
        visiting.pop();
        return example;
    }

    if let Some(example) = schema.get("example") {
        return example.clone();
    }

    if let Some(parts) = schema.get("allOf").and_then(Value::as_array) {
        let mut merged = Map::new();
        for part in parts {
            if let Value::Object(fields) = example_for_schema(part, components, visiting) {
                merged.extend(fields);
            }
        }
        return Value::Object(merged);
    }
    if let Some(first) = ["oneOf", "anyOf"]
        .iter()
        .find_map(|key| schema.get(*key).and_then(Value::as_array))
        .and_then(|variants| variants.first())
    {
        return example_for_schema(first, components, visiting);
    }

    match schema.get("type").and_then(Value::as_str) {
        Some("string") => string_example(schema),
        Some("integer") | Some("number") => Value::from(0),
        Some("boolean") => Value::Bool(false),
        Some("array") => match schema.get("items") {
            Some(items) => Value::Array(vec![example_for_schema(items, components, visiting)]),
            None => Value::Array(Vec::new()),
        },
        Some("object") => object_example(schema, components, visiting),
        None if schema.get("properties").is_some() => object_example(schema, components, visiting),
        _ => Value::Null,
    }
}

fn string_example(schema: &Value) -> Value {
    if let Some(first) = schema
        .get("enum")
        .and_then(Value::as_array)
        .and_then(|values| values.first())
    {
        return first.clone();
    }
    let sample = match schema.get("format").and_then(Value::as_str) {
        Some("date-time") => "2024-01-01T00:00:00Z",
        Some("date") => "2024-01-01",
        Some("email") => "user@example.com",
        Some("uuid") => "00000000-0000-0000-0000-000000000000",
        Some("uri") | Some("url") => "https://example.com",
        _ => "string",
    };
    Value::String(sample.to_string())
}

fn object_example(schema: &Value, components: &Components, visiting: &mut Vec<String>) -> Value {
    let mut object = Map::new();
    let Some(properties) = schema.get("properties").and_then(Value::as_object) else {
        return Value::Object(object);
    };
    let required: Vec<&str> = schema
        .get("required")
        .and_then(Value::as_array)
        .map(|names| names.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    for (name, property) in properties {
        if required.contains(&name.as_str()) {
            object.insert(name.clone(), example_for_schema(property, components, visiting));
        }
    }
    Value::Object(object)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    fn document(value: Value) -> OpenApi {
        serde_json::from_value(value).unwrap()
    }

    fn sample() -> OpenApi {
        document(json!({
            "openapi": "3.0.3",
            "info": { "title": "Tourdesk API", "description": "Back office", "version": "1.0" },
            "servers": [{ "url": "https://api.tourdesk.test" }],
            "paths": {
                "/surveys": {
                    "get": {
                        "tags": ["Surveys"],
                        "summary": "List surveys",
                        "parameters": [
                            { "name": "status", "in": "query", "schema": { "type": "string" } },
                            { "name": "page", "in": "query", "required": true, "example": 2 }
                        ]
                    },
                    "post": {
                        "tags": ["Surveys", "Admin"],
                        "operationId": "createSurvey",
                        "requestBody": {
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/CreateSurvey" }
                                }
                            }
                        }
                    }
                },
                "/surveys/{id}/questions/{questionId}": {
                    "parameters": [{ "$ref": "#/components/parameters/SurveyId" }],
                    "delete": {
                        "tags": ["Questions"],
                        "parameters": [
                            { "name": "questionId", "in": "path", "required": true, "example": 42 }
                        ]
                    }
                },
                "/health": {
                    "get": { "security": [] }
                }
            },
            "components": {
                "parameters": {
                    "SurveyId": { "name": "id", "in": "path", "required": true, "schema": { "type": "integer" } }
                },
                "schemas": {
                    "CreateSurvey": {
                        "type": "object",
                        "required": ["title", "status", "questions", "sendAfterDays"],
                        "properties": {
                            "title": { "type": "string" },
                            "description": { "type": "string" },
                            "status": { "type": "string", "enum": ["draft", "active"] },
                            "sendAfterDays": { "type": "integer" },
                            "questions": { "type": "array", "items": { "$ref": "#/components/schemas/Question" } }
                        }
                    },
                    "Question": {
                        "type": "object",
                        "required": ["type", "isRequired"],
                        "properties": {
                            "type": { "type": "string", "example": "rating" },
                            "isRequired": { "type": "boolean" }
                        }
                    },
                    "Node": {
                        "type": "object",
                        "required": ["next"],
                        "properties": { "next": { "$ref": "#/components/schemas/Node" } }
                    }
                }
            }
        }))
    }

    fn find_item<'a>(collection: &'a Collection, name: &str) -> &'a Item {
        collection
            .item
            .iter()
            .flat_map(|f| f.item.iter())
            .find(|i| i.name == name)
            .unwrap()
    }

    #[test]
    fn collection_metadata_and_variables() {
        let collection = convert(&sample(), &ConvertOptions::default()).unwrap();
        assert_eq!(collection.info.name, "Tourdesk API");
        assert_eq!(collection.info.description.as_deref(), Some("Back office"));
        assert_eq!(collection.info.schema, SCHEMA_V2_1);
        assert_eq!(collection.auth, Auth::bearer_variable("authToken"));
        assert_eq!(collection.variable[0].key, "baseUrl");
        assert_eq!(collection.variable[0].value, "https://api.tourdesk.test");
        assert_eq!(collection.variable[1].key, "authToken");

        let renamed = convert(
            &sample(),
            &ConvertOptions {
                name: Some("Staging".to_string()),
            },
        )
        .unwrap();
        assert_eq!(renamed.info.name, "Staging");
    }

    #[test]
    fn default_base_url_without_servers() {
        let doc = document(json!({ "info": { "title": "Empty" }, "paths": {} }));
        let collection = convert(&doc, &ConvertOptions::default()).unwrap();
        assert_eq!(collection.variable[0].value, DEFAULT_BASE_URL);
        assert!(collection.item.is_empty());
    }

    #[test]
    fn folders_follow_first_tag_in_order_of_appearance() {
        let collection = convert(&sample(), &ConvertOptions::default()).unwrap();
        let folders: Vec<_> = collection.item.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(folders, vec!["Surveys", "Questions", UNTAGGED_FOLDER]);
        assert_eq!(collection.item[0].item.len(), 2);
    }

    #[test]
    fn request_names_fall_back() {
        let collection = convert(&sample(), &ConvertOptions::default()).unwrap();
        let names: Vec<_> = collection
            .item
            .iter()
            .flat_map(|f| f.item.iter().map(|i| i.name.as_str()))
            .collect();
        assert_eq!(
            names,
            vec![
                "List surveys",
                "createSurvey",
                "DELETE /surveys/{id}/questions/{questionId}",
                "GET /health"
            ]
        );
    }

    #[test]
    fn path_parameters_become_variables() {
        let collection = convert(&sample(), &ConvertOptions::default()).unwrap();
        let item = find_item(&collection, "DELETE /surveys/{id}/questions/{questionId}");
        let url = &item.request.url;
        assert_eq!(url.raw, "{{baseUrl}}/surveys/:id/questions/:questionId");
        assert_eq!(url.path, vec!["surveys", ":id", "questions", ":questionId"]);
        let vars: Vec<_> = url
            .variable
            .iter()
            .map(|v| (v.key.as_str(), v.value.as_str()))
            .collect();
        assert_eq!(vars, vec![("id", ""), ("questionId", "42")]);
    }

    #[test]
    fn optional_query_parameters_are_disabled() {
        let collection = convert(&sample(), &ConvertOptions::default()).unwrap();
        let url = &find_item(&collection, "List surveys").request.url;
        assert_eq!(url.query[0].key, "status");
        assert_eq!(url.query[0].disabled, Some(true));
        assert_eq!(url.query[1].key, "page");
        assert_eq!(url.query[1].disabled, Some(false));
        assert_eq!(url.raw, "{{baseUrl}}/surveys?page=2");
    }

    #[test]
    fn public_operations_get_noauth() {
        let collection = convert(&sample(), &ConvertOptions::default()).unwrap();
        assert_eq!(
            find_item(&collection, "GET /health").request.auth,
            Some(Auth::none())
        );
        assert!(find_item(&collection, "List surveys").request.auth.is_none());
    }

    #[test]
    fn body_is_synthesized_from_required_properties() {
        let collection = convert(&sample(), &ConvertOptions::default()).unwrap();
        let request = &find_item(&collection, "createSurvey").request;
        let body: Value = serde_json::from_str(&request.body.as_ref().unwrap().raw).unwrap();
        assert_eq!(
            body,
            json!({
                "title": "string",
                "status": "draft",
                "sendAfterDays": 0,
                "questions": [{ "type": "rating", "isRequired": false }]
            })
        );
        assert!(request
            .header
            .iter()
            .any(|h| h.key == "Content-Type" && h.value == "application/json"));
    }

    #[test]
    fn media_type_example_wins() {
        let doc = document(json!({
            "info": { "title": "T" },
            "paths": { "/things": { "post": { "requestBody": { "content": {
                "application/json": {
                    "example": { "name": "explicit" },
                    "schema": { "type": "object", "example": { "name": "schema" } }
                }
            } } } } }
        }));
        let collection = convert(&doc, &ConvertOptions::default()).unwrap();
        let raw = &collection.item[0].item[0].request.body.as_ref().unwrap().raw;
        let body: Value = serde_json::from_str(raw).unwrap();
        assert_eq!(body, json!({ "name": "explicit" }));
    }

    #[test]
    fn recursive_references_terminate() {
        let doc = sample();
        let example = example_for_schema(
            &json!({ "$ref": "#/components/schemas/Node" }),
            &doc.components,
            &mut Vec::new(),
        );
        assert_eq!(example, json!({ "next": null }));
    }

    #[test]
    fn unresolved_parameter_reference_is_an_error() {
        let doc = document(json!({
            "info": { "title": "T" },
            "paths": { "/x": { "get": { "parameters": [{ "$ref": "#/components/parameters/Missing" }] } } }
        }));
        let err = convert(&doc, &ConvertOptions::default()).unwrap_err();
        assert_matches!(err, ConvertError::UnresolvedParameter(r) if r.ends_with("Missing"));
    }
}
