use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    pub id: i64,
    pub operation_id: String,
    pub name: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub method: String,
    pub path: String,
    pub base_url: String,
    pub cases: Vec<Case>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewEndpoint {
    pub operation_id: String,
    pub name: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub method: String,
    pub path: String,
    pub base_url: String,
    pub cases: Vec<Case>,
}

impl NewEndpoint {
    pub fn with_id(self, id: i64) -> Endpoint {
        Endpoint {
            id,
            operation_id: self.operation_id,
            name: self.name,
            summary: self.summary,
            description: self.description,
            method: self.method,
            path: self.path,
            base_url: self.base_url,
            cases: self.cases,
        }
    }
}

/// A named example scenario pairing a sample request with its expected response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    pub name: String,
    pub description: Option<String>,
    pub request: Request,
    pub response: Response,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Request {
    #[serde(default)]
    pub headers: Vec<Row>,
    #[serde(default)]
    pub query_params: Vec<Row>,
    #[serde(default)]
    pub path_params: Vec<Row>,
    pub body: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub status_code: u16,
    #[serde(default)]
    pub headers: Vec<Row>,
    /// Conventionally `{"data": "<serialized payload>"}`.
    pub body: Option<serde_json::Value>,
}

/// One key/value entry of a header, query or path parameter table.
///
/// `row_id` only identifies the row inside its own list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub row_id: i64,
    #[serde(rename = "keyValue")]
    pub key_value: String,
    pub value: String,
    pub enabled: bool,
}

impl Row {
    pub fn new(row_id: i64, key: &str, value: &str) -> Self {
        Row {
            row_id,
            key_value: key.to_string(),
            value: value.to_string(),
            enabled: true,
        }
    }
}
