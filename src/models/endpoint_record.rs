use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize, Deserialize)]
pub struct EndpointRecord {
    pub id: i64,
    pub name: String,
    pub method: String,
    pub url: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewEndpointRecord {
    pub name: String,
    pub method: String,
    pub url: String,
    pub description: Option<String>,
}
