use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Uniform response wrapper: `{success, message, data?}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Envelope<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self { success: true, message: message.into(), data: Some(data) }
    }
}

impl Envelope<()> {
    /// Success without a payload, e.g. a delete confirmation.
    pub fn confirm(message: impl Into<String>) -> Self {
        Self { success: true, message: message.into(), data: None }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self { success: false, message: message.into(), data: None }
    }
}

/// A personnel record as it travels over the wire.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PersonRecord {
    pub id: i32,
    pub name: String,
    pub designation: String,
}

/// Body of create and update requests.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PersonFields {
    pub name: String,
    pub designation: String,
}

impl PersonFields {
    pub fn new(name: impl Into<String>, designation: impl Into<String>) -> Self {
        Self { name: name.into(), designation: designation.into() }
    }
}

/// `data` payload of the list operation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserList<T> {
    pub users: Vec<T>,
}
