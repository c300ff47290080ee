use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Non-2xx answer; `message` is the envelope message when the body had one.
    #[error("{message}")]
    Http { status: u16, message: String },
    #[error("{0}")]
    Transport(String),
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// `"<action>: <status> <message>"`; the status is blank when there was no response.
    pub fn describe(&self, action: &str) -> String {
        let status = self.status().map(|s| s.to_string()).unwrap_or_default();
        format!("{action}: {status} {self}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_merges_status_and_message() {
        let e = ClientError::Http { status: 500, message: "Failed to fetch users".into() };
        assert_eq!(
            e.describe("Failed to fetch employees"),
            "Failed to fetch employees: 500 Failed to fetch users"
        );
    }

    #[test]
    fn describe_without_status_leaves_gap() {
        let e = ClientError::Transport("connection refused".into());
        assert_eq!(
            e.describe("Failed to add employee"),
            "Failed to add employee:  connection refused"
        );
    }
}
