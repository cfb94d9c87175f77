use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HostAction {
    Get,
    Set,
    Update,
    Create,
    Delete,
    Notify,
}

/// `{ action, resource, values }` sent to or received from the host.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HostRequest {
    pub action: HostAction,
    pub resource: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Value>,
}

impl HostRequest {
    pub fn new(action: HostAction, resource: impl Into<String>) -> Self {
        Self {
            action,
            resource: resource.into(),
            values: None,
        }
    }

    pub fn with_values(mut self, values: Value) -> Self {
        self.values = Some(values);
        self
    }

    pub fn is(&self, action: HostAction, resource: &str) -> bool {
        self.action == action && self.resource == resource
    }
}

/// `{ success, values }` answer to a [`HostRequest`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HostResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Value>,
}

impl HostResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            values: None,
        }
    }

    pub fn ok_with(values: Value) -> Self {
        Self {
            success: true,
            values: Some(values),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            values: Some(serde_json::json!({ "error": message.into() })),
        }
    }

    /// `values.error` of an unsuccessful response.
    pub fn error_message(&self) -> Option<&str> {
        self.values.as_ref()?.get("error")?.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_serializes_lowercase_action_and_omits_empty_values() {
        let text = serde_json::to_string(&HostRequest::new(HostAction::Get, "interactiveFrame"))
            .unwrap();
        assert_eq!(text, r#"{"action":"get","resource":"interactiveFrame"}"#);
    }

    #[test]
    fn failure_carries_error_message() {
        let response: HostResponse =
            serde_json::from_value(json!({ "success": false, "values": { "error": "nope" } }))
                .unwrap();
        assert_eq!(response.error_message(), Some("nope"));
        assert_eq!(HostResponse::failure("bad").error_message(), Some("bad"));
        assert_eq!(HostResponse::ok().error_message(), None);
    }
}
