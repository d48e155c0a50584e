use crate::app::locator::LocatorService;
use crate::domain::ports::{Geocoder, RowSource};
use crate::utils::error::{LocatorError, Result};
use serde::{Deserialize, Serialize};

pub const FOOD_SITES_TOOL: &str = "getFoodSites";

/// Voice-assistant tool-call envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCallRequest {
    pub message: ToolCallMessage,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallMessage {
    pub tool_calls: Vec<ToolCall>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub function: ToolCallFunction,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ToolCallFunction {
    pub name: String,
    pub arguments: ToolArguments,
}

/// Arguments arrive either as a JSON object or as a JSON-encoded string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ToolArguments {
    Encoded(String),
    Object(serde_json::Value),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FoodSitesArguments {
    pub address: String,
    pub day_of_week: String,
}

impl ToolArguments {
    pub fn food_sites(&self) -> Result<FoodSitesArguments> {
        let parsed = match self {
            ToolArguments::Encoded(raw) => serde_json::from_str(raw)?,
            ToolArguments::Object(value) => serde_json::from_value(value.clone())?,
        };
        Ok(parsed)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallResponse {
    pub results: Vec<ToolCallResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallResult {
    pub tool_call_id: String,
    pub result: String,
}

impl ToolCallRequest {
    pub fn from_json(payload: &str) -> Result<Self> {
        Ok(serde_json::from_str(payload)?)
    }
}

/// Answers the first `getFoodSites` call in the envelope with a spoken summary.
pub async fn handle_tool_call<G: Geocoder, R: RowSource>(
    service: &LocatorService<G, R>,
    request: &ToolCallRequest,
) -> Result<ToolCallResponse> {
    let call = request
        .message
        .tool_calls
        .iter()
        .find(|call| call.function.name == FOOD_SITES_TOOL)
        .ok_or_else(|| LocatorError::ToolCallError {
            message: "No matching tool call found".to_string(),
        })?;

    let args = call.function.arguments.food_sites()?;
    tracing::info!(
        "📞 Tool call {} for '{}' on {}",
        call.id,
        args.address,
        args.day_of_week
    );

    let summary = service.voice_summary(&args.address, &args.day_of_week, None).await?;

    Ok(ToolCallResponse {
        results: vec![ToolCallResult {
            tool_call_id: call.id.clone(),
            result: summary,
        }],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_encoded_arguments() {
        let payload = r#"{"message":{"toolCalls":[{"id":"call-1","function":{"name":"getFoodSites","arguments":"{\"address\":\"20001\",\"day_of_week\":\"monday\"}"}}]}}"#;

        let request = ToolCallRequest::from_json(payload).unwrap();
        let args = request.message.tool_calls[0].function.arguments.food_sites().unwrap();

        assert_eq!(
            args,
            FoodSitesArguments {
                address: "20001".to_string(),
                day_of_week: "monday".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_object_arguments() {
        let payload = serde_json::json!({
            "message": {"toolCalls": [{
                "id": "call-2",
                "function": {"name": "getFoodSites", "arguments": {"address": "20001", "day_of_week": "Friday"}}
            }]}
        })
        .to_string();

        let request = ToolCallRequest::from_json(&payload).unwrap();
        let args = request.message.tool_calls[0].function.arguments.food_sites().unwrap();

        assert_eq!(args.day_of_week, "Friday");
    }

    #[test]
    fn test_missing_argument_is_serialization_error() {
        let args = ToolArguments::Object(serde_json::json!({"address": "20001"}));
        assert!(matches!(
            args.food_sites(),
            Err(LocatorError::SerializationError(_))
        ));
    }

    #[test]
    fn test_response_uses_camel_case() {
        let response = ToolCallResponse {
            results: vec![ToolCallResult {
                tool_call_id: "call-1".to_string(),
                result: "ok".to_string(),
            }],
        };
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            serde_json::json!({"results": [{"toolCallId": "call-1", "result": "ok"}]})
        );
    }
}
