use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, INVALID_BODY, MISSING_FIELDS};

/// Body of `POST /api/analyze`. Fields stay loosely typed so that falsy
/// values (`null`, `false`, `0`, `""`) report as missing rather than as a
/// decode failure.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub system_prompt: Option<Value>,
    #[serde(default)]
    pub user_text: Option<Value>,
}

impl AnalyzeRequest {
    /// Both fields as strings. Falsy or absent fields are missing; truthy
    /// non-strings make the body invalid.
    pub fn fields(&self) -> Result<(&str, &str), AppError> {
        let system_prompt = self.system_prompt.as_ref().filter(|v| !is_falsy(v));
        let user_text = self.user_text.as_ref().filter(|v| !is_falsy(v));

        let (Some(system_prompt), Some(user_text)) = (system_prompt, user_text) else {
            return Err(AppError::Validation(MISSING_FIELDS));
        };

        match (system_prompt.as_str(), user_text.as_str()) {
            (Some(system_prompt), Some(user_text)) => Ok((system_prompt, user_text)),
            _ => Err(AppError::Validation(INVALID_BODY)),
        }
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub result: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::AnalyzeRequest;
    use crate::error::{AppError, INVALID_BODY, MISSING_FIELDS};

    fn parse(raw: &str) -> AnalyzeRequest {
        serde_json::from_str(raw).unwrap()
    }

    fn rejection(raw: &str) -> &'static str {
        match parse(raw).fields() {
            Err(AppError::Validation(message)) => message,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn fields_present_are_returned_untrimmed() {
        let request = parse(r#"{"systemPrompt":" sys ","userText":"hi","extra":1}"#);
        assert_eq!(request.fields().unwrap(), (" sys ", "hi"));
    }

    #[test]
    fn falsy_or_absent_fields_are_missing() {
        for raw in [
            r#"{"systemPrompt":"","userText":"hi"}"#,
            r#"{"systemPrompt":"sys","userText":null}"#,
            r#"{"systemPrompt":0,"userText":"hi"}"#,
            r#"{"systemPrompt":0.0,"userText":"hi"}"#,
            r#"{"systemPrompt":false,"userText":"hi"}"#,
            r#"{"userText":"hi"}"#,
            r#"{"systemPrompt":5,"userText":""}"#,
            "{}",
        ] {
            assert_eq!(rejection(raw), MISSING_FIELDS, "{raw}");
        }
    }

    #[test]
    fn truthy_non_strings_are_invalid() {
        for raw in [
            r#"{"systemPrompt":5,"userText":"hi"}"#,
            r#"{"systemPrompt":true,"userText":"hi"}"#,
            r#"{"systemPrompt":"sys","userText":["hi"]}"#,
            r#"{"systemPrompt":{},"userText":"hi"}"#,
        ] {
            assert_eq!(rejection(raw), INVALID_BODY, "{raw}");
        }
    }
}
