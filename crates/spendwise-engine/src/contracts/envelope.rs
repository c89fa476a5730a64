use serde::Serialize;
use serde_json::Value;

use crate::API_VERSION;
use crate::error::{EngineError, EngineResult};

/// `{ ok: true, command, version, data }` returned by every command.
#[derive(Debug, Clone, Serialize)]
pub struct SuccessEnvelope {
    pub ok: bool,
    pub command: String,
    pub version: String,
    pub data: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct FailureEnvelope {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    pub version: String,
    pub error: ErrorBody,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
}

impl SuccessEnvelope {
    pub fn to_json_string(&self) -> EngineResult<String> {
        serde_json::to_string(self)
            .map_err(|err| EngineError::internal_serialization(&err.to_string()))
    }
}

pub fn success<T>(command: &str, data: T) -> EngineResult<SuccessEnvelope>
where
    T: Serialize,
{
    let data = serde_json::to_value(data)
        .map_err(|err| EngineError::internal_serialization(&err.to_string()))?;
    Ok(SuccessEnvelope {
        ok: true,
        command: command.to_string(),
        version: API_VERSION.to_string(),
        data,
    })
}

/// The failing command is recovered from the error's `command_hint`, when the
/// error was raised while validating command options.
pub fn failure_from_error(error: &EngineError) -> FailureEnvelope {
    let command = error
        .data
        .as_ref()
        .and_then(|data| data.get("command_hint"))
        .and_then(Value::as_str)
        .map(str::to_string);
    FailureEnvelope {
        ok: false,
        command,
        version: API_VERSION.to_string(),
        error: ErrorBody {
            code: error.code.clone(),
            message: error.message.clone(),
            recovery_steps: error.recovery_steps.clone(),
        },
        data: error.data.clone(),
    }
}
