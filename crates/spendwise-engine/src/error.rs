use serde_json::{Value, json};
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct EngineError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

impl EngineError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn invalid_argument(message: &str) -> Self {
        Self::invalid_argument_for_command(message, None)
    }

    pub fn invalid_argument_for_command(message: &str, command: Option<&str>) -> Self {
        let hint = match command {
            Some(cmd) => format!("Check the options passed to the `{cmd}` command."),
            None => "Check the options passed to the command.".to_string(),
        };
        let error = Self::new("invalid_argument", message, vec![hint]);
        if let Some(cmd) = command {
            return error.with_data(json!({
                "command_hint": cmd,
            }));
        }
        error
    }

    pub fn invalid_rule(message: &str, index: Option<usize>) -> Self {
        let error = Self::new(
            "invalid_rule",
            message,
            vec![
                "Use a non-empty lowercase keyword for every rule.".to_string(),
                "Use one of the category labels listed in `allowed_categories`.".to_string(),
            ],
        );
        let allowed = crate::insights::rules::Category::ALL
            .iter()
            .map(|category| category.as_str())
            .collect::<Vec<&str>>();
        error.with_data(json!({
            "rule_index": index,
            "allowed_categories": allowed,
        }))
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
