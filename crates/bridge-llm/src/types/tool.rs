use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Kind of tool; `function` is the only one the upstream accepts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Function,
}

/// Definition of a tool the model can call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ToolDefinition {
    /// Tool type, always `function`
    #[serde(rename = "type", default)]
    pub kind: ToolKind,
    /// Function specification
    pub function: FunctionDefinition,
}

impl ToolDefinition {
    pub fn function(function: FunctionDefinition) -> Self {
        Self {
            kind: ToolKind::Function,
            function,
        }
    }
}

/// Specification of a callable function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FunctionDefinition {
    /// Function name
    pub name: String,
    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// JSON Schema for the function parameters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Value>,
    /// Ask the upstream to enforce the parameter schema exactly
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,
}

impl FunctionDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            parameters: None,
            strict: None,
        }
    }
}

/// How the model should select tools
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum ToolChoice {
    /// `none`, `auto` or `required`
    Mode(ToolChoiceMode),
    /// Force a specific function
    Function(ToolChoiceFunction),
}

impl ToolChoice {
    /// Pin the model to the named function
    pub fn function(name: impl Into<String>) -> Self {
        Self::Function(ToolChoiceFunction {
            kind: ToolKind::Function,
            function: ToolChoiceFunctionName { name: name.into() },
        })
    }

    /// Name of the pinned function, if any
    pub fn function_name(&self) -> Option<&str> {
        match self {
            Self::Mode(_) => None,
            Self::Function(choice) => Some(&choice.function.name),
        }
    }
}

/// Tool selection mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ToolChoiceMode {
    /// Model will not call any tools
    None,
    /// Model decides whether to call tools
    Auto,
    /// Model must call at least one tool
    Required,
}

/// Force the model to call a specific function
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolChoiceFunction {
    /// Always `function`
    #[serde(rename = "type")]
    pub kind: ToolKind,
    /// Function to call
    pub function: ToolChoiceFunctionName,
}

/// Function name reference within a forced tool choice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolChoiceFunctionName {
    /// Name of the function to call
    pub name: String,
}
