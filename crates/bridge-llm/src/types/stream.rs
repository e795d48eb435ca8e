use super::response::Usage;

/// One upstream stream chunk, narrowed to what the accumulator folds
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamEvent {
    /// Model named by the chunk, if any
    pub model: Option<String>,
    /// Delta of the first choice; `None` when the chunk carried no choices
    pub delta: Option<StreamDelta>,
    /// Usage block, normally only on the final chunk
    pub usage: Option<Usage>,
}

/// Incremental fragment of the answer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamDelta {
    /// Content text fragment
    pub content: Option<String>,
    /// Reasoning text fragment
    pub reasoning_content: Option<String>,
    /// Tool call fragments, keyed by their index
    pub tool_calls: Vec<ToolCallFragment>,
    /// Set when the choice ended on this chunk
    pub finish_reason: Option<String>,
}

/// Partial tool call; fragments sharing an index belong to one call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolCallFragment {
    /// Position in the final tool call list
    pub index: u32,
    /// Call ID, normally only on the first fragment
    pub id: Option<String>,
    /// Function name fragment
    pub name: Option<String>,
    /// Arguments fragment
    pub arguments: Option<String>,
}
