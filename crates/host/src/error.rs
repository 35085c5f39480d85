/// Errors surfaced by the host side.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HostError {
    /// The resource is not markup and cannot be placed in a frame.
    #[error("unsupported resource type: {mime_type}")]
    UnsupportedResource { mime_type: String },

    /// A `tool` action named a tool this host does not provide.
    #[error("unknown tool: {tool_name}")]
    UnknownTool { tool_name: String },

    /// A known tool was called with params it cannot use.
    #[error("invalid params for tool {tool_name}: {message}")]
    InvalidToolParams { tool_name: String, message: String },
}
