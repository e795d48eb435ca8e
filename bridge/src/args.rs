use std::path::PathBuf;

use clap::Parser;

/// `DeepSeek` chat completion bridge
#[derive(Debug, Parser)]
#[command(
    name = "deepseek-bridge",
    about = "Run the chat_completion tool against the DeepSeek API",
    long_about = "Run the chat_completion tool against the DeepSeek API.\n\nWith --prompt, sends a single user \
                  message. Otherwise reads the tool arguments as a JSON document from stdin."
)]
pub struct Args {
    /// Path to configuration file; environment variables are used when it does not exist
    #[arg(short, long, default_value = "deepseek-bridge.toml", env = "DEEPSEEK_BRIDGE_CONFIG")]
    pub config: PathBuf,

    /// Send this text as a single user message
    #[arg(short, long)]
    pub prompt: Option<String>,

    /// System message to send before the prompt
    #[arg(long, requires = "prompt")]
    pub system: Option<String>,

    /// Model to use instead of the configured default
    #[arg(short, long)]
    pub model: Option<String>,

    /// Stream the upstream response
    #[arg(long)]
    pub stream: bool,

    /// Print the tool's input JSON Schema and exit
    #[arg(long, conflicts_with_all = ["prompt", "system", "model", "stream"])]
    pub schema: bool,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn arguments_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn system_requires_prompt() {
        let result = Args::try_parse_from(["deepseek-bridge", "--system", "be brief"]);
        assert!(result.is_err());
    }

    #[test]
    fn prompt_with_overrides() {
        let args =
            Args::try_parse_from(["deepseek-bridge", "-p", "Hi", "--model", "deepseek-reasoner", "--stream"]).unwrap();

        assert_eq!(args.prompt.as_deref(), Some("Hi"));
        assert_eq!(args.model.as_deref(), Some("deepseek-reasoner"));
        assert!(args.stream);
        assert!(!args.schema);
    }
}
