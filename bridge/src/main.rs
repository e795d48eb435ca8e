#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod args;

use std::io::Read as _;
use std::process::ExitCode;

use anyhow::Context as _;
use args::Args;
use bridge_config::Config;
use bridge_llm::{ChatCompletionInput, ChatCompletionTool, DeepSeekClient, Message, ToolOutput};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    if args.schema {
        println!("{}", serde_json::to_string_pretty(&ChatCompletionTool::input_schema())?);
        return Ok(ExitCode::SUCCESS);
    }

    // Load configuration
    let config = load_config(&args)?;

    // Initialize telemetry
    bridge_telemetry::init(&config.telemetry)?;

    tracing::info!(
        base_url = %config.deepseek.base_url,
        default_model = %config.deepseek.default_model,
        "starting deepseek bridge"
    );

    let client = DeepSeekClient::new(&config.deepseek)?;

    if config.startup.skip_connection_test {
        tracing::debug!("skipping connection test");
    } else if !client.test_connection().await {
        tracing::warn!("DeepSeek API did not answer the connection test; continuing anyway");
    }

    let tool = ChatCompletionTool::new(client, config.tools.clone());
    let output = run(&tool, args).await?;

    println!("{}", output.text);

    Ok(if output.is_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Load the config file if present, else fall back to environment variables
fn load_config(args: &Args) -> anyhow::Result<Config> {
    if args.config.exists() {
        Config::load(&args.config).with_context(|| format!("loading {}", args.config.display()))
    } else {
        Config::from_env().context("loading configuration from environment")
    }
}

async fn run(tool: &ChatCompletionTool, args: Args) -> anyhow::Result<ToolOutput> {
    if let Some(prompt) = args.prompt {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = args.system {
            messages.push(Message::system(system));
        }
        messages.push(Message::user(prompt));

        let input = ChatCompletionInput {
            messages,
            model: args.model,
            stream: args.stream,
            ..ChatCompletionInput::default()
        };

        return Ok(tool.call(input).await);
    }

    let mut raw = String::new();
    std::io::stdin()
        .read_to_string(&mut raw)
        .context("reading tool arguments from stdin")?;

    let mut arguments: serde_json::Value =
        serde_json::from_str(&raw).context("tool arguments on stdin are not valid JSON")?;

    // Command-line flags win over the document
    if let Some(object) = arguments.as_object_mut() {
        if let Some(model) = args.model {
            object.insert("model".to_owned(), model.into());
        }
        if args.stream {
            object.insert("stream".to_owned(), true.into());
        }
    }

    Ok(tool.call_json(arguments).await)
}
