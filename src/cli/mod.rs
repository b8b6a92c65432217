//! Command-line interface for fig-generators
//!
//! This module handles:
//! - Command-line argument parsing using clap
//! - Configuration loading and validation
//! - Running configured generators against tokens typed on the command line
//! - Rendering suggestions as text or JSON

pub mod completion;

use clap::{Parser, Subcommand};
use nu_ansi_term::{Color, Style};
use serde_json::json;
use std::path::PathBuf;

use crate::config::{Config, LogLevel, OutputFormat};
use crate::error::Result;
use crate::generator::Resolver;
use crate::suggestion::RichList;

/// Argument-completion generators driver
#[derive(Parser, Debug)]
#[command(
    name = "fig-generators",
    version,
    about = "Run value-list and key/value completion generators",
    long_about = "Runs the completion generators declared in a TOML configuration file
against tokens given on the command line, printing the query term and suggestions."
)]
pub struct CliArgs {
    /// Configuration file path
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
    pub config_file: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(long, value_name = "FORMAT", global = true)]
    pub format: Option<String>,

    /// Disable colored output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Quiet mode (errors only)
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Very verbose mode (trace logging)
    #[arg(long = "vv", global = true)]
    pub very_verbose: bool,

    /// Subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands for fig-generators
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute suggestions for a token context
    Complete {
        /// Generator name from the config file
        #[arg(value_name = "GENERATOR")]
        generator: String,

        /// Tokens typed so far; the last one is being completed
        #[arg(value_name = "TOKENS", trailing_var_arg = true, allow_hyphen_values = true)]
        tokens: Vec<String>,
    },

    /// Print the query term of a token
    Query {
        /// Generator name from the config file
        #[arg(value_name = "GENERATOR")]
        generator: String,

        /// Token being completed
        #[arg(value_name = "TOKEN", default_value = "", allow_hyphen_values = true)]
        token: String,
    },

    /// Print whether suggestions must be recomputed
    Trigger {
        /// Generator name from the config file
        #[arg(value_name = "GENERATOR")]
        generator: String,

        /// Token after the keystroke
        #[arg(value_name = "NEW", allow_hyphen_values = true)]
        new_token: String,

        /// Token before the keystroke
        #[arg(value_name = "OLD", allow_hyphen_values = true)]
        old_token: String,
    },

    /// List configured generators
    List {
        /// Print names only, one per line
        #[arg(long)]
        names: bool,
    },

    /// Show configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Validate configuration file
        #[arg(long)]
        validate: bool,
    },

    /// Generate shell completion script
    Completion {
        /// Shell type (bash, zsh, fish)
        #[arg(value_name = "SHELL")]
        shell: String,
    },

    /// Show version information
    Version,
}

/// CLI interface handler
pub struct CliInterface {
    /// Parsed command-line arguments
    args: CliArgs,

    /// Loaded configuration
    config: Config,
}

impl CliInterface {
    /// Create a new CLI interface from the process arguments
    ///
    /// # Returns
    /// * `Result<Self>` - New CLI interface or error
    pub fn new() -> Result<Self> {
        Self::from_args(CliArgs::parse())
    }

    /// Create a CLI interface from already parsed arguments
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let config = Self::load_config(&args)?;
        Ok(Self { args, config })
    }

    /// Load configuration from file and merge with arguments
    ///
    /// # Arguments
    /// * `args` - Command-line arguments
    ///
    /// # Returns
    /// * `Result<Config>` - Loaded configuration or error
    fn load_config(args: &CliArgs) -> Result<Config> {
        let mut config = Config::load_from_file(args.config_file.as_deref())?;

        // The config subcommand reports validation failures itself
        if !matches!(args.command, Commands::Config { .. }) {
            config.validate()?;
        }

        Self::apply_args_to_config(&mut config, args);
        Ok(config)
    }

    /// Apply CLI arguments to configuration
    ///
    /// Overrides configuration values with CLI arguments where provided
    fn apply_args_to_config(config: &mut Config, args: &CliArgs) {
        if let Some(format_str) = &args.format {
            config.display.format = OutputFormat::parse(format_str).unwrap_or_else(|| {
                eprintln!("Warning: Unknown format '{}', using text", format_str);
                OutputFormat::Text
            });
        }

        if args.no_color {
            config.display.color_output = false;
        }

        config.logging.level = if args.very_verbose {
            LogLevel::Trace
        } else if args.verbose {
            LogLevel::Debug
        } else if args.quiet {
            LogLevel::Error
        } else {
            config.logging.level
        };
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the CLI arguments
    pub fn args(&self) -> &CliArgs {
        &self.args
    }

    /// Run the selected subcommand and return what it prints
    ///
    /// # Returns
    /// * `Result<String>` - Output text or error
    pub async fn execute(&self) -> Result<String> {
        match &self.args.command {
            Commands::Complete { generator, tokens } => self.complete(generator, tokens).await,
            Commands::Query { generator, token } => self.query(generator, token),
            Commands::Trigger {
                generator,
                new_token,
                old_token,
            } => self.trigger(generator, new_token, old_token),
            Commands::List { names } => Ok(self.list(*names)),
            Commands::Config { show, validate } => self.handle_config_command(*show, *validate),
            Commands::Completion { shell } => completion::generate_completion(shell),
            Commands::Version => Ok(format!(
                "fig-generators version {}",
                env!("CARGO_PKG_VERSION")
            )),
        }
    }

    /// Resolve suggestions for a token context
    async fn complete(&self, name: &str, tokens: &[String]) -> Result<String> {
        let resolver = Resolver::shared();
        let generator = self.config.build_generator(name, &resolver)?;

        let tokens = if tokens.is_empty() {
            vec![String::new()]
        } else {
            tokens.to_vec()
        };
        let current = tokens.last().map(String::as_str).unwrap_or("");

        let suggestions = generator.custom(&tokens, &[]).await?;
        tracing::info!(
            generator = name,
            count = suggestions.len(),
            "Computed suggestions"
        );

        render_suggestions(
            generator.query_term(current),
            &suggestions,
            self.config.display.format,
            self.config.display.color_output,
        )
    }

    fn query(&self, name: &str, token: &str) -> Result<String> {
        let generator = self.config.build_generator(name, &Resolver::shared())?;
        Ok(generator.query_term(token).to_string())
    }

    fn trigger(&self, name: &str, new_token: &str, old_token: &str) -> Result<String> {
        let generator = self.config.build_generator(name, &Resolver::shared())?;
        Ok(generator.trigger(new_token, old_token).to_string())
    }

    /// List configured generators
    fn list(&self, names_only: bool) -> String {
        self.config
            .generators
            .iter()
            .map(|(name, spec)| {
                if names_only {
                    name.clone()
                } else {
                    format!("{name}\t{}", spec.kind())
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Handle config subcommand
    ///
    /// # Arguments
    /// * `show` - Whether to show configuration
    /// * `validate` - Whether to validate configuration
    fn handle_config_command(&self, show: bool, validate: bool) -> Result<String> {
        let mut out = Vec::new();
        out.push(format!(
            "Configuration file: {}",
            self.get_config_path().display()
        ));

        if validate {
            match self.config.validate() {
                Ok(()) => out.push("Configuration is valid".to_string()),
                Err(e) => out.push(format!("Configuration validation failed: {e}")),
            }
        }

        if show {
            out.push(self.config.to_toml()?);
        }

        Ok(out.join("\n"))
    }

    /// Get configuration file path (from args or default)
    fn get_config_path(&self) -> PathBuf {
        self.args
            .config_file
            .clone()
            .unwrap_or_else(Config::default_path)
    }
}

/// Render a query term and its suggestions
///
/// # Arguments
/// * `query` - Query term of the current token
/// * `suggestions` - Resolved suggestions
/// * `format` - Text or JSON
/// * `color` - Whether to colour text output
pub fn render_suggestions(
    query: &str,
    suggestions: &RichList,
    format: OutputFormat,
    color: bool,
) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
            "query": query,
            "suggestions": &suggestions[..],
        }))?),
        OutputFormat::Text => {
            let name_style = if color {
                Color::Green.bold()
            } else {
                Style::default()
            };
            let dim = if color {
                Color::DarkGray.normal()
            } else {
                Style::default()
            };

            let mut lines = vec![format!("query: {query}")];
            for suggestion in suggestions.iter() {
                let mut line = name_style.paint(suggestion.name.as_str()).to_string();
                if suggestion.insertion_text() != suggestion.name {
                    line.push_str(&format!(" -> {}", suggestion.insertion_text()));
                }
                if let Some(description) = suggestion.field("description").and_then(|d| d.as_str())
                {
                    line.push_str(&dim.paint(format!("  # {description}")).to_string());
                }
                lines.push(line);
            }
            Ok(lines.join("\n"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suggestion::Suggestion;

    const SAMPLE: &str = r#"
[generators.opts]
kind = "key-value-list"
keys = [{ name = "mode", description = "run mode" }, { name = "level" }]
values = ["fast", "slow"]
insert_delimiter = true
"#;

    fn cli_with(argv: &[&str], config: &str) -> CliInterface {
        let args = CliArgs::try_parse_from(argv).unwrap();
        let mut config = Config::from_toml_str(config).unwrap();
        CliInterface::apply_args_to_config(&mut config, &args);
        CliInterface { args, config }
    }

    #[test]
    fn test_cli_args_parsing() {
        let args = CliArgs::try_parse_from(["fig-generators", "complete", "opts", "mode="]).unwrap();
        match args.command {
            Commands::Complete { generator, tokens } => {
                assert_eq!(generator, "opts");
                assert_eq!(tokens, vec!["mode="]);
            }
            other => panic!("Expected complete, got {:?}", other),
        }
    }

    #[test]
    fn test_cli_args_with_flags() {
        let args = CliArgs::try_parse_from([
            "fig-generators",
            "--no-color",
            "-q",
            "--format",
            "json",
            "list",
        ])
        .unwrap();
        assert!(args.no_color);
        assert!(args.quiet);
        assert_eq!(args.format.as_deref(), Some("json"));
    }

    #[test]
    fn test_apply_args_to_config() {
        let cli = cli_with(
            &["fig-generators", "--no-color", "--vv", "--format", "json", "version"],
            "",
        );
        assert!(!cli.config().display.color_output);
        assert_eq!(cli.config().display.format, OutputFormat::Json);
        assert_eq!(cli.config().logging.level, LogLevel::Trace);
    }

    #[tokio::test]
    async fn test_execute_complete_keys() {
        let cli = cli_with(&["fig-generators", "--no-color", "complete", "opts", "a=1,"], SAMPLE);
        let out = cli.execute().await.unwrap();

        assert_eq!(
            out,
            "query: \nmode -> mode=  # run mode\nlevel -> level="
        );
    }

    #[tokio::test]
    async fn test_execute_complete_values_json() {
        let cli = cli_with(
            &["fig-generators", "--format", "json", "complete", "opts", "mode=f"],
            SAMPLE,
        );
        let out = cli.execute().await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["query"], "f");
        assert_eq!(value["suggestions"][0]["name"], "fast");
        assert_eq!(value["suggestions"][0]["insertValue"], "fast,");
    }

    #[tokio::test]
    async fn test_execute_query_and_trigger() {
        let cli = cli_with(&["fig-generators", "query", "opts", "a=1,le"], SAMPLE);
        assert_eq!(cli.execute().await.unwrap(), "le");

        let cli = cli_with(&["fig-generators", "trigger", "opts", "mode=", "mode"], SAMPLE);
        assert_eq!(cli.execute().await.unwrap(), "true");

        let cli = cli_with(&["fig-generators", "trigger", "opts", "mode=f", "mode="], SAMPLE);
        assert_eq!(cli.execute().await.unwrap(), "false");
    }

    #[tokio::test]
    async fn test_execute_unknown_generator() {
        let cli = cli_with(&["fig-generators", "complete", "nope"], SAMPLE);
        assert!(cli.execute().await.is_err());
    }

    #[tokio::test]
    async fn test_execute_list() {
        let cli = cli_with(&["fig-generators", "list"], SAMPLE);
        assert_eq!(cli.execute().await.unwrap(), "opts\tkey-value-list");

        let cli = cli_with(&["fig-generators", "list", "--names"], SAMPLE);
        assert_eq!(cli.execute().await.unwrap(), "opts");
    }

    #[tokio::test]
    async fn test_execute_config_validate() {
        let cli = cli_with(&["fig-generators", "config", "--validate"], SAMPLE);
        let out = cli.execute().await.unwrap();
        assert!(out.contains("Configuration is valid"));
    }

    fn write_config(tag: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "fig-generators-cli-{}-{}.toml",
            tag,
            std::process::id()
        ));
        std::fs::write(&path, content).unwrap();
        path
    }

    const EMPTY_SEPARATOR: &str = r#"
[generators.env]
kind = "key-value"
separator = ""
keys = ["HOME"]
"#;

    #[test]
    fn test_load_config_rejects_invalid_generators() {
        let path = write_config("invalid", EMPTY_SEPARATOR);
        let file = path.to_string_lossy().into_owned();

        let args =
            CliArgs::try_parse_from(["fig-generators", "-c", file.as_str(), "query", "env", "HOME"])
                .unwrap();
        let result = CliInterface::from_args(args);

        std::fs::remove_file(&path).unwrap();
        assert!(matches!(
            result,
            Err(crate::error::GeneratorError::Config(
                crate::error::ConfigError::InvalidValue { .. }
            ))
        ));
    }

    #[tokio::test]
    async fn test_config_validate_reports_invalid_generators() {
        let path = write_config("report", EMPTY_SEPARATOR);
        let file = path.to_string_lossy().into_owned();

        let args =
            CliArgs::try_parse_from(["fig-generators", "-c", file.as_str(), "config", "--validate"])
                .unwrap();
        let cli = CliInterface::from_args(args);

        std::fs::remove_file(&path).unwrap();
        let out = cli.unwrap().execute().await.unwrap();
        assert!(out.contains("Configuration validation failed"));
    }

    #[test]
    fn test_render_text_with_color() {
        let list: RichList = vec![Suggestion::new("a")].into();
        let out = render_suggestions("a", &list, OutputFormat::Text, true).unwrap();
        assert!(out.starts_with("query: a\n"));
        assert!(out.contains('\u{1b}'));
    }
}
