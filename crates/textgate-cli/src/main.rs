//! `textgate` - validate untrusted text against a rule set from the
//! command line, optionally consulting a model oracle over HTTP.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;
use textgate_core::{validate, Oracle, RuleSet, Verdict};
use textgate_runtime::{HttpOracle, HttpOracleConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "textgate", version, about = "Content validation gate for RAG pipelines")]
struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    json: bool,

    #[arg(long, global = true, help = "Rule set YAML file (built-in seed rules when omitted)")]
    rules: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate content given as an argument, from a file, or from stdin
    Check {
        /// Content to validate; reads stdin when neither this nor --file is given
        content: Option<String>,

        #[arg(long, conflicts_with = "content", help = "Read content from a file")]
        file: Option<PathBuf>,

        #[arg(long, help = "Model server endpoint for the oracle stage (skipped when omitted)")]
        oracle_url: Option<String>,

        #[arg(long, default_value_t = 30, help = "Oracle request timeout in seconds")]
        oracle_timeout: u64,
    },
    /// Print the effective rule set as YAML
    Rules,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let rules = match &cli.rules {
        Some(path) => RuleSet::from_yaml_file(path)
            .with_context(|| format!("failed to load rules from {}", path.display()))?,
        None => RuleSet::default(),
    };
    tracing::debug!(
        forbidden_words = rules.forbidden_words().len(),
        patterns = rules.sensitive_patterns().len(),
        max_content_length = rules.max_content_length(),
        "rule set loaded"
    );

    match cli.command {
        Commands::Check {
            content,
            file,
            oracle_url,
            oracle_timeout,
        } => {
            let content = read_content(content, file)?;

            let oracle = oracle_url
                .map(|endpoint| {
                    HttpOracle::new(HttpOracleConfig {
                        endpoint,
                        timeout: Duration::from_secs(oracle_timeout),
                        ..Default::default()
                    })
                })
                .transpose()
                .context("failed to build HTTP oracle")?;

            let verdict = validate(
                &rules,
                &content,
                oracle.as_ref().map(|o| o as &dyn Oracle),
            );
            report(&verdict, cli.json)?;

            if !verdict.is_valid() {
                std::process::exit(1);
            }
        }
        Commands::Rules => {
            print!("{}", rules.to_yaml().context("failed to render rules")?);
        }
    }

    Ok(())
}

fn read_content(arg: Option<String>, file: Option<PathBuf>) -> Result<String> {
    if let Some(content) = arg {
        return Ok(content);
    }
    if let Some(path) = file {
        return std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()));
    }
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("failed to read stdin")?;
    Ok(buf)
}

fn report(verdict: &Verdict, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(verdict)?);
    } else if verdict.is_valid() {
        println!("PASS");
    } else {
        println!("REJECT: {}", verdict.reason());
    }
    Ok(())
}
