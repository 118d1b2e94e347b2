use clap::Parser;
use ledgerize_core::Account;
use std::path::PathBuf;

use crate::config::Config;
use crate::error::PipelineError;
use crate::pipeline;

#[derive(Parser, Debug)]
#[command(name = "ledgerize", about = "Convert bank statement exports into beancount entries.")]
pub struct Cli {
    /// The config file to use
    #[arg(long, default_value = "config.yaml")]
    pub config: PathBuf,
    /// The default beancount account for the statement transactions
    #[arg(short = 'a', long = "account")]
    pub account: Option<String>,
    /// Set logging to debug level
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Loads the config, applies command-line overrides and runs the conversion.
    pub fn run(&self) -> Result<usize, PipelineError> {
        let mut config = Config::load(&self.config)?;
        if let Some(account) = &self.account {
            config = config.with_default_account(Account::new(account));
        }
        tracing::debug!(?config, "resolved configuration");
        pipeline::run(&config)
    }
}
