use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "gcoin",
    about = "Green Coin: run account contract operations against a local ledger file",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// World-state file (created on first write)
    #[arg(long, global = true, default_value = "gcoin-state.json")]
    pub state: PathBuf,

    /// Contract configuration (TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enrollment id of the caller
    #[arg(long = "as", global = true, default_value = "admin")]
    pub caller: String,

    /// Caller affiliation (hf.Affiliation)
    #[arg(long, global = true)]
    pub affiliation: Option<String>,

    /// Extra attribute claims as name=value
    #[arg(long = "attr", global = true, value_parser = parse_attr)]
    pub attrs: Vec<(String, String)>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Check whether an account exists
    Exists(AccountArgs),
    /// Register an account with a zero balance
    Create(CreateArgs),
    /// Read an account you own
    Read(AccountArgs),
    /// Overwrite an account's stored value verbatim
    Update(UpdateArgs),
    /// Delete an account
    Delete(AccountArgs),
    /// List every account (needs searcher or every affiliation)
    ListAll,
    /// Mint coins into your own account (needs maker or every affiliation)
    Mint(MintArgs),
    /// Transfer coins from your account
    Transfer(TransferArgs),
    /// Invoke an operation by name with raw arguments
    Invoke(InvokeArgs),
    /// List the contract's operations
    Operations,
}

#[derive(Args)]
pub struct AccountArgs {
    pub account_id: String,
}

#[derive(Args)]
pub struct CreateArgs {
    pub account_id: String,
    pub owner: String,
}

#[derive(Args)]
pub struct UpdateArgs {
    pub account_id: String,
    pub value: String,
}

#[derive(Args)]
pub struct MintArgs {
    pub account_id: String,
    pub owner: String,
    #[arg(allow_negative_numbers = true)]
    pub amount: String,
}

#[derive(Args)]
pub struct TransferArgs {
    pub sender: String,
    pub receiver: String,
    pub receiver_owner: String,
    #[arg(allow_negative_numbers = true)]
    pub amount: String,
}

#[derive(Args)]
pub struct InvokeArgs {
    pub operation: String,
    #[arg(allow_hyphen_values = true)]
    pub args: Vec<String>,
}

fn parse_attr(text: &str) -> Result<(String, String), String> {
    let (name, value) = text
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got {text:?}"))?;
    if name.is_empty() {
        return Err(format!("attribute name missing in {text:?}"));
    }
    Ok((name.to_string(), value.to_string()))
}
