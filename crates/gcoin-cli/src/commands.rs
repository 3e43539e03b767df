use colored::Colorize;
use gcoin_auth::ClientIdentity;
use gcoin_contract::{AccountContract, ContractConfig, ContractHost, Operation, Response, OPERATIONS};
use serde_json::Value;
use tracing::debug;

use crate::cli::*;
use crate::state;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let (name, args): (&str, Vec<String>) = match &cli.command {
        Command::Operations => return cmd_operations(&cli.format),
        Command::Exists(a) => ("exists", vec![a.account_id.clone()]),
        Command::Create(a) => ("create", vec![a.account_id.clone(), a.owner.clone()]),
        Command::Read(a) => ("read", vec![a.account_id.clone()]),
        Command::Update(a) => ("update", vec![a.account_id.clone(), a.value.clone()]),
        Command::Delete(a) => ("delete", vec![a.account_id.clone()]),
        Command::ListAll => ("list_all", Vec::new()),
        Command::Mint(a) => (
            "mint",
            vec![a.account_id.clone(), a.owner.clone(), a.amount.clone()],
        ),
        Command::Transfer(a) => (
            "transfer",
            vec![
                a.sender.clone(),
                a.receiver.clone(),
                a.receiver_owner.clone(),
                a.amount.clone(),
            ],
        ),
        Command::Invoke(a) => (a.operation.as_str(), a.args.clone()),
    };
    let identity = cli_identity(&cli.caller, cli.affiliation.as_deref(), &cli.attrs);
    invoke(&identity, name, args, &cli)
}

fn cli_identity(
    caller: &str,
    affiliation: Option<&str>,
    attrs: &[(String, String)],
) -> ClientIdentity {
    let mut identity = ClientIdentity::new(caller);
    if let Some(affiliation) = affiliation {
        identity = identity.with_affiliation(affiliation);
    }
    for (name, value) in attrs {
        identity = identity.with_attribute(name.as_str(), value.as_str());
    }
    identity
}

fn invoke(
    identity: &ClientIdentity,
    name: &str,
    args: Vec<String>,
    cli: &Cli,
) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => ContractConfig::load(path)?,
        None => ContractConfig::default(),
    };
    let store = state::load(&cli.state)?;
    let host = ContractHost::new(store, AccountContract::new(config));

    let response = host.invoke(identity, name, &args)?;
    if response.writes > 0 {
        state::save(&cli.state, host.store())?;
        debug!(path = %cli.state.display(), writes = response.writes, "state saved");
    }
    print_response(&response, &cli.format)
}

fn print_response(response: &Response, format: &OutputFormat) -> anyhow::Result<()> {
    if let OutputFormat::Json = format {
        println!("{}", serde_json::to_string_pretty(response)?);
        return Ok(());
    }
    match (response.operation, &response.payload) {
        (Operation::Exists, Value::Bool(true)) => println!("{}", "exists".green()),
        (Operation::Exists, _) => println!("{}", "does not exist".yellow()),
        (Operation::Read, payload) => {
            let owner = payload["ownerEnrollmentId"].as_str().unwrap_or("?");
            println!("Owner:   {}", owner.cyan());
            println!("Balance: {}", payload["balance"].to_string().bold());
        }
        (Operation::ListAll, Value::Array(entries)) => {
            if entries.is_empty() {
                println!("No accounts.");
            }
            for entry in entries {
                let key = entry["Key"].as_str().unwrap_or("?");
                println!("{}  {}", key.yellow(), entry["Record"]);
            }
        }
        (_, Value::String(status)) => println!("{} {}", "✓".green().bold(), status),
        _ => println!("{} done ({} writes)", "✓".green().bold(), response.writes),
    }
    println!("  tx: {}", response.tx_id.to_string().dimmed());
    Ok(())
}

fn cmd_operations(format: &OutputFormat) -> anyhow::Result<()> {
    if let OutputFormat::Json = format {
        println!("{}", serde_json::to_string_pretty(OPERATIONS)?);
        return Ok(());
    }
    for op in OPERATIONS {
        let kind = if op.mutates { "write".red() } else { "read".green() };
        println!(
            "{:<10} {:<6} ({}) {}",
            op.name.bold(),
            kind,
            op.params.join(", "),
            op.summary.dimmed()
        );
    }
    Ok(())
}
