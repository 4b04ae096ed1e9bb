use anyhow::{bail, Error};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{FuzzySelect, Input, Select};
use tracing::error;

use crate::api::chain::RpcDialer;
use crate::api::keys::{generate_keys, resolve_addresses};
use crate::api::query::filter::SelectionCriteria;
use crate::api::query::BalanceQuery;
use crate::api::utils::print_pretty_dashboard;
use crate::config::general::Config;
use crate::config::wallet::{ledger_name, Ledger, LedgerDir};

const MENU_ITEMS: [&str; 4] = [
    "[ 1 ] Generate private keys",
    "[ 2 ] Derive addresses",
    "[ 3 ] Query balances",
    "[ 0 ] Exit",
];

/// Runs a blocking dialoguer prompt off the async runtime.
async fn prompt<T, F>(interaction: F) -> Result<T, Error>
where
    T: Send + 'static,
    F: FnOnce() -> dialoguer::Result<T> + Send + 'static,
{
    Ok(tokio::task::spawn_blocking(interaction).await??)
}

/// Main menu loop. Operation failures are logged and the menu comes back;
/// only prompt failures end the session.
pub async fn run(config: Config, criteria: SelectionCriteria) -> Result<(), Error> {
    let ledgers = LedgerDir::new(&config.general.ledger_dir);
    ledgers.ensure()?;

    loop {
        let choice = prompt(|| {
            FuzzySelect::with_theme(&ColorfulTheme::default())
                .with_prompt("Choose an option")
                .items(&MENU_ITEMS)
                .default(0)
                .interact()
        })
        .await?;

        let result = match choice {
            0 => {
                let ledger = choose_ledger(&ledgers).await?;
                let count = ask_key_count().await?;
                generate_keys(&ledger, count).map(|_| ()).map_err(Error::from)
            }
            1 => {
                let ledger = choose_ledger(&ledgers).await?;
                resolve_addresses(&ledger).map(|_| ()).map_err(Error::from)
            }
            2 => {
                let network_id = choose_network(&config).await?;
                let ledger = choose_ledger(&ledgers).await?;
                query_balances(&config, &network_id, &ledger, &criteria).await
            }
            _ => return Ok(()),
        };

        if let Err(err) = result {
            error!("{err:#}");
        }
    }
}

async fn query_balances(
    config: &Config,
    network_id: &str,
    ledger: &Ledger,
    criteria: &SelectionCriteria,
) -> Result<(), Error> {
    let dialer = RpcDialer;
    let query = BalanceQuery::from_config(&dialer, config, network_id)?;
    let report = match query.run(ledger, criteria).await {
        Ok(report) => report,
        Err(err) if err.is_fatal() => bail!("Balance run aborted: {err}"),
        Err(err) => return Err(err.into()),
    };

    if !report.outcomes.is_empty() {
        print_pretty_dashboard(&report.dashboard_title(), &report.dashboard_rows());
    }
    Ok(())
}

async fn choose_ledger(ledgers: &LedgerDir) -> Result<Ledger, Error> {
    let files = ledgers.scan();
    if files.is_empty() {
        let name = ask_ledger_name().await?;
        return Ok(ledgers.ledger(&name));
    }

    let mut items: Vec<String> = files.iter().map(|file| format!("📁 {file}")).collect();
    items.push("🆕 Enter a new name".to_string());

    let selected = prompt(move || {
        Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Choose a wallet ledger")
            .items(&items)
            .default(0)
            .interact()
    })
    .await?;

    let name = match files.get(selected) {
        Some(file) => ledger_name(file),
        None => ask_ledger_name().await?,
    };
    Ok(ledgers.ledger(&name))
}

async fn ask_ledger_name() -> Result<String, Error> {
    let name: String = prompt(|| {
        Input::with_theme(&ColorfulTheme::default())
            .with_prompt("New ledger name")
            .allow_empty(true)
            .validate_with(|name: &String| -> Result<(), &'static str> {
                if name.contains(['/', '\\']) {
                    Err("Ledger names cannot contain path separators")
                } else {
                    Ok(())
                }
            })
            .interact_text()
    })
    .await?;

    Ok(name.trim().to_string())
}

async fn ask_key_count() -> Result<usize, Error> {
    prompt(|| {
        Input::<usize>::with_theme(&ColorfulTheme::default())
            .with_prompt("Number of wallets to generate")
            .validate_with(|count: &usize| -> Result<(), &'static str> {
                if *count > 0 {
                    Ok(())
                } else {
                    Err("Enter a positive number")
                }
            })
            .interact_text()
    })
    .await
}

async fn choose_network(config: &Config) -> Result<String, Error> {
    let (ids, names): (Vec<String>, Vec<String>) = config
        .networks
        .iter()
        .map(|(id, profile)| {
            (
                id.clone(),
                format!("{} ({})", profile.native_name, id.to_uppercase()),
            )
        })
        .unzip();

    let selected = prompt(move || {
        Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Choose a network")
            .items(&names)
            .default(0)
            .interact()
    })
    .await?;

    Ok(ids[selected].clone())
}
