use alloy::primitives::hex;
use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use colored::Colorize;
use tracing::{debug, error, info, warn};

use crate::config::wallet::{update_with_address, Ledger};
use crate::errors::WalletError;

/// A fresh random secp256k1 key as `0x`-prefixed lowercase hex.
pub fn generate_private_key() -> String {
    hex::encode_prefixed(PrivateKeySigner::random().to_bytes())
}

/// EIP-55 address for `private_key`, with or without a `0x` prefix.
pub fn derive_address(private_key: &str) -> Result<Address, WalletError> {
    let signer: PrivateKeySigner = private_key
        .trim()
        .parse()
        .map_err(|err| WalletError::Derivation {
            reason: format!("{err}"),
        })?;
    Ok(signer.address())
}

/// Appends `count` new keys to the ledger and returns them in order.
pub fn generate_keys(ledger: &Ledger, count: usize) -> Result<Vec<String>, WalletError> {
    let mut keys = Vec::with_capacity(count);

    for id in 1..=count {
        let private_key = generate_private_key();
        ledger.append(&private_key)?;
        info!("id: {id} private key: {private_key}");
        keys.push(private_key);
    }

    info!(
        "{}",
        format!("Generated {count} private keys -> {}", ledger.path().display()).green()
    );
    Ok(keys)
}

/// Fills in the address of every record that lacks one and saves the ledger
/// once at the end. Returns how many records were resolved.
pub fn resolve_addresses(ledger: &Ledger) -> Result<usize, WalletError> {
    let records = ledger.try_load()?;
    if records.is_empty() {
        warn!("No wallets found in {}", ledger.path().display());
        return Ok(0);
    }
    let total = records.len();
    let mut updated = records.clone();
    let mut resolved = 0;

    for (position, record) in records.iter().enumerate() {
        let id = position + 1;
        debug!("id: {id} record: {record}");

        if record.address().is_some() {
            continue;
        }

        match derive_address(record.private_key()) {
            Ok(address) => {
                updated = update_with_address(updated, record.private_key(), &address.to_string());
                info!("id: {id} address: {}", address.to_string().yellow());
                resolved += 1;
            }
            Err(err) => error!("id: {id} {err}"),
        }
    }

    ledger.save(&updated)?;
    info!(
        "{}",
        format!("Derived addresses for {total} wallets -> {}", ledger.path().display()).green()
    );
    Ok(resolved)
}
