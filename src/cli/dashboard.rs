use anyhow::Result;

use crate::account::{AccountLedger, TransferEngine};
use crate::beneficiary::BeneficiaryRegistry;
use crate::cli::auth;
use crate::cli::utils::{confirm, print_balances, print_transactions, read_line};
use crate::config;
use crate::session::Session;
use crate::store::models::InternalAccount;
use crate::store::StateStore;

/// Run the interactive demo. The session lives exactly as long as this loop:
/// it starts logged out and is dropped on exit.
pub fn run(store: &dyn StateStore) -> Result<()> {
    let config = config::get_config();
    println!("{} v{}", config.app_name, config.version);
    println!("Everything here is simulated. No real money is involved.\n");

    let mut session = Session::new();

    loop {
        if !session.is_authenticated() {
            if !auth_menu(store, &mut session)? {
                break;
            }
        } else if !dashboard_menu(store, &mut session)? {
            break;
        }
    }

    Ok(())
}

/// Login / register chooser shown while logged out. Returns false to quit.
fn auth_menu(store: &dyn StateStore, session: &mut Session) -> Result<bool> {
    println!("1) Login");
    println!("2) Register");
    println!("3) Quit");

    match read_line("> ")?.as_str() {
        "1" => auth::login(store, session)?,
        "2" => auth::register(store, session)?,
        "3" => return Ok(false),
        _ => println!("Please choose 1, 2 or 3."),
    }

    Ok(true)
}

/// Main dashboard shown while logged in. Returns false to quit.
fn dashboard_menu(store: &dyn StateStore, session: &mut Session) -> Result<bool> {
    if let Some(user) = session.current_user() {
        println!("Logged in as {} <{}>", user.name, user.email);
    }
    println!("1) Account summary");
    println!("2) Transfer");
    println!("3) Beneficiaries");
    println!("4) Transaction history");
    println!("5) Logout");
    println!("6) Quit");

    match read_line("> ")?.as_str() {
        "1" => summary(store),
        "2" => transfer(store)?,
        "3" => beneficiaries(store)?,
        "4" => history(store),
        "5" => {
            session.logout();
            println!("Logged out successfully.");
        }
        "6" => return Ok(false),
        _ => println!("Please choose 1-6."),
    }

    Ok(true)
}

fn summary(store: &dyn StateStore) {
    let ledger = AccountLedger::new(store);
    print_balances(&ledger.balances());
}

fn history(store: &dyn StateStore) {
    let ledger = AccountLedger::new(store);
    print_transactions(&ledger.transactions());
}

/// The transfer form: pick a source, pick a destination, enter an amount
fn transfer(store: &dyn StateStore) -> Result<()> {
    let ledger = AccountLedger::new(store);
    let balances = ledger.balances();

    println!("From:");
    println!("1) Savings Account ({:.2})", balances.savings);
    println!("2) Checking Account ({:.2})", balances.checking);
    let from = match read_line("> ")?.as_str() {
        "1" => InternalAccount::Savings,
        "2" => InternalAccount::Checking,
        _ => {
            println!("Please choose 1 or 2.");
            return Ok(());
        }
    };

    let registry = BeneficiaryRegistry::new(store);
    let options = registry.transfer_targets();
    println!("To:");
    for (i, option) in options.iter().enumerate() {
        println!("{}) {}", i + 1, option.label);
    }
    let choice = read_line("> ")?;
    let target = match choice.parse::<usize>() {
        Ok(n) if (1..=options.len()).contains(&n) => &options[n - 1].target,
        _ => {
            println!("Please choose a listed destination.");
            return Ok(());
        }
    };

    let amount = read_line("Amount: $")?;

    let engine = TransferEngine::new(store);
    match engine.submit(from.as_str(), &target.to_string(), &amount) {
        Ok(outcome) => {
            println!("Transfer completed (simulated).");
            print_balances(&outcome.balances);
            print_transactions(&outcome.transactions);
        }
        // Surfaced to the user; nothing was applied
        Err(e) => println!("{}", e),
    }

    Ok(())
}

/// Beneficiary management: list, add, remove
fn beneficiaries(store: &dyn StateStore) -> Result<()> {
    let registry = BeneficiaryRegistry::new(store);

    let list = registry.list();
    if list.is_empty() {
        println!("\nNo beneficiaries yet.\n");
    } else {
        println!();
        for (i, b) in list.iter().enumerate() {
            println!("{}) {} - Account #{}", i + 1, b.name, b.account);
        }
        println!();
    }

    println!("1) Add beneficiary");
    println!("2) Remove beneficiary");
    println!("3) Back");

    match read_line("> ")?.as_str() {
        "1" => {
            let name = read_line("Enter beneficiary full name: ")?;
            let account = read_line("Enter beneficiary account number: ")?;
            match registry.add(&name, &account) {
                Ok(b) => println!("Added {} - Account #{}", b.name, b.account),
                Err(e) => println!("{}", e),
            }
        }
        "2" => {
            if list.is_empty() {
                println!("Nothing to remove.");
                return Ok(());
            }
            let choice = read_line("Remove which entry? ")?;
            let beneficiary = match choice.parse::<usize>() {
                Ok(n) if (1..=list.len()).contains(&n) => &list[n - 1],
                _ => {
                    println!("Please choose a listed entry.");
                    return Ok(());
                }
            };
            let confirmed = confirm("Remove this beneficiary?")?;
            match registry.remove(&beneficiary.id, confirmed) {
                Ok(removed) => println!("Removed {}", removed.name),
                Err(e) => println!("{}", e),
            }
        }
        "3" => {}
        _ => println!("Please choose 1, 2 or 3."),
    }

    Ok(())
}
