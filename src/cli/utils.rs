use anyhow::Result;
use std::io::{self, Write};

use crate::store::models::{Balances, Transaction};

/// Read a line of input from the terminal
pub fn read_line(prompt: &str) -> Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    // Trim whitespace and newlines
    Ok(input.trim().to_string())
}

/// Read a hidden line of input from the terminal (like a password)
pub fn read_password(prompt: &str) -> Result<String> {
    // For cross-platform password hiding we'd use a crate like 'rpassword',
    // but nothing here is secret: the whole login is simulated.
    read_line(prompt)
}

/// Ask a yes/no question, defaulting to no
pub fn confirm(prompt: &str) -> Result<bool> {
    let answer = read_line(&format!("{} [y/N]: ", prompt))?;
    Ok(answer.eq_ignore_ascii_case("y"))
}

/// Format a signed amount the way the history table shows it: debits in
/// parentheses, credits plain
pub fn format_amount(amount: f64) -> String {
    if amount < 0.0 {
        format!("(${:.2})", amount.abs())
    } else {
        format!("${:.2}", amount)
    }
}

/// Print the account summary
pub fn print_balances(balances: &Balances) {
    println!();
    println!("  Savings Account:  ${:.2}", balances.savings);
    println!("  Checking Account: ${:.2}", balances.checking);
    println!();
}

/// Print the transaction history, newest first
pub fn print_transactions(transactions: &[Transaction]) {
    if transactions.is_empty() {
        println!("\nNo transactions yet.\n");
        return;
    }

    println!();
    println!(
        "  {:<12} {:<10} {:<42} {:>12} {:<10}",
        "Date", "Type", "Description", "Amount", "Status"
    );
    for tx in transactions.iter().rev() {
        println!(
            "  {:<12} {:<10} {:<42} {:>12} {:<10}",
            tx.date,
            tx.transaction_type.as_str(),
            tx.description,
            format_amount(tx.amount),
            tx.status.as_str()
        );
    }
    println!();
}
