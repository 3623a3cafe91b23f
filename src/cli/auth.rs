use anyhow::Result;
use log::debug;

use crate::cli::utils::{read_line, read_password};
use crate::session::Session;
use crate::store::StateStore;
use crate::user::{NewUser, UserDirectory};

/// Prompt for credentials and authenticate the session
pub fn login(store: &dyn StateStore, session: &mut Session) -> Result<()> {
    let email = read_line("Email: ")?;
    let password = read_password("Password: ")?;

    let directory = UserDirectory::new(store);
    match directory.find_user(&email, &password) {
        Some(user) => {
            session.login(&user);
            println!("Login Successful! (Simulated)");
        }
        None => {
            debug!("Login rejected for {}", email);
            println!("Simulated Login Failed: Invalid credentials.");
        }
    }

    Ok(())
}

/// Prompt for the registration form and create the user. A successful
/// registration logs the new user in directly.
pub fn register(store: &dyn StateStore, session: &mut Session) -> Result<()> {
    let name = read_line("Full name: ")?;
    let email = read_line("Email: ")?;
    let password = read_password("Password: ")?;
    let phone = read_line("Phone (optional): ")?;
    let account_type = read_line("Account type (savings/checking): ")?;

    let directory = UserDirectory::new(store);
    match directory.register(NewUser {
        name,
        email,
        password,
        phone,
        account_type,
    }) {
        Ok(user) => {
            session.login(&user);
            println!("Registration successful! You are now logged in (simulated).");
        }
        Err(e) => println!("{}", e),
    }

    Ok(())
}
