use log::{debug, info, warn};
use thiserror::Error;

use crate::config;
use crate::store::models::User;
use crate::store::StateStore;

/// Registration error types
#[derive(Debug, Error, PartialEq)]
pub enum RegistrationError {
    #[error("Please fill in all required fields to register: {0} is missing")]
    MissingField(&'static str),

    #[error("An account with this email already exists")]
    DuplicateEmail,
}

/// Registration form input. Phone is optional; everything else is required.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub account_type: String,
}

/// The locally stored directory of registered users, keyed by email.
pub struct UserDirectory<'a> {
    store: &'a dyn StateStore,
}

impl<'a> UserDirectory<'a> {
    pub fn new(store: &'a dyn StateStore) -> Self {
        Self { store }
    }

    /// Look up a user by credentials. Emails compare case-insensitively.
    /// The configured demo credentials always match, whatever the stored
    /// directory contains.
    pub fn find_user(&self, email: &str, password: &str) -> Option<User> {
        let email = email.trim().to_lowercase();
        let users = self.store.load_users();

        if let Some(user) = users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(&email) && u.password == password)
        {
            debug!("Credentials matched stored user {}", user.email);
            return Some(user.clone());
        }

        let demo = config::get_config().demo;
        if email == demo.fallback_email.to_lowercase() && password == demo.fallback_password {
            debug!("Credentials matched the demo fallback account");
            return Some(User {
                name: "Test User".to_string(),
                email: demo.fallback_email.to_lowercase(),
                password: demo.fallback_password,
                phone: String::new(),
                account_type: "checking".to_string(),
            });
        }

        None
    }

    /// Register a new user. Fails on empty required fields or a duplicate
    /// email (case-insensitive). The updated directory is persisted; a write
    /// failure is logged and swallowed, and registration still succeeds.
    pub fn register(&self, new_user: NewUser) -> Result<User, RegistrationError> {
        let name = new_user.name.trim();
        if name.is_empty() {
            return Err(RegistrationError::MissingField("name"));
        }
        let email = new_user.email.trim().to_lowercase();
        if email.is_empty() {
            return Err(RegistrationError::MissingField("email"));
        }
        if new_user.password.is_empty() {
            return Err(RegistrationError::MissingField("password"));
        }
        let account_type = new_user.account_type.trim();
        if account_type.is_empty() {
            return Err(RegistrationError::MissingField("account type"));
        }

        let mut users = self.store.load_users();
        if users.iter().any(|u| u.email.eq_ignore_ascii_case(&email)) {
            return Err(RegistrationError::DuplicateEmail);
        }

        let user = User {
            name: name.to_string(),
            email,
            password: new_user.password,
            phone: new_user.phone.trim().to_string(),
            account_type: account_type.to_string(),
        };
        users.push(user.clone());

        if let Err(e) = self.store.save_users(&users) {
            warn!("Could not persist the user directory: {}", e);
        }

        info!("User registered: {}", user.email);
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{JsonFileStore, MockStateStore, StoreError};
    use test_case::test_case;
    use tempfile::TempDir;

    fn setup_store() -> (JsonFileStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(temp_dir.path()).unwrap();
        (store, temp_dir)
    }

    fn sample_user() -> NewUser {
        NewUser {
            name: "Ada Lovelace".to_string(),
            email: "Ada@Example.com".to_string(),
            password: "correct horse".to_string(),
            phone: "555-0100".to_string(),
            account_type: "savings".to_string(),
        }
    }

    #[test]
    fn test_register_then_find() {
        let (store, _temp_dir) = setup_store();
        let directory = UserDirectory::new(&store);

        let user = directory.register(sample_user()).unwrap();
        assert_eq!(user.email, "ada@example.com");

        let found = directory.find_user("ada@example.com", "correct horse").unwrap();
        assert_eq!(found, user);

        // Email lookup is case-insensitive
        assert!(directory.find_user("ADA@EXAMPLE.COM", "correct horse").is_some());
        // Passwords are not
        assert!(directory.find_user("ada@example.com", "Correct Horse").is_none());
    }

    #[test]
    fn test_duplicate_email_differs_only_by_case() {
        let (store, _temp_dir) = setup_store();
        let directory = UserDirectory::new(&store);

        directory.register(sample_user()).unwrap();

        let mut duplicate = sample_user();
        duplicate.email = "aDa@eXample.Com".to_string();
        assert_eq!(
            directory.register(duplicate),
            Err(RegistrationError::DuplicateEmail)
        );

        // The directory is unchanged
        assert_eq!(store.load_users().len(), 1);
    }

    #[test]
    fn test_fallback_login_with_empty_directory() {
        let (store, _temp_dir) = setup_store();
        let directory = UserDirectory::new(&store);

        assert!(store.load_users().is_empty());
        let user = directory.find_user("test@user.com", "password").unwrap();
        assert_eq!(user.email, "test@user.com");

        assert!(directory.find_user("test@user.com", "wrong").is_none());
    }

    #[test]
    fn test_fallback_still_works_with_populated_directory() {
        let (store, _temp_dir) = setup_store();
        let directory = UserDirectory::new(&store);

        directory.register(sample_user()).unwrap();
        assert!(directory.find_user("test@user.com", "password").is_some());
    }

    #[test_case("name"; "missing name")]
    #[test_case("email"; "missing email")]
    #[test_case("password"; "missing password")]
    #[test_case("account type"; "missing account type")]
    fn test_required_fields(field: &'static str) {
        let (store, _temp_dir) = setup_store();
        let directory = UserDirectory::new(&store);

        let mut new_user = sample_user();
        match field {
            "name" => new_user.name = "  ".to_string(),
            "email" => new_user.email = String::new(),
            "password" => new_user.password = String::new(),
            "account type" => new_user.account_type = String::new(),
            _ => unreachable!(),
        }

        assert_eq!(
            directory.register(new_user),
            Err(RegistrationError::MissingField(field))
        );
        assert!(store.load_users().is_empty());
    }

    #[test]
    fn test_phone_is_optional() {
        let (store, _temp_dir) = setup_store();
        let directory = UserDirectory::new(&store);

        let mut new_user = sample_user();
        new_user.phone = String::new();
        assert!(directory.register(new_user).is_ok());
    }

    #[test]
    fn test_write_failure_is_swallowed() {
        let mut store = MockStateStore::new();
        store.expect_load_users().returning(Vec::new);
        store.expect_save_users().returning(|_| {
            Err(StoreError::Unavailable(std::io::Error::new(
                std::io::ErrorKind::Other,
                "disk full",
            )))
        });

        let directory = UserDirectory::new(&store);
        // Registration proceeds as if the write succeeded
        let user = directory.register(sample_user()).unwrap();
        assert_eq!(user.email, "ada@example.com");
    }
}
