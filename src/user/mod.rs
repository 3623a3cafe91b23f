pub mod directory;

pub use directory::{NewUser, RegistrationError, UserDirectory};
