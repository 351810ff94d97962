pub mod password;
pub mod validate;

pub use password::{hash_password, verify_password};
pub use validate::{ValidatedJson, ValidatedQuery};
