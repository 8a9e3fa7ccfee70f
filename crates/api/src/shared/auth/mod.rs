mod password;
mod policy;
mod route_guards;
mod token;

pub use password::{hash_password, verify_password};
pub use policy::{Permission, Policy};
pub use route_guards::protect_route;
pub use token::{create_token, decode_token};
