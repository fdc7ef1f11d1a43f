//! src/routes/mod.rs

mod health_check;
mod home;
mod send_email;

pub use health_check::*;
pub use home::*;
pub use send_email::*;
