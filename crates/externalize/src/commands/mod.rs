pub mod check;
pub mod route;
pub mod version;
