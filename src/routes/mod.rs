pub mod companies;
pub mod djs;
pub mod health;
