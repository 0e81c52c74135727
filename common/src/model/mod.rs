pub mod manager;
pub mod phone;
