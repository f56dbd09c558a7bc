pub mod checkout;
pub mod health;
