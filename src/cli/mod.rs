pub mod country;
pub mod health;
pub mod rates;
pub mod setup;
pub mod top;
pub mod ui;
