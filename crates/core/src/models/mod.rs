pub mod identity;
pub mod quote;
pub mod reference;
pub mod settings;
pub mod stock;
pub mod view_state;
