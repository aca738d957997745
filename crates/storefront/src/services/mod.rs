//! External collaborators and session-backed services.

pub mod cart;
pub mod mercadopago;

pub use cart::{CartStorage, CartStore, CartStoreError, SessionCartStorage};
pub use mercadopago::MercadoPagoClient;
