//! Page components, one per screen or region of the storefront.
//!
//! Each component holds a [`crate::driver::DriverHandle`] and nothing else;
//! components never depend on each other, and no component caches remote
//! state between operations.

pub mod auth;
pub mod cart;
pub mod contact;
pub mod home;
pub mod product;

pub use auth::{AuthPage, LoginOutcome, RegisterOutcome};
pub use cart::{CartLine, CartPage, OrderDetails};
pub use contact::{ContactMessage, ContactPage, ContactValidation};
pub use home::{Category, HomePage};
pub use product::{ProductDetails, ProductPage};
