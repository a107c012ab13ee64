//! Typed entity records.
//!
//! Every record persisted by the entity store has a statically defined
//! shape, validated at the storage boundary. Wire names are camelCase to
//! match the JSON surface consumed by the presentation layer.
//!
//! - [`Category`] - catalog tree nodes, rarely mutated
//! - [`Product`] - the read-heavy catalog records
//! - [`User`] - account records; authentication itself lives elsewhere
//! - [`CartItem`] - cart line items, active or saved-for-later

pub mod cart_item;
pub mod category;
pub mod product;
pub mod user;

pub use cart_item::{CartItem, CartItemWithProduct, NewCartItem};
pub use category::{Category, NewCategory};
pub use product::{NewProduct, Product, ProductPatch, ProductValidationError};
pub use user::{NewUser, User};
