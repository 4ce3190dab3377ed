mod auth;
mod catalog;
mod localized;
mod product;

pub use auth::*;
pub use catalog::*;
pub use localized::*;
pub use product::*;
