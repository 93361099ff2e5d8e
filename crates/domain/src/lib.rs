#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod aggregate;
mod cache;
mod error;
mod filter;
mod load;
mod name;
mod table;
mod workout;

pub use aggregate::*;
pub use cache::*;
pub use error::*;
pub use filter::*;
pub use load::*;
pub use name::*;
pub use table::*;
pub use workout::*;
