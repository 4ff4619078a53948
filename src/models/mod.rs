pub mod catalog;
pub mod inventory;
pub mod price;
pub mod search;

pub use catalog::*;
pub use inventory::*;
pub use price::*;
pub use search::*;
