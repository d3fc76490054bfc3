pub mod alert;
pub mod card;
pub mod collection;
pub mod deck;
pub mod preferences;
pub mod team;

pub use alert::*;
pub use card::*;
pub use collection::*;
pub use deck::*;
pub use preferences::*;
pub use team::*;
