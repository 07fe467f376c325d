mod aggregate;
mod command;
mod event;
mod lookup;
mod password;
mod repository;
mod types;

pub use aggregate::*;
pub use command::*;
pub use event::*;
pub use lookup::*;
pub use password::*;
pub use repository::*;
pub use types::*;
