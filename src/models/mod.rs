pub mod request;
pub mod response;
pub mod stock;

pub use request::*;
pub use response::*;
pub use stock::*;
