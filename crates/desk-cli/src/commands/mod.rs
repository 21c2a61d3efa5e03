pub mod category;
pub mod dispatch;
pub mod menu;
pub mod scan;
pub mod schema;
pub mod shared;
pub mod ticket;
