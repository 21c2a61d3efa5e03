mod category;
mod ticket;

pub use category::CategoryCommands;
pub use ticket::TicketCommands;
