mod command_dispatcher;
mod command_error;
mod echo;
mod get;
mod info;
mod ping;
mod replconf;
mod set;

pub use command_dispatcher::dispatch;
pub use command_error::CommandError;
