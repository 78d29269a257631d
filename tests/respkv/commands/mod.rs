mod command_dispatcher;
mod ping;
mod set;
