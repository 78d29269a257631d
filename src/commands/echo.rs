use crate::{commands::command_error::CommandError, resp::RespValue};

/// Handles the ECHO command.
///
/// Echoes the single argument back as a bulk string. A bulk string argument
/// passes through unchanged (the null bulk string included); a simple string
/// is converted. Anything else cannot be echoed as a bulk string and is
/// rejected.
pub fn echo(mut arguments: Vec<RespValue>) -> Result<RespValue, CommandError> {
    if arguments.len() != 1 {
        return Err(CommandError::InvalidEchoCommand);
    }

    match arguments.remove(0) {
        RespValue::BulkString(message) => Ok(RespValue::BulkString(message)),
        RespValue::SimpleString(message) => Ok(RespValue::BulkString(Some(message))),
        _ => Err(CommandError::InvalidEchoCommand),
    }
}
