use crate::{commands::command_error::CommandError, resp::RespValue};

/// Handles the REPLCONF command.
///
/// Replicas send `REPLCONF <key> <value>` pairs while bootstrapping
/// (listening-port, capa). The configuration is acknowledged with `OK` and
/// nothing is persisted.
pub fn replconf(arguments: Vec<RespValue>) -> Result<RespValue, CommandError> {
    if arguments.len() != 2 {
        return Err(CommandError::InvalidReplconfCommand);
    }

    Ok(RespValue::SimpleString("OK".to_string()))
}
