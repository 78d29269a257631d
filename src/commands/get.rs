use crate::{
    commands::command_error::CommandError, key_value_store::KeyValueStore, resp::RespValue,
};

/// Handles the GET command.
///
/// Returns the stored value unchanged, or the null bulk string when the key
/// is absent or its expiry has passed.
pub async fn get(
    store: &KeyValueStore,
    arguments: Vec<RespValue>,
) -> Result<RespValue, CommandError> {
    if arguments.len() != 1 {
        return Err(CommandError::InvalidGetCommand);
    }

    let value = store.get(&arguments[0]).await?;

    Ok(value.unwrap_or(RespValue::BulkString(None)))
}
