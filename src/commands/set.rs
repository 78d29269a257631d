use std::time::Duration;

use crate::{
    commands::command_error::CommandError, key_value_store::KeyValueStore, resp::RespValue,
};

/// Parsed arguments for the SET command.
pub struct SetArguments {
    /// The key to store under
    key: RespValue,
    /// The value to be stored, kept exactly as it arrived
    value: RespValue,
    /// How long the entry stays visible, when the PX option is given
    expiry: Option<Duration>,
}

impl SetArguments {
    /// Parses `SET key value [PX milliseconds]`.
    ///
    /// Options after key and value are scanned in order. `PX` matches
    /// case-insensitively and takes a non-negative integer count of
    /// milliseconds; an option outside the vocabulary is rejected rather
    /// than skipped.
    fn parse(mut arguments: Vec<RespValue>) -> Result<Self, CommandError> {
        if arguments.len() < 2 {
            return Err(CommandError::InvalidSetCommand);
        }

        let options = arguments.split_off(2);
        let value = arguments.remove(1);
        let key = arguments.remove(0);

        let mut expiry: Option<Duration> = None;
        let mut options = options.iter();

        while let Some(option) = options.next() {
            let name = option.as_text().ok_or(CommandError::InvalidSetCommand)?;

            match name.to_lowercase().as_str() {
                "px" => {
                    let milliseconds = options
                        .next()
                        .and_then(RespValue::as_text)
                        .ok_or(CommandError::InvalidSetExpiration)?;
                    let milliseconds = milliseconds
                        .parse::<u64>()
                        .map_err(|_| CommandError::InvalidSetExpiration)?;

                    expiry = Some(Duration::from_millis(milliseconds));
                }
                _ => return Err(CommandError::InvalidSetOption(name.to_string())),
            }
        }

        Ok(Self { key, value, expiry })
    }
}

/// Handles the SET command.
///
/// Stores the value under the key, replacing any previous entry, and
/// replies `OK`. With `PX <milliseconds>` the entry expires that long from
/// now.
pub async fn set(
    store: &KeyValueStore,
    arguments: Vec<RespValue>,
) -> Result<RespValue, CommandError> {
    let set_arguments = SetArguments::parse(arguments)?;

    store
        .set(
            &set_arguments.key,
            set_arguments.value,
            set_arguments.expiry,
        )
        .await?;

    Ok(RespValue::SimpleString("OK".to_string()))
}
