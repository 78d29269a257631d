use crate::{
    commands::command_error::CommandError, resp::RespValue, server::ReplicationInfo,
};

/// Handles the INFO command.
///
/// Only the `replication` section exists; with no argument that section is
/// what you get. The section body is wrapped in a bulk string.
pub fn info(
    replication: &ReplicationInfo,
    arguments: Vec<RespValue>,
) -> Result<RespValue, CommandError> {
    if arguments.len() > 1 {
        return Err(CommandError::InvalidInfoCommand);
    }

    if let Some(section) = arguments.first() {
        let section = section.as_text().ok_or(CommandError::InvalidInfoCommand)?;

        if !section.eq_ignore_ascii_case("replication") {
            return Err(CommandError::InvalidInfoSection(section.to_string()));
        }
    }

    Ok(RespValue::BulkString(Some(
        replication.replication_section(),
    )))
}
