use crate::{
    commands::{
        command_error::CommandError, echo::echo, get::get, info::info, ping::ping,
        replconf::replconf, set::set,
    },
    key_value_store::KeyValueStore,
    resp::RespValue,
    server::ReplicationInfo,
};

/// The command vocabulary. Names match case-insensitively; normalization
/// happens once, when the request is parsed into this tag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CommandName {
    Ping,
    Echo,
    Get,
    Set,
    Info,
    Replconf,
}

impl CommandName {
    fn parse(name: &str) -> Result<Self, CommandError> {
        match name.to_uppercase().as_str() {
            "PING" => Ok(CommandName::Ping),
            "ECHO" => Ok(CommandName::Echo),
            "GET" => Ok(CommandName::Get),
            "SET" => Ok(CommandName::Set),
            "INFO" => Ok(CommandName::Info),
            "REPLCONF" => Ok(CommandName::Replconf),
            _ => Err(CommandError::UnknownCommand(name.to_string())),
        }
    }
}

/// A request parsed into its command tag and untouched argument values.
#[derive(Debug)]
pub struct Command {
    name: CommandName,
    arguments: Vec<RespValue>,
}

impl Command {
    /// Parses a decoded request into a command.
    ///
    /// A request is a non-empty array whose first element is the textual
    /// command name; the remaining elements are handed to the command
    /// exactly as they arrived.
    pub fn parse(request: RespValue) -> Result<Self, CommandError> {
        let RespValue::Array(mut elements) = request else {
            return Err(CommandError::InvalidCommand);
        };

        if elements.is_empty() {
            return Err(CommandError::InvalidCommand);
        }

        let arguments = elements.split_off(1);
        let name = elements[0].as_text().ok_or(CommandError::InvalidCommand)?;
        let name = CommandName::parse(name)?;

        Ok(Self { name, arguments })
    }

    /// Runs the command against the store and replication state, producing
    /// the reply value.
    pub async fn execute(
        self,
        store: &KeyValueStore,
        replication: &ReplicationInfo,
    ) -> Result<RespValue, CommandError> {
        match self.name {
            CommandName::Ping => ping(self.arguments),
            CommandName::Echo => echo(self.arguments),
            CommandName::Get => get(store, self.arguments).await,
            CommandName::Set => set(store, self.arguments).await,
            CommandName::Info => info(replication, self.arguments),
            CommandName::Replconf => replconf(self.arguments),
        }
    }
}

/// Parses and runs one decoded request. Stateless across calls: the reply is
/// a function of the request, the store and the replication state alone.
pub async fn dispatch(
    request: RespValue,
    store: &KeyValueStore,
    replication: &ReplicationInfo,
) -> Result<RespValue, CommandError> {
    Command::parse(request)?.execute(store, replication).await
}
