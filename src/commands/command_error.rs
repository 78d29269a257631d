use thiserror::Error;

use crate::key_value_store::StoreError;

#[derive(Error, Debug, PartialEq)]
pub enum CommandError {
    #[error("Invalid command")]
    InvalidCommand,
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
    #[error("Invalid PING command")]
    InvalidPingCommand,
    #[error("Invalid ECHO command")]
    InvalidEchoCommand,
    #[error("Invalid GET command")]
    InvalidGetCommand,
    #[error("Invalid SET command")]
    InvalidSetCommand,
    #[error("Unknown SET command option: {0}")]
    InvalidSetOption(String),
    #[error("Invalid SET command expiration")]
    InvalidSetExpiration,
    #[error("Invalid INFO command")]
    InvalidInfoCommand,
    #[error("Unknown INFO section: {0}")]
    InvalidInfoSection(String),
    #[error("Invalid REPLCONF command")]
    InvalidReplconfCommand,
    #[error("{0}")]
    Store(#[from] StoreError),
}
