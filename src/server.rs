use std::sync::Arc;

use thiserror::Error;
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, info, warn};

use crate::{connection::handle_connection, handshake, key_value_store::KeyValueStore};

const REPLICATION_ID: &str = "8371b4fb1155b71f4a04d3e1bc3e18c4a990aeeb";

#[derive(Error, Debug, PartialEq)]
pub enum CliError {
    #[error("Invalid command line flag")]
    InvalidCommandLineFlag,
    #[error("Invalid command line flag value")]
    InvalidCommandLineFlagValue,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Role {
    Master,
    Replica,
}

impl Role {
    /// The role name as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Master => "master",
            Role::Replica => "slave",
        }
    }
}

/// Replication identity of this instance. Written once at startup, before
/// any connection is served, and read-only afterwards; shared without a lock.
#[derive(Debug)]
pub struct ReplicationInfo {
    pub role: Role,
    pub replid: String,
    pub repl_offset: u64,
}

impl ReplicationInfo {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            replid: REPLICATION_ID.to_string(),
            repl_offset: 0,
        }
    }

    /// The `replication` INFO section: `key:value` lines joined by newline.
    /// The replication id and offset only exist on a master.
    pub fn replication_section(&self) -> String {
        let mut lines = vec![format!("role:{}", self.role.as_str())];

        if self.role == Role::Master {
            lines.push(format!("master_replid:{}", self.replid));
            lines.push(format!("master_repl_offset:{}", self.repl_offset));
        }

        lines.join("\n")
    }
}

#[derive(Debug)]
pub struct Server {
    pub port: u16,
    pub replica_of: Option<(String, u16)>,
}

impl Server {
    /// Builds a server from command line arguments (the first is skipped as
    /// the program name): `--port <port>` and `--replicaof "<host> <port>"`.
    pub fn new<I: IntoIterator<Item = String>>(command_line_args: I) -> Result<Self, CliError> {
        let mut iter = command_line_args.into_iter().skip(1);
        let mut port: Option<u16> = None;
        let mut replica_of: Option<(String, u16)> = None;

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--port" => {
                    let Some(port_str) = iter.next() else {
                        return Err(CliError::InvalidCommandLineFlagValue);
                    };

                    let port_number = port_str
                        .parse::<u16>()
                        .map_err(|_| CliError::InvalidCommandLineFlagValue)?;

                    port = Some(port_number);
                }
                "--replicaof" => {
                    let Some(master) = iter.next() else {
                        return Err(CliError::InvalidCommandLineFlagValue);
                    };

                    let mut parts = master.split_whitespace();
                    let (Some(host), Some(port_str), None) =
                        (parts.next(), parts.next(), parts.next())
                    else {
                        return Err(CliError::InvalidCommandLineFlagValue);
                    };

                    let master_port = port_str
                        .parse::<u16>()
                        .map_err(|_| CliError::InvalidCommandLineFlagValue)?;

                    replica_of = Some((host.to_string(), master_port));
                }
                _ => return Err(CliError::InvalidCommandLineFlag),
            }
        }

        Ok(Server {
            port: port.unwrap_or(6379),
            replica_of,
        })
    }

    pub fn role(&self) -> Role {
        if self.replica_of.is_some() {
            Role::Replica
        } else {
            Role::Master
        }
    }

    /// Bootstraps against the master when configured as a replica, then
    /// binds and serves clients, one task per connection.
    ///
    /// A bootstrap failure propagates out and nothing is ever bound: a
    /// half-announced replica must not serve traffic.
    pub async fn run(self) -> anyhow::Result<()> {
        let store = Arc::new(KeyValueStore::new());
        let replication = Arc::new(ReplicationInfo::new(self.role()));

        if let Some((host, master_port)) = &self.replica_of {
            let mut stream = TcpStream::connect((host.as_str(), *master_port)).await?;
            handshake::perform(&mut stream, self.port).await?;
            info!("bootstrapped as replica of {}:{}", host, master_port);
        }

        let address = format!("127.0.0.1:{}", self.port);
        let listener = TcpListener::bind(&address).await?;
        info!("listening on {} as {}", address, self.role().as_str());

        loop {
            // A failed accept (e.g. out of file descriptors) only loses that
            // one connection; the listener keeps serving.
            let (stream, peer_address) = match listener.accept().await {
                Ok(accepted) => accepted,
                Err(error) => {
                    warn!("failed to accept connection: {}", error);
                    continue;
                }
            };
            debug!("accepted connection from {}", peer_address);

            let store = Arc::clone(&store);
            let replication = Arc::clone(&replication);

            tokio::spawn(async move {
                handle_connection(stream, store, replication).await;
            });
        }
    }
}
