use respkv::commands::CommandError;

use crate::test_utils::{TestEnv, TestUtils};

#[tokio::test]
async fn test_handle_ping_command() {
    let env = TestEnv::new_master_server();

    env.exec_command_success(
        TestUtils::ping_command(),
        &TestUtils::expected_simple_string("PONG"),
    )
    .await;
}

#[tokio::test]
async fn test_handle_ping_command_lowercase() {
    let env = TestEnv::new_master_server();

    env.exec_command_success(
        TestUtils::invalid_command(&["ping"]),
        &TestUtils::expected_simple_string("PONG"),
    )
    .await;
}

#[tokio::test]
async fn test_handle_ping_command_with_arguments() {
    let env = TestEnv::new_master_server();

    env.exec_command_error(
        TestUtils::invalid_command(&["PING", "extra"]),
        CommandError::InvalidPingCommand,
    )
    .await;
}
