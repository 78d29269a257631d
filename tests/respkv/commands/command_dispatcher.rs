use respkv::{commands::CommandError, resp::RespValue};

use crate::test_utils::{TestEnv, TestUtils};

#[tokio::test]
async fn test_dispatch_unknown_command() {
    let env = TestEnv::new_master_server();

    env.exec_command_error(
        TestUtils::invalid_command(&["FOOO"]),
        CommandError::UnknownCommand("FOOO".to_string()),
    )
    .await;
}

#[tokio::test]
async fn test_dispatch_unknown_command_reports_name_as_sent() {
    let env = TestEnv::new_master_server();

    env.exec_command_error(
        TestUtils::invalid_command(&["foobar"]),
        CommandError::UnknownCommand("foobar".to_string()),
    )
    .await;
}

#[tokio::test]
async fn test_dispatch_command_name_case_insensitive() {
    let env = TestEnv::new_master_server();

    let test_cases = vec![
        (
            TestUtils::invalid_command(&["ping"]),
            TestUtils::expected_simple_string("PONG"),
        ),
        (
            TestUtils::invalid_command(&["Echo", "hi"]),
            TestUtils::expected_bulk_string("hi"),
        ),
        (
            TestUtils::invalid_command(&["set", "grape", "apple"]),
            TestUtils::expected_simple_string("OK"),
        ),
        (
            TestUtils::invalid_command(&["get", "grape"]),
            TestUtils::expected_bulk_string("apple"),
        ),
    ];

    for (command, expected_response) in test_cases {
        env.exec_command_success(command, &expected_response).await;
    }
}

#[tokio::test]
async fn test_dispatch_rejects_malformed_requests() {
    let env = TestEnv::new_master_server();

    let test_cases = vec![
        RespValue::SimpleString("PING".to_string()),
        RespValue::BulkString(Some("PING".to_string())),
        RespValue::Array(vec![]),
        RespValue::Array(vec![RespValue::Array(vec![])]),
    ];

    for command in test_cases {
        env.exec_command_error(command, CommandError::InvalidCommand)
            .await;
    }
}
