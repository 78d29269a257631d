use respkv::{commands::CommandError, key_value_store::StoreError, resp::RespValue};

use crate::test_utils::{TestEnv, TestUtils};

#[tokio::test]
async fn test_handle_set_command() {
    let env = TestEnv::new_master_server();

    env.exec_command_success(
        TestUtils::set_command("strawberry", "apple"),
        &TestUtils::expected_simple_string("OK"),
    )
    .await;

    assert_eq!(env.store.len().await, 1);
}

#[tokio::test]
async fn test_handle_set_command_overwrites_previous_value() {
    let env = TestEnv::new_master_server();

    env.exec_command_success(
        TestUtils::set_command("strawberry", "apple"),
        &TestUtils::expected_simple_string("OK"),
    )
    .await;
    env.exec_command_success(
        TestUtils::set_command("strawberry", "banana"),
        &TestUtils::expected_simple_string("OK"),
    )
    .await;

    env.exec_command_success(
        TestUtils::get_command("strawberry"),
        &TestUtils::expected_bulk_string("banana"),
    )
    .await;
    assert_eq!(env.store.len().await, 1);
}

#[tokio::test]
async fn test_handle_set_command_with_expiration() {
    let env = TestEnv::new_master_server();

    env.exec_command_success(
        TestUtils::set_command_with_expiration("strawberry", "apple", 100),
        &TestUtils::expected_simple_string("OK"),
    )
    .await;
    env.exec_command_success(
        TestUtils::get_command("strawberry"),
        &TestUtils::expected_bulk_string("apple"),
    )
    .await;

    TestUtils::sleep_ms(150).await;

    env.exec_command_success(
        TestUtils::get_command("strawberry"),
        &TestUtils::expected_null(),
    )
    .await;
}

#[tokio::test]
async fn test_handle_set_command_expiration_option_is_case_insensitive() {
    let env = TestEnv::new_master_server();

    env.exec_command_success(
        TestUtils::invalid_command(&["SET", "strawberry", "apple", "PX", "100"]),
        &TestUtils::expected_simple_string("OK"),
    )
    .await;
}

#[tokio::test]
async fn test_handle_set_command_invalid() {
    let env = TestEnv::new_master_server();

    let test_cases = vec![
        (
            TestUtils::invalid_command(&["SET"]),
            CommandError::InvalidSetCommand,
        ),
        (
            TestUtils::invalid_command(&["SET", "strawberry"]),
            CommandError::InvalidSetCommand,
        ),
        (
            TestUtils::invalid_command(&["SET", "strawberry", "apple", "keepttl"]),
            CommandError::InvalidSetOption("keepttl".to_string()),
        ),
        (
            TestUtils::invalid_command(&["SET", "strawberry", "apple", "px"]),
            CommandError::InvalidSetExpiration,
        ),
        (
            TestUtils::invalid_command(&["SET", "strawberry", "apple", "px", "soon"]),
            CommandError::InvalidSetExpiration,
        ),
    ];

    for (command, expected_error) in test_cases {
        env.exec_command_error(command, expected_error).await;
    }
}

#[tokio::test]
async fn test_handle_set_command_rejects_non_textual_key() {
    let env = TestEnv::new_master_server();

    let command = RespValue::Array(vec![
        RespValue::BulkString(Some("SET".to_string())),
        RespValue::Array(vec![]),
        RespValue::BulkString(Some("apple".to_string())),
    ]);

    env.exec_command_error(command, CommandError::Store(StoreError::InvalidKeyType))
        .await;
}
