//! Logger behaviour through real handlers.

use std::fmt;
use std::time::Duration;

use ctxlog::{kv, with_default_attrs, with_group, with_level, Attr, Level, LogError, BAD_KEY};
use serde_json::json;

mod common;

#[derive(Debug)]
struct CustomError {
    msg: String,
}

impl fmt::Display for CustomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.msg)
    }
}

impl std::error::Error for CustomError {}

#[test]
fn test_basic_logging() {
    let (logger, buf) = common::json_logger(vec![]);
    logger.info("Test message", kv!["key", "value"]);

    let lines = buf.json_lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["msg"], "Test message");
    assert_eq!(lines[0]["key"], "value");
    assert_eq!(lines[0]["level"], "INFO");
}

#[test]
fn test_with_fields_round_trip() {
    let (logger, buf) = common::json_logger(vec![]);
    logger.with(kv!["user_id", 123]).info("msg", kv![]);

    let out = buf.contents();
    assert!(out.contains("\"msg\""));
    assert!(out.contains("\"user_id\":123"));
}

#[test]
fn test_with_calls_concatenate_in_order() {
    let (logger, buf) = common::json_logger(vec![with_default_attrs(kv!["root", true])]);
    let child = logger
        .with(kv!["user_id", 123, "action", "login"])
        .with(kv!["attempt", 2]);

    assert_eq!(
        child.default_attrs(),
        &[
            Attr::new("root", true),
            Attr::new("user_id", 123),
            Attr::new("action", "login"),
            Attr::new("attempt", 2),
        ]
    );

    child.info("User action", kv!["extra", "call"]);
    assert_eq!(
        buf.contents(),
        "{\"level\":\"INFO\",\"msg\":\"User action\",\"root\":true,\"user_id\":123,\"action\":\"login\",\"attempt\":2,\"extra\":\"call\"}\n"
    );
}

#[test]
fn test_group_nests_fields() {
    let (logger, buf) = common::json_logger(vec![]);
    logger.group("svc").with(kv!["id", 1]).info("x", kv![]);

    let lines = buf.json_lines();
    assert_eq!(lines[0]["svc"], json!({"id": 1}));
}

#[test]
fn test_repeated_groups_nest_dot_joined() {
    let (logger, buf) = common::json_logger(vec![]);
    let nested = logger.group("a").group("b");
    assert_eq!(nested.group_prefix().as_deref(), Some("a.b"));

    nested.with(kv!["k", "v"]).info("x", kv!["n", 1]);
    assert_eq!(buf.json_lines()[0]["a"], json!({"b": {"k": "v", "n": 1}}));

    let (text, text_buf) = common::text_logger(vec![]);
    text.group("a").group("b").info("x", kv!["k", "v"]);
    assert_eq!(text_buf.contents(), "level=INFO msg=x a.b.k=v\n");
}

#[test]
fn test_level_filtering() {
    let (logger, buf) = common::json_logger(vec![with_level(Level::Warn)]);
    logger.debug("hidden", kv![]);
    logger.info("hidden", kv![]);
    assert!(buf.contents().is_empty());

    logger.warn("shown", kv![]);
    let lines = buf.json_lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["level"], "WARN");
}

#[test]
fn test_debug_needs_debug_level() {
    let (default_level, buf) = common::json_logger(vec![]);
    default_level.debug("hidden", kv![]);
    assert!(buf.contents().is_empty());

    let (debug_level, buf) = common::json_logger(vec![with_level(Level::Debug)]);
    debug_level.debug("This is a debug message", kv!["debug_key", "debug_value"]);
    assert_eq!(buf.json_lines()[0]["debug_key"], "debug_value");
}

#[test]
fn test_error_logging() {
    let (logger, buf) = common::json_logger(vec![]);
    let err = CustomError {
        msg: "test error".into(),
    };
    logger
        .group("user-service")
        .with(kv!["user_id", 789])
        .error("Error occurred", &err, kv![]);

    let line = &buf.json_lines()[0];
    assert_eq!(line["msg"], "Error occurred");
    assert_eq!(line["error"], "test error");
    assert_eq!(line["user-service"]["user_id"], 789);
}

#[test]
fn test_odd_key_values_degrade() {
    let (logger, buf) = common::json_logger(vec![]);
    logger.with(kv!["key"]).info("still logged", kv![]);
    logger.info("per call", kv!["a", 1, "b"]);

    let lines = buf.json_lines();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0][BAD_KEY], "key");
    assert_eq!(lines[1]["a"], 1);
    assert_eq!(lines[1][BAD_KEY], "b");
}

#[test]
fn test_strict_with_rejects_odd_lists() {
    let (logger, _) = common::json_logger(vec![]);
    let err = logger.try_with(kv!["key"]).unwrap_err();
    assert!(matches!(err, LogError::OddKeyValues { len: 1 }));
    assert_eq!(err.to_string(), "key/value list has odd length 1");
}

#[test]
fn test_durations_serialize_as_nanoseconds() {
    let (logger, buf) = common::json_logger(vec![]);
    logger
        .with(kv!["duration", Duration::from_millis(100)])
        .info("Operation completed", kv![]);
    assert_eq!(buf.json_lines()[0]["duration"], 100_000_000);
}

#[test]
fn test_option_order_is_preserved() {
    let (logger, buf) = common::json_logger(vec![
        with_default_attrs(kv!["service", "user-service"]),
        with_level(Level::Debug),
        with_group("ctx"),
    ]);
    logger
        .with(kv!["user_id", 1001, "username", "user_1001"])
        .debug("Creating new user", kv![]);

    assert_eq!(
        buf.contents(),
        "{\"level\":\"DEBUG\",\"msg\":\"Creating new user\",\"service\":\"user-service\",\"ctx\":{\"user_id\":1001,\"username\":\"user_1001\"}}\n"
    );
}

#[test]
fn test_concurrent_derivation() {
    let (logger, buf) = common::json_logger(vec![]);

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let logger = logger.clone();
            std::thread::spawn(move || {
                let child = logger.with(kv!["worker", worker]);
                for i in 0..25 {
                    child.info("tick", kv!["i", i]);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let lines = buf.json_lines();
    assert_eq!(lines.len(), 200);
    assert!(logger.default_attrs().is_empty());
}

#[test]
fn test_malformed_default_attrs_option_degrades() {
    let (logger, buf) = common::json_logger(vec![with_default_attrs(kv!["key"])]);
    assert_eq!(logger.default_attrs(), &[Attr::new(BAD_KEY, "key")]);

    logger.info("constructed anyway", kv![]);
    let line = &buf.json_lines()[0];
    assert_eq!(line["msg"], "constructed anyway");
    assert_eq!(line[BAD_KEY], "key");
}

#[test]
fn test_attrs_never_replace_record_fields() {
    let (logger, buf) = common::json_logger(vec![]);
    logger.error(
        "write failed",
        &std::io::Error::other("disk full"),
        kv!["error", "shadow", "msg", "overwritten", "level", "DEBUG"],
    );

    let line = &buf.json_lines()[0];
    assert_eq!(line["level"], "ERROR");
    assert_eq!(line["msg"], "write failed");
    assert_eq!(line["error"], "disk full");
    assert_eq!(line["!RESERVED:error"], "shadow");
    assert_eq!(line["!RESERVED:msg"], "overwritten");
    assert_eq!(line["!RESERVED:level"], "DEBUG");
}
