// ABOUTME: Tests for ToolResult - text, error, and structured constructors.

use super::*;

#[test]
fn test_text_result() {
    let result = ToolResult::text("Hello, world!");
    assert_eq!(result.as_text(), Some("Hello, world!"));
    assert!(!result.is_error);
}

#[test]
fn test_error_result() {
    let result = ToolResult::error("Something went wrong");
    assert_eq!(result.as_text(), Some("Something went wrong"));
    assert!(result.is_error);
}

#[test]
fn test_json_result() {
    let result = ToolResult::json(&vec![serde_json::json!({"rank": 1})]).unwrap();
    assert!(!result.is_error);
    assert!(result.as_text().is_none());
    assert_eq!(result.content[0]["rank"], 1);

    assert!(result.failed().is_error);
}

#[test]
fn test_default() {
    let result = ToolResult::default();
    assert_eq!(result.as_text(), Some(""));
    assert!(!result.is_error);
}
