// ABOUTME: Root module for errand - mail and web-search tools for agent hosts.
// ABOUTME: Re-exports all public types from submodules.

pub mod credential;
pub mod error;
pub mod prelude;
pub mod tool;
pub mod tools;
