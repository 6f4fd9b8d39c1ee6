//! MCP server
//!
//! Exposes the diary tools over the Model Context Protocol.

mod server;

pub use server::DiaryService;
