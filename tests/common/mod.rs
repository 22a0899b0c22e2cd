//! Integration test common infrastructure.
//!
//! Provides an in-process harness that drives the protocol engine directly,
//! plus a TCP server and client for end-to-end runs.

#![allow(dead_code)]

pub mod client;
pub mod harness;
pub mod server;

#[allow(unused_imports)]
pub use client::TestClient;
#[allow(unused_imports)]
pub use harness::{TestNet, TestUser, codes};
#[allow(unused_imports)]
pub use server::TestServer;
