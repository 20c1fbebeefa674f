//! # Budget Agent
//!
//! A conversational budgeting assistant exposed over an A2A JSON-RPC
//! endpoint.
//!
//! This library provides:
//! - An HTTP endpoint (`POST /a2a/agent/{agentId}`) speaking a
//!   JSON-RPC-2.0-shaped task protocol
//! - An LLM-backed agent with a single deterministic budget-analysis tool
//! - SQLite-backed conversation memory, keyed by context id
//!
//! ## Architecture
//!
//! ```text
//! caller ──▶ Envelope Translator ──▶ Agent Shell ──▶ LLM (OpenRouter)
//!                   ▲                    │  ▲            │
//!                   │                    │  └─ get-budget tool
//!                   │                    ▼
//!                   └──────────── task envelope      memory (SQLite)
//! ```
//!
//! ## Request Flow
//! 1. Validate the JSON-RPC envelope and resolve the addressed agent
//! 2. Normalize the inbound messages into prompt turns
//! 3. Run the agent loop: LLM call, tool execution, repeat until a reply
//! 4. Package the reply, tool results, and history into a task envelope
//!
//! ## Modules
//! - `budget`: the pure budget calculator
//! - `a2a`: protocol types and envelope translation
//! - `agent`: the agent shell and registry

pub mod a2a;
pub mod agent;
pub mod api;
pub mod budget;
pub mod config;
pub mod llm;
pub mod memory;
pub mod tools;

pub use config::Config;
