//! errorsmith Core Types
//!
//! This crate provides the foundational types shared by the errorsmith
//! crates. It includes:
//!
//! - **Identifiers**: The identifier grammar and the validated [`identifier::Identifier`] type
//! - **Values**: Loosely typed inputs ([`value::Value`]) and validated primitives
//!   ([`value::AttributeValue`])

pub mod identifier;
pub mod value;
