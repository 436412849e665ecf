//! `GET`/`POST /hello` behind API Gateway, with structured JSON logs.

pub mod config;
pub mod context;
pub mod error;
pub mod event;
pub mod function;
pub mod hello;
pub mod logging;
pub mod router;

#[cfg(test)]
mod test_support;
