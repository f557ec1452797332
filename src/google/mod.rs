//! Google Cloud Text-to-Speech, Speech-to-Text and Natural Language over REST.

pub mod auth;
pub mod client;
pub mod messages;

pub use auth::{ServiceAccountCredentials, ServiceAccountTokenProvider, StaticToken, TokenSource};
pub use client::{GoogleCloudClient, GoogleEndpoints};
