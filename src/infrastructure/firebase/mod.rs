//! Firebase Authentication adapter.

mod client;
mod dto;

pub use client::FirebaseAuthClient;
