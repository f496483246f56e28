//! Error types for the Agora backend

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgoraError {
    #[error("RPC transport error: {0}")]
    RpcTransport(String),

    #[error("RPC endpoint returned error {code}: {message}")]
    RpcResponse { code: i64, message: String },

    #[error("Malformed RPC response: {0}")]
    MalformedResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Duplicate proposal id: {0}")]
    DuplicateProposal(u64),
}

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, AgoraError>;
