use anchor_lang::AnchorDeserialize;
use anchor_lang::Discriminator;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use masterchef_program::events as OnChainEvent;
use thiserror::Error;

/// A client-side enum that wraps all events the staking program emits.
/// This provides a single, unified type for log consumers to work with.
#[derive(Debug, Clone)]
pub enum ChefEvent {
    MasterChefInitialized(OnChainEvent::MasterChefInitialized),
    AdminUpdated(OnChainEvent::AdminUpdated),
    PoolAdded(OnChainEvent::PoolAdded),
    RewardPerSlotUpdated(OnChainEvent::RewardPerSlotUpdated),
    TokensDeposited(OnChainEvent::TokensDeposited),
    TokensWithdrawn(OnChainEvent::TokensWithdrawn),
    RewardClaimed(OnChainEvent::RewardClaimed),
}

#[derive(Debug, Error)]
pub enum ParseEventError {
    /// The log line does not carry a `Program data:` payload.
    #[error("log line is not a program data entry")]
    NotProgramData,
    #[error("program data payload is not valid base64")]
    InvalidBase64,
    /// The payload decoded but matched no known event discriminator.
    #[error("unknown event discriminator")]
    UnknownEvent,
}

/// Attempts to decode one transaction log line into a [`ChefEvent`].
///
/// Anchor events appear in logs as `Program data: <base64>` where the payload
/// is an 8-byte discriminator followed by the borsh-encoded event body.
pub fn try_parse_log(log: &str) -> Result<ChefEvent, ParseEventError> {
    let data_str = log
        .strip_prefix("Program data: ")
        .ok_or(ParseEventError::NotProgramData)?;
    let bytes = BASE64
        .decode(data_str.trim())
        .map_err(|_| ParseEventError::InvalidBase64)?;
    let data = bytes.as_slice();

    fn try_match<E, F>(data: &[u8], map: F) -> Option<ChefEvent>
    where
        E: AnchorDeserialize + Discriminator,
        F: FnOnce(E) -> ChefEvent,
    {
        let disc = E::DISCRIMINATOR;
        if data.starts_with(disc) {
            if let Ok(e) = E::try_from_slice(&data[disc.len()..]) {
                return Some(map(e));
            }
        }
        None
    }

    try_match::<OnChainEvent::MasterChefInitialized, _>(data, ChefEvent::MasterChefInitialized)
        .or_else(|| try_match::<OnChainEvent::AdminUpdated, _>(data, ChefEvent::AdminUpdated))
        .or_else(|| try_match::<OnChainEvent::PoolAdded, _>(data, ChefEvent::PoolAdded))
        .or_else(|| {
            try_match::<OnChainEvent::RewardPerSlotUpdated, _>(data, ChefEvent::RewardPerSlotUpdated)
        })
        .or_else(|| try_match::<OnChainEvent::TokensDeposited, _>(data, ChefEvent::TokensDeposited))
        .or_else(|| try_match::<OnChainEvent::TokensWithdrawn, _>(data, ChefEvent::TokensWithdrawn))
        .or_else(|| try_match::<OnChainEvent::RewardClaimed, _>(data, ChefEvent::RewardClaimed))
        .ok_or(ParseEventError::UnknownEvent)
}
