//! Typed watch-target model.
//!
//! A watch target tells the watcher which node to connect to
//! (`chain_endpoint`), which contract to observe (`contract_address`) and
//! which event signature to filter for (`event_type`). The raw strings are
//! validated here once; everything downstream handles only checked values.

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Default watch target: the local development node and the keccak-256 hash
/// of the ERC-20/721 `Transfer(address,address,uint256)` signature on the
/// first contract deployed on a fresh devnet.
pub mod defaults {
    pub const CHAIN_ENDPOINT: &str = "ws://127.0.0.1:8545/";
    pub const CONTRACT_ADDRESS: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";
    pub const EVENT_TYPE: &str = "ddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef";
}

/// URL schemes a node endpoint may use. Subscriptions run over websockets,
/// but polling setups point at plain RPC, so both families are accepted.
const ENDPOINT_SCHEMES: [&str; 4] = ["ws", "wss", "http", "https"];

const ADDRESS_HEX_DIGITS: usize = 40;
const TOPIC_HEX_DIGITS: usize = 64;

#[derive(Debug)]
pub enum TargetError {
    InvalidEndpoint {
        value: String,
        source: url::ParseError,
    },
    UnsupportedScheme {
        value: String,
        scheme: String,
    },
    MissingAddressPrefix {
        value: String,
    },
    BadLength {
        field: &'static str,
        expected: usize,
        got: usize,
    },
    NotHex {
        field: &'static str,
        value: String,
    },
}

impl std::error::Error for TargetError {}

impl fmt::Display for TargetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetError::InvalidEndpoint { value, source } => {
                write!(f, "Invalid chain endpoint {:?}: {}", value, source)
            }
            TargetError::UnsupportedScheme { value, scheme } => write!(
                f,
                "Unsupported scheme {:?} in chain endpoint {:?} (expected ws, wss, http or https)",
                scheme, value
            ),
            TargetError::MissingAddressPrefix { value } => {
                write!(f, "Contract address {:?} is missing the 0x prefix", value)
            }
            TargetError::BadLength {
                field,
                expected,
                got,
            } => write!(
                f,
                "Expected {} hex digits in {}, got {}",
                expected, field, got
            ),
            TargetError::NotHex { field, value } => {
                write!(f, "{} {:?} contains non-hex characters", field, value)
            }
        }
    }
}

/// Network address of a node's subscription endpoint, e.g. `ws://127.0.0.1:8545/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainEndpoint(String);

impl ChainEndpoint {
    /// Accepts any URL with a ws/wss/http/https scheme and a host. The
    /// string is stored as given; no normalization.
    pub fn parse(value: &str) -> Result<Self, TargetError> {
        let url = Url::parse(value).map_err(|source| TargetError::InvalidEndpoint {
            value: value.to_owned(),
            source,
        })?;
        if !ENDPOINT_SCHEMES.contains(&url.scheme()) {
            return Err(TargetError::UnsupportedScheme {
                value: value.to_owned(),
                scheme: url.scheme().to_owned(),
            });
        }
        Ok(Self(value.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Address of a deployed contract: `0x` followed by 40 hex digits. Case is
/// preserved, since checksummed addresses encode it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractAddress(String);

impl ContractAddress {
    pub fn parse(value: &str) -> Result<Self, TargetError> {
        let digits = value
            .strip_prefix("0x")
            .ok_or_else(|| TargetError::MissingAddressPrefix {
                value: value.to_owned(),
            })?;
        if digits.len() != ADDRESS_HEX_DIGITS {
            return Err(TargetError::BadLength {
                field: "contract_address",
                expected: ADDRESS_HEX_DIGITS,
                got: digits.len(),
            });
        }
        if hex::decode(digits).is_err() {
            return Err(TargetError::NotHex {
                field: "contract_address",
                value: value.to_owned(),
            });
        }
        Ok(Self(value.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContractAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hash of the event signature to watch: 64 hex digits, stored lowercase
/// without a `0x` prefix. A prefixed input is accepted and normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventTopic(String);

impl EventTopic {
    pub fn parse(value: &str) -> Result<Self, TargetError> {
        let digits = value.strip_prefix("0x").unwrap_or(value);
        if digits.len() != TOPIC_HEX_DIGITS {
            return Err(TargetError::BadLength {
                field: "event_type",
                expected: TOPIC_HEX_DIGITS,
                got: digits.len(),
            });
        }
        if hex::decode(digits).is_err() {
            return Err(TargetError::NotHex {
                field: "event_type",
                value: value.to_owned(),
            });
        }
        Ok(Self(digits.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A validated watch target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchTarget {
    pub chain_endpoint: ChainEndpoint,
    pub contract_address: ContractAddress,
    pub event_type: EventTopic,
}

impl WatchTarget {
    pub fn parse(endpoint: &str, address: &str, topic: &str) -> Result<Self, TargetError> {
        Ok(Self {
            chain_endpoint: ChainEndpoint::parse(endpoint)?,
            contract_address: ContractAddress::parse(address)?,
            event_type: EventTopic::parse(topic)?,
        })
    }

    /// The shape persisted in the contracts collection.
    pub fn record(&self) -> TargetRecord {
        TargetRecord {
            chain_endpoint: self.chain_endpoint.as_str().to_owned(),
            contract_address: self.contract_address.as_str().to_owned(),
            event_type: self.event_type.as_str().to_owned(),
        }
    }
}

/// The watch-target document exactly as stored: three string fields, nothing
/// else. Field names are the persisted field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetRecord {
    pub chain_endpoint: String,
    pub contract_address: String,
    pub event_type: String,
}
