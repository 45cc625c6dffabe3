///////////////////////////////////////////////////////////////////////////////////////////////////
///
/// Imports
///
///////////////////////////////////////////////////////////////////////////////////////////////////
use std::collections::HashMap;

use druid::Data;
use serde::Serialize;
use thiserror::Error;

///////////////////////////////////////////////////////////////////////////////////////////////////
///
/// Chain configuration
///
///////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainConfig {
    pub id: u64,
    pub name: &'static str,
    pub rpc_url: &'static str,
    pub block_explorer: &'static str,
    pub faucet: Option<&'static str>,
}

impl ChainConfig {
    pub fn explorer_tx_url(&self, tx_hash: &str) -> String {
        format!("{}/tx/{}", self.block_explorer, tx_hash)
    }
}

pub const BASE_SEPOLIA: ChainConfig = ChainConfig {
    id: 84532,
    name: "Base Sepolia",
    rpc_url: "https://sepolia.base.org",
    block_explorer: "https://sepolia.basescan.org",
    faucet: Some("https://www.coinbase.com/faucets/base-ethereum-sepolia-faucet"),
};

pub const BASE: ChainConfig = ChainConfig {
    id: 8453,
    name: "Base",
    rpc_url: "https://mainnet.base.org",
    block_explorer: "https://basescan.org",
    faucet: None,
};

/// Development default.
pub const DEFAULT_CHAIN_ID: u64 = BASE_SEPOLIA.id;

pub fn chain_config(chain_id: u64) -> Option<&'static ChainConfig> {
    match chain_id {
        84532 => Some(&BASE_SEPOLIA),
        8453 => Some(&BASE),
        _ => None,
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////////
///
/// Capability detection
///
///////////////////////////////////////////////////////////////////////////////////////////////////

/// Why on-chain features are unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsupportedReason {
    /// The host runs in preview mode with chain features switched off.
    PreviewMode,
    /// No wallet capability was offered by the environment.
    NoWallet,
    /// The wallet is connected to a chain this app does not know.
    UnknownChain(u64),
}

/// Typed result of probing the environment for on-chain capability.
/// Callers branch on this instead of poking at possibly-absent globals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChainSupport {
    Supported(&'static ChainConfig),
    Unsupported(UnsupportedReason),
}

impl ChainSupport {
    pub fn detect(preview_mode: bool, wallet_present: bool, chain_id: u64) -> Self {
        if preview_mode {
            return ChainSupport::Unsupported(UnsupportedReason::PreviewMode);
        }
        if !wallet_present {
            return ChainSupport::Unsupported(UnsupportedReason::NoWallet);
        }
        match chain_config(chain_id) {
            Some(config) => ChainSupport::Supported(config),
            None => ChainSupport::Unsupported(UnsupportedReason::UnknownChain(chain_id)),
        }
    }

    pub fn is_supported(&self) -> bool {
        matches!(self, ChainSupport::Supported(_))
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////////
///
/// Mint stage
///
///////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq, Data)]
pub enum MintStage {
    Idle,
    Signing,
    Mining,
    Success,
    Failed,
}

impl MintStage {
    /// Progress fraction shown by the mint dialog's ring.
    pub fn progress(&self) -> f64 {
        match self {
            MintStage::Idle | MintStage::Failed => 0.0,
            MintStage::Signing => 0.25,
            MintStage::Mining => 0.75,
            MintStage::Success => 1.0,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            MintStage::Idle => "Ready to mint your SpinMint NFT",
            MintStage::Signing => "Please sign the transaction in your wallet...",
            MintStage::Mining => "Minting your NFT on Base...",
            MintStage::Success => "Successfully minted your SpinMint NFT!",
            MintStage::Failed => "Minting failed",
        }
    }

    /// True while a transaction is between submission and confirmation.
    pub fn in_flight(&self) -> bool {
        matches!(self, MintStage::Signing | MintStage::Mining)
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////////
///
/// Errors
///
///////////////////////////////////////////////////////////////////////////////////////////////////

/// User-facing failures from the wallet/contract collaborator. The display
/// strings are the exact texts shown in the UI.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MintError {
    #[error("Transaction was cancelled.")]
    UserRejected,
    #[error("Insufficient funds for gas fees.")]
    InsufficientFunds,
    #[error("You do not own this NFT")]
    NotOwner,
    #[error("Failed to switch to Base network")]
    WrongNetwork,
    #[error("{0}")]
    InvalidInput(&'static str),
    #[error("{0}")]
    Provider(String),
}

impl MintError {
    /// Map a raw provider message onto the known failure classes,
    /// passing anything else through verbatim.
    pub fn from_provider_message(message: &str) -> Self {
        if message.contains("User rejected") {
            MintError::UserRejected
        } else if message.contains("insufficient funds") {
            MintError::InsufficientFunds
        } else {
            MintError::Provider(message.to_owned())
        }
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////////
///
/// Input validation
///
///////////////////////////////////////////////////////////////////////////////////////////////////

/// `0x` followed by exactly 40 hex digits.
pub fn is_valid_address(address: &str) -> bool {
    let Some(hex) = address.strip_prefix("0x") else {
        return false;
    };
    hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit())
}

/// Validate the send-NFT form. Returns the parsed token id on success.
pub fn validate_transfer_input(
    own_address: &str,
    recipient: &str,
    token_id: &str,
) -> Result<u64, MintError> {
    if recipient.trim().is_empty() {
        return Err(MintError::InvalidInput("Please enter a recipient address"));
    }
    if token_id.trim().is_empty() {
        return Err(MintError::InvalidInput("Please enter a token ID"));
    }
    if !is_valid_address(recipient) {
        return Err(MintError::InvalidInput(
            "Please enter a valid Ethereum address",
        ));
    }
    let token_id = token_id
        .parse::<u64>()
        .map_err(|_| MintError::InvalidInput("Token ID must be a number"))?;
    if recipient.eq_ignore_ascii_case(own_address) {
        return Err(MintError::InvalidInput("Cannot send to your own address"));
    }
    Ok(token_id)
}

///////////////////////////////////////////////////////////////////////////////////////////////////
///
/// Token metadata
///
///////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Serialize)]
pub struct MetadataAttribute {
    pub trait_type: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TokenMetadata {
    pub name: String,
    pub description: String,
    pub image: String,
    pub attributes: Vec<MetadataAttribute>,
    pub external_url: String,
}

impl TokenMetadata {
    pub fn new(token_id: u64, profile_image_url: &str, creator: &str) -> Self {
        TokenMetadata {
            name: format!("SpinMint #{}", token_id),
            description:
                "A spinning vinyl record NFT created from a profile image using SpinMint."
                    .to_owned(),
            image: profile_image_url.to_owned(),
            attributes: vec![
                MetadataAttribute {
                    trait_type: "Original Profile Image",
                    value: profile_image_url.to_owned(),
                },
                MetadataAttribute {
                    trait_type: "Created By",
                    value: creator.to_owned(),
                },
                MetadataAttribute {
                    trait_type: "Platform",
                    value: "SpinMint".to_owned(),
                },
            ],
            external_url: "https://spinmint.vercel.app".to_owned(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////////
///
/// Mint client
///
///////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintReceipt {
    pub tx_hash: String,
    pub token_id: u64,
}

/// The wallet/contract collaborator, reduced to the three calls the app
/// makes. Real backends talk to a wallet and a chain RPC; the preview
/// backend below simulates them.
pub trait MintClient {
    fn mint(&mut self, to: &str, token_uri: &str) -> Result<MintReceipt, MintError>;
    fn transfer(&mut self, from: &str, to: &str, token_id: u64) -> Result<String, MintError>;
    fn owner_of(&self, token_id: u64) -> Result<String, MintError>;
    fn total_supply(&self) -> u64;
}

/// In-memory stand-in for the chain, used in preview mode. Token ownership
/// lives in a plain map; transaction hashes are derived from a counter so
/// runs are deterministic.
#[derive(Debug, Default)]
pub struct PreviewClient {
    owners: HashMap<u64, String>,
    next_token_id: u64,
    tx_counter: u64,
}

impl PreviewClient {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_tx_hash(&mut self) -> String {
        self.tx_counter += 1;
        format!("0x{:064x}", self.tx_counter.wrapping_mul(0x9e37_79b9_7f4a_7c15))
    }
}

impl MintClient for PreviewClient {
    fn mint(&mut self, to: &str, _token_uri: &str) -> Result<MintReceipt, MintError> {
        if !is_valid_address(to) {
            return Err(MintError::InvalidInput(
                "Please enter a valid Ethereum address",
            ));
        }
        let token_id = self.next_token_id;
        self.next_token_id += 1;
        self.owners.insert(token_id, to.to_ascii_lowercase());
        Ok(MintReceipt {
            tx_hash: self.next_tx_hash(),
            token_id,
        })
    }

    fn transfer(&mut self, from: &str, to: &str, token_id: u64) -> Result<String, MintError> {
        let owner = self.owner_of(token_id)?;
        if !owner.eq_ignore_ascii_case(from) {
            return Err(MintError::NotOwner);
        }
        if !is_valid_address(to) {
            return Err(MintError::InvalidInput(
                "Please enter a valid Ethereum address",
            ));
        }
        self.owners.insert(token_id, to.to_ascii_lowercase());
        Ok(self.next_tx_hash())
    }

    fn owner_of(&self, token_id: u64) -> Result<String, MintError> {
        self.owners
            .get(&token_id)
            .cloned()
            .ok_or_else(|| MintError::Provider(format!("Unknown token id {}", token_id)))
    }

    fn total_supply(&self) -> u64 {
        self.next_token_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE: &str = "0x00000000000000000000000000000000000000a1";
    const BOB: &str = "0x00000000000000000000000000000000000000b2";

    #[test]
    fn stage_progress_matches_dialog_ring() {
        assert_eq!(MintStage::Idle.progress(), 0.0);
        assert_eq!(MintStage::Signing.progress(), 0.25);
        assert_eq!(MintStage::Mining.progress(), 0.75);
        assert_eq!(MintStage::Success.progress(), 1.0);
        assert_eq!(MintStage::Failed.progress(), 0.0);
        assert!(MintStage::Signing.in_flight());
        assert!(!MintStage::Success.in_flight());
    }

    #[test]
    fn provider_messages_map_to_known_errors() {
        assert_eq!(
            MintError::from_provider_message("User rejected the request"),
            MintError::UserRejected
        );
        assert_eq!(
            MintError::from_provider_message("err: insufficient funds for gas"),
            MintError::InsufficientFunds
        );
        assert_eq!(
            MintError::from_provider_message("execution reverted").to_string(),
            "execution reverted"
        );
        assert_eq!(
            MintError::UserRejected.to_string(),
            "Transaction was cancelled."
        );
    }

    #[test]
    fn address_validation() {
        assert!(is_valid_address(ALICE));
        assert!(!is_valid_address("0x123"));
        assert!(!is_valid_address("00000000000000000000000000000000000000a1"));
        assert!(!is_valid_address("0x00000000000000000000000000000000000000zz"));
    }

    #[test]
    fn transfer_input_validation() {
        assert_eq!(validate_transfer_input(ALICE, BOB, "3"), Ok(3));
        assert_eq!(
            validate_transfer_input(ALICE, "", "3"),
            Err(MintError::InvalidInput("Please enter a recipient address"))
        );
        assert_eq!(
            validate_transfer_input(ALICE, BOB, ""),
            Err(MintError::InvalidInput("Please enter a token ID"))
        );
        assert_eq!(
            validate_transfer_input(ALICE, BOB, "three"),
            Err(MintError::InvalidInput("Token ID must be a number"))
        );
        assert_eq!(
            validate_transfer_input(ALICE, &ALICE.to_ascii_uppercase().replace("0X", "0x"), "3"),
            Err(MintError::InvalidInput("Cannot send to your own address"))
        );
    }

    #[test]
    fn preview_client_mints_and_transfers() {
        let mut client = PreviewClient::new();
        let receipt = client.mint(ALICE, "{}").unwrap();
        assert_eq!(receipt.token_id, 0);
        assert!(receipt.tx_hash.starts_with("0x"));
        assert_eq!(client.owner_of(0).unwrap(), ALICE);
        assert_eq!(client.total_supply(), 1);

        // Only the owner may transfer; afterwards ownership moves.
        assert_eq!(client.transfer(BOB, ALICE, 0), Err(MintError::NotOwner));
        client.transfer(ALICE, BOB, 0).unwrap();
        assert_eq!(client.owner_of(0).unwrap(), BOB);

        assert!(matches!(
            client.owner_of(99),
            Err(MintError::Provider(_))
        ));
    }

    #[test]
    fn capability_detection_is_typed() {
        assert_eq!(
            ChainSupport::detect(true, true, DEFAULT_CHAIN_ID),
            ChainSupport::Unsupported(UnsupportedReason::PreviewMode)
        );
        assert_eq!(
            ChainSupport::detect(false, false, DEFAULT_CHAIN_ID),
            ChainSupport::Unsupported(UnsupportedReason::NoWallet)
        );
        assert_eq!(
            ChainSupport::detect(false, true, 1),
            ChainSupport::Unsupported(UnsupportedReason::UnknownChain(1))
        );
        assert!(ChainSupport::detect(false, true, 8453).is_supported());
    }

    #[test]
    fn metadata_serializes_expected_fields() {
        let metadata = TokenMetadata::new(7, "https://example.com/pfp.png", ALICE);
        let json = metadata.to_json().unwrap();
        assert!(json.contains("\"name\":\"SpinMint #7\""));
        assert!(json.contains("Original Profile Image"));
        assert!(json.contains(ALICE));
        assert!(json.contains("external_url"));
    }

    #[test]
    fn explorer_url_points_at_the_right_chain() {
        let url = BASE_SEPOLIA.explorer_tx_url("0xabc");
        assert_eq!(url, "https://sepolia.basescan.org/tx/0xabc");
        assert_eq!(chain_config(8453), Some(&BASE));
        assert_eq!(chain_config(1), None);
    }
}
