//! Fixed resource-token catalogue.
//!
//! The catalogue is statically known and immutable at runtime; on-chain
//! existence is checked once at startup and assumed stable for the process
//! lifetime.

/// One entry of the resource-token catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceTokenSpec {
    /// Token id under the collection.
    pub id: u64,
    /// Display name stored as a token attribute.
    pub name: &'static str,
    /// Media descriptor (JSON array) stored as a token attribute.
    pub media: &'static str,
}

/// The resource tokens every deployment carries.
pub const RESOURCE_TOKENS: [ResourceTokenSpec; 3] = [
    ResourceTokenSpec {
        id: 1,
        name: "Gold Coin",
        media: "[{\"type\":\"image/png\",\"url\":\"https://cdn.enjin.io/mint/image/gold-coin.png\"}]",
    },
    ResourceTokenSpec {
        id: 2,
        name: "Gold Coin (Blue)",
        media: "[{\"type\":\"image/png\",\"url\":\"https://cdn.enjin.io/mint/image/gold-coin-blue.png\"}]",
    },
    ResourceTokenSpec {
        id: 3,
        name: "Green Gem",
        media: "[{\"type\":\"image/png\",\"url\":\"https://cdn.enjin.io/mint/image/green-gem.png\"}]",
    },
];
