//! Typed request model for platform operations.
//!
//! Every call the service makes is a named GraphQL operation with all
//! variables already bound. Constructors here own the documents; nothing
//! else in the crate builds query strings.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::platform::types::{CollectionId, TransactionHandle};

/// A variable bound to a platform operation.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Str(String),
    Int(i64),
    Bool(bool),
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<u64> for ParamValue {
    fn from(value: u64) -> Self {
        Self::Int(value as i64)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// A named mutation or query with bound variables.
///
/// Stateless; constructed per call and consumed by
/// [`PlatformClient::submit`](crate::platform::PlatformClient::submit).
#[derive(Debug, Clone)]
pub struct RemoteOperation {
    /// Operation name, used in logs, metrics and error messages.
    pub name: &'static str,
    /// The GraphQL document to post.
    pub document: &'static str,
    /// Top-level `data` field holding this operation's payload.
    pub result_field: &'static str,
    /// Variables, serialized as the `variables` object.
    pub params: BTreeMap<&'static str, ParamValue>,
}

impl RemoteOperation {
    fn new(name: &'static str, document: &'static str, result_field: &'static str) -> Self {
        Self {
            name,
            document,
            result_field,
            params: BTreeMap::new(),
        }
    }

    fn param(mut self, key: &'static str, value: impl Into<ParamValue>) -> Self {
        self.params.insert(key, value.into());
        self
    }
}

const CREATE_COLLECTION: &str = "\
mutation CreateCollection($forceCollapsingSupply: Boolean, $name: String!, $bannerImage: String!, $media: String!) {
  CreateCollection(
    mintPolicy: { forceCollapsingSupply: $forceCollapsingSupply }
    attributes: [
      { key: \"name\", value: $name }
      { key: \"banner_image\", value: $bannerImage }
      { key: \"media\", value: $media }
    ]
  ) { id method state }
}";

const CREATE_TOKEN: &str = "\
mutation CreateToken($recipient: String!, $collectionId: BigInt!, $tokenId: BigInt, $name: String!, $media: String!) {
  CreateToken(
    recipient: $recipient
    collectionId: $collectionId
    params: {
      tokenId: { integer: $tokenId }
      initialSupply: 1
      attributes: [
        { key: \"name\", value: $name }
        { key: \"media\", value: $media }
      ]
    }
  ) { id method state }
}";

const GET_TOKEN: &str = "\
query GetToken($collectionId: BigInt!, $tokenId: BigInt) {
  GetToken(collectionId: $collectionId, tokenId: { integer: $tokenId }) { metadata }
}";

const GET_TRANSACTION: &str = "\
query GetTransaction($id: Int!) {
  GetTransaction(id: $id) {
    state
    result
    events { edges { node { params { type value } } } }
  }
}";

const GET_WALLET: &str = "\
query GetWallet($externalId: String!) {
  GetWallet(externalId: $externalId) { account { publicKey address } }
}";

const CREATE_WALLET: &str = "\
mutation CreateWallet($externalId: String!) {
  CreateWallet(externalId: $externalId)
}";

const MINT_TOKEN: &str = "\
mutation MintToken($recipient: String!, $collectionId: BigInt!, $tokenId: BigInt, $amount: BigInt!) {
  MintToken(
    recipient: $recipient
    collectionId: $collectionId
    params: { tokenId: { integer: $tokenId }, amount: $amount }
  ) { id method state }
}";

const BURN_TOKEN: &str = "\
mutation BurnToken($signingAccount: String!, $collectionId: BigInt!, $tokenId: BigInt, $amount: BigInt!) {
  Burn(
    signingAccount: $signingAccount
    collectionId: $collectionId
    params: { tokenId: { integer: $tokenId }, amount: $amount }
  ) { id method state }
}";

const TRANSFER_TOKEN: &str = "\
mutation TransferToken($recipient: String!, $collectionId: BigInt!, $tokenId: BigInt, $amount: BigInt!) {
  SimpleTransferToken(
    recipient: $recipient
    collectionId: $collectionId
    params: { tokenId: { integer: $tokenId }, amount: $amount }
  ) { id method state }
}";

/// Collection attributes submitted at creation time.
#[derive(Debug, Clone)]
pub struct CollectionAttributes {
    pub name: String,
    pub banner_image: String,
    pub media: String,
}

pub fn create_collection(attributes: &CollectionAttributes) -> RemoteOperation {
    RemoteOperation::new("CreateCollection", CREATE_COLLECTION, "CreateCollection")
        .param("forceCollapsingSupply", false)
        .param("name", attributes.name.clone())
        .param("bannerImage", attributes.banner_image.clone())
        .param("media", attributes.media.clone())
}

pub fn create_token(
    recipient: &str,
    collection: &CollectionId,
    token_id: u64,
    name: &str,
    media: &str,
) -> RemoteOperation {
    RemoteOperation::new("CreateToken", CREATE_TOKEN, "CreateToken")
        .param("recipient", recipient)
        .param("collectionId", collection.0.clone())
        .param("tokenId", token_id)
        .param("name", name)
        .param("media", media)
}

pub fn get_token(collection: &CollectionId, token_id: u64) -> RemoteOperation {
    RemoteOperation::new("GetToken", GET_TOKEN, "GetToken")
        .param("collectionId", collection.0.clone())
        .param("tokenId", token_id)
}

pub fn get_transaction(handle: TransactionHandle) -> RemoteOperation {
    RemoteOperation::new("GetTransaction", GET_TRANSACTION, "GetTransaction")
        .param("id", handle.0)
}

pub fn get_wallet(external_id: &str) -> RemoteOperation {
    RemoteOperation::new("GetWallet", GET_WALLET, "GetWallet").param("externalId", external_id)
}

pub fn create_wallet(external_id: &str) -> RemoteOperation {
    RemoteOperation::new("CreateWallet", CREATE_WALLET, "CreateWallet")
        .param("externalId", external_id)
}

pub fn mint_token(
    collection: &CollectionId,
    token_id: u64,
    recipient: &str,
    amount: u64,
) -> RemoteOperation {
    RemoteOperation::new("MintToken", MINT_TOKEN, "MintToken")
        .param("recipient", recipient)
        .param("collectionId", collection.0.clone())
        .param("tokenId", token_id)
        .param("amount", amount)
}

pub fn burn_token(
    collection: &CollectionId,
    token_id: u64,
    account: &str,
    amount: u64,
) -> RemoteOperation {
    RemoteOperation::new("BurnToken", BURN_TOKEN, "Burn")
        .param("signingAccount", account)
        .param("collectionId", collection.0.clone())
        .param("tokenId", token_id)
        .param("amount", amount)
}

pub fn transfer_token(
    collection: &CollectionId,
    token_id: u64,
    recipient: &str,
    amount: u64,
) -> RemoteOperation {
    RemoteOperation::new("TransferToken", TRANSFER_TOKEN, "SimpleTransferToken")
        .param("recipient", recipient)
        .param("collectionId", collection.0.clone())
        .param("tokenId", token_id)
        .param("amount", amount)
}
