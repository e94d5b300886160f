//! Client-side decoding of Yoti sharing receipts.
//!
//! A relying party receives a receipt carrying an RSA-wrapped AES key and two
//! encrypted protobuf attribute lists. [`receipt::ReceiptPipeline`] unwraps the
//! key, decrypts both lists, types every attribute value and resolves the
//! provenance anchors from their X.509 certificate chains.
//!
//! ```ignore
//! let key = crypto::load_private_key_file("application-key.pem")?;
//! let receipt = ReceiptPipeline::new(&key).process_json(&receipt_json)?;
//! let details = ActivityDetails::from(receipt);
//! let family_name = details.user_profile().family_name()?;
//! ```
//!
//! Outbound calls are signed with [`request::SignedRequest`]; the transport is
//! supplied by the caller through [`client::HttpClient`].

pub mod activity;
pub mod anchor;
pub mod attribute;
pub mod client;
pub mod config;
pub mod crypto;
pub mod error;
pub mod profile;
pub mod proto;
pub mod receipt;
pub mod request;

pub use activity::ActivityDetails;
pub use error::ErrorKind;
pub use receipt::{DecryptedReceipt, Receipt, ReceiptPipeline};
pub use request::SignedRequest;
