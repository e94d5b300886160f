use std::path::{Path, PathBuf};

use anyhow::{Context, Error};
use clap::Parser;
use clap_stdin::MaybeStdin;
use serde_json::{json, Value};
use time::format_description::well_known::Rfc3339;
use tracing_subscriber::EnvFilter;
use yoti_receipt::{
    anchor::Anchor,
    attribute::Attribute,
    crypto::{decrypt_token, load_private_key_file},
    profile::Profile,
    ReceiptPipeline, SignedRequest,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    action: Action,
}

#[derive(Debug, clap::Subcommand)]
enum Action {
    /// Decrypt a receipt and print its attributes and anchors.
    DecryptReceipt {
        /// PEM encoded RSA private key of the application.
        #[arg(long)]
        key_file: PathBuf,
        /// Receipt JSON, bare or wrapped in `{"receipt": ...}`.
        receipt: MaybeStdin<String>,
    },
    /// Decrypt a one-time share token.
    DecryptToken {
        #[arg(long)]
        key_file: PathBuf,
        token: MaybeStdin<String>,
    },
    /// Sign a request and print it without sending it.
    Sign {
        #[arg(long)]
        key_file: PathBuf,
        #[arg(long, default_value = "GET")]
        method: String,
        #[arg(long)]
        base_url: String,
        #[arg(long)]
        endpoint: String,
        #[arg(long)]
        body: Option<String>,
    },
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let output = match Args::parse().action {
        Action::DecryptReceipt { key_file, receipt } => {
            decrypt_receipt(&key_file, &receipt.to_string())?
        }
        Action::DecryptToken { key_file, token } => {
            let key = load_private_key_file(&key_file).context("could not load private key")?;
            Value::String(decrypt_token(&token, &key).context("could not decrypt token")?)
        }
        Action::Sign {
            key_file,
            method,
            base_url,
            endpoint,
            body,
        } => sign(&key_file, &method, &base_url, &endpoint, body)?,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn decrypt_receipt(key_file: &Path, receipt: &str) -> Result<Value, Error> {
    let key = load_private_key_file(key_file).context("could not load private key")?;
    let receipt = ReceiptPipeline::new(&key)
        .process_json(receipt.as_bytes())
        .context("could not decrypt receipt")?;
    Ok(json!({
        "receipt_id": receipt.receipt_id(),
        "remember_me_id": receipt.remember_me_id(),
        "parent_remember_me_id": receipt.parent_remember_me_id(),
        "timestamp": receipt.timestamp().map(|t| t.format(&Rfc3339)).transpose()?,
        "profile": profile_json(receipt.profile()),
        "other_party_profile": profile_json(receipt.other_party_profile()),
    }))
}

fn profile_json(profile: &Profile) -> Value {
    profile.attributes().iter().map(attribute_json).collect()
}

fn attribute_json(attribute: &Attribute) -> Value {
    let value = match attribute.value() {
        Ok(value) => value.to_json(),
        Err(e) => json!({ "error": e.to_string() }),
    };
    json!({
        "name": attribute.name(),
        "content_type": format!("{:?}", attribute.content_type()),
        "value": value,
        "anchors": attribute.anchors().iter().map(anchor_json).collect::<Value>(),
    })
}

fn anchor_json(anchor: &Anchor) -> Value {
    json!({
        "type": anchor.anchor_type().to_string(),
        "sub_type": anchor.sub_type(),
        "values": anchor.values(),
        "signed_timestamp": anchor.signed_timestamp().map(|t| t.timestamp().unix_timestamp()),
        "certificates": anchor
            .origin_certificates()
            .iter()
            .map(|c| c.common_name())
            .collect::<Vec<_>>(),
    })
}

fn sign(
    key_file: &Path,
    method: &str,
    base_url: &str,
    endpoint: &str,
    body: Option<String>,
) -> Result<Value, Error> {
    let key = load_private_key_file(key_file).context("could not load private key")?;
    let mut builder = SignedRequest::builder()
        .with_key(key)
        .with_http_method(method)
        .with_base_url(base_url)
        .with_endpoint(endpoint);
    if let Some(body) = body {
        builder = builder.with_body(body.into_bytes());
    }
    let request = builder.build().context("could not sign request")?;
    Ok(json!({
        "method": request.method(),
        "url": request.url(),
        "headers": request.headers(),
        "digest": request.digest(),
        "body": request.body().map(String::from_utf8_lossy),
    }))
}
