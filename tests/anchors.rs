mod common;

use yoti_receipt::{
    anchor::{parse_anchors, Anchor, AnchorSet, AnchorType},
    attribute::decode_attribute_list,
    proto::ContentType,
};

use crate::common::{anchor, attribute, attribute_list, PLAIN_CERT, SOURCE_CERT, VERIFIER_CERT};

#[test]
fn classification_by_extension_oid() {
    let cases: [(&[u8], AnchorType, &[&str]); 3] = [
        (SOURCE_CERT, AnchorType::Source, &["PASSPORT"]),
        (VERIFIER_CERT, AnchorType::Verifier, &["YOTI_ADMIN"]),
        (PLAIN_CERT, AnchorType::Unknown, &[]),
    ];
    for (cert, anchor_type, values) in cases {
        let anchor = Anchor::parse([cert], &[], "");
        assert_eq!(anchor.anchor_type(), anchor_type);
        assert_eq!(anchor.values(), values);
        assert_eq!(anchor.origin_certificates()[0].der(), cert);
    }
}

#[test]
fn signed_timestamp_in_seconds() {
    let anchors = parse_anchors(&[anchor(&[SOURCE_CERT], "", Some(1_234_567_890_000_000))]);
    let signed = anchors[0].signed_timestamp().expect("signed timestamp");
    assert_eq!(signed.timestamp().unix_timestamp(), 1_234_567_890);
    assert_eq!(signed.version(), 1);
}

#[test]
fn partial_chains_are_tolerated() {
    let truncated = &SOURCE_CERT[..SOURCE_CERT.len() / 2];
    let anchors = parse_anchors(&[anchor(&[truncated, VERIFIER_CERT], "", None)]);
    assert_eq!(anchors[0].origin_certificates().len(), 1);
    assert_eq!(anchors[0].anchor_type(), AnchorType::Verifier);
}

#[test]
fn sources_and_verifiers_across_attributes() {
    let mut given_names = attribute("given_names", ContentType::String, b"Jane");
    given_names.anchors = vec![
        anchor(&[SOURCE_CERT], "OCR", None),
        anchor(&[VERIFIER_CERT], "", None),
        anchor(&[PLAIN_CERT], "", None),
    ];
    let mut selfie = attribute("selfie", ContentType::Jpeg, &[0xff, 0xd8]);
    selfie.anchors = vec![anchor(&[VERIFIER_CERT], "", None)];

    let attributes = decode_attribute_list(&attribute_list(vec![given_names, selfie])).unwrap();

    assert_eq!(attributes[0].anchors().len(), 3);
    assert_eq!(attributes[0].sources().len(), 1);
    assert_eq!(attributes[0].verifiers().len(), 1);
    assert_eq!(attributes[0].anchors().of_type(AnchorType::Unknown).len(), 1);
    assert!(attributes[1].sources().is_empty());
    assert_eq!(attributes[1].verifiers()[0].value(), Some("YOTI_ADMIN"));
}
