//! Decoder contract: required/optional handling, stage semantics and ordering,
//! exercised the way a request handler would call it.

use addrdec_core::encode::{base64_encode, percent_encode};
use addrdec_core::stage::{BASE64_BEFORE_PERCENT, DIRECT_THEN_BASE64, PERCENT_BEFORE_BASE64};
use addrdec_core::{
    resolve, AddressParameter, DecodeConfig, DecodeFailure, DecodeOutcome, DecodeStage, Syntax,
};

const TEST_URL: &str = "http://www.google.de?test=123&foo=bar";
const MALFORMED_URL: &str = "<script>Some stupid script.</script>";

fn decoded(outcome: DecodeOutcome) -> String {
    match outcome {
        DecodeOutcome::Present(addr) => addr.into_string(),
        other => panic!("expected Present, got {other:?}"),
    }
}

#[test]
fn raw_url_is_returned_unchanged() {
    let cfg = DecodeConfig::default();
    assert_eq!(decoded(resolve(Some(TEST_URL), true, &cfg, Syntax::Url)), TEST_URL);
}

#[test]
fn percent_encoded_url_is_decoded() {
    let encoded = percent_encode(TEST_URL, "UTF-8").unwrap();
    let cfg = DecodeConfig::default();
    assert_eq!(decoded(resolve(Some(&encoded), true, &cfg, Syntax::Url)), TEST_URL);
}

#[test]
fn base64_encoded_url_is_decoded() {
    let encoded = base64_encode(TEST_URL, "ISO-8859-1").unwrap();
    for stages in [
        DIRECT_THEN_BASE64.to_vec(),
        PERCENT_BEFORE_BASE64.to_vec(),
        BASE64_BEFORE_PERCENT.to_vec(),
    ] {
        let cfg = DecodeConfig::with_stages(stages);
        assert_eq!(decoded(resolve(Some(&encoded), true, &cfg, Syntax::Url)), TEST_URL);
    }
}

#[test]
fn malformed_input_fails_with_decode_error() {
    let cfg = DecodeConfig::default();
    for syntax in [Syntax::Url, Syntax::Uri] {
        match resolve(Some(MALFORMED_URL), true, &cfg, syntax) {
            DecodeOutcome::Failed(DecodeFailure::DecodeError { attempted, .. }) => {
                assert_eq!(attempted, PERCENT_BEFORE_BASE64.to_vec());
            }
            other => panic!("expected decode error, got {other:?}"),
        }
    }
}

#[test]
fn optional_parameter_may_be_absent() {
    let redirect = AddressParameter::new("uri", Syntax::Uri)
        .optional()
        .with_config(DecodeConfig::with_stages(BASE64_BEFORE_PERCENT));
    assert_eq!(redirect.resolve(None), DecodeOutcome::Absent);

    let required = AddressParameter::new("uri", Syntax::Uri);
    assert_eq!(
        required.resolve(None),
        DecodeOutcome::Failed(DecodeFailure::MissingParameter)
    );
}

#[test]
fn present_empty_value_is_not_absent() {
    let optional = AddressParameter::new("uri", Syntax::Uri).optional();
    assert!(matches!(
        optional.resolve(Some("")),
        DecodeOutcome::Failed(DecodeFailure::DecodeError { .. })
    ));
}

#[test]
fn base64_first_for_relative_uris() {
    let encoded = base64_encode("/a/b?c=d", "ISO-8859-1").unwrap();
    let cfg = DecodeConfig::with_stages([DecodeStage::Base64Decode, DecodeStage::PercentDecode]);
    let outcome = resolve(Some(&encoded), true, &cfg, Syntax::Uri);
    let addr = outcome.address().unwrap();
    assert_eq!(addr.as_str(), "/a/b?c=d");
    let uri = addr.as_uri().unwrap();
    assert_eq!(uri.path(), "/a/b");
    assert_eq!(uri.query(), Some("c=d"));
}

#[test]
fn order_decides_between_percent_and_base64() {
    // Both "aGk%3D" and its percent-decoded form "aGk=" are valid relative
    // references, so each order yields a different address.
    let raw = Some("aGk%3D");
    let percent_first =
        DecodeConfig::with_stages([DecodeStage::PercentDecode, DecodeStage::DirectParse]);
    let direct_first =
        DecodeConfig::with_stages([DecodeStage::DirectParse, DecodeStage::PercentDecode]);
    assert_eq!(decoded(resolve(raw, true, &percent_first, Syntax::Uri)), "aGk=");
    assert_eq!(decoded(resolve(raw, true, &direct_first, Syntax::Uri)), "aGk%3D");
}

#[test]
fn latin1_default_reverses_arbitrary_octets() {
    let cfg = DecodeConfig::with_stages([DecodeStage::PercentDecode]);
    let outcome = resolve(Some("http%3A%2F%2Fexample.com%2F%E9t%E9"), true, &cfg, Syntax::Url);
    assert_eq!(decoded(outcome), "http://example.com/\u{e9}t\u{e9}");

    // Same octets are not valid UTF-8, so a UTF-8 call site rejects them.
    let utf8 = cfg.clone().with_encoding("UTF-8");
    assert!(matches!(
        resolve(Some("http%3A%2F%2Fexample.com%2F%E9t%E9"), true, &utf8, Syntax::Url),
        DecodeOutcome::Failed(_)
    ));
}

#[test]
fn unsupported_encoding_only_fails_stages_that_need_it() {
    let cfg = DecodeConfig::default().with_encoding("KOI8-R");
    assert_eq!(
        decoded(resolve(Some("https://example.com/"), true, &cfg, Syntax::Url)),
        "https://example.com/"
    );
    assert!(matches!(
        resolve(Some("https%3A%2F%2Fexample.com%2F"), true, &cfg, Syntax::Url),
        DecodeOutcome::Failed(DecodeFailure::DecodeError { .. })
    ));
}

#[test]
fn form_encoded_spaces() {
    let mut cfg = DecodeConfig::with_stages([DecodeStage::PercentDecode]);
    cfg.plus_as_space = true;
    let outcome = resolve(Some("http%3A%2F%2Fexample.com%2F%3Fq%3Da+b"), true, &cfg, Syntax::Url);
    assert_eq!(decoded(outcome), "http://example.com/?q=a b");
}

#[test]
fn resolve_is_shareable_across_threads() {
    let param = std::sync::Arc::new(AddressParameter::new("url", Syntax::Url));
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let param = param.clone();
            std::thread::spawn(move || {
                let raw = format!("https://example.com/{i}");
                let encoded = base64_encode(&raw, "ISO-8859-1").unwrap();
                let addr = param.bind(Some(&encoded)).unwrap().unwrap();
                assert_eq!(addr.as_str(), raw);
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
}
