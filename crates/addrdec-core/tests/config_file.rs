//! Loading call-site declarations from a TOML file and decoding with them.

use addrdec_core::config::{self, AddrdecConfig};
use addrdec_core::{DecodeOutcome, DecodeStage, Syntax};
use std::io::Write;

const CONFIG: &str = r#"
[defaults]
syntax = "url"
required = true

[defaults.decode]
encoding = "ISO-8859-1"
stages = ["direct-parse", "percent-decode", "base64-decode"]

[sites.redirect]
syntax = "uri"
required = false

[sites.redirect.decode]
stages = ["direct-parse", "base64-decode", "percent-decode"]
"#;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    f.write_all(contents.as_bytes()).unwrap();
    f.flush().unwrap();
    f
}

#[test]
fn load_named_sites() {
    let f = write_config(CONFIG);
    let cfg = config::load_from(f.path()).unwrap();

    let redirect = cfg.call_site(Some("redirect"));
    assert_eq!(redirect.syntax, Syntax::Uri);
    assert!(!redirect.required);
    assert_eq!(redirect.decode.stages[1], DecodeStage::Base64Decode);
    assert_eq!(redirect.decode.encoding, "ISO-8859-1");

    let param = redirect.parameter("uri");
    assert_eq!(param.resolve(None), DecodeOutcome::Absent);
    let addr = param.bind(Some("L2EvYj9jPWQ=")).unwrap().unwrap();
    // direct-parse is listed first and the Base64 text is itself a valid relative reference.
    assert_eq!(addr.as_str(), "L2EvYj9jPWQ=");

    let url = cfg.call_site(None).parameter("url");
    let addr = url.bind(Some("aHR0cDovL2V4YW1wbGUuY29tLw==")).unwrap().unwrap();
    assert_eq!(addr.as_str(), "http://example.com/");
}

#[test]
fn empty_file_yields_defaults() {
    let f = write_config("");
    let cfg = config::load_from(f.path()).unwrap();
    assert_eq!(cfg, AddrdecConfig::default());
}

#[test]
fn invalid_file_reports_path() {
    let f = write_config("[defaults]\nsyntax = \"urn\"\n");
    let err = config::load_from(f.path()).unwrap_err();
    assert!(format!("{err:#}").contains(&f.path().display().to_string()));
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(config::load_from(&dir.path().join("absent.toml")).is_err());
}
