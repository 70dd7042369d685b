//! Integration tests for the ownerless-property query.

use std::fs;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use predial_model::QueryResult;
use predial_query::{
    QueryError, find_ownerless_properties, identify_ownerless_properties,
    try_identify_ownerless_properties,
};
use predial_xml::{XmlDocument, XmlElement};
use proptest::prelude::*;
use tracing_subscriber::fmt::MakeWriter;

fn parse(input: &str) -> XmlDocument {
    XmlDocument::parse_str(input).expect("test document should parse")
}

fn predio_xml(code: Option<&str>, documento: Option<&str>) -> String {
    let code = code
        .map(|c| format!("<codigo_predial_nacional>{c}</codigo_predial_nacional>"))
        .unwrap_or_default();
    let interesados = documento
        .map(|d| {
            format!(
                "<interesados><persona_natural><documento>{d}</documento></persona_natural></interesados>"
            )
        })
        .unwrap_or_default();
    format!("<predio>{code}<destino>habitacional</destino>{interesados}</predio>")
}

fn registro(predios: &[String]) -> String {
    format!("<registro><municipio>{}</municipio></registro>", predios.concat())
}

#[test]
fn scenario_empty_document_is_reported() {
    let doc = parse(&registro(&[predio_xml(Some("001"), Some(""))]));

    let result = find_ownerless_properties(&doc);

    insta::assert_json_snapshot!(result, @r#"
    {
      "conteo": 1,
      "numeros_prediales": [
        "001"
      ]
    }
    "#);
}

#[test]
fn scenario_present_document_is_not_reported() {
    let doc = parse(&registro(&[predio_xml(Some("002"), Some("123456789"))]));

    assert_eq!(find_ownerless_properties(&doc), QueryResult::empty());
}

#[test]
fn scenario_missing_code_is_skipped() {
    let doc = parse(&registro(&[predio_xml(None, Some(""))]));

    assert_eq!(find_ownerless_properties(&doc), QueryResult::empty());
}

#[test]
fn scenario_shared_code_is_reported_once() {
    let doc = parse(&registro(&[
        predio_xml(Some("003"), Some("")),
        predio_xml(Some("003"), Some("")),
    ]));

    let result = find_ownerless_properties(&doc);

    assert_eq!(result.count, 1);
    assert_eq!(result.property_codes, vec!["003"]);
}

#[test]
fn scenario_missing_interesados_is_reported() {
    let doc = parse(&registro(&[predio_xml(Some("004"), None)]));

    assert_eq!(
        find_ownerless_properties(&doc),
        QueryResult::from_codes(vec!["004".to_string()])
    );
}

#[test]
fn scenario_broken_file_yields_empty_result() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Registro_catastral_25999.xml");
    fs::write(&path, "<registro><predio><codigo_predial_nacional>005").unwrap();

    assert_eq!(identify_ownerless_properties(&path), QueryResult::empty());
    let error = try_identify_ownerless_properties(&path).unwrap_err();
    assert!(matches!(error, QueryError::Xml(_)));
    assert!(error.to_string().contains("Registro_catastral_25999.xml"));
}

/// In-memory log sink for asserting on emitted diagnostics.
#[derive(Clone, Default)]
struct CapturedLogs {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock().unwrap()).into_owned()
    }
}

struct CapturedLogsGuard {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl Write for CapturedLogsGuard {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().unwrap().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogsGuard;

    fn make_writer(&'a self) -> Self::Writer {
        CapturedLogsGuard {
            buffer: Arc::clone(&self.buffer),
        }
    }
}

#[test]
fn broken_file_emits_diagnostic_with_path_and_cause() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Registro_catastral_25999.xml");
    fs::write(&path, "<registro><predio><codigo_predial_nacional>005").unwrap();
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .finish();

    let result = tracing::subscriber::with_default(subscriber, || {
        identify_ownerless_properties(&path)
    });

    assert_eq!(result, QueryResult::empty());
    let output = logs.contents();
    assert!(output.contains("ERROR"), "{output}");
    assert!(output.contains("error processing registry file"), "{output}");
    assert!(output.contains(&path.display().to_string()), "{output}");
    assert!(
        output.contains("unclosed element <codigo_predial_nacional>"),
        "{output}"
    );
}

#[test]
fn missing_file_yields_empty_result() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.xml");

    assert_eq!(identify_ownerless_properties(&path), QueryResult::empty());
}

#[test]
fn empty_code_element_is_skipped() {
    let doc = parse(
        "<registro><predio><codigo_predial_nacional></codigo_predial_nacional>\
         <interesados><persona_natural><documento/></persona_natural></interesados>\
         </predio></registro>",
    );

    assert!(find_ownerless_properties(&doc).is_empty());
}

#[test]
fn only_first_documento_is_inspected() {
    let first_blank = parse(
        "<registro><predio><codigo_predial_nacional>010</codigo_predial_nacional>\
         <interesados><persona_natural><documento> </documento></persona_natural></interesados>\
         <interesados><persona_natural><documento>52111222</documento></persona_natural></interesados>\
         </predio></registro>",
    );
    let first_present = parse(
        "<registro><predio><codigo_predial_nacional>011</codigo_predial_nacional>\
         <interesados><persona_natural><documento>52111222</documento></persona_natural></interesados>\
         <interesados><persona_natural><documento></documento></persona_natural></interesados>\
         </predio></registro>",
    );

    assert_eq!(find_ownerless_properties(&first_blank).property_codes, vec!["010"]);
    assert!(find_ownerless_properties(&first_present).is_empty());
}

#[test]
fn documento_outside_persona_natural_is_ignored() {
    let doc = parse(
        "<registro><predio><codigo_predial_nacional>012</codigo_predial_nacional>\
         <interesados><persona_juridica><documento>900123456</documento></persona_juridica></interesados>\
         </predio></registro>",
    );

    assert_eq!(find_ownerless_properties(&doc).property_codes, vec!["012"]);
}

#[test]
fn predios_are_found_at_any_depth_in_document_order() {
    let doc = parse(&format!(
        "<registro>{}<zona><sector>{}</sector></zona>{}</registro>",
        predio_xml(Some("b"), None),
        predio_xml(Some("a"), Some("")),
        predio_xml(Some("c"), Some("1")),
    ));

    assert_eq!(find_ownerless_properties(&doc).property_codes, vec!["b", "a"]);
}

#[test]
fn root_element_named_predio_is_not_a_property() {
    let doc = parse("<predio><codigo_predial_nacional>013</codigo_predial_nacional></predio>");

    assert!(find_ownerless_properties(&doc).is_empty());
}

#[test]
fn code_first_seen_with_document_keeps_its_position() {
    let doc = parse(&registro(&[
        predio_xml(Some("020"), Some("1")),
        predio_xml(Some("021"), Some("")),
        predio_xml(Some("020"), Some("")),
    ]));

    assert_eq!(
        find_ownerless_properties(&doc).property_codes,
        vec!["020", "021"]
    );
}

#[test]
fn entity_encoded_document_counts_as_present() {
    let doc = parse(&registro(&[predio_xml(Some("030"), Some("&#49;&#50;"))]));

    assert!(find_ownerless_properties(&doc).is_empty());
}

#[test]
fn latin1_registry_file_is_queried() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Registro_catastral_25430.xml");
    let mut contents = br#"<?xml version="1.0" encoding="ISO-8859-1"?>
<registro><predio><codigo_predial_nacional>001</codigo_predial_nacional><direccion>"#
        .to_vec();
    contents.extend_from_slice(b"CALLE \xD1");
    contents.extend_from_slice(
        b"</direccion><interesados><persona_natural><documento></documento>\
          </persona_natural></interesados></predio></registro>",
    );
    fs::write(&path, contents).unwrap();

    assert_eq!(
        identify_ownerless_properties(&path),
        QueryResult::from_codes(vec!["001".to_string()])
    );
}

fn arbitrary_predio() -> impl Strategy<Value = (Option<String>, Option<String>)> {
    let code = prop::option::of(prop::sample::select(vec!["", "001", "002", "003", "004"]))
        .prop_map(|code| code.map(str::to_string));
    let documento = prop::option::of(prop::sample::select(vec!["", "  ", "\n\t", "1015", " 79 "]))
        .prop_map(|doc| doc.map(str::to_string));
    (code, documento)
}

fn build_document(predios: &[(Option<String>, Option<String>)]) -> XmlDocument {
    let mut root = XmlElement::new("registro");
    for (code, documento) in predios {
        let mut predio = XmlElement::new("predio");
        if let Some(code) = code {
            predio = predio.with_child(XmlElement::new("codigo_predial_nacional").with_text(code));
        }
        if let Some(documento) = documento {
            predio = predio.with_child(XmlElement::new("interesados").with_child(
                XmlElement::new("persona_natural")
                    .with_child(XmlElement::new("documento").with_text(documento)),
            ));
        }
        root = root.with_child(predio);
    }
    XmlDocument { root }
}

fn expected_codes(predios: &[(Option<String>, Option<String>)]) -> Vec<String> {
    let mut order: Vec<(String, bool)> = Vec::new();
    for (code, documento) in predios {
        let Some(code) = code.as_deref().filter(|c| !c.is_empty()) else {
            continue;
        };
        let blank = documento.as_deref().is_none_or(|d| d.trim().is_empty());
        match order.iter_mut().find(|(seen, _)| seen == code) {
            Some(entry) => entry.1 |= blank,
            None => order.push((code.to_string(), blank)),
        }
    }
    order
        .into_iter()
        .filter(|(_, blank)| *blank)
        .map(|(code, _)| code)
        .collect()
}

proptest! {
    #[test]
    fn result_matches_reference_model(predios in prop::collection::vec(arbitrary_predio(), 0..24)) {
        let doc = build_document(&predios);

        let first = find_ownerless_properties(&doc);
        let second = find_ownerless_properties(&doc);

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.count, first.property_codes.len());
        let mut unique = first.property_codes.clone();
        unique.sort();
        unique.dedup();
        prop_assert_eq!(unique.len(), first.property_codes.len());
        prop_assert!(first.property_codes.iter().all(|code| !code.is_empty()));
        prop_assert_eq!(first.property_codes, expected_codes(&predios));
    }
}
