//! Pipeline orchestration and E2E integration tests against the fixture corpus.

mod common;

use common::*;
use pretty_assertions::assert_eq;

use mailweb_core::graph::query::describe;

// ===========================================================================
// Discovery + parsing
// ===========================================================================

#[test]
fn discovery_skips_hidden_folders() {
    let r = run_discovery("enron_small");
    assert_eq!(r.messages.files.len(), 7);
    assert!(r
        .messages
        .files
        .iter()
        .all(|p| !p.to_string_lossy().contains(".archive")));
}

#[test]
fn parsing_builds_expected_graph() {
    let r = run_two_phases("enron_small");
    assert_eq!(r.stats.files_read, 7);
    assert_eq!(r.stats.records, 7);
    assert_eq!(r.graph.identity_count(), 8);
    assert_eq!(r.graph.edge_count(), 7);
    assert!(!r.graph.contains("ivan@enron.com"), "self mail adds no node");
    assert!(!r.graph.contains("zed@enron.com"), "hidden folder was read");
}

#[test]
fn footprints_from_fixture() {
    let r = run_two_phases("enron_small");

    let dave = describe(&r.graph, "dave@enron.com");
    assert_eq!((dave.sent, dave.received, dave.team_size), (2, 2, 3));

    let alice = describe(&r.graph, "alice@enron.com");
    assert_eq!((alice.sent, alice.received, alice.team_size), (2, 0, 2));

    let missing = describe(&r.graph, "ken.lay@enron.com");
    assert!(!missing.present);
}

// ===========================================================================
// Pipeline orchestration
// ===========================================================================

#[test]
fn pipeline_finds_connectors() {
    let out = mailweb_core::pipeline::run_pipeline(&fixture_config("enron_small"), None).unwrap();
    assert_eq!(out.result.connectors, vec!["carol@enron.com", "dave@enron.com"]);
    assert_eq!(out.report.components, 2);
}

#[test]
fn pipeline_stats() {
    let out = mailweb_core::pipeline::run_pipeline(&fixture_config("enron_small"), None).unwrap();
    let result = &out.result;
    assert_eq!(result.stat("files"), 7);
    assert_eq!(result.stat("messages"), 7);
    assert_eq!(result.stat("identities"), 8);
    assert_eq!(result.stat("edges"), 7);
    assert_eq!(result.stat("components"), 2);
    assert_eq!(result.stat("connectors"), 2);
    assert_eq!(result.stat("skipped_files"), 0);
}

#[test]
fn pipeline_reports_phases_in_order() {
    let seen = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
    let callback: mailweb_core::pipeline::ProgressCallback = {
        let seen = seen.clone();
        Box::new(move |phase, _label| seen.borrow_mut().push(phase.to_string()))
    };
    mailweb_core::pipeline::run_pipeline(&fixture_config("enron_small"), Some(callback)).unwrap();
    assert_eq!(*seen.borrow(), vec!["discovery", "parsing", "connectors"]);
}

#[test]
fn pipeline_phase_timings() {
    let out = mailweb_core::pipeline::run_pipeline(&fixture_config("enron_small"), None).unwrap();
    let timings = out
        .result
        .metadata
        .get("phase_timings")
        .and_then(|v| v.as_object())
        .expect("phase_timings in metadata");
    for phase in ["discovery", "parsing", "connectors"] {
        assert!(timings.contains_key(phase), "Missing phase timing: {phase}");
    }
}

#[test]
fn pipeline_rejects_missing_folder() {
    let config = mailweb_core::config::AnalysisConfig {
        mail_path: "/definitely/not/a/mail/folder".to_string(),
        ..Default::default()
    };
    assert!(mailweb_core::pipeline::run_pipeline(&config, None).is_err());
    assert!(mailweb_core::pipeline::build_graph(&config).is_err());
}

#[test]
fn build_graph_matches_pipeline_graph() {
    let config = fixture_config("enron_small");
    let graph = mailweb_core::pipeline::build_graph(&config).unwrap();
    let out = mailweb_core::pipeline::run_pipeline(&config, None).unwrap();
    assert_eq!(graph.all_identities(), out.graph.all_identities());
}

// ===========================================================================
// Outputs
// ===========================================================================

#[test]
fn connector_file_written() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("connectors.txt");
    let out = mailweb_core::pipeline::run_pipeline(&fixture_config("enron_small"), None).unwrap();
    mailweb_core::output::write_connectors(&out.report.connectors, path.to_str().unwrap()).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text, "carol@enron.com\ndave@enron.com\n");
}

#[test]
fn json_report_written_and_read() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.json");
    let out = mailweb_core::pipeline::run_pipeline(&fixture_config("enron_small"), None).unwrap();
    mailweb_core::output::write_output(&out.result, path.to_str().unwrap()).unwrap();
    let content = std::fs::read_to_string(&path).unwrap();
    let parsed: mailweb_core::config::AnalysisResult = serde_json::from_str(&content).unwrap();
    assert_eq!(parsed.connectors, out.result.connectors);
    assert!(parsed.metadata.contains_key("mail_path"));
}

#[test]
fn interactive_session_over_fixture() {
    let out = mailweb_core::pipeline::run_pipeline(&fixture_config("enron_small"), None).unwrap();
    let mut buf = Vec::new();
    let answered = mailweb_core::session::run_query_session(
        &out.graph,
        "carol@enron.com\nnobody@enron.com\nEXIT\n".as_bytes(),
        &mut buf,
    )
    .unwrap();
    let text = String::from_utf8(buf).unwrap();
    assert_eq!(answered, 2);
    assert!(text.contains("Details for carol@enron.com:"));
    assert!(text.contains("Number of email addresses in the same team: 3"));
    assert!(text.contains("Email address (nobody@enron.com) not found in the dataset."));
    assert!(text.ends_with("Goodbye!\n"));
}
