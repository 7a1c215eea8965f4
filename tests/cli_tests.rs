//! CLI tests for listing, filtering and showing records

mod common;

use common::{qat, Sandbox};
use predicates::prelude::*;

fn ids(output: &str) -> Vec<&str> {
    output.lines().collect()
}

// ============================================================================
// Basics
// ============================================================================

#[test]
fn test_help() {
    qat()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("cluster"))
        .stdout(predicate::str::contains("approval"));
}

#[test]
fn test_version() {
    qat()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("qat"));
}

#[test]
fn test_completions() {
    qat()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("qat"));
}

#[test]
fn test_unknown_output_format() {
    qat()
        .args(["cluster", "list", "-o", "xml"])
        .assert()
        .failure();
}

// ============================================================================
// Cluster listing and filters
// ============================================================================

#[test]
fn test_cluster_list_table() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["cluster", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CL-001"))
        .stdout(predicate::str::contains("TITLE"))
        .stdout(predicate::str::contains("6 clusters found"));
}

#[test]
fn test_cluster_list_count() {
    let sandbox = Sandbox::new();
    assert_eq!(sandbox.stdout(&["cluster", "list", "--count"]).trim(), "6");
}

#[test]
fn test_filter_by_program() {
    let sandbox = Sandbox::new();
    let out = sandbox.stdout(&["cluster", "list", "--program", "Alpha", "-o", "id"]);
    assert_eq!(ids(&out), vec!["CL-001", "CL-002"]);
}

#[test]
fn test_program_match_is_case_sensitive() {
    let sandbox = Sandbox::new();
    let out = sandbox.stdout(&["cluster", "list", "--program", "alpha", "--count"]);
    assert_eq!(out.trim(), "0");
}

#[test]
fn test_filters_combine_with_and() {
    let sandbox = Sandbox::new();
    let out = sandbox.stdout(&[
        "cluster",
        "list",
        "--severity",
        "high",
        "--max-cost",
        "15000",
        "-o",
        "id",
    ]);
    assert_eq!(ids(&out), vec!["CL-001", "CL-005"]);
}

#[test]
fn test_filter_any_of_several_categories() {
    let sandbox = Sandbox::new();
    let out = sandbox.stdout(&[
        "cluster",
        "list",
        "--category",
        "Paint,Electrical",
        "-o",
        "id",
    ]);
    assert_eq!(ids(&out), vec!["CL-003", "CL-004"]);
}

#[test]
fn test_filter_by_status() {
    let sandbox = Sandbox::new();
    let out = sandbox.stdout(&["cluster", "list", "--status", "rejected", "-o", "id"]);
    assert_eq!(ids(&out), vec!["CL-006"]);
}

#[test]
fn test_date_only_end_bound_is_midnight() {
    let sandbox = Sandbox::new();
    // CL-003 was created 2024-03-05T14:00:00Z, after midnight of the end date
    let out = sandbox.stdout(&[
        "cluster", "list", "--from", "2024-03-01", "--to", "2024-03-05", "--count",
    ]);
    assert_eq!(out.trim(), "0");

    let out = sandbox.stdout(&[
        "cluster", "list", "--from", "2024-03-01", "--to", "2024-03-06", "-o", "id",
    ]);
    assert_eq!(ids(&out), vec!["CL-003"]);
}

#[test]
fn test_search_is_case_insensitive() {
    let sandbox = Sandbox::new();
    let out = sandbox.stdout(&["cluster", "list", "--search", "POROSITY", "-o", "id"]);
    assert_eq!(ids(&out), vec!["CL-001"]);

    // Matches in the description too
    let out = sandbox.stdout(&["cluster", "list", "--search", "booth humidity", "-o", "id"]);
    assert_eq!(ids(&out), vec!["CL-003"]);
}

#[test]
fn test_no_matches_message() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["cluster", "list", "--program", "Nowhere"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No clusters found."));
}

#[test]
fn test_limit() {
    let sandbox = Sandbox::new();
    let out = sandbox.stdout(&["cluster", "list", "-n", "2", "-o", "id"]);
    assert_eq!(ids(&out), vec!["CL-001", "CL-002"]);
}

#[test]
fn test_cluster_list_json() {
    let sandbox = Sandbox::new();
    let value = sandbox.json(&["cluster", "list", "-o", "json"]);
    let clusters = value.as_array().unwrap();
    assert_eq!(clusters.len(), 6);
    assert_eq!(clusters[0]["id"], "CL-001");
    assert_eq!(clusters[0]["confidence"], 92);
}

#[test]
fn test_cluster_list_csv() {
    let sandbox = Sandbox::new();
    let out = sandbox.stdout(&["cluster", "list", "-o", "csv"]);
    let mut lines = out.lines();
    assert!(lines.next().unwrap().starts_with("id,title,severity"));
    assert_eq!(lines.count(), 6);
}

#[test]
fn test_cluster_list_yaml() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["cluster", "list", "--program", "Gamma", "-o", "yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("id: CL-004"));
}

// ============================================================================
// Show
// ============================================================================

#[test]
fn test_cluster_show() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["cluster", "show", "CL-001"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Weld porosity on rear bracket seams"))
        .stdout(predicate::str::contains("CNT-001"))
        .stdout(predicate::str::contains("History"));
}

#[test]
fn test_show_unknown_id() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["cluster", "show", "CL-999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No cluster found"));
}

#[test]
fn test_show_wrong_kind_of_id() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["cluster", "show", "APR-001"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a cluster ID"));
}

#[test]
fn test_approval_show_with_dangling_cluster() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["approval", "show", "APR-004"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CL-099"))
        .stdout(predicate::str::contains("(not found)"));
}

#[test]
fn test_approval_show_discussion() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["approval", "show", "APR-001"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Does the new schedule affect cycle time?"))
        .stdout(predicate::str::contains("Adds about 4 s per bracket"));
}

#[test]
fn test_approval_list_pending() {
    let sandbox = Sandbox::new();
    let out = sandbox.stdout(&["approval", "list", "--pending", "-o", "id"]);
    assert_eq!(ids(&out), vec!["APR-001", "APR-002", "APR-003", "APR-004"]);
}

#[test]
fn test_approval_list_by_team() {
    let sandbox = Sandbox::new();
    let out = sandbox.stdout(&["approval", "list", "--team", "Quality", "-o", "id"]);
    assert_eq!(ids(&out), vec!["APR-001", "APR-004"]);
}

// ============================================================================
// Other surfaces
// ============================================================================

#[test]
fn test_repair_list_and_show() {
    let sandbox = Sandbox::new();
    let out = sandbox.stdout(&["repair", "list", "--status", "active", "-o", "id"]);
    assert_eq!(ids(&out), vec!["SR-001", "SR-002", "SR-003"]);

    sandbox
        .cmd()
        .args(["repair", "show", "SR-001"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Mark porous segment"));
}

#[test]
fn test_containment_list_by_area() {
    let sandbox = Sandbox::new();
    let out = sandbox.stdout(&["containment", "list", "--area", "Paint Booth B", "-o", "id"]);
    assert_eq!(ids(&out), vec!["CNT-002"]);
}

#[test]
fn test_action_list_unassigned() {
    let sandbox = Sandbox::new();
    let out = sandbox.stdout(&["action", "list", "--unassigned", "-o", "id"]);
    assert_eq!(ids(&out), vec!["RA-002"]);
}

#[test]
fn test_risk_summary_json() {
    let sandbox = Sandbox::new();
    let summary = sandbox.json(&["risk", "summary", "-o", "json"]);
    assert_eq!(summary["count"], 5);
    assert_eq!(summary["total_exposure"].as_f64().unwrap(), 1_290_000.0);
    assert!((summary["expected_cost"].as_f64().unwrap() - 135_000.0).abs() < 1e-6);
    assert_eq!(summary["by_severity"]["high"], 3);
}

#[test]
fn test_risk_summary_follows_filters() {
    let sandbox = Sandbox::new();
    let summary = sandbox.json(&["risk", "summary", "--program", "Alpha", "-o", "json"]);
    assert_eq!(summary["count"], 2);
    assert_eq!(summary["total_exposure"].as_f64().unwrap(), 265_000.0);
    assert!((summary["expected_cost"].as_f64().unwrap() - 46_500.0).abs() < 1e-6);
}

#[test]
fn test_risk_summary_text() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["risk", "summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$1,290,000"))
        .stdout(predicate::str::contains("$135,000"));
}

#[test]
fn test_directive_show_skips_missing_risks() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["directive", "show", "DIR-002"])
        .assert()
        .success()
        .stdout(predicate::str::contains("RISK-003"))
        .stdout(predicate::str::contains("1 targeted risk(s) not found"));
}

#[test]
fn test_issue_list() {
    let sandbox = Sandbox::new();
    let out = sandbox.stdout(&["issue", "list", "--status", "open", "-o", "id"]);
    assert_eq!(ids(&out), vec!["ISS-1001", "ISS-1002", "ISS-1005"]);
}
