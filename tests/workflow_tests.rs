//! Approval workflow and discussion tests

mod common;

use common::Sandbox;
use predicates::prelude::*;
use serde_json::Value;

fn last_entry(record: &Value) -> &Value {
    record["changelog"].as_array().unwrap().last().unwrap()
}

// ============================================================================
// Approve / reject
// ============================================================================

#[test]
fn test_approve_cluster() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["cluster", "approve", "CL-001", "-m", "Fix validated"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Approved CL-001 as Test User"));
}

#[test]
fn test_approve_records_changelog() {
    let sandbox = Sandbox::new();
    let cluster = sandbox.json(&["cluster", "approve", "CL-001", "-m", "Fix validated", "-o", "json"]);

    assert_eq!(cluster["status"], "approved");
    let entry = last_entry(&cluster);
    assert_eq!(entry["action"], "Approved");
    assert_eq!(entry["user"], "Test User");
    assert_eq!(entry["comment"], "Fix validated");
    assert!(entry["id"].as_str().unwrap().starts_with("LOG-"));
    // The seed entry is still there
    assert_eq!(cluster["changelog"].as_array().unwrap().len(), 2);
}

#[test]
fn test_approve_requires_comment() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["cluster", "approve", "CL-001"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("approval comment is required"));
}

#[test]
fn test_comment_optional_when_configured() {
    let sandbox = Sandbox::new();
    sandbox.write_config("workflow:\n  require_approval_comment: false\n");
    sandbox
        .cmd()
        .args(["cluster", "approve", "CL-002"])
        .assert()
        .success();
}

#[test]
fn test_reject_requires_reason() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["cluster", "reject", "CL-002", "--reason", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("rejection reason is required"));
}

#[test]
fn test_reject_sets_reason() {
    let sandbox = Sandbox::new();
    let cluster = sandbox.json(&[
        "cluster",
        "reject",
        "CL-002",
        "-r",
        "Root cause not confirmed",
        "-o",
        "json",
    ]);
    assert_eq!(cluster["status"], "rejected");
    assert_eq!(cluster["rejection_reason"], "Root cause not confirmed");
    assert_eq!(last_entry(&cluster)["comment"], "Root cause not confirmed");
}

#[test]
fn test_reject_approved_cluster_fails() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["cluster", "reject", "CL-004", "-r", "Too late"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid status transition"));
}

#[test]
fn test_reapproval_appends_row() {
    let sandbox = Sandbox::new();
    let cluster = sandbox.json(&["cluster", "approve", "CL-004", "-m", "Again", "-o", "json"]);
    assert_eq!(cluster["status"], "approved");
    assert_eq!(cluster["changelog"].as_array().unwrap().len(), 2);
}

#[test]
fn test_bulk_reject_clusters() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["cluster", "reject", "CL-001", "CL-002", "-r", "Duplicate", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rejected CL-001"))
        .stdout(predicate::str::contains("Rejected CL-002"));
}

#[test]
fn test_bulk_reject_is_all_or_nothing() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["cluster", "reject", "CL-001", "CL-004", "-r", "Duplicate", "--yes"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Rejected").not());
}

#[test]
fn test_bulk_without_terminal_needs_yes() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["cluster", "reject", "CL-001", "CL-002", "-r", "Duplicate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));
}

#[test]
fn test_ids_from_stdin() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["cluster", "approve", "-", "-m", "Batch", "--yes"])
        .write_stdin("CL-001\nCL-005\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Approved CL-001"))
        .stdout(predicate::str::contains("Approved CL-005"));
}

#[test]
fn test_submit_for_approval() {
    let sandbox = Sandbox::new();
    let cluster = sandbox.json(&[
        "cluster",
        "submit",
        "CL-002",
        "--team",
        "Machining",
        "--type",
        "expedited",
        "-m",
        "Line down",
        "-o",
        "json",
    ]);
    assert_eq!(cluster["status"], "pending");
    assert_eq!(cluster["submission_type"], "expedited");
    let entry = last_entry(&cluster);
    assert_eq!(entry["action"], "Submitted for approval");
    assert_eq!(entry["comment"], "Submitted to Machining as expedited: Line down");
}

#[test]
fn test_submit_requires_team() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["cluster", "submit", "CL-002", "--team", ""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("target team is required"));
}

// ============================================================================
// Approval requests
// ============================================================================

#[test]
fn test_approval_bulk_reject_json_is_one_document() {
    let sandbox = Sandbox::new();
    let value = sandbox.json(&[
        "approval",
        "bulk-reject",
        "APR-001",
        "APR-002",
        "-r",
        "Budget freeze",
        "--yes",
        "-o",
        "json",
    ]);
    let records = value.as_array().unwrap();
    assert_eq!(records.len(), 2);
    for record in records {
        assert_eq!(record["status"], "rejected");
        assert_eq!(record["rejection_reason"], "Budget freeze");
    }
}

#[test]
fn test_approval_bulk_reject_progress_goes_to_stderr() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["approval", "bulk-reject", "APR-001", "-r", "dup", "--yes", "-o", "id"])
        .assert()
        .success()
        .stdout("APR-001\n")
        .stderr(predicate::str::contains("Rejecting 1 request(s)"))
        .stderr(predicate::str::contains("Reason: dup"));
}

#[test]
fn test_bulk_cluster_approve_csv_has_one_header() {
    let sandbox = Sandbox::new();
    let out = sandbox.stdout(&[
        "cluster", "approve", "CL-001", "CL-002", "-m", "Batch", "--yes", "-o", "csv",
    ]);
    let mut lines = out.lines();
    assert!(lines.next().unwrap().starts_with("id,"));
    let rows: Vec<&str> = lines.collect();
    assert_eq!(rows.len(), 2);
    assert!(rows[0].starts_with("CL-001,"));
    assert!(rows[1].starts_with("CL-002,"));
}

#[test]
fn test_bulk_cluster_reject_json_is_one_document() {
    let sandbox = Sandbox::new();
    let value = sandbox.json(&[
        "cluster", "reject", "CL-001", "CL-005", "-r", "Duplicate", "--yes", "-o", "json",
    ]);
    let ids: Vec<&str> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["CL-001", "CL-005"]);
}

#[test]
fn test_bulk_help_mentions_yes_for_piped_ids() {
    for surface in [["cluster", "approve"], ["cluster", "reject"], ["approval", "bulk-reject"]] {
        Sandbox::new()
            .cmd()
            .args(surface)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("IDs are piped in"));
    }
}

#[test]
fn test_approval_bulk_reject_blank_reason() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["approval", "bulk-reject", "APR-001", "-r", "", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("rejection reason is required"));
}

#[test]
fn test_approval_approve_uses_user_flag() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["--user", "Alice", "approval", "approve", "APR-003", "-m", "ok"])
        .assert()
        .success()
        .stdout(predicate::str::contains("as Alice"));
}

#[test]
fn test_user_from_config_file() {
    let sandbox = Sandbox::new();
    sandbox.write_config("user: Config User\n");
    sandbox
        .cmd()
        .env_remove("QAT_USER")
        .args(["approval", "approve", "APR-003", "-m", "ok"])
        .assert()
        .success()
        .stdout(predicate::str::contains("as Config User"));
}

#[test]
fn test_malformed_config_is_reported() {
    let sandbox = Sandbox::new();
    sandbox.write_config("user: [unclosed\n");
    sandbox
        .cmd()
        .args(["cluster", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid config file"));
}

// ============================================================================
// Discussion
// ============================================================================

#[test]
fn test_post_comment() {
    let sandbox = Sandbox::new();
    let request = sandbox.json(&[
        "approval",
        "comment",
        "APR-002",
        "Need a cost breakdown",
        "-o",
        "json",
    ]);
    let discussion = request["discussion"].as_array().unwrap();
    assert_eq!(discussion.len(), 1);
    assert_eq!(discussion[0]["text"], "Need a cost breakdown");
    assert_eq!(discussion[0]["user"], "Test User");
    assert_eq!(last_entry(&request)["action"], "Commented");
}

#[test]
fn test_blank_comment_rejected() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["approval", "comment", "APR-002", "  "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Message text is required"));
}

#[test]
fn test_reply_to_message() {
    let sandbox = Sandbox::new();
    let request = sandbox.json(&[
        "approval",
        "reply",
        "APR-001",
        "MSG-0001",
        "Confirmed on the line",
        "-o",
        "json",
    ]);
    let replies = request["discussion"][0]["replies"].as_array().unwrap();
    assert_eq!(replies.len(), 2);
    assert_eq!(replies[1]["text"], "Confirmed on the line");
    assert_eq!(last_entry(&request)["action"], "Replied");
}

#[test]
fn test_reply_to_unknown_message() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["approval", "reply", "APR-001", "MSG-9999", "Hello"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No message MSG-9999"));
}

// ============================================================================
// Repair actions and containments
// ============================================================================

#[test]
fn test_assign_action() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["action", "assign", "RA-002", "J. Smith"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Assigned RA-002 to J. Smith"));
}

#[test]
fn test_action_comment() {
    let sandbox = Sandbox::new();
    let action = sandbox.json(&["action", "comment", "RA-001", "Study booked", "-o", "json"]);
    assert_eq!(action["discussion"][0]["text"], "Study booked");
}

#[test]
fn test_action_reject_needs_reason() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["action", "reject", "RA-002"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("rejection reason is required"));
}

#[test]
fn test_expire_containment() {
    let sandbox = Sandbox::new();
    let containment = sandbox.json(&[
        "containment",
        "expire",
        "CNT-001",
        "-m",
        "Fix validated",
        "-o",
        "json",
    ]);
    assert_eq!(containment["status"], "expired");

    sandbox
        .cmd()
        .args(["containment", "expire", "CNT-003"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid status transition"));
}
