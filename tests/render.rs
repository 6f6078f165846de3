mod common;

use adocommits::model::{Commit, ReportOutput};
use adocommits::report::{
    build_document, escape_markdown, group_commits, output_json, output_markdown, output_pdf,
    Block, ReportMeta,
};
use adocommits::util::{latin1_lossy, truncate_message, wrap, ELLIPSIS, MESSAGE_LIMIT};
use common::commit;
use pretty_assertions::assert_eq;
use tempfile::tempdir;

fn with_message(mut c: Commit, message: &str) -> Commit {
    c.message = message.to_string();
    c
}

fn meta() -> ReportMeta {
    ReportMeta::new(None)
}

fn sample() -> Vec<Commit> {
    vec![
        commit("aaaaaaaa1111", "gateway", "2024-01-01T23:00:00Z", &["main"]),
        commit("bbbbbbbb2222", "billing", "2024-01-02T10:00:00Z", &["main", "dev"]),
        commit("cccccccc3333", "billing", "2024-01-02T12:30:00Z", &["main"]),
        commit("dddddddd4444", "analytics", "2024-01-02T09:00:00Z", &["release"]),
    ]
}

fn headings(blocks: &[Block]) -> Vec<String> {
    blocks
        .iter()
        .filter_map(|b| match b {
            Block::Date(d) => Some(format!("date {d}")),
            Block::Repository(r) => Some(format!("repo {r}")),
            Block::Branch { name, count } => Some(format!("branch {name} {count}")),
            Block::Commit(line) => Some(format!("commit {}", line.commit_id)),
            _ => None,
        })
        .collect()
}

#[test]
fn traversal_order_is_dates_desc_then_names_then_time_desc() {
    let doc = build_document(&group_commits(&sample()), &meta());

    assert_eq!(
        headings(&doc.blocks),
        vec![
            "date 2024-01-02",
            "repo analytics",
            "branch release 1",
            "commit Commit ID: dddddddd",
            "repo billing",
            "branch dev 1",
            "commit Commit ID: bbbbbbbb",
            "branch main 2",
            "commit Commit ID: cccccccc",
            "commit Commit ID: bbbbbbbb",
            "date 2024-01-01",
            "repo gateway",
            "branch main 1",
            "commit Commit ID: aaaaaaaa",
        ]
    );
}

#[test]
fn later_date_section_comes_first() {
    let commits = vec![
        commit("a1", "billing", "2024-01-01T23:00:00Z", &["main"]),
        commit("b2", "billing", "2024-01-02T10:00:00Z", &["main"]),
    ];
    let doc = build_document(&group_commits(&commits), &meta());
    let dates: Vec<&str> = doc.date_headings().collect();
    assert_eq!(dates, vec!["2024-01-02", "2024-01-01"]);
}

#[test]
fn commit_line_content() {
    let c = with_message(
        commit("0123456789abcdef", "billing", "2024-01-02T10:04:05+02:00", &["main"]),
        "  Add invoices\n\nLonger body  ",
    );
    let doc = build_document(&group_commits(&[c]), &meta());
    let line = doc.commit_lines().next().unwrap();

    assert_eq!(line.headline, "10:04:05 - Add invoices  Longer body");
    assert_eq!(line.author, "Author: Alice <alice@example.com>");
    assert_eq!(line.commit_id, "Commit ID: 01234567");
}

#[test]
fn long_messages_are_truncated_with_marker() {
    let long = "x".repeat(MESSAGE_LIMIT + 1);
    let truncated = truncate_message(&long);
    assert_eq!(truncated.chars().count(), MESSAGE_LIMIT + ELLIPSIS.len());
    assert!(truncated.ends_with(ELLIPSIS));
    assert_eq!(&truncated[..MESSAGE_LIMIT], &long[..MESSAGE_LIMIT]);

    let exact = "y".repeat(MESSAGE_LIMIT);
    assert_eq!(truncate_message(&exact), exact);
}

#[test]
fn truncation_counts_characters_not_bytes() {
    let long = "é".repeat(MESSAGE_LIMIT + 10);
    let truncated = truncate_message(&long);
    assert_eq!(truncated.chars().count(), MESSAGE_LIMIT + ELLIPSIS.len());
}

#[test]
fn summary_precedes_sections_and_counts_occurrences() {
    let doc = build_document(&group_commits(&sample()), &meta());

    let summary_at = doc
        .blocks
        .iter()
        .position(|b| matches!(b, Block::Summary(_)))
        .unwrap();
    let first_date_at = doc
        .blocks
        .iter()
        .position(|b| matches!(b, Block::Date(_)))
        .unwrap();
    assert!(summary_at < first_date_at);

    let Block::Summary(rows) = &doc.blocks[summary_at] else {
        unreachable!();
    };
    assert_eq!(
        rows,
        &vec![
            ("Total Commits".to_string(), "5".to_string()),
            ("Date Range".to_string(), "2024-01-01 to 2024-01-02".to_string()),
            ("Repositories".to_string(), "3".to_string()),
        ]
    );
}

#[test]
fn filter_and_truncation_notes_appear_in_header() {
    let mut meta = ReportMeta::new(Some("alice@example.com".to_string()));
    meta.truncated_repositories.push("billing".to_string());
    let doc = build_document(&group_commits(&sample()), &meta);

    let paragraphs: Vec<&String> = doc
        .blocks
        .iter()
        .filter_map(|b| match b {
            Block::Paragraph(p) => Some(p),
            _ => None,
        })
        .collect();
    assert!(paragraphs.iter().any(|p| p.as_str() == "Filtered by author: alice@example.com"));
    assert!(paragraphs.iter().any(|p| p.contains("billing") && p.contains("1000")));
}

#[test]
fn markdown_output_follows_document_order() {
    let doc = build_document(&group_commits(&sample()), &meta());
    let mut out = Vec::new();
    output_markdown(&doc, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.starts_with("# Azure DevOps Commits Report"));
    let newer = text.find("## 2024-01-02").unwrap();
    let older = text.find("## 2024-01-01").unwrap();
    assert!(newer < older);
    assert!(text.contains("#### Branch: main (2 commits)"));
    assert!(text.contains("| Total Commits | 5 |"));
}

#[test]
fn markdown_escapes_commit_text() {
    assert_eq!(escape_markdown("a*b|c"), "a\\*b\\|c");
    assert_eq!(escape_markdown("plain text"), "plain text");

    let c = with_message(
        commit("0123456789abcdef", "billing", "2024-01-02T10:00:00Z", &["feature_x"]),
        "# Fix **bold** | pipe",
    );
    let doc = build_document(&group_commits(&[c]), &meta());
    let mut out = Vec::new();
    output_markdown(&doc, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.contains("- **10:00:00 - \\# Fix \\*\\*bold\\*\\* \\| pipe**"));
    assert!(text.contains("#### Branch: feature\\_x (1 commits)"));
    assert!(text.contains("Author: Alice \\<alice@example.com\\>"));
    assert!(!text.lines().any(|l| l.starts_with("# Fix")));
}

#[test]
fn json_output_matches_grouping() {
    let grouped = group_commits(&sample());
    let mut out = Vec::new();
    output_json(&grouped, &meta(), &mut out).unwrap();
    let parsed: ReportOutput = serde_json::from_slice(&out).unwrap();

    assert_eq!(parsed.summary.total_commits, 5);
    let dates: Vec<&str> = parsed.dates.iter().map(|d| d.date.as_str()).collect();
    assert_eq!(dates, vec!["2024-01-02", "2024-01-01"]);
    let billing = &parsed.dates[0].repositories[1];
    assert_eq!(billing.name, "billing");
    let main = &billing.branches[1];
    assert_eq!(main.name, "main");
    let times: Vec<&str> = main.commits.iter().map(|c| c.time.as_str()).collect();
    assert_eq!(times, vec!["12:30:00", "10:00:00"]);
}

#[test]
fn pdf_output_spans_pages() {
    let commits: Vec<Commit> = (0..120)
        .map(|i| {
            commit(
                &format!("{i:08x}ffff"),
                "billing",
                &format!("2024-01-{:02}T10:{:02}:00Z", 1 + i % 20, i % 60),
                &["main"],
            )
        })
        .collect();
    let doc = build_document(&group_commits(&commits), &meta());

    let dir = tempdir().unwrap();
    let path = dir.path().join("report.pdf");
    output_pdf(&doc, &path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn pdf_text_outside_latin1_is_replaced() {
    assert_eq!(latin1_lossy("Café naïve"), "Café naïve");
    assert_eq!(latin1_lossy("修复 bug 🚀"), "?? bug ?");

    let c = with_message(
        commit("0123456789abcdef", "billing", "2024-01-02T10:00:00Z", &["main"]),
        "修复登录 🚀",
    );
    let doc = build_document(&group_commits(&[c]), &meta());
    let dir = tempdir().unwrap();
    let path = dir.path().join("report.pdf");
    output_pdf(&doc, &path).unwrap();
    assert!(std::fs::read(&path).unwrap().starts_with(b"%PDF"));
}

#[test]
fn wrap_respects_width() {
    let lines = wrap("alpha beta gamma delta", 11);
    assert_eq!(lines, vec!["alpha beta", "gamma delta"]);

    let lines = wrap("abcdefghij", 4);
    assert_eq!(lines, vec!["abcd", "efgh", "ij"]);

    assert_eq!(wrap("", 10), vec![String::new()]);
}
