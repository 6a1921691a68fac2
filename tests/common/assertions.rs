use apicompat::GraphReport;

/// Assert the report has no findings
pub fn assert_compatible(report: &GraphReport) {
    assert!(
        report.is_compatible(),
        "Expected graphs to be compatible, got:\n{}",
        report
    );
}

/// Assert the report renders a line equal to `line`
pub fn assert_has_line(report: &GraphReport, line: &str) {
    let lines = report.lines();
    assert!(
        lines.iter().any(|l| l == line),
        "Expected line {:?} in report:\n{}",
        line,
        lines.join("\n")
    );
}
