use crate::github::ComparisonCommit;

const COMPARE_MARKER: &str = "compare/";

// Auto-generated release bodies end with a line like
// `**Full Changelog**: https://github.com/o/r/compare/v1.0.0...v1.1.0`.
pub fn compare_ref(body: &str) -> Option<&str> {
    let last_line = body.lines().last()?;
    let marker = last_line.rfind(COMPARE_MARKER)?;
    Some(&last_line[marker + COMPARE_MARKER.len()..])
}

pub fn bullet_line(message: &str) -> String {
    let subject = message.lines().next().unwrap_or("");
    format!("\u{2022} {}", strip_pr_refs(subject))
}

pub fn render(commits: &[ComparisonCommit]) -> String {
    commits
        .iter()
        .map(|entry| bullet_line(&entry.commit.message))
        .collect::<Vec<_>>()
        .join("\r\n")
}

// Removes every `(#<digits>)` pull request reference, keeping the
// surrounding whitespace untouched.
fn strip_pr_refs(subject: &str) -> String {
    let mut out = String::with_capacity(subject.len());
    let mut rest = subject;
    while let Some(start) = rest.find("(#") {
        let tail = &rest[start + 2..];
        let digits = tail.chars().take_while(char::is_ascii_digit).count();
        if digits > 0 && tail[digits..].starts_with(')') {
            out.push_str(&rest[..start]);
            rest = &tail[digits + 1..];
        } else {
            out.push_str(&rest[..start + 2]);
            rest = tail;
        }
    }
    out.push_str(rest);
    out
}
