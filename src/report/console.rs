use colored::Colorize;

use super::finding::Findings;
use crate::hibp::patterns::EMAIL_ADDRESS;

pub const SEPARATOR: &str = "----------------------------------------------------";

/// Distinct email addresses mentioned anywhere in `blocks`, first-seen order.
pub fn affected_emails(blocks: &[String]) -> Vec<String> {
    let mut emails: Vec<String> = Vec::new();
    for block in blocks {
        for m in EMAIL_ADDRESS.find_iter(block) {
            if !emails.iter().any(|e| e == m.as_str()) {
                emails.push(m.as_str().to_string());
            }
        }
    }
    emails
}

pub fn render_summary(blocks: &[String]) -> String {
    let affected = affected_emails(blocks);
    let mut out = String::new();

    out.push_str(&format!("{}\n", SEPARATOR));
    out.push_str(&format!("Affected emails: {}\n", affected.len()));
    for email in &affected {
        out.push_str(&format!("  - {}\n", email));
    }
    out.push_str(&format!("Total findings: {}\n", blocks.len()));
    out.push_str(&format!("{}\n", SEPARATOR));

    for block in blocks {
        out.push_str(block);
        out.push_str(&format!("{}\n", SEPARATOR));
    }

    out
}

pub fn print_summary(findings: &Findings) {
    if findings.is_empty() {
        println!("{}", "✅ No breaches or pastes found.".green());
        return;
    }

    let blocks = findings.text_blocks();

    println!("\n{}", "🔎 Breach summary".bold());
    print!("{}", render_summary(&blocks));
}
