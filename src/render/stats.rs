// GitHub activity block renderer.

use crate::github::ContributionSummary;

const HEADING: &str = "### GitHub activity";

/// Render the stats block, listing at most `max_languages` languages and
/// `max_frameworks` frameworks. Empty lists drop their line entirely.
pub fn render_stats_block(
    summary: &ContributionSummary,
    max_languages: usize,
    max_frameworks: usize,
) -> String {
    let mut lines = vec![HEADING.to_string()];

    let mut commits = format!("- Commits this year: {}", summary.total_commits_year);
    if summary.restricted_commits_year > 0 {
        commits.push_str(&format!(" (+{} private)", summary.restricted_commits_year));
    }
    lines.push(commits);

    if !summary.languages.is_empty() {
        let languages: Vec<String> = summary
            .languages
            .iter()
            .take(max_languages)
            .map(|(name, pct)| format!("{name} ({pct}%)"))
            .collect();
        lines.push(format!("- Recently used languages: {}", languages.join(", ")));
    }

    if !summary.frameworks.is_empty() {
        let frameworks: Vec<&str> = summary
            .frameworks
            .iter()
            .take(max_frameworks)
            .map(String::as_str)
            .collect();
        lines.push(format!("- Recently used frameworks: {}", frameworks.join(", ")));
    }

    lines.join("\n") + "\n"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> ContributionSummary {
        ContributionSummary {
            total_commits_year: 412,
            restricted_commits_year: 37,
            languages: vec![
                ("Rust".to_string(), 61),
                ("TypeScript".to_string(), 30),
                ("Shell".to_string(), 9),
            ],
            frameworks: vec!["React".to_string(), "Django".to_string()],
        }
    }

    #[test]
    fn test_render_full_summary() {
        let block = render_stats_block(&summary(), 6, 6);

        assert_eq!(
            block,
            "### GitHub activity\n\
             - Commits this year: 412 (+37 private)\n\
             - Recently used languages: Rust (61%), TypeScript (30%), Shell (9%)\n\
             - Recently used frameworks: React, Django\n"
        );
    }

    #[test]
    fn test_limits_apply() {
        let block = render_stats_block(&summary(), 2, 1);

        assert!(block.contains("languages: Rust (61%), TypeScript (30%)\n"));
        assert!(!block.contains("Shell"));
        assert!(block.contains("frameworks: React\n"));
    }

    #[test]
    fn test_empty_lists_and_no_private_commits() {
        let summary = ContributionSummary {
            total_commits_year: 3,
            ..Default::default()
        };

        let block = render_stats_block(&summary, 6, 6);
        assert_eq!(block, "### GitHub activity\n- Commits this year: 3\n");
    }
}
