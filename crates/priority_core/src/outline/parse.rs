//! Outline import.
//!
//! Nesting is rebuilt with a stack of still-open ancestors. A line attaches
//! to the nearest open line that is strictly shallower; when none exists the
//! line is demoted to a root-level item instead of being rejected.

use crate::model::priority::{assemble_preorder, PriorityNode};
use crate::outline::{OutlineConfig, OutlineError};

#[derive(Debug, Clone, PartialEq, Eq)]
struct OutlineLine {
    depth: usize,
    content: String,
}

/// Parses outline text into a forest with freshly generated ids.
///
/// Blank lines are skipped. `\r\n` line endings are accepted.
///
/// # Errors
/// - Returns `OutlineError::Empty` when `text` is empty or whitespace-only.
/// - Returns `OutlineError::Malformed` listing every non-blank line that
///   lacks a marker run, a whitespace separator or content.
pub fn parse(text: &str, config: &OutlineConfig) -> Result<Vec<PriorityNode>, OutlineError> {
    if text.trim().is_empty() {
        return Err(OutlineError::Empty);
    }

    let mut lines = Vec::new();
    let mut malformed = Vec::new();
    for (line_no, raw) in text.lines().enumerate() {
        if raw.trim().is_empty() {
            continue;
        }
        match scan_line(raw, config.marker()) {
            Some(line) => lines.push(line),
            None => malformed.push(line_no + 1),
        }
    }
    if !malformed.is_empty() {
        return Err(OutlineError::Malformed { lines: malformed });
    }

    Ok(build_forest(lines))
}

/// Scans `<marker>+ <whitespace>+ <content>`; content is trimmed.
fn scan_line(raw: &str, marker: char) -> Option<OutlineLine> {
    let rest = raw.trim_start_matches(marker);
    let depth = raw[..raw.len() - rest.len()].chars().count();
    if depth == 0 {
        return None;
    }
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let content = rest.trim();
    if content.is_empty() {
        return None;
    }
    Some(OutlineLine {
        depth,
        content: content.to_string(),
    })
}

fn build_forest(lines: Vec<OutlineLine>) -> Vec<PriorityNode> {
    let mut entries = Vec::with_capacity(lines.len());
    // (line index, depth) of every still-open ancestor, shallowest first.
    let mut open: Vec<(usize, usize)> = Vec::new();

    for (idx, line) in lines.into_iter().enumerate() {
        // Depth 1 pops everything, so a root line always starts a fresh branch.
        while open.last().is_some_and(|&(_, depth)| depth >= line.depth) {
            open.pop();
        }
        let parent = open.last().map(|&(parent, _)| parent);
        open.push((idx, line.depth));
        entries.push((PriorityNode::new(line.content), parent));
    }

    assemble_preorder(entries)
}

#[cfg(test)]
mod tests {
    use super::{parse, scan_line, OutlineLine};
    use crate::outline::{OutlineConfig, OutlineError};

    #[test]
    fn scan_line_reads_depth_and_trims_content() {
        assert_eq!(
            scan_line("---\t  deep item  ", '-'),
            Some(OutlineLine {
                depth: 3,
                content: "deep item".to_string(),
            })
        );
        assert_eq!(
            scan_line("- - nested dash", '-').map(|line| line.content),
            Some("- nested dash".to_string())
        );
    }

    #[test]
    fn scan_line_rejects_missing_parts() {
        assert_eq!(scan_line("no marker", '-'), None);
        assert_eq!(scan_line("-glued", '-'), None);
        assert_eq!(scan_line("--   ", '-'), None);
        assert_eq!(scan_line(" - leading space", '-'), None);
    }

    #[test]
    fn malformed_lines_are_all_reported() {
        let err = parse("- ok\nbad\n\n-also bad\n-- fine", &OutlineConfig::default())
            .unwrap_err();
        assert_eq!(err, OutlineError::Malformed { lines: vec![2, 4] });
    }

    #[test]
    fn crlf_and_blank_lines_are_tolerated() {
        let roots = parse("- a\r\n\r\n-- b\r\n", &OutlineConfig::default()).unwrap();
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].content, "a");
        assert_eq!(roots[0].children[0].content, "b");
    }

    #[test]
    fn skipped_depth_attaches_to_nearest_shallower_line() {
        let roots = parse("- a\n---- deep\n-- b", &OutlineConfig::default()).unwrap();
        assert_eq!(roots.len(), 1);
        let contents = roots[0]
            .children
            .iter()
            .map(|child| child.content.as_str())
            .collect::<Vec<_>>();
        assert_eq!(contents, vec!["deep", "b"]);
    }
}
