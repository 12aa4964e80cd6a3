use crate::azure::models::{CommentPosition, CommentThread};
use std::fmt;

const NOT_AVAILABLE: &str = "N/A";

/// A pull request thread a human reviewer actually commented on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewThread {
    pub file_path: String,
    /// Span on the pre-change side of the diff
    pub left_range: Option<String>,
    /// Span on the post-change side of the diff
    pub right_range: Option<String>,
    /// `"{author}: {content}"`, in thread order, system comments excluded
    pub comments: Vec<String>,
}

/// Format a start/end pair as `L{line}:{offset}-L{line}:{offset}`.
///
/// Unset unless both ends are present.
pub fn format_line_range(
    start: Option<&CommentPosition>,
    end: Option<&CommentPosition>,
) -> Option<String> {
    let (start, end) = (start?, end?);
    Some(format!(
        "L{}:{}-L{}:{}",
        start.line, start.offset, end.line, end.offset
    ))
}

impl ReviewThread {
    /// Returns `None` for threads that carry no signal for a reviewer:
    /// threads without a context block, and threads whose every comment is
    /// system-generated.
    pub fn from_rest(thread: &CommentThread) -> Option<Self> {
        let context = thread.thread_context.as_ref()?;

        let left_range = format_line_range(
            context.left_file_start.as_ref(),
            context.left_file_end.as_ref(),
        );
        let right_range = format_line_range(
            context.right_file_start.as_ref(),
            context.right_file_end.as_ref(),
        );

        let comments: Vec<String> = thread
            .comments
            .iter()
            .filter(|comment| !comment.is_system())
            .map(|comment| format!("{}: {}", comment.author.display_name, comment.content))
            .collect();

        if comments.is_empty() {
            return None;
        }

        Some(Self {
            file_path: context.file_path.clone().unwrap_or_default(),
            left_range,
            right_range,
            comments,
        })
    }
}

/// Normalize every raw thread, keeping only the reviewable ones in order.
pub fn normalize_threads(threads: &[CommentThread]) -> Vec<ReviewThread> {
    threads.iter().filter_map(ReviewThread::from_rest).collect()
}

/// Render threads separated by a blank line; no threads renders as `""`.
pub fn render_review_threads(threads: &[ReviewThread]) -> String {
    threads
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n\n")
}

impl fmt::Display for ReviewThread {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "File: {}", self.file_path)?;
        writeln!(
            f,
            "Left file: {}",
            self.left_range.as_deref().unwrap_or(NOT_AVAILABLE)
        )?;
        writeln!(
            f,
            "Right file: {}",
            self.right_range.as_deref().unwrap_or(NOT_AVAILABLE)
        )?;
        write!(f, "Comments:")?;
        for comment in &self.comments {
            write!(f, "\n - {}", comment)?;
        }
        Ok(())
    }
}
