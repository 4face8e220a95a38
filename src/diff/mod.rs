//! Line diff implementation.
//!
//! [`diff_lines`] aligns two texts line by line using a longest common
//! subsequence and produces an edit script of unchanged, added and removed
//! lines. Lines keep their trailing `\n`, so the script reproduces both
//! inputs byte for byte:
//!
//! ```
//! use groot::diff::diff_lines;
//!
//! let diff = diff_lines("a\nb\nc\n", "a\nc\nd\n");
//! assert_eq!(diff.old_text(), "a\nb\nc\n");
//! assert_eq!(diff.new_text(), "a\nc\nd\n");
//! assert_eq!(diff.stats().added, 1);
//! assert_eq!(diff.stats().removed, 1);
//! ```

use std::collections::{HashMap, HashSet};
use std::ops::Range;

/// The kind of a line in an edit script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    /// The line is present in both texts.
    Unchanged,
    /// The line is present only in the new text.
    Added,
    /// The line is present only in the old text.
    Removed,
}

impl LineKind {
    /// Returns a single character representing the kind, as in unified diffs.
    pub fn as_char(&self) -> char {
        match self {
            LineKind::Unchanged => ' ',
            LineKind::Added => '+',
            LineKind::Removed => '-',
        }
    }
}

/// One line of an edit script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineChange {
    kind: LineKind,
    text: String,
}

impl LineChange {
    fn new(kind: LineKind, text: &str) -> Self {
        LineChange {
            kind,
            text: text.to_string(),
        }
    }

    /// Returns what happened to this line.
    pub fn kind(&self) -> LineKind {
        self.kind
    }

    /// Returns the line, including its `\n` terminator if it had one.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the line without its terminator.
    pub fn line(&self) -> &str {
        self.text.strip_suffix('\n').unwrap_or(&self.text)
    }
}

/// Line counts for an edit script.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffStats {
    /// Number of added lines.
    pub added: usize,
    /// Number of removed lines.
    pub removed: usize,
    /// Number of unchanged lines.
    pub unchanged: usize,
}

/// An edit script transforming one text into another.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineDiff {
    changes: Vec<LineChange>,
}

impl LineDiff {
    /// Returns the edit script in order.
    pub fn changes(&self) -> &[LineChange] {
        &self.changes
    }

    /// Returns an iterator over the edit script.
    pub fn iter(&self) -> impl Iterator<Item = &LineChange> {
        self.changes.iter()
    }

    /// Returns true if the two texts were identical.
    pub fn is_unchanged(&self) -> bool {
        self.changes.iter().all(|c| c.kind == LineKind::Unchanged)
    }

    /// Counts the lines of each kind.
    pub fn stats(&self) -> DiffStats {
        let mut stats = DiffStats::default();
        for change in &self.changes {
            match change.kind {
                LineKind::Unchanged => stats.unchanged += 1,
                LineKind::Added => stats.added += 1,
                LineKind::Removed => stats.removed += 1,
            }
        }
        stats
    }

    /// Rebuilds the old text from the unchanged and removed lines.
    pub fn old_text(&self) -> String {
        self.collect_text(LineKind::Removed)
    }

    /// Rebuilds the new text from the unchanged and added lines.
    pub fn new_text(&self) -> String {
        self.collect_text(LineKind::Added)
    }

    fn collect_text(&self, side: LineKind) -> String {
        self.changes
            .iter()
            .filter(|c| c.kind == LineKind::Unchanged || c.kind == side)
            .map(|c| c.text.as_str())
            .collect()
    }
}

/// Computes a line-level edit script transforming `old` into `new`.
///
/// Lines are aligned along a longest common subsequence, found with
/// Hirschberg's divide-and-conquer method so memory stays linear in the
/// input size. Where several minimal scripts exist, removals are emitted
/// before additions within each changed block.
pub fn diff_lines(old: &str, new: &str) -> LineDiff {
    let old_lines: Vec<&str> = old.split_inclusive('\n').collect();
    let new_lines: Vec<&str> = new.split_inclusive('\n').collect();

    // Compare small integer ids instead of strings in the inner loops.
    let mut ids: HashMap<&str, u32> = HashMap::new();
    let aligner = Aligner {
        old: old_lines.iter().map(|&line| intern(&mut ids, line)).collect(),
        new: new_lines.iter().map(|&line| intern(&mut ids, line)).collect(),
    };

    let mut edits = Vec::with_capacity(old_lines.len().max(new_lines.len()));
    aligner.conquer(0..old_lines.len(), 0..new_lines.len(), &mut edits);

    let mut changes: Vec<LineChange> = edits
        .into_iter()
        .map(|edit| match edit {
            Edit::Unchanged(i) => LineChange::new(LineKind::Unchanged, old_lines[i]),
            Edit::Removed(i) => LineChange::new(LineKind::Removed, old_lines[i]),
            Edit::Added(j) => LineChange::new(LineKind::Added, new_lines[j]),
        })
        .collect();

    // Removals lead each block between unchanged lines. The sort is stable,
    // so each side keeps its own order.
    for block in changes.split_mut(|c| c.kind == LineKind::Unchanged) {
        block.sort_by_key(|c| c.kind != LineKind::Removed);
    }

    LineDiff { changes }
}

fn intern<'a>(ids: &mut HashMap<&'a str, u32>, line: &'a str) -> u32 {
    let next = ids.len() as u32;
    *ids.entry(line).or_insert(next)
}

/// One step of an edit script, by line index (old side for unchanged lines).
#[derive(Debug, Clone, Copy)]
enum Edit {
    Unchanged(usize),
    Removed(usize),
    Added(usize),
}

/// Interned lines of both texts.
struct Aligner {
    old: Vec<u32>,
    new: Vec<u32>,
}

impl Aligner {
    /// Emits the edit script turning `old[a]` into `new[b]`.
    fn conquer(&self, mut a: Range<usize>, mut b: Range<usize>, out: &mut Vec<Edit>) {
        while !a.is_empty() && !b.is_empty() && self.old[a.start] == self.new[b.start] {
            out.push(Edit::Unchanged(a.start));
            a.start += 1;
            b.start += 1;
        }

        let mut suffix = 0;
        while !a.is_empty() && !b.is_empty() && self.old[a.end - 1] == self.new[b.end - 1] {
            a.end -= 1;
            b.end -= 1;
            suffix += 1;
        }
        let tail = a.end..a.end + suffix;

        // With no line in common the block is a plain replacement.
        let shares_a_line = {
            let new_ids: HashSet<u32> = self.new[b.clone()].iter().copied().collect();
            self.old[a.clone()].iter().any(|id| new_ids.contains(id))
        };

        if !shares_a_line {
            out.extend(a.map(Edit::Removed));
            out.extend(b.map(Edit::Added));
        } else if a.len() == 1 {
            // The single old line matches somewhere in b.
            let line = self.old[a.start];
            let at = b.clone().find(|&j| self.new[j] == line).unwrap_or(b.end);
            out.extend((b.start..at).map(Edit::Added));
            out.push(Edit::Unchanged(a.start));
            out.extend((at + 1..b.end).map(Edit::Added));
        } else {
            // Split a in half and find where b splits so that the LCS of the
            // two halves adds up to the LCS of the whole.
            let mid = a.start + a.len() / 2;
            let forward = lcs_lengths(&self.old[a.start..mid], &self.new[b.clone()]);

            let old_back: Vec<u32> = self.old[mid..a.end].iter().rev().copied().collect();
            let new_back: Vec<u32> = self.new[b.clone()].iter().rev().copied().collect();
            let backward = lcs_lengths(&old_back, &new_back);

            let width = b.len();
            let split = (0..=width)
                .max_by_key(|&k| (forward[k] + backward[width - k], std::cmp::Reverse(k)))
                .unwrap_or(0);

            self.conquer(a.start..mid, b.start..b.start + split, out);
            self.conquer(mid..a.end, b.start + split..b.end, out);
        }

        out.extend(tail.map(Edit::Unchanged));
    }
}

/// Returns, for every prefix length `j` of `b`, the LCS length of `a` and
/// `b[..j]`, using a single row of memory.
fn lcs_lengths(a: &[u32], b: &[u32]) -> Vec<u32> {
    let mut row = vec![0u32; b.len() + 1];
    for &x in a {
        // diag holds the previous row's value at j - 1.
        let mut diag = 0;
        for j in 1..=b.len() {
            let above = row[j];
            row[j] = if x == b[j - 1] {
                diag + 1
            } else {
                above.max(row[j - 1])
            };
            diag = above;
        }
    }
    row
}
