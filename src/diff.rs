/// Appended runs longer than this many chars count as a paste
const PASTE_THRESHOLD: usize = 5;

/// How many chars of a paste to show in its description
const PASTE_PREVIEW: usize = 10;

/// Coarse classification of a whole-text edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffKind {
    NoChange,
    Insert,
    Delete,
    Typing,
    Paste,
    Edit,
}

impl DiffKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            DiffKind::NoChange => "NO_CHANGE",
            DiffKind::Insert => "INSERT",
            DiffKind::Delete => "DELETE",
            DiffKind::Typing => "TYPING",
            DiffKind::Paste => "PASTE",
            DiffKind::Edit => "EDIT",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diff {
    pub kind: DiffKind,
    pub description: String,
}

impl Diff {
    fn new(kind: DiffKind, description: impl Into<String>) -> Self {
        Self { kind, description: description.into() }
    }
}

/// Describe the change from `old` to `new` in a single line.
///
/// All counts and positions are in chars, not bytes.
pub fn compute_diff(old: &str, new: &str) -> Diff {
    if old == new {
        return Diff::new(DiffKind::NoChange, "No changes");
    }
    if old.is_empty() {
        return Diff::new(DiffKind::Insert, format!("Added {} chars", new.chars().count()));
    }
    if new.is_empty() {
        return Diff::new(DiffKind::Delete, format!("Cleared {} chars", old.chars().count()));
    }

    if let Some(added) = new.strip_prefix(old) {
        if added.chars().count() > PASTE_THRESHOLD {
            let preview: String = added.chars().take(PASTE_PREVIEW).collect();
            return Diff::new(DiffKind::Paste, format!("Pasted \"{}...\"", preview));
        }
        return Diff::new(DiffKind::Typing, format!("Typed \"{}\"", added));
    }

    if let Some(deleted) = old.strip_prefix(new) {
        return Diff::new(DiffKind::Delete, format!("Deleted \"{}\"", deleted));
    }

    // Byte offset and char index of the end of the common prefix
    let (prefix_bytes, prefix_chars) = old
        .char_indices()
        .zip(new.chars())
        .take_while(|((_, a), b)| a == b)
        .fold((0, 0), |(_, n), ((i, c), _)| (i + c.len_utf8(), n + 1));

    let old_tail = &old[prefix_bytes..];
    if new[prefix_bytes..].ends_with(old_tail) {
        let added = &new[prefix_bytes..new.len() - old_tail.len()];
        return Diff::new(
            DiffKind::Insert,
            format!("Inserted \"{}\" at {}", added, prefix_chars),
        );
    }

    Diff::new(DiffKind::Edit, "Modified text")
}
