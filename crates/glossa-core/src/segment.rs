/// Classification of one segmented fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartKind {
    Word,
    Whitespace,
    Punctuation,
}

/// One addressable fragment of segmented text.
///
/// `index` identifies the part within a single segmentation pass; re-segmenting
/// replaces the whole sequence and invalidates previously held indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextPart {
    pub kind: PartKind,
    pub surface: String,
    /// Lower-cased lookup key, present only for `Word` parts
    pub normalized: Option<String>,
    pub index: usize,
}

impl TextPart {
    pub fn is_word(&self) -> bool {
        self.kind == PartKind::Word
    }
}

fn kind_of(c: char) -> PartKind {
    if c.is_alphanumeric() {
        PartKind::Word
    } else if c.is_whitespace() {
        PartKind::Whitespace
    } else {
        PartKind::Punctuation
    }
}

/// Partition `text` into maximal same-kind runs.
///
/// The partition is exhaustive and contiguous: concatenating the surfaces in
/// order reproduces the input exactly.
pub fn segment(text: &str) -> Vec<TextPart> {
    let mut parts = Vec::new();
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        let kind = kind_of(ch);
        let mut surface = String::from(ch);

        while let Some(&next) = chars.peek() {
            if kind_of(next) == kind {
                surface.push(next);
                chars.next();
            } else {
                break;
            }
        }

        let normalized = (kind == PartKind::Word).then(|| surface.to_lowercase());
        parts.push(TextPart {
            kind,
            normalized,
            index: parts.len(),
            surface,
        });
    }

    parts
}
