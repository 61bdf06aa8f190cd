use crate::segment::TextPart;

/// Raw selection endpoints as mapped by the host selection adapter.
///
/// An endpoint is `None` when the adapter could not map it to a tracked part
/// (selection started or ended outside the rendered text). Endpoints are
/// unordered at capture time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionSpan {
    pub anchor: Option<usize>,
    pub focus: Option<usize>,
}

impl SelectionSpan {
    pub fn new(anchor: usize, focus: usize) -> Self {
        Self {
            anchor: Some(anchor),
            focus: Some(focus),
        }
    }
}

/// Outcome of mapping a selection span onto the part sequence
#[derive(Debug, Clone, PartialEq)]
pub enum PhraseResolution {
    /// Span was missing an endpoint or pointed outside the sequence
    NoSelection,
    /// Span covered only whitespace and punctuation
    NonWord,
    Single(TextPart),
    /// Two or more word parts, in sequence order
    Phrase(Vec<TextPart>),
}

impl PhraseResolution {
    /// Lookup term for this resolution, if it names one.
    ///
    /// Phrase terms normalize the same way single words do: lower-cased,
    /// joined with single spaces.
    pub fn term(&self) -> Option<String> {
        match self {
            Self::Single(part) => part.normalized.clone(),
            Self::Phrase(parts) => Some(
                parts
                    .iter()
                    .map(|p| p.surface.to_lowercase())
                    .collect::<Vec<_>>()
                    .join(" "),
            ),
            Self::NoSelection | Self::NonWord => None,
        }
    }

    /// Whether this resolution should start a lookup
    pub fn is_lookup_worthy(&self) -> bool {
        matches!(self, Self::Single(_) | Self::Phrase(_))
    }
}

/// Map a span onto `parts`, keeping only the covered word parts.
///
/// Resolution is side-effect free and total: every input, including degenerate
/// spans, maps to an explicit variant.
pub fn resolve(span: SelectionSpan, parts: &[TextPart]) -> PhraseResolution {
    let (Some(anchor), Some(focus)) = (span.anchor, span.focus) else {
        return PhraseResolution::NoSelection;
    };

    let (start, end) = if anchor <= focus {
        (anchor, focus)
    } else {
        (focus, anchor)
    };

    if end >= parts.len() {
        return PhraseResolution::NoSelection;
    }

    let mut words: Vec<TextPart> = parts[start..=end]
        .iter()
        .filter(|p| p.is_word())
        .cloned()
        .collect();

    match words.len() {
        0 => PhraseResolution::NonWord,
        1 => PhraseResolution::Single(words.remove(0)),
        _ => PhraseResolution::Phrase(words),
    }
}
