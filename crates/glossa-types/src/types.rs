use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub enum AppEvent {
    ConfigChanged,
    UiEvent(UiEvent),
    TextChanged {
        text: String,
        source: TextSource,
    },
    PartClicked(usize),
    SelectionMade {
        anchor: Option<usize>,
        focus: Option<usize>,
    },
    ShowParts(Vec<DisplayPart>),
    LookupPending {
        term: String,
    },
    ShowDetail(DisplayDetail),
    LookupFailed {
        term: String,
        message: String,
    },
    DetectionUpdate {
        language: Option<String>,
        detecting: bool,
    },
    SaveCurrent,
    RemoveEntry {
        term: String,
        language: String,
    },
    ListSaved,
    ShowSaved(Vec<DisplayEntry>),
    BackendReady,
}

#[derive(Debug, Clone)]
pub enum TextSource {
    Paste,
    File,
    Manual,
}

/// One rendered fragment of the segmented input, addressable by index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayPart {
    pub index: usize,
    pub surface: String,
    pub is_word: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayDetail {
    pub term: String,
    pub language: String,
    pub definition: String,
    pub pronunciation: Option<String>,
    pub part_of_speech: Option<String>,
    pub examples: Vec<String>,
    pub related: Vec<String>,
    pub translation: Option<String>,
    pub has_audio: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayEntry {
    pub term: String,
    pub language: String,
    pub definition: String,
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    Show,
    Hide,
    Close,
}
