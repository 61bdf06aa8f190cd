use unicode_normalization::UnicodeNormalization;

pub trait Preprocessor {
    // Default pasted-text preprocessor
    fn process(&self, text: &str) -> String {
        let text = text.trim_end();

        if text.is_empty() {
            return String::new();
        }

        // Unicode normalization (NFKC) folds full-width and compatibility
        // forms so lookup keys stay consistent; interior whitespace is kept
        // because the part sequence must mirror what the user pasted
        text.nfkc().collect()
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}
