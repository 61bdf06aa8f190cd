mod lexical;
mod speech;

pub use lexical::RestLexicalClient;
pub use speech::RestSpeechClient;
