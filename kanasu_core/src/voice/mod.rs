//! Voice navigation: command grammar, interpreter and speech seams.

pub mod command;
pub mod interpreter;
pub mod speech;

pub use command::{CommandGrammar, CommandMatch, Intent, Route, ALL_INTENTS};
pub use interpreter::{apply, VoiceCommandInterpreter, VoiceOutcome, VoiceSink};
pub use speech::{
    RecognitionEvent, SpeechRecognizer, SpeechSynthesizer, UnsupportedSpeech, VoiceController,
    SPEECH_RATE,
};
