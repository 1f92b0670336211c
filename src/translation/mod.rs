mod cancel;
mod coordinator;
mod error;
mod language;
mod orchestrator;
mod outcome;
mod prompt;
mod request;
mod sink;
mod sse_parser;
mod transport;

pub use cancel::{CancelCause, CancelTrigger, CancellationHandle};
pub use coordinator::{
    CANCELLED_MESSAGE, FAILED_MESSAGE, LOADING_MESSAGE, NOTHING_TO_TRANSLATE_MESSAGE,
    TIMED_OUT_MESSAGE, TranslationCoordinator, terminal_message,
};
pub use error::{ErrorKind, TranslateError, TransportError};
pub use language::{SUPPORTED_LANGUAGES, language_name, print_languages, validate_language};
pub use orchestrator::{Progress, StreamOrchestrator};
pub use outcome::TranslationOutcome;
pub use prompt::{INSTRUCTION_TEMPLATE, build_instruction};
pub use request::{ChatCompletionRequest, TranslationRequest};
pub use sink::{MessageKind, PanelSlot, Sink, SinkMessage};
pub use sse_parser::{ChunkParser, StreamEvent};
pub use transport::{ByteStream, HttpTransport, Transport};
