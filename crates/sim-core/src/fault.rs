use thiserror::Error;

use crate::memory::MEMORY_WORDS;

/// Fatal conditions raised by the golden-model core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum CoreFault {
    /// The opcode field carried a value with no assigned semantics.
    ///
    /// Every value of the 4-bit field is assigned, so this can only be
    /// produced by an upstream encoding bug; it is fatal to the run rather
    /// than silently skipped.
    #[error("no semantics assigned to instruction word {word:03x} fetched at {pc}")]
    UndefinedOpcode {
        /// Address the word was fetched from.
        pc: u16,
        /// The offending instruction word.
        word: u16,
    },
    /// A machine-code image longer than the memory was loaded.
    #[error("image holds {words} words, memory holds {MEMORY_WORDS}")]
    ImageTooLarge {
        /// Number of words in the rejected image.
        words: usize,
    },
}
