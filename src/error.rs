use std::fmt::Display;

#[derive(Debug)]
pub enum Error {
    EmptyFrequencyTable,
    UnknownSymbol(String),
    TruncatedStream {
        bits_consumed: u64,
    },
    CorruptStream {
        bit_position: u64,
        reason: &'static str,
    },
    EmptyCodebook,
    MalformedCodebook(&'static str),
    MalformedContainer(&'static str),
    SectionTooLarge(&'static str),
    InvalidBitStream(&'static str),
    InvalidChunkLength,
    FailedToEncodeChunk(usize),
    BitWriterError(std::io::Error),
    UnableToOpenInputFileForReading(String, std::io::Error),
    UnableToOpenOutputFileForWriting(String, std::io::Error),
    FailedToReadInputFile(String, std::io::Error),
    FailedToWriteOutputFile(String, std::io::Error),
    FailedToWriteContainerHeader(std::io::Error),
    FailedToWriteCodebookSection(std::io::Error),
    FailedToWriteSegmentSection(std::io::Error),
    FailedToReadContainer(std::io::Error),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyFrequencyTable => {
                write!(f, "Frequency table contains no symbols")
            }
            Self::UnknownSymbol(symbol) => {
                write!(f, "Symbol {} not present in code table", symbol)
            }
            Self::TruncatedStream { bits_consumed } => {
                write!(f, "Bit stream ended mid-code after {} bits", bits_consumed)
            }
            Self::CorruptStream {
                bit_position,
                reason,
            } => {
                write!(f, "Corrupt bit stream at bit {}: {}", bit_position, reason)
            }
            Self::EmptyCodebook => {
                write!(f, "Codebook section contains no nodes")
            }
            Self::MalformedCodebook(reason) => {
                write!(f, "Malformed codebook: {}", reason)
            }
            Self::MalformedContainer(reason) => {
                write!(f, "Malformed container: {}", reason)
            }
            Self::SectionTooLarge(section) => {
                write!(f, "Container {} exceeds its 32 bit length field", section)
            }
            Self::InvalidBitStream(reason) => {
                write!(f, "Invalid bit stream: {}", reason)
            }
            Self::InvalidChunkLength => {
                write!(f, "Chunk length must be at least one symbol")
            }
            Self::FailedToEncodeChunk(chunk_index) => {
                write!(
                    f,
                    "Worker for chunk {} terminated without a result",
                    chunk_index
                )
            }
            Self::BitWriterError(error) => {
                write!(f, "Failed to write bits to output stream: {}", error)
            }
            Self::UnableToOpenInputFileForReading(path, error) => {
                write!(
                    f,
                    "Unable to open input file '{}' for reading: {}",
                    path, error
                )
            }
            Self::UnableToOpenOutputFileForWriting(path, error) => {
                write!(
                    f,
                    "Unable to open output file '{}' for writing: {}",
                    path, error
                )
            }
            Error::FailedToReadInputFile(path, error) => {
                write!(f, "Failed to read input file '{}': {}", path, error)
            }
            Error::FailedToWriteOutputFile(path, error) => {
                write!(f, "Failed to write output file '{}': {}", path, error)
            }
            Error::FailedToWriteContainerHeader(error) => {
                write!(f, "Failed to write container header: {}", error)
            }
            Error::FailedToWriteCodebookSection(error) => {
                write!(f, "Failed to write codebook section: {}", error)
            }
            Error::FailedToWriteSegmentSection(error) => {
                write!(f, "Failed to write segment section: {}", error)
            }
            Error::FailedToReadContainer(error) => {
                write!(f, "Failed to read container: {}", error)
            }
        }
    }
}

impl std::error::Error for Error {}
