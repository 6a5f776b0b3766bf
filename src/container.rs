use std::io::{Read, Write};

use crate::binary_stream::BitStream;
use crate::error::Error;
use crate::huffman::codebook::{read_codebook, write_codebook, FixedWidthSymbol};
use crate::huffman::CodeTree;
use crate::logger::log_section;
use crate::Result;

/// First four bytes of every compressed file.
pub const MAGIC: [u8; 4] = *b"HPK1";

/// Writes a compressed file: magic, symbol width, the serialized codebook
/// and the encoded segments, each section length-prefixed in big-endian.
pub struct ContainerWriter<'a, T: Write> {
    writer: &'a mut T,
}

impl<'a, T: Write> ContainerWriter<'a, T> {
    pub fn new(writer: &'a mut T) -> Self {
        Self { writer }
    }

    pub fn write<S: FixedWidthSymbol>(
        &mut self,
        tree: &CodeTree<S>,
        segments: &[BitStream],
    ) -> Result<()> {
        let codebook = write_codebook(tree)?;
        log_section("codebook", codebook.as_bytes());
        let codebook_bits = section_length(codebook.bit_len(), "codebook")?;
        let segment_count = section_length(segments.len() as u64, "segment count")?;
        self.writer
            .write_all(&MAGIC)
            .map_err(Error::FailedToWriteContainerHeader)?;
        self.writer
            .write_all(&[S::BIT_WIDTH as u8])
            .map_err(Error::FailedToWriteContainerHeader)?;
        self.writer
            .write_all(&codebook_bits.to_be_bytes())
            .map_err(Error::FailedToWriteCodebookSection)?;
        self.writer
            .write_all(codebook.as_bytes())
            .map_err(Error::FailedToWriteCodebookSection)?;
        self.writer
            .write_all(&segment_count.to_be_bytes())
            .map_err(Error::FailedToWriteSegmentSection)?;
        for segment in segments {
            let byte_len = section_length(segment.byte_len() as u64, "segment")?;
            self.writer
                .write_all(&segment.bit_len().to_be_bytes())
                .map_err(Error::FailedToWriteSegmentSection)?;
            self.writer
                .write_all(&byte_len.to_be_bytes())
                .map_err(Error::FailedToWriteSegmentSection)?;
            self.writer
                .write_all(segment.as_bytes())
                .map_err(Error::FailedToWriteSegmentSection)?;
        }
        log::debug!(
            "wrote container with {} codebook bits and {} segments",
            codebook.bit_len(),
            segments.len()
        );
        Ok(())
    }
}

/// Section lengths travel in 32 bit fields; larger values must fail the
/// write instead of wrapping.
fn section_length(length: u64, section: &'static str) -> Result<u32> {
    u32::try_from(length).map_err(|_| Error::SectionTooLarge(section))
}

/// Reads a compressed file back into the code tree and the encoded
/// segments. Section lengths come from the wire, buffers grow as the
/// announced bytes actually arrive.
pub struct ContainerReader<'a, T: Read> {
    reader: &'a mut T,
}

impl<'a, T: Read> ContainerReader<'a, T> {
    pub fn new(reader: &'a mut T) -> Self {
        Self { reader }
    }

    pub fn read<S: FixedWidthSymbol>(&mut self) -> Result<(CodeTree<S>, Vec<BitStream>)> {
        let mut magic = [0u8; 4];
        self.reader
            .read_exact(&mut magic)
            .map_err(Error::FailedToReadContainer)?;
        if magic != MAGIC {
            return Err(Error::MalformedContainer(
                "stream does not start with the container magic",
            ));
        }
        let symbol_width = self.read_u8()?;
        if symbol_width as u32 != S::BIT_WIDTH {
            return Err(Error::MalformedContainer(
                "symbol width does not match the requested alphabet",
            ));
        }
        let codebook_bits = self.read_u32()? as u64;
        let codebook_bytes = self.read_bytes(codebook_bits.div_ceil(8) as usize)?;
        log_section("codebook", &codebook_bytes);
        let codebook = BitStream::from_parts(codebook_bytes, codebook_bits)?;
        let tree = read_codebook::<S>(&codebook)?;
        let segment_count = self.read_u32()?;
        let mut segments = Vec::new();
        for _ in 0..segment_count {
            let bit_len = self.read_u64()?;
            let byte_len = self.read_u32()? as u64;
            if bit_len.div_ceil(8) != byte_len {
                return Err(Error::MalformedContainer(
                    "segment byte length does not match its bit length",
                ));
            }
            let bytes = self.read_bytes(byte_len as usize)?;
            segments.push(BitStream::from_parts(bytes, bit_len)?);
        }
        log::debug!(
            "read container with {} codebook bits and {} segments",
            codebook_bits,
            segment_count
        );
        Ok((tree, segments))
    }

    fn read_u8(&mut self) -> Result<u8> {
        let mut buffer = [0u8; 1];
        self.reader
            .read_exact(&mut buffer)
            .map_err(Error::FailedToReadContainer)?;
        Ok(buffer[0])
    }

    fn read_u32(&mut self) -> Result<u32> {
        let mut buffer = [0u8; 4];
        self.reader
            .read_exact(&mut buffer)
            .map_err(Error::FailedToReadContainer)?;
        Ok(u32::from_be_bytes(buffer))
    }

    fn read_u64(&mut self) -> Result<u64> {
        let mut buffer = [0u8; 8];
        self.reader
            .read_exact(&mut buffer)
            .map_err(Error::FailedToReadContainer)?;
        Ok(u64::from_be_bytes(buffer))
    }

    fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.reader
            .by_ref()
            .take(len as u64)
            .read_to_end(&mut bytes)
            .map_err(Error::FailedToReadContainer)?;
        if bytes.len() != len {
            return Err(Error::MalformedContainer(
                "container ends before the announced section length",
            ));
        }
        Ok(bytes)
    }
}
