use std::io;
use std::io::Write;

use crate::error::Error;
use crate::Result;

/// Packed bits produced by an encode pass.
///
/// Bits are stored most significant bit first within each byte, which is
/// also the wire order. `bit_len` says how many bits carry data; the
/// remaining low bits of the final byte are zero padding.
pub struct BitStream {
    bytes: Vec<u8>,
    bit_len: u64,
}

impl BitStream {
    /// Assemble a bit stream from a byte buffer and its valid bit count.
    ///
    /// The buffer must be the minimal one holding `bit_len` bits.
    pub fn from_parts(bytes: Vec<u8>, bit_len: u64) -> Result<BitStream> {
        if bytes.len() as u64 != bit_len.div_ceil(8) {
            return Err(Error::InvalidBitStream(
                "byte buffer length does not match the valid bit count",
            ));
        }
        Ok(BitStream { bytes, bit_len })
    }

    pub fn bit_len(&self) -> u64 {
        self.bit_len
    }

    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Value of the bit at `index`, or None past the valid bit count.
    pub fn bit(&self, index: u64) -> Option<bool> {
        if index >= self.bit_len {
            return None;
        }
        let byte_index = (index / 8) as usize;
        let bit_index = (index % 8) as u32;
        Some(self.bytes[byte_index] & 0b10000000_u8.rotate_right(bit_index) > 0)
    }
}

/// State for writing individual bits to a Writer
pub struct BitWriter<'a, T: Write> {
    /// the underlying output stream
    writer: &'a mut T,
    /// buffer of individual bits not yet written
    buffer: u8,
    /// how many bits are waiting to be written
    buffer_space_used: u8,
    /// total bits accepted so far, including buffered ones
    bits_written: u64,
}

impl<'a, T: Write> BitWriter<'a, T> {
    pub fn new(writer: &'a mut T) -> BitWriter<'a, T> {
        BitWriter {
            writer,
            buffer: 0,
            buffer_space_used: 0,
            bits_written: 0,
        }
    }

    /// write a non-byte-aligned number of bits
    ///
    /// buf: a byte array containing a contiguous block, most
    ///      significant bit first
    /// count: how many bits of buf to write
    ///
    /// returns the number of byte writes incurred onto the underlying
    /// stream, but does not guarantee that all bits have been written,
    /// use flush to write any remaining bits.
    pub fn write_bits(&mut self, buf: &[u8], count: usize) -> std::result::Result<usize, io::Error> {
        let mut remaining_bits_offset = 0;
        let mut bytes_written = 0;
        if self.buffer_space_used == 0 {
            // this is efficient for large blocks of byte writes
            let quick_byte_count = count / 8;
            self.writer.write_all(&buf[0..quick_byte_count])?;
            bytes_written = quick_byte_count;
            remaining_bits_offset = quick_byte_count * 8;
        }
        for bit_index in remaining_bits_offset..count {
            // this isn't (for large blocks of bits)
            let byte_index = bit_index / 8;
            let bit_index = bit_index % 8;
            let bit_val: bool = (buf[byte_index] & 0b10000000_u8.rotate_right(bit_index as u32)) > 0;
            if bit_val {
                self.buffer |= 0b10000000_u8.rotate_right(self.buffer_space_used as u32);
            } else {
                self.buffer &= 0b01111111_u8.rotate_right(self.buffer_space_used as u32);
            }
            self.buffer_space_used += 1;
            if self.buffer_space_used == 8 {
                self.writer.write_all(&[self.buffer])?;
                bytes_written += 1;
                self.buffer_space_used = 0;
                self.buffer = 0; // depended upon in flush()
            }
        }
        self.bits_written += count as u64;
        Ok(bytes_written)
    }

    /// Total number of bits accepted so far.
    pub fn bits_written(&self) -> u64 {
        self.bits_written
    }
}

impl<'a, T: Write> Write for BitWriter<'a, T> {
    /// Writing of byte arrays into the bit writer (for performance)
    ///
    /// Warning: Even when the returned number in the result equals
    ///          the length of the input buffer, not all bits of the
    ///          input may have been written (because of possible
    ///          single bits in BitWriters buffer)
    fn write(&mut self, buf: &[u8]) -> std::result::Result<usize, io::Error> {
        self.write_bits(buf, buf.len() * 8)
    }

    /// Flush all bits and the underlying writer;
    ///
    /// If there are non-byte-aligned bits still
    /// in the buffer, they will be written to the output
    /// with 0 padding to the next byte;
    fn flush(&mut self) -> std::result::Result<(), io::Error> {
        if self.buffer_space_used != 0 {
            self.writer.write_all(&[self.buffer])?;
            self.buffer = 0;
            self.buffer_space_used = 0;
        }
        self.writer.flush()
    }
}

/// Cursor over the valid bits of a BitStream.
pub struct BitReader<'a> {
    stream: &'a BitStream,
    cursor: u64,
}

impl<'a> BitReader<'a> {
    pub fn new(stream: &'a BitStream) -> BitReader<'a> {
        BitReader { stream, cursor: 0 }
    }

    /// Next valid bit, or None once the valid bit count is exhausted.
    /// Padding bits are never returned.
    pub fn next_bit(&mut self) -> Option<bool> {
        let bit = self.stream.bit(self.cursor)?;
        self.cursor += 1;
        Some(bit)
    }

    /// Read up to 64 bits into the low end of a u64, first bit read
    /// ending up most significant. None if fewer than `count` remain.
    pub fn read_bits(&mut self, count: u32) -> Option<u64> {
        if self.remaining() < count as u64 {
            return None;
        }
        let mut value = 0u64;
        for _ in 0..count {
            let bit = self.next_bit()?;
            value = (value << 1) | bit as u64;
        }
        Some(value)
    }

    pub fn position(&self) -> u64 {
        self.cursor
    }

    pub fn remaining(&self) -> u64 {
        self.stream.bit_len() - self.cursor
    }
}

#[cfg(test)]
mod test {
    use super::{BitReader, BitStream, BitWriter};
    use crate::error::Error;
    use std::io::Write;

    #[test]
    fn byte_mode_test() {
        let mut my_output: Vec<u8> = vec![];
        let mut writer = BitWriter::new(&mut my_output);
        let input: &[u8] = &[72, 65, 76, 76, 79];
        writer.write(input).expect("should not fail");
        writer.flush().expect("flushing should not fail");
        assert_eq!(my_output[0], 72);
        assert_eq!(my_output[1], 65);
        assert_eq!(my_output[2], 76);
        assert_eq!(my_output[3], 76);
        assert_eq!(my_output[4], 79);
        assert_eq!(my_output.len(), 5);
    }

    #[test]
    fn bit_mode_test() {
        let mut my_output: Vec<u8> = vec![];
        let mut writer = BitWriter::new(&mut my_output);
        // write 0x11000011 0x11110000 (in MSb notation)
        writer.write_bits(&[0xFF], 2).expect("ERR");
        writer.write_bits(&[0x00], 4).expect("ERR");
        writer.write_bits(&[0xFF], 2).expect("ERR");
        writer.write_bits(&[0xFF], 4).expect("ERR");
        writer.flush().expect("ERR");
        assert_eq!(my_output.len(), 2);
        assert_eq!(my_output[0], 195);
        assert_eq!(my_output[1], 15 << 4);
    }

    #[test]
    fn mixed_mode_test() {
        let mut my_output: Vec<u8> = vec![];
        let mut writer = BitWriter::new(&mut my_output);
        // 0b111
        writer.write_bits(&[0xFF], 3).expect("ERR");
        // 0b11100000 00100000 01010000 100
        writer.write(&[1, 2, 4 | 128]).expect("ERR");
        writer.flush().expect("ERR");
        assert_eq!(my_output.len(), 4);
        assert_eq!(my_output[0], 224);
        assert_eq!(my_output[1], 32);
        assert_eq!(my_output[2], 80);
        assert_eq!(my_output[3], 128);
    }

    #[test]
    fn bits_written_counts_buffered_bits_test() {
        let mut my_output: Vec<u8> = vec![];
        let mut writer = BitWriter::new(&mut my_output);
        writer.write_bits(&[0xFF], 3).expect("ERR");
        assert_eq!(writer.bits_written(), 3);
        writer.write(&[0xAB]).expect("ERR");
        assert_eq!(writer.bits_written(), 11);
        writer.flush().expect("ERR");
        assert_eq!(writer.bits_written(), 11, "flush must not change the count");
        assert_eq!(my_output.len(), 2);
    }

    #[test]
    fn from_parts_accepts_minimal_buffer_test() {
        let stream =
            BitStream::from_parts(vec![0xAB, 0xC0], 10).expect("minimal buffer should be accepted");
        assert_eq!(stream.bit_len(), 10);
        assert_eq!(stream.byte_len(), 2);
        assert_eq!(stream.as_bytes(), &[0xAB, 0xC0]);
    }

    #[test]
    fn from_parts_rejects_oversized_buffer_test() {
        let result = BitStream::from_parts(vec![0xAB, 0xC0, 0x00], 10);
        assert!(
            matches!(result, Err(Error::InvalidBitStream(_))),
            "buffer with a spare byte must be rejected"
        );
    }

    #[test]
    fn from_parts_rejects_undersized_buffer_test() {
        let result = BitStream::from_parts(vec![0xAB], 10);
        assert!(
            matches!(result, Err(Error::InvalidBitStream(_))),
            "buffer missing a byte must be rejected"
        );
    }

    #[test]
    fn from_parts_rejects_absurd_bit_count_test() {
        let result = BitStream::from_parts(Vec::new(), u64::MAX);
        assert!(
            matches!(result, Err(Error::InvalidBitStream(_))),
            "a bit count near u64::MAX must be rejected"
        );
    }

    #[test]
    fn reader_returns_bits_in_write_order_test() {
        // 0b10110100, valid length 6
        let stream = BitStream::from_parts(vec![0b10110100], 6).expect("stream should be valid");
        let mut reader = BitReader::new(&stream);
        let expected = [true, false, true, true, false, true];
        for (index, &expected_bit) in expected.iter().enumerate() {
            assert_eq!(
                reader.next_bit(),
                Some(expected_bit),
                "bit {} does not match",
                index
            );
        }
        assert_eq!(reader.next_bit(), None, "padding bits must not be readable");
    }

    #[test]
    fn reader_read_bits_assembles_value_test() {
        let stream =
            BitStream::from_parts(vec![0b01100001, 0b10000000], 9).expect("stream should be valid");
        let mut reader = BitReader::new(&stream);
        assert_eq!(reader.read_bits(1), Some(0));
        assert_eq!(reader.read_bits(8), Some(0b11000011));
        assert_eq!(reader.read_bits(1), None);
    }

    #[test]
    fn reader_position_and_remaining_test() {
        let stream = BitStream::from_parts(vec![0xF0], 5).expect("stream should be valid");
        let mut reader = BitReader::new(&stream);
        assert_eq!(reader.position(), 0);
        assert_eq!(reader.remaining(), 5);
        reader.next_bit();
        reader.next_bit();
        assert_eq!(reader.position(), 2);
        assert_eq!(reader.remaining(), 3);
    }

    #[test]
    fn written_bits_read_back_identical_test() {
        let mut my_output: Vec<u8> = vec![];
        let bit_len;
        {
            let mut writer = BitWriter::new(&mut my_output);
            writer.write_bits(&[0b10100000], 3).expect("ERR");
            writer.write_bits(&[0xFF], 2).expect("ERR");
            writer.write_bits(&[0b01000000], 2).expect("ERR");
            bit_len = writer.bits_written();
            writer.flush().expect("ERR");
        }
        let stream = BitStream::from_parts(my_output, bit_len).expect("stream should be valid");
        let mut reader = BitReader::new(&stream);
        let expected = [true, false, true, true, true, false, true];
        for (index, &expected_bit) in expected.iter().enumerate() {
            assert_eq!(
                reader.next_bit(),
                Some(expected_bit),
                "bit {} does not match",
                index
            );
        }
        assert_eq!(reader.next_bit(), None);
    }
}
