use huffpack::binary_stream::{BitReader, BitStream, BitWriter};
use std::io::Write;

fn main() {
    let mut buffer: Vec<u8> = vec![];
    let bit_len;
    {
        let mut writer = BitWriter::new(&mut buffer);
        // 10 bit pattern: 1110001100
        for _i in 0..1000 {
            writer.write_bits(&[0b11100011], 8).expect("write failed");
            writer.write_bits(&[0x00], 2).expect("write failed");
        }
        writer.flush().expect("flush failed");
        bit_len = writer.bits_written();
    }

    let stream = BitStream::from_parts(buffer, bit_len).expect("stream assembly failed");
    let pattern = [
        true, true, true, false, false, false, true, true, false, false,
    ];
    let mut reader = BitReader::new(&stream);
    let mut mismatches = 0;
    let mut position = 0u64;
    while let Some(bit) = reader.next_bit() {
        if bit != pattern[(position % 10) as usize] {
            println!("bit mismatch at position {}", position);
            mismatches += 1;
        }
        position += 1;
    }
    println!(
        "read {} bits back, {} mismatches",
        stream.bit_len(),
        mismatches
    );
}
