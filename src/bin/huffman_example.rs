use huffpack::error::Error;
use huffpack::huffman::{CodeTable, CodeTree, FrequencyTable, SymbolDecoder, SymbolEncoder};

fn main() -> Result<(), Error> {
    let message = b"dadbeefcafe";

    let frequency_table = FrequencyTable::from_symbols(message.iter().copied());
    let tree = CodeTree::build(&frequency_table)?;
    println!("code tree\n{}", tree);

    let code_table = CodeTable::from_tree(&tree);
    let mut codes: Vec<_> = code_table.iter().collect();
    codes.sort_by_key(|(symbol, _)| **symbol);
    println!("code table");
    for (symbol, code) in codes {
        println!("{} -> {}", *symbol as char, code);
    }

    let encoder = SymbolEncoder::new(&code_table);
    let encoded = encoder.encode(message)?;
    println!("message\n{:?}", message);
    println!(
        "encoded bytes ({} bits)\n{:?}",
        encoded.bit_len(),
        encoded.as_bytes()
    );

    let decoder = SymbolDecoder::new(&tree);
    let decoded = decoder.decode(&encoded)?;
    println!("decoded message\n{}", String::from_utf8_lossy(&decoded));
    Ok(())
}
