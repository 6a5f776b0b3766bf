use std::sync::mpsc::channel;
use std::sync::Arc;

use threadpool::ThreadPool;

use crate::binary_stream::BitStream;
use crate::error::Error;
use crate::huffman::{CodeTable, Symbol, SymbolEncoder};
use crate::Result;

/// Encode a symbol sequence in independent chunks on the given pool. Every
/// chunk is padded to a byte boundary on its own, so the resulting streams
/// can only be decoded separately, not as one concatenation. The returned
/// order matches the chunk order of the input.
pub fn encode_chunks<S>(
    symbols: &[S],
    code_table: &Arc<CodeTable<S>>,
    pool: &ThreadPool,
    chunk_len: usize,
) -> Result<Vec<BitStream>>
where
    S: Symbol + Send + Sync + 'static,
{
    if chunk_len == 0 {
        return Err(Error::InvalidChunkLength);
    }
    let chunk_count = symbols.len().div_ceil(chunk_len);
    let (sender, receiver) = channel();
    for (index, chunk) in symbols.chunks(chunk_len).enumerate() {
        let chunk: Vec<S> = chunk.to_vec();
        let code_table = Arc::clone(code_table);
        let sender = sender.clone();
        pool.execute(move || {
            let encoder = SymbolEncoder::new(&code_table);
            let result = encoder.encode(&chunk);
            let _ = sender.send((index, result));
        });
    }
    drop(sender);
    let mut encoded: Vec<Option<BitStream>> = Vec::new();
    encoded.resize_with(chunk_count, || None);
    for (index, result) in receiver {
        encoded[index] = Some(result?);
    }
    log::debug!(
        "encoded {} symbols as {} chunks of up to {} symbols",
        symbols.len(),
        chunk_count,
        chunk_len
    );
    encoded
        .into_iter()
        .enumerate()
        .map(|(index, stream)| stream.ok_or(Error::FailedToEncodeChunk(index)))
        .collect()
}
