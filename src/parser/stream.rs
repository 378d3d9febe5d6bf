use crate::error::{DecodeError, Result};
use tracing::debug;

/// Bytes per word in the device log
pub const WORD_BYTES: usize = 4;

/// Byte stream over an in-memory device log
pub struct BinDataStream<'a> {
    data: &'a [u8],
    pub pos: usize,
    end: usize,
    pub eof: bool,
}

impl<'a> BinDataStream<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            end: data.len(),
            eof: data.is_empty(),
        }
    }

    /// Move the read cursor. Seeking past the end is allowed; the next read is short.
    pub fn set_position(&mut self, pos: usize) {
        self.pos = pos;
        self.eof = pos >= self.end;
    }

    pub fn remaining(&self) -> usize {
        self.end.saturating_sub(self.pos)
    }

    /// Read exactly `len` bytes, or fail with `ShortRead` and leave the cursor unchanged
    pub fn read_exact(&mut self, len: usize) -> Result<&'a [u8]> {
        let available = self.remaining();
        let data = self.data;
        let bytes = match self.pos.checked_add(len).and_then(|end| data.get(self.pos..end)) {
            Some(bytes) if available >= len => bytes,
            _ => {
                self.eof = true;
                return Err(DecodeError::ShortRead {
                    expected: len,
                    actual: available,
                });
            }
        };
        self.pos += len;
        self.eof = self.pos >= self.end;
        Ok(bytes)
    }

    /// Read `count` consecutive big-endian 32-bit words
    pub fn read_words_be(&mut self, count: usize) -> Result<Vec<u32>> {
        let len = count.checked_mul(WORD_BYTES).ok_or(DecodeError::ShortRead {
            expected: usize::MAX,
            actual: self.remaining(),
        })?;
        let bytes = self.read_exact(len)?;
        Ok(bytes
            .chunks_exact(WORD_BYTES)
            .map(|chunk| u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockState {
    Start,
    FirstBlock,
    SubsequentBlock,
    Done,
}

/// Splits a device log into blocks of words.
///
/// The first block has its own size and its first word is a sentinel that is
/// dropped. Every later block has the subsequent size and is kept whole. A
/// block that cannot be read in full ends the iteration; this is how the end
/// of a log is detected, so it is not an error. A zero-word subsequent block
/// size also ends the iteration after the first block.
pub struct BlockReader<'a> {
    stream: BinDataStream<'a>,
    offset: u64,
    initial_block_words: usize,
    subsequent_block_words: usize,
    state: BlockState,
    blocks_read: usize,
}

impl<'a> BlockReader<'a> {
    pub fn new(
        data: &'a [u8],
        offset: u64,
        initial_block_words: usize,
        subsequent_block_words: usize,
    ) -> Self {
        Self {
            stream: BinDataStream::new(data),
            offset,
            initial_block_words,
            subsequent_block_words,
            state: BlockState::Start,
            blocks_read: 0,
        }
    }

    pub fn blocks_read(&self) -> usize {
        self.blocks_read
    }

    pub fn is_done(&self) -> bool {
        self.state == BlockState::Done
    }

    fn finish(&mut self, err: DecodeError) -> Option<Vec<u32>> {
        debug!(
            "End of stream after {} block(s) at byte {}: {}",
            self.blocks_read, self.stream.pos, err
        );
        self.state = BlockState::Done;
        None
    }
}

impl Iterator for BlockReader<'_> {
    type Item = Vec<u32>;

    fn next(&mut self) -> Option<Vec<u32>> {
        loop {
            match self.state {
                BlockState::Start => {
                    let pos = usize::try_from(self.offset).unwrap_or(usize::MAX);
                    self.stream.set_position(pos);
                    self.state = BlockState::FirstBlock;
                }
                BlockState::FirstBlock => {
                    let mut words = match self.stream.read_words_be(self.initial_block_words) {
                        Ok(words) => words,
                        Err(err) => return self.finish(err),
                    };
                    if !words.is_empty() {
                        words.remove(0);
                    }
                    self.state = BlockState::SubsequentBlock;
                    self.blocks_read += 1;
                    return Some(words);
                }
                BlockState::SubsequentBlock => {
                    if self.subsequent_block_words == 0 {
                        return self.finish(DecodeError::ShortRead {
                            expected: 0,
                            actual: self.stream.remaining(),
                        });
                    }
                    return match self.stream.read_words_be(self.subsequent_block_words) {
                        Ok(words) => {
                            self.blocks_read += 1;
                            Some(words)
                        }
                        Err(err) => self.finish(err),
                    };
                }
                BlockState::Done => return None,
            }
        }
    }
}
