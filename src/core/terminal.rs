//! Terminal trait.

/// Minimal terminal interface the compositor writes through.
///
/// Input decoding, raw mode, and signal handling belong to the backend that implements this
/// trait; the compositor only needs a byte sink and the current dimensions.
pub trait Terminal {
    /// Write output to the terminal.
    fn write(&mut self, data: &str);

    /// Commit buffered output, if the backend buffers.
    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }

    /// Terminal dimensions.
    fn columns(&self) -> u16;
    fn rows(&self) -> u16;
}
