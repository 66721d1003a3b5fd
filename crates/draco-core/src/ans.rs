use crate::status::DracoError;

pub const ANS_IO_BASE: u32 = 256;

/// Reader side of the rANS coder used by Draco.
///
/// The encoder writes bytes forwards, so the decoder consumes `buf` from the end.
pub struct AnsDecoder<'a> {
    buf: &'a [u8],
    buf_offset: usize,
    state: u32,
    l_base: u32,
}

impl<'a> AnsDecoder<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            buf_offset: 0,
            state: 0,
            l_base: 0,
        }
    }

    pub fn state(&self) -> u32 {
        self.state
    }

    pub fn set_state(&mut self, state: u32) {
        self.state = state;
    }

    /// Loads the initial state stored in the last 1-4 bytes of the buffer.
    ///
    /// The two top bits of the final byte give the number of extra bytes.
    pub fn read_init(&mut self, l_base: u32) -> Result<(), DracoError> {
        self.l_base = l_base;
        let offset = self.buf.len();
        if offset < 1 {
            return Err(DracoError::BufferError("Empty rANS buffer".into()));
        }
        let x = (self.buf[offset - 1] >> 6) as usize;
        let len = x + 1;
        if offset < len {
            return Err(DracoError::BufferError("Truncated rANS state".into()));
        }
        let mut state = 0u32;
        for &b in self.buf[offset - len..offset].iter().rev() {
            state = (state << 8) | b as u32;
        }
        let mask = (1u32 << (8 * len - 2)) - 1;
        self.buf_offset = offset - len;
        self.state = (state & mask) + l_base;
        if self.state >= l_base * ANS_IO_BASE {
            return Err(DracoError::DracoError("Invalid rANS initial state".into()));
        }
        Ok(())
    }

    /// Pulls bytes into the state until it is back above the lower bound.
    pub fn read_normalize(&mut self) {
        while self.state < self.l_base && self.buf_offset > 0 {
            self.buf_offset -= 1;
            self.state = self.state * ANS_IO_BASE + self.buf[self.buf_offset] as u32;
        }
    }
}
