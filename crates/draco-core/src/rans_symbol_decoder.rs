use crate::ans::AnsDecoder;
use crate::decoder_buffer::DecoderBuffer;
use crate::rans_symbol_coding::RAnsSymbol;
use crate::status::DracoError;

/// Decodes symbols coded with a static rANS probability table of
/// `1 << RANS_PRECISION_BITS` slots.
pub struct RAnsSymbolDecoder<'a, const RANS_PRECISION_BITS: u32> {
    ans: AnsDecoder<'a>,
    probability_table: Vec<RAnsSymbol>,
    lut: Vec<u32>,
    num_symbols: usize,
}

impl<'a, const RANS_PRECISION_BITS: u32> Default for RAnsSymbolDecoder<'a, RANS_PRECISION_BITS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, const RANS_PRECISION_BITS: u32> RAnsSymbolDecoder<'a, RANS_PRECISION_BITS> {
    const RANS_PRECISION: u32 = 1 << RANS_PRECISION_BITS;
    const L_RANS_BASE: u32 = Self::RANS_PRECISION * 4;

    pub fn new() -> Self {
        Self {
            ans: AnsDecoder::new(&[]),
            probability_table: Vec::new(),
            lut: Vec::new(),
            num_symbols: 0,
        }
    }

    pub fn num_symbols(&self) -> usize {
        self.num_symbols
    }

    /// Reads the probability table.
    pub fn create(&mut self, buffer: &mut DecoderBuffer) -> Result<(), DracoError> {
        let num_symbols = buffer.decode_varint_u32()? as usize;
        // Each symbol needs at least one byte, unless it is part of a zero run.
        if num_symbols / 64 > buffer.remaining_size() {
            return Err(DracoError::DracoError(format!(
                "Too many rANS symbols: {}",
                num_symbols
            )));
        }
        self.num_symbols = num_symbols;
        self.probability_table.clear();
        self.probability_table.resize(num_symbols, RAnsSymbol::default());
        if num_symbols == 0 {
            return Ok(());
        }

        let mut i = 0;
        while i < num_symbols {
            let b = buffer.decode_u8()?;
            let token = b & 3;
            if token == 3 {
                // Run of zero-probability symbols.
                let offset = (b >> 2) as usize;
                if i + offset >= num_symbols {
                    return Err(DracoError::DracoError(
                        "rANS zero run exceeds symbol count".into(),
                    ));
                }
                for j in 0..=offset {
                    self.probability_table[i + j].prob = 0;
                }
                i += offset;
            } else {
                let mut prob = (b >> 2) as u32;
                for extra in 0..token as u32 {
                    let eb = buffer.decode_u8()? as u32;
                    prob |= eb << (8 * (extra + 1) - 2);
                }
                self.probability_table[i].prob = prob;
            }
            i += 1;
        }

        self.lut.clear();
        self.lut.resize(Self::RANS_PRECISION as usize, 0);
        let mut cum_prob: u32 = 0;
        for (symbol_id, sym) in self.probability_table.iter_mut().enumerate() {
            sym.cum_prob = cum_prob;
            let end = cum_prob.saturating_add(sym.prob);
            if end > Self::RANS_PRECISION {
                return Err(DracoError::DracoError(
                    "rANS probabilities exceed the table precision".into(),
                ));
            }
            for slot in &mut self.lut[cum_prob as usize..end as usize] {
                *slot = symbol_id as u32;
            }
            cum_prob = end;
        }
        if cum_prob != Self::RANS_PRECISION {
            return Err(DracoError::DracoError(format!(
                "rANS probabilities sum to {} instead of {}",
                cum_prob,
                Self::RANS_PRECISION
            )));
        }
        Ok(())
    }

    /// Reads the size of the coded data and positions the rANS state at its end.
    pub fn start_decoding(&mut self, buffer: &mut DecoderBuffer<'a>) -> Result<(), DracoError> {
        let bytes_encoded = buffer.decode_varint()? as usize;
        let data = buffer.decode_slice(bytes_encoded)?;
        self.ans = AnsDecoder::new(data);
        self.ans.read_init(Self::L_RANS_BASE)
    }

    /// Fails when no probability table has been read.
    pub fn decode_symbol(&mut self) -> Result<u32, DracoError> {
        self.ans.read_normalize();
        let state = self.ans.state();
        let quo = state / Self::RANS_PRECISION;
        let rem = state % Self::RANS_PRECISION;
        let symbol_id = *self
            .lut
            .get(rem as usize)
            .ok_or_else(|| DracoError::DracoError("Empty rANS probability table".into()))?;
        let sym = &self.probability_table[symbol_id as usize];
        self.ans.set_state(quo * sym.prob + rem - sym.cum_prob);
        Ok(symbol_id)
    }
}
