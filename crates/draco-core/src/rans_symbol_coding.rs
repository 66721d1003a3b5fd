#[derive(Debug, Clone, Copy, Default)]
pub struct RAnsSymbol {
    pub prob: u32,
    pub cum_prob: u32,
}

/// Precision (in bits) of the rANS table used for symbols of the given bit length.
pub fn compute_rans_precision_from_unique_symbols_bit_length(symbols_bit_length: u32) -> u32 {
    ((3 * symbols_bit_length) / 2).clamp(12, 20)
}
