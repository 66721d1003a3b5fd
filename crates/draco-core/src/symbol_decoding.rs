use crate::decoder_buffer::DecoderBuffer;
use crate::rans_symbol_coding::compute_rans_precision_from_unique_symbols_bit_length;
use crate::rans_symbol_decoder::RAnsSymbolDecoder;
use crate::status::DracoError;

/// Symbol coding scheme ids as written by the Draco encoder.
const SYMBOL_CODING_TAGGED: u8 = 0;
const SYMBOL_CODING_RAW: u8 = 1;

const MAX_RAW_ENCODING_BIT_LENGTH: u8 = 18;

/// Decodes `num_values` unsigned symbols grouped in tuples of `num_components`.
pub fn decode_symbols(
    num_values: usize,
    num_components: usize,
    buffer: &mut DecoderBuffer,
    out: &mut [u32],
) -> Result<(), DracoError> {
    if num_values == 0 {
        return Ok(());
    }
    if out.len() < num_values {
        return Err(DracoError::InvalidParameter(format!(
            "Symbol output holds {} values, {} requested",
            out.len(),
            num_values
        )));
    }
    match buffer.decode_u8()? {
        SYMBOL_CODING_TAGGED => decode_tagged_symbols(num_values, num_components, buffer, out),
        SYMBOL_CODING_RAW => decode_raw_symbols(num_values, buffer, out),
        scheme => Err(DracoError::DracoError(format!(
            "Unknown symbol coding scheme: {}",
            scheme
        ))),
    }
}

fn decode_raw_symbols(
    num_values: usize,
    buffer: &mut DecoderBuffer,
    out: &mut [u32],
) -> Result<(), DracoError> {
    let max_bit_length = buffer.decode_u8()?;
    if max_bit_length == 0 || max_bit_length > MAX_RAW_ENCODING_BIT_LENGTH {
        return Err(DracoError::DracoError(format!(
            "Invalid raw symbol bit length: {}",
            max_bit_length
        )));
    }
    match compute_rans_precision_from_unique_symbols_bit_length(max_bit_length as u32) {
        12 => decode_raw_symbols_typed::<12>(num_values, buffer, out),
        13 => decode_raw_symbols_typed::<13>(num_values, buffer, out),
        14 => decode_raw_symbols_typed::<14>(num_values, buffer, out),
        15 => decode_raw_symbols_typed::<15>(num_values, buffer, out),
        16 => decode_raw_symbols_typed::<16>(num_values, buffer, out),
        17 => decode_raw_symbols_typed::<17>(num_values, buffer, out),
        18 => decode_raw_symbols_typed::<18>(num_values, buffer, out),
        19 => decode_raw_symbols_typed::<19>(num_values, buffer, out),
        _ => decode_raw_symbols_typed::<20>(num_values, buffer, out),
    }
}

fn decode_raw_symbols_typed<const PRECISION_BITS: u32>(
    num_values: usize,
    buffer: &mut DecoderBuffer,
    out: &mut [u32],
) -> Result<(), DracoError> {
    let mut decoder = RAnsSymbolDecoder::<PRECISION_BITS>::new();
    decoder.create(buffer)?;
    if decoder.num_symbols() == 0 {
        return Err(DracoError::DracoError("Empty raw symbol table".into()));
    }
    decoder.start_decoding(buffer)?;
    for slot in out.iter_mut().take(num_values) {
        *slot = decoder.decode_symbol()?;
    }
    Ok(())
}

fn decode_tagged_symbols(
    num_values: usize,
    num_components: usize,
    buffer: &mut DecoderBuffer,
    out: &mut [u32],
) -> Result<(), DracoError> {
    if num_components == 0 {
        return Err(DracoError::InvalidParameter(
            "Tagged symbols need at least one component".into(),
        ));
    }
    let mut tag_decoder = RAnsSymbolDecoder::<12>::new();
    tag_decoder.create(buffer)?;
    if tag_decoder.num_symbols() == 0 {
        return Err(DracoError::DracoError("Empty tag symbol table".into()));
    }
    tag_decoder.start_decoding(buffer)?;

    buffer.start_bit_decoding(false)?;
    let result = (|| {
        for chunk in out[..num_values].chunks_mut(num_components) {
            let bit_length = tag_decoder.decode_symbol()?;
            if bit_length > 32 {
                return Err(DracoError::DracoError(format!(
                    "Invalid tagged bit length: {}",
                    bit_length
                )));
            }
            for slot in chunk.iter_mut() {
                *slot = buffer.decode_least_significant_bits32(bit_length)?;
            }
        }
        Ok(())
    })();
    buffer.end_bit_decoding();
    result
}

/// Maps zig-zag coded symbols back to signed integers.
pub fn convert_symbol_to_signed_int(symbol: u32) -> i32 {
    let magnitude = (symbol >> 1) as i32;
    if symbol & 1 == 0 {
        magnitude
    } else {
        -magnitude - 1
    }
}

pub fn convert_symbols_to_signed_ints(symbols: &[u32], out: &mut [i32]) {
    for (dst, &src) in out.iter_mut().zip(symbols) {
        *dst = convert_symbol_to_signed_int(src);
    }
}
