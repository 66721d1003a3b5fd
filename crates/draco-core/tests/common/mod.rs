//! Builders for hand-made Draco bitstreams.
#![allow(dead_code)]

#[derive(Default)]
pub struct StreamBuilder {
    data: Vec<u8>,
}

impl StreamBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// `DRACO`, version, geometry type (0 point cloud, 1 mesh), method and flags.
    pub fn header(major: u8, minor: u8, encoder_type: u8, method: u8, flags: u16) -> Self {
        let mut builder = Self::new();
        builder
            .bytes(b"DRACO")
            .u8(major)
            .u8(minor)
            .u8(encoder_type)
            .u8(method)
            .u16(flags);
        builder
    }

    pub fn u8(&mut self, v: u8) -> &mut Self {
        self.data.push(v);
        self
    }

    pub fn i8(&mut self, v: i8) -> &mut Self {
        self.data.push(v as u8);
        self
    }

    pub fn u16(&mut self, v: u16) -> &mut Self {
        self.bytes(&v.to_le_bytes())
    }

    pub fn u32(&mut self, v: u32) -> &mut Self {
        self.bytes(&v.to_le_bytes())
    }

    pub fn i32(&mut self, v: i32) -> &mut Self {
        self.bytes(&v.to_le_bytes())
    }

    pub fn f32(&mut self, v: f32) -> &mut Self {
        self.bytes(&v.to_le_bytes())
    }

    pub fn varint(&mut self, mut v: u64) -> &mut Self {
        loop {
            let byte = (v & 0x7f) as u8;
            v >>= 7;
            if v == 0 {
                self.data.push(byte);
                return self;
            }
            self.data.push(byte | 0x80);
        }
    }

    pub fn bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.data.extend_from_slice(bytes);
        self
    }

    /// Attribute descriptor as read by the attributes decoder.
    pub fn attribute(
        &mut self,
        att_type: u8,
        data_type: u8,
        num_components: u8,
        normalized: bool,
        unique_id: u32,
    ) -> &mut Self {
        self.u8(att_type)
            .u8(data_type)
            .u8(num_components)
            .u8(normalized as u8)
            .varint(unique_id as u64)
    }

    pub fn build(&self) -> Vec<u8> {
        self.data.clone()
    }
}

pub fn compute_rans_precision_bits(unique_symbols_bit_length: u32) -> u32 {
    (3 * unique_symbols_bit_length / 2).clamp(12, 20)
}

fn probabilities(symbols: &[u32], num_symbols: usize, precision: u32) -> Vec<u32> {
    let mut counts = vec![0u64; num_symbols];
    for &s in symbols {
        counts[s as usize] += 1;
    }
    let total = symbols.len() as u64;
    let mut probs: Vec<u32> = counts
        .iter()
        .map(|&c| {
            if c == 0 {
                0
            } else {
                ((c * precision as u64 / total) as u32).max(1)
            }
        })
        .collect();
    let sum: u32 = probs.iter().sum();
    let (max_id, _) = probs
        .iter()
        .enumerate()
        .max_by_key(|&(_, p)| *p)
        .expect("at least one symbol");
    probs[max_id] = probs[max_id] + precision - sum;
    probs
}

fn write_table(out: &mut StreamBuilder, probs: &[u32]) {
    out.varint(probs.len() as u64);
    let mut i = 0;
    while i < probs.len() {
        let prob = probs[i];
        if prob == 0 {
            let mut offset = 0;
            while offset < 63 && i + offset + 1 < probs.len() && probs[i + offset + 1] == 0 {
                offset += 1;
            }
            out.u8(((offset as u8) << 2) | 3);
            i += offset;
        } else {
            let extra = if prob >= 1 << 14 {
                2
            } else if prob >= 1 << 6 {
                1
            } else {
                0
            };
            out.u8(((prob << 2) as u8) | extra);
            for b in 0..extra as u32 {
                out.u8((prob >> (8 * (b + 1) - 2)) as u8);
            }
        }
        i += 1;
    }
}

/// Probability table, varint byte count and the rANS coded `symbols`.
pub fn rans_symbols(out: &mut StreamBuilder, symbols: &[u32], num_symbols: usize, precision_bits: u32) {
    let precision = 1u32 << precision_bits;
    let l_base = precision * 4;
    let probs = probabilities(symbols, num_symbols, precision);
    let mut cum = Vec::with_capacity(probs.len());
    let mut acc = 0;
    for &p in &probs {
        cum.push(acc);
        acc += p;
    }
    write_table(out, &probs);

    let mut coded = Vec::new();
    let mut state = l_base;
    for &s in symbols.iter().rev() {
        let p = probs[s as usize];
        while state >= l_base / precision * 256 * p {
            coded.push((state % 256) as u8);
            state /= 256;
        }
        state = (state / p) * precision + state % p + cum[s as usize];
    }
    let s = state - l_base;
    if s < 1 << 6 {
        coded.push(s as u8);
    } else if s < 1 << 14 {
        coded.extend_from_slice(&((1u32 << 14) + s).to_le_bytes()[..2]);
    } else if s < 1 << 22 {
        coded.extend_from_slice(&((2u32 << 22) + s).to_le_bytes()[..3]);
    } else {
        coded.extend_from_slice(&((3u32 << 30) + s).to_le_bytes());
    }
    out.varint(coded.len() as u64).bytes(&coded);
}

fn bit_length(v: u32) -> u32 {
    32 - v.leading_zeros()
}

/// Symbols with the raw scheme (`decode_symbols` scheme 1).
pub fn raw_symbols(out: &mut StreamBuilder, values: &[u32]) {
    let max = values.iter().copied().max().unwrap_or(0);
    let num_symbols = max as usize + 1;
    let max_bit_length = bit_length(num_symbols as u32).max(1);
    out.u8(1).u8(max_bit_length as u8);
    rans_symbols(out, values, num_symbols, compute_rans_precision_bits(max_bit_length));
}

/// Symbols with the tagged scheme (`decode_symbols` scheme 0).
pub fn tagged_symbols(out: &mut StreamBuilder, values: &[u32], num_components: usize) {
    let tags: Vec<u32> = values
        .chunks(num_components)
        .map(|chunk| chunk.iter().map(|&v| bit_length(v)).max().unwrap_or(0))
        .collect();
    let num_tags = *tags.iter().max().unwrap_or(&0) as usize + 1;
    out.u8(0);
    rans_symbols(out, &tags, num_tags, 12);

    let mut bits = Vec::new();
    let mut bit_pos = 0usize;
    for (chunk, &tag) in values.chunks(num_components).zip(&tags) {
        for &v in chunk {
            for b in 0..tag {
                if bit_pos % 8 == 0 {
                    bits.push(0u8);
                }
                let bit = ((v >> b) & 1) as u8;
                *bits.last_mut().expect("bit byte") |= bit << (bit_pos % 8);
                bit_pos += 1;
            }
        }
    }
    out.bytes(&bits);
}

pub fn zigzag(v: i32) -> u32 {
    if v >= 0 {
        (v as u32) << 1
    } else {
        (((-(v as i64)) - 1) as u32) << 1 | 1
    }
}

/// Differences between consecutive indices as decoded by the compressed
/// connectivity method.
pub fn index_deltas(indices: &[u32]) -> Vec<u32> {
    let mut last = 0i64;
    indices
        .iter()
        .map(|&index| {
            let diff = index as i64 - last;
            last = index as i64;
            if diff < 0 {
                ((-diff) as u32) << 1 | 1
            } else {
                (diff as u32) << 1
            }
        })
        .collect()
}
