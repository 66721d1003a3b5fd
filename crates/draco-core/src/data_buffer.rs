use crate::status::{DracoError, Status};

/// Growable byte storage backing the values of a point attribute.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DataBuffer {
    data: Vec<u8>,
}

impl DataBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails instead of aborting when `new_size` bytes cannot be allocated.
    pub fn resize(&mut self, new_size: usize) -> Status {
        if new_size > self.data.len() {
            self.data
                .try_reserve_exact(new_size - self.data.len())
                .map_err(|_| {
                    DracoError::BufferError(format!("Cannot allocate {} bytes", new_size))
                })?;
        }
        self.data.resize(new_size, 0);
        Ok(())
    }

    /// Returns `len` bytes starting at `byte_pos`, or `None` when out of bounds.
    pub fn read(&self, byte_pos: usize, len: usize) -> Option<&[u8]> {
        let end = byte_pos.checked_add(len)?;
        self.data.get(byte_pos..end)
    }

    /// Writes `in_data` at `byte_pos`, growing the buffer when needed.
    pub fn write(&mut self, byte_pos: usize, in_data: &[u8]) {
        let end = byte_pos + in_data.len();
        if end > self.data.len() {
            self.data.resize(end, 0);
        }
        self.data[byte_pos..end].copy_from_slice(in_data);
    }

    pub fn data_size(&self) -> usize {
        self.data.len()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

/// Allocates `len` default values, reporting an error when memory runs out.
pub fn try_alloc_vec<T: Clone + Default>(len: usize) -> Result<Vec<T>, DracoError> {
    let mut values = Vec::new();
    values
        .try_reserve_exact(len)
        .map_err(|_| DracoError::BufferError(format!("Cannot allocate {} values", len)))?;
    values.resize(len, T::default());
    Ok(values)
}
