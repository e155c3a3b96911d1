//! # Value Header
//!
//! The fixed prefix of every value string, after the 4-byte schema version:
//!
//! ```text
//! cnt_not_null (2 B) | cnt_null (2 B) | ids[total] (2 B each) | offsets[total] (4 B each)
//! ```
//!
//! `ids` holds the schema indices of the non-key columns in declared order;
//! `offsets[i]` is either `-1` (column `ids[i]` is null) or the absolute byte
//! offset of that column's payload measured from the start of the value
//! string. Non-null offsets are strictly increasing and the payload region
//! carries no padding, so `[offsets[i], next non-null offset)` spans exactly
//! one column.

use hashbrown::HashMap;

use crate::buffer::Buf;
use crate::error::{CodecError, Result};

/// Byte width of one entry in the id array.
pub const ID_WIDTH: usize = 2;
/// Byte width of one entry in the offset array.
pub const OFFSET_WIDTH: usize = 4;
/// Bytes in front of the id array: schema version plus the two counts.
pub const FIXED_PREFIX: usize = 8;

/// Offset sentinel marking a null column.
pub const NULL_OFFSET: i32 = -1;

/// Parsed value-string header with the derived id -> offset mapping.
#[derive(Debug)]
pub struct ValueHeader {
    pub cnt_not_null: u16,
    pub cnt_null: u16,
    /// Position of the payload region: `8 + 6 * total`.
    pub data_pos: usize,
    id_to_offset: HashMap<i16, i32>,
}

impl ValueHeader {
    /// Parses the header from a buffer whose cursor sits just past the
    /// schema version. Consumes the two counts sequentially; the id and
    /// offset arrays are read positionally and leave the cursor alone.
    pub fn parse(buf: &mut Buf) -> Result<Self> {
        let cnt_not_null = buf.read_i16()?;
        let cnt_null = buf.read_i16()?;
        if cnt_not_null < 0 || cnt_null < 0 {
            return Err(CodecError::Malformed("negative column count"));
        }
        let (cnt_not_null, cnt_null) = (cnt_not_null as u16, cnt_null as u16);
        let total = cnt_not_null as usize + cnt_null as usize;

        let mut ids_pos = FIXED_PREFIX;
        let mut offset_pos = FIXED_PREFIX + ID_WIDTH * total;
        let data_pos = offset_pos + OFFSET_WIDTH * total;

        let mut id_to_offset = HashMap::with_capacity(total);
        for _ in 0..total {
            let id = buf.read_i16_at(ids_pos)?;
            let offset = buf.read_i32_at(offset_pos)?;
            if offset < NULL_OFFSET {
                return Err(CodecError::Malformed("offset below the null sentinel"));
            }
            id_to_offset.insert(id, offset);
            ids_pos += ID_WIDTH;
            offset_pos += OFFSET_WIDTH;
        }

        Ok(Self {
            cnt_not_null,
            cnt_null,
            data_pos,
            id_to_offset,
        })
    }

    /// True when every non-key column of the record is null.
    pub fn all_null(&self) -> bool {
        self.cnt_not_null == 0
    }

    /// Payload offset for a column index: `None` when the column is not in
    /// the header, `Some(-1)` when it is null.
    pub fn offset_of(&self, index: usize) -> Option<i32> {
        self.id_to_offset.get(&(index as i16)).copied()
    }
}
