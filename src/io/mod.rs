mod cursor;
mod source;

pub use cursor::{ByteOrder, Cursor};
pub use source::{ByteSource, FileSource, MemorySource, MAX_PREFIX_LEN};
