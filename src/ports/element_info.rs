use crate::error::Se05xResult;

pub trait ElementInfo {
    /// Immutable unique identifier burned in at manufacture
    fn unique_id(&mut self) -> Se05xResult<Vec<u8>>;

    /// Tear the session down. Further commands on this channel fail.
    fn close(&mut self);
}
