use super::ElementChannel;
use crate::error::Se05xResult;

/// Opens the authenticated command channel to the element
///
/// Transport, key exchange and session authentication all live behind this
/// trait; the control object only ever sees an open channel.
pub trait Connector {
    type Channel: ElementChannel;

    fn open_session(&self) -> Se05xResult<Self::Channel>;
}
