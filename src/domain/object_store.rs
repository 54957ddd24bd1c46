use tracing::debug;

use super::{BindRequest, Se05x};
use crate::error::Se05xResult;
use crate::logic::write_output;
use crate::ports::{Connector, KeyStore};

impl<C: Connector> Se05x<C> {
    /// Read the binary object at `object_id` into `out`, returning its length.
    pub fn read_binary_object(&mut self, object_id: u32, out: &mut [u8]) -> Se05xResult<usize> {
        let handle = self.bind(object_id, BindRequest::READ_DATA)?;
        let data = self.channel()?.get_key(&handle)?;
        write_output(out, &data)
    }

    /// Create or overwrite the binary object at `object_id`
    ///
    /// # Errors
    ///
    /// `ElementFull` if the element has no room for `data`, which is distinct
    /// from a caller buffer being too small.
    pub fn write_binary_object(&mut self, object_id: u32, data: &[u8]) -> Se05xResult<()> {
        let handle = self.bind(object_id, BindRequest::WRITE_DATA)?;
        self.channel()?.set_key(&handle, data)?;
        debug!("Wrote {} bytes to {}", data.len(), handle.id());
        Ok(())
    }

    pub fn object_exists(&mut self, object_id: u32) -> Se05xResult<bool> {
        let (id, channel) = self.resolve(object_id)?;
        Ok(channel.object_info(id)?.is_some())
    }

    /// Erase whatever is stored at `object_id`; `NotFound` if nothing is.
    pub fn delete_object(&mut self, object_id: u32) -> Se05xResult<()> {
        let (id, channel) = self.resolve(object_id)?;
        channel.erase_object(id)?;
        debug!("Deleted {}", id);
        Ok(())
    }
}
