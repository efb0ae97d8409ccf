use pnet::util::MacAddr;

/// Maps a hardware address to the manufacturer registered for its prefix.
pub trait VendorRepository: Send + Sync {
    /// `None` when the first three octets are not in the directory.
    fn get_vendor(&self, mac_addr: MacAddr) -> Option<String>;
}
