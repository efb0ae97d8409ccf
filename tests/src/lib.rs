//! Cross-crate tests of the discovery pipeline.
//!
//! Everything here runs without raw sockets: the link-layer and ICMP stages
//! are replaced by in-memory fakes.

#[cfg(test)]
mod discovery;
#[cfg(test)]
mod net;
