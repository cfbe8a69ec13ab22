//! Shared pieces used by every ribbon crate: glam newtypes that can be uploaded as-is and
//! serialized as plain sequences, and the tracing installation of the host application.

pub mod serde_glam;
pub mod trace;
