//! I/O utilities for binary buffers
//!
//! This module provides the byte order strategies used by the field
//! codec and the sample readers.

pub mod byte_order;
