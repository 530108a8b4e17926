//! Per-table query functions. All take a borrowed connection, usually
//! `UnitOfWork::conn()`, and never open transactions of their own.

pub mod orders;
pub mod products;
pub mod sessions;
pub mod users;
