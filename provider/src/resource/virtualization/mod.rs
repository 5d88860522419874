//! Virtualization resources
//!
//! Handles: Cluster, VirtualMachine, VM Interface

pub mod cluster;
pub mod interface;
pub mod virtual_machine;
