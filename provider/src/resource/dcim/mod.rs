//! DCIM (Data Center Infrastructure Management) resources
//!
//! Handles: Site, Rack, DeviceRole, Platform

pub mod device_role;
pub mod platform;
pub mod rack;
pub mod site;
