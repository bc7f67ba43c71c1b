//! Read-only lookups against public intelligence APIs.

pub mod abuseipdb;
pub mod embeds;
pub mod ncmec;
