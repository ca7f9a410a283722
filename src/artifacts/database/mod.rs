//! Database entry types
//!
//! Entries represent references to stored objects together with their mode,
//! as read back out of tree objects.

pub mod database_entry;
