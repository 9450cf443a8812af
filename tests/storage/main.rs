//! Integration tests for Layer 2: Storage
//!
//! Tests for entity lifecycle, containment, guarded attributes, and equipment.

mod equipment;
