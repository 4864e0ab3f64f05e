//! Unit tests for mail module
