//! Edge case tests for kevac-par
