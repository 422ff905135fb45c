//! Cross-module tests for the collision pipeline
