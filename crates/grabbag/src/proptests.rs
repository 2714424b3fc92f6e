//! Property-based tests for partitioning and disjointness.
