//! Workspace test suite, grouped by crate and component.
