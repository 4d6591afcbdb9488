/*!
 * Main test entry point for narrimate test suite
 */

// Import common test utilities
pub mod common;

// Import unit tests
mod unit {
    // Timing model and word segmentation tests
    pub mod timing_tests;

    // App configuration tests
    pub mod config_tests;

    // Artifact storage tests
    pub mod storage_tests;
}

// Import integration tests
mod integration {
    // End-to-end pipeline fork/join tests
    pub mod pipeline_tests;
}
