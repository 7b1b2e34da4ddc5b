/*!
 * Tests for the backend clients against a local mock server
 */

pub mod bhashini_test;
pub mod google_free_test;
