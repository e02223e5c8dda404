//! End-to-end tests: appointment workflow through notification delivery.

mod helpers;

mod audience_test;
mod email_test;
mod feed_test;
mod privacy_test;
mod workflow_test;
