#![allow(dead_code)]

//! Progressive reveal — timed, ordered disclosure of parsed job listings.
//!
//! A single timer drains an ordered queue: each listing is released one
//! delay after the previous one, strictly in input order, none at t=0.
//! This is presentation pacing, not a concurrency mechanism.

use std::time::Duration;

use tokio::sync::mpsc;

use super::listing::JobListing;

/// Spawns the reveal loop and returns the receiving end of the queue.
/// Dropping the receiver stops the loop.
pub fn reveal_listings(listings: Vec<JobListing>, delay: Duration) -> mpsc::Receiver<JobListing> {
    let (tx, rx) = mpsc::channel(listings.len().max(1));
    tokio::spawn(async move {
        for listing in listings {
            tokio::time::sleep(delay).await;
            if tx.send(listing).await.is_err() {
                break;
            }
        }
    });
    rx
}
