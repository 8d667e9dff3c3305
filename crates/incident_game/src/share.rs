//! Completion share-link construction.

use url::form_urlencoded::byte_serialize;

pub const SHARE_PAGE_URL: &str = "http://incident.f5.si";
const TWEET_INTENT_URL: &str = "https://twitter.com/intent/tweet";

/// Build the tweet-intent link for a finished run.
#[must_use]
pub fn share_url(rank: &str, score: u32) -> String {
    let text = format!(
        "I just cleared IncidentRoot!\nRank: {rank}\nScore: {score}\n\n\
         Can you resolve all 10 Linux incidents?\n"
    );
    format!(
        "{TWEET_INTENT_URL}?text={}&url={}",
        percent_encode(&text),
        percent_encode(SHARE_PAGE_URL)
    )
}

fn percent_encode(text: &str) -> String {
    byte_serialize(text.as_bytes()).collect()
}
