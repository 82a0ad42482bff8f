use crate::models::{Entry, Profile};

/// Build the similarity instruction for one profile and its candidate pool
///
/// Both documents are embedded as pretty-printed JSON. The model is asked to
/// weigh time periods, life events, geographic locations and major life
/// transitions, and to answer with a JSON array of five entries.
pub fn build_prompt(profile: &Profile, entries: &[Entry]) -> Result<String, serde_json::Error> {
    let profile_json = serde_json::to_string_pretty(profile)?;
    let entries_json = serde_json::to_string_pretty(entries)?;

    Ok(format!(
        "Given the following user profile timeline:\n\
{profile_json}\n\
\n\
And these entries:\n\
{entries_json}\n\
\n\
Please analyze the timeline similarities and return the 5 entries that have the most similar timeline patterns.\n\
Consider factors such as:\n\
- Time periods\n\
- Life events\n\
- Geographic locations\n\
- Major life transitions\n\
\n\
Return the results as a JSON array of the 5 most similar entries.\n"
    ))
}

/// Returns the prompt size when it exceeds `limit` bytes
#[inline]
pub fn exceeds_limit(prompt: &str, limit: usize) -> Option<usize> {
    let size = prompt.len();
    (size > limit).then_some(size)
}
