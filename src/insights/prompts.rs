/// Prompt construction for the insight request.
///
/// The instruction is fixed; only the response language and the dataset
/// vary between requests.
use anyhow::{Context, Result};

use crate::locale::Language;
use crate::record::Record;

/// Build the complete prompt: instruction followed by the records as JSON.
pub fn build_prompt(records: &[Record], language: Language) -> Result<String> {
    let data = serde_json::to_string_pretty(records).context("failed to serialize records")?;
    Ok(format!(
        "Analyze the following banner advertisement performance data.\n\
         Explain which banner locations are performing the best in terms of ROI \
         (cost efficiency vs reach).\n\
         Provide 3 concrete recommendations for optimizing the ad spend based on these metrics.\n\
         Keep the response professional, concise, and in {language}.\n\
         \n\
         Data:\n\
         {data}\n",
        language = language.prompt_name(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::seed::seed_records;

    #[test]
    fn prompt_names_response_language() {
        let prompt = build_prompt(&[], Language::Korean).unwrap();
        assert!(prompt.contains("in Korean."));
        let prompt = build_prompt(&[], Language::English).unwrap();
        assert!(prompt.contains("in English."));
    }

    #[test]
    fn prompt_embeds_records_as_json() {
        let records = seed_records();
        let prompt = build_prompt(&records[..2], Language::Korean).unwrap();
        assert!(prompt.contains("3 concrete recommendations"));
        assert!(prompt.contains("\"location\": \"TOP\""));
        assert!(prompt.contains("\"avgImpressions1M\": 775557"));
        assert!(!prompt.contains("\"B\""));
    }
}
