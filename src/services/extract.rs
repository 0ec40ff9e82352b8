// Email extraction service - pulls contacts, prices, dates and follow-ups
// out of raw email text. Uses the Gemini API when a key is configured and
// falls back to a regex heuristic pass otherwise or on any LLM failure.

use regex::Regex;
use reqwest::Client;
use serde_json::{json, Value};

use crate::config::Config;
use crate::models::{
    ExtractedContact, ExtractedDate, ExtractedEmailData, ExtractedFollowUp, ExtractedPrice,
};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

const GEMINI_MODEL: &str = "gemini-2.0-flash";

const EXTRACTION_PROMPT: &str = r#"Extract structured data from this email between a householder and a contractor.
Respond with JSON only, no prose, matching exactly this shape:
{"contacts":[{"name":"","company":"","phone":"","email":""}],
"prices":[{"amount":0,"currency":"GBP","context":""}],
"dates":[{"date":"YYYY-MM-DD","context":""}],
"follow_ups":[{"description":"","due_date":null}],
"topics":[""],
"summary":""}

Subject: {subject}
From: {sender}

{content}"#;

/// Extraction client with heuristic fallback
pub struct ExtractService {
    client: Client,
    api_key: Option<String>,
}

impl ExtractService {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            api_key: config.gemini_api_key.clone(),
        }
    }

    /// Extract structured data from an email. Returns the data and the method
    /// used, "llm" or "heuristic".
    pub async fn extract(
        &self,
        content: &str,
        subject: &str,
        sender: &str,
    ) -> (ExtractedEmailData, &'static str) {
        if let Some(api_key) = &self.api_key {
            match self.extract_with_llm(api_key, content, subject, sender).await {
                Ok(data) => return (data, "llm"),
                Err(e) => {
                    tracing::warn!("LLM extraction failed, using heuristics: {}", e);
                }
            }
        }
        (heuristic_extract(content, subject, sender), "heuristic")
    }

    async fn extract_with_llm(
        &self,
        api_key: &str,
        content: &str,
        subject: &str,
        sender: &str,
    ) -> Result<ExtractedEmailData, BoxError> {
        let prompt = EXTRACTION_PROMPT
            .replace("{subject}", subject)
            .replace("{sender}", sender)
            .replace("{content}", content);

        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            GEMINI_MODEL, api_key
        );
        let body = json!({
            "contents": [{"parts": [{"text": prompt}]}],
            "generationConfig": {"temperature": 0.1}
        });

        let response = self.client.post(&url).json(&body).send().await?;
        if !response.status().is_success() {
            return Err(format!("Gemini returned status {}", response.status()).into());
        }

        let reply: Value = response.json().await?;
        let text = reply["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or("Gemini reply missing text part")?;

        parse_llm_reply(text).ok_or_else(|| "Gemini reply was not valid extraction JSON".into())
    }
}

/// Parse the model's reply, tolerating markdown code fences around the JSON.
pub fn parse_llm_reply(text: &str) -> Option<ExtractedEmailData> {
    let trimmed = text
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();
    serde_json::from_str(trimmed).ok()
}

/// Regex pass over the raw email: money amounts, ISO and UK-slash dates,
/// email addresses, phone numbers and follow-up phrasing.
pub fn heuristic_extract(content: &str, subject: &str, sender: &str) -> ExtractedEmailData {
    let price_re = Regex::new(r"£\s?([\d,]+(?:\.\d{1,2})?)").unwrap();
    let iso_date_re = Regex::new(r"\b(\d{4})-(\d{2})-(\d{2})\b").unwrap();
    let uk_date_re = Regex::new(r"\b(\d{1,2})/(\d{1,2})/(\d{4})\b").unwrap();
    let email_re = Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap();
    let phone_re = Regex::new(r"(?:\+44\s?\d{3,4}|0\d{3,4})[\s-]?\d{3}[\s-]?\d{3,4}").unwrap();

    let mut data = ExtractedEmailData {
        summary: content
            .lines()
            .find(|line| !line.trim().is_empty())
            .unwrap_or_default()
            .trim()
            .chars()
            .take(160)
            .collect(),
        ..Default::default()
    };

    for line in content.lines() {
        for capture in price_re.captures_iter(line) {
            let raw = capture[1].replace(',', "");
            if let Ok(amount) = raw.parse::<f64>() {
                data.prices.push(ExtractedPrice {
                    amount,
                    currency: "GBP".to_string(),
                    context: line.trim().to_string(),
                });
            }
        }

        for capture in iso_date_re.captures_iter(line) {
            if let Some(date) = parse_ymd(&capture[1], &capture[2], &capture[3]) {
                data.dates.push(ExtractedDate {
                    date: Some(date),
                    context: line.trim().to_string(),
                });
            }
        }
        for capture in uk_date_re.captures_iter(line) {
            if let Some(date) = parse_ymd(&capture[3], &capture[2], &capture[1]) {
                data.dates.push(ExtractedDate {
                    date: Some(date),
                    context: line.trim().to_string(),
                });
            }
        }

        let lowered = line.to_lowercase();
        if ["follow up", "get back to", "let me know", "please confirm"]
            .iter()
            .any(|cue| lowered.contains(cue))
        {
            data.follow_ups.push(ExtractedFollowUp {
                description: line.trim().to_string(),
                due_date: None,
            });
        }
    }

    let mut addresses: Vec<String> = email_re
        .find_iter(content)
        .map(|m| m.as_str().to_string())
        .collect();
    if !sender.trim().is_empty() {
        addresses.insert(0, sender.trim().to_string());
    }
    addresses.dedup();
    let phones: Vec<String> = phone_re
        .find_iter(content)
        .map(|m| m.as_str().to_string())
        .collect();

    for (index, address) in addresses.iter().enumerate() {
        data.contacts.push(ExtractedContact {
            name: address
                .split('@')
                .next()
                .unwrap_or_default()
                .replace(['.', '_'], " "),
            company: String::new(),
            phone: phones.get(index).cloned().unwrap_or_default(),
            email: address.clone(),
        });
    }

    data.topics = subject
        .split_whitespace()
        .filter(|word| word.len() > 3)
        .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
        .filter(|word| !word.is_empty())
        .collect();

    data
}

fn parse_ymd(year: &str, month: &str, day: &str) -> Option<chrono::NaiveDate> {
    chrono::NaiveDate::from_ymd_opt(
        year.parse().ok()?,
        month.parse().ok()?,
        day.parse().ok()?,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heuristic_finds_prices_and_dates() {
        let content = "Hi,\nThe tiling will be £1,250.50 including materials.\nWe could start on 12/05/2025 or 2025-06-02.\nPlease confirm which suits.\n";
        let data = heuristic_extract(content, "Bathroom tiling quote", "dave@tilers.co.uk");

        assert_eq!(data.prices.len(), 1);
        assert_eq!(data.prices[0].amount, 1250.50);
        assert_eq!(data.prices[0].currency, "GBP");

        let dates: Vec<_> = data.dates.iter().filter_map(|d| d.date).collect();
        assert_eq!(dates.len(), 2);
        assert!(dates.contains(&chrono::NaiveDate::from_ymd_opt(2025, 5, 12).unwrap()));
        assert!(dates.contains(&chrono::NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()));

        assert_eq!(data.follow_ups.len(), 1);
        assert!(!data.contacts.is_empty());
        assert_eq!(data.contacts[0].email, "dave@tilers.co.uk");
        assert!(data.topics.contains(&"tiling".to_string()));
    }

    #[test]
    fn test_heuristic_handles_empty_email() {
        let data = heuristic_extract("", "", "");
        assert!(data.prices.is_empty());
        assert!(data.dates.is_empty());
        assert!(data.contacts.is_empty());
        assert_eq!(data.summary, "");
    }

    #[test]
    fn test_parse_llm_reply_strips_code_fences() {
        let reply = "```json\n{\"contacts\":[],\"prices\":[{\"amount\":900,\"currency\":\"GBP\",\"context\":\"quote\"}],\"dates\":[],\"follow_ups\":[],\"topics\":[],\"summary\":\"a quote\"}\n```";
        let data = parse_llm_reply(reply).unwrap();
        assert_eq!(data.prices.len(), 1);
        assert_eq!(data.prices[0].amount, 900.0);
        assert_eq!(data.summary, "a quote");
    }

    #[test]
    fn test_parse_llm_reply_rejects_garbage() {
        assert!(parse_llm_reply("sorry, I cannot help with that").is_none());
    }
}
