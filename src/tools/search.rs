//! Web search tool backed by SerpAPI.
//!
//! Reads `SERPAPI_API_KEY` at call time and degrades every failure — missing
//! key, network error, unexpected payload — to a human-readable string, so
//! the observation fed back to the agent is always text.

use serde_json::Value;

use async_trait::async_trait;

use super::Tool;

const SERPAPI_ENDPOINT: &str = "https://serpapi.com/search.json";

/// Google search via SerpAPI.
pub struct SerpSearch;

impl SerpSearch {
    pub const NAME: &'static str = "serp_search";

    pub fn description_text() -> &'static str {
        "A web search engine. Use this when you need to answer questions about current events, \
         facts, or anything not covered by your own knowledge."
    }
}

#[async_trait]
impl Tool for SerpSearch {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        Self::description_text()
    }

    async fn invoke(&self, input: &str) -> String {
        search(input).await
    }
}

/// Run a search and summarize the response.
///
/// Extraction priority: answer-box list, answer-box answer, knowledge-graph
/// description, then the top three organic results as title+snippet blocks,
/// then a "no information found" fallback.
pub async fn search(query: &str) -> String {
    tracing::info!(%query, "Searching via SerpAPI");

    let api_key = match std::env::var("SERPAPI_API_KEY") {
        Ok(key) if !key.is_empty() => key,
        _ => return "Search error: SERPAPI_API_KEY is not set.".to_string(),
    };

    let client = reqwest::Client::new();
    let response = client
        .get(SERPAPI_ENDPOINT)
        .query(&[
            ("engine", "google"),
            ("q", query),
            ("api_key", api_key.as_str()),
            ("gl", "us"),
            ("hl", "en"),
        ])
        .send()
        .await;

    let response = match response {
        Ok(resp) => resp,
        Err(e) => return format!("Search error: {}", e),
    };

    if !response.status().is_success() {
        return format!("Search error: HTTP {}", response.status());
    }

    match response.json::<Value>().await {
        Ok(results) => summarize_results(query, &results),
        Err(e) => format!("Search error: {}", e),
    }
}

fn summarize_results(query: &str, results: &Value) -> String {
    if let Some(list) = results["answer_box_list"].as_array() {
        let lines: Vec<&str> = list.iter().filter_map(|v| v.as_str()).collect();
        if !lines.is_empty() {
            return lines.join("\n");
        }
    }

    if let Some(answer) = results["answer_box"]["answer"].as_str() {
        return answer.to_string();
    }

    if let Some(description) = results["knowledge_graph"]["description"].as_str() {
        return description.to_string();
    }

    if let Some(organic) = results["organic_results"].as_array() {
        if !organic.is_empty() {
            let snippets: Vec<String> = organic
                .iter()
                .take(3)
                .enumerate()
                .map(|(i, res)| {
                    format!(
                        "[{}] {}\n{}",
                        i + 1,
                        res["title"].as_str().unwrap_or(""),
                        res["snippet"].as_str().unwrap_or("")
                    )
                })
                .collect();
            return snippets.join("\n\n");
        }
    }

    format!("Sorry, no information was found for '{}'.", query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn answer_box_list_takes_priority() {
        let results = json!({
            "answer_box_list": ["one", "two"],
            "answer_box": {"answer": "ignored"},
            "knowledge_graph": {"description": "ignored"},
        });
        assert_eq!(summarize_results("q", &results), "one\ntwo");
    }

    #[test]
    fn answer_box_answer_beats_knowledge_graph() {
        let results = json!({
            "answer_box": {"answer": "42"},
            "knowledge_graph": {"description": "ignored"},
        });
        assert_eq!(summarize_results("q", &results), "42");
    }

    #[test]
    fn knowledge_graph_beats_organic_results() {
        let results = json!({
            "knowledge_graph": {"description": "a description"},
            "organic_results": [{"title": "t", "snippet": "s"}],
        });
        assert_eq!(summarize_results("q", &results), "a description");
    }

    #[test]
    fn organic_results_are_capped_at_three() {
        let results = json!({
            "organic_results": [
                {"title": "t1", "snippet": "s1"},
                {"title": "t2", "snippet": "s2"},
                {"title": "t3", "snippet": "s3"},
                {"title": "t4", "snippet": "s4"},
            ],
        });
        let summary = summarize_results("q", &results);
        assert_eq!(summary, "[1] t1\ns1\n\n[2] t2\ns2\n\n[3] t3\ns3");
    }

    #[test]
    fn empty_payload_falls_back_to_not_found() {
        let summary = summarize_results("rare topic", &json!({}));
        assert_eq!(
            summary,
            "Sorry, no information was found for 'rare topic'."
        );
    }
}
