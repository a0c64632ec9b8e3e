//! Stubbed candidate-search collaborator.
//!
//! Stands in for the real search backend: fixed candidate roster, a small
//! rotation of canned reply texts, and a simulated network delay. The call
//! surface is shaped like the eventual HTTP client so the UI never has to
//! know it is talking to a stub.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use crate::chat::Message;

/// Contact details attached to a candidate profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// A sourced candidate profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub name: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub experience: String,
    pub skills: Vec<String>,
    pub match_score: u8,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<ContactInfo>,
}

/// A search request: the conversation so far plus the message being sent.
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest {
    pub messages: Vec<Message>,
    pub query: String,
}

/// The collaborator's answer: reply text plus structured candidate data.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub reply: String,
    pub candidates: Vec<Candidate>,
}

/// Client for the stubbed search backend.
///
/// Replies rotate deterministically from `seed`, which keeps tests and
/// scripted demos reproducible. `fail` makes every call error, for
/// exercising the failure path end to end.
#[derive(Debug)]
pub struct SearchClient {
    latency: Duration,
    fail: bool,
    seed: u64,
    calls: AtomicU64,
}

impl SearchClient {
    pub fn new(latency: Duration, seed: u64, fail: bool) -> Self {
        Self {
            latency,
            fail,
            seed,
            calls: AtomicU64::new(0),
        }
    }

    /// Sends a search request and waits for the reply.
    pub async fn send(&self, request: SearchRequest) -> Result<SearchResponse> {
        tokio::time::sleep(self.latency).await;
        if self.fail {
            bail!("failed to get a response from the search service");
        }
        let turn = self.seed.wrapping_add(self.calls.fetch_add(1, Ordering::Relaxed));
        let candidates = mock_candidates();
        let index = usize::try_from(turn % REPLY_COUNT).unwrap_or(0);
        let reply = render_reply(index, &request.query, &candidates);
        tracing::debug!(
            reply = index,
            candidates = candidates.len(),
            "search reply ready"
        );
        Ok(SearchResponse { reply, candidates })
    }
}

const REPLY_COUNT: u64 = 3;

/// The fixed roster every search "finds".
fn mock_candidates() -> Vec<Candidate> {
    vec![
        Candidate {
            id: "1".to_string(),
            name: "Sarah Chen".to_string(),
            title: "Senior React Developer".to_string(),
            company: "TechCorp Inc.".to_string(),
            location: "San Francisco, CA".to_string(),
            experience: "6 years".to_string(),
            skills: ["React", "TypeScript", "Node.js", "GraphQL", "AWS"]
                .map(String::from)
                .to_vec(),
            match_score: 95,
            summary: "Experienced React developer with strong TypeScript skills and cloud architecture experience.".to_string(),
            contact: Some(ContactInfo {
                email: Some("sarah.chen@example.com".to_string()),
                linkedin: Some("https://linkedin.com/in/sarahchen".to_string()),
                phone: None,
            }),
        },
        Candidate {
            id: "2".to_string(),
            name: "Michael Rodriguez".to_string(),
            title: "Full Stack Engineer".to_string(),
            company: "StartupXYZ".to_string(),
            location: "San Francisco, CA".to_string(),
            experience: "5 years".to_string(),
            skills: ["React", "Python", "PostgreSQL", "Docker", "Kubernetes"]
                .map(String::from)
                .to_vec(),
            match_score: 88,
            summary: "Full-stack engineer with expertise in React frontend and Python backend development.".to_string(),
            contact: Some(ContactInfo {
                email: Some("michael.r@example.com".to_string()),
                linkedin: Some("https://linkedin.com/in/michaelrodriguez".to_string()),
                phone: None,
            }),
        },
        Candidate {
            id: "3".to_string(),
            name: "Emily Johnson".to_string(),
            title: "Frontend Developer".to_string(),
            company: "DesignStudio".to_string(),
            location: "San Francisco, CA".to_string(),
            experience: "4 years".to_string(),
            skills: ["React", "Vue.js", "CSS", "JavaScript", "Figma"]
                .map(String::from)
                .to_vec(),
            match_score: 82,
            summary: "Creative frontend developer with strong design sensibilities and modern framework expertise.".to_string(),
            contact: Some(ContactInfo {
                email: Some("emily.johnson@example.com".to_string()),
                linkedin: Some("https://linkedin.com/in/emilyjohnson".to_string()),
                phone: None,
            }),
        },
    ]
}

fn render_reply(index: usize, query: &str, candidates: &[Candidate]) -> String {
    match index {
        0 => render_top_matches(query, candidates),
        1 => render_analysis(candidates),
        _ => render_pipeline(candidates),
    }
}

fn render_top_matches(query: &str, candidates: &[Candidate]) -> String {
    let mut out = format!(
        "I found {} candidates matching your requirements for \"{}\". Here are the top matches:\n\nTop Candidates:\n",
        candidates.len(),
        query
    );
    for candidate in candidates {
        out.push_str(&format!(
            "\n{} - {} at {}\n  {} experience in {}\n  Skills: {}\n  Match Score: {}%\n  Summary: {}\n",
            candidate.name,
            candidate.title,
            candidate.company,
            candidate.experience,
            candidate.location,
            candidate.skills.join(", "),
            candidate.match_score,
            candidate.summary,
        ));
    }
    out.push_str(
        "\nWould you like me to search for more candidates or provide additional details about any of these profiles?",
    );
    out
}

fn render_analysis(candidates: &[Candidate]) -> String {
    let average: u32 = candidates
        .iter()
        .map(|c| u32::from(c.match_score))
        .sum::<u32>()
        / u32::try_from(candidates.len().max(1)).unwrap_or(1);
    format!(
        "Based on your job description, I've identified several strong candidates. Here's my analysis:\n\n\
         Search Summary:\n\
         - Found {count} highly qualified candidates\n\
         - Average match score: {average}%\n\
         - All candidates are located in San Francisco as requested\n\
         - Strong React/TypeScript skill alignment\n\n\
         Key Insights:\n\
         - Sarah Chen stands out with 6 years of experience and AWS cloud skills\n\
         - Michael Rodriguez brings valuable full-stack capabilities\n\
         - Emily Johnson offers strong design collaboration experience\n\n\
         The candidates show excellent technical alignment with your requirements. Sarah Chen appears to be the \
         strongest match with her senior-level experience and comprehensive skill set.\n\n\
         Would you like me to:\n\
         1. Search for additional candidates?\n\
         2. Provide more detailed profiles?\n\
         3. Filter by specific criteria?",
        count = candidates.len(),
    )
}

fn render_pipeline(candidates: &[Candidate]) -> String {
    format!(
        "Great! I've analyzed your requirements and found some excellent matches. Here's what I discovered:\n\n\
         Candidate Pipeline Analysis:\n\
         - {count} qualified candidates identified\n\
         - All meet location requirements (San Francisco)\n\
         - Strong technical skill alignment\n\
         - Experience range: 4-6 years\n\n\
         Standout Profiles:\n\n\
         Sarah Chen is your top match with:\n\
         - Senior-level React expertise (6 years)\n\
         - Strong TypeScript and cloud architecture background\n\
         - Currently at TechCorp Inc.\n\
         - 95% compatibility score\n\n\
         The other candidates (Michael Rodriguez and Emily Johnson) also show strong potential with complementary \
         skills in full-stack development and design collaboration.\n\n\
         Next steps: Would you like me to reach out to these candidates or search for additional profiles with \
         different criteria?",
        count = candidates.len(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(text: &str) -> SearchRequest {
        SearchRequest {
            messages: vec![Message::user(text)],
            query: text.to_string(),
        }
    }

    fn client(seed: u64, fail: bool) -> SearchClient {
        SearchClient::new(Duration::ZERO, seed, fail)
    }

    #[tokio::test]
    async fn reply_always_carries_the_full_roster() {
        let client = client(0, false);
        let response = client.send(request("react dev")).await.unwrap();
        assert_eq!(response.candidates.len(), 3);
        assert_eq!(response.candidates[0].name, "Sarah Chen");
        assert_eq!(response.candidates[0].match_score, 95);
        assert_eq!(response.candidates[2].name, "Emily Johnson");
    }

    #[tokio::test]
    async fn first_reply_echoes_the_query() {
        let client = client(0, false);
        let response = client.send(request("staff platform engineer")).await.unwrap();
        assert!(response.reply.contains("\"staff platform engineer\""));
    }

    #[tokio::test]
    async fn replies_rotate_deterministically_from_the_seed() {
        let client = client(1, false);
        let first = client.send(request("q")).await.unwrap().reply;
        let second = client.send(request("q")).await.unwrap().reply;
        let third = client.send(request("q")).await.unwrap().reply;
        let fourth = client.send(request("q")).await.unwrap().reply;

        assert!(first.starts_with("Based on your job description"));
        assert!(second.starts_with("Great! I've analyzed"));
        assert!(third.starts_with("I found 3 candidates"));
        assert_eq!(first, fourth);
    }

    #[tokio::test]
    async fn fail_flag_turns_every_call_into_an_error() {
        let client = client(0, true);
        let err = client.send(request("q")).await.unwrap_err();
        assert!(err.to_string().contains("search service"));
    }

    #[tokio::test(start_paused = true)]
    async fn send_waits_out_the_configured_latency() {
        let client = SearchClient::new(Duration::from_millis(1500), 0, false);
        let started = tokio::time::Instant::now();
        client.send(request("q")).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(1500));
    }

    #[test]
    fn candidate_json_omits_missing_contact_fields() {
        let roster = mock_candidates();
        let json = serde_json::to_value(&roster[1]).unwrap();
        assert_eq!(json["name"], "Michael Rodriguez");
        assert!(json["contact"].get("phone").is_none());
    }

    #[test]
    fn request_serializes_messages_with_lowercase_roles() {
        let json = serde_json::to_value(request("golang devs")).unwrap();
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["query"], "golang devs");
    }
}
