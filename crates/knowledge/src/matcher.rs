//! Keyword matcher that answers when the remote model cannot.
//!
//! Rules are checked in a fixed priority order against the lower-cased
//! question and the first hit wins, so "car wash services and contact info"
//! lands on the car wash answer rather than the contact one.

use crate::table::KnowledgeTable;
use std::sync::Arc;
use tracing::debug;

/// What a question is about, as far as the keyword rules can tell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    CarWash,
    Services,
    Contact,
    Hours,
    Unknown,
}

impl Topic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CarWash => "car_wash",
            Self::Services => "services",
            Self::Contact => "contact",
            Self::Hours => "hours",
            Self::Unknown => "unknown",
        }
    }
}

/// Priority-ordered keyword rules; `Unknown` is the implicit last rule.
const RULES: &[(Topic, &[&str])] = &[
    (Topic::CarWash, &["car wash", "wash service"]),
    (Topic::Services, &["service"]),
    (Topic::Contact, &["contact", "phone", "email"]),
    (Topic::Hours, &["hour", "time"]),
];

/// Deterministic offline answerer.
#[derive(Debug, Clone)]
pub struct FallbackMatcher {
    table: Arc<KnowledgeTable>,
}

impl FallbackMatcher {
    pub fn new(table: Arc<KnowledgeTable>) -> Self {
        Self { table }
    }

    /// A matcher over the built-in table.
    pub fn builtin() -> Self {
        Self::new(Arc::new(KnowledgeTable::builtin()))
    }

    /// Pick the topic of a question by case-insensitive substring match.
    pub fn classify(question: &str) -> Topic {
        let q = question.to_lowercase();
        RULES
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| q.contains(k)))
            .map(|(topic, _)| *topic)
            .unwrap_or(Topic::Unknown)
    }

    /// The canned sentence for a topic.
    pub fn render(&self, topic: Topic) -> String {
        let t = &self.table;
        match topic {
            Topic::CarWash => format!(
                "5K Car Care offers the following car wash services: {}. For more details or to book a service, please contact us.",
                t.car_wash_list()
            ),
            Topic::Services => format!(
                "5K Car Care offers a range of services including: {}. For specific information on any service, please ask or contact us directly.",
                t.service_list()
            ),
            Topic::Contact => format!(
                "You can contact 5K Car Care at:\nPhone: {}\nEmail: {}\nAddress: {}",
                t.contact.phone, t.contact.email, t.contact.address
            ),
            Topic::Hours => format!("5K Car Care is {}.", t.hours),
            Topic::Unknown => format!(
                "I apologize, but I'm having trouble providing specific information at the moment. 5K Car Care offers various services including car wash, detailing, and coating. For the most up-to-date information, please contact us directly at {} or visit our website.",
                t.contact.phone
            ),
        }
    }

    /// Classify and render in one step, returning the topic alongside the text.
    pub fn answer(&self, question: &str) -> (Topic, String) {
        let topic = Self::classify(question);
        debug!(topic = topic.as_str(), "Fallback answer selected");
        (topic, self.render(topic))
    }

    /// Answer a question. Never fails and never returns an empty string.
    pub fn resolve(&self, question: &str) -> String {
        self.answer(question).1
    }
}

impl Default for FallbackMatcher {
    fn default() -> Self {
        Self::builtin()
    }
}
